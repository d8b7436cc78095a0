//! In-memory registry of open booking sessions

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::enums::{IceType, Lang},
};

use super::selection::BookingSession;

struct OpenSession {
    session: BookingSession,
    last_used: Instant,
}

impl OpenSession {
    fn touch(&mut self) -> &mut BookingSession {
        self.last_used = Instant::now();
        &mut self.session
    }
}

/// Open sessions keyed by id. A session unused for `idle_timeout` is
/// dropped at the next `create`, standing for a page view that was closed
/// without saying so.
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<RwLock<HashMap<Uuid, OpenSession>>>,
    idle_timeout: Duration,
}

fn unknown(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {} not found", id))
}

impl SessionService {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
        }
    }

    pub async fn create(&self, ice_type: IceType, lang: Lang) -> BookingSession {
        let session = BookingSession::new(ice_type, lang);
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, open| open.last_used.elapsed() < self.idle_timeout);
        if sessions.len() < before {
            tracing::debug!("Dropped {} idle booking sessions", before - sessions.len());
        }

        sessions.insert(
            session.id,
            OpenSession {
                session: session.clone(),
                last_used: Instant::now(),
            },
        );
        tracing::debug!("Opened booking session {}", session.id);
        session
    }

    /// Copy of the session's current state
    pub async fn get(&self, id: Uuid) -> AppResult<BookingSession> {
        self.sessions
            .write()
            .await
            .get_mut(&id)
            .map(|open| open.touch().clone())
            .ok_or_else(|| unknown(id))
    }

    /// Run `f` against the session under the write lock. A failing `f`
    /// leaves the stored session as `f` left it, so mutations must check
    /// before they change anything.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BookingSession) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut sessions = self.sessions.write().await;
        let open = sessions.get_mut(&id).ok_or_else(|| unknown(id))?;
        f(open.touch())
    }

    pub async fn close(&self, id: Uuid) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| tracing::debug!("Closed booking session {}", id))
            .ok_or_else(|| unknown(id))
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
