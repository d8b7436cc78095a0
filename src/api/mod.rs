//! API handlers for the arena booking REST endpoints

pub mod calendar;
pub mod health;
pub mod openapi;
pub mod preferences;
pub mod reservations;
pub mod sessions;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    routing::{delete, get, post, put},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Path extractor whose rejections use the JSON error body
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<T> FromRequestParts<AppState> for ValidPath<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(ValidPath(value))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Calendar
        .route("/season", get(calendar::get_season))
        .route("/season/:year/:month", get(calendar::get_month))
        .route("/days/:date", get(calendar::get_day))
        .route("/events/upcoming", get(calendar::upcoming_events))
        .route("/events/completed", get(calendar::completed_events))
        // Booking sessions
        .route("/sessions", post(sessions::create_session))
        .route("/sessions/:id", get(sessions::get_session))
        .route("/sessions/:id", delete(sessions::close_session))
        .route("/sessions/:id/ice-type", put(sessions::set_ice_type))
        .route("/sessions/:id/dates/:date", post(sessions::toggle_date))
        .route(
            "/sessions/:id/dates/:date/periods/:period",
            post(sessions::toggle_period),
        )
        .route("/sessions/:id/dates/:date/window", put(sessions::set_window))
        .route("/sessions/:id/selection", delete(sessions::clear_selection))
        .route("/sessions/:id/quote", get(sessions::get_quote))
        .route("/sessions/:id/submit", post(sessions::submit))
        // Local store
        .route("/reservations", get(reservations::list_reservations))
        .route("/reservations", post(reservations::record_reservation))
        .route("/preferences", get(preferences::get_preferences))
        .route("/preferences", put(preferences::update_preferences))
        .route("/forms", delete(preferences::clear_all_form_caches))
        .route("/forms/:form_id/cache", get(preferences::get_form_cache))
        .route("/forms/:form_id/cache", put(preferences::save_form_cache))
        .route("/forms/:form_id/cache", delete(preferences::clear_form_cache))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
