//! Booking session endpoints: selection, quote and submission

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        booking::{
            CreateSession, MailtoResponse, SessionView, SetIceType, SetWindow, SubmitReservation,
            TotalQuote,
        },
        enums::PeriodId,
    },
    services::{periods::periods_for, pricing::total_price_for},
    AppState,
};

use super::ValidPath;

/// Open a booking session
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "sessions",
    request_body = CreateSession,
    responses(
        (status = 201, description = "Session opened", body = SessionView)
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(data): Json<CreateSession>,
) -> (StatusCode, Json<SessionView>) {
    let session = state
        .services
        .sessions
        .create(data.ice_type.unwrap_or_default(), data.lang.unwrap_or_default())
        .await;
    (StatusCode::CREATED, Json(session.view()))
}

/// Current selection and quote of a session
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session state", body = SessionView),
        (status = 404, description = "Unknown session", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<SessionView>> {
    let session = state.services.sessions.get(id).await?;
    Ok(Json(session.view()))
}

/// Close a session, discarding its selection
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 204, description = "Session closed"),
        (status = 404, description = "Unknown session", body = crate::error::ErrorResponse)
    )
)]
pub async fn close_session(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<StatusCode> {
    state.services.sessions.close(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Switch between full ice and a half (left/right)
#[utoipa::path(
    put,
    path = "/sessions/{id}/ice-type",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SetIceType,
    responses(
        (status = 200, description = "Session state", body = SessionView)
    )
)]
pub async fn set_ice_type(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    Json(data): Json<SetIceType>,
) -> AppResult<Json<SessionView>> {
    let view = state
        .services
        .sessions
        .update(id, |session| {
            session.set_ice_type(data.ice_type);
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// Select or unselect a date
#[utoipa::path(
    post,
    path = "/sessions/{id}/dates/{date}",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("date" = String, Path, description = "ISO date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Session state", body = SessionView),
        (status = 422, description = "Date fully reserved or already past", body = crate::error::ErrorResponse)
    )
)]
pub async fn toggle_date(
    State(state): State<AppState>,
    ValidPath((id, date)): ValidPath<(Uuid, NaiveDate)>,
) -> AppResult<Json<SessionView>> {
    let today = state.services.today();
    let availability = &state.services.availability;
    let record = availability.reservations().await;
    let status = availability.classify(date, today, &record);
    let fully_reserved = availability.is_fully_reserved(date, &record);

    let view = state
        .services
        .sessions
        .update(id, |session| {
            session.toggle_date(date, today, status, fully_reserved)?;
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// Add or remove a period on a selected date
#[utoipa::path(
    post,
    path = "/sessions/{id}/dates/{date}/periods/{period}",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("date" = String, Path, description = "ISO date (YYYY-MM-DD)"),
        ("period" = PeriodId, Path, description = "morning, evening or allday")
    ),
    responses(
        (status = 200, description = "Session state", body = SessionView),
        (status = 400, description = "Period not offered on that date", body = crate::error::ErrorResponse)
    )
)]
pub async fn toggle_period(
    State(state): State<AppState>,
    ValidPath((id, date, period)): ValidPath<(Uuid, NaiveDate, PeriodId)>,
) -> AppResult<Json<SessionView>> {
    let view = state
        .services
        .sessions
        .update(id, |session| {
            let offered = periods_for(date, session.lang);
            session.toggle_period(date, period, &offered)?;
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// Set or clear the custom time window of a selected date
#[utoipa::path(
    put,
    path = "/sessions/{id}/dates/{date}/window",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("date" = String, Path, description = "ISO date (YYYY-MM-DD)")
    ),
    request_body = SetWindow,
    responses(
        (status = 200, description = "Session state", body = SessionView),
        (status = 400, description = "Invalid time range", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_window(
    State(state): State<AppState>,
    ValidPath((id, date)): ValidPath<(Uuid, NaiveDate)>,
    Json(data): Json<SetWindow>,
) -> AppResult<Json<SessionView>> {
    let view = state
        .services
        .sessions
        .update(id, |session| {
            let offered = periods_for(date, session.lang);
            session.set_window(date, data.window, &offered)?;
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// Unselect every date
#[utoipa::path(
    delete,
    path = "/sessions/{id}/selection",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session state", body = SessionView)
    )
)]
pub async fn clear_selection(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<SessionView>> {
    let view = state
        .services
        .sessions
        .update(id, |session| {
            session.clear_all();
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// Total price of the selection
#[utoipa::path(
    get,
    path = "/sessions/{id}/quote",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Total quote", body = TotalQuote)
    )
)]
pub async fn get_quote(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<TotalQuote>> {
    let session = state.services.sessions.get(id).await?;
    Ok(Json(total_price_for(&session)))
}

/// Build the pre-filled reservation e-mail
#[utoipa::path(
    post,
    path = "/sessions/{id}/submit",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SubmitReservation,
    responses(
        (status = 200, description = "mailto link", body = MailtoResponse),
        (status = 400, description = "Invalid contact details", body = crate::error::ErrorResponse),
        (status = 422, description = "Nothing selected", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    Json(data): Json<SubmitReservation>,
) -> AppResult<Json<MailtoResponse>> {
    let session = state.services.sessions.get(id).await?;
    let lang = data.lang.unwrap_or(session.lang);
    let mail = state
        .services
        .email
        .submit(&data.contact, &session, lang)
        .await?;
    Ok(Json(mail))
}
