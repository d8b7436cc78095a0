//! Season calendar endpoints (grids, day details, events panel)

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        booking::DayDetail,
        calendar::{MonthGrid, Season},
        enums::Lang,
        event::EventListing,
    },
    services::{availability::DEFAULT_UPCOMING_LIMIT, selection::BookingSession},
    AppState,
};

use super::ValidPath;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    /// Label language (fr by default)
    pub lang: Option<Lang>,
    /// Booking session whose selected dates are flagged
    pub session: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventsQuery {
    /// Maximum number of dated events (8 by default)
    pub limit: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct SeasonResponse {
    pub season: Season,
    pub today: NaiveDate,
    pub months: Vec<MonthGrid>,
}

async fn load_session(state: &AppState, id: Option<Uuid>) -> AppResult<Option<BookingSession>> {
    match id {
        Some(id) => Ok(Some(state.services.sessions.get(id).await?)),
        None => Ok(None),
    }
}

/// The twelve months of the booking season
#[utoipa::path(
    get,
    path = "/season",
    tag = "calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Season grid", body = SeasonResponse),
        (status = 404, description = "Unknown session", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_season(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<SeasonResponse>> {
    let today = state.services.today();
    let session = load_session(&state, query.session).await?;
    let availability = &state.services.availability;

    let months = availability
        .season_grid(today, query.lang.unwrap_or_default(), session.as_ref())
        .await;

    Ok(Json(SeasonResponse {
        season: availability.season(today),
        today,
        months,
    }))
}

/// One month of the booking season
#[utoipa::path(
    get,
    path = "/season/{year}/{month}",
    tag = "calendar",
    params(
        ("year" = i32, Path, description = "Year"),
        ("month" = u32, Path, description = "Month (1-12)"),
        CalendarQuery
    ),
    responses(
        (status = 200, description = "Month grid", body = MonthGrid),
        (status = 404, description = "Month outside the season", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_month(
    State(state): State<AppState>,
    ValidPath((year, month)): ValidPath<(i32, u32)>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<MonthGrid>> {
    let session = load_session(&state, query.session).await?;
    let grid = state
        .services
        .availability
        .month_grid(
            year,
            month,
            state.services.today(),
            query.lang.unwrap_or_default(),
            session.as_ref(),
        )
        .await?;
    Ok(Json(grid))
}

/// Status, periods, slots and prices of a day
#[utoipa::path(
    get,
    path = "/days/{date}",
    tag = "calendar",
    params(
        ("date" = String, Path, description = "ISO date (YYYY-MM-DD)"),
        CalendarQuery
    ),
    responses(
        (status = 200, description = "Day details", body = DayDetail),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_day(
    State(state): State<AppState>,
    ValidPath(date): ValidPath<NaiveDate>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<DayDetail>> {
    let detail = state
        .services
        .availability
        .day_detail(date, state.services.today(), query.lang.unwrap_or_default())
        .await;
    Ok(Json(detail))
}

/// Running promotion, next events and tournaments still to be scheduled
#[utoipa::path(
    get,
    path = "/events/upcoming",
    tag = "calendar",
    params(EventsQuery),
    responses(
        (status = 200, description = "Upcoming events", body = Vec<EventListing>)
    )
)]
pub async fn upcoming_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<EventListing>> {
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);
    Json(
        state
            .services
            .availability
            .upcoming_events(state.services.today(), limit),
    )
}

/// Events of the season that already took place
#[utoipa::path(
    get,
    path = "/events/completed",
    tag = "calendar",
    responses(
        (status = 200, description = "Completed events", body = Vec<EventListing>)
    )
)]
pub async fn completed_events(State(state): State<AppState>) -> Json<Vec<EventListing>> {
    Json(
        state
            .services
            .availability
            .completed_events(state.services.today()),
    )
}
