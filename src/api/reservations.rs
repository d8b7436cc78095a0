//! Reserved hours recorded in the local store

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::reservation::{RecordReservation, ReservationRecord, ReservedDay},
    AppState,
};

fn reserved_days(record: &ReservationRecord, capacity: usize) -> Vec<ReservedDay> {
    record
        .0
        .keys()
        .map(|date| ReservedDay {
            date: *date,
            hours: record.reserved_hours(*date).into_iter().collect(),
            fully_reserved: record.is_fully_reserved(*date, capacity),
        })
        .collect()
}

/// Reserved hours per date
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "Reserved days", body = Vec<ReservedDay>)
    )
)]
pub async fn list_reservations(State(state): State<AppState>) -> Json<Vec<ReservedDay>> {
    let record = state.services.repository.reservations.load().await;
    Json(reserved_days(&record, state.config.booking.daily_capacity))
}

/// Mark the same hours reserved on several dates
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = RecordReservation,
    responses(
        (status = 201, description = "Reserved days after recording", body = Vec<ReservedDay>),
        (status = 400, description = "Invalid hours", body = crate::error::ErrorResponse)
    )
)]
pub async fn record_reservation(
    State(state): State<AppState>,
    Json(data): Json<RecordReservation>,
) -> AppResult<(StatusCode, Json<Vec<ReservedDay>>)> {
    let record = state
        .services
        .repository
        .reservations
        .record(&data.dates, data.start_hour, data.end_hour)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(reserved_days(&record, state.config.booking.daily_capacity)),
    ))
}
