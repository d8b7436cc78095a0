//! OpenAPI documentation

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::api::{calendar, health, preferences, reservations, sessions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Arena Booking API",
        version = "1.0.0",
        description = "Ice-rental availability calendar and booking requests for Aréna Régional Lareau",
        contact(name = "Aréna Régional Lareau", email = "reservation@arenalareau.com")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Calendar
        calendar::get_season,
        calendar::get_month,
        calendar::get_day,
        calendar::upcoming_events,
        calendar::completed_events,
        // Sessions
        sessions::create_session,
        sessions::get_session,
        sessions::close_session,
        sessions::set_ice_type,
        sessions::toggle_date,
        sessions::toggle_period,
        sessions::set_window,
        sessions::clear_selection,
        sessions::get_quote,
        sessions::submit,
        // Reservations
        reservations::list_reservations,
        reservations::record_reservation,
        // Preferences
        preferences::get_preferences,
        preferences::update_preferences,
        preferences::get_form_cache,
        preferences::save_form_cache,
        preferences::clear_form_cache,
        preferences::clear_all_form_caches,
    ),
    components(
        schemas(
            // Calendar
            calendar::SeasonResponse,
            crate::models::calendar::Season,
            crate::models::calendar::MonthGrid,
            crate::models::calendar::CalendarDay,
            crate::models::booking::DayDetail,
            crate::models::booking::PeriodOffer,
            crate::models::period::TimePeriod,
            crate::models::period::TimeWindow,
            crate::models::event::EventListing,
            crate::models::enums::AvailabilityStatus,
            crate::models::enums::EventCategory,
            crate::models::enums::EventStatus,
            crate::models::enums::PeriodId,
            crate::models::enums::IceType,
            crate::models::enums::Lang,
            crate::models::enums::Theme,
            // Sessions
            crate::models::booking::CreateSession,
            crate::models::booking::SetIceType,
            crate::models::booking::SetWindow,
            crate::models::booking::SubmitReservation,
            crate::models::booking::ContactInfo,
            crate::models::booking::SessionView,
            crate::models::booking::SelectedDateView,
            crate::models::booking::PriceQuote,
            crate::models::booking::TotalQuote,
            crate::models::booking::MailtoResponse,
            // Reservations
            crate::models::reservation::RecordReservation,
            crate::models::reservation::ReservedDay,
            // Preferences
            crate::models::preferences::Preferences,
            crate::models::preferences::UpdatePreferences,
            crate::models::preferences::FormCacheEntry,
            crate::models::preferences::SaveFormCache,
            preferences::ClearedResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "calendar", description = "Season availability calendar"),
        (name = "sessions", description = "Booking selection, quote and e-mail request"),
        (name = "reservations", description = "Reserved hours kept in the local store"),
        (name = "preferences", description = "Theme, language and cached form values")
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document
pub fn router() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/season",
            "/days/{date}",
            "/sessions/{id}/dates/{date}/periods/{period}",
            "/sessions/{id}/submit",
            "/forms/{form_id}/cache",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
