//! API integration tests, driving the router in-process

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use arena_booking::{
    api,
    config::{AppConfig, BookingConfig, SeasonConfig},
    repository::LocalStore,
    AppState,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2025-2026 season seen from Wednesday 2025-10-01
fn config() -> AppConfig {
    AppConfig {
        season: SeasonConfig {
            start_year: Some(2025),
            today: Some(date(2025, 10, 1)),
        },
        ..AppConfig::default()
    }
}

/// Same season with the promotion moved out of it, so weekdays classify
/// on their own
fn config_without_promotion() -> AppConfig {
    AppConfig {
        booking: BookingConfig {
            promotion_start: date(2000, 1, 1),
            promotion_end: date(2000, 1, 2),
            ..BookingConfig::default()
        },
        ..config()
    }
}

fn app(config: AppConfig) -> Router {
    api::router(AppState::with_store(config, LocalStore::in_memory()))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri))
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn amount(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.parse().unwrap(),
        other => other.as_f64().unwrap(),
    }
}

async fn open_session(app: &Router) -> String {
    let (status, body) = call(app, Method::POST, "/sessions", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app(config());
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["open_sessions"], 0);
}

#[tokio::test]
async fn test_season_grid() {
    let app = app(config());
    let (status, body) = call(&app, Method::GET, "/season?lang=fr", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["today"], "2025-10-01");

    let months = body["months"].as_array().unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months[0]["title"], "Septembre 2025");
    assert_eq!(months[0]["leading_blanks"], 1);
    assert_eq!(months[11]["title"], "Août 2026");

    let october_first = &months[1]["days"][0];
    assert_eq!(october_first["is_today"], true);
    assert_eq!(october_first["status"], "ongoing");
}

#[tokio::test]
async fn test_month_outside_season_not_found() {
    let app = app(config());
    let (status, body) = call(&app, Method::GET, "/season/2026/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_day_detail_lists_periods_and_prices() {
    let app = app(config_without_promotion());
    let (status, body) = call(&app, Method::GET, "/days/2025-10-06?lang=en", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["day"]["status"], "weekday-available");

    let periods = body["periods"].as_array().unwrap();
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[1]["id"], "evening");
    assert_eq!(periods[1]["label"], "Evening");
    assert_eq!(periods[1]["end"], "00:00");
    assert_eq!(amount(&periods[1]["full_ice"]["final"]), 1440.0);
    assert_eq!(amount(&periods[1]["full_ice"]["discount"]), 160.0);

    let (_, saturday) = call(&app, Method::GET, "/days/2025-10-04", None).await;
    assert_eq!(saturday["day"]["status"], "weekend-unavailable");
    assert_eq!(saturday["periods"][0]["id"], "allday");
}

#[tokio::test]
async fn test_invalid_date_is_bad_request() {
    let app = app(config());
    let (status, body) = call(&app, Method::GET, "/days/2025-13-45", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3);
}

#[tokio::test]
async fn test_upcoming_events() {
    let app = app(config());
    let (status, body) = call(&app, Method::GET, "/events/upcoming?limit=3", None).await;
    assert_eq!(status, StatusCode::OK);

    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0]["status"], "ongoing");
    assert_eq!(events[1]["name"], "Jour du Souvenir");
    assert_eq!(events[4]["status"], "tbd");
    assert!(events[4]["date"].is_null());
}

#[tokio::test]
async fn test_booking_flow_to_mailto() {
    let app = app(config_without_promotion());
    let id = open_session(&app).await;

    let (status, _) = call(&app, Method::POST, &format!("/sessions/{}/dates/2025-10-06", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, view) = call(
        &app,
        Method::POST,
        &format!("/sessions/{}/dates/2025-10-06/periods/evening", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["dates"][0]["periods"], json!(["evening"]));
    assert_eq!(view["dates"][0]["pending"], false);

    let (_, quote) = call(&app, Method::GET, &format!("/sessions/{}/quote", id), None).await;
    assert_eq!(amount(&quote["total"]), 1440.0);
    assert_eq!(amount(&quote["discount"]), 160.0);
    assert_eq!(amount(&quote["base_total"]), 1600.0);

    let (status, mail) = call(
        &app,
        Method::POST,
        &format!("/sessions/{}/submit", id),
        Some(json!({
            "contact": {
                "full_name": "Marie Gagnon",
                "phone": "450 555 1234",
                "email": "marie@example.com"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(mail["mailto"]
        .as_str()
        .unwrap()
        .starts_with("mailto:reservation@arenalareau.com?subject="));
    assert!(mail["body"].as_str().unwrap().contains("TOTAL: 1440.00$"));
}

#[tokio::test]
async fn test_toggle_period_twice_restores_session() {
    let app = app(config_without_promotion());
    let id = open_session(&app).await;
    call(&app, Method::POST, &format!("/sessions/{}/dates/2025-10-07", id), None).await;
    let (_, before) = call(&app, Method::GET, &format!("/sessions/{}", id), None).await;

    let uri = format!("/sessions/{}/dates/2025-10-07/periods/morning", id);
    call(&app, Method::POST, &uri, None).await;
    let (_, after) = call(&app, Method::POST, &uri, None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_fully_reserved_date_rejected() {
    let app = app(config_without_promotion());
    let (status, reserved) = call(
        &app,
        Method::POST,
        "/reservations",
        Some(json!({ "dates": ["2025-10-08"], "start_hour": 7, "end_hour": 24 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reserved[0]["fully_reserved"], true);

    let (_, day) = call(&app, Method::GET, "/days/2025-10-08", None).await;
    assert_eq!(day["day"]["status"], "fully-reserved");

    let id = open_session(&app).await;
    let (status, body) = call(&app, Method::POST, &format!("/sessions/{}/dates/2025-10-08", id), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4);
    assert_eq!(body["message"], "Cette date est complètement réservée.");

    let (_, view) = call(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    assert!(view["dates"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_saturated_date_inside_promotion_rejected() {
    let app = app(config());
    call(
        &app,
        Method::POST,
        "/reservations",
        Some(json!({ "dates": ["2025-10-08"], "start_hour": 7, "end_hour": 24 })),
    )
    .await;

    let (_, day) = call(&app, Method::GET, "/days/2025-10-08", None).await;
    assert_eq!(day["day"]["status"], "ongoing");

    let id = open_session(&app).await;
    let (status, body) = call(&app, Method::POST, &format!("/sessions/{}/dates/2025-10-08", id), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4);

    let (_, view) = call(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    assert!(view["dates"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_completed_events_before_pinned_season() {
    let app = app(AppConfig {
        season: SeasonConfig {
            start_year: Some(2026),
            today: Some(date(2026, 8, 15)),
        },
        ..AppConfig::default()
    });
    let (status, body) = call(&app, Method::GET, "/events/completed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_window_validation() {
    let app = app(config_without_promotion());
    let id = open_session(&app).await;
    call(&app, Method::POST, &format!("/sessions/{}/dates/2025-10-06", id), None).await;

    let uri = format!("/sessions/{}/dates/2025-10-06/window", id);
    let (status, body) = call(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "window": { "start": "18:00", "end": "17:00" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "L'heure de fin doit être après l'heure de début.");

    let (status, view) = call(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "window": { "start": "18:00", "end": "19:00" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["dates"][0]["window"]["end"], "19:00");
    assert_eq!(amount(&view["quote"]["total"]), 180.0);
}

#[tokio::test]
async fn test_submit_without_periods_rejected() {
    let app = app(config_without_promotion());
    let id = open_session(&app).await;
    call(&app, Method::POST, &format!("/sessions/{}/dates/2025-10-06", id), None).await;

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/sessions/{}/submit", id),
        Some(json!({ "contact": { "full_name": "Marie Gagnon", "phone": "4505551234" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 6);
    assert_eq!(body["message"], "Veuillez sélectionner au moins une période horaire");
}

#[tokio::test]
async fn test_unknown_session_not_found() {
    let app = app(config());
    let (status, _) = call(
        &app,
        Method::GET,
        "/sessions/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = open_session(&app).await;
    let (status, _) = call(&app, Method::DELETE, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preferences_round_trip() {
    let app = app(config());
    let (_, prefs) = call(&app, Method::GET, "/preferences", None).await;
    assert_eq!(prefs, json!({ "theme": "dark", "language": "fr" }));

    let (status, prefs) = call(&app, Method::PUT, "/preferences", Some(json!({ "language": "en" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prefs, json!({ "theme": "dark", "language": "en" }));
}

#[tokio::test]
async fn test_form_cache_lifecycle() {
    let app = app(config());
    let (status, entry) = call(
        &app,
        Method::PUT,
        "/forms/booking/cache",
        Some(json!({ "data": { "fullName": "Marie Gagnon" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(entry["timestamp"].is_i64());

    let (_, loaded) = call(&app, Method::GET, "/forms/booking/cache", None).await;
    assert_eq!(loaded["data"]["fullName"], "Marie Gagnon");

    let (status, _) = call(&app, Method::DELETE, "/forms/booking/cache", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::GET, "/forms/booking/cache", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app(config());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
