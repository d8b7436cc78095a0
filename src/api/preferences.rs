//! Visitor preferences and form caches

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::preferences::{FormCacheEntry, Preferences, SaveFormCache, UpdatePreferences},
    AppState,
};

use super::ValidPath;

#[derive(Serialize, ToSchema)]
pub struct ClearedResponse {
    pub cleared: usize,
}

/// Stored theme and language
#[utoipa::path(
    get,
    path = "/preferences",
    tag = "preferences",
    responses(
        (status = 200, description = "Preferences", body = Preferences)
    )
)]
pub async fn get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    Json(state.services.repository.preferences.get().await)
}

/// Update theme and/or language
#[utoipa::path(
    put,
    path = "/preferences",
    tag = "preferences",
    request_body = UpdatePreferences,
    responses(
        (status = 200, description = "Preferences updated", body = Preferences)
    )
)]
pub async fn update_preferences(
    State(state): State<AppState>,
    Json(data): Json<UpdatePreferences>,
) -> AppResult<Json<Preferences>> {
    let prefs = state.services.repository.preferences.update(&data).await?;
    Ok(Json(prefs))
}

/// Cached values of a form
#[utoipa::path(
    get,
    path = "/forms/{form_id}/cache",
    tag = "preferences",
    params(("form_id" = String, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Cached values", body = FormCacheEntry),
        (status = 404, description = "Nothing cached", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_form_cache(
    State(state): State<AppState>,
    ValidPath(form_id): ValidPath<String>,
) -> AppResult<Json<FormCacheEntry>> {
    state
        .services
        .repository
        .form_cache
        .load(&form_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No cached values for form {}", form_id)))
}

/// Cache the current values of a form
#[utoipa::path(
    put,
    path = "/forms/{form_id}/cache",
    tag = "preferences",
    params(("form_id" = String, Path, description = "Form ID")),
    request_body = SaveFormCache,
    responses(
        (status = 200, description = "Values cached", body = FormCacheEntry)
    )
)]
pub async fn save_form_cache(
    State(state): State<AppState>,
    ValidPath(form_id): ValidPath<String>,
    Json(data): Json<SaveFormCache>,
) -> AppResult<Json<FormCacheEntry>> {
    let entry = state
        .services
        .repository
        .form_cache
        .save(&form_id, data.data)
        .await?;
    Ok(Json(entry))
}

/// Drop the cached values of a form
#[utoipa::path(
    delete,
    path = "/forms/{form_id}/cache",
    tag = "preferences",
    params(("form_id" = String, Path, description = "Form ID")),
    responses(
        (status = 204, description = "Cache cleared")
    )
)]
pub async fn clear_form_cache(
    State(state): State<AppState>,
    ValidPath(form_id): ValidPath<String>,
) -> AppResult<StatusCode> {
    state.services.repository.form_cache.clear(&form_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Drop the cached values of every form
#[utoipa::path(
    delete,
    path = "/forms",
    tag = "preferences",
    responses(
        (status = 200, description = "Caches cleared", body = ClearedResponse)
    )
)]
pub async fn clear_all_form_caches(State(state): State<AppState>) -> AppResult<Json<ClearedResponse>> {
    let cleared = state.services.repository.form_cache.clear_all().await?;
    Ok(Json(ClearedResponse { cleared }))
}
