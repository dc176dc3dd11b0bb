//! Axum route handlers for the assessment session API.
//!
//! Every mutating handler locks one session, applies one trigger and
//! answers with the session's current view. When a trigger fails the error
//! is returned instead; `GET /api/v1/sessions/:id` still shows where the
//! session ended up.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::locale::{Language, ProfileOptions};
use crate::models::profile::ProfileForm;
use crate::state::AppState;
use crate::workflow::view::SessionView;
use crate::workflow::Session;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
pub struct ProfileOptionsResponse {
    pub language: Language,
    pub options: &'static ProfileOptions,
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct RecordAnswersRequest {
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioResponseRequest {
    pub response: String,
}

fn render(session: &Session) -> Result<Json<Value>, AppError> {
    let view = serde_json::to_value(SessionView::of(session))
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(view))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profile/options?language=
///
/// Localized option lists for the profile form.
pub async fn handle_profile_options(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Json<ProfileOptionsResponse> {
    let language = query.language.unwrap_or(state.config.default_language);
    Json(ProfileOptionsResponse {
        language,
        options: language.profile_options(),
    })
}

/// POST /api/v1/sessions?language=
///
/// Creates a session in the setup phase.
pub async fn handle_create_session(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let language = query.language.unwrap_or(state.config.default_language);
    let session = state.sessions.create(language).await;
    let session = session.lock().await;
    Ok((StatusCode::CREATED, render(&session)?))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let session = session.lock().await;
    render(&session)
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/language
///
/// Switches labels and the language of content generated from now on.
pub async fn handle_set_language(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetLanguageRequest>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    session.set_language(request.language);
    render(&session)
}

/// POST /api/v1/sessions/:id/begin
pub async fn handle_begin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    session.begin()?;
    render(&session)
}

/// POST /api/v1/sessions/:id/profile
///
/// Validates the profile and generates the yes/no/maybe questions.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    session.submit_profile(form, &state.generator).await?;
    render(&session)
}

/// POST /api/v1/sessions/:id/generate
///
/// Retries content generation for the current question phase. A no-op
/// when the content is already there.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    if session.phase.step().is_none() {
        return Err(AppError::InvalidTransition(format!(
            "nothing to generate in phase '{}'",
            session.phase
        )));
    }
    session.ensure_phase_content(&state.generator).await?;
    render(&session)
}

/// PUT /api/v1/sessions/:id/answers
///
/// Merges answers for the current question phase, keyed `q0`..`q6`.
pub async fn handle_record_answers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordAnswersRequest>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    session.record_answers(request.answers)?;
    render(&session)
}

/// POST /api/v1/sessions/:id/continue
pub async fn handle_continue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    session.advance(&state.generator).await?;
    render(&session)
}

/// POST /api/v1/sessions/:id/back
pub async fn handle_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    session.back()?;
    render(&session)
}

/// POST /api/v1/sessions/:id/scenario
///
/// Saves the written response and, when it is long enough, generates the
/// final report.
pub async fn handle_submit_scenario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ScenarioResponseRequest>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    session
        .submit_scenario(request.response, &state.generator)
        .await?;
    render(&session)
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    session.reset(state.config.default_language)?;
    render(&session)
}
