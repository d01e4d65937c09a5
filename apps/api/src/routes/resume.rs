use axum::{
    extract::{Path, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::export::assets::image_data_uri;
use crate::gate::GatePrompt;
use crate::models::presets::Preset;
use crate::models::resume::{ListEdit, ListKind, MoveDirection, ScalarField};
use crate::models::ResumeData;
use crate::session::Session;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: Session,
    /// Field keys with an assistant request running.
    pub loading: Vec<String>,
    /// Present while the support prompt is open.
    pub gate_prompt: Option<GatePrompt>,
}

pub(crate) fn session_response(state: &AppState, session: Session) -> SessionResponse {
    let gate_prompt = session
        .gate
        .pending()
        .map(|_| state.gate.prompt(&session.gate, session.language));
    SessionResponse {
        loading: state.loading.in_flight(),
        gate_prompt,
        session,
    }
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.snapshot().await;
    Json(session_response(&state, session))
}

/// PUT /api/v1/resume
pub async fn handle_replace_resume(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Result<Json<SessionResponse>, AppError> {
    data.validate_ids()?;
    let session = state
        .session
        .update(|s| Ok::<_, AppError>(Session { data, ..s.clone() }))
        .await?;
    info!("Resume replaced");
    Ok(Json(session_response(&state, session)))
}

#[derive(Deserialize)]
pub struct FieldUpdate {
    pub field: ScalarField,
    pub value: String,
}

/// PATCH /api/v1/resume/fields
pub async fn handle_update_field(
    State(state): State<AppState>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                data: s.data.with_field(req.field, req.value),
                ..s.clone()
            })
        })
        .await?;
    Ok(Json(session_response(&state, session)))
}

/// POST /api/v1/resume/preset/:name
pub async fn handle_apply_preset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let preset = Preset::parse(&name).ok_or_else(|| AppError::NotFound(format!("Preset '{name}' not found")))?;
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                data: s.data.with_preset(preset),
                ..s.clone()
            })
        })
        .await?;
    info!(preset = %name, "Preset applied");
    Ok(Json(session_response(&state, session)))
}

fn parse_list(list: &str) -> Result<ListKind, AppError> {
    list.parse::<ListKind>().map_err(AppError::NotFound)
}

async fn apply_list_edit(
    state: &AppState,
    list: ListKind,
    edit: ListEdit,
) -> Result<Json<SessionResponse>, AppError> {
    let action = match &edit {
        ListEdit::Add(_) => "add",
        ListEdit::Update(..) => "update",
        ListEdit::Remove(_) => "remove",
        ListEdit::Move(..) => "move",
    };
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                data: s.data.apply_list_edit(list, edit)?,
                ..s.clone()
            })
        })
        .await?;
    info!(list = %list, action, "List edit applied");
    Ok(Json(session_response(state, session)))
}

/// POST /api/v1/resume/:list
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(list): Path<String>,
    Json(item): Json<Value>,
) -> Result<Json<SessionResponse>, AppError> {
    apply_list_edit(&state, parse_list(&list)?, ListEdit::Add(item)).await
}

/// PUT /api/v1/resume/:list/:id
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path((list, id)): Path<(String, String)>,
    Json(item): Json<Value>,
) -> Result<Json<SessionResponse>, AppError> {
    apply_list_edit(&state, parse_list(&list)?, ListEdit::Update(id, item)).await
}

/// DELETE /api/v1/resume/:list/:id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((list, id)): Path<(String, String)>,
) -> Result<Json<SessionResponse>, AppError> {
    apply_list_edit(&state, parse_list(&list)?, ListEdit::Remove(id)).await
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

/// POST /api/v1/resume/:list/:id/move
pub async fn handle_move_item(
    State(state): State<AppState>,
    Path((list, id)): Path<(String, String)>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    apply_list_edit(&state, parse_list(&list)?, ListEdit::Move(id, req.direction)).await
}

/// PUT /api/v1/resume/photo
///
/// The body is the raw image file. It is decoded once to make sure it is a
/// real PNG, JPEG or WebP before it is stored as a data URI.
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionResponse>, AppError> {
    let uri = image_data_uri(&body).map_err(|e| AppError::Validation(e.to_string()))?;
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                data: s.data.with_profile_image(Some(uri)),
                ..s.clone()
            })
        })
        .await?;
    info!(bytes = body.len(), "Profile photo stored");
    Ok(Json(session_response(&state, session)))
}

/// DELETE /api/v1/resume/photo
pub async fn handle_remove_photo(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                data: s.data.with_profile_image(None),
                ..s.clone()
            })
        })
        .await?;
    Ok(Json(session_response(&state, session)))
}
