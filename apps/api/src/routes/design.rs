use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::DesignSuggestion;
use crate::errors::AppError;
use crate::models::resume::MoveDirection;
use crate::models::{Language, LayoutConfig, Rgb, ThemeKind, ThemeSelection};
use crate::routes::resume::{session_response, SessionResponse};
use crate::session::Session;
use crate::state::AppState;

/// Either half may be omitted to keep the current value.
#[derive(Deserialize)]
pub struct ThemeUpdate {
    pub theme: Option<ThemeKind>,
    pub accent: Option<Rgb>,
}

/// PUT /api/v1/design/theme
pub async fn handle_set_theme(
    State(state): State<AppState>,
    Json(req): Json<ThemeUpdate>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .session
        .update(|s| {
            let selection = ThemeSelection {
                theme: req.theme.unwrap_or(s.selection.theme),
                accent: req.accent.unwrap_or(s.selection.accent),
            };
            Ok::<_, AppError>(Session { selection, ..s.clone() })
        })
        .await?;
    info!(theme = ?session.selection.theme, accent = %session.selection.accent.to_hex(), "Theme changed");
    Ok(Json(session_response(&state, session)))
}

/// PUT /api/v1/design/layout
///
/// Out-of-range multipliers are clamped and unknown section ids dropped while
/// the body is decoded.
pub async fn handle_set_layout(
    State(state): State<AppState>,
    Json(layout): Json<LayoutConfig>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .session
        .update(|s| Ok::<_, AppError>(Session { layout, ..s.clone() }))
        .await?;
    Ok(Json(session_response(&state, session)))
}

#[derive(Deserialize)]
pub struct SectionMove {
    pub index: usize,
    pub direction: MoveDirection,
}

/// POST /api/v1/design/layout/move
pub async fn handle_move_section(
    State(state): State<AppState>,
    Json(req): Json<SectionMove>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                layout: s.layout.move_section(req.index, req.direction),
                ..s.clone()
            })
        })
        .await?;
    Ok(Json(session_response(&state, session)))
}

#[derive(Deserialize)]
pub struct LanguageUpdate {
    pub language: Language,
}

/// PUT /api/v1/language
pub async fn handle_set_language(
    State(state): State<AppState>,
    Json(req): Json<LanguageUpdate>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                language: req.language,
                ..s.clone()
            })
        })
        .await?;
    Ok(Json(session_response(&state, session)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicDesignResponse {
    pub applied: bool,
    pub suggestion: Option<DesignSuggestion>,
    pub selection: ThemeSelection,
}

/// POST /api/v1/design/magic
///
/// Asks for a theme and accent that suit the current title. Nothing changes
/// when the title is empty or the reply is unusable.
pub async fn handle_magic_design(State(state): State<AppState>) -> Result<Json<MagicDesignResponse>, AppError> {
    let _guard = state.loading.begin("magic-design")?;
    let current = state.session.snapshot().await;
    let suggestion = state
        .assistant
        .suggest_design(&current.data.title, &current.data.skills)
        .await;

    let session = match &suggestion {
        Some(s) => {
            let selection = ThemeSelection {
                theme: s.theme,
                accent: s.color,
            };
            let session = state
                .session
                .update(|cur| Ok::<_, AppError>(Session { selection, ..cur.clone() }))
                .await?;
            info!(theme = ?s.theme, accent = %s.color.to_hex(), "Magic design applied");
            session
        }
        None => current,
    };

    Ok(Json(MagicDesignResponse {
        applied: suggestion.is_some(),
        selection: session.selection,
        suggestion,
    }))
}
