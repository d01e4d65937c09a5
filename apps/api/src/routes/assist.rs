use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::{apply_field_text, field_context, PortfolioAnalysis, SuggestSection};
use crate::errors::AppError;
use crate::models::Language;
use crate::session::Session;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistTextResponse {
    pub field: String,
    pub text: String,
    /// Whether the text was written back into the stored resume.
    pub applied: bool,
}

/// Stores `text` in `field` when the field still exists and the reply is not
/// blank. Returns whether anything changed.
async fn write_back(state: &AppState, field: &str, text: &str) -> Result<bool, AppError> {
    if text.trim().is_empty() {
        return Ok(false);
    }
    let mut applied = false;
    state
        .session
        .update(|s| {
            let next = match apply_field_text(&s.data, field, text) {
                Some(data) => {
                    applied = true;
                    Session { data, ..s.clone() }
                }
                None => s.clone(),
            };
            Ok::<_, AppError>(next)
        })
        .await?;
    Ok(applied)
}

#[derive(Deserialize)]
pub struct EnhanceRequest {
    /// Field key such as `about` or `exp-desc-<id>`.
    pub field: String,
    pub text: String,
}

/// POST /api/v1/assist/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(req): Json<EnhanceRequest>,
) -> Result<Json<AssistTextResponse>, AppError> {
    let _guard = state.loading.begin(&req.field)?;
    let session = state.session.snapshot().await;
    let context = field_context(&session.data, &req.field);

    let text = state.assistant.enhance_text(&req.text, session.language, &context).await;
    let applied = text != req.text && write_back(&state, &req.field, &text).await?;
    info!(field = %req.field, applied, "Enhance finished");

    Ok(Json(AssistTextResponse {
        field: req.field,
        text,
        applied,
    }))
}

#[derive(Deserialize)]
pub struct TranslateRequest {
    pub field: String,
    pub text: String,
    /// Defaults to the session language.
    pub target: Option<Language>,
}

/// POST /api/v1/assist/translate
pub async fn handle_translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<AssistTextResponse>, AppError> {
    let _guard = state.loading.begin(&format!("translate-{}", req.field))?;
    let target = match req.target {
        Some(lang) => lang,
        None => state.session.snapshot().await.language,
    };
    let text = state.assistant.translate_text(&req.text, target).await;
    Ok(Json(AssistTextResponse {
        field: req.field,
        text,
        applied: false,
    }))
}

#[derive(Deserialize)]
pub struct SuggestRequest {
    pub section: SuggestSection,
    /// Field to fill; the draft is written there when it names a stored field.
    pub field: Option<String>,
    /// Overrides the resume title, e.g. a project name.
    pub title: Option<String>,
    pub skills: Option<String>,
}

/// POST /api/v1/assist/suggest
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<AssistTextResponse>, AppError> {
    let field = req.field.unwrap_or_else(|| match req.section {
        SuggestSection::About => "about".to_string(),
        SuggestSection::Experience => "suggest-experience".to_string(),
        SuggestSection::Project => "suggest-project".to_string(),
    });
    let _guard = state.loading.begin(&format!("suggest-{field}"))?;
    let session = state.session.snapshot().await;
    let title = req.title.unwrap_or_else(|| session.data.title.clone());
    let skills = req.skills.unwrap_or_else(|| session.data.skills.clone());

    let text = state
        .assistant
        .suggest(req.section, &title, &skills, session.language)
        .await;
    let applied = write_back(&state, &field, &text).await?;
    Ok(Json(AssistTextResponse { field, text, applied }))
}

#[derive(Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub company: String,
}

#[derive(Serialize)]
pub struct CoverLetterResponse {
    pub letter: String,
}

/// POST /api/v1/assist/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let _guard = state.loading.begin("cover-letter")?;
    let session = state.session.snapshot().await;
    let letter = state
        .assistant
        .cover_letter(&session.data, &req.company, session.language)
        .await;
    Ok(Json(CoverLetterResponse { letter }))
}

/// POST /api/v1/assist/analyze
pub async fn handle_analyze(State(state): State<AppState>) -> Result<Json<PortfolioAnalysis>, AppError> {
    let _guard = state.loading.begin("analyze")?;
    let session = state.session.snapshot().await;
    Ok(Json(state.assistant.analyze(&session.data, session.language).await))
}
