use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::export::ExportKind;
use crate::gate::{GateError, GatePrompt};
use crate::session::{Session, SessionStore};
use crate::state::AppState;

fn prompt_for(state: &AppState, session: &Session) -> GatePrompt {
    state.gate.prompt(&session.gate, session.language)
}

/// POST /api/v1/export/:kind
///
/// Exports always go through the support prompt first; this only opens it.
pub async fn handle_request_export(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<GatePrompt>, AppError> {
    let kind = ExportKind::parse(&kind)
        .ok_or_else(|| AppError::NotFound(format!("Unknown export format '{kind}'")))?;
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                gate: s.gate.request(kind)?,
                ..s.clone()
            })
        })
        .await?;
    info!(kind = ?kind, "Export requested, support prompt shown");
    Ok(Json(prompt_for(&state, &session)))
}

/// POST /api/v1/gate/slip
///
/// The body is stored as-is and never inspected.
pub async fn handle_attach_slip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GatePrompt>, AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("Slip upload is empty".to_string()));
    }
    let size = body.len();
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                gate: s.gate.attach_slip(body)?,
                ..s.clone()
            })
        })
        .await?;
    info!(bytes = size, "Slip attached");
    Ok(Json(prompt_for(&state, &session)))
}

/// POST /api/v1/gate/dismiss
pub async fn handle_dismiss_gate(State(state): State<AppState>) -> Result<Json<GatePrompt>, AppError> {
    let session = state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                gate: s.gate.dismiss()?,
                ..s.clone()
            })
        })
        .await?;
    info!("Support prompt dismissed");
    Ok(Json(prompt_for(&state, &session)))
}

/// POST /api/v1/gate/confirm
///
/// Holds for the configured delay, closes the prompt and runs the pending
/// export against the last preview. The response is the file itself, or a
/// JSON error when the export could not be produced.
pub async fn handle_confirm_gate(State(state): State<AppState>) -> Result<Response, AppError> {
    state
        .session
        .update(|s| {
            Ok::<_, AppError>(Session {
                gate: s.gate.begin_confirm()?,
                ..s.clone()
            })
        })
        .await?;
    let mut pending = ConfirmGuard::new(state.session.clone());
    info!("Checking payment");

    state.gate.settle().await;

    let mut confirmed = None;
    let session = state
        .session
        .update(|s| {
            let (gate, kind) = s.gate.finish_confirm()?;
            confirmed = Some(kind);
            Ok::<_, GateError>(Session { gate, ..s.clone() })
        })
        .await?;
    pending.disarm();
    let kind = confirmed.ok_or_else(|| anyhow::anyhow!("confirmed gate lost its pending export"))?;
    info!(kind = ?kind, "Payment confirmed, exporting");

    let target = session.preview.as_ref().map(|p| &p.composition);
    let file = state.exporter.export(target, kind, &session.data.full_name).await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file.filename)),
        ],
        file.bytes,
    )
        .into_response())
}

/// Puts a `Processing` gate back to idle if the confirm handler is dropped
/// (client gone) before it finishes.
struct ConfirmGuard {
    session: SessionStore,
    armed: bool,
}

impl ConfirmGuard {
    fn new(session: SessionStore) -> Self {
        Self { session, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ConfirmGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let session = self.session.clone();
        handle.spawn(async move {
            let _ = session
                .update(|s| {
                    Ok::<_, Infallible>(Session {
                        gate: s.gate.abandon_confirm(),
                        ..s.clone()
                    })
                })
                .await;
            warn!("Confirm abandoned, support prompt closed");
        });
    }
}

/// Attachment header that survives non-ASCII names: a plain `filename` with
/// anything outside printable ASCII replaced, plus an RFC 5987 `filename*`.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    let mut encoded = String::with_capacity(filename.len());
    for b in filename.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => encoded.push(b as char),
            _ => encoded.push_str(&format!("%{b:02X}")),
        }
    }
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
