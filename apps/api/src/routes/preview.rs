use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::state::AppState;

/// GET /api/v1/preview
///
/// Composes the current document and returns it as SVG. The composition is
/// kept as the export target until the next edit.
pub async fn handle_preview(State(state): State<AppState>) -> Response {
    let preview = state
        .session
        .refresh_preview(
            state.measurer.as_ref(),
            &state.config.qr_service_url,
            state.config.font_settle,
        )
        .await;
    debug!(rechecked = preview.rechecked, bytes = preview.svg.len(), "Preview composed");

    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        preview.svg.clone(),
    )
        .into_response()
}
