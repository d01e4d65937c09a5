pub mod assist;
pub mod design;
pub mod export;
pub mod health;
pub mod preview;
pub mod resume;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;

/// Uploaded photos and slips are raw image bodies.
const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session and resume content
        .route("/api/v1/session", get(resume::handle_get_session))
        .route("/api/v1/resume", put(resume::handle_replace_resume))
        .route("/api/v1/resume/fields", patch(resume::handle_update_field))
        .route(
            "/api/v1/resume/photo",
            put(resume::handle_upload_photo)
                .delete(resume::handle_remove_photo)
                .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route(
            "/api/v1/resume/preset/:name",
            post(resume::handle_apply_preset),
        )
        .route("/api/v1/resume/:list", post(resume::handle_add_item))
        .route(
            "/api/v1/resume/:list/:id",
            put(resume::handle_update_item).delete(resume::handle_remove_item),
        )
        .route(
            "/api/v1/resume/:list/:id/move",
            post(resume::handle_move_item),
        )
        // Design
        .route("/api/v1/design/theme", put(design::handle_set_theme))
        .route("/api/v1/design/layout", put(design::handle_set_layout))
        .route(
            "/api/v1/design/layout/move",
            post(design::handle_move_section),
        )
        .route("/api/v1/design/magic", post(design::handle_magic_design))
        .route("/api/v1/language", put(design::handle_set_language))
        // Preview and export
        .route("/api/v1/preview", get(preview::handle_preview))
        .route("/api/v1/export/:kind", post(export::handle_request_export))
        .route(
            "/api/v1/gate/slip",
            post(export::handle_attach_slip).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/api/v1/gate/dismiss", post(export::handle_dismiss_gate))
        .route("/api/v1/gate/confirm", post(export::handle_confirm_gate))
        // Writing assistant
        .route("/api/v1/assist/enhance", post(assist::handle_enhance))
        .route("/api/v1/assist/translate", post(assist::handle_translate))
        .route("/api/v1/assist/suggest", post(assist::handle_suggest))
        .route(
            "/api/v1/assist/cover-letter",
            post(assist::handle_cover_letter),
        )
        .route("/api/v1/assist/analyze", post(assist::handle_analyze))
        .with_state(state)
}
