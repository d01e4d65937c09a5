use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::assistant::LoadingError;
use crate::export::ExportError;
use crate::gate::GateError;
use crate::models::resume::EditError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EditError> for AppError {
    fn from(e: EditError) -> Self {
        match e {
            EditError::UnknownId { .. } => AppError::NotFound(e.to_string()),
            EditError::DuplicateId { .. } => AppError::Conflict(e.to_string()),
            EditError::Shape { .. } => AppError::Validation(e.to_string()),
        }
    }
}

impl From<GateError> for AppError {
    fn from(e: GateError) -> Self {
        AppError::Conflict(e.to_string())
    }
}

impl From<LoadingError> for AppError {
    fn from(e: LoadingError) -> Self {
        AppError::Conflict(e.to_string())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Export(e) => {
                tracing::warn!("Export error: {e}");
                (StatusCode::UNPROCESSABLE_ENTITY, "EXPORT_FAILED", e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ListKind;

    #[test]
    fn test_edit_errors_map_to_status() {
        let unknown = AppError::from(EditError::UnknownId {
            list: ListKind::Links,
            id: "9".into(),
        });
        assert_eq!(unknown.parts().0, StatusCode::NOT_FOUND);

        let duplicate = AppError::from(EditError::DuplicateId {
            list: ListKind::Projects,
            id: "1".into(),
        });
        assert_eq!(duplicate.parts().0, StatusCode::CONFLICT);
    }

    #[test]
    fn test_export_error_is_unprocessable_with_message() {
        let (status, code, message) = AppError::from(ExportError::TargetMissing).parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "EXPORT_FAILED");
        assert_eq!(message, ExportError::TargetMissing.to_string());
    }

    #[test]
    fn test_busy_field_is_conflict() {
        let err = AppError::from(LoadingError::Busy("about".into()));
        assert_eq!(err.parts().0, StatusCode::CONFLICT);
    }
}
