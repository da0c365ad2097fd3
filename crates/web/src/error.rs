use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use storage::models::EoiStep;
use uuid::Uuid;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    /// A step was accessed before its prerequisite was completed. Handled by
    /// redirecting to the step the applicant must finish first.
    StepOrder {
        submission_id: Uuid,
        redirect_to: EoiStep,
    },
    /// Finalize preconditions failed: one or more stages have no saved data.
    IncompleteSubmission(Vec<EoiStep>),
    BadRequest(String),
    Unauthorized,
    InternalServerError(String),
}

impl WebError {
    fn redirect_location(submission_id: Uuid, step: EoiStep) -> String {
        format!("/api/eoi/{}/{}", submission_id, step.path_segment())
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::StepOrder { redirect_to, .. } => {
                write!(f, "Step accessed out of order, complete {:?} first", redirect_to)
            }
            Self::IncompleteSubmission(missing) => {
                write!(f, "Submission incomplete, missing {} stage(s)", missing.len())
            }
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::Storage(StorageError::NotFound) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Resource not found" })),
            )
                .into_response(),
            Self::Storage(StorageError::AlreadySubmitted) => (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Submission has already been finalized" })),
            )
                .into_response(),
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                (StatusCode::CONFLICT, Json(json!({ "error": msg }))).into_response()
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal error occurred" })),
                )
                    .into_response()
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Validation failed",
                        "details": field_errors
                    })),
                )
                    .into_response()
            }
            Self::StepOrder {
                submission_id,
                redirect_to,
            } => {
                let location = Self::redirect_location(submission_id, redirect_to);
                (
                    StatusCode::SEE_OTHER,
                    [(header::LOCATION, location.clone())],
                    Json(json!({
                        "error": "Step not yet available",
                        "redirect_to": location
                    })),
                )
                    .into_response()
            }
            Self::IncompleteSubmission(missing) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Submission is incomplete",
                    "missing_stages": missing
                })),
            )
                .into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal error occurred" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order_redirects_to_prerequisite() {
        let id = Uuid::new_v4();
        let response = WebError::StepOrder {
            submission_id: id,
            redirect_to: EoiStep::Profile,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            &format!("/api/eoi/{}/profile", id)
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = WebError::Storage(StorageError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_double_finalize_maps_to_conflict() {
        let response = WebError::Storage(StorageError::AlreadySubmitted).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
