use axum::http::StatusCode;
use thiserror::Error;

use crate::model::{ErrorMessage, ResponseCode};

pub const FRAMEWORK_WITHOUT_ROOT_ORG: &str = r#"specify "rootOrgId" along with "framework""#;
pub const NO_RECORD_TO_UPDATE: &str = "invalid request, no records found for the match to update!";

#[derive(Debug, Error)]
pub enum FormError {
    /// Every field-level violation found in the request.
    #[error("invalid request: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{}", FRAMEWORK_WITHOUT_ROOT_ORG)]
    FrameworkWithoutRootOrg,

    #[error("{}", NO_RECORD_TO_UPDATE)]
    NotFound,

    #[error("form already exists for rootOrgId '{root_org}', framework '{framework}' and key '{key}'; use update instead")]
    AlreadyExists {
        root_org: String,
        framework: String,
        key: String,
    },

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl FormError {
    pub fn is_client_error(&self) -> bool {
        !matches!(self, FormError::Storage(_))
    }

    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn response_code(&self) -> ResponseCode {
        if self.is_client_error() {
            ResponseCode::ClientError
        } else {
            ResponseCode::ServerError
        }
    }

    pub fn message(&self) -> ErrorMessage {
        match self {
            FormError::Validation(violations) => ErrorMessage::Many(violations.clone()),
            FormError::Storage(e) => ErrorMessage::Single(format!("{:#}", e)),
            other => ErrorMessage::Single(other.to_string()),
        }
    }
}

pub type FormResult<T> = std::result::Result<T, FormError>;
