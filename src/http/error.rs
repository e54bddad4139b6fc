//! Request error translation.
//!
//! # Responsibilities
//! - Classify errors raised during request handling into a fixed set of shapes
//! - Map each shape to an HTTP status and message
//! - Render the uniform JSON body `{"success":false,"error":<message>}`
//!
//! # Design Decisions
//! - Classification order is fixed: bad identifier, duplicate key, validation,
//!   malformed input, type mismatch, then the error's own status or 500
//! - Every handled error is logged before responding, except the one
//!   "Unauthorized access to route" message
//! - Rendering never fails; the response is built from plain values

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mongodb::error::{ErrorKind, WriteFailure};
use serde_json::json;

/// Numeric code MongoDB reports for a unique-index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

const DEFAULT_MESSAGE: &str = "Server Error";
const UNLOGGED_MESSAGE: &str = "Unauthorized access to route";

/// A request-handling error, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed resource identifier (e.g. an unparseable ObjectId).
    InvalidId,
    /// Unique-index violation, code 11000.
    DuplicateKey,
    /// Schema validation failure: one message per failed field, in order.
    Validation(Vec<String>),
    /// Data-format (syntax) error in the request payload.
    ///
    /// The message reads "Invalid date" even though the shape is a generic
    /// syntax error. Historical wording, kept verbatim until product confirms
    /// a change; see DESIGN.md.
    MalformedInput,
    /// Type mismatch in the request payload.
    TypeMismatch,
    /// Rejected by an auth layer. The only shape excluded from the error log.
    Unauthorized,
    /// Anything else: carries its own status and message when it has them.
    Other {
        status: Option<StatusCode>,
        message: Option<String>,
    },
}

impl ApiError {
    /// Build a validation error from field-level messages, preserving order.
    pub fn validation<I, F, M>(fields: I) -> Self
    where
        I: IntoIterator<Item = (F, M)>,
        F: Into<String>,
        M: Into<String>,
    {
        Self::Validation(fields.into_iter().map(|(_, msg)| msg.into()).collect())
    }

    /// Classify a database driver error.
    pub fn from_database(err: &mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write))
                if write.code == DUPLICATE_KEY_CODE =>
            {
                Self::DuplicateKey
            }
            _ => Self::Other {
                status: None,
                message: Some(err.to_string()),
            },
        }
    }

    /// Classify a malformed document identifier.
    pub fn from_object_id(_err: &mongodb::bson::oid::Error) -> Self {
        Self::InvalidId
    }

    /// Classify a JSON deserialization error: syntax problems are malformed
    /// input, data problems are type mismatches.
    pub fn from_json(err: &serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Syntax | Category::Eof => Self::MalformedInput,
            Category::Data => Self::TypeMismatch,
            Category::Io => Self::Other {
                status: None,
                message: Some(err.to_string()),
            },
        }
    }

    /// HTTP status for this shape.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId => StatusCode::NOT_FOUND,
            Self::DuplicateKey | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MalformedInput | Self::TypeMismatch => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Other { status, .. } => status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => f.write_str("Resource not found"),
            Self::DuplicateKey => f.write_str("Duplicate field value entered"),
            Self::Validation(messages) => f.write_str(&messages.join(",")),
            Self::MalformedInput => f.write_str("Invalid date"),
            Self::TypeMismatch => f.write_str("Invalid type"),
            Self::Unauthorized => f.write_str(UNLOGGED_MESSAGE),
            Self::Other { message, .. } => {
                f.write_str(message.as_deref().unwrap_or(DEFAULT_MESSAGE))
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if message != UNLOGGED_MESSAGE {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        }

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_maps_to_404() {
        let err = ApiError::InvalidId;
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Resource not found");
    }

    #[test]
    fn duplicate_key_maps_to_400() {
        let err = ApiError::DuplicateKey;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Duplicate field value entered");
    }

    #[test]
    fn validation_joins_field_messages() {
        let err = ApiError::validation([("a", "msg1"), ("b", "msg2")]);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "msg1,msg2");
    }

    #[test]
    fn unrecognized_shape_falls_back_to_500_server_error() {
        let err = ApiError::Other {
            status: None,
            message: None,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Server Error");
    }

    #[test]
    fn other_keeps_explicit_status_and_message() {
        let err = ApiError::Other {
            status: Some(StatusCode::CONFLICT),
            message: Some("already exists".to_string()),
        };
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "already exists");
    }

    #[test]
    fn syntax_and_data_json_errors_classified() {
        let syntax = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert_eq!(ApiError::from_json(&syntax), ApiError::MalformedInput);
        assert_eq!(ApiError::from_json(&syntax).to_string(), "Invalid date");

        let data = serde_json::from_str::<u32>("\"text\"").unwrap_err();
        assert_eq!(ApiError::from_json(&data), ApiError::TypeMismatch);
        assert_eq!(ApiError::from_json(&data).to_string(), "Invalid type");
    }

    #[tokio::test]
    async fn response_body_shape() {
        let response = ApiError::Other {
            status: None,
            message: None,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "Server Error" }));
    }
}
