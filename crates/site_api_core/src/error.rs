//! Error taxonomy shared by both handlers.
//!
//! Every failure a handler can observe is converted into an [`ApiError`]
//! before it leaves the handler, and every [`ApiError`] maps to exactly one
//! status code and JSON body.

use serde_json::{json, Value};

use crate::config::ConfigError;

/// Coarse classification used for logging and status selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    MethodNotAllowed,
    Validation,
    Upstream,
    Unhandled,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Validation => "validation",
            Self::Upstream => "upstream",
            Self::Unhandled => "unhandled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request body is not valid JSON")]
    InvalidJson,

    #[error("missing features: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),

    #[error("store rejected the update ({code})")]
    Store { code: String },

    #[error("prediction failed: {detail}")]
    Predict { detail: String },

    #[error("unhandled error")]
    Unhandled,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            Self::InvalidJson | Self::MissingFeatures(_) => ErrorKind::Validation,
            Self::Store { .. } | Self::Predict { .. } => ErrorKind::Upstream,
            Self::Unhandled => ErrorKind::Unhandled,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::MethodNotAllowed => 405,
            ErrorKind::Validation => 400,
            ErrorKind::Configuration | ErrorKind::Upstream | ErrorKind::Unhandled => 500,
        }
    }

    /// JSON body returned to the caller. Always carries an `error` field.
    pub fn to_body(&self) -> Value {
        match self {
            Self::Configuration(error) => json!({ "error": error.to_string() }),
            Self::MethodNotAllowed => json!({ "error": "MethodNotAllowed" }),
            Self::InvalidJson => json!({ "error": "InvalidJSON" }),
            Self::MissingFeatures(missing) => json!({
                "error": "MissingFeatures",
                "missing": missing,
            }),
            Self::Store { code } => json!({ "error": "DynamoDBError", "code": code }),
            Self::Predict { detail } => json!({ "error": "PredictError", "detail": detail }),
            Self::Unhandled => json!({ "error": "UnhandledError" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_uses_env_var_message() {
        let error = ApiError::from(ConfigError::Missing { var: "TABLE_NAME" });

        assert_eq!(error.status_code(), 500);
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert_eq!(
            error.to_body(),
            json!({ "error": "Missing TABLE_NAME env var" })
        );
    }

    #[test]
    fn validation_errors_are_client_errors() {
        assert_eq!(ApiError::InvalidJson.status_code(), 400);
        assert_eq!(ApiError::MethodNotAllowed.status_code(), 405);

        let missing = ApiError::MissingFeatures(vec!["BMI".to_string(), "Age".to_string()]);
        assert_eq!(missing.status_code(), 400);
        assert_eq!(
            missing.to_body(),
            json!({ "error": "MissingFeatures", "missing": ["BMI", "Age"] })
        );
    }

    #[test]
    fn upstream_errors_carry_shareable_detail() {
        let store = ApiError::Store {
            code: "ResourceNotFoundException".to_string(),
        };
        assert_eq!(store.kind(), ErrorKind::Upstream);
        assert_eq!(
            store.to_body(),
            json!({ "error": "DynamoDBError", "code": "ResourceNotFoundException" })
        );

        let predict = ApiError::Predict {
            detail: "endpoint timed out".to_string(),
        };
        assert_eq!(predict.status_code(), 500);
        assert_eq!(predict.to_body()["detail"], "endpoint timed out");
    }

    #[test]
    fn unhandled_error_leaks_no_detail() {
        assert_eq!(ApiError::Unhandled.to_body(), json!({ "error": "UnhandledError" }));
    }
}
