use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;

pub const VISITS_METHODS: &str = "GET,OPTIONS";
pub const PREDICT_METHODS: &str = "POST,OPTIONS";

/// API Gateway proxy response. Headers are ordered so identical inputs
/// serialize to identical bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

pub fn build_response(status_code: u16, body: &Value, allowed_methods: &str) -> ApiGatewayResponse {
    raw_json_response(status_code, body.to_string(), allowed_methods)
}

/// Wraps JSON text that has already been serialized (or validated) elsewhere.
pub fn raw_json_response(
    status_code: u16,
    body: String,
    allowed_methods: &str,
) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: cors_headers(allowed_methods),
        body,
    }
}

pub fn preflight_response(allowed_methods: &str) -> ApiGatewayResponse {
    build_response(200, &json!({ "ok": true }), allowed_methods)
}

pub fn error_response(error: &ApiError, allowed_methods: &str) -> ApiGatewayResponse {
    build_response(error.status_code(), &error.to_body(), allowed_methods)
}

fn cors_headers(allowed_methods: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("content-type".to_string(), "application/json".to_string()),
        ("access-control-allow-origin".to_string(), "*".to_string()),
        (
            "access-control-allow-methods".to_string(),
            allowed_methods.to_string(),
        ),
        ("access-control-allow-headers".to_string(), "*".to_string()),
    ])
}
