//! Normalization of inbound API Gateway events.
//!
//! Two proxy event shapes reach the handlers: HTTP API (payload v2), which
//! carries the verb under `requestContext.http.method`, and REST API
//! (payload v1), which carries it as a top-level `httpMethod`. Each shape is
//! a [`MethodSource`]; sources are consulted in priority order.

use serde_json::{Map, Value};

pub trait MethodSource {
    fn method<'a>(&self, event: &'a Value) -> Option<&'a str>;
}

/// `requestContext.http.method` (HTTP API, payload v2).
pub struct HttpApiV2;

/// Top-level `httpMethod` (REST API, payload v1).
pub struct RestApiV1;

impl MethodSource for HttpApiV2 {
    fn method<'a>(&self, event: &'a Value) -> Option<&'a str> {
        event
            .get("requestContext")?
            .get("http")?
            .get("method")?
            .as_str()
    }
}

impl MethodSource for RestApiV1 {
    fn method<'a>(&self, event: &'a Value) -> Option<&'a str> {
        event.get("httpMethod")?.as_str()
    }
}

const METHOD_SOURCES: [&dyn MethodSource; 2] = [&HttpApiV2, &RestApiV1];

/// Uppercased HTTP verb, or an empty string when no source carries one.
pub fn extract_method(event: &Value) -> String {
    METHOD_SOURCES
        .iter()
        .find_map(|source| source.method(event).filter(|method| !method.is_empty()))
        .map(str::to_ascii_uppercase)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BodyError {
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Decodes the request body into a JSON object.
///
/// The body may arrive as JSON text or as an already-decoded object. A
/// missing, `null` or empty body is an empty object.
pub fn parse_body(event: &Value) -> Result<Map<String, Value>, BodyError> {
    match event.get("body") {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(object)) => Ok(object.clone()),
        Some(Value::String(text)) if text.is_empty() => Ok(Map::new()),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(_) => Err(BodyError::InvalidJson(
                "request body must be a JSON object".to_string(),
            )),
            Err(error) => Err(BodyError::InvalidJson(error.to_string())),
        },
        Some(_) => Err(BodyError::InvalidJson(
            "request body must be a JSON object".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prefers_http_api_v2_method() {
        let event = json!({
            "requestContext": { "http": { "method": "get" } },
            "httpMethod": "POST"
        });

        assert_eq!(extract_method(&event), "GET");
    }

    #[test]
    fn falls_back_to_rest_api_v1_method() {
        assert_eq!(extract_method(&json!({ "httpMethod": "options" })), "OPTIONS");

        let empty_v2 = json!({
            "requestContext": { "http": { "method": "" } },
            "httpMethod": "post"
        });
        assert_eq!(extract_method(&empty_v2), "POST");
    }

    #[test]
    fn missing_method_is_empty_string() {
        assert_eq!(extract_method(&json!({})), "");
        assert_eq!(extract_method(&json!({ "requestContext": {} })), "");
        assert_eq!(extract_method(&json!("GET")), "");
        assert_eq!(extract_method(&json!({ "httpMethod": 7 })), "");
    }

    #[test]
    fn parses_string_and_object_bodies() {
        let from_text = parse_body(&json!({ "body": "{\"Age\": 30}" })).expect("body should parse");
        assert_eq!(from_text["Age"], 30);

        let from_object = parse_body(&json!({ "body": { "Age": 31 } })).expect("body should parse");
        assert_eq!(from_object["Age"], 31);
    }

    #[test]
    fn missing_body_is_empty_object() {
        assert!(parse_body(&json!({})).expect("empty").is_empty());
        assert!(parse_body(&json!({ "body": null })).expect("empty").is_empty());
        assert!(parse_body(&json!({ "body": "" })).expect("empty").is_empty());
    }

    #[test]
    fn rejects_malformed_or_non_object_bodies() {
        assert!(matches!(
            parse_body(&json!({ "body": "not-json" })),
            Err(BodyError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_body(&json!({ "body": "[1, 2]" })),
            Err(BodyError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_body(&json!({ "body": 42 })),
            Err(BodyError::InvalidJson(_))
        ));
    }
}
