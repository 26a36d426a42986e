use serde_json::{json, Value};
use site_api_core::config::{ConfigError, VisitsConfig};
use site_api_core::envelope::{
    build_response, error_response, preflight_response, ApiGatewayResponse, VISITS_METHODS,
};
use site_api_core::error::ApiError;
use site_api_core::request::extract_method;

use crate::adapters::counter_store::{CounterStore, StoreError};
use crate::telemetry::{log_completed, log_failure};

pub const VISITS_FIELD: &str = "visits";

const COMPONENT: &str = "visits_handler";

pub struct VisitsHandler<S> {
    config: Result<VisitsConfig, ConfigError>,
    store: S,
}

impl<S: CounterStore> VisitsHandler<S> {
    /// A configuration error is kept and reported on every `GET`; `OPTIONS`
    /// keeps working without configuration.
    pub fn new(config: Result<VisitsConfig, ConfigError>, store: S) -> Self {
        Self { config, store }
    }

    pub fn handle(&self, event: &Value) -> ApiGatewayResponse {
        let method = extract_method(event);
        let response = match self.dispatch(&method) {
            Ok(response) => response,
            Err(error) => {
                log_failure(COMPONENT, &method, &error);
                error_response(&error, VISITS_METHODS)
            }
        };
        log_completed(COMPONENT, &method, &response);
        response
    }

    fn dispatch(&self, method: &str) -> Result<ApiGatewayResponse, ApiError> {
        match method {
            "OPTIONS" => Ok(preflight_response(VISITS_METHODS)),
            "GET" => {
                let visits = self.count_visit()?;
                Ok(build_response(200, &json!({ "visits": visits }), VISITS_METHODS))
            }
            _ => Err(ApiError::MethodNotAllowed),
        }
    }

    /// Single-attempt increment; returns the post-update count.
    pub fn count_visit(&self) -> Result<i64, ApiError> {
        let config = self.config.as_ref().map_err(|error| error.clone())?;

        self.store
            .increment(&config.table_name, &config.item_id, VISITS_FIELD, 1)
            .map_err(|error| match error {
                StoreError::Service { code, .. } => ApiError::Store { code },
                StoreError::Unexpected(message) => {
                    tracing::error!(
                        component = COMPONENT,
                        event = "unexpected_store_response",
                        table = %config.table_name,
                        error = %message,
                    );
                    ApiError::Unhandled
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct RecordingStore {
        calls: Mutex<Vec<(String, String, String, i64)>>,
        reply: Result<i64, StoreError>,
    }

    impl RecordingStore {
        fn replying(reply: Result<i64, StoreError>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> Vec<(String, String, String, i64)> {
            self.calls.lock().expect("poisoned mutex").clone()
        }
    }

    impl CounterStore for RecordingStore {
        fn increment(
            &self,
            table: &str,
            key: &str,
            field: &str,
            amount: i64,
        ) -> Result<i64, StoreError> {
            self.calls.lock().expect("poisoned mutex").push((
                table.to_string(),
                key.to_string(),
                field.to_string(),
                amount,
            ));
            self.reply.clone()
        }
    }

    fn configured() -> Result<VisitsConfig, ConfigError> {
        Ok(VisitsConfig {
            table_name: "site-visits".to_string(),
            item_id: "home".to_string(),
        })
    }

    fn get_event() -> Value {
        json!({ "requestContext": { "http": { "method": "GET" } } })
    }

    #[test]
    fn get_increments_configured_record() {
        let handler = VisitsHandler::new(configured(), RecordingStore::replying(Ok(42)));

        let response = handler.handle(&get_event());

        assert_eq!(response.status_code, 200);
        assert_eq!(response.json_body(), Some(json!({ "visits": 42 })));
        assert_eq!(
            handler.store.calls(),
            vec![(
                "site-visits".to_string(),
                "home".to_string(),
                "visits".to_string(),
                1
            )]
        );
    }

    #[test]
    fn options_skips_the_store() {
        let handler = VisitsHandler::new(configured(), RecordingStore::replying(Ok(1)));

        let response = handler.handle(&json!({ "httpMethod": "OPTIONS" }));

        assert_eq!(response.status_code, 200);
        assert_eq!(response.json_body(), Some(json!({ "ok": true })));
        assert!(handler.store.calls().is_empty());
    }

    #[test]
    fn other_methods_are_rejected() {
        let handler = VisitsHandler::new(configured(), RecordingStore::replying(Ok(1)));

        for event in [json!({ "httpMethod": "POST" }), json!({})] {
            let response = handler.handle(&event);
            assert_eq!(response.status_code, 405);
            assert_eq!(
                response.json_body(),
                Some(json!({ "error": "MethodNotAllowed" }))
            );
        }
        assert!(handler.store.calls().is_empty());
    }

    #[test]
    fn missing_table_is_reported_before_store_access() {
        let handler = VisitsHandler::new(
            Err(ConfigError::Missing { var: "TABLE_NAME" }),
            RecordingStore::replying(Ok(1)),
        );

        let response = handler.handle(&get_event());

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.json_body(),
            Some(json!({ "error": "Missing TABLE_NAME env var" }))
        );
        assert!(handler.store.calls().is_empty());
    }

    #[test]
    fn store_errors_surface_their_code() {
        let handler = VisitsHandler::new(
            configured(),
            RecordingStore::replying(Err(StoreError::Service {
                code: "ResourceNotFoundException".to_string(),
                message: "Requested resource not found".to_string(),
            })),
        );

        let response = handler.handle(&get_event());

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.json_body(),
            Some(json!({ "error": "DynamoDBError", "code": "ResourceNotFoundException" }))
        );
        assert_eq!(handler.store.calls().len(), 1);
    }

    #[test]
    fn unexpected_store_replies_are_unhandled() {
        let handler = VisitsHandler::new(
            configured(),
            RecordingStore::replying(Err(StoreError::Unexpected(
                "visits attribute missing".to_string(),
            ))),
        );

        let response = handler.handle(&get_event());

        assert_eq!(response.status_code, 500);
        assert_eq!(response.json_body(), Some(json!({ "error": "UnhandledError" })));
    }
}
