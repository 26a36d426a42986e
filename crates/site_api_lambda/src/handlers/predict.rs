use serde_json::Value;
use site_api_core::config::{ConfigError, PredictConfig};
use site_api_core::envelope::{
    error_response, preflight_response, raw_json_response, ApiGatewayResponse, PREDICT_METHODS,
};
use site_api_core::error::ApiError;
use site_api_core::features::{FeatureError, FeatureVector};
use site_api_core::request::{extract_method, parse_body};

use crate::adapters::inference::InferenceEndpoint;
use crate::telemetry::{log_completed, log_failure};

const COMPONENT: &str = "predict_handler";

pub struct PredictHandler<E> {
    config: Result<PredictConfig, ConfigError>,
    endpoint: E,
}

impl<E: InferenceEndpoint> PredictHandler<E> {
    pub fn new(config: Result<PredictConfig, ConfigError>, endpoint: E) -> Self {
        Self { config, endpoint }
    }

    pub fn handle(&self, event: &Value) -> ApiGatewayResponse {
        let method = extract_method(event);
        let response = match self.dispatch(&method, event) {
            Ok(response) => response,
            Err(error) => {
                log_failure(COMPONENT, &method, &error);
                error_response(&error, PREDICT_METHODS)
            }
        };
        log_completed(COMPONENT, &method, &response);
        response
    }

    fn dispatch(&self, method: &str, event: &Value) -> Result<ApiGatewayResponse, ApiError> {
        match method {
            "OPTIONS" => Ok(preflight_response(PREDICT_METHODS)),
            "POST" => {
                let body = self.predict(event)?;
                Ok(raw_json_response(200, body, PREDICT_METHODS))
            }
            _ => Err(ApiError::MethodNotAllowed),
        }
    }

    /// Validates the feature payload, scores it once and returns the
    /// endpoint's JSON reply as text, unchanged.
    pub fn predict(&self, event: &Value) -> Result<String, ApiError> {
        let config = self.config.as_ref().map_err(|error| error.clone())?;

        let payload = parse_body(event).map_err(|_| ApiError::InvalidJson)?;
        let features = FeatureVector::from_payload(&payload).map_err(|error| match error {
            FeatureError::Missing(missing) => ApiError::MissingFeatures(missing),
            other => predict_error(other),
        })?;
        let request_body = serde_json::to_vec(&features).map_err(predict_error)?;

        let reply = self
            .endpoint
            .invoke(&config.endpoint_name, &request_body)
            .map_err(predict_error)?;
        let text = String::from_utf8(reply).map_err(predict_error)?;
        serde_json::from_str::<Value>(&text).map_err(predict_error)?;
        Ok(text)
    }
}

fn predict_error(error: impl std::fmt::Display) -> ApiError {
    ApiError::Predict {
        detail: error.to_string(),
    }
}
