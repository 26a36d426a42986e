use aws_sdk_sagemakerruntime::error::DisplayErrorContext;
use aws_sdk_sagemakerruntime::primitives::Blob;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use site_api_core::config::PredictConfig;
use site_api_core::envelope::ApiGatewayResponse;
use site_api_lambda::adapters::inference::{InferenceEndpoint, InvokeError};
use site_api_lambda::handlers::predict::PredictHandler;
use site_api_lambda::telemetry::init_logging;

const JSON_CONTENT_TYPE: &str = "application/json";

struct SageMakerEndpoint {
    client: aws_sdk_sagemakerruntime::Client,
}

impl InferenceEndpoint for SageMakerEndpoint {
    fn invoke(&self, endpoint_name: &str, payload: &[u8]) -> Result<Vec<u8>, InvokeError> {
        let client = self.client.clone();
        let endpoint = endpoint_name.to_string();
        let body = Blob::new(payload.to_vec());

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .invoke_endpoint()
                    .endpoint_name(endpoint)
                    .content_type(JSON_CONTENT_TYPE)
                    .accept(JSON_CONTENT_TYPE)
                    .body(body)
                    .send()
                    .await
            })
        })
        .map_err(|error| InvokeError(format!("{}", DisplayErrorContext(&error))))?;

        Ok(output.body.map(Blob::into_inner).unwrap_or_default())
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = PredictConfig::from_env();
    if let Err(error) = &config {
        tracing::error!(component = "predict_lambda", event = "misconfigured", error = %error);
    }

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let handler = PredictHandler::new(
        config,
        SageMakerEndpoint {
            client: aws_sdk_sagemakerruntime::Client::new(&aws_config),
        },
    );
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<ApiGatewayResponse, Error>(handler.handle(&event.payload))
    }))
    .await
}
