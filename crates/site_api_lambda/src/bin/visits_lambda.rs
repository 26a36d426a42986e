use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use site_api_core::config::VisitsConfig;
use site_api_core::envelope::ApiGatewayResponse;
use site_api_lambda::adapters::counter_store::{CounterStore, StoreError};
use site_api_lambda::handlers::visits::VisitsHandler;
use site_api_lambda::telemetry::init_logging;

const KEY_ATTRIBUTE: &str = "id";

struct DynamoCounterStore {
    client: aws_sdk_dynamodb::Client,
}

impl CounterStore for DynamoCounterStore {
    fn increment(
        &self,
        table: &str,
        key: &str,
        field: &str,
        amount: i64,
    ) -> Result<i64, StoreError> {
        let client = self.client.clone();
        let table_name = table.to_string();
        let item_key = key.to_string();
        let attribute = field.to_string();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .update_item()
                    .table_name(table_name)
                    .key(KEY_ATTRIBUTE, AttributeValue::S(item_key))
                    .update_expression("ADD #v :inc")
                    .expression_attribute_names("#v", attribute)
                    .expression_attribute_values(":inc", AttributeValue::N(amount.to_string()))
                    .return_values(ReturnValue::UpdatedNew)
                    .send()
                    .await
            })
        })
        .map_err(|error| {
            let code = error.code().unwrap_or("ClientError").to_string();
            let message = match &error {
                SdkError::ServiceError(service) => {
                    service.err().message().unwrap_or_default().to_string()
                }
                other => other.to_string(),
            };
            StoreError::Service { code, message }
        })?;

        let updated = output
            .attributes()
            .and_then(|attributes| attributes.get(field))
            .ok_or_else(|| StoreError::Unexpected(format!("{field} missing from update result")))?;
        match updated {
            AttributeValue::N(number) => number.parse::<i64>().map_err(|error| {
                StoreError::Unexpected(format!("{field} is not an integer ({number}): {error}"))
            }),
            other => Err(StoreError::Unexpected(format!(
                "{field} has non-numeric type: {other:?}"
            ))),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = VisitsConfig::from_env();
    if let Err(error) = &config {
        tracing::error!(component = "visits_lambda", event = "misconfigured", error = %error);
    }

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let handler = VisitsHandler::new(
        config,
        DynamoCounterStore {
            client: aws_sdk_dynamodb::Client::new(&aws_config),
        },
    );
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<ApiGatewayResponse, Error>(handler.handle(&event.payload))
    }))
    .await
}
