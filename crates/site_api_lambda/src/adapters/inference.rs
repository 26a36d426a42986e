/// Synchronous JSON-in/JSON-out scoring call against a named endpoint.
pub trait InferenceEndpoint {
    fn invoke(&self, endpoint_name: &str, payload: &[u8]) -> Result<Vec<u8>, InvokeError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvokeError(pub String);
