use site_api_core::envelope::ApiGatewayResponse;
use site_api_core::error::ApiError;
use tracing_subscriber::EnvFilter;

/// Installs a JSON-lines subscriber filtered by `RUST_LOG` (default `info`).
/// Later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

pub(crate) fn log_completed(component: &str, method: &str, response: &ApiGatewayResponse) {
    tracing::info!(
        component,
        event = "request_completed",
        method,
        status = response.status_code,
    );
}

pub(crate) fn log_failure(component: &str, method: &str, error: &ApiError) {
    let kind = error.kind().as_str();
    let status = error.status_code();
    if status >= 500 {
        tracing::error!(component, event = "request_failed", method, kind, status, error = %error);
    } else {
        tracing::warn!(component, event = "request_rejected", method, kind, status, error = %error);
    }
}
