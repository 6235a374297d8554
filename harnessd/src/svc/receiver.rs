use rst_common::with_logging::log::{error, info};
use rst_common::with_tokio::tokio;
use rst_common::with_tokio::tokio::task::JoinHandle;

use identity_harness_admin::Harness;
use identity_harness_core::agent::webhook::Dispatcher;

use crate::errors::HarnessError;

/// `spawn` binds the webhook receiver before returning, so no event sent after an
/// invitation is created can reach a closed port
pub(super) async fn spawn(
    harness: &Harness,
    dispatcher: Dispatcher,
) -> Result<JoinHandle<()>, HarnessError> {
    let server = harness.build_webhook_server(dispatcher);
    let (listener, addr) = server
        .bind()
        .await
        .map_err(|err| HarnessError::WebhookError(err.to_string()))?;

    info!("[harnessd:receiver] listening on {addr}");
    let handle = tokio::spawn(async move {
        if let Err(err) = server.serve_on(listener).await {
            error!("[harnessd:receiver] stopped: {err}");
        }
    });

    Ok(handle)
}
