use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::select;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::FitError;
use crate::events::CapabilityEvent;

/// A mounted camera component that can report which aspect ratios it supports.
pub trait CameraHandle: Send + Sync + 'static {
    /// Ratios in `W:H` form, in the order the hardware lists them.
    fn supported_ratios(&self) -> impl Future<Output = anyhow::Result<Vec<String>>> + Send;
}

/// Issue one capability request for `handle` and report the result on `tx`.
///
/// Exactly one event is sent unless `cancel` fires first, so a disconnected
/// handle can never update the binding. A panic inside the handle is reported
/// as [`FitError::QueryFailed`].
pub async fn run<H: CameraHandle>(
    handle: Arc<H>,
    generation: u64,
    tx: UnboundedSender<CapabilityEvent>,
    cancel: CancellationToken,
    timeout: Option<Duration>,
) {
    let outcome = select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(generation, "capability query cancelled");
            return;
        }
        outcome = query(handle.as_ref(), timeout) => outcome,
    };
    match &outcome {
        Ok(ratios) => debug!(generation, count = ratios.len(), "camera reported aspect ratios"),
        Err(err) => warn!(generation, error = %err, "capability query failed"),
    }
    if tx.send(CapabilityEvent { generation, outcome }).is_err() {
        debug!(generation, "binding dropped before capability result arrived");
    }
}

async fn query<H: CameraHandle>(
    handle: &H,
    timeout: Option<Duration>,
) -> Result<Vec<String>, FitError> {
    let request = AssertUnwindSafe(handle.supported_ratios()).catch_unwind();
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, request)
            .await
            .map_err(|_| FitError::QueryTimedOut(limit))?,
        None => request.await,
    };
    match result {
        Ok(answer) => answer.map_err(|err| FitError::QueryFailed(format!("{err:#}"))),
        Err(payload) => Err(FitError::QueryFailed(format!(
            "camera handle panicked: {}",
            panic_message(&*payload)
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic payload"
    }
}
