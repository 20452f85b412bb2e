//! State holder that keeps a camera preview's ratio and size in step with its
//! container.
//!
//! [`AutoSize`] observes two inputs, the container [`Dimensions`] and the
//! camera's supported ratio list, and recomputes its [`FitState`] synchronously
//! every time either one changes. The supported list comes from a single
//! asynchronous query per camera handle; results arrive on an internal channel
//! and are applied by [`AutoSize::settle`] or [`AutoSize::try_settle`], so all
//! state changes happen on the owner's task.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::AutoSizeConfig;
use crate::error::FitError;
use crate::events::CapabilityEvent;
use crate::fit::{Suggestion, suggest};
use crate::geometry::{Dimensions, LayoutEvent};
use crate::tasks::capabilities::{self, CameraHandle};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FitState {
    /// Container size or supported ratios not known yet.
    #[default]
    Unknown,
    Resolved(Suggestion),
    /// Both inputs are known but no suggestion could be made.
    Failed(FitError),
}

struct Connection<H> {
    handle: Arc<H>,
    generation: u64,
    cancel: CancellationToken,
    pending: bool,
}

pub struct AutoSize<H: CameraHandle> {
    config: AutoSizeConfig,
    dimensions: Option<Dimensions>,
    supported: Option<Vec<String>>,
    state: FitState,
    connection: Option<Connection<H>>,
    generation: u64,
    last_query_error: Option<FitError>,
    events_tx: UnboundedSender<CapabilityEvent>,
    events_rx: UnboundedReceiver<CapabilityEvent>,
    state_tx: watch::Sender<FitState>,
}

impl<H: CameraHandle> AutoSize<H> {
    pub fn new(config: AutoSizeConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(FitState::Unknown);
        Self {
            config,
            dimensions: None,
            supported: None,
            state: FitState::Unknown,
            connection: None,
            generation: 0,
            last_query_error: None,
            events_tx,
            events_rx,
            state_tx,
        }
    }

    /// Layout handler for the preview container.
    pub fn on_layout(&mut self, event: LayoutEvent) {
        self.set_dimensions(Some(event.into()));
    }

    pub fn set_dimensions(&mut self, dimensions: Option<Dimensions>) {
        self.dimensions = dimensions;
        self.recompute();
    }

    /// Mount callback for the camera component: `None` means it went away.
    ///
    /// Mounting a handle spawns the capability query, so this must be called
    /// from within a Tokio runtime.
    pub fn on_mount(&mut self, handle: Option<Arc<H>>) {
        match handle {
            Some(handle) => self.connect(handle),
            None => self.disconnect(),
        }
    }

    /// Start the capability query for `handle`.
    ///
    /// Reconnecting the handle that is already connected does nothing. Any
    /// query still running for a previous handle is cancelled. Must be called
    /// from within a Tokio runtime.
    pub fn connect(&mut self, handle: Arc<H>) {
        if let Some(current) = &self.connection {
            if Arc::ptr_eq(&current.handle, &handle) {
                debug!(generation = current.generation, "camera handle already connected");
                return;
            }
        }
        self.cancel_connection();

        self.generation += 1;
        self.last_query_error = None;
        let generation = self.generation;
        let cancel = CancellationToken::new();
        debug!(generation, "querying camera aspect ratios");
        tokio::spawn(capabilities::run(
            Arc::clone(&handle),
            generation,
            self.events_tx.clone(),
            cancel.clone(),
            self.config.query_timeout,
        ));
        self.connection = Some(Connection {
            handle,
            generation,
            cancel,
            pending: true,
        });
    }

    /// Cancel any in-flight query and forget the current handle.
    pub fn disconnect(&mut self) {
        if !self.cancel_connection() {
            return;
        }
        if self.config.clear_on_disconnect && self.supported.take().is_some() {
            self.recompute();
        }
    }

    fn cancel_connection(&mut self) -> bool {
        match self.connection.take() {
            Some(connection) => {
                debug!(generation = connection.generation, "disconnecting camera handle");
                connection.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Apply a capability result. Results for a handle that is no longer
    /// connected are dropped and `false` is returned.
    pub fn apply(&mut self, event: CapabilityEvent) -> bool {
        let Some(connection) = self
            .connection
            .as_mut()
            .filter(|c| c.generation == event.generation)
        else {
            debug!(generation = event.generation, "ignoring stale capability result");
            return false;
        };
        connection.pending = false;
        match event.outcome {
            Ok(ratios) => {
                self.last_query_error = None;
                self.supported = Some(ratios);
                self.recompute();
            }
            Err(err) => self.last_query_error = Some(err),
        }
        true
    }

    /// Wait for the pending capability result and apply it.
    ///
    /// Returns `false` straight away when no query is outstanding. The query
    /// task always reports back, even when the handle panics.
    pub async fn settle(&mut self) -> bool {
        while self.is_querying() {
            let Some(event) = self.events_rx.recv().await else {
                return false;
            };
            if self.apply(event) {
                return true;
            }
        }
        false
    }

    /// Apply every capability result that has already arrived, without
    /// waiting. Returns how many were accepted.
    pub fn try_settle(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }

    fn recompute(&mut self) {
        let next = match suggest(
            self.supported.as_deref(),
            self.dimensions,
            self.config.size_derivation,
        ) {
            Ok(Some(suggestion)) => FitState::Resolved(suggestion),
            Ok(None) => FitState::Unknown,
            Err(err) => FitState::Failed(err),
        };
        self.state_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next.clone();
            true
        });
        self.state = next;
    }

    pub fn state(&self) -> &FitState {
        &self.state
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        match &self.state {
            FitState::Resolved(suggestion) => Some(suggestion),
            _ => None,
        }
    }

    pub fn suggested_ratio(&self) -> Option<&str> {
        self.suggestion().map(|s| s.ratio.as_str())
    }

    pub fn suggested_size(&self) -> Option<Dimensions> {
        self.suggestion().map(|s| s.size)
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    pub fn supported_ratios(&self) -> Option<&[String]> {
        self.supported.as_deref()
    }

    pub fn last_query_error(&self) -> Option<&FitError> {
        self.last_query_error.as_ref()
    }

    pub fn is_querying(&self) -> bool {
        self.connection.as_ref().is_some_and(|c| c.pending)
    }

    /// Receiver notified whenever the state changes.
    pub fn subscribe(&self) -> watch::Receiver<FitState> {
        self.state_tx.subscribe()
    }
}

impl<H: CameraHandle> Drop for AutoSize<H> {
    fn drop(&mut self) {
        self.cancel_connection();
    }
}
