//! Page-load activation and the manual conversion entry point.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use tp_adapters::ReadyState;
use tp_core::{DispatchResult, OrderData};

use crate::tracker::Tracker;

/// How the initial click event was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationMode {
    /// The document had finished parsing; tracking started right away.
    Immediate,
    /// The document was still loading; tracking waits for the ready signal.
    Deferred,
}

/// An installed pixel.
///
/// Sends are spawned onto the current Tokio runtime and never awaited by the
/// pixel itself. The returned handles may be dropped.
pub struct Pixel {
    tracker: Arc<Tracker>,
    mode: ActivationMode,
    initial: Option<JoinHandle<DispatchResult>>,
}

impl Pixel {
    /// Schedule the click event and return the conversion entry point.
    ///
    /// The loading check happens once, here. When the page is still loading the
    /// click waits for `dom_ready`; otherwise `dom_ready` is dropped unpolled.
    /// Must be called from within a Tokio runtime.
    pub fn install<F>(tracker: Arc<Tracker>, dom_ready: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mode = match tracker.env().ready_state() {
            ReadyState::Loading => ActivationMode::Deferred,
            ReadyState::Interactive | ReadyState::Complete => ActivationMode::Immediate,
        };

        let task_tracker = tracker.clone();
        let initial = match mode {
            ActivationMode::Immediate => {
                tokio::spawn(async move { task_tracker.track_click().await })
            }
            ActivationMode::Deferred => tokio::spawn(async move {
                dom_ready.await;
                task_tracker.track_click().await
            }),
        };
        info!(mode = ?mode, "pixel installed");

        Self {
            tracker,
            mode,
            initial: Some(initial),
        }
    }

    pub fn mode(&self) -> ActivationMode {
        self.mode
    }

    pub fn tracker(&self) -> &Arc<Tracker> {
        &self.tracker
    }

    /// Handle to the page-load click dispatch; `None` once taken.
    pub fn take_initial_dispatch(&mut self) -> Option<JoinHandle<DispatchResult>> {
        self.initial.take()
    }

    /// Report a completed order against the visitor's session.
    pub fn track_conversion(&self, order: OrderData) -> JoinHandle<DispatchResult> {
        let tracker = self.tracker.clone();
        tokio::spawn(async move { tracker.track_conversion(order).await })
    }
}
