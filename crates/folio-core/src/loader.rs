use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use folio_schema::{Route, ViewBundle, ViewId, ViewLoadState};
use tokio::sync::mpsc;

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Asynchronous acquisition of a route's view content. An `Err` here is an
/// acquisition failure (retryable); sources degrade application-level data
/// problems internally rather than failing the whole view.
#[async_trait]
pub trait ViewSource: Send + Sync {
    async fn acquire(&self, route: Route) -> Result<ViewBundle>;
}

/// Per-route view acquisition cache.
///
/// State machine per route: `NotRequested → Pending → Ready | Failed`.
/// `Ready` is cached for the process lifetime and never re-fetched; `Failed`
/// transitions back to `Pending` on the next `load` call. At most one
/// acquisition is in flight per route: a `load` on a `Pending` route
/// observes the in-flight result instead of starting a second fetch.
/// In-flight acquisitions are never cancelled by navigating away.
pub struct ViewLoader {
    source: Arc<dyn ViewSource>,
    slots: Arc<Mutex<HashMap<ViewId, ViewLoadState>>>,
    events: mpsc::Sender<ViewId>,
}

impl ViewLoader {
    /// Returns the loader and the completion-event stream the UI loop
    /// drains to recompose after an acquisition settles.
    pub fn new(source: Arc<dyn ViewSource>) -> (Self, mpsc::Receiver<ViewId>) {
        let (events, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (
            Self {
                source,
                slots: Arc::new(Mutex::new(HashMap::new())),
                events,
            },
            rx,
        )
    }

    /// Current state without side effects.
    pub fn state(&self, view: ViewId) -> ViewLoadState {
        self.slots
            .lock()
            .map(|slots| slots.get(&view).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Recomposition entry point: begins an acquisition for a `NotRequested`
    /// route but reports `Failed` as-is. Restarting a failed acquisition is
    /// reserved for `load`, so redrawing a failed page can never retry it.
    /// Checked and advanced under one lock, so an acquisition settling as
    /// `Failed` mid-call is still reported, not restarted.
    pub fn observe(&self, route: Route) -> ViewLoadState {
        let mut slots = match self.slots.lock() {
            Ok(slots) => slots,
            Err(poisoned) => poisoned.into_inner(),
        };
        let slot = slots.entry(route.view).or_default();
        match slot {
            ViewLoadState::NotRequested => {
                *slot = ViewLoadState::Pending;
                drop(slots);
                self.spawn_acquisition(route);
                ViewLoadState::Pending
            }
            other => other.clone(),
        }
    }

    /// Navigation entry point: begins an acquisition for `NotRequested` and
    /// `Failed` routes, is idempotent for `Pending`, and returns the cached
    /// bundle for `Ready`.
    pub fn load(&self, route: Route) -> ViewLoadState {
        let mut slots = match self.slots.lock() {
            Ok(slots) => slots,
            Err(poisoned) => poisoned.into_inner(),
        };
        let slot = slots.entry(route.view).or_default();
        match slot {
            ViewLoadState::Pending => ViewLoadState::Pending,
            ViewLoadState::Ready(bundle) => ViewLoadState::Ready(bundle.clone()),
            ViewLoadState::NotRequested | ViewLoadState::Failed(_) => {
                *slot = ViewLoadState::Pending;
                drop(slots);
                self.spawn_acquisition(route);
                ViewLoadState::Pending
            }
        }
    }

    fn spawn_acquisition(&self, route: Route) {
        let source = self.source.clone();
        let slots = self.slots.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let next = match source.acquire(route).await {
                Ok(bundle) => ViewLoadState::Ready(Arc::new(bundle)),
                Err(e) => {
                    tracing::warn!("view acquisition failed for {}: {e}", route.path);
                    ViewLoadState::Failed(e.to_string())
                }
            };
            if let Ok(mut slots) = slots.lock() {
                slots.insert(route.view, next);
            }
            // UI loop may already be gone on shutdown; dropped events are fine.
            let _ = events.try_send(route.view);
        });
    }
}
