//! Observable billing store
//!
//! Holds the billing snapshot fetched from the backend and drives the
//! `unloaded -> loading -> {failed | loaded}` lifecycle. Observers register
//! a callback and are invoked with a state clone after every transition;
//! a `SubscriptionHandle` unsubscribes on drop. The first successful load
//! emits a one-time `billing shown` analytics event.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use vantage_types::BillingSnapshot;

use crate::analytics::{AnalyticsEvent, AnalyticsSink, NoopSink, BILLING_SHOWN};
use crate::BillingError;

type ObserverFn = Arc<dyn Fn(&BillingState) + Send + Sync>;
type ObserverList = Mutex<Vec<(u64, ObserverFn)>>;

/// Load lifecycle phase, derived from the state fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing fetched yet
    Unloaded,
    /// A fetch is in flight
    Loading,
    /// A snapshot is available
    Loaded,
    /// The last fetch failed and no snapshot is available
    Failed,
}

/// Current billing state as seen by observers and the view renderer
#[derive(Debug, Clone, Default)]
pub struct BillingState {
    /// Latest accepted snapshot (retained across refetches)
    pub snapshot: Option<BillingSnapshot>,
    /// Whether a fetch is in flight
    pub loading: bool,
    /// Error from the last fetch, if it failed
    pub error: Option<BillingError>,
}

impl BillingState {
    /// Derive the lifecycle phase
    pub fn phase(&self) -> LoadPhase {
        if self.loading {
            LoadPhase::Loading
        } else if self.snapshot.is_some() {
            LoadPhase::Loaded
        } else if self.error.is_some() {
            LoadPhase::Failed
        } else {
            LoadPhase::Unloaded
        }
    }
}

/// Observable billing store
pub struct BillingStore {
    state: Mutex<BillingState>,
    observers: Arc<ObserverList>,
    next_observer_id: AtomicU64,
    reported_shown: AtomicBool,
    analytics: Arc<dyn AnalyticsSink>,
}

impl BillingStore {
    /// Create a store forwarding events to the given analytics sink
    pub fn new(analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            state: Mutex::new(BillingState::default()),
            observers: Arc::new(Mutex::new(Vec::new())),
            next_observer_id: AtomicU64::new(0),
            reported_shown: AtomicBool::new(false),
            analytics,
        }
    }

    /// Get a clone of the current state
    pub fn state(&self) -> BillingState {
        self.state.lock().expect("billing state lock poisoned").clone()
    }

    /// Enter the loading phase
    ///
    /// Clears a previous error; an already-loaded snapshot is retained so
    /// the dashboard keeps rendering during a refetch.
    pub fn begin_load(&self) {
        let state = {
            let mut state = self.state.lock().expect("billing state lock poisoned");
            state.loading = true;
            state.error = None;
            state.clone()
        };
        tracing::debug!(phase = ?state.phase(), "billing load started");
        self.notify(&state);
    }

    /// Leave the loading phase with the fetch outcome
    ///
    /// An `Ok` snapshot is validated before it is accepted; a snapshot
    /// violating billing invariants is rejected and recorded as an error.
    pub fn finish_load(&self, result: Result<BillingSnapshot, BillingError>) {
        let mut first_shown = false;
        let state = {
            let mut state = self.state.lock().expect("billing state lock poisoned");
            state.loading = false;
            match result {
                Ok(snapshot) => match snapshot.validate() {
                    Ok(()) => {
                        state.error = None;
                        state.snapshot = Some(snapshot);
                        first_shown = !self.reported_shown.swap(true, Ordering::SeqCst);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "rejecting invalid billing snapshot");
                        state.error = Some(err.into());
                    }
                },
                Err(err) => {
                    tracing::debug!(error = %err, "billing load failed");
                    state.error = Some(err);
                }
            }
            state.clone()
        };

        if first_shown {
            let has_active_subscription = state
                .snapshot
                .as_ref()
                .is_some_and(|s| s.has_active_subscription);
            self.analytics.capture(
                AnalyticsEvent::new(BILLING_SHOWN).with_properties(serde_json::json!({
                    "has_active_subscription": has_active_subscription,
                })),
            );
        }

        tracing::debug!(phase = ?state.phase(), "billing load finished");
        self.notify(&state);
    }

    /// Register an observer invoked with a state clone after every
    /// transition. Dropping the returned handle unsubscribes.
    pub fn subscribe(
        &self,
        callback: impl Fn(&BillingState) + Send + Sync + 'static,
    ) -> SubscriptionHandle {
        let id = self.next_observer_id.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .expect("observer list lock poisoned")
            .push((id, Arc::new(callback)));
        SubscriptionHandle {
            id,
            observers: Arc::downgrade(&self.observers),
        }
    }

    /// Invoke all observers outside the state lock
    fn notify(&self, state: &BillingState) {
        let callbacks: Vec<ObserverFn> = self
            .observers
            .lock()
            .expect("observer list lock poisoned")
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(state);
        }
    }
}

impl Default for BillingStore {
    fn default() -> Self {
        Self::new(Arc::new(NoopSink))
    }
}

impl std::fmt::Debug for BillingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered observer
///
/// Unsubscribes when dropped; `unsubscribe` does the same explicitly.
#[must_use = "dropping the handle unsubscribes the observer"]
pub struct SubscriptionHandle {
    id: u64,
    observers: Weak<ObserverList>,
}

impl SubscriptionHandle {
    /// Remove the observer from the store
    pub fn unsubscribe(self) {
        // Drop does the work
    }

    fn remove(&self) {
        if let Some(observers) = self.observers.upgrade() {
            observers
                .lock()
                .expect("observer list lock poisoned")
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .finish()
    }
}
