//! Single-flight access token refresh
//!
//! Every caller that sees a 401 while a refresh is outstanding joins that
//! refresh instead of starting another one, and all of them observe the same
//! outcome. The slot empties as soon as the refresh settles, success or not,
//! so the next invalidation starts a fresh refresh.

use super::ClientError;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Outcome shared by every caller of one refresh: the new access token
pub type RefreshOutcome = Result<String, Arc<ClientError>>;

type InflightRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

struct Slot {
    generation: u64,
    refresh: InflightRefresh,
}

/// De-duplication gate for refresh calls
#[derive(Default)]
pub struct RefreshGate {
    inflight: Arc<Mutex<Option<Slot>>>,
    generation: AtomicU64,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refresh is currently outstanding
    pub fn is_refreshing(&self) -> bool {
        self.inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Join the outstanding refresh, or start one with `start`
    ///
    /// `start` is only called when no refresh is in flight. The returned
    /// future runs to completion even if the caller that started it goes
    /// away, as long as someone else is still waiting on it.
    pub async fn refresh<F, Fut>(&self, start: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ClientError>> + Send + 'static,
    {
        let refresh = {
            let mut slot = self
                .inflight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            match slot.as_ref() {
                Some(existing) => {
                    tracing::debug!(
                        generation = existing.generation,
                        "Joining in-flight token refresh"
                    );
                    existing.refresh.clone()
                }
                None => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
                    tracing::debug!(generation, "Starting token refresh");

                    let inflight = Arc::clone(&self.inflight);
                    let work = start();
                    let refresh = async move {
                        let outcome = work.await.map_err(Arc::new);
                        let mut slot = inflight.lock().unwrap_or_else(PoisonError::into_inner);
                        if slot.as_ref().is_some_and(|s| s.generation == generation) {
                            *slot = None;
                        }
                        outcome
                    }
                    .boxed()
                    .shared();

                    *slot = Some(Slot {
                        generation,
                        refresh: refresh.clone(),
                    });
                    refresh
                }
            }
        };

        refresh.await
    }
}
