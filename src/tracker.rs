//! Bounded tracking of concurrent image-generation requests.
//!
//! The tracker admits a request only while fewer than `ceiling` requests are
//! outstanding. Admission is checked and recorded under a single lock with no
//! await in between, so two concurrent submissions can never both take the
//! last slot. Each admitted request runs its provider call on a spawned task
//! and reports back through a [`TrackerEvent`] channel. The id leaves the live
//! set before its terminal event is sent, so a consumer reacting to that event
//! can submit again straight away.

use crate::types::{RequestId, TrackerEvent};
use crate::{Error, GenerationClient, ProviderId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Number of image generations allowed in flight at once.
pub const DEFAULT_CEILING: usize = 3;

/// Lifecycle state of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestState {
    Pending,
    Succeeded,
    Failed,
}

/// An admitted request, owned by its worker task until it reaches a terminal state.
#[derive(Debug, Clone)]
pub(crate) struct GenerationRequest {
    id: RequestId,
    prompt: String,
    provider: ProviderId,
    state: RequestState,
}

impl GenerationRequest {
    fn new(id: RequestId, prompt: String, provider: ProviderId) -> Self {
        Self {
            id,
            prompt,
            provider,
            state: RequestState::Pending,
        }
    }

    /// Move out of `Pending`. Terminal states never transition again.
    fn finish(&mut self, succeeded: bool) {
        if self.state == RequestState::Pending {
            self.state = if succeeded {
                RequestState::Succeeded
            } else {
                RequestState::Failed
            };
        }
    }
}

#[derive(Debug)]
struct TrackerState {
    live: HashSet<RequestId>,
    ceiling: usize,
    provider: ProviderId,
}

/// Admission control and lifecycle tracking for image generations.
pub struct RequestTracker {
    client: Arc<GenerationClient>,
    state: Arc<Mutex<TrackerState>>,
    events: mpsc::UnboundedSender<TrackerEvent>,
}

impl RequestTracker {
    /// Create a tracker with the default ceiling and the `dalle` provider.
    ///
    /// Returns the receiving end of the event channel alongside the tracker.
    pub fn new(client: Arc<GenerationClient>) -> (Self, mpsc::UnboundedReceiver<TrackerEvent>) {
        Self::with_ceiling(client, DEFAULT_CEILING)
    }

    pub fn with_ceiling(
        client: Arc<GenerationClient>,
        ceiling: usize,
    ) -> (Self, mpsc::UnboundedReceiver<TrackerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let tracker = Self {
            client,
            state: Arc::new(Mutex::new(TrackerState {
                live: HashSet::new(),
                ceiling,
                provider: ProviderId::Dalle,
            })),
            events,
        };
        (tracker, receiver)
    }

    /// Submit a prompt for image generation.
    ///
    /// Fails with [`Error::CapacityExceeded`] without making any provider
    /// call when the live set is full. Must be called from within a tokio
    /// runtime.
    pub fn submit(&self, prompt: impl Into<String>) -> Result<RequestId, Error> {
        let prompt = prompt.into();

        let mut request = {
            let mut state = lock(&self.state);
            if state.live.len() >= state.ceiling {
                warn!(ceiling = state.ceiling, "rejecting image request, tracker at capacity");
                return Err(Error::CapacityExceeded {
                    ceiling: state.ceiling,
                });
            }

            let mut id = RequestId::new();
            while state.live.contains(&id) {
                id = RequestId::new();
            }
            state.live.insert(id);
            GenerationRequest::new(id, prompt, state.provider)
        };

        let id = request.id;
        info!(%id, provider = %request.provider, "image request admitted");
        // A dropped receiver only means nobody is listening.
        let _ = self.events.send(TrackerEvent::Submitted {
            id,
            prompt: request.prompt.clone(),
            provider: request.provider,
        });

        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        tokio::spawn(async move {
            let provider = request.provider;
            let prompt = request.prompt.clone();
            // A panicking provider surfaces here as a JoinError, so the slot
            // is still released and a terminal event still goes out.
            let call = tokio::spawn(async move { client.generate(&prompt, provider).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    let reason = if join_error.is_panic() {
                        "provider panicked"
                    } else {
                        "provider call was cancelled"
                    };
                    Err(Error::protocol(provider.as_str(), reason))
                }
            };
            request.finish(outcome.is_ok());

            lock(&state).live.remove(&request.id);

            let event = match outcome {
                Ok(result) => {
                    debug!(id = %request.id, state = ?request.state, "image request finished");
                    TrackerEvent::Succeeded {
                        id: request.id,
                        result,
                    }
                }
                Err(error) => {
                    warn!(id = %request.id, state = ?request.state, %error, "image request failed");
                    TrackerEvent::Failed {
                        id: request.id,
                        error,
                    }
                }
            };
            let _ = events.send(event);
        });

        Ok(id)
    }

    /// Select the image provider used by later submissions.
    ///
    /// Requests already in flight keep the provider they were admitted with.
    pub fn set_provider(&self, provider: ProviderId) -> Result<(), Error> {
        if !provider.is_image() {
            return Err(Error::invalid_provider(format!(
                "'{provider}' is not an image provider"
            )));
        }
        lock(&self.state).provider = provider;
        info!(%provider, "image provider selected");
        Ok(())
    }

    /// Like [`RequestTracker::set_provider`], parsing the provider name first.
    pub fn set_provider_name(&self, name: &str) -> Result<(), Error> {
        self.set_provider(name.parse()?)
    }

    pub fn provider(&self) -> ProviderId {
        lock(&self.state).provider
    }

    pub fn ceiling(&self) -> usize {
        lock(&self.state).ceiling
    }

    /// Number of requests awaiting a terminal result.
    pub fn live_count(&self) -> usize {
        lock(&self.state).live.len()
    }

    pub fn is_live(&self, id: RequestId) -> bool {
        lock(&self.state).live.contains(&id)
    }

    pub fn has_capacity(&self) -> bool {
        let state = lock(&self.state);
        state.live.len() < state.ceiling
    }
}

// No code path panics while holding the lock, so a poisoned guard still holds
// a consistent live set.
fn lock(state: &Mutex<TrackerState>) -> MutexGuard<'_, TrackerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
