//! Events emitted by the request tracker.

use crate::{Error, ProviderId};
use std::fmt;
use uuid::Uuid;

/// Identifier of one admitted image-generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle notifications for a request, in this order per id:
/// `Submitted`, then exactly one of `Succeeded` or `Failed`.
#[derive(Debug)]
pub enum TrackerEvent {
    /// The request was admitted and its provider call started.
    Submitted {
        id: RequestId,
        prompt: String,
        provider: ProviderId,
    },
    /// The provider returned a result. `result` is passed through unchanged.
    Succeeded { id: RequestId, result: String },
    /// The provider call failed.
    Failed { id: RequestId, error: Error },
}

impl TrackerEvent {
    pub fn id(&self) -> RequestId {
        match self {
            TrackerEvent::Submitted { id, .. }
            | TrackerEvent::Succeeded { id, .. }
            | TrackerEvent::Failed { id, .. } => *id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TrackerEvent::Submitted { .. })
    }
}
