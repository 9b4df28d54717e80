//! Presentation side of the request tracker.
//!
//! The tracker never touches UI state; a [`PresentationAdapter`] subscribes to
//! its events instead. [`PlaceholderBoard`] is an in-memory adapter holding one
//! placeholder per request, which a frontend can render however it likes.

use crate::types::{RequestId, TrackerEvent};
use crate::Error;
use tokio::sync::mpsc;

/// Text shown while an image is being generated.
pub const GENERATING_STATUS: &str = "Generating image...";

/// Receives request lifecycle events.
///
/// For any id, `on_submitted` precedes the single terminal call. Implementations
/// must cope with a terminal call for an id they have never seen.
pub trait PresentationAdapter {
    fn on_submitted(&mut self, id: RequestId, prompt: &str);
    fn on_succeeded(&mut self, id: RequestId, result: &str);
    fn on_failed(&mut self, id: RequestId, error: &Error);
}

/// Forward one tracker event to `adapter`.
pub fn dispatch<A>(adapter: &mut A, event: &TrackerEvent)
where
    A: PresentationAdapter + ?Sized,
{
    match event {
        TrackerEvent::Submitted { id, prompt, .. } => adapter.on_submitted(*id, prompt),
        TrackerEvent::Succeeded { id, result } => adapter.on_succeeded(*id, result),
        TrackerEvent::Failed { id, error } => adapter.on_failed(*id, error),
    }
}

/// Drain `events` into `adapter` until every sender has been dropped.
pub async fn pump<A>(adapter: &mut A, mut events: mpsc::UnboundedReceiver<TrackerEvent>)
where
    A: PresentationAdapter + ?Sized,
{
    while let Some(event) = events.recv().await {
        dispatch(adapter, &event);
    }
}

/// What a placeholder currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceholderState {
    Generating,
    Ready { url: String },
    Errored { message: String },
}

/// One rendered slot in the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub id: RequestId,
    /// Empty when the slot was created lazily by a terminal event.
    pub caption: String,
    pub state: PlaceholderState,
}

impl Placeholder {
    /// Status line for the slot.
    pub fn status_text(&self) -> String {
        match &self.state {
            PlaceholderState::Generating => GENERATING_STATUS.to_string(),
            PlaceholderState::Ready { .. } => self.caption.clone(),
            PlaceholderState::Errored { message } => message.clone(),
        }
    }
}

/// In-memory placeholders keyed by request id, in creation order.
#[derive(Debug, Default)]
pub struct PlaceholderBoard {
    slots: Vec<Placeholder>,
}

impl PlaceholderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: RequestId) -> Option<&Placeholder> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots still waiting on a result.
    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state == PlaceholderState::Generating)
            .count()
    }

    /// Remove a slot. Returns false if it was already gone.
    pub fn remove(&mut self, id: RequestId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        self.slots.len() != before
    }

    fn slot_mut(&mut self, id: RequestId) -> &mut Placeholder {
        let index = match self.slots.iter().position(|slot| slot.id == id) {
            Some(index) => index,
            None => {
                self.slots.push(Placeholder {
                    id,
                    caption: String::new(),
                    state: PlaceholderState::Generating,
                });
                self.slots.len() - 1
            }
        };
        &mut self.slots[index]
    }
}

impl PresentationAdapter for PlaceholderBoard {
    fn on_submitted(&mut self, id: RequestId, prompt: &str) {
        let slot = self.slot_mut(id);
        slot.caption = prompt.to_string();
        slot.state = PlaceholderState::Generating;
    }

    fn on_succeeded(&mut self, id: RequestId, result: &str) {
        self.slot_mut(id).state = PlaceholderState::Ready {
            url: result.to_string(),
        };
    }

    fn on_failed(&mut self, id: RequestId, error: &Error) {
        self.slot_mut(id).state = PlaceholderState::Errored {
            message: format!("Failed to generate image: {error}"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_then_success() {
        let mut board = PlaceholderBoard::new();
        let id = RequestId::new();

        board.on_submitted(id, "a castle");
        assert_eq!(board.get(id).unwrap().status_text(), GENERATING_STATUS);
        assert_eq!(board.pending(), 1);

        board.on_succeeded(id, "https://img/castle.png");
        let slot = board.get(id).unwrap();
        assert_eq!(
            slot.state,
            PlaceholderState::Ready {
                url: "https://img/castle.png".to_string()
            }
        );
        assert_eq!(slot.caption, "a castle");
        assert_eq!(board.pending(), 0);
    }

    #[test]
    fn test_terminal_event_renders_lazily() {
        let mut board = PlaceholderBoard::new();
        let id = RequestId::new();

        board.on_failed(id, &Error::Transport { status: 429, body: String::new() });
        let slot = board.get(id).unwrap();
        assert_eq!(slot.caption, "");
        match &slot.state {
            PlaceholderState::Errored { message } => {
                assert!(message.starts_with("Failed to generate image: "));
                assert!(message.contains("429"));
            }
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut board = PlaceholderBoard::new();
        let id = RequestId::new();
        board.on_submitted(id, "x");

        assert!(board.remove(id));
        assert!(!board.remove(id));
        assert!(board.is_empty());
    }

    #[tokio::test]
    async fn test_pump_drains_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        let first = RequestId::new();
        let second = RequestId::new();
        tx.send(TrackerEvent::Submitted {
            id: first,
            prompt: "one".into(),
            provider: crate::ProviderId::Dalle,
        })
        .unwrap();
        tx.send(TrackerEvent::Succeeded {
            id: second,
            result: "url-2".into(),
        })
        .unwrap();
        drop(tx);

        let mut board = PlaceholderBoard::new();
        pump(&mut board, rx).await;

        assert_eq!(board.len(), 2);
        assert_eq!(board.iter().next().unwrap().id, first);
        assert_eq!(board.pending(), 1);
    }
}
