//! Chat transcript with search and highlighting.

use crate::types::{ChatMessage, Role};
use crate::usage::UsageCounters;
use crate::ProviderId;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// A piece of message text after highlighting a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Match(String),
}

/// Ordered list of chat messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// Messages whose content contains `term`, ignoring case.
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&ChatMessage> {
        let needle = term.to_lowercase();
        self.messages
            .iter()
            .filter(|msg| msg.content.to_lowercase().contains(&needle))
            .collect()
    }

    /// Counters recomputed from the stored messages.
    pub fn stats(&self, pricing: ProviderId) -> UsageCounters {
        let mut counters = UsageCounters::new(pricing);
        for msg in &self.messages {
            counters.add_message(&msg.content, msg.role);
        }
        counters
    }

    pub fn count_by_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|msg| msg.role == role).count()
    }
}

/// Split `content` into plain and matching segments for `term`.
///
/// Matching is literal and case-insensitive; matched text keeps its original
/// casing. An empty term yields the whole content as one plain segment.
pub fn highlight(content: &str, term: &str) -> Vec<Segment> {
    if term.is_empty() {
        return vec![Segment::Plain(content.to_string())];
    }

    let pattern = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(_) => return vec![Segment::Plain(content.to_string())],
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(content) {
        if found.start() > last {
            segments.push(Segment::Plain(content[last..found.start()].to_string()));
        }
        segments.push(Segment::Match(found.as_str().to_string()));
        last = found.end();
    }
    if last < content.len() || segments.is_empty() {
        segments.push(Segment::Plain(content[last..].to_string()));
    }
    segments
}
