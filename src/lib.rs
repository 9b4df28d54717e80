//! Chat and image generation over multiple hosted providers.
//!
//! A [`GenerationClient`] sends one request per prompt to OpenAI, Anthropic or
//! Flux. Image requests go through a [`RequestTracker`], which caps how many
//! run at once and reports each request's outcome as a [`TrackerEvent`] for a
//! [`PresentationAdapter`] to render. [`ChatSession`] ties these together with
//! usage counters and a locally persisted transcript.

pub mod client;
pub mod error;
pub mod factory;
pub mod history;
pub mod image;
pub mod presentation;
pub mod provider;
pub mod providers;
pub mod session;
pub mod store;
pub mod theme;
pub mod tracker;
pub mod types;
pub mod usage;

// Re-export core types for easy usage
pub use client::GenerationClient;
pub use error::Error;
pub use factory::{ProviderFactory, ProviderId, ProviderKind};
pub use presentation::{PlaceholderBoard, PresentationAdapter};
pub use provider::GenerationProvider;
pub use providers::*;
pub use session::{ChatSession, Outcome};
pub use tracker::{RequestTracker, DEFAULT_CEILING};
pub use types::*;
pub use usage::UsageCounters;
