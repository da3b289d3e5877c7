//! # arona-engine: Query Resolution
//!
//! Turns a free-text query into a short, finite sequence of reply events
//! for the hosting chat platform. Combines [`arona_client::ImageClient`]
//! (search and download) with [`arona_cache::AssetCache`] (local copies
//! keyed by name and verified by hash).
//!
//! ## Reply Sequence
//!
//! | Outcome | Replies |
//! |---------|---------|
//! | exact, text item | progress, summary, text |
//! | exact, binary item | progress, summary, image *or* error |
//! | fuzzy | progress, candidate list (+ first candidate's content with `AutoSelectFirst`) |
//! | not found | progress, "no result" |
//! | service error | progress, error with code and message |
//!
//! Each call re-runs resolution from scratch; nothing is memoized across
//! calls except the asset cache.

pub mod config;
pub mod engine;
pub mod render;

pub use config::{EngineConfig, EngineConfigError, FuzzyPolicy};
pub use engine::{ReplySender, ResolutionEngine};
