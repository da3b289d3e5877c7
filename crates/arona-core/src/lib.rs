//! # arona-core: Foundational Types for arona
//!
//! Defines the data model shared by every other crate in the workspace:
//! the items returned by the remote strategy-image search service, the
//! classified outcome of a search, validated asset names, and the reply
//! events the resolution engine emits.
//!
//! ## Key Design Principles
//!
//! 1. **Tagged variants at the parse boundary.** `ItemKind` and
//!    `ResolutionOutcome` are closed enums. Anything the remote service
//!    sends that does not fit them is rejected where the response is
//!    parsed, never probed field-by-field at each use site.
//!
//! 2. **`AssetName` newtype.** Every filesystem path derived from a remote
//!    item name flows through `AssetName::new()`, which rejects names that
//!    would escape or confuse the data directory.
//!
//! 3. **Verbatim queries.** Query strings are passed to the remote service
//!    exactly as typed. No case folding, no whitespace normalization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `arona-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod item;
pub mod name;
pub mod outcome;
pub mod reply;

// Re-export primary types for ergonomic imports.
pub use item::{ItemKind, ResultItem, SearchMethod, UnknownMethod};
pub use name::{AssetName, NameError};
pub use outcome::{ResolutionOutcome, ServiceFailure};
pub use reply::Reply;
