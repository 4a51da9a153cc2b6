//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Native path (from the editor or the interceptor)
//!     → translator.rs (project resolution, URL mapping, document key)
//!     → matcher.rs (directory / static HTML / Markdown classification)
//!     → Return: URL, native path, key, or an explicit None
//! ```
//!
//! # Design Decisions
//! - Translation is pure; no filesystem access
//! - Deterministic: same input always maps to the same URL
//! - Serving policy is an allowlist, not a MIME lookup

pub mod matcher;
pub mod translator;

pub use matcher::{ExtensionMatcher, Matcher};
pub use translator::{PathResolver, PathTranslator, ProjectRootResolver};
