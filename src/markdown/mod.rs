//! Markdown render subsystem.
//!
//! # Data Flow
//! ```text
//! Content request for *.md / *.markdown
//!     → pipeline.rs (fetch current text from the document source)
//!     → render.rs (Markdown → HTML fragment, fixed options)
//!     → template.rs (embed fragment + resource URLs in the page)
//!     → ResponseData { body, Content-Type: text/html }
//! ```
//!
//! # Design Decisions
//! - Rendering options are fixed, not configurable
//! - Always renders fresh from document text; overlays are bypassed
//! - A failed fetch is returned to the caller, which leaves the request unanswered

pub mod pipeline;
pub mod render;
pub mod template;

pub use pipeline::MarkdownPipeline;
pub use render::render_markdown;
pub use template::{MarkdownPage, PageResources};
