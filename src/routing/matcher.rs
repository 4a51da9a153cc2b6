//! Path classification.
//!
//! # Responsibilities
//! - Match file extensions (case-insensitive)
//! - Match directory paths (trailing separator)
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Only the final path segment contributes an extension
//! - Empty condition list = never matches
//! - No regex, no MIME lookup; the allowlist is the whole policy

/// Extensions that mark a document for the Markdown render pipeline.
pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Trait for matching native paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Returns the extension of the last path segment, if any.
pub fn extension(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Matches a fixed set of file extensions.
#[derive(Debug, Clone)]
pub struct ExtensionMatcher {
    extensions: Vec<String>,
}

impl ExtensionMatcher {
    /// Create a new extension matcher.
    /// Extensions are normalized to lowercase, without a leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Matcher for Markdown documents.
    pub fn markdown() -> Self {
        Self::new(MARKDOWN_EXTENSIONS)
    }
}

impl Matcher for ExtensionMatcher {
    fn matches(&self, path: &str) -> bool {
        extension(path)
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }
}

/// Matches paths naming a directory. A directory implies its index file.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryMatcher;

impl Matcher for DirectoryMatcher {
    fn matches(&self, path: &str) -> bool {
        path.ends_with('/')
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Directories plus the given static HTML extensions.
    pub fn servable<I, S>(static_html_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(vec![
            Box::new(DirectoryMatcher),
            Box::new(ExtensionMatcher::new(static_html_extensions)),
        ])
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}
