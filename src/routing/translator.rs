//! Path ↔ URL translation.
//!
//! # Responsibilities
//! - Map native paths inside the project to URLs under the instance base URL
//! - Map such URLs back to native paths
//! - Decide whether a native path may be served by the bridge
//! - Derive overlay document keys from native paths
//!
//! # Design Decisions
//! - The base URL is already encoded and is never re-encoded
//! - The encoded portion keeps URI-reserved characters literal, so
//!   `url_to_path(path_to_url(p)) == p` for every path inside the project
//! - Outside-project paths yield `None`, not an error

use std::sync::Arc;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::routing::matcher::{AnyMatcher, Matcher};

/// Characters left unescaped when a native path becomes part of a URL.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Resolves native paths against the project.
pub trait PathResolver: Send + Sync {
    /// Project-relative form of `path`, or `None` when it lies outside the project.
    fn relative_path(&self, path: &str) -> Option<String>;
}

impl<F> PathResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn relative_path(&self, path: &str) -> Option<String> {
        self(path)
    }
}

/// Resolver anchored at a project root directory.
#[derive(Debug, Clone)]
pub struct ProjectRootResolver {
    root: String,
}

impl ProjectRootResolver {
    /// `root` is normalized to end with a single `/`.
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            root: format!("{}/", root.trim_end_matches('/')),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }
}

impl PathResolver for ProjectRootResolver {
    fn relative_path(&self, path: &str) -> Option<String> {
        path.strip_prefix(&self.root).map(str::to_string)
    }
}

/// Bidirectional mapping between project paths and public URLs.
pub struct PathTranslator {
    base_url: String,
    resolver: Arc<dyn PathResolver>,
    servable: AnyMatcher,
}

impl std::fmt::Debug for PathTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathTranslator")
            .field("base_url", &self.base_url)
            .field("servable", &self.servable)
            .finish_non_exhaustive()
    }
}

impl PathTranslator {
    pub fn new(
        base_url: impl Into<String>,
        resolver: Arc<dyn PathResolver>,
        static_html_extensions: &[String],
    ) -> Self {
        Self {
            base_url: base_url.into(),
            resolver,
            servable: AnyMatcher::servable(static_html_extensions),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a URL for a native path, or `None` if the path is outside the project.
    pub fn path_to_url(&self, path: &str) -> Option<String> {
        self.resolver.relative_path(path)?;
        Some(format!(
            "{}{}",
            self.base_url,
            utf8_percent_encode(path, PATH_ENCODE_SET)
        ))
    }

    /// Returns the native path for a URL under the base URL.
    ///
    /// The base URL must end at a segment boundary: a URL for instance `w10`
    /// never maps back through the base URL of instance `w1`.
    pub fn url_to_path(&self, url: &str) -> Option<String> {
        if self.base_url.is_empty() {
            return None;
        }
        let encoded = url.strip_prefix(&self.base_url)?;
        let at_boundary =
            self.base_url.ends_with('/') || encoded.is_empty() || encoded.starts_with('/');
        if !at_boundary {
            return None;
        }
        percent_decode_str(encoded)
            .decode_utf8()
            .ok()
            .map(|path| path.into_owned())
    }

    /// Whether the bridge serves this path: project directories and
    /// allowlisted static HTML files only.
    pub fn can_serve(&self, path: &str) -> bool {
        if self.resolver.relative_path(path).is_none() {
            return false;
        }
        self.servable.matches(path)
    }

    /// Key under which overlays for `path` are stored.
    ///
    /// Native paths inside the project collapse to their relative form; any
    /// other path (already relative, or virtual) is used verbatim.
    pub fn document_key(&self, path: &str) -> String {
        self.resolver
            .relative_path(path)
            .unwrap_or_else(|| path.to_string())
    }
}
