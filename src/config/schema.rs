//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the live preview bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Server identity and project anchoring.
    pub server: ServerConfig,

    /// Shared broadcast channel settings.
    pub channel: ChannelConfig,

    /// Markdown page resources.
    pub markdown: MarkdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Static server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Origin of the intercepting virtual server (e.g., "http://localhost:8000/").
    pub server_url: String,

    /// Native path of the project root being previewed.
    pub project_root: String,

    /// Identifier of this editor instance. Generated when absent.
    pub instance_id: Option<String>,

    /// Extensions that are served as static HTML pages.
    pub static_html_extensions: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000/".to_string(),
            project_root: "/".to_string(),
            instance_id: None,
            static_html_extensions: vec![
                "htm".to_string(),
                "html".to_string(),
                "xhtml".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// Project root with exactly one trailing separator.
    pub fn normalized_root(&self) -> String {
        let trimmed = self.project_root.trim_end_matches('/');
        format!("{}/", trimmed)
    }
}

/// Broadcast channel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Number of messages buffered per subscriber before it lags.
    pub capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}

/// Markdown render pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Prefix under which the page stylesheets and scripts are served.
    pub resource_base_url: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            resource_base_url: "http://localhost:8000/".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
