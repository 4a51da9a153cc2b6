//! Channel protocol messages.
//!
//! Messages are JSON objects discriminated by their `type` field:
//!
//! | direction              | type                     | fields                                        |
//! |------------------------|--------------------------|-----------------------------------------------|
//! | interceptor → server   | `getInstrumentedContent` | `path, requestID, requesterInstanceID`        |
//! | server → interceptor   | `REQUEST_RESPONSE`       | `requestID, path, contents, headers?`         |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Response headers, keyed by header name.
pub type Headers = BTreeMap<String, String>;

/// Errors raised while moving messages across a channel boundary.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("malformed channel message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("channel closed")]
    Closed,
}

/// Identifier an interceptor attaches to a request; echoed verbatim in the reply.
///
/// Interceptors use counters, timestamps or opaque strings. Any JSON number
/// or string is accepted and re-serialized exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(serde_json::Number),
    Text(String),
}

impl RequestId {
    /// Generate a new unique request ID (UUID v4).
    pub fn generate() -> Self {
        Self::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Identity of one running editor instance on the shared channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new unique instance ID (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request for instrumented content, addressed to one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub path: String,
    #[serde(rename = "requestID")]
    pub request_id: RequestId,
    #[serde(rename = "requesterInstanceID")]
    pub requester_instance_id: InstanceId,
}

/// The single reply to a [`ContentRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentResponse {
    #[serde(rename = "requestID")]
    pub request_id: RequestId,
    pub path: String,
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
}

/// Every message carried by the shared channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChannelMessage {
    #[serde(rename = "getInstrumentedContent")]
    GetInstrumentedContent(ContentRequest),

    #[serde(rename = "REQUEST_RESPONSE")]
    RequestResponse(ContentResponse),
}

impl ChannelMessage {
    pub fn from_json(line: &str) -> Result<Self, ChannelError> {
        Ok(serde_json::from_str(line)?)
    }

    pub fn to_json(&self) -> Result<String, ChannelError> {
        Ok(serde_json::to_string(self)?)
    }
}
