//! Shared utilities for integration testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use live_preview_bridge::channel::protocol::{
    ChannelMessage, ContentRequest, ContentResponse, InstanceId, RequestId,
};
use live_preview_bridge::config::ServerConfig;
use live_preview_bridge::documents::MemoryDocumentSource;
use live_preview_bridge::instrumentation::{InstrumentationRegistry, InstrumentedUrls, SyncError};
use live_preview_bridge::markdown::{MarkdownPage, PageResources};
use live_preview_bridge::overlay::{LiveDocument, ResponseData};
use live_preview_bridge::server::ActiveServers;
use live_preview_bridge::{BroadcastChannel, LiveServer, RequestCorrelator, Shutdown, StaticServer};

pub const ROOT: &str = "/project";

/// Registry that records every update it receives.
#[derive(Default)]
pub struct RecordingRegistry {
    pub updates: Mutex<Vec<InstrumentedUrls>>,
}

#[async_trait]
impl InstrumentationRegistry for RecordingRegistry {
    async fn set_instrumented_urls(&self, update: InstrumentedUrls) -> Result<String, SyncError> {
        self.updates.lock().unwrap().push(update);
        Ok("ok".into())
    }
}

impl RecordingRegistry {
    /// Wait until `count` updates have arrived and return the latest one.
    #[allow(dead_code)]
    pub async fn wait_for(&self, count: usize) -> InstrumentedUrls {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                {
                    let updates = self.updates.lock().unwrap();
                    if updates.len() >= count {
                        return updates[updates.len() - 1].clone();
                    }
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("registry update not delivered")
    }
}

/// Open editor buffer with optional response headers.
#[derive(Debug)]
pub struct EditorBuffer {
    pub path: String,
    pub data: ResponseData,
}

impl EditorBuffer {
    #[allow(dead_code)]
    pub fn new(path: &str, body: &str) -> Arc<Self> {
        Arc::new(Self {
            path: path.into(),
            data: ResponseData::new(body),
        })
    }
}

impl LiveDocument for EditorBuffer {
    fn path(&self) -> &str {
        &self.path
    }

    fn response_data(&self) -> ResponseData {
        self.data.clone()
    }
}

/// One editor instance: server, correlator and a channel observer.
pub struct Harness {
    pub instance_id: InstanceId,
    pub channel: BroadcastChannel,
    pub server: StaticServer,
    pub documents: Arc<MemoryDocumentSource>,
    pub registry: Arc<RecordingRegistry>,
    pub shutdown: Shutdown,
    pub rx: broadcast::Receiver<ChannelMessage>,
}

pub fn server_config() -> ServerConfig {
    ServerConfig {
        project_root: ROOT.into(),
        ..Default::default()
    }
}

/// Start a harness on a fresh channel.
#[allow(dead_code)]
pub fn start(instance: &str) -> Harness {
    start_on(instance, BroadcastChannel::new(), ActiveServers::new())
}

/// Start a harness sharing `channel` and `active` with other instances.
pub fn start_on(instance: &str, channel: BroadcastChannel, active: ActiveServers) -> Harness {
    let instance_id = InstanceId::new(instance);
    let documents = Arc::new(MemoryDocumentSource::new());
    let registry = Arc::new(RecordingRegistry::default());
    let shutdown = Shutdown::new();

    let server = StaticServer::new(
        &server_config(),
        instance_id.clone(),
        registry.clone(),
        active.clone(),
    );
    server.start().unwrap();

    let rx = channel.subscribe();
    RequestCorrelator::new(
        instance_id.clone(),
        channel.clone(),
        active,
        documents.clone(),
        MarkdownPage::new(PageResources::from_base("http://localhost:8000/")),
    )
    .spawn(shutdown.subscribe());

    Harness {
        instance_id,
        channel,
        server,
        documents,
        registry,
        shutdown,
        rx,
    }
}

impl Harness {
    /// Post a content request as the interceptor would.
    pub fn request(&self, path: &str, id: u64, instance: &str) {
        self.channel
            .post(ChannelMessage::GetInstrumentedContent(ContentRequest {
                path: path.into(),
                request_id: RequestId::from(id),
                requester_instance_id: InstanceId::new(instance),
            }));
    }

    /// Next reply seen on the channel.
    pub async fn next_response(&mut self) -> ContentResponse {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if let ChannelMessage::RequestResponse(response) = self.rx.recv().await.unwrap() {
                    return response;
                }
            }
        })
        .await
        .expect("no reply within timeout")
    }

    /// True when no reply arrives within a short window.
    #[allow(dead_code)]
    pub async fn no_response(&mut self) -> bool {
        let waited = tokio::time::timeout(Duration::from_millis(200), async {
            loop {
                if let ChannelMessage::RequestResponse(_) = self.rx.recv().await.unwrap() {
                    return;
                }
            }
        })
        .await;
        waited.is_err()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
