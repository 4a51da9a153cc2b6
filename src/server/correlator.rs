//! Request correlation.
//!
//! # Responsibilities
//! - Consume the shared channel and dispatch by message type
//! - Drop requests addressed to other instances
//! - Resolve content: Markdown pipeline, else overlays, else document text
//! - Post exactly one reply per answered request, tagged with its request ID
//!
//! # Design Decisions
//! - Overlay hits are answered inline; anything that awaits the document
//!   source runs in its own task, so replies may leave out of order
//! - Markdown bypasses the overlay store and needs no active server
//! - A failed Markdown fetch leaves the request unanswered; the
//!   interceptor's own timeout reports it
//! - A failed plain fetch is answered with [`NOT_FOUND_BODY`]

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::channel::bus::BroadcastChannel;
use crate::channel::protocol::{ChannelMessage, ContentRequest, ContentResponse, InstanceId};
use crate::documents::DocumentSource;
use crate::lifecycle::ShutdownListener;
use crate::markdown::{MarkdownPage, MarkdownPipeline};
use crate::observability::metrics;
use crate::overlay::{Overlay, ResponseData};
use crate::routing::{ExtensionMatcher, Matcher};
use crate::server::active::ActiveServers;

/// Body sent when neither an overlay nor the document source has content.
pub const NOT_FOUND_BODY: &str = "instrumented document not found at static server";

/// Answers `getInstrumentedContent` requests for one editor instance.
#[derive(Clone)]
pub struct RequestCorrelator {
    instance_id: InstanceId,
    channel: BroadcastChannel,
    active: ActiveServers,
    documents: Arc<dyn DocumentSource>,
    markdown: MarkdownPipeline,
    markdown_files: ExtensionMatcher,
}

impl RequestCorrelator {
    pub fn new(
        instance_id: InstanceId,
        channel: BroadcastChannel,
        active: ActiveServers,
        documents: Arc<dyn DocumentSource>,
        page: MarkdownPage,
    ) -> Self {
        Self {
            markdown: MarkdownPipeline::new(documents.clone(), page),
            instance_id,
            channel,
            active,
            documents,
            markdown_files: ExtensionMatcher::markdown(),
        }
    }

    pub fn instance_id(&self) -> &InstanceId {
        &self.instance_id
    }

    /// Subscribe to the channel and consume it until shutdown.
    ///
    /// The subscription exists before this returns, so messages posted right
    /// after the call are not missed.
    pub fn spawn(self, shutdown: ShutdownListener) -> JoinHandle<()> {
        let rx = self.channel.subscribe();
        tokio::spawn(self.run(rx, shutdown))
    }

    async fn run(self, mut rx: broadcast::Receiver<ChannelMessage>, mut shutdown: ShutdownListener) {
        tracing::info!(instance_id = %self.instance_id, "Request correlator listening");

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Ok(message) => self.dispatch(message),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(instance_id = %self.instance_id, skipped, "Correlator lagged behind channel");
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = shutdown.wait() => break,
            }
        }

        tracing::info!(instance_id = %self.instance_id, "Request correlator stopped");
    }

    /// Handle one channel message. Must run inside a Tokio runtime.
    pub fn dispatch(&self, message: ChannelMessage) {
        match message {
            ChannelMessage::GetInstrumentedContent(request) => self.handle_request(request),
            // Replies from this or other instances.
            ChannelMessage::RequestResponse(_) => {}
        }
    }

    fn handle_request(&self, request: ContentRequest) {
        if request.requester_instance_id != self.instance_id {
            tracing::trace!(
                instance_id = %self.instance_id,
                requester = %request.requester_instance_id,
                request_id = %request.request_id,
                "Ignoring request for another instance"
            );
            return;
        }

        tracing::debug!(
            instance_id = %self.instance_id,
            request_id = %request.request_id,
            path = %request.path,
            "Content requested"
        );

        if self.markdown_files.matches(&request.path) {
            self.spawn_markdown(request);
            return;
        }

        let Some(server) = self.active.get(&self.instance_id) else {
            tracing::debug!(
                request_id = %request.request_id,
                path = %request.path,
                "No active static server, request left to the interceptor"
            );
            return;
        };

        match server.resolve(&request.path) {
            Some(overlay) => {
                metrics::record_request(overlay.source());
                let data = match overlay {
                    Overlay::Virtual(body) => ResponseData::new(body),
                    Overlay::Live(data) => data,
                };
                reply(&self.channel, request, data);
            }
            None => self.spawn_document_fallback(request),
        }
    }

    fn spawn_markdown(&self, request: ContentRequest) {
        let channel = self.channel.clone();
        let pipeline = self.markdown.clone();

        tokio::spawn(async move {
            match pipeline.render(&request.path).await {
                Ok(data) => {
                    metrics::record_request("markdown");
                    reply(&channel, request, data);
                }
                Err(e) => {
                    tracing::error!(
                        request_id = %request.request_id,
                        path = %request.path,
                        error = %e,
                        "Markdown rendering failed"
                    );
                }
            }
        });
    }

    fn spawn_document_fallback(&self, request: ContentRequest) {
        let channel = self.channel.clone();
        let documents = self.documents.clone();

        tokio::spawn(async move {
            let body = match documents.document_text(&request.path).await {
                Ok(text) => {
                    metrics::record_request("document");
                    text
                }
                Err(e) => {
                    tracing::warn!(
                        request_id = %request.request_id,
                        path = %request.path,
                        error = %e,
                        "No overlay or document text, replying with placeholder"
                    );
                    metrics::record_request("missing");
                    NOT_FOUND_BODY.to_string()
                }
            };
            reply(&channel, request, ResponseData::new(body));
        });
    }
}

fn reply(channel: &BroadcastChannel, request: ContentRequest, data: ResponseData) {
    tracing::debug!(
        request_id = %request.request_id,
        path = %request.path,
        bytes = data.body.len(),
        "Replying with content"
    );
    channel.post(ChannelMessage::RequestResponse(ContentResponse {
        request_id: request.request_id,
        path: request.path,
        contents: data.body,
        headers: data.headers,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::protocol::RequestId;
    use crate::documents::MemoryDocumentSource;
    use crate::lifecycle::Shutdown;
    use crate::markdown::PageResources;
    use std::time::Duration;

    fn correlator(channel: &BroadcastChannel, documents: MemoryDocumentSource) -> RequestCorrelator {
        RequestCorrelator::new(
            InstanceId::new("w1"),
            channel.clone(),
            ActiveServers::new(),
            Arc::new(documents),
            MarkdownPage::new(PageResources::from_base("http://h/")),
        )
    }

    fn request(path: &str, id: u64, instance: &str) -> ChannelMessage {
        ChannelMessage::GetInstrumentedContent(ContentRequest {
            path: path.into(),
            request_id: RequestId::from(id),
            requester_instance_id: InstanceId::new(instance),
        })
    }

    async fn next_response(rx: &mut broadcast::Receiver<ChannelMessage>) -> ContentResponse {
        loop {
            let message = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("no reply within timeout")
                .unwrap();
            if let ChannelMessage::RequestResponse(response) = message {
                return response;
            }
        }
    }

    #[tokio::test]
    async fn test_markdown_answered_without_active_server() {
        let channel = BroadcastChannel::new();
        let documents = MemoryDocumentSource::new();
        documents.set_text("/p/notes.md", "# Title");
        let shutdown = Shutdown::new();
        let mut rx = channel.subscribe();
        correlator(&channel, documents).spawn(shutdown.subscribe());

        channel.post(request("/p/notes.md", 1, "w1"));

        let response = next_response(&mut rx).await;
        assert_eq!(response.request_id, RequestId::from(1_u64));
        assert!(response.contents.contains("<h1>Title</h1>"));
        shutdown.trigger();
    }

    #[tokio::test]
    async fn test_no_active_server_no_reply() {
        let channel = BroadcastChannel::new();
        let shutdown = Shutdown::new();
        let mut rx = channel.subscribe();
        correlator(&channel, MemoryDocumentSource::new()).spawn(shutdown.subscribe());

        channel.post(request("/p/index.html", 2, "w1"));
        // Only the request itself comes back.
        assert!(matches!(
            rx.recv().await.unwrap(),
            ChannelMessage::GetInstrumentedContent(_)
        ));
        assert!(tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .is_err());
        shutdown.trigger();
    }

    #[tokio::test]
    async fn test_shutdown_stops_correlator() {
        let channel = BroadcastChannel::new();
        let shutdown = Shutdown::new();
        let handle = correlator(&channel, MemoryDocumentSource::new()).spawn(shutdown.subscribe());
        assert_eq!(channel.receiver_count(), 1);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(channel.receiver_count(), 0);
    }
}
