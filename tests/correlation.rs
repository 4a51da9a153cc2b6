//! End-to-end request correlation over the shared channel.

use live_preview_bridge::channel::protocol::{ChannelMessage, RequestId};
use live_preview_bridge::overlay::ResponseData;
use live_preview_bridge::server::{ActiveServers, NOT_FOUND_BODY};
use live_preview_bridge::{BroadcastChannel, LiveServer};

mod common;
use common::EditorBuffer;

#[tokio::test]
async fn test_virtual_content_served() {
    let mut h = common::start("w1");
    h.server
        .add_virtual_content_at_path("/project/index.html", "<p>edited</p>".into());

    h.request("/project/index.html", 7, "w1");

    let response = h.next_response().await;
    assert_eq!(response.request_id, RequestId::from(7_u64));
    assert_eq!(response.path, "/project/index.html");
    assert_eq!(response.contents, "<p>edited</p>");
    assert!(response.headers.is_none());
}

#[tokio::test]
async fn test_markdown_rendered_as_page() {
    let mut h = common::start("w1");
    h.documents.set_text("/project/notes.md", "# Title");

    h.request("/project/notes.md", 8, "w1");

    let response = h.next_response().await;
    assert_eq!(response.request_id, RequestId::from(8_u64));
    assert!(response.contents.contains("<h1>Title</h1>"));
    assert!(response.contents.contains("markdown-body"));
    let headers = response.headers.expect("markdown reply carries headers");
    assert_eq!(headers.get("Content-Type").map(String::as_str), Some("text/html"));
}

#[tokio::test]
async fn test_markdown_ignores_overlays() {
    let mut h = common::start("w1");
    h.documents.set_text("/project/README.MD", "plain *text*");
    h.server
        .add_virtual_content_at_path("/project/README.MD", "overlay".into());

    h.request("/project/README.MD", 1, "w1");

    let response = h.next_response().await;
    assert!(response.contents.contains("<em>text</em>"));
    assert!(!response.contents.contains("overlay"));
}

#[tokio::test]
async fn test_virtual_takes_precedence_over_live() {
    let mut h = common::start("w1");
    h.server.add(EditorBuffer::new("/project/a.html", "live"));
    h.server
        .add_virtual_content_at_path("/project/a.html", "virtual".into());

    h.request("/project/a.html", 1, "w1");
    assert_eq!(h.next_response().await.contents, "virtual");

    h.server.remove_virtual_content_at_path("/project/a.html");
    h.request("/project/a.html", 2, "w1");
    let response = h.next_response().await;
    assert_eq!(response.request_id, RequestId::from(2_u64));
    assert_eq!(response.contents, "live");
}

#[tokio::test]
async fn test_live_headers_forwarded() {
    let mut h = common::start("w1");
    h.server.add(std::sync::Arc::new(EditorBuffer {
        path: "/project/page.html".into(),
        data: ResponseData::new("<p>live</p>").with_header("X-Live", "1"),
    }));

    h.request("/project/page.html", 3, "w1");

    let response = h.next_response().await;
    assert_eq!(response.contents, "<p>live</p>");
    assert_eq!(
        response.headers.unwrap().get("X-Live").map(String::as_str),
        Some("1")
    );
}

#[tokio::test]
async fn test_falls_back_to_document_text() {
    let mut h = common::start("w1");
    h.documents.set_text("/project/saved.html", "<p>on disk</p>");

    h.request("/project/saved.html", 4, "w1");
    assert_eq!(h.next_response().await.contents, "<p>on disk</p>");

    h.request("/project/gone.html", 5, "w1");
    let response = h.next_response().await;
    assert_eq!(response.request_id, RequestId::from(5_u64));
    assert_eq!(response.contents, NOT_FOUND_BODY);
}

#[tokio::test]
async fn test_requests_for_other_instances_ignored() {
    let mut h = common::start("w1");
    h.server
        .add_virtual_content_at_path("/project/index.html", "mine".into());

    h.request("/project/index.html", 1, "w2");
    assert!(h.no_response().await);
}

#[tokio::test]
async fn test_two_instances_share_channel() {
    let channel = BroadcastChannel::new();
    let active = ActiveServers::new();
    let mut a = common::start_on("w1", channel.clone(), active.clone());
    let b = common::start_on("w2", channel.clone(), active.clone());
    a.server
        .add_virtual_content_at_path("/project/index.html", "from w1".into());
    b.server
        .add_virtual_content_at_path("/project/index.html", "from w2".into());

    a.request("/project/index.html", 11, "w2");

    let response = a.next_response().await;
    assert_eq!(response.request_id, RequestId::from(11_u64));
    assert_eq!(response.contents, "from w2");
    // Exactly one reply per request.
    assert!(a.no_response().await);
}

#[tokio::test]
async fn test_stopped_server_leaves_request_unanswered() {
    let mut h = common::start("w1");
    h.server
        .add_virtual_content_at_path("/project/index.html", "x".into());
    h.server.stop();
    assert!(!h.server.is_active());

    h.request("/project/index.html", 1, "w1");
    assert!(h.no_response().await);
}

#[tokio::test]
async fn test_text_request_ids_echoed() {
    let mut h = common::start("w1");
    h.server
        .add_virtual_content_at_path("/project/index.html", "x".into());

    let line = r#"{"type":"getInstrumentedContent","path":"/project/index.html","requestID":"req-1","requesterInstanceID":"w1"}"#;
    h.channel.post(ChannelMessage::from_json(line).unwrap());

    let response = h.next_response().await;
    assert_eq!(response.request_id, RequestId::Text("req-1".into()));
    let wire: serde_json::Value =
        serde_json::from_str(&ChannelMessage::RequestResponse(response).to_json().unwrap())
            .unwrap();
    assert_eq!(wire["type"], "REQUEST_RESPONSE");
    assert_eq!(wire["requestID"], "req-1");
}

#[tokio::test]
async fn test_unreadable_markdown_left_unanswered() {
    let mut h = common::start("w1");

    h.request("/project/missing.md", 1, "w1");
    assert!(h.no_response().await);

    // The same miss on a plain page is answered with the placeholder.
    h.request("/project/missing.html", 2, "w1");
    let response = h.next_response().await;
    assert_eq!(response.request_id, RequestId::from(2_u64));
    assert_eq!(response.contents, NOT_FOUND_BODY);
}
