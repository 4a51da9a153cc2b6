//! Path ↔ URL translation through the public server API.

use live_preview_bridge::LiveServer;
use proptest::prelude::*;

mod common;

#[tokio::test]
async fn test_can_serve() {
    let h = common::start("w1");

    assert!(h.server.can_serve("/project/"));
    assert!(h.server.can_serve("/project/docs/"));
    assert!(h.server.can_serve("/project/index.html"));
    assert!(h.server.can_serve("/project/page.XHTML"));
    assert!(!h.server.can_serve("/project/readme.txt"));
    assert!(!h.server.can_serve("/project/notes.md"));
    assert!(!h.server.can_serve("/outside/index.html"));
}

#[tokio::test]
async fn test_urls_are_scoped_to_instance() {
    let h = common::start("w1");

    assert_eq!(h.server.base_url(), "http://localhost:8000/live_preview_w1");
    assert_eq!(
        h.server.path_to_url("/project/my page.html").as_deref(),
        Some("http://localhost:8000/live_preview_w1/project/my%20page.html")
    );
    assert_eq!(h.server.path_to_url("/elsewhere/a.html"), None);
    assert_eq!(h.server.url_to_path("http://other/project/a.html"), None);
}

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.%#?&()-]{1,12}"
}

proptest! {
    #[test]
    fn prop_path_url_roundtrip(segments in prop::collection::vec(segment(), 1..4)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        let h = common::start("w1");

        let path = format!("/project/{}", segments.join("/"));
        let url = h.server.path_to_url(&path).unwrap();
        prop_assert!(url.starts_with(h.server.base_url()));
        prop_assert_eq!(h.server.url_to_path(&url), Some(path));
    }
}
