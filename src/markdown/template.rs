//! Page template for rendered Markdown.

const PAGE_TEMPLATE: &str = include_str!("page.html");

/// Absolute URLs of the assets a rendered page links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResources {
    pub base_css: String,
    pub highlight_css: String,
    pub highlight_js: String,
    pub gfm_css: String,
}

impl PageResources {
    /// Standard asset layout under `base_url` (which ends with `/`).
    pub fn from_base(base_url: &str) -> Self {
        Self {
            base_css: format!("{}thirdparty/bootstrap/bootstrap.min.css", base_url),
            highlight_css: format!("{}thirdparty/highlight.js/styles/github.min.css", base_url),
            highlight_js: format!("{}thirdparty/highlight.js/highlight.min.js", base_url),
            gfm_css: format!("{}thirdparty/gfm.min.css", base_url),
        }
    }
}

/// The fixed page wrapped around every rendered document.
#[derive(Debug, Clone)]
pub struct MarkdownPage {
    resources: PageResources,
}

impl MarkdownPage {
    pub fn new(resources: PageResources) -> Self {
        Self { resources }
    }

    pub fn resources(&self) -> &PageResources {
        &self.resources
    }

    /// Embed an HTML fragment in the page.
    pub fn render(&self, content_html: &str) -> String {
        // Content goes in last so placeholders inside it are left alone.
        PAGE_TEMPLATE
            .replace("{{base_css}}", &self.resources.base_css)
            .replace("{{highlight_css}}", &self.resources.highlight_css)
            .replace("{{highlight_js}}", &self.resources.highlight_js)
            .replace("{{gfm_css}}", &self.resources.gfm_css)
            .replace("{{content}}", content_html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_from_base() {
        let resources = PageResources::from_base("http://localhost:8000/");
        assert_eq!(
            resources.gfm_css,
            "http://localhost:8000/thirdparty/gfm.min.css"
        );
        assert!(resources.highlight_js.ends_with("highlight.min.js"));
    }

    #[test]
    fn test_render_substitutes_everything() {
        let page = MarkdownPage::new(PageResources::from_base("http://h/"));
        let html = page.render("<h1>Title</h1>");

        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("href=\"http://h/thirdparty/bootstrap/bootstrap.min.css\""));
        assert!(html.contains("href=\"http://h/thirdparty/highlight.js/styles/github.min.css\""));
        assert!(html.contains("src=\"http://h/thirdparty/highlight.js/highlight.min.js\""));
        assert!(html.contains("href=\"http://h/thirdparty/gfm.min.css\""));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_placeholders_in_content_untouched() {
        let page = MarkdownPage::new(PageResources::from_base("http://h/"));
        let html = page.render("<code>{{gfm_css}}</code>");
        assert!(html.contains("<code>{{gfm_css}}</code>"));
    }
}
