//! Markdown to HTML conversion.

use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Fixed rendering options: GitHub-flavoured tables, strikethrough and task
/// lists; soft line breaks stay newlines; no smart punctuation; raw HTML is
/// passed through unsanitized since the content is the user's own project.
fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render Markdown source to an HTML fragment.
///
/// Void elements are written in HTML form (`<br>`, `<hr>`, `<img ...>`),
/// never self-closed.
pub fn render_markdown(text: &str) -> String {
    let mut events = Vec::new();
    // Open image: nesting depth and the events of its alt text.
    let mut image: Option<(usize, Vec<Event<'_>>)> = None;

    for event in Parser::new_ext(text, options()) {
        if let Some((depth, buffered)) = image.as_mut() {
            match &event {
                Event::Start(Tag::Image(..)) => *depth += 1,
                Event::End(Tag::Image(..)) => *depth -= 1,
                _ => {}
            }
            buffered.push(event.clone());
            if *depth > 0 {
                continue;
            }
        }
        if let Some((_, buffered)) = image.take() {
            events.push(Event::Html(void_element(buffered).into()));
            continue;
        }

        match event {
            Event::Start(Tag::Image(..)) => image = Some((1, vec![event])),
            Event::HardBreak => events.push(Event::Html("<br>\n".into())),
            Event::Rule => events.push(Event::Html("<hr>\n".into())),
            Event::TaskListMarker(checked) => {
                let checkbox = if checked {
                    "<input disabled=\"\" type=\"checkbox\" checked=\"\">\n"
                } else {
                    "<input disabled=\"\" type=\"checkbox\">\n"
                };
                events.push(Event::Html(checkbox.into()));
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Render a buffered element and drop the self-closing slash.
fn void_element(events: Vec<Event<'_>>) -> String {
    let mut tag = String::new();
    html::push_html(&mut tag, events.into_iter());
    match tag.strip_suffix(" />") {
        Some(open) => format!("{}>", open),
        None => tag,
    }
}
