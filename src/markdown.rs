//! News Body Markdown
//!
//! Renders news descriptions with pulldown-cmark:
//! - Raw HTML in the source is shown as text, never injected
//! - Links open in a new tab
//! - Images are constrained to the card width

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Parse a news body into HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Plain-text preview of at most `max_chars` characters
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let plain: String = Parser::new_ext(text, get_options())
        .filter_map(|event| match event {
            Event::Text(t) | Event::Code(t) => Some(t.to_string()),
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph) => {
                Some(" ".to_string())
            }
            _ => None,
        })
        .collect();
    let plain = plain.split_whitespace().collect::<Vec<_>>().join(" ");

    if plain.chars().count() <= max_chars {
        return plain;
    }
    let cut: String = plain.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

// State for the event transformer
enum State {
    Normal,
    /// Inside an image; alt text events are dropped
    InImage { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

                Event::Start(Tag::Link { dest_url, title, .. }) => {
                    let html = format!(
                        r#"<a href="{}" title="{}" target="_blank" rel="noopener noreferrer">"#,
                        escape_html(&dest_url),
                        escape_html(&title)
                    );
                    events.push(Event::Html(CowStr::from(html)));
                }
                Event::End(TagEnd::Link) => events.push(Event::Html(CowStr::from("</a>"))),

                Event::Start(Tag::Image { dest_url, .. }) => {
                    let html = format!(
                        r#"<img class="news-image" src="{}" style="max-width: 100%; display: block;" />"#,
                        escape_html(&dest_url)
                    );
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::InImage { depth: 0 };
                }

                other => events.push(other),
            },

            State::InImage { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) => {
                    if *depth == 0 {
                        state = State::Normal;
                    } else {
                        *depth -= 1;
                    }
                }
                _ => {}
            },
        }
    }

    events
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_formatting() {
        let html = parse_markdown("**Asamblea** el *sábado*");
        assert!(html.contains("<strong>Asamblea</strong>"));
        assert!(html.contains("<em>sábado</em>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("hola <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let html = parse_markdown("[inscripción](https://club.example/form)");
        assert!(html.contains(r#"href="https://club.example/form""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains("inscripción</a>"));
    }

    #[test]
    fn test_image_drops_alt_text() {
        let html = parse_markdown("![foto del cerro](cerro.jpg)");
        assert!(html.contains(r#"src="cerro.jpg""#));
        assert!(!html.contains("foto del cerro"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("**Salida** al\ncerro", 50), "Salida al cerro");
        assert_eq!(excerpt("Reunión de comisión directiva", 7), "Reunión…");
    }
}
