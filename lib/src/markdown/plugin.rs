use pulldown_cmark::{Event, Tag, TagEnd};

/// A pass over the Markdown event stream, run between parsing and HTML
/// output.
pub trait Plugin {
    #[inline(always)]
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        events
    }
}

/// Tracks whether the event stream is inside a link (Markdown or raw `<a>`),
/// an image, or a code block: places where text passes through as written.
#[derive(Debug, Default)]
pub(crate) struct Verbatim {
    links: usize,
    code_block: bool,
}

/// `Some(true)` for an opening `<a ...>` tag, `Some(false)` for `</a>`.
fn html_anchor(html: &str) -> Option<bool> {
    let (open, rest) = match html.trim_start().as_bytes() {
        [b'<', b'/', b'a' | b'A', rest @ ..] => (false, rest),
        [b'<', b'a' | b'A', rest @ ..] => (true, rest),
        _ => return None,
    };

    match rest.first() {
        Some(c) if c.is_ascii_alphanumeric() => None,
        _ => Some(open),
    }
}

impl Verbatim {
    pub fn track(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => self.links += 1,
            Event::End(TagEnd::Link | TagEnd::Image) => self.links = self.links.saturating_sub(1),
            Event::InlineHtml(html) => match html_anchor(html) {
                Some(true) => self.links += 1,
                Some(false) => self.links = self.links.saturating_sub(1),
                None => {}
            },
            Event::Start(Tag::CodeBlock(..)) => self.code_block = true,
            Event::End(TagEnd::CodeBlock) => self.code_block = false,
            _ => {}
        }
    }

    pub fn active(&self) -> bool {
        self.links > 0 || self.code_block
    }
}
