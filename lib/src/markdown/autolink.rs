use std::collections::VecDeque;

use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};

use super::plugin::{Plugin, Verbatim};

const SCHEMES: &[&str] = &["https://", "http://"];

/// Turns bare `http://` and `https://` URLs in running text into links.
///
/// Text already inside a link (Markdown or a raw `<a>` tag), an image, or a
/// code block is left alone, as is trailing punctuation that most likely ends
/// the sentence rather than the URL.
#[derive(Default)]
pub struct AutoLink;

struct LinkIterator<'a, I: Iterator<Item = Event<'a>>> {
    stack: VecDeque<Event<'a>>,
    verbatim: Verbatim,
    inner: I,
}

/// Finds the first bare URL in `text`, returning its byte range.
fn find_url(text: &str) -> Option<(usize, usize)> {
    let start = SCHEMES.iter().filter_map(|scheme| text.find(scheme)).min()?;
    let rest = &text[start..];
    let len = rest.find(|c: char| c.is_whitespace() || matches!(c, '<' | '>' | '"'))
        .unwrap_or(rest.len());

    let url = rest[..len].trim_end_matches(|c: char| matches!(c, '.' | ',' | ':' | ';' | '!' | '?' | ')' | '\'' | '’' | '”'));
    match SCHEMES.iter().any(|scheme| url.strip_prefix(scheme) == Some("")) {
        true => None,
        false => Some((start, start + url.len())),
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> LinkIterator<'a, I> {
    /// Queues `text` with every URL in it wrapped in a link.
    fn linkify(&mut self, text: String) {
        let mut rest = text.as_str();
        while let Some((start, end)) = find_url(rest) {
            if start > 0 {
                self.stack.push_back(Event::Text(rest[..start].to_string().into()));
            }

            let url: CowStr<'a> = rest[start..end].to_string().into();
            self.stack.push_back(Event::Start(Tag::Link {
                link_type: LinkType::Autolink,
                dest_url: url.clone(),
                title: "".into(),
                id: "".into(),
            }));

            self.stack.push_back(Event::Text(url));
            self.stack.push_back(Event::End(TagEnd::Link));
            rest = &rest[end..];
        }

        if !rest.is_empty() {
            self.stack.push_back(Event::Text(rest.to_string().into()));
        }
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for LinkIterator<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = match self.stack.pop_front() {
            Some(event) => event,
            None => match self.inner.next()? {
                Event::Text(text) if !self.verbatim.active() => {
                    // The parser may hand us one run of text in several pieces.
                    let mut text = text.into_string();
                    let mut pending = None;
                    for event in self.inner.by_ref() {
                        match event {
                            Event::Text(more) => text.push_str(&more),
                            event => {
                                pending = Some(event);
                                break;
                            }
                        }
                    }

                    match find_url(&text) {
                        Some(_) => self.linkify(text),
                        None => self.stack.push_back(Event::Text(text.into())),
                    }

                    self.stack.extend(pending);
                    self.stack.pop_front()?
                }
                event => event,
            }
        };

        self.verbatim.track(&event);
        Some(event)
    }
}

impl Plugin for AutoLink {
    fn remap<'a, I>(&'a mut self, events: I) -> Box<dyn Iterator<Item = Event<'a>> + 'a>
        where I: Iterator<Item = Event<'a>> + 'a
    {
        Box::new(LinkIterator {
            stack: VecDeque::with_capacity(8),
            verbatim: Verbatim::default(),
            inner: events,
        })
    }
}
