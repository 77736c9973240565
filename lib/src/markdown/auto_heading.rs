use std::collections::VecDeque;

use pulldown_cmark::{Event, Tag, TagEnd};
use rustc_hash::FxHashSet;

use super::Plugin;

/// Gives every heading without an explicit `{#id}` an id derived from its
/// text, so sections can be linked to. An id already taken, by an earlier
/// heading or an explicit `{#id}`, gets the first free `-N` suffix.
#[derive(Default)]
pub struct AutoHeading {
    seen: FxHashSet<String>,
}

struct HeadingIterator<'a, I: Iterator<Item = Event<'a>>> {
    stack: VecDeque<Event<'a>>,
    seen: &'a mut FxHashSet<String>,
    inner: I,
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for HeadingIterator<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.stack.pop_front() {
            return Some(event);
        }

        let event = self.inner.next()?;
        match event {
            Event::Start(Tag::Heading { level, id: None, classes, attrs }) => {
                let mut text = String::new();
                loop {
                    let event = self.inner.next()?;
                    if let Event::Text(ref s) | Event::Code(ref s) = event {
                        text.push_str(s);
                    } else if let Event::End(TagEnd::Heading(..)) = event {
                        break;
                    }

                    self.stack.push_back(event);
                }

                let base = crate::util::slugify(&text);
                let (mut id, mut n) = (base.clone(), 0);
                while self.seen.contains(&id) {
                    n += 1;
                    id = format!("{base}-{n}");
                }

                self.seen.insert(id.clone());
                let tag = Tag::Heading { level, id: Some(id.into()), classes, attrs };
                self.stack.push_back(Event::End(TagEnd::Heading(level)));
                Some(Event::Start(tag))
            },
            Event::Start(Tag::Heading { id: Some(ref id), .. }) => {
                self.seen.insert(id.to_string());
                Some(event)
            }
            event => Some(event)
        }
    }
}

impl Plugin for AutoHeading {
    fn remap<'a, I>(&'a mut self, events: I) -> Box<dyn Iterator<Item = Event<'a>> + 'a>
        where I: Iterator<Item = Event<'a>> + 'a
    {
        self.seen.clear();
        Box::new(HeadingIterator {
            seen: &mut self.seen,
            inner: events,
            stack: VecDeque::with_capacity(4),
        })
    }
}
