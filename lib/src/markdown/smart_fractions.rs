use pulldown_cmark::Event;

use super::plugin::{Plugin, Verbatim};

const FRACTIONS: &[(&str, &str)] = &[("1/2", "½"), ("1/4", "¼"), ("3/4", "¾")];

/// Typesets the standalone fractions `1/2`, `1/4` and `3/4` as `½`, `¼` and
/// `¾`. Dates like `1/2/2020` and numbers like `11/2` are left alone, as is
/// text in links, images, and code.
#[derive(Default)]
pub struct SmartFractions;

struct FractionIterator<I> {
    verbatim: Verbatim,
    inner: I,
}

fn is_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| !c.is_alphanumeric() && c != '/')
}

/// `text` with its fractions replaced, or `None` if there are none.
fn replace_fractions(text: &str) -> Option<String> {
    if !text.contains('/') {
        return None;
    }

    let mut output = String::with_capacity(text.len());
    let (mut rest, mut prev, mut changed) = (text, None, false);
    while let Some(c) = rest.chars().next() {
        let fraction = FRACTIONS.iter().find(|(from, _)| {
            rest.starts_with(*from)
                && is_boundary(prev)
                && is_boundary(rest[from.len()..].chars().next())
        });

        match fraction {
            Some((from, to)) => {
                output.push_str(to);
                prev = from.chars().last();
                rest = &rest[from.len()..];
                changed = true;
            }
            None => {
                output.push(c);
                prev = Some(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    changed.then_some(output)
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for FractionIterator<I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = match self.inner.next()? {
            Event::Text(text) if !self.verbatim.active() => match replace_fractions(&text) {
                Some(replaced) => Event::Text(replaced.into()),
                None => Event::Text(text),
            },
            event => event,
        };

        self.verbatim.track(&event);
        Some(event)
    }
}

impl Plugin for SmartFractions {
    fn remap<'a, I>(&'a mut self, events: I) -> Box<dyn Iterator<Item = Event<'a>> + 'a>
        where I: Iterator<Item = Event<'a>> + 'a
    {
        Box::new(FractionIterator { verbatim: Verbatim::default(), inner: events })
    }
}

#[cfg(test)]
mod smart_fractions_tests {
    use super::replace_fractions;

    #[test]
    fn replaces_standalone_fractions() {
        assert_eq!(replace_fractions("1/2 cup, 3/4 done").as_deref(), Some("½ cup, ¾ done"));
        assert_eq!(replace_fractions("(1/4)").as_deref(), Some("(¼)"));
    }

    #[test]
    fn leaves_other_numbers_alone() {
        assert_eq!(replace_fractions("on 1/2/2020"), None);
        assert_eq!(replace_fractions("11/2 or 1/23 or 1/2x"), None);
        assert_eq!(replace_fractions("and/or"), None);
    }
}
