use pulldown_cmark::{html, Options, Parser};

use crate::markdown::{AutoHeading, AutoLink, Plugin, SmartFractions};

/// Renders Markdown bodies to HTML.
///
/// The default options enable tables, strikethrough, `{#id}` heading
/// attributes and smart punctuation (curly quotes, en and em dashes). On top
/// of the parser, [`AutoHeading`] assigns ids to headings, [`AutoLink`] links
/// bare URLs and [`SmartFractions`] typesets `1/2`, `1/4` and `3/4`. Output is XHTML-compatible: void elements are
/// self-closed (`<hr />`, `<br />`).
///
/// Emphasis never triggers inside a word with `_`: `snake_case_name` stays as
/// written.
#[derive(Debug, Clone)]
pub struct Markdown {
    options: Options,
}

impl Default for Markdown {
    fn default() -> Self {
        Markdown::new()
    }
}

impl Markdown {
    pub fn new() -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;

        Markdown { options }
    }

    pub fn render(&self, input: &str) -> String {
        let mut headings = AutoHeading::default();
        let mut links = AutoLink;
        let mut fractions = SmartFractions;

        let parser = Parser::new_ext(input, self.options);
        let events = headings.remap(parser);
        let events = links.remap(events);
        let events = fractions.remap(events);

        let mut output = String::with_capacity(input.len() + input.len() / 2);
        html::push_html(&mut output, events);
        output
    }
}
