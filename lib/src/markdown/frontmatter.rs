//! Splitting a document's YAML metadata block from its body.
//!
//! A document may begin with a metadata block between two `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! published_at: 2020-01-01T00:00:00Z
//! ---
//! Body *text*
//! ```
//!
//! Only the first two delimiter lines are significant. Any later `---` line
//! (a Markdown rule, say) is part of the body.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::{ErrorDetail, Kind, Result};
use crate::format::{Format, Yaml};

pub const DELIMITER: &str = "---";

/// Text other than whitespace appeared before the first delimiter line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BadFrontMatter;

impl fmt::Display for BadFrontMatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bad frontmatter: unable to split YAML front matter")
    }
}

impl std::error::Error for BadFrontMatter { }

impl ErrorDetail for BadFrontMatter {
    fn kind(&self) -> Option<Kind> {
        Some(Kind::FrontMatter)
    }
}

/// Returns `true` if `line`, without its line terminator, is a delimiter.
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Splits `input` into its `(front_matter, body)`, both trimmed.
///
///   * no delimiter line: the front matter is empty and the body is `input`
///   * one delimiter line: the front matter is empty and the body is
///     everything after it
///   * two delimiter lines: the front matter is everything between them and
///     the body everything after the second
///
/// In the last two cases, anything but whitespace before the first delimiter
/// is a [`BadFrontMatter`] error.
pub fn split(input: &str) -> Result<(&str, &str), BadFrontMatter> {
    // Byte ranges of (at most) the first two delimiter lines.
    let mut delimiters: Vec<(usize, usize)> = Vec::with_capacity(2);
    let mut offset = 0;
    for line in input.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if is_delimiter(line) {
            delimiters.push((start, offset));
            if delimiters.len() == 2 {
                break;
            }
        }
    }

    match delimiters[..] {
        [] => Ok(("", input.trim())),
        [(start, _), ..] if !input[..start].trim().is_empty() => Err(BadFrontMatter),
        [(_, end)] => Ok(("", input[end..].trim())),
        [(_, end), (start, rest)] => Ok((input[end..start].trim(), input[rest..].trim())),
        _ => unreachable!("at most two delimiters are collected"),
    }
}

/// A source document split into its metadata block and Markdown body.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    pub front_matter: &'a str,
    pub body: &'a str,
}

impl<'a> Document<'a> {
    pub fn parse(input: &'a str) -> Result<Self, BadFrontMatter> {
        let (front_matter, body) = split(input)?;
        Ok(Document { front_matter, body })
    }

    /// Decodes the metadata block as YAML. A document without one decodes to
    /// `T::default()`.
    pub fn decode<T: DeserializeOwned + Default>(&self) -> Result<T> {
        Yaml::decode(self.front_matter)
    }
}

#[cfg(test)]
mod frontmatter_tests {
    use super::*;

    #[test]
    fn no_delimiter_is_all_body() {
        assert_eq!(split("  just a body\n\n"), Ok(("", "just a body")));
        assert_eq!(split(""), Ok(("", "")));
        assert_eq!(split("a --- b\n----\n"), Ok(("", "a --- b\n----")));
    }

    #[test]
    fn one_delimiter_is_empty_front_matter() {
        assert_eq!(split("---\n  body here  \n"), Ok(("", "body here")));
        assert_eq!(split("\n  \n---\nbody"), Ok(("", "body")));
    }

    #[test]
    fn two_delimiters_split_front_matter_from_body() {
        let input = "---\ntitle: Hello\n---\n\nBody\n";
        assert_eq!(split(input), Ok(("title: Hello", "Body")));

        let input = "---\r\ntitle: Hello\r\n---\r\nBody";
        assert_eq!(split(input), Ok(("title: Hello", "Body")));
    }

    #[test]
    fn later_delimiters_belong_to_the_body() {
        let input = "---\na: 1\n---\nabove\n---\nbelow";
        assert_eq!(split(input), Ok(("a: 1", "above\n---\nbelow")));
    }

    #[test]
    fn leading_text_is_rejected() {
        assert_eq!(split("oops\n---\nbody"), Err(BadFrontMatter));
        assert_eq!(split("oops\n---\na: 1\n---\nbody"), Err(BadFrontMatter));
    }

    #[test]
    fn document_decodes_empty_front_matter_to_default() {
        #[derive(Debug, Default, serde::Deserialize)]
        struct Meta { title: Option<String> }

        let document = Document::parse("no metadata here").unwrap();
        let meta: Meta = document.decode().unwrap();
        assert!(meta.title.is_none());
        assert_eq!(document.body, "no metadata here");
    }
}
