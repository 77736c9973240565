//! Typed records decoded from Markdown sources: articles and fragments.
//!
//! Each record has an explicit front matter schema (`*Meta`) in which every
//! field is optional. Loading a record decodes the schema, validates the
//! required fields, and renders the Markdown body:
//!
//! ```text
//! file ──read──▶ Document ──decode──▶ *Meta ──validate──▶ record + HTML body
//! ```

mod article;
mod fragment;
mod timestamp;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{Chainable, ErrorDetail, Kind, Result};
use crate::markdown::{Document, Markdown};

pub use article::{Article, ArticleMeta};
pub use fragment::{Fragment, FragmentMeta};

/// A decoded record lacks a value it cannot be published without.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    /// The kind of record, e.g. `article`.
    pub record: &'static str,
    /// The front matter key that is missing or empty.
    pub field: &'static str,
    /// The source file the record was decoded from.
    pub path: PathBuf,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required field `{}` for {}", self.field, self.record)
    }
}

impl ErrorDetail for MissingField {
    fn context(&self) -> Vec<(Option<String>, String)> {
        vec![(Some("path".into()), self.path.display().to_string())]
    }

    fn kind(&self) -> Option<Kind> {
        Some(Kind::MissingField)
    }
}

/// Returns `value` if it is present and not empty.
fn required<'v>(value: &'v Option<String>) -> Option<&'v str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A record that is decoded from a Markdown document with front matter.
pub trait Record: Sized {
    /// The name of the record kind, used in diagnostics.
    const KIND: &'static str;

    /// The record's front matter schema.
    type Meta: DeserializeOwned + Default;

    /// Validates `meta`, decoded from `path`, into a record with no content.
    fn from_meta(meta: Self::Meta, path: &Path) -> Result<Self, MissingField>;

    /// Sets the rendered HTML body.
    fn with_content(self, content: String) -> Self;

    /// Builds a record from the source `input` read from `path`. The body is
    /// only rendered once the metadata is known to be valid.
    fn parse(input: &str, path: &Path, markdown: &Markdown) -> Result<Self> {
        let document = Document::parse(input)?;
        let meta: Self::Meta = document.decode()?;
        let record = Self::from_meta(meta, path)?;
        Ok(record.with_content(markdown.render(document.body)))
    }

    /// Reads and builds the record at `path`.
    fn load<P: AsRef<Path>>(path: P, markdown: &Markdown) -> Result<Self> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).chain_with(|| error! {
            format!("failed to read {}", Self::KIND),
            "path" => path.display(),
        })?;

        Self::parse(&input, path, markdown).chain_with(|| error! {
            format!("failed to compile {}", Self::KIND),
            "path" => path.display(),
        })
    }
}
