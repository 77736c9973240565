#![doc = svgbobdoc::transform!(
//! Building blocks for the sorg static site.
//!
//! # Overview
//!
//! A build turns a site root full of source content into a `public/` tree
//! ready to be deployed. Each kind of content has its own small pipeline:
//!
//! ```svgbob
//!  +-----------+    +----------+    +--------+    +----------+    +------+
//!  | articles/ |--->| split    |--->| decode |--->| markdown |--->| view |
//!  | fragments/|    | (---)    |    | (YAML) |    | (HTML)   |    |      |
//!  +-----------+    +----------+    +--------+    +----------+    +--+---+
//!                                                                    |
//!  +-----------+    +----------+                                     v
//!  | events db |--->| runs     |-------------------------------> public/
//!  +-----------+    +----------+                                     ^
//!                                                                    |
//!  +-------------+  +----------+                                     |
//!  | stylesheets |->| bundle   |-------------------------------------+
//!  +-------------+  +----------+                                     |
//!  +-------------+  +----------+                                     |
//!  | images/     |->| symlink  |-------------------------------------+
//!  +-------------+  +----------+
//! ```
//!
//! In words:
//!
//!   * **Articles** and **fragments** are Markdown files with an optional
//!     YAML metadata block between `---` lines. The block is split off
//!     ([`markdown::frontmatter`]), decoded into a typed record and validated
//!     ([`content`]), the body is rendered to HTML ([`markdown::Markdown`]) and
//!     the record is rendered through a layout and view template
//!     ([`templating`]).
//!
//!   * **Runs** are read from an external PostgreSQL database ([`runs`]). No
//!     database configured means an empty, but still rendered, runs page.
//!
//!   * **Stylesheets** are concatenated into one bundle, compiling Sass on the
//!     way ([`stylesheet`]), and **images** are symlinked into the output
//!     ([`assets`]).
//!
//! Where everything lives on disk is described by [`layout::Layout`].
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod layout;
pub mod format;
pub mod markdown;
pub mod content;
pub mod runs;
pub mod stylesheet;
pub mod assets;
pub mod templating;

pub use chrono;
pub use error::{Error, Result};
