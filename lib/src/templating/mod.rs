//! Rendering pages through a layout and a view template.
//!
//! Every page is rendered with [`Locals`]: a fixed baseline (title,
//! analytics id, release, body class, viewport width) merged with one typed
//! [`View`] structure holding the page's own values. A view overrides a
//! baseline value by implementing the matching [`View`] method; its fields
//! add keys of their own and must not reuse baseline names.

pub mod minijinja;

use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// The viewport `width` used unless a view says otherwise.
pub const DEFAULT_VIEWPORT_WIDTH: &str = "device-width";

/// Per-build values every page receives.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Globals {
    pub google_analytics_id: Option<String>,
    pub release: String,
}

/// The page-specific values of one kind of page.
pub trait View: Serialize {
    fn title(&self) -> &str;

    fn body_class(&self) -> &str {
        ""
    }

    fn viewport_width(&self) -> &str {
        DEFAULT_VIEWPORT_WIDTH
    }
}

/// The full template context of one page.
#[derive(Debug, Serialize)]
pub struct Locals<'a, V: View> {
    pub title: &'a str,
    pub body_class: &'a str,
    pub viewport_width: &'a str,
    /// Empty when no analytics id is configured.
    pub google_analytics_id: &'a str,
    pub release: &'a str,
    #[serde(flatten)]
    pub view: &'a V,
}

impl<'a, V: View> Locals<'a, V> {
    pub fn new(globals: &'a Globals, view: &'a V) -> Self {
        Locals {
            title: view.title(),
            body_class: view.body_class(),
            viewport_width: view.viewport_width(),
            google_analytics_id: globals.google_analytics_id.as_deref().unwrap_or_default(),
            release: &globals.release,
            view,
        }
    }
}

pub trait Engine {
    /// Renders the template `view`, which extends the template `layout`, with
    /// `locals` into the file at `target`, creating or truncating it.
    fn render_view<V: View>(
        &self,
        layout: &str,
        view: &str,
        target: &Path,
        locals: &Locals<'_, V>,
    ) -> Result<()>;
}
