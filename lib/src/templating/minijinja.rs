use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use minijinja::{path_loader, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::error::{Chainable, Result};
use crate::templating::{Engine, Locals, View};

/// Loads templates by path relative to the site root.
///
/// Views pick their layout with `{% extends layout %}`; `layout` is always
/// defined. Referencing any other value a page doesn't have is an error.
#[derive(Debug)]
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

/// The rendering context: a page's locals plus the layout it extends.
#[derive(Serialize)]
struct Context<'a, V: View> {
    layout: &'a str,
    #[serde(flatten)]
    locals: &'a Locals<'a, V>,
}

impl MiniJinjaEngine {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(root.as_ref()));
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("date", ext::date);
        env.add_filter("km", ext::km);
        env.add_filter("duration", ext::duration);
        MiniJinjaEngine { env }
    }

    /// Renders `view` extending `layout` with `locals` to a string.
    pub fn render<V: View>(&self, layout: &str, view: &str, locals: &Locals<'_, V>) -> Result<String> {
        let template = self.env.get_template(view)?;
        Ok(template.render(Context { layout, locals })?)
    }
}

impl Engine for MiniJinjaEngine {
    fn render_view<V: View>(
        &self,
        layout: &str,
        view: &str,
        target: &Path,
        locals: &Locals<'_, V>,
    ) -> Result<()> {
        log::debug!("rendering: {}", target.display());
        let template = self.env.get_template(view)?;
        let file = fs::File::create(target).chain_with(|| error! {
            "failed to open/create file for writing",
            "file path" => target.display()
        })?;

        let mut writer = BufWriter::new(file);
        template.render_to_write(Context { layout, locals }, &mut writer)
            .chain_with(|| error! {
                "failed to render view",
                "view" => view,
                "layout" => layout,
            })?;

        writer.flush()?;
        Ok(())
    }
}

mod ext {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use minijinja::{value::Value, Error, ErrorKind};

    const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

    /// Formats a timestamp: an integer number of seconds since the epoch or a
    /// date, date-time, or RFC 3339 string.
    pub fn date(value: Value, fmt: Option<&str>) -> Result<String, Error> {
        let fmt = fmt.unwrap_or(DEFAULT_DATE_FORMAT);
        if let Ok(ts) = i64::try_from(value.clone()) {
            let datetime = DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| Error::new(
                    ErrorKind::InvalidOperation,
                    "invalid timestamp provided to `date`"
                ))?;

            return Ok(datetime.format(fmt).to_string());
        }

        let kind = value.kind();
        let string = value.as_str()
            .ok_or_else(|| Error::new(
                ErrorKind::InvalidOperation,
                format!("`date` must be applied to a string or integer, found {kind}")
            ))?;

        let formatted = string.parse::<DateTime<Utc>>().map(|dt| dt.format(fmt))
            .or_else(|_| string.parse::<NaiveDateTime>().map(|dt| dt.format(fmt)))
            .or_else(|_| string.parse::<NaiveDate>().map(|d| d.format(fmt)))
            .map_err(|e| Error::new(
                ErrorKind::InvalidOperation,
                format!("failed to parse {string}: {e}")
            ))?;

        Ok(formatted.to_string())
    }

    /// Meters as kilometers with one decimal.
    pub fn km(meters: f64) -> String {
        format!("{:.1}", meters / 1000.0)
    }

    /// Seconds as `H:MM:SS`.
    pub fn duration(seconds: u64) -> String {
        let (h, m, s) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
        format!("{h}:{m:02}:{s:02}")
    }
}

impl_error_detail_with_std_error!(minijinja::Error => Template);
