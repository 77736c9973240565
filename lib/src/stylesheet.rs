//! Bundling the site's stylesheets into a single CSS file.
//!
//! Sources are processed in a fixed order and later rules override earlier
//! ones, so the order of [`STYLESHEETS`] matters.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Chainable, ErrorDetail, Kind, Result};

/// The site's stylesheets, in bundle order.
pub const STYLESHEETS: &[&str] = &[
    "_reset.scss",
    "main.scss",
    "about.scss",
    "fragments.scss",
    "index.scss",
    "photos.scss",
    "quotes.scss",
    "reading.scss",
    "runs.scss",
    "signature.scss",
    "solarized-light.css",
    "tenets.scss",
    "twitter.scss",
];

/// A Sass source failed to compile.
#[derive(Debug)]
pub struct SassError {
    pub message: String,
}

impl std::fmt::Display for SassError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to compile sass: {}", self.message)
    }
}

impl ErrorDetail for SassError {
    fn kind(&self) -> Option<Kind> {
        Some(Kind::Stylesheet)
    }
}

/// Returns `true` if `name` is compiled rather than copied.
pub fn is_sass(name: &str) -> bool {
    matches!(Path::new(name).extension().and_then(|e| e.to_str()), Some("sass" | "scss"))
}

#[cfg(feature = "sass")]
fn compile_sass(path: &Path) -> Result<String> {
    let options = grass::Options::default();
    grass::from_path(path, &options).map_err(|e| SassError { message: e.to_string() }.into())
}

#[cfg(not(feature = "sass"))]
fn compile_sass(_: &Path) -> Result<String> {
    Err(SassError { message: "sass support is disabled (enable the `sass` feature)".into() }.into())
}

/// The stylesheet `name` in `source_dir`, ready to be bundled.
fn render(source_dir: &Path, name: &str) -> Result<String> {
    let path = source_dir.join(name);
    if !path.is_file() {
        return err! {
            "stylesheet does not exist",
            "path" => path.display(),
        };
    }

    match is_sass(name) {
        true => compile_sass(&path),
        false => Ok(fs::read_to_string(&path)?),
    }
}

/// Writes the stylesheets `names` from `source_dir` into `target`, in order.
///
/// Each section starts with a `/* name */` banner followed by a blank line,
/// and ends with a blank line.
pub fn bundle<S: AsRef<str>>(source_dir: &Path, names: &[S], target: &Path) -> Result<()> {
    let file = fs::File::create(target).chain_with(|| error! {
        "failed to create stylesheet bundle",
        "path" => target.display(),
    })?;

    let mut out = BufWriter::new(file);
    for name in names {
        let name = name.as_ref();
        log::debug!("bundling stylesheet: {}", source_dir.join(name).display());

        let css = render(source_dir, name).chain_with(|| error! {
            "failed to bundle stylesheet",
            "stylesheet" => name,
        })?;

        write!(out, "/* {name} */\n\n{css}\n\n")?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod stylesheet_tests {
    use std::fs;

    use super::*;

    #[test]
    fn sass_is_detected_by_extension() {
        assert!(is_sass("main.scss"));
        assert!(is_sass("main.sass"));
        assert!(!is_sass("solarized-light.css"));
    }

    #[test]
    fn sections_follow_the_configured_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.css"), "b { color: blue; }").unwrap();
        fs::write(dir.path().join("a.css"), "a { color: red; }").unwrap();

        let target = dir.path().join("app.css");
        bundle(dir.path(), &["b.css", "a.css"], &target).unwrap();

        let css = fs::read_to_string(&target).unwrap();
        assert_eq!(css, "/* b.css */\n\nb { color: blue; }\n\n/* a.css */\n\na { color: red; }\n\n");
    }

    #[cfg(feature = "sass")]
    #[test]
    fn scss_is_compiled() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.scss"), "$accent: red;\n.a { .b { color: $accent; } }").unwrap();

        let target = dir.path().join("app.css");
        bundle(dir.path(), &["main.scss"], &target).unwrap();

        let css = fs::read_to_string(&target).unwrap();
        assert!(css.starts_with("/* main.scss */\n\n"), "{css}");
        assert!(css.contains(".a .b"), "{css}");
        assert!(css.contains("color: red"), "{css}");
    }

    #[cfg(feature = "sass")]
    #[test]
    fn invalid_scss_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.scss"), ".a { color: $undefined; }").unwrap();

        let error = bundle(dir.path(), &["bad.scss"], &dir.path().join("app.css")).unwrap_err();
        assert_eq!(error.kind(), Some(Kind::Stylesheet));
    }

    #[test]
    fn missing_stylesheet_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.css"), "a {}").unwrap();

        let error = bundle(dir.path(), &["a.css", "missing.css"], &dir.path().join("app.css")).unwrap_err();
        assert!(error.to_string().contains("missing.css"), "{error}");
    }
}
