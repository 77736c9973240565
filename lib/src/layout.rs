//! Where sources are read from and where output is written to.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Chainable, Result};

pub const ARTICLES_DIR: &str = "articles";
pub const FRAGMENTS_DIR: &str = "fragments";
pub const IMAGES_DIR: &str = "images";
pub const LAYOUTS_DIR: &str = "layouts";
pub const STYLESHEETS_DIR: &str = "stylesheets";
pub const VIEWS_DIR: &str = "views";
pub const TARGET_DIR: &str = "public";

/// The file name of the compiled stylesheet bundle.
pub const BUNDLE_FILE: &str = "app.css";

/// Source and target roots for one build, anchored at the site root.
///
/// The target tree looks like this:
///
/// ```text
/// public/
/// ├── articles/<name>
/// ├── fragments/<name>
/// ├── runs
/// └── assets/
///     ├── <image links>
///     └── <release>/app.css
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub release: String,
}

impl Layout {
    pub fn new<P: AsRef<Path>, R: Into<String>>(root: P, release: R) -> Self {
        Layout { root: root.as_ref().to_path_buf(), release: release.into() }
    }

    pub fn articles_dir(&self) -> PathBuf {
        self.root.join(ARTICLES_DIR)
    }

    pub fn fragments_dir(&self) -> PathBuf {
        self.root.join(FRAGMENTS_DIR)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    pub fn stylesheets_dir(&self) -> PathBuf {
        self.root.join(STYLESHEETS_DIR)
    }

    /// The template name of the `name` layout, relative to the site root.
    pub fn layout(&self, name: &str) -> String {
        format!("{LAYOUTS_DIR}/{name}.html")
    }

    /// The template name of the `name` view, relative to the site root.
    pub fn view(&self, name: &str) -> String {
        format!("{VIEWS_DIR}/{name}.html")
    }

    pub fn target_dir(&self) -> PathBuf {
        self.root.join(TARGET_DIR)
    }

    pub fn target_articles_dir(&self) -> PathBuf {
        self.target_dir().join(ARTICLES_DIR)
    }

    pub fn target_fragments_dir(&self) -> PathBuf {
        self.target_dir().join(FRAGMENTS_DIR)
    }

    pub fn target_runs(&self) -> PathBuf {
        self.target_dir().join("runs")
    }

    pub fn target_assets_dir(&self) -> PathBuf {
        self.target_dir().join("assets")
    }

    /// Assets whose URL changes with every release, so they can be cached
    /// forever.
    pub fn target_versioned_assets_dir(&self) -> PathBuf {
        self.target_assets_dir().join(&self.release)
    }

    pub fn target_bundle(&self) -> PathBuf {
        self.target_versioned_assets_dir().join(BUNDLE_FILE)
    }

    /// Creates every target directory. Existing directories are left alone.
    pub fn create_target_dirs(&self) -> Result<()> {
        let dirs = [
            self.target_dir(),
            self.target_articles_dir(),
            self.target_fragments_dir(),
            self.target_assets_dir(),
            self.target_versioned_assets_dir(),
        ];

        for dir in dirs {
            log::debug!("creating target directory: {}", dir.display());
            fs::create_dir_all(&dir).chain_with(|| error! {
                "failed to create target directory",
                "directory" => dir.display(),
            })?;
        }

        Ok(())
    }
}
