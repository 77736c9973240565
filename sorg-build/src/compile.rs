use std::fmt;
use std::path::{Path, PathBuf};

use sorg::chrono::{DateTime, Local, NaiveDate};
use sorg::content::{Article, Fragment, Record};
use sorg::error::{Chainable, Result};
use sorg::layout::Layout;
use sorg::markdown::Markdown;
use sorg::templating::minijinja::MiniJinjaEngine;
use sorg::templating::{Engine, Globals, Locals, View};
use sorg::util::{list_dir, output_name, Entries};
use sorg::{assets, error, runs, stylesheet};

use crate::config::Conf;
use crate::views::{ArticleView, FragmentView, RunsView};

/// The layout every page is rendered into.
pub const MAIN_LAYOUT: &str = "main";

/// The parts of a build, in the order they run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    CreateDirs,
    Articles,
    Fragments,
    Runs,
    Stylesheets,
    Images,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::CreateDirs,
        Stage::Articles,
        Stage::Fragments,
        Stage::Runs,
        Stage::Stylesheets,
        Stage::Images,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::CreateDirs => "target directories".fmt(f),
            Stage::Articles => "articles".fmt(f),
            Stage::Fragments => "fragments".fmt(f),
            Stage::Runs => "runs".fmt(f),
            Stage::Stylesheets => "stylesheets".fmt(f),
            Stage::Images => "images".fmt(f),
        }
    }
}

/// One build of the site rooted at `layout.root`.
#[derive(Debug)]
pub struct Build<'c> {
    conf: &'c Conf,
    layout: Layout,
    engine: MiniJinjaEngine,
    markdown: Markdown,
    globals: Globals,
    today: NaiveDate,
}

impl<'c> Build<'c> {
    pub fn new<P: AsRef<Path>>(conf: &'c Conf, root: P, started: DateTime<Local>) -> Self {
        let release = conf.release_or(started);
        let layout = Layout::new(root, release.clone());
        let globals = Globals {
            google_analytics_id: conf.google_analytics_id().map(String::from),
            release,
        };

        Build {
            conf,
            engine: MiniJinjaEngine::new(&layout.root),
            layout,
            markdown: Markdown::new(),
            globals,
            today: started.date_naive(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Runs every stage in order, stopping at the first failure.
    pub fn run(&self) -> Result<()> {
        log::info!("building {} (release {})", self.layout.root.display(), self.layout.release);
        for stage in Stage::ALL {
            log::info!("stage: {stage}");
            self.run_stage(stage).chain_with(|| error! {
                "build stage failed",
                "stage" => stage,
            })?;
        }

        log::info!("site built into {}", self.layout.target_dir().display());
        Ok(())
    }

    pub fn run_stage(&self, stage: Stage) -> Result<()> {
        match stage {
            Stage::CreateDirs => self.layout.create_target_dirs(),
            Stage::Articles => {
                let count = self.compile_records::<Article, _, _>(
                    self.layout.articles_dir(),
                    self.layout.target_articles_dir(),
                    "articles/show",
                    |article| ArticleView { article },
                )?;

                log::info!("compiled {count} articles");
                Ok(())
            }
            Stage::Fragments => {
                let count = self.compile_records::<Fragment, _, _>(
                    self.layout.fragments_dir(),
                    self.layout.target_fragments_dir(),
                    "fragments/show",
                    |fragment| FragmentView { fragment },
                )?;

                log::info!("compiled {count} fragments");
                Ok(())
            }
            Stage::Runs => self.compile_runs(),
            Stage::Stylesheets => {
                let (source, target) = (self.layout.stylesheets_dir(), self.layout.target_bundle());
                stylesheet::bundle(&source, stylesheet::STYLESHEETS, &target)?;
                log::info!("bundled {} stylesheets into {}", stylesheet::STYLESHEETS.len(), target.display());
                Ok(())
            }
            Stage::Images => {
                let count = assets::link_all(&self.layout.images_dir(), &self.layout.target_assets_dir())?;
                log::info!("linked {count} images");
                Ok(())
            }
        }
    }

    fn render<V: View>(&self, view: &str, target: &Path, page: &V) -> Result<()> {
        let (layout, view) = (self.layout.layout(MAIN_LAYOUT), self.layout.view(view));
        self.engine.render_view(&layout, &view, target, &Locals::new(&self.globals, page))
    }

    /// Compiles every file in `source` into a page in `target`, returning the
    /// number of pages.
    fn compile_records<R, V, F>(&self, source: PathBuf, target: PathBuf, view: &str, to_view: F) -> Result<usize>
        where R: Record, V: View, F: Fn(R) -> V
    {
        let paths = list_dir(&source, Entries::Content)?;
        for path in &paths {
            log::debug!("compiling: {}", path.display());
            let page = to_view(R::load(path, &self.markdown)?);
            self.render(view, &target.join(output_name(path)), &page).chain_with(|| error! {
                format!("failed to render {}", R::KIND),
                "path" => path.display(),
            })?;
        }

        Ok(paths.len())
    }

    fn compile_runs(&self) -> Result<()> {
        let stats = runs::fetch(self.conf.database_url(), self.today)?;
        log::info!("rendering {} runs", stats.runs.len());
        self.render("runs/index", &self.layout.target_runs(), &RunsView::from(stats))
    }
}
