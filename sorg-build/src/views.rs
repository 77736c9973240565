//! The typed locals of each kind of page.

use serde::Serialize;

use sorg::chrono::NaiveDate;
use sorg::content::{Article, Fragment};
use sorg::runs::{Run, RunStats};
use sorg::templating::View;

#[derive(Debug, Serialize)]
pub struct ArticleView {
    pub article: Article,
}

impl View for ArticleView {
    fn title(&self) -> &str {
        &self.article.title
    }
}

#[derive(Debug, Serialize)]
pub struct FragmentView {
    pub fragment: Fragment,
}

impl View for FragmentView {
    fn title(&self) -> &str {
        &self.fragment.title
    }
}

/// The runs page: recent runs plus the series its two charts plot.
#[derive(Debug, Default, Serialize)]
pub struct RunsView {
    pub runs: Vec<Run>,
    pub last_year_x_days: Vec<NaiveDate>,
    pub last_year_y_distances: Vec<f64>,
    pub by_year_x_years: Vec<String>,
    pub by_year_y_distances: Vec<f64>,
}

impl From<RunStats> for RunsView {
    fn from(stats: RunStats) -> Self {
        let (last_year_x_days, last_year_y_distances) = stats.last_year.iter()
            .map(|d| (d.day, d.distance_km))
            .unzip();

        let (by_year_x_years, by_year_y_distances) = stats.by_year.iter()
            .map(|y| (y.year.to_string(), y.distance_km))
            .unzip();

        RunsView {
            runs: stats.runs,
            last_year_x_days,
            last_year_y_distances,
            by_year_x_years,
            by_year_y_distances,
        }
    }
}

impl View for RunsView {
    fn title(&self) -> &str {
        "Runs"
    }
}

#[cfg(test)]
mod views_tests {
    use sorg::runs::{DailyDistance, YearlyDistance};

    use super::*;

    #[test]
    fn runs_view_splits_series_into_axes() {
        let day = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        let stats = RunStats {
            runs: vec![],
            last_year: vec![DailyDistance { day, distance_km: 3.5 }],
            by_year: vec![
                YearlyDistance { year: 2020, distance_km: 100.0 },
                YearlyDistance { year: 2019, distance_km: 50.0 },
            ],
        };

        let view = RunsView::from(stats);
        assert_eq!(view.last_year_x_days, [day]);
        assert_eq!(view.last_year_y_distances, [3.5]);
        assert_eq!(view.by_year_x_years, ["2020", "2019"]);
        assert_eq!(view.by_year_y_distances, [100.0, 50.0]);
        assert_eq!(view.title(), "Runs");
    }
}
