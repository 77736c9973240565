//! Running activity read from the external events database.
//!
//! Three result sets back the runs page: the most recent runs, a dense
//! per-day distance series over a trailing window, and per-year totals. When
//! no database is configured the page still renders with empty data.

mod query;

use std::time::Duration;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::error::{Chainable, Result};

/// How many runs the recent runs list holds at most.
pub const RECENT_RUNS: i64 = 30;

/// Length of the trailing daily window, in days. The series covers both
/// endpoints, so it holds `WINDOW_DAYS + 1` entries.
pub const WINDOW_DAYS: u64 = 180;

/// One recorded run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    /// Distance in meters.
    pub distance: f64,
    /// Elevation gain in meters.
    pub elevation_gain: f64,
    #[serde(serialize_with = "crate::util::or_empty")]
    pub location_city: Option<String>,
    /// Time spent moving, serialized as whole seconds.
    #[serde(serialize_with = "as_secs")]
    pub moving_time: Duration,
    /// When the run started, in the local time where it happened.
    pub occurred_at: NaiveDateTime,
}

fn as_secs<S: Serializer>(duration: &Duration, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_u64(duration.as_secs())
}

/// Kilometers run on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyDistance {
    pub day: NaiveDate,
    pub distance_km: f64,
}

/// Kilometers run in one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyDistance {
    pub year: i32,
    pub distance_km: f64,
}

/// Everything the runs page shows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// Most recent first.
    pub runs: Vec<Run>,
    /// Oldest day first, one entry per day of the window.
    pub last_year: Vec<DailyDistance>,
    /// Most recent year first.
    pub by_year: Vec<YearlyDistance>,
}

/// The first day of the daily window ending on `today`.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(WINDOW_DAYS)).unwrap_or(NaiveDate::MIN)
}

/// Expands sparse per-day totals into one entry for every day from `start`
/// to `end`, both inclusive. Days without a total are zero, totals outside
/// the range are dropped, and negative totals are clamped to zero.
pub fn daily_series(start: NaiveDate, end: NaiveDate, totals: &[(NaiveDate, f64)]) -> Vec<DailyDistance> {
    start.iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            let distance_km = totals.iter()
                .filter(|(d, _)| *d == day)
                .map(|(_, km)| km)
                .sum::<f64>()
                .max(0.0);

            DailyDistance { day, distance_km }
        })
        .collect()
}

/// Reads run statistics for the window ending `today`.
///
/// With no `database_url` (or an empty one) the result has no runs, a
/// zero-filled daily series, and no yearly totals. Otherwise any connection
/// or query failure is returned as an error.
pub fn fetch(database_url: Option<&str>, today: NaiveDate) -> Result<RunStats> {
    let start = window_start(today);
    let url = match database_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => url,
        None => {
            log::debug!("no events database configured; rendering runs without data");
            return Ok(RunStats {
                last_year: daily_series(start, today, &[]),
                ..RunStats::default()
            });
        }
    };

    let mut client = query::connect(url)
        .chain_with(|| error!("failed to connect to the events database"))?;

    let runs = query::recent_runs(&mut client, RECENT_RUNS)
        .chain_with(|| error!("failed to query recent runs"))?;

    let totals = query::daily_totals(&mut client, start, today)
        .chain_with(|| error!("failed to query daily run distances"))?;

    let by_year = query::yearly_totals(&mut client)
        .chain_with(|| error!("failed to query yearly run distances"))?;

    log::debug!("read {} runs and {} years of totals", runs.len(), by_year.len());
    Ok(RunStats { runs, last_year: daily_series(start, today, &totals), by_year })
}
