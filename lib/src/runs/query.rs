use std::time::Duration;

use chrono::NaiveDate;
use postgres::{Client, NoTls};

use crate::error::Result;
use crate::runs::{Run, YearlyDistance};

/// All runs: Strava events whose activity type is `Run`, with distances in
/// kilometers and the local start time.
const RUNS_CTE: &str = "
    WITH runs AS (
        SELECT (metadata ->> 'occurred_at_local')::timestamp AS occurred_at_local,
            ((metadata ->> 'distance')::float / 1000.0) AS distance
        FROM events
        WHERE type = 'strava'
            AND metadata ->> 'type' = 'Run'
    )
";

const RECENT_RUNS: &str = "
    SELECT (metadata ->> 'distance')::float,
        (metadata ->> 'total_elevation_gain')::float,
        metadata ->> 'location_city',
        (metadata ->> 'moving_time')::bigint,
        (metadata ->> 'occurred_at_local')::timestamp
    FROM events
    WHERE type = 'strava'
        AND metadata ->> 'type' = 'Run'
    ORDER BY occurred_at DESC
    LIMIT $1
";

const DAILY_TOTALS: &str = "
    SELECT occurred_at_local::date AS day,
        SUM(distance)
    FROM runs
    WHERE occurred_at_local::date BETWEEN $1 AND $2
    GROUP BY day
    ORDER BY day ASC
";

const YEARLY_TOTALS: &str = "
    SELECT EXTRACT(YEAR FROM occurred_at_local)::int AS year,
        SUM(distance)
    FROM runs
    GROUP BY year
    ORDER BY year DESC
";

pub fn connect(url: &str) -> Result<Client> {
    Ok(Client::connect(url, NoTls)?)
}

pub fn recent_runs(client: &mut Client, limit: i64) -> Result<Vec<Run>> {
    let mut runs = vec![];
    for row in client.query(RECENT_RUNS, &[&limit])? {
        let moving_time: i64 = row.try_get(3)?;
        runs.push(Run {
            distance: row.try_get(0)?,
            elevation_gain: row.try_get(1)?,
            location_city: row.try_get(2)?,
            moving_time: Duration::from_secs(moving_time.max(0) as u64),
            occurred_at: row.try_get(4)?,
        });
    }

    Ok(runs)
}

/// Per-day kilometer totals for the days from `start` to `end` that have any
/// runs at all.
pub fn daily_totals(client: &mut Client, start: NaiveDate, end: NaiveDate) -> Result<Vec<(NaiveDate, f64)>> {
    let sql = format!("{RUNS_CTE} {DAILY_TOTALS}");
    let mut totals = vec![];
    for row in client.query(sql.as_str(), &[&start, &end])? {
        totals.push((row.try_get(0)?, row.try_get(1)?));
    }

    Ok(totals)
}

pub fn yearly_totals(client: &mut Client) -> Result<Vec<YearlyDistance>> {
    let sql = format!("{RUNS_CTE} {YEARLY_TOTALS}");
    let mut totals = vec![];
    for row in client.query(sql.as_str(), &[])? {
        totals.push(YearlyDistance { year: row.try_get(0)?, distance_km: row.try_get(1)? });
    }

    Ok(totals)
}
