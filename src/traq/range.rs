use chrono::{Datelike, NaiveDate};
use tracing::{trace, warn};

use crate::traq::{
    entry::TimeEntry,
    storage::{DayLogStore, StorageError},
    sum::{self, Totals},
    Config, DateTime,
};

pub fn dates_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| {
            first
                .iter_days()
                .take_while(|date| date.month() == month)
                .collect()
        })
        .unwrap_or_default()
}

pub fn dates_in_year(year: i32) -> Vec<NaiveDate> {
    (1..=12).flat_map(|month| dates_in_month(year, month)).collect()
}

/// Reads one day as stored.
///
/// Days that cannot be read are reported as `None`. A missing file just means
/// nothing was tracked that day.
pub fn read_day(
    store: &impl DayLogStore,
    project: &str,
    date: NaiveDate,
) -> Option<Vec<TimeEntry>> {
    match store.read_day(project, date) {
        Ok(entries) => Some(entries),
        Err(StorageError::Missing { path }) => {
            trace!(path = %path.display(), "no log for date");
            None
        }
        Err(e) => {
            warn!(%date, error = %e, "skipping unreadable day log");
            None
        }
    }
}

/// Reads one day and prepares it with the configured loader.
pub fn load_day(
    store: &impl DayLogStore,
    config: &Config,
    date: NaiveDate,
    now: DateTime,
) -> Option<Vec<TimeEntry>> {
    read_day(store, &config.project, date).map(|entries| config.loader.apply(entries, now))
}

/// Totals of every readable day in `dates`, one result per day.
pub fn evaluate_days(
    store: &impl DayLogStore,
    config: &Config,
    dates: &[NaiveDate],
    now: DateTime,
) -> Vec<(NaiveDate, Totals)> {
    dates
        .iter()
        .filter_map(|&date| {
            let entries = load_day(store, config, date, now)?;
            Some((date, sum::sum_entries(&entries, config.unterminated)))
        })
        .collect()
}

/// Totals of all readable days in `dates` added together.
pub fn summarize(
    store: &impl DayLogStore,
    config: &Config,
    dates: &[NaiveDate],
    now: DateTime,
) -> Totals {
    let mut totals = Totals::new();
    for (_, day) in evaluate_days(store, config, dates, now) {
        sum::merge(&mut totals, day);
    }
    totals
}
