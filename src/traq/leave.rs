use std::{fs, io, path::Path};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use tracing::debug;

/// Hours expected on a regular working day, break included.
const WORKDAY_SECONDS: i64 = (8 + 1) * 60 * 60;

/// Days off for one year, read from `leave-<year>.json` in the data directory.
#[derive(Debug, Default, Deserialize)]
pub struct Leave {
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub vacation: Vec<NaiveDate>,
    #[serde(default)]
    pub sick: Vec<NaiveDate>,
}

impl Leave {
    pub fn load(root: &Path, year: i32) -> Result<Self> {
        let path = root.join(format!("leave-{year:04}.json"));
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("error: Failed to parse {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no leave file, assuming no days off");
                Ok(Self::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("error: Failed to read {}", path.display()))
            }
        }
    }

    pub fn is_day_off(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date) || self.vacation.contains(&date) || self.sick.contains(&date)
    }

    /// Seconds of work expected over `dates`: a full day for every weekday
    /// that is not a day off.
    pub fn expected_seconds(&self, dates: &[NaiveDate]) -> i64 {
        dates
            .iter()
            .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .filter(|date| !self.is_day_off(**date))
            .count() as i64
            * WORKDAY_SECONDS
    }
}
