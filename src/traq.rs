pub mod commands;
mod entry;
mod leave;
mod loader;
mod range;
mod storage;
mod sum;

use std::fmt;

use chrono::{Datelike, NaiveDate};

pub use loader::Loader;
pub use storage::FileStorage;
pub use sum::Unterminated;

pub type DateTime = chrono::DateTime<chrono::FixedOffset>;

/// Reserved tag that closes whichever tag is open.
pub const STOP: &str = "stop";

/// The calendar dates a command acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl Selection {
    pub fn dates(&self) -> Vec<NaiveDate> {
        match *self {
            Selection::Day(date) => vec![date],
            Selection::Month { year, month } => range::dates_in_month(year, month),
            Selection::Year(year) => range::dates_in_year(year),
        }
    }

    pub fn year(&self) -> i32 {
        match *self {
            Selection::Day(date) => date.year(),
            Selection::Month { year, .. } | Selection::Year(year) => year,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Selection::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            Selection::Year(year) => write!(f, "{year:04}"),
        }
    }
}

/// Settings shared by every command of one invocation.
pub struct Config {
    pub project: String,
    pub loader: Loader,
    pub unterminated: Unterminated,
}
