use std::collections::BTreeMap;

use chrono::NaiveTime;
use clap::ValueEnum;

use crate::traq::{entry::TimeEntry, DateTime, STOP};

/// Seconds tracked per tag.
pub type Totals = BTreeMap<String, i64>;

/// What happens to a tag that is still open when the log ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Unterminated {
    /// Close it at 23:59:59 of the day it was opened on, in its own offset.
    #[default]
    EndOfDay,
    /// Leave it uncounted. Use this when the caller closes logs itself.
    Ignore,
}

/// Adds up the time spent on every tag of one day log.
///
/// A tag runs from its latest entry until the next entry with a different
/// tag. Repeating the running tag restarts its interval without counting the
/// time before it. The `stop` tag ends the running tag without starting a new
/// one. Entries with an empty tag (the result of decoding a broken line) reset
/// the running tag without attributing any time to it.
///
/// Durations are differences of Unix timestamps, so entries written in
/// different offsets subtract correctly. Entries out of chronological order
/// produce negative durations, which are kept as they are.
///
/// The keys `""` and `stop` never appear in the result.
pub fn sum_entries(entries: &[TimeEntry], unterminated: Unterminated) -> Totals {
    let mut totals = Totals::new();
    let mut current_tag = String::new();
    let mut current_time = DateTime::default();

    for entry in entries {
        if entry.tag.is_empty() {
            current_tag.clear();
            totals.insert(String::new(), 0);
        } else if entry.is_stop() {
            add(&mut totals, &current_tag, elapsed(current_time, entry.timestamp));
            current_tag.clear();
        } else if entry.tag != current_tag {
            add(&mut totals, &current_tag, elapsed(current_time, entry.timestamp));
            current_tag.clone_from(&entry.tag);
        }
        current_time = entry.timestamp;
    }

    if unterminated == Unterminated::EndOfDay && !current_tag.is_empty() {
        if let Some(end) = end_of_day(current_time) {
            add(&mut totals, &current_tag, elapsed(current_time, end));
        }
    }

    totals.remove("");
    totals.remove(STOP);
    totals
}

/// Adds every total of `other` onto `totals`.
pub fn merge(totals: &mut Totals, other: Totals) {
    for (tag, seconds) in other {
        *totals.entry(tag).or_insert(0) += seconds;
    }
}

pub fn hours(seconds: i64) -> f64 {
    seconds as f64 / 3600.0
}

fn add(totals: &mut Totals, tag: &str, seconds: i64) {
    *totals.entry(tag.to_string()).or_insert(0) += seconds;
}

fn elapsed(from: DateTime, to: DateTime) -> i64 {
    to.timestamp() - from.timestamp()
}

fn end_of_day(time: DateTime) -> Option<DateTime> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)?;
    time.date_naive()
        .and_time(last_second)
        .and_local_timezone(*time.offset())
        .single()
}
