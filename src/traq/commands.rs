use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::traq::{
    entry::{tag_for_command, TimeEntry},
    leave::Leave,
    range,
    storage::{DayLogStore, FileStorage},
    sum::{self, Totals},
    Config, DateTime, Selection,
};

/// Appends a tag (or `stop`) for the current time.
pub fn record(
    out: &mut impl Write,
    storage: &FileStorage,
    config: &Config,
    command: &str,
    comment: &str,
    now: DateTime,
) -> Result<()> {
    let entry = TimeEntry::new(now, tag_for_command(command), comment);
    storage
        .append(&config.project, &entry)
        .context("error: Failed to write to the log")?;
    info!(project = %config.project, tag = %entry.tag, "recorded entry");
    writeln!(
        out,
        "Logged \"{}\" in \"{}\" at {}",
        entry.tag,
        config.project,
        now.format("%R")
    )?;
    Ok(())
}

/// Prints the stored log of every selected date, exactly as stored.
pub fn print(
    out: &mut impl Write,
    storage: &FileStorage,
    config: &Config,
    selection: Selection,
) -> Result<()> {
    for date in selection.dates() {
        if let Some(entries) = range::read_day(storage, &config.project, date) {
            for entry in entries {
                writeln!(out, "{entry}")?;
            }
            writeln!(out, "%%")?;
        }
    }
    Ok(())
}

/// Prints the totals of every selected date on its own.
pub fn evaluate(
    out: &mut impl Write,
    storage: &FileStorage,
    config: &Config,
    selection: Selection,
    now: DateTime,
) -> Result<()> {
    for (date, totals) in range::evaluate_days(storage, config, &selection.dates(), now) {
        writeln!(out, "{}", date.format("%Y-%m-%d"))?;
        write_totals(out, &totals)?;
        writeln!(out, "%%")?;
    }
    Ok(())
}

/// Prints the totals of all selected dates added together.
pub fn summary(
    out: &mut impl Write,
    storage: &FileStorage,
    config: &Config,
    selection: Selection,
    now: DateTime,
) -> Result<()> {
    let totals = range::summarize(storage, config, &selection.dates(), now);
    writeln!(out, "{selection}")?;
    write_totals(out, &totals)
}

/// Compares the tracked time with the time expected from the leave calendar.
///
/// Tracked time is counted like `summary`, so `--running` and
/// `--unterminated` apply here too.
pub fn work_time(
    out: &mut impl Write,
    storage: &FileStorage,
    config: &Config,
    selection: Selection,
    now: DateTime,
) -> Result<()> {
    let dates = selection.dates();
    let leave = Leave::load(storage.root(), selection.year())?;
    let expected = leave.expected_seconds(&dates);
    let tracked: i64 = range::summarize(storage, config, &dates, now).values().sum();
    writeln!(
        out,
        "work time for {selection}: {:.2} vs {:.2}",
        sum::hours(expected),
        sum::hours(tracked)
    )?;
    Ok(())
}

fn write_totals(out: &mut impl Write, totals: &Totals) -> Result<()> {
    for (tag, seconds) in totals {
        writeln!(out, "{tag}:{:.4}", sum::hours(*seconds))?;
    }
    Ok(())
}
