mod traq;

use std::{io, path::PathBuf};

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use traq::{commands, Config, FileStorage, Loader, Selection, Unterminated};

#[derive(Parser)]
/// A CLI for tracking time spent on tagged activities
///
/// Give a COMMAND to log it: `stop` ends the running tag, anything else starts
/// a tag of that name. Without a COMMAND the selected logs are printed.
struct Cli {
    /// Tag to start, or `stop`
    #[arg(value_parser = parse_command, conflicts_with_all = ["evaluate", "summary", "work_time"])]
    command: Option<String>,
    /// Comment to log with the COMMAND
    #[arg(short, long, value_parser = parse_text, default_value_t = String::new(), hide_default_value = true)]
    comment: String,
    /// Project to act on
    #[arg(short, long, value_parser = parse_text, default_value = "timestamps")]
    project: String,
    /// Select a single date [yyyy-mm-dd]
    #[arg(short, long, value_parser = parse_date, conflicts_with_all = ["year", "month"])]
    date: Option<NaiveDate>,
    /// Select a year, or the month of a year with --month
    #[arg(short, long)]
    year: Option<i32>,
    /// Select a month [1-12]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
    /// Print the tracked hours per tag for each date
    #[arg(short, long, conflicts_with_all = ["summary", "work_time"])]
    evaluate: bool,
    /// Print the tracked hours per tag for all dates together
    #[arg(short, long, conflicts_with = "work_time")]
    summary: bool,
    /// Compare the tracked hours with the expected working hours
    #[arg(short, long)]
    work_time: bool,
    /// Count a tag that is still running up to now
    #[arg(short, long)]
    running: bool,
    /// How to count a tag that is still running at the end of a day log
    #[arg(long, value_enum, default_value_t = Unterminated::EndOfDay)]
    unterminated: Unterminated,
    /// Directory holding the logs
    #[arg(long, env = "TRAQ_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// Log diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "traq=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let storage = FileStorage::new(data_dir(cli.data_dir)?);
    let config = Config {
        project: cli.project,
        loader: if cli.running {
            Loader::Running
        } else {
            Loader::Plain
        },
        unterminated: cli.unterminated,
    };
    let now = Local::now().fixed_offset();
    let selection = get_selection(cli.date, cli.year, cli.month, now.date_naive());
    let mut out = io::stdout().lock();

    if let Some(command) = cli.command {
        commands::record(&mut out, &storage, &config, &command, &cli.comment, now)
    } else if cli.evaluate {
        commands::evaluate(&mut out, &storage, &config, selection, now)
    } else if cli.summary {
        commands::summary(&mut out, &storage, &config, selection, now)
    } else if cli.work_time {
        commands::work_time(&mut out, &storage, &config, selection, now)
    } else {
        commands::print(&mut out, &storage, &config, selection)
    }
}

fn data_dir(configured: Option<PathBuf>) -> Result<PathBuf> {
    match configured {
        Some(dir) => Ok(dir),
        None => Ok(dirs::data_local_dir()
            .ok_or_else(|| anyhow!("error: Failed to find user data directory"))?
            .join("traq")),
    }
}

fn get_selection(
    date: Option<NaiveDate>,
    year: Option<i32>,
    month: Option<u32>,
    today: NaiveDate,
) -> Selection {
    match (date, year, month) {
        (Some(date), _, _) => Selection::Day(date),
        (None, Some(year), None) => Selection::Year(year),
        (None, year, month) => Selection::Month {
            year: year.unwrap_or(today.year()),
            month: month.unwrap_or(today.month()),
        },
    }
}

fn parse_command(s: &str) -> Result<String, String> {
    let s = parse_text(s)?;
    if s.is_empty() || s == "#" {
        return Err("command must not be empty".to_string());
    }
    Ok(s)
}

fn parse_text(s: &str) -> Result<String, String> {
    if s.contains([';', '\n', '\r']) {
        return Err("must not contain [;] or line breaks".to_string());
    }
    Ok(s.trim().to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| "date must be in the form [yyyy-mm-dd]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 10, 28).unwrap()
    }

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_the_current_month() {
        assert_eq!(
            get_selection(None, None, None, today()),
            Selection::Month {
                year: 2013,
                month: 10
            }
        );
    }

    #[test]
    fn month_without_year_is_in_the_current_year() {
        assert_eq!(
            get_selection(None, None, Some(2), today()),
            Selection::Month {
                year: 2013,
                month: 2
            }
        );
    }

    #[test]
    fn year_alone_selects_the_whole_year() {
        assert_eq!(
            get_selection(None, Some(1986), None, today()),
            Selection::Year(1986)
        );
    }

    #[test]
    fn date_wins() {
        let date = NaiveDate::from_ymd_opt(1986, 9, 3).unwrap();
        assert_eq!(
            get_selection(Some(date), None, None, today()),
            Selection::Day(date)
        );
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["traq", "-p", "client", "-d", "1986-09-03", "-e", "-r"])
            .unwrap();
        assert_eq!(cli.project, "client");
        assert!(cli.evaluate && cli.running);
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(1986, 9, 3));
        assert_eq!(cli.unterminated, Unterminated::EndOfDay);
    }

    #[test]
    fn parses_a_command_with_comment() {
        let cli = Cli::try_parse_from(["traq", "work", "-c", "standup"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("work"));
        assert_eq!(cli.comment, "standup");
    }

    #[test]
    fn rejects_separators_and_bad_months() {
        assert!(Cli::try_parse_from(["traq", "work;play"]).is_err());
        assert!(Cli::try_parse_from(["traq", "work", "-c", "a;b"]).is_err());
        assert!(Cli::try_parse_from(["traq", "-m", "13"]).is_err());
        assert!(Cli::try_parse_from(["traq", "-e", "-s"]).is_err());
    }

    #[test]
    fn unterminated_policy_is_selectable() {
        let cli = Cli::try_parse_from(["traq", "-e", "--unterminated", "ignore"]).unwrap();
        assert_eq!(cli.unterminated, Unterminated::Ignore);
    }
}
