use std::fmt;

use chrono::DateTime as ChronoDateTime;
use tracing::debug;

use crate::traq::{DateTime, STOP};

/// Timestamp layout of a log line, e.g. `Mon Oct 28 21:45:33 +0100 2013`.
const WRITE_FORMAT: &str = "%a %b %-d %H:%M:%S %z %Y";
/// Same layout without the leading weekday, which is not checked on read.
const READ_FORMAT: &str = "%b %d %H:%M:%S %z %Y";

/// One line of a day log.
///
/// The default value is the zero entry that malformed lines decode to: the
/// epoch at `+0000` with an empty tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeEntry {
    pub timestamp: DateTime,
    pub tag: String,
    pub comment: String,
}

impl TimeEntry {
    pub fn new(timestamp: DateTime, tag: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            timestamp,
            tag: tag.into(),
            comment: comment.into(),
        }
    }

    pub fn stop(timestamp: DateTime) -> Self {
        Self::new(timestamp, STOP, "")
    }

    pub fn is_stop(&self) -> bool {
        self.tag == STOP
    }

    /// Decodes `<timestamp>;<tag>;<comment>`.
    ///
    /// Never fails: a line with the wrong number of fields or an unreadable
    /// timestamp becomes [`TimeEntry::default`].
    pub fn decode(line: &str) -> Self {
        let parts: Vec<&str> = line.split(';').collect();
        if parts.len() != 3 {
            debug!(line, fields = parts.len(), "malformed log line");
            return Self::default();
        }
        match parse_timestamp(parts[0]) {
            Some(timestamp) => Self::new(timestamp, parts[1], parts[2]),
            None => {
                debug!(line, "unreadable timestamp in log line");
                Self::default()
            }
        }
    }

    pub fn encode(&self) -> String {
        format!(
            "{};{};{}",
            self.timestamp.format(WRITE_FORMAT),
            self.tag,
            self.comment
        )
    }
}

impl fmt::Display for TimeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime> {
    let (_weekday, rest) = s.trim().split_once(' ')?;
    ChronoDateTime::parse_from_str(rest.trim_start(), READ_FORMAT).ok()
}

/// Turns a command given on the command line into the tag that gets logged.
///
/// `stop` is kept as is, everything else is marked as a user tag with `#`.
pub fn tag_for_command(command: &str) -> String {
    if command == STOP || command.starts_with('#') {
        command.to_string()
    } else {
        format!("#{command}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use rstest::rstest;

    fn at(offset_hours: i32, y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
    }

    #[test]
    fn decodes_a_full_line() {
        let entry = TimeEntry::decode("Mon Oct 28 21:45:33 +0100 2013;#work;standup");
        assert_eq!(entry.timestamp, at(1, 2013, 10, 28, 21, 45, 33));
        assert_eq!(entry.tag, "#work");
        assert_eq!(entry.comment, "standup");
    }

    #[rstest]
    #[case("Thu Jan 3 12:30:00 +0000 2013;stop;")]
    #[case("Thu Jan 03 12:30:00 +0000 2013;stop;")]
    fn accepts_padded_and_unpadded_days(#[case] line: &str) {
        let entry = TimeEntry::decode(line);
        assert_eq!(entry.timestamp, at(0, 2013, 1, 3, 12, 30, 0));
        assert!(entry.is_stop());
        assert!(entry.comment.is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("Mon Oct 28 21:45:33 +0100 2013;#work")]
    #[case("Mon Oct 28 21:45:33 +0100 2013;#work;a;b")]
    #[case("yesterday at noon;#work;")]
    #[case("Mon Oct 28 21:45:33 2013;#work;")]
    fn malformed_lines_become_the_zero_entry(#[case] line: &str) {
        assert_eq!(TimeEntry::decode(line), TimeEntry::default());
    }

    #[test]
    fn zero_entry_is_the_epoch_without_tag() {
        let zero = TimeEntry::default();
        assert_eq!(zero.timestamp.timestamp(), 0);
        assert!(zero.tag.is_empty());
    }

    #[test]
    fn encodes_with_unpadded_day() {
        let entry = TimeEntry::new(at(0, 1986, 9, 3, 12, 0, 0), "#test", "");
        assert_eq!(entry.encode(), "Wed Sep 3 12:00:00 +0000 1986;#test;");
    }

    #[test]
    fn keeps_the_offset_it_was_written_with() {
        let entry = TimeEntry::new(at(-5, 2013, 10, 28, 8, 0, 0), "#work", "early");
        assert_eq!(entry.encode(), "Mon Oct 28 08:00:00 -0500 2013;#work;early");
        assert_eq!(TimeEntry::decode(&entry.encode()), entry);
    }

    #[rstest]
    #[case("work", "#work")]
    #[case("#work", "#work")]
    #[case("stop", "stop")]
    fn command_tags(#[case] command: &str, #[case] tag: &str) {
        assert_eq!(tag_for_command(command), tag);
    }
}
