use crate::traq::{entry::TimeEntry, DateTime};

/// How a stored day log is prepared before it is summed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Loader {
    /// Use the log as stored.
    #[default]
    Plain,
    /// Close a still running tag at the current time, so that live activity
    /// shows up in evaluations. The extra stop is never written back.
    Running,
}

impl Loader {
    pub fn apply(self, mut entries: Vec<TimeEntry>, now: DateTime) -> Vec<TimeEntry> {
        if self == Loader::Running {
            if let Some(last) = entries.last() {
                if !last.is_stop() {
                    entries.push(TimeEntry::stop(now));
                }
            }
        }
        entries
    }
}
