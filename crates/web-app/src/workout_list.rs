use chrono::{DateTime, Local, Utc};
use liftkit_domain::{Load, WorkoutEntry, WorkoutLog, WorkoutRepository};

/// What the workout page shows for the current state of the log.
#[derive(Debug, PartialEq)]
pub enum WorkoutList<'a> {
    Loading,
    Empty,
    Entries(&'a [WorkoutEntry]),
}

impl<'a, R: WorkoutRepository> From<&'a WorkoutLog<R>> for WorkoutList<'a> {
    fn from(log: &'a WorkoutLog<R>) -> Self {
        if !log.is_loaded() {
            WorkoutList::Loading
        } else if log.entries().is_empty() {
            WorkoutList::Empty
        } else {
            WorkoutList::Entries(log.entries())
        }
    }
}

/// Figures shown next to a logged entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryStats {
    pub volume: f32,
    /// Only estimated for entries with at least one repetition.
    pub one_rep_max: Option<f32>,
}

impl EntryStats {
    #[must_use]
    pub fn new(entry: &impl Load) -> Self {
        Self {
            volume: entry.volume(),
            one_rep_max: if u32::from(entry.reps()) > 0 {
                entry.one_rep_max().ok()
            } else {
                None
            },
        }
    }
}

/// Creation date in local time, e.g. `16.10.2026`.
#[must_use]
pub fn format_created_at(created_at: DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format("%d.%m.%Y")
        .to_string()
}
