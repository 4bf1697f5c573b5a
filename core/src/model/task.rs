use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::{Annual, Monthly, MultiDate, Single, Weekly};
use crate::error::DateParseError;
use crate::input::RawTask;

/// The source format a file is read as.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Weekly,
    Monthly,
    Annual,
    MultiDate,
    Single,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::Weekly,
        TaskKind::Monthly,
        TaskKind::Annual,
        TaskKind::MultiDate,
        TaskKind::Single,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TaskKind::Weekly => "weekly",
            TaskKind::Monthly => "monthly",
            TaskKind::Annual => "annual",
            TaskKind::MultiDate => "multi_date",
            TaskKind::Single => "single",
        }
    }

    /// Whether a `a/b: text` line stands for one task per date. Multi-date
    /// lines keep the `/` since it separates their months.
    pub fn expands_date_list(self) -> bool {
        !matches!(self, TaskKind::MultiDate)
    }

    pub fn build(self, raw: &RawTask) -> Result<Task, DateParseError> {
        Ok(match self {
            TaskKind::Weekly => Task::Weekly(Weekly::new(raw)?),
            TaskKind::Monthly => Task::Monthly(Monthly::new(raw)?),
            TaskKind::Annual => Task::Annual(Annual::new(raw)?),
            TaskKind::MultiDate => Task::MultiDate(MultiDate::new(raw)?),
            TaskKind::Single => Task::Single(Single::new(raw)?),
        })
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any scheduled task, whatever format it was read from.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Weekly(Weekly),
    Monthly(Monthly),
    Annual(Annual),
    MultiDate(MultiDate),
    Single(Single),
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::Weekly(_) => TaskKind::Weekly,
            Task::Monthly(_) => TaskKind::Monthly,
            Task::Annual(_) => TaskKind::Annual,
            Task::MultiDate(_) => TaskKind::MultiDate,
            Task::Single(_) => TaskKind::Single,
        }
    }

    /// Days from `now` until the task is next due. Only single tasks go
    /// negative.
    pub fn days_from<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        match self {
            Task::Weekly(t) => t.days_from(now),
            Task::Monthly(t) => t.days_from(now),
            Task::Annual(t) => t.days_from(now),
            Task::MultiDate(t) => t.days_from(now),
            Task::Single(t) => t.days_from(now),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Task::Weekly(t) => t.text(),
            Task::Monthly(t) => t.text(),
            Task::Annual(t) => t.text(),
            Task::MultiDate(t) => t.text(),
            Task::Single(t) => t.text(),
        }
    }

    pub fn schedule(&self) -> String {
        match self {
            Task::Weekly(t) => t.schedule(),
            Task::Monthly(t) => t.schedule(),
            Task::Annual(t) => t.schedule(),
            Task::MultiDate(t) => t.schedule(),
            Task::Single(t) => t.schedule(),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
