use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::task::{Task, TaskKind};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskDto {
    pub kind: TaskKind,
    pub schedule: String,
    pub text: String,
    // Days from today, negative for tasks shown before it
    pub days: i64,
}

impl TaskDto {
    pub fn from_entity(task: &Task, days: i64) -> Self {
        Self {
            kind: task.kind(),
            schedule: task.schedule(),
            text: task.text().to_string(),
            days,
        }
    }
}

/// One shown day of the agenda.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayGroupDto {
    pub offset: i64,
    pub date: NaiveDate,
    pub tasks: Vec<TaskDto>,
}
