use chrono::{DateTime, Datelike, Month, TimeZone};

use super::{parse_day, parse_month_name};
use crate::calendar::{normalized_date, resolve_local, whole_days_between};
use crate::error::DateParseError;
use crate::input::RawTask;
use crate::model::task::TaskKind;

/// A task due on the same month and day every year.
#[derive(Debug, Clone, PartialEq)]
pub struct Annual {
    month: Month,
    day: u32,
    text: String,
}

impl Annual {
    pub fn new(raw: &RawTask) -> Result<Self, DateParseError> {
        let parts: Vec<&str> = raw.date.split_whitespace().collect();
        let [month, day] = parts.as_slice() else {
            return Err(DateParseError::Malformed {
                kind: TaskKind::Annual,
                spec: raw.date.clone(),
            });
        };

        Ok(Self {
            month: parse_month_name(month)?,
            day: parse_day(day)?,
            text: raw.text.clone(),
        })
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Compares this year's occurrence at the same time of day as `now`,
    /// falling back to next year's once it has passed.
    pub fn days_from<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let days = self.days_until_in(now.year(), now);
        if days >= 0 {
            return days;
        }
        self.days_until_in(now.year() + 1, now)
    }

    fn days_until_in<Tz: TimeZone>(&self, year: i32, now: &DateTime<Tz>) -> i64 {
        let date = normalized_date(year, self.month, self.day);
        let candidate = resolve_local(&now.timezone(), date.and_time(now.time()));
        whole_days_between(now, &candidate)
    }

    pub fn schedule(&self) -> String {
        format!("every {} {}", self.month.name(), self.day)
    }
}
