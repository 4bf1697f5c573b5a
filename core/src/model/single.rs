use chrono::{DateTime, NaiveDate, TimeZone};

use super::{parse_day, parse_month_name};
use crate::calendar::{normalized_date, resolve_local, whole_days_between};
use crate::error::DateParseError;
use crate::input::RawTask;
use crate::model::task::TaskKind;

const MAX_YEAR: i32 = 9999;

/// A one-time task on an absolute date.
#[derive(Debug, Clone, PartialEq)]
pub struct Single {
    date: NaiveDate,
    text: String,
}

impl Single {
    pub fn new(raw: &RawTask) -> Result<Self, DateParseError> {
        let parts: Vec<&str> = raw.date.split_whitespace().collect();
        let [month, day, year] = parts.as_slice() else {
            return Err(DateParseError::Malformed {
                kind: TaskKind::Single,
                spec: raw.date.clone(),
            });
        };

        let month = parse_month_name(month)?;
        let day = parse_day(day)?;
        let year = match year.parse::<i32>() {
            Ok(year) if (0..=MAX_YEAR).contains(&year) => year,
            _ => return Err(DateParseError::InvalidYear(year.to_string())),
        };

        Ok(Self {
            date: normalized_date(year, month, day),
            text: raw.text.clone(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Absolute offset to the date: negative once it has passed.
    pub fn days_from<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let candidate = resolve_local(&now.timezone(), self.date.and_time(now.time()));
        whole_days_between(now, &candidate)
    }

    pub fn schedule(&self) -> String {
        self.date.format("%B %-d %Y").to_string()
    }
}
