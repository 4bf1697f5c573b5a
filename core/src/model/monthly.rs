use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

use super::parse_day;
use crate::calendar::days_in_month;
use crate::error::DateParseError;
use crate::input::RawTask;

/// A task due on the same day of every month.
#[derive(Debug, Clone, PartialEq)]
pub struct Monthly {
    day: u32,
    text: String,
}

impl Monthly {
    pub fn new(raw: &RawTask) -> Result<Self, DateParseError> {
        Ok(Self {
            day: parse_day(&raw.date)?,
            text: raw.text.clone(),
        })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn days_from<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let today = now.date_naive();
        let day = i64::from(self.day);
        let now_day = i64::from(today.day());

        // The task day overflowed last month (the 30th after a 28-day
        // February) and is still due in the first days of this one.
        let previous = i64::from(days_in_month(&previous_month(today)));
        if previous < day {
            let diff = day - (now_day + previous);
            if diff >= 0 {
                return diff;
            }
        }

        let diff = day - now_day;
        if diff >= 0 {
            diff
        } else {
            diff + i64::from(days_in_month(&today))
        }
    }

    pub fn schedule(&self) -> String {
        format!("day {} of every month", self.day)
    }
}

fn previous_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn days(day: u32, y: i32, m: u32, d: u32) -> i64 {
        let task = Monthly {
            day,
            text: String::new(),
        };
        task.days_from(&Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_days_from() {
        assert_eq!(days(6, 2021, 8, 6), 0, "same day");
        assert_eq!(days(7, 2021, 8, 6), 1, "next day");
        assert_eq!(days(11, 2021, 8, 6), 5, "five days from now");
        assert_eq!(days(5, 2021, 8, 6), 30, "previous day for month with 31 days");
        assert_eq!(days(1, 2021, 8, 6), 26, "five days before for month with 31 days");
        assert_eq!(days(5, 2021, 6, 6), 29, "previous day for month with 30 days");
        assert_eq!(days(5, 2021, 2, 6), 27, "previous day for February");
        assert_eq!(days(5, 2024, 2, 6), 28, "previous day for February leap year");
    }

    #[test]
    fn test_days_from_month_end_overflow() {
        assert_eq!(days(30, 2021, 2, 20), 10, "scheduled for 30th in February");
        assert_eq!(days(30, 2021, 3, 1), 1, "30th rolled over to March");
        assert_eq!(days(30, 2024, 3, 1), 0, "30th rolled over to March in leap year");
        assert_eq!(days(29, 2024, 3, 1), 28, "29th rolled over to March in leap year");
        assert_eq!(days(31, 2021, 10, 1), 0, "31st rolled over to October");
        assert_eq!(days(31, 2021, 3, 2), 1, "31st two days into March");
        assert_eq!(days(31, 2021, 3, 31), 0, "31st on the 31st");
    }

    #[test]
    fn test_days_from_year_boundary() {
        assert_eq!(days(2, 2021, 12, 31), 2);
        assert_eq!(days(31, 2022, 1, 1), 30);
    }

    #[test]
    fn test_new() {
        let task = Monthly::new(&RawTask::new("12", "foo bar woo")).unwrap();
        assert_eq!(task.day(), 12);
        assert_eq!(task.text(), "foo bar woo");
        assert_eq!(task.schedule(), "day 12 of every month");
    }

    #[test]
    fn test_new_errors() {
        for date in ["", "not a number", "0", "-1", "32", "1.5"] {
            assert_eq!(
                Monthly::new(&RawTask::new(date, "x")),
                Err(DateParseError::InvalidDay(date.to_string())),
                "date {:?}",
                date
            );
        }
    }
}
