use chrono::{DateTime, Datelike, TimeZone, Weekday};

use crate::calendar::{parse_weekday, weekday_distance, weekday_name};
use crate::error::DateParseError;
use crate::input::RawTask;

/// A task due on the same weekday every week.
#[derive(Debug, Clone, PartialEq)]
pub struct Weekly {
    weekday: Weekday,
    text: String,
}

impl Weekly {
    pub fn new(raw: &RawTask) -> Result<Self, DateParseError> {
        let weekday =
            parse_weekday(&raw.date).ok_or_else(|| DateParseError::InvalidWeekday(raw.date.clone()))?;

        Ok(Self {
            weekday,
            text: raw.text.clone(),
        })
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn days_from<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        weekday_distance(now.weekday(), self.weekday)
    }

    pub fn schedule(&self) -> String {
        format!("every {}", weekday_name(self.weekday))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn weekly(weekday: Weekday) -> Weekly {
        Weekly {
            weekday,
            text: String::new(),
        }
    }

    #[test]
    fn test_days_from() {
        // 2021-08-06 is a Friday
        let now = Utc.with_ymd_and_hms(2021, 8, 6, 0, 0, 0).unwrap();

        assert_eq!(weekly(Weekday::Fri).days_from(&now), 0);
        assert_eq!(weekly(Weekday::Sat).days_from(&now), 1);
        assert_eq!(weekly(Weekday::Wed).days_from(&now), 5);
        assert_eq!(weekly(Weekday::Thu).days_from(&now), 6);
    }

    #[test]
    fn test_days_from_ignores_time_of_day() {
        let late = Utc.with_ymd_and_hms(2021, 8, 6, 23, 59, 59).unwrap();
        assert_eq!(weekly(Weekday::Fri).days_from(&late), 0);
        assert_eq!(weekly(Weekday::Sat).days_from(&late), 1);
    }

    #[test]
    fn test_new() {
        let task = Weekly::new(&RawTask::new("Monday", "foo bar woo")).unwrap();
        assert_eq!(task.weekday(), Weekday::Mon);
        assert_eq!(task.text(), "foo bar woo");
        assert_eq!(task.schedule(), "every Monday");

        let task = Weekly::new(&RawTask::new("sat", "cook")).unwrap();
        assert_eq!(task.weekday(), Weekday::Sat);
    }

    #[test]
    fn test_new_errors() {
        assert_eq!(
            Weekly::new(&RawTask::default()),
            Err(DateParseError::InvalidWeekday(String::new()))
        );
        assert!(Weekly::new(&RawTask::new("funday", "x")).is_err());
        assert!(Weekly::new(&RawTask::new("15", "x")).is_err());
    }
}
