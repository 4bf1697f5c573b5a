use chrono::{DateTime, Datelike, Month, NaiveTime, TimeZone};

use super::{parse_day, parse_month_name};
use crate::calendar::{is_leap_year, normalized_date, resolve_local};
use crate::error::DateParseError;
use crate::input::RawTask;
use crate::model::task::TaskKind;

const MONTH_SEPARATOR: char = '/';
const MAX_MONTHS: usize = 12;
const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub month: Month,
    pub day: u32,
}

/// A task recurring on the same day of several months, e.g.
/// `january/april/july/october 15`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiDate {
    dates: Vec<MonthDay>,
    text: String,
}

impl MultiDate {
    pub fn new(raw: &RawTask) -> Result<Self, DateParseError> {
        let parts: Vec<&str> = raw.date.split_whitespace().collect();
        let [months, day] = parts.as_slice() else {
            return Err(DateParseError::Malformed {
                kind: TaskKind::MultiDate,
                spec: raw.date.clone(),
            });
        };

        let day = parse_day(day)?;
        let names: Vec<&str> = months.split(MONTH_SEPARATOR).collect();
        if names.len() > MAX_MONTHS {
            return Err(DateParseError::TooManyMonths(raw.date.clone()));
        }

        let mut dates: Vec<MonthDay> = Vec::with_capacity(names.len());
        for name in names {
            let date = MonthDay {
                month: parse_month_name(name)?,
                day,
            };
            if !dates.contains(&date) {
                dates.push(date);
            }
        }

        Ok(Self {
            dates,
            text: raw.text.clone(),
        })
    }

    pub fn dates(&self) -> &[MonthDay] {
        &self.dates
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fractional days to the closest upcoming date (each taken at midnight),
    /// rounded up. A date earlier than today moves to the following year.
    pub fn days_from<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let year = now.year();
        let tz = now.timezone();

        let closest = self
            .dates
            .iter()
            .map(|md| {
                let date = normalized_date(year, md.month, md.day);
                let candidate = resolve_local(&tz, date.and_time(NaiveTime::MIN));
                let diff = candidate.signed_duration_since(now).num_milliseconds() as f64 / MILLIS_PER_DAY;
                if diff.ceil() < 0.0 {
                    diff + year_length_after(md.month, year) as f64
                } else {
                    diff
                }
            })
            .fold(f64::INFINITY, f64::min);

        closest.ceil() as i64
    }

    pub fn schedule(&self) -> String {
        let dates: Vec<String> = self
            .dates
            .iter()
            .map(|md| format!("{} {}", md.month.name(), md.day))
            .collect();
        format!("every {}", dates.join(", "))
    }
}

/// Days from a `month` date in `year` to the same date a year later: 366 when
/// a February 29 lies in between.
fn year_length_after(month: Month, year: i32) -> i64 {
    let leap_day_ahead = if month.number_from_month() <= 2 {
        is_leap_year(year)
    } else {
        is_leap_year(year + 1)
    };
    if leap_day_ahead {
        366
    } else {
        365
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn multi(dates: &[(Month, u32)]) -> MultiDate {
        MultiDate {
            dates: dates.iter().map(|&(month, day)| MonthDay { month, day }).collect(),
            text: String::new(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_days_from() {
        let now = at(2021, 8, 6, 0, 0, 0);
        assert_eq!(multi(&[(Month::August, 6)]).days_from(&now), 0, "same day with single date");
        assert_eq!(
            multi(&[(Month::August, 6), (Month::November, 6)]).days_from(&now),
            0,
            "same day with multiple dates"
        );
        assert_eq!(multi(&[(Month::August, 7)]).days_from(&now), 1, "next day with single date");
        assert_eq!(
            multi(&[(Month::August, 7), (Month::November, 7)]).days_from(&now),
            1,
            "next day with multiple dates"
        );
        assert_eq!(multi(&[(Month::August, 5)]).days_from(&now), 364, "previous day");
        assert_eq!(multi(&[(Month::September, 6)]).days_from(&now), 31, "next month single date");
        assert_eq!(
            multi(&[(Month::November, 6), (Month::September, 6)]).days_from(&now),
            31,
            "next month multiple dates"
        );
        assert_eq!(
            multi(&[(Month::August, 5), (Month::January, 1)]).days_from(&now),
            148,
            "all dates passed this year"
        );
    }

    #[test]
    fn test_days_from_wraps_over_leap_day() {
        assert_eq!(multi(&[(Month::August, 5)]).days_from(&at(2023, 8, 6, 0, 0, 0)), 365);
        assert_eq!(multi(&[(Month::January, 5)]).days_from(&at(2024, 1, 6, 0, 0, 0)), 365);
        assert_eq!(multi(&[(Month::February, 5)]).days_from(&at(2024, 2, 6, 0, 0, 0)), 365);
        assert_eq!(multi(&[(Month::February, 27)]).days_from(&at(2024, 2, 28, 0, 0, 0)), 365);
        assert_eq!(multi(&[(Month::February, 28)]).days_from(&at(2024, 2, 29, 0, 0, 0)), 365);
        assert_eq!(multi(&[(Month::January, 10)]).days_from(&at(2024, 3, 5, 0, 0, 0)), 311);
    }

    #[test]
    fn test_days_from_leap_day_target() {
        let leap_day = multi(&[(Month::February, 29)]);
        assert_eq!(leap_day.days_from(&at(2024, 2, 29, 0, 0, 0)), 0);
        assert_eq!(leap_day.days_from(&at(2024, 3, 1, 0, 0, 0)), 365);
    }

    #[test]
    fn test_days_from_time_of_day() {
        let task = multi(&[(Month::August, 15)]);
        assert_eq!(task.days_from(&at(2021, 8, 14, 18, 0, 0)), 1, "within 24 hours");
        assert_eq!(task.days_from(&at(2021, 8, 14, 23, 59, 59)), 1, "one second away from today");
        assert_eq!(task.days_from(&at(2021, 8, 15, 0, 0, 0)), 0, "exactly same time");
        assert_eq!(task.days_from(&at(2021, 8, 15, 12, 0, 0)), 0, "midday on the day");
    }

    #[test]
    fn test_new() {
        let task = MultiDate::new(&RawTask::new("april 1", "foo bar woo")).unwrap();
        assert_eq!(task.dates(), &[MonthDay { month: Month::April, day: 1 }]);
        assert_eq!(task.text(), "foo bar woo");

        let task = MultiDate::new(&RawTask::new("april/may 12", "foo bar woo")).unwrap();
        assert_eq!(
            task.dates(),
            &[
                MonthDay { month: Month::April, day: 12 },
                MonthDay { month: Month::May, day: 12 },
            ]
        );
        assert_eq!(task.schedule(), "every April 12, May 12");
    }

    #[test]
    fn test_new_multiple_months_unordered() {
        let task = MultiDate::new(&RawTask::new("april/may/january 15", "foo bar woo")).unwrap();
        let mut months: Vec<u32> = task.dates().iter().map(|md| md.month.number_from_month()).collect();
        months.sort();
        assert_eq!(months, vec![1, 4, 5]);
        assert!(task.dates().iter().all(|md| md.day == 15));
        assert_eq!(task.text(), "foo bar woo");
    }

    #[test]
    fn test_new_deduplicates_months() {
        let task = MultiDate::new(&RawTask::new("april/apr 3", "x")).unwrap();
        assert_eq!(task.dates().len(), 1);
    }

    #[test]
    fn test_new_errors() {
        for date in ["", "xxx", "april/xxx", "april/", "april/may", "april/may xxx", "april/may 32", "april/ 3"] {
            assert!(MultiDate::new(&RawTask::new(date, "x")).is_err(), "date {:?}", date);
        }

        let thirteen = "jan/feb/mar/apr/may/jun/jul/aug/sep/oct/nov/dec/jan 1";
        assert_eq!(
            MultiDate::new(&RawTask::new(thirteen, "x")),
            Err(DateParseError::TooManyMonths(thirteen.to_string()))
        );
    }
}
