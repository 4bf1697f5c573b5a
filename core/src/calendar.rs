use chrono::{
    DateTime, Datelike, Days, Duration, Month, Months, NaiveDate, NaiveDateTime, TimeZone, Weekday,
};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "sun" | "sunday" => Some(Weekday::Sun),
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Accepts the full month name or its 3- or 4-letter prefix ("sep", "sept").
pub fn parse_month(s: &str) -> Option<Month> {
    let lower = s.to_lowercase();
    let month = match lower.get(..3)? {
        "jan" => Month::January,
        "feb" => Month::February,
        "mar" => Month::March,
        "apr" => Month::April,
        "may" => Month::May,
        "jun" => Month::June,
        "jul" => Month::July,
        "aug" => Month::August,
        "sep" => Month::September,
        "oct" => Month::October,
        "nov" => Month::November,
        "dec" => Month::December,
        _ => return None,
    };
    let full = month.name().to_lowercase();
    if (lower.len() <= 4 && full.starts_with(&lower)) || lower == full {
        Some(month)
    } else {
        None
    }
}

/// Number of days in the month containing `date`: first of the month,
/// forward one month, back one day.
pub fn days_in_month<D: Datelike>(date: &D) -> u32 {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days from `from` forward to the next `to`, in `0..=6`.
pub fn weekday_distance(from: Weekday, to: Weekday) -> i64 {
    (i64::from(to.num_days_from_sunday()) - i64::from(from.num_days_from_sunday())).rem_euclid(7)
}

/// Builds `year-month-day`, rolling days past the end of the month into the
/// following month (February 30 becomes March 2).
pub fn normalized_date(year: i32, month: Month, day: u32) -> NaiveDate {
    // years outside chrono's range saturate
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).unwrap_or(if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    });
    first
        .checked_add_days(Days::new(u64::from(day.saturating_sub(1))))
        .unwrap_or(first)
}

/// Resolves a wall-clock time in `tz`. Ambiguous times take the earlier
/// instant; times skipped by a DST jump move one hour forward.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// The given date at 12:00 in `tz`.
pub fn midday<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let noon = date.and_hms_opt(12, 0, 0).unwrap_or_else(|| date.and_time(Default::default()));
    resolve_local(tz, noon)
}

/// Whole days between two instants, floored on the unix-second difference.
pub fn whole_days_between<A: TimeZone, B: TimeZone>(from: &DateTime<A>, to: &DateTime<B>) -> i64 {
    (to.timestamp() - from.timestamp()).div_euclid(SECONDS_PER_DAY)
}
