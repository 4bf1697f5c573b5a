use chrono::{DateTime, Days, NaiveDate, TimeZone};
use tokio::sync::{mpsc, oneshot};

use crate::calendar::midday;
use crate::config::Config;
use crate::error::LoadError;
use crate::model::task::TaskKind;
use crate::repository::Loader;
use crate::service::aggregator::{Aggregator, DayGroups};

/// The range of days to show: `num_days` days after `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaWindow<Tz: TimeZone> {
    pub today: DateTime<Tz>,
    pub start: DateTime<Tz>,
    pub num_days: u32,
}

impl<Tz: TimeZone> AgendaWindow<Tz> {
    /// Anchored at midday so that whole-day steps never cross a daylight
    /// saving shift into a different date.
    pub fn new(date: NaiveDate, tz: &Tz, days: u32, back: u32) -> Self {
        let today = midday(date, tz);
        let start_date = date
            .checked_sub_days(Days::new(u64::from(back)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start: midday(start_date, tz),
            today,
            num_days: days.saturating_add(back),
        }
    }

    pub fn date_at(&self, offset: i64) -> NaiveDate {
        let start = self.start.date_naive();
        match u64::try_from(offset) {
            Ok(days) => start.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX),
            Err(_) => start
                .checked_sub_days(Days::new(offset.unsigned_abs()))
                .unwrap_or(NaiveDate::MIN),
        }
    }

    /// Offset of `start` relative to today, zero or negative.
    pub fn back(&self) -> i64 {
        (self.start.date_naive() - self.today.date_naive()).num_days()
    }
}

pub struct AgendaUseCase<'a> {
    config: &'a Config,
}

impl<'a> AgendaUseCase<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Loads every configured source and groups the tasks due within
    /// `horizon` days of `now`.
    pub async fn collect<Tz>(&self, now: DateTime<Tz>, horizon: u32) -> Result<DayGroups, LoadError>
    where
        Tz: TimeZone + Send + Sync + 'static,
        Tz::Offset: Send + Sync,
    {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let (done_tx, done_rx) = oneshot::channel();

        let mut aggregator = Aggregator::new(now, horizon);
        aggregator.start(rx, done_rx);

        let mut loader = Loader::new(tx, done_tx).with_empty_source(self.config.empty_source);
        for kind in TaskKind::ALL {
            loader.add_sources(kind, self.config.sources(kind));
        }
        tracing::debug!(sources = loader.source_count(), horizon, "loading tasks");

        let result = loader.start().await;
        aggregator.wait().await;
        result?;

        Ok(aggregator.tasks())
    }
}
