use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, TimeZone};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::model::task::Task;

/// Tasks keyed by how many days from now they are due.
pub type DayGroups = BTreeMap<i64, Vec<Task>>;

/// Buckets tasks from the loader channel by day offset, keeping only those
/// due between today and `horizon` days ahead.
pub struct Aggregator<Tz: TimeZone> {
    now: DateTime<Tz>,
    horizon: i64,
    groups: Arc<RwLock<DayGroups>>,
    handle: Option<JoinHandle<()>>,
}

impl<Tz> Aggregator<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    pub fn new(now: DateTime<Tz>, horizon: u32) -> Self {
        Self {
            now,
            horizon: i64::from(horizon),
            groups: Arc::new(RwLock::new(DayGroups::new())),
            handle: None,
        }
    }

    /// Spawns the consuming task. Receives until `done` fires, then drains
    /// whatever is still buffered in the channel.
    pub fn start(&mut self, mut rx: mpsc::Receiver<Task>, mut done: oneshot::Receiver<()>) {
        let now = self.now.clone();
        let horizon = self.horizon;
        let groups = Arc::clone(&self.groups);

        self.handle = Some(tokio::spawn(async move {
            loop {
                tokio::select! {
                    Some(task) = rx.recv() => add(&groups, &now, horizon, task),
                    _ = &mut done => {
                        while let Ok(task) = rx.try_recv() {
                            add(&groups, &now, horizon, task);
                        }
                        break;
                    }
                }
            }
            tracing::debug!("aggregator finished");
        }));
    }

    /// Waits for the consuming task to finish.
    pub async fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                tracing::error!("aggregator task failed: {err}");
            }
        }
    }

    pub fn add(&self, task: Task) {
        add(&self.groups, &self.now, self.horizon, task);
    }

    pub fn get_tasks(&self, day: i64) -> Vec<Task> {
        self.groups
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&day)
            .cloned()
            .unwrap_or_default()
    }

    pub fn tasks(&self) -> DayGroups {
        self.groups
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn add<Tz: TimeZone>(groups: &RwLock<DayGroups>, now: &DateTime<Tz>, horizon: i64, task: Task) {
    let days = task.days_from(now);
    if !(0..=horizon).contains(&days) {
        tracing::debug!(days, "dropping [{}] outside the horizon", task.text());
        return;
    }
    groups
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(days)
        .or_default()
        .push(task);
}
