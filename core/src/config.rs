use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::task::TaskKind;

const CONFIG_DIR: &str = ".calendar-tasks";
const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
const LIST_SEPARATOR: char = ',';

/// What to do with a source file that yields no tasks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmptySourcePolicy {
    Error,
    #[default]
    Warn,
    Ignore,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub weekly: Vec<PathBuf>,
    pub monthly: Vec<PathBuf>,
    pub annual: Vec<PathBuf>,
    pub multi_date: Vec<PathBuf>,
    pub single: Vec<PathBuf>,
    pub empty_source: EmptySourcePolicy,
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weekly: Vec::new(),
            monthly: Vec::new(),
            annual: Vec::new(),
            multi_date: Vec::new(),
            single: Vec::new(),
            empty_source: EmptySourcePolicy::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    /// Reads `path`, or `~/.calendar-tasks/config.json` when it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let Some(default) = default_path() else {
                    return Ok(Self::default());
                };
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content =
            fs::read_to_string(&path).with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        if config.channel_capacity == 0 {
            return Err(anyhow!("channel_capacity in {} must be at least 1", path.display()));
        }
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Appends the comma-separated lists of `CALENDAR_TASKS_*_SOURCES`.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var_os(key));
    }

    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<OsString>,
    {
        for kind in TaskKind::ALL {
            if let Some(value) = lookup(env_key(kind)) {
                let paths = parse_list(&value.to_string_lossy());
                self.sources_mut(kind).extend(paths);
            }
        }
    }

    pub fn sources(&self, kind: TaskKind) -> &[PathBuf] {
        match kind {
            TaskKind::Weekly => &self.weekly,
            TaskKind::Monthly => &self.monthly,
            TaskKind::Annual => &self.annual,
            TaskKind::MultiDate => &self.multi_date,
            TaskKind::Single => &self.single,
        }
    }

    fn sources_mut(&mut self, kind: TaskKind) -> &mut Vec<PathBuf> {
        match kind {
            TaskKind::Weekly => &mut self.weekly,
            TaskKind::Monthly => &mut self.monthly,
            TaskKind::Annual => &mut self.annual,
            TaskKind::MultiDate => &mut self.multi_date,
            TaskKind::Single => &mut self.single,
        }
    }

    pub fn source_count(&self) -> usize {
        TaskKind::ALL.iter().map(|&kind| self.sources(kind).len()).sum()
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE_NAME))
}

pub fn env_key(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Weekly => "CALENDAR_TASKS_WEEKLY_SOURCES",
        TaskKind::Monthly => "CALENDAR_TASKS_MONTHLY_SOURCES",
        TaskKind::Annual => "CALENDAR_TASKS_ANNUAL_SOURCES",
        TaskKind::MultiDate => "CALENDAR_TASKS_MULTIDATE_SOURCES",
        TaskKind::Single => "CALENDAR_TASKS_SINGLE_SOURCES",
    }
}

fn parse_list(value: &str) -> Vec<PathBuf> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}
