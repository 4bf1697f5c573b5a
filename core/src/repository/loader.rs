use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::EmptySourcePolicy;
use crate::error::LoadError;
use crate::input::{parse_line, split_line};
use crate::model::task::{Task, TaskKind};

/// Reads task source files, one worker per task kind, and publishes every
/// parsed task on a shared channel.
pub struct Loader {
    sources: BTreeMap<TaskKind, Vec<PathBuf>>,
    tx: mpsc::Sender<Task>,
    done: oneshot::Sender<()>,
    empty_source: EmptySourcePolicy,
}

impl Loader {
    pub fn new(tx: mpsc::Sender<Task>, done: oneshot::Sender<()>) -> Self {
        Self {
            sources: BTreeMap::new(),
            tx,
            done,
            empty_source: EmptySourcePolicy::default(),
        }
    }

    pub fn with_empty_source(mut self, policy: EmptySourcePolicy) -> Self {
        self.empty_source = policy;
        self
    }

    pub fn add_sources<I, P>(&mut self, kind: TaskKind, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources
            .entry(kind)
            .or_default()
            .extend(paths.into_iter().map(Into::into));
    }

    pub fn source_count(&self) -> usize {
        self.sources.values().map(Vec::len).sum()
    }

    /// Runs every worker to completion. The first error cancels the others
    /// and is returned once all of them have stopped. The done signal fires
    /// exactly once on every path out of here.
    pub async fn start(self) -> Result<(), LoadError> {
        let Loader {
            mut sources,
            tx,
            done,
            empty_source,
        } = self;
        let _done = DoneSignal(Some(done));

        let cancel = CancellationToken::new();
        let mut workers = JoinSet::new();
        for kind in TaskKind::ALL {
            let worker = Worker {
                kind,
                files: sources.remove(&kind).unwrap_or_default(),
                tx: tx.clone(),
                cancel: cancel.clone(),
                empty_source,
            };
            workers.spawn(worker.run());
        }
        drop(tx);

        let mut first_error = None;
        while let Some(joined) = workers.join_next().await {
            let result = joined.unwrap_or_else(|err| Err(LoadError::Worker(err.to_string())));
            if let Err(err) = result {
                if !cancel.is_cancelled() {
                    tracing::debug!("cancelling remaining workers after: {err}");
                    cancel.cancel();
                }
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct DoneSignal(Option<oneshot::Sender<()>>);

impl Drop for DoneSignal {
    fn drop(&mut self) {
        if let Some(done) = self.0.take() {
            // The consumer may already be gone.
            let _ = done.send(());
        }
    }
}

struct Worker {
    kind: TaskKind,
    files: Vec<PathBuf>,
    tx: mpsc::Sender<Task>,
    cancel: CancellationToken,
    empty_source: EmptySourcePolicy,
}

impl Worker {
    async fn run(self) -> Result<(), LoadError> {
        for path in &self.files {
            if self.cancel.is_cancelled() {
                break;
            }
            self.load_file(path).await?;
        }
        Ok(())
    }

    async fn load_file(&self, path: &Path) -> Result<(), LoadError> {
        let file = File::open(path).await.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let count = self.scan(path, BufReader::new(file)).await?;
        if self.cancel.is_cancelled() {
            return Ok(());
        }
        tracing::debug!(kind = %self.kind, tasks = count, "loaded {}", path.display());

        if count == 0 {
            match self.empty_source {
                EmptySourcePolicy::Error => {
                    return Err(LoadError::EmptySource {
                        path: path.to_path_buf(),
                    })
                }
                EmptySourcePolicy::Warn => {
                    tracing::warn!(kind = %self.kind, "no tasks found in {}", path.display())
                }
                EmptySourcePolicy::Ignore => {
                    tracing::debug!(kind = %self.kind, "no tasks found in {}", path.display())
                }
            }
        }
        Ok(())
    }

    /// Sends one task per date of every non-blank line, returning how many
    /// were sent. Stops early, without error, once cancelled.
    async fn scan<R>(&self, path: &Path, reader: R) -> Result<usize, LoadError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut line_no = 0;
        let mut count = 0;

        loop {
            let next = tokio::select! {
                () = self.cancel.cancelled() => {
                    tracing::debug!(kind = %self.kind, "cancelled while reading {}", path.display());
                    return Ok(count);
                }
                next = lines.next_line() => next,
            };
            let line = match next {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(source) => {
                    return Err(LoadError::Io {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            };
            line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            let raws = if self.kind.expands_date_list() {
                parse_line(&line)
            } else {
                split_line(&line).map(|raw| vec![raw])
            }
            .map_err(|source| LoadError::MalformedLine {
                path: path.to_path_buf(),
                line: line_no,
                source,
            })?;

            for raw in &raws {
                let task = self.kind.build(raw).map_err(|source| LoadError::DateParse {
                    path: path.to_path_buf(),
                    line: line_no,
                    source,
                })?;

                tokio::select! {
                    () = self.cancel.cancelled() => return Ok(count),
                    sent = self.tx.send(task) => sent.map_err(|_| LoadError::ChannelClosed)?,
                }
                count += 1;
            }
        }

        Ok(count)
    }
}
