//! The data synchronizer.

use std::collections::HashSet;

use mks_config::{HistoryErrorPolicy, LiveErrorPolicy, MksConfig};
use mks_core::{Expect, ParsedRecords, Record, SourceKind, merge, parse_records};
use mks_source::DrawSource;

use crate::{SyncError, SyncReport, store};

/// Progress notifications emitted while a run advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    LoadPersisted,
    FetchLive,
    FetchHistory { year: i32 },
    Persist,
}

type StepObserver<'a> = Box<dyn Fn(SyncStep) + Send + Sync + 'a>;

pub struct Synchronizer<'a, S> {
    source: &'a S,
    config: &'a MksConfig,
    current_year: i32,
    dry_run: bool,
    observer: Option<StepObserver<'a>>,
}

impl<'a, S: DrawSource> Synchronizer<'a, S> {
    /// `current_year` closes the history range when `history.end_year` is unset.
    #[must_use]
    pub const fn new(source: &'a S, config: &'a MksConfig, current_year: i32) -> Self {
        Self {
            source,
            config,
            current_year,
            dry_run: false,
            observer: None,
        }
    }

    /// Fetch and merge as usual but leave the data file alone.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn on_step(mut self, observer: impl Fn(SyncStep) + Send + Sync + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    fn notify(&self, step: SyncStep) {
        if let Some(observer) = &self.observer {
            observer(step);
        }
    }

    /// Run one synchronization.
    ///
    /// # Errors
    ///
    /// Any [`SyncError`]; on error the data file has not been replaced.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let path = self.config.storage.path.clone();
        let years = self.config.history.years(self.current_year)?;
        let mut report = SyncReport {
            path: path.clone(),
            ..SyncReport::default()
        };

        self.notify(SyncStep::LoadPersisted);
        let persisted = accept(
            SourceKind::Persisted,
            store::load_records(&path)?,
            &mut report,
        );
        report.persisted = persisted.len();
        tracing::info!(path = %path.display(), records = report.persisted, "loaded persisted state");

        self.notify(SyncStep::FetchLive);
        let live = match self.source.fetch_live().await {
            Ok(items) => accept(SourceKind::Live, parse_records(items), &mut report),
            Err(error) => match self.config.policy.on_live_error {
                LiveErrorPolicy::Abort => return Err(SyncError::LiveFetch(error)),
                LiveErrorPolicy::Skip => {
                    tracing::warn!(%error, "live fetch failed; continuing without live data");
                    report.live_skipped = true;
                    Vec::new()
                }
            },
        };
        report.live = live.len();
        tracing::info!(records = report.live, "fetched live data");

        let mut history = Vec::new();
        for year in years {
            self.notify(SyncStep::FetchHistory { year });
            match self.source.fetch_history(year).await {
                Ok(items) => {
                    let records = accept(SourceKind::History, parse_records(items), &mut report);
                    tracing::info!(year, records = records.len(), "fetched history year");
                    history.extend(records);
                    report.years_fetched.push(year);
                }
                Err(error) => match self.config.policy.on_history_year_error {
                    HistoryErrorPolicy::Abort => {
                        return Err(SyncError::HistoryFetch {
                            year,
                            source: error,
                        });
                    }
                    HistoryErrorPolicy::Skip => {
                        tracing::warn!(year, %error, "history fetch failed; skipping year");
                        report.years_skipped.push(year);
                    }
                },
            }
        }
        report.history = history.len();

        let known: HashSet<Expect> = persisted.iter().map(|r| r.expect().clone()).collect();
        let merged = merge(&self.config.merge.priority, live, history, persisted);
        report.total = merged.len();
        report.added = merged.iter().filter(|r| !known.contains(r.expect())).count();

        if self.dry_run {
            tracing::info!(total = report.total, "dry run; data file not written");
        } else {
            self.notify(SyncStep::Persist);
            store::persist(&path, &merged)?;
            report.written = true;
            tracing::info!(path = %path.display(), total = report.total, added = report.added, "data file updated");
        }

        Ok(report)
    }
}

fn accept(kind: SourceKind, parsed: ParsedRecords, report: &mut SyncReport) -> Vec<Record> {
    if parsed.skipped > 0 {
        tracing::warn!(source = %kind, skipped = parsed.skipped, "dropped items without an expect field");
        report.malformed += parsed.skipped;
    }
    parsed.records
}
