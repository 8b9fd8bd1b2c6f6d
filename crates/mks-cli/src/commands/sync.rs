use anyhow::Context;
use mks_config::MksConfig;
use mks_source::HttpDrawSource;
use mks_sync::{SyncReport, SyncStep, Synchronizer};

use crate::cli::{GlobalFlags, SyncArgs};
use crate::output::{self, Render};
use crate::progress::Progress;

pub async fn handle(
    args: &SyncArgs,
    config: &MksConfig,
    flags: &GlobalFlags,
    current_year: i32,
) -> anyhow::Result<()> {
    let source = HttpDrawSource::new(config.sources.clone())
        .context("failed to build HTTP client")?;

    let progress = Progress::spinner("Loading data file...", flags);
    let result = Synchronizer::new(&source, config, current_year)
        .dry_run(args.dry_run)
        .on_step(|step| progress.set_message(&step_message(step)))
        .run()
        .await;

    match result {
        Ok(report) => {
            progress.finish_clear();
            output::print(&report, flags.format)
        }
        Err(error) => {
            progress.finish_err("sync failed");
            Err(error).context("synchronization aborted; data file left unchanged")
        }
    }
}

fn step_message(step: SyncStep) -> String {
    match step {
        SyncStep::LoadPersisted => "Loading data file...".to_string(),
        SyncStep::FetchLive => "Fetching live draws...".to_string(),
        SyncStep::FetchHistory { year } => format!("Fetching {year} history..."),
        SyncStep::Persist => "Writing data file...".to_string(),
    }
}

impl Render for SyncReport {
    fn render_text(&self) -> String {
        let mut lines = vec![
            format!("data file: {}", self.path.display()),
            format!(
                "sources:   live {}{} | history {} | persisted {}",
                self.live,
                if self.live_skipped { " (skipped)" } else { "" },
                self.history,
                self.persisted
            ),
        ];
        if !self.years_fetched.is_empty() {
            lines.push(format!("years:     {}", join_years(&self.years_fetched)));
        }
        if !self.years_skipped.is_empty() {
            lines.push(format!("skipped:   {}", join_years(&self.years_skipped)));
        }
        if self.malformed > 0 {
            lines.push(format!("malformed: {} dropped", self.malformed));
        }
        lines.push(format!(
            "total:     {} records ({} new){}",
            self.total,
            self.added,
            if self.written { "" } else { ", dry run, not written" }
        ));
        lines.join("\n")
    }
}

fn join_years(years: &[i32]) -> String {
    years
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
