use std::path::{Path, PathBuf};

use anyhow::Context;
use mks_config::MksConfig;
use mks_core::{Expect, Record};
use mks_sync::store;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::{self, Render};

/// Summary of the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub path: PathBuf,
    pub exists: bool,
    pub records: usize,
    pub malformed: usize,
    pub newest: Option<String>,
    pub oldest: Option<String>,
    pub latest_open_time: Option<String>,
    pub latest_open_code: Option<String>,
}

pub fn handle(config: &MksConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = summarize(&config.storage.path)?;
    output::print(&report, flags.format)
}

pub fn summarize(path: &Path) -> anyhow::Result<StatusReport> {
    let parsed = store::load_records(path)
        .with_context(|| format!("failed to read data file {}", path.display()))?;
    let by_order = |a: &&Record, b: &&Record| Expect::newest_first(a.expect(), b.expect());
    let newest = parsed.records.iter().min_by(by_order);
    let oldest = parsed.records.iter().max_by(by_order);

    Ok(StatusReport {
        path: path.to_path_buf(),
        exists: path.exists(),
        records: parsed.records.len(),
        malformed: parsed.skipped,
        newest: newest.map(|r| r.expect().to_string()),
        oldest: oldest.map(|r| r.expect().to_string()),
        latest_open_time: newest.and_then(|r| r.field_str("openTime")).map(str::to_string),
        latest_open_code: newest.and_then(|r| r.field_str("openCode")).map(str::to_string),
    })
}

impl Render for StatusReport {
    fn render_text(&self) -> String {
        if !self.exists {
            return format!("data file: {} (not created yet)\nrecords:   0", self.path.display());
        }
        let mut lines = vec![
            format!("data file: {}", self.path.display()),
            format!("records:   {}", self.records),
        ];
        if let (Some(newest), Some(oldest)) = (&self.newest, &self.oldest) {
            lines.push(format!("range:     {oldest} .. {newest}"));
        }
        if let Some(time) = &self.latest_open_time {
            lines.push(format!("latest:    {time}"));
        }
        if let Some(code) = &self.latest_open_code {
            lines.push(format!("numbers:   {code}"));
        }
        if self.malformed > 0 {
            lines.push(format!("malformed: {} items without expect", self.malformed));
        }
        lines.join("\n")
    }
}
