use anyhow::Context;
use mks_config::MksConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, and check it against `current_year`.
pub fn load_config(flags: &GlobalFlags, current_year: i32) -> anyhow::Result<MksConfig> {
    let config = MksConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load mks configuration")?;
    config
        .validate(current_year)
        .context("invalid mks configuration")?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
