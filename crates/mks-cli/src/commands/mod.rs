pub mod status;
pub mod sync;

use mks_config::MksConfig;

use crate::cli::{Commands, GlobalFlags};

pub async fn dispatch(
    command: Commands,
    config: &MksConfig,
    flags: &GlobalFlags,
    current_year: i32,
) -> anyhow::Result<()> {
    match command {
        Commands::Sync(args) => sync::handle(&args, config, flags, current_year).await,
        Commands::Status => status::handle(config, flags),
    }
}
