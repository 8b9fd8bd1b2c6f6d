use serde::Serialize;

use crate::cli::OutputFormat;

/// Human-readable form of a command result.
pub trait Render {
    fn render_text(&self) -> String;
}

/// Print a command result to stdout in the requested format.
pub fn print<T: Serialize + Render>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", value.render_text()),
    }
    Ok(())
}
