use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use esp_core::game::engine::GameEnd;
use esp_core::model::score::Standings;
use serde::Serialize;
use tracing::{info, warn};

pub const WRITE_WARNING: &str = "Warning: Results not written to file!";

/// Appends the final standings block to the results file.
pub fn append_results(path: &Path, standings: &Standings) -> io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    write!(file, "{standings}")?;
    file.flush()?;
    info!(target: "esp_cli::results", path = %path.display(), "results appended");
    Ok(())
}

/// Same as [`append_results`], but a failure only produces the player-facing
/// warning on `out`.
pub fn append_results_or_warn<W: Write>(
    path: &Path,
    standings: &Standings,
    out: &mut W,
) -> io::Result<bool> {
    match append_results(path, standings) {
        Ok(()) => Ok(true),
        Err(err) => {
            warn!(target: "esp_cli::results", path = %path.display(), error = %err, "results not written");
            writeln!(out, "{WRITE_WARNING}")?;
            Ok(false)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameSummary<'a> {
    pub reason: GameEnd,
    #[serde(flatten)]
    pub standings: &'a Standings,
}

pub fn write_summary_json(path: &Path, summary: &GameSummary<'_>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating summary file at {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)
        .with_context(|| format!("writing summary to {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
