use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::Level;

use esp_cli::app::{ExitStatus, GameOptions, USAGE, run};
use esp_cli::logging::init_logging;

/// Two-player bluffing card game for the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "esp",
    author,
    version,
    about = "Entertaining Spice Pretending: a two-player bluffing card game"
)]
struct Cli {
    /// Deck file starting with the line `ESP`; results are appended to it.
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Shuffle the draw pile with this seed before dealing.
    #[arg(long, value_name = "SEED")]
    shuffle: Option<u64>,

    /// Also write the final standings as JSON to this file.
    #[arg(long, value_name = "FILE")]
    summary_json: Option<PathBuf>,

    /// Write structured JSON logs to this file instead of stderr.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: Level,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            println!("{USAGE}");
            return ExitStatus::WrongUsage.into();
        }
    };

    let _logging_guard = match init_logging(cli.log_file.as_deref(), cli.log_level) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    let options = GameOptions {
        config: cli.config,
        shuffle: cli.shuffle,
        summary_json: cli.summary_json,
    };
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    run(&options, &mut input, &mut out).into()
}
