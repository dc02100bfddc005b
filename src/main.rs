use anyhow::Result;
use clap::Parser;
use diskwipe::settings::{Overrides, Settings};
use diskwipe::ui::progress::ProgressBar;
use diskwipe::{WipeConfiguration, WipeEngine, WipeError, WipeOrchestrator, WipeResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diskwipe")]
#[command(about = "Wipe a disk by overwriting every byte of the block device")]
#[command(version)]
struct Cli {
    /// Drive to wipe (e.g., /dev/sdb)
    #[arg(short, long)]
    drive: PathBuf,

    /// Write pseudo-random data instead of zeros
    #[arg(short, long)]
    randomize: bool,

    /// Number of full overwrite passes [default: 3]
    #[arg(short, long, allow_negative_numbers = true)]
    cycles: Option<i64>,

    /// Settings file (defaults to diskwipe.toml in the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Don't draw the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.debug) {
        eprintln!("Error: failed to set up logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = setup_signal_handlers() {
        eprintln!("Error: failed to install signal handlers: {:#}", e);
        return ExitCode::FAILURE;
    }

    if !is_root() {
        tracing::warn!("Not running as root; opening the device will likely fail");
    }

    match run(&cli) {
        Ok(total) => {
            println!("Wipe complete: {} bytes written", total);
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e),
    }
}

fn run(cli: &Cli) -> WipeResult<u64> {
    let config = build_configuration(cli)?;

    let mut engine = WipeEngine::new();
    if !cli.no_progress {
        let mut bar = ProgressBar::new(40);
        engine = engine.with_progress(move |progress| bar.update(progress));
    }

    WipeOrchestrator::new(&config).with_engine(engine).execute()
}

fn build_configuration(cli: &Cli) -> WipeResult<WipeConfiguration> {
    let settings = Settings::load(cli.config.as_deref())?;
    let overrides = Overrides {
        // the flag can only switch randomization on
        randomize: cli.randomize.then_some(true),
        cycles: cli.cycles,
    };
    settings.into_configuration(&cli.drive, &overrides)
}

/// Single top-level failure handler: message, partial progress, exit status
fn report_failure(err: &WipeError) -> ExitCode {
    tracing::error!(error = %err, "Wipe failed");
    eprintln!("Error: {}", err);
    eprintln!("{}", failure_note(err));

    ExitCode::from(err.exit_code() as u8)
}

/// What the failure means for the contents of the device
fn failure_note(err: &WipeError) -> String {
    match err {
        WipeError::Flush { .. } => {
            "Every pass was written, but the device did not confirm the data reached the medium."
                .to_string()
        }
        _ => match err.bytes_written() {
            Some(0) | None => "The device was not modified.".to_string(),
            Some(bytes) => format!(
                "The device is only partially wiped: {} bytes were overwritten before the failure.",
                bytes
            ),
        },
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

// Signal handler for graceful shutdown
fn setup_signal_handlers() -> Result<()> {
    use signal_hook::{
        consts::{SIGINT, SIGTERM},
        iterator::Signals,
    };

    let mut signals = Signals::new([SIGINT, SIGTERM])?;

    std::thread::spawn(move || {
        for sig in signals.forever() {
            if sig == SIGINT || sig == SIGTERM {
                eprintln!("\nInterrupt received, stopping after the current block...");
                diskwipe::set_interrupted();
            }
        }
    });

    Ok(())
}
