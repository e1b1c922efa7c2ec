mod cli;

use mkvstrip::config::{self, Config, RunOptions};
use mkvstrip::processor::{Processor, RunSummary};
use mkvstrip::scanner::ScanTarget;
use mkvstrip_av::{Mkvmerge, Muxer};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;

/// Exit code used when the user interrupts the run.
const INTERRUPTED_EXIT_CODE: i32 = 130;

fn run_options(cli: &Cli) -> RunOptions {
    RunOptions {
        mkvmerge_bin: cli.mkvmerge_bin.clone(),
        languages: cli.language.clone(),
        subs_languages: cli.subs_language.clone(),
        no_subtitles: cli.no_subtitles,
        remove_commentary: cli.remove_commentary,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
        recurse: cli.recurse,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mkvstrip=debug,mkvstrip_av=debug".to_string()
        } else {
            "mkvstrip=info,mkvstrip_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Partial .tmp outputs of an interrupted remux are left behind
    ctrlc::set_handler(|| std::process::exit(INTERRUPTED_EXIT_CODE))
        .context("Failed to install interrupt handler")?;

    let file_config = config::load_config_or_default(cli.config.as_deref())?;
    let config = Config::merge(file_config, run_options(&cli));

    let mkvmerge = Mkvmerge::discover(Some(config.mkvmerge_bin.as_path()))?;
    tracing::debug!(
        "Using {} at {} ({})",
        mkvmerge.name(),
        mkvmerge.bin().display(),
        mkvmerge.version().unwrap_or_else(|| "unknown version".to_string())
    );

    // Every path is validated before any file is touched
    let targets = cli
        .paths
        .iter()
        .map(|path| ScanTarget::new(path))
        .collect::<Result<Vec<_>, _>>()?;

    println!("Searching for MKV files to process.");
    println!("Warning: This may take some time...");

    let processor = Processor::new(&config, &mkvmerge);
    let mut summary = RunSummary::default();
    for target in &targets {
        processor.process_target(target, &mut summary);
    }

    tracing::info!(
        "Done: {} files, {} remuxed, {} planned, {} unchanged, {} failed, {} bytes saved",
        summary.processed(),
        summary.remuxed,
        summary.planned,
        summary.skipped,
        summary.failed,
        summary.bytes_saved
    );

    Ok(())
}
