mod commands;
mod logging;
mod progress;

use std::io;
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use dupe_report_core::config::{self, AppConfig};
use dupe_report_core::storage::{FilesystemStorages, StorageRegistry};
use dupe_report_core::{AnalysisEngine, OutboxNotifier};
use progress::CliReporter;
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {:#}", err);
            process::exit(1);
        }
    };

    let outcome = match args.command {
        Some(Commands::Analyse) => run_analyse(&config),
        Some(Commands::ListStorages) => run_list_storages(&config),
        Some(Commands::PrintConfig) => run_print_config(&config),
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = outcome {
        error!("Error: {:#}", err);
        process::exit(1);
    }
}

fn load_config(args: &Cli) -> anyhow::Result<AppConfig> {
    let config = match &args.config {
        Some(path) => config::load_configuration_from(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => config::load_configuration()?,
    };
    Ok(config)
}

fn run_analyse(config: &AppConfig) -> anyhow::Result<()> {
    let storages = FilesystemStorages::new(config.storages.clone());
    let notifier = OutboxNotifier::new(&config.report.outbox_dir)
        .with_sender(config.report.effective_sender().cloned());
    let reporter = CliReporter::new();

    let stdout = io::stdout();
    let mut console = stdout.lock();

    let result = AnalysisEngine::new(&storages, &storages, &notifier)
        .with_recipient(config.report.recipient.clone())
        .analyse(&mut console, &reporter)?;

    info!(
        "{} storages scanned, {} offline, {} failed, {} files in {:.2}s",
        result.storages_scanned,
        result.storages_offline,
        result.storages_failed,
        result.files_scanned,
        result.duration.as_secs_f64(),
    );
    info!(
        "{} duplicate groups, {} files with duplicates",
        result.duplicate_groups, result.duplicate_files,
    );

    Ok(())
}

fn run_list_storages(config: &AppConfig) -> anyhow::Result<()> {
    let storages = FilesystemStorages::new(config.storages.clone());
    for (info, storage) in storages.list_all_storages()?.iter().zip(&config.storages) {
        let status = if info.is_online {
            "online".green()
        } else {
            "offline".red()
        };
        println!(
            "{:>4}  {:<20} {:<8} {}",
            info.id,
            info.name,
            status,
            storage.root.display()
        );
    }
    Ok(())
}

fn run_print_config(config: &AppConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
