//! ina-ripper CLI
//!
//! Command-line interface for consolidating archive catalog records and
//! matching them to media on the video platform.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;

pub(crate) use error::CliError;

use cli_types::{Cli, Commands, ConfigAction};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let global = commands::GlobalArgs {
        database: cli.database,
        yes: cli.yes,
        collections: cli.collections,
    };

    let result = match cli.command {
        Commands::Clean => commands::clean::run_clean(&global),
        Commands::Enrich {
            candidates,
            credits,
            append,
            delay,
            max_candidates,
        } => commands::enrich::run_enrich(
            &global,
            commands::enrich::EnrichArgs {
                candidates,
                credits,
                append,
                delay,
                max_candidates,
            },
        ),
        Commands::Select => commands::select::run_select(&global),
        Commands::Plan => commands::plan::run_plan(&global),
        Commands::Stats => commands::stats::run_stats(&global),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&global),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Install the logger. `RUST_LOG` overrides the level picked by the flags.
///
/// Info messages are the command's normal output and print bare; other
/// levels carry a prefix, and verbose mode adds timestamps.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env)
        .format(move |buf, record| {
            if verbose {
                writeln!(
                    buf,
                    "{} {:<5} {}",
                    buf.timestamp_seconds(),
                    record.level(),
                    record.args()
                )
            } else if record.level() == log::Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "{}: {}", record.level().as_str().to_lowercase(), record.args())
            }
        })
        .init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
