// FILE: crates/cli/src/main.rs

use animeradar_config::{Config, ConfigManager};
use animeradar_core::ErrorInfo;
use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;

mod commands;

fn build_cli() -> Command {
    Command::new("animeradar")
        .version(env!("CARGO_PKG_VERSION"))
        .author("AnimeRadar Team")
        .about("Resolve anime episodes and playable streams across providers")
        .arg(
            Arg::new("config-dir")
                .short('c')
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("episodes")
                .about("List an anime's episodes from the first provider that has them")
                .arg(Arg::new("id").required(true).value_name("ANIME_ID").help("Anime ID"))
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .value_name("N")
                        .help("Page number, starting at 1")
                        .value_parser(value_parser!(usize))
                        .default_value("1"),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Resolve validated streaming sources for an episode")
                .arg(Arg::new("id").required(true).value_name("EPISODE_ID").help("Episode ID")),
        )
        .subcommand(
            Command::new("providers")
                .about("List configured providers in priority order")
                .arg(
                    Arg::new("check")
                        .long("check")
                        .help("Check whether each provider answers")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .subcommand(Command::new("init").about("Write a default config file if none exists"))
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("validate").about("Validate the config file"))
                .subcommand(Command::new("path").about("Print the config file location")),
        )
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => ConfigManager::with_directory(dir.clone())
            .with_context(|| format!("Failed to use config directory {}", dir.display())),
        None => ConfigManager::new().context("Failed to resolve config directory"),
    }
}

fn init_logging(config: &Config) {
    let level = config.app.log_level.to_string();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;

    // config subcommands must work on a broken file, so they never load it up front
    if let Some(("config", sub_matches)) = matches.subcommand() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
        return commands::config(&manager, sub_matches);
    }

    let config = manager
        .load_with_env_overrides()
        .context("Failed to load configuration")?;
    init_logging(&config);

    let outcome = match matches.subcommand() {
        Some(("episodes", sub_matches)) => commands::episodes(&config, sub_matches).await,
        Some(("watch", sub_matches)) => commands::watch(&config, sub_matches).await,
        Some(("providers", sub_matches)) => commands::providers(&config, sub_matches).await,
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    };

    if let Err(err) = &outcome {
        if let Some(info) = err.downcast_ref::<ErrorInfo>() {
            commands::report_failure(info, config.app.pretty_output);
            std::process::exit(1);
        }
    }
    outcome
}
