// FILE: crates/cli/src/commands.rs

use animeradar_config::{Config, ConfigManager};
use animeradar_core::ErrorInfo;
use animeradar_network::{Client, ClientConfig, ConnectivityChecker, HostStatus};
use animeradar_providers::ProviderManager;
use animeradar_resilience::CancellationToken;
use anyhow::{Context, Result};
use clap::ArgMatches;
use console::style;
use serde::Serialize;

/// Print one page of episodes
pub async fn episodes(config: &Config, matches: &ArgMatches) -> Result<()> {
    let anime_id = matches
        .get_one::<String>("id")
        .ok_or_else(|| anyhow::anyhow!("Anime ID is required"))?;
    let page = matches.get_one::<usize>("page").copied().unwrap_or(1);

    let manager = provider_manager(config)?;
    let token = cancel_on_ctrl_c();
    let page = manager
        .get_episodes_cancellable(anime_id, page, &token)
        .await?;

    println!("{}", render_json(&page, config.app.pretty_output)?);
    Ok(())
}

/// Print validated streaming sources for an episode
pub async fn watch(config: &Config, matches: &ArgMatches) -> Result<()> {
    let episode_id = matches
        .get_one::<String>("id")
        .ok_or_else(|| anyhow::anyhow!("Episode ID is required"))?;

    let manager = provider_manager(config)?;
    let token = cancel_on_ctrl_c();
    let data = manager
        .get_streaming_sources_cancellable(episode_id, &token)
        .await?;

    println!("{}", render_json(&data, config.app.pretty_output)?);
    Ok(())
}

/// List providers in priority order, optionally checking reachability
pub async fn providers(config: &Config, matches: &ArgMatches) -> Result<()> {
    let manager = provider_manager(config)?;
    let metadata = manager.metadata();

    if metadata.is_empty() {
        println!("No known providers configured. Check [streaming] providers in the config.");
        return Ok(());
    }

    println!("\n{} Providers", style(metadata.len()).bold().cyan());
    println!("{}", "=".repeat(80));

    if !matches.get_flag("check") {
        for (rank, provider) in metadata.iter().enumerate() {
            println!(
                "{}. {} - {}",
                rank + 1,
                style(&provider.name).bold(),
                provider.description
            );
            println!("   {}", provider.base_url);
        }
        return Ok(());
    }

    let client = http_client(config)?;
    let checker = ConnectivityChecker::new(client).with_timeout(config.streaming.probe_timeout());
    let hosts: Vec<(String, String)> = metadata
        .iter()
        .map(|p| (p.name.clone(), p.base_url.clone()))
        .collect();

    for (rank, status) in checker.check_all(&hosts).await.iter().enumerate() {
        println!("{}. {}", rank + 1, format_host_status(status));
    }
    Ok(())
}

/// Handle `config init|show|validate|path`
pub fn config(manager: &ConfigManager, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("init", _)) => {
            let created = manager
                .initialize()
                .context("Failed to write default config")?;
            if created {
                println!(
                    "{} Config written to {}",
                    style("✓").green().bold(),
                    manager.config_path().display()
                );
            } else {
                println!(
                    "Config already exists at {}",
                    manager.config_path().display()
                );
            }
        }
        Some(("show", _)) => {
            let config = manager
                .load_with_env_overrides()
                .context("Failed to load configuration")?;
            let text = toml::to_string_pretty(&config).context("Failed to render configuration")?;
            println!("{}", text);
        }
        Some(("validate", _)) => {
            let problems = manager.validate().context("Failed to read configuration")?;
            if problems.is_empty() {
                println!("{} Configuration is valid", style("✓").green().bold());
            } else {
                println!(
                    "{} {} problem(s) in {}",
                    style("✗").red().bold(),
                    problems.len(),
                    manager.config_path().display()
                );
                for problem in &problems {
                    println!("  - {}", problem);
                }
                anyhow::bail!("Configuration is invalid");
            }
        }
        Some(("path", _)) => println!("{}", manager.config_path().display()),
        _ => anyhow::bail!("Unknown config action"),
    }
    Ok(())
}

/// Print a resolution failure: the JSON envelope, then the user-facing text
pub fn report_failure(error: &ErrorInfo, pretty: bool) {
    eprintln!("{}", error_envelope(error, pretty));
    eprintln!("{} {}", style("✗").red().bold(), error.user_message());
}

fn provider_manager(config: &Config) -> Result<ProviderManager> {
    ProviderManager::from_config(config).context("Failed to set up providers")
}

/// HTTP client carrying the configured identity and request timeout
fn http_client(config: &Config) -> Result<Client> {
    Client::with_config(ClientConfig {
        timeout: config.streaming.request_timeout(),
        user_agent: config.app.user_agent.clone(),
        ..ClientConfig::default()
    })
    .context("Failed to build HTTP client")
}

/// A token cancelled by the first Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let handle = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Interrupted, cancelling request");
            handle.cancel();
        }
    });
    token
}

fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("Failed to serialize output")
}

fn error_envelope(error: &ErrorInfo, pretty: bool) -> String {
    render_json(error, pretty).unwrap_or_else(|_| error.to_string())
}

fn format_host_status(status: &HostStatus) -> String {
    match status.status {
        Some(code) => format!(
            "{} {} ({}, {} ms)",
            style("●").green(),
            status.name,
            code,
            status.latency.as_millis()
        ),
        None => format!(
            "{} {} unreachable at {}",
            style("●").red(),
            status.name,
            status.url
        ),
    }
}
