pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use anyhow::Context;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;

/// Runs the commands that work without a loaded config: `init` and help.
pub fn run_without_config(cli: &Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Init) => init_config_file(),
        _ => print_help(),
    }
}

pub async fn run(cli: Cli, config: Config, source: Option<&Path>) -> anyhow::Result<()> {
    config.validate()?;

    let serving = matches!(cli.command, Some(Commands::Serve));

    let prometheus_handle = if serving && config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    init_tracing(&config)?;

    match source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    match cli.command {
        Some(Commands::Serve) => cli::cmd_serve(&config, prometheus_handle).await,

        Some(Commands::Lookup {
            station,
            line,
            contains,
            kind,
        }) => {
            cli::cmd_lookup(
                &config,
                &station,
                &line,
                Commands::line_match(contains),
                &kind,
            )
            .await
        }

        Some(Commands::Recent) => cli::cmd_recent(&config).await,

        Some(Commands::Stations) => cli::cmd_stations(&config).await,

        Some(Commands::InitSchema) => cli::cmd_init_schema(&config).await,

        Some(Commands::Init) | None => run_without_config(&cli),
    }
}

fn init_config_file() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml");
    } else {
        println!("config.toml already exists");
    }
    Ok(())
}

fn print_help() -> anyhow::Result<()> {
    use clap::CommandFactory;
    Cli::command().print_help()?;
    Ok(())
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "subway-facility")?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    Ok(())
}

