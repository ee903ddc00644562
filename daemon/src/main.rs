//! Witness daemon: entry point for running the witnessing service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use witness_rpc::{RpcServer, RpcState};
use witness_service::{AnyNotifier, ServiceConfig, SubmissionOrchestrator};
use witness_store_lmdb::LmdbEnvironment;
use witness_types::SystemClock;
use witness_utils::{format_duration, init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "witness-daemon", about = "Witness code verification daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "WITNESS_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for record storage.
    #[arg(long, env = "WITNESS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Address the HTTP server binds to.
    #[arg(long, env = "WITNESS_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// HTTP server port.
    #[arg(long, env = "WITNESS_HTTP_PORT")]
    http_port: Option<u16>,

    /// Webhook receiving notifications. Notifications are only logged when unset.
    #[arg(long, env = "WITNESS_NOTIFY_URL")]
    notify_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "WITNESS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "WITNESS_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve the witnessing endpoints.
    Serve,
    /// Print the effective configuration as TOML.
    Config,
}

impl Cli {
    /// File settings (or defaults) with CLI/env overrides applied.
    fn resolve_config(&self) -> anyhow::Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_toml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ServiceConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(bind_address) = &self.bind_address {
            config.bind_address = bind_address.clone();
        }
        if let Some(port) = self.http_port {
            config.http_port = port;
        }
        if let Some(url) = &self.notify_url {
            config.notify_url = Some(url.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.log_format = LogFormat::parse(format)
                .with_context(|| format!("unknown log format {format:?}"))?;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        Command::Serve => serve(config).await,
    }
}

async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    init_logging(config.log_format, &config.log_level);

    let params = &config.witnessing;
    tracing::info!(
        code_ttl = %format_duration(params.code_ttl_secs),
        code_length = params.code_length,
        limiter_window = %format_duration(params.limiter_window_secs),
        limiter_refill = params.limiter_refill,
        limiter_capacity = params.limiter_capacity,
        "witnessing parameters"
    );

    let env = LmdbEnvironment::open(&config.data_dir, config.lmdb_map_size)
        .with_context(|| format!("opening storage at {}", config.data_dir.display()))?;
    tracing::info!("Opened storage at {}", config.data_dir.display());

    let notifier = AnyNotifier::from_url(config.notify_url.as_deref());
    match &notifier {
        AnyNotifier::Webhook(n) => tracing::info!("Sending notifications to {}", n.url()),
        AnyNotifier::Log(_) => tracing::info!("No notify_url set, notifications are logged only"),
    }

    let orchestrator = SubmissionOrchestrator::new(
        env.record_store(),
        env.certificate_provider_store(),
        notifier,
        config.witnessing.clone(),
    );
    let state = RpcState::new(orchestrator, Arc::new(SystemClock));

    let server = RpcServer::new(config.bind_address.clone(), config.http_port);
    server.start(state, shutdown_signal()).await?;

    tracing::info!("witness daemon exited cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
