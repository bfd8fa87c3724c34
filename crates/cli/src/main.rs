//! `pod-crypto` — command-line client for the PoD encryption service.
//!
//! Startup sequence:
//! 1. Parse flags and load [`Config`] from `POD_*` environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Run the requested command.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pod_codec::{encrypt_url, DataType, EncryptionClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, Overrides};

#[derive(Parser)]
#[command(name = "pod-crypto")]
#[command(about = "Encrypt values for PoD contracts through the PoD encryption service")]
#[command(version)]
struct Cli {
    /// Network name (testnet, mainnet) or encryption service base URL
    #[arg(long, global = true)]
    network: Option<String>,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt a plaintext value and print the encrypted JSON
    Encrypt {
        /// Plaintext type
        #[arg(short = 't', long = "type", default_value_t = DataType::default())]
        data_type: DataType,

        /// Plaintext: a decimal number, true/false, or text for the string type
        value: String,
    },
    /// Print the encrypt URL a network resolves to
    Endpoint {
        /// Network name or base URL; defaults to the configured network
        #[arg(id = "endpoint_network", value_name = "NETWORK")]
        network: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cli = Cli::parse();
    let cfg = Config::load(&Overrides {
        network: cli.network,
        log_level: cli.log_level,
        request_timeout_secs: cli.timeout,
    })
    .map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    init_tracing(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Command
    // -----------------------------------------------------------------------
    match cli.command {
        Command::Encrypt { data_type, value } => encrypt(&cfg, data_type, &value).await,
        Command::Endpoint { network } => {
            println!("{}", endpoint_url(network.as_deref(), &cfg));
            Ok(())
        }
    }
}

fn endpoint_url(network: Option<&str>, cfg: &Config) -> String {
    encrypt_url(network.unwrap_or(&cfg.network))
}

/// Log as JSON to stderr so stdout carries only the command result.
/// `RUST_LOG`, when set, replaces `log_level`.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install pod-crypto log subscriber: {e}"))
}

async fn encrypt(cfg: &Config, data_type: DataType, value: &str) -> Result<()> {
    let mut http = reqwest::Client::builder();
    if let Some(timeout) = cfg.request_timeout() {
        http = http.timeout(timeout);
    }
    let client = EncryptionClient::with_http_client(
        http.build().context("failed to build HTTP client")?,
    );

    info!(network = %cfg.network, %data_type, "encrypting value");
    let encrypted = client
        .encrypt(value, &cfg.network, data_type)
        .await
        .with_context(|| format!("failed to encrypt {data_type} value"))?;

    println!("{}", serde_json::to_string_pretty(&encrypted)?);
    Ok(())
}
