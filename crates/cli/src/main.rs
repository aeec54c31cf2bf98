//! # Ledger DNS
//!
//! Hybrid resolver: names under the ledger suffix come from the on-chain
//! registry, everything else from recursive DNS-over-HTTPS.

mod bootstrap;
mod console;
mod di;
mod render;

use clap::{Parser, Subcommand};
use ledger_dns_domain::config::LedgerBackend;
use ledger_dns_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ledger-dns")]
#[command(version)]
#[command(about = "Hybrid resolver for ledger-registered and conventional domains")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Pseudo-TLD routed to the ledger registry
    #[arg(long, global = true)]
    ledger_suffix: Option<String>,

    /// Ledger binding: memory or json-rpc
    #[arg(long, global = true, value_parser = parse_backend)]
    backend: Option<LedgerBackend>,

    #[arg(long, global = true, env = "LEDGER_DNS_RPC_URL")]
    rpc_url: Option<String>,

    #[arg(long, global = true, env = "LEDGER_DNS_CONTRACT_ADDRESS")]
    contract_address: Option<String>,

    /// Identity mutations are signed with (memory backend)
    #[arg(long, global = true, env = "LEDGER_DNS_SIGNER")]
    signer: Option<String>,

    /// DNS-over-HTTPS JSON endpoint
    #[arg(long, global = true)]
    doh_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one or more domains and print the answers
    Resolve {
        #[arg(required = true)]
        domains: Vec<String>,

        /// Print each resolution as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Print the registry snapshot
    Snapshot,
    /// Run background jobs and an interactive console
    Run,
}

fn parse_backend(s: &str) -> Result<LedgerBackend, String> {
    LedgerBackend::parse(s).ok_or_else(|| format!("unknown backend '{s}' (memory, json-rpc)"))
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            backend: self.backend,
            ledger_suffix: self.ledger_suffix.clone(),
            rpc_url: self.rpc_url.clone(),
            contract_address: self.contract_address.clone(),
            signer: self.signer.clone(),
            doh_url: self.doh_url.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    bootstrap::log_config_summary(cli.config.as_deref(), &config);

    let services = di::Services::build(&config)?;

    if let Err(e) = services.connect.execute().await {
        error!(error = %e, "Registry connection failed");
        return Err(e.into());
    }

    match cli.command {
        Command::Resolve { domains, json } => {
            for domain in &domains {
                let resolution = services.resolve.execute(domain).await;
                match (resolution, json) {
                    (Ok(r), true) => println!(
                        "{}",
                        serde_json::json!({ "query": domain, "resolution": r })
                    ),
                    (Ok(r), false) => println!("{}", render::resolution(domain, r.as_ref())),
                    (Err(e), _) => println!("{domain}: error: {e}"),
                }
            }
        }
        Command::Snapshot => {
            let snapshot = services.context.snapshot().await;
            println!(
                "{}",
                render::snapshot(&snapshot, services.resolve.ledger_suffix())
            );
        }
        Command::Run => {
            let shutdown = CancellationToken::new();
            services.start_jobs(&config, shutdown.clone()).await;
            info!("Console ready");
            console::run(&services, shutdown).await?;
        }
    }

    info!("Shutting down");
    Ok(())
}
