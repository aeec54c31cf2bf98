use ledger_dns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Emitted once logging is up, since loading happens before it.
pub fn log_config_summary(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        backend = config.registry.backend.as_str(),
        ledger_suffix = %config.registry.ledger_suffix,
        doh_url = %config.recursive.doh_url,
        signer = config.registry.signer().is_some(),
        simulator = config.simulator.enabled,
        "Configuration loaded"
    );
}
