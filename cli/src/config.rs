use anyhow::Context as _;
use simjudge_core::config::{Config, Overrides};

use crate::{cmd::GlobalArgs, util};

pub const ENV_PREFIX: &str = "SIMJUDGE_";

/// `SIMJUDGE_DATA_DIR`, `SIMJUDGE_SOURCE`, `SIMJUDGE_COMPILER`, `SIMJUDGE_TIME_LIMIT_MS`
pub fn env_overrides() -> anyhow::Result<Overrides> {
    envy::prefixed(ENV_PREFIX)
        .from_env::<Overrides>()
        .with_context(|| format!("Invalid {}* environment variable", ENV_PREFIX))
}

/// Explicit `--config`, else the nearest config file, else the built-in one;
/// then environment overrides, then `args` on top.
pub fn load(global_args: &GlobalArgs, args: Overrides) -> anyhow::Result<Config> {
    let cfg = match &global_args.config {
        Some(path) => Config::from_toml_file(path.clone())?,
        None => Config::from_file_finding_in_ancestors_or_builtin(util::current_dir())?,
    };
    if let Some(path) = &cfg.source_config_file {
        log::info!("Config: {}", path.to_string_lossy());
    }
    let overrides = self::env_overrides()?.merge(args);
    log::debug!("Overrides: {:?}", overrides);
    Ok(cfg.with_overrides(overrides))
}
