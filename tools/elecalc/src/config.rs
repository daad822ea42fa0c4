//! Shell configuration
//!
//! Priority (highest to lowest):
//! 1. Environment variables prefixed with `ELECALC_`
//! 2. Config file (`--config <path>`, or `elecalc.toml` in the working directory)
//! 3. Default values

use anyhow::{anyhow, bail, Result};
use elec_calc::{CalcError, PowerFactor};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "elecalc.toml";

/// What to do with a power factor outside [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerFactorPolicy {
    #[default]
    Reject,
    Clamp,
}

impl PowerFactorPolicy {
    pub fn apply(self, value: f64) -> std::result::Result<PowerFactor, CalcError> {
        match self {
            PowerFactorPolicy::Reject => PowerFactor::new(value),
            PowerFactorPolicy::Clamp => PowerFactor::clamped(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Decimal places shown in results (trailing zeros are trimmed)
    pub precision: usize,
    pub power_factor: PowerFactorPolicy,
    /// Colored terminal output
    pub color: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            precision: 4,
            power_factor: PowerFactorPolicy::Reject,
            color: true,
        }
    }
}

/// Upper bound for `precision`; f64 carries ~15-17 significant digits
const MAX_PRECISION: usize = 15;

/// Load configuration from defaults, an optional TOML file and the environment
///
/// An explicit `path` must exist; the default `elecalc.toml` is optional.
pub fn load_config(path: Option<&Path>) -> Result<ShellConfig> {
    let file = match path {
        Some(p) => {
            if !p.exists() {
                bail!("Config file not found: {}", p.display());
            }
            p.to_path_buf()
        },
        None => Path::new(DEFAULT_CONFIG_FILE).to_path_buf(),
    };

    let config: ShellConfig = Figment::from(Serialized::defaults(ShellConfig::default()))
        .merge(Toml::file(&file))
        .merge(Env::prefixed("ELECALC_"))
        .extract()
        .map_err(|e| anyhow!("Failed to load configuration from {}: {}", file.display(), e))?;

    if config.precision > MAX_PRECISION {
        bail!(
            "precision must be at most {}, got {}",
            MAX_PRECISION,
            config.precision
        );
    }

    Ok(config)
}
