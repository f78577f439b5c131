use anyhow::Result;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::risk::HIGH_VALUE_THRESHOLD;
use crate::workflow::{PanelSettings, WorkflowSettings};

/// Default config file name, looked up without extension
pub const DEFAULT_CONFIG_FILE: &str = "confirmation_desk";

/// Environment variable holding an explicit config file path
pub const CONFIG_PATH_ENV: &str = "CONFIRMATION_DESK_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub risk: RiskConfig,
    pub panels: PanelSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub high_value_threshold: u64,
    pub blacklist: Vec<String>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_value_threshold: HIGH_VALUE_THRESHOLD,
            blacklist: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when RUST_LOG is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,confirmation_desk=debug".to_string(),
        }
    }
}

impl DeskConfig {
    pub fn workflow_settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            high_value_threshold: self.risk.high_value_threshold,
            panels: self.panels.clone(),
        }
    }
}

/// Load configuration from an optional file, overridden by environment
/// variables such as `CONFIRMATION_DESK_RISK__BLACKLIST=0555123456,0661987654`
/// (`__` separates sections, `,` separates list items).
pub fn load_config(path: &str) -> Result<DeskConfig> {
    load_with_environment(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix("CONFIRMATION_DESK")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("risk.blacklist")
        .with_list_parse_key("panels.packing_checklist")
        .with_list_parse_key("panels.carriers")
        .try_parsing(true)
}

fn load_with_environment(path: &str, environment: Environment) -> Result<DeskConfig> {
    let config = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(environment)
        .build()?;

    Ok(config.try_deserialize()?)
}
