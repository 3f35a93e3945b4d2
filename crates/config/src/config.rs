use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Default value for `host` in [`AlgodConfig`].
const DEFAULT_ALGOD_HOST: &str = "http://localhost";

/// Default value for `port` in [`AlgodConfig`], the sandbox algod port.
const DEFAULT_ALGOD_PORT: u16 = 4001;

/// Default value for `max_rounds` in [`ConfirmationConfig`].
const DEFAULT_MAX_ROUNDS: u64 = 1000;

/// Default value for `fee` in [`FeeConfig`], in microalgos.
const DEFAULT_FEE: u64 = 1000;

/// Default value for `note` in [`FeeConfig`].
const DEFAULT_NOTE: &str = "showing prefix";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgodConfig {
    /// Scheme and host of the algod endpoint.
    #[serde(default = "default_algod_host")]
    pub host: String,

    /// Port of the algod endpoint. Left out for hosted endpoints on the
    /// scheme's default port.
    #[serde(default = "default_algod_port")]
    pub port: Option<u16>,

    /// API token sent with every request.
    #[serde(default)]
    pub token: String,
}

impl Default for AlgodConfig {
    fn default() -> Self {
        Self {
            host: default_algod_host(),
            port: default_algod_port(),
            token: String::new(),
        }
    }
}

fn default_algod_host() -> String {
    DEFAULT_ALGOD_HOST.to_owned()
}

fn default_algod_port() -> Option<u16> {
    Some(DEFAULT_ALGOD_PORT)
}

/// Mnemonics of the named accounts. Any of them may be left out; commands
/// that need a missing one fail.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AccountsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account1: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account3: Option<String>,
}

impl AccountsConfig {
    /// Returns the mnemonic configured under `name` (`account1`..`account3`).
    pub fn mnemonic(&self, name: &str) -> Option<&str> {
        match name {
            "account1" => self.account1.as_deref(),
            "account2" => self.account2.as_deref(),
            "account3" => self.account3.as_deref(),
            _ => None,
        }
    }
}

// Mnemonics are secrets.
impl fmt::Debug for AccountsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = |m: &Option<String>| if m.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("AccountsConfig")
            .field("account1", &state(&self.account1))
            .field("account2", &state(&self.account2))
            .field("account3", &state(&self.account3))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationConfig {
    /// Rounds to wait for a confirmation. Zero waits without bound.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

fn default_max_rounds() -> u64 {
    DEFAULT_MAX_ROUNDS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeConfig {
    #[serde(default = "default_fee")]
    pub fee: Option<u64>,

    /// Pay `fee` verbatim instead of the network's suggestion.
    #[serde(default = "default_flat_fee")]
    pub flat_fee: bool,

    /// Note attached to every transaction.
    #[serde(default = "default_note")]
    pub note: String,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            fee: default_fee(),
            flat_fee: default_flat_fee(),
            note: default_note(),
        }
    }
}

fn default_fee() -> Option<u64> {
    Some(DEFAULT_FEE)
}

fn default_flat_fee() -> bool {
    true
}

fn default_note() -> String {
    DEFAULT_NOTE.to_owned()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,

    /// How often a new log file is started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<LogRotation>,

    /// Log span open and close events around each pipeline stage.
    #[serde(default)]
    pub span_events: bool,
}

/// Log file rotation period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatinumConfig {
    #[serde(default)]
    pub algod: AlgodConfig,

    #[serde(default)]
    pub accounts: AccountsConfig,

    #[serde(default)]
    pub confirmation: ConfirmationConfig,

    #[serde(default)]
    pub fee: FeeConfig,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}
