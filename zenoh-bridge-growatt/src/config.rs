//! Bridge configuration (JSON5 format).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use sunsight_common::{KEY_PREFIX, LoggingConfig, ZenohConfig};

use crate::scheduler::Timing;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Top-level bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowattBridgeConfig {
    /// Zenoh session settings.
    #[serde(default)]
    pub zenoh: ZenohConfig,

    /// Modbus bus connection.
    pub bus: BusConfig,

    /// Devices and polling behavior.
    pub growatt: GrowattConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Modbus bus connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    #[serde(flatten)]
    pub connection: ConnectionConfig,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Connection type: Modbus TCP or serial RTU.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "transport", rename_all = "lowercase")]
pub enum ConnectionConfig {
    Tcp {
        host: String,
        #[serde(default = "default_tcp_port")]
        port: u16,
    },
    Rtu {
        /// Serial device path (e.g. /dev/ttyUSB0).
        port: String,
        #[serde(default = "default_baud_rate")]
        baud_rate: u32,
        #[serde(default = "default_data_bits")]
        data_bits: u8,
        #[serde(default = "default_parity")]
        parity: String,
        #[serde(default = "default_stop_bits")]
        stop_bits: u8,
    },
}

/// Device list and polling cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowattConfig {
    /// Key expression prefix for published messages.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Devices on the bus.
    pub devices: Vec<DeviceConfig>,

    /// Polling cadence.
    #[serde(default)]
    pub timing: TimingConfig,
}

/// One device on the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Device name, used in key expressions.
    pub name: String,

    /// Modbus unit id (1-247).
    #[serde(default = "default_unit_id")]
    pub unit_id: u8,

    /// Model identifier (e.g. "min-tlxh", "sph", "sdm630"). Matched
    /// exactly against the built-in catalogue.
    pub model: String,

    /// Measurement tag in published telemetry. Defaults to the device
    /// name.
    #[serde(default)]
    pub measurement: Option<String>,
}

impl DeviceConfig {
    pub fn measurement(&self) -> &str {
        self.measurement.as_deref().unwrap_or(&self.name)
    }
}

/// Polling cadence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Seconds between poll cycles while at least one device is online.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Seconds between poll cycles while every device is offline.
    #[serde(default = "default_offline_interval_secs")]
    pub offline_interval_secs: u64,

    /// Backoff applied to a device after an unexpected poll failure.
    #[serde(default = "default_error_interval_secs")]
    pub error_interval_secs: u64,

    /// Poll cycles between settings refreshes.
    #[serde(default = "default_settings_refresh_ticks")]
    pub settings_refresh_ticks: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            offline_interval_secs: default_offline_interval_secs(),
            error_interval_secs: default_error_interval_secs(),
            settings_refresh_ticks: default_settings_refresh_ticks(),
        }
    }
}

impl TimingConfig {
    pub fn to_timing(&self) -> Timing {
        Timing {
            interval: Duration::from_secs(self.interval_secs),
            offline_interval: Duration::from_secs(self.offline_interval_secs),
            error_interval: Duration::from_secs(self.error_interval_secs),
            settings_refresh_ticks: self.settings_refresh_ticks,
        }
    }
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_tcp_port() -> u16 {
    502
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_data_bits() -> u8 {
    8
}

fn default_parity() -> String {
    "none".to_string()
}

fn default_stop_bits() -> u8 {
    1
}

fn default_key_prefix() -> String {
    KEY_PREFIX.to_string()
}

fn default_unit_id() -> u8 {
    1
}

fn default_interval_secs() -> u64 {
    10
}

fn default_offline_interval_secs() -> u64 {
    60
}

fn default_error_interval_secs() -> u64 {
    60
}

fn default_settings_refresh_ticks() -> u32 {
    600
}

impl GrowattBridgeConfig {
    /// Load configuration from a JSON5 file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = json5::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration eagerly, so mistakes surface at startup
    /// rather than mid-poll.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.growatt.devices.is_empty() {
            return Err(ConfigError::Validation(
                "at least one device must be configured".to_string(),
            ));
        }

        let mut names = std::collections::HashSet::new();
        for device in &self.growatt.devices {
            if device.name.is_empty() {
                return Err(ConfigError::Validation(
                    "device name must not be empty".to_string(),
                ));
            }
            if device.name.contains('/') || device.name.contains('*') {
                return Err(ConfigError::Validation(format!(
                    "device name '{}' contains key expression characters",
                    device.name
                )));
            }
            if !names.insert(&device.name) {
                return Err(ConfigError::Validation(format!(
                    "duplicate device name '{}'",
                    device.name
                )));
            }
            if !(1..=247).contains(&device.unit_id) {
                return Err(ConfigError::Validation(format!(
                    "device '{}': unit_id {} outside 1-247",
                    device.name, device.unit_id
                )));
            }
        }

        if let ConnectionConfig::Rtu { parity, .. } = &self.bus.connection {
            if !matches!(parity.to_lowercase().as_str(), "none" | "even" | "odd") {
                return Err(ConfigError::Validation(format!(
                    "invalid parity '{}': expected 'none', 'even', or 'odd'",
                    parity
                )));
            }
        }

        if self.growatt.timing.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "interval_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
