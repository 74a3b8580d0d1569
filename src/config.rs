// src/config.rs
use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::drivers::ProbeError;
pub const DEFAULT_DEVICE_PATH: &str = "/dev/ttyACM0";
// Arduino sketch writes at 9600 bits per second.
pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 100;
pub const DEFAULT_FIT_DEGREE: usize = 6;
pub const DEFAULT_PLOT_TITLE: &str = "DS18B20";
/// Settings for one logging run. Every field falls back to its default when
/// missing from the JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub device_path: String,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
    pub fit_degree: usize,
    pub plot_title: String,
}
impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            device_path: DEFAULT_DEVICE_PATH.to_owned(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            fit_degree: DEFAULT_FIT_DEGREE,
            plot_title: DEFAULT_PLOT_TITLE.to_owned(),
        }
    }
}
impl ProbeConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ProbeError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ProbeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
    pub fn load(path: &Path) -> Result<Self, ProbeError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ProbeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.device_path.trim().is_empty() {
            return Err(ProbeError::Config("device_path must not be empty".into()));
        }
        if self.baud_rate == 0 {
            return Err(ProbeError::Config("baud_rate must be greater than zero".into()));
        }
        if self.read_timeout_ms == 0 {
            return Err(ProbeError::Config(
                "read_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_match_reference_rig() {
        let config = ProbeConfig::default();
        assert_eq!(config.device_path, "/dev/ttyACM0");
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.fit_degree, 6);
        assert!(config.validate().is_ok());
    }
    #[test]
    fn partial_json_keeps_defaults() {
        let config = ProbeConfig::from_json_str(r#"{"device_path": "/dev/ttyUSB1"}"#).unwrap();
        assert_eq!(config.device_path, "/dev/ttyUSB1");
        assert_eq!(config.baud_rate, DEFAULT_BAUD_RATE);
        assert_eq!(config.plot_title, DEFAULT_PLOT_TITLE);
    }
    #[test]
    fn rejects_zero_baud_and_bad_json() {
        assert!(matches!(
            ProbeConfig::from_json_str(r#"{"baud_rate": 0}"#),
            Err(ProbeError::Config(_))
        ));
        assert!(matches!(
            ProbeConfig::from_json_str("not json"),
            Err(ProbeError::Config(_))
        ));
    }
}
