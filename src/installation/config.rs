// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Installation configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::event::InstallationId;
use crate::protocol::{DEFAULT_PORT, Destination};

/// Default installation name.
pub const DEFAULT_NAME: &str = "OSC Control";

/// Configuration of one installation, as stored by the host.
///
/// # Examples
///
/// ```
/// use osc_control_lib::installation::InstallationConfig;
///
/// let config = InstallationConfig::new("192.168.1.20")
///     .with_port(10023)
///     .with_name("Stage mixer");
/// assert_eq!(config.destination().to_string(), "192.168.1.20:10023");
///
/// // Loaded from the host's JSON storage
/// let config = InstallationConfig::from_json(r#"{"host": "mixer.local"}"#).unwrap();
/// assert_eq!(config.port, 9000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationConfig {
    /// Display name of the installation.
    #[serde(default = "default_name")]
    pub name: String,
    /// Default destination host.
    pub host: String,
    /// Default destination port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Fixed installation id; a random one is generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_id: Option<InstallationId>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl InstallationConfig {
    /// Creates a configuration sending to `host` on the default port.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            name: default_name(),
            host: host.into(),
            port: DEFAULT_PORT,
            installation_id: None,
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the JSON is malformed, or a validation
    /// error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the destination port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Pins the installation id, e.g. to keep entity ids stable across restarts.
    #[must_use]
    pub fn with_installation_id(mut self, id: InstallationId) -> Self {
        self.installation_id = Some(id);
        self
    }

    /// Checks that the configuration can address a destination.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` for an empty host and
    /// `ConfigError::InvalidPort` for port 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingField("host".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        Ok(())
    }

    /// Returns the default destination.
    #[must_use]
    pub fn destination(&self) -> Destination {
        Destination::new(self.host.trim(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InstallationConfig::new("10.0.0.5");
        assert_eq!(config.name, DEFAULT_NAME);
        assert_eq!(config.port, 9000);
        assert!(config.installation_id.is_none());
    }

    #[test]
    fn builder_options() {
        let id = InstallationId::new();
        let config = InstallationConfig::new("mixer")
            .with_name("FOH")
            .with_port(10023)
            .with_installation_id(id);

        assert_eq!(config.name, "FOH");
        assert_eq!(config.destination(), Destination::new("mixer", 10023));
        assert_eq!(config.installation_id, Some(id));
    }

    #[test]
    fn from_json_full() {
        let config = InstallationConfig::from_json(
            r#"{"name": "Lights", "host": "10.0.0.9", "port": 7700}"#,
        )
        .unwrap();
        assert_eq!(config.name, "Lights");
        assert_eq!(config.port, 7700);
    }

    #[test]
    fn from_json_rejects_missing_host() {
        assert!(matches!(
            InstallationConfig::from_json(r#"{"port": 9000}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            InstallationConfig::from_json(r#"{"host": "  "}"#),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn validate_rejects_port_zero() {
        let config = InstallationConfig::new("localhost").with_port(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPort(0))));
    }

    #[test]
    fn serialize_skips_missing_id() {
        let json = serde_json::to_value(InstallationConfig::new("h")).unwrap();
        assert!(json.get("installation_id").is_none());
        assert_eq!(json["port"], 9000);
    }
}
