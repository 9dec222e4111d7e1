// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the OSC control library.
//!
//! This module provides the error hierarchy used across the library: value
//! validation and coercion, UDP/OSC transport, configuration, and entity
//! bookkeeping inside an installation.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation or coercion.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while encoding or transmitting an OSC message.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Installation configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The installation could not be set up; the host should retry later.
    #[error("installation not ready: {0}")]
    NotReady(String),

    /// A referenced endpoint does not exist in the installation.
    #[error("endpoint not found: {0}")]
    EndpointNotFound(String),

    /// A referenced button or slider does not exist in the installation.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// An endpoint cannot be removed while buttons or sliders target it.
    #[error("endpoint still in use: {0}")]
    EndpointInUse(String),

    /// An entity with the same unique id is already registered.
    #[error("entity already exists: {0}")]
    DuplicateEntity(String),

    /// The installation has been unloaded.
    #[error("installation has been unloaded")]
    Unloaded,
}

/// Errors related to value validation and type coercion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// An unknown value type name was provided.
    #[error("invalid value type: {0}")]
    InvalidValueType(String),

    /// A value cannot be represented as a 32-bit OSC integer.
    #[error("value {0} does not fit in a 32-bit OSC int")]
    IntOutOfRange(f64),

    /// A non-finite float was coerced to an integer.
    #[error("cannot coerce non-finite value {0} to int")]
    NotFinite(f64),

    /// An OSC address does not follow the `/path` syntax.
    #[error("invalid OSC address: {0}")]
    InvalidAddress(String),

    /// Slider bounds are inverted or not finite.
    #[error("invalid slider range [{min}, {max}]")]
    InvalidRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Slider step is zero, negative or not finite.
    #[error("invalid slider step: {0}")]
    InvalidStep(f64),
}

/// Errors related to OSC transport over UDP.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The destination host could not be resolved.
    #[error("failed to resolve {host}:{port}: {message}")]
    Resolve {
        /// The host that failed to resolve.
        host: String,
        /// The destination port.
        port: u16,
        /// Resolver error description.
        message: String,
    },

    /// A local UDP socket could not be opened.
    #[error("failed to open UDP socket: {0}")]
    Bind(#[source] std::io::Error),

    /// The OSC packet could not be encoded.
    #[error("OSC encoding failed: {0}")]
    Encode(#[from] rosc::OscError),

    /// The datagram could not be sent.
    #[error("UDP send failed: {0}")]
    Send(#[source] std::io::Error),

    /// The blocking send task was cancelled or panicked.
    #[error("send task failed: {0}")]
    Task(String),
}

/// Errors related to installation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is empty.
    #[error("missing field: {0}")]
    MissingField(String),

    /// The port is not usable as a destination.
    #[error("invalid port: {0}")]
    InvalidPort(u16),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidRange { min: 2.0, max: 1.0 };
        assert_eq!(err.to_string(), "invalid slider range [2, 1]");
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::InvalidStep(0.0).into();
        assert!(matches!(err, Error::Value(ValueError::InvalidStep(_))));
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::Resolve {
            host: "mixer.local".to_string(),
            port: 9000,
            message: "no such host".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to resolve mixer.local:9000: no such host"
        );
    }

    #[test]
    fn not_ready_display() {
        let err = Error::NotReady("socket closed".to_string());
        assert_eq!(err.to_string(), "installation not ready: socket closed");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::MissingField("host".to_string());
        assert_eq!(err.to_string(), "missing field: host");
    }
}
