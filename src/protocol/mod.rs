// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OSC transport.
//!
//! Encoding is delegated to [`rosc`]; transmission is a single UDP datagram
//! per message with no acknowledgment.
//!
//! # Sinks
//!
//! - [`OscSink`]: the blocking "send one message" primitive endpoints call
//! - [`UdpSender`]: the UDP implementation bound to one [`Destination`]

mod udp;

use std::fmt;

use rosc::{OscMessage, OscPacket, OscType};
use serde::{Deserialize, Serialize};

pub use udp::UdpSender;

use crate::error::ProtocolError;

/// Default OSC destination port.
pub const DEFAULT_PORT: u16 = 9000;

/// A transmit primitive for single-argument OSC messages.
///
/// Implementations may block on socket I/O; endpoints always call
/// [`send_message`](Self::send_message) from tokio's blocking pool.
pub trait OscSink: Send + Sync + fmt::Debug {
    /// Encodes and transmits one OSC message carrying `argument`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if encoding or transmission fails.
    fn send_message(&self, address: &str, argument: OscType) -> Result<(), ProtocolError>;
}

/// Encodes a single-argument OSC message into a datagram payload.
///
/// # Errors
///
/// Returns `ProtocolError::Encode` if `rosc` rejects the message.
///
/// # Examples
///
/// ```
/// use osc_control_lib::protocol::encode_message;
/// use rosc::OscType;
///
/// let bytes = encode_message("/fader", OscType::Float(0.5)).unwrap();
/// assert_eq!(bytes.len() % 4, 0);
/// ```
pub fn encode_message(address: &str, argument: OscType) -> Result<Vec<u8>, ProtocolError> {
    let packet = OscPacket::Message(OscMessage {
        addr: address.to_string(),
        args: vec![argument],
    });
    Ok(rosc::encoder::encode(&packet)?)
}

/// A `host:port` pair OSC messages are sent to.
///
/// # Examples
///
/// ```
/// use osc_control_lib::protocol::Destination;
///
/// let dest = Destination::new("192.168.1.20", 10023);
/// assert_eq!(dest.to_string(), "192.168.1.20:10023");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    host: String,
    port: u16,
}

impl Destination {
    /// Creates a destination.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the host name or IP address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the UDP port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns a destination with the given parts replaced where present.
    #[must_use]
    pub fn with_overrides(&self, host: Option<&str>, port: Option<u16>) -> Self {
        Self {
            host: host.map_or_else(|| self.host.clone(), str::to_string),
            port: port.unwrap_or(self.port),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_roundtrips_through_rosc() {
        let bytes = encode_message("/ch/1/mute", OscType::Bool(true)).unwrap();
        let (_, packet) = rosc::decoder::decode_udp(&bytes).unwrap();
        match packet {
            OscPacket::Message(msg) => {
                assert_eq!(msg.addr, "/ch/1/mute");
                assert_eq!(msg.args, vec![OscType::Bool(true)]);
            }
            OscPacket::Bundle(_) => panic!("Expected a message"),
        }
    }

    #[test]
    fn destination_overrides() {
        let base = Destination::new("10.0.0.1", DEFAULT_PORT);
        assert_eq!(base.with_overrides(None, None), base);
        assert_eq!(
            base.with_overrides(Some("10.0.0.2"), None),
            Destination::new("10.0.0.2", 9000)
        );
        assert_eq!(
            base.with_overrides(None, Some(8000)),
            Destination::new("10.0.0.1", 8000)
        );
    }
}
