// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! UDP implementation of [`OscSink`].

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use rosc::OscType;

use super::{Destination, OscSink, encode_message};
use crate::error::ProtocolError;

/// Sends OSC messages to one destination over UDP.
///
/// UDP is connectionless: "connecting" resolves the destination once and
/// binds an ephemeral local socket. Nothing is exchanged with the peer, so a
/// successful connect says nothing about whether anyone is listening.
///
/// # Examples
///
/// ```no_run
/// use osc_control_lib::protocol::{Destination, OscSink, UdpSender};
/// use rosc::OscType;
///
/// # async fn example() -> osc_control_lib::Result<()> {
/// let sender = UdpSender::connect(Destination::new("192.168.1.20", 9000)).await?;
/// sender.send_message("/scene/recall", OscType::Int(3))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct UdpSender {
    destination: Destination,
    target: SocketAddr,
    socket: UdpSocket,
}

impl UdpSender {
    /// Resolves `destination` and opens a local socket for it.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Resolve` if the host has no usable address and
    /// `ProtocolError::Bind` if the local socket cannot be opened.
    pub async fn connect(destination: Destination) -> Result<Self, ProtocolError> {
        let resolve_error = |message: String| ProtocolError::Resolve {
            host: destination.host().to_string(),
            port: destination.port(),
            message,
        };

        let target = tokio::net::lookup_host((destination.host(), destination.port()))
            .await
            .map_err(|e| resolve_error(e.to_string()))?
            .next()
            .ok_or_else(|| resolve_error("no addresses found".to_string()))?;

        let local: SocketAddr = match target.ip() {
            IpAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            IpAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local).map_err(ProtocolError::Bind)?;

        if let IpAddr::V4(v4) = target.ip()
            && v4.is_broadcast()
        {
            socket.set_broadcast(true).map_err(ProtocolError::Bind)?;
        }

        tracing::debug!(%destination, peer = %target, "Opened OSC UDP sender");

        Ok(Self {
            destination,
            target,
            socket,
        })
    }

    /// Returns the configured destination.
    #[must_use]
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Returns the resolved socket address messages are sent to.
    #[must_use]
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Returns the local address of the socket.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Bind` if the socket address cannot be read.
    pub fn local_addr(&self) -> Result<SocketAddr, ProtocolError> {
        self.socket.local_addr().map_err(ProtocolError::Bind)
    }
}

impl OscSink for UdpSender {
    fn send_message(&self, address: &str, argument: OscType) -> Result<(), ProtocolError> {
        let datagram = encode_message(address, argument)?;
        let sent = self
            .socket
            .send_to(&datagram, self.target)
            .map_err(ProtocolError::Send)?;
        tracing::trace!(peer = %self.target, address, bytes = sent, "Sent OSC datagram");
        Ok(())
    }
}
