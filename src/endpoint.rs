// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OSC endpoints: one destination, one address, one declared value type.

use std::sync::Arc;

use rosc::OscType;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ProtocolError};
use crate::event::{EventBus, InstallationId, IntegrationEvent};
use crate::protocol::{Destination, OscSink};
use crate::types::{OscAddress, OscValue, UniqueId, ValueType};

/// A controllable OSC parameter.
///
/// Endpoints are immutable once built and shared (`Arc`) by every button and
/// slider that targets them. Values are coerced to the declared
/// [`ValueType`] on each send.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use osc_control_lib::endpoint::Endpoint;
/// use osc_control_lib::event::InstallationId;
/// use osc_control_lib::protocol::{Destination, UdpSender};
/// use osc_control_lib::types::{OscAddress, ValueType};
///
/// # async fn example() -> osc_control_lib::Result<()> {
/// let destination = Destination::new("192.168.1.20", 9000);
/// let sender = Arc::new(UdpSender::connect(destination.clone()).await?);
///
/// let endpoint = Endpoint::builder("Scene", OscAddress::new("/scene")?)
///     .with_value_type(ValueType::Int)
///     .build(InstallationId::new(), destination, sender);
///
/// // Transmits int 3
/// endpoint.send(3.7).await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Endpoint {
    installation_id: InstallationId,
    unique_id: UniqueId,
    name: String,
    destination: Destination,
    address: OscAddress,
    value_type: ValueType,
    sink: Arc<dyn OscSink>,
    events: EventBus,
}

impl Endpoint {
    /// Starts building an endpoint for `address`.
    #[must_use]
    pub fn builder(name: impl Into<String>, address: OscAddress) -> EndpointBuilder {
        EndpointBuilder::new(name, address)
    }

    /// Returns the owning installation.
    #[must_use]
    pub fn installation_id(&self) -> InstallationId {
        self.installation_id
    }

    /// Returns the endpoint's unique id.
    #[must_use]
    pub fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the destination messages are sent to.
    #[must_use]
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Returns the OSC address.
    #[must_use]
    pub fn address(&self) -> &OscAddress {
        &self.address
    }

    /// Returns the declared value type.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Sends `value`, coerced to the declared type, and forgets about it.
    ///
    /// Coercion and transmission failures are logged and reported on the
    /// event bus; they never reach the caller.
    pub async fn send(&self, value: impl Into<OscValue>) {
        let _ = self.try_send(value.into()).await;
    }

    /// Sends `value` and returns the argument that was transmitted.
    ///
    /// The blocking socket write runs on tokio's blocking pool and is awaited.
    /// Outcomes are logged and published as
    /// [`IntegrationEvent::MessageSent`] or [`IntegrationEvent::SendFailed`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the value cannot be coerced and
    /// `Error::Protocol` if encoding or transmission fails.
    pub async fn try_send(&self, value: OscValue) -> Result<OscType, Error> {
        match self.transmit(value).await {
            Ok(argument) => {
                tracing::debug!(
                    endpoint = %self.unique_id,
                    destination = %self.destination,
                    address = %self.address,
                    ?argument,
                    "Sent OSC message"
                );
                self.events.publish(IntegrationEvent::MessageSent {
                    installation_id: self.installation_id,
                    endpoint_id: self.unique_id.clone(),
                    address: self.address.to_string(),
                    argument: argument.clone(),
                });
                Ok(argument)
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.unique_id,
                    destination = %self.destination,
                    address = %self.address,
                    %value,
                    error = %e,
                    "Failed to send OSC message"
                );
                self.events.publish(IntegrationEvent::SendFailed {
                    installation_id: self.installation_id,
                    endpoint_id: self.unique_id.clone(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn transmit(&self, value: OscValue) -> Result<OscType, Error> {
        let argument = self.value_type.coerce(value)?;

        let sink = Arc::clone(&self.sink);
        let address = self.address.to_string();
        let payload = argument.clone();
        tokio::task::spawn_blocking(move || sink.send_message(&address, payload))
            .await
            .map_err(|e| ProtocolError::Task(e.to_string()))??;

        Ok(argument)
    }

    /// Returns a serializable description of this endpoint.
    #[must_use]
    pub fn info(&self) -> EndpointInfo {
        EndpointInfo {
            name: self.name.clone(),
            host: self.destination.host().to_string(),
            port: self.destination.port(),
            osc_address: self.address.clone(),
            value_type: self.value_type,
            unique_id: self.unique_id.clone(),
        }
    }
}

/// Builder for [`Endpoint`].
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    name: String,
    address: OscAddress,
    value_type: ValueType,
    unique_id: Option<UniqueId>,
    events: Option<EventBus>,
}

impl EndpointBuilder {
    /// Creates a builder with the default value type (float).
    #[must_use]
    pub fn new(name: impl Into<String>, address: OscAddress) -> Self {
        Self {
            name: name.into(),
            address,
            value_type: ValueType::default(),
            unique_id: None,
            events: None,
        }
    }

    /// Sets the declared value type.
    #[must_use]
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Uses an explicit unique id instead of the derived one.
    #[must_use]
    pub fn with_unique_id(mut self, unique_id: UniqueId) -> Self {
        self.unique_id = Some(unique_id);
        self
    }

    /// Publishes transmission events on `events`.
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Returns the unique id the built endpoint will have.
    #[must_use]
    pub fn unique_id(&self, installation_id: InstallationId) -> UniqueId {
        self.unique_id
            .clone()
            .unwrap_or_else(|| UniqueId::for_endpoint(installation_id, &self.address))
    }

    /// Builds the endpoint, sending through `sink` to `destination`.
    #[must_use]
    pub fn build(
        self,
        installation_id: InstallationId,
        destination: Destination,
        sink: Arc<dyn OscSink>,
    ) -> Endpoint {
        let unique_id = self.unique_id(installation_id);
        Endpoint {
            installation_id,
            unique_id,
            name: self.name,
            destination,
            address: self.address,
            value_type: self.value_type,
            sink,
            events: self.events.unwrap_or_default(),
        }
    }
}

/// Serializable description of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointInfo {
    /// Display name.
    pub name: String,
    /// Destination host.
    pub host: String,
    /// Destination port.
    pub port: u16,
    /// OSC address.
    pub osc_address: OscAddress,
    /// Declared value type.
    pub value_type: ValueType,
    /// Unique id.
    pub unique_id: UniqueId,
}

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;

    use super::*;

    /// Records messages instead of sending them.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSink {
        pub sent: Mutex<Vec<(String, OscType)>>,
        pub fail: bool,
    }

    impl RecordingSink {
        pub fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn messages(&self) -> Vec<(String, OscType)> {
            self.sent.lock().clone()
        }
    }

    impl OscSink for RecordingSink {
        fn send_message(&self, address: &str, argument: OscType) -> Result<(), ProtocolError> {
            if self.fail {
                return Err(ProtocolError::Send(std::io::Error::other("unreachable")));
            }
            self.sent.lock().push((address.to_string(), argument));
            Ok(())
        }
    }

    pub(crate) fn endpoint(value_type: ValueType, sink: Arc<RecordingSink>) -> Endpoint {
        Endpoint::builder("Test", OscAddress::new("/test").unwrap())
            .with_value_type(value_type)
            .build(
                InstallationId::new(),
                Destination::new("127.0.0.1", 9000),
                sink,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{RecordingSink, endpoint};
    use super::*;

    #[tokio::test]
    async fn int_endpoint_truncates() {
        let sink = Arc::new(RecordingSink::default());
        let ep = endpoint(ValueType::Int, Arc::clone(&sink));

        ep.send(3.7).await;

        assert_eq!(sink.messages(), vec![("/test".to_string(), OscType::Int(3))]);
    }

    #[tokio::test]
    async fn bool_endpoint_uses_truthiness() {
        let sink = Arc::new(RecordingSink::default());
        let ep = endpoint(ValueType::Bool, Arc::clone(&sink));

        ep.send(0).await;
        ep.send(0.2).await;

        assert_eq!(
            sink.messages(),
            vec![
                ("/test".to_string(), OscType::Bool(false)),
                ("/test".to_string(), OscType::Bool(true)),
            ]
        );
    }

    #[tokio::test]
    async fn float_endpoint_passes_through() {
        let sink = Arc::new(RecordingSink::default());
        let ep = endpoint(ValueType::Float, Arc::clone(&sink));

        let sent = ep.try_send(OscValue::Float(0.75)).await.unwrap();

        assert_eq!(sent, OscType::Float(0.75));
        assert_eq!(sink.messages().len(), 1);
    }

    #[tokio::test]
    async fn coercion_failure_is_swallowed_by_send() {
        let sink = Arc::new(RecordingSink::default());
        let ep = endpoint(ValueType::Int, Arc::clone(&sink));

        ep.send(f64::NAN).await;

        assert!(sink.messages().is_empty());
        assert!(matches!(
            ep.try_send(OscValue::Float(f64::INFINITY)).await,
            Err(Error::Value(_))
        ));
    }

    #[tokio::test]
    async fn transmission_failure_is_published() {
        let sink = Arc::new(RecordingSink::failing());
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let ep = Endpoint::builder("Broken", OscAddress::new("/x").unwrap())
            .with_events(bus)
            .build(
                InstallationId::new(),
                Destination::new("127.0.0.1", 9000),
                sink,
            );

        ep.send(1.0).await;

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, IntegrationEvent::SendFailed { .. }));
    }

    #[tokio::test]
    async fn successful_send_is_published() {
        let sink = Arc::new(RecordingSink::default());
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let ep = Endpoint::builder("Mute", OscAddress::new("/mute").unwrap())
            .with_value_type(ValueType::Bool)
            .with_events(bus)
            .build(
                InstallationId::new(),
                Destination::new("127.0.0.1", 9000),
                sink,
            );

        ep.send(true).await;

        match rx.recv().await.unwrap() {
            IntegrationEvent::MessageSent {
                address, argument, ..
            } => {
                assert_eq!(address, "/mute");
                assert_eq!(argument, OscType::Bool(true));
            }
            other => panic!("Expected MessageSent, got {other:?}"),
        }
    }

    #[test]
    fn derived_and_explicit_unique_ids() {
        let installation = InstallationId::new();
        let address = OscAddress::new("/a/b").unwrap();

        let derived = Endpoint::builder("A", address.clone()).unique_id(installation);
        assert_eq!(derived, UniqueId::for_endpoint(installation, &address));

        let explicit = Endpoint::builder("A", address)
            .with_unique_id(UniqueId::new("custom"))
            .unique_id(installation);
        assert_eq!(explicit.as_str(), "custom");
    }

    #[test]
    fn info_describes_endpoint() {
        let sink = Arc::new(RecordingSink::default());
        let ep = endpoint(ValueType::Int, sink);
        let info = ep.info();

        assert_eq!(info.name, "Test");
        assert_eq!(info.host, "127.0.0.1");
        assert_eq!(info.port, 9000);
        assert_eq!(info.osc_address.as_str(), "/test");
        assert_eq!(info.value_type, ValueType::Int);
        assert_eq!(&info.unique_id, ep.unique_id());

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["value_type"], "int");
        assert_eq!(json["osc_address"], "/test");
    }
}
