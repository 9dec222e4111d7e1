// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Button entity.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::Activatable;
use crate::endpoint::Endpoint;
use crate::event::{EventBus, IntegrationEvent};
use crate::types::{OscValue, UniqueId};

/// A button that sends a fixed value to an endpoint.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use osc_control_lib::endpoint::Endpoint;
/// use osc_control_lib::entity::{Activatable, Button};
/// use osc_control_lib::types::{OscValue, UniqueId};
///
/// # async fn example(endpoint: Arc<Endpoint>) {
/// let go = Button::new(UniqueId::new("go"), "Go", OscValue::Int(1), endpoint);
/// go.activate().await;
/// assert!(go.last_pressed().is_some());
/// # }
/// ```
#[derive(Debug)]
pub struct Button {
    unique_id: UniqueId,
    name: String,
    value: OscValue,
    endpoint: Arc<Endpoint>,
    last_pressed: RwLock<Option<DateTime<Utc>>>,
    events: EventBus,
}

impl Button {
    /// Creates a button sending `value` to `endpoint`.
    #[must_use]
    pub fn new(
        unique_id: UniqueId,
        name: impl Into<String>,
        value: OscValue,
        endpoint: Arc<Endpoint>,
    ) -> Self {
        Self {
            unique_id,
            name: name.into(),
            value,
            endpoint,
            last_pressed: RwLock::new(None),
            events: EventBus::new(),
        }
    }

    /// Publishes press events on `events`.
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Returns the unique id.
    #[must_use]
    pub fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fixed value sent on every press.
    #[must_use]
    pub fn value(&self) -> OscValue {
        self.value
    }

    /// Returns the targeted endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Arc<Endpoint> {
        &self.endpoint
    }

    /// Returns when the button was last pressed.
    #[must_use]
    pub fn last_pressed(&self) -> Option<DateTime<Utc>> {
        *self.last_pressed.read()
    }
}

impl Activatable for Button {
    async fn activate(&self) {
        self.endpoint.send(self.value).await;

        let at = Utc::now();
        *self.last_pressed.write() = Some(at);
        self.events.publish(IntegrationEvent::ButtonPressed {
            installation_id: self.endpoint.installation_id(),
            unique_id: self.unique_id.clone(),
            at,
        });
    }
}

#[cfg(test)]
mod tests {
    use rosc::OscType;

    use super::*;
    use crate::endpoint::testing::{RecordingSink, endpoint};
    use crate::types::ValueType;

    #[tokio::test]
    async fn activate_sends_fixed_value_every_time() {
        let sink = Arc::new(RecordingSink::default());
        let ep = Arc::new(endpoint(ValueType::Float, Arc::clone(&sink)));
        let button = Button::new(UniqueId::new("b"), "B", OscValue::Float(0.5), ep);

        button.activate().await;
        button.activate().await;

        assert_eq!(
            sink.messages(),
            vec![
                ("/test".to_string(), OscType::Float(0.5)),
                ("/test".to_string(), OscType::Float(0.5)),
            ]
        );
    }

    #[tokio::test]
    async fn activate_records_last_pressed() {
        let sink = Arc::new(RecordingSink::default());
        let ep = Arc::new(endpoint(ValueType::Int, sink));
        let button = Button::new(UniqueId::new("b"), "B", OscValue::Int(1), ep);

        assert!(button.last_pressed().is_none());
        let before = Utc::now();
        button.activate().await;
        assert!(button.last_pressed().unwrap() >= before);
    }

    #[tokio::test]
    async fn failed_send_still_counts_as_press() {
        let sink = Arc::new(RecordingSink::failing());
        let ep = Arc::new(endpoint(ValueType::Int, sink));
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let button =
            Button::new(UniqueId::new("b"), "B", OscValue::Int(1), ep).with_events(bus);

        button.activate().await;

        assert!(button.last_pressed().is_some());
        assert!(matches!(
            rx.recv().await.unwrap(),
            IntegrationEvent::ButtonPressed { .. }
        ));
    }
}
