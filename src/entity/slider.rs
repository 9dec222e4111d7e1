// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slider entity.

use std::sync::Arc;

use parking_lot::RwLock;

use super::Settable;
use crate::endpoint::Endpoint;
use crate::event::{EventBus, IntegrationEvent};
use crate::types::{SliderRange, UniqueId};

/// A slider (fader) bound to an endpoint.
///
/// The current value starts at the range minimum and is only local display
/// state. Values are not checked against the range.
#[derive(Debug)]
pub struct Slider {
    unique_id: UniqueId,
    name: String,
    range: SliderRange,
    endpoint: Arc<Endpoint>,
    value: RwLock<f64>,
    events: EventBus,
}

impl Slider {
    /// Creates a slider driving `endpoint`.
    #[must_use]
    pub fn new(
        unique_id: UniqueId,
        name: impl Into<String>,
        range: SliderRange,
        endpoint: Arc<Endpoint>,
    ) -> Self {
        Self {
            unique_id,
            name: name.into(),
            range,
            endpoint,
            value: RwLock::new(range.min()),
            events: EventBus::new(),
        }
    }

    /// Publishes value changes on `events`.
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

    /// Returns the widget range.
    #[must_use]
    pub fn range(&self) -> SliderRange {
        self.range
    }

    /// Returns the targeted endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Arc<Endpoint> {
        &self.endpoint
    }
}

impl Settable for Slider {
    async fn set(&self, value: f64) {
        self.endpoint.send(value).await;

        *self.value.write() = value;
        self.events.publish(IntegrationEvent::SliderChanged {
            installation_id: self.endpoint.installation_id(),
            unique_id: self.unique_id.clone(),
            value,
        });
    }

    fn value(&self) -> f64 {
        *self.value.read()
    }
}
