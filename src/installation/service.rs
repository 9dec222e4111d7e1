// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service-call payloads accepted by an installation.
//!
//! Payloads deserialize from the JSON the host passes to service handlers,
//! applying the same defaults as the UI forms:
//!
//! | Service | Defaults |
//! |---------|----------|
//! | `add_endpoint` | `value_type = "float"`, destination = installation default |
//! | `add_button` | `value = 1.0`, inline `value_type = "float"` |
//! | `add_slider` | `min = 0.0`, `max = 1.0`, `step = 0.01`, inline `value_type = "float"` |
//!
//! Buttons and sliders target either an existing endpoint (`endpoint_id`) or
//! an inline `osc_address` sent to the installation's default destination.
//!
//! # Examples
//!
//! ```
//! use osc_control_lib::installation::{EntityTarget, ServiceCall};
//!
//! let call = ServiceCall::from_json(
//!     r#"{"service": "add_button", "name": "Go", "osc_address": "/cue/go"}"#,
//! )
//! .unwrap();
//!
//! let ServiceCall::AddButton(add) = call else { unreachable!() };
//! assert!(matches!(add.target, EntityTarget::Inline { .. }));
//! ```

use serde::{Deserialize, Serialize};

use crate::event::EntityKind;
use crate::types::{OscAddress, OscValue, SliderRange, UniqueId, ValueType};

/// Which endpoint a button or slider drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityTarget {
    /// An endpoint already registered in the installation.
    Endpoint {
        /// Unique id of the endpoint.
        endpoint_id: UniqueId,
    },
    /// An address on the installation's default destination.
    ///
    /// An implicit endpoint is created (or reused) for it.
    Inline {
        /// OSC address.
        osc_address: OscAddress,
        /// Declared value type.
        #[serde(default)]
        value_type: ValueType,
    },
}

/// Payload of the `add_endpoint` service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddEndpoint {
    /// Display name.
    pub name: String,
    /// OSC address.
    pub osc_address: OscAddress,
    /// Declared value type.
    #[serde(default)]
    pub value_type: ValueType,
    /// Destination host override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Destination port override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Explicit unique id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<UniqueId>,
}

impl AddEndpoint {
    /// Creates a float endpoint on the default destination.
    #[must_use]
    pub fn new(name: impl Into<String>, osc_address: OscAddress) -> Self {
        Self {
            name: name.into(),
            osc_address,
            value_type: ValueType::default(),
            host: None,
            port: None,
            unique_id: None,
        }
    }

    /// Sets the declared value type.
    #[must_use]
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Overrides the destination host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Overrides the destination port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Uses an explicit unique id.
    #[must_use]
    pub fn with_unique_id(mut self, unique_id: impl Into<UniqueId>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }
}

/// Payload of the `add_button` service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddButton {
    /// Display name.
    pub name: String,
    /// Targeted endpoint.
    #[serde(flatten)]
    pub target: EntityTarget,
    /// Value sent on each press.
    #[serde(default)]
    pub value: OscValue,
    /// Explicit unique id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<UniqueId>,
}

impl AddButton {
    /// Creates a button for an existing endpoint, sending `1.0`.
    #[must_use]
    pub fn for_endpoint(name: impl Into<String>, endpoint_id: impl Into<UniqueId>) -> Self {
        Self::with_target(
            name,
            EntityTarget::Endpoint {
                endpoint_id: endpoint_id.into(),
            },
        )
    }

    /// Creates a button for an inline address of the given type, sending `1.0`.
    #[must_use]
    pub fn inline(name: impl Into<String>, osc_address: OscAddress, value_type: ValueType) -> Self {
        Self::with_target(
            name,
            EntityTarget::Inline {
                osc_address,
                value_type,
            },
        )
    }

    fn with_target(name: impl Into<String>, target: EntityTarget) -> Self {
        Self {
            name: name.into(),
            target,
            value: OscValue::default(),
            unique_id: None,
        }
    }

    /// Sets the value sent on each press.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<OscValue>) -> Self {
        self.value = value.into();
        self
    }

    /// Uses an explicit unique id.
    #[must_use]
    pub fn with_unique_id(mut self, unique_id: impl Into<UniqueId>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }
}

/// Payload of the `add_slider` service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddSlider {
    /// Display name.
    pub name: String,
    /// Targeted endpoint.
    #[serde(flatten)]
    pub target: EntityTarget,
    /// Lower bound.
    #[serde(default = "default_min")]
    pub min: f64,
    /// Upper bound.
    #[serde(default = "default_max")]
    pub max: f64,
    /// Step.
    #[serde(default = "default_step")]
    pub step: f64,
    /// Explicit unique id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<UniqueId>,
}

fn default_min() -> f64 {
    SliderRange::DEFAULT_MIN
}

fn default_max() -> f64 {
    SliderRange::DEFAULT_MAX
}

fn default_step() -> f64 {
    SliderRange::DEFAULT_STEP
}

impl AddSlider {
    /// Creates a `0.0..=1.0` slider for an existing endpoint.
    #[must_use]
    pub fn for_endpoint(name: impl Into<String>, endpoint_id: impl Into<UniqueId>) -> Self {
        Self::with_target(
            name,
            EntityTarget::Endpoint {
                endpoint_id: endpoint_id.into(),
            },
        )
    }

    /// Creates a `0.0..=1.0` slider for an inline address of the given type.
    #[must_use]
    pub fn inline(name: impl Into<String>, osc_address: OscAddress, value_type: ValueType) -> Self {
        Self::with_target(
            name,
            EntityTarget::Inline {
                osc_address,
                value_type,
            },
        )
    }

    fn with_target(name: impl Into<String>, target: EntityTarget) -> Self {
        Self {
            name: name.into(),
            target,
            min: SliderRange::DEFAULT_MIN,
            max: SliderRange::DEFAULT_MAX,
            step: SliderRange::DEFAULT_STEP,
            unique_id: None,
        }
    }

    /// Sets the widget range.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }

    /// Uses an explicit unique id.
    #[must_use]
    pub fn with_unique_id(mut self, unique_id: impl Into<UniqueId>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }
}

/// A service call dispatched by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum ServiceCall {
    /// Register an endpoint.
    AddEndpoint(AddEndpoint),
    /// Register a button.
    AddButton(AddButton),
    /// Register a slider.
    AddSlider(AddSlider),
    /// Press a button.
    Press {
        /// The button's unique id.
        unique_id: UniqueId,
    },
    /// Set a slider's value.
    SetValue {
        /// The slider's unique id.
        unique_id: UniqueId,
        /// The new value.
        value: f64,
    },
    /// Remove an endpoint, button or slider.
    RemoveEntity {
        /// The entity's unique id.
        unique_id: UniqueId,
    },
}

impl ServiceCall {
    /// Parses a service call from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed or unknown calls.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the service name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddEndpoint(_) => "add_endpoint",
            Self::AddButton(_) => "add_button",
            Self::AddSlider(_) => "add_slider",
            Self::Press { .. } => "press",
            Self::SetValue { .. } => "set_value",
            Self::RemoveEntity { .. } => "remove_entity",
        }
    }
}

/// Result of a successful service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome {
    /// An entity was registered under this id.
    Registered {
        /// What was registered.
        kind: EntityKind,
        /// Its unique id.
        unique_id: UniqueId,
    },
    /// An entity was removed.
    Removed {
        /// What was removed.
        kind: EntityKind,
        /// Its unique id.
        unique_id: UniqueId,
    },
    /// The action was dispatched.
    Dispatched,
}
