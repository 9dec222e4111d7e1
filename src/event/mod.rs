// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for entity lifecycle and transmissions.
//!
//! Every [`Installation`](crate::installation::Installation) owns an
//! [`EventBus`]; hosts subscribe to it to mirror entity state (registered
//! entities, last button press, slider value) and to observe the outcome of
//! each OSC send.
//!
//! # Examples
//!
//! ```
//! use osc_control_lib::event::{EntityKind, EventBus, InstallationId, IntegrationEvent};
//! use osc_control_lib::types::UniqueId;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(IntegrationEvent::entity_added(
//!     InstallationId::new(),
//!     EntityKind::Button,
//!     UniqueId::new("go"),
//! ));
//! ```

mod event_bus;
mod installation_id;
mod integration_event;

pub use event_bus::{EVENT_CAPACITY, EventBus};
pub use installation_id::InstallationId;
pub use integration_event::{EntityKind, IntegrationEvent};
