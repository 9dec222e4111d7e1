// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration event types.

use std::fmt;

use chrono::{DateTime, Utc};
use rosc::OscType;

use super::InstallationId;
use crate::types::UniqueId;

/// The kind of entity an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// An OSC endpoint.
    Endpoint,
    /// A button entity.
    Button,
    /// A slider entity.
    Slider,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Endpoint => "endpoint",
            Self::Button => "button",
            Self::Slider => "slider",
        })
    }
}

/// Events emitted by an installation.
///
/// These replace the host's state-cache writes: entity registration, button
/// presses, slider value updates and the outcome of every transmission.
///
/// # Examples
///
/// ```
/// use osc_control_lib::event::{EntityKind, InstallationId, IntegrationEvent};
/// use osc_control_lib::types::UniqueId;
///
/// let installation_id = InstallationId::new();
/// let event = IntegrationEvent::entity_added(
///     installation_id,
///     EntityKind::Button,
///     UniqueId::new("scene_go"),
/// );
/// assert!(event.is_lifecycle());
/// assert_eq!(event.installation_id(), installation_id);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationEvent {
    /// An endpoint, button or slider was registered.
    EntityAdded {
        /// The owning installation.
        installation_id: InstallationId,
        /// What was added.
        kind: EntityKind,
        /// The entity's unique id.
        unique_id: UniqueId,
    },

    /// An endpoint, button or slider was removed.
    EntityRemoved {
        /// The owning installation.
        installation_id: InstallationId,
        /// What was removed.
        kind: EntityKind,
        /// The entity's unique id.
        unique_id: UniqueId,
    },

    /// An OSC message left the socket.
    MessageSent {
        /// The owning installation.
        installation_id: InstallationId,
        /// The endpoint that sent it.
        endpoint_id: UniqueId,
        /// The OSC address.
        address: String,
        /// The coerced argument.
        argument: OscType,
    },

    /// An OSC message could not be coerced or transmitted.
    SendFailed {
        /// The owning installation.
        installation_id: InstallationId,
        /// The endpoint that failed.
        endpoint_id: UniqueId,
        /// Error description.
        error: String,
    },

    /// A button was pressed.
    ButtonPressed {
        /// The owning installation.
        installation_id: InstallationId,
        /// The button's unique id.
        unique_id: UniqueId,
        /// When the press happened.
        at: DateTime<Utc>,
    },

    /// A slider's cached value changed.
    SliderChanged {
        /// The owning installation.
        installation_id: InstallationId,
        /// The slider's unique id.
        unique_id: UniqueId,
        /// The new value, before coercion.
        value: f64,
    },

    /// The installation was unloaded and all its entities dropped.
    Unloaded {
        /// The unloaded installation.
        installation_id: InstallationId,
    },
}

impl IntegrationEvent {
    /// Returns the installation this event belongs to.
    #[must_use]
    pub fn installation_id(&self) -> InstallationId {
        match self {
            Self::EntityAdded {
                installation_id, ..
            }
            | Self::EntityRemoved {
                installation_id, ..
            }
            | Self::MessageSent {
                installation_id, ..
            }
            | Self::SendFailed {
                installation_id, ..
            }
            | Self::ButtonPressed {
                installation_id, ..
            }
            | Self::SliderChanged {
                installation_id, ..
            }
            | Self::Unloaded { installation_id } => *installation_id,
        }
    }

    /// Returns `true` for entity registration and removal events.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::EntityAdded { .. } | Self::EntityRemoved { .. } | Self::Unloaded { .. }
        )
    }

    /// Returns `true` for transmission outcome events.
    #[must_use]
    pub fn is_transmission(&self) -> bool {
        matches!(self, Self::MessageSent { .. } | Self::SendFailed { .. })
    }

    /// Creates an entity added event.
    #[must_use]
    pub fn entity_added(
        installation_id: InstallationId,
        kind: EntityKind,
        unique_id: UniqueId,
    ) -> Self {
        Self::EntityAdded {
            installation_id,
            kind,
            unique_id,
        }
    }

    /// Creates an entity removed event.
    #[must_use]
    pub fn entity_removed(
        installation_id: InstallationId,
        kind: EntityKind,
        unique_id: UniqueId,
    ) -> Self {
        Self::EntityRemoved {
            installation_id,
            kind,
            unique_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installation_id_extraction() {
        let id = InstallationId::new();
        let uid = UniqueId::new("x");

        assert_eq!(
            IntegrationEvent::entity_added(id, EntityKind::Slider, uid.clone()).installation_id(),
            id
        );
        assert_eq!(
            IntegrationEvent::SliderChanged {
                installation_id: id,
                unique_id: uid,
                value: 0.5
            }
            .installation_id(),
            id
        );
        assert_eq!(
            IntegrationEvent::Unloaded {
                installation_id: id
            }
            .installation_id(),
            id
        );
    }

    #[test]
    fn classification() {
        let id = InstallationId::new();
        let removed = IntegrationEvent::entity_removed(id, EntityKind::Button, UniqueId::new("b"));
        assert!(removed.is_lifecycle());
        assert!(!removed.is_transmission());

        let sent = IntegrationEvent::MessageSent {
            installation_id: id,
            endpoint_id: UniqueId::new("e"),
            address: "/x".to_string(),
            argument: OscType::Int(1),
        };
        assert!(sent.is_transmission());
        assert!(!sent.is_lifecycle());
    }

    #[test]
    fn entity_kind_display() {
        assert_eq!(EntityKind::Endpoint.to_string(), "endpoint");
        assert_eq!(EntityKind::Slider.to_string(), "slider");
    }
}
