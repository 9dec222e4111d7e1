// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Installation event channel.

use tokio::sync::broadcast;

use super::IntegrationEvent;

/// Events buffered per receiver before it starts lagging.
pub const EVENT_CAPACITY: usize = 256;

/// Broadcast channel carrying one installation's [`IntegrationEvent`]s.
///
/// The installation, its endpoints and its buttons and sliders all publish
/// through clones of the same bus. Hosts read it via
/// [`Installation::subscribe`](crate::installation::Installation::subscribe).
/// A receiver more than [`EVENT_CAPACITY`] events behind gets
/// `RecvError::Lagged` and skips to the oldest retained event.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<IntegrationEvent>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Subscribes to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<IntegrationEvent> {
        self.sender.subscribe()
    }

    /// Publishes `event` and returns how many receivers got it.
    pub fn publish(&self, event: IntegrationEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(installation = %event.installation_id(), "Event dropped, no subscribers");
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::broadcast::error::RecvError;

    use super::*;
    use crate::event::{EntityKind, InstallationId};
    use crate::types::UniqueId;

    fn added(id: InstallationId, unique_id: &str) -> IntegrationEvent {
        IntegrationEvent::entity_added(id, EntityKind::Button, UniqueId::new(unique_id))
    }

    #[test]
    fn unobserved_events_are_dropped() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(added(InstallationId::new(), "go")), 0);
    }

    #[tokio::test]
    async fn clones_publish_to_the_same_receivers() {
        let bus = EventBus::new();
        let endpoint_side = bus.clone();
        let mut host = bus.subscribe();
        let mut logger = bus.subscribe();

        let id = InstallationId::new();
        assert_eq!(endpoint_side.publish(added(id, "go")), 2);

        assert_eq!(host.recv().await.unwrap(), added(id, "go"));
        assert_eq!(logger.recv().await.unwrap(), added(id, "go"));
    }

    #[tokio::test]
    async fn slow_receiver_lags() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let id = InstallationId::new();

        for n in 0..=EVENT_CAPACITY {
            bus.publish(added(id, &n.to_string()));
        }

        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(1))));
        assert_eq!(rx.recv().await.unwrap(), added(id, "1"));
    }
}
