// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-installation state and service handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use super::config::InstallationConfig;
use super::service::{AddButton, AddEndpoint, AddSlider, EntityTarget, ServiceCall, ServiceOutcome};
use crate::endpoint::{Endpoint, EndpointInfo};
use crate::entity::{Activatable, Button, Settable, Slider};
use crate::error::{Error, ValueError};
use crate::event::{EntityKind, EventBus, InstallationId, IntegrationEvent};
use crate::protocol::{Destination, OscSink, UdpSender};
use crate::types::{SliderRange, UniqueId, ValueType};

/// One configured installation of the integration.
///
/// This is the context object handed to every service handler: it owns the
/// UDP senders, the endpoints and the button/slider entities of a single
/// host config entry.
///
/// # Examples
///
/// ```no_run
/// use osc_control_lib::installation::{AddButton, AddSlider, Installation, InstallationConfig};
/// use osc_control_lib::types::{OscAddress, ValueType};
///
/// #[tokio::main]
/// async fn main() -> osc_control_lib::Result<()> {
///     let installation = Installation::setup(InstallationConfig::new("192.168.1.20")).await?;
///
///     let go = installation
///         .add_button(AddButton::inline("Go", OscAddress::new("/cue/go")?, ValueType::Int))
///         .await?;
///     installation.press(&go).await?;
///
///     let fader = installation
///         .add_slider(AddSlider::inline("Master", OscAddress::new("/master")?, ValueType::Float))
///         .await?;
///     installation.set_value(&fader, 0.8).await?;
///
///     installation.unload().await;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Installation {
    id: InstallationId,
    config: InstallationConfig,
    destination: Destination,
    state: RwLock<InstallationState>,
    events: EventBus,
}

#[derive(Debug, Default)]
struct InstallationState {
    /// One sender per destination, shared by its endpoints.
    senders: HashMap<Destination, Arc<dyn OscSink>>,
    endpoints: HashMap<UniqueId, Arc<Endpoint>>,
    buttons: HashMap<UniqueId, Arc<Button>>,
    sliders: HashMap<UniqueId, Arc<Slider>>,
    unloaded: bool,
}

impl InstallationState {
    fn contains(&self, unique_id: &UniqueId) -> bool {
        self.endpoints.contains_key(unique_id)
            || self.buttons.contains_key(unique_id)
            || self.sliders.contains_key(unique_id)
    }

    fn is_referenced(&self, endpoint_id: &UniqueId) -> bool {
        self.buttons
            .values()
            .any(|b| b.endpoint().unique_id() == endpoint_id)
            || self
                .sliders
                .values()
                .any(|s| s.endpoint().unique_id() == endpoint_id)
    }
}

/// An endpoint resolved for a new button or slider.
struct ResolvedTarget {
    endpoint: Arc<Endpoint>,
    /// Set when the endpoint was created for an inline target.
    created: bool,
}

impl Installation {
    /// Sets up an installation, opening a UDP sender for its default
    /// destination.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an invalid configuration and
    /// `Error::NotReady` if the destination cannot be resolved or the socket
    /// cannot be opened; the host is expected to retry setup later.
    pub async fn setup(config: InstallationConfig) -> Result<Self, Error> {
        config.validate()?;
        let destination = config.destination();

        match UdpSender::connect(destination.clone()).await {
            Ok(sender) => Self::with_sink(config, Arc::new(sender)),
            Err(e) => {
                tracing::error!(%destination, error = %e, "Failed to connect to OSC server");
                Err(Error::NotReady(e.to_string()))
            }
        }
    }

    /// Sets up an installation sending through `sink` for its default
    /// destination.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an invalid configuration.
    pub fn with_sink(config: InstallationConfig, sink: Arc<dyn OscSink>) -> Result<Self, Error> {
        config.validate()?;
        let id = config.installation_id.unwrap_or_default();
        let destination = config.destination();

        let mut state = InstallationState::default();
        state.senders.insert(destination.clone(), sink);

        tracing::info!(installation = %id, name = %config.name, %destination, "Set up OSC installation");

        Ok(Self {
            id,
            config,
            destination,
            state: RwLock::new(state),
            events: EventBus::new(),
        })
    }

    /// Returns the installation id.
    #[must_use]
    pub fn id(&self) -> InstallationId {
        self.id
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &InstallationConfig {
        &self.config
    }

    /// Returns the default destination.
    #[must_use]
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Subscribes to this installation's events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<IntegrationEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers an endpoint.
    ///
    /// A host or port override gets its own sender, shared with any other
    /// endpoint on the same destination.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateEntity` if the unique id is taken and
    /// `Error::Protocol` if an override destination cannot be opened.
    pub async fn add_endpoint(&self, request: AddEndpoint) -> Result<UniqueId, Error> {
        let destination = self
            .destination
            .with_overrides(request.host.as_deref(), request.port);

        let mut builder = Endpoint::builder(request.name, request.osc_address)
            .with_value_type(request.value_type)
            .with_events(self.events.clone());
        if let Some(unique_id) = request.unique_id {
            builder = builder.with_unique_id(unique_id);
        }
        let unique_id = builder.unique_id(self.id);

        self.check_endpoint_id(&*self.state.read().await, &unique_id)?;
        let sink = self.sender_for(&destination).await?;

        let mut state = self.state.write().await;
        self.check_endpoint_id(&state, &unique_id)?;
        let sink = Arc::clone(
            state
                .senders
                .entry(destination.clone())
                .or_insert(sink),
        );

        let endpoint = builder.build(self.id, destination, sink);
        tracing::info!(
            installation = %self.id,
            %unique_id,
            name = endpoint.name(),
            destination = %endpoint.destination(),
            address = %endpoint.address(),
            value_type = %endpoint.value_type(),
            "Added OSC endpoint"
        );
        state.endpoints.insert(unique_id.clone(), Arc::new(endpoint));
        drop(state);

        self.events.publish(IntegrationEvent::entity_added(
            self.id,
            EntityKind::Endpoint,
            unique_id.clone(),
        ));
        Ok(unique_id)
    }

    /// Registers a button.
    ///
    /// # Errors
    ///
    /// Returns `Error::EndpointNotFound` if the targeted endpoint does not
    /// exist (nothing is registered), and `Error::DuplicateEntity` if the
    /// button's unique id is taken.
    pub async fn add_button(&self, request: AddButton) -> Result<UniqueId, Error> {
        let mut state = self.state.write().await;
        if state.unloaded {
            return Err(Error::Unloaded);
        }

        let target = self.resolve_target(&state, &request.target, &request.name)?;
        let unique_id = request
            .unique_id
            .unwrap_or_else(|| UniqueId::for_button(self.id, target.endpoint.unique_id()));
        if state.contains(&unique_id) {
            tracing::error!(installation = %self.id, %unique_id, "Button already exists");
            return Err(Error::DuplicateEntity(unique_id.to_string()));
        }

        let endpoint = Arc::clone(&target.endpoint);
        let button = Button::new(unique_id.clone(), request.name, request.value, endpoint)
            .with_events(self.events.clone());
        tracing::info!(
            installation = %self.id,
            %unique_id,
            name = button.name(),
            address = %button.endpoint().address(),
            value = %button.value(),
            "Added OSC button"
        );
        self.commit_target(&mut state, &target);
        state.buttons.insert(unique_id.clone(), Arc::new(button));
        drop(state);

        self.publish_added(&target, EntityKind::Button, &unique_id);
        Ok(unique_id)
    }

    /// Registers a slider.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for an invalid range or an inline bool target,
    /// `Error::EndpointNotFound`
    /// if the targeted endpoint does not exist (nothing is registered), and
    /// `Error::DuplicateEntity` if the slider's unique id is taken.
    pub async fn add_slider(&self, request: AddSlider) -> Result<UniqueId, Error> {
        let range = SliderRange::new(request.min, request.max, request.step).inspect_err(|e| {
            tracing::error!(installation = %self.id, name = %request.name, error = %e, "Invalid slider range");
        })?;
        if let EntityTarget::Inline {
            value_type: ValueType::Bool,
            ..
        } = request.target
        {
            tracing::error!(installation = %self.id, name = %request.name, "Sliders cannot send bool values");
            return Err(ValueError::InvalidValueType(ValueType::Bool.to_string()).into());
        }

        let mut state = self.state.write().await;
        if state.unloaded {
            return Err(Error::Unloaded);
        }

        let target = self.resolve_target(&state, &request.target, &request.name)?;
        let unique_id = request
            .unique_id
            .unwrap_or_else(|| UniqueId::for_slider(self.id, target.endpoint.unique_id()));
        if state.contains(&unique_id) {
            tracing::error!(installation = %self.id, %unique_id, "Slider already exists");
            return Err(Error::DuplicateEntity(unique_id.to_string()));
        }

        let endpoint = Arc::clone(&target.endpoint);
        let slider = Slider::new(unique_id.clone(), request.name, range, endpoint)
            .with_events(self.events.clone());
        tracing::info!(
            installation = %self.id,
            %unique_id,
            name = slider.name(),
            address = %slider.endpoint().address(),
            min = range.min(),
            max = range.max(),
            step = range.step(),
            "Added OSC slider"
        );
        self.commit_target(&mut state, &target);
        state.sliders.insert(unique_id.clone(), Arc::new(slider));
        drop(state);

        self.publish_added(&target, EntityKind::Slider, &unique_id);
        Ok(unique_id)
    }

    /// Removes an endpoint, button or slider.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if nothing has this id, and
    /// `Error::EndpointInUse` for an endpoint still targeted by a button or
    /// slider.
    pub async fn remove_entity(&self, unique_id: &UniqueId) -> Result<EntityKind, Error> {
        let mut state = self.state.write().await;
        if state.unloaded {
            return Err(Error::Unloaded);
        }

        let kind = if state.buttons.remove(unique_id).is_some() {
            EntityKind::Button
        } else if state.sliders.remove(unique_id).is_some() {
            EntityKind::Slider
        } else if state.endpoints.contains_key(unique_id) {
            if state.is_referenced(unique_id) {
                tracing::warn!(installation = %self.id, %unique_id, "Endpoint still in use");
                return Err(Error::EndpointInUse(unique_id.to_string()));
            }
            if let Some(endpoint) = state.endpoints.remove(unique_id) {
                self.release_sender(&mut state, endpoint.destination());
            }
            EntityKind::Endpoint
        } else {
            return Err(Error::EntityNotFound(unique_id.to_string()));
        };
        drop(state);

        tracing::info!(installation = %self.id, %unique_id, %kind, "Removed OSC entity");
        self.events.publish(IntegrationEvent::entity_removed(
            self.id,
            kind,
            unique_id.clone(),
        ));
        Ok(kind)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Presses a button.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if no button has this id. Transmission
    /// failures are logged, not returned.
    pub async fn press(&self, unique_id: &UniqueId) -> Result<(), Error> {
        let button = self
            .button(unique_id)
            .await
            .ok_or_else(|| Error::EntityNotFound(unique_id.to_string()))?;
        button.activate().await;
        Ok(())
    }

    /// Sets a slider's value.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if no slider has this id. Transmission
    /// failures are logged, not returned.
    pub async fn set_value(&self, unique_id: &UniqueId, value: f64) -> Result<(), Error> {
        let slider = self
            .slider(unique_id)
            .await
            .ok_or_else(|| Error::EntityNotFound(unique_id.to_string()))?;
        slider.set(value).await;
        Ok(())
    }

    /// Dispatches a host service call.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying handler.
    pub async fn call(&self, call: ServiceCall) -> Result<ServiceOutcome, Error> {
        tracing::debug!(installation = %self.id, service = call.name(), "Handling service call");

        match call {
            ServiceCall::AddEndpoint(request) => {
                self.add_endpoint(request)
                    .await
                    .map(|unique_id| ServiceOutcome::Registered {
                        kind: EntityKind::Endpoint,
                        unique_id,
                    })
            }
            ServiceCall::AddButton(request) => {
                self.add_button(request)
                    .await
                    .map(|unique_id| ServiceOutcome::Registered {
                        kind: EntityKind::Button,
                        unique_id,
                    })
            }
            ServiceCall::AddSlider(request) => {
                self.add_slider(request)
                    .await
                    .map(|unique_id| ServiceOutcome::Registered {
                        kind: EntityKind::Slider,
                        unique_id,
                    })
            }
            ServiceCall::Press { unique_id } => self
                .press(&unique_id)
                .await
                .map(|()| ServiceOutcome::Dispatched),
            ServiceCall::SetValue { unique_id, value } => self
                .set_value(&unique_id, value)
                .await
                .map(|()| ServiceOutcome::Dispatched),
            ServiceCall::RemoveEntity { unique_id } => self
                .remove_entity(&unique_id)
                .await
                .map(|kind| ServiceOutcome::Removed { kind, unique_id }),
        }
    }

    /// Drops every entity and sender; later calls fail with `Error::Unloaded`.
    ///
    /// Returns `false` if the installation was already unloaded.
    pub async fn unload(&self) -> bool {
        let mut state = self.state.write().await;
        if state.unloaded {
            return false;
        }
        let entities = state.endpoints.len() + state.buttons.len() + state.sliders.len();
        *state = InstallationState {
            unloaded: true,
            ..InstallationState::default()
        };
        drop(state);

        tracing::info!(installation = %self.id, entities, "Unloaded OSC installation");
        self.events.publish(IntegrationEvent::Unloaded {
            installation_id: self.id,
        });
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns an endpoint by unique id.
    pub async fn endpoint(&self, unique_id: &UniqueId) -> Option<Arc<Endpoint>> {
        self.state.read().await.endpoints.get(unique_id).cloned()
    }

    /// Returns a button by unique id.
    pub async fn button(&self, unique_id: &UniqueId) -> Option<Arc<Button>> {
        self.state.read().await.buttons.get(unique_id).cloned()
    }

    /// Returns a slider by unique id.
    pub async fn slider(&self, unique_id: &UniqueId) -> Option<Arc<Slider>> {
        self.state.read().await.sliders.get(unique_id).cloned()
    }

    /// Returns descriptions of all endpoints, ordered by unique id.
    pub async fn endpoints(&self) -> Vec<EndpointInfo> {
        let mut infos: Vec<_> = self
            .state
            .read()
            .await
            .endpoints
            .values()
            .map(|e| e.info())
            .collect();
        infos.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
        infos
    }

    /// Returns all buttons.
    pub async fn buttons(&self) -> Vec<Arc<Button>> {
        self.state.read().await.buttons.values().cloned().collect()
    }

    /// Returns all sliders.
    pub async fn sliders(&self) -> Vec<Arc<Slider>> {
        self.state.read().await.sliders.values().cloned().collect()
    }

    /// Returns `true` once [`unload`](Self::unload) has run.
    pub async fn is_unloaded(&self) -> bool {
        self.state.read().await.unloaded
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn check_endpoint_id(&self, state: &InstallationState, unique_id: &UniqueId) -> Result<(), Error> {
        if state.unloaded {
            return Err(Error::Unloaded);
        }
        if state.contains(unique_id) {
            tracing::error!(installation = %self.id, %unique_id, "Endpoint already exists");
            return Err(Error::DuplicateEntity(unique_id.to_string()));
        }
        Ok(())
    }

    /// Returns the pooled sender for `destination`, or opens a new one.
    ///
    /// A new sender is not pooled here; the caller inserts it once the
    /// endpoint using it is committed.
    async fn sender_for(&self, destination: &Destination) -> Result<Arc<dyn OscSink>, Error> {
        {
            let state = self.state.read().await;
            if state.unloaded {
                return Err(Error::Unloaded);
            }
            if let Some(sink) = state.senders.get(destination) {
                return Ok(Arc::clone(sink));
            }
        }

        let sender = UdpSender::connect(destination.clone())
            .await
            .inspect_err(|e| {
                tracing::error!(installation = %self.id, %destination, error = %e, "Failed to open OSC sender");
            })?;
        Ok(Arc::new(sender))
    }

    /// Closes the sender for an override destination no endpoint uses any more.
    fn release_sender(&self, state: &mut InstallationState, destination: &Destination) {
        if destination == &self.destination
            || state
                .endpoints
                .values()
                .any(|e| e.destination() == destination)
        {
            return;
        }
        if state.senders.remove(destination).is_some() {
            tracing::debug!(installation = %self.id, %destination, "Closed OSC sender");
        }
    }

    fn resolve_target(
        &self,
        state: &InstallationState,
        target: &EntityTarget,
        name: &str,
    ) -> Result<ResolvedTarget, Error> {
        match target {
            EntityTarget::Endpoint { endpoint_id } => match state.endpoints.get(endpoint_id) {
                Some(endpoint) => Ok(ResolvedTarget {
                    endpoint: Arc::clone(endpoint),
                    created: false,
                }),
                None => {
                    tracing::error!(installation = %self.id, %endpoint_id, name, "Referenced endpoint not found");
                    Err(Error::EndpointNotFound(endpoint_id.to_string()))
                }
            },
            EntityTarget::Inline {
                osc_address,
                value_type,
            } => {
                let unique_id = UniqueId::for_endpoint(self.id, osc_address);
                if let Some(endpoint) = state.endpoints.get(&unique_id) {
                    if endpoint.value_type() != *value_type
                        || endpoint.destination() != &self.destination
                    {
                        tracing::error!(
                            installation = %self.id,
                            %unique_id,
                            existing = %endpoint.value_type(),
                            requested = %value_type,
                            "Inline address conflicts with an existing endpoint"
                        );
                        return Err(Error::DuplicateEntity(unique_id.to_string()));
                    }
                    return Ok(ResolvedTarget {
                        endpoint: Arc::clone(endpoint),
                        created: false,
                    });
                }

                let sink = state
                    .senders
                    .get(&self.destination)
                    .cloned()
                    .ok_or(Error::Unloaded)?;
                let endpoint = Endpoint::builder(name, osc_address.clone())
                    .with_value_type(*value_type)
                    .with_unique_id(unique_id)
                    .with_events(self.events.clone())
                    .build(self.id, self.destination.clone(), sink);
                Ok(ResolvedTarget {
                    endpoint: Arc::new(endpoint),
                    created: true,
                })
            }
        }
    }

    fn commit_target(&self, state: &mut InstallationState, target: &ResolvedTarget) {
        if target.created {
            let endpoint = &target.endpoint;
            tracing::debug!(
                installation = %self.id,
                unique_id = %endpoint.unique_id(),
                address = %endpoint.address(),
                "Created implicit endpoint"
            );
            state
                .endpoints
                .insert(endpoint.unique_id().clone(), Arc::clone(endpoint));
        }
    }

    fn publish_added(&self, target: &ResolvedTarget, kind: EntityKind, unique_id: &UniqueId) {
        if target.created {
            self.events.publish(IntegrationEvent::entity_added(
                self.id,
                EntityKind::Endpoint,
                target.endpoint.unique_id().clone(),
            ));
        }
        self.events
            .publish(IntegrationEvent::entity_added(self.id, kind, unique_id.clone()));
    }
}
