// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OSC Control - home-automation buttons and sliders that drive Open Sound
//! Control endpoints over UDP.
//!
//! A host platform (the thing that owns the UI, the entity registry and the
//! event loop) creates one [`Installation`] per configured destination, then
//! forwards service calls and UI actions to it. Every action ends in a single
//! fire-and-forget OSC message.
//!
//! # Model
//!
//! - **Endpoint**: destination, OSC address and declared value type
//!   (float, int or bool). Values are coerced at send time.
//! - **Button**: sends one fixed value when pressed.
//! - **Slider**: sends the value it is set to and caches it for display.
//!
//! # Quick Start
//!
//! ```no_run
//! use osc_control_lib::installation::{AddButton, AddEndpoint, AddSlider};
//! use osc_control_lib::types::{OscAddress, ValueType};
//! use osc_control_lib::{Installation, InstallationConfig};
//!
//! #[tokio::main]
//! async fn main() -> osc_control_lib::Result<()> {
//!     let installation =
//!         Installation::setup(InstallationConfig::new("192.168.1.20").with_port(10023)).await?;
//!
//!     // Endpoint-indexed model
//!     let fader = installation
//!         .add_endpoint(AddEndpoint::new("Main", OscAddress::new("/main/st/mix/fader")?))
//!         .await?;
//!     let slider = installation
//!         .add_slider(AddSlider::for_endpoint("Main fader", fader))
//!         .await?;
//!     installation.set_value(&slider, 0.75).await?;
//!
//!     // Flat model: address and type inline
//!     let mute = installation
//!         .add_button(
//!             AddButton::inline("Mute", OscAddress::new("/ch/01/mix/on")?, ValueType::Int)
//!                 .with_value(0),
//!         )
//!         .await?;
//!     installation.press(&mute).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Observing Transmissions
//!
//! ```no_run
//! use osc_control_lib::event::IntegrationEvent;
//! use osc_control_lib::Installation;
//!
//! # fn example(installation: &Installation) {
//! let mut events = installation.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         if let IntegrationEvent::SendFailed { endpoint_id, error, .. } = event {
//!             eprintln!("{endpoint_id}: {error}");
//!         }
//!     }
//! });
//! # }
//! ```

pub mod endpoint;
pub mod entity;
pub mod error;
pub mod event;
pub mod installation;
pub mod protocol;
pub mod types;

pub use endpoint::{Endpoint, EndpointBuilder, EndpointInfo};
pub use entity::{Activatable, Button, Settable, Slider};
pub use error::{ConfigError, Error, ProtocolError, Result, ValueError};
pub use event::{EntityKind, EventBus, InstallationId, IntegrationEvent};
pub use installation::{Installation, InstallationConfig, ServiceCall, ServiceOutcome};
pub use protocol::{Destination, OscSink, UdpSender};
pub use types::{OscAddress, OscValue, SliderRange, UniqueId, ValueType};
