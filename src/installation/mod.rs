// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Installation setup and service handling.
//!
//! An [`Installation`] is what the host creates for each config entry. It
//! opens the default UDP sender, registers endpoints, buttons and sliders in
//! response to service calls, and routes UI actions to them.
//!
//! # Failure handling
//!
//! | Failure | Outcome |
//! |---------|---------|
//! | Destination cannot be resolved / socket cannot open | [`Error::NotReady`](crate::Error::NotReady) from [`Installation::setup`]; the host retries |
//! | Transmission fails | Logged and published as `SendFailed`; the action completes |
//! | Referenced endpoint missing | Logged; nothing is registered |
//!
//! # Examples
//!
//! ```no_run
//! use osc_control_lib::installation::{Installation, InstallationConfig, ServiceCall};
//!
//! # async fn example() -> osc_control_lib::Result<()> {
//! let installation = Installation::setup(
//!     InstallationConfig::from_json(r#"{"host": "192.168.1.20", "port": 10023}"#)?,
//! )
//! .await?;
//!
//! installation
//!     .call(ServiceCall::from_json(
//!         r#"{"service": "add_endpoint", "name": "Main", "osc_address": "/main/st/mix/fader"}"#,
//!     ).expect("valid service call"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod service;

pub use config::{DEFAULT_NAME, InstallationConfig};
pub use context::Installation;
pub use service::{AddButton, AddEndpoint, AddSlider, EntityTarget, ServiceCall, ServiceOutcome};
