// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stable identifiers for endpoints, buttons and sliders.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::OscAddress;
use crate::event::InstallationId;

/// Stable identifier of an entity within the host's entity registry.
///
/// Derived identifiers are deterministic, so re-creating the same endpoint
/// on the same installation yields the same id:
///
/// - endpoint: `{installation}_{address slug}`
/// - button: `{installation}_button_{endpoint id}`
/// - slider: `{installation}_slider_{endpoint id}`
///
/// # Examples
///
/// ```
/// use osc_control_lib::event::InstallationId;
/// use osc_control_lib::types::{OscAddress, UniqueId};
///
/// let installation = InstallationId::new();
/// let address = OscAddress::new("/ch/1/fader").unwrap();
/// let endpoint = UniqueId::for_endpoint(installation, &address);
/// assert!(endpoint.as_str().ends_with("__ch_1_fader"));
///
/// let slider = UniqueId::for_slider(installation, &endpoint);
/// assert!(slider.as_str().contains("_slider_"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueId(String);

impl UniqueId {
    /// Wraps an explicit identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the identifier of an endpoint from its OSC address.
    #[must_use]
    pub fn for_endpoint(installation: InstallationId, address: &OscAddress) -> Self {
        Self(format!("{installation}_{}", address.slug()))
    }

    /// Derives the identifier of a button bound to an endpoint.
    #[must_use]
    pub fn for_button(installation: InstallationId, endpoint: &UniqueId) -> Self {
        Self(format!("{installation}_button_{endpoint}"))
    }

    /// Derives the identifier of a slider bound to an endpoint.
    #[must_use]
    pub fn for_slider(installation: InstallationId, endpoint: &UniqueId) -> Self {
        Self(format!("{installation}_slider_{endpoint}"))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UniqueId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UniqueId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for UniqueId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
