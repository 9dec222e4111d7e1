// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OSC address pattern type.
//!
//! Patterns are sent as-is; wildcard matching (`*`, `?`, `[...]`, `{a,b}`)
//! is done by the receiving server.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// An OSC address such as `/mixer/channel/1/fader`.
///
/// Addresses must start with `/` and contain no whitespace or NUL. Pattern
/// characters are allowed, so one message can target several parameters.
///
/// # Examples
///
/// ```
/// use osc_control_lib::types::OscAddress;
///
/// let addr = OscAddress::new("/lights/scene").unwrap();
/// assert_eq!(addr.as_str(), "/lights/scene");
/// assert_eq!(addr.slug(), "_lights_scene");
///
/// assert!(OscAddress::new("lights").is_err());
/// assert!(OscAddress::new("/a b").is_err());
/// assert!(OscAddress::new("/ch/*/mix/on").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OscAddress(String);

impl OscAddress {
    /// Creates a validated OSC address.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidAddress` if the address is empty, does not
    /// start with `/`, or contains whitespace or NUL.
    pub fn new(address: impl Into<String>) -> Result<Self, ValueError> {
        let address = address.into();
        let valid = address.starts_with('/')
            && !address
                .chars()
                .any(|c| c.is_whitespace() || c == '\0');
        if valid {
            Ok(Self(address))
        } else {
            Err(ValueError::InvalidAddress(address))
        }
    }

    /// Returns the address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the address with every `/` replaced by `_`, for building
    /// entity identifiers.
    #[must_use]
    pub fn slug(&self) -> String {
        self.0.replace('/', "_")
    }
}

impl fmt::Display for OscAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OscAddress {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for OscAddress {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OscAddress> for String {
    fn from(address: OscAddress) -> Self {
        address.0
    }
}
