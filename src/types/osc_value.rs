// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Caller-supplied values before coercion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value handed to an endpoint, before it is coerced to the endpoint's
/// declared [`ValueType`](super::ValueType).
///
/// Deserializes from plain JSON scalars, so service-call payloads such as
/// `{"value": 1}`, `{"value": 0.5}` or `{"value": true}` map directly.
///
/// # Examples
///
/// ```
/// use osc_control_lib::types::OscValue;
///
/// let v: OscValue = serde_json::from_str("0.5").unwrap();
/// assert_eq!(v, OscValue::Float(0.5));
/// assert!(OscValue::from(3).is_truthy());
/// assert!(!OscValue::from(false).is_truthy());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OscValue {
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Float(f64),
}

impl OscValue {
    /// Returns the truthiness of this value: non-zero numbers and `true`.
    ///
    /// NaN counts as truthy.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_truthy(&self) -> bool {
        match *self {
            Self::Bool(v) => v,
            Self::Int(v) => v != 0,
            Self::Float(v) => v != 0.0,
        }
    }

    /// Returns the value as a float, for display caches.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Bool(v) => f64::from(u8::from(v)),
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl Default for OscValue {
    fn default() -> Self {
        Self::Float(1.0)
    }
}

impl fmt::Display for OscValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for OscValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for OscValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<i64> for OscValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OscValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for OscValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_json_scalars() {
        assert_eq!(
            serde_json::from_str::<OscValue>("true").unwrap(),
            OscValue::Bool(true)
        );
        assert_eq!(
            serde_json::from_str::<OscValue>("7").unwrap(),
            OscValue::Int(7)
        );
        assert_eq!(
            serde_json::from_str::<OscValue>("-2.5").unwrap(),
            OscValue::Float(-2.5)
        );
    }

    #[test]
    fn truthiness() {
        assert!(OscValue::Float(f64::NAN).is_truthy());
        assert!(OscValue::Int(-1).is_truthy());
        assert!(!OscValue::Float(0.0).is_truthy());
        assert!(!OscValue::Int(0).is_truthy());
    }

    #[test]
    fn default_matches_button_default() {
        assert_eq!(OscValue::default(), OscValue::Float(1.0));
    }

    #[test]
    fn as_f64_conversion() {
        assert!((OscValue::Bool(true).as_f64() - 1.0).abs() < f64::EPSILON);
        assert!((OscValue::Int(4).as_f64() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display() {
        assert_eq!(OscValue::Int(3).to_string(), "3");
        assert_eq!(OscValue::Float(0.5).to_string(), "0.5");
        assert_eq!(OscValue::Bool(false).to_string(), "false");
    }
}
