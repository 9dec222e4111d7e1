// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declared OSC argument types and send-time coercion.

use std::fmt;
use std::str::FromStr;

use rosc::OscType;
use serde::{Deserialize, Serialize};

use super::OscValue;
use crate::error::ValueError;

/// The OSC argument type an endpoint transmits.
///
/// Values are coerced to this type when they are sent, never when an entity
/// is created.
///
/// # Examples
///
/// ```
/// use osc_control_lib::types::{OscValue, ValueType};
/// use rosc::OscType;
///
/// assert_eq!(ValueType::Int.coerce(OscValue::Float(3.7)).unwrap(), OscType::Int(3));
/// assert_eq!(ValueType::Bool.coerce(OscValue::Int(0)).unwrap(), OscType::Bool(false));
/// assert_eq!("float".parse::<ValueType>().unwrap(), ValueType::Float);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// 32-bit OSC float (`f`).
    #[default]
    Float,
    /// 32-bit OSC int (`i`).
    Int,
    /// OSC boolean (`T` / `F`).
    Bool,
}

impl ValueType {
    /// Returns the configuration name of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Bool => "bool",
        }
    }

    /// Coerces a caller-supplied value to this type.
    ///
    /// - float: numeric cast
    /// - int: truncation toward zero
    /// - bool: truthiness (non-zero is `true`)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` when a NaN or infinite float is coerced
    /// to int, and `ValueError::IntOutOfRange` when the truncated value does
    /// not fit in 32 bits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn coerce(self, value: OscValue) -> Result<OscType, ValueError> {
        match self {
            Self::Float => Ok(OscType::Float(match value {
                OscValue::Float(v) => v as f32,
                OscValue::Int(v) => v as f32,
                OscValue::Bool(v) => f32::from(u8::from(v)),
            })),
            Self::Int => match value {
                OscValue::Float(v) => {
                    if !v.is_finite() {
                        return Err(ValueError::NotFinite(v));
                    }
                    let truncated = v.trunc();
                    if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
                        return Err(ValueError::IntOutOfRange(v));
                    }
                    Ok(OscType::Int(truncated as i32))
                }
                OscValue::Int(v) => i32::try_from(v)
                    .map(OscType::Int)
                    .map_err(|_| ValueError::IntOutOfRange(v as f64)),
                OscValue::Bool(v) => Ok(OscType::Int(i32::from(v))),
            },
            Self::Bool => Ok(OscType::Bool(value.is_truthy())),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "float" => Ok(Self::Float),
            "int" => Ok(Self::Int),
            "bool" => Ok(Self::Bool),
            _ => Err(ValueError::InvalidValueType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_passthrough() {
        assert_eq!(
            ValueType::Float.coerce(OscValue::Float(0.25)).unwrap(),
            OscType::Float(0.25)
        );
        assert_eq!(
            ValueType::Float.coerce(OscValue::Int(2)).unwrap(),
            OscType::Float(2.0)
        );
        assert_eq!(
            ValueType::Float.coerce(OscValue::Bool(true)).unwrap(),
            OscType::Float(1.0)
        );
    }

    #[test]
    fn int_truncates_toward_zero() {
        assert_eq!(
            ValueType::Int.coerce(OscValue::Float(3.7)).unwrap(),
            OscType::Int(3)
        );
        assert_eq!(
            ValueType::Int.coerce(OscValue::Float(-3.7)).unwrap(),
            OscType::Int(-3)
        );
        assert_eq!(
            ValueType::Int.coerce(OscValue::Bool(true)).unwrap(),
            OscType::Int(1)
        );
    }

    #[test]
    fn int_rejects_unrepresentable_values() {
        assert!(matches!(
            ValueType::Int.coerce(OscValue::Float(f64::NAN)),
            Err(ValueError::NotFinite(_))
        ));
        assert!(matches!(
            ValueType::Int.coerce(OscValue::Float(f64::INFINITY)),
            Err(ValueError::NotFinite(_))
        ));
        assert!(matches!(
            ValueType::Int.coerce(OscValue::Float(3e10)),
            Err(ValueError::IntOutOfRange(_))
        ));
        assert!(matches!(
            ValueType::Int.coerce(OscValue::Int(i64::from(i32::MAX) + 1)),
            Err(ValueError::IntOutOfRange(_))
        ));
    }

    #[test]
    fn bool_is_truthiness() {
        assert_eq!(
            ValueType::Bool.coerce(OscValue::Int(0)).unwrap(),
            OscType::Bool(false)
        );
        assert_eq!(
            ValueType::Bool.coerce(OscValue::Float(0.0)).unwrap(),
            OscType::Bool(false)
        );
        assert_eq!(
            ValueType::Bool.coerce(OscValue::Float(-0.5)).unwrap(),
            OscType::Bool(true)
        );
        assert_eq!(
            ValueType::Bool.coerce(OscValue::Int(42)).unwrap(),
            OscType::Bool(true)
        );
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("INT".parse::<ValueType>().unwrap(), ValueType::Int);
        assert_eq!(" bool ".parse::<ValueType>().unwrap(), ValueType::Bool);
        assert!("double".parse::<ValueType>().is_err());
        assert_eq!(ValueType::Float.to_string(), "float");
    }

    #[test]
    fn default_is_float() {
        assert_eq!(ValueType::default(), ValueType::Float);
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&ValueType::Bool).unwrap();
        assert_eq!(json, "\"bool\"");
        let parsed: ValueType = serde_json::from_str("\"int\"").unwrap();
        assert_eq!(parsed, ValueType::Int);
    }
}
