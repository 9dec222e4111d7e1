// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slider bounds and step.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Minimum, maximum and step of a slider widget.
///
/// The range only describes the UI widget. Values set on a slider are not
/// checked against it.
///
/// # Examples
///
/// ```
/// use osc_control_lib::types::SliderRange;
///
/// let range = SliderRange::new(0.0, 127.0, 1.0).unwrap();
/// assert_eq!(range.max(), 127.0);
///
/// let fader = SliderRange::default();
/// assert_eq!((fader.min(), fader.max(), fader.step()), (0.0, 1.0, 0.01));
///
/// assert!(SliderRange::new(1.0, 0.0, 0.1).is_err());
/// assert!(SliderRange::new(0.0, 1.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    min: f64,
    max: f64,
    step: f64,
}

impl SliderRange {
    /// Default lower bound.
    pub const DEFAULT_MIN: f64 = 0.0;
    /// Default upper bound.
    pub const DEFAULT_MAX: f64 = 1.0;
    /// Default step.
    pub const DEFAULT_STEP: f64 = 0.01;

    /// Creates a validated slider range.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidRange` if a bound is not finite or
    /// `min > max`, and `ValueError::InvalidStep` if `step` is not a positive
    /// finite number.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ValueError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ValueError::InvalidRange { min, max });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ValueError::InvalidStep(step));
        }
        Ok(Self { min, max, step })
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns the step.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }
}

impl Default for SliderRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
            step: Self::DEFAULT_STEP,
        }
    }
}

#[derive(Deserialize)]
struct RawSliderRange {
    min: f64,
    max: f64,
    step: f64,
}

impl<'de> Deserialize<'de> for SliderRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSliderRange::deserialize(deserializer)?;
        Self::new(raw.min, raw.max, raw.step).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_range() {
        let range = SliderRange::new(-1.0, 1.0, 0.5).unwrap();
        assert!((range.min() + 1.0).abs() < f64::EPSILON);
        assert!((range.max() - 1.0).abs() < f64::EPSILON);
        assert!((range.step() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_range_is_allowed() {
        assert!(SliderRange::new(5.0, 5.0, 1.0).is_ok());
    }

    #[test]
    fn inverted_range() {
        assert_eq!(
            SliderRange::new(2.0, 1.0, 0.1),
            Err(ValueError::InvalidRange { min: 2.0, max: 1.0 })
        );
    }

    #[test]
    fn non_finite_bounds() {
        assert!(SliderRange::new(f64::NAN, 1.0, 0.1).is_err());
        assert!(SliderRange::new(0.0, f64::INFINITY, 0.1).is_err());
    }

    #[test]
    fn invalid_step() {
        assert_eq!(
            SliderRange::new(0.0, 1.0, -0.1),
            Err(ValueError::InvalidStep(-0.1))
        );
        assert!(SliderRange::new(0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: SliderRange =
            serde_json::from_str(r#"{"min": 0, "max": 10, "step": 1}"#).unwrap();
        assert!((ok.max() - 10.0).abs() < f64::EPSILON);
        assert!(serde_json::from_str::<SliderRange>(r#"{"min": 1, "max": 0, "step": 1}"#).is_err());
    }
}
