// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for OSC control entities.
//!
//! Each type validates its invariants at construction time, so entities and
//! endpoints never hold an unusable address or range.
//!
//! # Types
//!
//! - [`ValueType`] - Declared OSC argument type (float, int, bool)
//! - [`OscValue`] - Caller-supplied value before coercion
//! - [`OscAddress`] - Validated OSC address (`/path`)
//! - [`SliderRange`] - Slider min/max/step
//! - [`UniqueId`] - Stable entity identifier

mod osc_address;
mod osc_value;
mod slider_range;
mod unique_id;
mod value_type;

pub use osc_address::OscAddress;
pub use osc_value::OscValue;
pub use slider_range::SliderRange;
pub use unique_id::UniqueId;
pub use value_type::ValueType;
