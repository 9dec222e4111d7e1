// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! UI entities that drive endpoints.
//!
//! - [`Button`]: sends one fixed value when activated
//! - [`Slider`]: sends the value it is set to and caches it for display
//!
//! Both are plain records; the host reaches them through the
//! [`Activatable`] and [`Settable`] capabilities.

mod button;
mod slider;

pub use button::Button;
pub use slider::Slider;

/// An entity that performs a one-shot action when activated.
#[allow(async_fn_in_trait)]
pub trait Activatable {
    /// Performs the action. Failures are logged, never returned.
    async fn activate(&self);
}

/// An entity holding a numeric value that can be set from the UI.
#[allow(async_fn_in_trait)]
pub trait Settable {
    /// Applies `value`. Failures are logged, never returned.
    async fn set(&self, value: f64);

    /// Returns the last value applied.
    fn value(&self) -> f64;
}
