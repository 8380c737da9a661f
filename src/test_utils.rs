// SPDX-License-Identifier: MPL-2.0
//! Shared test helpers.
//!
//! Float assertions come from `approx`; positions and sizes are `f32`, so
//! plain `assert_eq!` is only used where values are exact by construction.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

/// Tolerance for split percentages computed through several divisions.
pub const PERCENT_EPSILON: f32 = 1e-3;
