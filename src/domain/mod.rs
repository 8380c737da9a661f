// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value objects with ZERO external dependencies.
//!
//! This module contains pure domain types and business rules shared by the
//! comparison core, the configuration layer and the host adapters. It has no
//! dependencies on external crates (except `std`) to keep it testable in
//! isolation.
//!
//! # Modules
//!
//! - [`ui`]: Slider value objects ([`SliderPercent`](ui::SliderPercent),
//!   [`AutoplayDuration`](ui::AutoplayDuration), [`SlideMode`](ui::SlideMode))

pub mod ui;
