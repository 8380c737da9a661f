// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for slider values,
//! ensuring they are always within valid ranges.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// =============================================================================
// Slider Bounds
// =============================================================================

/// Split position bounds (0% to 100%).
pub mod slider_bounds {
    /// Leftmost split position.
    pub const MIN_PERCENT: f32 = 0.0;
    /// Rightmost split position.
    pub const MAX_PERCENT: f32 = 100.0;
    /// Neutral midpoint, also used when no position can be computed.
    pub const DEFAULT_PERCENT: f32 = 50.0;
}

// =============================================================================
// SliderPercent
// =============================================================================

/// Split position of a comparison slider, guaranteed to be within 0%–100%.
///
/// Construction clamps out-of-range values and maps `NaN` to the neutral
/// midpoint, so consumers never see an invalid position.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SliderPercent(f32);

impl SliderPercent {
    /// Creates a new split position, clamping the value to the valid range.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        if percent.is_nan() {
            return Self::default();
        }
        Self(percent.clamp(slider_bounds::MIN_PERCENT, slider_bounds::MAX_PERCENT))
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the position as a fraction (e.g., 50% → 0.5).
    #[must_use]
    pub fn as_fraction(self) -> f32 {
        self.0 / 100.0
    }

    /// Returns the complementary percentage (`100 - value`).
    ///
    /// This is the right-hand clip inset of the foreground image.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self(slider_bounds::MAX_PERCENT - self.0)
    }

    /// Returns true if the split sits on the left edge.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= slider_bounds::MIN_PERCENT
    }

    /// Returns true if the split sits on the right edge.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= slider_bounds::MAX_PERCENT
    }
}

impl Default for SliderPercent {
    fn default() -> Self {
        Self(slider_bounds::DEFAULT_PERCENT)
    }
}

impl fmt::Display for SliderPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

// =============================================================================
// Autoplay Bounds
// =============================================================================

/// Autoplay half-period bounds (100 ms to 60 s).
pub mod autoplay_bounds {
    /// Minimum half-period in milliseconds.
    pub const MIN_MS: u32 = 100;
    /// Maximum half-period in milliseconds.
    pub const MAX_MS: u32 = 60_000;
    /// Default half-period in milliseconds.
    pub const DEFAULT_MS: u32 = 5000;
}

// =============================================================================
// AutoplayDuration
// =============================================================================

/// Time for one autoplay sweep from 0% to 100%.
///
/// A full ping-pong cycle (0 → 100 → 0) takes twice this duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoplayDuration(u32);

impl AutoplayDuration {
    /// Creates a new half-period, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u32) -> Self {
        Self(millis.clamp(autoplay_bounds::MIN_MS, autoplay_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u32 {
        self.0
    }

    /// Returns the half-period as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }

    /// Returns the length of a full 0 → 100 → 0 cycle.
    #[must_use]
    pub fn cycle(self) -> Duration {
        self.as_duration() * 2
    }
}

impl Default for AutoplayDuration {
    fn default() -> Self {
        Self(autoplay_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// SlideMode
// =============================================================================

/// How pointer input moves the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlideMode {
    /// The split follows the pointer while it hovers and resets on exit.
    #[default]
    Hover,
    /// The split moves only while the pointer is held down and stays put
    /// after release.
    Drag,
}

impl SlideMode {
    /// Returns the lowercase identifier used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SlideMode::Hover => "hover",
            SlideMode::Drag => "drag",
        }
    }
}

impl fmt::Display for SlideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown slide mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSlideMode(pub String);

impl fmt::Display for UnknownSlideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid slide mode: {}", self.0)
    }
}

impl FromStr for SlideMode {
    type Err = UnknownSlideMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hover" => Ok(SlideMode::Hover),
            "drag" => Ok(SlideMode::Drag),
            other => Err(UnknownSlideMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_percent_clamps() {
        assert!((SliderPercent::new(-20.0).value() - slider_bounds::MIN_PERCENT).abs() < f32::EPSILON);
        assert!((SliderPercent::new(250.0).value() - slider_bounds::MAX_PERCENT).abs() < f32::EPSILON);
        assert!((SliderPercent::new(42.5).value() - 42.5).abs() < f32::EPSILON);
    }

    #[test]
    fn slider_percent_nan_is_neutral() {
        assert_eq!(SliderPercent::new(f32::NAN), SliderPercent::default());
    }

    #[test]
    fn slider_percent_infinity_clamps() {
        assert!(SliderPercent::new(f32::INFINITY).is_max());
        assert!(SliderPercent::new(f32::NEG_INFINITY).is_min());
    }

    #[test]
    fn slider_percent_fraction_and_inverse() {
        let percent = SliderPercent::new(25.0);
        assert!((percent.as_fraction() - 0.25).abs() < f32::EPSILON);
        assert!((percent.inverse().value() - 75.0).abs() < f32::EPSILON);
    }

    #[test]
    fn slider_percent_display() {
        assert_eq!(SliderPercent::new(12.34).to_string(), "12.3%");
    }

    #[test]
    fn autoplay_duration_clamps() {
        assert_eq!(AutoplayDuration::new(0).millis(), autoplay_bounds::MIN_MS);
        assert_eq!(AutoplayDuration::new(u32::MAX).millis(), autoplay_bounds::MAX_MS);
        assert_eq!(AutoplayDuration::new(1000).millis(), 1000);
    }

    #[test]
    fn autoplay_duration_default_and_cycle() {
        let duration = AutoplayDuration::default();
        assert_eq!(duration.millis(), autoplay_bounds::DEFAULT_MS);
        assert_eq!(duration.cycle(), Duration::from_millis(10_000));
    }

    #[test]
    fn slide_mode_parses_case_insensitively() {
        assert_eq!("Hover".parse::<SlideMode>(), Ok(SlideMode::Hover));
        assert_eq!(" drag ".parse::<SlideMode>(), Ok(SlideMode::Drag));
        assert!("swipe".parse::<SlideMode>().is_err());
    }

    #[test]
    fn slide_mode_default_is_hover() {
        assert_eq!(SlideMode::default(), SlideMode::Hover);
        assert_eq!(SlideMode::Drag.to_string(), "drag");
    }
}
