// SPDX-License-Identifier: MPL-2.0
//! Pointer input normalization.
//!
//! Converts viewport-relative pointer coordinates into a split percentage
//! along the resolved content rectangle.

use super::rect::Rect;
use crate::domain::ui::newtypes::{slider_bounds, SliderPercent};

/// Which part of an interaction a pointer event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Enter,
    Leave,
    Down,
    Move,
    Up,
}

/// Input device that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Horizontal pointer position at the time of an event.
///
/// Only lives for a single event handling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Viewport-relative horizontal position in pixels.
    pub client_x: f32,
    /// Host timestamp of the event in milliseconds.
    pub timestamp_ms: f64,
}

/// A pointer or touch event routed to a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub kind: PointerKind,
    pub sample: PointerSample,
}

impl PointerEvent {
    /// Builds a mouse event.
    #[must_use]
    pub fn mouse(phase: PointerPhase, client_x: f32, timestamp_ms: f64) -> Self {
        Self {
            phase,
            kind: PointerKind::Mouse,
            sample: PointerSample {
                client_x,
                timestamp_ms,
            },
        }
    }

    /// Builds a touch event.
    #[must_use]
    pub fn touch(phase: PointerPhase, client_x: f32, timestamp_ms: f64) -> Self {
        Self {
            kind: PointerKind::Touch,
            ..Self::mouse(phase, client_x, timestamp_ms)
        }
    }
}

/// Maps `client_x` onto the rectangle's width as a clamped percentage.
///
/// Positions past either edge clamp to that edge. A zero-width rectangle
/// yields the neutral midpoint.
#[must_use]
pub fn normalize(client_x: f32, container_left: f32, rect: &Rect) -> SliderPercent {
    if rect.width <= 0.0 || !rect.width.is_finite() {
        return SliderPercent::new(slider_bounds::DEFAULT_PERCENT);
    }
    let local_x = client_x - container_left - rect.left;
    SliderPercent::new(local_x / rect.width * 100.0)
}

/// Converts pointer samples for one container.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    container_left: f32,
}

impl PointerTracker {
    #[must_use]
    pub fn new(container_left: f32) -> Self {
        Self { container_left }
    }

    /// Updates the container's viewport-relative left offset (e.g., after
    /// layout or scroll).
    pub fn set_container_left(&mut self, container_left: f32) {
        self.container_left = container_left;
    }

    #[must_use]
    pub fn container_left(&self) -> f32 {
        self.container_left
    }

    #[must_use]
    pub fn percent(&self, sample: &PointerSample, rect: &Rect) -> SliderPercent {
        normalize(sample.client_x, self.container_left, rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, assert_relative_eq, PERCENT_EPSILON};

    fn letterboxed() -> Rect {
        Rect {
            width: 200.0,
            height: 100.0,
            left: 50.0,
            top: 0.0,
        }
    }

    #[test]
    fn normalize_measures_from_rect_left() {
        // container at 100, rect starts 50px in, pointer 100px into the rect
        let percent = normalize(250.0, 100.0, &letterboxed());
        assert_abs_diff_eq!(percent.value(), 50.0);
    }

    #[test]
    fn normalize_clamps_past_edges() {
        assert!(normalize(0.0, 100.0, &letterboxed()).is_min());
        assert!(normalize(10_000.0, 100.0, &letterboxed()).is_max());
    }

    #[test]
    fn normalize_handles_fractional_geometry() {
        let rect = Rect {
            width: 333.3,
            height: 100.0,
            left: 12.5,
            top: 0.0,
        };
        let percent = normalize(10.0 + 12.5 + 111.1, 10.0, &rect);
        assert_relative_eq!(percent.value(), 100.0 / 3.0, epsilon = PERCENT_EPSILON);
    }

    #[test]
    fn zero_width_rect_returns_midpoint() {
        let rect = Rect {
            width: 0.0,
            ..letterboxed()
        };
        assert_abs_diff_eq!(normalize(123.0, 0.0, &rect).value(), 50.0);
    }

    #[test]
    fn output_stays_in_range_for_any_position() {
        let rect = letterboxed();
        let mut x = -5000.0_f32;
        while x <= 5000.0 {
            let value = normalize(x, 37.0, &rect).value();
            assert!((0.0..=100.0).contains(&value), "{value} out of range at x={x}");
            x += 13.7;
        }
    }

    #[test]
    fn tracker_uses_container_offset() {
        let mut tracker = PointerTracker::new(0.0);
        let sample = PointerSample {
            client_x: 150.0,
            timestamp_ms: 0.0,
        };
        assert_abs_diff_eq!(tracker.percent(&sample, &letterboxed()).value(), 50.0);

        tracker.set_container_left(50.0);
        assert_abs_diff_eq!(tracker.percent(&sample, &letterboxed()).value(), 25.0);
    }

    #[test]
    fn touch_constructor_sets_kind() {
        let event = PointerEvent::touch(PointerPhase::Down, 1.0, 2.0);
        assert_eq!(event.kind, PointerKind::Touch);
        assert_eq!(event.phase, PointerPhase::Down);
    }
}
