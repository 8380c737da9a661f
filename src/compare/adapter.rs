// SPDX-License-Identifier: MPL-2.0
//! Iced host adapter.
//!
//! Subscribes a [`SliderStateMachine`] to native Iced events: mouse and
//! touch input inside the comparison's bounds become [`PointerEvent`]s,
//! autoplay ticks come from an [`iced::time::every`] subscription, and the
//! cursor hint maps onto [`mouse::Interaction`].

use std::time::Instant;

use iced::{mouse, time, touch, Event, Point, Rectangle, Subscription};

use super::autoplay::AutoplayTicket;
use super::driver::{AutoplayTick, AUTOPLAY_TICK_INTERVAL};
use super::pointer::{PointerEvent, PointerPhase};
use super::rect::Dimensions;
use super::slider::{CursorHint, Effect, SliderStateMachine};

/// Size of the comparison widget as seen by the resolver.
#[must_use]
pub fn container_dimensions(bounds: Rectangle) -> Dimensions {
    Dimensions::new(bounds.width, bounds.height)
}

/// Cursor to request from Iced for a slider cursor hint.
#[must_use]
pub fn mouse_interaction(hint: CursorHint) -> mouse::Interaction {
    match hint {
        CursorHint::ColResize => mouse::Interaction::ResizingHorizontally,
        CursorHint::Grab => mouse::Interaction::Grab,
        CursorHint::Grabbing => mouse::Interaction::Grabbing,
    }
}

/// Ticks for the running autoplay, or nothing when it is stopped.
///
/// Returning [`Subscription::none`] once autoplay stops is what cancels the
/// underlying timer.
pub fn autoplay_subscription(ticket: Option<AutoplayTicket>) -> Subscription<AutoplayTick> {
    match ticket {
        Some(ticket) => time::every(AUTOPLAY_TICK_INTERVAL)
            .with(ticket)
            .map(|(ticket, at)| AutoplayTick { ticket, at }),
        None => Subscription::none(),
    }
}

/// Translates window-level Iced events into slider pointer events.
///
/// Enter and leave are synthesized from cursor movement across the widget
/// bounds. Only the first finger that lands inside the bounds is tracked.
#[derive(Debug, Clone, Default)]
pub struct IcedPointerAdapter {
    bounds: Rectangle,
    cursor_inside: bool,
    cursor_x: Option<f32>,
    active_finger: Option<touch::Finger>,
}

impl IcedPointerAdapter {
    #[must_use]
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Updates the widget bounds after layout.
    ///
    /// Returns the new container size when it changed.
    pub fn set_bounds(&mut self, bounds: Rectangle) -> Option<Dimensions> {
        if self.bounds == bounds {
            return None;
        }
        let resized = self.bounds.size() != bounds.size();
        self.bounds = bounds;
        resized.then(|| container_dimensions(bounds))
    }

    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Viewport-relative left edge of the widget.
    #[must_use]
    pub fn container_left(&self) -> f32 {
        self.bounds.x
    }

    #[must_use]
    pub fn is_cursor_inside(&self) -> bool {
        self.cursor_inside
    }

    /// Converts one Iced event into zero or more pointer events.
    pub fn translate(&mut self, event: &Event, timestamp_ms: f64) -> Vec<PointerEvent> {
        match event {
            Event::Mouse(mouse_event) => self.translate_mouse(mouse_event, timestamp_ms),
            Event::Touch(touch_event) => self.translate_touch(touch_event, timestamp_ms),
            _ => Vec::new(),
        }
    }

    /// Translates `event` and feeds the result to `machine`.
    ///
    /// Returns the last timer effect produced, since a later start or stop
    /// supersedes an earlier one.
    pub fn dispatch(
        &mut self,
        machine: &mut SliderStateMachine,
        event: &Event,
        now: Instant,
        timestamp_ms: f64,
    ) -> Effect {
        self.translate(event, timestamp_ms)
            .into_iter()
            .fold(Effect::None, |last, pointer_event| {
                match machine.handle(pointer_event, now) {
                    Effect::None => last,
                    effect => effect,
                }
            })
    }

    fn translate_mouse(&mut self, event: &mouse::Event, timestamp_ms: f64) -> Vec<PointerEvent> {
        match event {
            mouse::Event::CursorMoved { position } => self.cursor_moved(*position, timestamp_ms),
            mouse::Event::CursorLeft => {
                let was_inside = std::mem::replace(&mut self.cursor_inside, false);
                match (was_inside, self.cursor_x) {
                    (true, Some(x)) => {
                        vec![PointerEvent::mouse(PointerPhase::Leave, x, timestamp_ms)]
                    }
                    _ => Vec::new(),
                }
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                self.at_cursor(PointerPhase::Down, timestamp_ms)
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                self.at_cursor(PointerPhase::Up, timestamp_ms)
            }
            _ => Vec::new(),
        }
    }

    fn cursor_moved(&mut self, position: Point, timestamp_ms: f64) -> Vec<PointerEvent> {
        let now_inside = self.bounds.contains(position);
        let was_inside = std::mem::replace(&mut self.cursor_inside, now_inside);
        self.cursor_x = Some(position.x);

        let x = position.x;
        match (was_inside, now_inside) {
            (false, true) => vec![
                PointerEvent::mouse(PointerPhase::Enter, x, timestamp_ms),
                PointerEvent::mouse(PointerPhase::Move, x, timestamp_ms),
            ],
            (true, true) => vec![PointerEvent::mouse(PointerPhase::Move, x, timestamp_ms)],
            // Let a drag clamp to the edge before it ends
            (true, false) => vec![
                PointerEvent::mouse(PointerPhase::Move, x, timestamp_ms),
                PointerEvent::mouse(PointerPhase::Leave, x, timestamp_ms),
            ],
            (false, false) => Vec::new(),
        }
    }

    fn at_cursor(&self, phase: PointerPhase, timestamp_ms: f64) -> Vec<PointerEvent> {
        match (self.cursor_inside, self.cursor_x) {
            (true, Some(x)) => vec![PointerEvent::mouse(phase, x, timestamp_ms)],
            _ => Vec::new(),
        }
    }

    fn translate_touch(&mut self, event: &touch::Event, timestamp_ms: f64) -> Vec<PointerEvent> {
        match event {
            touch::Event::FingerPressed { id, position } => {
                if self.active_finger.is_some() || !self.bounds.contains(*position) {
                    return Vec::new();
                }
                self.active_finger = Some(*id);
                vec![PointerEvent::touch(PointerPhase::Down, position.x, timestamp_ms)]
            }
            touch::Event::FingerMoved { id, position } if self.active_finger == Some(*id) => {
                vec![PointerEvent::touch(PointerPhase::Move, position.x, timestamp_ms)]
            }
            touch::Event::FingerLifted { id, position }
            | touch::Event::FingerLost { id, position }
                if self.active_finger == Some(*id) =>
            {
                self.active_finger = None;
                vec![PointerEvent::touch(PointerPhase::Up, position.x, timestamp_ms)]
            }
            _ => Vec::new(),
        }
    }
}
