// SPDX-License-Identifier: MPL-2.0
//! Comparison slider state machine.
//!
//! Owns the split position of one comparison instance and decides how
//! pointer events and autoplay ticks move it:
//!
//! - **Hover mode**: the split follows the pointer and snaps back to the
//!   initial position when the pointer leaves.
//! - **Drag mode**: the split moves only while the pointer is held down and
//!   keeps its last value afterwards.
//! - **Autoplay**: while nobody interacts, the split sweeps back and forth.
//!   Any pointer engagement preempts it; it resumes when the pointer leaves.
//!
//! Timer ownership stays with the host. Every transition that needs a timer
//! started or cancelled returns an [`Effect`] describing it.

use std::time::Instant;

use tracing::debug;

use super::autoplay::{triangle_wave, AutoplayClock, AutoplayTicket};
use super::pointer::{PointerEvent, PointerKind, PointerPhase, PointerSample, PointerTracker};
use super::rect::{Dimensions, ImageRectResolver, Rect};
use crate::domain::ui::newtypes::{AutoplayDuration, SlideMode, SliderPercent};

/// Options recognized by a comparison slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    /// Split position on mount and after a hover exit.
    pub initial_percent: SliderPercent,
    pub mode: SlideMode,
    /// Whether the render layer should draw a grab handle on the divider.
    pub show_handle: bool,
    pub autoplay: bool,
    pub autoplay_duration: AutoplayDuration,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            initial_percent: SliderPercent::default(),
            mode: SlideMode::default(),
            show_handle: true,
            autoplay: false,
            autoplay_duration: AutoplayDuration::default(),
        }
    }
}

/// Interaction phase of the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionPhase {
    #[default]
    Idle,
    Hovering,
    Dragging,
    Autoplaying,
}

/// Snapshot of the externally observable slider state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    pub percent: SliderPercent,
    pub mode: SlideMode,
    pub dragging: bool,
    pub autoplay_active: bool,
}

/// Timer work the host must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    None,
    /// Start delivering ticks tagged with this ticket, replacing any
    /// running timer.
    StartAutoplay(AutoplayTicket),
    /// Cancel the running timer.
    StopAutoplay,
}

/// Cursor the render layer should show over the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Horizontal resize cursor (hover mode).
    ColResize,
    /// Open hand (drag mode, not pressed).
    Grab,
    /// Closed hand (drag mode, pressed).
    Grabbing,
}

/// Position of the divider line in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    pub x: f32,
    pub top: f32,
    pub height: f32,
    pub show_handle: bool,
}

/// State machine for one comparison instance.
#[derive(Debug, Clone)]
pub struct SliderStateMachine {
    config: SliderConfig,
    percent: SliderPercent,
    phase: InteractionPhase,
    pointer_inside: bool,
    mounted: bool,
    geometry: ImageRectResolver,
    tracker: PointerTracker,
    clock: AutoplayClock,
}

impl SliderStateMachine {
    #[must_use]
    pub fn new(config: SliderConfig) -> Self {
        Self {
            config,
            percent: config.initial_percent,
            phase: InteractionPhase::Idle,
            pointer_inside: false,
            mounted: false,
            geometry: ImageRectResolver::new(),
            tracker: PointerTracker::default(),
            clock: AutoplayClock::new(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attaches the slider to the host. Starts autoplay when configured.
    pub fn mount(&mut self, now: Instant) -> Effect {
        self.mounted = true;
        self.resume_autoplay(now)
    }

    /// Detaches the slider. Events and ticks are ignored afterwards.
    pub fn unmount(&mut self) -> Effect {
        self.mounted = false;
        self.pointer_inside = false;
        let effect = self.stop_autoplay();
        self.set_phase(InteractionPhase::Idle);
        effect
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Records the container's new size and viewport-relative left offset.
    pub fn container_resized(
        &mut self,
        container: Dimensions,
        container_left: f32,
    ) -> Option<Rect> {
        self.tracker.set_container_left(container_left);
        self.geometry.container_resized(container)
    }

    /// Records the intrinsic size of the loaded image.
    pub fn content_loaded(&mut self, natural: Dimensions) -> Option<Rect> {
        self.geometry.content_loaded(natural)
    }

    /// Forgets the image; pointer input is ignored until the next load.
    ///
    /// An active hover or drag ends without touching the split, and autoplay
    /// resumes if it was only paused by the pointer.
    pub fn content_removed(&mut self, now: Instant) -> Effect {
        self.geometry.content_removed();
        self.pointer_inside = false;
        if matches!(
            self.phase,
            InteractionPhase::Hovering | InteractionPhase::Dragging
        ) {
            self.set_phase(InteractionPhase::Idle);
        }
        self.resume_autoplay(now)
    }

    /// Resolved content rectangle, `None` while no image is loaded.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        self.geometry.rect()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Applies a pointer event.
    ///
    /// Touch input is ignored while autoplay is configured: touch has no
    /// enter/leave, so the sweep could never resume after a tap.
    pub fn handle(&mut self, event: PointerEvent, now: Instant) -> Effect {
        if !self.mounted {
            return Effect::None;
        }
        if event.kind == PointerKind::Touch && self.config.autoplay {
            return Effect::None;
        }
        if !self.geometry.is_resolved() {
            return Effect::None;
        }

        match event.phase {
            PointerPhase::Enter => self.on_enter(),
            PointerPhase::Leave => self.on_leave(now),
            PointerPhase::Down => self.on_down(&event.sample),
            PointerPhase::Move => self.on_move(&event.sample),
            PointerPhase::Up => self.on_up(),
        }
    }

    /// Advances autoplay. Returns true if the split moved.
    ///
    /// Ticks from a cancelled or replaced run are ignored.
    pub fn tick(&mut self, ticket: AutoplayTicket, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        let Some(elapsed) = self.clock.elapsed(ticket, now) else {
            return false;
        };
        self.percent = triangle_wave(elapsed, self.config.autoplay_duration);
        true
    }

    /// Enables or disables autoplay at runtime.
    pub fn set_autoplay(&mut self, enabled: bool, now: Instant) -> Effect {
        self.config.autoplay = enabled;
        if enabled {
            self.resume_autoplay(now)
        } else {
            self.stop_autoplay()
        }
    }

    fn on_enter(&mut self) -> Effect {
        self.pointer_inside = true;
        let effect = self.stop_autoplay();
        match self.config.mode {
            SlideMode::Hover => self.set_phase(InteractionPhase::Hovering),
            SlideMode::Drag if self.phase != InteractionPhase::Dragging => {
                self.set_phase(InteractionPhase::Idle);
            }
            SlideMode::Drag => {}
        }
        effect
    }

    fn on_leave(&mut self, now: Instant) -> Effect {
        self.pointer_inside = false;
        match self.phase {
            InteractionPhase::Hovering => {
                self.percent = self.config.initial_percent;
                self.set_phase(InteractionPhase::Idle);
            }
            InteractionPhase::Dragging => self.set_phase(InteractionPhase::Idle),
            InteractionPhase::Idle | InteractionPhase::Autoplaying => {}
        }
        self.resume_autoplay(now)
    }

    fn on_down(&mut self, sample: &PointerSample) -> Effect {
        match self.config.mode {
            SlideMode::Drag => {
                let effect = self.stop_autoplay();
                self.set_phase(InteractionPhase::Dragging);
                self.track(sample);
                effect
            }
            SlideMode::Hover => self.on_move(sample),
        }
    }

    fn on_move(&mut self, sample: &PointerSample) -> Effect {
        match (self.phase, self.config.mode) {
            (InteractionPhase::Dragging | InteractionPhase::Hovering, _) => {
                self.track(sample);
                Effect::None
            }
            // Pointer was already over the element when it appeared
            (InteractionPhase::Idle | InteractionPhase::Autoplaying, SlideMode::Hover) => {
                let effect = self.on_enter();
                self.track(sample);
                effect
            }
            (InteractionPhase::Idle | InteractionPhase::Autoplaying, SlideMode::Drag) => {
                Effect::None
            }
        }
    }

    fn on_up(&mut self) -> Effect {
        if self.phase == InteractionPhase::Dragging {
            self.set_phase(InteractionPhase::Idle);
        }
        Effect::None
    }

    fn track(&mut self, sample: &PointerSample) {
        if let Some(rect) = self.geometry.rect() {
            self.percent = self.tracker.percent(sample, &rect);
        }
    }

    // =========================================================================
    // Autoplay
    // =========================================================================

    fn resume_autoplay(&mut self, now: Instant) -> Effect {
        if !self.mounted
            || !self.config.autoplay
            || self.pointer_inside
            || self.phase == InteractionPhase::Dragging
            || self.clock.is_running()
        {
            return Effect::None;
        }
        let ticket = self.clock.start(now);
        self.percent = triangle_wave(std::time::Duration::ZERO, self.config.autoplay_duration);
        self.set_phase(InteractionPhase::Autoplaying);
        Effect::StartAutoplay(ticket)
    }

    fn stop_autoplay(&mut self) -> Effect {
        if !self.clock.stop() {
            return Effect::None;
        }
        if self.phase == InteractionPhase::Autoplaying {
            self.set_phase(InteractionPhase::Idle);
        }
        Effect::StopAutoplay
    }

    fn set_phase(&mut self, phase: InteractionPhase) {
        if self.phase != phase {
            debug!(
                from = ?self.phase,
                to = ?phase,
                percent = %self.percent,
                "slider phase changed"
            );
            self.phase = phase;
        }
    }

    // =========================================================================
    // Render-facing accessors
    // =========================================================================

    #[must_use]
    pub fn percent(&self) -> SliderPercent {
        self.percent
    }

    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Ticket of the running autoplay, used to tag host timer ticks.
    #[must_use]
    pub fn autoplay_ticket(&self) -> Option<AutoplayTicket> {
        self.clock.ticket()
    }

    #[must_use]
    pub fn state(&self) -> SliderState {
        SliderState {
            percent: self.percent,
            mode: self.config.mode,
            dragging: self.phase == InteractionPhase::Dragging,
            autoplay_active: self.clock.is_running(),
        }
    }

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        match (self.config.mode, self.phase) {
            (_, InteractionPhase::Dragging) => CursorHint::Grabbing,
            (SlideMode::Drag, _) => CursorHint::Grab,
            (SlideMode::Hover, _) => CursorHint::ColResize,
        }
    }

    /// Divider line geometry, hidden (`None`) while unresolved.
    #[must_use]
    pub fn divider(&self) -> Option<Divider> {
        let rect = self.geometry.rect()?;
        Some(Divider {
            x: rect.left + rect.width * self.percent.as_fraction(),
            top: rect.top,
            height: rect.height,
            show_handle: self.config.show_handle,
        })
    }

    /// Right-hand clip inset of the foreground image, in percent.
    #[must_use]
    pub fn clip_inset_right(&self) -> SliderPercent {
        self.percent.inverse()
    }
}
