// SPDX-License-Identifier: MPL-2.0
//! Before/after comparison slider core.
//!
//! The core is split into framework-independent pieces and a thin host
//! adapter:
//!
//! - [`rect`]: letterboxed content rectangle under contain fit
//! - [`pointer`]: pointer coordinates to split percentage
//! - [`autoplay`]: ping-pong sweep and stale-tick protection
//! - [`slider`]: the interaction state machine
//! - [`driver`]: tokio timer delivering autoplay ticks
//! - [`adapter`]: Iced event translation and subscriptions
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use compare_lens::compare::{
//!     Dimensions, PointerEvent, PointerPhase, SliderConfig, SliderStateMachine,
//! };
//!
//! let now = Instant::now();
//! let mut slider = SliderStateMachine::new(SliderConfig::default());
//! slider.container_resized(Dimensions::new(500.0, 300.0), 0.0);
//! slider.content_loaded(Dimensions::new(1000.0, 500.0));
//! slider.mount(now);
//!
//! slider.handle(PointerEvent::mouse(PointerPhase::Move, 125.0, 0.0), now);
//! assert_eq!(slider.percent().value(), 25.0);
//! ```

pub mod adapter;
pub mod autoplay;
pub mod driver;
pub mod pointer;
pub mod rect;
pub mod slider;

pub use adapter::IcedPointerAdapter;
pub use autoplay::{triangle_wave, AutoplayTicket};
pub use driver::{AutoplayDriver, AutoplayTick};
pub use pointer::{
    normalize, PointerEvent, PointerKind, PointerPhase, PointerSample, PointerTracker,
};
pub use rect::{fit_scale, resolve_contain_rect, Dimensions, ImageRectResolver, Rect};
pub use slider::{
    CursorHint, Divider, Effect, InteractionPhase, SliderConfig, SliderState, SliderStateMachine,
};
