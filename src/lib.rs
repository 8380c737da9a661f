// SPDX-License-Identifier: MPL-2.0
//! `compare_lens` is the interaction core of a before/after image comparison
//! slider, with an Iced adapter.
//!
//! It resolves where a letterboxed image sits inside its container, turns
//! pointer input into a split percentage and runs the hover, drag and
//! autoplay state machine. Supporting modules validate dropped uploads,
//! drive camera capture, retry failed operations and monitor drag timings.

#![doc(html_root_url = "https://docs.rs/compare_lens/0.1.0")]

pub mod capture;
pub mod compare;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod media;
pub mod retry;

#[cfg(test)]
pub(crate) mod test_utils;
