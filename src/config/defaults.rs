// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Slider**: Split position and autoplay sweep
//! - **Retry**: Linear backoff for failed drops and uploads
//! - **Diagnostics**: Interaction monitor history
//! - **Uploads**: Image file validation and thumbnails
//! - **Camera**: Stream start timeout and capture encoding

use crate::domain::ui::newtypes::{autoplay_bounds, slider_bounds};

// ==========================================================================
// Slider Defaults
// ==========================================================================

/// Default split position when a comparison mounts (percent).
pub const DEFAULT_INITIAL_PERCENT: f32 = slider_bounds::DEFAULT_PERCENT;

/// Default half-period of the autoplay sweep (0 → 100%), in milliseconds.
pub const DEFAULT_AUTOPLAY_DURATION_MS: u32 = autoplay_bounds::DEFAULT_MS;

/// Minimum autoplay half-period in milliseconds.
pub const MIN_AUTOPLAY_DURATION_MS: u32 = autoplay_bounds::MIN_MS;

/// Maximum autoplay half-period in milliseconds.
pub const MAX_AUTOPLAY_DURATION_MS: u32 = autoplay_bounds::MAX_MS;

/// Autoplay tick cadence in milliseconds (~60 ticks per second).
pub const AUTOPLAY_TICK_MS: u64 = 16;

// ==========================================================================
// Retry Defaults
// ==========================================================================

/// Base delay multiplied by the attempt number.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Retries allowed before a failure becomes terminal.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Upper bound accepted for `max_retries` from the config file.
pub const MAX_MAX_RETRIES: u32 = 10;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Number of drag metrics and events kept by the interaction monitor.
pub const DEFAULT_MONITOR_HISTORY: usize = 100;

/// Minimum monitor history size.
pub const MIN_MONITOR_HISTORY: usize = 10;

/// Maximum monitor history size.
pub const MAX_MONITOR_HISTORY: usize = 10_000;

/// Number of events included in a stats snapshot.
pub const RECENT_EVENTS_IN_STATS: usize = 10;

/// Drag operations slower than this are logged as warnings.
pub const DEFAULT_SLOW_OPERATION_MS: u64 = 1000;

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Largest accepted image upload (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Default thumbnail bounding box edge in pixels.
pub const DEFAULT_THUMBNAIL_EDGE: u32 = 200;

/// JPEG quality used for encoded thumbnails.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 80;

// ==========================================================================
// Camera Defaults
// ==========================================================================

/// Time allowed for a camera stream to deliver metadata.
pub const CAMERA_START_TIMEOUT_SECS: u64 = 15;

/// JPEG quality used for captured photos.
pub const CAPTURE_JPEG_QUALITY: u8 = 98;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_INITIAL_PERCENT >= 0.0);
    assert!(DEFAULT_INITIAL_PERCENT <= 100.0);

    assert!(MIN_AUTOPLAY_DURATION_MS > 0);
    assert!(MAX_AUTOPLAY_DURATION_MS >= MIN_AUTOPLAY_DURATION_MS);
    assert!(DEFAULT_AUTOPLAY_DURATION_MS >= MIN_AUTOPLAY_DURATION_MS);
    assert!(DEFAULT_AUTOPLAY_DURATION_MS <= MAX_AUTOPLAY_DURATION_MS);
    assert!(AUTOPLAY_TICK_MS > 0);

    assert!(DEFAULT_RETRY_BASE_DELAY_MS > 0);
    assert!(DEFAULT_MAX_RETRIES <= MAX_MAX_RETRIES);

    assert!(MIN_MONITOR_HISTORY > 0);
    assert!(MAX_MONITOR_HISTORY >= MIN_MONITOR_HISTORY);
    assert!(DEFAULT_MONITOR_HISTORY >= MIN_MONITOR_HISTORY);
    assert!(DEFAULT_MONITOR_HISTORY <= MAX_MONITOR_HISTORY);
    assert!(RECENT_EVENTS_IN_STATS <= MIN_MONITOR_HISTORY);

    assert!(MAX_UPLOAD_BYTES > 0);
    assert!(DEFAULT_THUMBNAIL_EDGE > 0);
    assert!(THUMBNAIL_JPEG_QUALITY <= 100);
    assert!(CAPTURE_JPEG_QUALITY <= 100);
};
