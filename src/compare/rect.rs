// SPDX-License-Identifier: MPL-2.0
//! Letterboxed image geometry.
//!
//! Computes where an image displayed with "contain" fit actually lands
//! inside its container, so pointer positions can be measured against the
//! visible pixels instead of the container's empty margins.

use tracing::debug;

/// Width and height of a container or of an image's intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true if both sides are finite and strictly positive.
    #[must_use]
    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        self.width / self.height
    }
}

/// Display area of the content in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
}

impl Rect {
    /// Right edge in container-local pixels.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge in container-local pixels.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Returns true if the container-local point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Scale factor that fits `natural` entirely inside `bounds` while
/// preserving its aspect ratio.
///
/// Returns `None` if either size is empty or not finite.
#[must_use]
pub fn fit_scale(natural: Dimensions, bounds: Dimensions) -> Option<f32> {
    if !natural.is_usable() || !bounds.is_usable() {
        return None;
    }
    Some((bounds.width / natural.width).min(bounds.height / natural.height))
}

/// Resolves the letterboxed rectangle of `natural`-sized content shown
/// with contain fit inside `container`.
///
/// Returns `None` (unresolved) until both sizes are known and non-zero.
#[must_use]
pub fn resolve_contain_rect(container: Dimensions, natural: Dimensions) -> Option<Rect> {
    if !container.is_usable() || !natural.is_usable() {
        return None;
    }

    let container_aspect = container.aspect_ratio();
    let content_aspect = natural.aspect_ratio();

    let rect = if content_aspect > container_aspect {
        // Wider than the container: full width, bars above and below
        let height = (container.width / content_aspect).min(container.height);
        Rect {
            width: container.width,
            height,
            left: 0.0,
            top: ((container.height - height) / 2.0).max(0.0),
        }
    } else {
        let width = (container.height * content_aspect).min(container.width);
        Rect {
            width,
            height: container.height,
            left: ((container.width - width) / 2.0).max(0.0),
            top: 0.0,
        }
    };

    Some(rect)
}

/// Keeps the resolved content rectangle in sync with load and resize
/// notifications from the host.
#[derive(Debug, Clone, Default)]
pub struct ImageRectResolver {
    container: Option<Dimensions>,
    natural: Option<Dimensions>,
    rect: Option<Rect>,
}

impl ImageRectResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new container size and recomputes the rectangle.
    pub fn container_resized(&mut self, container: Dimensions) -> Option<Rect> {
        self.container = Some(container);
        self.recompute()
    }

    /// Records the intrinsic size of freshly loaded content.
    pub fn content_loaded(&mut self, natural: Dimensions) -> Option<Rect> {
        self.natural = Some(natural);
        self.recompute()
    }

    /// Forgets the content; the geometry becomes unresolved.
    pub fn content_removed(&mut self) {
        self.natural = None;
        self.rect = None;
    }

    /// Current rectangle, `None` while unresolved.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    #[must_use]
    pub fn container(&self) -> Option<Dimensions> {
        self.container
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.rect.is_some()
    }

    fn recompute(&mut self) -> Option<Rect> {
        self.rect = match (self.container, self.natural) {
            (Some(container), Some(natural)) => resolve_contain_rect(container, natural),
            _ => None,
        };
        debug!(rect = ?self.rect, "content rectangle recomputed");
        self.rect
    }
}
