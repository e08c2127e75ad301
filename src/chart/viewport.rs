//! Zoom/pan viewport
//!
//! Tracks the visible window of a chart in data space and keeps it inside the
//! configuration's [`ZoomLimits`]: a window never leaves its axis limits and
//! never shrinks below the axis `min_range`.

use super::config::{AxisLimits, ZoomLimits, ZoomMode};

/// Visible span of one axis, in data units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisWindow {
    pub min: f64,
    pub max: f64,
}

impl AxisWindow {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` within the window, 0.0 at `min` and 1.0 at `max`
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            0.0
        } else {
            (value - self.min) / span
        }
    }

    /// Value at a fractional position of the window
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.min + fraction * self.span()
    }

    /// Full window allowed by `limits`, widened to `min_range` when the
    /// limits themselves are narrower
    fn full(limits: &AxisLimits) -> Self {
        Self {
            min: limits.min,
            max: limits.max.max(limits.min + limits.min_range),
        }
    }

    fn zoom(&self, limits: &AxisLimits, factor: f64, anchor: f64) -> Self {
        let full = Self::full(limits);
        let span = self.span();
        if factor <= 0.0 || !factor.is_finite() || span <= 0.0 {
            return *self;
        }

        let new_span = (span / factor).clamp(limits.min_range.min(full.span()), full.span());
        let anchor = anchor.clamp(self.min, self.max);
        let ratio = (anchor - self.min) / span;
        let min = anchor - ratio * new_span;

        Self {
            min,
            max: min + new_span,
        }
        .clamped(&full)
    }

    fn pan(&self, limits: &AxisLimits, delta: f64) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
        .clamped(&Self::full(limits))
    }

    /// Shift the window back inside `full`, keeping its span
    fn clamped(&self, full: &Self) -> Self {
        let span = self.span().min(full.span());
        let min = self.min.clamp(full.min, full.max - span);
        Self {
            min,
            max: min + span,
        }
    }
}

/// Visible region of a chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    limits: ZoomLimits,
    mode: ZoomMode,
    pub x: AxisWindow,
    pub y: AxisWindow,
}

impl Viewport {
    /// Viewport showing the full limits
    pub fn new(limits: ZoomLimits) -> Self {
        Self::with_mode(limits, ZoomMode::Xy)
    }

    /// Viewport showing the full limits, zooming and panning only the axes
    /// in `mode`
    pub fn with_mode(limits: ZoomLimits, mode: ZoomMode) -> Self {
        Self {
            limits,
            mode,
            x: AxisWindow::full(&limits.x),
            y: AxisWindow::full(&limits.y),
        }
    }

    pub fn limits(&self) -> &ZoomLimits {
        &self.limits
    }

    pub fn mode(&self) -> ZoomMode {
        self.mode
    }

    /// Zoom the mode's axes by `factor` around a data-space anchor
    ///
    /// `factor > 1` zooms in, `factor < 1` zooms out.
    pub fn zoom(&mut self, factor: f64, anchor_x: f64, anchor_y: f64) {
        if self.mode.affects_x() {
            self.x = self.x.zoom(&self.limits.x, factor, anchor_x);
        }
        if self.mode.affects_y() {
            self.y = self.y.zoom(&self.limits.y, factor, anchor_y);
        }
    }

    /// Shift the mode's axes by data-space deltas
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if self.mode.affects_x() {
            self.x = self.x.pan(&self.limits.x, dx);
        }
        if self.mode.affects_y() {
            self.y = self.y.pan(&self.limits.y, dy);
        }
    }

    /// Show the full limits again
    pub fn reset(&mut self) {
        *self = Self::with_mode(self.limits, self.mode);
    }

    /// Whether the window differs from the full limits
    pub fn is_zoomed(&self) -> bool {
        *self != Self::with_mode(self.limits, self.mode)
    }

    /// Indices of the points (one per x unit) that fall in the x window
    pub fn visible_indices(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.x.min.floor().max(0.0) as usize;
        let end = (self.x.max.ceil().max(0.0) as usize).min(len);
        start.min(end)..end
    }
}

/// Zoom factor of one wheel event
///
/// Scrolling up (negative delta) zooms in by `speed`, scrolling down zooms out.
pub fn wheel_factor(delta_y: f64, speed: f64) -> f64 {
    if delta_y >= 0.0 {
        1.0 - speed
    } else {
        1.0 + speed
    }
}

/// Zoom factor of a pinch gesture moving from `previous` to `current`
/// finger distance
///
/// Spreading the fingers zooms in. Degenerate distances give 1.0.
pub fn pinch_factor(previous: f64, current: f64) -> f64 {
    if previous > 0.0 && current > 0.0 && previous.is_finite() && current.is_finite() {
        current / previous
    } else {
        1.0
    }
}
