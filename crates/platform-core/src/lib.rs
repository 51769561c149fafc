//! wallcomp platform core contracts.
//!
//! This crate contains the cross-platform monitor geometry model, the
//! virtual desktop layout calculation, and the [`MonitorSource`] seam that
//! OS backends and fixed layouts plug into.

pub mod layout;

pub use layout::FixedLayout;

use serde::{Deserialize, Serialize};
use wallcomp_common::error::WallcompResult;

/// Upper bound on the number of monitors collected from one enumeration.
pub const MAX_MONITORS: usize = 256;

/// Information about a connected monitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Monitor {
    /// Display device identifier.
    pub name: String,
    /// Position in the virtual desktop (pixels). May be negative.
    pub x: i32,
    pub y: i32,
    /// Resolution in physical pixels.
    pub width: u32,
    pub height: u32,
    /// Whether this monitor is primary.
    #[serde(default)]
    pub primary: bool,
}

impl Monitor {
    pub fn new(name: impl Into<String>, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            primary: false,
        }
    }

    /// Exclusive right edge, saturating at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(i32::try_from(self.width).unwrap_or(i32::MAX))
    }

    /// Exclusive bottom edge, saturating at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(i32::try_from(self.height).unwrap_or(i32::MAX))
    }

    /// Exclusive `(right, bottom)` edges, or `None` when either one does not
    /// fit in virtual-desktop coordinates.
    pub fn checked_edges(&self) -> Option<(i32, i32)> {
        let right = self.x.checked_add(i32::try_from(self.width).ok()?)?;
        let bottom = self.y.checked_add(i32::try_from(self.height).ok()?)?;
        Some((right, bottom))
    }

    /// Whether the two monitor rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Monitor) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Minimal axis-aligned rectangle containing every monitor, in
/// virtual-desktop coordinates. Max edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualDesktopBounds {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl VirtualDesktopBounds {
    /// The value returned for an empty monitor set.
    pub const EMPTY: Self = Self {
        x_min: i32::MAX,
        y_min: i32::MAX,
        x_max: i32::MIN,
        y_max: i32::MIN,
    };

    /// True when the bounds enclose no monitor. Callers must reject these
    /// bounds instead of allocating a canvas from them.
    pub fn is_degenerate(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Width in pixels; zero for degenerate bounds.
    pub fn width(&self) -> u32 {
        if self.is_degenerate() {
            return 0;
        }
        (i64::from(self.x_max) - i64::from(self.x_min)) as u32
    }

    /// Height in pixels; zero for degenerate bounds.
    pub fn height(&self) -> u32 {
        if self.is_degenerate() {
            return 0;
        }
        (i64::from(self.y_max) - i64::from(self.y_min)) as u32
    }

    /// Whether the monitor's full rectangle lies within these bounds.
    pub fn contains(&self, monitor: &Monitor) -> bool {
        monitor.x >= self.x_min
            && monitor.y >= self.y_min
            && monitor.right() <= self.x_max
            && monitor.bottom() <= self.y_max
    }
}

/// Compute the virtual desktop bounds that include all monitors.
///
/// An empty slice yields [`VirtualDesktopBounds::EMPTY`].
pub fn compute_bounds(monitors: &[Monitor]) -> VirtualDesktopBounds {
    monitors
        .iter()
        .fold(VirtualDesktopBounds::EMPTY, |b, m| VirtualDesktopBounds {
            x_min: b.x_min.min(m.x),
            y_min: b.y_min.min(m.y),
            x_max: b.x_max.max(m.right()),
            y_max: b.y_max.max(m.bottom()),
        })
}

/// Index pairs `(a, b)` with `a < b` of monitors whose rectangles overlap.
pub fn find_overlaps(monitors: &[Monitor]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in monitors.iter().enumerate() {
        for (j, b) in monitors.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Something that can report the current monitor layout.
pub trait MonitorSource {
    /// Enumerate monitors in a stable order. The index into the returned
    /// vector is the monitor's identity for the rest of the run.
    fn enumerate(&self) -> WallcompResult<Vec<Monitor>>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}

/// Outcome of the process-wide DPI awareness request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DpiAwareness {
    /// Geometry is reported in physical pixels on every monitor.
    PerMonitorV2,
    /// The request failed; geometry may be scaled on high-DPI monitors.
    Unaware { reason: String },
    /// The platform has no such opt-in.
    NotApplicable,
}
