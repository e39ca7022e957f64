//! Blackout platform core contracts.
//!
//! This crate contains the portable monitor data structures, the
//! [`DisplaySource`] seam the OS backends implement, and the topology
//! correlation that turns two enumeration facilities into one indexed
//! monitor list.

pub mod color;
pub mod topology;

pub use color::{ColorParseError, Rgb};
pub use topology::{
    collect, AdapterId, DisplayConfigSnapshot, DisplaySource, ModeKind, ModeRecord,
    PathQueryError, PathRecord, PhysicalSurface,
};

use serde::{Deserialize, Serialize};

/// Opaque, platform-assigned identifier of a physical display surface.
///
/// Only equality is meaningful; handles carry no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonitorHandle(isize);

impl MonitorHandle {
    pub fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> isize {
        self.0
    }
}

/// A point in virtual-desktop coordinates (pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned monitor rectangle in virtual-desktop coordinates.
///
/// `right` and `bottom` are exclusive, matching the Win32 `RECT` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl MonitorRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// One physical monitor as seen by the rest of Blackout.
///
/// Records are created once per collection pass and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorRecord {
    stable_index: usize,
    handle: MonitorHandle,
    geometry: MonitorRect,
    friendly_name: String,
}

impl MonitorRecord {
    pub fn new(
        stable_index: usize,
        handle: MonitorHandle,
        geometry: MonitorRect,
        friendly_name: impl Into<String>,
    ) -> Self {
        Self {
            stable_index,
            handle,
            geometry,
            friendly_name: friendly_name.into(),
        }
    }

    /// Zero-based position in the legacy enumeration order.
    pub fn stable_index(&self) -> usize {
        self.stable_index
    }

    /// One-based index as shown to users.
    pub fn display_index(&self) -> usize {
        self.stable_index + 1
    }

    pub fn handle(&self) -> MonitorHandle {
        self.handle
    }

    pub fn geometry(&self) -> MonitorRect {
        self.geometry
    }

    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }
}

/// Placeholder name for a monitor whose friendly name could not be correlated.
pub fn fallback_name(stable_index: usize) -> String {
    format!("Monitor {}", stable_index + 1)
}

/// Compute the bounding rectangle of all monitors.
/// Returns `None` for an empty topology.
pub fn virtual_desktop_bounds(monitors: &[MonitorRecord]) -> Option<MonitorRect> {
    let first = monitors.first()?.geometry();
    Some(monitors.iter().skip(1).fold(first, |acc, m| {
        let g = m.geometry();
        MonitorRect {
            left: acc.left.min(g.left),
            top: acc.top.min(g.top),
            right: acc.right.max(g.right),
            bottom: acc.bottom.max(g.bottom),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, rect: MonitorRect) -> MonitorRecord {
        MonitorRecord::new(
            index,
            MonitorHandle::from_raw(0x1000 + index as isize),
            rect,
            fallback_name(index),
        )
    }

    #[test]
    fn virtual_bounds_cover_negative_origin_layout() {
        let monitors = vec![
            record(0, MonitorRect::new(-1920, 0, 0, 1080)),
            record(1, MonitorRect::new(0, 0, 2560, 1440)),
        ];

        let bounds = virtual_desktop_bounds(&monitors).unwrap();
        assert_eq!(bounds, MonitorRect::new(-1920, 0, 2560, 1440));
        assert_eq!(bounds.width(), 4480);
        assert_eq!(bounds.height(), 1440);
    }

    #[test]
    fn virtual_bounds_of_empty_topology_is_none() {
        assert_eq!(virtual_desktop_bounds(&[]), None);
    }

    #[test]
    fn fallback_names_are_one_based() {
        assert_eq!(fallback_name(0), "Monitor 1");
        assert_eq!(fallback_name(2), "Monitor 3");
    }

    #[test]
    fn record_serializes_geometry_and_raw_handle() {
        let m = record(0, MonitorRect::new(0, 0, 1920, 1080));
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["stable_index"], 0);
        assert_eq!(json["handle"], 0x1000);
        assert_eq!(json["geometry"]["right"], 1920);
        assert_eq!(json["friendly_name"], "Monitor 1");
    }
}
