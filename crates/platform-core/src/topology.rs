//! Monitor topology collection.
//!
//! Two platform facilities describe the same monitors with unrelated keys:
//! the path-level configuration (adapter/target pairs that can be resolved
//! to friendly names) and the legacy monitor enumeration (handles and
//! rectangles). The legacy list is authoritative for membership and order;
//! path data only enriches it with names, correlated by the top-left corner
//! of each source surface.

use serde::{Deserialize, Serialize};

use crate::{fallback_name, MonitorHandle, MonitorRecord, MonitorRect, Point};

/// Locally unique identifier of a display adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdapterId {
    pub low_part: u32,
    pub high_part: i32,
}

impl AdapterId {
    pub fn new(low_part: u32, high_part: i32) -> Self {
        Self {
            low_part,
            high_part,
        }
    }
}

/// Kind of a mode record, with the payload correlation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    /// Source surface mode; carries its desktop position.
    Source { position: Point },
    Target,
    DesktopImage,
}

/// One entry of the path-level mode array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRecord {
    pub kind: ModeKind,
    pub adapter_id: AdapterId,
    pub id: u32,
}

/// One entry of the path-level path array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRecord {
    pub active: bool,
    /// Adapter of the path's target.
    pub adapter_id: AdapterId,
    pub target_id: u32,
    pub source_id: u32,
    /// Index into the mode array the path claims for its source mode.
    pub source_mode_index: u32,
}

/// Result of the two-step path-level query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayConfigSnapshot {
    pub paths: Vec<PathRecord>,
    pub modes: Vec<ModeRecord>,
}

/// A surface reported by the legacy monitor enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalSurface {
    pub handle: MonitorHandle,
    pub geometry: MonitorRect,
}

/// Failure of the path-level query. Collection absorbs these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathQueryError {
    #[error("display config buffer size query failed (code {code})")]
    BufferSizes { code: u32 },

    #[error("display config query failed (code {code})")]
    Query { code: u32 },

    #[error("display config query is not available on this platform")]
    Unavailable,
}

/// The enumeration facilities an OS backend exposes.
///
/// Implementations must be synchronous; any callbacks they use internally
/// complete before the method returns.
pub trait DisplaySource {
    /// Fetch the path and mode arrays of the current display configuration.
    fn query_display_config(&self) -> Result<DisplayConfigSnapshot, PathQueryError>;

    /// Friendly name of one adapter/target pair, `None` if the query fails.
    fn target_friendly_name(&self, adapter_id: AdapterId, target_id: u32) -> Option<String>;

    /// Active physical surfaces, in the order the platform enumerates them.
    fn enumerate_surfaces(&self) -> Vec<PhysicalSurface>;
}

/// Name and position recovered for one active path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathDescriptor {
    adapter_id: AdapterId,
    target_id: u32,
    source_position: Point,
    friendly_name: Option<String>,
}

/// Collect the indexed monitor list from `source`.
///
/// Path-level failures degrade to fallback names. An empty result is not an
/// error here; callers decide whether an empty topology is fatal.
pub fn collect<S: DisplaySource + ?Sized>(source: &S) -> Vec<MonitorRecord> {
    let descriptors = match source.query_display_config() {
        Ok(snapshot) => describe_paths(source, &snapshot),
        Err(e) => {
            tracing::warn!("Falling back to generic monitor names: {}", e);
            Vec::new()
        }
    };

    let surfaces = source.enumerate_surfaces();
    tracing::debug!(
        paths = descriptors.len(),
        surfaces = surfaces.len(),
        "Correlating display topology"
    );

    correlate(surfaces, &descriptors)
}

fn describe_paths<S: DisplaySource + ?Sized>(
    source: &S,
    snapshot: &DisplayConfigSnapshot,
) -> Vec<PathDescriptor> {
    snapshot
        .paths
        .iter()
        .filter(|path| path.active)
        .map(|path| {
            let friendly_name = source
                .target_friendly_name(path.adapter_id, path.target_id)
                .filter(|name| !name.is_empty());
            if friendly_name.is_none() {
                tracing::debug!(target_id = path.target_id, "No friendly name for target");
            }
            PathDescriptor {
                adapter_id: path.adapter_id,
                target_id: path.target_id,
                source_position: source_position(path, &snapshot.modes),
                friendly_name,
            }
        })
        .collect()
}

/// Desktop position of the path's source surface.
///
/// Tries the mode index the path references, then scans for a source mode
/// with the same adapter and source id, then gives up with the origin.
fn source_position(path: &PathRecord, modes: &[ModeRecord]) -> Point {
    let referenced = modes
        .get(path.source_mode_index as usize)
        .filter(|mode| mode.adapter_id == path.adapter_id)
        .and_then(source_mode_position);

    referenced
        .or_else(|| {
            modes
                .iter()
                .filter(|mode| mode.adapter_id == path.adapter_id && mode.id == path.source_id)
                .find_map(source_mode_position)
        })
        .unwrap_or_else(|| {
            tracing::debug!(
                target_id = path.target_id,
                source_id = path.source_id,
                "No source mode for path, assuming origin"
            );
            Point::ORIGIN
        })
}

fn source_mode_position(mode: &ModeRecord) -> Option<Point> {
    match mode.kind {
        ModeKind::Source { position } => Some(position),
        _ => None,
    }
}

fn correlate(surfaces: Vec<PhysicalSurface>, descriptors: &[PathDescriptor]) -> Vec<MonitorRecord> {
    surfaces
        .into_iter()
        .enumerate()
        .map(|(index, surface)| {
            let corner = surface.geometry.top_left();
            // First positional match wins, even when mirrored outputs share a corner.
            let matched = descriptors.iter().find(|d| d.source_position == corner);
            let name = matched
                .and_then(|d| d.friendly_name.clone())
                .unwrap_or_else(|| fallback_name(index));

            if let Some(d) = matched {
                tracing::debug!(
                    index,
                    adapter_low = d.adapter_id.low_part,
                    target_id = d.target_id,
                    name = %name,
                    "Matched monitor to display path"
                );
            }

            MonitorRecord::new(index, surface.handle, surface.geometry, name)
        })
        .collect()
}
