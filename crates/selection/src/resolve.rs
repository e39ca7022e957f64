//! Resolution of a [`SelectionRequest`] against a collected topology.

use std::collections::BTreeMap;

use blackout_platform_core::MonitorRecord;

use crate::criterion::{is_all_index, SelectionCriterion, SelectionRequest, ALL_PATTERN};

/// Fatal selection failures. Nothing is selected when one of these occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("No monitors detected")]
    NoMonitorsDetected,

    #[error("Monitor index {value} is out of range. Valid: 1 to {max} (or 0 for all)")]
    IndexOutOfRange { value: i64, max: usize },

    #[error("Cannot select monitors by index and by name at the same time")]
    ConflictingSelectionMode,

    #[error("Invalid monitor index: '{token}'")]
    InvalidIndexToken { token: String },
}

/// Non-fatal findings reported alongside a successful selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionWarning {
    #[error("No monitor found matching pattern: '{pattern}'")]
    NoMatchForPattern { pattern: String },
}

/// Monitors to cover, ascending by stable index and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub monitors: Vec<MonitorRecord>,
    pub warnings: Vec<SelectionWarning>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    pub fn stable_indices(&self) -> Vec<usize> {
        self.monitors.iter().map(MonitorRecord::stable_index).collect()
    }
}

/// Ordered set keyed by stable index; the first record inserted for an
/// index is the one kept.
#[derive(Default)]
struct Picked<'a>(BTreeMap<usize, &'a MonitorRecord>);

impl<'a> Picked<'a> {
    fn insert(&mut self, monitor: &'a MonitorRecord) {
        self.0.entry(monitor.stable_index()).or_insert(monitor);
    }

    fn extend(&mut self, monitors: &'a [MonitorRecord]) {
        monitors.iter().for_each(|m| self.insert(m));
    }

    fn into_monitors(self) -> Vec<MonitorRecord> {
        self.0.into_values().cloned().collect()
    }
}

/// Resolve `request` against `topology`.
///
/// Conflicting modes are rejected before the topology is inspected. An
/// empty topology fails for every request. Out-of-range indices abort the
/// whole resolution; unmatched patterns only produce warnings.
pub fn resolve(
    topology: &[MonitorRecord],
    request: &SelectionRequest,
) -> Result<Selection, SelectionError> {
    let criterion = request.criterion()?;

    if topology.is_empty() {
        return Err(SelectionError::NoMonitorsDetected);
    }

    let selection = match criterion {
        SelectionCriterion::IndexSet(indices) => Selection {
            monitors: resolve_indices(topology, &indices)?,
            warnings: Vec::new(),
        },
        SelectionCriterion::PatternSet(patterns) => resolve_patterns(topology, &patterns),
    };

    tracing::debug!(
        selected = ?selection.stable_indices(),
        warnings = selection.warnings.len(),
        "Resolved monitor selection"
    );
    Ok(selection)
}

fn resolve_indices(
    topology: &[MonitorRecord],
    indices: &[i64],
) -> Result<Vec<MonitorRecord>, SelectionError> {
    if let [only] = indices {
        if is_all_index(*only) {
            return Ok(topology.to_vec());
        }
    }

    let mut picked = Picked::default();
    for &value in indices {
        if is_all_index(value) {
            picked.extend(topology);
            continue;
        }

        let monitor = usize::try_from(value)
            .ok()
            .and_then(|one_based| one_based.checked_sub(1))
            .and_then(|zero_based| topology.get(zero_based))
            .ok_or(SelectionError::IndexOutOfRange {
                value,
                max: topology.len(),
            })?;
        picked.insert(monitor);
    }

    Ok(picked.into_monitors())
}

fn resolve_patterns(topology: &[MonitorRecord], patterns: &[String]) -> Selection {
    if let [only] = patterns {
        if only == ALL_PATTERN {
            return Selection {
                monitors: topology.to_vec(),
                warnings: Vec::new(),
            };
        }
    }

    let folded_names: Vec<String> = topology
        .iter()
        .map(|m| m.friendly_name().to_lowercase())
        .collect();

    let mut picked = Picked::default();
    let mut warnings = Vec::new();
    for pattern in patterns {
        let needle = pattern.to_lowercase();
        // Greedy: only the first monitor in index order is taken per pattern.
        match folded_names.iter().position(|name| name.contains(&needle)) {
            Some(position) => picked.insert(&topology[position]),
            None => {
                tracing::warn!(pattern = %pattern, "No monitor matches pattern");
                warnings.push(SelectionWarning::NoMatchForPattern {
                    pattern: pattern.clone(),
                });
            }
        }
    }

    Selection {
        monitors: picked.into_monitors(),
        warnings,
    }
}
