//! List detected monitors.

use std::fmt::Write;

use blackout_platform_core::{virtual_desktop_bounds, MonitorRecord};
use blackout_selection::SelectionError;

pub fn run(json: bool) -> anyhow::Result<()> {
    let monitors = blackout_platform_windows::detect_monitors()?;
    if monitors.is_empty() {
        return Err(SelectionError::NoMonitorsDetected.into());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&monitors)?);
    } else {
        print!("{}", format_table(&monitors));
    }
    Ok(())
}

fn format_table(monitors: &[MonitorRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Detected Monitors:");
    let _ = writeln!(out, "{}", "=".repeat(20));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<3}  {:<6}  {:<6}  {:<6}  {:<6}  Name",
        "Idx", "Left", "Top", "Right", "Bottom"
    );
    let _ = writeln!(out, "---  ------  ------  ------  ------  ----");

    for m in monitors {
        let g = m.geometry();
        let _ = writeln!(
            out,
            "{:<3}  {:<6}  {:<6}  {:<6}  {:<6}  {}",
            m.display_index(),
            g.left,
            g.top,
            g.right,
            g.bottom,
            m.friendly_name()
        );
    }

    if let Some(bounds) = virtual_desktop_bounds(monitors) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Virtual desktop: {}x{} at ({}, {})",
            bounds.width(),
            bounds.height(),
            bounds.left,
            bounds.top
        );
    }
    out
}
