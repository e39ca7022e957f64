//! Windows platform integration.
//!
//! - **Topology:** `QueryDisplayConfig` paths for friendly names and
//!   `EnumDisplayMonitors` for the authoritative monitor list, correlated by
//!   [`blackout_platform_core::collect`].
//! - **Overlay:** one borderless, topmost window per selected monitor.
//!
//! On other targets every entry point returns
//! [`BlackoutError::Unsupported`].

#[cfg(windows)]
mod display;
#[cfg(windows)]
mod overlay;

#[cfg(windows)]
pub use display::Win32DisplaySource;

use blackout_common::error::{BlackoutError, BlackoutResult};
use blackout_platform_core::{MonitorRecord, Rgb};

/// How the covering windows look and behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayOptions {
    pub color: Rgb,
    /// Close all windows on the first key press.
    pub exit_on_key: bool,
    pub hide_cursor: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            exit_on_key: true,
            hide_cursor: true,
        }
    }
}

/// Detect monitors, in `EnumDisplayMonitors` order, with friendly names
/// where the display configuration provides them.
pub fn detect_monitors() -> BlackoutResult<Vec<MonitorRecord>> {
    #[cfg(windows)]
    {
        tracing::debug!("Detecting monitors");
        Ok(blackout_platform_core::collect(&Win32DisplaySource))
    }
    #[cfg(not(windows))]
    {
        Err(BlackoutError::unsupported("monitor detection requires Windows"))
    }
}

/// Cover `monitors` and block until the user dismisses the windows.
pub fn cover(monitors: &[MonitorRecord], options: &OverlayOptions) -> BlackoutResult<()> {
    if monitors.is_empty() {
        return Err(BlackoutError::overlay("nothing to cover"));
    }

    #[cfg(windows)]
    {
        overlay::run(monitors, options)
    }
    #[cfg(not(windows))]
    {
        let _ = options;
        Err(BlackoutError::unsupported("covering windows require Windows"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_overlay_is_black_and_dismissable() {
        let options = OverlayOptions::default();
        assert_eq!(options.color, Rgb::BLACK);
        assert!(options.exit_on_key);
    }

    #[test]
    fn covering_nothing_is_rejected() {
        let err = cover(&[], &OverlayOptions::default()).unwrap_err();
        assert!(matches!(err, BlackoutError::Overlay { .. }));
    }

    #[cfg(not(windows))]
    #[test]
    fn detection_is_unsupported_off_windows() {
        assert!(matches!(
            detect_monitors(),
            Err(BlackoutError::Unsupported { .. })
        ));
    }
}
