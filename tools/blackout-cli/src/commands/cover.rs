//! Resolve the selection and cover the chosen monitors.

use anyhow::Context;

use blackout_common::config::AppConfig;
use blackout_platform_core::Rgb;
use blackout_platform_windows::OverlayOptions;
use blackout_selection::{parse_index_tokens, resolve, SelectionRequest};

pub struct CoverArgs {
    pub monitor: Vec<String>,
    pub monitor_name: Vec<String>,
    pub color: Option<String>,
    pub disable_key_exit: bool,
}

pub fn run(args: CoverArgs, config: &AppConfig) -> anyhow::Result<()> {
    let request = selection_request(&args)?;
    let options = overlay_options(args.color.as_deref(), args.disable_key_exit, config)?;

    let monitors = blackout_platform_windows::detect_monitors()?;
    tracing::debug!(count = monitors.len(), "Monitors detected");

    let selection = resolve(&monitors, &request)?;
    for warning in &selection.warnings {
        eprintln!("Warning: {}", warning);
    }
    if selection.is_empty() {
        anyhow::bail!("No monitors matched the selection");
    }

    blackout_platform_windows::cover(&selection.monitors, &options)?;
    Ok(())
}

fn selection_request(args: &CoverArgs) -> anyhow::Result<SelectionRequest> {
    Ok(SelectionRequest {
        indices: parse_index_tokens(&args.monitor)?,
        patterns: args.monitor_name.clone(),
    })
}

/// Command-line values win over the config file.
fn overlay_options(
    color: Option<&str>,
    disable_key_exit: bool,
    config: &AppConfig,
) -> anyhow::Result<OverlayOptions> {
    let color_arg = color.unwrap_or(&config.overlay.color);
    let color: Rgb = color_arg
        .parse()
        .with_context(|| format!("Invalid --color value '{}'", color_arg))?;

    Ok(OverlayOptions {
        color,
        exit_on_key: config.overlay.exit_on_key && !disable_key_exit,
        hide_cursor: config.overlay.hide_cursor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(monitor: &[&str]) -> CoverArgs {
        CoverArgs {
            monitor: monitor.iter().map(|s| s.to_string()).collect(),
            monitor_name: Vec::new(),
            color: None,
            disable_key_exit: false,
        }
    }

    #[test]
    fn zero_index_passes_through_to_the_resolver() {
        let request = selection_request(&args(&["0"])).unwrap();
        assert_eq!(request.indices, vec![0]);
    }

    #[test]
    fn minus_one_is_not_accepted_from_the_command_line() {
        for monitor in [&["-1"][..], &["2", "-1"][..]] {
            let err = selection_request(&args(monitor)).unwrap_err();
            assert_eq!(err.to_string(), "Invalid monitor index: '-1'");
        }
    }

    #[test]
    fn config_color_applies_without_flag() {
        let mut config = AppConfig::default();
        config.overlay.color = "#101010".to_string();

        let options = overlay_options(None, false, &config).unwrap();
        assert_eq!(options.color, Rgb::new(0x10, 0x10, 0x10));
        assert!(options.exit_on_key);
    }

    #[test]
    fn flags_override_config() {
        let options = overlay_options(Some("red"), true, &AppConfig::default()).unwrap();
        assert_eq!(options.color, Rgb::new(0xff, 0, 0));
        assert!(!options.exit_on_key);
    }

    #[test]
    fn bad_color_is_reported_before_touching_displays() {
        let err = overlay_options(Some("#12"), false, &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("#12"));
    }
}
