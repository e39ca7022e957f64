//! Blackout CLI — cover selected monitors with solid windows.
//!
//! Usage:
//!   blackout -m 0                 Cover every monitor
//!   blackout -m 1 2 / -m 2,3      Cover monitors by 1-based index
//!   blackout -M Dell HP           Cover the first monitor matching each name
//!   blackout -l [--json]          List detected monitors

use clap::Parser;

use blackout_common::config::AppConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "blackout",
    about = "Turn monitors black by covering them with borderless windows",
    version,
    author,
    arg_required_else_help = true,
    after_help = "Examples:\n  \
        blackout -m 0             All monitors\n  \
        blackout -m 1 2           Monitors 1 and 2\n  \
        blackout -M \"Dell\"        First monitor with 'Dell' in its name\n  \
        blackout -M \"Dell\" \"HP\"   Several monitors by name\n  \
        blackout -c \"#00FF00\"     Green instead of black"
)]
struct Cli {
    /// Monitor indices to cover (1-based, 0 for all), comma- or space-separated
    #[arg(
        short = 'm',
        long = "monitor",
        value_name = "INDICES",
        num_args = 1..,
        allow_negative_numbers = true,
        conflicts_with = "monitor_name"
    )]
    monitor: Vec<String>,

    /// Monitor name fragments to cover (case-insensitive, "*" for all)
    #[arg(short = 'M', long = "monitor-name", value_name = "NAMES", num_args = 1..)]
    monitor_name: Vec<String>,

    /// Fill colour: a name such as "black" or a hex code such as "#202020"
    #[arg(short, long)]
    color: Option<String>,

    /// Keep the windows open on key presses (close with Alt+F4 or Ctrl+C)
    #[arg(short = 'k', long)]
    disable_key_exit: bool,

    /// List detected monitors and exit
    #[arg(short, long)]
    list: bool,

    /// Print the monitor list as JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load();
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    blackout_common::logging::init_logging(&logging);

    if cli.list {
        return commands::list::run(cli.json);
    }

    commands::cover::run(
        commands::cover::CoverArgs {
            monitor: cli.monitor,
            monitor_name: cli.monitor_name,
            color: cli.color,
            disable_key_exit: cli.disable_key_exit,
        },
        &config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn monitor_accepts_several_values_and_negatives() {
        let cli = Cli::try_parse_from(["blackout", "-m", "1,2", "3", "-5"]).unwrap();
        assert_eq!(cli.monitor, vec!["1,2", "3", "-5"]);
        assert!(cli.monitor_name.is_empty());
    }

    #[test]
    fn index_and_name_flags_conflict() {
        let err = Cli::try_parse_from(["blackout", "-m", "1", "-M", "Dell"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn names_stop_at_next_flag() {
        let cli =
            Cli::try_parse_from(["blackout", "-M", "Dell", "HP", "-c", "#fff", "-k"]).unwrap();
        assert_eq!(cli.monitor_name, vec!["Dell", "HP"]);
        assert_eq!(cli.color.as_deref(), Some("#fff"));
        assert!(cli.disable_key_exit);
    }

    #[test]
    fn json_requires_list() {
        assert!(Cli::try_parse_from(["blackout", "--json"]).is_err());
        assert!(Cli::try_parse_from(["blackout", "-l", "--json"]).unwrap().json);
    }
}
