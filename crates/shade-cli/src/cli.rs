//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use shade::ThemePreference;

#[derive(Debug, Parser)]
#[command(name = "shade", version, about = "Manage the application shell's theme and routes")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Preference file (defaults to <config dir>/shade/preferences.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output mode
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Auto)]
    pub output: OutputMode,

    /// Ignore the OS color scheme, as if the platform had no support for it
    #[arg(long, global = true)]
    pub no_system_signal: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or change the theme preference
    #[command(subcommand)]
    Theme(ThemeCommand),
    /// Inspect the route table
    #[command(subcommand)]
    Routes(RoutesCommand),
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Print the current preference
    Show,
    /// Switch between light and dark
    Toggle,
    /// Choose a preference explicitly
    Set {
        #[arg(value_parser = parse_preference)]
        preference: ThemePreference,
    },
    /// Forget the stored preference and follow the OS again
    Clear,
    /// Follow OS color-scheme changes, printing each change
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
        /// Stop after this many polls (0 runs until interrupted)
        #[arg(long, default_value_t = 0)]
        ticks: u64,
    },
}

#[derive(Debug, Subcommand)]
pub enum RoutesCommand {
    /// List every route in match order
    List,
    /// Show the route a path resolves to
    Resolve { path: String },
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Styled when stdout is a terminal, plain otherwise
    Auto,
    /// Always styled
    Term,
    /// Never styled
    Text,
    /// Machine-readable JSON
    Json,
}

impl OutputMode {
    /// Whether styling escapes should be emitted.
    pub fn should_use_color(self) -> bool {
        match self {
            OutputMode::Auto => console::colors_enabled(),
            OutputMode::Term => true,
            OutputMode::Text | OutputMode::Json => false,
        }
    }

    pub fn is_json(self) -> bool {
        self == OutputMode::Json
    }
}

fn parse_preference(value: &str) -> Result<ThemePreference, String> {
    value.parse::<ThemePreference>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme_set() {
        let cli = Cli::try_parse_from(["shade", "theme", "set", "Dark"]).unwrap();
        match cli.command {
            Command::Theme(ThemeCommand::Set { preference }) => {
                assert_eq!(preference, ThemePreference::Dark)
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_preference() {
        assert!(Cli::try_parse_from(["shade", "theme", "set", "sepia"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shade",
            "routes",
            "list",
            "--output",
            "json",
            "--store",
            "/tmp/prefs.json",
        ])
        .unwrap();
        assert_eq!(cli.global.output, OutputMode::Json);
        assert_eq!(cli.global.store, Some(PathBuf::from("/tmp/prefs.json")));
    }

    #[test]
    fn test_watch_defaults() {
        let cli = Cli::try_parse_from(["shade", "theme", "watch"]).unwrap();
        match cli.command {
            Command::Theme(ThemeCommand::Watch { interval_ms, ticks }) => {
                assert_eq!(interval_ms, 1000);
                assert_eq!(ticks, 0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_mode_color() {
        assert!(OutputMode::Term.should_use_color());
        assert!(!OutputMode::Text.should_use_color());
        assert!(!OutputMode::Json.should_use_color());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
