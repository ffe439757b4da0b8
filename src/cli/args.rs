//! CLI argument definitions
//!
//! Operational settings only; the analysis selection (city, month, day) is
//! always prompt-driven.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "bikestats")]
#[command(about = "Interactive exploratory statistics over bicycle-share trip logs", version)]
pub(crate) struct Cli {
    /// Directory containing the city CSV files
    #[arg(short, long, value_name = "DIR")]
    pub(crate) data_dir: Option<PathBuf>,

    /// Color output mode
    #[arg(long, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long)]
    pub(crate) no_color: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if self.data_dir.is_none() {
            self.data_dir = config.data_dir.clone();
        }
        if self.color == ColorMode::Auto
            && let Some(color) = config.color
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }
        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli::parse_from(["bikestats"])
    }

    #[test]
    fn config_data_dir_applies_when_cli_unset() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/data")),
            ..Config::default()
        };
        let cli = bare_cli().with_config(&config);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/srv/data")));
    }

    #[test]
    fn cli_data_dir_wins_over_config() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/data")),
            ..Config::default()
        };
        let cli = Cli::parse_from(["bikestats", "--data-dir", "/cli/data"]).with_config(&config);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/cli/data")));
    }

    #[test]
    fn config_color_applies_only_at_auto() {
        let config = Config {
            color: Some(ConfigColorMode::Never),
            ..Config::default()
        };
        assert_eq!(bare_cli().with_config(&config).color, ColorMode::Never);

        let forced = Cli::parse_from(["bikestats", "--color", "always"]).with_config(&config);
        assert_eq!(forced.color, ColorMode::Always);
    }

    #[test]
    fn no_color_flag_disables_color() {
        let cli = Cli::parse_from(["bikestats", "--no-color", "--color", "always"]);
        assert!(!cli.use_color());
    }
}
