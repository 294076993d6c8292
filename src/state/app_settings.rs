use crate::cli::Cli;
use crate::components::theme::Theme;
use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub theme: Theme,
    pub mascot: bool,
    /// Hides the key help footer.
    pub full_screen: bool,
    pub log_level: LevelFilter,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Styled,
            mascot: false,
            full_screen: false,
            log_level: LevelFilter::Error,
        }
    }
}

impl AppSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            theme: Theme::from_plain(cli.plain),
            mascot: cli.mascot,
            full_screen: false,
            log_level: cli.log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn settings_follow_flags() {
        let cli = Cli::try_parse_from(["nfl-scores", "--plain", "--mascot", "--log-level", "warn"])
            .unwrap();
        let settings = AppSettings::from_cli(&cli);
        assert_eq!(settings.theme, Theme::Plain);
        assert!(settings.mascot);
        assert!(!settings.full_screen);
        assert_eq!(settings.log_level, LevelFilter::Warn);
    }
}
