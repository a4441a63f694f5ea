mod cli;
mod file;

pub use cli::{Cli, Command};

use crate::tags::Tags;

/// Display to connect to when neither the CLI, DISPLAY, nor the config
/// file names one.
pub const DEFAULT_DISPLAY: &str = ":0";

const DEFAULT_TICK_MS: u64 = 8;

/// Merged configuration from CLI args and TOML file.
#[derive(Debug, Clone)]
pub struct Config {
    pub display: String,
    pub tags: Tags,
    pub tick_ms: u64,
    pub surface_height: Option<f64>,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    /// The display resolves CLI flag first (clap also reads DISPLAY from the
    /// environment), then the config file, then [`DEFAULT_DISPLAY`].
    pub fn load(cli: &Cli) -> Self {
        let file_config = cli
            .config
            .as_ref()
            .and_then(|p| file::load_from_path(p))
            .or_else(file::load_from_default_paths)
            .unwrap_or_default();

        Self {
            display: cli
                .display
                .clone()
                .or(file_config.display)
                .unwrap_or_else(|| DEFAULT_DISPLAY.into()),
            tags: cli
                .tags
                .clone()
                .or(file_config.tags)
                .unwrap_or_default(),
            tick_ms: cli.tick_ms.or(file_config.tick_ms).unwrap_or(DEFAULT_TICK_MS),
            surface_height: cli.surface_height.or(file_config.surface_height),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.display.is_empty() {
            return Err("Display name cannot be empty");
        }
        if self.tick_ms == 0 {
            return Err("tick-ms must be greater than zero");
        }
        if matches!(self.surface_height, Some(h) if h <= 0.0) {
            return Err("surface-height must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            display: DEFAULT_DISPLAY.into(),
            tags: Tags::default(),
            tick_ms: DEFAULT_TICK_MS,
            surface_height: None,
        }
    }

    #[test]
    fn defaults_validate() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn zero_tick_is_rejected() {
        let mut c = config();
        c.tick_ms = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn non_positive_surface_height_is_rejected() {
        let mut c = config();
        c.surface_height = Some(0.0);
        assert!(c.validate().is_err());
        c.surface_height = Some(1080.0);
        assert!(c.validate().is_ok());
    }
}
