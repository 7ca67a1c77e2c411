//! Playground configuration from `playpen.toml`.
//!
//! The file is optional: without one every section keeps its defaults and
//! the project root is the current directory.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [serve], [preview], [storage]
//! ├── types/         # ConfigError, global handle
//! └── mod.rs         # PlaypenConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{PreviewConfig, ServeConfig, StorageConfig};
pub use types::{ConfigError, cfg, init_config};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing playpen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaypenConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl PlaypenConfig {
    /// Load configuration for `cli`, searching upward from cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = Some(path);
                config
            }
            None => {
                crate::debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli);
        config.storage.normalize(&config.root);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} (ignored):", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// CLI flags override file values.
    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        if let Some(storage) = &cli.storage {
            self.storage.path = storage.clone();
        }

        if let Commands::Serve {
            interface,
            port,
            debounce,
            viewport,
            open,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.open, open.as_ref());
            Self::update_option(&mut self.preview.debounce_ms, debounce.as_ref());
            Self::update_option(&mut self.preview.viewport, viewport.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.serve
            .validate()
            .map_err(|message| ConfigError::Invalid("serve", message))?;
        self.preview
            .validate()
            .map_err(|message| ConfigError::Invalid("preview", message))
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from `extra`.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> PlaypenConfig {
    let (parsed, ignored) = PlaypenConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_str_invalid_toml() {
        let result: Result<PlaypenConfig, _> = toml::from_str("[serve\nport = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[serve]\nport = 6000\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = PlaypenConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.serve.port, 6000);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = PlaypenConfig::parse_with_ignored("[preview]\nsettle_ms = 100").unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = test_parse_config("[serve]\nport = 6000\n[preview]\ndebounce_ms = 900");
        let cli = Cli::parse_from([
            "playpen",
            "--storage",
            "/tmp/other.json",
            "serve",
            "--port",
            "7000",
            "--debounce",
            "100",
        ]);
        config.apply_cli(&cli);

        assert_eq!(config.serve.port, 7000);
        assert_eq!(config.preview.debounce_ms, 100);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/other.json"));
        // Untouched fields keep the file value
        assert_eq!(config.preview.settle_ms, 300);
    }

    #[test]
    fn test_non_serve_command_keeps_serve_section() {
        let mut config = test_parse_config("[serve]\nport = 6000");
        let cli = Cli::parse_from(["playpen", "file", "ls"]);
        config.apply_cli(&cli);
        assert_eq!(config.serve.port, 6000);
    }

    #[test]
    fn test_port_clash_rejected() {
        let config = test_parse_config("[serve]\nport = 4000\nws_port = 4000");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid("serve", msg)) if msg.contains("4000")
        ));
    }
}
