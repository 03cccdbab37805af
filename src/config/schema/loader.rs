use super::{Config, default_app_dir};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Whether a config came from disk or was just written with defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    Loaded,
    Created,
}

impl Config {
    /// Load `~/.ai-answers/config.toml`, writing defaults on first run.
    pub fn load_or_init() -> Result<(Self, ConfigOrigin)> {
        let app_dir = default_app_dir();
        if !app_dir.exists() {
            fs::create_dir_all(&app_dir).context("Failed to create .ai-answers directory")?;
        }
        Self::load_or_init_at(&app_dir.join("config.toml"))
    }

    /// Load the config at `path`, creating it with defaults when missing.
    ///
    /// Runs before tracing is initialised; callers log a `Created` origin.
    pub fn load_or_init_at(path: &Path) -> Result<(Self, ConfigOrigin)> {
        if path.exists() {
            return Ok((Self::load_from(path)?, ConfigOrigin::Loaded));
        }

        let config = Self {
            config_path: path.to_path_buf(),
            ..Self::default()
        };
        config.validate()?;
        config.save()?;
        Ok((config, ConfigOrigin::Created))
    }

    /// Load an existing config file; fails when it is missing or invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = path.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
