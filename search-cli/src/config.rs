use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stream_search::SearchConfig;

use crate::{
    cli::OutputFormat,
    error::{CliError, Result},
};

const APP_DIR: &str = "stream-search";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_format: OutputFormat,
    pub colored: bool,
    pub search: SearchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Pretty,
            colored: true,
            search: SearchConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| CliError::Config("could not determine config directory".to_string()))
    }

    fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = Self::resolve_path(path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.show()?)?;
        Ok(())
    }

    pub fn reset(path: Option<&Path>) -> Result<()> {
        Self::default().save(path)
    }

    pub fn show(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies command-line overrides on top of the loaded file.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        client_id: Option<String>,
        no_color: bool,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.search.base_url = base_url;
        }
        if let Some(client_id) = client_id {
            self.search.client_id = client_id;
        }
        if no_color {
            self.colored = false;
        }
        self
    }
}
