use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_ENV_VAR: &str = "TASKLY_CONFIG";
const DATA_DIR_NAME: &str = ".taskly";
const OUTBOX_FILE_NAME: &str = "outbox.jsonl";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    /// Where the configured user's notifications go. Nothing is sent without one.
    pub email: Option<String>,
    /// Tracing filter directive, e.g. "taskly_core=debug".
    pub log: Option<String>,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub outbox: Option<PathBuf>,
    /// Addresses for other owners, used by the daily summary run.
    pub recipients: HashMap<String, String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            outbox: None,
            recipients: HashMap::new(),
        }
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DATA_DIR_NAME))
}

pub fn config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    Ok(default_data_dir()?.join(CONFIG_FILE_NAME))
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// A missing file gives the defaults; a file that exists must parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    pub fn user(&self) -> String {
        self.user
            .clone()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| std::env::var("USER").ok().filter(|u| !u.trim().is_empty()))
            .unwrap_or_else(|| "default".to_string())
    }

    pub fn outbox_path(&self) -> Result<PathBuf> {
        match &self.notifications.outbox {
            Some(path) => Ok(path.clone()),
            None => Ok(self.data_dir()?.join(OUTBOX_FILE_NAME)),
        }
    }

    /// Owner name to address, with the configured user's own `email` included.
    pub fn recipients(&self) -> HashMap<String, String> {
        let mut recipients = self.notifications.recipients.clone();
        if let Some(email) = self.email.as_ref().filter(|e| !e.trim().is_empty()) {
            recipients.insert(self.user(), email.clone());
        }
        recipients
    }
}
