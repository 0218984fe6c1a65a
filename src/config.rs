use crate::calendar::{CalendarError, WorkCalendar, WorkCalendarConfig};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "HR_PORTAL_CONFIG";
pub const HTTP_ADDR_ENV: &str = "HR_PORTAL_HTTP_ADDR";
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub calendar: WorkCalendarConfig,
    #[serde(default = "default_http_addr")]
    pub http_addr: String,
}

fn default_http_addr() -> String {
    DEFAULT_HTTP_ADDR.to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            calendar: WorkCalendarConfig::default(),
            http_addr: default_http_addr(),
        }
    }
}

impl PortalConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        let config: Self = serde_json::from_reader(file).map_err(|source| ConfigError::Parse {
            path: shown.clone(),
            source,
        })?;
        config.work_calendar()?;
        tracing::info!(path = %shown, "loaded portal config");
        Ok(config)
    }

    /// File named by `HR_PORTAL_CONFIG` (defaults otherwise), then
    /// `HR_PORTAL_HTTP_ADDR` on top.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim())?,
            _ => Self::default(),
        };
        if let Ok(addr) = std::env::var(HTTP_ADDR_ENV) {
            config.http_addr = addr;
        }
        Ok(config)
    }

    pub fn work_calendar(&self) -> Result<WorkCalendar, CalendarError> {
        WorkCalendar::from_config(&self.calendar)
    }
}
