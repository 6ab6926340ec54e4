use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine::config_log;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera_feed::{FrameHalf, RowOrder};
use crate::locomotion::SnapSettings;
use crate::screens::{CurvedScreenParams, HemisphereParams};
use crate::teleport::TeleportConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraFeedConfig {
    pub width: u32,
    pub height: u32,
    pub row_order: RowOrder,
    /// Show this dual-lens photograph instead of the synthetic pattern.
    pub image_path: Option<PathBuf>,
    /// Lens image shown on the curved screen; `null` leaves it blank.
    pub curved_screen_image: Option<FrameHalf>,
}

impl Default for CameraFeedConfig {
    fn default() -> Self {
        CameraFeedConfig {
            width: 1920,
            height: 1920,
            row_order: RowOrder::BottomUp,
            image_path: None,
            curved_screen_image: Some(FrameHalf::Front),
        }
    }
}

/// Everything the viewer reads from its JSON config. Missing sections and
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub hemisphere: HemisphereParams,
    pub curved_screen: CurvedScreenParams,
    pub camera_feed: CameraFeedConfig,
    pub snap: SnapSettings,
    pub teleport: TeleportConfig,
    pub blink_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            hemisphere: HemisphereParams::default(),
            curved_screen: CurvedScreenParams::default(),
            camera_feed: CameraFeedConfig::default(),
            snap: SnapSettings::default(),
            teleport: TeleportConfig::default(),
            blink_delay_ms: 150,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        config_log!(INFO, "loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn blink_delay(&self) -> Duration {
        Duration::from_millis(self.blink_delay_ms)
    }
}
