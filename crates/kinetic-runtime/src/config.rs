//! Session configuration

use std::path::{Path, PathBuf};

use kinetic_core::{FaceFrameFeatures, FrameSourceTypes, KineticError, KineticResult, Size};
use kinetic_state::{EngineConfig, DEFAULT_BODY_CAPACITY};
use kinetic_visual::{DepthImageMode, Palette};
use serde::{Deserialize, Serialize};

/// Default screenshot directory, relative to the working directory
pub const DEFAULT_SCREENSHOT_DIR: &str = "Screenshots";

/// Logging section
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Host session configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Streams opened on a modern sensor
    pub sources: FrameSourceTypes,
    /// Face features; empty means no face tracker
    pub face_features: FaceFrameFeatures,
    /// Raw `DepthImageMode` bits
    pub depth_mode: u8,
    /// Packed `0xAARRGGBB` player colors; `None` keeps the default palette
    pub palette: Option<Vec<u32>>,
    pub body_capacity: usize,
    pub render_width: u32,
    pub render_height: u32,
    pub force_render_buffer: bool,
    pub fullscreen: bool,
    pub screenshot_dir: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            sources: FrameSourceTypes::DEFAULT_SOURCES,
            face_features: FaceFrameFeatures::NONE,
            depth_mode: DepthImageMode::NORMAL.0,
            palette: None,
            body_capacity: DEFAULT_BODY_CAPACITY,
            render_width: 1920,
            render_height: 1080,
            force_render_buffer: false,
            fullscreen: false,
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
            logging: LoggingConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> KineticResult<Self> {
        let config: SessionConfig = serde_json::from_str(json)
            .map_err(|e| KineticError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> KineticResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading session config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> KineticResult<()> {
        if self.render_width == 0 || self.render_height == 0 {
            return Err(KineticError::InvalidConfig(format!(
                "render size {}x{} has a zero dimension",
                self.render_width, self.render_height
            )));
        }
        if matches!(&self.palette, Some(colors) if colors.is_empty()) {
            return Err(KineticError::InvalidConfig("palette is empty".to_string()));
        }
        if self.body_capacity == 0 || self.body_capacity > usize::from(kinetic_core::NO_PLAYER) {
            return Err(KineticError::InvalidConfig(format!(
                "body capacity {} out of range",
                self.body_capacity
            )));
        }
        Ok(())
    }

    pub fn render_size(&self) -> Size {
        Size::new(self.render_width, self.render_height)
    }

    pub fn depth_image_mode(&self) -> DepthImageMode {
        DepthImageMode(self.depth_mode)
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            depth_mode: self.depth_image_mode(),
            palette: self
                .palette
                .as_deref()
                .map(Palette::from_packed)
                .unwrap_or_default(),
            body_capacity: self.body_capacity,
            ..EngineConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::{ColorBgra, DEFAULT_USER_COLORS};

    #[test]
    fn test_empty_object_is_default() {
        let config = SessionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.sources, FrameSourceTypes::DEFAULT_SOURCES);
        assert_eq!(config.render_size(), Size::new(1920, 1080));
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_override() {
        let config = SessionConfig::from_json_str(
            r#"{
                "sources": 9,
                "depth_mode": 3,
                "palette": [4278255360],
                "force_render_buffer": true,
                "logging": { "json": true }
            }"#,
        )
        .unwrap();
        assert_eq!(config.sources, FrameSourceTypes::COLOR | FrameSourceTypes::DEPTH);
        assert!(config.depth_image_mode().is_wrapped());
        assert!(config.depth_image_mode().user_color());
        assert!(config.force_render_buffer);
        assert!(config.logging.json);
        assert_eq!(config.logging.filter, "info");

        let engine = config.to_engine_config();
        assert_eq!(engine.palette.colors(), &[ColorBgra::from_packed(0xFF00FF00)]);
    }

    #[test]
    fn test_default_palette_when_absent() {
        let engine = SessionConfig::default().to_engine_config();
        assert_eq!(engine.palette.colors(), &DEFAULT_USER_COLORS[..]);
        assert_eq!(engine.body_capacity, DEFAULT_BODY_CAPACITY);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            SessionConfig::from_json_str("not json"),
            Err(KineticError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"palette": []}"#),
            Err(KineticError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"render_width": 0}"#),
            Err(KineticError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"body_capacity": 0}"#),
            Err(KineticError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io() {
        let path = std::env::temp_dir().join("kinetic-runtime-missing-config.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(SessionConfig::from_file(&path), Err(KineticError::Io(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join("kinetic-runtime-config-test.json");
        let mut config = SessionConfig::default();
        config.fullscreen = true;
        config.face_features = FaceFrameFeatures::ROTATION_ORIENTATION;
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(SessionConfig::from_file(&path).unwrap(), config);
        let _ = std::fs::remove_file(&path);
    }
}
