//! Screenshot capture of the off-screen render buffer

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use kinetic_core::{KineticError, KineticResult};

use crate::RenderPlan;

/// Encodings accepted by the screenshot sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFileType {
    #[default]
    Png,
    Jpg,
    Bmp,
    Gif,
    Tiff,
    Wmp,
    Dds,
}

impl ImageFileType {
    pub const ALL: [ImageFileType; 7] = [
        ImageFileType::Png,
        ImageFileType::Jpg,
        ImageFileType::Bmp,
        ImageFileType::Gif,
        ImageFileType::Tiff,
        ImageFileType::Wmp,
        ImageFileType::Dds,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ImageFileType::Png => "png",
            ImageFileType::Jpg => "jpg",
            ImageFileType::Bmp => "bmp",
            ImageFileType::Gif => "gif",
            ImageFileType::Tiff => "tiff",
            ImageFileType::Wmp => "wmp",
            ImageFileType::Dds => "dds",
        }
    }

    /// Encoding for `path`, falling back to PNG for unknown extensions
    pub fn for_path(path: &Path) -> Self {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match extension.parse() {
            Ok(file_type) => file_type,
            Err(_) => {
                tracing::warn!(
                    path = %path.display(),
                    extension,
                    "unknown screenshot file type, saving as png"
                );
                ImageFileType::Png
            }
        }
    }
}

impl FromStr for ImageFileType {
    type Err = KineticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageFileType::ALL
            .into_iter()
            .find(|t| t.extension().eq_ignore_ascii_case(s))
            .ok_or_else(|| KineticError::InvalidConfig(format!("unknown image file type {s:?}")))
    }
}

impl fmt::Display for ImageFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encodes the current render buffer
pub trait ScreenshotSink {
    fn save(&mut self, path: &Path, file_type: ImageFileType) -> KineticResult<()>;
}

/// `<dir>/<yyMMddHHmmss>.png`
pub fn default_screenshot_path(dir: &Path, now: DateTime<Local>) -> PathBuf {
    dir.join(format!("{}.png", now.format("%y%m%d%H%M%S")))
}

/// Save the render buffer to `path`, or a timestamped file under `dir`
///
/// Only possible when rendering through an off-screen buffer; direct
/// rendering has nothing to capture.
pub fn save_screenshot(
    plan: &RenderPlan,
    sink: &mut dyn ScreenshotSink,
    dir: &Path,
    path: Option<&Path>,
) -> KineticResult<PathBuf> {
    if plan.direct {
        tracing::warn!("screenshot requested while rendering directly");
        return Err(KineticError::ConfigViolation(
            "screenshots need an off-screen render buffer; set force_render_buffer".to_string(),
        ));
    }
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            std::fs::create_dir_all(dir)?;
            default_screenshot_path(dir, Local::now())
        }
    };
    let file_type = ImageFileType::for_path(&path);
    sink.save(&path, file_type)?;
    tracing::info!(path = %path.display(), %file_type, "screenshot saved");
    Ok(path)
}
