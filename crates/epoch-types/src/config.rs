// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EpochError, EpochResult};

/// Top-level tool configuration.
/// Every field is optional in the JSON file; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub figure: FigureConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// File extension used when scanning directories for snapshots.
    #[serde(default = "default_sdf_extension")]
    pub sdf_extension: String,
}

/// Canvas size in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Colormap name: "viridis", "jet", "plasma" or "gray".
    #[serde(default = "default_colormap")]
    pub colormap: String,
    /// Image interpolation: "nearest", "bilinear" or "bicubic".
    #[serde(default = "default_interpolation")]
    pub interpolation: String,
    /// Logarithmic colour normalisation for 2D fields.
    #[serde(default)]
    pub log_scale: bool,
    /// Seconds between animation frames (GIF fps = 1 / duration).
    #[serde(default = "default_frame_duration")]
    pub frame_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_plot_path")]
    pub plot: String,
    #[serde(default = "default_preview_path")]
    pub preview: String,
    #[serde(default = "default_gif_path")]
    pub gif: String,
}

fn default_sdf_extension() -> String {
    "sdf".to_string()
}
fn default_width() -> u32 {
    600
}
fn default_height() -> u32 {
    500
}
fn default_colormap() -> String {
    "viridis".to_string()
}
fn default_interpolation() -> String {
    "bicubic".to_string()
}
fn default_frame_duration() -> f64 {
    0.1
}
fn default_plot_path() -> String {
    "plot.png".to_string()
}
fn default_preview_path() -> String {
    "preview.png".to_string()
}
fn default_gif_path() -> String {
    "animation.gif".to_string()
}

impl Default for FigureConfig {
    fn default() -> Self {
        FigureConfig {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            colormap: default_colormap(),
            interpolation: default_interpolation(),
            log_scale: false,
            frame_duration: default_frame_duration(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            plot: default_plot_path(),
            preview: default_preview_path(),
            gif: default_gif_path(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            figure: FigureConfig::default(),
            render: RenderConfig::default(),
            output: OutputConfig::default(),
            sdf_extension: default_sdf_extension(),
        }
    }
}

impl ToolConfig {
    /// Load from JSON file and validate.
    pub fn from_file(path: impl AsRef<Path>) -> EpochResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EpochResult<()> {
        if self.figure.width < 64 || self.figure.height < 64 {
            return Err(EpochError::ConfigError(format!(
                "figure must be at least 64x64 px, got {}x{}",
                self.figure.width, self.figure.height
            )));
        }
        if !self.render.frame_duration.is_finite() || self.render.frame_duration <= 0.0 {
            return Err(EpochError::ConfigError(format!(
                "frame_duration must be finite and > 0, got {}",
                self.render.frame_duration
            )));
        }
        if self.sdf_extension.is_empty() || self.sdf_extension.starts_with('.') {
            return Err(EpochError::ConfigError(format!(
                "sdf_extension must be a bare extension like \"sdf\", got {:?}",
                self.sdf_extension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_json_gives_defaults() {
        let cfg: ToolConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ToolConfig::default());
        assert_eq!(cfg.figure.width, 600);
        assert_eq!(cfg.render.interpolation, "bicubic");
        assert_eq!(cfg.sdf_extension, "sdf");
    }

    #[test]
    fn test_partial_override() {
        let cfg: ToolConfig =
            serde_json::from_str(r#"{"render": {"colormap": "jet", "frame_duration": 0.05}}"#)
                .unwrap();
        assert_eq!(cfg.render.colormap, "jet");
        assert!((cfg.render.frame_duration - 0.05).abs() < 1e-12);
        assert_eq!(cfg.render.interpolation, "bicubic");
        assert_eq!(cfg.output.gif, "animation.gif");
    }

    #[test]
    fn test_from_file_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"render": {{"frame_duration": 0.0}}}}"#).unwrap();
        let err = ToolConfig::from_file(file.path()).expect_err("zero duration must fail");
        match err {
            EpochError::ConfigError(msg) => assert!(msg.contains("frame_duration")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = ToolConfig::default();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: ToolConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, cfg2);
    }
}
