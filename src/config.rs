// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Canvas configuration loaded from TOML
//!
//! ```toml
//! width = 600
//! height = 500
//! background = "#ffffff"
//! surface = "svg"
//! ```
//!
//! Every key is optional; missing keys fall back to `settings`.

use crate::error::{CanvasError, Result};
use crate::paint::{Color, SurfaceKind};
use crate::settings;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Background color string; no background is painted when unset
    pub background: Option<String>,
    pub background_opacity: f64,
    /// Surface kind name (`image`, `svg`, `pdf`, `ps`, `recording`)
    pub surface: String,
    pub dpi: f64,
    /// Default font size in points
    pub font_size: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: settings::canvas::WIDTH,
            height: settings::canvas::HEIGHT,
            background: None,
            background_opacity: 1.0,
            surface: "image".to_string(),
            dpi: settings::units::DPI,
            font_size: settings::units::FONT_SIZE_PT,
        }
    }
}

impl CanvasConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CanvasError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading canvas config: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    pub fn surface_kind(&self) -> Result<SurfaceKind> {
        self.surface.parse()
    }

    pub fn background_color(&self) -> Result<Option<Color>> {
        self.background.as_deref().map(str::parse).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = CanvasConfig::from_toml_str("width = 300").unwrap();
        assert_eq!(config.width, 300);
        assert_eq!(config.height, settings::canvas::HEIGHT);
        assert_eq!(config.dpi, 96.0);
        assert_eq!(config.background_color(), Ok(None));
    }

    #[test]
    fn test_full_config() {
        let config = CanvasConfig::from_toml_str(
            r##"
            width = 600
            height = 500
            background = "#fff"
            background_opacity = 0.5
            surface = "postscript"
            "##,
        )
        .unwrap();
        assert_eq!(config.surface_kind(), Ok(SurfaceKind::Ps));
        assert_eq!(config.background_color(), Ok(Some(Color::WHITE)));
    }

    #[test]
    fn test_bad_values_are_reported() {
        assert!(matches!(
            CanvasConfig::from_toml_str("width = \"wide\""),
            Err(CanvasError::Config(_))
        ));

        let config = CanvasConfig {
            surface: "bitmap".to_string(),
            background: Some("#zzz".to_string()),
            ..CanvasConfig::default()
        };
        assert_eq!(
            config.surface_kind(),
            Err(CanvasError::UnknownSurfaceKind("bitmap".to_string()))
        );
        assert!(matches!(
            config.background_color(),
            Err(CanvasError::InvalidColor(_))
        ));
    }
}
