//! Application configuration.

use std::{fs, path::Path};

use anyhow::bail;
use serde::Deserialize;
use sketchpad_core::Rgba;

/// Tunables for the canvas and toolbar, loaded from `sketchpad.toml`.
///
/// Every field has a default, so a partial file, or no file at all, is
/// fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Live canvas edge length in pixels (square).
    pub canvas_size: u32,
    /// Export raster edge length in pixels (square).
    pub export_size: u32,
    /// Width of the thin marker.
    pub thin_width: f64,
    /// Width of the thick marker.
    pub thick_width: f64,
    /// Sticker font size in canvas pixels.
    pub sticker_size: f64,
    /// Glyphs offered on the sticker toolbar.
    pub stickers: Vec<String>,
    /// Canvas background color, RGB.
    pub background: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_size: sketchpad_render::LIVE_CANVAS_SIZE,
            export_size: sketchpad_render::EXPORT_SIZE,
            thin_width: 2.0,
            thick_width: 6.0,
            sticker_size: 24.0,
            stickers: vec!["✨".to_string(), "⭐".to_string(), "🌈".to_string()],
            background: [255, 255, 255],
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does
    /// not exist.
    pub fn load<A: AsRef<Path>>(path: A) -> anyhow::Result<Self> {
        Self::load_impl(path.as_ref())
    }

    fn load_impl(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.canvas_size == 0 || self.export_size < self.canvas_size {
            bail!("export_size must be at least canvas_size, and both non-zero");
        }
        if self.thin_width <= 0.0 || self.thick_width < self.thin_width {
            bail!("marker widths must be positive, with thick_width >= thin_width");
        }
        if self.sticker_size <= 0.0 {
            bail!("sticker_size must be positive");
        }
        Ok(())
    }

    pub fn background_color(&self) -> Rgba {
        let [r, g, b] = self.background;
        Rgba::new(r, g, b, 255)
    }
}
