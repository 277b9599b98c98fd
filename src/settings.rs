//! Plugin preferences
//!
//! Stored as XML in the user's config directory. Everything here is a
//! presentation default; per-clip values live in the host's parameters.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::de::from_str;
use quick_xml::se::to_string;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SettingsError;
use crate::osc::{OverlayStyle, DEFAULT_HIT_TOLERANCE_PX};
use crate::render::MaskStyle;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// RGBA color as stored in the settings file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl From<[f32; 4]> for Rgba {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

impl Rgba {
    fn sanitized(self, fallback: Rgba) -> Self {
        Self {
            r: clamp_or(self.r, 0.0, 1.0, fallback.r),
            g: clamp_or(self.g, 0.0, 1.0, fallback.g),
            b: clamp_or(self.b, 0.0, 1.0, fallback.b),
            a: clamp_or(self.a, 0.0, 1.0, fallback.a),
        }
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// User preferences for the mask plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "FxMaskSettings", default)]
pub struct PluginSettings {
    /// Handle grab radius in screen pixels (1-64)
    #[serde(rename = "hitTolerance")]
    pub hit_tolerance_px: f32,

    /// Overlay outline thickness in render units
    #[serde(rename = "overlayOutlineWidth")]
    pub overlay_outline_width: f32,

    /// Overlay handle square size in render units
    #[serde(rename = "overlayHandleSize")]
    pub overlay_handle_size: f32,

    #[serde(rename = "overlayOutlineColor")]
    pub overlay_outline_color: Rgba,

    #[serde(rename = "overlayHandleColor")]
    pub overlay_handle_color: Rgba,

    /// Rendered mask outline thickness in pixels (1-64)
    #[serde(rename = "maskOutlineWidth")]
    pub mask_outline_width: f32,

    /// Default for the Fill Color parameter
    #[serde(rename = "fillColor")]
    pub fill_color: Rgba,

    /// Default for the Outline Color parameter
    #[serde(rename = "outlineColor")]
    pub outline_color: Rgba,

    /// Default for the Fill Mode parameter
    #[serde(rename = "filled")]
    pub filled: bool,
}

impl Default for PluginSettings {
    fn default() -> Self {
        let overlay = OverlayStyle::default();
        let mask = MaskStyle::default();
        Self {
            hit_tolerance_px: DEFAULT_HIT_TOLERANCE_PX,
            overlay_outline_width: overlay.outline_width,
            overlay_handle_size: overlay.handle_size,
            overlay_outline_color: overlay.outline_color.into(),
            overlay_handle_color: overlay.handle_color.into(),
            mask_outline_width: mask.outline_width,
            fill_color: mask.fill_color.into(),
            outline_color: mask.outline_color.into(),
            filled: mask.filled,
        }
    }
}

impl PluginSettings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("fx-mask");
            p.push("settings.xml");
            p
        })
    }

    /// Clamp every value into its usable range; non-finite values fall back
    /// to the defaults
    pub fn clamp(&mut self) {
        let d = Self::default();
        self.hit_tolerance_px = clamp_or(self.hit_tolerance_px, 1.0, 64.0, d.hit_tolerance_px);
        self.overlay_outline_width = clamp_or(self.overlay_outline_width, 0.0005, 0.05, d.overlay_outline_width);
        self.overlay_handle_size = clamp_or(self.overlay_handle_size, 0.002, 0.1, d.overlay_handle_size);
        self.mask_outline_width = clamp_or(self.mask_outline_width, 1.0, 64.0, d.mask_outline_width);
        self.overlay_outline_color = self.overlay_outline_color.sanitized(d.overlay_outline_color);
        self.overlay_handle_color = self.overlay_handle_color.sanitized(d.overlay_handle_color);
        self.fill_color = self.fill_color.sanitized(d.fill_color);
        self.outline_color = self.outline_color.sanitized(d.outline_color);
    }

    /// Load from the config directory, falling back to defaults when the
    /// file is absent or unreadable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let mut settings: Self = from_str(&contents)?;
        settings.clamp();
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Save to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let xml = to_string(self)?;
        fs::write(path, format!("{}{}", XML_HEADER, xml))?;
        Ok(())
    }

    /// Appearance of the on-screen control overlay
    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle {
            outline_width: self.overlay_outline_width,
            handle_size: self.overlay_handle_size,
            outline_color: self.overlay_outline_color.into(),
            handle_color: self.overlay_handle_color.into(),
        }
    }
}
