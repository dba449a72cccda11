//! Serializable studio profile for cross-process communication.
//!
//! A [`StudioProfile`] captures the editing session in a format that can be
//! serialized to JSON and sent between the front-end and a backend.
//!
//! # Example
//!
//! ```
//! use dress_customizer::{DressParameters, Neckline, StudioProfile};
//!
//! let profile = StudioProfile::new()
//!     .with_dress(DressParameters::default().with_neckline(Neckline::Boat))
//!     .with_prompt("boat neck gown");
//!
//! let json = profile.to_json().unwrap();
//! let restored = StudioProfile::from_json(&json).unwrap();
//! assert_eq!(restored.dress.neckline, Neckline::Boat);
//! ```

use serde::{Deserialize, Serialize};

use crate::avatar::{AvatarParameters, AvatarStyle, deserialize_canonical};
use crate::design::VARIANT_LIMIT;
use crate::dress::DressParameters;
use crate::export::SizePx;

// ============================================================================
// Export Settings
// ============================================================================

/// Raster sizes and the variant tray cap.
///
/// # JSON Format
///
/// ```json
/// {
///   "thumbnail": { "width": 200, "height": 280 },
///   "full": { "width": 800, "height": 1120 },
///   "variantLimit": 12
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub thumbnail: SizePx,
    pub full: SizePx,
    pub variant_limit: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            thumbnail: SizePx::THUMBNAIL,
            full: SizePx::FULL,
            variant_limit: VARIANT_LIMIT,
        }
    }
}

// ============================================================================
// StudioProfile
// ============================================================================

/// Every studio setting, with defaults for anything missing.
///
/// The `body` field accepts either stored body profile shape and is
/// canonicalized on read; it always serializes in the metric shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioProfile {
    pub dress: DressParameters,

    #[serde(deserialize_with = "deserialize_canonical")]
    pub body: AvatarParameters,

    pub avatar_style: AvatarStyle,

    /// Last prompt text, if any.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prompt: String,

    pub export: ExportSettings,
}

impl StudioProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dress(mut self, dress: DressParameters) -> Self {
        self.dress = dress;
        self
    }

    pub fn with_body(mut self, body: AvatarParameters) -> Self {
        self.body = body;
        self
    }

    pub fn with_avatar_style(mut self, style: AvatarStyle) -> Self {
        self.avatar_style = style;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_export(mut self, export: ExportSettings) -> Self {
        self.export = export;
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// JSON schema of the parameter records.
#[cfg(feature = "jsonschema")]
pub fn parameter_schemas() -> serde_json::Value {
    serde_json::json!({
        "dressParameters": schemars::schema_for!(DressParameters),
        "avatarParameters": schemars::schema_for!(AvatarParameters),
        "exportSize": schemars::schema_for!(SizePx),
    })
}

// ============================================================================
// Tests
// ============================================================================
