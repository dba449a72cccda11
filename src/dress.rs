//! Dress design parameters.
//!
//! [`DressParameters`] is the input to the garment generator. It is always
//! supplied fresh from the editing surface or a saved design; there is no
//! identity attached to it.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "color": "#EC4899",
//!   "pattern": "solid",
//!   "texture": "satin",
//!   "textureIntensity": 40,
//!   "sleeveLength": 70,
//!   "neckline": "v-neck",
//!   "trainLength": 50,
//!   "skirtVolume": 60
//! }
//! ```
//!
//! Backend records spell the numeric fields in snake_case
//! (`sleeve_length`); both spellings are accepted.

use serde::{Deserialize, Serialize};

use crate::geometry::{
    SKIRT_MIN_HALF_WIDTH, SKIRT_VOLUME_RANGE, SLEEVE_MAX_PX, SLEEVE_VISIBILITY_FLOOR, TRAIN_MAX_PX,
    percent_of,
};

// ============================================================================
// Enumerations
// ============================================================================

/// Repeating tile drawn over the base fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    #[default]
    Solid,
    Stripes,
    Polka,
    Floral,
    Lace,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Solid,
        Pattern::Stripes,
        Pattern::Polka,
        Pattern::Floral,
        Pattern::Lace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Pattern::Solid => "solid",
            Pattern::Stripes => "stripes",
            Pattern::Polka => "polka",
            Pattern::Floral => "floral",
            Pattern::Lace => "lace",
        }
    }
}

/// Fabric whose noise recipe drives the texture overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Texture {
    Silk,
    #[default]
    Satin,
    Velvet,
    Lace,
    Chiffon,
}

impl Texture {
    pub const ALL: [Texture; 5] = [
        Texture::Silk,
        Texture::Satin,
        Texture::Velvet,
        Texture::Lace,
        Texture::Chiffon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Texture::Silk => "silk",
            Texture::Satin => "satin",
            Texture::Velvet => "velvet",
            Texture::Lace => "lace",
            Texture::Chiffon => "chiffon",
        }
    }
}

/// Shape of the bodice top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Neckline {
    #[default]
    VNeck,
    Scoop,
    OffShoulder,
    Halter,
    Boat,
}

impl Neckline {
    pub const ALL: [Neckline; 5] = [
        Neckline::VNeck,
        Neckline::Scoop,
        Neckline::OffShoulder,
        Neckline::Halter,
        Neckline::Boat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Neckline::VNeck => "v-neck",
            Neckline::Scoop => "scoop",
            Neckline::OffShoulder => "off-shoulder",
            Neckline::Halter => "halter",
            Neckline::Boat => "boat",
        }
    }
}

// ============================================================================
// DressParameters
// ============================================================================

/// Everything the garment generator needs.
///
/// Numeric fields are slider values in `0..=100`. The generator does not
/// validate them; out-of-range values produce odd but well-formed geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct DressParameters {
    /// Hex fill colour, e.g. `#EC4899`.
    pub color: String,
    pub pattern: Pattern,
    pub texture: Texture,
    #[serde(alias = "texture_intensity")]
    pub texture_intensity: f64,
    #[serde(alias = "sleeve_length")]
    pub sleeve_length: f64,
    pub neckline: Neckline,
    #[serde(alias = "train_length")]
    pub train_length: f64,
    #[serde(alias = "skirt_volume")]
    pub skirt_volume: f64,
}

impl Default for DressParameters {
    /// The record a fresh studio session starts from.
    fn default() -> Self {
        Self {
            color: "#EC4899".to_string(),
            pattern: Pattern::Solid,
            texture: Texture::Satin,
            texture_intensity: 40.0,
            sleeve_length: 70.0,
            neckline: Neckline::VNeck,
            train_length: 50.0,
            skirt_volume: 60.0,
        }
    }
}

impl DressParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_texture(mut self, texture: Texture, intensity: f64) -> Self {
        self.texture = texture;
        self.texture_intensity = intensity;
        self
    }

    pub fn with_neckline(mut self, neckline: Neckline) -> Self {
        self.neckline = neckline;
        self
    }

    pub fn with_sleeve_length(mut self, length: f64) -> Self {
        self.sleeve_length = length;
        self
    }

    pub fn with_train_length(mut self, length: f64) -> Self {
        self.train_length = length;
        self
    }

    pub fn with_skirt_volume(mut self, volume: f64) -> Self {
        self.skirt_volume = volume;
        self
    }

    /// Clamps every slider into `0..=100`, as the editing surface does.
    pub fn clamped(mut self) -> Self {
        for v in [
            &mut self.texture_intensity,
            &mut self.sleeve_length,
            &mut self.train_length,
            &mut self.skirt_volume,
        ] {
            *v = v.clamp(0.0, 100.0);
        }
        self
    }

    /// Closed-form derived scalars.
    pub fn metrics(&self) -> DressMetrics {
        DressMetrics::from_params(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// DressMetrics
// ============================================================================

/// Pixel quantities derived from [`DressParameters`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DressMetrics {
    /// Half width of the skirt hem, `140..=280`.
    pub skirt_half_width: f64,
    /// Train extension, `0..=120`.
    pub train_px: f64,
    /// Sleeve length, `0..=160`.
    pub sleeve_px: f64,
    /// Opacity of both texture overlays, capped at 0.85.
    pub texture_opacity: f64,
}

impl DressMetrics {
    pub fn from_params(params: &DressParameters) -> Self {
        Self {
            skirt_half_width: SKIRT_MIN_HALF_WIDTH
                + percent_of(params.skirt_volume, SKIRT_VOLUME_RANGE),
            train_px: percent_of(params.train_length, TRAIN_MAX_PX),
            sleeve_px: percent_of(params.sleeve_length, SLEEVE_MAX_PX),
            texture_opacity: (0.08 + params.texture_intensity / 200.0).min(0.85),
        }
    }

    /// Sleeves are suppressed at or below the visibility floor.
    pub fn sleeves_visible(&self) -> bool {
        self.sleeve_px > SLEEVE_VISIBILITY_FLOOR
    }
}
