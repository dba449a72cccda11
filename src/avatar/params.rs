//! Body profile parameters and their canonical form.
//!
//! Stored body profiles come in two shapes:
//!
//! - Legacy: `{ "height": pct, "width": pct, "build": -50..50, "head": pct }`
//! - Metric: `{ "heightCm", "widthCm", "unit", "build", "headPct",
//!   "armLenPct", "legLenPct" }`
//!
//! Both are read through [`BodyProfileInput`] and normalized once by
//! [`canonicalize`]. The generator only ever sees [`AvatarParameters`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::geometry::{BASE_HEIGHT_CM, BASE_WIDTH_CM};

/// Centimetres per inch.
pub const CM_PER_INCH: f64 = 2.54;

pub fn cm_to_in(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

pub fn in_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// Unit
// ============================================================================

/// Display and edit unit. Canonical storage is always centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Cm,
    In,
}

impl Unit {
    /// `"in"` selects inches; anything else is centimetres.
    pub fn from_label(label: &str) -> Self {
        if label == "in" { Unit::In } else { Unit::Cm }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Cm => "cm",
            Unit::In => "in",
        }
    }
}

/// Inclusive editor range in a given unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorRange {
    pub min: f64,
    pub max: f64,
}

impl EditorRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub const HEIGHT_RANGE_CM: EditorRange = EditorRange::new(140.0, 200.0);
pub const HEIGHT_RANGE_IN: EditorRange = EditorRange::new(55.0, 79.0);
pub const WIDTH_RANGE_CM: EditorRange = EditorRange::new(34.0, 55.0);
pub const WIDTH_RANGE_IN: EditorRange = EditorRange::new(13.5, 21.7);
pub const BUILD_RANGE: EditorRange = EditorRange::new(-50.0, 50.0);
pub const PERCENT_RANGE: EditorRange = EditorRange::new(80.0, 120.0);

// ============================================================================
// AvatarParameters
// ============================================================================

/// Canonical body profile. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvatarParameters {
    pub height_cm: f64,
    pub width_cm: f64,
    pub unit: Unit,
    /// Slim (-50) to heavy (50).
    pub build: f64,
    pub head_pct: f64,
    pub arm_len_pct: f64,
    pub leg_len_pct: f64,
}

impl Default for AvatarParameters {
    fn default() -> Self {
        Self {
            height_cm: BASE_HEIGHT_CM,
            width_cm: BASE_WIDTH_CM,
            unit: Unit::Cm,
            build: 0.0,
            head_pct: 100.0,
            arm_len_pct: 100.0,
            leg_len_pct: 100.0,
        }
    }
}

impl AvatarParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height_cm(mut self, cm: f64) -> Self {
        self.height_cm = cm;
        self
    }

    pub fn with_width_cm(mut self, cm: f64) -> Self {
        self.width_cm = cm;
        self
    }

    pub fn with_build(mut self, build: f64) -> Self {
        self.build = build;
        self
    }

    pub fn with_head_pct(mut self, pct: f64) -> Self {
        self.head_pct = pct;
        self
    }

    pub fn with_arm_len_pct(mut self, pct: f64) -> Self {
        self.arm_len_pct = pct;
        self
    }

    pub fn with_leg_len_pct(mut self, pct: f64) -> Self {
        self.leg_len_pct = pct;
        self
    }

    /// Switches the display unit. Canonical centimetre values are unchanged.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Normalized build factor `t`, `0.0` (slim) to `1.0` (heavy).
    pub fn build_factor(&self) -> f64 {
        (self.build + 50.0) / 100.0
    }

    /// Horizontal stretch relative to the reference shoulder breadth.
    pub fn scale_x(&self) -> f64 {
        self.width_cm / BASE_WIDTH_CM
    }

    /// Vertical stretch relative to the reference height.
    pub fn scale_y(&self) -> f64 {
        self.height_cm / BASE_HEIGHT_CM
    }

    // ------------------------------------------------------------------------
    // Editor controls
    // ------------------------------------------------------------------------

    pub fn height_range(&self) -> EditorRange {
        match self.unit {
            Unit::Cm => HEIGHT_RANGE_CM,
            Unit::In => HEIGHT_RANGE_IN,
        }
    }

    pub fn width_range(&self) -> EditorRange {
        match self.unit {
            Unit::Cm => WIDTH_RANGE_CM,
            Unit::In => WIDTH_RANGE_IN,
        }
    }

    /// Height as shown in the editor: whole centimetres or inches to 0.1.
    pub fn display_height(&self) -> f64 {
        match self.unit {
            Unit::Cm => self.height_cm.round(),
            Unit::In => round1(cm_to_in(self.height_cm)),
        }
    }

    /// Width as shown in the editor, to 0.1 of the current unit.
    pub fn display_width(&self) -> f64 {
        match self.unit {
            Unit::Cm => round1(self.width_cm),
            Unit::In => round1(cm_to_in(self.width_cm)),
        }
    }

    /// Sets height from a value in the current unit, clamped to the editor range.
    pub fn set_height(&mut self, value: f64) {
        let clamped = self.height_range().clamp(value);
        self.height_cm = match self.unit {
            Unit::Cm => clamped,
            Unit::In => in_to_cm(clamped),
        };
    }

    /// Sets width from a value in the current unit, clamped to the editor range.
    pub fn set_width(&mut self, value: f64) {
        let clamped = self.width_range().clamp(value);
        self.width_cm = match self.unit {
            Unit::Cm => clamped,
            Unit::In => in_to_cm(clamped),
        };
    }

    pub fn set_build(&mut self, build: f64) {
        self.build = BUILD_RANGE.clamp(build);
    }

    pub fn set_head_pct(&mut self, pct: f64) {
        self.head_pct = PERCENT_RANGE.clamp(pct);
    }

    pub fn set_arm_len_pct(&mut self, pct: f64) {
        self.arm_len_pct = PERCENT_RANGE.clamp(pct);
    }

    pub fn set_leg_len_pct(&mut self, pct: f64) {
        self.leg_len_pct = PERCENT_RANGE.clamp(pct);
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses any stored body profile shape and canonicalizes it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(canonicalize_value(&value))
    }
}

// ============================================================================
// Stored shapes
// ============================================================================

/// A body profile as read from storage, in either supported shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BodyProfileInput {
    Metric(MetricProfile),
    Legacy(LegacyProfile),
}

/// The metric shape. Only `heightCm` and `widthCm` are required, and both
/// must be numbers; everything else falls back field by field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricProfile {
    pub height_cm: f64,
    pub width_cm: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub build: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub head_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub arm_len_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub leg_len_pct: Option<f64>,
}

/// The legacy percent shape. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LegacyProfile {
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub build: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub head: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Other(serde::de::IgnoredAny),
}

impl<T> Lenient<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Lenient::Value(v) => Some(v),
            Lenient::Other(_) => None,
        }
    }
}

/// Any non-number (string, bool, null, object) reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Lenient::<f64>::deserialize(deserializer)?.into_option())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Lenient::<String>::deserialize(deserializer)?.into_option())
}

impl From<MetricProfile> for AvatarParameters {
    fn from(p: MetricProfile) -> Self {
        Self {
            height_cm: p.height_cm,
            width_cm: p.width_cm,
            unit: p.unit.as_deref().map(Unit::from_label).unwrap_or_default(),
            build: p.build.unwrap_or(0.0),
            head_pct: p.head_pct.unwrap_or(100.0),
            arm_len_pct: p.arm_len_pct.unwrap_or(100.0),
            leg_len_pct: p.leg_len_pct.unwrap_or(100.0),
        }
    }
}

impl From<LegacyProfile> for AvatarParameters {
    /// Percentages scale the reference body; limb lengths reset to 100%.
    fn from(p: LegacyProfile) -> Self {
        Self {
            height_cm: BASE_HEIGHT_CM * (p.height.unwrap_or(100.0) / 100.0),
            width_cm: BASE_WIDTH_CM * (p.width.unwrap_or(100.0) / 100.0),
            unit: Unit::Cm,
            build: p.build.unwrap_or(0.0),
            head_pct: p.head.unwrap_or(100.0),
            arm_len_pct: 100.0,
            leg_len_pct: 100.0,
        }
    }
}

// ============================================================================
// Canonicalization
// ============================================================================

/// Normalizes a stored profile. Absent input yields the defaults.
pub fn canonicalize(input: Option<&BodyProfileInput>) -> AvatarParameters {
    match input {
        None => AvatarParameters::default(),
        Some(BodyProfileInput::Metric(p)) => p.clone().into(),
        Some(BodyProfileInput::Legacy(p)) => {
            tracing::debug!(?p, "converting legacy body profile");
            p.clone().into()
        }
    }
}

/// Normalizes an arbitrary JSON value.
///
/// `null` yields the defaults. A value that matches neither shape (an array
/// or a scalar) also yields the defaults, with a warning.
pub fn canonicalize_value(value: &serde_json::Value) -> AvatarParameters {
    if value.is_null() {
        return AvatarParameters::default();
    }
    if !value.is_object() {
        tracing::warn!("body profile is not an object, using defaults");
        return AvatarParameters::default();
    }
    match BodyProfileInput::deserialize(value) {
        Ok(input) => canonicalize(Some(&input)),
        Err(err) => {
            tracing::warn!(%err, "unreadable body profile, using defaults");
            AvatarParameters::default()
        }
    }
}

/// Serde adapter that reads any stored profile shape into canonical form.
pub fn deserialize_canonical<'de, D>(deserializer: D) -> Result<AvatarParameters, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(canonicalize_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn absent_input_gives_defaults() {
        let p = canonicalize(None);
        assert_eq!(p, AvatarParameters::default());
        assert_eq!(p.height_cm, 170.0);
        assert_eq!(p.width_cm, 42.0);
        assert_eq!(p.unit, Unit::Cm);
        assert_eq!(p.build, 0.0);
        assert_eq!(p.head_pct, 100.0);
        assert_eq!(canonicalize_value(&serde_json::Value::Null), p);
    }

    #[test]
    fn legacy_shape_scales_reference_body() {
        let p = canonicalize_value(&json!({"height": 120, "width": 80, "build": 10, "head": 90}));
        assert!(close(p.height_cm, 204.0));
        assert!(close(p.width_cm, 33.6));
        assert_eq!(p.unit, Unit::Cm);
        assert_eq!(p.build, 10.0);
        assert_eq!(p.head_pct, 90.0);
        assert_eq!(p.arm_len_pct, 100.0);
        assert_eq!(p.leg_len_pct, 100.0);
    }

    #[test]
    fn metric_shape_is_kept() {
        let p = canonicalize_value(&json!({
            "heightCm": 182.5, "widthCm": 44, "unit": "in",
            "build": -20, "headPct": 110, "armLenPct": 95, "legLenPct": 105
        }));
        assert_eq!(p.height_cm, 182.5);
        assert_eq!(p.width_cm, 44.0);
        assert_eq!(p.unit, Unit::In);
        assert_eq!(p.build, -20.0);
        assert_eq!(p.head_pct, 110.0);
        assert_eq!(p.arm_len_pct, 95.0);
        assert_eq!(p.leg_len_pct, 105.0);
    }

    #[test]
    fn metric_fields_fall_back_individually() {
        let p = canonicalize_value(&json!({
            "heightCm": 160, "widthCm": 40, "unit": "furlong", "build": "heavy", "headPct": null
        }));
        assert_eq!(p.height_cm, 160.0);
        assert_eq!(p.unit, Unit::Cm);
        assert_eq!(p.build, 0.0);
        assert_eq!(p.head_pct, 100.0);
    }

    #[test]
    fn non_numeric_metric_height_reads_as_legacy() {
        let p = canonicalize_value(&json!({"heightCm": "180", "widthCm": 40, "build": 5}));
        assert_eq!(p.height_cm, 170.0);
        assert_eq!(p.width_cm, 42.0);
        assert_eq!(p.build, 5.0);
    }

    #[test]
    fn unreadable_value_gives_defaults() {
        assert_eq!(canonicalize_value(&json!(42)), AvatarParameters::default());
        assert_eq!(canonicalize_value(&json!("tall")), AvatarParameters::default());
        assert_eq!(canonicalize_value(&json!([120, 80])), AvatarParameters::default());
        assert_eq!(canonicalize_value(&json!([170, 60])), AvatarParameters::default());
    }

    #[test]
    fn from_json_accepts_both_shapes() {
        let legacy = AvatarParameters::from_json(r#"{"height": 50}"#).unwrap();
        assert!(close(legacy.height_cm, 85.0));
        let metric = AvatarParameters::from_json(r#"{"heightCm": 150, "widthCm": 36}"#).unwrap();
        assert_eq!(metric.width_cm, 36.0);
        assert!(AvatarParameters::from_json("{").is_err());
    }

    #[test]
    fn unit_switch_keeps_centimetres() {
        let p = AvatarParameters::default().with_height_cm(180.0).with_unit(Unit::In);
        assert_eq!(p.height_cm, 180.0);
        assert_eq!(p.display_height(), 70.9);
        assert_eq!(p.with_unit(Unit::Cm).display_height(), 180.0);
    }

    #[test]
    fn setters_clamp_in_current_unit() {
        let mut p = AvatarParameters::default();
        p.set_height(250.0);
        assert_eq!(p.height_cm, 200.0);
        p.set_width(10.0);
        assert_eq!(p.width_cm, 34.0);

        p.unit = Unit::In;
        p.set_height(40.0);
        assert!(close(p.height_cm, 55.0 * 2.54));
        p.set_width(30.0);
        assert!(close(p.width_cm, 21.7 * 2.54));

        p.set_build(80.0);
        p.set_head_pct(60.0);
        p.set_arm_len_pct(130.0);
        p.set_leg_len_pct(100.0);
        assert_eq!(p.build, 50.0);
        assert_eq!(p.head_pct, 80.0);
        assert_eq!(p.arm_len_pct, 120.0);
        assert_eq!(p.leg_len_pct, 100.0);
    }

    #[test]
    fn scale_factors() {
        let p = AvatarParameters::default().with_height_cm(204.0).with_width_cm(21.0);
        assert!(close(p.scale_y(), 1.2));
        assert!(close(p.scale_x(), 0.5));
        assert_eq!(AvatarParameters::default().with_build(-50.0).build_factor(), 0.0);
        assert_eq!(AvatarParameters::default().with_build(50.0).build_factor(), 1.0);
    }

    #[test]
    fn canonical_json_is_camel_case() {
        let json = AvatarParameters::default().to_json().unwrap();
        assert!(json.contains("\"heightCm\":170"));
        assert!(json.contains("\"unit\":\"cm\""));
        assert!(json.contains("\"legLenPct\""));
    }
}
