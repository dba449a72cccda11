//! Shared reference frame for the garment and avatar generators.
//!
//! Both generators draw into fixed view boxes anchored on a vertical body
//! centre line. Every landmark either generator uses lives here so the two
//! can be tested against the same frame.

use kurbo::{Affine, BezPath, Point};

// ============================================================================
// Dress Frame
// ============================================================================

/// Width of the dress view box.
pub const DRESS_CANVAS_WIDTH: f64 = 500.0;
/// Height of the dress view box.
pub const DRESS_CANVAS_HEIGHT: f64 = 700.0;

/// Vertical centre line of the dress figure.
pub const BODY_CENTER_X: f64 = 250.0;
/// Top edge of the bodice.
pub const BODICE_TOP_Y: f64 = 150.0;
/// Waist line shared by bodice and skirt.
pub const WAIST_Y: f64 = 250.0;
/// Hem baseline before any train extension.
pub const HEM_Y: f64 = 580.0;
/// Half width of the bodice at the neckline.
pub const BODICE_HALF_WIDTH: f64 = 70.0;
/// Half width of the skirt where it meets the waist.
pub const SKIRT_WAIST_HALF_WIDTH: f64 = 60.0;
/// Top of the sleeve loops.
pub const SLEEVE_TOP_Y: f64 = 160.0;

/// Skirt half width at `skirtVolume = 0`.
pub const SKIRT_MIN_HALF_WIDTH: f64 = 140.0;
/// Added skirt half width at `skirtVolume = 100`.
pub const SKIRT_VOLUME_RANGE: f64 = 140.0;
/// Train extension at `trainLength = 100`.
pub const TRAIN_MAX_PX: f64 = 120.0;
/// Sleeve length at `sleeveLength = 100`.
pub const SLEEVE_MAX_PX: f64 = 160.0;
/// Sleeves at or below this length are not drawn.
pub const SLEEVE_VISIBILITY_FLOOR: f64 = 8.0;

/// Centre of the floor shadow under the hem.
pub const SHADOW_CENTER: Point = Point::new(260.0, 610.0);
/// Vertical radius of the floor shadow.
pub const SHADOW_RADIUS_Y: f64 = 18.0;

// ============================================================================
// Avatar Frame
// ============================================================================

/// Width of the avatar view box.
pub const AVATAR_CANVAS_WIDTH: f64 = 200.0;
/// Height of the avatar view box.
pub const AVATAR_CANVAS_HEIGHT: f64 = 280.0;
/// Vertical centre line of the avatar figure.
pub const AVATAR_CENTER_X: f64 = 100.0;
/// Pivot of the outer height/width scale transform.
pub const AVATAR_PIVOT: Point = Point::new(100.0, 20.0);
/// Centre of the head before scaling.
pub const HEAD_CENTER_Y: f64 = 28.0;
/// Head radius at `headPct = 100`.
pub const HEAD_BASE_RADIUS: f64 = 12.0;
/// Foot line at `legLenPct = 100`.
pub const FOOT_BASE_Y: f64 = 260.0;

/// Reference body height in centimetres (scale 1.0).
pub const BASE_HEIGHT_CM: f64 = 170.0;
/// Reference shoulder breadth in centimetres (scale 1.0).
pub const BASE_WIDTH_CM: f64 = 42.0;

// ============================================================================
// Path Helpers
// ============================================================================

/// Reflects a path across the vertical line `x = axis_x`.
///
/// Element order is preserved, so a mirrored closed loop runs in the
/// opposite winding direction.
pub fn mirror_x(path: &BezPath, axis_x: f64) -> BezPath {
    let reflect = Affine::new([-1.0, 0.0, 0.0, 1.0, 2.0 * axis_x, 0.0]);
    reflect * path.clone()
}

/// Linear map of a 0-100 slider value onto `0..=max`.
pub fn percent_of(value: f64, max: f64) -> f64 {
    (value / 100.0) * max
}
