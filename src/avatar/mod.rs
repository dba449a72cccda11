//! Body avatar generator.
//!
//! The proportion math lives in [`avatar_geometry`]; how the figure is
//! painted is decided by an [`AvatarDecorator`]. Overall height and width
//! are not baked into the outlines. They are applied once, as a scale about
//! [`AVATAR_PIVOT`], so limb proportions stay consistent under any stretch.
//!
//! # Example
//!
//! ```
//! use dress_customizer::avatar::{AvatarParameters, AvatarStyle, avatar_geometry};
//!
//! let params = AvatarParameters::default().with_build(25.0);
//! let geometry = avatar_geometry(&params);
//! let svg = AvatarStyle::Realistic.render(&geometry).to_svg();
//! assert!(svg.contains("translate(100,20)"));
//! ```

mod params;
mod style;

pub use params::{
    AvatarParameters, BUILD_RANGE, BodyProfileInput, CM_PER_INCH, EditorRange, HEIGHT_RANGE_CM,
    HEIGHT_RANGE_IN, LegacyProfile, MetricProfile, PERCENT_RANGE, Unit, WIDTH_RANGE_CM,
    WIDTH_RANGE_IN, canonicalize, canonicalize_value, cm_to_in, deserialize_canonical, in_to_cm,
};
pub use style::{AvatarDecorator, AvatarStyle, FlatStyle, RealisticStyle, render_avatar};

use kurbo::{BezPath, Point};

use crate::geometry::{
    AVATAR_CENTER_X, AVATAR_PIVOT, FOOT_BASE_Y, HEAD_BASE_RADIUS, HEAD_CENTER_Y, mirror_x,
};
use crate::scene::{Composition, Transform};

const CX: f64 = AVATAR_CENTER_X;

/// Half width of the inner thigh at the crotch.
const CROTCH_HALF_WIDTH: f64 = 16.0;
/// Hand radius; hands are drawn as ellipses `r` by `0.7 r`.
pub const HAND_RADIUS: f64 = 4.0;
pub const FOOT_RADIUS_X: f64 = 8.0;
pub const FOOT_RADIUS_Y: f64 = 3.5;

// ============================================================================
// Proportions
// ============================================================================

/// Torso half widths after build shaping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyWidths {
    pub shoulder: f64,
    pub chest: f64,
    pub waist: f64,
    pub hip: f64,
    /// Outward flare of the lower leg.
    pub calf: f64,
}

impl BodyWidths {
    /// Blends the neutral widths toward a heavier silhouette.
    ///
    /// The waist widens at 0.15 per unit of `t` against 0.25 elsewhere, so a
    /// heavy build keeps a defined waist.
    pub fn from_build_factor(t: f64) -> Self {
        Self {
            shoulder: 40.0 * (0.95 + 0.25 * t),
            chest: 32.0 * (0.95 + 0.25 * t),
            waist: 30.0 * (0.95 + 0.15 * t),
            hip: 32.0 * (0.95 + 0.25 * t),
            calf: 11.0 * (0.9 + 0.3 * t),
        }
    }
}

/// Vertical landmarks in avatar view-box units (before the outer scale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLandmarks {
    pub head_y: f64,
    pub neck_y: f64,
    pub shoulder_y: f64,
    pub chest_y: f64,
    pub waist_y: f64,
    pub hip_y: f64,
    pub crotch_y: f64,
    pub elbow_y: f64,
    pub wrist_y: f64,
    pub knee_y: f64,
    pub foot_y: f64,
}

impl BodyLandmarks {
    /// Torso landmarks are cumulative offsets from the neck. Limb joints
    /// scale the segment lengths from their attachment point, never the
    /// attachment point itself.
    pub fn new(head_radius: f64, arm_scale: f64, leg_scale: f64) -> Self {
        let neck_y = HEAD_CENTER_Y + head_radius + 2.0;
        let chest_y = neck_y + 10.0;
        let waist_y = chest_y + 38.0;
        let hip_y = waist_y + 28.0;
        let crotch_y = hip_y + 26.0;
        let shoulder_y = chest_y - 4.0;

        let elbow_base = waist_y + 10.0;
        let wrist_base = hip_y + 18.0;
        let elbow_y = shoulder_y + (elbow_base - shoulder_y) * arm_scale;
        let wrist_y = elbow_y + (wrist_base - elbow_base) * arm_scale;

        let knee_base = crotch_y + 54.0;
        let knee_y = crotch_y + (knee_base - crotch_y) * leg_scale;
        let foot_y = knee_y + (FOOT_BASE_Y - knee_base) * leg_scale;

        Self {
            head_y: HEAD_CENTER_Y,
            neck_y,
            shoulder_y,
            chest_y,
            waist_y,
            hip_y,
            crotch_y,
            elbow_y,
            wrist_y,
            knee_y,
            foot_y,
        }
    }
}

/// A left/right pair; the right side mirrors the left about the centre line.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair<T> {
    pub left: T,
    pub right: T,
}

impl Pair<BezPath> {
    fn mirrored(left: BezPath) -> Self {
        let right = mirror_x(&left, CX);
        Self { left, right }
    }
}

impl Pair<Point> {
    fn mirrored(left: Point) -> Self {
        let right = Point::new(2.0 * CX - left.x, left.y);
        Self { left, right }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Outlines and landmarks of an avatar, independent of styling.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarGeometry {
    pub scale_x: f64,
    pub scale_y: f64,
    pub build_factor: f64,
    pub head_center: Point,
    /// Horizontal head radius; the head is `1.1` times taller.
    pub head_radius: f64,
    pub widths: BodyWidths,
    pub landmarks: BodyLandmarks,
    pub torso: BezPath,
    pub arms: Pair<BezPath>,
    pub hands: Pair<Point>,
    pub legs: Pair<BezPath>,
    pub feet: Pair<Point>,
}

impl AvatarGeometry {
    /// The outer stretch applied to the whole figure.
    pub fn transform(&self) -> Transform {
        Transform::ScaleAbout {
            pivot: AVATAR_PIVOT,
            sx: self.scale_x,
            sy: self.scale_y,
        }
    }
}

/// Computes the avatar outlines for a canonical parameter record.
pub fn avatar_geometry(params: &AvatarParameters) -> AvatarGeometry {
    let t = params.build_factor();
    let head_radius = HEAD_BASE_RADIUS * (params.head_pct / 100.0);
    let widths = BodyWidths::from_build_factor(t);
    let landmarks = BodyLandmarks::new(
        head_radius,
        params.arm_len_pct / 100.0,
        params.leg_len_pct / 100.0,
    );

    let arm_in = widths.shoulder - 4.0;

    AvatarGeometry {
        scale_x: params.scale_x(),
        scale_y: params.scale_y(),
        build_factor: t,
        head_center: Point::new(CX, HEAD_CENTER_Y),
        head_radius,
        torso: torso_path(&widths, &landmarks),
        arms: Pair::<BezPath>::mirrored(left_arm_path(&widths, &landmarks)),
        hands: Pair::<Point>::mirrored(Point::new(
            CX - arm_in - 4.0,
            landmarks.wrist_y + 4.0,
        )),
        legs: Pair::<BezPath>::mirrored(left_leg_path(&widths, &landmarks)),
        feet: Pair::<Point>::mirrored(Point::new(CX - 10.0, landmarks.foot_y + 3.0)),
        widths,
        landmarks,
    }
}

/// Renders the avatar in the flat preview style.
pub fn generate_avatar(params: &AvatarParameters) -> Composition {
    AvatarStyle::Flat.render(&avatar_geometry(params))
}

/// One continuous outline: down the left side from the shoulder to the
/// crotch, then back up the right side.
fn torso_path(w: &BodyWidths, l: &BodyLandmarks) -> BezPath {
    let top = l.neck_y + 2.0;
    let mut p = BezPath::new();

    p.move_to((CX - w.shoulder, top));
    p.curve_to(
        (CX - w.shoulder + 6.0, l.neck_y + 8.0),
        (CX - w.chest - 2.0, l.chest_y - 2.0),
        (CX - w.chest, l.chest_y),
    );
    p.quad_to((CX - w.chest + 6.0, l.chest_y + 12.0), (CX - w.waist, l.waist_y));
    p.quad_to((CX - w.waist - 4.0, l.waist_y + 14.0), (CX - w.hip, l.hip_y));
    p.line_to((CX - CROTCH_HALF_WIDTH, l.crotch_y));

    p.line_to((CX + CROTCH_HALF_WIDTH, l.crotch_y));
    p.line_to((CX + w.hip, l.hip_y));
    p.quad_to((CX + w.waist + 4.0, l.waist_y + 14.0), (CX + w.waist, l.waist_y));
    p.quad_to((CX + w.chest - 6.0, l.chest_y + 12.0), (CX + w.chest, l.chest_y));
    p.curve_to(
        (CX + w.chest + 2.0, l.chest_y - 2.0),
        (CX + w.shoulder - 6.0, l.neck_y + 8.0),
        (CX + w.shoulder, top),
    );
    p.close_path();
    p
}

/// Shoulder to elbow as a bulging curve, then a slight taper to the wrist.
fn left_arm_path(w: &BodyWidths, l: &BodyLandmarks) -> BezPath {
    let arm_out = w.shoulder + 18.0;
    let arm_in = w.shoulder - 4.0;

    let mut p = BezPath::new();
    p.move_to((CX - w.shoulder, l.shoulder_y));
    p.curve_to(
        (CX - arm_out, l.chest_y + 2.0),
        (CX - arm_out, l.elbow_y),
        (CX - arm_in, l.elbow_y + 4.0),
    );
    p.line_to((CX - arm_in - 2.0, l.wrist_y));
    p.line_to((CX - w.shoulder + 2.0, l.wrist_y - 6.0));
    p.close_path();
    p
}

fn left_leg_path(w: &BodyWidths, l: &BodyLandmarks) -> BezPath {
    let hip = CX - CROTCH_HALF_WIDTH;

    let mut p = BezPath::new();
    p.move_to((hip, l.crotch_y));
    p.curve_to(
        (CX - 18.0, l.crotch_y + 18.0),
        (CX - 18.0, l.knee_y - 6.0),
        (CX - 14.0, l.knee_y),
    );
    p.line_to((CX - 12.0 - w.calf, l.foot_y));
    p.line_to((CX - 6.0, l.foot_y));
    p.line_to((CX - 10.0, l.knee_y));
    p.curve_to(
        (CX - 13.0, l.knee_y - 6.0),
        (CX - 15.0, l.crotch_y + 18.0),
        (hip, l.crotch_y),
    );
    p.close_path();
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn build_extremes_and_midpoint() {
        let slim = avatar_geometry(&AvatarParameters::default().with_build(-50.0)).widths;
        let mid = avatar_geometry(&AvatarParameters::default()).widths;
        let heavy = avatar_geometry(&AvatarParameters::default().with_build(50.0)).widths;

        assert!(close(slim.shoulder, 38.0));
        assert!(close(slim.chest, 30.4));
        assert!(close(slim.waist, 28.5));
        assert!(close(slim.hip, 30.4));

        assert!(close(heavy.shoulder, 48.0));
        assert!(close(heavy.chest, 38.4));
        assert!(close(heavy.waist, 33.0));
        assert!(close(heavy.hip, 38.4));

        for (lo, m, hi) in [
            (slim.shoulder, mid.shoulder, heavy.shoulder),
            (slim.chest, mid.chest, heavy.chest),
            (slim.waist, mid.waist, heavy.waist),
            (slim.hip, mid.hip, heavy.hip),
        ] {
            assert!(close(m, (lo + hi) / 2.0));
        }
    }

    #[test]
    fn waist_widens_less_than_hips() {
        let slim = BodyWidths::from_build_factor(0.0);
        let heavy = BodyWidths::from_build_factor(1.0);
        assert!(heavy.waist / slim.waist < heavy.hip / slim.hip);
    }

    #[test]
    fn default_landmarks() {
        let l = avatar_geometry(&AvatarParameters::default()).landmarks;
        assert_eq!(l.neck_y, 42.0);
        assert_eq!(l.chest_y, 52.0);
        assert_eq!(l.shoulder_y, 48.0);
        assert_eq!(l.waist_y, 90.0);
        assert_eq!(l.hip_y, 118.0);
        assert_eq!(l.crotch_y, 144.0);
        assert_eq!(l.elbow_y, 100.0);
        assert_eq!(l.wrist_y, 136.0);
        assert_eq!(l.knee_y, 198.0);
        assert_eq!(l.foot_y, 260.0);
    }

    #[test]
    fn head_size_moves_neck() {
        let g = avatar_geometry(&AvatarParameters::default().with_head_pct(120.0));
        assert!(close(g.head_radius, 14.4));
        assert!(close(g.landmarks.neck_y, 44.4));
    }

    #[test]
    fn limb_scaling_keeps_attachment_points() {
        let base = avatar_geometry(&AvatarParameters::default()).landmarks;
        let long = avatar_geometry(
            &AvatarParameters::default()
                .with_arm_len_pct(120.0)
                .with_leg_len_pct(80.0),
        )
        .landmarks;

        assert_eq!(long.shoulder_y, base.shoulder_y);
        assert_eq!(long.crotch_y, base.crotch_y);
        assert!(close(long.elbow_y - long.shoulder_y, (base.elbow_y - base.shoulder_y) * 1.2));
        assert!(close(long.wrist_y - long.elbow_y, (base.wrist_y - base.elbow_y) * 1.2));
        assert!(close(long.knee_y - long.crotch_y, (base.knee_y - base.crotch_y) * 0.8));
        assert!(close(long.foot_y - long.knee_y, (base.foot_y - base.knee_y) * 0.8));
    }

    #[test]
    fn right_limbs_mirror_left() {
        let g = avatar_geometry(&AvatarParameters::default());
        match (g.arms.left.elements()[0], g.arms.right.elements()[0]) {
            (PathEl::MoveTo(l), PathEl::MoveTo(r)) => {
                assert!(close(l.x + r.x, 200.0));
                assert_eq!(l.y, r.y);
            }
            other => panic!("unexpected elements {other:?}"),
        }
        assert!(close(g.hands.left.x + g.hands.right.x, 200.0));
        assert_eq!(g.feet.left, Point::new(90.0, 263.0));
        assert_eq!(g.feet.right, Point::new(110.0, 263.0));
    }

    #[test]
    fn torso_is_symmetric() {
        let g = avatar_geometry(&AvatarParameters::default().with_build(30.0));
        let bbox = g.torso.bounding_box();
        assert!(close(bbox.x0 + bbox.x1, 200.0));
        assert!(close(bbox.y1, g.landmarks.crotch_y));
    }

    #[test]
    fn outer_transform_carries_scale() {
        let g = avatar_geometry(&AvatarParameters::default().with_height_cm(187.0).with_width_cm(46.2));
        match g.transform() {
            Transform::ScaleAbout { pivot, sx, sy } => {
                assert_eq!(pivot, Point::new(100.0, 20.0));
                assert!(close(sx, 1.1));
                assert!(close(sy, 1.1));
            }
        }
    }

    #[test]
    fn geometry_is_deterministic() {
        let params = AvatarParameters::default().with_build(-12.0).with_head_pct(93.0);
        assert_eq!(avatar_geometry(&params), avatar_geometry(&params));
    }
}
