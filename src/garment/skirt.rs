//! Skirt outline.

use kurbo::BezPath;

use crate::geometry::{BODY_CENTER_X, HEM_Y, SKIRT_WAIST_HALF_WIDTH, WAIST_Y};

/// Hem line after the train's vertical drop.
pub fn hem_y(train_px: f64) -> f64 {
    HEM_Y + train_px * 0.15
}

/// Builds the closed A-line/ballgown skirt.
///
/// The left hem sits `half_width` from the centre line. The right hem also
/// carries the train, which only extends the back of the skirt. Wider
/// skirts push the curve control points lower for a fuller silhouette.
pub fn skirt_path(half_width: f64, train_px: f64) -> BezPath {
    let cx = BODY_CENTER_X;
    let hem = hem_y(train_px);
    let left = cx - half_width;
    let right = cx + half_width + train_px * 0.6;
    let ctrl_y = WAIST_Y + 120.0 + half_width * 0.25;

    let mut p = BezPath::new();
    p.move_to((cx - SKIRT_WAIST_HALF_WIDTH, WAIST_Y));
    p.curve_to((left, ctrl_y), (left, hem), (cx - 20.0, hem));
    p.line_to((right, hem));
    p.curve_to(
        (right - 40.0, ctrl_y),
        (cx + SKIRT_WAIST_HALF_WIDTH, WAIST_Y),
        (cx + SKIRT_WAIST_HALF_WIDTH, WAIST_Y),
    );
    p.close_path();
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Point, Shape};

    #[test]
    fn hem_extents() {
        let path = skirt_path(200.0, 60.0);
        let els = path.elements();
        assert_eq!(els[0], PathEl::MoveTo(Point::new(190.0, 250.0)));
        assert_eq!(els[2], PathEl::LineTo(Point::new(486.0, 589.0)));
    }

    #[test]
    fn train_only_extends_the_right_side() {
        let short = skirt_path(200.0, 0.0).bounding_box();
        let long = skirt_path(200.0, 120.0).bounding_box();
        assert!((short.x0 - long.x0).abs() < 1e-9);
        assert!(long.x1 > short.x1 + 70.0);
        assert!(long.y1 > short.y1);
    }

    #[test]
    fn wider_skirt_lowers_control_point() {
        let ctrl = |w: f64| match skirt_path(w, 0.0).elements()[1] {
            PathEl::CurveTo(c1, _, _) => c1.y,
            _ => unreachable!(),
        };
        assert!(ctrl(280.0) > ctrl(140.0));
        assert_eq!(ctrl(140.0), 405.0);
    }
}
