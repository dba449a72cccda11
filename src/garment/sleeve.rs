//! Sleeve loops.

use kurbo::BezPath;

use crate::geometry::{BODICE_HALF_WIDTH, BODY_CENTER_X, SLEEVE_TOP_Y, mirror_x};

/// Left and right sleeve outlines, mirror images of each other.
#[derive(Debug, Clone, PartialEq)]
pub struct SleevePair {
    pub left: BezPath,
    pub right: BezPath,
}

impl SleevePair {
    pub fn new(length_px: f64) -> Self {
        let left = left_sleeve(length_px);
        let right = mirror_x(&left, BODY_CENTER_X);
        Self { left, right }
    }
}

/// A tapered loop from the left shoulder down to `length_px` below the
/// sleeve top.
pub fn left_sleeve(length_px: f64) -> BezPath {
    let top = SLEEVE_TOP_Y;
    let x = BODY_CENTER_X - BODICE_HALF_WIDTH;
    let y = top + length_px;

    let mut p = BezPath::new();
    p.move_to((x, top));
    p.curve_to((x - 40.0, top + 30.0), (x - 20.0, y - 20.0), (x - 10.0, y));
    p.line_to((x + 10.0, y));
    p.curve_to((x, y - 20.0), (x + 10.0, top + 10.0), (x, top));
    p.close_path();
    p
}
