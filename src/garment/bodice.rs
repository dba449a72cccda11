//! Bodice outline: a neckline edge followed by a fixed taper to the waist.

use kurbo::BezPath;

use crate::dress::Neckline;
use crate::geometry::{BODICE_HALF_WIDTH, BODICE_TOP_Y, BODY_CENTER_X, WAIST_Y};

const CX: f64 = BODY_CENTER_X;
const TOP: f64 = BODICE_TOP_Y;
const HALF: f64 = BODICE_HALF_WIDTH;

/// Builds the closed bodice path for a neckline.
pub fn bodice_path(neckline: Neckline) -> BezPath {
    let mut path = match neckline {
        Neckline::VNeck => v_neck(),
        Neckline::Scoop => scoop(),
        Neckline::OffShoulder => off_shoulder(),
        Neckline::Halter => halter(),
        Neckline::Boat => boat(),
    };
    path.line_to((CX + HALF - 10.0, WAIST_Y));
    path.quad_to((CX, WAIST_Y + 10.0), (CX - HALF + 10.0, WAIST_Y));
    path.close_path();
    path
}

fn v_neck() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((CX - HALF, TOP));
    p.line_to((CX, TOP + 25.0));
    p.line_to((CX + HALF, TOP));
    p
}

fn scoop() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((CX - HALF, TOP));
    p.curve_to((CX - 20.0, TOP + 30.0), (CX + 20.0, TOP + 30.0), (CX + HALF, TOP));
    p
}

/// Drops the edge 5px and widens it 30px past each shoulder.
fn off_shoulder() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((CX - HALF - 30.0, TOP + 5.0));
    p.quad_to((CX, TOP - 10.0), (CX + HALF + 30.0, TOP + 5.0));
    p
}

fn halter() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((CX - HALF + 20.0, TOP));
    p.line_to((CX, TOP - 20.0));
    p.line_to((CX + HALF - 20.0, TOP));
    p
}

fn boat() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((CX - HALF - 10.0, TOP));
    p.line_to((CX + HALF + 10.0, TOP));
    p
}
