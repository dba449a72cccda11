//! Pattern tiles, texture noise recipes and the sheen gradient.

use kurbo::{BezPath, Point, Rect};

use crate::dress::{Pattern, Texture};
use crate::scene::{
    Def, Element, FilterPrimitive, GradientStop, Node, NoiseKind, Paint, Shape, Stroke, Style,
};

/// Id of the sheen gradient definition.
pub const SHEEN_ID: &str = "shine";

/// Opacity of the whole pattern overlay group.
pub const PATTERN_OVERLAY_OPACITY: f64 = 0.4;

/// Definition id for a pattern tile, or `None` for solid fabric.
pub fn pattern_id(pattern: Pattern) -> Option<String> {
    match pattern {
        Pattern::Solid => None,
        other => Some(format!("pattern-{}", other.as_str())),
    }
}

/// Definition id for a texture filter.
pub fn texture_id(texture: Texture) -> String {
    format!("texture-{}", texture.as_str())
}

/// The repeating tile for a pattern, or `None` for solid fabric.
pub fn pattern_def(pattern: Pattern) -> Option<Def> {
    let id = pattern_id(pattern)?;
    let (size, children) = match pattern {
        Pattern::Solid => return None,
        Pattern::Stripes => (16.0, stripes()),
        Pattern::Polka => (16.0, polka()),
        Pattern::Floral => (24.0, floral()),
        Pattern::Lace => (18.0, lace()),
    };
    Some(Def::Pattern {
        id,
        width: size,
        height: size,
        children,
    })
}

fn white(opacity: f64) -> Style {
    Style::fill(Paint::color("white")).with_opacity(opacity)
}

fn stripes() -> Vec<Element> {
    vec![
        Node::new(
            Shape::Rect {
                rect: Rect::new(0.0, 0.0, 16.0, 16.0),
                rx: 0.0,
            },
            white(0.06),
        )
        .into(),
        Node::new(
            Shape::Rect {
                rect: Rect::new(0.0, 0.0, 16.0, 8.0),
                rx: 0.0,
            },
            white(0.12),
        )
        .into(),
    ]
}

fn polka() -> Vec<Element> {
    vec![
        Node::new(
            Shape::Circle {
                center: Point::new(4.0, 4.0),
                r: 2.5,
            },
            white(0.15),
        )
        .into(),
        Node::new(
            Shape::Circle {
                center: Point::new(12.0, 12.0),
                r: 2.5,
            },
            white(0.12),
        )
        .into(),
    ]
}

/// Two crossed petals.
fn floral() -> Vec<Element> {
    let mut upright = BezPath::new();
    upright.move_to((12.0, 2.0));
    upright.curve_to((15.0, 7.0), (9.0, 7.0), (12.0, 12.0));
    upright.curve_to((15.0, 7.0), (9.0, 7.0), (12.0, 2.0));
    upright.close_path();

    let mut sideways = BezPath::new();
    sideways.move_to((2.0, 12.0));
    sideways.curve_to((7.0, 15.0), (7.0, 9.0), (12.0, 12.0));
    sideways.curve_to((7.0, 9.0), (7.0, 15.0), (2.0, 12.0));
    sideways.close_path();

    vec![
        Node::path(upright, white(0.12)).into(),
        Node::path(sideways, white(0.1)).into(),
    ]
}

/// Concentric double ring.
fn lace() -> Vec<Element> {
    [7.5, 3.5]
        .into_iter()
        .map(|r| {
            Node::new(
                Shape::Circle {
                    center: Point::new(9.0, 9.0),
                    r,
                },
                Style::fill(Paint::None)
                    .with_stroke(Stroke::new(Paint::color("white"), 1.0))
                    .with_opacity(0.18),
            )
            .into()
        })
        .collect()
}

/// Noise recipe for a texture.
///
/// Silk and chiffon use low-frequency smooth noise; velvet and lace use
/// higher-frequency noise. The alpha table caps how dark the mask gets.
pub fn texture_primitives(texture: Texture) -> Vec<FilterPrimitive> {
    use FilterPrimitive::*;
    use NoiseKind::FractalNoise;

    match texture {
        Texture::Silk => vec![
            Turbulence {
                kind: FractalNoise,
                base_frequency: 0.8,
                octaves: 2,
                seed: Some(2),
            },
            Saturate(0.2),
            AlphaTable(vec![0.0, 0.35]),
        ],
        Texture::Satin => vec![
            Turbulence {
                kind: NoiseKind::Turbulence,
                base_frequency: 0.6,
                octaves: 1,
                seed: Some(3),
            },
            GaussianBlur(0.6),
            AlphaTable(vec![0.0, 0.4]),
        ],
        Texture::Velvet => vec![
            Turbulence {
                kind: FractalNoise,
                base_frequency: 0.9,
                octaves: 3,
                seed: Some(9),
            },
            AlphaTable(vec![0.0, 0.6]),
        ],
        Texture::Lace => vec![
            Turbulence {
                kind: NoiseKind::Turbulence,
                base_frequency: 0.9,
                octaves: 2,
                seed: None,
            },
            AlphaTable(vec![0.0, 0.25]),
        ],
        Texture::Chiffon => vec![
            Turbulence {
                kind: NoiseKind::Turbulence,
                base_frequency: 0.4,
                octaves: 1,
                seed: None,
            },
            GaussianBlur(0.9),
            AlphaTable(vec![0.0, 0.2]),
        ],
    }
}

pub fn texture_def(texture: Texture) -> Def {
    Def::Filter {
        id: texture_id(texture),
        primitives: texture_primitives(texture),
    }
}

/// Horizontal white highlight composited in overlay mode.
pub fn sheen_def() -> Def {
    Def::LinearGradient {
        id: SHEEN_ID.to_string(),
        from: Point::new(0.0, 0.0),
        to: Point::new(1.0, 0.0),
        stops: vec![
            GradientStop::new(0.0, "#ffffff", 0.0),
            GradientStop::new(0.3, "#ffffff", 0.15),
            GradientStop::new(0.6, "#ffffff", 0.05),
            GradientStop::new(1.0, "#ffffff", 0.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_frequency(texture: Texture) -> f64 {
        texture_primitives(texture)
            .into_iter()
            .find_map(|p| match p {
                FilterPrimitive::Turbulence { base_frequency, .. } => Some(base_frequency),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn solid_has_no_tile() {
        assert!(pattern_def(Pattern::Solid).is_none());
        assert!(pattern_id(Pattern::Solid).is_none());
    }

    #[test]
    fn every_pattern_has_a_tile() {
        for pattern in Pattern::ALL.into_iter().filter(|p| *p != Pattern::Solid) {
            let def = pattern_def(pattern).unwrap();
            assert_eq!(def.id(), format!("pattern-{}", pattern.as_str()));
            let Def::Pattern { children, .. } = def else {
                panic!("expected a pattern def");
            };
            assert_eq!(children.len(), 2);
        }
    }

    #[test]
    fn tile_sizes() {
        let size = |p| match pattern_def(p).unwrap() {
            Def::Pattern { width, .. } => width,
            _ => unreachable!(),
        };
        assert_eq!(size(Pattern::Stripes), 16.0);
        assert_eq!(size(Pattern::Polka), 16.0);
        assert_eq!(size(Pattern::Floral), 24.0);
        assert_eq!(size(Pattern::Lace), 18.0);
    }

    #[test]
    fn velvet_and_lace_are_higher_frequency_than_silk_and_chiffon() {
        for coarse in [Texture::Velvet, Texture::Lace] {
            for smooth in [Texture::Silk, Texture::Chiffon] {
                assert!(base_frequency(coarse) > base_frequency(smooth));
            }
        }
    }

    #[test]
    fn noise_kind_per_texture() {
        let kind = |t| {
            texture_primitives(t)
                .into_iter()
                .find_map(|p| match p {
                    FilterPrimitive::Turbulence { kind, .. } => Some(kind),
                    _ => None,
                })
                .unwrap()
        };
        assert_eq!(kind(Texture::Silk), NoiseKind::FractalNoise);
        assert_eq!(kind(Texture::Velvet), NoiseKind::FractalNoise);
        assert_eq!(kind(Texture::Satin), NoiseKind::Turbulence);
        assert_eq!(kind(Texture::Lace), NoiseKind::Turbulence);
        assert_eq!(kind(Texture::Chiffon), NoiseKind::Turbulence);
    }

    #[test]
    fn every_texture_ends_with_an_alpha_table() {
        for t in Texture::ALL {
            let prims = texture_primitives(t);
            assert!(matches!(prims.last(), Some(FilterPrimitive::AlphaTable(_))));
            assert_eq!(texture_def(t).id(), texture_id(t));
        }
    }

    #[test]
    fn sheen_has_four_stops() {
        let Def::LinearGradient { stops, id, .. } = sheen_def() else {
            panic!("expected gradient");
        };
        assert_eq!(id, SHEEN_ID);
        assert_eq!(stops.len(), 4);
        assert_eq!(stops[1].opacity, 0.15);
    }
}
