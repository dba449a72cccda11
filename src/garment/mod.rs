//! Garment silhouette generator.
//!
//! [`dress_geometry`] computes the raw outlines for a parameter record and
//! [`generate_dress`] layers them into a [`Composition`]:
//!
//! 1. Mannequin hint (faint post and head)
//! 2. Base fill: skirt, bodice and, when long enough, sleeves
//! 3. Pattern tile overlay (skipped for solid fabric)
//! 4. Sheen gradient in overlay blend
//! 5. Noise texture mask
//! 6. Floor shadow
//!
//! Both functions are pure. Identical input yields identical output.

pub mod bodice;
pub mod fabric;
pub mod skirt;
pub mod sleeve;

use kurbo::{BezPath, Point, Rect};

use crate::color::outline;
use crate::dress::{DressMetrics, DressParameters};
use crate::geometry::{
    BODY_CENTER_X, DRESS_CANVAS_HEIGHT, DRESS_CANVAS_WIDTH, SHADOW_CENTER, SHADOW_RADIUS_Y,
};
use crate::scene::{BlendMode, Composition, Group, Node, Paint, Shape, Stroke, Style};

pub use sleeve::SleevePair;

/// Outline stroke width of the base fill.
pub const OUTLINE_WIDTH: f64 = 2.0;
/// Opacity of the floor shadow.
pub const SHADOW_OPACITY: f64 = 0.12;
/// Opacity of the mannequin hint.
pub const MANNEQUIN_OPACITY: f64 = 0.05;

// ============================================================================
// Geometry
// ============================================================================

/// Raw outlines of a dress, before any styling.
#[derive(Debug, Clone, PartialEq)]
pub struct DressGeometry {
    pub metrics: DressMetrics,
    pub bodice: BezPath,
    pub skirt: BezPath,
    /// `None` when the sleeves fall at or below the visibility floor.
    pub sleeves: Option<SleevePair>,
    pub shadow_center: Point,
    pub shadow_radius_x: f64,
    pub shadow_radius_y: f64,
}

impl DressGeometry {
    /// Every garment outline, skirt first, in paint order.
    pub fn outlines(&self) -> Vec<&BezPath> {
        let mut out = vec![&self.skirt, &self.bodice];
        if let Some(sleeves) = &self.sleeves {
            out.push(&sleeves.left);
            out.push(&sleeves.right);
        }
        out
    }
}

/// Computes the outlines for a parameter record.
pub fn dress_geometry(params: &DressParameters) -> DressGeometry {
    let metrics = params.metrics();
    let sleeves = metrics
        .sleeves_visible()
        .then(|| SleevePair::new(metrics.sleeve_px));

    DressGeometry {
        bodice: bodice::bodice_path(params.neckline),
        skirt: skirt::skirt_path(metrics.skirt_half_width, metrics.train_px),
        sleeves,
        shadow_center: SHADOW_CENTER,
        shadow_radius_x: metrics.skirt_half_width * 0.6,
        shadow_radius_y: SHADOW_RADIUS_Y,
        metrics,
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Renders a parameter record into a layered composition.
pub fn generate_dress(params: &DressParameters) -> Composition {
    let geometry = dress_geometry(params);
    let metrics = geometry.metrics;
    tracing::debug!(
        skirt_half_width = metrics.skirt_half_width,
        train_px = metrics.train_px,
        sleeve_px = metrics.sleeve_px,
        texture_opacity = metrics.texture_opacity,
        sleeves = geometry.sleeves.is_some(),
        "generating dress"
    );

    let mut comp = Composition::new(DRESS_CANVAS_WIDTH, DRESS_CANVAS_HEIGHT, "Dress design");

    comp.defs.push(fabric::sheen_def());
    if let Some(def) = fabric::pattern_def(params.pattern) {
        comp.defs.push(def);
    }
    comp.defs.push(fabric::texture_def(params.texture));

    comp.root.push(mannequin());

    let mut dress = Group::new("dress");
    dress.push(base_layer(&geometry, &params.color));
    if let Some(id) = fabric::pattern_id(params.pattern) {
        dress.push(fill_layer(
            "pattern",
            geometry.outlines(),
            Paint::reference(id),
            fabric::PATTERN_OVERLAY_OPACITY,
        ));
    }
    dress.push(
        fill_layer(
            "sheen",
            vec![&geometry.skirt, &geometry.bodice],
            Paint::reference(fabric::SHEEN_ID),
            metrics.texture_opacity,
        )
        .with_blend(BlendMode::Overlay),
    );
    dress.push(
        fill_layer(
            "texture",
            geometry.outlines(),
            Paint::color("#000"),
            metrics.texture_opacity,
        )
        .with_filter(fabric::texture_id(params.texture)),
    );
    dress.push(Node::new(
        Shape::Ellipse {
            center: geometry.shadow_center,
            rx: geometry.shadow_radius_x,
            ry: geometry.shadow_radius_y,
        },
        Style::fill(Paint::color("#000")).with_opacity(SHADOW_OPACITY),
    ));
    comp.root.push(dress);

    comp
}

fn mannequin() -> Group {
    let ink = || Style::fill(Paint::color("#000"));
    let mut group = Group::new("mannequin").with_opacity(MANNEQUIN_OPACITY);
    group.push(Node::new(
        Shape::Rect {
            rect: Rect::new(BODY_CENTER_X - 5.0, 80.0, BODY_CENTER_X + 5.0, 580.0),
            rx: 5.0,
        },
        ink(),
    ));
    group.push(Node::new(
        Shape::Circle {
            center: Point::new(BODY_CENTER_X, 50.0),
            r: 25.0,
        },
        ink(),
    ));
    group
}

fn base_layer(geometry: &DressGeometry, color: &str) -> Group {
    let style = Style::fill(Paint::color(color))
        .with_stroke(Stroke::new(Paint::color(outline(color)), OUTLINE_WIDTH));

    let mut group = Group::new("base");
    group.push(Node::path(geometry.skirt.clone(), style.clone()));
    group.push(Node::path(geometry.bodice.clone(), style.clone()));
    if let Some(sleeves) = &geometry.sleeves {
        let mut pair = Group::new("sleeves");
        pair.push(Node::path(sleeves.left.clone(), style.clone()));
        pair.push(Node::path(sleeves.right.clone(), style));
        group.push(pair);
    }
    group
}

fn fill_layer(label: &str, outlines: Vec<&BezPath>, paint: Paint, opacity: f64) -> Group {
    let mut group = Group::new(label).with_opacity(opacity);
    for path in outlines {
        group.push(Node::path(path.clone(), Style::fill(paint.clone())));
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dress::{Neckline, Pattern, Texture};
    use crate::scene::Def;

    fn labels(group: &Group) -> Vec<&str> {
        group
            .children
            .iter()
            .filter_map(|c| match c {
                crate::scene::Element::Group(g) => g.label.as_deref(),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn default_dress_layers_in_order() {
        let comp = generate_dress(&DressParameters::default());
        assert_eq!(labels(&comp.root), vec!["mannequin", "dress"]);
        let dress = comp.layer("dress").unwrap();
        assert_eq!(labels(dress), vec!["base", "sheen", "texture"]);
    }

    #[test]
    fn pattern_layer_only_when_not_solid() {
        let solid = generate_dress(&DressParameters::default());
        assert!(solid.layer("pattern").is_none());
        assert!(solid.defs.iter().all(|d| !matches!(d, Def::Pattern { .. })));

        let params = DressParameters::default().with_pattern(Pattern::Floral);
        let comp = generate_dress(&params);
        let layer = comp.layer("pattern").unwrap();
        assert_eq!(layer.opacity, Some(0.4));
        assert!(comp.def("pattern-floral").is_some());
        assert_eq!(
            layer.nodes()[0].style.fill,
            Paint::Ref("pattern-floral".into())
        );
    }

    #[test]
    fn sleeves_follow_visibility_floor() {
        let hidden = generate_dress(&DressParameters::default().with_sleeve_length(5.0));
        assert!(hidden.layer("sleeves").is_none());
        assert_eq!(hidden.layer("texture").unwrap().nodes().len(), 2);

        let shown = generate_dress(&DressParameters::default().with_sleeve_length(5.1));
        assert_eq!(shown.layer("sleeves").unwrap().nodes().len(), 2);
        assert_eq!(shown.layer("texture").unwrap().nodes().len(), 4);
    }

    #[test]
    fn sheen_covers_skirt_and_bodice_only() {
        let comp = generate_dress(&DressParameters::default().with_sleeve_length(100.0));
        let sheen = comp.layer("sheen").unwrap();
        assert_eq!(sheen.nodes().len(), 2);
        assert_eq!(sheen.blend, Some(BlendMode::Overlay));
    }

    #[test]
    fn texture_layer_references_selected_filter() {
        let params = DressParameters::default().with_texture(Texture::Velvet, 100.0);
        let comp = generate_dress(&params);
        let texture = comp.layer("texture").unwrap();
        assert_eq!(texture.filter.as_deref(), Some("texture-velvet"));
        assert!((texture.opacity.unwrap() - 0.58).abs() < 1e-12);
        assert!(comp.def("texture-velvet").is_some());
        assert!(comp.def("texture-satin").is_none());
    }

    #[test]
    fn base_fill_uses_darkened_outline() {
        let comp = generate_dress(&DressParameters::default().with_color("#808080"));
        let node = comp.layer("base").unwrap().nodes()[0];
        assert_eq!(node.style.fill, Paint::Color("#808080".into()));
        let stroke = node.style.stroke.as_ref().unwrap();
        assert_eq!(stroke.paint, Paint::Color(outline("#808080")));
        assert_eq!(stroke.width, 2.0);
    }

    #[test]
    fn shadow_scales_with_skirt() {
        let g = dress_geometry(&DressParameters::default().with_skirt_volume(100.0));
        assert_eq!(g.shadow_radius_x, 168.0);
        assert_eq!(g.shadow_center, Point::new(260.0, 610.0));
    }

    #[test]
    fn geometry_follows_neckline() {
        let a = dress_geometry(&DressParameters::default().with_neckline(Neckline::Boat));
        let b = dress_geometry(&DressParameters::default().with_neckline(Neckline::Halter));
        assert_ne!(a.bodice, b.bodice);
        assert_eq!(a.skirt, b.skirt);
    }

    #[test]
    fn generation_is_deterministic() {
        let params = DressParameters::default()
            .with_pattern(Pattern::Lace)
            .with_texture(Texture::Chiffon, 75.0);
        assert_eq!(generate_dress(&params).to_svg(), generate_dress(&params).to_svg());
    }
}
