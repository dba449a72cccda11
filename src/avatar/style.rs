//! Decoration layers painted over the shared avatar geometry.

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

use super::{AvatarGeometry, FOOT_RADIUS_X, FOOT_RADIUS_Y, HAND_RADIUS};
use crate::color::shade;
use crate::geometry::{AVATAR_CANVAS_HEIGHT, AVATAR_CANVAS_WIDTH};
use crate::scene::{Composition, Def, GradientStop, Group, Node, Paint, Shape, Stroke, Style};

// ============================================================================
// Decorator Trait
// ============================================================================

/// Paints an [`AvatarGeometry`] into the scaled figure group.
///
/// Decorators never recompute proportions. Everything they draw is placed
/// from the geometry they are handed, in unscaled view-box units.
pub trait AvatarDecorator {
    /// Paint servers this style references.
    fn defs(&self) -> Vec<Def> {
        Vec::new()
    }

    /// Adds this style's shapes to `figure`.
    fn decorate(&self, geometry: &AvatarGeometry, figure: &mut Group);
}

/// Builds the avatar composition: decorator defs plus a single figure group
/// carrying the outer scale transform.
pub fn render_avatar(geometry: &AvatarGeometry, decorator: &dyn AvatarDecorator) -> Composition {
    tracing::debug!(
        scale_x = geometry.scale_x,
        scale_y = geometry.scale_y,
        build_factor = geometry.build_factor,
        "rendering avatar"
    );

    let mut comp = Composition::new(AVATAR_CANVAS_WIDTH, AVATAR_CANVAS_HEIGHT, "Avatar preview");
    comp.defs = decorator.defs();

    let mut figure = Group::new("figure").with_transform(geometry.transform());
    decorator.decorate(geometry, &mut figure);
    comp.root.push(figure);
    comp
}

fn ellipse(center: Point, rx: f64, ry: f64, style: Style) -> Node {
    Node::new(Shape::Ellipse { center, rx, ry }, style)
}

fn outlined(fill: Paint, opacity: f64) -> Style {
    Style::fill(fill)
        .with_stroke(
            Stroke::new(Paint::color("#0f1520"), 0.8)
                .with_opacity(0.25)
                .rounded(),
        )
        .with_opacity(opacity)
}

fn neck(geometry: &AvatarGeometry, style: Style) -> Node {
    let x = geometry.head_center.x;
    let y = geometry.landmarks.neck_y;
    Node::new(
        Shape::Rect {
            rect: Rect::new(x - 6.0, y, x + 6.0, y + 10.0),
            rx: 3.0,
        },
        style,
    )
}

// ============================================================================
// Flat
// ============================================================================

/// Flat teal figure used by the body editor preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatStyle;

impl AvatarDecorator for FlatStyle {
    fn decorate(&self, g: &AvatarGeometry, figure: &mut Group) {
        let body = "#76ABAE";
        let limbs = "#6DA0A3";
        let legs = "#5B8B8E";

        figure.push(ellipse(
            g.head_center,
            g.head_radius,
            g.head_radius * 1.1,
            Style::fill(Paint::color(body)).with_opacity(0.95),
        ));
        figure.push(neck(g, Style::fill(Paint::color("#99C7C9")).with_opacity(0.9)));
        figure.push(Node::path(g.torso.clone(), outlined(Paint::color(body), 0.88)));

        for arm in [&g.arms.left, &g.arms.right] {
            figure.push(Node::path(arm.clone(), outlined(Paint::color(limbs), 0.9)));
        }
        for hand in [g.hands.left, g.hands.right] {
            figure.push(ellipse(
                hand,
                HAND_RADIUS,
                HAND_RADIUS * 0.7,
                Style::fill(Paint::color(limbs)),
            ));
        }

        for leg in [&g.legs.left, &g.legs.right] {
            figure.push(Node::path(leg.clone(), outlined(Paint::color(legs), 0.95)));
        }
        for foot in [g.feet.left, g.feet.right] {
            figure.push(ellipse(
                foot,
                FOOT_RADIUS_X,
                FOOT_RADIUS_Y,
                Style::fill(Paint::color(legs)).with_opacity(0.95),
            ));
        }

        figure.push(ellipse(
            Point::new(118.0, 125.0),
            12.0,
            34.0,
            Style::fill(Paint::color("#ffffff")).with_opacity(0.04),
        ));
    }
}

// ============================================================================
// Realistic
// ============================================================================

const SKIN_GRADIENT_ID: &str = "avatar-skin";
const OUTFIT_GRADIENT_ID: &str = "avatar-outfit";

/// Shaded figure with skin gradient, hair, eyes and a simple outfit.
#[derive(Debug, Clone, PartialEq)]
pub struct RealisticStyle {
    pub skin: String,
    pub hair: String,
    pub outfit: String,
}

impl Default for RealisticStyle {
    fn default() -> Self {
        Self {
            skin: "#E0AC69".to_string(),
            hair: "#3B2A20".to_string(),
            outfit: "#31363F".to_string(),
        }
    }
}

impl RealisticStyle {
    pub fn with_skin(mut self, skin: impl Into<String>) -> Self {
        self.skin = skin.into();
        self
    }

    pub fn with_hair(mut self, hair: impl Into<String>) -> Self {
        self.hair = hair.into();
        self
    }

    pub fn with_outfit(mut self, outfit: impl Into<String>) -> Self {
        self.outfit = outfit.into();
        self
    }

    /// Cap of hair over the top half of the head.
    fn hair_path(g: &AvatarGeometry) -> BezPath {
        let c = g.head_center;
        let rx = g.head_radius * 1.05;
        let ry = g.head_radius * 1.1;
        let mut p = BezPath::new();
        p.move_to((c.x - rx, c.y));
        p.curve_to(
            (c.x - rx, c.y - ry * 1.35),
            (c.x + rx, c.y - ry * 1.35),
            (c.x + rx, c.y),
        );
        p.quad_to((c.x, c.y - ry * 0.55), (c.x - rx, c.y));
        p.close_path();
        p
    }
}

impl AvatarDecorator for RealisticStyle {
    fn defs(&self) -> Vec<Def> {
        vec![
            Def::RadialGradient {
                id: SKIN_GRADIENT_ID.to_string(),
                center: Point::new(0.4, 0.35),
                radius: 0.75,
                stops: vec![
                    GradientStop::new(0.0, shade(&self.skin, 15.0), 1.0),
                    GradientStop::new(0.7, self.skin.clone(), 1.0),
                    GradientStop::new(1.0, shade(&self.skin, -15.0), 1.0),
                ],
            },
            Def::LinearGradient {
                id: OUTFIT_GRADIENT_ID.to_string(),
                from: Point::new(0.0, 0.0),
                to: Point::new(1.0, 0.0),
                stops: vec![
                    GradientStop::new(0.0, shade(&self.outfit, -10.0), 1.0),
                    GradientStop::new(0.5, shade(&self.outfit, 10.0), 1.0),
                    GradientStop::new(1.0, shade(&self.outfit, -10.0), 1.0),
                ],
            },
        ]
    }

    fn decorate(&self, g: &AvatarGeometry, figure: &mut Group) {
        let skin = || Paint::reference(SKIN_GRADIENT_ID);
        let shoe = shade(&self.outfit, -40.0);

        let mut legs = Group::new("legs");
        for leg in [&g.legs.left, &g.legs.right] {
            legs.push(Node::path(leg.clone(), outlined(skin(), 1.0)));
        }
        for foot in [g.feet.left, g.feet.right] {
            legs.push(ellipse(
                foot,
                FOOT_RADIUS_X,
                FOOT_RADIUS_Y,
                Style::fill(Paint::color(shoe.clone())),
            ));
        }
        figure.push(legs);

        let mut arms = Group::new("arms");
        for arm in [&g.arms.left, &g.arms.right] {
            arms.push(Node::path(arm.clone(), outlined(skin(), 1.0)));
        }
        for hand in [g.hands.left, g.hands.right] {
            arms.push(ellipse(hand, HAND_RADIUS, HAND_RADIUS * 0.7, Style::fill(skin())));
        }
        figure.push(arms);

        let mut torso = Group::new("torso");
        torso.push(neck(g, Style::fill(skin())));
        torso.push(Node::path(
            g.torso.clone(),
            outlined(Paint::reference(OUTFIT_GRADIENT_ID), 1.0),
        ));
        figure.push(torso);

        let mut head = Group::new("head");
        let c = g.head_center;
        let r = g.head_radius;
        head.push(ellipse(c, r, r * 1.1, Style::fill(skin())));
        head.push(Node::path(
            Self::hair_path(g),
            Style::fill(Paint::color(self.hair.clone())),
        ));
        for dx in [-0.38, 0.38] {
            head.push(Node::new(
                Shape::Circle {
                    center: Point::new(c.x + dx * r, c.y + 0.1 * r),
                    r: 0.12 * r,
                },
                Style::fill(Paint::color("#1f2937")),
            ));
        }
        let mut mouth = BezPath::new();
        mouth.move_to((c.x - 0.3 * r, c.y + 0.55 * r));
        mouth.quad_to((c.x, c.y + 0.7 * r), (c.x + 0.3 * r, c.y + 0.55 * r));
        head.push(Node::path(
            mouth,
            Style::fill(Paint::None).with_stroke(
                Stroke::new(Paint::color(shade(&self.skin, -40.0)), 0.8).rounded(),
            ),
        ));
        figure.push(head);
    }
}

// ============================================================================
// Style Selection
// ============================================================================

/// Named avatar style, as stored in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum AvatarStyle {
    #[default]
    Flat,
    Realistic,
}

impl AvatarStyle {
    pub fn render(self, geometry: &AvatarGeometry) -> Composition {
        match self {
            AvatarStyle::Flat => render_avatar(geometry, &FlatStyle),
            AvatarStyle::Realistic => render_avatar(geometry, &RealisticStyle::default()),
        }
    }
}
