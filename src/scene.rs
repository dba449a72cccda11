//! Renderer-agnostic vector composition.
//!
//! Both generators produce a [`Composition`]: a view box, a list of paint
//! server and filter definitions, and a tree of styled shapes. A
//! composition knows how to serialize itself to SVG markup; rasterization
//! lives in [`crate::export`].

use std::fmt::Write as _;

use kurbo::{Affine, BezPath, PathEl, Point, Rect};

// ============================================================================
// Styling
// ============================================================================

/// How a shape interior or outline is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Not painted.
    None,
    /// A literal colour (any SVG colour string).
    Color(String),
    /// A reference to a definition by id (`url(#id)`).
    Ref(String),
}

impl Paint {
    pub fn color(color: impl Into<String>) -> Self {
        Self::Color(color.into())
    }

    pub fn reference(id: impl Into<String>) -> Self {
        Self::Ref(id.into())
    }

    fn to_attr(&self) -> String {
        match self {
            Paint::None => "none".to_string(),
            Paint::Color(c) => escape(c),
            Paint::Ref(id) => format!("url(#{})", escape(id)),
        }
    }
}

/// Outline settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub opacity: Option<f64>,
    pub round_join: bool,
}

impl Stroke {
    pub fn new(paint: Paint, width: f64) -> Self {
        Self {
            paint,
            width,
            opacity: None,
            round_join: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn rounded(mut self) -> Self {
        self.round_join = true;
        self
    }
}

/// Fill, optional outline and element opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Paint,
    pub stroke: Option<Stroke>,
    pub opacity: Option<f64>,
}

impl Style {
    pub fn fill(fill: Paint) -> Self {
        Self {
            fill,
            stroke: None,
            opacity: None,
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// CSS blend mode applied to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Overlay,
    SoftLight,
    Multiply,
}

impl BlendMode {
    fn as_css(self) -> &'static str {
        match self {
            BlendMode::Overlay => "overlay",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Multiply => "multiply",
        }
    }
}

/// Group transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Non-uniform scale about a fixed pivot point.
    ScaleAbout { pivot: Point, sx: f64, sy: f64 },
}

impl Transform {
    /// The equivalent affine matrix.
    pub fn to_affine(self) -> Affine {
        match self {
            Transform::ScaleAbout { pivot, sx, sy } => {
                Affine::translate(pivot.to_vec2())
                    * Affine::scale_non_uniform(sx, sy)
                    * Affine::translate(-pivot.to_vec2())
            }
        }
    }

    fn to_attr(self) -> String {
        match self {
            Transform::ScaleAbout { pivot, sx, sy } => format!(
                "translate({},{}) scale({} {}) translate({},{})",
                num(pivot.x),
                num(pivot.y),
                num(sx),
                num(sy),
                num(-pivot.x),
                num(-pivot.y)
            ),
        }
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// Geometry of a single drawable.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Path(BezPath),
    Ellipse { center: Point, rx: f64, ry: f64 },
    Circle { center: Point, r: f64 },
    Rect { rect: Rect, rx: f64 },
}

/// A styled shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub shape: Shape,
    pub style: Style,
}

impl Node {
    pub fn new(shape: Shape, style: Style) -> Self {
        Self { shape, style }
    }

    pub fn path(path: BezPath, style: Style) -> Self {
        Self::new(Shape::Path(path), style)
    }
}

/// Either a shape or a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Node(Node),
    Group(Group),
}

impl From<Node> for Element {
    fn from(node: Node) -> Self {
        Element::Node(node)
    }
}

impl From<Group> for Element {
    fn from(group: Group) -> Self {
        Element::Group(group)
    }
}

/// A group of elements sharing opacity, blend, filter and transform.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Identifies the layer for inspection; serialized as `data-layer`.
    pub label: Option<String>,
    pub opacity: Option<f64>,
    pub blend: Option<BlendMode>,
    /// Id of a filter definition.
    pub filter: Option<String>,
    pub transform: Option<Transform>,
    pub children: Vec<Element>,
}

impl Group {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = Some(blend);
        self
    }

    pub fn with_filter(mut self, id: impl Into<String>) -> Self {
        self.filter = Some(id.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.children.push(element.into());
    }

    /// Finds a direct or nested child group by label.
    pub fn find(&self, label: &str) -> Option<&Group> {
        self.children.iter().find_map(|child| match child {
            Element::Group(g) if g.label.as_deref() == Some(label) => Some(g),
            Element::Group(g) => g.find(label),
            Element::Node(_) => None,
        })
    }

    /// Iterates every shape in this group, depth first.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        collect_nodes(&self.children, &mut out);
        out
    }
}

fn collect_nodes<'a>(children: &'a [Element], out: &mut Vec<&'a Node>) {
    for child in children {
        match child {
            Element::Node(n) => out.push(n),
            Element::Group(g) => collect_nodes(&g.children, out),
        }
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// A gradient colour stop.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Offset in `0.0..=1.0`.
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

impl GradientStop {
    pub fn new(offset: f64, color: impl Into<String>, opacity: f64) -> Self {
        Self {
            offset,
            color: color.into(),
            opacity,
        }
    }
}

/// Noise generator kind for `feTurbulence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    Turbulence,
    FractalNoise,
}

/// A single filter primitive, chained in order.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPrimitive {
    Turbulence {
        kind: NoiseKind,
        base_frequency: f64,
        octaves: u32,
        seed: Option<u32>,
    },
    Saturate(f64),
    GaussianBlur(f64),
    /// Alpha transfer table (`feFuncA type="table"`).
    AlphaTable(Vec<f64>),
}

/// A reusable definition referenced by id.
#[derive(Debug, Clone, PartialEq)]
pub enum Def {
    LinearGradient {
        id: String,
        /// Direction from `(x1, y1)` to `(x2, y2)` in bounding-box units.
        from: Point,
        to: Point,
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        id: String,
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
    },
    /// A repeating tile in user space.
    Pattern {
        id: String,
        width: f64,
        height: f64,
        children: Vec<Element>,
    },
    Filter {
        id: String,
        primitives: Vec<FilterPrimitive>,
    },
}

impl Def {
    pub fn id(&self) -> &str {
        match self {
            Def::LinearGradient { id, .. }
            | Def::RadialGradient { id, .. }
            | Def::Pattern { id, .. }
            | Def::Filter { id, .. } => id,
        }
    }
}

// ============================================================================
// Composition
// ============================================================================

/// A complete, self-contained vector picture.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub width: f64,
    pub height: f64,
    pub view_box: Rect,
    /// Accessible label for the root element.
    pub label: String,
    pub defs: Vec<Def>,
    pub root: Group,
}

impl Composition {
    /// Creates an empty composition whose view box matches its size.
    pub fn new(width: f64, height: f64, label: impl Into<String>) -> Self {
        Self {
            width,
            height,
            view_box: Rect::new(0.0, 0.0, width, height),
            label: label.into(),
            defs: Vec::new(),
            root: Group::default(),
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn def(&self, id: &str) -> Option<&Def> {
        self.defs.iter().find(|d| d.id() == id)
    }

    /// Finds a layer group by label anywhere in the tree.
    pub fn layer(&self, label: &str) -> Option<&Group> {
        self.root.find(label)
    }

    /// Serializes the composition to standalone SVG markup.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(4096);
        let vb = self.view_box;
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}" role="img" aria-label="{}">"#,
            num(self.width),
            num(self.height),
            num(vb.x0),
            num(vb.y0),
            num(vb.width()),
            num(vb.height()),
            escape(&self.label)
        );

        if !self.defs.is_empty() {
            out.push_str("<defs>");
            for def in &self.defs {
                write_def(&mut out, def);
            }
            out.push_str("</defs>");
        }

        for child in &self.root.children {
            write_element(&mut out, child);
        }

        out.push_str("</svg>");
        out
    }
}

// ============================================================================
// Serialization
// ============================================================================

/// Formats a number with at most three decimals and no trailing zeros.
pub fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{rounded:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// SVG path data for a kurbo path, using absolute commands.
pub fn path_data(path: &BezPath) -> String {
    let mut parts = Vec::with_capacity(path.elements().len());
    for el in path.elements() {
        let part = match *el {
            PathEl::MoveTo(p) => format!("M {} {}", num(p.x), num(p.y)),
            PathEl::LineTo(p) => format!("L {} {}", num(p.x), num(p.y)),
            PathEl::QuadTo(c, p) => {
                format!("Q {} {}, {} {}", num(c.x), num(c.y), num(p.x), num(p.y))
            }
            PathEl::CurveTo(c1, c2, p) => format!(
                "C {} {}, {} {}, {} {}",
                num(c1.x),
                num(c1.y),
                num(c2.x),
                num(c2.y),
                num(p.x),
                num(p.y)
            ),
            PathEl::ClosePath => "Z".to_string(),
        };
        parts.push(part);
    }
    parts.join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn write_style(out: &mut String, style: &Style) {
    let _ = write!(out, r#" fill="{}""#, style.fill.to_attr());
    if let Some(stroke) = &style.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            stroke.paint.to_attr(),
            num(stroke.width)
        );
        if let Some(opacity) = stroke.opacity {
            let _ = write!(out, r#" stroke-opacity="{}""#, num(opacity));
        }
        if stroke.round_join {
            out.push_str(r#" stroke-linejoin="round""#);
        }
    }
    if let Some(opacity) = style.opacity {
        let _ = write!(out, r#" opacity="{}""#, num(opacity));
    }
}

fn write_node(out: &mut String, node: &Node) {
    match &node.shape {
        Shape::Path(path) => {
            let _ = write!(out, r#"<path d="{}""#, path_data(path));
        }
        Shape::Ellipse { center, rx, ry } => {
            let _ = write!(
                out,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                num(center.x),
                num(center.y),
                num(*rx),
                num(*ry)
            );
        }
        Shape::Circle { center, r } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                num(center.x),
                num(center.y),
                num(*r)
            );
        }
        Shape::Rect { rect, rx } => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                num(rect.x0),
                num(rect.y0),
                num(rect.width()),
                num(rect.height())
            );
            if *rx > 0.0 {
                let _ = write!(out, r#" rx="{}""#, num(*rx));
            }
        }
    }
    write_style(out, &node.style);
    out.push_str("/>");
}

fn write_group(out: &mut String, group: &Group) {
    out.push_str("<g");
    if let Some(label) = &group.label {
        let _ = write!(out, r#" data-layer="{}""#, escape(label));
    }
    if let Some(opacity) = group.opacity {
        let _ = write!(out, r#" opacity="{}""#, num(opacity));
    }
    if let Some(blend) = group.blend {
        let _ = write!(out, r#" style="mix-blend-mode:{}""#, blend.as_css());
    }
    if let Some(filter) = &group.filter {
        let _ = write!(out, r##" filter="url(#{filter})""##);
    }
    if let Some(transform) = group.transform {
        let _ = write!(out, r#" transform="{}""#, transform.to_attr());
    }
    out.push('>');
    for child in &group.children {
        write_element(out, child);
    }
    out.push_str("</g>");
}

fn write_element(out: &mut String, element: &Element) {
    match element {
        Element::Node(node) => write_node(out, node),
        Element::Group(group) => write_group(out, group),
    }
}

fn write_stops(out: &mut String, stops: &[GradientStop]) {
    for stop in stops {
        let _ = write!(
            out,
            r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
            num(stop.offset * 100.0),
            escape(&stop.color),
            num(stop.opacity)
        );
    }
}

fn write_def(out: &mut String, def: &Def) {
    match def {
        Def::LinearGradient { id, from, to, stops } => {
            let _ = write!(
                out,
                r#"<linearGradient id="{id}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y)
            );
            write_stops(out, stops);
            out.push_str("</linearGradient>");
        }
        Def::RadialGradient {
            id,
            center,
            radius,
            stops,
        } => {
            let _ = write!(
                out,
                r#"<radialGradient id="{id}" cx="{}" cy="{}" r="{}">"#,
                num(center.x),
                num(center.y),
                num(*radius)
            );
            write_stops(out, stops);
            out.push_str("</radialGradient>");
        }
        Def::Pattern {
            id,
            width,
            height,
            children,
        } => {
            let _ = write!(
                out,
                r#"<pattern id="{id}" width="{}" height="{}" patternUnits="userSpaceOnUse">"#,
                num(*width),
                num(*height)
            );
            for child in children {
                write_element(out, child);
            }
            out.push_str("</pattern>");
        }
        Def::Filter { id, primitives } => {
            let _ = write!(out, r#"<filter id="{id}">"#);
            for primitive in primitives {
                write_primitive(out, primitive);
            }
            out.push_str("</filter>");
        }
    }
}

fn write_primitive(out: &mut String, primitive: &FilterPrimitive) {
    match primitive {
        FilterPrimitive::Turbulence {
            kind,
            base_frequency,
            octaves,
            seed,
        } => {
            let kind = match kind {
                NoiseKind::Turbulence => "turbulence",
                NoiseKind::FractalNoise => "fractalNoise",
            };
            let _ = write!(
                out,
                r#"<feTurbulence type="{kind}" baseFrequency="{}" numOctaves="{octaves}""#,
                num(*base_frequency)
            );
            if let Some(seed) = seed {
                let _ = write!(out, r#" seed="{seed}""#);
            }
            out.push_str("/>");
        }
        FilterPrimitive::Saturate(amount) => {
            let _ = write!(
                out,
                r#"<feColorMatrix type="saturate" values="{}"/>"#,
                num(*amount)
            );
        }
        FilterPrimitive::GaussianBlur(deviation) => {
            let _ = write!(out, r#"<feGaussianBlur stdDeviation="{}"/>"#, num(*deviation));
        }
        FilterPrimitive::AlphaTable(values) => {
            let table: Vec<String> = values.iter().map(|v| num(*v)).collect();
            let _ = write!(
                out,
                r#"<feComponentTransfer><feFuncA type="table" tableValues="{}"/></feComponentTransfer>"#,
                table.join(" ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_trims_trailing_zeros() {
        assert_eq!(num(250.0), "250");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-12.5), "-12.5");
    }

    #[test]
    fn path_data_uses_absolute_commands() {
        let mut path = BezPath::new();
        path.move_to((180.0, 150.0));
        path.line_to((250.0, 175.0));
        path.quad_to((250.0, 260.0), (190.0, 250.0));
        path.curve_to((1.0, 2.0), (3.0, 4.0), (5.0, 6.0));
        path.close_path();

        assert_eq!(
            path_data(&path),
            "M 180 150 L 250 175 Q 250 260, 190 250 C 1 2, 3 4, 5 6 Z"
        );
    }

    #[test]
    fn scale_about_pivot_keeps_pivot_fixed() {
        let t = Transform::ScaleAbout {
            pivot: Point::new(100.0, 20.0),
            sx: 1.5,
            sy: 0.5,
        };
        let affine = t.to_affine();
        let pivot = affine * Point::new(100.0, 20.0);
        assert!((pivot.x - 100.0).abs() < 1e-9);
        assert!((pivot.y - 20.0).abs() < 1e-9);

        let moved = affine * Point::new(110.0, 40.0);
        assert!((moved.x - 115.0).abs() < 1e-9);
        assert!((moved.y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn transform_attribute_format() {
        let t = Transform::ScaleAbout {
            pivot: Point::new(100.0, 20.0),
            sx: 1.2,
            sy: 0.8,
        };
        assert_eq!(
            t.to_attr(),
            "translate(100,20) scale(1.2 0.8) translate(-100,-20)"
        );
    }

    #[test]
    fn svg_contains_defs_and_layers() {
        let mut comp = Composition::new(100.0, 140.0, "Test");
        comp.defs.push(Def::LinearGradient {
            id: "shine".into(),
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 0.0),
            stops: vec![GradientStop::new(0.3, "#ffffff", 0.15)],
        });
        let mut layer = Group::new("body").with_opacity(0.5);
        layer.push(Node::new(
            Shape::Circle {
                center: Point::new(50.0, 50.0),
                r: 10.0,
            },
            Style::fill(Paint::reference("shine")),
        ));
        comp.root.push(layer);

        let svg = comp.to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains(r#"viewBox="0 0 100 140""#));
        assert!(svg.contains(r##"<stop offset="30%" stop-color="#ffffff" stop-opacity="0.15"/>"##));
        assert!(svg.contains(r#"<g data-layer="body" opacity="0.5">"#));
        assert!(svg.contains(r#"fill="url(#shine)""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn find_nested_layer() {
        let mut inner = Group::new("inner");
        inner.push(Node::new(
            Shape::Rect {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                rx: 0.0,
            },
            Style::fill(Paint::None),
        ));
        let mut outer = Group::new("outer");
        outer.push(inner);
        let mut comp = Composition::new(10.0, 10.0, "t");
        comp.root.push(outer);

        assert!(comp.layer("inner").is_some());
        assert_eq!(comp.layer("outer").unwrap().nodes().len(), 1);
        assert!(comp.layer("missing").is_none());
    }

    #[test]
    fn colour_strings_are_escaped() {
        let mut comp = Composition::new(10.0, 10.0, "t");
        comp.defs.push(Def::LinearGradient {
            id: "g".into(),
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, 1.0),
            stops: vec![GradientStop::new(0.0, "x\"y", 1.0)],
        });
        comp.root.push(Node::new(
            Shape::Circle {
                center: Point::new(5.0, 5.0),
                r: 2.0,
            },
            Style::fill(Paint::color(r#"red" onload="alert(1)"#))
                .with_stroke(Stroke::new(Paint::color("a<b"), 1.0)),
        ));

        let svg = comp.to_svg();
        assert!(!svg.contains(r#"onload="alert"#));
        assert!(svg.contains(r#"fill="red&quot; onload=&quot;alert(1)""#));
        assert!(svg.contains(r#"stroke="a&lt;b""#));
        assert!(svg.contains(r#"stop-color="x&quot;y""#));
    }

    #[test]
    fn label_is_escaped() {
        let comp = Composition::new(1.0, 1.0, "a \"b\" & <c>");
        assert!(comp.to_svg().contains("aria-label=\"a &quot;b&quot; &amp; &lt;c&gt;\""));
    }
}
