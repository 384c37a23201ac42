//! Scene graph produced by the layout pass and consumed by the SVG renderer.

use super::geometry::{Point, Rect};

/// Paint order, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
	Background,
	Lines,
	Boxes,
	Hubs,
	Dots,
	Labels,
}

impl Layer {
	pub const ALL: [Self; 6] = [
		Self::Background,
		Self::Lines,
		Self::Boxes,
		Self::Hubs,
		Self::Dots,
		Self::Labels,
	];

	/// `id` of the `<g>` wrapping the layer.
	pub fn group_id(self) -> &'static str {
		match self {
			Self::Background => "layer-background",
			Self::Boxes => "layer-boxes",
			Self::Lines => "layer-lines",
			Self::Hubs => "layer-hubs",
			Self::Dots => "layer-dots",
			Self::Labels => "layer-labels",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
	Start,
	#[default]
	Middle,
	End,
}

impl TextAnchor {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Start => "start",
			Self::Middle => "middle",
			Self::End => "end",
		}
	}
}

/// Presentation attributes. `None` fields are omitted from the output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
	pub fill: Option<String>,
	pub stroke: Option<String>,
	pub stroke_width: Option<f64>,
	pub fill_opacity: Option<f64>,
	pub opacity: Option<f64>,
	pub dasharray: Option<&'static str>,
	pub evenodd: bool,
	pub font_size: Option<f64>,
	pub bold: bool,
	pub anchor: TextAnchor,
}

impl Style {
	pub fn filled(fill: &str) -> Self {
		Self {
			fill: Some(fill.to_string()),
			..Self::default()
		}
	}

	/// Stroke only, `fill="none"`.
	pub fn stroked(stroke: &str, width: f64) -> Self {
		Self {
			fill: Some("none".to_string()),
			stroke: Some(stroke.to_string()),
			stroke_width: Some(width),
			..Self::default()
		}
	}

	pub fn text(fill: &str, size: f64) -> Self {
		Self {
			fill: Some(fill.to_string()),
			font_size: Some(size),
			..Self::default()
		}
	}

	pub fn with_stroke(mut self, stroke: &str, width: f64) -> Self {
		self.stroke = Some(stroke.to_string());
		self.stroke_width = Some(width);
		self
	}

	pub fn with_fill_opacity(mut self, value: f64) -> Self {
		self.fill_opacity = Some(value);
		self
	}

	pub fn with_opacity(mut self, value: f64) -> Self {
		self.opacity = Some(value);
		self
	}

	pub fn with_dash(mut self, dasharray: Option<&'static str>) -> Self {
		self.dasharray = dasharray;
		self
	}

	pub fn evenodd(mut self) -> Self {
		self.evenodd = true;
		self
	}

	pub fn bold(mut self) -> Self {
		self.bold = true;
		self
	}

	pub fn anchored(mut self, anchor: TextAnchor) -> Self {
		self.anchor = anchor;
		self
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	Circle { center: Point, r: f64 },
	Rect { rect: Rect, rx: f64 },
	Line { from: Point, to: Point },
	/// Path data plus its precomputed extent (before any group translation).
	Path { d: String, extent: Rect },
	/// One `<tspan>` per line, stacked around `at`.
	Text { at: Point, lines: Vec<String> },
	Group {
		translate: Option<Point>,
		children: Vec<SceneNode>,
	},
}

/// A drawable with optional identity.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub shape: Shape,
	pub style: Style,
	/// Plain element id, used for highlight lookups of non-hoverable parts.
	pub id: Option<String>,
	/// Hover/click target. Rendered as both `id` and `data-interactive-id`.
	pub interactive_id: Option<String>,
}

impl SceneNode {
	fn new(shape: Shape, style: Style) -> Self {
		Self {
			shape,
			style,
			id: None,
			interactive_id: None,
		}
	}

	pub fn circle(center: Point, r: f64, style: Style) -> Self {
		Self::new(Shape::Circle { center, r }, style)
	}

	pub fn rect(rect: Rect, rx: f64, style: Style) -> Self {
		Self::new(Shape::Rect { rect, rx }, style)
	}

	pub fn line(from: Point, to: Point, style: Style) -> Self {
		Self::new(Shape::Line { from, to }, style)
	}

	pub fn path(d: String, extent: Rect, style: Style) -> Self {
		Self::new(Shape::Path { d, extent }, style)
	}

	pub fn text(at: Point, content: &str, style: Style) -> Self {
		Self::new(
			Shape::Text {
				at,
				lines: content.lines().map(str::to_string).collect(),
			},
			style,
		)
	}

	pub fn group(children: Vec<SceneNode>) -> Self {
		Self::new(
			Shape::Group {
				translate: None,
				children,
			},
			Style::default(),
		)
	}

	/// Group drawn at `origin`; children use coordinates relative to it.
	pub fn group_at(origin: Point, children: Vec<SceneNode>) -> Self {
		Self::new(
			Shape::Group {
				translate: Some(origin),
				children,
			},
			Style::default(),
		)
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn interactive(mut self, id: impl Into<String>) -> Self {
		self.interactive_id = Some(id.into());
		self
	}

	/// The id the element is rendered with, if any.
	pub fn element_id(&self) -> Option<&str> {
		self.interactive_id.as_deref().or(self.id.as_deref())
	}

	/// Extent in scene coordinates.
	pub fn bounds(&self) -> Option<Rect> {
		match &self.shape {
			Shape::Circle { center, r } => Some(Rect::new(center.x - r, center.y - r, r * 2.0, r * 2.0)),
			Shape::Rect { rect, .. } => Some(*rect),
			Shape::Line { from, to } => Rect::enclosing([*from, *to]),
			Shape::Path { extent, .. } => Some(*extent),
			Shape::Text { at, lines } => {
				let size = self.style.font_size.unwrap_or(12.0);
				let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
				let width = longest * size * 0.6;
				let height = lines.len() as f64 * size * 1.2;
				let x = match self.style.anchor {
					TextAnchor::Start => at.x,
					TextAnchor::Middle => at.x - width / 2.0,
					TextAnchor::End => at.x - width,
				};
				Some(Rect::new(x, at.y - height / 2.0, width, height))
			}
			Shape::Group { translate, children } => {
				let inner = children
					.iter()
					.filter_map(SceneNode::bounds)
					.reduce(|a, b| a.union(&b))?;
				Some(match translate {
					Some(o) => inner.translate(o.x, o.y),
					None => inner,
				})
			}
		}
	}

	/// Depth-first walk over this node and its descendants.
	pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SceneNode)) {
		visit(self);
		if let Shape::Group { children, .. } = &self.shape {
			for child in children {
				child.walk(visit);
			}
		}
	}
}

/// Where an arc dot ended up, used for proximity hit-testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotPosition {
	pub index: usize,
	pub center: Point,
	pub r: f64,
}

/// Fully laid-out diagram.
#[derive(Clone, Debug, Default)]
pub struct Scene {
	nodes: Vec<(Layer, SceneNode)>,
	/// Arc dots in index order.
	pub dots: Vec<DotPosition>,
	/// Left end of the lime stub leaving the CLS dot.
	pub cls_endpoint: Option<Point>,
}

/// Space kept around the content when deriving the view box.
pub const VIEW_MARGIN: f64 = 40.0;

impl Scene {
	/// Append a top-level node to `layer`.
	pub fn push(&mut self, layer: Layer, node: SceneNode) {
		self.nodes.push((layer, node));
	}

	/// Nodes of one layer in insertion order.
	pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &SceneNode> {
		self.nodes
			.iter()
			.filter(move |(l, _)| *l == layer)
			.map(|(_, n)| n)
	}

	/// Every node, groups expanded, in no particular order.
	pub fn all_nodes(&self) -> Vec<&SceneNode> {
		let mut out = Vec::new();
		for (_, node) in &self.nodes {
			node.walk(&mut |n| out.push(n));
		}
		out
	}

	/// First node rendered with the given id.
	pub fn find(&self, id: &str) -> Option<&SceneNode> {
		self.all_nodes().into_iter().find(|n| n.element_id() == Some(id))
	}

	/// Position of arc dot `index`.
	pub fn dot(&self, index: usize) -> Option<&DotPosition> {
		self.dots.iter().find(|d| d.index == index)
	}

	/// Content extents.
	pub fn bounds(&self) -> Rect {
		self.nodes
			.iter()
			.filter_map(|(_, n)| n.bounds())
			.reduce(|a, b| a.union(&b))
			.unwrap_or_default()
	}

	/// Content extents plus [`VIEW_MARGIN`] on every side.
	pub fn view_box(&self) -> Rect {
		self.bounds().inflate(VIEW_MARGIN)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn group_bounds_follow_translation() {
		let g = SceneNode::group_at(
			Point::new(100.0, 50.0),
			vec![SceneNode::circle(Point::new(0.0, 0.0), 10.0, Style::default())],
		);
		assert_eq!(g.bounds(), Some(Rect::new(90.0, 40.0, 20.0, 20.0)));
		assert_eq!(SceneNode::group(Vec::new()).bounds(), None);
	}

	#[test]
	fn find_looks_inside_groups() {
		let mut scene = Scene::default();
		scene.push(
			Layer::Hubs,
			SceneNode::group(vec![SceneNode::circle(Point::new(1.0, 1.0), 1.0, Style::default()).interactive("inner")])
				.interactive("outer"),
		);
		assert!(scene.find("inner").is_some());
		assert!(scene.find("outer").is_some());
		assert!(scene.find("missing").is_none());
	}

	#[test]
	fn view_box_adds_margin() {
		let mut scene = Scene::default();
		scene.push(Layer::Boxes, SceneNode::rect(Rect::new(0.0, 0.0, 100.0, 50.0), 0.0, Style::default()));
		assert_eq!(scene.view_box(), Rect::new(-40.0, -40.0, 180.0, 130.0));
	}
}
