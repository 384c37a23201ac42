//! The single layout pass: parameters in, finished [`Scene`] out.
//!
//! Everything is positioned relative to the RITS hub centre, so moving the
//! hub (or applying the page offsets) moves the whole diagram. The SWIFT
//! cluster keeps its absolute coordinates for the default anchor and is
//! translated by the same delta.

use std::f64::consts::PI;

use crate::config::LayoutParams;
use crate::data::legend::LineStyle;
use crate::data::relationships::box_members;

use super::geometry::{self, Ellipse, Padding, Point, Rect, circle_subpath, gear_path, s_curve, sigmoid_path};
use super::scene::{DotPosition, Layer, Scene, SceneNode, Style, TextAnchor};

pub const DOT_COUNT: usize = 100;
pub const DOT_RADIUS: f64 = 2.4;

const DOT_SPACING: f64 = 5.0;
const GAP_SPACING: f64 = 10.0;
/// Vertical nudge unit for the special dots, six dot radii.
const NUDGE: f64 = DOT_RADIUS * 6.0;
const TOOTH_WIDTH: f64 = 0.25;

/// Default hub centre the absolute SWIFT cluster coordinates are relative to.
const BASE_ANCHOR: Point = Point::new(300.0, 450.0);

const BLUE: &str = "#3b82f6";
const ORANGE: &str = "#f59e0b";
const ORANGE_STROKE: &str = "#9a3412";
const RBA_RED: &str = "#991b1b";
const LIME: &str = "#7FFF00";
const TEAL: &str = "#0f766e";
const NAVY: &str = "#0a4f8f";
const LVSS_GREY: &str = "#968F7F";
const MAROON: &str = "#800000";
const NPP_GREEN: &str = "#2d5016";
const SCHEME_PURPLE: &str = "rgb(100,80,180)";

/// Position of dot `i` along the arc in spacing units, with the gaps
/// separating the participant groups folded in.
fn arc_position(i: usize) -> f64 {
	let s = DOT_SPACING;
	let g = GAP_SPACING;
	let f = i as f64;
	match i {
		0 => 0.0,
		1..=44 => f * s + 2.0 * g,
		45..=49 => f * s + 3.0 * g,
		50..=83 => (f + 1.0) * s + 6.0 * g,
		84..=86 => (f + 1.0) * s + 8.0 * g,
		87..=91 => (f + 1.0) * s + 10.5 * g,
		_ => {
			let pos = (i - 92) as f64;
			let mut base = 92.0 * s + 13.5 * g + pos * s * 1.5;
			if i >= 96 {
				base += g / 2.0;
			}
			if i >= 98 {
				base += g;
			}
			if i == 99 {
				base += g;
			}
			base
		}
	}
}

/// Fraction of the arc swept before dot `i`.
pub fn arc_fraction(i: usize) -> f64 {
	let max = DOT_COUNT as f64 * DOT_SPACING + 12.5 * GAP_SPACING + 8.0 * DOT_SPACING * 0.5 + 2.5 * GAP_SPACING;
	arc_position(i) / max
}

/// Dots with no line to the RITS hub.
pub fn blue_line_skipped(i: usize) -> bool {
	matches!(i, 34..=44 | 68..=83 | 91 | 95)
}

/// FSS members: dots drawn with a yellow companion and a line to the FSS hub.
pub fn has_fss_companion(i: usize) -> bool {
	matches!(i, 0..=2 | 45..=46 | 50..=55 | 84..=85 | 87..=88)
}

pub fn dot_radius(i: usize) -> f64 {
	match i {
		50..=53 => DOT_RADIUS * 1.5,
		96..=98 => DOT_RADIUS * 2.0,
		99 => DOT_RADIUS * 12.0,
		_ => DOT_RADIUS,
	}
}

/// Interactive id of the arc dot itself.
pub fn dot_id(i: usize) -> String {
	format!("dot-{i}")
}

/// The two hub circles.
#[derive(Clone, Copy, Debug)]
pub struct Hubs {
	pub big: Point,
	pub small: Point,
	pub r_big: f64,
	/// Drawn FSS radius, already reduced.
	pub r_small: f64,
	pub stroke_width: f64,
}

impl Hubs {
	pub fn new(params: &LayoutParams) -> Self {
		let big = Point::new(params.cx + params.offset_x, params.cy_big + params.offset_y);
		let r_small = params.drawn_r_small();
		let small = Point::new(
			big.x,
			big.y - (params.r_big + r_small + params.stroke_width + params.gap),
		);
		Self {
			big,
			small,
			r_big: params.r_big,
			r_small,
			stroke_width: params.stroke_width,
		}
	}

	pub fn big_outer(&self) -> f64 {
		self.r_big + self.stroke_width / 2.0
	}

	pub fn small_outer(&self) -> f64 {
		self.r_small + self.stroke_width / 2.0
	}

	/// Point on the RITS rim facing `p`.
	fn big_rim_towards(&self, p: Point) -> Point {
		self.big.towards(p, self.big_outer())
	}

	fn small_rim_towards(&self, p: Point) -> Point {
		self.small.towards(p, self.small_outer())
	}
}

/// The ellipse the dots sit on and the swept angle range.
#[derive(Clone, Copy, Debug)]
pub struct ArcGeometry {
	pub ellipse: Ellipse,
	pub start_angle: f64,
	pub end_angle: f64,
}

impl ArcGeometry {
	pub fn new(params: &LayoutParams, hubs: &Hubs) -> Self {
		let spacing_ratio = DOT_SPACING + (GAP_SPACING * DOT_SPACING * 2.0) / 100.0;
		let extension = 120.0 * (spacing_ratio - 1.0);
		let sw = params.stroke_width;

		let start = Point::new(
			hubs.big.x + params.r_big + sw + 20.0 + 60.0,
			hubs.small.y - params.r_small - 15.0 - extension,
		);
		let end_y = hubs.big.y + params.r_big + 15.0 + extension;

		let radius = (params.arc_r + extension) * 0.3;
		let half_height = (end_y - start.y) / 2.0;
		let under = radius * radius - half_height * half_height;
		let center_x = if under > 0.0 {
			start.x - under.sqrt()
		} else {
			start.x - radius
		};
		let center = Point::new(center_x, (start.y + end_y) / 2.0);
		let stretch = 1.05;
		let angle_of = |y: f64| ((y - center.y) / stretch).atan2(start.x - center.x);

		let (mut start_angle, mut end_angle) = (angle_of(start.y), angle_of(end_y));
		let max_span = params.arc_angle_deg.to_radians().clamp(0.0, 2.0 * PI);
		if end_angle - start_angle > max_span {
			let mid = (start_angle + end_angle) / 2.0;
			start_angle = mid - max_span / 2.0;
			end_angle = mid + max_span / 2.0;
		}
		let offset = params.arc_offset_deg.to_radians();

		Self {
			ellipse: Ellipse {
				center,
				rx: radius,
				ry: radius * stretch,
			},
			start_angle: start_angle + offset,
			end_angle: end_angle + offset,
		}
	}

	pub fn angle_at(&self, t: f64) -> f64 {
		self.start_angle + (self.end_angle - self.start_angle) * t
	}

	/// Final centre of dot `i`, special dots included.
	pub fn dot_center(&self, i: usize) -> Point {
		let base = self.ellipse.point_at(self.angle_at(arc_fraction(i)));
		let c = self.ellipse.center;
		let shifted = |p: Point, dy: f64| Point::new(p.x, p.y + dy);
		match i {
			0 => shifted(base.extend_from(c, 1.067), -2.0 * NUDGE),
			92..=95 => shifted(base, NUDGE / 2.0),
			96..=98 => shifted(base.extend_from(c, 1.05), NUDGE),
			99 => shifted(base.extend_from(c, 1.2), 1.8 * NUDGE),
			_ => base,
		}
	}
}

/// Styling and padding of one group box drawn around a run of dots.
struct GroupBox {
	id: &'static str,
	label: &'static str,
	padding: Padding,
	fill: &'static str,
	stroke: &'static str,
}

const fn group_box(
	id: &'static str,
	label: &'static str,
	padding: Padding,
	fill: &'static str,
	stroke: &'static str,
) -> GroupBox {
	GroupBox {
		id,
		label,
		padding,
		fill,
		stroke,
	}
}

/// Outermost first so inner boxes paint on top.
const GROUP_BOXES: &[GroupBox] = &[
	group_box("blue-dots-background", "ESA holders", Padding::new(50.0, 45.0, 330.0, 70.0), "#eff6ff", "#93c5fd"),
	group_box("adi-box", "ADIs", Padding::new(60.0, 30.0, 290.0, 5.0), "#dbeafe", "#2563eb"),
	group_box("international-banks-box", "International banks", Padding::new(10.0, 20.0, 210.0, 17.0), "#dde6ff", "#4c63d2"),
	group_box("foreign-branches-box", "Foreign branches", Padding::new(5.0, 15.0, 110.0, 0.0), "#e0f2fe", "#38bdf8"),
	group_box("foreign-subsidiaries-box", "Foreign subsidiaries", Padding::new(8.0, 1.0, 205.0, 12.0), "#e0f2fe", "#38bdf8"),
	group_box("domestic-banks-box", "Domestic banks", Padding::new(100.0, 6.0, 280.0, 0.0), "#e4d4f4", "#7030a0"),
	group_box("specialised-adis-box", "Specialised ADIs", Padding::new(8.0, 4.0, 295.0, 0.0), "#f5e6ff", "#8129a0"),
	group_box("other-adis-box", "Other ADIs", Padding::new(3.0, 4.0, 281.0, 0.0), "#ffe0f7", "#942193"),
	group_box("non-adi-box", "Non-ADIs", Padding::new(60.0, 30.0, 290.0, 7.0), "#fef3c7", "#f59e0b"),
	group_box("psps-box", "PSPs", Padding::new(8.0, 2.0, 300.0, 1.0), "#fee2e2", "#ef4444"),
	group_box("cs-box", "CS facilities", Padding::new(8.0, 4.0, 300.0, 6.0), "#E8F5E9", "#4CAF50"),
];

/// Build the whole diagram. Deterministic in `params`.
pub fn build_scene(params: &LayoutParams) -> Scene {
	let hubs = Hubs::new(params);
	let arc = ArcGeometry::new(params, &hubs);
	let mut builder = Builder {
		scene: Scene::default(),
		hubs,
		arc,
		boxes: Vec::new(),
	};
	builder.hubs();
	builder.arc_dots();
	builder.group_boxes();
	builder.lvss_cluster();
	builder.npp_cluster();
	builder.card_schemes();
	builder.swift_cluster();
	builder.rba_and_opa();
	builder.bdf();
	builder.scene
}

struct Builder {
	scene: Scene,
	hubs: Hubs,
	arc: ArcGeometry,
	/// Group box rects by id, for later connectors.
	boxes: Vec<(&'static str, Rect)>,
}

/// A rounded rectangle with a centred label, hoverable as one unit.
fn labelled_box(rect: Rect, label: &str, fill: &str, stroke: &str, text_fill: &str, size: f64) -> SceneNode {
	SceneNode::group(vec![
		SceneNode::rect(rect, 6.0, Style::filled(fill).with_stroke(stroke, 1.5)),
		SceneNode::text(rect.center(), label, Style::text(text_fill, size).bold()),
	])
}

/// Straight or doubled connector between two points.
fn connector(from: Point, to: Point, color: &str, width: f64, style: LineStyle) -> SceneNode {
	let stroke = Style::stroked(color, width).with_dash(style.dasharray());
	match style {
		LineStyle::Double => {
			let [a, b] = geometry::parallel_segments(from, to, width + 1.5);
			SceneNode::group(vec![
				SceneNode::line(a.0, a.1, stroke.clone()),
				SceneNode::line(b.0, b.1, stroke),
			])
		}
		_ => SceneNode::line(from, to, stroke),
	}
}

/// Horizontal-tangent curve, optionally doubled.
fn curve(from: Point, to: Point, color: &str, width: f64, style: LineStyle) -> SceneNode {
	let stroke = Style::stroked(color, width).with_dash(style.dasharray());
	let extent = Rect::enclosing([from, to]).unwrap_or_default();
	match style {
		LineStyle::Double => {
			let [a, b] = geometry::parallel_segments(from, to, width + 1.5);
			SceneNode::group(vec![
				SceneNode::path(s_curve(a.0, a.1), extent.inflate(width), stroke.clone()),
				SceneNode::path(s_curve(b.0, b.1), extent.inflate(width), stroke),
			])
		}
		_ => SceneNode::path(s_curve(from, to), extent, stroke),
	}
}

impl Builder {
	fn box_rect(&self, id: &str) -> Option<Rect> {
		self.boxes.iter().find(|(b, _)| *b == id).map(|(_, r)| *r)
	}

	fn dot(&self, i: usize) -> Option<DotPosition> {
		self.scene.dot(i).copied()
	}

	fn hubs(&mut self) {
		let h = self.hubs;
		let sw = h.stroke_width;
		let origin = Point::new(0.0, 0.0);
		let disk = |r: f64| Rect::new(-r, -r, r * 2.0, r * 2.0);

		let big_inner = h.r_big - 2.5 * sw;
		let big_border_outer = h.r_big - 0.75 * sw;
		let big_gear = big_inner - 12.0;
		let big = SceneNode::group_at(
			h.big,
			vec![
				SceneNode::circle(origin, h.big_outer(), Style::filled("#1e3a8a")),
				SceneNode::path(
					gear_path(big_border_outer - 6.0, 20, 6.0, TOOTH_WIDTH) + &circle_subpath(big_inner),
					disk(big_border_outer),
					Style::filled("#3b82f6").evenodd(),
				),
				SceneNode::group(vec![
					SceneNode::circle(origin, big_inner, Style::filled("#dbeafe")),
					SceneNode::path(
						gear_path(big_gear, 16, 8.0, TOOTH_WIDTH),
						disk(big_gear + 8.0),
						Style::filled("#bfdbfe").with_stroke("#93c5fd", 1.0),
					),
					SceneNode::text(origin, "RITS", Style::text("#1e3a8a", 28.0).bold()),
				])
				.interactive("rits-circle"),
			],
		)
		.interactive("big-group");

		let small_inner = h.r_small - 2.0 * sw;
		let small_border_outer = h.r_small - 0.3 * sw;
		let small_gear = small_inner - 8.0;
		let small = SceneNode::group_at(
			h.small,
			vec![
				SceneNode::circle(origin, h.small_outer(), Style::filled(ORANGE_STROKE)),
				SceneNode::path(
					gear_path(small_border_outer - 4.0, 12, 4.0, TOOTH_WIDTH) + &circle_subpath(small_inner),
					disk(small_border_outer),
					Style::filled(ORANGE).evenodd(),
				),
				SceneNode::group(vec![
					SceneNode::circle(origin, small_inner, Style::filled("#fef3c7")),
					SceneNode::path(
						gear_path(small_gear, 10, 4.0, TOOTH_WIDTH),
						disk(small_gear + 4.0),
						Style::filled("#fde68a").with_stroke("#fcd34d", 1.0),
					),
					SceneNode::text(origin, "FSS", Style::text(ORANGE_STROKE, 20.0).bold()),
				])
				.interactive("fss-circle"),
			],
		)
		.interactive("small-group");

		self.scene.push(Layer::Hubs, big);
		self.scene.push(Layer::Hubs, small);
	}

	fn arc_dots(&mut self) {
		let mut dots = Vec::with_capacity(DOT_COUNT);
		let mut blue_lines = Vec::new();
		let mut yellow_lines = Vec::new();
		let mut yellow_dots = Vec::new();
		let line_style = Style::stroked(BLUE, 1.0).with_opacity(0.9);

		for i in 0..DOT_COUNT {
			let center = self.arc.dot_center(i);
			let r = dot_radius(i);
			let rba = i == 0;

			let mut style = Style::filled(BLUE);
			match i {
				92..=95 => style = style.with_stroke("#ef4444", 2.0),
				96..=98 => style = style.with_stroke("#4CAF50", 2.0),
				99 => style = style.with_stroke(LIME, 6.0),
				_ => {}
			}
			if rba {
				dots.push(SceneNode::circle(center, r, style).interactive("rba-blue-dot"));
				self.scene.dots.push(DotPosition {
					index: i,
					center,
					r: NUDGE,
				});
			} else {
				dots.push(SceneNode::circle(center, r, style).interactive(dot_id(i)));
				self.scene.dots.push(DotPosition { index: i, center, r });
			}

			if !blue_line_skipped(i) {
				let line = SceneNode::line(self.hubs.big, center, line_style.clone());
				blue_lines.push(if rba {
					line.interactive("rba-blue-line")
				} else {
					line.with_id(format!("blue-line-{i}"))
				});
			}

			if has_fss_companion(i) {
				let ro = r * 2.0 / 3.0;
				let at = center.towards(self.arc.ellipse.center, r + ro);
				let companion = SceneNode::circle(at, ro, Style::filled(ORANGE).with_stroke(ORANGE_STROKE, 0.5));
				let line = SceneNode::line(at, self.hubs.small, Style::stroked(ORANGE, 2.0));
				if rba {
					yellow_dots.push(companion.interactive("rba-yellow-dot"));
					yellow_lines.push(line.interactive("rba-yellow-line"));
				} else {
					yellow_dots.push(companion.interactive(format!("yellow-dot-{i}")));
					yellow_lines.push(line.with_id(format!("yellow-line-{i}")));
				}
			}
		}

		self.scene.push(Layer::Lines, SceneNode::group(blue_lines).with_id("blue-connecting-lines"));
		self.scene.push(Layer::Lines, SceneNode::group(yellow_lines).with_id("orange-connecting-lines"));
		self.scene.push(Layer::Dots, SceneNode::group(dots).with_id("arc-dots"));
		self.scene.push(Layer::Dots, SceneNode::group(yellow_dots).with_id("yellow-circles"));
		self.cls_decorations();
	}

	/// Label and lime stub on the oversized CLS dot.
	fn cls_decorations(&mut self) {
		let Some(cls) = self.dot(99) else {
			return;
		};
		let stub_start = Point::new(cls.center.x - cls.r, cls.center.y);
		let endpoint = Point::new(stub_start.x - 87.0, cls.center.y);
		self.scene.cls_endpoint = Some(endpoint);
		self.scene.push(
			Layer::Lines,
			SceneNode::line(stub_start, endpoint, Style::stroked(LIME, 6.0)).with_id("cls-stub-line"),
		);
		self.scene.push(
			Layer::Labels,
			SceneNode::text(cls.center, "CLS", Style::text("#ffffff", 16.0).bold()).with_id("cls-label"),
		);
	}

	fn group_boxes(&mut self) {
		for spec in GROUP_BOXES {
			let Some(range) = box_members(spec.id) else {
				continue;
			};
			let extents = range.filter_map(|i| self.dot(i)).flat_map(|d| {
				[
					Point::new(d.center.x - d.r, d.center.y - d.r),
					Point::new(d.center.x + d.r, d.center.y + d.r),
				]
			});
			let Some(inner) = Rect::enclosing(extents) else {
				continue;
			};
			let rect = spec.padding.around(&inner);
			let opacity = if spec.id == "blue-dots-background" { 0.5 } else { 0.25 };
			let label_y = if rect.height < 40.0 {
				rect.center().y
			} else {
				rect.y + 16.0
			};
			let node = SceneNode::group(vec![
				SceneNode::rect(
					rect,
					8.0,
					Style::filled(spec.fill)
						.with_fill_opacity(opacity)
						.with_stroke(spec.stroke, 1.5),
				),
				SceneNode::text(
					Point::new(rect.right() - 8.0, label_y),
					spec.label,
					Style::text(spec.stroke, 13.0).bold().anchored(TextAnchor::End),
				),
			])
			.interactive(spec.id);
			self.boxes.push((spec.id, rect));
			self.scene.push(Layer::Background, node);
		}
	}

	/// LVSS gear, the five clearing streams feeding it and their upstreams.
	fn lvss_cluster(&mut self) {
		let h = self.hubs;
		let centre = Point::new(h.big.x - 230.0, h.small.y + 10.0);
		let radius = 37.0 * 1.2 * 0.9_f64.powi(3);
		let rim = radius + 3.0;

		let gear = SceneNode::group_at(
			centre,
			vec![
				SceneNode::path(
					gear_path(radius, 12, 3.0, TOOTH_WIDTH),
					Rect::new(-rim, -rim, rim * 2.0, rim * 2.0),
					Style::filled("#800020").with_stroke("#9ca3af", 1.0),
				)
				.interactive("lvss-gear"),
				SceneNode::group(vec![
					SceneNode::circle(Point::new(0.0, 0.0), radius * 0.8, Style::filled("#4A1942")),
					SceneNode::text(Point::new(0.0, 0.0), "LVSS", Style::text("#ffffff", 14.0).bold())
						.with_id("lvss-label"),
				])
				.interactive("lvss-circle"),
			],
		)
		.with_id("lvss-gear-group");
		self.scene.push(Layer::Hubs, gear);

		let rits_end = h.big_rim_towards(centre);
		self.scene.push(
			Layer::Lines,
			curve(Point::new(centre.x + rim, centre.y), rits_end, LVSS_GREY, 1.5, LineStyle::Double)
				.with_id("lvss-to-rits-line"),
		);

		const ROW: f64 = 38.0;
		const BOX_W: f64 = 64.0;
		const BOX_H: f64 = 26.0;
		let column_x = centre.x - 150.0;
		let streams = [("cshd", "CSHD"), ("cecs", "CECS"), ("becs", "BECS"), ("apcs", "APCS"), ("gabs", "GABS")];
		let mut rows = Vec::with_capacity(streams.len());
		for (k, (code, label)) in streams.iter().enumerate() {
			let y = centre.y - 2.0 * ROW + k as f64 * ROW - BOX_H / 2.0;
			let rect = Rect::new(column_x, y, BOX_W, BOX_H);
			self.scene.push(
				Layer::Boxes,
				labelled_box(rect, label, "#fce7f3", "#800020", "#800020", 12.0).interactive(format!("{code}-box")),
			);
			let start = rect.right_mid();
			let end = centre.towards(start, rim);
			self.scene.push(
				Layer::Lines,
				connector(start, end, LVSS_GREY, 1.5, LineStyle::Double).interactive(format!("lvss-line-{code}")),
			);
			rows.push(rect);
		}
		let (cshd, cecs, becs, apcs) = (rows[0], rows[1], rows[2], rows[3]);

		// Feeder columns to the left of the streams.
		let col_a = column_x - 150.0;
		let col_b = col_a - 130.0;
		let col_c = col_b - 120.0;

		// IAC stack spans the CSHD and CECS rows.
		let iac = Rect::new(col_a, cshd.y, 110.0, cecs.bottom() - cshd.y);
		let stripes = [("blue", "#27AEE3"), ("yellow", "#FFA500"), ("green", "#008000"), ("brown", "#412e29")];
		let mut stack = vec![
			SceneNode::rect(iac, 6.0, Style::filled("#f8fafc").with_stroke("#475569", 1.5)),
			SceneNode::text(Point::new(iac.x + 80.0, iac.center().y), "IAC", Style::text("#334155", 13.0).bold()),
		];
		for (k, (name, color)) in stripes.iter().enumerate() {
			let y = iac.y + 12.0 + k as f64 * (iac.height - 24.0) / 3.0;
			stack.push(
				SceneNode::line(Point::new(iac.x + 8.0, y), Point::new(iac.x + 56.0, y), Style::stroked(color, 2.0))
					.with_id(format!("direct-entry-stack-line-{name}")),
			);
		}
		self.scene.push(
			Layer::Boxes,
			SceneNode::group(stack).interactive("direct-entry-stack-bounding-box"),
		);
		let [l1, l2] = geometry::parallel_segments(
			Point::new(iac.right(), cecs.center().y),
			cecs.left_mid(),
			3.0,
		);
		for (k, (from, to)) in [l1, l2].into_iter().enumerate() {
			self.scene.push(
				Layer::Lines,
				SceneNode::line(from, to, Style::stroked("#808080", 1.5)).with_id(format!("cecs-to-iac-line-{}", k + 1)),
			);
		}

		// Card schemes cleared through IAC.
		for (id, label, row) in [("visa-box", "Visa", cshd), ("other-cards-box", "Other cards", cecs)] {
			let rect = Rect::new(col_b, row.center().y - 11.0, 100.0, 22.0);
			self.scene.push(
				Layer::Boxes,
				labelled_box(rect, label, "#e0f2fe", "#27AEE3", "#0c4a6e", 12.0).interactive(id),
			);
			self.scene.push(
				Layer::Lines,
				connector(rect.right_mid(), Point::new(iac.x, rect.center().y), "#27AEE3", 1.0, LineStyle::Double)
					.with_id(format!("{id}-to-iac-line")),
			);
		}

		// Direct entry feeding BECS.
		let de = Rect::new(col_a, becs.y, 110.0, becs.height);
		self.scene.push(
			Layer::Boxes,
			labelled_box(de, "Direct Entry", "#fef2f2", MAROON, MAROON, 12.0).interactive("de-box"),
		);
		self.scene.push(
			Layer::Lines,
			connector(de.right_mid(), becs.left_mid(), MAROON, 1.5, LineStyle::Double).with_id("de-line"),
		);
		let becn = Rect::new(col_b, becs.center().y - 24.0, 100.0, 20.0);
		let becg = Rect::new(col_b, becs.center().y + 6.0, 100.0, 20.0);
		for (id, label, rect, end_dy) in [("becn", "BECN", becn, 6.0), ("becg", "BECG", becg, BOX_H - 6.0)] {
			self.scene.push(
				Layer::Boxes,
				labelled_box(rect, label, "#fff1f2", "#8B0000", "#8B0000", 11.0).interactive(format!("{id}-box")),
			);
			self.scene.push(
				Layer::Lines,
				connector(rect.right_mid(), Point::new(becs.x, becs.y + end_dy), "#8B0000", 2.0, LineStyle::Solid)
					.interactive(format!("{id}-to-becs-line")),
			);
		}
		let bpay = Rect::new(col_c, becn.y, 90.0, 20.0);
		self.scene.push(
			Layer::Boxes,
			labelled_box(bpay, "BPAY", "#ede9fe", SCHEME_PURPLE, SCHEME_PURPLE, 11.0).interactive("bpay-box"),
		);
		self.scene.push(
			Layer::Lines,
			connector(bpay.right_mid(), becn.left_mid(), SCHEME_PURPLE, 6.0, LineStyle::Solid).with_id("becs-line"),
		);

		// Cheques feeding APCS.
		let cheques = Rect::new(col_a, apcs.y, 110.0, apcs.height);
		self.scene.push(
			Layer::Boxes,
			labelled_box(cheques, "Cheques", "#f5f5f4", "#57534e", "#44403c", 12.0).interactive("cheques-box"),
		);
		self.scene.push(
			Layer::Lines,
			connector(cheques.right_mid(), apcs.left_mid(), "#808080", 3.0, LineStyle::Solid)
				.with_id("cheques-to-apcs-line"),
		);

		// Direct entry also posts to the ADIs, routed under the hubs.
		if let Some(adi) = self.box_rect("adi-box") {
			self.scene.push(
				Layer::Lines,
				curve(de.bottom_mid(), Point::new(adi.x, adi.bottom() - 20.0), MAROON, 1.5, LineStyle::Double)
					.interactive("directentry-to-adi-line"),
			);
		}
	}

	/// NPP with its overlay services, above the clearing streams.
	fn npp_cluster(&mut self) {
		let h = self.hubs;
		let npp = Rect::new(h.big.x - 530.0, h.small.y - 169.0, 110.0, 30.0);
		self.scene.push(
			Layer::Boxes,
			labelled_box(npp, "NPP", "#ecfccb", NPP_GREEN, NPP_GREEN, 14.0).interactive("npp-box"),
		);

		let overlays = [("osko-box", "Osko"), ("payid-box", "PayID"), ("payto-box", "PayTo"), ("bsct-box", "BSCT")];
		let mut osko = None;
		for (k, (id, label)) in overlays.iter().enumerate() {
			let rect = Rect::new(npp.x + k as f64 * 57.0, npp.y - 34.0, 52.0, 22.0);
			if k == 0 {
				osko = Some(rect);
			}
			self.scene.push(
				Layer::Boxes,
				labelled_box(rect, label, "#f7fee7", NPP_GREEN, NPP_GREEN, 11.0).interactive(*id),
			);
		}

		let fss_end = h.small_rim_towards(npp.right_mid());
		self.scene.push(
			Layer::Lines,
			curve(npp.right_mid(), fss_end, NPP_GREEN, 1.5, LineStyle::Double).interactive("npp-to-fss-line"),
		);
		let Some(adi) = self.box_rect("adi-box") else {
			return;
		};
		self.scene.push(
			Layer::Lines,
			curve(
				Point::new(npp.right(), npp.y + 8.0),
				Point::new(adi.x, adi.y + 25.0),
				NPP_GREEN,
				1.5,
				LineStyle::Double,
			)
			.interactive("npp-to-adi-line"),
		);
		if let Some(osko) = osko {
			self.scene.push(
				Layer::Lines,
				curve(osko.top_mid(), Point::new(adi.x, adi.y + 40.0), SCHEME_PURPLE, 2.0, LineStyle::Solid)
					.interactive("osko-to-adi-line"),
			);
		}
	}

	/// eftpos and Mastercard inside the administered batches box, each
	/// settling through its own batch into RITS.
	fn card_schemes(&mut self) {
		let h = self.hubs;
		let x = h.big.x - 530.0;
		let top = h.small.y + 124.0;
		let schemes = [
			("eftpos", "eftpos", "essb", "ESSB", SCHEME_PURPLE),
			("mastercard", "Mastercard", "mcau", "MCAU", "rgb(216,46,43)"),
		];
		let mut scheme_rects = Vec::new();
		for (k, (id, label, batch_id, batch_label, color)) in schemes.iter().enumerate() {
			let y = top + k as f64 * 36.0;
			let scheme = Rect::new(x, y, 110.0, 26.0);
			let batch = Rect::new(x + 150.0, y, 64.0, 26.0);
			scheme_rects.push(scheme);
			self.scene.push(
				Layer::Boxes,
				labelled_box(scheme, label, "#fafafa", color, color, 12.0).interactive(format!("{id}-box")),
			);
			self.scene.push(
				Layer::Boxes,
				labelled_box(batch, batch_label, "#fff7ed", "#FFA500", "#9a3412", 11.0).with_id(format!("{batch_id}-box")),
			);
			self.scene.push(
				Layer::Lines,
				connector(scheme.right_mid(), batch.left_mid(), color, 2.0, LineStyle::Solid)
					.with_id(format!("{id}-horizontal")),
			);
			let rim = h.big_rim_towards(batch.right_mid());
			self.scene.push(
				Layer::Lines,
				curve(batch.right_mid(), rim, "#FFA500", 1.5, LineStyle::Double).with_id(format!("{id}-left-line")),
			);
		}
		if let Some(bounds) = scheme_rects.iter().copied().reduce(|a, b| a.union(&b)) {
			let outer = Padding::new(10.0, 24.0, 10.0, 10.0).around(&bounds);
			self.scene.push(
				Layer::Background,
				SceneNode::group(vec![
					SceneNode::rect(outer, 8.0, Style::filled("#fff7ed").with_stroke("#FFA500", 1.0).with_dash(Some("5,5"))),
					SceneNode::text(
						Point::new(outer.x + 8.0, outer.y + 12.0),
						"Administered batches",
						Style::text("#9a3412", 11.0).anchored(TextAnchor::Start),
					),
				])
				.with_id("administered-batches-box"),
			);
		}
	}

	/// SWIFT PDS, CLS AUD, Austraclear, the pacs messages and the ASX markers.
	fn swift_cluster(&mut self) {
		let h = self.hubs;
		let (dx, dy) = (h.big.x - BASE_ANCHOR.x, h.big.y - BASE_ANCHOR.y);
		let at = |x: f64, y: f64, w: f64, hgt: f64| Rect::new(x + dx, y + dy, w, hgt);
		let small_h = 23.666_666_666_666_668;

		let swift = at(53.924_914_254_069_45, 714.0, 81.0, 81.0);
		let cls_aud = at(53.924_914_254_069_45, 685.333_333_333_333_3, 81.0, small_h);
		let austraclear = at(5.324_914_254_069_455, 607.333_333_333_333_3, 129.6, 54.0);
		let pacs = [
			(at(-219.575_085_745_930_55, 715.666_666_666_666_5, 121.5, small_h), "pacs.009"),
			(at(-133.575_085_745_930_55, 742.666_666_666_666_5, 121.5, small_h), "pacs.008"),
			(at(-47.575_085_745_930_55, 769.666_666_666_666_5, 121.5, small_h), "pacs.004"),
		];

		let hvcs = pacs
			.iter()
			.map(|(r, _)| *r)
			.fold(swift, |acc, r| acc.union(&r))
			.inflate(10.0);
		self.scene.push(
			Layer::Background,
			SceneNode::group(vec![
				SceneNode::rect(hvcs, 10.0, Style::filled("#f0fdfa").with_stroke(TEAL, 1.5).with_dash(Some("10,5"))),
				SceneNode::text(
					Point::new(hvcs.x + 8.0, hvcs.bottom() - 10.0),
					"SWIFT HVCS",
					Style::text(TEAL, 12.0).bold().anchored(TextAnchor::Start),
				),
			])
			.interactive("swift-hvcs-box"),
		);

		for (k, (rect, label)) in pacs.iter().enumerate() {
			self.scene.push(
				Layer::Boxes,
				SceneNode::group(vec![
					SceneNode::rect(*rect, 12.0, Style::filled(TEAL)),
					SceneNode::text(rect.center(), label, Style::text("#ffffff", 14.0)),
				])
				.with_id(format!("pacs-box-{k}")),
			);
		}
		self.scene.push(
			Layer::Boxes,
			SceneNode::group(vec![
				SceneNode::rect(swift, 4.0, Style::filled("#bdf7e9").with_stroke(TEAL, 2.0)),
				SceneNode::text(swift.center(), "SWIFT\nPDS", Style::text(TEAL, 18.0).bold()),
			])
			.interactive("swift-pds-box"),
		);
		self.scene.push(
			Layer::Boxes,
			SceneNode::group(vec![
				SceneNode::rect(cls_aud, 12.0, Style::filled(TEAL)),
				SceneNode::text(cls_aud.center(), "CLS AUD", Style::text("#ffffff", 12.0).bold()),
			])
			.with_id("cls-aud-box"),
		);
		self.scene.push(
			Layer::Boxes,
			labelled_box(austraclear, "Austraclear", "#dbeafe", "#1d4ed8", "#1d4ed8", 14.0).interactive("austraclear-box"),
		);

		let swift_from = swift.right_mid();
		self.scene.push(
			Layer::Lines,
			curve(swift_from, h.big_rim_towards(swift_from), "#3da88a", 6.0, LineStyle::Solid).interactive("swift-pds-line"),
		);
		let austraclear_from = austraclear.right_mid();
		self.scene.push(
			Layer::Lines,
			curve(austraclear_from, h.big_rim_towards(austraclear_from), NAVY, 4.0, LineStyle::Solid)
				.with_id("austraclear-line"),
		);
		if let Some(endpoint) = self.scene.cls_endpoint {
			let extent = Rect::enclosing([endpoint, cls_aud.right_mid()]).unwrap_or_default();
			self.scene.push(
				Layer::Lines,
				SceneNode::path(sigmoid_path(endpoint, cls_aud.right_mid(), 1.0, 24), extent, Style::stroked(LIME, 6.0))
					.with_id("cls-aud-line"),
			);
		}

		// ASX markers above Austraclear.
		let chess = Rect::new(austraclear.x, austraclear.y - 66.0, austraclear.width, 54.0);
		self.scene.push(
			Layer::Boxes,
			labelled_box(chess, "CHESS-RTGS", "#e0e7ff", NAVY, NAVY, 13.0).with_id("chess-rtgs-box"),
		);
		let chess_from = chess.right_mid();
		self.scene.push(
			Layer::Lines,
			curve(chess_from, h.big_rim_towards(chess_from), NAVY, 4.0, LineStyle::Solid).with_id("chess-rtgs-line"),
		);
		let marker_x = chess.x - 50.0;
		let mid = chess.center().y;
		let markers = [
			("lch-dot", "lch-label", "LCH", Point::new(marker_x, chess.y - 20.0), "#6b7280"),
			("asx-clearing-dot", "asx-clearing-label", "ASX Clear", Point::new(marker_x, mid - 12.0), "#1d4ed8"),
			("asx-settlement-dot", "asx-settlement-label", "ASX Settlement", Point::new(marker_x, mid + 12.0), NAVY),
		];
		for (id, label_id, label, p, color) in markers {
			self.scene.push(Layer::Dots, SceneNode::circle(p, 6.0, Style::filled(color)).interactive(id));
			self.scene.push(
				Layer::Labels,
				SceneNode::text(
					Point::new(p.x - 10.0, p.y),
					label,
					Style::text(color, 12.0).anchored(TextAnchor::End),
				)
				.with_id(label_id),
			);
		}
		let settlement = markers[2].3;
		let clearing = markers[1].3;
		let lch = markers[0].3;
		self.scene.push(
			Layer::Lines,
			connector(Point::new(settlement.x + 6.0, settlement.y), chess.left_mid(), NAVY, 4.0, LineStyle::Solid)
				.with_id("asx-settlement-line"),
		);
		self.scene.push(
			Layer::Lines,
			connector(clearing, settlement, NAVY, 2.0, LineStyle::Dotted).with_id("asx-clearing-line"),
		);
		self.scene.push(
			Layer::Lines,
			connector(lch, clearing, NAVY, 2.0, LineStyle::Dotted).with_id("lch-line"),
		);
	}

	/// The RBA ring around dot 0 and the OPA box feeding it.
	fn rba_and_opa(&mut self) {
		let Some(rba) = self.dot(0) else {
			return;
		};
		self.scene.push(
			Layer::Dots,
			SceneNode::circle(rba.center, NUDGE, Style::filled("#000000").with_stroke(RBA_RED, 2.0)).interactive(dot_id(0)),
		);
		self.scene.push(
			Layer::Labels,
			SceneNode::text(
				Point::new(rba.center.x + NUDGE + 5.0, rba.center.y),
				"RBA",
				Style::text(RBA_RED, 16.0).bold().anchored(TextAnchor::Start),
			)
			.with_id("rba-label"),
		);

		let opa = Rect::new(rba.center.x - NUDGE - 170.0, rba.center.y - 14.0, 90.0, 28.0);
		self.scene.push(
			Layer::Boxes,
			SceneNode::rect(opa, 6.0, Style::filled("#fee2e2").with_stroke(RBA_RED, 1.5)).interactive("opa-box"),
		);
		self.scene.push(
			Layer::Labels,
			SceneNode::text(opa.center(), "OPA", Style::text(RBA_RED, 13.0).bold()).interactive("opa-label"),
		);
		self.scene.push(
			Layer::Lines,
			connector(
				opa.right_mid(),
				Point::new(rba.center.x - NUDGE, rba.center.y),
				RBA_RED,
				2.0,
				LineStyle::Solid,
			)
			.interactive("opa-to-rba-line"),
		);
	}

	/// BDF box right of the ESA background with a line to each Big Four dot.
	fn bdf(&mut self) {
		let Some(background) = self.box_rect("blue-dots-background") else {
			return;
		};
		let big_four: Vec<DotPosition> = (52..=55).filter_map(|i| self.dot(i)).collect();
		let Some(span) = Rect::enclosing(big_four.iter().map(|d| d.center)) else {
			return;
		};
		let bdf = Rect::new(background.right() + 30.0, span.center().y - 20.0, 90.0, 40.0);
		self.scene.push(
			Layer::Boxes,
			labelled_box(bdf, "BDF", "#fdf2f8", "#8B1538", "#8B1538", 14.0).interactive("bdf-box"),
		);
		for d in big_four {
			let to = Point::new(d.center.x + d.r, d.center.y);
			self.scene.push(
				Layer::Lines,
				connector(bdf.left_mid(), to, MAROON, 1.5, LineStyle::Solid).interactive(format!("bdf-line-{}", d.index)),
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::relationships::{BOX_MEMBERS, ELEMENT_RELATIONSHIPS};
	use std::collections::HashSet;

	fn scene() -> Scene {
		build_scene(&LayoutParams::default())
	}

	#[test]
	fn hundred_dots_in_order() {
		let s = scene();
		assert_eq!(s.dots.len(), DOT_COUNT);
		for (i, d) in s.dots.iter().enumerate() {
			assert_eq!(d.index, i);
		}
	}

	#[test]
	fn deterministic() {
		let a = scene();
		let b = scene();
		assert_eq!(a.dots, b.dots);
		assert_eq!(a.all_nodes(), b.all_nodes());
	}

	#[test]
	fn default_arc_matches_reference_geometry() {
		let params = LayoutParams::default();
		let hubs = Hubs::new(&params);
		assert!((hubs.small.y - 266.0).abs() < 1e-9);
		let arc = ArcGeometry::new(&params, &hubs);
		assert!((arc.ellipse.center.x - 225.0).abs() < 1e-9);
		assert!((arc.ellipse.rx - 276.0).abs() < 1e-9);
		assert!((arc.start_angle + 1.2228).abs() < 1e-3);
		assert!((arc.end_angle - arc.start_angle.abs()).abs() < 1e-3);
	}

	#[test]
	fn group_gaps_widen_spacing() {
		let inside = arc_fraction(2) - arc_fraction(1);
		let across = arc_fraction(45) - arc_fraction(44);
		assert!(across > inside);
		let tail = arc_fraction(93) - arc_fraction(92);
		assert!((tail - inside * 1.5).abs() < 1e-12);
	}

	#[test]
	fn blue_line_skip_set() {
		let s = scene();
		for i in 1..DOT_COUNT {
			let present = s.find(&format!("blue-line-{i}")).is_some();
			assert_eq!(present, !blue_line_skipped(i), "blue-line-{i}");
		}
		assert!(s.find("rba-blue-line").is_some());
		let skipped = (0..DOT_COUNT).filter(|i| blue_line_skipped(*i)).count();
		assert_eq!(skipped, 11 + 16 + 2);
	}

	#[test]
	fn fss_companion_set() {
		let s = scene();
		let companions: Vec<usize> = (1..DOT_COUNT)
			.filter(|i| s.find(&format!("yellow-dot-{i}")).is_some())
			.collect();
		assert_eq!(companions, vec![1, 2, 45, 46, 50, 51, 52, 53, 54, 55, 84, 85, 87, 88]);
		assert!(s.find("rba-yellow-dot").is_some());
		assert!(s.find("yellow-dot-89").is_none());
	}

	#[test]
	fn group_boxes_contain_their_dots() {
		let s = scene();
		for b in BOX_MEMBERS {
			let node = s.find(b.box_id).unwrap_or_else(|| panic!("{} missing", b.box_id));
			let rect = node.bounds().unwrap();
			for i in b.dots.clone() {
				let d = s.dot(i).unwrap();
				assert!(rect.contains(d.center), "{} misses dot {i}", b.box_id);
			}
		}
	}

	#[test]
	fn special_dots() {
		let s = scene();
		assert_eq!(s.dot(99).unwrap().r, DOT_RADIUS * 12.0);
		assert_eq!(s.dot(97).unwrap().r, DOT_RADIUS * 2.0);
		assert_eq!(s.dot(51).unwrap().r, DOT_RADIUS * 1.5);
		let cls = s.dot(99).unwrap();
		let end = s.cls_endpoint.unwrap();
		assert_eq!(end.y, cls.center.y);
		assert!((cls.center.x - cls.r - end.x - 87.0).abs() < 1e-9);
		// The RBA dot is lifted above where the arc would put it.
		let arc = ArcGeometry::new(&LayoutParams::default(), &Hubs::new(&LayoutParams::default()));
		let plain = arc.ellipse.point_at(arc.angle_at(0.0));
		assert!(s.dot(0).unwrap().center.y < plain.y);
	}

	#[test]
	fn every_table_key_is_drawn() {
		let s = scene();
		let drawn: HashSet<&str> = s.all_nodes().into_iter().filter_map(|n| n.element_id()).collect();
		for (id, _) in ELEMENT_RELATIONSHIPS {
			assert!(drawn.contains(id), "{id} not drawn");
		}
	}

	#[test]
	fn element_ids_are_unique() {
		let s = scene();
		let mut seen = HashSet::new();
		for id in s.all_nodes().into_iter().filter_map(|n| n.element_id()) {
			assert!(seen.insert(id), "duplicate id {id}");
		}
	}

	#[test]
	fn offsets_translate_everything() {
		let base = scene();
		let moved = build_scene(&LayoutParams {
			offset_x: 10.0,
			offset_y: -5.0,
			..LayoutParams::default()
		});
		for (a, b) in base.dots.iter().zip(&moved.dots) {
			assert!((b.center.x - a.center.x - 10.0).abs() < 1e-9);
			assert!((b.center.y - a.center.y + 5.0).abs() < 1e-9);
		}
		let sa = base.find("swift-pds-box").unwrap().bounds().unwrap();
		let sb = moved.find("swift-pds-box").unwrap().bounds().unwrap();
		assert!((sb.x - sa.x - 10.0).abs() < 1e-9);
	}

	#[test]
	fn arc_angle_caps_span() {
		let params = LayoutParams {
			arc_angle_deg: 90.0,
			..LayoutParams::default()
		};
		let arc = ArcGeometry::new(&params, &Hubs::new(&params));
		assert!((arc.end_angle - arc.start_angle - PI / 2.0).abs() < 1e-9);
		let rotated = ArcGeometry::new(
			&LayoutParams {
				arc_offset_deg: 10.0,
				..LayoutParams::default()
			},
			&Hubs::new(&params),
		);
		let plain = ArcGeometry::new(&LayoutParams::default(), &Hubs::new(&params));
		assert!((rotated.start_angle - plain.start_angle - 10f64.to_radians()).abs() < 1e-9);
	}
}
