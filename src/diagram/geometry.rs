//! Plane geometry and path builders used by the layout pass.

use std::f64::consts::PI;
use std::fmt::Write;

/// Format a coordinate the way every emitted attribute does: two decimals.
pub fn fmt(value: f64) -> String {
	format!("{value:.2}")
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}

	/// The point `factor` times as far from `origin` along the same ray.
	pub fn extend_from(self, origin: Point, factor: f64) -> Point {
		Point::new(
			origin.x + (self.x - origin.x) * factor,
			origin.y + (self.y - origin.y) * factor,
		)
	}

	/// Step `distance` from `self` towards `target`.
	pub fn towards(self, target: Point, distance: f64) -> Point {
		let len = self.distance(target);
		if len < f64::EPSILON {
			return self;
		}
		Point::new(
			self.x + (target.x - self.x) / len * distance,
			self.y + (target.y - self.y) / len * distance,
		)
	}
}

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Midpoint of the left edge.
	pub fn left_mid(&self) -> Point {
		Point::new(self.x, self.y + self.height / 2.0)
	}

	/// Midpoint of the right edge.
	pub fn right_mid(&self) -> Point {
		Point::new(self.right(), self.y + self.height / 2.0)
	}

	pub fn top_mid(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y)
	}

	pub fn bottom_mid(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.bottom())
	}

	pub fn translate(&self, dx: f64, dy: f64) -> Rect {
		Rect::new(self.x + dx, self.y + dy, self.width, self.height)
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
	}

	pub fn union(&self, other: &Rect) -> Rect {
		let (x, y) = (self.x.min(other.x), self.y.min(other.y));
		Rect::new(
			x,
			y,
			self.right().max(other.right()) - x,
			self.bottom().max(other.bottom()) - y,
		)
	}

	/// Grow by a uniform margin on every side.
	pub fn inflate(&self, margin: f64) -> Rect {
		Rect::new(
			self.x - margin,
			self.y - margin,
			self.width + 2.0 * margin,
			self.height + 2.0 * margin,
		)
	}

	/// Smallest rectangle containing every point, `None` for no points.
	pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
		let mut it = points.into_iter();
		let first = it.next()?;
		let (mut min, mut max) = (first, first);
		for p in it {
			min = Point::new(min.x.min(p.x), min.y.min(p.y));
			max = Point::new(max.x.max(p.x), max.y.max(p.y));
		}
		Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
	}
}

/// Per-side padding used when drawing a box around a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
	pub left: f64,
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
}

impl Padding {
	pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
		Self {
			left,
			top,
			right,
			bottom,
		}
	}

	pub fn around(&self, inner: &Rect) -> Rect {
		Rect::new(
			inner.x - self.left,
			inner.y - self.top,
			inner.width + self.left + self.right,
			inner.height + self.top + self.bottom,
		)
	}
}

/// Axis-aligned ellipse used for the dot arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
	pub center: Point,
	pub rx: f64,
	pub ry: f64,
}

impl Ellipse {
	pub fn point_at(&self, angle: f64) -> Point {
		Point::new(
			self.center.x + self.rx * angle.cos(),
			self.center.y + self.ry * angle.sin(),
		)
	}
}

/// Closed gear outline centred on the origin: `teeth` rectangular teeth of
/// `tooth_height` standing on a base circle of `radius`, each `tooth_width`
/// radians wide, joined by arcs.
pub fn gear_path(radius: f64, teeth: usize, tooth_height: f64, tooth_width: f64) -> String {
	let mut d = String::new();
	if teeth == 0 {
		return d;
	}
	let step = 2.0 * PI / teeth as f64;
	let outer = radius + tooth_height;
	let half = tooth_width / 2.0;
	for i in 0..teeth {
		let angle = i as f64 * step;
		let next = (i + 1) as f64 * step;
		if i == 0 {
			let _ = write!(
				d,
				"M {} {}",
				fmt((angle - half).cos() * radius),
				fmt((angle - half).sin() * radius)
			);
		}
		let _ = write!(
			d,
			" L {} {} L {} {} L {} {} A {} {} 0 0 1 {} {}",
			fmt((angle - half).cos() * outer),
			fmt((angle - half).sin() * outer),
			fmt((angle + half).cos() * outer),
			fmt((angle + half).sin() * outer),
			fmt((angle + half).cos() * radius),
			fmt((angle + half).sin() * radius),
			fmt(radius),
			fmt(radius),
			fmt((next - half).cos() * radius),
			fmt((next - half).sin() * radius),
		);
	}
	d.push_str(" Z");
	d
}

/// Full circle sub-path of `radius`, appended to a gear outline and filled
/// with `evenodd` to punch a hole in the middle.
pub fn circle_subpath(radius: f64) -> String {
	let r = fmt(radius);
	let neg = fmt(-radius);
	format!(" M {r} 0 A {r} {r} 0 1 0 {neg} 0 A {r} {r} 0 1 0 {r} 0")
}

/// Logistic function, `steepness` scales the input.
pub fn sigmoid(x: f64, steepness: f64) -> f64 {
	1.0 / (1.0 + (-x * steepness).exp())
}

/// Polyline path easing from `from` to `to` along a logistic curve in y,
/// sampled at `samples` segments. Used for the long CLS connector.
pub fn sigmoid_path(from: Point, to: Point, steepness: f64, samples: usize) -> String {
	let samples = samples.max(1);
	let (lo, hi) = (sigmoid(-6.0, steepness), sigmoid(6.0, steepness));
	let mut d = format!("M {} {}", fmt(from.x), fmt(from.y));
	for i in 1..=samples {
		let t = i as f64 / samples as f64;
		let s = (sigmoid(-6.0 + 12.0 * t, steepness) - lo) / (hi - lo);
		let x = from.x + (to.x - from.x) * t;
		let y = from.y + (to.y - from.y) * s;
		let _ = write!(d, " L {} {}", fmt(x), fmt(y));
	}
	d
}

/// Cubic curve leaving `from` and arriving at `to` horizontally.
pub fn s_curve(from: Point, to: Point) -> String {
	let mid = (from.x + to.x) / 2.0;
	format!(
		"M {} {} C {} {}, {} {}, {} {}",
		fmt(from.x),
		fmt(from.y),
		fmt(mid),
		fmt(from.y),
		fmt(mid),
		fmt(to.y),
		fmt(to.x),
		fmt(to.y)
	)
}

/// Pair of paths offset `gap / 2` either side of the `from -> to` segment,
/// for double-stroked connections.
pub fn parallel_segments(from: Point, to: Point, gap: f64) -> [(Point, Point); 2] {
	let len = from.distance(to).max(f64::EPSILON);
	let (nx, ny) = (-(to.y - from.y) / len * gap / 2.0, (to.x - from.x) / len * gap / 2.0);
	[
		(Point::new(from.x + nx, from.y + ny), Point::new(to.x + nx, to.y + ny)),
		(Point::new(from.x - nx, from.y - ny), Point::new(to.x - nx, to.y - ny)),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gear_has_one_arc_per_tooth() {
		let d = gear_path(40.0, 12, 4.0, 0.25);
		assert!(d.starts_with("M "));
		assert!(d.ends_with(" Z"));
		assert_eq!(d.matches(" A ").count(), 12);
		assert!(gear_path(40.0, 0, 4.0, 0.25).is_empty());
	}

	#[test]
	fn padding_is_per_side() {
		let inner = Rect::new(100.0, 100.0, 50.0, 20.0);
		let boxed = Padding::new(10.0, 20.0, 30.0, 5.0).around(&inner);
		assert_eq!(boxed, Rect::new(90.0, 80.0, 90.0, 45.0));
	}

	#[test]
	fn enclosing_and_union() {
		let r = Rect::enclosing([Point::new(3.0, 4.0), Point::new(-1.0, 10.0), Point::new(2.0, 0.0)]).unwrap();
		assert_eq!(r, Rect::new(-1.0, 0.0, 4.0, 10.0));
		assert!(Rect::enclosing(std::iter::empty()).is_none());
		let u = r.union(&Rect::new(5.0, 5.0, 1.0, 1.0));
		assert_eq!(u, Rect::new(-1.0, 0.0, 7.0, 10.0));
	}

	#[test]
	fn sigmoid_path_hits_both_ends() {
		let d = sigmoid_path(Point::new(0.0, 0.0), Point::new(100.0, 50.0), 1.0, 10);
		assert!(d.starts_with("M 0.00 0.00"));
		assert!(d.ends_with("L 100.00 50.00"));
		assert!((sigmoid(0.0, 3.0) - 0.5).abs() < 1e-12);
	}

	#[test]
	fn s_curve_has_horizontal_tangents() {
		let d = s_curve(Point::new(0.0, 0.0), Point::new(100.0, 40.0));
		assert_eq!(d, "M 0.00 0.00 C 50.00 0.00, 50.00 40.00, 100.00 40.00");
	}

	#[test]
	fn parallel_offsets_are_symmetric() {
		let [a, b] = parallel_segments(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 3.0);
		assert_eq!(a.0, Point::new(0.0, 1.5));
		assert_eq!(b.0, Point::new(0.0, -1.5));
	}
}
