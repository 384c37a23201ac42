//! Nearest-dot hover for the small arc dots.

use crate::data::relationships::box_members;
use crate::diagram::geometry::{Point, Rect};
use crate::diagram::{DotPosition, Scene};

/// Extra reach around a dot's drawn radius.
pub const HOVER_MARGIN: f64 = 4.0;

/// Dot positions captured once after layout.
#[derive(Clone, Debug, Default)]
pub struct DotIndex {
	dots: Vec<DotPosition>,
}

impl DotIndex {
	/// Capture the dot positions of a finished layout.
	pub fn from_scene(scene: &Scene) -> Self {
		Self {
			dots: scene.dots.clone(),
		}
	}

	/// Number of indexed dots.
	pub fn len(&self) -> usize {
		self.dots.len()
	}

	/// Whether no dots are indexed.
	pub fn is_empty(&self) -> bool {
		self.dots.is_empty()
	}

	/// Index of the closest dot whose edge is within `margin` of `p`.
	pub fn nearest(&self, p: Point, margin: f64) -> Option<usize> {
		self.dots
			.iter()
			.map(|d| (d, d.center.distance(p)))
			.filter(|(d, dist)| *dist <= d.r + margin)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(d, _)| d.index)
	}
}

/// Whether `id` is a group box drawn behind a run of dots. Pointer events
/// over the gaps between dots land on these.
pub fn is_dot_area(id: &str) -> bool {
	box_members(id).is_some()
}

/// Hover id for a pointer given the tagged element under it and the nearest
/// dot in reach. A nearby dot beats a group box; any other direct hit wins.
pub fn pick_hover_id(direct: Option<&str>, near_dot: Option<usize>) -> Option<String> {
	match direct {
		Some(id) if !is_dot_area(id) => Some(id.to_string()),
		_ => near_dot.map(|i| format!("dot-{i}")).or_else(|| direct.map(str::to_string)),
	}
}

/// Convert a client-space pointer position to scene coordinates, given the
/// rendered box of the `<svg>` element and its view box. `None` outside the box.
pub fn client_to_scene(client: Point, rendered: &Rect, view_box: &Rect) -> Option<Point> {
	if rendered.width <= 0.0 || rendered.height <= 0.0 || !rendered.contains(client) {
		return None;
	}
	Some(Point::new(
		view_box.x + (client.x - rendered.x) * view_box.width / rendered.width,
		view_box.y + (client.y - rendered.y) * view_box.height / rendered.height,
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::LayoutParams;
	use crate::diagram::build_scene;

	#[test]
	fn nearest_within_margin() {
		let scene = build_scene(&LayoutParams::default());
		let index = DotIndex::from_scene(&scene);
		assert_eq!(index.len(), 100);
		let d = scene.dot(30).unwrap();
		let near = Point::new(d.center.x + 1.0, d.center.y);
		assert_eq!(index.nearest(near, HOVER_MARGIN), Some(30));
		let far = Point::new(d.center.x + d.r + 50.0, d.center.y);
		assert_eq!(index.nearest(far, HOVER_MARGIN), None);
	}

	#[test]
	fn near_miss_inside_box_picks_dot() {
		let scene = build_scene(&LayoutParams::default());
		let index = DotIndex::from_scene(&scene);
		let d = scene.dot(30).unwrap();
		let p = Point::new(d.center.x + d.r + 2.0, d.center.y);
		let near = index.nearest(p, HOVER_MARGIN);
		assert!(near.is_some());

		let background = scene.find("blue-dots-background").unwrap().bounds().unwrap();
		assert!(background.contains(p));
		assert_eq!(
			pick_hover_id(Some("blue-dots-background"), near),
			near.map(|i| format!("dot-{i}"))
		);
		assert_eq!(pick_hover_id(Some("adi-box"), Some(30)).as_deref(), Some("dot-30"));
	}

	#[test]
	fn direct_hits_outside_boxes_win() {
		assert_eq!(pick_hover_id(Some("yellow-dot-3"), Some(4)).as_deref(), Some("yellow-dot-3"));
		assert_eq!(pick_hover_id(Some("dot-5"), Some(6)).as_deref(), Some("dot-5"));
		assert_eq!(pick_hover_id(Some("blue-line-7"), Some(7)).as_deref(), Some("blue-line-7"));
		assert_eq!(pick_hover_id(Some("psps-box"), None).as_deref(), Some("psps-box"));
		assert_eq!(pick_hover_id(None, Some(12)).as_deref(), Some("dot-12"));
		assert_eq!(pick_hover_id(None, None), None);
	}

	#[test]
	fn client_mapping_scales() {
		let rendered = Rect::new(10.0, 20.0, 500.0, 250.0);
		let vb = Rect::new(-100.0, 0.0, 1000.0, 500.0);
		assert_eq!(client_to_scene(Point::new(260.0, 145.0), &rendered, &vb), Some(Point::new(400.0, 250.0)));
		assert_eq!(client_to_scene(Point::new(0.0, 0.0), &Rect::default(), &vb), None);
		assert_eq!(client_to_scene(Point::new(600.0, 145.0), &rendered, &vb), None);
	}
}
