//! Layout constants supplied by the page through the `#params` dataset.

use log::warn;

/// Id of the element whose `data-*` attributes carry the layout constants.
pub const PARAMS_ELEMENT_ID: &str = "params";

/// Numeric inputs to the layout pass.
///
/// Field names follow the dataset keys (`data-cy-big` -> `cyBig`).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	/// Shared x of the two hub circles.
	pub cx: f64,
	/// Centre y of the RITS hub.
	pub cy_big: f64,
	/// RITS hub radius.
	pub r_big: f64,
	/// Extra clearance between the two hubs' edges.
	pub gap: f64,
	/// FSS hub radius before the 0.9 visual reduction.
	pub r_small: f64,
	/// Base radius of the dot arc before extension.
	pub arc_r: f64,
	/// Maximum swept angle of the dot arc, in degrees.
	pub arc_angle_deg: f64,
	/// Rotation of the dot arc around its centre, in degrees.
	pub arc_offset_deg: f64,
	/// Hub ring stroke width.
	pub stroke_width: f64,
	/// Horizontal shift applied to the whole drawing.
	pub offset_x: f64,
	/// Vertical shift applied to the whole drawing.
	pub offset_y: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			cx: 300.0,
			cy_big: 450.0,
			r_big: 113.0,
			gap: 0.0,
			r_small: 70.0,
			arc_r: 320.0,
			arc_angle_deg: 220.0,
			arc_offset_deg: 0.0,
			stroke_width: 8.0,
			offset_x: 0.0,
			offset_y: 0.0,
		}
	}
}

impl LayoutParams {
	/// Build params from dataset key/value pairs, keeping defaults for anything
	/// missing, unknown or not a finite number.
	pub fn from_pairs<'a, I>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let mut params = Self::default();
		for (key, raw) in pairs {
			let Some(slot) = params.slot_mut(key) else {
				continue;
			};
			match raw.trim().parse::<f64>() {
				Ok(value) if value.is_finite() => *slot = value,
				_ => warn!("Ignoring layout param {key}={raw:?}: not a finite number"),
			}
		}
		params
	}

	fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
		Some(match key {
			"cx" => &mut self.cx,
			"cyBig" => &mut self.cy_big,
			"rBig" => &mut self.r_big,
			"gap" => &mut self.gap,
			"rSmall" => &mut self.r_small,
			"arcR" => &mut self.arc_r,
			"arcAngleDeg" => &mut self.arc_angle_deg,
			"arcOffsetDeg" => &mut self.arc_offset_deg,
			"strokeWidth" => &mut self.stroke_width,
			"offsetX" => &mut self.offset_x,
			"offsetY" => &mut self.offset_y,
			_ => return None,
		})
	}

	/// Read the `#params` element of the current document. Falls back to
	/// defaults when there is no window, document or element.
	pub fn from_document() -> Self {
		let Some(el) = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(PARAMS_ELEMENT_ID))
		else {
			return Self::default();
		};
		const KEYS: [(&str, &str); 11] = [
			("cx", "data-cx"),
			("cyBig", "data-cy-big"),
			("rBig", "data-r-big"),
			("gap", "data-gap"),
			("rSmall", "data-r-small"),
			("arcR", "data-arc-r"),
			("arcAngleDeg", "data-arc-angle-deg"),
			("arcOffsetDeg", "data-arc-offset-deg"),
			("strokeWidth", "data-stroke-width"),
			("offsetX", "data-offset-x"),
			("offsetY", "data-offset-y"),
		];
		let values: Vec<(&str, String)> = KEYS
			.iter()
			.filter_map(|&(key, attr)| el.get_attribute(attr).map(|v| (key, v)))
			.collect();
		Self::from_pairs(values.iter().map(|(k, v)| (*k, v.as_str())))
	}

	/// Radius of the FSS hub as drawn.
	pub fn drawn_r_small(&self) -> f64 {
		self.r_small * 0.9
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_dataset_gives_defaults() {
		assert_eq!(LayoutParams::from_pairs([]), LayoutParams::default());
	}

	#[test]
	fn parses_known_keys() {
		let p = LayoutParams::from_pairs([("cx", "320"), ("cyBig", " 470.5 "), ("strokeWidth", "6")]);
		assert_eq!(p.cx, 320.0);
		assert_eq!(p.cy_big, 470.5);
		assert_eq!(p.stroke_width, 6.0);
		assert_eq!(p.r_big, LayoutParams::default().r_big);
	}

	#[test]
	fn bad_values_keep_defaults() {
		let p = LayoutParams::from_pairs([("rBig", "wide"), ("arcR", "NaN"), ("gap", "inf"), ("colour", "3")]);
		assert_eq!(p, LayoutParams::default());
	}
}
