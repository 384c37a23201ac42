//! Hex colour helpers used for tooltip panels and highlight tints.

use crate::error::{DiagramError, Result};

/// Alpha used by the tinted tooltip backgrounds.
pub const PANEL_ALPHA: f64 = 0.94;

/// An opaque 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	fn map(self, f: impl Fn(f64) -> f64) -> Self {
		let channel = |c: u8| f(c as f64).clamp(0.0, 255.0) as u8;
		Self {
			r: channel(self.r),
			g: channel(self.g),
			b: channel(self.b),
		}
	}

	/// `rgba(r,g,b,a)` with no spaces, the form the tooltip styles use.
	pub fn rgba(self, alpha: f64) -> String {
		format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
	}
}

/// Parse `#rrggbb` or the `#rgb` shorthand. The leading `#` is optional.
pub fn parse_hex(input: &str) -> Result<Rgb> {
	let invalid = || DiagramError::InvalidColor {
		input: input.to_string(),
	};
	let hex = input.trim().trim_start_matches('#');
	if !hex.is_ascii() {
		return Err(invalid());
	}
	let expanded: String = match hex.len() {
		3 => hex.chars().flat_map(|c| [c, c]).collect(),
		6 => hex.to_string(),
		_ => return Err(invalid()),
	};
	let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
	Ok(Rgb {
		r: channel(0)?,
		g: channel(2)?,
		b: channel(4)?,
	})
}

/// Scale every channel by `factor` (truncating), at panel alpha.
pub fn darken_color(hex: &str, factor: f64) -> Result<String> {
	Ok(parse_hex(hex)?.map(|c| (c * factor).floor()).rgba(PANEL_ALPHA))
}

/// Move every channel `amount` of the way towards white (rounding), at panel alpha.
pub fn lighten_color(hex: &str, amount: f64) -> Result<String> {
	Ok(parse_hex(hex)?
		.map(|c| (c + (255.0 - c) * amount).round())
		.rgba(PANEL_ALPHA))
}

/// Same colour with an explicit alpha.
pub fn add_alpha(hex: &str, alpha: f64) -> Result<String> {
	Ok(parse_hex(hex)?.rgba(alpha))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn darken_white() {
		assert_eq!(darken_color("#ffffff", 0.3).unwrap(), "rgba(76,76,76,0.94)");
	}

	#[test]
	fn lighten_black() {
		assert_eq!(
			lighten_color("#000000", 0.7).unwrap(),
			"rgba(179,179,179,0.94)"
		);
	}

	#[test]
	fn alpha_is_passed_through() {
		assert_eq!(add_alpha("#112233", 0.5).unwrap(), "rgba(17,34,51,0.5)");
	}

	#[test]
	fn shorthand_expands() {
		assert_eq!(
			parse_hex("#f80").unwrap(),
			Rgb {
				r: 0xff,
				g: 0x88,
				b: 0x00
			}
		);
	}

	#[test]
	fn rejects_garbage() {
		assert!(matches!(
			parse_hex("#12345"),
			Err(DiagramError::InvalidColor { .. })
		));
		assert!(parse_hex("#gggggg").is_err());
	}
}
