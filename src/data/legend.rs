//! Line styles used across the diagram, grouped for the legend panel.

/// How a connection is stroked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
	Solid,
	/// Two parallel strokes.
	Double,
	Dotted,
	Dashed,
}

impl LineStyle {
	/// `stroke-dasharray` value, if the style needs one.
	pub fn dasharray(self) -> Option<&'static str> {
		match self {
			Self::Dotted => Some("5,5"),
			Self::Dashed => Some("10,5"),
			Self::Solid | Self::Double => None,
		}
	}
}

/// One legend swatch.
#[derive(Clone, Copy, Debug)]
pub struct LegendLine {
	pub color: &'static str,
	pub width: f64,
	pub style: LineStyle,
	pub name: &'static str,
	/// Hover text for the swatch; empty for none.
	pub description: &'static str,
}

/// The four fixed legend sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendCategory {
	Settlement,
	Clearing,
	RetailSchemes,
	PropertyAndOther,
}

impl LegendCategory {
	pub const ALL: [Self; 4] = [
		Self::Settlement,
		Self::Clearing,
		Self::RetailSchemes,
		Self::PropertyAndOther,
	];

	pub fn title(self) -> &'static str {
		match self {
			Self::Settlement => "Settlement links",
			Self::Clearing => "Clearing streams",
			Self::RetailSchemes => "Retail schemes",
			Self::PropertyAndOther => "Property & other",
		}
	}

	pub fn lines(self) -> &'static [LegendLine] {
		match self {
			Self::Settlement => SETTLEMENT,
			Self::Clearing => CLEARING,
			Self::RetailSchemes => RETAIL,
			Self::PropertyAndOther => PROPERTY_AND_OTHER,
		}
	}
}

const fn line(
	color: &'static str,
	width: f64,
	style: LineStyle,
	name: &'static str,
	description: &'static str,
) -> LegendLine {
	LegendLine {
		color,
		width,
		style,
		name,
		description,
	}
}

use LineStyle::{Dotted, Double, Solid};

const SETTLEMENT: &[LegendLine] = &[
	line("#0a4f8f", 4.0, Solid, "ASX to ADI", ""),
	line("#3da88a", 6.0, Solid, "SWIFT to RITS", ""),
	line("#7FFF00", 6.0, Solid, "CLS AUD", ""),
	line("#0a4f8f", 4.0, Dotted, "Dotted Connection", ""),
	line("#DC143C", 3.0, Solid, "Critical Path", ""),
	line("#968F7F", 1.5, Double, "LVSS", ""),
];

const CLEARING: &[LegendLine] = &[
	line("#800000", 1.5, Double, "Direct Entry to ADI", ""),
	line("#2d5016", 1.5, Double, "NPP to ADI", ""),
	line("#8B0000", 2.0, Double, "BECN/BECG to BECS", ""),
	line("#808080", 3.0, Solid, "Grey ADI Line", ""),
	line("#8B1538", 3.0, Solid, "International Banks", ""),
];

const RETAIL: &[LegendLine] = &[
	line("rgb(100,80,180)", 6.0, Solid, "BPAY", ""),
	line("rgb(100,80,180)", 2.0, Solid, "Osko", ""),
	line("rgb(100,80,180)", 2.0, Solid, "Eftpos", ""),
	line("rgb(216,46,43)", 2.0, Solid, "Mastercard", ""),
	line("#27AEE3", 1.0, Double, "Visa/Other Cards", ""),
	line("#FFA500", 2.0, Solid, "ATMs", ""),
	line("#008000", 1.2, Solid, "Claims", ""),
	line("#412e29", 1.2, Solid, "Other Networks", ""),
];

const PROPERTY_AND_OTHER: &[LegendLine] = &[
	line("#B91199", 3.0, Solid, "Sympli", ""),
	line("#B91199", 3.0, Solid, "PEXA", ""),
];

/// Stroke segments for a swatch inside a `width x 30` box: one segment for
/// single styles, two offset by `gap` above and below the centre for double.
pub fn swatch_segments(line: &LegendLine, width: f64) -> Vec<(f64, f64, f64, f64)> {
	const CENTRE: f64 = 15.0;
	const GAP: f64 = 1.5;
	match line.style {
		LineStyle::Double => vec![
			(10.0, CENTRE - GAP, width - 10.0, CENTRE - GAP),
			(10.0, CENTRE + GAP, width - 10.0, CENTRE + GAP),
		],
		_ => vec![(10.0, CENTRE, width * 0.45, CENTRE)],
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn all_lines() -> impl Iterator<Item = &'static LegendLine> {
		LegendCategory::ALL.into_iter().flat_map(|c| c.lines().iter())
	}

	#[test]
	fn four_categories_cover_every_line() {
		assert_eq!(LegendCategory::ALL.len(), 4);
		assert_eq!(all_lines().count(), 21);
		assert!(LegendCategory::ALL.iter().all(|c| !c.lines().is_empty()));
	}

	#[test]
	fn double_has_two_strokes() {
		let lvss = all_lines().find(|l| l.name == "LVSS").unwrap();
		let segs = swatch_segments(lvss, 200.0);
		assert_eq!(segs, vec![(10.0, 13.5, 190.0, 13.5), (10.0, 16.5, 190.0, 16.5)]);
		let bpay = all_lines().find(|l| l.name == "BPAY").unwrap();
		assert_eq!(swatch_segments(bpay, 200.0).len(), 1);
	}

	#[test]
	fn swatches_have_names_only() {
		assert!(all_lines().all(|l| !l.name.is_empty() && l.description.is_empty()));
	}

	#[test]
	fn dash_patterns() {
		assert_eq!(LineStyle::Dotted.dasharray(), Some("5,5"));
		assert_eq!(LineStyle::Dashed.dasharray(), Some("10,5"));
		assert_eq!(LineStyle::Double.dasharray(), None);
	}
}
