//! Additive highlight styling with exact restore.

use std::collections::BTreeMap;

/// How an element is emphasised, by SVG tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightKind {
	Shape,
	Line,
	Text,
	Group,
}

impl HighlightKind {
	pub fn from_tag(tag: &str) -> Self {
		match tag.to_ascii_lowercase().as_str() {
			"line" | "polyline" => Self::Line,
			"text" | "tspan" => Self::Text,
			"g" => Self::Group,
			_ => Self::Shape,
		}
	}
}

/// The inline style properties a highlight touches. `None` means the
/// property was not set inline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
	pub opacity: Option<String>,
	pub filter: Option<String>,
	pub stroke_width: Option<String>,
}

const SHAPE_FILTER: &str = "brightness(1.4) drop-shadow(0 0 8px rgba(255,255,255,0.6))";
const LINE_FILTER: &str =
	"brightness(1.8) drop-shadow(0 0 8px rgba(255,255,255,0.9)) drop-shadow(0 0 4px rgba(255,255,255,0.9))";
const TEXT_FILTER: &str = "drop-shadow(0 0 3px rgba(255,255,255,0.8))";
const LINE_WIDTH_FACTOR: f64 = 2.5;

/// Access to element styles, implemented over the DOM in the browser and
/// over a map in tests.
pub trait StyleHost {
	/// Tag-derived kind, `None` when no element has `id`.
	fn kind(&self, id: &str) -> Option<HighlightKind>;
	fn inline_style(&self, id: &str) -> InlineStyle;
	fn set_inline_style(&mut self, id: &str, style: &InlineStyle);
	/// Effective stroke width before highlighting.
	fn stroke_width(&self, id: &str) -> Option<f64>;
}

/// The style a highlighted element gets.
pub fn highlighted(kind: HighlightKind, stroke_width: Option<f64>) -> InlineStyle {
	match kind {
		HighlightKind::Shape | HighlightKind::Group => InlineStyle {
			opacity: Some("1".to_string()),
			filter: Some(SHAPE_FILTER.to_string()),
			stroke_width: None,
		},
		HighlightKind::Line => InlineStyle {
			opacity: Some("1".to_string()),
			filter: Some(LINE_FILTER.to_string()),
			stroke_width: Some(format!("{}", stroke_width.unwrap_or(1.0) * LINE_WIDTH_FACTOR)),
		},
		HighlightKind::Text => InlineStyle {
			opacity: None,
			filter: Some(TEXT_FILTER.to_string()),
			stroke_width: None,
		},
	}
}

/// Tracks which elements are lit and what their inline style was before.
#[derive(Debug, Default)]
pub struct Highlighter {
	saved: BTreeMap<String, InlineStyle>,
}

impl Highlighter {
	/// Light `id`. Returns false when the element is missing or already lit.
	pub fn highlight(&mut self, host: &mut impl StyleHost, id: &str) -> bool {
		if self.saved.contains_key(id) {
			return false;
		}
		let Some(kind) = host.kind(id) else {
			return false;
		};
		let before = host.inline_style(id);
		let mut lit = highlighted(kind, host.stroke_width(id));
		// Untouched properties keep their previous inline value.
		if lit.opacity.is_none() {
			lit.opacity = before.opacity.clone();
		}
		if lit.stroke_width.is_none() {
			lit.stroke_width = before.stroke_width.clone();
		}
		host.set_inline_style(id, &lit);
		self.saved.insert(id.to_string(), before);
		true
	}

	/// Put back exactly what `highlight` found.
	pub fn unhighlight(&mut self, host: &mut impl StyleHost, id: &str) -> bool {
		match self.saved.remove(id) {
			Some(before) => {
				host.set_inline_style(id, &before);
				true
			}
			None => false,
		}
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use std::collections::HashMap;

	/// In-memory element table standing in for the document.
	#[derive(Default)]
	pub(crate) struct FakeHost {
		pub elements: HashMap<String, (HighlightKind, InlineStyle, Option<f64>)>,
	}

	impl FakeHost {
		pub(crate) fn with(mut self, id: &str, kind: HighlightKind, style: InlineStyle, width: Option<f64>) -> Self {
			self.elements.insert(id.to_string(), (kind, style, width));
			self
		}

		pub(crate) fn style(&self, id: &str) -> InlineStyle {
			self.elements[id].1.clone()
		}
	}

	impl StyleHost for FakeHost {
		fn kind(&self, id: &str) -> Option<HighlightKind> {
			self.elements.get(id).map(|e| e.0)
		}

		fn inline_style(&self, id: &str) -> InlineStyle {
			self.elements.get(id).map(|e| e.1.clone()).unwrap_or_default()
		}

		fn set_inline_style(&mut self, id: &str, style: &InlineStyle) {
			if let Some(e) = self.elements.get_mut(id) {
				e.1 = style.clone();
			}
		}

		fn stroke_width(&self, id: &str) -> Option<f64> {
			self.elements.get(id).and_then(|e| e.2)
		}
	}

	#[test]
	fn tags_map_to_kinds() {
		assert_eq!(HighlightKind::from_tag("circle"), HighlightKind::Shape);
		assert_eq!(HighlightKind::from_tag("LINE"), HighlightKind::Line);
		assert_eq!(HighlightKind::from_tag("text"), HighlightKind::Text);
		assert_eq!(HighlightKind::from_tag("g"), HighlightKind::Group);
	}

	#[test]
	fn line_widens_and_restores() {
		let prior = InlineStyle {
			opacity: Some("0.4".into()),
			filter: None,
			stroke_width: None,
		};
		let mut host = FakeHost::default().with("l", HighlightKind::Line, prior.clone(), Some(2.0));
		let mut hl = Highlighter::default();
		assert!(hl.highlight(&mut host, "l"));
		let lit = host.style("l");
		assert_eq!(lit.stroke_width.as_deref(), Some("5"));
		assert_eq!(lit.opacity.as_deref(), Some("1"));
		assert!(lit.filter.unwrap().starts_with("brightness(1.8)"));
		assert!(hl.unhighlight(&mut host, "l"));
		assert_eq!(host.style("l"), prior);
	}

	#[test]
	fn double_highlight_keeps_original() {
		let prior = InlineStyle {
			filter: Some("blur(1px)".into()),
			..InlineStyle::default()
		};
		let mut host = FakeHost::default().with("c", HighlightKind::Shape, prior.clone(), None);
		let mut hl = Highlighter::default();
		assert!(hl.highlight(&mut host, "c"));
		assert!(!hl.highlight(&mut host, "c"));
		assert!(hl.unhighlight(&mut host, "c"));
		assert_eq!(host.style("c"), prior);
		assert!(!hl.unhighlight(&mut host, "c"));
	}

	#[test]
	fn text_keeps_opacity() {
		let prior = InlineStyle {
			opacity: Some("0.7".into()),
			..InlineStyle::default()
		};
		let mut host = FakeHost::default().with("t", HighlightKind::Text, prior, None);
		let mut hl = Highlighter::default();
		hl.highlight(&mut host, "t");
		assert_eq!(host.style("t").opacity.as_deref(), Some("0.7"));
		assert!(!hl.highlight(&mut host, "missing"));
	}
}
