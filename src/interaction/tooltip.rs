//! Tooltip panel markup, colours and placement.

use log::warn;

use crate::color::{add_alpha, darken_color, lighten_color};
use crate::data::TooltipContent;
use crate::diagram::geometry::Point;
use crate::diagram::svg::escape;

/// Id of the floating panel element.
pub const TOOLTIP_ID: &str = "diagram-tooltip";
/// Gap between the pointer and the panel corner.
pub const POINTER_OFFSET: f64 = 15.0;
pub const PANEL_WIDTH: f64 = 210.0;
pub const PANEL_BACKGROUND: &str = "rgba(12,12,12,0.94)";
const DEFAULT_BORDER: &str = "rgba(255,255,255,0.25)";
const YELLOW_BORDER: &str = "#f59e0b";

const TITLE_MAX: usize = 70;
const SUBTITLE_MAX: usize = 90;
const DESCRIPTION_MAX: usize = 170;
const DETAIL_MAX: usize = 110;
const DETAILS_SHOWN: usize = 3;
const HOURS_MAX: usize = 80;

/// Cut to `max` characters, the last one replaced by an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
	if text.chars().count() <= max {
		return text.to_string();
	}
	let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
	out.push('…');
	out
}

/// Inner HTML of the panel.
pub fn tooltip_html(content: &TooltipContent) -> String {
	let mut html = format!(
		"<div class=\"tt-title\">{}</div>",
		escape(&truncate(&content.title, TITLE_MAX))
	);
	if let Some(subtitle) = &content.subtitle {
		html.push_str(&format!(
			"<div class=\"tt-subtitle\">{}</div>",
			escape(&truncate(subtitle, SUBTITLE_MAX))
		));
	}
	if let Some(description) = &content.description {
		html.push_str(&format!(
			"<div class=\"tt-description\">{}</div>",
			escape(&truncate(description, DESCRIPTION_MAX))
		));
	}
	if !content.details.is_empty() {
		html.push_str("<ul class=\"tt-details\">");
		for detail in content.details.iter().take(DETAILS_SHOWN) {
			html.push_str(&format!("<li>{}</li>", escape(&truncate(detail, DETAIL_MAX))));
		}
		let hidden = content.details.len().saturating_sub(DETAILS_SHOWN);
		if hidden > 0 {
			html.push_str(&format!("<li class=\"tt-more\">+ {hidden} more</li>"));
		}
		html.push_str("</ul>");
	}
	if let Some(hours) = &content.hours {
		html.push_str(&format!(
			"<div class=\"tt-hours\">⏰ {}</div>",
			escape(&truncate(hours, HOURS_MAX))
		));
	}
	if let Some(link) = &content.link {
		html.push_str(&format!(
			"<a class=\"tt-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Learn more</a>",
			escape(link)
		));
	}
	html
}

/// Panel colours for one tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipTheme {
	pub background: String,
	pub border: String,
	pub title: Option<String>,
	/// `box-shadow` colour around accented panels.
	pub glow: Option<String>,
}

impl Default for TooltipTheme {
	fn default() -> Self {
		Self {
			background: PANEL_BACKGROUND.to_string(),
			border: DEFAULT_BORDER.to_string(),
			title: None,
			glow: None,
		}
	}
}

/// Companion dots get a yellow border; an accent colour tints the panel.
pub fn theme(content: &TooltipContent, yellow: bool) -> TooltipTheme {
	let mut theme = TooltipTheme::default();
	if let Some(accent) = &content.accent {
		let colours = darken_color(accent, 0.3).and_then(|background| {
			Ok((background, lighten_color(accent, 0.7)?, add_alpha(accent, 0.5)?))
		});
		match colours {
			Ok((background, title, glow)) => {
				theme.background = background;
				theme.border = accent.clone();
				theme.title = Some(title);
				theme.glow = Some(glow);
			}
			Err(e) => warn!("Ignoring tooltip accent for {:?}: {e}", content.title),
		}
	}
	if yellow {
		theme.border = YELLOW_BORDER.to_string();
	}
	theme
}

/// Top-left corner of the panel: below-right of the pointer, flipped to the
/// other side on an axis where it would leave the viewport.
pub fn position(pointer: Point, panel: (f64, f64), viewport: (f64, f64)) -> Point {
	let place = |p: f64, size: f64, limit: f64| {
		let forward = p + POINTER_OFFSET;
		if forward + size > limit {
			(p - POINTER_OFFSET - size).max(0.0)
		} else {
			forward
		}
	};
	Point::new(
		place(pointer.x, panel.0, viewport.0),
		place(pointer.y, panel.1, viewport.1),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn content() -> TooltipContent {
		TooltipContent {
			title: "RITS".into(),
			subtitle: Some("Reserve Bank Information & Transfer System".into()),
			details: (1..=5).map(|i| format!("detail {i}")).collect(),
			hours: Some("7:30am - 10pm".into()),
			..TooltipContent::default()
		}
	}

	#[test]
	fn truncation_appends_ellipsis() {
		assert_eq!(truncate("short", 70), "short");
		let long = "x".repeat(75);
		let cut = truncate(&long, 70);
		assert_eq!(cut.chars().count(), 70);
		assert!(cut.ends_with('…'));
	}

	#[test]
	fn html_caps_details() {
		let html = tooltip_html(&content());
		assert_eq!(html.matches("<li>").count(), 3);
		assert!(html.contains("+ 2 more"));
		assert!(html.contains("⏰ 7:30am - 10pm"));
		assert!(html.contains("Information &amp; Transfer"));
		assert!(!html.contains("tt-link"));
	}

	#[test]
	fn flips_at_viewport_edge() {
		let vp = (800.0, 600.0);
		assert_eq!(position(Point::new(100.0, 100.0), (210.0, 120.0), vp), Point::new(115.0, 115.0));
		assert_eq!(position(Point::new(700.0, 550.0), (210.0, 120.0), vp), Point::new(475.0, 415.0));
	}

	#[test]
	fn accent_and_yellow_borders() {
		let plain = theme(&content(), false);
		assert_eq!(plain, TooltipTheme::default());
		let mut accented = content();
		accented.accent = Some("#ffffff".into());
		let t = theme(&accented, false);
		assert_eq!(t.background, "rgba(76,76,76,0.94)");
		assert_eq!(t.border, "#ffffff");
		assert_eq!(t.glow.as_deref(), Some("rgba(255,255,255,0.5)"));
		assert_eq!(theme(&accented, true).border, YELLOW_BORDER);
		accented.accent = Some("not-a-colour".into());
		assert_eq!(theme(&accented, false), TooltipTheme::default());
	}
}
