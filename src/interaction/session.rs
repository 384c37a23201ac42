//! Hover/pin state machine for the tooltip.
//!
//! The session never touches the document. Every event returns the
//! [`Effect`]s the caller has to apply, in order.

use std::collections::BTreeSet;

use log::debug;

use crate::data::{TooltipTable, highlight_set};
use crate::diagram::geometry::Point;

use super::target::{HoverTarget, apply_override, resolve_target};
use super::tooltip::{TooltipTheme, theme, tooltip_html};

/// Window after a pin during which outside clicks are ignored, so the click
/// that pinned does not also dismiss when it bubbles to the document.
pub const PIN_SUPPRESSION_MS: f64 = 10.0;

/// A change the DOM layer must make.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
	/// Fill, theme and show the panel next to `pointer` (client coordinates).
	ShowTooltip {
		html: String,
		theme: TooltipTheme,
		pointer: Point,
	},
	MoveTooltip {
		pointer: Point,
	},
	/// Set the panel's opacity to 0.
	HideTooltip,
	/// Whether the panel accepts pointer events (links in pinned tooltips).
	SetPinned(bool),
	Highlight(Vec<String>),
	Unhighlight(Vec<String>),
}

/// Interaction state owned by the diagram controller.
#[derive(Debug)]
pub struct InteractionSession<'t> {
	tooltips: &'t TooltipTable,
	current: Option<HoverTarget>,
	highlighted: BTreeSet<String>,
	sticky: bool,
	pinned: Option<String>,
	just_pinned_until: f64,
}

impl<'t> InteractionSession<'t> {
	/// Idle session reading content from `tooltips`.
	pub fn new(tooltips: &'t TooltipTable) -> Self {
		Self {
			tooltips,
			current: None,
			highlighted: BTreeSet::new(),
			sticky: false,
			pinned: None,
			just_pinned_until: f64::NEG_INFINITY,
		}
	}

	/// Whether a tooltip is pinned.
	pub fn is_sticky(&self) -> bool {
		self.sticky
	}

	/// Id of the pinned target.
	pub fn pinned(&self) -> Option<&str> {
		self.pinned.as_deref()
	}

	/// Target whose tooltip is showing.
	pub fn current(&self) -> Option<&HoverTarget> {
		self.current.as_ref()
	}

	/// Ids currently lit.
	pub fn highlighted(&self) -> &BTreeSet<String> {
		&self.highlighted
	}

	/// Pointer entered a tagged element. `hit_stack` lists every tagged id
	/// under the pointer, topmost first.
	pub fn hover(&mut self, raw_id: &str, hit_stack: &[&str], pointer: Point) -> Vec<Effect> {
		if self.sticky {
			return Vec::new();
		}
		let target = resolve_target(apply_override(raw_id, hit_stack));
		if self.current.as_ref() == Some(&target) {
			return vec![Effect::MoveTooltip { pointer }];
		}
		debug!("Hover {raw_id} -> {}", target.id);
		self.focus(target, pointer)
	}

	/// Pointer moved within the current target.
	pub fn pointer_move(&mut self, pointer: Point) -> Vec<Effect> {
		if self.sticky || self.current.is_none() {
			return Vec::new();
		}
		vec![Effect::MoveTooltip { pointer }]
	}

	/// Pointer left the tagged element (or the container).
	pub fn leave(&mut self) -> Vec<Effect> {
		if self.sticky || self.current.is_none() {
			return Vec::new();
		}
		self.current = None;
		let mut effects = vec![Effect::HideTooltip];
		effects.extend(self.clear_highlights());
		effects
	}

	/// Click on a tagged element: pin there, or unpin if it is already pinned.
	pub fn click(&mut self, raw_id: &str, hit_stack: &[&str], pointer: Point, now_ms: f64) -> Vec<Effect> {
		let target = resolve_target(apply_override(raw_id, hit_stack));
		if self.sticky && self.pinned.as_deref() == Some(target.id.as_str()) {
			debug!("Unpin {}", target.id);
			return self.dismiss();
		}

		let mut effects = if self.current.as_ref() == Some(&target) {
			Vec::new()
		} else {
			self.focus(target.clone(), pointer)
		};
		debug!("Pin {}", target.id);
		self.sticky = true;
		self.pinned = Some(target.id);
		self.just_pinned_until = now_ms + PIN_SUPPRESSION_MS;
		effects.push(Effect::SetPinned(true));
		effects
	}

	/// Click anywhere that is not a tagged element or the panel.
	pub fn outside_click(&mut self, now_ms: f64) -> Vec<Effect> {
		if !self.sticky || now_ms < self.just_pinned_until {
			return Vec::new();
		}
		self.dismiss()
	}

	fn dismiss(&mut self) -> Vec<Effect> {
		self.sticky = false;
		self.pinned = None;
		self.current = None;
		let mut effects = vec![Effect::SetPinned(false), Effect::HideTooltip];
		effects.extend(self.clear_highlights());
		effects
	}

	/// Switch highlight and tooltip to `target`.
	fn focus(&mut self, target: HoverTarget, pointer: Point) -> Vec<Effect> {
		let mut effects: Vec<Effect> = self.clear_highlights().into_iter().collect();

		let lit = highlight_set(&target.id);
		effects.push(Effect::Highlight(lit.iter().cloned().collect()));
		self.highlighted = lit;

		effects.push(match self.tooltips.get(&target.id) {
			Some(content) => Effect::ShowTooltip {
				html: tooltip_html(content),
				theme: theme(content, target.yellow),
				pointer,
			},
			None => Effect::HideTooltip,
		});
		self.current = Some(target);
		effects
	}

	fn clear_highlights(&mut self) -> Option<Effect> {
		if self.highlighted.is_empty() {
			return None;
		}
		let ids = std::mem::take(&mut self.highlighted).into_iter().collect();
		Some(Effect::Unhighlight(ids))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::TooltipContent;

	fn table() -> TooltipTable {
		[
			("dot-3", "Dot three"),
			("npp-box", "NPP"),
			("osko-to-adi-line", "Osko"),
		]
		.into_iter()
		.map(|(id, title)| {
			(
				id.to_string(),
				TooltipContent {
					title: title.to_string(),
					..TooltipContent::default()
				},
			)
		})
		.collect()
	}

	const P: Point = Point::new(10.0, 10.0);

	#[test]
	fn missing_content_hides() {
		let t = table();
		let mut s = InteractionSession::new(&t);
		let effects = s.hover("nothing-here", &[], P);
		assert!(effects.contains(&Effect::HideTooltip));
		assert!(!effects.iter().any(|e| matches!(e, Effect::ShowTooltip { .. })));
	}

	#[test]
	fn yellow_dot_shows_base_dot_content() {
		let t = table();
		let mut s = InteractionSession::new(&t);
		let effects = s.hover("yellow-dot-3", &[], P);
		let shown = effects.iter().find_map(|e| match e {
			Effect::ShowTooltip { html, theme, .. } => Some((html.clone(), theme.border.clone())),
			_ => None,
		});
		let (html, border) = shown.unwrap();
		assert!(html.contains("Dot three"));
		assert_eq!(border, "#f59e0b");
		assert_eq!(s.current().unwrap().id, "dot-3");
	}

	#[test]
	fn hover_highlights_related() {
		let t = table();
		let mut s = InteractionSession::new(&t);
		s.hover("npp-box", &[], P);
		assert!(s.highlighted().contains("npp-box"));
		assert!(s.highlighted().contains("osko-box"));
		let effects = s.leave();
		assert_eq!(effects[0], Effect::HideTooltip);
		assert!(matches!(&effects[1], Effect::Unhighlight(ids) if ids.contains(&"osko-box".to_string())));
		assert!(s.highlighted().is_empty());
	}

	#[test]
	fn second_click_unpins_and_clears() {
		let t = table();
		let mut s = InteractionSession::new(&t);
		s.hover("npp-box", &[], P);
		s.click("npp-box", &[], P, 0.0);
		assert!(s.is_sticky());
		assert_eq!(s.pinned(), Some("npp-box"));
		assert!(!s.highlighted().is_empty());

		// Pinned: hover elsewhere and leave are ignored.
		assert!(s.hover("dot-3", &[], P).is_empty());
		assert!(s.leave().is_empty());

		let effects = s.click("npp-box", &[], P, 100.0);
		assert!(!s.is_sticky());
		assert_eq!(s.pinned(), None);
		assert!(s.highlighted().is_empty());
		assert!(effects.contains(&Effect::HideTooltip));
		assert!(effects.iter().any(|e| matches!(e, Effect::Unhighlight(_))));
	}

	#[test]
	fn clicking_another_target_repins() {
		let t = table();
		let mut s = InteractionSession::new(&t);
		s.click("npp-box", &[], P, 0.0);
		let effects = s.click("dot-3", &[], P, 50.0);
		assert_eq!(s.pinned(), Some("dot-3"));
		assert!(effects.iter().any(|e| matches!(e, Effect::ShowTooltip { .. })));
		assert!(!s.highlighted().contains("npp-box"));
	}

	#[test]
	fn outside_click_respects_pin_window() {
		let t = table();
		let mut s = InteractionSession::new(&t);
		s.click("npp-box", &[], P, 1000.0);
		assert!(s.outside_click(1005.0).is_empty());
		assert!(s.is_sticky());
		let effects = s.outside_click(1011.0);
		assert!(!s.is_sticky());
		assert!(effects.contains(&Effect::HideTooltip));
		assert!(s.highlighted().is_empty());
		assert!(s.outside_click(2000.0).is_empty());
	}

	#[test]
	fn override_redirects_to_sibling() {
		let t = table();
		let mut s = InteractionSession::new(&t);
		s.hover("npp-to-adi-line", &["npp-to-adi-line", "osko-to-adi-line"], P);
		assert_eq!(s.current().unwrap().id, "osko-to-adi-line");
	}

	#[test]
	fn move_only_follows_when_unpinned() {
		let t = table();
		let mut s = InteractionSession::new(&t);
		assert!(s.pointer_move(P).is_empty());
		s.hover("dot-3", &[], P);
		assert_eq!(s.pointer_move(P), vec![Effect::MoveTooltip { pointer: P }]);
		s.click("dot-3", &[], P, 0.0);
		assert!(s.pointer_move(P).is_empty());
	}
}
