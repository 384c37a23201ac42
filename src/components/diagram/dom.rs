//! Browser adapters for the interaction layer: element styles, the floating
//! tooltip panel and pointer hit-testing.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, MouseEvent, SvgElement};

use crate::diagram::geometry::{Point, Rect};
use crate::diagram::svg::INTERACTIVE_ATTR;
use crate::error::{DiagramError, Result};
use crate::interaction::tooltip::{PANEL_WIDTH, TOOLTIP_ID, TooltipTheme, position};
use crate::interaction::{Effect, HighlightKind, Highlighter, InlineStyle, StyleHost};

/// Selector matching any tagged diagram element.
pub fn interactive_selector() -> String {
	format!("[{INTERACTIVE_ATTR}]")
}

/// Interactive id of the innermost tagged ancestor of `el` (inclusive).
pub fn interactive_id(el: &Element) -> Option<String> {
	el.closest(&interactive_selector())
		.ok()
		.flatten()
		.and_then(|tagged| tagged.get_attribute(INTERACTIVE_ATTR))
}

/// Tagged ids under a client point, topmost first.
pub fn hit_stack(document: &Document, client: Point) -> Vec<String> {
	document
		.elements_from_point(client.x as f32, client.y as f32)
		.iter()
		.filter_map(|v| v.dyn_into::<Element>().ok())
		.filter_map(|el| el.get_attribute(INTERACTIVE_ATTR))
		.collect()
}

/// A mouse listener on the document, removed again when dropped.
pub struct DocumentListener {
	document: Document,
	event: &'static str,
	callback: Closure<dyn FnMut(MouseEvent)>,
}

impl DocumentListener {
	pub fn attach(document: &Document, event: &'static str, handler: impl FnMut(MouseEvent) + 'static) -> Result<Self> {
		let callback = Closure::<dyn FnMut(MouseEvent)>::new(handler);
		document
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.map_err(|e| DiagramError::js("addEventListener", &e))?;
		Ok(Self {
			document: document.clone(),
			event,
			callback,
		})
	}
}

impl Drop for DocumentListener {
	fn drop(&mut self) {
		let _ = self
			.document
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

pub fn client_rect(el: &Element) -> Rect {
	let r = el.get_bounding_client_rect();
	Rect::new(r.left(), r.top(), r.width(), r.height())
}

fn inline_style_of(el: &Element) -> Option<CssStyleDeclaration> {
	el.dyn_ref::<SvgElement>()
		.map(|svg| svg.style())
		.or_else(|| el.dyn_ref::<HtmlElement>().map(|html| html.style()))
}

fn read_property(style: &CssStyleDeclaration, name: &str) -> Option<String> {
	style
		.get_property_value(name)
		.ok()
		.filter(|v| !v.is_empty())
}

fn write_property(style: &CssStyleDeclaration, name: &str, value: Option<&str>) {
	let _ = match value {
		Some(v) => style.set_property(name, v),
		None => style.remove_property(name).map(|_| ()),
	};
}

/// [`StyleHost`] over the live document.
pub struct DomStyleHost {
	document: Document,
}

impl DomStyleHost {
	pub fn new(document: Document) -> Self {
		Self { document }
	}
}

impl StyleHost for DomStyleHost {
	fn kind(&self, id: &str) -> Option<HighlightKind> {
		self.document
			.get_element_by_id(id)
			.map(|el| HighlightKind::from_tag(&el.tag_name()))
	}

	fn inline_style(&self, id: &str) -> InlineStyle {
		let Some(style) = self.document.get_element_by_id(id).as_ref().and_then(inline_style_of) else {
			return InlineStyle::default();
		};
		InlineStyle {
			opacity: read_property(&style, "opacity"),
			filter: read_property(&style, "filter"),
			stroke_width: read_property(&style, "stroke-width"),
		}
	}

	fn set_inline_style(&mut self, id: &str, value: &InlineStyle) {
		let Some(style) = self.document.get_element_by_id(id).as_ref().and_then(inline_style_of) else {
			return;
		};
		write_property(&style, "opacity", value.opacity.as_deref());
		write_property(&style, "filter", value.filter.as_deref());
		write_property(&style, "stroke-width", value.stroke_width.as_deref());
	}

	fn stroke_width(&self, id: &str) -> Option<f64> {
		self.document
			.get_element_by_id(id)?
			.get_attribute("stroke-width")?
			.parse()
			.ok()
	}
}

/// The `#diagram-tooltip` panel.
pub struct TooltipPanel {
	el: HtmlElement,
}

impl TooltipPanel {
	pub fn find(document: &Document) -> Result<Self> {
		document
			.get_element_by_id(TOOLTIP_ID)
			.and_then(|el| el.dyn_into::<HtmlElement>().ok())
			.map(|el| Self { el })
			.ok_or_else(|| DiagramError::MissingElement { id: TOOLTIP_ID.to_string() })
	}

	pub fn contains(&self, el: &Element) -> bool {
		self.el.contains(Some(el.as_ref()))
	}

	fn set(&self, name: &str, value: &str) {
		let _ = self.el.style().set_property(name, value);
	}

	fn show(&self, html: &str, theme: &TooltipTheme, pointer: Point) {
		self.el.set_inner_html(html);
		self.set("background", &theme.background);
		self.set("border-color", &theme.border);
		match &theme.glow {
			Some(glow) => self.set("box-shadow", &format!("0 0 12px {glow}")),
			None => self.set("box-shadow", "none"),
		}
		if let Some(title) = &theme.title {
			if let Ok(Some(el)) = self.el.query_selector(".tt-title") {
				if let Some(el) = el.dyn_ref::<HtmlElement>() {
					let _ = el.style().set_property("color", title);
				}
			}
		}
		self.move_to(pointer);
		self.set("opacity", "1");
	}

	fn move_to(&self, pointer: Point) {
		let viewport = web_sys::window()
			.and_then(|w| Some((w.inner_width().ok()?.as_f64()?, w.inner_height().ok()?.as_f64()?)))
			.unwrap_or((f64::INFINITY, f64::INFINITY));
		let width = match self.el.offset_width() {
			0 => PANEL_WIDTH,
			w => f64::from(w),
		};
		let at = position(pointer, (width, f64::from(self.el.offset_height())), viewport);
		self.set("left", &format!("{}px", at.x));
		self.set("top", &format!("{}px", at.y));
	}

	fn hide(&self) {
		self.set("opacity", "0");
	}

	fn set_pinned(&self, pinned: bool) {
		self.set("pointer-events", if pinned { "auto" } else { "none" });
	}
}

/// Apply session effects to the document, in order.
pub fn apply_effects(effects: Vec<Effect>, host: &mut DomStyleHost, highlighter: &mut Highlighter, panel: &TooltipPanel) {
	for effect in effects {
		match effect {
			Effect::ShowTooltip { html, theme, pointer } => panel.show(&html, &theme, pointer),
			Effect::MoveTooltip { pointer } => panel.move_to(pointer),
			Effect::HideTooltip => panel.hide(),
			Effect::SetPinned(pinned) => panel.set_pinned(pinned),
			Effect::Highlight(ids) => {
				for id in &ids {
					highlighter.highlight(host, id);
				}
			}
			Effect::Unhighlight(ids) => {
				for id in &ids {
					highlighter.unhighlight(host, id);
				}
			}
		}
	}
}
