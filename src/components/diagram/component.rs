use std::cell::RefCell;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use super::dom::{
	DocumentListener, DomStyleHost, TooltipPanel, apply_effects, client_rect, hit_stack, interactive_id,
};
use crate::components::mount::MountSlot;
use crate::config::LayoutParams;
use crate::data::tooltip_table;
use crate::diagram::geometry::{Point, Rect};
use crate::diagram::svg::DIAGRAM_ID;
use crate::diagram::{build_scene, render_svg};
use crate::interaction::session::Effect as SessionEffect;
use crate::interaction::{
	DotIndex, HOVER_MARGIN, Highlighter, InteractionSession, TOOLTIP_ID, client_to_scene, is_dot_area, pick_hover_id,
};

/// Everything the delegated listeners share once the diagram is mounted.
struct Controller {
	document: Document,
	session: InteractionSession<'static>,
	highlighter: Highlighter,
	host: DomStyleHost,
	panel: TooltipPanel,
	dots: DotIndex,
	view_box: Rect,
}

/// A pointer event reduced to what the session needs.
struct PointerHit {
	raw_id: String,
	stack: Vec<String>,
	client: Point,
}

impl Controller {
	fn apply(&mut self, effects: Vec<SessionEffect>) {
		apply_effects(effects, &mut self.host, &mut self.highlighter, &self.panel);
	}

	/// Tagged element under the pointer. Over a group box or over nothing
	/// tagged, the nearest arc dot in reach takes precedence.
	fn resolve(&self, ev: &MouseEvent) -> Option<PointerHit> {
		let client = Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()));
		let stack = hit_stack(&self.document, client);
		let direct = ev
			.target()
			.and_then(|t| t.dyn_into::<Element>().ok())
			.and_then(|el| interactive_id(&el));
		let near = if direct.as_deref().is_none_or(is_dot_area) {
			self.nearest_dot(client)
		} else {
			None
		};
		let raw_id = pick_hover_id(direct.as_deref(), near)?;
		Some(PointerHit { raw_id, stack, client })
	}

	fn nearest_dot(&self, client: Point) -> Option<usize> {
		let svg = self.document.get_element_by_id(DIAGRAM_ID)?;
		let scene_point = client_to_scene(client, &client_rect(&svg), &self.view_box)?;
		self.dots.nearest(scene_point, HOVER_MARGIN)
	}

	fn on_pointer(&mut self, ev: &MouseEvent) {
		let effects = match self.resolve(ev) {
			Some(hit) => {
				let stack: Vec<&str> = hit.stack.iter().map(String::as_str).collect();
				self.session.hover(&hit.raw_id, &stack, hit.client)
			}
			None => self.session.leave(),
		};
		self.apply(effects);
	}

	fn on_click(&mut self, ev: &MouseEvent) {
		let Some(hit) = self.resolve(ev) else {
			return;
		};
		let stack: Vec<&str> = hit.stack.iter().map(String::as_str).collect();
		let effects = self.session.click(&hit.raw_id, &stack, hit.client, ev.time_stamp());
		self.apply(effects);
	}

	fn on_document_click(&mut self, ev: &MouseEvent) {
		let target = ev.target().and_then(|t| t.dyn_into::<Element>().ok());
		if let Some(el) = target {
			if interactive_id(&el).is_some() || self.panel.contains(&el) {
				return;
			}
		}
		let effects = self.session.outside_click(ev.time_stamp());
		self.apply(effects);
	}
}

/// The payments topology diagram with hover and pinned tooltips.
///
/// Layout params come from the page's `#params` element.
#[component]
pub fn PaymentsDiagram() -> impl IntoView {
	let params = LayoutParams::from_document();
	let scene = build_scene(&params);
	let markup = render_svg(&scene);
	let dots = DotIndex::from_scene(&scene);
	let view_box = scene.view_box();
	debug!("Diagram laid out: {} dots, view box {view_box:?}", dots.len());

	let container_ref = NodeRef::<leptos::html::Div>::new();
	let controller: MountSlot<Controller> = MountSlot::default();
	let doc_click: MountSlot<DocumentListener> = MountSlot::default();
	let (controller_init, doc_click_init) = (controller.clone(), doc_click.clone());
	let pending = RefCell::new(Some((dots, view_box)));

	Effect::new(move |_| {
		if container_ref.get().is_none() {
			return;
		}
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return;
		};
		let panel = match TooltipPanel::find(&document) {
			Ok(panel) => panel,
			Err(e) => {
				warn!("Tooltips disabled: {e}");
				return;
			}
		};
		let Some((dots, view_box)) = pending.borrow_mut().take() else {
			return;
		};
		controller_init.set(Controller {
			host: DomStyleHost::new(document.clone()),
			document: document.clone(),
			session: InteractionSession::new(tooltip_table()),
			highlighter: Highlighter::default(),
			panel,
			dots,
			view_box,
		});

		let controller_doc = controller_init.clone();
		let listener = DocumentListener::attach(&document, "click", move |ev: MouseEvent| {
			controller_doc.with_mut(|c| c.on_document_click(&ev));
		});
		match listener {
			Ok(listener) => doc_click_init.set(listener),
			Err(e) => warn!("Outside clicks will not dismiss pinned tooltips: {e}"),
		}
		info!("Interactive tooltip system initialized");
	});

	let teardown = StoredValue::new_local((controller.clone(), doc_click));
	on_cleanup(move || {
		let _ = teardown.try_with_value(|(controller, doc_click)| {
			doc_click.take();
			controller.take();
			debug!("Interactive tooltip system detached");
		});
	});

	let controller_move = controller.clone();
	let on_pointer = move |ev: MouseEvent| {
		controller_move.with_mut(|c| c.on_pointer(&ev));
	};
	let on_over = on_pointer.clone();

	let controller_leave = controller.clone();
	let on_mouseleave = move |_: MouseEvent| {
		controller_leave.with_mut(|c| {
			let effects = c.session.leave();
			c.apply(effects);
		});
	};

	let controller_click = controller;
	let on_click = move |ev: MouseEvent| {
		controller_click.with_mut(|c| c.on_click(&ev));
	};

	view! {
		<div
			node_ref=container_ref
			class="diagram-container"
			inner_html=markup
			on:mouseover=on_over
			on:mousemove=on_pointer
			on:mouseleave=on_mouseleave
			on:click=on_click
		/>
		<div id=TOOLTIP_ID class="diagram-tooltip" style="opacity: 0; pointer-events: none;" />
	}
}
