use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::NetworkState;
use super::types::{LayoutMode, NetworkConfig};
use crate::components::mount::{FrameLoop, MountSlot};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Canvas-local pointer position.
fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn request_frame(cb: &FrameCallback, frames: &FrameLoop) {
	let Some(window) = web_sys::window() else {
		return;
	};
	match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		Ok(handle) => frames.scheduled(handle),
		Err(e) => error!("Wallet network: requestAnimationFrame failed: {e:?}"),
	}
}

#[component]
pub fn WalletNetworkCanvas(#[prop(into)] mode: Signal<LayoutMode>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: MountSlot<NetworkState> = MountSlot::default();
	let animate: MountSlot<FrameCallback> = MountSlot::default();
	let frames = Rc::new(FrameLoop::default());
	let (state_init, animate_init, frames_init) = (state.clone(), animate.clone(), frames.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let config = NetworkConfig::default();
		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				error!("Wallet network: canvas 2d context unavailable");
				return;
			}
		};
		if frames_init.is_stopped() {
			return;
		}
		state_init.set(NetworkState::new(config));
		info!("Wallet network initialized");

		let (state_anim, animate_inner, frames_anim) = (state_init.clone(), animate_init.clone(), frames_init.clone());
		animate_init.set(Closure::new(move |now: f64| {
			frames_anim.fired();
			if frames_anim.is_stopped() {
				return;
			}
			state_anim.with_mut(|s| {
				s.tick(now);
				render::render(s, &ctx);
			});
			animate_inner.with(|cb| request_frame(cb, &frames_anim));
		}));
		animate_init.with(|cb| request_frame(cb, &frames_init));
	});

	let teardown = StoredValue::new_local((state.clone(), animate.clone(), frames));
	on_cleanup(move || {
		let _ = teardown.try_with_value(|(state, animate, frames)| {
			if let (Some(handle), Some(window)) = (frames.stop(), web_sys::window()) {
				let _ = window.cancel_animation_frame(handle);
			}
			animate.take();
			state.take();
			info!("Wallet network stopped");
		});
	});

	let state_mode = state.clone();
	Effect::new(move |_| {
		let mode = mode.get();
		state_mode.with_mut(|s| s.set_mode(mode));
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas, &ev);
		state_mm.with_mut(|s| {
			let hovered = s.wallet_at(x, y);
			s.set_hover(hovered);
		});
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas, &ev);
		state_click.with_mut(|s| {
			if let Some(idx) = s.wallet_at(x, y) {
				s.toggle_selected(idx);
			}
		});
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.with_mut(|s| s.set_hover(None));
	};

	view! {
		<canvas
			node_ref=canvas_ref
			id="network-viz"
			class="network-canvas"
			on:mousemove=on_mousemove
			on:click=on_click
			on:mouseleave=on_mouseleave
			style="display: block; cursor: pointer;"
		/>
	}
}
