use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::NetworkState;
use super::types::{INSTITUTIONS, LAYERS, LayoutMode};

const BACKGROUND: &str = "#ffffff";
const EDGE_IDLE: &str = "rgba(149, 165, 166, 0.6)";
const EDGE_ACTIVE: &str = "#e74c3c";
const LABEL: &str = "#2c3e50";
const DASH: f64 = 8.0;
const DASH_GAP: f64 = 6.0;
/// Dash travel speed along an active route, px per ms.
const DASH_SPEED: f64 = 0.04;

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let cfg = &state.config;
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, cfg.width, cfg.height);
	if state.mode == LayoutMode::Grid {
		draw_labels(state, ctx);
	}
	draw_edges(state, ctx);
	draw_wallets(state, ctx);
	draw_tokens(state, ctx);
	draw_total(state, ctx);
}

fn draw_total(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(LABEL);
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
	let _ = ctx.fill_text(
		&format!("Total held: ${}", state.total_balance()),
		10.0,
		state.config.height - 10.0,
	);
}

fn draw_labels(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let cfg = &state.config;
	ctx.set_fill_style_str(LABEL);
	ctx.set_font("bold 14px sans-serif");
	ctx.set_text_baseline("middle");

	ctx.set_text_align("end");
	for (row, layer) in LAYERS.iter().enumerate() {
		let (_, y) = cfg.grid_position(row, 0);
		let _ = ctx.fill_text(layer.name, cfg.margin_left - 20.0, y);
	}

	ctx.set_text_align("center");
	for (col, inst) in INSTITUTIONS.iter().enumerate() {
		let (x, _) = cfg.grid_position(0, col);
		let _ = ctx.fill_text(inst.name, x, cfg.margin_top - 30.0);
	}
}

fn draw_edges(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	// Negative offset moves the dashes from source towards destination.
	let dash_offset = -(state.now_ms * DASH_SPEED) % (DASH + DASH_GAP);
	for (i, route) in state.routes.iter().enumerate() {
		let ((x1, y1), (x2, y2)) = (state.positions[route.from], state.positions[route.to]);
		let active = state.route_active(i);
		let (color, width) = if active {
			(EDGE_ACTIVE, 4.0)
		} else if state.is_highlighted(route.from) && state.is_highlighted(route.to) {
			(LABEL, 3.0)
		} else {
			(EDGE_IDLE, 2.0)
		};
		if active {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(DASH),
				&JsValue::from_f64(DASH_GAP),
			));
			ctx.set_line_dash_offset(dash_offset);
		}
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
		if active {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}
	}
}

fn draw_wallets(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let r = state.config.node_radius;
	let dim = state.hover.wallet.is_some();
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for (i, wallet) in state.wallets.iter().enumerate() {
		let (x, y) = state.positions[i];
		let lit = state.is_highlighted(i);
		ctx.set_global_alpha(if dim && !lit { 0.35 } else { 1.0 });

		ctx.begin_path();
		let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(wallet.layer().color);
		ctx.fill();

		let selected = state.selected.contains(&i);
		ctx.set_stroke_style_str(if selected { "#2c3e50" } else { "#ffffff" });
		ctx.set_line_width(if selected { 4.0 } else { 2.0 });
		ctx.stroke();

		ctx.set_fill_style_str("#ffffff");
		let _ = ctx.fill_text(&format!("${}", wallet.balance), x, y);

		if state.mode == LayoutMode::Force {
			ctx.set_fill_style_str(LABEL);
			let _ = ctx.fill_text(&wallet.id, x, y + r + 12.0);
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_tokens(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(&format!("{}px sans-serif", state.config.token_size));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for token in &state.tokens {
		let (x, y) = state.token_position(token);
		let _ = ctx.fill_text(state.routes[token.route].transfer.token, x, y);
	}
}
