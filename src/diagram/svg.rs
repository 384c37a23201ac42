//! Serialise a [`Scene`] to SVG markup.

use std::fmt::Write;

use super::geometry::{Rect, fmt};
use super::scene::{Layer, Scene, SceneNode, Shape, Style};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
/// Id of the root `<svg>` element.
pub const DIAGRAM_ID: &str = "diagram";
pub const INTERACTIVE_ATTR: &str = "data-interactive-id";

/// Escape text and attribute values.
pub fn escape(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	for c in raw.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}

fn view_box_attr(r: &Rect) -> String {
	format!("{} {} {} {}", fmt(r.x), fmt(r.y), fmt(r.width), fmt(r.height))
}

/// Layer groups in paint order.
pub fn render_body(scene: &Scene) -> String {
	let mut out = String::new();
	for layer in Layer::ALL {
		let _ = write!(out, "<g id=\"{}\">", layer.group_id());
		for node in scene.layer(layer) {
			render_node(node, &mut out);
		}
		out.push_str("</g>");
	}
	out
}

/// The `<svg>` element alone, for mounting into a live document.
pub fn render_svg(scene: &Scene) -> String {
	let vb = scene.view_box();
	format!(
		"<svg xmlns=\"{SVG_NS}\" xmlns:xlink=\"{XLINK_NS}\" id=\"{DIAGRAM_ID}\" viewBox=\"{}\" width=\"{}\" height=\"{}\">{}</svg>",
		view_box_attr(&vb),
		fmt(vb.width),
		fmt(vb.height),
		render_body(scene)
	)
}

/// Standalone document with the XML declaration.
pub fn render_document(scene: &Scene) -> String {
	format!("{XML_DECLARATION}{}", render_svg(scene))
}

fn identity_attrs(node: &SceneNode, out: &mut String) {
	if let Some(id) = &node.interactive_id {
		let id = escape(id);
		let _ = write!(out, " id=\"{id}\" {INTERACTIVE_ATTR}=\"{id}\" style=\"cursor: pointer\"");
	} else if let Some(id) = &node.id {
		let _ = write!(out, " id=\"{}\"", escape(id));
	}
}

fn style_attrs(style: &Style, out: &mut String) {
	if let Some(fill) = &style.fill {
		let _ = write!(out, " fill=\"{}\"", escape(fill));
	}
	if let Some(v) = style.fill_opacity {
		let _ = write!(out, " fill-opacity=\"{v}\"");
	}
	if style.evenodd {
		out.push_str(" fill-rule=\"evenodd\"");
	}
	if let Some(stroke) = &style.stroke {
		let _ = write!(out, " stroke=\"{}\"", escape(stroke));
	}
	if let Some(w) = style.stroke_width {
		let _ = write!(out, " stroke-width=\"{w}\"");
	}
	if let Some(dash) = style.dasharray {
		let _ = write!(out, " stroke-dasharray=\"{dash}\"");
	}
	if let Some(v) = style.opacity {
		let _ = write!(out, " opacity=\"{v}\"");
	}
}

fn render_node(node: &SceneNode, out: &mut String) {
	match &node.shape {
		Shape::Circle { center, r } => {
			let _ = write!(out, "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"", fmt(center.x), fmt(center.y), fmt(*r));
			identity_attrs(node, out);
			style_attrs(&node.style, out);
			out.push_str("/>");
		}
		Shape::Rect { rect, rx } => {
			let _ = write!(
				out,
				"<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
				fmt(rect.x),
				fmt(rect.y),
				fmt(rect.width),
				fmt(rect.height)
			);
			if *rx > 0.0 {
				let _ = write!(out, " rx=\"{}\"", fmt(*rx));
			}
			identity_attrs(node, out);
			style_attrs(&node.style, out);
			out.push_str("/>");
		}
		Shape::Line { from, to } => {
			let _ = write!(
				out,
				"<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
				fmt(from.x),
				fmt(from.y),
				fmt(to.x),
				fmt(to.y)
			);
			identity_attrs(node, out);
			style_attrs(&node.style, out);
			out.push_str("/>");
		}
		Shape::Path { d, .. } => {
			let _ = write!(out, "<path d=\"{}\"", escape(d));
			identity_attrs(node, out);
			style_attrs(&node.style, out);
			out.push_str("/>");
		}
		Shape::Text { at, lines } => {
			let style = &node.style;
			let _ = write!(
				out,
				"<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" dominant-baseline=\"central\" font-family=\"Arial, sans-serif\"",
				fmt(at.x),
				fmt(at.y),
				style.anchor.as_str()
			);
			if let Some(size) = style.font_size {
				let _ = write!(out, " font-size=\"{size}\"");
			}
			if style.bold {
				out.push_str(" font-weight=\"bold\"");
			}
			identity_attrs(node, out);
			style_attrs(style, out);
			out.push('>');
			if let [only] = lines.as_slice() {
				out.push_str(&escape(only));
			} else {
				let first_dy = -(lines.len().saturating_sub(1) as f64) * 0.6;
				for (i, line) in lines.iter().enumerate() {
					let dy = if i == 0 { first_dy } else { 1.2 };
					let _ = write!(out, "<tspan x=\"{}\" dy=\"{dy}em\">{}</tspan>", fmt(at.x), escape(line));
				}
			}
			out.push_str("</text>");
		}
		Shape::Group { translate, children } => {
			out.push_str("<g");
			if let Some(o) = translate {
				let _ = write!(out, " transform=\"translate({}, {})\"", fmt(o.x), fmt(o.y));
			}
			identity_attrs(node, out);
			style_attrs(&node.style, out);
			out.push('>');
			for child in children {
				render_node(child, out);
			}
			out.push_str("</g>");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::LayoutParams;
	use crate::diagram::geometry::Point;
	use crate::diagram::layout::build_scene;

	#[test]
	fn escapes_markup() {
		assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
	}

	#[test]
	fn interactive_nodes_are_tagged() {
		let mut out = String::new();
		let node = SceneNode::circle(Point::new(1.0, 2.5), 3.0, Style::filled("#fff")).interactive("dot-7");
		render_node(&node, &mut out);
		assert_eq!(
			out,
			"<circle cx=\"1.00\" cy=\"2.50\" r=\"3.00\" id=\"dot-7\" data-interactive-id=\"dot-7\" style=\"cursor: pointer\" fill=\"#fff\"/>"
		);
	}

	#[test]
	fn multi_line_text_uses_tspans() {
		let mut out = String::new();
		render_node(&SceneNode::text(Point::new(0.0, 0.0), "SWIFT\nPDS", Style::text("#000", 18.0)), &mut out);
		assert_eq!(out.matches("<tspan").count(), 2);
		assert!(out.contains("dy=\"-0.6em\""));
	}

	#[test]
	fn document_has_root_and_namespaces() {
		let doc = render_document(&build_scene(&LayoutParams::default()));
		assert!(doc.starts_with(XML_DECLARATION));
		assert!(doc.contains("id=\"diagram\""));
		assert!(doc.contains(&format!("xmlns=\"{SVG_NS}\"")));
		assert!(doc.contains(&format!("xmlns:xlink=\"{XLINK_NS}\"")));
		assert!(doc.contains("viewBox=\""));
		assert_eq!(doc.matches("data-interactive-id=\"dot-").count(), 100);
		assert!(doc.ends_with("</svg>"));
	}

	#[test]
	fn layers_render_in_paint_order() {
		let body = render_body(&build_scene(&LayoutParams::default()));
		let pos = |id: &str| body.find(&format!("<g id=\"{id}\"")).unwrap();
		assert!(pos("layer-background") < pos("layer-lines"));
		assert!(pos("layer-lines") < pos("layer-hubs"));
		assert!(pos("layer-dots") < pos("layer-labels"));
	}
}
