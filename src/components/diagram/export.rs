use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement, SvgsvgElement, XmlSerializer};

use crate::diagram::geometry::Rect;
use crate::diagram::svg::{DIAGRAM_ID, SVG_NS, XLINK_NS};
use crate::error::{DiagramError, Result};
use crate::export::{CANVAS_BACKGROUND, DEFAULT_SCALE, ExportJob, ExportSurface, RasterDone, download_png};

/// Id of the export button.
pub const EXPORT_BUTTON_ID: &str = "exportPNG";

/// [`ExportSurface`] over the live document.
pub struct WebExportSurface {
	document: Document,
}

impl WebExportSurface {
	pub fn new() -> Result<Self> {
		web_sys::window()
			.and_then(|w| w.document())
			.map(|document| Self { document })
			.ok_or_else(|| DiagramError::MissingElement { id: "document".to_string() })
	}

	fn draw(&self, job: &ExportJob, img: &HtmlImageElement) -> Result<String> {
		let canvas: HtmlCanvasElement = self
			.document
			.create_element("canvas")
			.map_err(|e| DiagramError::js("create canvas", &e))?
			.dyn_into()
			.map_err(|_| DiagramError::Canvas)?;
		let (width, height) = job.canvas_size();
		canvas.set_width(width);
		canvas.set_height(height);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|e| DiagramError::js("get 2d context", &e))?
			.ok_or(DiagramError::Canvas)?
			.dyn_into()
			.map_err(|_| DiagramError::Canvas)?;
		ctx.set_fill_style_str(CANVAS_BACKGROUND);
		ctx.fill_rect(0.0, 0.0, f64::from(width), f64::from(height));

		let scale = f64::from(job.scale);
		ctx.scale(scale, scale).map_err(|e| DiagramError::js("scale canvas", &e))?;
		let (dx, dy) = job.draw_offset();
		ctx.draw_image_with_html_image_element(img, dx, dy)
			.map_err(|e| DiagramError::js("draw image", &e))?;

		canvas
			.to_data_url_with_type("image/png")
			.map_err(|e| DiagramError::js("encode png", &e))
	}
}

impl ExportSurface for WebExportSurface {
	fn capture(&self) -> Result<(String, Rect)> {
		let svg: SvgsvgElement = self
			.document
			.get_element_by_id(DIAGRAM_ID)
			.and_then(|el| el.dyn_into().ok())
			.ok_or_else(|| DiagramError::MissingElement { id: DIAGRAM_ID.to_string() })?;

		let clone: web_sys::Element = svg
			.clone_node_with_deep(true)
			.map_err(|e| DiagramError::js("clone diagram", &e))?
			.dyn_into()
			.map_err(|_| DiagramError::MissingElement { id: DIAGRAM_ID.to_string() })?;
		let _ = clone.set_attribute("xmlns", SVG_NS);
		let _ = clone.set_attribute("xmlns:xlink", XLINK_NS);

		let serialized = XmlSerializer::new()
			.and_then(|s| s.serialize_to_string(&clone))
			.map_err(|e| DiagramError::js("serialize diagram", &e))?;

		let vb = svg.view_box().base_val();
		let view_box = match vb {
			Some(r) => Rect::new(f64::from(r.x()), f64::from(r.y()), f64::from(r.width()), f64::from(r.height())),
			None => {
				let r = svg.get_bounding_client_rect();
				Rect::new(0.0, 0.0, r.width(), r.height())
			}
		};
		Ok((serialized, view_box))
	}

	fn rasterize(&self, job: &ExportJob, done: RasterDone) {
		let img = match HtmlImageElement::new() {
			Ok(img) => img,
			Err(e) => return done(Err(DiagramError::js("create image", &e))),
		};
		let done = Rc::new(RefCell::new(Some(done)));

		let (done_ok, img_ok, job_ok) = (done.clone(), img.clone(), job.clone());
		let surface = Self {
			document: self.document.clone(),
		};
		let onload = Closure::once_into_js(move || {
			if let Some(done) = done_ok.borrow_mut().take() {
				done(surface.draw(&job_ok, &img_ok));
			}
		});
		let onerror = Closure::once_into_js(move || {
			if let Some(done) = done.borrow_mut().take() {
				done(Err(DiagramError::ImageLoad));
			}
		});
		img.set_onload(Some(onload.unchecked_ref()));
		img.set_onerror(Some(onerror.unchecked_ref()));
		img.set_src(&job.data_url);
	}

	fn download(&self, href: &str, file_name: &str) {
		let link: HtmlAnchorElement = match self.document.create_element("a").map(|el| el.dyn_into()) {
			Ok(Ok(link)) => link,
			_ => {
				error!("PNG export failed: could not create download link");
				return;
			}
		};
		link.set_download(file_name);
		link.set_href(href);
		link.click();
	}
}

/// `#exportPNG`: downloads the diagram at the default scale.
#[component]
pub fn ExportButton() -> impl IntoView {
	let on_click = move |_| match WebExportSurface::new() {
		Ok(surface) => download_png(Rc::new(surface), DEFAULT_SCALE),
		Err(e) => error!("PNG export failed: {e}"),
	};

	view! {
		<button id=EXPORT_BUTTON_ID class="export-button" on:click=on_click>
			"Export PNG"
		</button>
	}
}
