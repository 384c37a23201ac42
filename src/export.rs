//! PNG export of the rendered diagram.
//!
//! The browser side (serialising the live node, loading an image, drawing on
//! a canvas, clicking a download link) sits behind [`ExportSurface`]; this
//! module owns the markup fix-ups, the sizes and the failure handling.

use std::rc::Rc;

use log::{debug, error, info};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::diagram::geometry::Rect;
use crate::diagram::svg::{SVG_NS, XLINK_NS, XML_DECLARATION};
use crate::error::Result;

/// Scale used by the export button.
pub const DEFAULT_SCALE: u32 = 4;
pub const CANVAS_BACKGROUND: &str = "#ffffff";
const DATA_URL_PREFIX: &str = "data:image/svg+xml;charset=utf-8,";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Add the namespace attributes to the root `<svg` tag when the serializer
/// left them out, and prefix the XML declaration.
pub fn prepare_markup(serialized: &str) -> String {
	let mut markup = serialized.trim_start().to_string();
	if let Some(start) = markup.find("<svg") {
		let tag_end = markup[start..].find('>').map_or(markup.len(), |i| start + i);
		let root = &markup[start..tag_end];
		let mut extra = String::new();
		if !root.contains("xmlns=") {
			extra.push_str(&format!(" xmlns=\"{SVG_NS}\""));
		}
		if !root.contains("xmlns:xlink=") {
			extra.push_str(&format!(" xmlns:xlink=\"{XLINK_NS}\""));
		}
		markup.insert_str(start + "<svg".len(), &extra);
	}
	if !markup.starts_with("<?xml") {
		markup.insert_str(0, XML_DECLARATION);
	}
	markup
}

/// `data:` URL the offscreen image loads.
pub fn svg_data_url(markup: &str) -> String {
	format!("{DATA_URL_PREFIX}{}", utf8_percent_encode(markup, URI_COMPONENT))
}

pub fn file_name(scale: u32) -> String {
	format!("diagram@{scale}x.png")
}

/// Everything the surface needs to rasterise one export.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportJob {
	pub markup: String,
	pub data_url: String,
	/// View box of the live diagram; the canvas draws from its origin.
	pub view_box: Rect,
	pub scale: u32,
}

impl ExportJob {
	pub fn new(serialized: &str, view_box: Rect, scale: u32) -> Self {
		let markup = prepare_markup(serialized);
		Self {
			data_url: svg_data_url(&markup),
			markup,
			view_box,
			scale,
		}
	}

	/// Canvas pixel size: the view box times the scale.
	pub fn canvas_size(&self) -> (u32, u32) {
		let s = f64::from(self.scale);
		(
			(self.view_box.width * s).round().max(1.0) as u32,
			(self.view_box.height * s).round().max(1.0) as u32,
		)
	}

	/// Where the image is drawn after the context has been scaled.
	pub fn draw_offset(&self) -> (f64, f64) {
		(-self.view_box.x, -self.view_box.y)
	}

	pub fn file_name(&self) -> String {
		file_name(self.scale)
	}
}

/// Callback receiving the PNG data URL, or why it could not be produced.
pub type RasterDone = Box<dyn FnOnce(Result<String>)>;

/// Browser operations the export needs.
pub trait ExportSurface {
	/// Serialized markup and view box of the live `#diagram` node.
	fn capture(&self) -> Result<(String, Rect)>;
	/// Load `job.data_url`, draw it on a white canvas and hand back a PNG data URL.
	/// May complete asynchronously.
	fn rasterize(&self, job: &ExportJob, done: RasterDone);
	/// Start a download of `href` under `file_name`.
	fn download(&self, href: &str, file_name: &str);
}

/// Export the live diagram as `diagram@{scale}x.png`.
///
/// A missing diagram or a failed image load is logged and nothing is
/// downloaded.
pub fn download_png<S: ExportSurface + 'static>(surface: Rc<S>, scale: u32) {
	let (serialized, view_box) = match surface.capture() {
		Ok(captured) => captured,
		Err(e) => {
			error!("PNG export failed: {e}");
			return;
		}
	};
	let job = ExportJob::new(&serialized, view_box, scale);
	info!("Exporting {} ({}x{})", job.file_name(), job.canvas_size().0, job.canvas_size().1);

	let name = job.file_name();
	let markup = job.markup.clone();
	let target = Rc::clone(&surface);
	surface.rasterize(
		&job,
		Box::new(move |result| match result {
			Ok(png) => {
				target.download(&png, &name);
				info!("Exported {name}");
			}
			Err(e) => {
				error!("PNG export failed while loading SVG image: {e}");
				debug!("Serialized SVG: {markup}");
			}
		}),
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::DiagramError;
	use std::cell::RefCell;

	#[derive(Default)]
	struct FakeSurface {
		diagram: Option<(String, Rect)>,
		fail_load: bool,
		calls: RefCell<Vec<String>>,
	}

	impl ExportSurface for FakeSurface {
		fn capture(&self) -> Result<(String, Rect)> {
			self.calls.borrow_mut().push("capture".into());
			self.diagram.clone().ok_or(DiagramError::MissingElement { id: "diagram".into() })
		}

		fn rasterize(&self, job: &ExportJob, done: RasterDone) {
			let (w, h) = job.canvas_size();
			self.calls.borrow_mut().push(format!("rasterize {w}x{h}"));
			if self.fail_load {
				done(Err(DiagramError::ImageLoad));
			} else {
				done(Ok("data:image/png;base64,AAAA".into()));
			}
		}

		fn download(&self, href: &str, file_name: &str) {
			self.calls.borrow_mut().push(format!("download {file_name} {href}"));
		}
	}

	fn live() -> Option<(String, Rect)> {
		Some(("<svg id=\"diagram\"><g/></svg>".into(), Rect::new(-40.0, -10.0, 200.0, 100.0)))
	}

	#[test]
	fn markup_gets_namespaces_and_declaration() {
		let m = prepare_markup("<svg id=\"diagram\" viewBox=\"0 0 1 1\"><g/></svg>");
		assert!(m.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns="));
		assert!(m.contains(&format!("xmlns:xlink=\"{XLINK_NS}\"")));
		let again = prepare_markup(&m);
		assert_eq!(again, m);
	}

	#[test]
	fn data_url_matches_uri_component_encoding() {
		let url = svg_data_url("<a b='c'>(x) & ~y!</a>");
		assert_eq!(
			url,
			"data:image/svg+xml;charset=utf-8,%3Ca%20b%3D'c'%3E(x)%20%26%20~y!%3C%2Fa%3E"
		);
	}

	#[test]
	fn job_sizes_scale_view_box() {
		let job = ExportJob::new("<svg></svg>", Rect::new(-40.0, -10.0, 200.5, 100.0), 4);
		assert_eq!(job.canvas_size(), (802, 400));
		assert_eq!(job.draw_offset(), (40.0, 10.0));
		assert_eq!(job.file_name(), "diagram@4x.png");
	}

	#[test]
	fn successful_export_downloads_once() {
		let surface = Rc::new(FakeSurface {
			diagram: live(),
			..FakeSurface::default()
		});
		download_png(Rc::clone(&surface), DEFAULT_SCALE);
		let calls = surface.calls.borrow();
		assert_eq!(calls.len(), 3);
		assert_eq!(calls[1], "rasterize 800x400");
		assert!(calls[2].starts_with("download diagram@4x.png data:image/png"));
	}

	#[test]
	fn missing_diagram_stops_before_loading() {
		let surface = Rc::new(FakeSurface::default());
		download_png(Rc::clone(&surface), 2);
		assert_eq!(*surface.calls.borrow(), vec!["capture".to_string()]);
	}

	#[test]
	fn load_failure_does_not_download() {
		let surface = Rc::new(FakeSurface {
			diagram: live(),
			fail_load: true,
			..FakeSurface::default()
		});
		download_png(Rc::clone(&surface), 1);
		let calls = surface.calls.borrow();
		assert_eq!(calls.len(), 2);
		assert!(!calls.iter().any(|c| c.starts_with("download")));
	}
}
