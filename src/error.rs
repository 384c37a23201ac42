//! Crate-wide error type.

/// Everything that can go wrong while building, serialising or exporting the diagram.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
	/// An element the caller relies on is not in the document.
	#[error("missing DOM element: #{id}")]
	MissingElement {
		/// Element id that was looked up.
		id: String,
	},
	/// A browser API call rejected.
	#[error("{context}: {message}")]
	Js {
		/// What was being attempted.
		context: &'static str,
		/// Stringified JS error value.
		message: String,
	},
	/// The serialized SVG could not be decoded by the browser image loader.
	#[error("failed to load serialized SVG as an image")]
	ImageLoad,
	/// No 2d context was available on the offscreen canvas.
	#[error("canvas 2d context unavailable")]
	Canvas,
	/// A colour string was not `#rgb` or `#rrggbb`.
	#[error("invalid hex colour: {input}")]
	InvalidColor {
		/// The rejected input.
		input: String,
	},
	/// The embedded tooltip table did not deserialize.
	#[error("tooltip data JSON error: {0}")]
	TooltipData(#[from] serde_json::Error),
}

impl DiagramError {
	/// Wrap a JS exception value with the operation it came from.
	pub fn js(context: &'static str, value: &wasm_bindgen::JsValue) -> Self {
		let message = value
			.as_string()
			.unwrap_or_else(|| format!("{value:?}"));
		Self::Js { context, message }
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DiagramError>;
