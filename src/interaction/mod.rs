//! Tooltip, highlight and hover-target logic, independent of the DOM.

pub mod highlight;
pub mod proximity;
pub mod session;
pub mod target;
pub mod tooltip;

pub use highlight::{HighlightKind, Highlighter, InlineStyle, StyleHost};
pub use proximity::{DotIndex, HOVER_MARGIN, client_to_scene, is_dot_area, pick_hover_id};
pub use session::{Effect, InteractionSession};
pub use tooltip::TOOLTIP_ID;
