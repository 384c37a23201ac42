//! Layout and serialisation of the payments topology diagram.

pub mod geometry;
pub mod layout;
pub mod scene;
pub mod svg;

pub use layout::build_scene;
pub use scene::{DotPosition, Scene};
pub use svg::{render_document, render_svg};
