//! Static, read-only tables behind the diagram.

pub mod legend;
pub mod relationships;
pub mod tooltips;

pub use relationships::{group_elements, highlight_set, related_elements};
pub use tooltips::{TooltipContent, TooltipTable, tooltip_table};
