//! Tooltip copy for every interactive element, compiled in from `assets/tooltips.json`.

use std::collections::HashMap;
use std::sync::OnceLock;

use log::error;
use serde::Deserialize;

use crate::error::Result;

const TOOLTIPS_JSON: &str = include_str!("../../assets/tooltips.json");

/// Decorative hub groups borrow the copy of the hub they wrap.
const ALIASES: &[(&str, &str)] = &[
	("big-group", "big-circle"),
	("small-group", "small-circle"),
	("lvss-gear-group", "lvss-gear"),
];

/// Display record shown in the floating panel.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TooltipContent {
	pub title: String,
	#[serde(default)]
	pub subtitle: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub details: Vec<String>,
	#[serde(default)]
	pub link: Option<String>,
	/// Operating hours footer.
	#[serde(default)]
	pub hours: Option<String>,
	/// Border colour override for the panel.
	#[serde(default)]
	pub accent: Option<String>,
}

/// Lookup table from element id to tooltip content.
#[derive(Clone, Debug, Default)]
pub struct TooltipTable {
	entries: HashMap<String, TooltipContent>,
}

impl TooltipTable {
	/// Parse a JSON object of `id -> content`.
	pub fn parse(json: &str) -> Result<Self> {
		Ok(Self {
			entries: serde_json::from_str(json)?,
		})
	}

	/// Content for an element id, following the hub group aliases.
	pub fn get(&self, element_id: &str) -> Option<&TooltipContent> {
		self.entries.get(element_id).or_else(|| {
			ALIASES
				.iter()
				.find(|(alias, _)| *alias == element_id)
				.and_then(|(_, key)| self.entries.get(*key))
		})
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the table has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl FromIterator<(String, TooltipContent)> for TooltipTable {
	fn from_iter<T: IntoIterator<Item = (String, TooltipContent)>>(iter: T) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

static TOOLTIPS: OnceLock<TooltipTable> = OnceLock::new();

/// Process-wide tooltip table. A malformed asset logs and yields an empty
/// table, which hides every tooltip.
pub fn tooltip_table() -> &'static TooltipTable {
	TOOLTIPS.get_or_init(|| parse_or_empty(TOOLTIPS_JSON))
}

fn parse_or_empty(json: &str) -> TooltipTable {
	TooltipTable::parse(json).unwrap_or_else(|e| {
		error!("Tooltip table unavailable: {e}");
		TooltipTable::default()
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn embedded_table_loads() {
		let table = TooltipTable::parse(TOOLTIPS_JSON).unwrap();
		assert!(table.len() > 100);
		let rits = table.get("rits-circle").unwrap();
		assert_eq!(rits.title, "RITS");
		assert!(rits.accent.is_some());
	}

	#[test]
	fn every_arc_dot_has_copy() {
		let table = tooltip_table();
		for i in 0..100 {
			assert!(table.get(&format!("dot-{i}")).is_some(), "dot-{i}");
		}
	}

	#[test]
	fn alias_resolves() {
		let table = tooltip_table();
		assert_eq!(table.get("small-group"), table.get("small-circle"));
		assert_eq!(table.get("big-group").unwrap().title, "Settlement Engine");
		assert!(table.get("yellow-dot-3").is_none());
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(TooltipTable::parse("{\"x\": {\"subtitle\": 3}}").is_err());
	}

	#[test]
	fn malformed_asset_degrades_to_empty_table() {
		let table = parse_or_empty("{\"x\": {\"subtitle\": 3}}");
		assert!(table.is_empty());
		assert!(table.get("rits-circle").is_none());
		assert!(!parse_or_empty(TOOLTIPS_JSON).is_empty());
	}
}
