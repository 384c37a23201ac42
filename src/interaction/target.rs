//! Mapping raw hovered ids to the element whose tooltip and highlights apply.

/// Resolved hover target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverTarget {
	pub id: String,
	/// Hover came from an FSS companion dot rather than the dot itself.
	pub yellow: bool,
}

/// Lines that lose the hover to a sibling drawn underneath when both are
/// under the pointer: `(suppressed, preferred)`.
pub const OVERRIDES: &[(&str, &str)] = &[
	("npp-to-adi-line", "osko-to-adi-line"),
	("npp-to-fss-line", "npp-to-adi-line"),
];

/// Apply the override table against the ids stacked under the pointer.
pub fn apply_override<'a>(raw: &'a str, hit_stack: &[&'a str]) -> &'a str {
	OVERRIDES
		.iter()
		.filter(|(suppressed, _)| *suppressed == raw)
		.find_map(|(_, preferred)| hit_stack.iter().copied().find(|id| id == preferred))
		.unwrap_or(raw)
}

/// Companion dots share the tooltip and highlights of the dot they sit next to.
pub fn resolve_target(raw: &str) -> HoverTarget {
	if raw == "rba-yellow-dot" {
		return HoverTarget {
			id: "dot-0".to_string(),
			yellow: true,
		};
	}
	if let Some(n) = raw.strip_prefix("yellow-dot-") {
		if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) {
			return HoverTarget {
				id: format!("dot-{n}"),
				yellow: true,
			};
		}
	}
	HoverTarget {
		id: raw.to_string(),
		yellow: false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn yellow_dot_maps_to_dot() {
		for n in [0, 1, 45, 88] {
			let t = resolve_target(&format!("yellow-dot-{n}"));
			assert_eq!(t.id, format!("dot-{n}"));
			assert!(t.yellow);
		}
	}

	#[test]
	fn dot_is_itself() {
		let t = resolve_target("dot-52");
		assert_eq!(t.id, "dot-52");
		assert!(!t.yellow);
		assert!(!resolve_target("npp-box").yellow);
		assert_eq!(resolve_target("yellow-dot-x").id, "yellow-dot-x");
	}

	#[test]
	fn override_needs_preferred_in_stack() {
		assert_eq!(apply_override("npp-to-adi-line", &["npp-to-adi-line", "osko-to-adi-line"]), "osko-to-adi-line");
		assert_eq!(apply_override("npp-to-adi-line", &["npp-to-adi-line", "adi-box"]), "npp-to-adi-line");
		assert_eq!(apply_override("osko-to-adi-line", &["npp-to-adi-line"]), "osko-to-adi-line");
	}
}
