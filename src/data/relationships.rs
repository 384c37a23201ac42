//! Which diagram elements light up together.
//!
//! Hovering an element highlights the element itself plus everything listed
//! as `related`. `groups` feed [`group_elements`]. Nothing enforces symmetry:
//! a pair can be related in one direction only.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// One row of the relationship table.
#[derive(Clone, Copy, Debug)]
pub struct Relationship {
	pub groups: &'static [&'static str],
	pub related: &'static [&'static str],
}

const fn rel(groups: &'static [&'static str], related: &'static [&'static str]) -> Relationship {
	Relationship { groups, related }
}

const RBA: &[&str] = &["rba-system"];
const BDF: &[&str] = &["bdf-system"];
const BIG_FOUR: &[&str] = &["domestic-banks", "big-four", "adis"];

/// Static element relationship table keyed by interactive id.
pub const ELEMENT_RELATIONSHIPS: &[(&str, Relationship)] = &[
	(
		"dot-0",
		rel(RBA, &["rba-blue-line", "rba-yellow-line", "rba-blue-dot", "rba-yellow-dot", "opa-box", "opa-label", "opa-to-rba-line"]),
	),
	(
		"rba-blue-line",
		rel(RBA, &["dot-0", "rba-blue-dot", "rba-yellow-line", "rba-yellow-dot", "opa-box", "opa-label", "opa-to-rba-line"]),
	),
	(
		"rba-yellow-line",
		rel(RBA, &["dot-0", "rba-blue-line", "rba-blue-dot", "rba-yellow-dot", "opa-box", "opa-label", "opa-to-rba-line"]),
	),
	(
		"rba-blue-dot",
		rel(RBA, &["dot-0", "rba-blue-line", "rba-yellow-line", "rba-yellow-dot", "opa-box", "opa-label", "opa-to-rba-line"]),
	),
	(
		"rba-yellow-dot",
		rel(RBA, &["dot-0", "rba-blue-line", "rba-yellow-line", "rba-blue-dot", "opa-box", "opa-label", "opa-to-rba-line"]),
	),
	(
		"opa-box",
		rel(RBA, &["dot-0", "rba-blue-line", "rba-yellow-line", "rba-blue-dot", "rba-yellow-dot", "opa-label", "opa-to-rba-line"]),
	),
	(
		"opa-label",
		rel(RBA, &["dot-0", "rba-blue-line", "rba-yellow-line", "rba-blue-dot", "rba-yellow-dot", "opa-box", "opa-to-rba-line"]),
	),
	(
		"opa-to-rba-line",
		rel(RBA, &["dot-0", "rba-blue-line", "rba-yellow-line", "rba-blue-dot", "rba-yellow-dot", "opa-box", "opa-label"]),
	),
	// Only the RITS hub itself triggers the whole ecosystem.
	(
		"rits-circle",
		rel(
			&["rits-ecosystem"],
			&["rits-circle", "blue-connecting-lines", "rba-blue-line", "small-group", "yellow-circles", "lvss-gear-group"],
		),
	),
	(
		"fss-circle",
		rel(&["fss-ecosystem"], &["fss-circle", "small-group", "yellow-circles", "orange-connecting-lines"]),
	),
	(
		"bdf-box",
		rel(
			BDF,
			&[
				"bdf-line-52", "bdf-line-53", "bdf-line-54", "bdf-line-55",
				"blue-line-52", "blue-line-53", "blue-line-54", "blue-line-55",
				"yellow-line-52", "yellow-line-53", "yellow-line-54", "yellow-line-55",
				"yellow-dot-52", "yellow-dot-53", "yellow-dot-54", "yellow-dot-55",
				"dot-52", "dot-53", "dot-54", "dot-55",
			],
		),
	),
	(
		"bdf-line-52",
		rel(BDF, &["bdf-box", "bdf-line-53", "bdf-line-54", "bdf-line-55", "blue-line-52", "yellow-line-52", "yellow-dot-52", "dot-52"]),
	),
	(
		"bdf-line-53",
		rel(BDF, &["bdf-box", "bdf-line-52", "bdf-line-54", "bdf-line-55", "blue-line-53", "yellow-line-53", "yellow-dot-53", "dot-53"]),
	),
	(
		"bdf-line-54",
		rel(BDF, &["bdf-box", "bdf-line-52", "bdf-line-53", "bdf-line-55", "blue-line-54", "yellow-line-54", "yellow-dot-54", "dot-54"]),
	),
	(
		"bdf-line-55",
		rel(BDF, &["bdf-box", "bdf-line-52", "bdf-line-53", "bdf-line-54", "blue-line-55", "yellow-line-55", "yellow-dot-55", "dot-55"]),
	),
	(
		"swift-pds-box",
		rel(&["swift-network"], &["swift-hvcs-box", "swift-pds-line"]),
	),
	(
		"npp-box",
		rel(
			&["npp-ecosystem", "fast-payments"],
			&["npp-to-adi-line", "npp-to-fss-line", "osko-box", "payid-box", "payto-box", "bsct-box"],
		),
	),
	(
		"osko-box",
		rel(&["npp-ecosystem", "fast-payments"], &["npp-box", "npp-to-adi-line", "osko-to-adi-line"]),
	),
	("payid-box", rel(&["npp-ecosystem"], &["npp-box", "payto-box"])),
	("payto-box", rel(&["npp-ecosystem"], &["npp-box", "payid-box"])),
	(
		"eftpos-box",
		rel(
			&["card-payments", "administered-batches"],
			&["eftpos-left-line", "eftpos-horizontal", "essb-box", "mastercard-box", "visa-box", "other-cards-box"],
		),
	),
	(
		"mastercard-box",
		rel(
			&["card-payments", "administered-batches"],
			&["mastercard-left-line", "mastercard-horizontal", "mcau-box", "eftpos-box", "visa-box"],
		),
	),
	(
		"asx-settlement-dot",
		rel(
			&["asx-ecosystem", "securities"],
			&["asx-settlement-label", "asx-clearing-dot", "lch-dot", "chess-rtgs-box", "austraclear-box"],
		),
	),
	(
		"asx-clearing-dot",
		rel(&["asx-ecosystem", "securities"], &["asx-clearing-label", "asx-settlement-dot", "lch-dot"]),
	),
	("bpay-box", rel(&["direct-entry", "bulk-payments"], &["becn-box", "becs-line", "de-line"])),
	(
		"lvss-circle",
		rel(
			&["lvss-ecosystem", "clearing-settlement"],
			&[
				"lvss-label", "lvss-to-cecs", "lvss-to-becs", "lvss-to-apcs", "lvss-to-gabs", "lvss-to-cshd",
				"cecs-box", "becs-box", "apcs-box", "gabs-box", "cshd-box",
			],
		),
	),
	(
		"lvss-gear",
		rel(
			&["lvss-ecosystem"],
			&[
				"apcs-box", "becs-box", "cshd-box", "cecs-box", "gabs-box",
				"lvss-line-apcs", "lvss-line-becs", "lvss-line-cshd", "lvss-line-cecs", "lvss-line-gabs",
			],
		),
	),
	(
		"apcs-box",
		rel(
			&["lvss-ecosystem", "clearing-settlement"],
			&["lvss-gear-group", "lvss-line-apcs", "cheques-to-apcs-line", "cheques-box", "osko-to-adi-line"],
		),
	),
	(
		"becs-box",
		rel(
			&["lvss-ecosystem", "clearing-settlement", "direct-entry"],
			&[
				"becn-box", "becg-box", "becn-to-becs-line", "becg-to-becs-line", "de-box", "directentry-to-adi-line",
				"maroon-line-duplicate", "maroon-horizontal-branch", "lvss-gear-group", "lvss-line-becs",
			],
		),
	),
	(
		"cecs-box",
		rel(
			&["lvss-ecosystem", "clearing-settlement"],
			&[
				"lvss-gear-group", "lvss-line-cecs", "cecs-to-iac-line-1", "cecs-to-iac-line-2",
				"direct-entry-stack-bounding-box",
				"direct-entry-stack-line-blue", "direct-entry-stack-line-yellow",
				"direct-entry-stack-line-green", "direct-entry-stack-line-brown",
			],
		),
	),
	(
		"direct-entry-stack-bounding-box",
		rel(
			&["iac-ecosystem", "clearing-settlement"],
			&[
				"cecs-box", "lvss-gear-group", "lvss-line-cecs", "cecs-to-iac-line-1", "cecs-to-iac-line-2",
				"direct-entry-stack-line-blue", "direct-entry-stack-line-yellow",
				"direct-entry-stack-line-green", "direct-entry-stack-line-brown",
				"visa-box", "other-cards-box",
			],
		),
	),
	(
		"gabs-box",
		rel(&["lvss-ecosystem", "clearing-settlement"], &["lvss-gear-group", "lvss-line-gabs", "opa-box", "opa-label"]),
	),
	(
		"cshd-box",
		rel(&["lvss-ecosystem", "clearing-settlement"], &["lvss-gear-group", "lvss-line-cshd"]),
	),
	(
		"cheques-box",
		rel(
			&["apcs-ecosystem"],
			&["apcs-box", "lvss-gear-group", "lvss-line-apcs", "cheques-to-apcs-line", "osko-to-adi-line"],
		),
	),
	(
		"de-box",
		rel(
			&["becs-ecosystem", "direct-entry"],
			&[
				"becs-box", "becn-box", "becg-box", "becn-to-becs-line", "becg-to-becs-line", "directentry-to-adi-line",
				"maroon-line-duplicate", "maroon-horizontal-branch", "lvss-gear-group", "lvss-line-becs", "bpay-box",
			],
		),
	),
	(
		"becn-box",
		rel(
			&["becs-ecosystem", "direct-entry"],
			&["de-box", "becs-box", "becn-to-becs-line", "lvss-gear-group", "lvss-line-becs"],
		),
	),
	(
		"becg-box",
		rel(
			&["becs-ecosystem", "direct-entry"],
			&["de-box", "becs-box", "becg-to-becs-line", "lvss-gear-group", "lvss-line-becs"],
		),
	),
	(
		"adi-box",
		rel(
			&["adis", "participants"],
			&["domestic-banks-box", "specialised-adis-box", "other-adis-box", "dot-1", "dot-52", "dot-53", "dot-54", "dot-55"],
		),
	),
	(
		"domestic-banks-box",
		rel(&["adis", "participants", "domestic-banks"], &["adi-box", "dot-52", "dot-53", "dot-54", "dot-55"]),
	),
	("dot-52", rel(BIG_FOUR, &["dot-53", "dot-54", "dot-55", "domestic-banks-box", "adi-box"])),
	("dot-53", rel(BIG_FOUR, &["dot-52", "dot-54", "dot-55", "domestic-banks-box", "adi-box"])),
	("dot-54", rel(BIG_FOUR, &["dot-52", "dot-53", "dot-55", "domestic-banks-box", "adi-box"])),
	("dot-55", rel(BIG_FOUR, &["dot-52", "dot-53", "dot-54", "domestic-banks-box", "adi-box"])),
	(
		"non-adi-box",
		rel(
			&["non-adis", "participants"],
			&["psps-box", "cs-box", "dot-92", "dot-93", "dot-94", "dot-96", "dot-97", "dot-98"],
		),
	),
	(
		"psps-box",
		rel(&["non-adis", "payment-service-providers"], &["non-adi-box", "dot-92", "dot-93", "dot-94", "dot-95"]),
	),
	(
		"cs-box",
		rel(&["non-adis", "clearing-settlement"], &["non-adi-box", "dot-96", "dot-97", "dot-98"]),
	),
	(
		"dot-1",
		rel(&["foreign-branches", "fss-members"], &["blue-line-1", "yellow-line-1", "yellow-dot-1"]),
	),
	(
		"dot-2",
		rel(&["foreign-branches", "fss-members"], &["blue-line-2", "yellow-line-2", "yellow-dot-2"]),
	),
	("yellow-dot-1", rel(&["fss-members"], &["dot-1", "blue-line-1", "yellow-line-1"])),
	("yellow-dot-2", rel(&["fss-members"], &["dot-2", "blue-line-2", "yellow-line-2"])),
];

/// A group box drawn around a contiguous run of arc dots.
#[derive(Clone, Debug)]
pub struct BoxMembership {
	pub box_id: &'static str,
	pub dots: RangeInclusive<usize>,
	/// Whether hovering the box also lights every member dot.
	pub highlights_members: bool,
}

const fn members(box_id: &'static str, dots: RangeInclusive<usize>, highlights_members: bool) -> BoxMembership {
	BoxMembership {
		box_id,
		dots,
		highlights_members,
	}
}

/// Dot ranges enclosed by each group box, outermost first.
pub const BOX_MEMBERS: &[BoxMembership] = &[
	members("blue-dots-background", 0..=99, false),
	members("adi-box", 1..=91, false),
	members("international-banks-box", 1..=49, false),
	members("foreign-branches-box", 1..=44, false),
	members("foreign-subsidiaries-box", 45..=49, true),
	members("domestic-banks-box", 50..=83, false),
	members("specialised-adis-box", 84..=86, true),
	members("other-adis-box", 87..=91, true),
	members("non-adi-box", 92..=99, false),
	members("psps-box", 92..=95, true),
	members("cs-box", 96..=98, true),
];

/// Relationship row for an element, if it has one.
pub fn relationship(element_id: &str) -> Option<&'static Relationship> {
	ELEMENT_RELATIONSHIPS
		.iter()
		.find(|(id, _)| *id == element_id)
		.map(|(_, rel)| rel)
}

/// The element itself plus everything it lists as related.
pub fn related_elements(element_id: &str) -> BTreeSet<String> {
	let mut out = BTreeSet::from([element_id.to_string()]);
	if let Some(rel) = relationship(element_id) {
		out.extend(rel.related.iter().map(|id| id.to_string()));
	}
	out
}

/// The element plus every other table key sharing at least one group with it.
pub fn group_elements(element_id: &str) -> BTreeSet<String> {
	let mut out = BTreeSet::from([element_id.to_string()]);
	let Some(rel) = relationship(element_id) else {
		return out;
	};
	for (other, other_rel) in ELEMENT_RELATIONSHIPS {
		if *other != element_id && other_rel.groups.iter().any(|g| rel.groups.contains(g)) {
			out.insert(other.to_string());
		}
	}
	out
}

/// Dot range enclosed by a group box.
pub fn box_members(box_id: &str) -> Option<RangeInclusive<usize>> {
	BOX_MEMBERS
		.iter()
		.find(|b| b.box_id == box_id)
		.map(|b| b.dots.clone())
}

/// Everything a hover over `element_id` should light up: related elements,
/// plus member dots for boxes that highlight their contents.
pub fn highlight_set(element_id: &str) -> BTreeSet<String> {
	let mut out = related_elements(element_id);
	if let Some(b) = BOX_MEMBERS
		.iter()
		.find(|b| b.box_id == element_id && b.highlights_members)
	{
		out.extend(b.dots.clone().map(|i| format!("dot-{i}")));
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn related_contains_self_and_listed() {
		for (id, rel) in ELEMENT_RELATIONSHIPS {
			let got = related_elements(id);
			assert!(got.contains(*id), "{id} missing itself");
			for r in rel.related {
				assert!(got.contains(*r), "{id} missing {r}");
			}
		}
	}

	#[test]
	fn unknown_is_singleton() {
		let got = related_elements("not-a-real-element");
		assert_eq!(got, BTreeSet::from(["not-a-real-element".to_string()]));
		assert_eq!(group_elements("not-a-real-element").len(), 1);
	}

	#[test]
	fn groups_overlap() {
		let got = group_elements("dot-52");
		for id in ["dot-53", "dot-54", "dot-55", "adi-box", "domestic-banks-box"] {
			assert!(got.contains(id), "missing {id}");
		}
		assert!(!got.contains("npp-box"));
	}

	#[test]
	fn relations_are_directional() {
		let becn = related_elements("becn-box");
		assert!(becn.contains("de-box"));
		assert!(!becn.contains("becg-box"));
		assert!(!related_elements("cshd-box").contains("gabs-box"));
	}

	#[test]
	fn small_boxes_light_member_dots() {
		let psps = highlight_set("psps-box");
		for i in 92..=95 {
			assert!(psps.contains(&format!("dot-{i}")));
		}
		let adi = highlight_set("adi-box");
		assert!(!adi.contains("dot-30"));
		assert_eq!(box_members("cs-box"), Some(96..=98));
	}
}
