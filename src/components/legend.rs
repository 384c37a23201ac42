use leptos::prelude::*;

use crate::data::legend::{LegendCategory, LegendLine, swatch_segments};

const SWATCH_WIDTH: f64 = 200.0;

#[component]
fn LineSwatch(line: &'static LegendLine) -> impl IntoView {
	let dash = line.style.dasharray().unwrap_or("none");
	let strokes = swatch_segments(line, SWATCH_WIDTH)
		.into_iter()
		.map(|(x1, y1, x2, y2)| {
			view! {
				<line
					x1=x1
					y1=y1
					x2=x2
					y2=y2
					stroke=line.color
					stroke-width=line.width
					stroke-dasharray=dash
					stroke-linecap="round"
				/>
			}
		})
		.collect_view();

	view! {
		<div class="legend-item" title=(!line.description.is_empty()).then_some(line.description)>
			<div class="line-sample">
				<svg width=SWATCH_WIDTH height="30" viewBox=format!("0 0 {SWATCH_WIDTH} 30")>
					{strokes}
				</svg>
			</div>
			<div class="line-label">{line.name}</div>
		</div>
	}
}

/// Line legend, one section per category.
#[component]
pub fn Legend() -> impl IntoView {
	let sections = LegendCategory::ALL
		.into_iter()
		.map(|category| {
			let items = category
				.lines()
				.iter()
				.map(|line| view! { <LineSwatch line=line /> })
				.collect_view();
			view! {
				<section class="legend-category">
					<h3>{category.title()}</h3>
					{items}
				</section>
			}
		})
		.collect_view();

	view! { <div id="legend-container" class="legend">{sections}</div> }
}
