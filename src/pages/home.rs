use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::diagram::{ExportButton, PaymentsDiagram};
use crate::components::legend::Legend;

/// Diagram page: the topology, its legend and the PNG export.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<header class="diagram-header">
			<h1>"Australian Payments System"</h1>
			<nav>
				<ExportButton />
				<A href="/network">"Wallet network"</A>
			</nav>
		</header>
		<main class="diagram-page">
			<PaymentsDiagram />
			<Legend />
		</main>
	}
}
