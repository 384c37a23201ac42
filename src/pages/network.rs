use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::network::{LayoutMode, WalletNetworkCanvas};

/// Wallet network demo with a grid / force layout toggle.
#[component]
pub fn Network() -> impl IntoView {
	let (mode, set_mode) = signal(LayoutMode::Grid);
	let toggle = move |_| {
		set_mode.update(|m| {
			*m = match m {
				LayoutMode::Grid => LayoutMode::Force,
				LayoutMode::Force => LayoutMode::Grid,
			}
		})
	};
	let label = move || match mode.get() {
		LayoutMode::Grid => "Force layout",
		LayoutMode::Force => "Grid layout",
	};

	view! {
		<div class="network-page">
			<div class="graph-overlay">
				<h1>"Payment Layer Network"</h1>
				<p class="subtitle">"Tokens move between wallets. Click a wallet to select it."</p>
				<button class="layout-toggle" on:click=toggle>{label}</button>
				<A href="/">"Back to diagram"</A>
			</div>
			<WalletNetworkCanvas mode=mode />
		</div>
	}
}
