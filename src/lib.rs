//! Interactive Australian payments-system topology diagram, built as a
//! Leptos client-side app, plus a small wallet network demo.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod color;
mod config;
mod data;
mod diagram;
mod error;
mod export;
mod interaction;

mod components;
mod pages;

pub use config::LayoutParams;
pub use data::{TooltipTable, group_elements, related_elements};
pub use diagram::{Scene, build_scene, render_document};
pub use error::{DiagramError, Result};
pub use export::download_png;
pub use interaction::{DotIndex, InteractionSession};

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::network::Network;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the diagram, the network demo and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Australian Payments System Topology" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/network") view=Network />
			</Routes>
		</Router>
	}
}
