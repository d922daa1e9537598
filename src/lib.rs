//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
mod content;
mod pages;

// Top-Level pages
use crate::pages::collection::{CollectionPage, ItemPage};
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::skills::Skills;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router for the cosmos home, the skill tree and the markdown collections.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="zh-CN" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Drill - Cosmos" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/skills") view=Skills />
				<Route path=path!("/:collection") view=CollectionPage />
				<Route path=path!("/:collection/:slug") view=ItemPage />
			</Routes>
		</Router>
	}
}
