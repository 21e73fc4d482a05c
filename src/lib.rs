//! Personal portfolio site rendered client-side with Leptos, over an animated
//! procedural circuit-board background.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// getrandom needs its `js` feature enabled for StdRng::from_entropy in the browser.
use getrandom as _;

// Modules
mod components;
mod content;
mod hooks;
mod pages;

// Top-Level pages
use crate::components::loading_screen::{LoadingScreen, SPLASH_DURATION};
use crate::components::theme::provide_theme;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Shows the loading splash, then routes to the homepage or the 404 page.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_theme();

	let (loading, set_loading) = signal(true);
	set_timeout(move || set_loading.set(false), SPLASH_DURATION);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />

		// sets the document title
		<Title text="Abdullah Mansoor | Portfolio" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Show when=move || !loading.get() fallback=|| view! { <LoadingScreen /> }>
			<Router>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
				</Routes>
			</Router>
		</Show>
	}
}
