//! Page-wide light/dark theme: persisted choice, OS fallback and the toggle.

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::Storage;

use crate::components::circuit_background::Theme;
use crate::hooks::use_prefers_dark;

const STORAGE_KEY: &str = "theme";
const DARK_CLASS: &str = "dark";

/// Theme to start with and whether it came from an explicit user choice.
pub fn initial_theme(stored: Option<&str>, prefers_dark: bool) -> (Theme, bool) {
	match stored.and_then(Theme::parse) {
		Some(theme) => (theme, true),
		None => (Theme::from_dark(prefers_dark), false),
	}
}

fn local_storage() -> Option<Storage> {
	web_sys::window()?.local_storage().ok()?
}

fn read_stored() -> Option<String> {
	local_storage()?.get_item(STORAGE_KEY).ok()?
}

fn persist(theme: Theme) {
	let Some(storage) = local_storage() else {
		warn!("localStorage unavailable; theme not persisted");
		return;
	};
	let _ = storage.set_item(STORAGE_KEY, theme.as_str());
}

fn apply_to_document(theme: Theme) {
	let Some(root) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
	else {
		return;
	};
	let _ = root.class_list().toggle_with_force(DARK_CLASS, theme.is_dark());
}

/// Shared theme signal, provided once at the app root.
#[derive(Clone, Copy)]
pub struct ThemeState {
	theme: RwSignal<Theme>,
	explicit: RwSignal<bool>,
}

impl ThemeState {
	pub fn theme(&self) -> Signal<Theme> {
		self.theme.into()
	}

	/// Flip the theme and remember it as the user's choice.
	pub fn toggle(&self) {
		let next = self.theme.get_untracked().toggled();
		self.explicit.set(true);
		self.theme.set(next);
		persist(next);
		debug!("theme toggled to {}", next.as_str());
	}
}

/// Create the theme state, keep `<html class="dark">` in sync with it and
/// follow the OS preference until the user picks a theme.
pub fn provide_theme() -> ThemeState {
	let prefers_dark = use_prefers_dark();
	let stored = read_stored();
	let (theme, explicit) = initial_theme(stored.as_deref(), prefers_dark.get_untracked());
	let state = ThemeState {
		theme: RwSignal::new(theme),
		explicit: RwSignal::new(explicit),
	};

	Effect::new(move |_| {
		let dark = prefers_dark.get();
		if !state.explicit.get_untracked() {
			state.theme.set(Theme::from_dark(dark));
		}
	});
	Effect::new(move |_| apply_to_document(state.theme.get()));

	provide_context(state);
	state
}

pub fn use_theme() -> ThemeState {
	expect_context::<ThemeState>()
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
	let state = use_theme();
	let dark = move || state.theme().get().is_dark();

	view! {
		<button
			class="theme-toggle"
			class:is-dark=dark
			on:click=move |_| state.toggle()
			aria-label=move || if dark() { "Switch to light theme" } else { "Switch to dark theme" }
		>
			{move || if dark() { "☀" } else { "☾" }}
		</button>
	}
}
