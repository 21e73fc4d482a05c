use std::time::Duration;

use leptos::prelude::*;
use log::warn;

/// How long the splash stays up before the router is mounted.
pub const SPLASH_DURATION: Duration = Duration::from_millis(3500);
const PROGRESS_TICK: Duration = Duration::from_millis(40);

/// One progress tick: +1% up to 100.
pub fn advance(progress: u8) -> u8 {
	progress.saturating_add(1).min(100)
}

/// Startup splash with a progress bar. The app unmounts it after
/// [`SPLASH_DURATION`], usually before the bar reaches 100%.
#[component]
pub fn LoadingScreen() -> impl IntoView {
	let (progress, set_progress) = signal(0u8);
	let done = move || progress.get() >= 100;

	match set_interval_with_handle(move || set_progress.update(|p| *p = advance(*p)), PROGRESS_TICK) {
		Ok(handle) => on_cleanup(move || handle.clear()),
		Err(e) => {
			warn!("loading screen: interval failed: {e:?}");
			set_progress.set(100);
		}
	}

	view! {
		<div class="loading-screen" class:fade-out=done>
			<div class="loading-cube" aria-hidden="true"></div>
			<h1 class="loading-title">"Initializing Portfolio"</h1>
			<div class="loading-track">
				<div class="loading-bar" style:width=move || format!("{}%", progress.get())></div>
			</div>
			<div class="loading-percent">{move || format!("{}% Complete", progress.get())}</div>
		</div>
	}
}
