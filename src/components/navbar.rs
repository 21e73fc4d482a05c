use leptos::ev;
use leptos::prelude::*;

use crate::content::NAV_ITEMS;

const SCROLL_THRESHOLD: f64 = 10.0;

pub fn is_scrolled(scroll_y: f64) -> bool {
	scroll_y > SCROLL_THRESHOLD
}

/// Fixed top navigation with a collapsible mobile menu.
#[component]
pub fn Navbar() -> impl IntoView {
	let (scrolled, set_scrolled) = signal(false);
	let (menu_open, set_menu_open) = signal(false);

	let handle = window_event_listener(ev::scroll, move |_| {
		let y = web_sys::window()
			.and_then(|w| w.scroll_y().ok())
			.unwrap_or_default();
		set_scrolled.set(is_scrolled(y));
	});
	on_cleanup(move || handle.remove());

	let links = move |mobile: bool| {
		NAV_ITEMS
			.iter()
			.map(|item| {
				view! {
					<a
						href=item.href
						class="nav-link"
						on:click=move |_| {
							if mobile {
								set_menu_open.set(false);
							}
						}
					>
						{item.name}
					</a>
				}
			})
			.collect_view()
	};

	view! {
		<nav class="navbar" class:scrolled=move || scrolled.get()>
			<div class="nav-desktop">{links(false)}</div>
			<button
				class="nav-menu-button"
				on:click=move |_| set_menu_open.update(|open| *open = !*open)
				aria-label=move || if menu_open.get() { "Close Menu" } else { "Open Menu" }
			>
				{move || if menu_open.get() { "✕" } else { "☰" }}
			</button>
			<div class="nav-mobile" class:open=move || menu_open.get()>
				{links(true)}
			</div>
		</nav>
	}
}
