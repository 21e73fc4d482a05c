use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page with links back into the site.
#[component]
pub fn NotFound() -> impl IntoView {
	let go_back = |_: leptos::ev::MouseEvent| {
		if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
			let _ = history.back();
		}
	};

	view! {
		<div class="not-found">
			<h1 class="error-code">"404"</h1>
			<h2>"Page Not Found"</h2>
			<p>"The page you're looking for has drifted into the digital void."</p>
			<div class="not-found-actions">
				<A href="/">"Return Home"</A>
				<button on:click=go_back>"Go Back"</button>
			</div>
		</div>
	}
}
