//! Reactive wrappers over browser media queries.

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::MediaQueryList;

/// Live `matchMedia` result. The change listener is removed when the owning
/// component is cleaned up.
pub fn use_media_query(query: &str) -> Signal<bool> {
	let Some(mql) = web_sys::window().and_then(|w| w.match_media(query).ok().flatten()) else {
		warn!("matchMedia unavailable for {query}");
		return Signal::derive(|| false);
	};

	let (matches, set_matches) = signal(mql.matches());
	let mql_cb = mql.clone();
	let cb: Closure<dyn FnMut()> = Closure::new(move || set_matches.set(mql_cb.matches()));
	let _ = mql.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref());

	let listener = StoredValue::new_local((mql, cb));
	on_cleanup(move || {
		listener.try_with_value(|(mql, cb): &(MediaQueryList, Closure<dyn FnMut()>)| {
			let _ = mql.remove_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
		});
	});

	matches.into()
}

pub fn use_prefers_dark() -> Signal<bool> {
	use_media_query("(prefers-color-scheme: dark)")
}

pub fn use_reduced_motion() -> Signal<bool> {
	use_media_query("(prefers-reduced-motion: reduce)")
}
