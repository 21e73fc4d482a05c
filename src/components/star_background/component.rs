use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use web_sys::CanvasRenderingContext2d;

use super::field::{StarConfig, StarField};
use super::render;
use crate::components::canvas_scene::{CanvasScene, use_canvas_scene};
use crate::components::circuit_background::{EngineEvent, Theme, Viewport};
use crate::hooks::use_reduced_motion;

impl CanvasScene for StarField {
	const NAME: &'static str = "star field";

	fn init(&mut self, viewport: Viewport, theme: Theme) {
		StarField::init(self, viewport, theme);
	}

	fn handle(&mut self, event: EngineEvent) {
		StarField::handle(self, event);
	}

	fn tick(&mut self, dt: f64) {
		StarField::tick(self, dt);
	}

	fn draw(&mut self, ctx: &CanvasRenderingContext2d) {
		render::render(self, ctx);
	}

	fn dispose(&mut self) {
		StarField::dispose(self);
	}
}

/// Transparent full-viewport layer of drifting elements. Denser in the light
/// theme; regenerated on resize and theme changes.
#[component]
pub fn StarBackground(#[prop(into)] theme: Signal<Theme>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let reduced_motion = use_reduced_motion();

	use_canvas_scene(canvas_ref, theme, move || {
		let mut field = StarField::new(StdRng::from_entropy(), StarConfig::default());
		field.set_reduced_motion(reduced_motion.get_untracked());
		field
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="star-background"
			aria-hidden="true"
			style="position: fixed; inset: 0; width: 100vw; height: 100vh; display: block; pointer-events: none; z-index: 0;"
		/>
	}
}
