use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use web_sys::CanvasRenderingContext2d;

use super::config::EngineConfig;
use super::engine::{CircuitEngine, EngineEvent};
use super::layout::Viewport;
use super::palette::Theme;
use super::render::{self, TextureSurface};
use crate::components::canvas_scene::{CanvasScene, use_canvas_scene};
use crate::hooks::use_reduced_motion;

/// The engine paired with its cached backdrop surface.
struct CircuitScene {
	engine: CircuitEngine,
	surface: TextureSurface,
}

impl CanvasScene for CircuitScene {
	const NAME: &'static str = "circuit background";

	fn init(&mut self, viewport: Viewport, theme: Theme) {
		self.engine.init(viewport, theme);
	}

	fn handle(&mut self, event: EngineEvent) {
		self.engine.handle(event);
	}

	fn tick(&mut self, dt: f64) {
		self.engine.tick(dt);
	}

	fn draw(&mut self, ctx: &CanvasRenderingContext2d) {
		render::render(&self.engine, &mut self.surface, ctx);
	}

	fn dispose(&mut self) {
		self.engine.dispose();
	}
}

/// Full-viewport animated circuit board drawn behind the page content.
#[component]
pub fn CircuitBackground(#[prop(into)] theme: Signal<Theme>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let reduced_motion = use_reduced_motion();

	use_canvas_scene(canvas_ref, theme, move || {
		let mut engine = CircuitEngine::new(StdRng::from_entropy(), EngineConfig::default());
		engine.set_reduced_motion(reduced_motion.get_untracked());
		CircuitScene {
			engine,
			surface: TextureSurface::default(),
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="circuit-background"
			aria-hidden="true"
			style="position: fixed; inset: 0; width: 100vw; height: 100vh; display: block; pointer-events: none; z-index: 0;"
		/>
	}
}
