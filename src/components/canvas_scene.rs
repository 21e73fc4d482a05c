//! Host plumbing shared by the full-viewport background canvases: backing
//! store sizing, the `requestAnimationFrame` loop, resize and theme events and
//! teardown on unmount.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::components::circuit_background::{EngineEvent, Theme, Viewport};

/// Scene state plus its renderer, driven by [`use_canvas_scene`].
pub trait CanvasScene {
	/// Used in log lines.
	const NAME: &'static str;

	fn init(&mut self, viewport: Viewport, theme: Theme);
	fn handle(&mut self, event: EngineEvent);
	/// Advance by `dt` seconds of wall time.
	fn tick(&mut self, dt: f64);
	fn draw(&mut self, ctx: &CanvasRenderingContext2d);
	fn dispose(&mut self);
}

/// Everything the frame loop and listeners share, so cleanup can reach it.
struct LoopHandles<S> {
	scene: Rc<RefCell<Option<S>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
	frame_id: Rc<Cell<Option<i32>>>,
	resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl<S> Clone for LoopHandles<S> {
	fn clone(&self) -> Self {
		Self {
			scene: self.scene.clone(),
			animate: self.animate.clone(),
			frame_id: self.frame_id.clone(),
			resize_cb: self.resize_cb.clone(),
		}
	}
}

impl<S> Default for LoopHandles<S> {
	fn default() -> Self {
		Self {
			scene: Rc::new(RefCell::new(None)),
			animate: Rc::new(RefCell::new(None)),
			frame_id: Rc::new(Cell::new(None)),
			resize_cb: Rc::new(RefCell::new(None)),
		}
	}
}

impl<S: CanvasScene> LoopHandles<S> {
	fn teardown(&self) {
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.frame_id.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(ref cb) = *self.resize_cb.borrow() {
				let _ =
					window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		self.resize_cb.borrow_mut().take();
		self.animate.borrow_mut().take();
		if let Some(ref mut scene) = *self.scene.borrow_mut() {
			scene.dispose();
			debug!("{}: disposed", S::NAME);
		}
	}
}

fn read_viewport(window: &Window) -> Option<Viewport> {
	Some(Viewport::new(
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
		window.device_pixel_ratio(),
	))
}

fn size_canvas(canvas: &HtmlCanvasElement, viewport: &Viewport) {
	let (w, h) = viewport.device_size();
	canvas.set_width(w);
	canvas.set_height(h);
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Mount the scene built by `make` on `canvas_ref` once the element exists,
/// and run it until the owning component is cleaned up.
pub fn use_canvas_scene<S, F>(canvas_ref: NodeRef<Canvas>, theme: Signal<Theme>, make: F)
where
	S: CanvasScene + 'static,
	F: Fn() -> S + 'static,
{
	let handles = LoopHandles::<S>::default();
	let stored = StoredValue::new_local(handles.clone());
	let (handles_init, scene_theme) = (handles.clone(), handles.scene.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handles_init.scene.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(viewport) = read_viewport(&window) else {
			warn!("{}: viewport size unavailable", S::NAME);
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("{}: 2d context unavailable", S::NAME);
			return;
		};

		size_canvas(&canvas, &viewport);
		let mut scene = make();
		scene.init(viewport, theme.get_untracked());
		*handles_init.scene.borrow_mut() = Some(scene);

		let (scene_resize, canvas_resize) = (handles_init.scene.clone(), canvas.clone());
		*handles_init.resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(viewport) = web_sys::window().as_ref().and_then(read_viewport) else {
				return;
			};
			size_canvas(&canvas_resize, &viewport);
			if let Some(ref mut scene) = *scene_resize.borrow_mut() {
				scene.handle(EngineEvent::ViewportChanged(viewport));
			}
		}));
		if let Some(ref cb) = *handles_init.resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (scene_anim, animate_inner, frame_id) = (
			handles_init.scene.clone(),
			handles_init.animate.clone(),
			handles_init.frame_id.clone(),
		);
		let mut last_frame: Option<f64> = None;
		*handles_init.animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			let dt = last_frame.map_or(0.0, |prev| (now - prev) / 1000.0);
			last_frame = Some(now);
			if let Some(ref mut scene) = *scene_anim.borrow_mut() {
				scene.tick(dt);
				scene.draw(&ctx);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *handles_init.animate.borrow() {
			handles_init
				.frame_id
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	Effect::new(move |_| {
		let theme = theme.get();
		if let Some(ref mut scene) = *scene_theme.borrow_mut() {
			scene.handle(EngineEvent::ThemePreferenceChanged(theme));
		}
	});

	on_cleanup(move || {
		stored.try_with_value(LoopHandles::teardown);
	});
}
