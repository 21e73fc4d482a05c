use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;

use super::config::EngineConfig;
use super::layout::{self, Layout, Viewport};
use super::palette::{Palette, Theme};
use super::scheduler::{AnimationState, clamp_delta};
use super::texture::BackgroundTexture;

/// Inputs that invalidate the generated scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineEvent {
	ViewportChanged(Viewport),
	ThemePreferenceChanged(Theme),
}

/// Owns the whole circuit scene and its animation.
///
/// Lifecycle is `init` → any number of `handle`/`tick` → `dispose`. Both
/// events funnel into one regeneration, which replaces the layout, drops all
/// pulses and particles and rebuilds the backdrop texture.
pub struct CircuitEngine<R: Rng = StdRng> {
	rng: R,
	config: EngineConfig,
	viewport: Option<Viewport>,
	theme: Theme,
	palette: Palette,
	reduced_motion: bool,
	layout: Layout,
	animation: AnimationState,
	texture: BackgroundTexture,
	generation: u64,
	disposed: bool,
}

impl<R: Rng> CircuitEngine<R> {
	pub fn new(rng: R, config: EngineConfig) -> Self {
		Self {
			rng,
			config,
			viewport: None,
			theme: Theme::default(),
			palette: Theme::default().palette(),
			reduced_motion: false,
			layout: Layout::default(),
			animation: AnimationState::default(),
			texture: BackgroundTexture::default(),
			generation: 0,
			disposed: false,
		}
	}

	pub fn init(&mut self, viewport: Viewport, theme: Theme) {
		info!(
			"circuit engine init: {}x{} @{} ({:?})",
			viewport.width, viewport.height, viewport.pixel_ratio, theme
		);
		self.disposed = false;
		self.viewport = Some(viewport);
		self.set_theme(theme);
		self.regenerate();
	}

	pub fn handle(&mut self, event: EngineEvent) {
		if self.disposed || self.viewport.is_none() {
			return;
		}
		let changed = match event {
			EngineEvent::ViewportChanged(viewport) => {
				let changed = self.viewport != Some(viewport);
				self.viewport = Some(viewport);
				changed
			}
			EngineEvent::ThemePreferenceChanged(theme) => {
				let changed = self.theme != theme;
				self.set_theme(theme);
				changed
			}
		};
		if changed {
			self.regenerate();
		}
	}

	fn set_theme(&mut self, theme: Theme) {
		self.theme = theme;
		self.palette = theme.palette();
	}

	/// Read once by the host; slows pulses and particles rather than stopping
	/// the loop.
	pub fn set_reduced_motion(&mut self, reduced: bool) {
		self.reduced_motion = reduced;
	}

	fn regenerate(&mut self) {
		let Some(viewport) = self.viewport else {
			return;
		};
		self.animation.clear();
		self.layout = layout::generate(&viewport, &self.palette, &self.config, &mut self.rng);
		let (w, h) = viewport.device_size();
		self.texture = BackgroundTexture::generate(
			w,
			h,
			viewport.scale(),
			self.layout.grid,
			&self.palette,
			&mut self.rng,
		);
		self.generation += 1;
		debug!(
			"circuit layout #{}: {} chips, {} trunks, {} branches, {} nodes",
			self.generation,
			self.layout.chips.len(),
			self.layout.main_count(),
			self.layout.branch_count(),
			self.layout.nodes.len()
		);
	}

	/// Advance by `dt` seconds of wall time.
	pub fn tick(&mut self, dt: f64) {
		if self.disposed || self.viewport.is_none() {
			return;
		}
		let dt = clamp_delta(dt, self.config.max_delta);
		let motion = if self.reduced_motion {
			self.config.reduced_motion_scale
		} else {
			1.0
		};
		self.animation.step(
			&mut self.layout,
			&self.palette,
			&self.config,
			dt,
			motion,
			&mut self.rng,
		);
	}

	pub fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		info!("circuit engine disposed after {} frames", self.animation.frame);
		self.disposed = true;
		self.viewport = None;
		self.layout = Layout::default();
		self.animation = AnimationState::default();
		self.texture = BackgroundTexture::default();
	}

	pub fn viewport(&self) -> Option<Viewport> {
		self.viewport
	}

	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	pub fn animation(&self) -> &AnimationState {
		&self.animation
	}

	pub fn texture(&self) -> &BackgroundTexture {
		&self.texture
	}

	/// Bumped on every regeneration so renderers can cache the texture.
	pub fn generation(&self) -> u64 {
		self.generation
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;
	use crate::components::circuit_background::palette::Color;
	use crate::components::circuit_background::types::{Particle, Point, Pulse};

	fn engine(seed: u64) -> CircuitEngine<StdRng> {
		CircuitEngine::new(StdRng::seed_from_u64(seed), EngineConfig::default())
	}

	#[test]
	fn init_builds_layout_and_texture() {
		let mut e = engine(1);
		e.init(Viewport::new(200.0, 100.0, 2.0), Theme::Dark);
		assert_eq!(e.generation(), 1);
		assert!(!e.layout().is_empty());
		assert_eq!((e.texture().width, e.texture().height), (400, 200));
	}

	#[test]
	fn events_funnel_into_one_regeneration() {
		let mut e = engine(2);
		let vp = Viewport::new(640.0, 480.0, 1.0);
		e.init(vp, Theme::Light);
		e.handle(EngineEvent::ViewportChanged(vp));
		e.handle(EngineEvent::ThemePreferenceChanged(Theme::Light));
		assert_eq!(e.generation(), 1);

		e.handle(EngineEvent::ThemePreferenceChanged(Theme::Dark));
		assert_eq!(e.generation(), 2);
		assert_eq!(e.theme, Theme::Dark);

		e.handle(EngineEvent::ViewportChanged(Viewport::new(800.0, 600.0, 1.0)));
		assert_eq!(e.generation(), 3);
		assert_eq!(e.layout().width, 800.0);
	}

	#[test]
	fn regeneration_discards_transients() {
		let mut e = engine(3);
		e.init(Viewport::new(1000.0, 800.0, 1.0), Theme::Dark);
		for _ in 0..600 {
			e.tick(1.0 / 60.0);
		}
		e.handle(EngineEvent::ThemePreferenceChanged(Theme::Light));
		assert!(e.animation().pulses.is_empty());
		assert!(e.animation().particles.is_empty());
	}

	#[test]
	fn zero_area_viewport_keeps_an_empty_scene() {
		let mut e = engine(4);
		e.init(Viewport::new(0.0, 0.0, 1.0), Theme::Dark);
		assert!(e.layout().is_empty());
		assert!(e.texture().is_empty());
		for _ in 0..120 {
			e.tick(1.0 / 60.0);
		}
		assert!(e.animation().pulses.is_empty());
		assert!(e.animation().particles.is_empty());
	}

	#[test]
	fn dispose_stops_ticks_and_events() {
		let mut e = engine(5);
		e.init(Viewport::new(300.0, 300.0, 1.0), Theme::Dark);
		e.tick(0.016);
		let frame = e.animation().frame;
		assert_eq!(frame, 1);
		e.dispose();
		assert!(e.disposed);
		e.tick(0.016);
		e.handle(EngineEvent::ThemePreferenceChanged(Theme::Light));
		assert_eq!(e.animation().frame, 0);
		assert!(e.layout().is_empty());
		assert_eq!(e.generation(), 1);
	}

	fn seeded_motion(e: &mut CircuitEngine<StdRng>) {
		e.animation.pulses.insert(
			0,
			Pulse {
				path: (0..5).map(|i| Point::new(i as f64 * 50.0, 100.0)).collect(),
				progress: 0.0,
				speed: 0.5,
				color: Color::rgb(255, 255, 255),
				size: 2.0,
				trail: false,
			},
		);
		e.animation.particles.insert(
			0,
			Particle {
				pos: Point::new(500.0, 400.0),
				vx: 1.0,
				vy: -0.5,
				color: Color::rgb(255, 255, 255),
				size: 1.0,
				life: 1.0,
				decay: 0.0,
			},
		);
	}

	#[test]
	fn reduced_motion_slows_pulses_and_particles() {
		let vp = Viewport::new(1000.0, 800.0, 1.0);
		let (mut normal, mut reduced) = (engine(7), engine(7));
		reduced.set_reduced_motion(true);
		normal.init(vp, Theme::Dark);
		reduced.init(vp, Theme::Dark);
		seeded_motion(&mut normal);
		seeded_motion(&mut reduced);

		for _ in 0..10 {
			normal.tick(0.05);
			reduced.tick(0.05);
		}
		assert_eq!(normal.animation().frame, 10);
		assert_eq!(reduced.animation().frame, 10);

		let scale = EngineConfig::default().reduced_motion_scale;
		let fast = normal.animation().pulses[0].progress;
		let slow = reduced.animation().pulses[0].progress;
		assert!((fast - 0.25).abs() < 1e-9);
		assert!((slow - fast * scale).abs() < 1e-9);

		let moved = |e: &CircuitEngine<StdRng>| e.animation().particles[0].pos.x - 500.0;
		assert!(moved(&normal) > 0.0);
		assert!((moved(&reduced) - moved(&normal) * scale).abs() < 1e-9);
	}

	#[test]
	fn handle_before_init_is_ignored() {
		let mut e = engine(6);
		e.handle(EngineEvent::ViewportChanged(Viewport::new(100.0, 100.0, 1.0)));
		e.tick(0.016);
		assert_eq!(e.generation(), 0);
		assert!(e.viewport().is_none());
	}
}
