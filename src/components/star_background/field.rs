use log::debug;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::components::circuit_background::{Color, EngineEvent, Theme, Viewport};

/// Frame duration the per-frame velocities are tuned for.
const FRAME_SECONDS: f64 = 1.0 / 60.0;

const STAR_COLORS: [Color; 10] = [
	Color::rgb(0xff, 0xff, 0xff),
	Color::rgb(0xff, 0xfa, 0xcd),
	Color::rgb(0x87, 0xce, 0xeb),
	Color::rgb(0xe6, 0xe6, 0xfa),
	Color::rgb(0xff, 0xd7, 0x00),
	Color::rgb(0xff, 0x69, 0xb4),
	Color::rgb(0x00, 0xff, 0xff),
	Color::rgb(0x7d, 0xf9, 0xff),
	Color::rgb(0xf0, 0xf8, 0xff),
	Color::rgb(0xdd, 0xa0, 0xdd),
];

const PLANET_COLORS: [Color; 10] = [
	Color::rgb(0xff, 0x9e, 0x7d),
	Color::rgb(0xc1, 0xb5, 0xa7),
	Color::rgb(0xa2, 0xc5, 0xe8),
	Color::rgb(0xe8, 0xc9, 0xa2),
	Color::rgb(0xc7, 0xe8, 0xa2),
	Color::rgb(0xd6, 0x96, 0xdf),
	Color::rgb(0xf5, 0xdf, 0x80),
	Color::rgb(0x80, 0xf5, 0xe8),
	Color::rgb(0xaa, 0xa9, 0xad),
	Color::rgb(0x7d, 0x9c, 0xff),
];

const FLOWER_COLORS: [Color; 10] = [
	Color::rgb(0xff, 0x6b, 0x6b),
	Color::rgb(0xff, 0x9f, 0xf3),
	Color::rgb(0xfe, 0xca, 0x57),
	Color::rgb(0x1d, 0xd1, 0xa1),
	Color::rgb(0x54, 0xa0, 0xff),
	Color::rgb(0xa2, 0x9b, 0xfe),
	Color::rgb(0xff, 0x76, 0x75),
	Color::rgb(0x74, 0xb9, 0xff),
	Color::rgb(0xff, 0x9f, 0x43),
	Color::rgb(0xba, 0xdc, 0x58),
];

const SHAPE_COLORS: [Color; 10] = [
	Color::rgb(0xff, 0x6b, 0x6b),
	Color::rgb(0x48, 0xdb, 0xfb),
	Color::rgb(0x1d, 0xd1, 0xa1),
	Color::rgb(0xfe, 0xca, 0x57),
	Color::rgb(0x5f, 0x27, 0xcd),
	Color::rgb(0xff, 0x9f, 0xf3),
	Color::rgb(0x54, 0xa0, 0xff),
	Color::rgb(0xff, 0x76, 0x75),
	Color::rgb(0x74, 0xb9, 0xff),
	Color::rgb(0xa2, 0x9b, 0xfe),
];

/// Star-field tunables. Velocities are in percent of the viewport per 60 Hz
/// frame.
#[derive(Clone, Debug)]
pub struct StarConfig {
	/// Viewport area in CSS px² per element, dark theme.
	pub dark_density: f64,
	/// Viewport area in CSS px² per element, light theme.
	pub light_density: f64,
	pub max_velocity: f64,
	/// Random velocity nudge applied every frame.
	pub drift_force: f64,
	/// Velocity multiplier for planets.
	pub planet_speed: f64,
	/// Largest frame delta, in seconds, fed to a tick.
	pub max_delta: f64,
	pub reduced_motion_scale: f64,
}

impl Default for StarConfig {
	fn default() -> Self {
		Self {
			dark_density: 15000.0,
			light_density: 8000.0,
			max_velocity: 0.02,
			drift_force: 0.0001,
			planet_speed: 0.3,
			max_delta: 0.1,
			reduced_motion_scale: 0.3,
		}
	}
}

impl StarConfig {
	pub fn density(&self, theme: Theme) -> f64 {
		match theme {
			Theme::Dark => self.dark_density,
			Theme::Light => self.light_density,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
	Circle,
	Square,
	Triangle,
	Diamond,
	Dot,
	Heart,
	Cross,
	Star,
	Hexagon,
}

pub const SHAPES: [ShapeKind; 9] = [
	ShapeKind::Circle,
	ShapeKind::Square,
	ShapeKind::Triangle,
	ShapeKind::Diamond,
	ShapeKind::Dot,
	ShapeKind::Heart,
	ShapeKind::Cross,
	ShapeKind::Star,
	ShapeKind::Hexagon,
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Kind {
	Star {
		glow: f64,
	},
	Planet {
		ring: Option<Color>,
		banded: bool,
		halo: f64,
	},
	Flower {
		petals: u8,
		center: Color,
		/// Degrees per frame.
		spin: f64,
	},
	Shape(ShapeKind),
}

/// One drifting element. Positions are percentages of the viewport and stay
/// in `[0, 100)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
	pub kind: Kind,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// CSS pixels.
	pub size: f64,
	pub color: Color,
	pub opacity: f64,
	/// Degrees.
	pub rotation: f64,
	/// Twinkle offset in radians.
	pub phase: f64,
}

/// Wrap a percentage into `[0, 100)`.
pub fn wrap_percent(v: f64) -> f64 {
	let w = v.rem_euclid(100.0);
	if w >= 100.0 { 0.0 } else { w }
}

/// `floor(area / density)`; zero for a degenerate viewport.
pub fn element_count(viewport: &Viewport, theme: Theme, config: &StarConfig) -> usize {
	let density = config.density(theme);
	if viewport.is_degenerate() || !(density > 0.0) {
		return 0;
	}
	(viewport.width * viewport.height / density).floor() as usize
}

fn pick_color<R: Rng + ?Sized>(colors: &[Color], rng: &mut R) -> Color {
	colors.choose(rng).copied().unwrap_or(Color::rgb(255, 255, 255))
}

impl Element {
	pub fn random<R: Rng + ?Sized>(theme: Theme, config: &StarConfig, rng: &mut R) -> Self {
		let dark = theme.is_dark();
		let mut el = Element {
			kind: Kind::Star { glow: 0.0 },
			x: rng.gen_range(0.0..100.0),
			y: rng.gen_range(0.0..100.0),
			vx: (rng.r#gen::<f64>() - 0.5) * config.max_velocity,
			vy: (rng.r#gen::<f64>() - 0.5) * config.max_velocity,
			size: 0.0,
			color: Color::rgb(255, 255, 255),
			opacity: 0.0,
			rotation: rng.gen_range(0.0..360.0),
			phase: rng.gen_range(0.0..std::f64::consts::TAU),
		};
		match rng.gen_range(0..4) {
			0 => {
				el.size = rng.r#gen::<f64>().powi(2) * 6.0 + 1.0;
				el.color = pick_color(&STAR_COLORS, rng);
				el.opacity = rng.gen_range(0.3..0.8);
				el.kind = Kind::Star {
					glow: rng.gen_range(4.0..12.0),
				};
			}
			1 => {
				el.size = rng.gen_range(15.0..45.0);
				el.color = pick_color(&PLANET_COLORS, rng);
				el.opacity = if dark {
					rng.gen_range(0.3..1.0)
				} else {
					rng.gen_range(0.1..0.5)
				};
				let ring = pick_color(&PLANET_COLORS, rng);
				el.kind = Kind::Planet {
					ring: rng.gen_bool(0.5).then_some(ring),
					banded: rng.gen_bool(0.7),
					halo: rng.gen_range(5.0..15.0),
				};
				el.vx *= config.planet_speed;
				el.vy *= config.planet_speed;
			}
			2 => {
				el.size = rng.gen_range(10.0..30.0);
				el.color = pick_color(&FLOWER_COLORS, rng);
				el.opacity = if dark {
					rng.gen_range(0.1..0.5)
				} else {
					rng.gen_range(0.2..0.7)
				};
				el.kind = Kind::Flower {
					petals: rng.gen_range(5..=9),
					center: pick_color(&FLOWER_COLORS, rng),
					spin: (rng.r#gen::<f64>() - 0.5) * 0.01,
				};
			}
			_ => {
				el.size = rng.r#gen::<f64>().powi(2) * 30.0 + 6.0;
				el.color = pick_color(&SHAPE_COLORS, rng);
				el.opacity = if dark {
					rng.gen_range(0.05..0.35)
				} else {
					rng.gen_range(0.1..0.4)
				};
				el.kind = Kind::Shape(*SHAPES.choose(rng).unwrap_or(&ShapeKind::Circle));
			}
		}
		el
	}

	/// Advance by `frames` 60 Hz frames. Velocity takes a random nudge and is
	/// held within `±max_velocity`; position wraps around the viewport.
	pub fn step<R: Rng + ?Sized>(&mut self, frames: f64, motion: f64, config: &StarConfig, rng: &mut R) {
		let limit = config.max_velocity;
		self.vx = (self.vx + (rng.r#gen::<f64>() - 0.5) * config.drift_force * frames).clamp(-limit, limit);
		self.vy = (self.vy + (rng.r#gen::<f64>() - 0.5) * config.drift_force * frames).clamp(-limit, limit);
		self.x = wrap_percent(self.x + self.vx * frames * motion);
		self.y = wrap_percent(self.y + self.vy * frames * motion);
		if let Kind::Flower { spin, .. } = self.kind {
			self.rotation = (self.rotation + spin * frames * motion).rem_euclid(360.0);
		}
	}
}

/// Owns the drifting elements. Same lifecycle as the circuit engine: `init`,
/// then `handle`/`tick`, then `dispose`. A resize or theme change regenerates
/// the whole field.
pub struct StarField<R: Rng = StdRng> {
	rng: R,
	config: StarConfig,
	viewport: Option<Viewport>,
	theme: Theme,
	reduced_motion: bool,
	elements: Vec<Element>,
	frame: u64,
	generation: u64,
	disposed: bool,
}

impl<R: Rng> StarField<R> {
	pub fn new(rng: R, config: StarConfig) -> Self {
		Self {
			rng,
			config,
			viewport: None,
			theme: Theme::default(),
			reduced_motion: false,
			elements: Vec::new(),
			frame: 0,
			generation: 0,
			disposed: false,
		}
	}

	pub fn init(&mut self, viewport: Viewport, theme: Theme) {
		self.disposed = false;
		self.viewport = Some(viewport);
		self.theme = theme;
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
				self.theme = theme;
				changed
			}
		};
		if changed {
			self.regenerate();
		}
	}

	pub fn set_reduced_motion(&mut self, reduced: bool) {
		self.reduced_motion = reduced;
	}

	fn regenerate(&mut self) {
		let Some(viewport) = self.viewport else {
			return;
		};
		let count = element_count(&viewport, self.theme, &self.config);
		let (theme, config, rng) = (self.theme, &self.config, &mut self.rng);
		self.elements = (0..count).map(|_| Element::random(theme, config, rng)).collect();
		self.frame = 0;
		self.generation += 1;
		debug!(
			"star field #{}: {} elements ({:?})",
			self.generation,
			self.elements.len(),
			self.theme
		);
	}

	pub fn tick(&mut self, dt: f64) {
		if self.disposed || self.viewport.is_none() {
			return;
		}
		let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, self.config.max_delta) };
		let frames = dt / FRAME_SECONDS;
		let motion = if self.reduced_motion {
			self.config.reduced_motion_scale
		} else {
			1.0
		};
		for el in &mut self.elements {
			el.step(frames, motion, &self.config, &mut self.rng);
		}
		self.frame += 1;
	}

	pub fn dispose(&mut self) {
		self.disposed = true;
		self.viewport = None;
		self.elements.clear();
	}

	pub fn viewport(&self) -> Option<Viewport> {
		self.viewport
	}

	pub fn elements(&self) -> &[Element] {
		&self.elements
	}

	pub fn frame(&self) -> u64 {
		self.frame
	}
}
