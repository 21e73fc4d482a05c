use std::f64::consts::TAU;

use rand::Rng;
use rand::seq::SliceRandom;

use super::config::EngineConfig;
use super::layout::Layout;
use super::palette::{Palette, pick};
use super::types::{Particle, Pulse};

/// Frame duration the per-frame constants are tuned for.
const FRAME_SECONDS: f64 = 1.0 / 60.0;

/// Clamp a raw frame delta into `[0, max]`; NaN counts as no time passing.
pub fn clamp_delta(dt: f64, max: f64) -> f64 {
	if dt.is_nan() { 0.0 } else { dt.clamp(0.0, max) }
}

/// Transient animation state: travelling pulses, ambient particles and the
/// frame counter.
#[derive(Clone, Debug, Default)]
pub struct AnimationState {
	pub pulses: Vec<Pulse>,
	pub particles: Vec<Particle>,
	pub frame: u64,
}

impl AnimationState {
	pub fn clear(&mut self) {
		self.pulses.clear();
		self.particles.clear();
	}

	/// Advance one frame. `dt` must already be clamped; `motion` scales pulse
	/// and particle speed.
	pub fn step<R: Rng + ?Sized>(
		&mut self,
		layout: &mut Layout,
		palette: &Palette,
		config: &EngineConfig,
		dt: f64,
		motion: f64,
		rng: &mut R,
	) {
		self.frame += 1;

		for pulse in &mut self.pulses {
			pulse.progress += pulse.speed * dt * motion;
		}
		self.pulses.retain(|p| !p.finished());

		let frames = dt / FRAME_SECONDS;
		let drag = config.particle_drag.powf(frames);
		for particle in &mut self.particles {
			particle.vx *= drag;
			particle.vy *= drag;
			particle.pos = particle.pos.offset(
				particle.vx * frames * motion,
				particle.vy * frames * motion,
			);
			particle.life -= particle.decay * dt;
		}
		self.particles.retain(Particle::alive);

		if self.frame % config.particle_cadence.max(1) == 0 && rng.gen_bool(config.particle_chance) {
			self.spawn_particle(layout, palette, rng);
		}
		if self.frame % config.pulse_cadence.max(1) == 0 && rng.gen_bool(config.pulse_chance) {
			self.spawn_pulse(layout, palette, rng);
		}
	}

	fn spawn_particle<R: Rng + ?Sized>(&mut self, layout: &Layout, palette: &Palette, rng: &mut R) {
		let sources: Vec<_> = layout
			.nodes
			.iter()
			.filter(|n| n.active && n.generates_data)
			.collect();
		let Some(node) = sources.choose(rng) else {
			return;
		};
		let angle = rng.gen_range(0.0..TAU);
		let speed = rng.gen_range(0.2..0.8);
		self.particles.push(Particle {
			pos: node.pos,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			color: pick(&palette.particles, node.color, rng),
			size: rng.gen_range(1.0..2.5),
			life: 1.0,
			decay: rng.gen_range(0.4..0.9),
		});
	}

	/// Picks two distinct active nodes and sends a pulse between them if some
	/// circuit passes through both. A miss is simply dropped for this cycle.
	fn spawn_pulse<R: Rng + ?Sized>(&mut self, layout: &mut Layout, palette: &Palette, rng: &mut R) {
		let active: Vec<usize> = layout
			.nodes
			.iter()
			.enumerate()
			.filter(|(_, n)| n.active)
			.map(|(i, _)| i)
			.collect();
		let pair: Vec<usize> = active.choose_multiple(rng, 2).copied().collect();
		let &[source, target] = pair.as_slice() else {
			return;
		};
		let (from, to) = (layout.nodes[source].pos, layout.nodes[target].pos);
		let Some(path) = layout.circuits.iter().find_map(|c| c.sub_path(from, to)) else {
			return;
		};

		let length = (path.len() - 1) as f64 * layout.grid.max(1.0);
		self.pulses.push(Pulse {
			path,
			progress: 0.0,
			speed: rng.gen_range(80.0..180.0) / length,
			color: pick(&palette.pulses, palette.highlight, rng),
			size: rng.gen_range(2.0..3.5),
			trail: rng.gen_bool(0.7),
		});
		layout.nodes[source].last_pulse_time = Some(self.frame);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::circuit_background::layout::{Viewport, generate};
	use crate::components::circuit_background::palette::{Color, Theme};
	use crate::components::circuit_background::types::{Circuit, Node, Point};

	fn node(pos: Point, active: bool, generates_data: bool) -> Node {
		Node {
			pos,
			radius: 3.0,
			color: Color::rgb(0, 200, 255),
			pulse_rate: 0.04,
			pulse_phase: 0.0,
			active,
			generates_data,
			last_pulse_time: None,
			glow_intensity: 1.0,
		}
	}

	fn circuit(path: Vec<Point>) -> Circuit {
		Circuit {
			path,
			width: 2.0,
			color: Color::rgb(0, 150, 200),
			is_main: true,
			data_flow: false,
			flow_speed: 0.5,
			flow_offset: 0.0,
			flow_intensity: 0.5,
		}
	}

	fn straight(y: f64) -> Vec<Point> {
		(0..5).map(|i| Point::new(i as f64 * 10.0, y)).collect()
	}

	fn eager() -> EngineConfig {
		EngineConfig {
			particle_cadence: 1,
			particle_chance: 1.0,
			pulse_cadence: 1,
			pulse_chance: 1.0,
			..EngineConfig::default()
		}
	}

	#[test]
	fn delta_is_clamped() {
		assert_eq!(clamp_delta(5.0, 0.1), 0.1);
		assert_eq!(clamp_delta(-1.0, 0.1), 0.0);
		assert_eq!(clamp_delta(f64::NAN, 0.1), 0.0);
		assert_eq!(clamp_delta(0.016, 0.1), 0.016);
	}

	#[test]
	fn pulse_progress_grows_until_removed() {
		let mut layout = Layout::default();
		let palette = Theme::Dark.palette();
		let config = EngineConfig {
			pulse_chance: 0.0,
			particle_chance: 0.0,
			..EngineConfig::default()
		};
		let mut rng = StdRng::seed_from_u64(1);
		let mut state = AnimationState::default();
		state.pulses.push(Pulse {
			path: straight(0.0),
			progress: 0.0,
			speed: 0.5,
			color: Color::rgb(255, 255, 255),
			size: 2.0,
			trail: true,
		});

		let mut last = 0.0;
		let mut frames = 0;
		while let Some(pulse) = state.pulses.first() {
			assert!(pulse.progress >= last);
			assert!(pulse.progress < 1.0);
			last = pulse.progress;
			state.step(&mut layout, &palette, &config, 0.125, 1.0, &mut rng);
			frames += 1;
			assert!(frames < 100);
		}
		assert_eq!(frames, 16);
	}

	#[test]
	fn particle_life_falls_until_removed() {
		let mut layout = Layout::default();
		let palette = Theme::Light.palette();
		let config = EngineConfig::default();
		let mut rng = StdRng::seed_from_u64(2);
		let mut state = AnimationState::default();
		state.particles.push(Particle {
			pos: Point::new(10.0, 10.0),
			vx: 1.0,
			vy: 0.0,
			color: Color::rgb(0, 0, 0),
			size: 2.0,
			life: 1.0,
			decay: 1.0,
		});

		let mut last = f64::INFINITY;
		let mut last_x = 10.0;
		while let Some(p) = state.particles.first() {
			assert!(p.life <= last);
			assert!(p.life > 0.0);
			assert!(p.pos.x >= last_x);
			last = p.life;
			last_x = p.pos.x;
			state.step(&mut layout, &palette, &config, 0.05, 1.0, &mut rng);
		}
		assert!(state.frame >= 20);
	}

	#[test]
	fn no_data_nodes_means_no_particles() {
		let mut rng = StdRng::seed_from_u64(9);
		let palette = Theme::Dark.palette();
		let config = EngineConfig::default();
		let mut layout = generate(&Viewport::new(1000.0, 800.0, 1.0), &palette, &config, &mut rng);
		for node in &mut layout.nodes {
			node.generates_data = false;
		}
		let mut state = AnimationState::default();
		for _ in 0..1000 {
			state.step(&mut layout, &palette, &config, 1.0 / 60.0, 1.0, &mut rng);
			assert!(state.particles.is_empty());
		}
	}

	#[test]
	fn data_nodes_emit_particles() {
		let mut layout = Layout {
			grid: 10.0,
			nodes: vec![node(Point::new(0.0, 0.0), true, true)],
			..Layout::default()
		};
		let palette = Theme::Dark.palette();
		let mut rng = StdRng::seed_from_u64(4);
		let mut state = AnimationState::default();
		state.step(&mut layout, &palette, &eager(), 1.0 / 60.0, 1.0, &mut rng);
		assert_eq!(state.particles.len(), 1);
		assert_eq!(state.particles[0].pos, Point::new(0.0, 0.0));
	}

	#[test]
	fn pulse_travels_between_nodes_sharing_a_circuit() {
		let (a, b) = (Point::new(10.0, 0.0), Point::new(40.0, 0.0));
		let mut layout = Layout {
			grid: 10.0,
			circuits: vec![circuit(straight(0.0))],
			nodes: vec![node(a, true, false), node(b, true, false)],
			..Layout::default()
		};
		let palette = Theme::Dark.palette();
		let mut rng = StdRng::seed_from_u64(5);
		let mut state = AnimationState::default();
		state.step(&mut layout, &palette, &eager(), 1.0 / 60.0, 1.0, &mut rng);

		assert_eq!(state.pulses.len(), 1);
		let pulse = &state.pulses[0];
		assert_eq!(pulse.path.len(), 4);
		let ends = (pulse.path[0], pulse.path[3]);
		assert!(ends == (a, b) || ends == (b, a));
		let source = layout.nodes.iter().find(|n| n.pos == ends.0).unwrap();
		assert_eq!(source.last_pulse_time, Some(1));
	}

	#[test]
	fn unconnected_nodes_spawn_nothing() {
		let mut layout = Layout {
			grid: 10.0,
			circuits: vec![circuit(straight(0.0)), circuit(straight(50.0))],
			nodes: vec![
				node(Point::new(10.0, 0.0), true, false),
				node(Point::new(10.0, 50.0), true, false),
				node(Point::new(20.0, 0.0), false, false),
			],
			..Layout::default()
		};
		let palette = Theme::Dark.palette();
		let mut rng = StdRng::seed_from_u64(6);
		let mut state = AnimationState::default();
		for _ in 0..50 {
			state.step(&mut layout, &palette, &eager(), 1.0 / 60.0, 1.0, &mut rng);
		}
		assert!(state.pulses.is_empty());
		assert!(layout.nodes.iter().all(|n| n.last_pulse_time.is_none()));
	}
}
