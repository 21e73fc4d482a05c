use std::collections::HashSet;
use std::f64::consts::TAU;

use rand::Rng;
use rand::seq::SliceRandom;

use super::config::EngineConfig;
use super::palette::{Palette, pick};
use super::pathfind::Router;
use super::types::{Chip, ChipKind, Circuit, Edge, Node, Pin, Point, Rect};

/// Drawing surface size in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	pub pixel_ratio: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
		Self {
			width,
			height,
			pixel_ratio,
		}
	}

	pub fn is_degenerate(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}

	/// Device pixels per CSS pixel; non-positive or NaN ratios count as 1.
	pub fn scale(&self) -> f64 {
		if self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 }
	}

	/// Backing-store size in device pixels.
	pub fn device_size(&self) -> (u32, u32) {
		let ratio = self.scale();
		(
			(self.width * ratio).round().max(0.0) as u32,
			(self.height * ratio).round().max(0.0) as u32,
		)
	}
}

/// The generated scene: everything here is read-only while animating, apart
/// from node pulse timestamps.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	pub grid: f64,
	pub width: f64,
	pub height: f64,
	pub chips: Vec<Chip>,
	pub circuits: Vec<Circuit>,
	pub nodes: Vec<Node>,
}

impl Layout {
	pub fn is_empty(&self) -> bool {
		self.chips.is_empty() && self.circuits.is_empty() && self.nodes.is_empty()
	}

	pub fn main_count(&self) -> usize {
		self.circuits.iter().filter(|c| c.is_main).count()
	}

	pub fn branch_count(&self) -> usize {
		self.circuits.iter().filter(|c| !c.is_main).count()
	}
}

pub fn grid_size(viewport: &Viewport, config: &EngineConfig) -> f64 {
	(viewport.width.min(viewport.height) / config.grid_divisor)
		.floor()
		.max(config.min_grid_size)
}

fn area_scale(viewport: &Viewport) -> f64 {
	(viewport.width * viewport.height).sqrt()
}

pub fn chip_target(viewport: &Viewport, config: &EngineConfig) -> usize {
	let (lo, hi) = config.chip_count;
	((area_scale(viewport) / config.chip_area_divisor).round() as usize).clamp(lo, hi)
}

pub fn main_target(viewport: &Viewport, config: &EngineConfig) -> usize {
	let (lo, hi) = config.main_count;
	((area_scale(viewport) / config.main_area_divisor).floor() as usize).clamp(lo, hi)
}

/// Builds a fresh scene for the viewport. Zero-area viewports produce an
/// empty layout.
pub fn generate<R: Rng + ?Sized>(
	viewport: &Viewport,
	palette: &Palette,
	config: &EngineConfig,
	rng: &mut R,
) -> Layout {
	if viewport.is_degenerate() {
		return Layout::default();
	}

	let grid = grid_size(viewport, config);
	let mut generator = Generator {
		cols: (viewport.width / grid).floor() as i64,
		rows: (viewport.height / grid).floor() as i64,
		grid,
		viewport,
		palette,
		config,
		rng,
		router: Router::new([], grid, viewport.width, viewport.height),
		node_cells: HashSet::new(),
		layout: Layout {
			grid,
			width: viewport.width,
			height: viewport.height,
			..Layout::default()
		},
	};

	generator.place_chips();
	generator.router = Router::new(
		generator.layout.chips.iter().map(|c| c.rect),
		grid,
		viewport.width,
		viewport.height,
	);
	let trunks = generator.place_trunks();
	generator.place_branches(trunks * config.branch_ratio);
	generator.layout
}

/// Where a circuit starts or ends: a routable grid point, plus the chip pin
/// it is attached to, if any.
#[derive(Clone, Copy, Debug)]
struct Anchor {
	point: Point,
	pin: Option<Point>,
}

struct Generator<'a, R: Rng + ?Sized> {
	grid: f64,
	cols: i64,
	rows: i64,
	viewport: &'a Viewport,
	palette: &'a Palette,
	config: &'a EngineConfig,
	rng: &'a mut R,
	router: Router,
	node_cells: HashSet<(i64, i64)>,
	layout: Layout,
}

impl<R: Rng + ?Sized> Generator<'_, R> {
	fn grid_point(&self, cx: i64, cy: i64) -> Point {
		Point::new(cx as f64 * self.grid, cy as f64 * self.grid)
	}

	fn cell_of(&self, p: Point) -> (i64, i64) {
		((p.x / self.grid).round() as i64, (p.y / self.grid).round() as i64)
	}

	fn random_cell(&mut self) -> (i64, i64) {
		let cx = if self.cols >= 2 { self.rng.gen_range(1..self.cols) } else { 0 };
		let cy = if self.rows >= 2 { self.rng.gen_range(1..self.rows) } else { 0 };
		(cx, cy)
	}

	fn random_free_point(&mut self) -> Option<Point> {
		(0..20).find_map(|_| {
			let (cx, cy) = self.random_cell();
			let p = self.grid_point(cx, cy);
			(!self.router.blocked(p)).then_some(p)
		})
	}

	fn place_chips(&mut self) {
		let target = chip_target(self.viewport, self.config);
		let (min_cells, max_cells) = self.config.chip_cells;
		let margin = self.config.chip_margin_cells as i64;

		for _ in 0..self.config.chip_attempts {
			if self.layout.chips.len() >= target {
				break;
			}
			let cw = self.rng.gen_range(min_cells..=max_cells) as i64;
			let ch = self.rng.gen_range(min_cells..=max_cells) as i64;
			let (max_x, max_y) = (self.cols - margin - cw, self.rows - margin - ch);
			if max_x < margin || max_y < margin {
				continue;
			}
			let cx = self.rng.gen_range(margin..=max_x);
			let cy = self.rng.gen_range(margin..=max_y);
			let rect = Rect::new(
				cx as f64 * self.grid,
				cy as f64 * self.grid,
				cw as f64 * self.grid,
				ch as f64 * self.grid,
			);
			let clearance = self.grid;
			if self
				.layout
				.chips
				.iter()
				.any(|c| c.rect.expanded(clearance).overlaps(&rect))
			{
				continue;
			}
			let chip = self.make_chip(rect, cw, ch);
			self.layout.chips.push(chip);
		}
	}

	fn make_chip(&mut self, rect: Rect, cw: i64, ch: i64) -> Chip {
		let grid = self.grid;
		let mut spots = Vec::new();
		for k in 1..cw {
			let x = rect.x + k as f64 * grid;
			spots.push((Point::new(x, rect.y), Edge::Top));
			spots.push((Point::new(x, rect.bottom()), Edge::Bottom));
		}
		for k in 1..ch {
			let y = rect.y + k as f64 * grid;
			spots.push((Point::new(rect.x, y), Edge::Left));
			spots.push((Point::new(rect.right(), y), Edge::Right));
		}
		let pins = spots
			.into_iter()
			.map(|(pos, edge)| Pin {
				pos,
				edge,
				connected: self.rng.gen_bool(self.config.pin_connected_chance),
			})
			.collect();

		Chip {
			rect,
			kind: *ChipKind::ALL.choose(self.rng).unwrap_or(&ChipKind::Cpu),
			border: self.palette.chip_border,
			pins,
		}
	}

	fn pin_anchor(&mut self) -> Option<Anchor> {
		let grid = self.grid;
		let candidates: Vec<Pin> = self
			.layout
			.chips
			.iter()
			.flat_map(|c| c.connected_pins().copied())
			.filter(|pin| {
				let exit = pin.exit(grid);
				self.router.in_bounds(exit) && !self.router.blocked(exit)
			})
			.collect();
		let pin = candidates.choose(self.rng)?;
		Some(Anchor {
			point: pin.exit(grid),
			pin: Some(pin.pos),
		})
	}

	fn anchor(&mut self) -> Option<Anchor> {
		if !self.layout.chips.is_empty() && self.rng.gen_bool(self.config.chip_anchor_chance) {
			if let Some(anchor) = self.pin_anchor() {
				return Some(anchor);
			}
		}
		self.random_free_point().map(|point| Anchor { point, pin: None })
	}

	/// Stitches pins onto a routed path. The end pin is only attached when the
	/// route actually arrived.
	fn assemble(&self, start: &Anchor, end: &Anchor, route: Vec<Point>) -> Vec<Point> {
		let arrived = route.last().is_some_and(|p| p.approx_eq(end.point));
		let mut path = Vec::with_capacity(route.len() + 2);
		path.extend(start.pin);
		path.extend(route);
		if arrived {
			path.extend(end.pin);
		}
		path
	}

	fn make_circuit(&mut self, path: Vec<Point>, is_main: bool) -> Circuit {
		let palette = self.palette;
		let (traces, width, flow_chance) = if is_main {
			(
				&palette.main_traces,
				self.rng.gen_range(1.6..2.4),
				self.config.main_flow_chance,
			)
		} else {
			(
				&palette.branch_traces,
				self.rng.gen_range(0.8..1.4),
				self.config.branch_flow_chance,
			)
		};
		Circuit {
			path,
			width,
			color: pick(traces, palette.grid, self.rng),
			is_main,
			data_flow: self.rng.gen_bool(flow_chance),
			flow_speed: self.rng.gen_range(0.3..1.0),
			flow_offset: self.rng.r#gen::<f64>(),
			flow_intensity: self.rng.gen_range(0.3..0.8),
		}
	}

	/// Adds a node unless one already sits on that grid point.
	fn add_node(&mut self, pos: Point, is_main: bool) {
		let cell = self.cell_of(pos);
		if !self.node_cells.insert(cell) {
			return;
		}
		let active = self.rng.gen_bool(self.config.node_active_chance);
		let radius = if is_main {
			self.rng.gen_range(3.0..4.5)
		} else {
			self.rng.gen_range(2.0..3.2)
		};
		let node = Node {
			pos,
			radius,
			color: pick(&self.palette.nodes, self.palette.highlight, self.rng),
			pulse_rate: self.rng.gen_range(0.02..0.06),
			pulse_phase: self.rng.gen_range(0.0..TAU),
			active,
			generates_data: active && self.rng.gen_bool(self.config.data_node_chance),
			last_pulse_time: None,
			glow_intensity: self.rng.gen_range(0.5..1.0),
		};
		self.layout.nodes.push(node);
	}

	fn place_trunks(&mut self) -> usize {
		let target = main_target(self.viewport, self.config);
		let mut made = 0;

		for _ in 0..target * 5 {
			if made >= target {
				break;
			}
			let (Some(start), Some(end)) = (self.anchor(), self.anchor()) else {
				continue;
			};
			if start.point.approx_eq(end.point) {
				continue;
			}
			let route = self
				.router
				.route(start.point, end.point, self.config.trunk_max_steps, self.rng);
			if route.len() < 2 {
				continue;
			}
			let path = self.assemble(&start, &end, route);

			let last = path.len() - 1;
			for (i, &p) in path.iter().enumerate() {
				if i == 0 || i == last || self.rng.gen_bool(self.config.interior_node_chance) {
					self.add_node(p, true);
				}
			}
			let circuit = self.make_circuit(path, true);
			self.layout.circuits.push(circuit);
			made += 1;
		}
		made
	}

	fn branch_origin(&mut self) -> Option<Point> {
		if !self.layout.nodes.is_empty() && self.rng.gen_bool(0.6) {
			self.layout.nodes.choose(self.rng).map(|n| n.pos)
		} else {
			self.layout.circuits.choose(self.rng).and_then(Circuit::midpoint)
		}
	}

	fn branch_target(&mut self, origin: Point) -> Option<Anchor> {
		let roll = self.rng.r#gen::<f64>();
		if roll < 0.5 {
			let reach = self.config.branch_reach_cells;
			let (ox, oy) = self.cell_of(origin);
			let cx = (ox + self.rng.gen_range(-reach..=reach)).clamp(0, self.cols);
			let cy = (oy + self.rng.gen_range(-reach..=reach)).clamp(0, self.rows);
			let point = self.grid_point(cx, cy);
			(!self.router.blocked(point)).then_some(Anchor { point, pin: None })
		} else if roll < 0.75 {
			let point = self.layout.nodes.choose(self.rng)?.pos;
			(!self.router.blocked(point)).then_some(Anchor { point, pin: None })
		} else {
			self.pin_anchor()
		}
	}

	fn place_branches(&mut self, target: usize) {
		let mut made = 0;
		for _ in 0..target * 3 {
			if made >= target {
				break;
			}
			let Some(origin) = self.branch_origin() else {
				break;
			};
			if self.router.blocked(origin) {
				continue;
			}
			let Some(end) = self.branch_target(origin) else {
				continue;
			};
			if origin.approx_eq(end.point) {
				continue;
			}
			let route = self
				.router
				.route(origin, end.point, self.config.branch_max_steps, self.rng);
			if route.len() < 2 {
				continue;
			}
			let start = Anchor {
				point: origin,
				pin: None,
			};
			let path = self.assemble(&start, &end, route);
			if let Some(&tip) = path.last() {
				if self.rng.gen_bool(self.config.branch_end_node_chance) {
					self.add_node(tip, false);
				}
			}
			let circuit = self.make_circuit(path, false);
			self.layout.circuits.push(circuit);
			made += 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::circuit_background::palette::Theme;

	const EPS: f64 = 1e-6;

	fn node_at(layout: &Layout, p: Point) -> Option<&Node> {
		layout.nodes.iter().find(|n| n.pos.approx_eq(p))
	}

	fn build(width: f64, height: f64, seed: u64) -> Layout {
		let mut rng = StdRng::seed_from_u64(seed);
		generate(
			&Viewport::new(width, height, 1.0),
			&Theme::Dark.palette(),
			&EngineConfig::default(),
			&mut rng,
		)
	}

	#[test]
	fn degenerate_viewport_is_a_no_op() {
		assert!(build(0.0, 800.0, 1).is_empty());
		assert!(build(1000.0, -5.0, 1).is_empty());
		assert!(build(f64::NAN, 10.0, 1).is_empty());
	}

	#[test]
	fn desktop_viewport_has_chips_trunks_and_end_nodes() {
		let layout = build(1000.0, 800.0, 42);
		assert_eq!(layout.grid, 50.0);
		assert!(!layout.chips.is_empty());
		assert!(layout.main_count() >= 7);
		for circuit in layout.circuits.iter().filter(|c| c.is_main) {
			let first = circuit.path.first().copied().unwrap();
			let last = circuit.path.last().copied().unwrap();
			assert!(node_at(&layout, first).is_some());
			assert!(node_at(&layout, last).is_some());
		}
	}

	#[test]
	fn pins_sit_on_the_chip_perimeter_at_grid_spacing() {
		let layout = build(1000.0, 800.0, 5);
		let grid = layout.grid;
		for chip in &layout.chips {
			let r = chip.rect;
			assert!(!chip.pins.is_empty());
			for pin in &chip.pins {
				let p = pin.pos;
				let along = match pin.edge {
					Edge::Top => {
						assert!((p.y - r.y).abs() < EPS);
						p.x - r.x
					}
					Edge::Bottom => {
						assert!((p.y - r.bottom()).abs() < EPS);
						p.x - r.x
					}
					Edge::Left => {
						assert!((p.x - r.x).abs() < EPS);
						p.y - r.y
					}
					Edge::Right => {
						assert!((p.x - r.right()).abs() < EPS);
						p.y - r.y
					}
				};
				let steps = along / grid;
				assert!((steps - steps.round()).abs() < EPS);
				assert!(steps >= 1.0 - EPS);
			}
		}
	}

	#[test]
	fn every_step_is_one_grid_cell_on_one_axis() {
		for seed in 0..8 {
			let layout = build(1280.0, 720.0, seed);
			let grid = layout.grid;
			for circuit in &layout.circuits {
				assert!(circuit.path.len() >= 2);
				for pair in circuit.path.windows(2) {
					let (dx, dy) = ((pair[1].x - pair[0].x).abs(), (pair[1].y - pair[0].y).abs());
					let horizontal = dy < EPS && (dx - grid).abs() < EPS;
					let vertical = dx < EPS && (dy - grid).abs() < EPS;
					assert!(horizontal || vertical, "bad step {:?}", pair);
				}
			}
		}
	}

	#[test]
	fn interior_segments_avoid_chip_keep_out_zones() {
		for seed in 0..8 {
			let layout = build(1000.0, 800.0, seed);
			let zones: Vec<Rect> = layout
				.chips
				.iter()
				.map(|c| c.rect.expanded(layout.grid / 2.0))
				.collect();
			for circuit in &layout.circuits {
				let segments: Vec<_> = circuit.path.windows(2).collect();
				if segments.len() < 3 {
					continue;
				}
				for pair in &segments[1..segments.len() - 1] {
					for zone in &zones {
						assert!(!zone.intersects_segment(pair[0], pair[1]));
					}
				}
			}
		}
	}

	#[test]
	fn regeneration_keeps_structural_counts_within_bounds() {
		let viewport = Viewport::new(1000.0, 800.0, 1.0);
		let config = EngineConfig::default();
		let (a, b) = (build(1000.0, 800.0, 11), build(1000.0, 800.0, 12));
		let chip_max = chip_target(&viewport, &config);
		let mains = main_target(&viewport, &config);
		for layout in [&a, &b] {
			assert!((1..=chip_max).contains(&layout.chips.len()));
			assert_eq!(layout.main_count(), mains);
			assert!(layout.branch_count() <= mains * config.branch_ratio);
		}
	}

	#[test]
	fn targets_scale_with_area() {
		let config = EngineConfig::default();
		let small = Viewport::new(320.0, 480.0, 2.0);
		let large = Viewport::new(2560.0, 1440.0, 1.0);
		assert_eq!(main_target(&small, &config), config.main_count.0);
		assert!(main_target(&large, &config) > main_target(&small, &config));
		assert!(chip_target(&large, &config) >= chip_target(&small, &config));
		assert_eq!(small.device_size(), (640, 960));
	}

	#[test]
	fn device_size_and_scale_agree_for_any_ratio() {
		for ratio in [0.5, 1.0, 1.5, 2.0, 3.0] {
			let vp = Viewport::new(1000.0, 800.0, ratio);
			let (w, h) = vp.device_size();
			assert_eq!(vp.scale(), ratio);
			assert_eq!(w as f64, (1000.0 * vp.scale()).round());
			assert_eq!(h as f64, (800.0 * vp.scale()).round());
		}
		assert_eq!(Viewport::new(1000.0, 800.0, 0.5).device_size(), (500, 400));
		for bad in [0.0, -2.0, f64::NAN] {
			let vp = Viewport::new(300.0, 200.0, bad);
			assert_eq!(vp.scale(), 1.0);
			assert_eq!(vp.device_size(), (300, 200));
		}
	}

	#[test]
	fn chips_keep_one_free_cell_between_them() {
		for seed in 0..16 {
			let layout = build(1920.0, 1080.0, seed);
			let grid = layout.grid;
			for (i, a) in layout.chips.iter().enumerate() {
				for b in &layout.chips[i + 1..] {
					let (a, b) = (a.rect, b.rect);
					let gap = (b.x - a.right())
						.max(a.x - b.right())
						.max(b.y - a.bottom())
						.max(a.y - b.bottom());
					assert!(gap >= grid - EPS, "chips {gap} apart, grid {grid}");
				}
			}
		}
	}
}
