use super::palette::Color;

const EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}

	pub fn lerp(self, other: Point, t: f64) -> Self {
		Self::new(
			self.x + (other.x - self.x) * t,
			self.y + (other.y - self.y) * t,
		)
	}

	pub fn manhattan(self, other: Point) -> f64 {
		(self.x - other.x).abs() + (self.y - other.y).abs()
	}

	/// Equality within floating-point noise; grid coordinates are products of
	/// integer cell counts and the grid size so exact matches are expected.
	pub fn approx_eq(self, other: Point) -> bool {
		(self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
	}
}

/// Axis-aligned rectangle in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
		Self { x, y, w, h }
	}

	pub fn right(&self) -> f64 {
		self.x + self.w
	}

	pub fn bottom(&self) -> f64 {
		self.y + self.h
	}

	pub fn center(&self) -> Point {
		Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
	}

	pub fn expanded(&self, margin: f64) -> Self {
		Self::new(
			self.x - margin,
			self.y - margin,
			self.w + margin * 2.0,
			self.h + margin * 2.0,
		)
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
	}

	pub fn overlaps(&self, other: &Rect) -> bool {
		self.x < other.right()
			&& self.right() > other.x
			&& self.y < other.bottom()
			&& self.bottom() > other.y
	}

	/// Overlap test for a purely horizontal or vertical segment: the segment's
	/// bounding box is the segment itself, so a box/box test is exact.
	pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
		let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
		let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
		min_x <= self.right() && max_x >= self.x && min_y <= self.bottom() && max_y >= self.y
	}
}

#[derive(Clone, Debug)]
pub struct Circuit {
	pub path: Vec<Point>,
	pub width: f64,
	pub color: Color,
	pub is_main: bool,
	pub data_flow: bool,
	pub flow_speed: f64,
	pub flow_offset: f64,
	pub flow_intensity: f64,
}

impl Circuit {
	pub fn index_of(&self, p: Point) -> Option<usize> {
		self.path.iter().position(|q| q.approx_eq(p))
	}

	/// Ordered points strictly between the two ends, walked from `from` to `to`.
	pub fn sub_path(&self, from: Point, to: Point) -> Option<Vec<Point>> {
		let (i, j) = (self.index_of(from)?, self.index_of(to)?);
		if i == j {
			return None;
		}
		let path = if i < j {
			self.path[i..=j].to_vec()
		} else {
			self.path[j..=i].iter().rev().copied().collect()
		};
		Some(path)
	}

	pub fn midpoint(&self) -> Option<Point> {
		self.path.get(self.path.len() / 2).copied()
	}
}

#[derive(Clone, Debug)]
pub struct Node {
	pub pos: Point,
	pub radius: f64,
	pub color: Color,
	pub pulse_rate: f64,
	pub pulse_phase: f64,
	pub active: bool,
	pub generates_data: bool,
	pub last_pulse_time: Option<u64>,
	pub glow_intensity: f64,
}

/// Frames during which a node glows after emitting a pulse.
pub const PULSE_GLOW_FRAMES: u64 = 30;

impl Node {
	/// Oscillating scale, a pure function of the frame counter.
	pub fn pulse_scale(&self, frame: u64) -> f64 {
		1.0 + 0.15 * (frame as f64 * self.pulse_rate + self.pulse_phase).sin()
	}

	/// Remaining glow boost in `[0, 1]` after the last emitted pulse.
	pub fn recent_pulse(&self, frame: u64) -> f64 {
		match self.last_pulse_time {
			Some(t) if frame >= t && frame - t < PULSE_GLOW_FRAMES => {
				1.0 - (frame - t) as f64 / PULSE_GLOW_FRAMES as f64
			}
			_ => 0.0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipKind {
	Cpu,
	Memory,
	Controller,
	Io,
}

impl ChipKind {
	pub const ALL: [ChipKind; 4] = [
		ChipKind::Cpu,
		ChipKind::Memory,
		ChipKind::Controller,
		ChipKind::Io,
	];

	pub fn label(self) -> &'static str {
		match self {
			ChipKind::Cpu => "CPU",
			ChipKind::Memory => "MEM",
			ChipKind::Controller => "CTRL",
			ChipKind::Io => "I/O",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
	Top,
	Right,
	Bottom,
	Left,
}

impl Edge {
	/// Outward unit normal.
	pub fn normal(self) -> (f64, f64) {
		match self {
			Edge::Top => (0.0, -1.0),
			Edge::Right => (1.0, 0.0),
			Edge::Bottom => (0.0, 1.0),
			Edge::Left => (-1.0, 0.0),
		}
	}
}

#[derive(Clone, Copy, Debug)]
pub struct Pin {
	pub pos: Point,
	pub edge: Edge,
	pub connected: bool,
}

impl Pin {
	/// The grid point one cell outside the chip, where routing starts or ends.
	pub fn exit(&self, grid: f64) -> Point {
		let (nx, ny) = self.edge.normal();
		self.pos.offset(nx * grid, ny * grid)
	}
}

#[derive(Clone, Debug)]
pub struct Chip {
	pub rect: Rect,
	pub kind: ChipKind,
	pub border: Color,
	pub pins: Vec<Pin>,
}

impl Chip {
	pub fn connected_pins(&self) -> impl Iterator<Item = &Pin> {
		self.pins.iter().filter(|p| p.connected)
	}
}

#[derive(Clone, Debug)]
pub struct Pulse {
	pub path: Vec<Point>,
	pub progress: f64,
	pub speed: f64,
	pub color: Color,
	pub size: f64,
	pub trail: bool,
}

impl Pulse {
	/// Position at an arbitrary progress, linearly interpolated between the two
	/// bracketing path points. Progress is spread evenly over segments.
	pub fn position_at(&self, progress: f64) -> Option<Point> {
		let first = *self.path.first()?;
		let segments = self.path.len().saturating_sub(1);
		if segments == 0 {
			return Some(first);
		}
		let scaled = progress.clamp(0.0, 1.0) * segments as f64;
		let idx = (scaled.floor() as usize).min(segments - 1);
		Some(self.path[idx].lerp(self.path[idx + 1], scaled - idx as f64))
	}

	pub fn position(&self) -> Option<Point> {
		self.position_at(self.progress)
	}

	pub fn finished(&self) -> bool {
		self.progress >= 1.0
	}
}

#[derive(Clone, Debug)]
pub struct Particle {
	pub pos: Point,
	pub vx: f64,
	pub vy: f64,
	pub color: Color,
	pub size: f64,
	pub life: f64,
	pub decay: f64,
}

impl Particle {
	pub fn alive(&self) -> bool {
		self.life > 0.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn circuit(path: Vec<Point>) -> Circuit {
		Circuit {
			path,
			width: 1.0,
			color: Color::rgb(0, 0, 0),
			is_main: true,
			data_flow: false,
			flow_speed: 0.0,
			flow_offset: 0.0,
			flow_intensity: 0.0,
		}
	}

	#[test]
	fn sub_path_follows_direction_of_travel() {
		let c = circuit(vec![
			Point::new(0.0, 0.0),
			Point::new(10.0, 0.0),
			Point::new(20.0, 0.0),
			Point::new(20.0, 10.0),
		]);
		let forward = c
			.sub_path(Point::new(10.0, 0.0), Point::new(20.0, 10.0))
			.unwrap();
		assert_eq!(forward.len(), 3);
		assert_eq!(forward[0], Point::new(10.0, 0.0));

		let backward = c
			.sub_path(Point::new(20.0, 10.0), Point::new(0.0, 0.0))
			.unwrap();
		assert_eq!(backward.first(), Some(&Point::new(20.0, 10.0)));
		assert_eq!(backward.last(), Some(&Point::new(0.0, 0.0)));
		assert!(c.sub_path(Point::new(0.0, 0.0), Point::new(0.0, 0.0)).is_none());
		assert!(c.sub_path(Point::new(5.0, 5.0), Point::new(0.0, 0.0)).is_none());
	}

	#[test]
	fn pulse_position_interpolates_between_bracketing_points() {
		let pulse = Pulse {
			path: vec![
				Point::new(0.0, 0.0),
				Point::new(10.0, 0.0),
				Point::new(10.0, 10.0),
			],
			progress: 0.25,
			speed: 1.0,
			color: Color::rgb(255, 255, 255),
			size: 2.0,
			trail: false,
		};
		assert_eq!(pulse.position(), Some(Point::new(5.0, 0.0)));
		assert_eq!(pulse.position_at(0.75), Some(Point::new(10.0, 5.0)));
		assert_eq!(pulse.position_at(1.0), Some(Point::new(10.0, 10.0)));
	}

	#[test]
	fn segment_test_hits_only_when_touching_the_box() {
		let r = Rect::new(10.0, 10.0, 20.0, 20.0);
		assert!(r.intersects_segment(Point::new(0.0, 15.0), Point::new(15.0, 15.0)));
		assert!(r.intersects_segment(Point::new(20.0, 0.0), Point::new(20.0, 40.0)));
		assert!(!r.intersects_segment(Point::new(0.0, 5.0), Point::new(40.0, 5.0)));
		assert!(!r.intersects_segment(Point::new(35.0, 0.0), Point::new(35.0, 40.0)));
	}

	#[test]
	fn recent_pulse_decays_over_glow_window() {
		let mut node = Node {
			pos: Point::default(),
			radius: 3.0,
			color: Color::rgb(0, 0, 0),
			pulse_rate: 0.05,
			pulse_phase: 0.0,
			active: true,
			generates_data: false,
			last_pulse_time: None,
			glow_intensity: 1.0,
		};
		assert_eq!(node.recent_pulse(10), 0.0);
		node.last_pulse_time = Some(10);
		assert_eq!(node.recent_pulse(10), 1.0);
		assert!(node.recent_pulse(25) > 0.0 && node.recent_pulse(25) < 1.0);
		assert_eq!(node.recent_pulse(10 + PULSE_GLOW_FRAMES), 0.0);
	}
}
