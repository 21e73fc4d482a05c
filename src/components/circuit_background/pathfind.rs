use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::types::{Point, Rect};

const EPSILON: f64 = 1e-6;
const DIRECTIONS: [(f64, f64); 4] = [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)];

/// Greedy orthogonal router over a square grid.
///
/// Routes are best-effort: a walk that runs out of budget or gets boxed in
/// returns whatever it has so far, and callers draw that shorter path as-is.
pub struct Router {
	obstacles: Vec<Rect>,
	grid: f64,
	width: f64,
	height: f64,
}

impl Router {
	/// Each obstacle is grown by half a grid cell so traces keep clear of chip
	/// outlines.
	pub fn new(obstacles: impl IntoIterator<Item = Rect>, grid: f64, width: f64, height: f64) -> Self {
		Self {
			obstacles: obstacles
				.into_iter()
				.map(|r| r.expanded(grid / 2.0))
				.collect(),
			grid,
			width,
			height,
		}
	}

	pub fn in_bounds(&self, p: Point) -> bool {
		p.x >= -EPSILON
			&& p.y >= -EPSILON
			&& p.x <= self.width + EPSILON
			&& p.y <= self.height + EPSILON
	}

	pub fn blocked(&self, p: Point) -> bool {
		self.obstacles.iter().any(|r| r.contains(p))
	}

	fn can_step(&self, from: Point, to: Point) -> bool {
		self.in_bounds(to) && !self.obstacles.iter().any(|r| r.intersects_segment(from, to))
	}

	pub fn route<R: Rng + ?Sized>(
		&self,
		start: Point,
		end: Point,
		max_steps: usize,
		rng: &mut R,
	) -> Vec<Point> {
		let mut path = vec![start];
		let mut visited = HashSet::from([cell_key(start)]);
		let mut current = start;

		for _ in 0..max_steps {
			if current.approx_eq(end) {
				break;
			}
			if current.manhattan(end) <= self.grid + EPSILON && self.can_step(current, end) {
				path.push(end);
				break;
			}

			let (dx, dy) = (end.x - current.x, end.y - current.y);
			let horizontal = (dx.abs() > EPSILON).then(|| current.offset(self.grid * dx.signum(), 0.0));
			let vertical = (dy.abs() > EPSILON).then(|| current.offset(0.0, self.grid * dy.signum()));
			let preferred = if rng.gen_bool(0.5) {
				[horizontal, vertical]
			} else {
				[vertical, horizontal]
			};

			let open = |p: &Point| !visited.contains(&cell_key(*p)) && self.can_step(current, *p);
			let next = preferred.into_iter().flatten().find(|p| open(p)).or_else(|| {
				let mut dirs = DIRECTIONS;
				dirs.shuffle(rng);
				dirs.iter()
					.map(|&(sx, sy)| current.offset(sx * self.grid, sy * self.grid))
					.find(|p| open(p))
			});

			let Some(next) = next else {
				break;
			};
			visited.insert(cell_key(next));
			path.push(next);
			current = next;
		}
		path
	}
}

fn cell_key(p: Point) -> (i64, i64) {
	((p.x * 8.0).round() as i64, (p.y * 8.0).round() as i64)
}
