/// Tunables for layout generation and animation.
#[derive(Clone, Debug)]
pub struct EngineConfig {
	/// Grid size is `min(width, height) / grid_divisor`.
	pub grid_divisor: f64,
	pub min_grid_size: f64,

	pub chip_area_divisor: f64,
	pub chip_count: (usize, usize),
	/// Chip side length range, in grid cells.
	pub chip_cells: (usize, usize),
	/// Minimum distance of a chip from the viewport edge, in grid cells.
	pub chip_margin_cells: usize,
	pub chip_attempts: usize,
	pub pin_connected_chance: f64,

	pub main_area_divisor: f64,
	pub main_count: (usize, usize),
	pub chip_anchor_chance: f64,
	pub interior_node_chance: f64,
	pub node_active_chance: f64,
	pub data_node_chance: f64,
	pub main_flow_chance: f64,

	pub branch_ratio: usize,
	pub branch_reach_cells: i64,
	pub branch_end_node_chance: f64,
	pub branch_flow_chance: f64,

	pub trunk_max_steps: usize,
	pub branch_max_steps: usize,

	/// Upper bound on a frame's delta time, in seconds.
	pub max_delta: f64,
	pub particle_cadence: u64,
	pub particle_chance: f64,
	pub pulse_cadence: u64,
	pub pulse_chance: f64,
	/// Per-frame velocity retention for particles, at 60 fps.
	pub particle_drag: f64,
	/// Speed multiplier applied when reduced motion is requested.
	pub reduced_motion_scale: f64,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			grid_divisor: 16.0,
			min_grid_size: 12.0,
			chip_area_divisor: 350.0,
			chip_count: (1, 5),
			chip_cells: (3, 5),
			chip_margin_cells: 2,
			chip_attempts: 40,
			pin_connected_chance: 0.7,
			main_area_divisor: 110.0,
			main_count: (7, 16),
			chip_anchor_chance: 0.5,
			interior_node_chance: 0.1,
			node_active_chance: 0.6,
			data_node_chance: 0.35,
			main_flow_chance: 0.7,
			branch_ratio: 2,
			branch_reach_cells: 6,
			branch_end_node_chance: 0.5,
			branch_flow_chance: 0.3,
			trunk_max_steps: 200,
			branch_max_steps: 24,
			max_delta: 0.1,
			particle_cadence: 3,
			particle_chance: 0.3,
			pulse_cadence: 12,
			pulse_chance: 0.6,
			particle_drag: 0.98,
			reduced_motion_scale: 0.3,
		}
	}
}
