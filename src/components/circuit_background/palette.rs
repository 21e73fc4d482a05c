use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	pub fn rgba(&self, alpha: f64) -> String {
		format!(
			"rgba({}, {}, {}, {:.3})",
			self.r,
			self.g,
			self.b,
			alpha.clamp(0.0, 1.0)
		)
	}

	pub fn css(&self) -> String {
		format!("rgb({}, {}, {})", self.r, self.g, self.b)
	}

	pub fn mix(&self, other: Color, t: f64) -> Color {
		let t = t.clamp(0.0, 1.0);
		let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
		Color::rgb(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
	}
}

/// Page colour scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	/// Light scheme.
	#[default]
	Light,
	/// Dark scheme.
	Dark,
}

impl Theme {
	/// Theme from a boolean "is dark" flag.
	pub fn from_dark(dark: bool) -> Self {
		if dark { Theme::Dark } else { Theme::Light }
	}

	/// Whether this is the dark scheme.
	pub fn is_dark(self) -> bool {
		self == Theme::Dark
	}

	/// The other theme.
	pub fn toggled(self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}

	/// Value stored in `localStorage`.
	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}

	/// Parse a stored value; anything unknown is `None`.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"light" => Some(Theme::Light),
			"dark" => Some(Theme::Dark),
			_ => None,
		}
	}

	pub fn palette(self) -> Palette {
		match self {
			Theme::Light => Palette::light(),
			Theme::Dark => Palette::dark(),
		}
	}
}

#[derive(Clone, Debug)]
pub struct Palette {
	pub background: Color,
	pub grid: Color,
	pub grid_alpha: f64,
	pub noise_amplitude: f64,
	pub vignette: f64,
	pub main_traces: Vec<Color>,
	pub branch_traces: Vec<Color>,
	pub nodes: Vec<Color>,
	pub chip_fill: Color,
	pub chip_border: Color,
	pub chip_pattern: Color,
	pub pin_connected: Color,
	pub pin_idle: Color,
	pub pulses: Vec<Color>,
	pub particles: Vec<Color>,
	pub highlight: Color,
}

impl Palette {
	pub fn dark() -> Self {
		Self {
			background: Color::rgb(8, 12, 22),
			grid: Color::rgb(40, 70, 110),
			grid_alpha: 0.08,
			noise_amplitude: 6.0,
			vignette: 0.55,
			main_traces: vec![
				Color::rgb(0, 190, 220),
				Color::rgb(40, 140, 255),
				Color::rgb(0, 220, 170),
			],
			branch_traces: vec![Color::rgb(30, 110, 160), Color::rgb(20, 130, 130)],
			nodes: vec![
				Color::rgb(0, 230, 255),
				Color::rgb(120, 200, 255),
				Color::rgb(80, 255, 200),
			],
			chip_fill: Color::rgb(16, 24, 40),
			chip_border: Color::rgb(60, 120, 170),
			chip_pattern: Color::rgb(40, 90, 130),
			pin_connected: Color::rgb(230, 190, 90),
			pin_idle: Color::rgb(90, 100, 120),
			pulses: vec![
				Color::rgb(255, 255, 255),
				Color::rgb(0, 255, 230),
				Color::rgb(255, 100, 200),
			],
			particles: vec![Color::rgb(0, 220, 255), Color::rgb(160, 120, 255)],
			highlight: Color::rgb(255, 255, 255),
		}
	}

	pub fn light() -> Self {
		Self {
			background: Color::rgb(240, 244, 250),
			grid: Color::rgb(120, 140, 170),
			grid_alpha: 0.10,
			noise_amplitude: 4.0,
			vignette: 0.25,
			main_traces: vec![
				Color::rgb(40, 110, 190),
				Color::rgb(30, 140, 150),
				Color::rgb(90, 90, 200),
			],
			branch_traces: vec![Color::rgb(120, 150, 190), Color::rgb(110, 160, 160)],
			nodes: vec![
				Color::rgb(30, 120, 220),
				Color::rgb(20, 160, 140),
				Color::rgb(110, 80, 220),
			],
			chip_fill: Color::rgb(225, 232, 242),
			chip_border: Color::rgb(100, 130, 170),
			chip_pattern: Color::rgb(160, 180, 205),
			pin_connected: Color::rgb(200, 140, 40),
			pin_idle: Color::rgb(160, 165, 175),
			pulses: vec![
				Color::rgb(20, 90, 200),
				Color::rgb(220, 60, 140),
				Color::rgb(0, 150, 130),
			],
			particles: vec![Color::rgb(40, 120, 220), Color::rgb(120, 80, 220)],
			highlight: Color::rgb(255, 255, 255),
		}
	}
}

/// Random entry of a non-empty colour list, falling back to `fallback`.
pub fn pick<R: Rng + ?Sized>(colors: &[Color], fallback: Color, rng: &mut R) -> Color {
	colors.choose(rng).copied().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn theme_round_trips_through_storage_value() {
		assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
		assert_eq!(Theme::parse("sepia"), None);
		assert_eq!(Theme::Light.toggled(), Theme::Dark);
	}

	#[test]
	fn rgba_clamps_alpha() {
		assert_eq!(Color::rgb(1, 2, 3).rgba(2.0), "rgba(1, 2, 3, 1.000)");
		assert_eq!(
			Color::rgb(0, 0, 0).mix(Color::rgb(200, 100, 50), 0.5),
			Color::rgb(100, 50, 25)
		);
	}
}
