use rand::Rng;

use super::palette::Palette;

/// Pre-rendered RGBA backdrop: base fill, grain, vignette and a faint grid.
/// Built once per regeneration and blitted every frame.
#[derive(Clone, Debug, Default)]
pub struct BackgroundTexture {
	pub width: u32,
	pub height: u32,
	pub pixels: Vec<u8>,
}

impl BackgroundTexture {
	/// `width`/`height` are device pixels; `grid` is in CSS pixels and is
	/// scaled by `scale`, the same device-per-CSS factor as the canvas.
	pub fn generate<R: Rng + ?Sized>(
		width: u32,
		height: u32,
		scale: f64,
		grid: f64,
		palette: &Palette,
		rng: &mut R,
	) -> Self {
		let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
		let seed: u32 = rng.r#gen();
		let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
		let scale = if scale > 0.0 { scale } else { 1.0 };
		let grid_px = grid * scale;
		// Grid lines stay at least one device pixel thick.
		let line = scale.max(1.0);
		let base = palette.background;

		for y in 0..height {
			let ny = if cy > 0.0 { (y as f64 - cy) / cy } else { 0.0 };
			let on_row = grid_px > 0.0 && (y as f64 % grid_px) < line;
			for x in 0..width {
				let nx = if cx > 0.0 { (x as f64 - cx) / cx } else { 0.0 };
				let r2 = (nx * nx + ny * ny) / 2.0;
				let shade = 1.0 - palette.vignette * r2;
				let grain = hash_noise(x, y, seed) * palette.noise_amplitude;
				let on_col = grid_px > 0.0 && (x as f64 % grid_px) < line;
				let grid_alpha = if on_row || on_col { palette.grid_alpha } else { 0.0 };

				let channel = |base: u8, grid: u8| {
					let v = base as f64 * shade + grain;
					(v + (grid as f64 - v) * grid_alpha).round().clamp(0.0, 255.0) as u8
				};
				pixels.push(channel(base.r, palette.grid.r));
				pixels.push(channel(base.g, palette.grid.g));
				pixels.push(channel(base.b, palette.grid.b));
				pixels.push(255);
			}
		}

		Self {
			width,
			height,
			pixels,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.pixels.is_empty()
	}

	#[cfg(test)]
	pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
		if x >= self.width || y >= self.height {
			return None;
		}
		let i = (y as usize * self.width as usize + x as usize) * 4;
		self.pixels.get(i..i + 4)?.try_into().ok()
	}
}

/// Integer hash mapped to `[-1, 1]`.
fn hash_noise(x: u32, y: u32, seed: u32) -> f64 {
	let mut h = x
		.wrapping_mul(374_761_393)
		.wrapping_add(y.wrapping_mul(668_265_263))
		.wrapping_add(seed.wrapping_mul(2_246_822_519));
	h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
	h ^= h >> 16;
	(h as f64 / u32::MAX as f64) * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::circuit_background::palette::Theme;

	fn smooth(vignette: f64, grid_alpha: f64) -> Palette {
		Palette {
			noise_amplitude: 0.0,
			vignette,
			grid_alpha,
			..Theme::Dark.palette()
		}
	}

	#[test]
	fn texture_covers_every_device_pixel() {
		let mut rng = StdRng::seed_from_u64(1);
		let tex = BackgroundTexture::generate(64, 48, 1.0, 16.0, &Theme::Dark.palette(), &mut rng);
		assert_eq!(tex.pixels.len(), 64 * 48 * 4);
		assert!(tex.pixels.chunks(4).all(|px| px[3] == 255));
		assert_eq!(tex.pixel(64, 0), None);
	}

	#[test]
	fn zero_size_is_empty() {
		let mut rng = StdRng::seed_from_u64(1);
		let tex = BackgroundTexture::generate(0, 0, 1.0, 16.0, &Theme::Light.palette(), &mut rng);
		assert!(tex.is_empty());
	}

	#[test]
	fn vignette_darkens_the_corners() {
		let mut rng = StdRng::seed_from_u64(2);
		let palette = Palette {
			background: crate::components::circuit_background::palette::Color::rgb(200, 200, 200),
			..smooth(0.5, 0.0)
		};
		let tex = BackgroundTexture::generate(101, 101, 1.0, 1000.0, &palette, &mut rng);
		let center = tex.pixel(50, 50).unwrap();
		let corner = tex.pixel(100, 100).unwrap();
		assert!(center[0] > corner[0]);
		assert_eq!(center[0], 200);
	}

	#[test]
	fn grid_lines_tint_the_backdrop() {
		let mut rng = StdRng::seed_from_u64(3);
		let tex = BackgroundTexture::generate(40, 40, 1.0, 10.0, &smooth(0.0, 0.5), &mut rng);
		assert_ne!(tex.pixel(10, 5), tex.pixel(5, 5));
		assert_eq!(tex.pixel(5, 5), tex.pixel(15, 15));
	}

	#[test]
	fn grid_spacing_follows_fractional_scale() {
		let mut rng = StdRng::seed_from_u64(4);
		let tex = BackgroundTexture::generate(40, 40, 0.5, 20.0, &smooth(0.0, 0.5), &mut rng);
		// 20 CSS px at half scale is a line every 10 device px.
		assert_eq!(tex.pixel(10, 5), tex.pixel(0, 5));
		assert_ne!(tex.pixel(10, 5), tex.pixel(5, 5));
		assert_ne!(tex.pixel(20, 5), tex.pixel(15, 5));
	}

	#[test]
	fn non_positive_scale_counts_as_one() {
		let palette = smooth(0.0, 0.5);
		let a = BackgroundTexture::generate(30, 30, 0.0, 10.0, &palette, &mut StdRng::seed_from_u64(5));
		let b = BackgroundTexture::generate(30, 30, 1.0, 10.0, &palette, &mut StdRng::seed_from_u64(5));
		assert_eq!(a.pixels, b.pixels);
	}

	#[test]
	fn noise_stays_in_range() {
		for (x, y) in [(0, 0), (17, 3), (999, 123)] {
			let n = hash_noise(x, y, 42);
			assert!((-1.0..=1.0).contains(&n));
		}
	}
}
