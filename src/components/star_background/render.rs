use std::f64::consts::{PI, TAU};

use rand::Rng;
use web_sys::CanvasRenderingContext2d;

use super::field::{Element, Kind, ShapeKind, StarField};
use crate::components::circuit_background::Color;

const TWINKLE_RATE: f64 = 0.05;

/// Unit-square outlines for the polygon shapes.
const TRIANGLE: &[(f64, f64)] = &[(0.5, 0.0), (1.0, 1.0), (0.0, 1.0)];
const DIAMOND: &[(f64, f64)] = &[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)];
const HEXAGON: &[(f64, f64)] = &[
	(0.25, 0.0),
	(0.75, 0.0),
	(1.0, 0.5),
	(0.75, 1.0),
	(0.25, 1.0),
	(0.0, 0.5),
];
const STAR: &[(f64, f64)] = &[
	(0.5, 0.0),
	(0.61, 0.35),
	(0.98, 0.35),
	(0.68, 0.57),
	(0.79, 0.91),
	(0.5, 0.7),
	(0.21, 0.91),
	(0.32, 0.57),
	(0.02, 0.35),
	(0.39, 0.35),
];
const HEART: &[(f64, f64)] = &[
	(0.5, 1.0),
	(0.0, 0.45),
	(0.0, 0.2),
	(0.15, 0.05),
	(0.35, 0.05),
	(0.5, 0.2),
	(0.65, 0.05),
	(0.85, 0.05),
	(1.0, 0.2),
	(1.0, 0.45),
];

/// Clear the overlay and draw every element at its current position.
pub fn render<R: Rng>(field: &StarField<R>, ctx: &CanvasRenderingContext2d) {
	let Some(viewport) = field.viewport() else {
		return;
	};
	let (w, h) = viewport.device_size();
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.clear_rect(0.0, 0.0, w as f64, h as f64);

	let ratio = viewport.scale();
	let frame = field.frame() as f64;
	for el in field.elements() {
		let x = el.x / 100.0 * viewport.width;
		let y = el.y / 100.0 * viewport.height;
		let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, x * ratio, y * ratio);
		let _ = ctx.rotate(el.rotation.to_radians());
		match el.kind {
			Kind::Star { glow } => {
				let twinkle = 0.75 + 0.25 * (frame * TWINKLE_RATE + el.phase).sin();
				ctx.set_global_alpha(el.opacity * twinkle);
				draw_star(el, glow, ctx);
			}
			Kind::Planet { ring, banded, halo } => {
				ctx.set_global_alpha(el.opacity);
				draw_planet(el, ring, banded, halo, ctx);
			}
			Kind::Flower { petals, center, .. } => {
				ctx.set_global_alpha(el.opacity);
				draw_flower(el, petals, center, ctx);
			}
			Kind::Shape(shape) => {
				ctx.set_global_alpha(el.opacity);
				draw_shape(el, shape, ctx);
			}
		}
	}
	ctx.set_global_alpha(1.0);
}

fn radial_glow(ctx: &CanvasRenderingContext2d, radius: f64, color: Color, alpha: f64) {
	let Ok(gradient) = ctx.create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, radius) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &color.rgba(alpha));
	let _ = gradient.add_color_stop(1.0, &color.rgba(0.0));
	ctx.begin_path();
	let _ = ctx.arc(0.0, 0.0, radius, 0.0, TAU);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

fn disc(ctx: &CanvasRenderingContext2d, radius: f64, style: &str) {
	ctx.begin_path();
	let _ = ctx.arc(0.0, 0.0, radius.max(0.0), 0.0, TAU);
	ctx.set_fill_style_str(style);
	ctx.fill();
}

fn draw_star(el: &Element, glow: f64, ctx: &CanvasRenderingContext2d) {
	let r = el.size / 2.0;
	radial_glow(ctx, r + glow, el.color, 0.6);
	disc(ctx, r, &el.color.css());
}

fn draw_planet(
	el: &Element,
	ring: Option<Color>,
	banded: bool,
	halo: f64,
	ctx: &CanvasRenderingContext2d,
) {
	let r = el.size / 2.0;
	radial_glow(ctx, r + halo, Color::rgb(255, 255, 255), 0.2);

	let shade = el.color.mix(Color::rgb(0, 0, 0), 0.45);
	if let Ok(body) = ctx.create_radial_gradient(-r * 0.4, -r * 0.4, r * 0.1, 0.0, 0.0, r) {
		let _ = body.add_color_stop(0.0, &el.color.mix(Color::rgb(255, 255, 255), 0.3).css());
		let _ = body.add_color_stop(0.7, &el.color.css());
		let _ = body.add_color_stop(1.0, &shade.css());
		ctx.begin_path();
		let _ = ctx.arc(0.0, 0.0, r, 0.0, TAU);
		#[allow(deprecated)]
		ctx.set_fill_style(&body);
		ctx.fill();
	}

	if banded {
		ctx.save();
		ctx.begin_path();
		let _ = ctx.arc(0.0, 0.0, r, 0.0, TAU);
		ctx.clip();
		ctx.set_fill_style_str(&shade.rgba(0.25));
		for band in [-0.45, 0.0, 0.4] {
			ctx.fill_rect(-r, band * r, r * 2.0, r * 0.12);
		}
		ctx.restore();
	}

	if let Some(ring) = ring {
		ctx.begin_path();
		let _ = ctx.ellipse(0.0, 0.0, r * 0.75 + r * 0.5, r / 3.0, -PI / 12.0, 0.0, TAU);
		ctx.set_stroke_style_str(&ring.rgba(0.7));
		ctx.set_line_width((r / 8.0).max(1.0));
		ctx.stroke();
	}
}

fn draw_flower(el: &Element, petals: u8, center: Color, ctx: &CanvasRenderingContext2d) {
	let r = el.size / 2.0;
	let step = TAU / petals.max(1) as f64;
	ctx.set_fill_style_str(&el.color.css());
	for i in 0..petals {
		let angle = step * i as f64;
		let (cx, cy) = (angle.cos() * r * 0.5, angle.sin() * r * 0.5);
		ctx.begin_path();
		let _ = ctx.ellipse(cx, cy, r * 0.5, r * 0.22, angle, 0.0, TAU);
		ctx.fill();
	}
	disc(ctx, r * 0.3, &center.css());
}

fn polygon(ctx: &CanvasRenderingContext2d, size: f64, points: &[(f64, f64)]) {
	let Some((&(x0, y0), rest)) = points.split_first() else {
		return;
	};
	let half = size / 2.0;
	ctx.begin_path();
	ctx.move_to(x0 * size - half, y0 * size - half);
	for &(x, y) in rest {
		ctx.line_to(x * size - half, y * size - half);
	}
	ctx.close_path();
	ctx.fill();
}

fn draw_shape(el: &Element, shape: ShapeKind, ctx: &CanvasRenderingContext2d) {
	let size = el.size;
	let half = size / 2.0;
	let style = el.color.css();
	ctx.set_fill_style_str(&style);
	match shape {
		ShapeKind::Circle => disc(ctx, half, &style),
		ShapeKind::Dot => disc(ctx, half / 2.0, &style),
		ShapeKind::Square => ctx.fill_rect(-half, -half, size, size),
		ShapeKind::Triangle => polygon(ctx, size, TRIANGLE),
		ShapeKind::Diamond => polygon(ctx, size, DIAMOND),
		ShapeKind::Hexagon => polygon(ctx, size, HEXAGON),
		ShapeKind::Star => polygon(ctx, size, STAR),
		ShapeKind::Heart => polygon(ctx, size, HEART),
		ShapeKind::Cross => {
			let bar = size * 0.2;
			ctx.fill_rect(-half, -bar / 2.0, size, bar);
			ctx.fill_rect(-bar / 2.0, -half, bar, size);
		}
	}
}
