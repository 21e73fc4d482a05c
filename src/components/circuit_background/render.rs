use std::f64::consts::PI;

use log::warn;
use rand::Rng;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use super::engine::CircuitEngine;
use super::layout::Layout;
use super::palette::{Color, Palette};
use super::texture::BackgroundTexture;
use super::types::{Chip, ChipKind, Edge, Pulse};

const TRAIL_SAMPLES: usize = 6;
const TRAIL_SPACING: f64 = 0.015;
const SHIMMER_WIDTH: f64 = 0.12;
const PIN_LENGTH: f64 = 6.0;
const PIN_THICKNESS: f64 = 3.0;

/// Offscreen canvas holding the backdrop, rebuilt when the engine regenerates.
#[derive(Default)]
pub struct TextureSurface {
	generation: u64,
	canvas: Option<HtmlCanvasElement>,
}

impl TextureSurface {
	fn sync<R: Rng>(&mut self, engine: &CircuitEngine<R>) {
		if self.generation == engine.generation() {
			return;
		}
		self.generation = engine.generation();
		self.canvas = match build_texture_canvas(engine.texture()) {
			Ok(canvas) => canvas,
			Err(err) => {
				warn!("backdrop texture unavailable: {:?}", err);
				None
			}
		};
	}
}

fn build_texture_canvas(texture: &BackgroundTexture) -> Result<Option<HtmlCanvasElement>, JsValue> {
	if texture.is_empty() {
		return Ok(None);
	}
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
	canvas.set_width(texture.width);
	canvas.set_height(texture.height);
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("no 2d context"))?
		.dyn_into()?;
	let data = ImageData::new_with_u8_clamped_array_and_sh(
		Clamped(&texture.pixels),
		texture.width,
		texture.height,
	)?;
	ctx.put_image_data(&data, 0.0, 0.0)?;
	Ok(Some(canvas))
}

pub fn render<R: Rng>(
	engine: &CircuitEngine<R>,
	surface: &mut TextureSurface,
	ctx: &CanvasRenderingContext2d,
) {
	let Some(viewport) = engine.viewport() else {
		return;
	};
	surface.sync(engine);
	let palette = engine.palette();
	let layout = engine.layout();
	let frame = engine.animation().frame;

	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	match &surface.canvas {
		Some(texture) => {
			let _ = ctx.draw_image_with_html_canvas_element(texture, 0.0, 0.0);
		}
		None => {
			let (w, h) = viewport.device_size();
			ctx.set_fill_style_str(&palette.background.css());
			ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
		}
	}

	let ratio = viewport.scale();
	let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	ctx.set_line_cap("round");
	ctx.set_line_join("round");

	draw_circuits(layout, frame, ctx);
	for chip in &layout.chips {
		draw_chip(chip, palette, ctx);
	}
	draw_nodes(layout, palette, frame, ctx);
	for pulse in &engine.animation().pulses {
		draw_pulse(pulse, ctx);
	}
	draw_particles(engine, ctx);
}

fn draw_circuits(layout: &Layout, frame: u64, ctx: &CanvasRenderingContext2d) {
	for circuit in &layout.circuits {
		let Some((first, rest)) = circuit.path.split_first() else {
			continue;
		};
		let alpha = if circuit.is_main { 0.55 } else { 0.35 };
		ctx.set_stroke_style_str(&circuit.color.rgba(alpha));
		ctx.set_line_width(circuit.width);
		ctx.begin_path();
		ctx.move_to(first.x, first.y);
		for p in rest {
			ctx.line_to(p.x, p.y);
		}
		ctx.stroke();

		let Some(last) = rest.last() else {
			continue;
		};
		if !circuit.data_flow || first.approx_eq(*last) {
			continue;
		}

		// Bright band sliding from the first point towards the last.
		let phase = (frame as f64 * circuit.flow_speed * 0.005 + circuit.flow_offset).fract();
		let gradient = ctx.create_linear_gradient(first.x, first.y, last.x, last.y);
		let peak = circuit.color.mix(Color::rgb(255, 255, 255), 0.5);
		let stops = [
			((phase - SHIMMER_WIDTH).max(0.0), 0.0),
			(phase, circuit.flow_intensity),
			((phase + SHIMMER_WIDTH).min(1.0), 0.0),
		];
		for (offset, a) in stops {
			let _ = gradient.add_color_stop(offset as f32, &peak.rgba(a));
		}
		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
		ctx.set_line_width(circuit.width * 1.6);
		ctx.stroke();
	}
}

fn draw_chip(chip: &Chip, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	let r = chip.rect;
	ctx.set_fill_style_str(&palette.chip_fill.rgba(0.92));
	ctx.fill_rect(r.x, r.y, r.w, r.h);
	ctx.set_stroke_style_str(&chip.border.rgba(0.9));
	ctx.set_line_width(1.5);
	ctx.stroke_rect(r.x, r.y, r.w, r.h);

	let inset = r.w.min(r.h) * 0.18;
	let (ix, iy, iw, ih) = (r.x + inset, r.y + inset, r.w - inset * 2.0, r.h - inset * 2.0);
	ctx.set_stroke_style_str(&palette.chip_pattern.rgba(0.7));
	ctx.set_fill_style_str(&palette.chip_pattern.rgba(0.5));
	ctx.set_line_width(1.0);
	match chip.kind {
		ChipKind::Cpu => {
			// Core grid.
			let cell = iw.min(ih) / 3.0;
			for row in 0..3 {
				for col in 0..3 {
					ctx.fill_rect(
						ix + col as f64 * cell + 1.0,
						iy + row as f64 * cell + 1.0,
						cell - 2.0,
						cell - 2.0,
					);
				}
			}
		}
		ChipKind::Memory => {
			let rows = 4;
			let step = ih / rows as f64;
			for row in 0..rows {
				ctx.fill_rect(ix, iy + row as f64 * step + 1.0, iw, step - 2.0);
			}
		}
		ChipKind::Controller => {
			ctx.stroke_rect(ix, iy, iw, ih);
			let c = r.center();
			ctx.begin_path();
			let _ = ctx.arc(c.x, c.y, iw.min(ih) / 3.0, 0.0, 2.0 * PI);
			ctx.stroke();
		}
		ChipKind::Io => {
			let bars = 5;
			let step = iw / bars as f64;
			for bar in 0..bars {
				let x = ix + (bar as f64 + 0.5) * step;
				ctx.begin_path();
				ctx.move_to(x, iy);
				ctx.line_to(x, iy + ih);
				ctx.stroke();
			}
		}
	}

	ctx.set_fill_style_str(&chip.border.rgba(0.8));
	ctx.set_font("9px monospace");
	let _ = ctx.fill_text(chip.kind.label(), r.x + 4.0, r.y + 11.0);

	for pin in &chip.pins {
		let color = if pin.connected {
			palette.pin_connected
		} else {
			palette.pin_idle
		};
		ctx.set_fill_style_str(&color.css());
		let (x, y, w, h) = match pin.edge {
			Edge::Top => (pin.pos.x - PIN_THICKNESS / 2.0, pin.pos.y - PIN_LENGTH, PIN_THICKNESS, PIN_LENGTH),
			Edge::Bottom => (pin.pos.x - PIN_THICKNESS / 2.0, pin.pos.y, PIN_THICKNESS, PIN_LENGTH),
			Edge::Left => (pin.pos.x - PIN_LENGTH, pin.pos.y - PIN_THICKNESS / 2.0, PIN_LENGTH, PIN_THICKNESS),
			Edge::Right => (pin.pos.x, pin.pos.y - PIN_THICKNESS / 2.0, PIN_LENGTH, PIN_THICKNESS),
		};
		ctx.fill_rect(x, y, w, h);
	}
}

fn fill_circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, style: &str) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius.max(0.0), 0.0, 2.0 * PI);
	ctx.set_fill_style_str(style);
	ctx.fill();
}

fn glow(ctx: &CanvasRenderingContext2d, x: f64, y: f64, inner: f64, outer: f64, color: Color, alpha: f64) {
	let Ok(gradient) = ctx.create_radial_gradient(x, y, inner, x, y, outer) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &color.rgba(alpha));
	let _ = gradient.add_color_stop(1.0, &color.rgba(0.0));
	ctx.begin_path();
	let _ = ctx.arc(x, y, outer, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

fn draw_nodes(layout: &Layout, palette: &Palette, frame: u64, ctx: &CanvasRenderingContext2d) {
	for node in &layout.nodes {
		let (x, y) = (node.pos.x, node.pos.y);
		let radius = node.radius * node.pulse_scale(frame);
		let recent = node.recent_pulse(frame);

		if node.active {
			let outer = radius * (3.0 + 2.0 * recent) * node.glow_intensity.max(0.3);
			glow(ctx, x, y, radius * 0.5, outer, node.color, 0.35 + 0.4 * recent);
		}

		fill_circle(ctx, x, y, radius, &node.color.rgba(if node.active { 0.95 } else { 0.6 }));

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + 1.5, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&node.color.rgba(0.5));
		ctx.set_line_width(1.0);
		ctx.stroke();

		fill_circle(ctx, x - radius * 0.3, y - radius * 0.3, radius * 0.35, &palette.highlight.rgba(0.6));

		if recent > 0.0 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + (1.0 - recent) * 14.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&node.color.rgba(recent * 0.8));
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
	}
}

fn draw_pulse(pulse: &Pulse, ctx: &CanvasRenderingContext2d) {
	let Some(head) = pulse.position() else {
		return;
	};
	if pulse.trail {
		for k in 1..=TRAIL_SAMPLES {
			let at = pulse.progress - k as f64 * TRAIL_SPACING;
			if at < 0.0 {
				break;
			}
			let Some(p) = pulse.position_at(at) else {
				break;
			};
			let fade = 1.0 - k as f64 / (TRAIL_SAMPLES + 1) as f64;
			fill_circle(ctx, p.x, p.y, pulse.size * fade, &pulse.color.rgba(0.5 * fade));
		}
	}
	glow(ctx, head.x, head.y, pulse.size * 0.5, pulse.size * 4.0, pulse.color, 0.5);
	fill_circle(ctx, head.x, head.y, pulse.size, &pulse.color.css());
}

fn draw_particles<R: Rng>(engine: &CircuitEngine<R>, ctx: &CanvasRenderingContext2d) {
	for particle in &engine.animation().particles {
		let life = particle.life.clamp(0.0, 1.0);
		fill_circle(
			ctx,
			particle.pos.x,
			particle.pos.y,
			particle.size * (0.4 + 0.6 * life),
			&particle.color.rgba(life * 0.8),
		);
	}
}
