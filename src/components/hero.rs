//! Landing section: scrambled name reveal and a cycling role typewriter.

use std::time::Duration;

use leptos::prelude::*;
use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::content::{FIRST_NAME, LAST_NAME, RESUME_URL, ROLES, TAGLINE};
use crate::hooks::use_reduced_motion;

const SCRAMBLE_TICK: Duration = Duration::from_millis(30);
const GLYPHS: &[char] = &[
	'!', '<', '>', '-', '_', '\\', '/', '[', ']', '{', '}', '=', '+', '*', '^', '?', '#', '_', '_',
];

pub const TYPE_MS: u64 = 100;
pub const HOLD_MS: u64 = 2000;
pub const DELETE_MS: u64 = 50;

/// Text reveal that settles one third of a character per tick.
#[derive(Clone, Debug)]
pub struct Scramble {
	target: Vec<char>,
	/// Revealed length in thirds of a character.
	thirds: usize,
}

impl Scramble {
	pub fn new(text: &str) -> Self {
		Self {
			target: text.chars().collect(),
			thirds: 0,
		}
	}

	pub fn revealed(&self) -> usize {
		self.thirds.div_ceil(3).min(self.target.len())
	}

	pub fn is_done(&self) -> bool {
		self.revealed() >= self.target.len()
	}

	/// Current frame: the revealed prefix, then random glyphs.
	pub fn frame<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
		let revealed = self.revealed();
		self.target
			.iter()
			.enumerate()
			.map(|(i, &c)| {
				if i < revealed {
					c
				} else {
					*GLYPHS.choose(rng).unwrap_or(&'_')
				}
			})
			.collect()
	}

	pub fn tick(&mut self) {
		if !self.is_done() {
			self.thirds += 1;
		}
	}
}

/// Types a role, holds it, deletes it and moves on to the next.
#[derive(Clone, Debug)]
pub struct Typewriter {
	roles: &'static [&'static str],
	index: usize,
	shown: usize,
	deleting: bool,
}

impl Typewriter {
	pub fn new(roles: &'static [&'static str]) -> Self {
		Self {
			roles,
			index: 0,
			shown: 0,
			deleting: false,
		}
	}

	fn role(&self) -> &'static str {
		self.roles.get(self.index).copied().unwrap_or_default()
	}

	pub fn text(&self) -> String {
		self.role().chars().take(self.shown).collect()
	}

	/// Advance one step and return the delay before the next one, in ms.
	pub fn step(&mut self) -> u64 {
		if self.roles.is_empty() {
			return HOLD_MS;
		}
		let len = self.role().chars().count();
		if !self.deleting {
			if self.shown < len {
				self.shown += 1;
				TYPE_MS
			} else {
				self.deleting = true;
				HOLD_MS
			}
		} else if self.shown > 0 {
			self.shown -= 1;
			DELETE_MS
		} else {
			self.deleting = false;
			self.index = (self.index + 1) % self.roles.len();
			DELETE_MS
		}
	}
}

#[component]
fn ScrambleText(text: &'static str) -> impl IntoView {
	if use_reduced_motion().get_untracked() {
		return text.to_string().into_any();
	}

	let state = StoredValue::new(Scramble::new(text));
	let (output, set_output) = signal(String::new());
	let handle = StoredValue::new(None::<IntervalHandle>);

	let tick = move || {
		let mut rng = rand::thread_rng();
		let frame = state.try_update_value(|s| {
			let frame = s.frame(&mut rng);
			s.tick();
			(frame, s.is_done())
		});
		match frame {
			Some((frame, done)) => {
				set_output.set(frame);
				if done {
					set_output.set(text.to_string());
					if let Some(h) = handle.try_update_value(Option::take).flatten() {
						h.clear();
					}
				}
			}
			None => {
				if let Some(h) = handle.try_update_value(Option::take).flatten() {
					h.clear();
				}
			}
		}
	};
	match set_interval_with_handle(tick, SCRAMBLE_TICK) {
		Ok(h) => handle.set_value(Some(h)),
		Err(e) => {
			warn!("scramble interval failed: {e:?}");
			set_output.set(text.to_string());
		}
	}
	on_cleanup(move || {
		if let Some(h) = handle.try_update_value(Option::take).flatten() {
			h.clear();
		}
	});

	view! { <span>{move || output.get()}</span> }.into_any()
}

fn schedule_typewriter(
	state: StoredValue<Typewriter>,
	set_text: WriteSignal<String>,
	pending: StoredValue<Option<TimeoutHandle>>,
	delay: u64,
) {
	let next = set_timeout_with_handle(
		move || {
			let Some((text, delay)) = state.try_update_value(|tw| {
				let delay = tw.step();
				(tw.text(), delay)
			}) else {
				return;
			};
			set_text.set(text);
			schedule_typewriter(state, set_text, pending, delay);
		},
		Duration::from_millis(delay),
	);
	match next {
		Ok(h) => {
			pending.try_set_value(Some(h));
		}
		Err(e) => warn!("typewriter timeout failed: {e:?}"),
	}
}

#[component]
fn RoleTypewriter() -> impl IntoView {
	let (text, set_text) = signal(String::new());
	if use_reduced_motion().get_untracked() {
		set_text.set(ROLES.first().copied().unwrap_or_default().to_string());
	} else {
		let state = StoredValue::new(Typewriter::new(ROLES));
		let pending = StoredValue::new(None::<TimeoutHandle>);
		schedule_typewriter(state, set_text, pending, TYPE_MS);
		on_cleanup(move || {
			if let Some(h) = pending.try_update_value(Option::take).flatten() {
				h.clear();
			}
		});
	}

	view! {
		<span class="typewriter">
			{move || text.get()}
			<span class="caret">"|"</span>
		</span>
	}
}

#[component]
pub fn Hero() -> impl IntoView {
	view! {
		<section id="hero" class="hero">
			<div class="hero-text">
				<h2 class="hero-greeting">"Hello, I'm"</h2>
				<h1 class="hero-name">
					<span class="hero-first"><ScrambleText text=FIRST_NAME /></span>
					" "
					<span class="hero-last"><ScrambleText text=LAST_NAME /></span>
				</h1>
				<div class="hero-role"><RoleTypewriter /></div>
				<p class="hero-tagline">{TAGLINE}</p>
				<div class="hero-actions">
					<a href="#projects" class="button primary">"View My Portfolio"</a>
					<a href="#contact" class="button outline">"Contact Me"</a>
					<a href=RESUME_URL target="_blank" rel="noopener noreferrer" class="button ghost">
						"Download Resume"
					</a>
				</div>
			</div>
		</section>
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn scramble_reveals_a_third_per_tick() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut s = Scramble::new("Rust");
		assert_eq!(s.revealed(), 0);
		assert_eq!(s.frame(&mut rng).chars().count(), 4);
		s.tick();
		assert_eq!(s.revealed(), 1);
		s.tick();
		s.tick();
		assert_eq!(s.revealed(), 1);
		assert!(s.frame(&mut rng).starts_with('R'));

		let mut ticks = 3;
		while !s.is_done() {
			s.tick();
			ticks += 1;
		}
		assert_eq!(ticks, 10);
		assert_eq!(s.frame(&mut rng), "Rust");
	}

	#[test]
	fn unrevealed_characters_come_from_the_glyph_set() {
		let mut rng = StdRng::seed_from_u64(9);
		let s = Scramble::new("abcdef");
		assert!(s.frame(&mut rng).chars().all(|c| GLYPHS.contains(&c)));
	}

	#[test]
	fn typewriter_types_holds_deletes_and_cycles() {
		const ROLES: &[&str] = &["ab", "xyz"];
		let mut tw = Typewriter::new(ROLES);

		assert_eq!(tw.step(), TYPE_MS);
		assert_eq!(tw.text(), "a");
		assert_eq!(tw.step(), TYPE_MS);
		assert_eq!(tw.text(), "ab");
		assert_eq!(tw.step(), HOLD_MS);
		assert_eq!(tw.text(), "ab");

		assert_eq!(tw.step(), DELETE_MS);
		assert_eq!(tw.text(), "a");
		assert_eq!(tw.step(), DELETE_MS);
		assert_eq!(tw.text(), "");
		tw.step();
		assert_eq!(tw.step(), TYPE_MS);
		assert_eq!(tw.text(), "x");

		for _ in 0..2 + 1 + 3 + 1 {
			tw.step();
		}
		assert_eq!(tw.step(), TYPE_MS);
		assert_eq!(tw.text(), "a");
	}

	#[test]
	fn empty_role_list_just_waits() {
		let mut tw = Typewriter::new(&[]);
		assert_eq!(tw.step(), HOLD_MS);
		assert_eq!(tw.text(), "");
	}
}
