use leptos::prelude::*;

use crate::components::circuit_background::CircuitBackground;
use crate::components::contact::Contact;
use crate::components::hero::Hero;
use crate::components::navbar::Navbar;
use crate::components::projects::Projects;
use crate::components::sections::{About, Education, Footer, Skills};
use crate::components::star_background::StarBackground;
use crate::components::theme::{ThemeToggle, use_theme};

/// Single-page portfolio over the circuit board and the star field.
#[component]
pub fn Home() -> impl IntoView {
	let theme = use_theme();

	view! {
		<div class="page">
			<CircuitBackground theme=theme.theme() />
			<StarBackground theme=theme.theme() />
			<ThemeToggle />
			<Navbar />
			<main class="content">
				<Hero />
				<About />
				<Education />
				<Skills />
				<Projects />
				<Contact />
			</main>
			<Footer />
		</div>
	}
}
