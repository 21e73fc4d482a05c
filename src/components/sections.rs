//! Static content sections and the footer.

use leptos::prelude::*;

use crate::content::{
	ABOUT_BODY, ABOUT_HEADLINE, ALL_SKILLS, EDUCATION, FIRST_NAME, HIGHLIGHTS, LAST_NAME,
	RESUME_URL, SKILL_CATEGORIES, SKILLS, SOCIAL_LINKS, Skill,
};

/// Skills shown for a category tab; [`ALL_SKILLS`] matches everything.
pub fn filter_skills<'a>(skills: &'a [Skill], category: &str) -> Vec<&'a Skill> {
	skills
		.iter()
		.filter(|s| category == ALL_SKILLS || s.category == category)
		.collect()
}

/// Proficiency bucket displayed next to the bar.
pub fn proficiency_label(level: u8) -> &'static str {
	match level {
		90.. => "Expert",
		75..=89 => "Advanced",
		60..=74 => "Intermediate",
		_ => "Beginner",
	}
}

#[component]
pub fn About() -> impl IntoView {
	view! {
		<section id="about" class="section about">
			<h2 class="section-title">"About " <span class="accent">"Me"</span></h2>
			<div class="about-grid">
				<div class="about-card">
					<h3>{ABOUT_HEADLINE}</h3>
					<p>{ABOUT_BODY}</p>
					<div class="about-actions">
						<a href="#contact" class="button primary">"Get In Touch"</a>
						<a href=RESUME_URL download="CV.pdf" class="button outline">"Download CV"</a>
					</div>
				</div>
				<div class="about-highlights">
					{HIGHLIGHTS
						.iter()
						.map(|h| {
							view! {
								<div class="highlight">
									<h4>{h.title}</h4>
									<p>{h.body}</p>
								</div>
							}
						})
						.collect_view()}
				</div>
			</div>
		</section>
	}
}

#[component]
pub fn Education() -> impl IntoView {
	view! {
		<section id="education" class="section education">
			<h2 class="section-title">"My " <span class="accent">"Education"</span></h2>
			<table class="education-table">
				<thead>
					<tr>
						<th>"Degree"</th>
						<th>"Institution"</th>
						<th>"Duration"</th>
						<th>"Description"</th>
					</tr>
				</thead>
				<tbody>
					{EDUCATION
						.iter()
						.map(|e| {
							view! {
								<tr>
									<td class="degree">{e.degree}</td>
									<td class="institution">{e.institution}</td>
									<td>
										<span class="pill">{format!("{} - {}", e.start_year, e.end_year)}</span>
									</td>
									<td>{e.description}</td>
								</tr>
							}
						})
						.collect_view()}
				</tbody>
			</table>
		</section>
	}
}

#[component]
pub fn Skills() -> impl IntoView {
	let (category, set_category) = signal(ALL_SKILLS);

	view! {
		<section id="skills" class="section skills">
			<h2 class="section-title">"My " <span class="accent">"Skills"</span></h2>
			<div class="skill-tabs" role="tablist">
				{SKILL_CATEGORIES
					.iter()
					.map(|&c| {
						view! {
							<button
								role="tab"
								class="skill-tab"
								class:active=move || category.get() == c
								on:click=move |_| set_category.set(c)
							>
								{c}
							</button>
						}
					})
					.collect_view()}
			</div>
			<div class="skill-grid">
				{move || {
					filter_skills(SKILLS, category.get())
						.into_iter()
						.map(|s| {
							view! {
								<div class="skill-card" title=s.description>
									<div class="skill-head">
										<span class="skill-name">{s.name}</span>
										<span class="skill-level">
											{format!("{}% · {}", s.level, proficiency_label(s.level))}
										</span>
									</div>
									<div class="skill-track">
										<div class="skill-bar" style:width=format!("{}%", s.level)></div>
									</div>
								</div>
							}
						})
						.collect_view()
				}}
			</div>
		</section>
	}
}

#[component]
pub fn Footer() -> impl IntoView {
	let year = js_sys::Date::new_0().get_full_year();

	view! {
		<footer class="footer">
			<a href="#hero" class="back-to-top" aria-label="Scroll to top">"↑"</a>
			<div class="social-links">
				{SOCIAL_LINKS
					.iter()
					.map(|l| {
						view! {
							<a href=l.href target="_blank" rel="noopener noreferrer" aria-label=l.label>
								{l.label}
							</a>
						}
					})
					.collect_view()}
			</div>
			<p class="copyright">
				{format!("© {year} {FIRST_NAME} {LAST_NAME}. All rights reserved.")}
			</p>
		</footer>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn all_category_matches_everything() {
		assert_eq!(filter_skills(SKILLS, ALL_SKILLS).len(), SKILLS.len());
	}

	#[test]
	fn category_filter_is_exact() {
		let backend = filter_skills(SKILLS, "Backend");
		assert!(!backend.is_empty());
		assert!(backend.iter().all(|s| s.category == "Backend"));
		assert!(filter_skills(SKILLS, "Cooking").is_empty());
	}

	#[test]
	fn every_skill_belongs_to_a_listed_category() {
		assert!(SKILLS.iter().all(|s| SKILL_CATEGORIES.contains(&s.category)));
		assert!(SKILLS.iter().all(|s| s.level <= 100));
	}

	#[test]
	fn proficiency_buckets() {
		assert_eq!(proficiency_label(95), "Expert");
		assert_eq!(proficiency_label(80), "Advanced");
		assert_eq!(proficiency_label(60), "Intermediate");
		assert_eq!(proficiency_label(50), "Beginner");
	}
}
