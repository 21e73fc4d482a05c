use std::time::Duration;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use log::info;
use thiserror::Error;

use crate::content::{CONTACT_EMAIL, LOCATION};

/// Simulated delivery time; nothing leaves the browser.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
	pub name: String,
	pub email: String,
	pub message: String,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FormError {
	#[error("Please enter your name.")]
	MissingName,
	#[error("Please enter a valid email address.")]
	InvalidEmail,
	#[error("Please write a message.")]
	MissingMessage,
}

/// An `@` with a non-empty local part and a dot somewhere after it.
pub fn is_valid_email(email: &str) -> bool {
	let email = email.trim();
	match email.split_once('@') {
		Some((local, domain)) => {
			!local.is_empty()
				&& domain
					.find('.')
					.is_some_and(|dot| dot > 0 && dot + 1 < domain.len())
		}
		None => false,
	}
}

impl ContactForm {
	pub fn validate(&self) -> Result<(), FormError> {
		if self.name.trim().is_empty() {
			return Err(FormError::MissingName);
		}
		if !is_valid_email(&self.email) {
			return Err(FormError::InvalidEmail);
		}
		if self.message.trim().is_empty() {
			return Err(FormError::MissingMessage);
		}
		Ok(())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Submission {
	#[default]
	Idle,
	Submitting,
	Sent,
}

impl Submission {
	/// State after a submit attempt; ignored while one is in flight.
	pub fn submit(self, form: &ContactForm) -> Result<Submission, FormError> {
		if self == Submission::Submitting {
			return Ok(self);
		}
		form.validate()?;
		Ok(Submission::Submitting)
	}

	pub fn button_label(self) -> &'static str {
		match self {
			Submission::Submitting => "Sending...",
			_ => "Send Message",
		}
	}
}

#[component]
pub fn Contact() -> impl IntoView {
	let form = RwSignal::new(ContactForm::default());
	let status = RwSignal::new(Submission::Idle);
	let error = RwSignal::new(None::<FormError>);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let current = status.get_untracked();
		match form.with_untracked(|f| current.submit(f)) {
			Err(e) => error.set(Some(e)),
			Ok(next) if next != current => {
				error.set(None);
				status.set(next);
				set_timeout(
					move || {
						info!("contact message accepted");
						status.try_set(Submission::Sent);
						form.try_set(ContactForm::default());
					},
					SUBMIT_DELAY,
				);
			}
			Ok(_) => {}
		}
	};

	view! {
		<section id="contact" class="section contact">
			<h2 class="section-title">"Get In " <span class="accent">"Touch"</span></h2>
			<div class="contact-grid">
				<div class="contact-info">
					<h3>"Contact Information"</h3>
					<p>
						"Email: " <a href=format!("mailto:{CONTACT_EMAIL}")>{CONTACT_EMAIL}</a>
					</p>
					<p>"Location: " {LOCATION}</p>
				</div>
				<form class="contact-form" on:submit=on_submit>
					<label for="name">"Your Name"</label>
					<input
						id="name"
						type="text"
						placeholder="Your name..."
						prop:value=move || form.with(|f| f.name.clone())
						on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
					/>
					<label for="email">"Your Email"</label>
					<input
						id="email"
						type="email"
						placeholder="your.email@example.com"
						prop:value=move || form.with(|f| f.email.clone())
						on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
					/>
					<label for="message">"Your Message"</label>
					<textarea
						id="message"
						rows="5"
						placeholder="Tell me about your project or idea..."
						prop:value=move || form.with(|f| f.message.clone())
						on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
					></textarea>
					{move || error.get().map(|e| view! { <p class="form-error">{e.to_string()}</p> })}
					<Show when=move || status.get() == Submission::Sent>
						<p class="form-sent">"Message sent! I'll get back to you soon."</p>
					</Show>
					<button
						type="submit"
						class="button primary"
						disabled=move || status.get() == Submission::Submitting
					>
						{move || status.get().button_label()}
					</button>
				</form>
			</div>
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn form(name: &str, email: &str, message: &str) -> ContactForm {
		ContactForm {
			name: name.into(),
			email: email.into(),
			message: message.into(),
		}
	}

	#[test]
	fn email_needs_at_and_a_dot_after_it() {
		assert!(is_valid_email("me@example.com"));
		assert!(is_valid_email(" a.b@c.io "));
		assert!(!is_valid_email("me.example.com"));
		assert!(!is_valid_email("me@localhost"));
		assert!(!is_valid_email("@example.com"));
		assert!(!is_valid_email("me@.com"));
		assert!(!is_valid_email("me@example."));
	}

	#[test]
	fn validation_reports_the_first_problem() {
		assert_eq!(form("", "x", "").validate(), Err(FormError::MissingName));
		assert_eq!(form("Ada", "nope", "").validate(), Err(FormError::InvalidEmail));
		assert_eq!(
			form("Ada", "ada@example.com", "  ").validate(),
			Err(FormError::MissingMessage)
		);
		assert_eq!(form("Ada", "ada@example.com", "Hi").validate(), Ok(()));
	}

	#[test]
	fn submit_moves_to_submitting_only_when_valid() {
		let good = form("Ada", "ada@example.com", "Hi");
		assert_eq!(Submission::Idle.submit(&good), Ok(Submission::Submitting));
		assert_eq!(Submission::Sent.submit(&good), Ok(Submission::Submitting));
		assert_eq!(
			Submission::Idle.submit(&ContactForm::default()),
			Err(FormError::MissingName)
		);
		assert_eq!(
			Submission::Submitting.submit(&ContactForm::default()),
			Ok(Submission::Submitting)
		);
	}

	#[test]
	fn button_label_tracks_state() {
		assert_eq!(Submission::Submitting.button_label(), "Sending...");
		assert_eq!(Submission::Idle.button_label(), "Send Message");
	}
}
