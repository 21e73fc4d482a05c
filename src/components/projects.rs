//! Recent GitHub repositories, with a static fallback when the API is down.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::content::{FALLBACK_PROJECTS, GITHUB_PROFILE, GITHUB_USER};

pub const MAX_PROJECTS: usize = 6;
const ACCEPT: &str = "application/vnd.github.v3+json";
const DEFAULT_LANGUAGE_COLOR: &str = "#6e5494";

/// Subset of the GitHub repository object used by the cards.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Repo {
	pub id: u64,
	pub name: String,
	pub description: Option<String>,
	pub html_url: String,
	pub homepage: Option<String>,
	pub language: Option<String>,
	#[serde(default)]
	pub topics: Vec<String>,
	#[serde(default)]
	pub stargazers_count: u32,
	#[serde(default)]
	pub forks_count: u32,
	#[serde(default)]
	pub fork: bool,
}

impl Repo {
	/// Live site when one is set, otherwise the repository page.
	pub fn link(&self) -> &str {
		self.homepage
			.as_deref()
			.filter(|h| !h.trim().is_empty())
			.unwrap_or(&self.html_url)
	}

	pub fn tags(&self) -> &[String] {
		&self.topics[..self.topics.len().min(2)]
	}
}

#[derive(Debug, Error)]
pub enum FetchError {
	#[error("no browser window")]
	NoWindow,
	#[error("request failed: {0}")]
	Request(String),
	#[error("GitHub API responded with status: {0}")]
	Status(u16),
	#[error("could not decode repositories: {0}")]
	Decode(String),
}

pub fn repos_url(user: &str) -> String {
	format!("https://api.github.com/users/{user}/repos?sort=updated&per_page={MAX_PROJECTS}")
}

pub fn decode_repos(body: &str) -> Result<Vec<Repo>, FetchError> {
	serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Drop forks and keep the first [`MAX_PROJECTS`].
pub fn filter_repos(repos: Vec<Repo>) -> Vec<Repo> {
	repos
		.into_iter()
		.filter(|r| !r.fork)
		.take(MAX_PROJECTS)
		.collect()
}

/// GitHub linguist colour for a language, purple for anything unknown.
pub fn language_color(language: &str) -> &'static str {
	match language {
		"JavaScript" => "#f1e05a",
		"TypeScript" => "#3178c6",
		"Python" => "#3572A5",
		"Java" => "#b07219",
		"C" => "#555555",
		"C++" => "#f34b7d",
		"C#" => "#178600",
		"Ruby" => "#701516",
		"PHP" => "#4F5D95",
		"Go" => "#00ADD8",
		"Rust" => "#dea584",
		"Swift" => "#ffac45",
		"Kotlin" => "#F18E33",
		"HTML" => "#e34c26",
		"CSS" => "#563d7c",
		"Shell" => "#89e051",
		_ => DEFAULT_LANGUAGE_COLOR,
	}
}

pub fn fallback_projects() -> Vec<Repo> {
	FALLBACK_PROJECTS
		.iter()
		.zip(1..)
		.map(|(p, id)| Repo {
			id,
			name: p.name.to_string(),
			description: Some(p.description.to_string()),
			html_url: p.url.to_string(),
			homepage: None,
			language: Some(p.language.to_string()),
			topics: Vec::new(),
			stargazers_count: 0,
			forks_count: 0,
			fork: false,
		})
		.collect()
}

pub async fn fetch_repos(user: &str) -> Result<Vec<Repo>, FetchError> {
	let js_err = |e: wasm_bindgen::JsValue| FetchError::Request(format!("{e:?}"));

	let headers = Headers::new().map_err(js_err)?;
	headers.set("Accept", ACCEPT).map_err(js_err)?;
	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::Cors);
	opts.set_headers(&headers);

	let request = Request::new_with_str_and_init(&repos_url(user), &opts).map_err(js_err)?;
	let window = web_sys::window().ok_or(FetchError::NoWindow)?;
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(js_err)?
		.dyn_into()
		.map_err(js_err)?;
	if !response.ok() {
		return Err(FetchError::Status(response.status()));
	}

	let body = JsFuture::from(response.text().map_err(js_err)?)
		.await
		.map_err(js_err)?
		.as_string()
		.ok_or_else(|| FetchError::Decode("response body is not text".to_string()))?;
	decode_repos(&body)
}

#[derive(Clone, Debug, PartialEq)]
enum ProjectsState {
	Loading,
	Loaded(Vec<Repo>),
	Failed(String),
}

impl ProjectsState {
	/// Failures stay inside the section; the page has no error boundary.
	fn from_fetch(result: Result<Vec<Repo>, FetchError>) -> Self {
		match result {
			Ok(repos) => {
				let repos = filter_repos(repos);
				info!("loaded {} repositories for {GITHUB_USER}", repos.len());
				ProjectsState::Loaded(repos)
			}
			Err(e) => {
				error!("error fetching GitHub repositories: {e}");
				ProjectsState::Failed(e.to_string())
			}
		}
	}
}

#[component]
fn ProjectCard(repo: Repo) -> impl IntoView {
	let language = repo.language.clone().map(|lang| {
		let color = language_color(&lang);
		view! {
			<span class="tag language" style:border-color=color>
				<span class="dot" style:background-color=color></span>
				{lang}
			</span>
		}
	});
	let tags = repo
		.tags()
		.iter()
		.map(|t| view! { <span class="tag">{t.clone()}</span> })
		.collect_view();
	let description = repo
		.description
		.clone()
		.unwrap_or_else(|| "A cool repository worth checking out!".to_string());
	let stars = (repo.stargazers_count > 0).then(|| format!("★ {}", repo.stargazers_count));
	let forks = (repo.forks_count > 0).then(|| format!("⑂ {}", repo.forks_count));

	view! {
		<article class="project-card" data-repo-id=repo.id.to_string()>
			<div class="project-tags">{language} {tags}</div>
			<h3>{repo.name.clone()}</h3>
			<p class="project-description">{description}</p>
			<div class="project-footer">
				<div class="project-links">
					<a href=repo.link().to_string() target="_blank" rel="noopener noreferrer">"Live"</a>
					<a href=repo.html_url.clone() target="_blank" rel="noopener noreferrer">"Source"</a>
				</div>
				<div class="project-stats">
					{stars.map(|s| view! { <span>{s}</span> })}
					{forks.map(|f| view! { <span>{f}</span> })}
				</div>
			</div>
		</article>
	}
}

fn cards(repos: Vec<Repo>) -> impl IntoView {
	view! {
		<div class="project-grid">
			{repos.into_iter().map(|repo| view! { <ProjectCard repo=repo /> }).collect_view()}
		</div>
	}
}

#[component]
pub fn Projects() -> impl IntoView {
	let (state, set_state) = signal(ProjectsState::Loading);

	spawn_local(async move {
		let next = ProjectsState::from_fetch(fetch_repos(GITHUB_USER).await);
		set_state.try_set(next);
	});

	view! {
		<section id="projects" class="section projects">
			<h2 class="section-title">"Featured " <span class="accent">"Projects"</span></h2>
			<p class="section-lead">"Recent work from GitHub."</p>
			{move || match state.get() {
				ProjectsState::Loading => {
					view! { <div class="projects-loading">"Loading projects..."</div> }.into_any()
				}
				ProjectsState::Failed(message) => {
					view! {
						<div class="projects-error">
							<p class="error">"Failed to load projects from GitHub"</p>
							<p class="muted" title=message>"Using fallback project data"</p>
						</div>
						{cards(fallback_projects())}
					}
						.into_any()
				}
				ProjectsState::Loaded(repos) => cards(repos).into_any(),
			}}
			<a class="button primary more" href=GITHUB_PROFILE target="_blank" rel="noopener noreferrer">
				"View More on GitHub"
			</a>
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = r#"[
		{"id": 1, "name": "engine", "description": "A renderer", "html_url": "https://github.com/u/engine",
		 "homepage": "https://engine.dev", "language": "Rust", "topics": ["wasm", "canvas", "graphics"],
		 "stargazers_count": 12, "forks_count": 0, "fork": false, "size": 1024},
		{"id": 2, "name": "forked", "description": null, "html_url": "https://github.com/u/forked",
		 "homepage": "", "language": null, "stargazers_count": 0, "forks_count": 3, "fork": true}
	]"#;

	fn repo(id: u64, fork: bool) -> Repo {
		Repo {
			id,
			name: format!("repo-{id}"),
			description: None,
			html_url: format!("https://github.com/u/repo-{id}"),
			homepage: None,
			language: None,
			topics: Vec::new(),
			stargazers_count: 0,
			forks_count: 0,
			fork,
		}
	}

	#[test]
	fn decodes_github_payload_ignoring_extra_fields() {
		let repos = decode_repos(SAMPLE).unwrap();
		assert_eq!(repos.len(), 2);
		assert_eq!(repos[0].language.as_deref(), Some("Rust"));
		assert_eq!(repos[0].tags(), ["wasm", "canvas"]);
		assert!(repos[1].topics.is_empty());
		assert!(repos[1].fork);
	}

	#[test]
	fn malformed_body_is_a_decode_error() {
		assert!(matches!(decode_repos("{\"message\":"), Err(FetchError::Decode(_))));
	}

	#[test]
	fn link_prefers_a_non_empty_homepage() {
		let repos = decode_repos(SAMPLE).unwrap();
		assert_eq!(repos[0].link(), "https://engine.dev");
		assert_eq!(repos[1].link(), "https://github.com/u/forked");
	}

	#[test]
	fn filter_drops_forks_and_caps_the_list() {
		let repos = (1..=10).map(|id| repo(id, id % 3 == 0)).collect();
		let kept = filter_repos(repos);
		assert_eq!(kept.len(), MAX_PROJECTS);
		assert!(kept.iter().all(|r| !r.fork));
		assert_eq!(kept.first().map(|r| r.id), Some(1));
	}

	#[test]
	fn language_colors_fall_back_to_purple() {
		assert_eq!(language_color("Rust"), "#dea584");
		assert_eq!(language_color("C#"), "#178600");
		assert_eq!(language_color("Brainfuck"), DEFAULT_LANGUAGE_COLOR);
	}

	#[test]
	fn url_requests_recently_updated_repos() {
		assert_eq!(
			repos_url("octocat"),
			"https://api.github.com/users/octocat/repos?sort=updated&per_page=6"
		);
	}

	#[test]
	fn fallback_projects_have_unique_ids() {
		let fallback = fallback_projects();
		assert_eq!(fallback.len(), FALLBACK_PROJECTS.len());
		assert!(fallback.windows(2).all(|w| w[0].id < w[1].id));
	}

	#[test]
	fn fetch_outcome_becomes_section_state() {
		let repos = (1..=8).map(|id| repo(id, id == 2)).collect();
		match ProjectsState::from_fetch(Ok(repos)) {
			ProjectsState::Loaded(kept) => {
				assert_eq!(kept.len(), MAX_PROJECTS);
				assert!(kept.iter().all(|r| !r.fork));
			}
			other => panic!("expected loaded repos, got {other:?}"),
		}
		assert_eq!(
			ProjectsState::from_fetch(Err(FetchError::Status(500))),
			ProjectsState::Failed("GitHub API responded with status: 500".to_string())
		);
		assert_eq!(
			ProjectsState::from_fetch(Err(FetchError::NoWindow)),
			ProjectsState::Failed("no browser window".to_string())
		);
	}

	#[test]
	fn status_error_reads_like_the_api_message() {
		assert_eq!(
			FetchError::Status(403).to_string(),
			"GitHub API responded with status: 403"
		);
	}
}
