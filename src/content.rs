//! Static portfolio copy: names, roles, sections and links.

/// In-page anchor shown in the navbar.
pub struct NavItem {
	pub name: &'static str,
	pub href: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
	NavItem { name: "Home", href: "#hero" },
	NavItem { name: "About", href: "#about" },
	NavItem { name: "Education", href: "#education" },
	NavItem { name: "Skills", href: "#skills" },
	NavItem { name: "Projects", href: "#projects" },
	NavItem { name: "Contact", href: "#contact" },
];

pub const FIRST_NAME: &str = "Abdullah";
pub const LAST_NAME: &str = "Mansoor";

pub const ROLES: &[&str] = &[
	"Full-Stack Developer",
	"Software Engineer",
	"Computer Scientist",
	"Mobile App Developer",
];

pub const TAGLINE: &str = "Creating elegant, high-performance solutions with modern technologies. \
	Focused on delivering exceptional user experiences through clean code.";

pub const RESUME_URL: &str = "/projects/CV.pdf";

pub const ABOUT_HEADLINE: &str = "CS Student | Building, Learning, Growing";
pub const ABOUT_BODY: &str = "A computer science student who loves building things with code: \
	web development with React and Node.js, native Android apps, and a steady habit of learning \
	something new every day.";

pub struct Highlight {
	pub title: &'static str,
	pub body: &'static str,
}

pub const HIGHLIGHTS: &[Highlight] = &[
	Highlight {
		title: "Web Development",
		body: "Creating responsive websites and web applications with modern frameworks.",
	},
	Highlight {
		title: "App Development",
		body: "Android apps in Android Studio with Jetpack Compose.",
	},
	Highlight {
		title: "Computer Science",
		body: "Leading projects from conception to completion with agile methodologies.",
	},
];

pub struct Education {
	pub degree: &'static str,
	pub institution: &'static str,
	pub start_year: u16,
	pub end_year: u16,
	pub description: &'static str,
}

pub const EDUCATION: &[Education] = &[
	Education {
		degree: "Bachelor of Science in Computer Science",
		institution: "Information Technology University",
		start_year: 2023,
		end_year: 2027,
		description: "Focused on development and machine learning.",
	},
	Education {
		degree: "FSc (Pre-Engineering)",
		institution: "Government College University Lahore (GCU)",
		start_year: 2021,
		end_year: 2023,
		description: "Rich heritage and academic excellence with a focus on critical thinking.",
	},
];

/// Pseudo-category that matches every skill.
pub const ALL_SKILLS: &str = "All";

pub const SKILL_CATEGORIES: &[&str] = &[
	ALL_SKILLS,
	"Programming Language",
	"Frontend",
	"Backend",
	"Tools",
];

pub struct Skill {
	pub name: &'static str,
	/// Proficiency, 0-100.
	pub level: u8,
	pub category: &'static str,
	pub description: &'static str,
}

pub const SKILLS: &[Skill] = &[
	Skill {
		name: "HTML/CSS",
		level: 95,
		category: "Frontend",
		description: "Responsive, accessible and semantic markup with modern CSS",
	},
	Skill {
		name: "JavaScript",
		level: 90,
		category: "Frontend",
		description: "ES6+, async/await, DOM manipulation and modern patterns",
	},
	Skill {
		name: "React",
		level: 90,
		category: "Frontend",
		description: "Complex UIs with hooks, context and state management",
	},
	Skill {
		name: "Tailwind CSS",
		level: 90,
		category: "Frontend",
		description: "Utility-first styling and design systems",
	},
	Skill {
		name: "Bootstrap",
		level: 80,
		category: "Frontend",
		description: "Responsive layouts with prebuilt components",
	},
	Skill {
		name: "C/C++",
		level: 70,
		category: "Programming Language",
		description: "Data structures, algorithms and systems programming",
	},
	Skill {
		name: "Python",
		level: 60,
		category: "Programming Language",
		description: "Scripting, automation and data analysis",
	},
	Skill {
		name: "Java",
		level: 50,
		category: "Programming Language",
		description: "Object-oriented programming fundamentals",
	},
	Skill {
		name: "Node.js",
		level: 80,
		category: "Backend",
		description: "Server-side JavaScript and REST APIs",
	},
	Skill {
		name: "Express",
		level: 75,
		category: "Backend",
		description: "Routing, middleware and API design",
	},
	Skill {
		name: "MongoDB",
		level: 70,
		category: "Backend",
		description: "Document modelling and aggregation",
	},
	Skill {
		name: "PostgreSQL",
		level: 65,
		category: "Backend",
		description: "Relational schemas and SQL queries",
	},
	Skill {
		name: "Git/GitHub",
		level: 90,
		category: "Tools",
		description: "Branching workflows, reviews and CI",
	},
	Skill {
		name: "Figma",
		level: 85,
		category: "Tools",
		description: "Wireframes and interface prototypes",
	},
	Skill {
		name: "VS Code",
		level: 95,
		category: "Tools",
		description: "Daily editor with a tuned extension setup",
	},
];

pub const GITHUB_USER: &str = "Abdullah-608";
pub const GITHUB_PROFILE: &str = "https://github.com/Abdullah-608";

/// Shown when the GitHub API cannot be reached.
pub struct ProjectStub {
	pub name: &'static str,
	pub description: &'static str,
	pub url: &'static str,
	pub language: &'static str,
}

pub const FALLBACK_PROJECTS: &[ProjectStub] = &[
	ProjectStub {
		name: "portfolio",
		description: "This site: a single-page portfolio with an animated circuit backdrop.",
		url: "https://github.com/Abdullah-608",
		language: "Rust",
	},
	ProjectStub {
		name: "task-manager",
		description: "Full-stack task tracker with authentication and a REST API.",
		url: "https://github.com/Abdullah-608",
		language: "JavaScript",
	},
	ProjectStub {
		name: "android-notes",
		description: "Offline-first notes app built with Jetpack Compose.",
		url: "https://github.com/Abdullah-608",
		language: "Kotlin",
	},
];

pub struct SocialLink {
	pub label: &'static str,
	pub href: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
	SocialLink { label: "GitHub", href: GITHUB_PROFILE },
	SocialLink {
		label: "LinkedIn",
		href: "https://www.linkedin.com/in/abdullah-608-mansoor",
	},
	SocialLink {
		label: "Email",
		href: "mailto:abdullahmansoor608@gmail.com",
	},
];

pub const CONTACT_EMAIL: &str = "abdullahmansoor608@gmail.com";
pub const LOCATION: &str = "Lahore, Pakistan";
