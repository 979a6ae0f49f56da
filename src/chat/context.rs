use serde::Serialize;

/// What the persona is told about the page the user is looking at.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageContext {
	pub name: &'static str,
	pub description: &'static str,
	pub capabilities: Vec<&'static str>,
}

struct Entry {
	route: &'static str,
	name: &'static str,
	description: &'static str,
	capabilities: &'static [&'static str],
}

const PAGES: &[Entry] = &[
	Entry {
		route: "/graph",
		name: "Graph",
		description: "Explorer for the cognitive graph of people, projects, research and memories",
		capabilities: &["filter by category", "search nodes", "inspect a node", "run a discovery cycle"],
	},
	Entry {
		route: "/cards",
		name: "Cards",
		description: "Card view of graph nodes",
		capabilities: &["filter by category", "search nodes"],
	},
	Entry {
		route: "/write",
		name: "Write",
		description: "Markdown editor with live preview",
		capabilities: &["draft text", "preview markdown"],
	},
	Entry {
		route: "/read",
		name: "Read",
		description: "Document reader",
		capabilities: &["read documents", "save a selection as a reference"],
	},
	Entry {
		route: "/audio",
		name: "Audio",
		description: "Audio player for recorded memories and documents",
		capabilities: &["play audio", "change playback speed"],
	},
	Entry {
		route: "/jobs-feed",
		name: "Jobs Feed",
		description: "Jobs discovered by research cycles",
		capabilities: &["browse jobs", "run a job search cycle"],
	},
	Entry {
		route: "/research",
		name: "Research",
		description: "Knowledge graph of topics, articles and sources",
		capabilities: &["ask a research question"],
	},
	Entry {
		route: "/relationships",
		name: "Relationships",
		description: "People and organisations in the user's life",
		capabilities: &["change category", "change significance", "change type", "delete"],
	},
	Entry {
		route: "/projects",
		name: "Projects",
		description: "Projects with their tasks, goals and notes",
		capabilities: &["create project", "chat about a project", "research for a project"],
	},
];

const HOME: Entry = Entry {
	route: "/",
	name: "Home",
	description: "Workspace dashboard",
	capabilities: &["navigate", "connect accounts"],
};

/// Context for an in-app route (base path already stripped).
pub fn page_context_for(route: &str) -> PageContext {
	let entry = PAGES
		.iter()
		.find(|e| route == e.route || route.starts_with(&format!("{}/", e.route)))
		.unwrap_or(&HOME);
	PageContext {
		name: entry.name,
		description: entry.description,
		capabilities: entry.capabilities.to_vec(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_routes() {
		assert_eq!(page_context_for("/jobs-feed").name, "Jobs Feed");
		assert_eq!(page_context_for("/graph/").name, "Graph");
		assert_eq!(page_context_for("/").name, "Home");
		assert_eq!(page_context_for("/nowhere").name, "Home");
	}
}
