//! Client-side narrowing of a fetched graph by category and free text.
//!
//! Filters never touch their input: callers always pass the original fetched
//! data so successive filters cannot compound.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use super::types::{GraphData, GraphEdge, GraphNode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterCategory {
	#[default]
	All,
	Identity,
	People,
	Projects,
	Research,
	Documents,
}

impl FilterCategory {
	pub const EVERY: [FilterCategory; 6] = [
		FilterCategory::All,
		FilterCategory::Identity,
		FilterCategory::People,
		FilterCategory::Projects,
		FilterCategory::Research,
		FilterCategory::Documents,
	];

	pub fn key(self) -> &'static str {
		match self {
			FilterCategory::All => "all",
			FilterCategory::Identity => "identity",
			FilterCategory::People => "people",
			FilterCategory::Projects => "projects",
			FilterCategory::Research => "research",
			FilterCategory::Documents => "documents",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			FilterCategory::All => "All",
			FilterCategory::Identity => "Identity",
			FilterCategory::People => "People",
			FilterCategory::Projects => "Projects",
			FilterCategory::Research => "Research",
			FilterCategory::Documents => "Documents",
		}
	}

	/// Reads a `?filter=` value; anything unrecognised shows everything.
	pub fn from_query(value: Option<&str>) -> Self {
		value.and_then(|v| v.parse().ok()).unwrap_or_default()
	}
}

impl fmt::Display for FilterCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for FilterCategory {
	type Err = UnknownCategory;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		FilterCategory::EVERY
			.into_iter()
			.find(|c| c.key().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| UnknownCategory(s.to_string()))
	}
}

const DEFAULT_TABLE: &[(&str, FilterCategory)] = &[
	("User", FilterCategory::Identity),
	("Persona", FilterCategory::Identity),
	("Trait", FilterCategory::Identity),
	("Memory", FilterCategory::Identity),
	("Preference", FilterCategory::Identity),
	("Person", FilterCategory::People),
	("Organization", FilterCategory::People),
	("Company", FilterCategory::People),
	("Project", FilterCategory::Projects),
	("Task", FilterCategory::Projects),
	("Goal", FilterCategory::Projects),
	("Cycle", FilterCategory::Projects),
	("Chapter", FilterCategory::Projects),
	("Draft", FilterCategory::Projects),
	("Topic", FilterCategory::Research),
	("Article", FilterCategory::Research),
	("Source", FilterCategory::Research),
	("Insight", FilterCategory::Research),
	("Tag", FilterCategory::Research),
	("Note", FilterCategory::Research),
	("Job", FilterCategory::Research),
	("Scholarship", FilterCategory::Research),
	("Document", FilterCategory::Documents),
	("Chunk", FilterCategory::Documents),
	("Entity", FilterCategory::Documents),
];

/// Flat node-type to category lookup. Each type belongs to at most one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryMap {
	table: HashMap<String, FilterCategory>,
}

impl Default for CategoryMap {
	fn default() -> Self {
		Self {
			table: DEFAULT_TABLE
				.iter()
				.map(|(t, c)| (t.to_string(), *c))
				.collect(),
		}
	}
}

impl CategoryMap {
	pub fn empty() -> Self {
		Self {
			table: HashMap::new(),
		}
	}

	/// Maps `node_type` to `category`, replacing any previous mapping.
	pub fn with(mut self, node_type: &str, category: FilterCategory) -> Self {
		self.table.insert(node_type.to_string(), category);
		self
	}

	pub fn category_of(&self, node_type: &str) -> Option<FilterCategory> {
		self.table.get(node_type).copied()
	}

	pub fn admits(&self, category: FilterCategory, node: &GraphNode) -> bool {
		category == FilterCategory::All || self.category_of(&node.node_type) == Some(category)
	}
}

/// Node field a search query matched first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchField {
	Name,
	Description,
	Content,
	Type,
}

/// Case-insensitive substring test over name, description, content and type.
pub fn match_field(node: &GraphNode, query: &str) -> Option<MatchField> {
	let needle = query.trim().to_lowercase();
	if needle.is_empty() {
		return None;
	}
	let fields = [
		(MatchField::Name, Some(node.name.as_str())),
		(MatchField::Description, node.description.as_deref()),
		(MatchField::Content, node.content.as_deref()),
		(MatchField::Type, Some(node.node_type.as_str())),
	];
	fields.into_iter().find_map(|(field, value)| {
		value
			.filter(|v| !v.is_empty() && v.to_lowercase().contains(&needle))
			.map(|_| field)
	})
}

/// Keeps only edges whose endpoints are both in `nodes`.
pub fn retain_edges(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<GraphEdge> {
	let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	edges
		.iter()
		.filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
		.cloned()
		.collect()
}

fn keep_nodes(data: &GraphData, keep: impl Fn(&GraphNode) -> bool) -> GraphData {
	let nodes: Vec<GraphNode> = data.nodes.iter().filter(|n| keep(*n)).cloned().collect();
	let edges = retain_edges(&nodes, &data.edges);
	GraphData { nodes, edges }
}

/// `All` keeps every node; dangling edges are dropped either way.
pub fn filter_by_category(data: &GraphData, map: &CategoryMap, category: FilterCategory) -> GraphData {
	keep_nodes(data, |n| map.admits(category, n))
}

/// Blank queries keep every node.
pub fn search(data: &GraphData, query: &str) -> GraphData {
	if query.trim().is_empty() {
		return keep_nodes(data, |_| true);
	}
	keep_nodes(data, |n| match_field(n, query).is_some())
}

/// Category filter followed by text search, both from the unfiltered `data`.
pub fn apply(data: &GraphData, map: &CategoryMap, category: FilterCategory, query: &str) -> GraphData {
	search(&filter_by_category(data, map, category), query)
}

/// Badge counts per category, always from the unfiltered set.
pub fn category_counts(nodes: &[GraphNode], map: &CategoryMap) -> Vec<(FilterCategory, usize)> {
	FilterCategory::EVERY
		.into_iter()
		.map(|c| (c, nodes.iter().filter(|n| map.admits(c, n)).count()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, t: &str, name: &str) -> GraphNode {
		GraphNode::new(id, t, name)
	}

	fn sample() -> GraphData {
		GraphData::new(
			vec![
				node("u", "User", "Me"),
				node("a", "Person", "Alice Smith"),
				node("b", "Person", "Bob"),
				node("p", "Project", "Garden"),
				GraphNode {
					description: Some("notes about alice's thesis".into()),
					..node("d", "Document", "Thesis draft")
				},
			],
			vec![
				GraphEdge::new("u", "a", "KNOWS"),
				GraphEdge::new("a", "b", "KNOWS"),
				GraphEdge::new("u", "p", "OWNS"),
				GraphEdge::new("a", "d", "AUTHORED"),
				GraphEdge::new("b", "nobody", "KNOWS"),
			],
		)
	}

	fn ids(data: &GraphData) -> Vec<&str> {
		data.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn people_filter_keeps_only_people() {
		let data = GraphData::new(
			vec![node("1", "User", "Me"), node("2", "Person", "Ann"), node("3", "Project", "X")],
			vec![
				GraphEdge::new("1", "2", "KNOWS"),
				GraphEdge::new("2", "3", "WORKS_ON"),
				GraphEdge::new("1", "3", "OWNS"),
			],
		);
		let map = CategoryMap::empty().with("Person", FilterCategory::People);
		let out = filter_by_category(&data, &map, FilterCategory::People);
		assert_eq!(ids(&out), vec!["2"]);
		assert!(out.edges.is_empty());
	}

	#[test]
	fn all_filter_restores_original() {
		let mut data = sample();
		data.edges.retain(|e| e.target != "nobody");
		let map = CategoryMap::default();
		let _narrowed = filter_by_category(&data, &map, FilterCategory::People);
		assert_eq!(filter_by_category(&data, &map, FilterCategory::All), data);
	}

	#[test]
	fn search_is_case_insensitive() {
		let data = sample();
		for q in ["alice", "ALICE", "  Alice "] {
			let out = search(&data, q);
			assert!(ids(&out).contains(&"a"), "query {q:?}");
		}
	}

	#[test]
	fn search_checks_fields_in_order() {
		let data = sample();
		let doc = data.node("d").unwrap();
		assert_eq!(match_field(doc, "thesis"), Some(MatchField::Name));
		assert_eq!(match_field(doc, "alice"), Some(MatchField::Description));
		assert_eq!(match_field(doc, "document"), Some(MatchField::Type));
		assert_eq!(match_field(doc, "zzz"), None);
	}

	#[test]
	fn search_preserves_input_order() {
		let out = search(&sample(), "a");
		let positions: Vec<usize> = out
			.nodes
			.iter()
			.map(|n| sample().nodes.iter().position(|m| m.id == n.id).unwrap())
			.collect();
		let mut sorted = positions.clone();
		sorted.sort_unstable();
		assert_eq!(positions, sorted);
	}

	#[test]
	fn search_narrows_category_result() {
		let data = sample();
		let map = CategoryMap::default();
		for category in FilterCategory::EVERY {
			let base = filter_by_category(&data, &map, category);
			let narrowed = apply(&data, &map, category, "bo");
			for id in ids(&narrowed) {
				assert!(ids(&base).contains(&id));
			}
		}
	}

	#[test]
	fn edges_survive_iff_both_endpoints_survive() {
		let data = sample();
		let map = CategoryMap::default();
		for category in FilterCategory::EVERY {
			for query in ["", "alice", "o", "garden"] {
				let out = apply(&data, &map, category, query);
				let kept: HashSet<&str> = ids(&out).into_iter().collect();
				for e in &data.edges {
					let survives = kept.contains(e.source.as_str()) && kept.contains(e.target.as_str());
					assert_eq!(out.edges.contains(e), survives, "{e:?} {category} {query:?}");
				}
			}
		}
	}

	#[test]
	fn counts_ignore_current_filter() {
		let data = sample();
		let counts: HashMap<_, _> = category_counts(&data.nodes, &CategoryMap::default())
			.into_iter()
			.collect();
		assert_eq!(counts[&FilterCategory::All], 5);
		assert_eq!(counts[&FilterCategory::People], 2);
		assert_eq!(counts[&FilterCategory::Identity], 1);
		assert_eq!(counts[&FilterCategory::Documents], 1);
		assert_eq!(counts[&FilterCategory::Research], 0);
	}

	#[test]
	fn query_param_parsing() {
		assert_eq!(FilterCategory::from_query(Some("people")), FilterCategory::People);
		assert_eq!(FilterCategory::from_query(Some("PROJECTS")), FilterCategory::Projects);
		assert_eq!(FilterCategory::from_query(Some("bogus")), FilterCategory::All);
		assert_eq!(FilterCategory::from_query(None), FilterCategory::All);
	}
}
