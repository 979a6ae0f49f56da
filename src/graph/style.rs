use std::collections::HashSet;

use super::types::{GraphData, GraphEdge};

pub const DEFAULT_EDGE_COLOR: &str = "#94a3b8";
pub const DEFAULT_NODE_COLOR: &str = "#64748b";

const EDGE_COLORS: &[(&str, &str)] = &[
	("KNOWS", "#3b82f6"),
	("WORKS_AT", "#8b5cf6"),
	("WORKED_AT", "#a78bfa"),
	("WORKS_ON", "#10b981"),
	("COLLABORATES_ON", "#14b8a6"),
	("MEMBER_OF", "#06b6d4"),
	("OWNS", "#f59e0b"),
	("HAS_TRAIT", "#ec4899"),
	("HAS_MEMORY", "#f472b6"),
	("LEARNED_PREFERENCE", "#fb7185"),
	("ADAPTED_FOR", "#e11d48"),
	("ASSISTS", "#6366f1"),
	("INITIATED", "#84cc16"),
	("PART_OF", "#22c55e"),
	("CONTAINS", "#16a34a"),
	("WORKS_TOWARD", "#eab308"),
	("DEPENDS_ON", "#f97316"),
	("INFORMS", "#0ea5e9"),
	("RELATED_TO", "#94a3b8"),
	("ABOUT_TOPIC", "#38bdf8"),
	("INTERESTED_IN", "#c084fc"),
	("RESEARCHED", "#7dd3fc"),
	("HAS_CHUNK", "#cbd5e1"),
	("REFERENCES", "#a3a3a3"),
	("TAGGED_WITH", "#fbbf24"),
];

/// Relationship types drawn with a moving dash.
const ANIMATED_EDGES: &[&str] = &["ASSISTS", "ADAPTED_FOR", "INITIATED", "WORKS_TOWARD", "INFORMS"];

const NODE_COLORS: &[(&str, &str)] = &[
	("User", "#f59e0b"),
	("Persona", "#8b5cf6"),
	("Person", "#3b82f6"),
	("Organization", "#6366f1"),
	("Company", "#4f46e5"),
	("Project", "#10b981"),
	("Task", "#22c55e"),
	("Goal", "#eab308"),
	("Cycle", "#84cc16"),
	("Topic", "#06b6d4"),
	("Article", "#0ea5e9"),
	("Source", "#38bdf8"),
	("Insight", "#14b8a6"),
	("Tag", "#fbbf24"),
	("Note", "#a3e635"),
	("Document", "#f97316"),
	("Chunk", "#fdba74"),
	("Memory", "#ec4899"),
	("Trait", "#f472b6"),
	("Preference", "#fb7185"),
	("Job", "#a855f7"),
];

/// Every edge also gets a closed arrowhead at its target.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	pub color: &'static str,
	pub animated: bool,
}

impl EdgeStyle {
	pub fn for_type(edge_type: &str) -> Self {
		let color = EDGE_COLORS
			.iter()
			.find(|(t, _)| *t == edge_type)
			.map(|(_, c)| *c)
			.unwrap_or(DEFAULT_EDGE_COLOR);
		Self {
			color,
			animated: ANIMATED_EDGES.contains(&edge_type),
		}
	}
}

/// An edge that survived endpoint checks, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub label: String,
	pub style: EdgeStyle,
}

pub fn node_color(node_type: &str) -> &'static str {
	NODE_COLORS
		.iter()
		.find(|(t, _)| *t == node_type)
		.map(|(_, c)| *c)
		.unwrap_or(DEFAULT_NODE_COLOR)
}

/// `WORKS_ON` reads as `works on`.
pub fn edge_label(edge_type: &str) -> String {
	edge_type.replace('_', " ").to_lowercase()
}

pub fn style_edge(edge: &GraphEdge, index: usize) -> StyledEdge {
	StyledEdge {
		id: edge.synthetic_id(index),
		source: edge.source.clone(),
		target: edge.target.clone(),
		label: edge_label(&edge.edge_type),
		style: EdgeStyle::for_type(&edge.edge_type),
	}
}

/// Styles the edges of `data`, dropping any whose endpoints are not present.
pub fn style_edges(data: &GraphData) -> Vec<StyledEdge> {
	let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
	data.edges
		.iter()
		.enumerate()
		.filter(|(_, e)| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
		.map(|(i, e)| style_edge(e, i))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::types::GraphNode;

	#[test]
	fn unknown_edge_type_uses_default_color() {
		let style = EdgeStyle::for_type("SOMETHING_NEW");
		assert_eq!(style.color, DEFAULT_EDGE_COLOR);
		assert!(!style.animated);
	}

	#[test]
	fn emphasised_edges_are_animated() {
		assert!(EdgeStyle::for_type("ASSISTS").animated);
		assert!(!EdgeStyle::for_type("KNOWS").animated);
		assert_eq!(EdgeStyle::for_type("KNOWS").color, "#3b82f6");
	}

	#[test]
	fn dangling_edges_are_not_rendered() {
		let data = GraphData::new(
			vec![GraphNode::new("a", "User", "A"), GraphNode::new("b", "Person", "B")],
			vec![
				GraphEdge::new("a", "b", "KNOWS"),
				GraphEdge::new("a", "missing", "KNOWS"),
				GraphEdge::new("b", "b", "RELATED_TO"),
			],
		);
		let styled = style_edges(&data);
		let ids: Vec<_> = styled.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, vec!["a-b-0", "b-b-2"]);
		assert_eq!(styled[1].label, "related to");
	}

	#[test]
	fn node_colors_fall_back() {
		assert_eq!(node_color("User"), "#f59e0b");
		assert_eq!(node_color("Alien"), DEFAULT_NODE_COLOR);
	}
}
