use serde::{Deserialize, Deserializer, Serialize};

pub const USER: &str = "User";
pub const PERSONA: &str = "Persona";
pub const PROJECT: &str = "Project";

/// A typed node as returned by the graph endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(rename = "type", default)]
	pub node_type: String,
	#[serde(alias = "label", default)]
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub strength: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub confidence: Option<f64>,
	/// 1 to 5.
	#[serde(
		default,
		deserialize_with = "lenient_significance",
		skip_serializing_if = "Option::is_none"
	)]
	pub significance: Option<u8>,
	/// Relationship category, only set on the relationships graph.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
	#[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
	pub properties: serde_json::Map<String, serde_json::Value>,
}

/// Accepts fractional or quoted scores, rounded into 1..=5. Anything else
/// reads as unset so one odd node does not fail the whole graph.
fn lenient_significance<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u8>, D::Error> {
	use serde_json::Value;

	let score = match Option::<Value>::deserialize(de)? {
		Some(Value::Number(n)) => n.as_f64(),
		Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
		_ => None,
	};
	Ok(score.filter(|s| s.is_finite()).map(|s| s.round().clamp(1.0, 5.0) as u8))
}

impl GraphNode {
	pub fn new(id: impl Into<String>, node_type: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			node_type: node_type.into(),
			name: name.into(),
			..Default::default()
		}
	}

	pub fn is_type(&self, node_type: &str) -> bool {
		self.node_type == node_type
	}

	/// Name to draw on the canvas, falling back to the id.
	pub fn display_name(&self) -> &str {
		if self.name.trim().is_empty() {
			&self.id
		} else {
			&self.name
		}
	}

	/// String-valued entry of the free-form property bag.
	pub fn property(&self, key: &str) -> Option<&str> {
		self.properties.get(key).and_then(|v| v.as_str())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub source: String,
	pub target: String,
	#[serde(rename = "type", alias = "relationship", default)]
	pub edge_type: String,
}

impl GraphEdge {
	pub fn new(
		source: impl Into<String>,
		target: impl Into<String>,
		edge_type: impl Into<String>,
	) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			edge_type: edge_type.into(),
		}
	}

	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	/// Parallel edges between the same pair stay distinct through their index.
	pub fn synthetic_id(&self, index: usize) -> String {
		format!("{}-{}-{}", self.source, self.target, index)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
		Self { nodes, edges }
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Nodes connected to `id` by any edge, with the edge type.
	pub fn neighbors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = (&'a GraphNode, &'a str)> + 'a {
		self.edges.iter().filter_map(move |e| {
			let other = if e.source == id {
				&e.target
			} else if e.target == id {
				&e.source
			} else {
				return None;
			};
			self.node(other).map(|n| (n, e.edge_type.as_str()))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_label_alias_and_missing_fields() {
		let node: GraphNode =
			serde_json::from_str(r#"{"id":"7","type":"Topic","label":"Rust"}"#).unwrap();
		assert_eq!(node.name, "Rust");
		assert_eq!(node.node_type, "Topic");
		assert!(node.description.is_none());

		let data: GraphData = serde_json::from_str(r#"{"nodes":[{"id":"a"}]}"#).unwrap();
		assert_eq!(data.nodes.len(), 1);
		assert!(data.edges.is_empty());
	}

	#[test]
	fn odd_significance_values_do_not_fail_the_graph() {
		let data: GraphData = serde_json::from_str(
			r#"{"nodes":[
				{"id":"a","significance":4.5},
				{"id":"b","significance":"2"},
				{"id":"c","significance":9},
				{"id":"d","significance":"high"},
				{"id":"e","significance":null},
				{"id":"f","significance":3}
			]}"#,
		)
		.unwrap();
		let scores: Vec<_> = data.nodes.iter().map(|n| n.significance).collect();
		assert_eq!(scores, vec![Some(5), Some(2), Some(5), None, None, Some(3)]);
	}

	#[test]
	fn parallel_edges_get_distinct_ids() {
		let a = GraphEdge::new("1", "2", "KNOWS");
		let b = GraphEdge::new("1", "2", "WORKS_WITH");
		assert_ne!(a.synthetic_id(0), b.synthetic_id(1));
	}

	#[test]
	fn neighbors_skip_unknown_ids() {
		let data = GraphData::new(
			vec![GraphNode::new("1", USER, "Me"), GraphNode::new("2", "Person", "Ann")],
			vec![GraphEdge::new("1", "2", "KNOWS"), GraphEdge::new("1", "404", "KNOWS")],
		);
		let names: Vec<_> = data.neighbors("1").map(|(n, _)| n.name.clone()).collect();
		assert_eq!(names, vec!["Ann".to_string()]);
	}
}
