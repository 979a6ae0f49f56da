//! Graph data, placement, styling and filtering shared by every graph page.

pub mod filter;
pub mod layout;
pub mod style;
pub mod types;

pub use filter::{CategoryMap, FilterCategory};
pub use layout::{Layout, LayoutStrategy, Position};
pub use style::StyledEdge;
pub use types::{GraphData, GraphEdge, GraphNode};

/// Everything the canvas needs for one frame of input data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacedGraph {
	pub nodes: Vec<GraphNode>,
	pub layout: Layout,
	pub edges: Vec<StyledEdge>,
}

impl PlacedGraph {
	pub fn build(data: &GraphData, strategy: LayoutStrategy) -> Self {
		Self {
			layout: strategy.apply(&data.nodes, &data.edges),
			edges: style::style_edges(data),
			nodes: data.nodes.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn placed_graph_positions_every_node_and_drops_dangling_edges() {
		let data = GraphData::new(
			vec![
				GraphNode::new("1", "User", "Me"),
				GraphNode::new("2", "Person", "Ann"),
				GraphNode::new("3", "Person", "Bo"),
			],
			vec![
				GraphEdge::new("1", "2", "KNOWS"),
				GraphEdge::new("2", "3", "KNOWS"),
				GraphEdge::new("3", "9", "KNOWS"),
			],
		);
		let placed = PlacedGraph::build(&data, LayoutStrategy::Radial);
		assert_eq!(placed.layout.len(), 3);
		assert_eq!(placed.edges.len(), 2);
	}
}
