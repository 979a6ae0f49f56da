use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::graph::layout::center_node;
use crate::graph::style::node_color;
use crate::graph::{PlacedGraph, Position};

pub const NODE_RADIUS: f64 = 9.0;
pub const CENTER_RADIUS: f64 = 16.0;
pub const HIT_RADIUS: f64 = 16.0;
/// Screen pixels a press may travel and still count as a click.
pub const CLICK_SLOP: f64 = 4.0;
const FIT_MARGIN: f64 = 80.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub color: &'static str,
	pub animated: bool,
	pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub dark: bool,
	pub animation_running: bool,
	pub flow_time: f64,
	/// Self-loops stay out of the simulation and are drawn as rings beside their node.
	pub loops: Vec<(DefaultNodeIdx, EdgeInfo)>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	ids: HashMap<String, DefaultNodeIdx>,
}

/// Zoom that fits a layout of radius `extent` into the viewport.
pub fn fit_scale(extent: f64, width: f64, height: f64) -> f64 {
	let half = width.min(height) / 2.0;
	if extent <= 0.0 || half <= 0.0 {
		return 1.0;
	}
	(half / (extent + FIT_MARGIN)).clamp(0.2, 1.5)
}

fn new_graph() -> ForceGraph<NodeInfo, EdgeInfo> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &PlacedGraph, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: new_graph(),
			loops: Vec::new(),
			edges: Vec::new(),
			ids: HashMap::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			width,
			height,
			dark: true,
			animation_running: true,
			flow_time: 0.0,
		};
		state.load(data);
		state
	}

	/// Replaces the drawn graph. Nodes are pinned at their laid-out positions.
	pub fn load(&mut self, data: &PlacedGraph) {
		let selected_id = self.selected.and_then(|idx| self.node_id(idx));
		self.graph = new_graph();
		self.edges.clear();
		self.loops.clear();
		self.ids.clear();
		self.hover = HoverState::default();
		self.drag = DragState::default();
		self.selected = None;

		let center_id = center_node(&data.nodes).map(|n| n.id.clone());
		for node in &data.nodes {
			if self.ids.contains_key(&node.id) {
				continue;
			}
			let Position { x, y } = data.layout.get(&node.id).unwrap_or_default();
			let radius = if center_id.as_deref() == Some(node.id.as_str()) {
				CENTER_RADIUS
			} else {
				NODE_RADIUS
			};
			let idx = self.graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: true,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: Some(node.display_name().to_string()),
					color: node_color(&node.node_type).to_string(),
					radius,
				},
			});
			self.ids.insert(node.id.clone(), idx);
		}

		for edge in &data.edges {
			let (Some(&src), Some(&tgt)) = (self.ids.get(&edge.source), self.ids.get(&edge.target))
			else {
				continue;
			};
			let info = EdgeInfo {
				color: edge.style.color,
				animated: edge.style.animated,
				label: edge.label.clone(),
			};
			if src == tgt {
				self.loops.push((src, info));
				continue;
			}
			self.graph.add_edge(src, tgt, EdgeData { user_data: info });
			self.edges.push((src, tgt));
		}

		self.transform.k = fit_scale(data.layout.extent(), self.width, self.height);
		self.transform.x = self.width / 2.0;
		self.transform.y = self.height / 2.0;
		self.select_id(selected_id.as_deref());
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS.max(node.data.user_data.radius) {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn select_id(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.ids.get(id).copied());
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	/// Follows a new viewport size, keeping the same graph point centred.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphData, GraphEdge, GraphNode, LayoutStrategy};

	fn placed() -> PlacedGraph {
		let data = GraphData::new(
			vec![
				GraphNode::new("u", "User", "Me"),
				GraphNode::new("a", "Person", "Ann"),
				GraphNode::new("b", "Topic", "Rust"),
			],
			vec![
				GraphEdge::new("u", "a", "KNOWS"),
				GraphEdge::new("b", "b", "RELATED_TO"),
				GraphEdge::new("a", "ghost", "KNOWS"),
			],
		);
		PlacedGraph::build(&data, LayoutStrategy::Radial)
	}

	#[test]
	fn loads_every_node_at_its_layout_position() {
		let state = ForceGraphState::new(&placed(), 800.0, 600.0);
		let mut seen = 0;
		state.graph.visit_nodes(|node| {
			seen += 1;
			assert!(node.data.is_anchor);
		});
		assert_eq!(seen, 3);
		assert_eq!(state.edges.len(), 1);
		assert_eq!(state.loops.len(), 1);
	}

	#[test]
	fn center_node_is_hit_at_viewport_middle() {
		let state = ForceGraphState::new(&placed(), 800.0, 600.0);
		let idx = state.node_at_position(400.0, 300.0).unwrap();
		assert_eq!(state.node_id(idx).as_deref(), Some("u"));
	}

	#[test]
	fn selection_survives_reload() {
		let mut state = ForceGraphState::new(&placed(), 800.0, 600.0);
		state.select_id(Some("a"));
		state.load(&placed());
		let selected = state.selected.and_then(|i| state.node_id(i));
		assert_eq!(selected.as_deref(), Some("a"));
	}

	#[test]
	fn node_ids_follow_the_loaded_graph() {
		let mut state = ForceGraphState::new(&placed(), 800.0, 600.0);
		let idx = state.node_at_position(400.0, 300.0).unwrap();
		assert_eq!(state.node_id(idx).as_deref(), Some("u"));

		let other = GraphData::new(vec![GraphNode::new("x", "Topic", "Solo")], vec![]);
		state.load(&PlacedGraph::build(&other, LayoutStrategy::Radial));
		let idx = state.node_at_position(400.0, 300.0).unwrap();
		assert_eq!(state.node_id(idx).as_deref(), Some("x"));
	}

	#[test]
	fn resize_keeps_the_view_centred() {
		let mut state = ForceGraphState::new(&placed(), 800.0, 600.0);
		let before = state.screen_to_graph(400.0, 300.0);
		state.resize(1200.0, 900.0);
		assert_eq!((state.width, state.height), (1200.0, 900.0));
		assert_eq!(state.screen_to_graph(600.0, 450.0), before);
		let idx = state.node_at_position(600.0, 450.0).unwrap();
		assert_eq!(state.node_id(idx).as_deref(), Some("u"));
	}

	#[test]
	fn fit_scale_bounds() {
		assert_eq!(fit_scale(0.0, 800.0, 600.0), 1.0);
		assert!(fit_scale(10_000.0, 800.0, 600.0) >= 0.2);
		assert!(fit_scale(1.0, 4000.0, 4000.0) <= 1.5);
	}
}
