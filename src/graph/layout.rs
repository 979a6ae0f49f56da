//! Deterministic placement of graph nodes.
//!
//! Every strategy is a pure function of the node and edge slices and their
//! order. Coordinates are centred on the origin; the canvas maps the origin to
//! the middle of the viewport.

use std::collections::{HashMap, HashSet};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::types::{GraphEdge, GraphNode, PERSONA, PROJECT, USER};

pub const INNER_RADIUS: f64 = 250.0;
pub const OUTER_RADIUS: f64 = 380.0;
pub const PROJECT_RADIUS: f64 = 300.0;
pub const SPOKE_RADIUS: f64 = 110.0;
pub const UNASSIGNED_RADIUS: f64 = 520.0;
pub const ROW_SPACING: f64 = 150.0;
pub const COLUMN_SPACING: f64 = 180.0;

/// Row order of the type-grouped layout. Unlisted types follow in first-seen order.
pub const TYPE_PRIORITY: &[&str] = &[
	"Topic",
	"Article",
	"Source",
	"Tag",
	"Person",
	"Organization",
	"Note",
];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	fn on_circle(center: Position, radius: f64, angle: f64) -> Self {
		Self {
			x: center.x + radius * angle.cos(),
			y: center.y + radius * angle.sin(),
		}
	}

	pub fn distance(&self, other: &Position) -> f64 {
		((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
	}
}

/// Node positions in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	placements: Vec<(String, Position)>,
	index: HashMap<String, usize>,
}

impl Layout {
	fn with_capacity(n: usize) -> Self {
		Self {
			placements: Vec::with_capacity(n),
			index: HashMap::with_capacity(n),
		}
	}

	fn place(&mut self, id: &str, position: Position) {
		self.index.insert(id.to_string(), self.placements.len());
		self.placements.push((id.to_string(), position));
	}

	pub fn get(&self, id: &str) -> Option<Position> {
		self.index.get(id).map(|&i| self.placements[i].1)
	}

	pub fn len(&self) -> usize {
		self.placements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.placements.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, Position)> {
		self.placements.iter().map(|(id, p)| (id.as_str(), *p))
	}

	/// Largest distance of any node from the origin.
	pub fn extent(&self) -> f64 {
		self.placements
			.iter()
			.map(|(_, p)| p.distance(&Position::ORIGIN))
			.fold(0.0, f64::max)
	}
}

/// Placement strategy chosen per page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutStrategy {
	/// Center node with an inner ring of direct neighbours and an outer ring for the rest.
	#[default]
	Radial,
	/// One horizontal row per node type.
	TypeGrouped,
	/// User at the hub, projects around it, project members around their project.
	HubAndSpoke,
}

impl LayoutStrategy {
	pub fn apply(self, nodes: &[GraphNode], edges: &[GraphEdge]) -> Layout {
		match self {
			LayoutStrategy::Radial => radial(nodes, edges),
			LayoutStrategy::TypeGrouped => type_grouped(nodes),
			LayoutStrategy::HubAndSpoke => hub_and_spoke(nodes, edges),
		}
	}
}

/// Angle of slot `i` out of `n`, starting at `offset`.
fn ring_angle(i: usize, n: usize, offset: f64) -> f64 {
	2.0 * PI * i as f64 / n as f64 + offset
}

/// Prefers a `User`, then a `Persona`, then whatever comes first.
pub fn center_node(nodes: &[GraphNode]) -> Option<&GraphNode> {
	nodes
		.iter()
		.find(|n| n.is_type(USER))
		.or_else(|| nodes.iter().find(|n| n.is_type(PERSONA)))
		.or_else(|| nodes.first())
}

fn radial(nodes: &[GraphNode], edges: &[GraphEdge]) -> Layout {
	let mut layout = Layout::with_capacity(nodes.len());
	let Some(center) = center_node(nodes) else {
		return layout;
	};

	let mut linked: HashSet<&str> = HashSet::new();
	for edge in edges {
		if edge.source == center.id {
			linked.insert(&edge.target);
		} else if edge.target == center.id {
			linked.insert(&edge.source);
		}
	}

	let (inner, outer): (Vec<&GraphNode>, Vec<&GraphNode>) = nodes
		.iter()
		.filter(|n| !std::ptr::eq(*n, center))
		.partition(|n| linked.contains(n.id.as_str()));

	layout.place(&center.id, Position::ORIGIN);
	for (i, node) in inner.iter().enumerate() {
		let angle = ring_angle(i, inner.len(), -FRAC_PI_2);
		layout.place(&node.id, Position::on_circle(Position::ORIGIN, INNER_RADIUS, angle));
	}
	for (i, node) in outer.iter().enumerate() {
		let angle = ring_angle(i, outer.len(), -FRAC_PI_4);
		layout.place(&node.id, Position::on_circle(Position::ORIGIN, OUTER_RADIUS, angle));
	}
	layout
}

fn type_rank(node_type: &str) -> usize {
	TYPE_PRIORITY
		.iter()
		.position(|t| *t == node_type)
		.unwrap_or(TYPE_PRIORITY.len())
}

fn type_grouped(nodes: &[GraphNode]) -> Layout {
	let mut layout = Layout::with_capacity(nodes.len());
	let mut groups: Vec<(&str, Vec<&GraphNode>)> = Vec::new();
	for node in nodes {
		match groups.iter_mut().find(|(t, _)| *t == node.node_type) {
			Some((_, members)) => members.push(node),
			None => groups.push((node.node_type.as_str(), vec![node])),
		}
	}
	// Stable sort keeps first-seen order among unknown types.
	groups.sort_by_key(|(t, _)| type_rank(t));

	for (row, (_, members)) in groups.iter().enumerate() {
		let half_width = (members.len() as f64 - 1.0) / 2.0;
		let y = row as f64 * ROW_SPACING - (groups.len() as f64 - 1.0) * ROW_SPACING / 2.0;
		for (col, node) in members.iter().enumerate() {
			layout.place(&node.id, Position::new((col as f64 - half_width) * COLUMN_SPACING, y));
		}
	}
	layout
}

fn hub_and_spoke(nodes: &[GraphNode], edges: &[GraphEdge]) -> Layout {
	let mut layout = Layout::with_capacity(nodes.len());
	let hub = nodes.iter().find(|n| n.is_type(USER));
	let projects: Vec<&GraphNode> = nodes.iter().filter(|n| n.is_type(PROJECT)).collect();
	let project_ids: HashSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();

	if let Some(hub) = hub {
		layout.place(&hub.id, Position::ORIGIN);
	}
	let mut project_pos: HashMap<&str, Position> = HashMap::new();
	for (i, project) in projects.iter().enumerate() {
		let angle = ring_angle(i, projects.len(), -FRAC_PI_2);
		let pos = Position::on_circle(Position::ORIGIN, PROJECT_RADIUS, angle);
		project_pos.insert(&project.id, pos);
		layout.place(&project.id, pos);
	}

	let mut members: Vec<(&str, Vec<&GraphNode>)> =
		projects.iter().map(|p| (p.id.as_str(), Vec::new())).collect();
	let mut unassigned: Vec<&GraphNode> = Vec::new();
	for node in nodes {
		if hub.is_some_and(|h| std::ptr::eq(h, node)) || node.is_type(PROJECT) {
			continue;
		}
		let owner = edges
			.iter()
			.find(|e| e.target == node.id && project_ids.contains(e.source.as_str()))
			.map(|e| e.source.as_str());
		match owner.and_then(|o| members.iter_mut().find(|(p, _)| *p == o)) {
			Some((_, list)) => list.push(node),
			None => unassigned.push(node),
		}
	}

	for (project_id, list) in &members {
		let Some(&center) = project_pos.get(project_id) else {
			continue;
		};
		for (j, node) in list.iter().enumerate() {
			let angle = ring_angle(j, list.len(), -FRAC_PI_2);
			layout.place(&node.id, Position::on_circle(center, SPOKE_RADIUS, angle));
		}
	}
	for (i, node) in unassigned.iter().enumerate() {
		let angle = ring_angle(i, unassigned.len(), -FRAC_PI_4);
		layout.place(&node.id, Position::on_circle(Position::ORIGIN, UNASSIGNED_RADIUS, angle));
	}
	layout
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn node(id: &str, t: &str) -> GraphNode {
		GraphNode::new(id, t, format!("node {id}"))
	}

	fn edge(s: &str, t: &str) -> GraphEdge {
		GraphEdge::new(s, t, "KNOWS")
	}

	fn radius(p: Position) -> f64 {
		p.distance(&Position::ORIGIN)
	}

	#[test]
	fn empty_input_gives_empty_layout() {
		for strategy in [
			LayoutStrategy::Radial,
			LayoutStrategy::TypeGrouped,
			LayoutStrategy::HubAndSpoke,
		] {
			assert!(strategy.apply(&[], &[edge("a", "b")]).is_empty());
		}
	}

	#[test]
	fn radial_places_direct_neighbours_inside() {
		let nodes = vec![node("1", "User"), node("2", "Person"), node("3", "Person")];
		let edges = vec![edge("1", "2"), edge("2", "3")];
		let layout = LayoutStrategy::Radial.apply(&nodes, &edges);

		assert_eq!(layout.get("1"), Some(Position::ORIGIN));
		assert!((radius(layout.get("2").unwrap()) - INNER_RADIUS).abs() < EPS);
		assert!((radius(layout.get("3").unwrap()) - OUTER_RADIUS).abs() < EPS);
	}

	#[test]
	fn radial_first_inner_node_is_due_north() {
		let nodes = vec![node("me", "User"), node("a", "Person"), node("b", "Person")];
		let edges = vec![edge("me", "a"), edge("b", "me")];
		let layout = LayoutStrategy::Radial.apply(&nodes, &edges);
		let a = layout.get("a").unwrap();
		assert!(a.x.abs() < EPS);
		assert!((a.y + INNER_RADIUS).abs() < EPS);
		let b = layout.get("b").unwrap();
		assert!((b.y - INNER_RADIUS).abs() < EPS);
	}

	#[test]
	fn radial_center_preference() {
		let persona_first = vec![node("p", "Persona"), node("t", "Topic")];
		assert_eq!(center_node(&persona_first).unwrap().id, "p");

		let user_later = vec![node("p", "Persona"), node("u", "User")];
		assert_eq!(center_node(&user_later).unwrap().id, "u");

		let neither = vec![node("t", "Topic"), node("d", "Document")];
		assert_eq!(center_node(&neither).unwrap().id, "t");
	}

	#[test]
	fn radial_tolerates_dangling_and_self_loop_edges() {
		let nodes = vec![node("1", "User"), node("2", "Topic"), node("3", "Topic")];
		let edges = vec![edge("1", "ghost"), edge("ghost", "2"), edge("1", "1"), edge("3", "3")];
		let layout = LayoutStrategy::Radial.apply(&nodes, &edges);
		assert_eq!(layout.len(), nodes.len());
		for n in &nodes {
			assert!(layout.get(&n.id).is_some(), "missing {}", n.id);
		}
		assert!((radius(layout.get("3").unwrap()) - OUTER_RADIUS).abs() < EPS);
	}

	#[test]
	fn isolated_nodes_land_on_outer_ring() {
		let nodes = vec![node("u", "User"), node("x", "Tag")];
		let layout = LayoutStrategy::Radial.apply(&nodes, &[]);
		assert!((radius(layout.get("x").unwrap()) - OUTER_RADIUS).abs() < EPS);
	}

	#[test]
	fn layouts_are_idempotent() {
		let nodes = vec![
			node("u", "User"),
			node("p1", "Project"),
			node("t1", "Task"),
			node("a", "Article"),
			node("z", "Zebra"),
		];
		let edges = vec![edge("u", "p1"), edge("p1", "t1"), edge("a", "z")];
		for strategy in [
			LayoutStrategy::Radial,
			LayoutStrategy::TypeGrouped,
			LayoutStrategy::HubAndSpoke,
		] {
			assert_eq!(strategy.apply(&nodes, &edges), strategy.apply(&nodes, &edges));
		}
	}

	#[test]
	fn type_grouped_orders_rows_by_priority() {
		let nodes = vec![
			node("n1", "Note"),
			node("x", "Zebra"),
			node("t1", "Topic"),
			node("t2", "Topic"),
			node("a", "Article"),
		];
		let layout = LayoutStrategy::TypeGrouped.apply(&nodes, &[]);
		let y = |id: &str| layout.get(id).unwrap().y;

		assert_eq!(y("t1"), y("t2"));
		assert!(y("t1") < y("a"));
		assert!(y("a") < y("n1"));
		assert!(y("n1") < y("x"));
		let (t1, t2) = (layout.get("t1").unwrap(), layout.get("t2").unwrap());
		assert!((t1.x + t2.x).abs() < EPS);
		assert!((t2.x - t1.x - COLUMN_SPACING).abs() < EPS);
	}

	#[test]
	fn hub_and_spoke_groups_members_around_projects() {
		let nodes = vec![
			node("u", "User"),
			node("p1", "Project"),
			node("p2", "Project"),
			node("t1", "Task"),
			node("t2", "Task"),
			node("loose", "Topic"),
		];
		let edges = vec![
			edge("u", "p1"),
			edge("u", "p2"),
			edge("p1", "t1"),
			edge("p2", "t2"),
			edge("t1", "t2"),
		];
		let layout = LayoutStrategy::HubAndSpoke.apply(&nodes, &edges);

		assert_eq!(layout.get("u"), Some(Position::ORIGIN));
		let p1 = layout.get("p1").unwrap();
		assert!((radius(p1) - PROJECT_RADIUS).abs() < EPS);
		assert!((layout.get("t1").unwrap().distance(&p1) - SPOKE_RADIUS).abs() < EPS);
		let p2 = layout.get("p2").unwrap();
		assert!((layout.get("t2").unwrap().distance(&p2) - SPOKE_RADIUS).abs() < EPS);
		assert!((radius(layout.get("loose").unwrap()) - UNASSIGNED_RADIUS).abs() < EPS);
		assert_eq!(layout.len(), nodes.len());
	}

	#[test]
	fn hub_and_spoke_uses_first_project_edge() {
		let nodes = vec![node("p1", "Project"), node("p2", "Project"), node("t", "Task")];
		let edges = vec![edge("p2", "t"), edge("p1", "t")];
		let layout = LayoutStrategy::HubAndSpoke.apply(&nodes, &edges);
		let t = layout.get("t").unwrap();
		assert!((t.distance(&layout.get("p2").unwrap()) - SPOKE_RADIUS).abs() < EPS);
	}

	#[test]
	fn hub_and_spoke_without_user_leaves_origin_empty() {
		let nodes = vec![node("p1", "Project"), node("p2", "Project"), node("t", "Task")];
		let edges = vec![edge("p1", "t")];
		let layout = LayoutStrategy::HubAndSpoke.apply(&nodes, &edges);

		assert_eq!(layout.len(), nodes.len());
		assert!(layout.iter().all(|(_, pos)| radius(pos) > EPS));
		for id in ["p1", "p2"] {
			assert!((radius(layout.get(id).unwrap()) - PROJECT_RADIUS).abs() < EPS);
		}
		let t = layout.get("t").unwrap();
		assert!((t.distance(&layout.get("p1").unwrap()) - SPOKE_RADIUS).abs() < EPS);
	}
}
