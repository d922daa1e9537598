use std::collections::HashSet;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::layout::SkillTree;
use super::theme::SkillTheme;
use super::types::GraphNode;

/// Pixels per rem when turning node sizes into canvas radii.
pub const REM_PX: f64 = 16.0;

/// Percent coordinates are multiplied by this inside the force graph so the
/// forces work at pixel-like distances.
const SIM_SCALE: f64 = 10.0;

/// Force and heat settings for the drag simulation.
#[derive(Clone, Debug)]
pub struct DragParameters {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	pub node_mass: f32,
	/// Band the simulated positions are clamped into, in percent.
	pub clamp: (f64, f64),
	pub initial_heat: f64,
	/// Fraction of the distance to the target heat covered per step.
	pub heat_decay: f64,
	/// Heat kept up while the pointer is moving.
	pub sustained_heat: f64,
}

impl Default for DragParameters {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			clamp: (5.0, 95.0),
			initial_heat: 0.9,
			heat_decay: 0.1,
			sustained_heat: 0.7,
		}
	}
}

/// Spring/repulsion simulation over the subtree of a dragged node.
///
/// Only the subtree's nodes are simulated; everything else keeps its place.
pub struct SubtreeDrag {
	graph: ForceGraph<String, ()>,
	root: DefaultNodeIdx,
	root_id: String,
	members: HashSet<String>,
	params: DragParameters,
	heat: f64,
	heat_target: f64,
}

impl SubtreeDrag {
	/// Seed a simulation with `root_id`'s subtree at the positions in `nodes`.
	pub fn start(tree: &SkillTree, nodes: &[GraphNode], root_id: &str, params: DragParameters) -> Option<Self> {
		let members = tree.subtree_ids(root_id);
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: params.force_charge,
			force_spring: params.force_spring,
			force_max: params.force_max,
			node_speed: params.node_speed,
			damping_factor: params.damping_factor,
		});

		let mut root = None;
		let mut index = Vec::with_capacity(members.len());
		for node in nodes.iter().filter(|n| members.contains(&n.id)) {
			let is_root = node.id == root_id;
			let idx = graph.add_node(NodeData {
				x: (node.x * SIM_SCALE) as f32,
				y: (node.y * SIM_SCALE) as f32,
				mass: params.node_mass,
				is_anchor: is_root,
				user_data: node.id.clone(),
			});
			if is_root {
				root = Some(idx);
			}
			index.push((node.id.as_str(), idx));
		}
		let root = root?;

		let lookup = |id: &str| index.iter().find(|(n, _)| *n == id).map(|(_, idx)| *idx);
		for edge in &tree.edges {
			if let (Some(from), Some(to)) = (lookup(edge.from.as_str()), lookup(edge.to.as_str())) {
				graph.add_edge(from, to, EdgeData::default());
			}
		}

		debug!("drag simulation started on {root_id} with {} nodes", index.len());
		Some(Self {
			graph,
			root,
			root_id: root_id.to_string(),
			members,
			heat: params.initial_heat,
			heat_target: 0.0,
			params,
		})
	}

	pub fn root_id(&self) -> &str {
		&self.root_id
	}

	/// Whether `id` is part of the simulated subtree.
	pub fn contains(&self, id: &str) -> bool {
		self.members.contains(id)
	}

	/// Pin the dragged node under the pointer and keep the simulation warm.
	pub fn pointer_move(&mut self, x_pct: f64, y_pct: f64) {
		let (lo, hi) = self.params.clamp;
		let (x, y) = (x_pct.clamp(lo, hi) * SIM_SCALE, y_pct.clamp(lo, hi) * SIM_SCALE);
		let root = self.root;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == root {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
			}
		});
		self.heat_target = self.params.sustained_heat;
	}

	/// Advance by `dt` seconds and copy the subtree's positions into `nodes`.
	pub fn step(&mut self, dt: f64, nodes: &mut [GraphNode]) {
		self.heat += (self.heat_target - self.heat) * self.params.heat_decay;
		if self.heat > 1e-3 {
			self.graph.update((dt * self.heat) as f32);
		}

		let (lo, hi) = self.params.clamp;
		self.graph.visit_nodes_mut(|sim| {
			let Some(node) = nodes.iter_mut().find(|n| n.id == sim.data.user_data) else {
				return;
			};
			let (x, y) = (sim.data.x as f64 / SIM_SCALE, sim.data.y as f64 / SIM_SCALE);
			if x.is_finite() && y.is_finite() {
				node.x = x.clamp(lo, hi);
				node.y = y.clamp(lo, hi);
			} else {
				sim.data.x = (node.x * SIM_SCALE) as f32;
				sim.data.y = (node.y * SIM_SCALE) as f32;
			}
		});
	}

	/// Drop the simulation; nodes stay where it left them.
	pub fn stop(self) {
		debug!("drag simulation on {} stopped", self.root_id);
	}
}

/// Scale of a hovered node once the hover has fully eased in.
pub const HOVER_SCALE: f64 = 1.03;
/// Scale of the node being dragged.
pub const PRESS_SCALE: f64 = 0.98;
/// Fraction of the remaining hover easing covered per second.
const HOVER_RATE: f64 = 10.0;

/// Node under the pointer. `t` eases from 0 to 1 while hovered and back to
/// 0 after the pointer leaves, when `node` is kept until the ease-out ends.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<String>,
	pub t: f64,
	leaving: bool,
}

/// Everything the skill graph canvas needs between frames.
pub struct SkillGraphState {
	pub tree: SkillTree,
	/// Current positions; starts as the layout and moves with drags.
	pub nodes: Vec<GraphNode>,
	pub theme: SkillTheme,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	params: DragParameters,
	drag: Option<SubtreeDrag>,
}

impl SkillGraphState {
	pub fn new(tree: SkillTree, theme: SkillTheme, width: f64, height: f64) -> Self {
		Self {
			nodes: tree.nodes.clone(),
			tree,
			theme,
			hover: HoverState::default(),
			width,
			height,
			params: DragParameters::default(),
			drag: None,
		}
	}

	/// Swap in a freshly built tree, dropping any drag in progress.
	pub fn replace_tree(&mut self, tree: SkillTree, theme: SkillTheme) {
		self.end_drag();
		self.hover = HoverState::default();
		self.nodes = tree.nodes.clone();
		self.tree = tree;
		self.theme = theme;
	}

	pub fn to_screen(&self, x_pct: f64, y_pct: f64) -> (f64, f64) {
		(x_pct / 100.0 * self.width, y_pct / 100.0 * self.height)
	}

	/// Canvas coordinates to clamped percentages.
	pub fn to_pct(&self, sx: f64, sy: f64) -> (f64, f64) {
		let (lo, hi) = self.params.clamp;
		(
			(sx / self.width.max(1.0) * 100.0).clamp(lo, hi),
			(sy / self.height.max(1.0) * 100.0).clamp(lo, hi),
		)
	}

	pub fn node_radius(node: &GraphNode) -> f64 {
		node.size_rem() * REM_PX / 2.0
	}

	/// Topmost node under a canvas position. Later nodes are drawn on top.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		self.nodes
			.iter()
			.rev()
			.find(|node| {
				let (nx, ny) = self.to_screen(node.x, node.y);
				(nx - sx).hypot(ny - sy) < Self::node_radius(node)
			})
			.map(|node| node.id.clone())
	}

	/// Start dragging `id`. Any previous simulation is stopped first.
	pub fn begin_drag(&mut self, id: &str) {
		self.end_drag();
		self.drag = SubtreeDrag::start(&self.tree, &self.nodes, id, self.params.clone());
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let (x, y) = self.to_pct(sx, sy);
		if let Some(drag) = self.drag.as_mut() {
			drag.pointer_move(x, y);
		}
	}

	pub fn end_drag(&mut self) {
		if let Some(drag) = self.drag.take() {
			drag.stop();
		}
	}

	pub fn dragged_id(&self) -> Option<&str> {
		self.drag.as_ref().map(SubtreeDrag::root_id)
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.is_some()
	}

	/// Whether `id` belongs to the subtree being dragged.
	pub fn is_in_drag(&self, id: &str) -> bool {
		self.drag.as_ref().is_some_and(|drag| drag.contains(id))
	}

	pub fn set_hover(&mut self, node: Option<String>) {
		match node {
			Some(id) => {
				if self.hover.node.as_deref() != Some(id.as_str()) {
					self.hover.t = 0.0;
				}
				self.hover.node = Some(id);
				self.hover.leaving = false;
			}
			None => self.hover.leaving = self.hover.node.is_some(),
		}
	}

	pub fn is_hovered(&self, id: &str) -> bool {
		self.hover.node.as_deref() == Some(id) && !self.hover.leaving
	}

	/// Draw scale of a node: grows slightly on hover, shrinks while dragged.
	pub fn node_scale(&self, id: &str) -> f64 {
		let mut scale = 1.0;
		if self.hover.node.as_deref() == Some(id) {
			let t = self.hover.t;
			scale *= 1.0 + (HOVER_SCALE - 1.0) * (1.0 - (1.0 - t).powi(3));
		}
		if self.dragged_id() == Some(id) {
			scale *= PRESS_SCALE;
		}
		scale
	}

	pub fn tick(&mut self, dt: f64) {
		if let Some(drag) = self.drag.as_mut() {
			drag.step(dt, &mut self.nodes);
		}

		if self.hover.node.is_none() {
			return;
		}
		let target = if self.hover.leaving { 0.0 } else { 1.0 };
		self.hover.t += (target - self.hover.t) * (HOVER_RATE * dt).min(1.0);
		if self.hover.leaving && self.hover.t < 0.01 {
			self.hover = HoverState::default();
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::content::skills::{Skill, SkillLevel};

	fn skills() -> Vec<Skill> {
		let s = |id: &str, parent: Option<&str>| {
			let skill = Skill::new(id, id, "Life").with_level(SkillLevel::Refined);
			match parent {
				Some(p) => skill.with_parent(p),
				None => skill,
			}
		};
		vec![
			s("A", None),
			s("B", Some("A")),
			s("C", Some("B")),
			s("D", Some("B")),
			s("E", None),
		]
	}

	fn state() -> SkillGraphState {
		let tree = SkillTree::build(&skills(), SkillTheme::Life, "LIFE");
		SkillGraphState::new(tree, SkillTheme::Life, 1000.0, 500.0)
	}

	fn pos(state: &SkillGraphState, id: &str) -> (f64, f64) {
		let n = state.nodes.iter().find(|n| n.id == id).unwrap();
		(n.x, n.y)
	}

	#[test]
	fn only_the_subtree_moves() {
		let mut state = state();
		let untouched: Vec<_> = ["category-life", "A", "E"].iter().map(|id| pos(&state, id)).collect();

		state.begin_drag("B");
		assert_eq!(state.dragged_id(), Some("B"));
		assert!(state.is_in_drag("C") && !state.is_in_drag("A"));
		state.drag_to(700.0, 150.0);
		for _ in 0..60 {
			state.tick(1.0 / 60.0);
		}

		let after: Vec<_> = ["category-life", "A", "E"].iter().map(|id| pos(&state, id)).collect();
		assert_eq!(untouched, after);

		let (bx, by) = pos(&state, "B");
		assert!((bx - 70.0).abs() < 1e-4 && (by - 30.0).abs() < 1e-4);
		for id in ["C", "D"] {
			let (x, y) = pos(&state, id);
			assert!((5.0..=95.0).contains(&x) && (5.0..=95.0).contains(&y));
		}
	}

	#[test]
	fn pointer_is_clamped_into_band() {
		let mut state = state();
		state.begin_drag("C");
		state.drag_to(-300.0, 10_000.0);
		state.tick(0.016);
		let (x, y) = pos(&state, "C");
		assert!((x - 5.0).abs() < 1e-4 && (y - 95.0).abs() < 1e-4);
	}

	#[test]
	fn one_simulation_at_a_time() {
		let mut state = state();
		state.begin_drag("B");
		state.begin_drag("E");
		assert_eq!(state.dragged_id(), Some("E"));
		state.drag_to(100.0, 100.0);
		state.tick(0.016);
		// B's subtree is no longer simulated
		let b = pos(&state, "B");
		state.tick(0.016);
		assert_eq!(b, pos(&state, "B"));
	}

	#[test]
	fn release_keeps_final_positions() {
		let mut state = state();
		state.begin_drag("D");
		state.drag_to(200.0, 400.0);
		state.tick(0.016);
		state.end_drag();
		assert!(!state.is_dragging());
		let d = pos(&state, "D");
		state.tick(0.016);
		assert_eq!(d, pos(&state, "D"));
		assert!((d.0 - 20.0).abs() < 1e-4 && (d.1 - 80.0).abs() < 1e-4);
	}

	#[test]
	fn unknown_node_starts_nothing() {
		let mut state = state();
		state.begin_drag("nope");
		assert!(!state.is_dragging());
	}

	#[test]
	fn hit_testing_finds_nodes() {
		let state = state();
		let (sx, sy) = state.to_screen(50.0, 50.0);
		assert_eq!(state.node_at_position(sx, sy).as_deref(), Some("category-life"));
		assert_eq!(state.node_at_position(0.0, 0.0), None);
	}

	#[test]
	fn hover_scales_up_then_back_down() {
		let mut state = state();
		assert_eq!(state.node_scale("B"), 1.0);

		state.set_hover(Some("B".into()));
		assert!(state.is_hovered("B") && !state.is_hovered("A"));
		for _ in 0..60 {
			state.tick(1.0 / 60.0);
		}
		assert!((state.node_scale("B") - HOVER_SCALE).abs() < 1e-3);
		assert_eq!(state.node_scale("A"), 1.0);

		state.set_hover(None);
		assert!(!state.is_hovered("B"));
		assert!(state.node_scale("B") > 1.0);
		for _ in 0..120 {
			state.tick(1.0 / 60.0);
		}
		assert_eq!(state.hover.node, None);
		assert_eq!(state.node_scale("B"), 1.0);
	}

	#[test]
	fn hovering_another_node_restarts_the_ease() {
		let mut state = state();
		state.set_hover(Some("B".into()));
		state.tick(0.5);
		state.set_hover(Some("B".into()));
		assert!(state.hover.t > 0.0);
		state.set_hover(Some("C".into()));
		assert_eq!(state.hover.t, 0.0);
		assert_eq!(state.node_scale("B"), 1.0);
	}

	#[test]
	fn dragged_node_is_pressed() {
		let mut state = state();
		state.begin_drag("B");
		assert_eq!(state.node_scale("B"), PRESS_SCALE);
		assert_eq!(state.node_scale("C"), 1.0);
		state.end_drag();
		assert_eq!(state.node_scale("B"), 1.0);
	}
}
