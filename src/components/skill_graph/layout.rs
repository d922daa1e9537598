//! Radial placement of a theme's skills around its category node.
//!
//! Parents are referenced by name in the skill table. They are resolved to
//! indices up front so that unresolved names and parent cycles can be
//! reported instead of silently producing a broken picture. Positions are a
//! pure function of the input: rebuilding with the same skills gives the
//! same layout.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use log::warn;

use super::theme::SkillTheme;
use super::types::{GraphEdge, GraphNode, NodeKind};
use crate::content::skills::Skill;

/// Geometry of the radial layout, in percent of the graph area.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	pub center: (f64, f64),
	pub root_radius: f64,
	pub orbit_base: f64,
	pub orbit_depth_step: f64,
	pub orbit_crowd_factor: f64,
	pub orbit_crowd_cap: f64,
	pub clamp: (f64, f64),
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			center: (50.0, 50.0),
			root_radius: 24.0,
			orbit_base: 10.0,
			orbit_depth_step: 5.0,
			orbit_crowd_factor: 2.2,
			orbit_crowd_cap: 8.0,
			clamp: (8.0, 92.0),
		}
	}
}

impl LayoutConfig {
	fn orbit_radius(&self, depth: usize, siblings: usize) -> f64 {
		self.orbit_base
			+ depth as f64 * self.orbit_depth_step
			+ ((siblings as f64).sqrt() * self.orbit_crowd_factor).min(self.orbit_crowd_cap)
	}
}

/// Data problems found while building the tree. None of them stop the build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutDiagnostic {
	/// `parent` does not name a skill of this theme; the skill became a root.
	UnresolvedParent { skill: String, parent: String },
	/// The skill was its own ancestor; its parent link was dropped.
	CycleBroken { skill: String },
}

/// Positioned graph for one theme.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillTree {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
	/// Node id to child node ids, in edge order.
	pub children: HashMap<String, Vec<String>>,
	pub diagnostics: Vec<LayoutDiagnostic>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
	Unseen,
	OnPath,
	Done,
}

/// Resolve each skill's parent to an index, breaking cycles.
fn resolve_parents(skills: &[&Skill], diagnostics: &mut Vec<LayoutDiagnostic>) -> Vec<Option<usize>> {
	let mut by_name: HashMap<&str, usize> = HashMap::new();
	for (i, skill) in skills.iter().enumerate() {
		by_name.entry(skill.name.as_str()).or_insert(i);
	}

	let mut parents: Vec<Option<usize>> = skills
		.iter()
		.map(|skill| {
			let name = skill.parent_name.as_deref()?;
			if name == skill.name {
				return None;
			}
			let parent = by_name.get(name).copied();
			if parent.is_none() {
				warn!("skill {:?} names unknown parent {:?}, placing it as a root", skill.name, name);
				diagnostics.push(LayoutDiagnostic::UnresolvedParent {
					skill: skill.name.clone(),
					parent: name.to_string(),
				});
			}
			parent
		})
		.collect();

	let mut marks = vec![Mark::Unseen; skills.len()];
	for start in 0..skills.len() {
		let mut path: Vec<usize> = Vec::new();
		let mut cursor = Some(start);
		while let Some(i) = cursor {
			match marks[i] {
				Mark::Done => break,
				Mark::OnPath => {
					let cycle_start = path.iter().position(|&p| p == i).unwrap_or(0);
					if let Some(&breaker) = path[cycle_start..].iter().min() {
						warn!("skill {:?} is its own ancestor, placing it as a root", skills[breaker].name);
						parents[breaker] = None;
						diagnostics.push(LayoutDiagnostic::CycleBroken {
							skill: skills[breaker].name.clone(),
						});
					}
					break;
				}
				Mark::Unseen => {
					marks[i] = Mark::OnPath;
					path.push(i);
					cursor = parents[i];
				}
			}
		}
		for i in path {
			marks[i] = Mark::Done;
		}
	}
	parents
}

struct Builder<'a> {
	config: &'a LayoutConfig,
	skills: &'a [&'a Skill],
	/// Parent name to the skills hanging under every node with that name.
	groups: HashMap<&'a str, Vec<usize>>,
	/// Skill index to node index, once placed.
	placed: HashMap<usize, usize>,
	linked: HashSet<(usize, usize)>,
	tree: SkillTree,
}

impl Builder<'_> {
	fn link(&mut self, from: usize, to: usize) {
		if !self.linked.insert((from, to)) {
			return;
		}
		let (from_id, to_id) = (self.tree.nodes[from].id.clone(), self.tree.nodes[to].id.clone());
		self.tree.edges.push(GraphEdge {
			id: format!("edge-{}", self.tree.edges.len()),
			from: from_id.clone(),
			to: to_id.clone(),
		});
		self.tree.children.entry(from_id).or_default().push(to_id);
		self.tree.nodes[from].child_count += 1;
	}

	fn push_node(&mut self, skill_idx: usize, x: f64, y: f64) -> usize {
		let skill = self.skills[skill_idx];
		self.tree.nodes.push(GraphNode {
			id: skill.id.clone(),
			name: skill.name.clone(),
			kind: NodeKind::Skill,
			x,
			y,
			level: Some(skill.level),
			child_count: 0,
		});
		let node = self.tree.nodes.len() - 1;
		self.placed.insert(skill_idx, node);
		node
	}

	fn place_children(&mut self, parent_node: usize, parent_name: &str, depth: usize) {
		let Some(group) = self.groups.get(parent_name).cloned() else {
			return;
		};
		let skills = self.skills;
		let radius = self.config.orbit_radius(depth, group.len());
		let step = 2.0 * PI / group.len() as f64;
		let (lo, hi) = self.config.clamp;

		for (slot, skill_idx) in group.into_iter().enumerate() {
			// a second parent only adds an edge; the first placement wins
			if let Some(&existing) = self.placed.get(&skill_idx) {
				self.link(parent_node, existing);
				continue;
			}

			let angle = -PI / 2.0 + step * slot as f64;
			let (px, py) = (self.tree.nodes[parent_node].x, self.tree.nodes[parent_node].y);
			let x = (px + radius * angle.cos()).clamp(lo, hi);
			let y = (py + radius * angle.sin()).clamp(lo, hi);

			let node = self.push_node(skill_idx, x, y);
			self.link(parent_node, node);
			self.place_children(node, &skills[skill_idx].name, depth + 1);
		}
	}
}

impl SkillTree {
	/// Build the tree for `theme` out of the full skill list.
	pub fn build(skills: &[Skill], theme: SkillTheme, title: &str) -> Self {
		Self::build_with(skills, theme, title, &LayoutConfig::default())
	}

	pub fn build_with(skills: &[Skill], theme: SkillTheme, title: &str, config: &LayoutConfig) -> Self {
		let skills = theme.filter(skills);
		if skills.is_empty() {
			return Self::default();
		}

		let mut diagnostics = Vec::new();
		let parents = resolve_parents(&skills, &mut diagnostics);

		let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
		for (i, parent) in parents.iter().enumerate() {
			if let Some(p) = parent {
				groups.entry(skills[*p].name.as_str()).or_default().push(i);
			}
		}
		let roots: Vec<usize> = (0..skills.len()).filter(|&i| parents[i].is_none()).collect();

		let (cx, cy) = config.center;
		let mut builder = Builder {
			config,
			skills: &skills,
			groups,
			placed: HashMap::new(),
			linked: HashSet::new(),
			tree: SkillTree {
				diagnostics,
				..Self::default()
			},
		};
		builder.tree.nodes.push(GraphNode {
			id: format!("category-{}", theme.key()),
			name: title.to_string(),
			kind: NodeKind::Category,
			x: cx,
			y: cy,
			level: None,
			child_count: 0,
		});

		let root_count = roots.len().max(1) as f64;
		let mut root_nodes = Vec::with_capacity(roots.len());
		for (i, &skill_idx) in roots.iter().enumerate() {
			let angle = 2.0 * PI * i as f64 / root_count;
			let node = builder.push_node(
				skill_idx,
				cx + config.root_radius * angle.cos(),
				cy + config.root_radius * angle.sin(),
			);
			builder.link(0, node);
			root_nodes.push((node, skill_idx));
		}
		for (node, skill_idx) in root_nodes {
			builder.place_children(node, &skills[skill_idx].name, 1);
		}

		builder.tree
	}

	/// The category node, if the theme has any skills.
	pub fn category(&self) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.kind == NodeKind::Category)
	}

	/// `root` and every node reachable from it.
	pub fn subtree_ids(&self, root: &str) -> HashSet<String> {
		let mut seen = HashSet::new();
		let mut stack = vec![root.to_string()];
		while let Some(id) = stack.pop() {
			if !seen.insert(id.clone()) {
				continue;
			}
			if let Some(children) = self.children.get(&id) {
				stack.extend(children.iter().cloned());
			}
		}
		seen
	}
}
