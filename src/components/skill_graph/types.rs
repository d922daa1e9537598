use crate::content::skills::SkillLevel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Category,
	Skill,
}

/// A positioned node. `x`/`y` are percentages of the graph area.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub name: String,
	pub kind: NodeKind,
	pub x: f64,
	pub y: f64,
	pub level: Option<SkillLevel>,
	pub child_count: usize,
}

impl GraphNode {
	/// Diameter in rem: grows with child count and label length.
	pub fn size_rem(&self) -> f64 {
		let name_len = self.name.chars().count() as f64;
		let text_extra = ((name_len - 4.0) * 0.16).clamp(0.0, 2.0);
		let children = self.child_count as f64;

		match self.kind {
			NodeKind::Category => {
				let extra = if self.child_count > 0 {
					(0.35 * children.sqrt()).min(2.0)
				} else {
					0.0
				};
				5.4 + extra + text_extra * 0.9
			}
			NodeKind::Skill => {
				let extra = if self.child_count > 0 {
					(0.35 * children.sqrt()).min(1.4)
				} else {
					0.0
				};
				2.8 + extra + text_extra
			}
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub id: String,
	pub from: String,
	pub to: String,
}
