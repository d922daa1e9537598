use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::SkillGraphState;
use super::types::{GraphNode, NodeKind};
use crate::content::skills::SkillLevel;

/// Border alpha for a mastery level; `None` draws the neutral slate ring.
fn level_alpha(level: Option<SkillLevel>) -> Option<f64> {
	match level? {
		SkillLevel::InProgress => None,
		SkillLevel::EarlyExposure => Some(0.6),
		SkillLevel::Comfortable | SkillLevel::PartialMastery => Some(0.8),
		SkillLevel::Refined | SkillLevel::PeakMastery => Some(0.95),
	}
}

pub fn render(state: &SkillGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &SkillGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_cap("round");
	ctx.set_line_width((state.width / 100.0 * 0.45).max(1.0));

	for edge in &state.tree.edges {
		let from = state.nodes.iter().find(|n| n.id == edge.from);
		let to = state.nodes.iter().find(|n| n.id == edge.to);
		let (Some(from), Some(to)) = (from, to) else {
			continue;
		};
		let (x1, y1) = state.to_screen(from.x, from.y);
		let (x2, y2) = state.to_screen(to.x, to.y);

		// edges inside a dragged subtree are drawn brighter
		let alpha = if state.is_in_drag(&from.id) && state.is_in_drag(&to.id) {
			0.85
		} else {
			0.55
		};
		ctx.set_stroke_style_str(&state.theme.accent_rgba(alpha));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn draw_nodes(state: &SkillGraphState, ctx: &CanvasRenderingContext2d) {
	for node in &state.nodes {
		draw_node(state, ctx, node);
	}
}

fn draw_node(state: &SkillGraphState, ctx: &CanvasRenderingContext2d, node: &GraphNode) {
	let (x, y) = state.to_screen(node.x, node.y);
	let radius = SkillGraphState::node_radius(node) * state.node_scale(&node.id);

	let (fill, stroke, glow) = match node.kind {
		NodeKind::Category => (
			"rgba(6, 20, 24, 0.9)".to_string(),
			state.theme.accent_rgba(1.0),
			Some((radius * 1.6, state.theme.accent_rgba(0.45))),
		),
		NodeKind::Skill => {
			let stroke = match level_alpha(node.level) {
				Some(alpha) => state.theme.accent_rgba(alpha),
				None => "rgba(100, 116, 139, 0.6)".to_string(),
			};
			let glow = state
				.is_in_drag(&node.id)
				.then(|| (radius * 1.4, state.theme.accent_rgba(0.25)));
			("rgba(2, 6, 23, 0.85)".to_string(), stroke, glow)
		}
	};

	if let Some((glow_radius, color)) = glow {
		if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.6, x, y, glow_radius) {
			let _ = gradient.add_color_stop(0.0, &color);
			let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
			ctx.begin_path();
			let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}
	}

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&fill);
	ctx.fill();
	ctx.set_stroke_style_str(&stroke);
	ctx.set_line_width(if state.is_hovered(&node.id) { 2.5 } else { 1.5 });
	ctx.stroke();

	let font_px = match node.kind {
		NodeKind::Category => 11.0,
		NodeKind::Skill => 10.0,
	};
	ctx.set_fill_style_str("rgba(236, 253, 245, 0.95)");
	ctx.set_font(&format!("{font_px}px sans-serif"));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text_with_max_width(&node.name, x, y, radius * 1.8);
}
