use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PointerEvent};

use super::layout::SkillTree;
use super::render;
use super::state::SkillGraphState;
use super::theme::SkillTheme;
use crate::components::frame_loop::{self, FrameLoopHandle};

/// Canvas size follows the parent's width at a 16:9 ratio.
fn canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let width = canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(800.0);
	(width, width * 9.0 / 16.0)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn event_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top()))
}

/// Radial skill tree with draggable, springy subtrees.
#[component]
pub fn SkillGraphCanvas(#[prop(into)] tree: Signal<SkillTree>, #[prop(into)] theme: Signal<SkillTheme>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<SkillGraphState>>> = Rc::new(RefCell::new(None));
	let frame_loop = FrameLoopHandle::new();
	let (state_init, loop_init) = (state.clone(), frame_loop.clone());

	Effect::new(move |_| {
		let (tree, theme) = (tree.get(), theme.get());
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if let Some(ref mut s) = *state_init.borrow_mut() {
			info!("skill graph switched to {} ({} nodes)", theme.key(), tree.nodes.len());
			s.replace_tree(tree, theme);
			return;
		}

		let (w, h) = canvas_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let Some(ctx) = context_2d(&canvas) else {
			warn!("no 2d context for the skill graph canvas");
			return;
		};
		info!("skill graph mounted for {} ({} nodes)", theme.key(), tree.nodes.len());
		*state_init.borrow_mut() = Some(SkillGraphState::new(tree, theme, w, h));

		let state_anim = state_init.clone();
		frame_loop::start(&loop_init, move |_, dt| {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				let (w, h) = canvas_size(&canvas);
				if (w - s.width).abs() > 0.5 {
					canvas.set_width(w as u32);
					canvas.set_height(h as u32);
					s.resize(w, h);
				}
				s.tick(dt);
				render::render(s, &ctx);
			}
		});
	});

	on_cleanup(move || frame_loop.cancel());

	let state_down = state.clone();
	let on_pointerdown = move |ev: PointerEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_down.borrow_mut() {
			if let Some(id) = s.node_at_position(x, y) {
				ev.prevent_default();
				// keep receiving moves when a finger slides off the canvas
				if let Some(canvas) = canvas_ref.get_untracked() {
					let _ = canvas.set_pointer_capture(ev.pointer_id());
				}
				s.begin_drag(&id);
			}
		}
	};

	let state_move = state.clone();
	let on_pointermove = move |ev: PointerEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_move.borrow_mut() {
			if s.is_dragging() {
				s.drag_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
		}
	};

	let state_up = state.clone();
	let on_pointerup = move |_: PointerEvent| {
		if let Some(ref mut s) = *state_up.borrow_mut() {
			s.end_drag();
		}
	};

	let state_leave = state;
	let on_pointerleave = move |_: PointerEvent| {
		if let Some(ref mut s) = *state_leave.borrow_mut() {
			s.end_drag();
			s.set_hover(None);
		}
	};

	view! {
		<div class="skill-graph">
			<canvas
				node_ref=canvas_ref
				class="skill-graph-canvas"
				on:pointerdown=on_pointerdown
				on:pointermove=on_pointermove
				on:pointerup=on_pointerup.clone()
				on:pointercancel=on_pointerup
				on:pointerleave=on_pointerleave
			/>
			<Show when=move || tree.with(|t| t.nodes.is_empty())>
				<div class="skill-graph-empty">"这个大类暂时还没有技能。"</div>
			</Show>
		</div>
	}
}
