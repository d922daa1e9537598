use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::ev;
use leptos::prelude::*;
use log::info;

use super::config::{ICONS, IconFieldConfig};
use super::state::{IconField, IconState};
use crate::components::browser_rng;
use crate::components::frame_loop::{self, FrameLoopHandle};

/// Full-screen field of bouncing navigation icons.
#[component]
pub fn FloatingIconsField() -> impl IntoView {
	let container = NodeRef::<leptos::html::Div>::new();
	let positions = RwSignal::new(Vec::<IconState>::new());
	let frame_loop = FrameLoopHandle::new();
	let resized = Arc::new(AtomicBool::new(false));

	let (loop_init, resized_tick) = (frame_loop.clone(), resized.clone());
	let mut started = false;
	Effect::new(move |_| {
		let Some(el) = container.get() else {
			return;
		};
		if started {
			return;
		}
		started = true;

		let mut rng = browser_rng();
		let rect = el.get_bounding_client_rect();
		let mut field = IconField::new(ICONS, rect.width(), rect.height(), IconFieldConfig::default(), &mut rng);
		positions.set(field.states().to_vec());
		info!("icon field started at {}x{}", rect.width(), rect.height());

		let resized = resized_tick.clone();
		frame_loop::start(&loop_init, move |_, dt| {
			let Some(el) = container.get_untracked() else {
				return;
			};
			let rect = el.get_bounding_client_rect();
			if resized.swap(false, Ordering::SeqCst) {
				info!("viewport resized to {}x{}, restarting icons", rect.width(), rect.height());
				field.resize(rect.width(), rect.height(), &mut rng);
			} else {
				field.set_bounds(rect.width(), rect.height());
				field.step(dt);
			}
			positions.set(field.states().to_vec());
		});
	});

	let listener = window_event_listener(ev::resize, move |_| resized.store(true, Ordering::SeqCst));
	on_cleanup(move || {
		frame_loop.cancel();
		listener.remove();
	});

	let icons = ICONS
		.iter()
		.enumerate()
		.map(|(i, icon)| {
			let at = move |f: fn(&IconState) -> f64| {
				positions.with(|p| p.get(i).map(|s| format!("{}px", f(s))).unwrap_or_default())
			};
			view! {
				<a
					href=icon.href
					class="floating-icon"
					class:hidden=move || positions.with(|p| p.is_empty())
					style:left=move || at(|s| s.x)
					style:top=move || at(|s| s.y)
					style:width=format!("{}px", icon.width)
					style:height=format!("{}px", icon.height)
				>
					<img src=icon.image_src alt=icon.id class="floating-icon-img" />
				</a>
			}
		})
		.collect_view();

	view! {
		<div node_ref=container class="cosmos-field">
			<div class="cosmos-caption">
				<div class="cosmos-title">"Drill - Cosmos"</div>
				<div class="retro-title retro-cursor">"Personal Blog"</div>
			</div>
			{icons}
		</div>
	}
}
