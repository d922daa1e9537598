use leptos::prelude::*;
use log::info;

use super::state::{NebulaConfig, NebulaSlot, NebulaTicker};
use crate::components::browser_rng;
use crate::components::frame_loop::{self, FrameLoopHandle};
use crate::content::skills::Skill;

fn slot_view(slot: NebulaSlot) -> AnyView {
	let Some(skill) = slot.skill else {
		return view! { <div class="nebula-slot nebula-slot-empty" /> }.into_any();
	};
	let meta = slot.meta;
	let category = skill.short_category().to_string();
	let sub_category = skill.sub_category.clone().unwrap_or_else(|| "\u{a0}".to_string());

	view! {
		<div class="nebula-slot" style:transform=format!("translateY({}%)", meta.offset_y)>
			<div
				class="nebula-card slot-drift"
				class:faded=!slot.visible
				style:animation-duration=format!("{}s", meta.drift_duration)
				style:animation-delay=format!("{}s", meta.drift_delay)
			>
				<div class="nebula-card-head">
					<span class="nebula-card-name">{skill.name}</span>
					<span class="nebula-card-category">{category}</span>
				</div>
				<div class="nebula-card-sub">{sub_category}</div>
				<p class="nebula-card-level">
					"熟练度："
					<span>{skill.level.label()}</span>
				</p>
			</div>
		</div>
	}
	.into_any()
}

/// Slowly scrolling wall of skill cards that swap out one by one.
#[component]
pub fn SkillsNebula(pool: Vec<Skill>) -> impl IntoView {
	let ticker = StoredValue::new(NebulaTicker::new(NebulaConfig::default()));
	let slots = RwSignal::new(ticker.with_value(|t| t.slots().to_vec()));
	let frame_loop = FrameLoopHandle::new();
	let is_empty = pool.is_empty();

	let loop_init = frame_loop.clone();
	let mut started = false;
	Effect::new(move |_| {
		if started || pool.is_empty() {
			return;
		}
		started = true;

		let (mut rng, pool) = (browser_rng(), pool.clone());
		frame_loop::start(&loop_init, move |now, _| {
			let changed = ticker.try_update_value(|t| {
				if t.is_stopped() {
					return false;
				}
				if !t.is_mounted() {
					t.mount(&pool, now, &mut rng);
					info!("nebula mounted with {} skills", pool.len());
					return true;
				}
				!t.advance(now, &mut rng).is_empty()
			});
			if changed == Some(true) {
				if let Some(next) = ticker.try_with_value(|t| t.slots().to_vec()) {
					slots.set(next);
				}
			}
		});
	});

	on_cleanup(move || {
		frame_loop.cancel();
		ticker.try_update_value(NebulaTicker::stop);
	});

	view! {
		<Show when=move || !is_empty>
			<div class="nebula">
				<div class="nebula-scanlines" />
				<div class="nebula-scroll-area">
					<div class="nebula-scroll">
						<div class="nebula-grid">
							{move || slots.get().into_iter().map(slot_view).collect_view()}
						</div>
					</div>
				</div>
			</div>
		</Show>
	}
}
