use leptos::prelude::*;

use crate::components::nebula::SkillsNebula;
use crate::components::skill_graph::{SkillGraphCanvas, SkillTheme, SkillTree};
use crate::components::skills_dashboard::SkillsDashboard;
use crate::content::skills::{SKILL_TARGET, SKILLS_CSV, Skill, level_counts, load_skills};

#[component]
fn SkillsBoard(skills: Vec<Skill>) -> impl IntoView {
	let theme = RwSignal::new(SkillTheme::default());
	let counts = level_counts(&skills);
	let pool = skills.clone();
	let skills = StoredValue::new(skills);
	let tree = Memo::new(move |_| {
		let theme = theme.get();
		skills.with_value(|s| SkillTree::build(s, theme, theme.title()))
	});

	let tabs = SkillTheme::ALL
		.into_iter()
		.map(|t| {
			view! {
				<button
					class="skills-tab"
					class:active=move || theme.get() == t
					on:click=move |_| theme.set(t)
				>
					{t.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<SkillsDashboard counts=counts target=SKILL_TARGET />
		<nav class="skills-tabs">{tabs}</nav>
		<header class="skills-heading">
			<h2>{move || theme.get().title()}</h2>
			<p class="subtitle">{move || theme.get().subtitle()}</p>
		</header>
		<SkillGraphCanvas tree=tree theme=theme />
		<SkillsNebula pool=pool />
	}
}

/// Skill tree page: dashboard, per-theme graph and the card nebula.
#[component]
pub fn Skills() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="skills-page">
				{load_skills(SKILLS_CSV).map(|skills| view! { <SkillsBoard skills=skills /> })}
			</div>
		</ErrorBoundary>
	}
}
