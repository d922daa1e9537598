use leptos::prelude::*;

use crate::content::skills::{LevelCounts, SkillLevel};

/// Fraction of `target` reached, capped at 1.
pub fn progress(total: usize, target: usize) -> f64 {
	if target == 0 {
		return 1.0;
	}
	(total as f64 / target as f64).min(1.0)
}

/// Mastered-skill totals with a progress bar toward the target.
#[component]
pub fn SkillsDashboard(counts: LevelCounts, target: usize) -> impl IntoView {
	let total = counts.total();
	let percent = progress(total, target) * 100.0;

	let levels = SkillLevel::MASTERED
		.into_iter()
		.map(|level| {
			view! {
				<li class="dashboard-level">
					<span class="dashboard-level-label">{level.label()}</span>
					<span class="dashboard-level-count">{counts.get(level)}</span>
				</li>
			}
		})
		.collect_view();

	view! {
		<section class="dashboard">
			<div class="dashboard-total">
				<span class="dashboard-total-count">{total}</span>
				" / "
				<span class="dashboard-total-target">{target}</span>
			</div>
			<div class="dashboard-bar">
				<div class="dashboard-bar-fill" style:width=format!("{percent:.1}%") />
			</div>
			<ul class="dashboard-levels">{levels}</ul>
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn progress_is_capped() {
		assert_eq!(progress(0, 2000), 0.0);
		assert_eq!(progress(500, 2000), 0.25);
		assert_eq!(progress(2500, 2000), 1.0);
		assert_eq!(progress(3, 0), 1.0);
	}
}
