//! Visual widgets. Each keeps its simulation in a plain `state` module and
//! drives it from a thin Leptos component.

use rand::SeedableRng;
use rand::rngs::SmallRng;

pub mod floating_icons;
pub mod frame_loop;
pub mod nebula;
pub mod skill_graph;
pub mod skills_dashboard;

/// Fresh generator seeded from the browser's `Math.random`.
pub(crate) fn browser_rng() -> SmallRng {
	let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
	SmallRng::seed_from_u64(hi << 32 | lo)
}
