use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::content::skills::Skill;

/// Nebula tunables. Times are in milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct NebulaConfig {
	pub slot_count: usize,
	pub min_interval_ms: f64,
	pub max_interval_ms: f64,
	pub fade_ms: f64,
	/// Vertical offset range, +/- percent of the slot height.
	pub max_offset_pct: f64,
	/// Drift animation period range in seconds.
	pub drift_period_s: (f64, f64),
	/// Upper bound of the drift animation phase in seconds.
	pub max_drift_delay_s: f64,
}

impl Default for NebulaConfig {
	fn default() -> Self {
		Self {
			slot_count: 48,
			min_interval_ms: 12_000.0,
			max_interval_ms: 30_000.0,
			fade_ms: 900.0,
			max_offset_pct: 8.0,
			drift_period_s: (16.0, 32.0),
			max_drift_delay_s: 16.0,
		}
	}
}

/// Per-slot drift parameters, assigned once after mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotMeta {
	pub offset_y: f64,
	pub drift_duration: f64,
	pub drift_delay: f64,
}

impl Default for SlotMeta {
	fn default() -> Self {
		Self {
			offset_y: 0.0,
			drift_duration: 24.0,
			drift_delay: 0.0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
	Idle,
	/// Shown; starts fading out at `until`.
	Showing { until: f64 },
	/// Faded out; gets new content at `until`.
	FadingOut { until: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct NebulaSlot {
	pub skill: Option<Skill>,
	pub meta: SlotMeta,
	pub visible: bool,
	phase: Phase,
}

impl Default for NebulaSlot {
	fn default() -> Self {
		Self {
			skill: None,
			meta: SlotMeta::default(),
			visible: true,
			phase: Phase::Idle,
		}
	}
}

/// What happened to a slot during [`NebulaTicker::advance`].
#[derive(Clone, Debug, PartialEq)]
pub enum SlotEvent {
	FadeOut { slot: usize },
	Replaced { slot: usize, skill_id: String },
	/// No distinct skill was free, the slot keeps what it shows.
	Kept { slot: usize },
}

/// Fixed pool of slots, each cycling through skills on its own timer.
///
/// All timers live in this one structure; [`NebulaTicker::stop`] cancels
/// every one of them at once.
#[derive(Clone, Debug)]
pub struct NebulaTicker {
	config: NebulaConfig,
	pool: Vec<Skill>,
	slots: Vec<NebulaSlot>,
	stopped: bool,
}

impl NebulaTicker {
	/// Every slot empty with neutral drift, so the first paint is fixed.
	pub fn new(config: NebulaConfig) -> Self {
		Self {
			slots: vec![NebulaSlot::default(); config.slot_count],
			config,
			pool: Vec::new(),
			stopped: false,
		}
	}

	pub fn slots(&self) -> &[NebulaSlot] {
		&self.slots
	}

	pub fn is_mounted(&self) -> bool {
		self.slots.iter().any(|s| s.phase != Phase::Idle)
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped
	}

	fn next_interval(&self, rng: &mut impl Rng) -> f64 {
		let (lo, hi) = (self.config.min_interval_ms, self.config.max_interval_ms);
		if hi > lo { rng.gen_range(lo..hi) } else { lo }
	}

	/// Fill the slots from a shuffled copy of `pool`, randomise drift and
	/// start every slot's timer.
	pub fn mount(&mut self, pool: &[Skill], now_ms: f64, rng: &mut impl Rng) {
		if self.stopped {
			return;
		}
		self.pool = pool.to_vec();
		let mut shuffled = self.pool.clone();
		shuffled.shuffle(rng);
		let mut shuffled = shuffled.into_iter();

		let (min_period, max_period) = self.config.drift_period_s;
		for i in 0..self.slots.len() {
			let meta = SlotMeta {
				offset_y: rng.gen_range(-1.0..1.0) * self.config.max_offset_pct,
				drift_duration: min_period + rng.gen_range(0.0..1.0) * (max_period - min_period),
				drift_delay: rng.gen_range(0.0..1.0) * self.config.max_drift_delay_s,
			};
			let until = now_ms + self.next_interval(rng);
			let slot = &mut self.slots[i];
			slot.skill = shuffled.next();
			slot.meta = meta;
			slot.visible = true;
			slot.phase = Phase::Showing { until };
		}
	}

	/// Uniform pick among pool skills shown by no slot at all, the asking
	/// slot included. `None` means the slot should keep what it shows.
	pub fn replacement_for(&self, slot: usize, rng: &mut impl Rng) -> Option<&Skill> {
		let own = self.slots.get(slot).and_then(|s| s.skill.as_ref()).map(|k| k.id.as_str());
		let taken: HashSet<&str> = self
			.slots
			.iter()
			.filter_map(|s| s.skill.as_ref().map(|k| k.id.as_str()))
			.collect();
		let candidates: Vec<&Skill> = self
			.pool
			.iter()
			.filter(|s| !taken.contains(s.id.as_str()) && Some(s.id.as_str()) != own)
			.collect();
		candidates.choose(rng).copied()
	}

	/// Run every timer that is due at `now_ms`.
	pub fn advance(&mut self, now_ms: f64, rng: &mut impl Rng) -> Vec<SlotEvent> {
		let mut events = Vec::new();
		if self.stopped {
			return events;
		}

		for i in 0..self.slots.len() {
			// a long frame gap may cover several phases of one slot
			loop {
				match self.slots[i].phase {
					Phase::Showing { until } if until <= now_ms => {
						self.slots[i].visible = false;
						self.slots[i].phase = Phase::FadingOut {
							until: until + self.config.fade_ms,
						};
						events.push(SlotEvent::FadeOut { slot: i });
					}
					Phase::FadingOut { until } if until <= now_ms => {
						let next = self.replacement_for(i, rng).cloned();
						let event = match next {
							Some(skill) => {
								let skill_id = skill.id.clone();
								self.slots[i].skill = Some(skill);
								SlotEvent::Replaced { slot: i, skill_id }
							}
							None => SlotEvent::Kept { slot: i },
						};
						let next_until = until + self.next_interval(rng);
						let slot = &mut self.slots[i];
						slot.visible = true;
						slot.phase = Phase::Showing { until: next_until };
						events.push(event);
					}
					_ => break,
				}
			}
		}
		events
	}

	/// Cancel every slot timer. Nothing changes after this.
	pub fn stop(&mut self) {
		self.stopped = true;
		for slot in &mut self.slots {
			slot.phase = Phase::Idle;
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn pool(n: usize) -> Vec<Skill> {
		(0..n)
			.map(|i| Skill::new(format!("{i}-s"), format!("s{i}"), "life"))
			.collect()
	}

	fn shown_ids(ticker: &NebulaTicker) -> Vec<&str> {
		ticker
			.slots()
			.iter()
			.filter_map(|s| s.skill.as_ref().map(|k| k.id.as_str()))
			.collect()
	}

	fn assert_distinct(ticker: &NebulaTicker) {
		let ids = shown_ids(ticker);
		let unique: HashSet<_> = ids.iter().collect();
		assert_eq!(ids.len(), unique.len(), "{ids:?}");
	}

	#[test]
	fn first_paint_is_empty_and_neutral() {
		let ticker = NebulaTicker::new(NebulaConfig::default());
		assert_eq!(ticker.slots().len(), 48);
		for slot in ticker.slots() {
			assert_eq!(slot.skill, None);
			assert_eq!(slot.meta, SlotMeta::default());
		}
		assert!(!ticker.is_mounted());
	}

	#[test]
	fn mount_assigns_distinct_skills_and_leaves_extra_slots_empty() {
		let mut rng = SmallRng::seed_from_u64(11);
		let mut ticker = NebulaTicker::new(NebulaConfig::default());
		ticker.mount(&pool(30), 0.0, &mut rng);
		assert_eq!(shown_ids(&ticker).len(), 30);
		assert_eq!(ticker.slots().iter().filter(|s| s.skill.is_none()).count(), 18);
		assert_distinct(&ticker);
		for slot in ticker.slots() {
			assert!(slot.meta.offset_y.abs() <= 8.0);
			assert!((16.0..32.0).contains(&slot.meta.drift_duration));
			assert!((0.0..16.0).contains(&slot.meta.drift_delay));
		}
	}

	#[test]
	fn replacements_never_duplicate_another_slot() {
		let mut rng = SmallRng::seed_from_u64(5);
		let config = NebulaConfig {
			slot_count: 8,
			..NebulaConfig::default()
		};
		let mut ticker = NebulaTicker::new(config);
		ticker.mount(&pool(12), 0.0, &mut rng);

		let mut replaced = 0;
		let mut now = 0.0;
		while now < 600_000.0 {
			now += 250.0;
			for event in ticker.advance(now, &mut rng) {
				if matches!(event, SlotEvent::Replaced { .. }) {
					replaced += 1;
				}
				assert_distinct(&ticker);
			}
		}
		assert!(replaced > 100);
	}

	#[test]
	fn slot_fades_before_it_changes() {
		let mut rng = SmallRng::seed_from_u64(2);
		let config = NebulaConfig {
			slot_count: 1,
			..NebulaConfig::default()
		};
		let mut ticker = NebulaTicker::new(config);
		ticker.mount(&pool(3), 0.0, &mut rng);

		assert!(ticker.advance(11_999.0, &mut rng).is_empty());
		let mut now = 12_000.0;
		let events = loop {
			let events = ticker.advance(now, &mut rng);
			if !events.is_empty() {
				break events;
			}
			now += 10.0;
		};
		assert_eq!(events, [SlotEvent::FadeOut { slot: 0 }]);
		assert!(!ticker.slots()[0].visible);

		let events = ticker.advance(now + 900.0, &mut rng);
		assert!(matches!(events.as_slice(), [SlotEvent::Replaced { slot: 0, .. }]));
		assert!(ticker.slots()[0].visible);
	}

	#[test]
	fn exhausted_pool_keeps_content() {
		let mut rng = SmallRng::seed_from_u64(4);
		let config = NebulaConfig {
			slot_count: 3,
			..NebulaConfig::default()
		};
		let mut ticker = NebulaTicker::new(config);
		ticker.mount(&pool(2), 0.0, &mut rng);

		// a filled slot has only its own skill left, which is no replacement
		let filled = ticker.slots().iter().position(|s| s.skill.is_some()).unwrap();
		assert!(ticker.replacement_for(filled, &mut rng).is_none());

		// an empty slot has nothing left to pick
		let empty = ticker.slots().iter().position(|s| s.skill.is_none()).unwrap();
		assert!(ticker.replacement_for(empty, &mut rng).is_none());

		let before = ticker.slots().to_vec();
		let events = ticker.advance(100_000.0, &mut rng);
		assert!(events.contains(&SlotEvent::Kept { slot: empty }));
		assert!(events.contains(&SlotEvent::Kept { slot: filled }));
		assert!(!events.iter().any(|e| matches!(e, SlotEvent::Replaced { .. })));
		for (a, b) in before.iter().zip(ticker.slots()) {
			assert_eq!(a.skill, b.skill);
		}
	}

	#[test]
	fn replacement_prefers_a_different_skill() {
		for seed in 0..200 {
			let mut rng = SmallRng::seed_from_u64(seed);
			let config = NebulaConfig {
				slot_count: 1,
				..NebulaConfig::default()
			};
			let mut ticker = NebulaTicker::new(config);
			ticker.mount(&pool(2), 0.0, &mut rng);
			let before = ticker.slots()[0].skill.clone().unwrap();

			let mut now = 0.0;
			let replaced = loop {
				now += 100.0;
				let replaced = ticker.advance(now, &mut rng).into_iter().find_map(|e| match e {
					SlotEvent::Replaced { skill_id, .. } => Some(skill_id),
					_ => None,
				});
				if let Some(id) = replaced {
					break id;
				}
			};
			assert_ne!(replaced, before.id, "seed {seed}");
			assert_eq!(ticker.slots()[0].skill.as_ref().unwrap().id, replaced);
		}
	}

	#[test]
	fn empty_pool_mounts_empty_slots() {
		let mut rng = SmallRng::seed_from_u64(8);
		let mut ticker = NebulaTicker::new(NebulaConfig::default());
		ticker.mount(&[], 0.0, &mut rng);
		assert!(shown_ids(&ticker).is_empty());
		let events = ticker.advance(100_000.0, &mut rng);
		assert!(events.iter().all(|e| !matches!(e, SlotEvent::Replaced { .. })));
	}

	#[test]
	fn nothing_fires_after_stop() {
		let mut rng = SmallRng::seed_from_u64(6);
		let mut ticker = NebulaTicker::new(NebulaConfig::default());
		ticker.mount(&pool(60), 0.0, &mut rng);
		let before = ticker.slots().to_vec();

		ticker.stop();
		let mut fired = Vec::new();
		for now in (0..100).map(|i| i as f64 * 10_000.0) {
			fired.extend(ticker.advance(now, &mut rng));
		}
		assert!(fired.is_empty());
		assert!(ticker.is_stopped());
		let contents: Vec<_> = ticker.slots().iter().map(|s| s.skill.clone()).collect();
		assert_eq!(contents, before.iter().map(|s| s.skill.clone()).collect::<Vec<_>>());

		ticker.mount(&pool(60), 0.0, &mut rng);
		assert!(!ticker.is_mounted());
	}
}
