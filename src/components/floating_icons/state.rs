use std::f64::consts::PI;

use rand::Rng;

use super::config::{IconFieldConfig, IconSpec};

/// Top-left position and velocity of one icon, in px and px/s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IconState {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
}

/// Bouncing icons inside a `width` x `height` viewport.
#[derive(Clone, Debug)]
pub struct IconField {
	specs: Vec<IconSpec>,
	states: Vec<IconState>,
	config: IconFieldConfig,
	width: f64,
	height: f64,
}

/// Extra gap left between two icons after separating them, in px.
const SEPARATION_SLACK: f64 = 0.5;

fn random_velocity(config: &IconFieldConfig, rng: &mut impl Rng) -> (f64, f64) {
	let speed = config.min_speed + rng.gen_range(0.0..1.0) * (config.max_speed - config.min_speed);
	let angle = rng.gen_range(0.0..2.0 * PI);
	(angle.cos() * speed, angle.sin() * speed)
}

fn overlaps(a: &IconState, sa: &IconSpec, b: &IconState, sb: &IconSpec) -> bool {
	a.x < b.x + sb.width && a.x + sa.width > b.x && a.y < b.y + sb.height && a.y + sa.height > b.y
}

impl IconField {
	pub fn new(specs: &[IconSpec], width: f64, height: f64, config: IconFieldConfig, rng: &mut impl Rng) -> Self {
		let mut field = Self {
			specs: specs.to_vec(),
			states: Vec::with_capacity(specs.len()),
			config,
			width,
			height,
		};
		field.resize(width, height, rng);
		field
	}

	/// Throw away the current motion and start over in the new viewport.
	pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl Rng) {
		self.width = width;
		self.height = height;
		let config = self.config;
		self.states = self
			.specs
			.iter()
			.map(|spec| {
				let max_x = (width - spec.width).max(0.0);
				let max_y = (height - spec.height).max(0.0);
				let (vx, vy) = random_velocity(&config, rng);
				IconState {
					x: spec.initial_x_pct / 100.0 * max_x,
					y: spec.initial_y_pct / 100.0 * max_y,
					vx,
					vy,
				}
			})
			.collect();
	}

	pub fn specs(&self) -> &[IconSpec] {
		&self.specs
	}

	pub fn states(&self) -> &[IconState] {
		&self.states
	}

	/// Replace the state of one icon. Mostly useful for tests.
	pub fn set_state(&mut self, index: usize, state: IconState) {
		if let Some(slot) = self.states.get_mut(index) {
			*slot = state;
		}
	}

	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Follow the container size without resetting motion.
	pub fn set_bounds(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Advance by `dt` seconds: move, bounce off the walls, then resolve
	/// icon-icon overlaps.
	pub fn step(&mut self, dt: f64) {
		let (width, height) = (self.width, self.height);
		for (state, spec) in self.states.iter_mut().zip(&self.specs) {
			state.x += state.vx * dt;
			state.y += state.vy * dt;
			bounce(state, spec, width, height);
		}
		self.collide();
	}

	fn collide(&mut self) {
		let push = self.config.push_distance;
		for i in 0..self.states.len() {
			for j in i + 1..self.states.len() {
				let (head, tail) = self.states.split_at_mut(j);
				let (a, b) = (&mut head[i], &mut tail[0]);
				let (sa, sb) = (&self.specs[i], &self.specs[j]);
				if !overlaps(a, sa, b, sb) {
					continue;
				}

				std::mem::swap(&mut a.vx, &mut b.vx);
				std::mem::swap(&mut a.vy, &mut b.vy);

				let dx = (b.x + sb.width / 2.0) - (a.x + sa.width / 2.0);
				let dy = (b.y + sb.height / 2.0) - (a.y + sa.height / 2.0);
				let dist = (dx * dx + dy * dy).sqrt();
				let (nx, ny) = if dist > f64::EPSILON {
					(dx / dist, dy / dist)
				} else {
					(1.0, 0.0)
				};

				let push = push.max(separation(a, sa, b, sb, nx, ny));
				a.x -= nx * push;
				a.y -= ny * push;
				b.x += nx * push;
				b.y += ny * push;
				clamp_into(a, sa, self.width, self.height);
				clamp_into(b, sb, self.width, self.height);
			}
		}
	}
}

/// Distance each of two overlapping boxes must move along `(nx, ny)`, in
/// opposite directions, until they no longer overlap on one of the axes.
fn separation(a: &IconState, sa: &IconSpec, b: &IconState, sb: &IconSpec, nx: f64, ny: f64) -> f64 {
	let depth_x = (a.x + sa.width).min(b.x + sb.width) - a.x.max(b.x);
	let depth_y = (a.y + sa.height).min(b.y + sb.height) - a.y.max(b.y);
	let along = |depth: f64, n: f64| if n.abs() > f64::EPSILON { depth / n.abs() } else { f64::INFINITY };
	along(depth_x, nx).min(along(depth_y, ny)) / 2.0 + SEPARATION_SLACK
}

/// Reflect off the viewport edges. Speed is kept, only the sign changes.
fn bounce(state: &mut IconState, spec: &IconSpec, width: f64, height: f64) {
	if state.x < 0.0 {
		state.x = 0.0;
		state.vx = state.vx.abs();
	} else if state.x + spec.width > width {
		state.x = (width - spec.width).max(0.0);
		state.vx = -state.vx.abs();
	}

	if state.y < 0.0 {
		state.y = 0.0;
		state.vy = state.vy.abs();
	} else if state.y + spec.height > height {
		state.y = (height - spec.height).max(0.0);
		state.vy = -state.vy.abs();
	}
}

fn clamp_into(state: &mut IconState, spec: &IconSpec, width: f64, height: f64) {
	state.x = state.x.clamp(0.0, (width - spec.width).max(0.0));
	state.y = state.y.clamp(0.0, (height - spec.height).max(0.0));
}
