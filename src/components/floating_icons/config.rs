/// A navigation icon floating on the home page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconSpec {
	pub id: &'static str,
	pub image_src: &'static str,
	pub href: &'static str,
	pub width: f64,
	pub height: f64,
	/// Start position as a percentage of the free horizontal space.
	pub initial_x_pct: f64,
	/// Start position as a percentage of the free vertical space.
	pub initial_y_pct: f64,
}

impl IconSpec {
	const fn nav(id: &'static str, image_src: &'static str, href: &'static str, x: f64, y: f64) -> Self {
		Self {
			id,
			image_src,
			href,
			width: 128.0,
			height: 128.0,
			initial_x_pct: x,
			initial_y_pct: y,
		}
	}
}

pub const ICONS: &[IconSpec] = &[
	IconSpec::nav("home-blog", "/images/icons/air-ship.png", "/blog", 30.0, 40.0),
	IconSpec::nav("home-photos", "/images/icons/qiu.png", "/photos", 65.0, 35.0),
	IconSpec::nav("home-music", "/images/icons/qiu.png", "/music", 20.0, 65.0),
	IconSpec::nav("home-notes", "/images/icons/qiu.png", "/notes", 55.0, 70.0),
	IconSpec::nav("home-reviews", "/images/icons/qiu.png", "/reviews", 80.0, 55.0),
	IconSpec::nav("home-skills", "/images/icons/qiu.png", "/skills", 45.0, 20.0),
	IconSpec::nav("home-food", "/images/icons/qiu.png", "/food", 10.0, 35.0),
	IconSpec::nav("home-stash", "/images/icons/qiu.png", "/stash", 88.0, 25.0),
];

/// Motion tunables for the icon field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconFieldConfig {
	/// Speed range in px/s; the upper bound is exclusive.
	pub min_speed: f64,
	pub max_speed: f64,
	/// How far each icon of a colliding pair is nudged apart, in px.
	pub push_distance: f64,
}

impl Default for IconFieldConfig {
	fn default() -> Self {
		Self {
			min_speed: 40.0,
			max_speed: 80.0,
			push_distance: 4.0,
		}
	}
}
