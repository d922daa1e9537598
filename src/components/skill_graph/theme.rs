use crate::content::skills::Skill;

/// Top-level grouping a skill graph is drawn for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SkillTheme {
	#[default]
	Life,
	Art,
	Mind,
	Tech,
	Adventure,
	Game,
	Meta,
}

impl SkillTheme {
	/// Tab order. Also the order categories are tested in.
	pub const ALL: [SkillTheme; 7] = [
		SkillTheme::Life,
		SkillTheme::Art,
		SkillTheme::Mind,
		SkillTheme::Tech,
		SkillTheme::Adventure,
		SkillTheme::Game,
		SkillTheme::Meta,
	];

	pub fn key(self) -> &'static str {
		match self {
			SkillTheme::Life => "life",
			SkillTheme::Art => "art",
			SkillTheme::Mind => "mind",
			SkillTheme::Tech => "tech",
			SkillTheme::Adventure => "adventure",
			SkillTheme::Game => "game",
			SkillTheme::Meta => "meta",
		}
	}

	/// Lowercase substrings of a category that select this theme.
	fn keywords(self) -> &'static [&'static str] {
		match self {
			SkillTheme::Life => &["life", "生活"],
			SkillTheme::Art => &["art", "艺术"],
			SkillTheme::Mind => &["mind", "心", "思维"],
			SkillTheme::Tech => &["tech", "技术", "工程"],
			SkillTheme::Adventure => &["adventure", "冒险", "运动"],
			SkillTheme::Game => &["game", "游戏"],
			SkillTheme::Meta => &["meta", "元"],
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			SkillTheme::Life => "LIFE",
			SkillTheme::Art => "ART",
			SkillTheme::Mind => "MIND",
			SkillTheme::Tech => "TECH",
			SkillTheme::Adventure => "ADVENTURE",
			SkillTheme::Game => "GAME",
			SkillTheme::Meta => "META",
		}
	}

	/// Name shown on the category node.
	pub fn title(self) -> &'static str {
		match self {
			SkillTheme::Life => "LIFE & SKILLS",
			other => other.label(),
		}
	}

	pub fn subtitle(self) -> &'static str {
		match self {
			SkillTheme::Life => "生活相关技能：做饭、整理、照顾身体、自我管理等等。",
			SkillTheme::Art => "绘画、设计、摄影、音乐、剪辑等艺术表达相关技能。",
			SkillTheme::Mind => "思维方式、学习方法、语言能力、心理建设等心智相关技能。",
			SkillTheme::Tech => "编程、电子、电路、系统搭建、工具配置等技术栈相关技能。",
			SkillTheme::Adventure => "运动、户外、旅行、生存技能，身体和世界的探索。",
			SkillTheme::Game => "对战、策略、解谜、构筑等游戏相关技能。",
			SkillTheme::Meta => "时间管理、项目管理、抽象思维等『元技能』。",
		}
	}

	/// Accent colour as an RGB triple.
	pub fn accent(self) -> (u8, u8, u8) {
		match self {
			SkillTheme::Life => (52, 211, 153),
			SkillTheme::Art => (244, 114, 182),
			SkillTheme::Mind => (168, 85, 247),
			SkillTheme::Tech => (59, 130, 246),
			SkillTheme::Adventure => (234, 179, 8),
			SkillTheme::Game => (248, 113, 113),
			SkillTheme::Meta => (148, 163, 184),
		}
	}

	/// `rgba(...)` string of the accent colour.
	pub fn accent_rgba(self, alpha: f64) -> String {
		let (r, g, b) = self.accent();
		format!("rgba({r}, {g}, {b}, {alpha})")
	}

	/// First theme whose keywords occur in `category`, case-insensitively.
	pub fn classify(category: &str) -> Option<SkillTheme> {
		let category = category.to_lowercase();
		Self::ALL
			.into_iter()
			.find(|theme| theme.keywords().iter().any(|k| category.contains(k)))
	}

	/// Skills whose category classifies as this theme, in input order.
	pub fn filter(self, skills: &[Skill]) -> Vec<&Skill> {
		skills
			.iter()
			.filter(|s| Self::classify(&s.category) == Some(self))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classifies_bilingual_categories() {
		assert_eq!(SkillTheme::classify("生活 & Life"), Some(SkillTheme::Life));
		assert_eq!(SkillTheme::classify("TECH"), Some(SkillTheme::Tech));
		assert_eq!(SkillTheme::classify("心理"), Some(SkillTheme::Mind));
		assert_eq!(SkillTheme::classify("户外运动"), Some(SkillTheme::Adventure));
		assert_eq!(SkillTheme::classify("元技能 & Meta"), Some(SkillTheme::Meta));
		assert_eq!(SkillTheme::classify("cooking"), None);
	}

	#[test]
	fn earlier_theme_wins_on_overlap() {
		// contains both "life" and "game"
		assert_eq!(SkillTheme::classify("Game Life"), Some(SkillTheme::Life));
	}
}
