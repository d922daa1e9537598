//! Skill records loaded from the embedded `skills.csv` table.

use std::fmt;

use log::{debug, warn};
use serde::Deserialize;

/// Target number of skills shown on the dashboard progress bar.
pub const SKILL_TARGET: usize = 2000;

/// Embedded skill table.
pub const SKILLS_CSV: &str = include_str!("../../content/skills/skills.csv");

/// Failure reading the skill table itself (individual bad rows are dropped).
#[derive(Debug, thiserror::Error)]
pub enum SkillsError {
	/// The CSV reader could not make sense of the input.
	#[error("failed to read skill table: {0}")]
	Csv(#[from] csv::Error),
}

/// Proficiency of a skill. `InProgress` is never counted as mastered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillLevel {
	/// 初窥门径
	EarlyExposure,
	/// 轻车熟路
	Comfortable,
	/// 略有小成
	PartialMastery,
	/// 炉火纯青
	Refined,
	/// 登峰造极
	PeakMastery,
	/// 正在学习
	InProgress,
}

impl SkillLevel {
	/// Display order, lowest mastery first, in-progress last.
	pub const ALL: [SkillLevel; 6] = [
		SkillLevel::EarlyExposure,
		SkillLevel::Comfortable,
		SkillLevel::PartialMastery,
		SkillLevel::Refined,
		SkillLevel::PeakMastery,
		SkillLevel::InProgress,
	];

	/// The five levels that count as mastered.
	pub const MASTERED: [SkillLevel; 5] = [
		SkillLevel::EarlyExposure,
		SkillLevel::Comfortable,
		SkillLevel::PartialMastery,
		SkillLevel::Refined,
		SkillLevel::PeakMastery,
	];

	/// Label used in the skill table and on screen.
	pub fn label(self) -> &'static str {
		match self {
			SkillLevel::EarlyExposure => "初窥门径",
			SkillLevel::Comfortable => "轻车熟路",
			SkillLevel::PartialMastery => "略有小成",
			SkillLevel::Refined => "炉火纯青",
			SkillLevel::PeakMastery => "登峰造极",
			SkillLevel::InProgress => "正在学习",
		}
	}

	/// Parse a table label.
	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|level| level.label() == label.trim())
	}

	/// Whether this level counts toward mastery totals.
	pub fn is_mastered(self) -> bool {
		self != SkillLevel::InProgress
	}
}

impl fmt::Display for SkillLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// One skill of the taxonomy.
#[derive(Clone, Debug, PartialEq)]
pub struct Skill {
	/// `"{row}-{name}"`, re-derived on every load.
	pub id: String,
	pub name: String,
	/// Free-text top-level group, matched against theme keywords.
	pub category: String,
	pub sub_category: Option<String>,
	pub level: SkillLevel,
	pub acquired_at: Option<String>,
	pub summary: Option<String>,
	pub detail: Option<String>,
	/// Name of the parent skill, if any.
	pub parent_name: Option<String>,
}

impl Skill {
	/// Minimal constructor used by tests and fixtures.
	pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			category: category.into(),
			sub_category: None,
			level: SkillLevel::InProgress,
			acquired_at: None,
			summary: None,
			detail: None,
			parent_name: None,
		}
	}

	/// Builder-style level setter.
	pub fn with_level(mut self, level: SkillLevel) -> Self {
		self.level = level;
		self
	}

	/// Builder-style parent setter.
	pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
		self.parent_name = Some(parent.into());
		self
	}

	/// Category label up to the first `&`, as shown on nebula cards.
	pub fn short_category(&self) -> &str {
		self.category.split('&').next().unwrap_or_default().trim()
	}
}

#[derive(Debug, Default, Deserialize)]
struct SkillRow {
	#[serde(rename = "技能名称", default)]
	name: Option<String>,
	#[serde(rename = "大类", default)]
	category: Option<String>,
	#[serde(rename = "小类", default)]
	sub_category: Option<String>,
	#[serde(rename = "熟练度", default)]
	level: Option<String>,
	#[serde(rename = "掌握时间", default)]
	acquired_at: Option<String>,
	#[serde(rename = "描述", default)]
	summary: Option<String>,
	#[serde(rename = "详细内容", default)]
	detail: Option<String>,
	#[serde(rename = "父技能", alias = "父技能名", alias = "父技能名称", default)]
	parent: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}

/// Extract the parent's name from the raw parent column by cutting at the
/// first Latin or full-width opening parenthesis.
pub fn strip_parent_name(raw: &str) -> Option<String> {
	let trimmed = raw.trim();
	let cut = trimmed
		.find(['(', '（'])
		.map_or(trimmed, |idx| &trimmed[..idx])
		.trim();
	(!cut.is_empty()).then(|| cut.to_string())
}

/// Parse the skill table. Rows without a name or category are dropped.
pub fn load_skills(csv_text: &str) -> Result<Vec<Skill>, SkillsError> {
	let text = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text);
	let mut reader = csv::ReaderBuilder::new()
		.trim(csv::Trim::All)
		.flexible(true)
		.from_reader(text.as_bytes());
	reader.headers()?;

	let mut skills = Vec::new();
	for (index, row) in reader.deserialize::<SkillRow>().enumerate() {
		let row = match row {
			Ok(row) => row,
			Err(err) => {
				debug!("skipping unreadable skill row {index}: {err}");
				continue;
			}
		};
		let (Some(name), Some(category)) = (non_blank(row.name), non_blank(row.category)) else {
			debug!("skipping skill row {index}: missing name or category");
			continue;
		};
		let level = match non_blank(row.level) {
			None => SkillLevel::InProgress,
			Some(label) => SkillLevel::from_label(&label).unwrap_or_else(|| {
				warn!("unknown level {label:?} for skill {name:?}, treating as in progress");
				SkillLevel::InProgress
			}),
		};

		skills.push(Skill {
			id: format!("{index}-{name}"),
			parent_name: row.parent.as_deref().and_then(strip_parent_name),
			name,
			category,
			sub_category: non_blank(row.sub_category),
			level,
			acquired_at: non_blank(row.acquired_at),
			summary: non_blank(row.summary),
			detail: non_blank(row.detail),
		});
	}
	Ok(skills)
}

/// Skills at the in-progress level.
pub fn is_learning(skill: &Skill) -> bool {
	!skill.level.is_mastered()
}

/// Skills at any mastery level.
pub fn is_mastered(skill: &Skill) -> bool {
	skill.level.is_mastered()
}

/// All skills except in-progress ones.
pub fn mastered_skills(skills: &[Skill]) -> Vec<&Skill> {
	skills.iter().filter(|s| is_mastered(s)).collect()
}

/// Per-level counts over the five mastery levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelCounts([usize; 5]);

impl LevelCounts {
	/// Count for `level`; always 0 for in-progress.
	pub fn get(&self, level: SkillLevel) -> usize {
		SkillLevel::MASTERED
			.iter()
			.position(|l| *l == level)
			.map_or(0, |i| self.0[i])
	}

	/// Sum over all mastery levels.
	pub fn total(&self) -> usize {
		self.0.iter().sum()
	}
}

/// Count skills per mastery level, ignoring in-progress skills.
pub fn level_counts(skills: &[Skill]) -> LevelCounts {
	let mut counts = LevelCounts::default();
	for skill in skills {
		if let Some(i) = SkillLevel::MASTERED.iter().position(|l| *l == skill.level) {
			counts.0[i] += 1;
		}
	}
	counts
}

#[cfg(test)]
mod tests {
	use super::*;

	const TABLE: &str = "\u{feff}技能名称,大类,小类,熟练度,掌握时间,描述,详细内容,父技能\n\
		做饭,生活 & Life,厨房,轻车熟路,2020,,,\n\
		刀工,生活 & Life,厨房,初窥门径,,切菜,,做饭(https://example.com)\n\
		,生活 & Life,,登峰造极,,,,\n\
		无大类,,,登峰造极,,,,\n\
		\n\
		Rust,Tech,语言,,,,,\n";

	#[test]
	fn strips_parent_annotations() {
		assert_eq!(strip_parent_name("做饭(https://example.com)").as_deref(), Some("做饭"));
		assert_eq!(
			strip_parent_name("FPS 核心操作（https://x）").as_deref(),
			Some("FPS 核心操作")
		);
		assert_eq!(strip_parent_name("a（b(c"), Some("a".to_string()));
		assert_eq!(strip_parent_name("   "), None);
		assert_eq!(strip_parent_name("(only annotation)"), None);
	}

	#[test]
	fn loads_rows_and_drops_incomplete_ones() {
		let skills = load_skills(TABLE).unwrap();
		let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
		assert_eq!(names, ["做饭", "刀工", "Rust"]);

		assert_eq!(skills[0].id, "0-做饭");
		assert_eq!(skills[0].level, SkillLevel::Comfortable);
		assert_eq!(skills[0].acquired_at.as_deref(), Some("2020"));
		assert_eq!(skills[0].parent_name, None);

		assert_eq!(skills[1].parent_name.as_deref(), Some("做饭"));
		assert_eq!(skills[1].summary.as_deref(), Some("切菜"));

		// blank level means still learning
		assert_eq!(skills[2].level, SkillLevel::InProgress);
		assert_eq!(skills[2].short_category(), "Tech");
	}

	#[test]
	fn accepts_alternative_parent_header() {
		let table = "技能名称,大类,父技能名称\n刀工,生活,做饭（备注）\n";
		let skills = load_skills(table).unwrap();
		assert_eq!(skills[0].parent_name.as_deref(), Some("做饭"));
	}

	#[test]
	fn in_progress_is_never_mastered() {
		let mut skills = Vec::new();
		for i in 0..10 {
			let level = if i < 3 {
				SkillLevel::InProgress
			} else {
				SkillLevel::MASTERED[i % 5]
			};
			skills.push(Skill::new(i.to_string(), format!("s{i}"), "life").with_level(level));
		}

		assert_eq!(mastered_skills(&skills).len(), 7);
		let counts = level_counts(&skills);
		assert_eq!(counts.total(), 7);
		assert_eq!(counts.get(SkillLevel::InProgress), 0);
		assert_eq!(skills.iter().filter(|s| is_learning(s)).count(), 3);
	}

	#[test]
	fn level_labels_round_trip_through_table_text() {
		for level in SkillLevel::ALL {
			assert_eq!(SkillLevel::from_label(level.label()), Some(level));
		}
		assert_eq!(SkillLevel::from_label("大师"), None);
	}
}
