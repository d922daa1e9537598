//! Markdown collections and the skill table, embedded at build time.
//!
//! Everything here is plain data loading: pages call into it and hand the
//! resulting records to the visual components.

mod front_matter;
pub mod skills;

use std::cmp::Ordering;

use pulldown_cmark::{Options, Parser, html};

/// `(collection, slug, markdown source)` for every embedded item.
const EMBEDDED: &[(&str, &str, &str)] = &[
	("blog", "hello-cosmos", include_str!("../../content/blog/hello-cosmos.md")),
	("blog", "skill-tree", include_str!("../../content/blog/skill-tree.md")),
	("notes", "rust-ownership", include_str!("../../content/notes/rust-ownership.md")),
	("reviews", "outer-wilds", include_str!("../../content/reviews/outer-wilds.md")),
];

/// Errors surfaced by the content store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContentError {
	/// No item with that slug in that collection.
	#[error("no item `{slug}` in collection `{collection}`")]
	NotFound { collection: String, slug: String },

	/// Opening `---` without a closing one.
	#[error("malformed front matter: the `---` block is never closed")]
	MalformedFrontMatter,

	/// Front matter that is not valid YAML for the expected fields.
	#[error("invalid front matter: {message}")]
	FrontMatterYaml { message: String },
}

/// Listing metadata of an item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemMeta {
	pub slug: String,
	pub title: String,
	pub date: Option<String>,
	pub summary: Option<String>,
	pub tags: Vec<String>,
}

/// A fully rendered item.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
	pub meta: ItemMeta,
	/// Raw markdown body.
	pub content: String,
	/// Body rendered to HTML.
	pub content_html: String,
}

/// Read-only view over a set of markdown sources.
#[derive(Clone, Debug)]
pub struct ContentStore {
	entries: Vec<(String, String, String)>,
}

impl ContentStore {
	/// Store over the items compiled into the bundle.
	pub fn embedded() -> Self {
		Self::from_entries(EMBEDDED.iter().copied())
	}

	/// Store over arbitrary `(collection, slug, source)` triples.
	pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
		Self {
			entries: entries
				.into_iter()
				.map(|(c, s, src)| (c.to_string(), s.to_string(), src.to_string()))
				.collect(),
		}
	}

	/// Slugs of a collection, in insertion order. Unknown collections are empty.
	pub fn slugs(&self, collection: &str) -> Vec<&str> {
		self.entries
			.iter()
			.filter(|(c, _, _)| c == collection)
			.map(|(_, s, _)| s.as_str())
			.collect()
	}

	/// Load and render one item. A trailing `.md` on the slug is ignored.
	pub fn item(&self, collection: &str, slug: &str) -> Result<Item, ContentError> {
		let slug = slug.strip_suffix(".md").unwrap_or(slug);
		let (_, _, source) = self
			.entries
			.iter()
			.find(|(c, s, _)| c == collection && s == slug)
			.ok_or_else(|| ContentError::NotFound {
				collection: collection.to_string(),
				slug: slug.to_string(),
			})?;

		let (front, body) = front_matter::split(source)?;
		Ok(Item {
			meta: ItemMeta {
				slug: slug.to_string(),
				title: front.title.unwrap_or_else(|| slug.to_string()),
				date: front.date,
				summary: front.summary,
				tags: front.tags,
			},
			content: body.to_string(),
			content_html: render_markdown(body),
		})
	}

	/// Metadata of every item, newest first. Undated items come last.
	pub fn all_items(&self, collection: &str) -> Result<Vec<ItemMeta>, ContentError> {
		let mut items = self
			.slugs(collection)
			.into_iter()
			.map(|slug| self.item(collection, slug).map(|item| item.meta))
			.collect::<Result<Vec<_>, _>>()?;
		items.sort_by(|a, b| match (&a.date, &b.date) {
			(Some(x), Some(y)) => y.cmp(x),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => Ordering::Equal,
		});
		Ok(items)
	}
}

/// Render markdown with tables, strikethrough and task lists enabled.
pub fn render_markdown(markdown: &str) -> String {
	let parser = Parser::new_ext(
		markdown,
		Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS,
	);
	let mut out = String::with_capacity(markdown.len() * 3 / 2);
	html::push_html(&mut out, parser);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store() -> ContentStore {
		ContentStore::from_entries([
			("blog", "old", "---\ntitle: Old\ndate: \"2023-01-01\"\n---\nold"),
			("blog", "undated", "---\ntitle: Undated\n---\nno date"),
			("blog", "new", "---\ntitle: New\ndate: \"2024-06-01\"\n---\n**new**"),
			("notes", "untitled", "plain body"),
		])
	}

	#[test]
	fn lists_newest_first_with_undated_last() {
		let items = store().all_items("blog").unwrap();
		let slugs: Vec<_> = items.iter().map(|i| i.slug.as_str()).collect();
		assert_eq!(slugs, ["new", "old", "undated"]);
	}

	#[test]
	fn renders_markdown_body() {
		let item = store().item("blog", "new.md").unwrap();
		assert_eq!(item.meta.slug, "new");
		assert_eq!(item.meta.title, "New");
		assert_eq!(item.content, "**new**");
		assert!(item.content_html.contains("<strong>new</strong>"));
	}

	#[test]
	fn title_falls_back_to_slug() {
		let item = store().item("notes", "untitled").unwrap();
		assert_eq!(item.meta.title, "untitled");
		assert!(item.meta.tags.is_empty());
	}

	#[test]
	fn missing_item_is_not_found() {
		let err = store().item("blog", "nope").unwrap_err();
		assert_eq!(
			err,
			ContentError::NotFound {
				collection: "blog".into(),
				slug: "nope".into()
			}
		);
		assert!(store().all_items("photos").unwrap().is_empty());
	}

	#[test]
	fn embedded_content_parses() {
		let store = ContentStore::embedded();
		for collection in ["blog", "notes", "reviews"] {
			assert!(!store.all_items(collection).unwrap().is_empty());
		}
		let skills = skills::load_skills(skills::SKILLS_CSV).unwrap();
		assert!(skills.len() > 20);
	}
}
