use serde::Deserialize;

use super::ContentError;

/// Metadata block at the top of a markdown item.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FrontMatter {
	pub title: Option<String>,
	pub date: Option<String>,
	pub summary: Option<String>,
	#[serde(default)]
	pub tags: Vec<String>,
}

/// Split `source` into its front matter and markdown body.
///
/// A document without a leading `---` line has empty front matter. An
/// opening fence without a closing one is an error.
pub fn split(source: &str) -> Result<(FrontMatter, &str), ContentError> {
	let source = source.strip_prefix('\u{feff}').unwrap_or(source);
	let Some(rest) = source
		.strip_prefix("---\n")
		.or_else(|| source.strip_prefix("---\r\n"))
	else {
		return Ok((FrontMatter::default(), source));
	};

	let mut offset = 0;
	for line in rest.split_inclusive('\n') {
		if line.trim_end() == "---" {
			let yaml = &rest[..offset];
			let body = &rest[offset + line.len()..];
			let meta = if yaml.trim().is_empty() {
				FrontMatter::default()
			} else {
				serde_yaml::from_str(yaml).map_err(|err| ContentError::FrontMatterYaml {
					message: err.to_string(),
				})?
			};
			return Ok((meta, body));
		}
		offset += line.len();
	}
	Err(ContentError::MalformedFrontMatter)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_fields_and_body() {
		let src = "---\ntitle: Hello\ndate: \"2024-01-02\"\ntags: [a, b]\n---\n# Body\n";
		let (meta, body) = split(src).unwrap();
		assert_eq!(meta.title.as_deref(), Some("Hello"));
		assert_eq!(meta.date.as_deref(), Some("2024-01-02"));
		assert_eq!(meta.summary, None);
		assert_eq!(meta.tags, ["a", "b"]);
		assert_eq!(body, "# Body\n");
	}

	#[test]
	fn plain_markdown_has_no_front_matter() {
		let (meta, body) = split("just text").unwrap();
		assert_eq!(meta, FrontMatter::default());
		assert_eq!(body, "just text");
	}

	#[test]
	fn unterminated_block_is_rejected() {
		assert!(matches!(
			split("---\ntitle: x\n"),
			Err(ContentError::MalformedFrontMatter)
		));
	}

	#[test]
	fn bad_yaml_is_reported() {
		assert!(matches!(
			split("---\ntags: [unclosed\n---\n"),
			Err(ContentError::FrontMatterYaml { .. })
		));
	}
}
