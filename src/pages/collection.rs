use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use log::warn;

use crate::content::{ContentStore, ItemMeta};
use crate::pages::not_found::NotFound;

/// A browsable markdown collection and its heading.
pub struct Collection {
	pub key: &'static str,
	pub title: &'static str,
	pub blurb: &'static str,
}

/// Every collection linked from the home page except the skills board.
pub const COLLECTIONS: &[Collection] = &[
	Collection {
		key: "blog",
		title: "杂谈 / Essay Log",
		blurb: "随手写下的长短文章。",
	},
	Collection {
		key: "food",
		title: "餐车 / 家庭餐厅",
		blurb: "做过的菜和吃过的店。",
	},
	Collection {
		key: "music",
		title: "音乐精选集 / Mix Tape",
		blurb: "循环播放中的歌单。",
	},
	Collection {
		key: "notes",
		title: "学习笔记 & 点子 / Notes",
		blurb: "学习过程中的笔记和零散的想法。",
	},
	Collection {
		key: "photos",
		title: "摄影作品 / Photo Orbit",
		blurb: "镜头里的瞬间。",
	},
	Collection {
		key: "reviews",
		title: "影视 / 游戏锐评",
		blurb: "看过的片子和玩过的游戏。",
	},
	Collection {
		key: "stash",
		title: "吊图合集 / Image Stash",
		blurb: "存下来的有趣图片。",
	},
];

pub fn find_collection(key: &str) -> Option<&'static Collection> {
	COLLECTIONS.iter().find(|c| c.key == key)
}

fn tag_list(tags: Vec<String>) -> impl IntoView {
	let tags = tags
		.into_iter()
		.map(|tag| view! { <span class="item-tag">{tag}</span> })
		.collect_view();
	view! { <div class="item-tags">{tags}</div> }
}

fn item_card(collection: &'static str, meta: ItemMeta) -> impl IntoView {
	view! {
		<li class="item-card">
			<a href=format!("/{collection}/{}", meta.slug)>
				<h3>{meta.title}</h3>
			</a>
			{meta.date.map(|d| view! { <time class="item-date">{d}</time> })}
			{meta.summary.map(|s| view! { <p class="item-summary">{s}</p> })}
			{tag_list(meta.tags)}
		</li>
	}
}

fn collection_view(key: &str) -> AnyView {
	let Some(collection) = find_collection(key) else {
		return view! { <NotFound /> }.into_any();
	};
	let items = match ContentStore::embedded().all_items(collection.key) {
		Ok(items) => items,
		Err(err) => {
			warn!("failed to list {}: {err}", collection.key);
			Vec::new()
		}
	};

	let list = if items.is_empty() {
		view! { <p class="collection-empty">"这里还什么都没有。"</p> }.into_any()
	} else {
		let cards = items.into_iter().map(|meta| item_card(collection.key, meta)).collect_view();
		view! { <ul class="collection-list">{cards}</ul> }.into_any()
	};

	view! {
		<div class="collection-page">
			<a class="back-link" href="/">"← Cosmos"</a>
			<h1>{collection.title}</h1>
			<p class="subtitle">{collection.blurb}</p>
			{list}
		</div>
	}
	.into_any()
}

fn item_view(key: &str, slug: &str) -> AnyView {
	let Some(collection) = find_collection(key) else {
		return view! { <NotFound /> }.into_any();
	};
	let item = match ContentStore::embedded().item(collection.key, slug) {
		Ok(item) => item,
		Err(err) => {
			warn!("{err}");
			return view! { <NotFound /> }.into_any();
		}
	};

	view! {
		<article class="item-page">
			<a class="back-link" href=format!("/{}", collection.key)>
				{format!("← {}", collection.title)}
			</a>
			<h1>{item.meta.title}</h1>
			{item.meta.date.map(|d| view! { <time class="item-date">{d}</time> })}
			{tag_list(item.meta.tags)}
			<div class="item-body" inner_html=item.content_html />
		</article>
	}
	.into_any()
}

/// Listing of one collection, newest first.
#[component]
pub fn CollectionPage() -> impl IntoView {
	let params = use_params_map();
	move || {
		let key = params.read().get("collection").unwrap_or_default();
		collection_view(&key)
	}
}

/// A single rendered markdown item.
#[component]
pub fn ItemPage() -> impl IntoView {
	let params = use_params_map();
	move || {
		let map = params.read();
		let key = map.get("collection").unwrap_or_default();
		let slug = map.get("slug").unwrap_or_default();
		drop(map);
		item_view(&key, &slug)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collections_cover_the_home_icons() {
		for key in ["blog", "food", "music", "notes", "photos", "reviews", "stash"] {
			assert!(find_collection(key).is_some(), "{key}");
		}
		assert!(find_collection("skills").is_none());
	}

	#[test]
	fn embedded_items_belong_to_known_collections() {
		let store = ContentStore::embedded();
		for collection in COLLECTIONS {
			assert!(store.all_items(collection.key).is_ok());
		}
	}
}
