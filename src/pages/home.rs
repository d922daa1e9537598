use leptos::prelude::*;

use crate::components::floating_icons::FloatingIconsField;

/// Landing page: the floating navigation icons.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="fullscreen-field">
			<FloatingIconsField />
		</div>
	}
}
