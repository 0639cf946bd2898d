use leptos::prelude::*;

use crate::loadable::Loadable;

/// Render `ready` for a ready value, or the shared loading/absent notes.
pub fn loadable_view<T, V>(state: Loadable<T>, what: &'static str, ready: impl FnOnce(T) -> V) -> AnyView
where
	V: IntoView + 'static,
{
	match state {
		Loadable::Loading => view! {
			<div class="panel-loading">
				<div class="spinner"></div>
				<p>{format!("Generating {what}...")}</p>
			</div>
		}
		.into_any(),
		Loadable::Absent => view! {
			<p class="panel-empty">{format!("No {what} for this query yet.")}</p>
		}
		.into_any(),
		Loadable::Ready(value) => ready(value).into_any(),
	}
}

/// Bulleted list; renders nothing for an empty slice.
pub fn bullet_list(title: &'static str, items: Vec<String>) -> impl IntoView {
	(!items.is_empty()).then(|| {
		view! {
			<h4>{title}</h4>
			<ul>{items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}</ul>
		}
	})
}
