use leptos::prelude::*;
use leptos_router::components::A;

/// 404 - Not Found
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main class="auth-page">
			<h1>"Page not found"</h1>
			<A href="/">"Back to sign in"</A>
		</main>
	}
}
