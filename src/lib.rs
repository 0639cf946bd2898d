//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod browser;
mod components;
mod config;
mod error;
mod loadable;
mod pages;
pub mod session;

// Top-Level pages
use crate::pages::login::Login;
use crate::pages::not_found::NotFound;
use crate::pages::register::Register;
use crate::pages::workspace::ProtectedWorkspace;
use crate::session::{Session, provide_session};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized (api: {})", config::api_base());
}

/// An app router which renders the auth screens and the research workspace
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_session(Session::browser());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="R.A.M.A Research Assistant" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Login />
				<Route path=path!("/register") view=Register />
				<Route path=path!("/workspace") view=ProtectedWorkspace />
			</Routes>
		</Router>
	}
}
