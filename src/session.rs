//! Stored credential, passed down as an explicit context object.

use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use log::{debug, info, warn};

use crate::config::{ENTRY_ROUTE, TOKEN_STORAGE_KEY};

/// Where the bearer token lives between page loads.
pub trait TokenStore: Send + Sync {
	/// Read the token; blank values count as absent.
	fn load(&self) -> Option<String>;
	/// Persist the token.
	fn save(&self, token: &str);
	/// Forget the token.
	fn clear(&self);
}

/// Browser `localStorage` under a fixed key.
#[derive(Clone, Copy, Debug)]
pub struct LocalStorageStore {
	key: &'static str,
}

impl LocalStorageStore {
	/// Store under `key`.
	pub const fn new(key: &'static str) -> Self {
		Self { key }
	}
}

impl Default for LocalStorageStore {
	fn default() -> Self {
		Self::new(TOKEN_STORAGE_KEY)
	}
}

fn local_storage() -> Option<web_sys::Storage> {
	web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorageStore {
	fn load(&self) -> Option<String> {
		local_storage()?
			.get_item(self.key)
			.ok()
			.flatten()
			.filter(|t| !t.trim().is_empty())
	}

	fn save(&self, token: &str) {
		match local_storage() {
			Some(storage) => {
				if storage.set_item(self.key, token).is_err() {
					warn!("localStorage rejected the session token");
				}
			}
			None => warn!("localStorage unavailable; session will not survive a reload"),
		}
	}

	fn clear(&self) {
		if let Some(storage) = local_storage() {
			let _ = storage.remove_item(self.key);
		}
	}
}

/// In-process store, for tests and storage-less environments.
#[derive(Debug, Default)]
pub struct MemoryStore(Mutex<Option<String>>);

impl MemoryStore {
	/// A store already holding `token`.
	pub fn with_token(token: impl Into<String>) -> Self {
		Self(Mutex::new(Some(token.into())))
	}
}

impl TokenStore for MemoryStore {
	fn load(&self) -> Option<String> {
		self.0
			.lock()
			.ok()
			.and_then(|t| t.clone())
			.filter(|t| !t.trim().is_empty())
	}

	fn save(&self, token: &str) {
		if let Ok(mut slot) = self.0.lock() {
			*slot = Some(token.to_owned());
		}
	}

	fn clear(&self) {
		if let Ok(mut slot) = self.0.lock() {
			*slot = None;
		}
	}
}

/// Outcome of checking a protected view on mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
	/// A token is present.
	Authorized,
	/// No token; the visitor is sent to the entry route.
	Redirected,
}

impl GateState {
	/// Presence alone decides; there is no expiry check.
	pub fn from_token(token: Option<&str>) -> Self {
		match token {
			Some(t) if !t.trim().is_empty() => GateState::Authorized,
			_ => GateState::Redirected,
		}
	}
}

/// Authentication state shared by every page.
#[derive(Clone)]
pub struct Session {
	store: Arc<dyn TokenStore>,
	token: RwSignal<Option<String>>,
}

impl Session {
	/// Wrap `store`, seeding the reactive token from it.
	pub fn new(store: Arc<dyn TokenStore>) -> Self {
		let token = RwSignal::new(store.load());
		Self { store, token }
	}

	/// Session over the browser's `localStorage`.
	pub fn browser() -> Self {
		Self::new(Arc::new(LocalStorageStore::default()))
	}

	/// Re-read the store once and report whether the view may render.
	pub fn check(&self) -> GateState {
		let stored = self.store.load();
		let state = GateState::from_token(stored.as_deref());
		self.token.set(stored);
		debug!("session gate: {state:?}");
		state
	}

	/// Current token without subscribing.
	pub fn token(&self) -> Option<String> {
		self.token.get_untracked()
	}

	/// Reactive "signed in" flag.
	pub fn is_signed_in(&self) -> bool {
		self.token.with(|t| t.is_some())
	}

	/// Persist a freshly issued token.
	pub fn sign_in(&self, token: String) {
		self.store.save(&token);
		self.token.set(Some(token));
		info!("session started");
	}

	/// Drop the token everywhere.
	pub fn sign_out(&self) {
		self.store.clear();
		self.token.set(None);
		info!("session cleared");
	}
}

/// Install `session` for the subtree.
pub fn provide_session(session: Session) {
	provide_context(session);
}

/// The session installed by [`provide_session`].
pub fn use_session() -> Session {
	expect_context::<Session>()
}

/// Renders `children` only while a token is present; otherwise redirects.
#[component]
pub fn Protected(
	/// Content shown only to a signed-in visitor.
	children: ChildrenFn,
) -> impl IntoView {
	let session = use_session();
	let navigate = use_navigate();
	session.check();

	let gate = session.clone();
	Effect::new(move |_| {
		if !gate.is_signed_in() {
			navigate(
				ENTRY_ROUTE,
				NavigateOptions {
					replace: true,
					..Default::default()
				},
			);
		}
	});

	move || session.is_signed_in().then(|| children())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gate_depends_on_presence_only() {
		assert_eq!(GateState::from_token(None), GateState::Redirected);
		assert_eq!(GateState::from_token(Some("")), GateState::Redirected);
		assert_eq!(GateState::from_token(Some("x")), GateState::Authorized);
	}

	#[test]
	fn memory_store_round_trips_and_clears() {
		let store = MemoryStore::default();
		assert_eq!(store.load(), None);
		store.save("abc");
		assert_eq!(store.load().as_deref(), Some("abc"));
		store.clear();
		assert_eq!(store.load(), None);
	}

	#[test]
	fn seeded_store_authorizes_immediately() {
		let session = Session::new(Arc::new(MemoryStore::with_token("seed")));
		assert!(session.is_signed_in());
		assert_eq!(session.check(), GateState::Authorized);
	}

	#[test]
	fn empty_store_redirects() {
		let session = Session::new(Arc::new(MemoryStore::default()));
		assert_eq!(session.check(), GateState::Redirected);
		assert!(session.token().is_none());
	}

	#[test]
	fn sign_in_then_out() {
		let store = Arc::new(MemoryStore::default());
		let session = Session::new(store.clone());
		session.sign_in("tok".into());
		assert_eq!(store.load().as_deref(), Some("tok"));
		assert_eq!(session.check(), GateState::Authorized);

		session.sign_out();
		assert_eq!(store.load(), None);
		assert_eq!(session.check(), GateState::Redirected);
	}

	#[test]
	fn check_picks_up_tokens_written_elsewhere() {
		let store = Arc::new(MemoryStore::default());
		let session = Session::new(store.clone());
		assert!(session.token().is_none());
		store.save("late");
		assert_eq!(session.check(), GateState::Authorized);
		assert_eq!(session.token().as_deref(), Some("late"));
	}
}
