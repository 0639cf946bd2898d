//! Build-time settings for the client.

use std::time::Duration;

/// Backend origin used when `RAMA_API_BASE` is not set at compile time.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// `localStorage` key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// How long the register page shows its success message before leaving.
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Route a signed-out visitor lands on.
pub const ENTRY_ROUTE: &str = "/";

/// Route reached after a successful login.
pub const WORKSPACE_ROUTE: &str = "/workspace";

/// Backend origin without a trailing slash.
pub fn api_base() -> &'static str {
	option_env!("RAMA_API_BASE")
		.filter(|base| !base.trim().is_empty())
		.unwrap_or(DEFAULT_API_BASE)
		.trim_end_matches('/')
}

/// Absolute URL for an API path such as `/api/auth/login`.
pub fn endpoint(path: &str) -> String {
	join_url(api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
	format!(
		"{}/{}",
		base.trim_end_matches('/'),
		path.trim_start_matches('/')
	)
}
