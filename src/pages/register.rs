use gloo_timers::future::TimeoutFuture;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use log::warn;

use crate::api::{self, Credentials};
use crate::config::{ENTRY_ROUTE, REGISTER_REDIRECT_DELAY};

/// Check the form before anything is sent.
pub fn validate_registration(email: &str, password: &str, confirm: &str) -> Result<(), &'static str> {
	if !email.contains('@') {
		return Err("Please enter a valid email address.");
	}
	if password.is_empty() {
		return Err("Please enter a password.");
	}
	if password != confirm {
		return Err("Passwords do not match.");
	}
	Ok(())
}

#[component]
pub fn Register() -> impl IntoView {
	let navigate = use_navigate();

	let email = RwSignal::new(String::new());
	let password = RwSignal::new(String::new());
	let confirm = RwSignal::new(String::new());
	let loading = RwSignal::new(false);
	let error = RwSignal::new(Option::<String>::None);
	let success = RwSignal::new(Option::<String>::None);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if loading.get_untracked() {
			return;
		}
		let credentials = Credentials {
			email: email.get_untracked().trim().to_owned(),
			password: password.get_untracked(),
		};
		if let Err(msg) =
			validate_registration(&credentials.email, &credentials.password, &confirm.get_untracked())
		{
			error.set(Some(msg.to_owned()));
			return;
		}
		loading.set(true);
		error.set(None);
		success.set(None);

		let navigate = navigate.clone();
		spawn_local(async move {
			let result = api::register(&credentials).await;
			loading.set(false);
			match result {
				Ok(()) => {
					success.set(Some("Registration successful! Redirecting to login...".into()));
					TimeoutFuture::new(REGISTER_REDIRECT_DELAY.as_millis() as u32).await;
					navigate(ENTRY_ROUTE, Default::default());
				}
				Err(e) => {
					warn!("registration failed: {e:?}");
					error.set(Some(e.user_message()));
				}
			}
		});
	};

	view! {
		<main class="auth-page">
			<form class="auth-card" on:submit=on_submit>
				<h1>"Create account"</h1>
				<label>
					"Email" <input type="email" required autocomplete="email" bind:value=email />
				</label>
				<label>
					"Password"
					<input type="password" required autocomplete="new-password" bind:value=password />
				</label>
				<label>
					"Confirm password"
					<input type="password" required autocomplete="new-password" bind:value=confirm />
				</label>
				{move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
				{move || success.get().map(|s| view! { <p class="form-success">{s}</p> })}
				<button type="submit" disabled=move || loading.get() || success.get().is_some()>
					{move || if loading.get() { "Creating account..." } else { "Register" }}
				</button>
				<p class="switch">"Already registered? " <A href="/">"Sign in"</A></p>
			</form>
		</main>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn registration_form_rules() {
		assert_eq!(validate_registration("a@b.c", "secret1", "secret1"), Ok(()));
		assert!(validate_registration("nope", "secret1", "secret1").is_err());
		// the backend sets no length rule, so neither does the form
		assert_eq!(validate_registration("a@b.c", "1", "1"), Ok(()));
		assert_eq!(
			validate_registration("a@b.c", "", ""),
			Err("Please enter a password.")
		);
		assert_eq!(
			validate_registration("a@b.c", "secret1", "secret2"),
			Err("Passwords do not match.")
		);
	}
}
