use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use log::warn;

use crate::api::{self, Credentials};
use crate::config::WORKSPACE_ROUTE;
use crate::error::Result;
use crate::session::use_session;

/// What the form does with a login answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
	/// Store the token and go to the workspace.
	Enter(String),
	/// Stay on the form and show the message.
	Show(String),
}

pub fn login_outcome(result: Result<String>) -> LoginOutcome {
	match result {
		Ok(token) => LoginOutcome::Enter(token),
		Err(e) => {
			warn!("login failed: {e:?}");
			LoginOutcome::Show(e.user_message())
		}
	}
}

/// Entry route: email/password sign-in.
#[component]
pub fn Login() -> impl IntoView {
	let session = use_session();
	let navigate = use_navigate();

	let email = RwSignal::new(String::new());
	let password = RwSignal::new(String::new());
	let loading = RwSignal::new(false);
	let error = RwSignal::new(Option::<String>::None);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if loading.get_untracked() {
			return;
		}
		let credentials = Credentials {
			email: email.get_untracked().trim().to_owned(),
			password: password.get_untracked(),
		};
		loading.set(true);
		error.set(None);

		let (session, navigate) = (session.clone(), navigate.clone());
		spawn_local(async move {
			match login_outcome(api::login(&credentials).await) {
				LoginOutcome::Enter(token) => {
					session.sign_in(token);
					navigate(WORKSPACE_ROUTE, Default::default());
				}
				LoginOutcome::Show(msg) => error.set(Some(msg)),
			}
			loading.set(false);
		});
	};

	view! {
		<main class="auth-page">
			<form class="auth-card" on:submit=on_submit>
				<h1>"R.A.M.A"</h1>
				<p class="subtitle">"Sign in to your research workspace"</p>
				<label>
					"Email" <input type="email" required autocomplete="email" bind:value=email />
				</label>
				<label>
					"Password"
					<input type="password" required autocomplete="current-password" bind:value=password />
				</label>
				{move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
				<button type="submit" disabled=move || loading.get()>
					{move || if loading.get() { "Signing in..." } else { "Sign in" }}
				</button>
				<p class="switch">"No account yet? " <A href="/register">"Create one"</A></p>
			</form>
		</main>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::client::{error_from_body, token_from_response};
	use crate::api::types::TokenResponse;
	use crate::error::{ApiError, MISSING_TOKEN_MESSAGE, UNREACHABLE_MESSAGE};

	#[test]
	fn ok_without_token_stays_on_the_form() {
		let body: TokenResponse = serde_json::from_str(r#"{"token_type":"bearer"}"#).unwrap();
		assert_eq!(
			login_outcome(token_from_response(body)),
			LoginOutcome::Show(MISSING_TOKEN_MESSAGE.into())
		);
	}

	#[test]
	fn token_enters_the_workspace() {
		assert_eq!(login_outcome(Ok("t".into())), LoginOutcome::Enter("t".into()));
	}

	#[test]
	fn failures_show_their_message() {
		assert_eq!(
			login_outcome(Err(ApiError::Unreachable)),
			LoginOutcome::Show(UNREACHABLE_MESSAGE.into())
		);
		assert_eq!(
			login_outcome(Err(error_from_body(
				401,
				r#"{"detail":"Incorrect email or password"}"#
			))),
			LoginOutcome::Show("Incorrect email or password".into())
		);
	}
}
