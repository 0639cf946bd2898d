use gloo_net::http::{Request, Response};
use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{Credentials, ResearchQuery, ResearchResponse, TokenResponse};
use crate::config;
use crate::error::{ApiError, Result};

const REGISTER_PATH: &str = "/api/auth/register";
const LOGIN_PATH: &str = "/api/auth/login";
const QUERY_PATH: &str = "/api/research/query";

/// Create an account. Any 2xx answer counts as success.
pub async fn register(credentials: &Credentials) -> Result<()> {
	send(REGISTER_PATH, credentials, None).await?;
	info!("account registered");
	Ok(())
}

/// Exchange credentials for a bearer token.
pub async fn login(credentials: &Credentials) -> Result<String> {
	let resp = send(LOGIN_PATH, credentials, None).await?;
	let body: TokenResponse = decode(resp).await?;
	let token = token_from_response(body)?;
	info!("login accepted");
	Ok(token)
}

/// Submit a research prompt; `token` is forwarded as a bearer credential.
pub async fn research_query(query: &ResearchQuery, token: Option<&str>) -> Result<ResearchResponse> {
	let resp = send(QUERY_PATH, query, token).await?;
	let body: ResearchResponse = decode(resp).await?;
	info!(
		"research query returned {} papers (mindmap: {}, citations: {})",
		body.papers.len(),
		body.diagram().is_some(),
		body.automated_citations.is_some()
	);
	Ok(body)
}

/// Pull the token out of a login answer; missing or blank is a failure.
pub fn token_from_response(body: TokenResponse) -> Result<String> {
	match body.access_token {
		Some(token) if !token.trim().is_empty() => Ok(token),
		_ => Err(ApiError::MissingToken),
	}
}

/// Map an error status and its raw body to an [`ApiError`].
pub fn error_from_body(status: u16, body: &str) -> ApiError {
	let detail = serde_json::from_str::<Value>(body)
		.ok()
		.and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_owned));
	match detail {
		Some(detail) => ApiError::Server { status, detail },
		None => ApiError::Unexpected(format!("HTTP {status} without a detail message")),
	}
}

async fn send<B: Serialize>(path: &str, body: &B, token: Option<&str>) -> Result<Response> {
	let url = config::endpoint(path);
	let mut request = Request::post(&url);
	if let Some(token) = token {
		request = request.header("Authorization", &format!("Bearer {token}"));
	}
	let request = request
		.json(body)
		.map_err(|e| ApiError::Unexpected(e.to_string()))?;

	let resp = request.send().await.map_err(|e| {
		warn!("POST {url} failed before a response: {e}");
		from_transport(e)
	})?;

	if resp.ok() {
		return Ok(resp);
	}
	let status = resp.status();
	let text = resp.text().await.unwrap_or_default();
	let err = error_from_body(status, &text);
	warn!("POST {url} -> {status}: {err:?}");
	Err(err)
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
	resp.json::<T>().await.map_err(|e| {
		warn!("undecodable response from {}: {e}", resp.url());
		ApiError::Unexpected(e.to_string())
	})
}

fn from_transport(err: gloo_net::Error) -> ApiError {
	match err {
		// fetch rejects only when no response arrived
		gloo_net::Error::JsError(_) => ApiError::Unreachable,
		other => ApiError::Unexpected(other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::MISSING_TOKEN_MESSAGE;

	#[test]
	fn detail_string_is_surfaced() {
		let err = error_from_body(400, r#"{"detail":"Email already registered"}"#);
		assert_eq!(
			err,
			ApiError::Server {
				status: 400,
				detail: "Email already registered".into()
			}
		);
		assert_eq!(err.user_message(), "Email already registered");
	}

	#[test]
	fn structured_or_missing_detail_falls_back() {
		let validation = r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#;
		assert!(matches!(
			error_from_body(422, validation),
			ApiError::Unexpected(_)
		));
		assert!(matches!(
			error_from_body(500, "Internal Server Error"),
			ApiError::Unexpected(_)
		));
		assert!(matches!(error_from_body(502, ""), ApiError::Unexpected(_)));
	}

	#[test]
	fn login_without_token_is_rejected() {
		let body: TokenResponse = serde_json::from_str(r#"{"token_type":"bearer"}"#).unwrap();
		let err = token_from_response(body).unwrap_err();
		assert_eq!(err, ApiError::MissingToken);
		assert_eq!(err.user_message(), MISSING_TOKEN_MESSAGE);
	}

	#[test]
	fn blank_token_is_rejected() {
		let body = TokenResponse {
			access_token: Some("  ".into()),
			token_type: Some("bearer".into()),
		};
		assert_eq!(token_from_response(body), Err(ApiError::MissingToken));
	}

	#[test]
	fn token_is_returned_verbatim() {
		let body: TokenResponse =
			serde_json::from_str(r#"{"access_token":"abc.def.ghi","token_type":"bearer"}"#)
				.unwrap();
		assert_eq!(token_from_response(body).unwrap(), "abc.def.ghi");
	}
	#[test]
	fn transport_errors_besides_fetch_are_unexpected() {
		let err = from_transport(gloo_net::Error::GlooError("body already used".into()));
		assert!(matches!(err, ApiError::Unexpected(ref msg) if msg.contains("body already used")));
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
	use wasm_bindgen_test::*;

	use super::*;
	use crate::error::UNREACHABLE_MESSAGE;

	#[wasm_bindgen_test]
	fn rejected_fetch_reads_as_unreachable() {
		let rejected = js_sys::Error::new("NetworkError when attempting to fetch resource.");
		let err = from_transport(gloo_net::Error::JsError(rejected.into()));
		assert_eq!(err, ApiError::Unreachable);
		assert_eq!(err.user_message(), UNREACHABLE_MESSAGE);
	}
}
