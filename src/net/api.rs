//! Authentication API calls and shared HTTP plumbing.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the
//! same-origin `/api` prefix; the session cookie is HTTP-only and rides
//! along automatically. Server-side/native: stubs returning a network error
//! so callers degrade without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Auth endpoints return the raw `serde_json::Value` body so the identity
//! decode stays a separate, testable step (`types::decode_identity`).

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::ApiError;
use super::types::{Credentials, NewAccount};
use serde_json::Value;

pub const SIGNIN_ENDPOINT: &str = "/api/auth/signin";
pub const SIGNOUT_ENDPOINT: &str = "/api/auth/signout";
pub const SIGNUP_ENDPOINT: &str = "/api/auth/signup";
pub const CURRENT_USER_ENDPOINT: &str = "/api/auth/current-user";

/// Error used by every stubbed call outside the browser.
#[cfg(any(test, not(feature = "hydrate")))]
pub(crate) fn offline_error() -> ApiError {
    ApiError::Network("not available outside the browser".to_owned())
}

/// Build the [`ApiError`] for a non-success HTTP response, preferring the
/// backend's own `message`/`error` text over the bare status line.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn status_error(status: u16, status_text: &str, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| status_text.to_owned());
    ApiError::Status { status, message }
}

/// GET `url` and deserialize the JSON body.
#[cfg(feature = "hydrate")]
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

/// POST `body` as JSON to `url` and deserialize the JSON response body.
#[cfg(feature = "hydrate")]
pub(crate) async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

/// PUT `body` as JSON to `url` and deserialize the JSON response body.
#[cfg(feature = "hydrate")]
pub(crate) async fn put_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::put(url)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let status_text = resp.status_text();
        let body = resp.text().await.unwrap_or_default();
        return Err(status_error(status, &status_text, &body));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Network(e.to_string()))
}

/// Exchange credentials for a cookie-backed session.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or credential rejection.
pub async fn sign_in(credentials: &Credentials) -> Result<Value, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_json(SIGNIN_ENDPOINT, credentials).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = credentials;
        Err(offline_error())
    }
}

/// Invalidate the server-side session. Best-effort for callers: local
/// session teardown must not depend on this succeeding.
///
/// # Errors
///
/// Returns [`ApiError`] when the request fails; callers log and move on.
pub async fn sign_out() -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(SIGNOUT_ENDPOINT)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let status_text = resp.status_text();
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &status_text, &body));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(offline_error())
    }
}

/// Create a new account. Does not authenticate it.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or server-side rejection
/// (duplicate username, weak password, ...).
pub async fn sign_up(account: &NewAccount) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let _body: Value = post_json(SIGNUP_ENDPOINT, account).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = account;
        Err(offline_error())
    }
}

/// Look up the identity behind the session cookie.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure; a 401 means no live session.
pub async fn fetch_current_user() -> Result<Value, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        get_json(CURRENT_USER_ENDPOINT).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(offline_error())
    }
}
