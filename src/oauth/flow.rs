// ABOUTME: Callback state machine shared by all OAuth providers
// ABOUTME: Validates the anti-CSRF state, runs the code exchange once, and builds redirect fragments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! # Callback State Machine
//!
//! One authorization attempt moves through
//! `AWAITING_CALLBACK -> STATE_VALIDATED -> TOKEN_EXCHANGED -> COMPLETE`,
//! or terminally to `STATE_REJECTED` when the returned state does not match
//! the stored cookie. Rejection never reaches the token endpoint: the cookie
//! is cleared and the browser is sent back to the application root with an
//! error fragment. Tokens always travel in the URL fragment, never the query
//! string, so they stay out of server logs.

use crate::constants::oauth::STATE_COOKIE_MAX_AGE_SECS;
use crate::oauth::{OAuthError, OAuthProvider, TokenPair};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::{info, warn};

/// Terminal outcome of one callback
#[derive(Debug)]
pub enum CallbackDisposition {
    /// State validation failed; no token exchange was attempted
    Rejected,
    /// State validated and the code exchanged exactly once
    Completed(TokenPair),
}

/// Run the callback state machine for one provider
///
/// The state check gates the exchange: a missing cookie, a missing returned
/// state, or any mismatch is terminal. Only a validated state proceeds to the
/// single code-exchange call.
///
/// # Errors
///
/// Returns an error when the state validated but the callback carried no
/// code, or when the exchange itself failed
pub async fn run_callback(
    provider: &dyn OAuthProvider,
    stored_state: Option<&str>,
    returned_state: Option<&str>,
    code: Option<&str>,
) -> Result<CallbackDisposition, OAuthError> {
    let validated = matches!(
        (stored_state, returned_state),
        (Some(stored), Some(returned)) if stored == returned
    );

    if !validated {
        warn!(
            provider = provider.name(),
            cookie_present = stored_state.is_some(),
            state_present = returned_state.is_some(),
            "rejecting callback: state mismatch"
        );
        return Ok(CallbackDisposition::Rejected);
    }

    let code = code.ok_or(OAuthError::MissingAuthorizationCode)?;
    let pair = provider.exchange_code(code).await?;

    info!(provider = provider.name(), "authorization code exchanged");
    Ok(CallbackDisposition::Completed(pair))
}

/// Build the state cookie set when issuing an authorization redirect
#[must_use]
pub fn state_cookie(name: &'static str, state: String) -> Cookie<'static> {
    Cookie::build((name, state))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(STATE_COOKIE_MAX_AGE_SECS))
        .build()
}

/// Clear the state cookie, consuming the nonce
#[must_use]
pub fn clear_state_cookie(jar: CookieJar, name: &'static str) -> CookieJar {
    jar.remove(Cookie::build((name, "")).path("/").build())
}

/// Fragment carrying tokens back to the application root
///
/// Fragment placement (never query-string) keeps tokens out of server logs.
#[must_use]
pub fn token_fragment(pair: &TokenPair) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("access_token", &pair.access_token);
    if let Some(refresh_token) = &pair.refresh_token {
        serializer.append_pair("refresh_token", refresh_token);
    }
    serializer.finish()
}

/// Fragment signalling a rejected callback
#[must_use]
pub const fn error_fragment() -> &'static str {
    "error=state_mismatch"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_fragment_with_refresh() {
        let pair = TokenPair {
            access_token: "AT".into(),
            refresh_token: Some("RT".into()),
            expires_in: Some(3600),
        };
        assert_eq!(token_fragment(&pair), "access_token=AT&refresh_token=RT");
    }

    #[test]
    fn test_token_fragment_without_refresh() {
        let pair = TokenPair {
            access_token: "AT".into(),
            refresh_token: None,
            expires_in: None,
        };
        assert_eq!(token_fragment(&pair), "access_token=AT");
    }

    #[test]
    fn test_token_fragment_is_url_encoded() {
        let pair = TokenPair {
            access_token: "a t+k".into(),
            refresh_token: None,
            expires_in: None,
        };
        assert_eq!(token_fragment(&pair), "access_token=a+t%2Bk");
    }

    #[test]
    fn test_state_cookie_attributes() {
        let cookie = state_cookie("spotify_auth_state", "abc123".into());
        assert_eq!(cookie.name(), "spotify_auth_state");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(STATE_COOKIE_MAX_AGE_SECS))
        );
    }
}
