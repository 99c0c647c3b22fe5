//! Execution context for protected procedures
//!
//! Credential issuance lives elsewhere. This module only turns an
//! `Authorization: Bearer <token>` header into an [`Authenticated`]
//! capability by asking the configured [`Authenticator`]. Protected
//! procedures take `Authenticated` as an argument, so they cannot run
//! without one, and the only way to obtain one is through an authenticator.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::server::AppState;

/// Environment variable with comma-separated API tokens
pub const TOKENS_ENV: &str = "ACME_API_TOKENS";

/// Identity of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
}

/// Verifies bearer tokens
pub trait Authenticator: Send + Sync {
    /// Identity for `token`, or `None` if the token is not valid.
    fn authenticate(&self, token: &str) -> Option<Principal>;
}

/// Proof that the current call was authenticated.
///
/// Has no public constructor.
#[derive(Debug, Clone)]
pub struct Authenticated {
    principal: Principal,
}

impl Authenticated {
    /// Check a raw `Authorization` header value.
    pub fn verify(authenticator: &dyn Authenticator, header: Option<&str>) -> Option<Self> {
        let token = header?.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            return None;
        }
        authenticator
            .authenticate(token)
            .map(|principal| Self { principal })
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn subject(&self) -> &str {
        &self.principal.subject
    }
}

impl FromRequestParts<Arc<AppState>> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        Self::verify(state.authenticator.as_ref(), header).ok_or_else(|| {
            tracing::debug!("rejected unauthenticated call to protected procedure");
            ApiError::Unauthorized
        })
    }
}

/// Fixed list of accepted tokens.
///
/// With no tokens configured every protected call is rejected.
#[derive(Default)]
pub struct StaticTokenAuthenticator {
    tokens: Vec<String>,
}

impl StaticTokenAuthenticator {
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::<String>::into)
                .filter(|t| !t.trim().is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated token list.
    pub fn from_list(list: &str) -> Self {
        Self::new(list.split(',').map(str::trim))
    }

    /// Load from `ACME_API_TOKENS`.
    pub fn from_env() -> Self {
        std::env::var(TOKENS_ENV)
            .map(|list| Self::from_list(&list))
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Debug for StaticTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenAuthenticator")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

impl Authenticator for StaticTokenAuthenticator {
    fn authenticate(&self, token: &str) -> Option<Principal> {
        self.tokens
            .iter()
            .position(|known| constant_time_eq(known.as_bytes(), token.as_bytes()))
            .map(|index| Principal {
                subject: format!("api-token-{}", index),
            })
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authn() -> StaticTokenAuthenticator {
        StaticTokenAuthenticator::from_list("alpha, beta,,")
    }

    #[test]
    fn parses_token_list() {
        let a = authn();
        assert!(!a.is_empty());
        assert_eq!(a.authenticate("beta").unwrap().subject, "api-token-1");
        assert!(a.authenticate("").is_none());
    }

    #[test]
    fn verify_requires_bearer_scheme() {
        let a = authn();
        assert!(Authenticated::verify(&a, Some("Bearer alpha")).is_some());
        assert!(Authenticated::verify(&a, Some("Basic alpha")).is_none());
        assert!(Authenticated::verify(&a, Some("alpha")).is_none());
        assert!(Authenticated::verify(&a, Some("Bearer ")).is_none());
        assert!(Authenticated::verify(&a, None).is_none());
    }

    #[test]
    fn rejects_unknown_token() {
        assert!(Authenticated::verify(&authn(), Some("Bearer gamma")).is_none());
    }

    #[test]
    fn empty_authenticator_rejects_everything() {
        let a = StaticTokenAuthenticator::default();
        assert!(a.is_empty());
        assert!(Authenticated::verify(&a, Some("Bearer anything")).is_none());
    }

    #[test]
    fn debug_hides_tokens() {
        assert!(!format!("{:?}", authn()).contains("alpha"));
    }

    #[test]
    fn constant_time_eq_matches_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
