use std::collections::HashMap;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::models::{AuthUser, Role};
use crate::state::AppState;
use crate::utils::error::AppError;

/// Header the frontend sends its credential in.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Resolves a presented credential to a caller. Evaluated once per request;
/// no session state lives behind this.
pub trait AuthProvider: Send + Sync {
    fn resolve(&self, token: &str) -> Option<AuthUser>;
}

/// Static token table parsed from configuration. Entries are
/// `token:role[:name]`, comma-separated.
#[derive(Debug, Default)]
pub struct TokenTable {
    tokens: HashMap<String, AuthUser>,
}

impl TokenTable {
    pub fn from_spec(raw: &str) -> Self {
        let mut tokens = HashMap::new();

        for entry in raw.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let mut parts = entry.splitn(3, ':');
            let token = parts.next().unwrap_or_default();
            let role = parts.next();

            match role {
                Some(role) if !token.is_empty() => {
                    let name = parts.next().unwrap_or("api-client").to_string();
                    tokens.insert(
                        token.to_string(),
                        AuthUser {
                            name,
                            role: Role::parse(role),
                        },
                    );
                }
                _ => {
                    tracing::warn!("Auth: Ignoring malformed token entry '{}'", entry);
                }
            }
        }

        if tokens.is_empty() {
            tracing::warn!("Auth: No API tokens configured; all gated routes will reject");
        } else {
            tracing::info!("Auth: Configured {} API token(s)", tokens.len());
        }

        Self { tokens }
    }

    pub fn with_token(mut self, token: &str, name: &str, role: Role) -> Self {
        self.tokens.insert(
            token.to_string(),
            AuthUser {
                name: name.to_string(),
                role,
            },
        );
        self
    }
}

impl AuthProvider for TokenTable {
    fn resolve(&self, token: &str) -> Option<AuthUser> {
        self.tokens.get(token).cloned()
    }
}

/// Extractor that passes only for a valid credential.
pub struct Authenticated(pub AuthUser);

/// Extractor that additionally requires the admin role.
pub struct AdminOnly(pub AuthUser);

fn resolve_caller(parts: &Parts, state: &AppState) -> Result<AuthUser, AppError> {
    let token = parts
        .headers
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_string()))?;

    state
        .auth
        .resolve(token)
        .ok_or_else(|| AppError::Unauthorized("Token is not valid".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_caller(parts, state).map(Authenticated)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = resolve_caller(parts, state)?;
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Admin resource, access denied".to_string(),
            ));
        }
        Ok(AdminOnly(user))
    }
}
