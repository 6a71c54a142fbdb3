//! Authentication lifecycle: login, register (with auto-login), logout.
//!
//! Token acquisition is kept apart from the API client proper: the client
//! only ever reads the session store, while this module is its single
//! writer. Logout always succeeds from the caller's perspective.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::models::{LoginRequest, RegisterRequest, Registered, Role, TokenResponse, User};
use crate::api::{paths, ApiClient};
use crate::session::SessionStore;

/// Where the client currently stands in the auth lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated { role: Role },
}

/// Top-level owner of auth state.
///
/// Holds the same injected store the API client reads from; `state()` is
/// always derived from what is persisted, so restoring on startup is just
/// opening the store.
pub struct AuthSession {
    client: ApiClient,
    store: Arc<SessionStore>,
}

impl AuthSession {
    pub fn new(client: ApiClient, store: Arc<SessionStore>) -> Self {
        Self { client, store }
    }

    /// Current state, restored from the persisted session.
    pub fn state(&self) -> AuthState {
        match self.store.session() {
            Some(session) => AuthState::Authenticated {
                role: session.user.role,
            },
            None => AuthState::Unauthenticated,
        }
    }

    /// The persisted user profile, when logged in.
    pub fn user(&self) -> Option<User> {
        self.store.user()
    }

    /// Exchange credentials for a token and persist the session.
    ///
    /// On a rejected login the error message is the server's `detail` and
    /// the store is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthState> {
        let response: TokenResponse = self
            .client
            .post_unauthenticated(
                paths::LOGIN,
                &LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;

        // The login response carries no display name; derive one from the
        // email local part until the backend returns it.
        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = User {
            name,
            email: email.to_string(),
            role: response.role,
        };

        self.store
            .set_session(&response.access_token, &user)
            .context("Failed to persist session")?;
        info!("Logged in as {} ({})", user.email, user.role);
        Ok(AuthState::Authenticated {
            role: response.role,
        })
    }

    /// Create an account, then immediately log in with the same credentials.
    /// Registration alone never establishes a session.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthState> {
        let _: Registered = self
            .client
            .post_unauthenticated(
                paths::REGISTER,
                &RegisterRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                    role,
                },
            )
            .await?;
        self.login(email, password).await
    }

    /// Clear the session unconditionally. A failure to remove the persisted
    /// file is logged and swallowed: the in-memory session is gone either
    /// way, so logout never fails.
    pub fn logout(&self) -> AuthState {
        if let Err(e) = self.store.clear_session() {
            warn!("Failed to remove persisted session: {e:#}");
        }
        info!("Logged out");
        AuthState::Unauthenticated
    }
}
