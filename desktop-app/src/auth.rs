//! Authentication context for the desktop app.
//!
//! Identity state is an explicit value owned by `AppState` and handed to
//! every page; nothing reads a global. Waiters that need the session (the
//! startup gate) subscribe through [`AuthBroker`] and wait with an explicit
//! bounded deadline instead of sleeping a fixed interval and re-checking.

use crate::api_client::ApiClient;
use prepdeck_models::AuthSession;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Resolution state of the current identity session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Startup restore still running; protected pages show a spinner.
    #[default]
    Resolving,
    SignedIn(AuthSession),
    SignedOut,
}

impl AuthState {
    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            AuthState::SignedIn(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, AuthState::Resolving)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid session cache: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not serialize session cache: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Publishes auth-state changes to interested waiters.
pub struct AuthBroker {
    tx: watch::Sender<AuthState>,
}

impl AuthBroker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::Resolving);
        Self { tx }
    }

    pub fn watch(&self) -> AuthWatch {
        AuthWatch {
            rx: self.tx.subscribe(),
        }
    }

    pub fn publish(&self, state: AuthState) {
        // Send only fails when every watcher is gone, which is fine: the
        // value is still stored for the next subscriber.
        let _ = self.tx.send(state);
    }
}

impl Default for AuthBroker {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscription to auth-state changes.
pub struct AuthWatch {
    rx: watch::Receiver<AuthState>,
}

impl AuthWatch {
    /// Waits until the session state resolves, for at most `deadline`.
    ///
    /// Returns the resolved state, or `SignedOut` when the deadline passes
    /// with the state still unresolved: a session that cannot be produced
    /// within the window is treated as absent. Cancellation is the caller's
    /// `JoinHandle` on the task driving this future.
    pub async fn resolved(&mut self, deadline: Duration) -> AuthState {
        let wait = self.rx.wait_for(|state| state.is_resolved());
        match tokio::time::timeout(deadline, wait).await {
            Ok(Ok(state)) => state.clone(),
            Ok(Err(_)) | Err(_) => AuthState::SignedOut,
        }
    }
}

/// Access token cached on disk between runs, so a restart can re-verify
/// instead of forcing a fresh sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionCache {
    pub access_token: Option<String>,
}

impl SessionCache {
    pub fn load() -> Result<Self, AuthError> {
        let cache_path = Self::cache_path();
        if cache_path.exists() {
            let content = std::fs::read_to_string(cache_path)?;
            let cache: SessionCache = toml::from_str(&content)?;
            Ok(cache)
        } else {
            Ok(Default::default())
        }
    }

    pub fn save(&self) -> Result<(), AuthError> {
        let cache_path = Self::cache_path();
        if let Some(parent) = cache_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(cache_path, content)?;
        Ok(())
    }

    pub fn clear() -> Result<(), AuthError> {
        let cache_path = Self::cache_path();
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
        }
        Ok(())
    }

    fn cache_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".config").join("prepdeck").join("session.toml")
        } else {
            PathBuf::from("./prepdeck-session.toml")
        }
    }
}

/// Re-verifies the cached access token against the backend and publishes
/// the outcome. A rejected token is dropped from the cache so the next
/// launch goes straight to sign-in.
pub async fn restore_session(api: ApiClient, broker: Arc<AuthBroker>) {
    let cache = SessionCache::load().unwrap_or_else(|e| {
        tracing::warn!("Could not read session cache: {}", e);
        SessionCache::default()
    });

    let Some(token) = cache.access_token else {
        broker.publish(AuthState::SignedOut);
        return;
    };

    let mut api = api;
    api.set_access_token(Some(token.clone()));
    match api.verify().await {
        Ok(verified) => {
            tracing::info!("Restored session for {}", verified.user.email);
            broker.publish(AuthState::SignedIn(AuthSession {
                access_token: token,
                user: verified.user,
            }));
        }
        Err(e) => {
            tracing::warn!("Cached session rejected: {}", e);
            if let Err(e) = SessionCache::clear() {
                tracing::warn!("Could not clear session cache: {}", e);
            }
            broker.publish(AuthState::SignedOut);
        }
    }
}
