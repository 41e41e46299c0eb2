//! Login state of the client. The token is loaded once from a [`TokenStore`],
//! replaced on sign-in, cleared on sign-out, and every change is broadcast to
//! subscribers so gated views can react.

use std::{
    io::ErrorKind,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::client::{api::SirenApi, error::ClientError};

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, ClientError>;
    async fn save(&self, token: &str) -> Result<(), ClientError>;
    async fn clear(&self) -> Result<(), ClientError>;
}

/// Token kept in a plain file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>, ClientError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&self.path, token).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // a poisoned slot still holds a usable value
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.slot().clone())
    }

    async fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        *self.slot() = None;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated { token: String },
}

pub struct Session {
    store: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self { store, state }
    }

    /// Reads the stored token. Called once at start-up.
    pub async fn load(&self) -> Result<SessionState, ClientError> {
        let state = match self.store.load().await? {
            Some(token) => SessionState::Authenticated { token },
            None => SessionState::Anonymous,
        };
        self.state.send_replace(state.clone());
        Ok(state)
    }

    pub async fn sign_in(
        &self,
        api: &dyn SirenApi,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let token = api.login(email, password).await?;
        self.store.save(&token).await?;
        self.state.send_replace(SessionState::Authenticated { token });
        tracing::info!("🔐 Connexion réussie");
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<(), ClientError> {
        self.store.clear().await?;
        self.state.send_replace(SessionState::Anonymous);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Authenticated { .. })
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Gate for pages reserved to signed-in users.
    pub fn require_token(&self) -> Result<String, ClientError> {
        match &*self.state.borrow() {
            SessionState::Authenticated { token } => Ok(token.clone()),
            SessionState::Anonymous => Err(ClientError::Unauthenticated),
        }
    }
}
