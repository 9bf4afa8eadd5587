//! Durable storage for the access/refresh credential pair
//!
//! Either token may be absent. The request pipeline only ever talks to the
//! [`CredentialStore`] trait, so tests swap in [`MemoryCredentialStore`] and
//! the CLI uses [`FileCredentialStore`].

use crate::{CoreError, CoreResult, ErrorContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Access token plus optional refresh token, as issued by the login endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: Option<String>) -> Self {
        Self {
            access: Some(access.into()),
            refresh,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }
}

/// Key/value slots for the credential pair
#[cfg_attr(any(test, feature = "tests"), mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Current access token, if any
    fn access_token(&self) -> CoreResult<Option<String>>;

    /// Current refresh token, if any
    fn refresh_token(&self) -> CoreResult<Option<String>>;

    /// Replace the access token, keeping the refresh token
    fn set_access_token(&self, token: &str) -> CoreResult<()>;

    /// Store a freshly issued pair. A pair without a refresh token keeps the
    /// refresh token already stored.
    fn set_tokens(&self, tokens: &TokenPair) -> CoreResult<()>;

    /// Remove both tokens
    fn clear(&self) -> CoreResult<()>;
}

/// In-process store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tokens: RwLock<TokenPair>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the given pair
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(tokens),
        }
    }

    fn read(&self) -> CoreResult<std::sync::RwLockReadGuard<'_, TokenPair>> {
        self.tokens
            .read()
            .map_err(|_| CoreError::credential_store("token lock poisoned"))
    }

    fn write(&self) -> CoreResult<std::sync::RwLockWriteGuard<'_, TokenPair>> {
        self.tokens
            .write()
            .map_err(|_| CoreError::credential_store("token lock poisoned"))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> CoreResult<Option<String>> {
        Ok(self.read()?.access.clone())
    }

    fn refresh_token(&self) -> CoreResult<Option<String>> {
        Ok(self.read()?.refresh.clone())
    }

    fn set_access_token(&self, token: &str) -> CoreResult<()> {
        self.write()?.access = Some(token.to_string());
        Ok(())
    }

    fn set_tokens(&self, tokens: &TokenPair) -> CoreResult<()> {
        let mut current = self.write()?;
        current.access = tokens.access.clone();
        if tokens.refresh.is_some() {
            current.refresh = tokens.refresh.clone();
        }
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        *self.write()? = TokenPair::default();
        Ok(())
    }
}

/// JSON file store that survives restarts
///
/// The file holds `{"access": "...", "refresh": "..."}`. A missing file means
/// no tokens. Every operation goes to disk so several processes see the same
/// state.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    guard: RwLock<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> CoreResult<TokenPair> {
        let _guard = self
            .guard
            .read()
            .map_err(|_| CoreError::credential_store("file lock poisoned"))?;
        self.read_file()
    }

    /// Callers must hold `guard`
    fn read_file(&self) -> CoreResult<TokenPair> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(TokenPair::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TokenPair::default()),
            Err(e) => Err(e)
                .with_context(|| format!("reading {}", self.path.display()))
                .map_err(CoreError::credential_store),
        }
    }

    /// Read, modify and write back under one write lock
    fn update<F>(&self, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut TokenPair),
    {
        let _guard = self
            .guard
            .write()
            .map_err(|_| CoreError::credential_store("file lock poisoned"))?;
        let mut tokens = self.read_file()?;
        f(&mut tokens);

        if tokens.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))
                .map_err(CoreError::credential_store)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&tokens)?)
            .with_context(|| format!("writing {}", self.path.display()))
            .map_err(CoreError::credential_store)?;
        tracing::trace!(path = %self.path.display(), "Persisted credentials");
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn access_token(&self) -> CoreResult<Option<String>> {
        Ok(self.load()?.access)
    }

    fn refresh_token(&self) -> CoreResult<Option<String>> {
        Ok(self.load()?.refresh)
    }

    fn set_access_token(&self, token: &str) -> CoreResult<()> {
        self.update(|tokens| tokens.access = Some(token.to_string()))
    }

    fn set_tokens(&self, new: &TokenPair) -> CoreResult<()> {
        self.update(|tokens| {
            tokens.access = new.access.clone();
            if new.refresh.is_some() {
                tokens.refresh = new.refresh.clone();
            }
        })
    }

    fn clear(&self) -> CoreResult<()> {
        self.update(|tokens| *tokens = TokenPair::default())
    }
}
