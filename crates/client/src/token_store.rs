//! Bearer-token persistence under the platform data directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;

/// File-backed session token storage.
///
/// A missing file means "logged out". The token is re-read on demand;
/// nothing else about the session is persisted (claims are re-derived on
/// every gate evaluation).
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store under the platform data directory (`<data>/expodesk/session.token`).
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = dirs::data_dir().context("no platform data directory available")?;
        Ok(Self {
            path: dir.join("expodesk").join("session.token"),
        })
    }

    /// Store at an explicit path (tests, portable setups).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// The persisted token, if any.
    pub fn load(&self) -> anyhow::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read token at {:?}", self.path)),
        }
    }

    pub fn save(&self, token: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create token directory at {:?}", parent))?;
        }
        std::fs::write(&self.path, token)
            .with_context(|| format!("failed to write token at {:?}", self.path))
    }

    /// Forget the token (logout). Missing file is fine.
    pub fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove token at {:?}", self.path)),
        }
    }
}
