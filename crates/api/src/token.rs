// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API token sources.
//!
//! A [`TokenProvider`] answers "what token should this request carry?".
//! Empty or whitespace-only tokens count as absent everywhere.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// Environment variable (and token-file key) holding the API token.
pub const TOKEN_ENV_VAR: &str = "TRAVELPAYOUTS_TOKEN";

/// Supplies the API token, if one is configured.
pub trait TokenProvider: Send + Sync {
    /// Returns the token, or `None` when none is configured.
    fn token(&self) -> Option<String>;
}

fn non_empty(token: &str) -> Option<String> {
    let trimmed: &str = token.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A fixed token, typically from the command line.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wraps `token`.
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        non_empty(&self.0)
    }
}

/// Reads the token from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::with_var(TOKEN_ENV_VAR)
    }
}

impl EnvToken {
    /// Reads from `var` instead of the default variable.
    #[must_use]
    pub fn with_var(var: &str) -> Self {
        Self {
            var: var.to_string(),
        }
    }
}

impl TokenProvider for EnvToken {
    fn token(&self) -> Option<String> {
        std::env::var(&self.var).ok().as_deref().and_then(non_empty)
    }
}

#[derive(Debug, Deserialize)]
struct TokenFileContents {
    #[serde(rename = "TRAVELPAYOUTS_TOKEN")]
    token: Option<String>,
}

/// Reads the token from a TOML file on every call.
///
/// ```toml
/// TRAVELPAYOUTS_TOKEN = "..."
/// ```
///
/// A missing or unreadable file yields no token.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Reads from the file at `path`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TokenProvider for TokenFile {
    fn token(&self) -> Option<String> {
        let raw: String = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot read token file");
                return None;
            }
        };

        match toml::from_str::<TokenFileContents>(&raw) {
            Ok(contents) => contents.token.as_deref().and_then(non_empty),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed token file");
                None
            }
        }
    }
}

/// Tries each provider in order; the first token found wins.
#[derive(Default)]
pub struct TokenChain {
    providers: Vec<Box<dyn TokenProvider>>,
}

impl std::fmt::Debug for TokenChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenChain")
            .field("providers", &self.providers.len())
            .finish()
    }
}

impl TokenChain {
    /// Creates an empty chain, which never yields a token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `provider` to the chain.
    #[must_use]
    pub fn with<P: TokenProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl TokenProvider for TokenChain {
    fn token(&self) -> Option<String> {
        self.providers.iter().find_map(|provider| provider.token())
    }
}
