//! API key discovery.

use std::path::PathBuf;

/// Environment variable consulted by [`KeySource::defaults`].
pub const API_KEY_ENV: &str = "MANDRILL_APIKEY";

/// Name of the key file looked up in the user's home directory.
const HOME_KEY_FILE: &str = ".mandrill.key";

/// System-wide key file.
const SYSTEM_KEY_FILE: &str = "/etc/mandrill.key";

/// One place an API key may come from.
///
/// Sources are tried in order and the first one yielding a non-empty key wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// A fixed key.
    Literal(String),
    /// An environment variable. Unset or empty values are skipped.
    Env(String),
    /// A file whose trimmed contents are the key. Missing, unreadable,
    /// or blank files are skipped.
    File(PathBuf),
}

impl KeySource {
    /// `MANDRILL_APIKEY`, then `~/.mandrill.key`, then `/etc/mandrill.key`.
    pub fn defaults() -> Vec<KeySource> {
        let mut sources = vec![KeySource::Env(API_KEY_ENV.to_string())];
        if let Some(home) = dirs::home_dir() {
            sources.push(KeySource::File(home.join(HOME_KEY_FILE)));
        }
        sources.push(KeySource::File(PathBuf::from(SYSTEM_KEY_FILE)));
        sources
    }

    /// Try to read a key from this source.
    pub fn read(&self) -> Option<String> {
        match self {
            KeySource::Literal(key) => Some(key.clone()),
            KeySource::Env(var) => std::env::var(var).ok().filter(|v| !v.is_empty()),
            KeySource::File(path) => {
                if !path.exists() {
                    return None;
                }
                match std::fs::read_to_string(path) {
                    Ok(contents) => {
                        let key = contents.trim();
                        (!key.is_empty()).then(|| key.to_string())
                    }
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "skipping unreadable key file");
                        None
                    }
                }
            }
        }
    }
}

/// Resolve a key from the first source that yields one.
pub(crate) fn resolve(sources: &[KeySource]) -> Option<String> {
    sources.iter().find_map(|source| {
        let key = source.read()?;
        match source {
            KeySource::Literal(_) => tracing::debug!("using explicit API key"),
            KeySource::Env(var) => tracing::debug!(var = %var, "using API key from environment"),
            KeySource::File(path) => {
                tracing::debug!(path = %path.display(), "using API key from file")
            }
        }
        Some(key)
    })
}
