//! API credential handling.

use crate::error::{ChatError, Result};
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// An opaque API token.
///
/// The only way to build one is [`Credential::parse`] (directly or through
/// [`Credential::from_file`]), which guarantees the token is non-empty and
/// trimmed. `Debug` and `Display` never print the secret.
///
/// # Examples
///
/// ```
/// use promptchat_core::Credential;
///
/// let credential = Credential::parse("  sk-test\n")?;
/// assert_eq!(credential.expose(), "sk-test");
/// assert_eq!(format!("{credential:?}"), "Credential(****)");
/// # Ok::<(), promptchat_core::ChatError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Default credential file, relative to the working directory.
    pub const DEFAULT_FILE: &'static str = "api_key.txt";

    /// Builds a credential from a raw token, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::EmptyCredential`] if nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(ChatError::EmptyCredential(None));
        }
        Ok(Self(token.to_string()))
    }

    /// Reads a credential from a plain-text file holding only the token.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::CredentialNotFound`] if the file cannot be read,
    /// [`ChatError::MalformedCredential`] if it is not UTF-8 text and
    /// [`ChatError::EmptyCredential`] if it is blank.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            let path = path.to_path_buf();
            match source.kind() {
                ErrorKind::InvalidData => ChatError::MalformedCredential { path, source },
                _ => ChatError::CredentialNotFound { path, source },
            }
        })?;

        let credential = Self::parse(&raw).map_err(|e| match e {
            ChatError::EmptyCredential(_) => ChatError::EmptyCredential(Some(path.to_path_buf())),
            other => other,
        })?;

        debug!(path = %path.display(), "loaded credential");
        Ok(credential)
    }

    /// Returns the secret token for use in request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
