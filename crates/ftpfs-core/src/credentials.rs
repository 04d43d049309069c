//! Credential completion via interactive secret capture.
//!
//! The mount layer arrives here with a `user` or `user:password` string from
//! its options. When the password half is missing, [`Credential::complete`]
//! prompts on the controlling terminal with echo disabled and merges the
//! captured secret in. Plaintext scratch space is zeroed on every exit path,
//! success or failure.

use std::fmt;
use std::io;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Longest secret the capture path accepts, in bytes.
pub const SECRET_MAX_LEN: usize = 128;

/// Separates the principal from the secret in the merged form.
pub const SEPARATOR: char = ':';

/// Failures while capturing a secret. The credential is left unchanged in
/// every case.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The controlling terminal could not be read (including the case where
    /// there is no controlling terminal at all).
    #[error("failed to read secret from terminal: {0}")]
    CaptureFailed(#[from] io::Error),

    /// The entered secret exceeds [`SECRET_MAX_LEN`].
    #[error("secret exceeds the {limit}-byte limit")]
    SecretTooLong {
        /// The enforced limit, i.e. [`SECRET_MAX_LEN`].
        limit: usize,
    },
}

/// Source of interactively captured secrets.
///
/// Implementations must hand the secret back in a [`Zeroizing`] wrapper so
/// the scratch allocation is wiped no matter what the caller does with it.
pub trait SecretSource {
    /// Displays `prompt` and reads one secret with echo disabled.
    fn read_secret(&mut self, prompt: &str) -> io::Result<Zeroizing<String>>;
}

/// Reads from the controlling terminal with echo suppressed.
///
/// Fails with an I/O error when no controlling terminal is available, which
/// surfaces as [`CredentialError::CaptureFailed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSecretSource;

impl SecretSource for TerminalSecretSource {
    fn read_secret(&mut self, prompt: &str) -> io::Result<Zeroizing<String>> {
        rpassword::prompt_password(prompt).map(Zeroizing::new)
    }
}

/// A `principal[:secret]` authentication pair, stored merged.
///
/// Once a [`SEPARATOR`] appears in the string the credential is complete and
/// no further prompting happens; a caller can therefore pre-supply the full
/// `user:password` form and never be prompted. The backing storage is wiped
/// on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    merged: String,
}

impl Credential {
    /// Wraps a user-supplied principal, which may already carry an embedded
    /// `:secret` part.
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            merged: principal.into(),
        }
    }

    /// Whether the secret half is already present.
    pub fn is_complete(&self) -> bool {
        self.merged.contains(SEPARATOR)
    }

    /// The merged `principal[:secret]` form, as handed to the transport.
    pub fn as_str(&self) -> &str {
        &self.merged
    }

    /// Captures the missing secret from `source` and merges it in.
    ///
    /// A no-op when the credential is already complete. `role_label` names
    /// what the secret is for ("host", "proxy") in the prompt text. An empty
    /// entry is accepted and yields a trailing separator with nothing after
    /// it, an explicitly empty secret rather than an absent one.
    ///
    /// # Errors
    ///
    /// [`CredentialError::CaptureFailed`] when the terminal read fails and
    /// [`CredentialError::SecretTooLong`] past [`SECRET_MAX_LEN`]; the
    /// credential is unchanged on either. The plaintext scratch buffer is
    /// zeroed before any of these returns.
    pub fn complete(
        &mut self,
        role_label: &str,
        source: &mut dyn SecretSource,
    ) -> Result<(), CredentialError> {
        if self.is_complete() {
            tracing::debug!(role = role_label, "credential already complete, not prompting");
            return Ok(());
        }

        let prompt = format!("Enter {role_label} password for user '{}': ", self.merged);
        let secret = source.read_secret(&prompt)?;
        if secret.len() > SECRET_MAX_LEN {
            return Err(CredentialError::SecretTooLong {
                limit: SECRET_MAX_LEN,
            });
        }

        self.merged.reserve(1 + secret.len());
        self.merged.push(SEPARATOR);
        self.merged.push_str(&secret);
        Ok(())
        // `secret` drops here and its scratch allocation is zeroed; the
        // error paths above drop it the same way.
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never let the secret half reach diagnostics.
        let principal = self
            .merged
            .split_once(SEPARATOR)
            .map_or(self.merged.as_str(), |(p, _)| p);
        if self.is_complete() {
            write!(f, "Credential({principal}:<redacted>)")
        } else {
            write!(f, "Credential({principal})")
        }
    }
}
