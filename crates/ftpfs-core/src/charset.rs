//! Boundary with the character-set conversion collaborator.
//!
//! Remote servers may speak a legacy codepage while the local side is
//! UTF-8. Conversion itself lives outside this crate; the path translator
//! only needs a seam to hand a string through and relay any failure
//! untouched.

use thiserror::Error;

/// Opaque transcoding failure, relayed as-is by the path translator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("charset conversion from {from} to {to} failed: {reason}")]
pub struct CharsetError {
    /// Source charset identifier.
    pub from: String,
    /// Target charset identifier.
    pub to: String,
    /// Converter-supplied detail, not interpreted here.
    pub reason: String,
}

/// An active local/remote charset configuration.
///
/// Absence of a pair (an `Option<CharsetPair>` of `None` in
/// [`MountConfig`](crate::config::MountConfig)) means no transcoding at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetPair {
    /// Charset the local path space uses.
    pub local: String,
    /// Codepage the remote server expects.
    pub remote: String,
}

impl CharsetPair {
    pub fn new(local: impl Into<String>, remote: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            remote: remote.into(),
        }
    }
}

/// In-place text conversion between two named charsets.
pub trait CharsetConverter {
    /// Replaces `text` with its representation in the `to` charset.
    ///
    /// # Errors
    ///
    /// Whatever the underlying converter raises; callers relay the error
    /// without interpreting it.
    fn convert(&self, from: &str, to: &str, text: &mut String) -> Result<(), CharsetError>;
}

/// The "no conversion" sentinel: leaves every string untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl CharsetConverter for IdentityConverter {
    fn convert(&self, _from: &str, _to: &str, _text: &mut String) -> Result<(), CharsetError> {
        Ok(())
    }
}
