//! Translation from filesystem paths to remote FTP URLs.
//!
//! Every path-bearing filesystem operation needs a fully qualified,
//! percent-encoded URL for the transport. Four address shapes share one
//! skeleton and differ only in how the tail of the path is handled: the
//! bare entry name, the whole path as a file, the whole path as a
//! directory, or the path's parent directory.
//!
//! Percent-encoding is applied to the entire constructed address, host
//! prefix included, in a single pass. Encoding host and path separately and
//! then concatenating is where double-encoding bugs come from.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

use crate::charset::{CharsetConverter, CharsetError, CharsetPair, IdentityConverter};

/// Bytes that survive percent-encoding unchanged, beyond alphanumerics.
///
/// `:` and `/` stay raw so the scheme and path structure of the address
/// remain readable; everything else outside `- _ . ~` becomes `%XX` with
/// uppercase hex digits.
const ADDRESS_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b':')
    .remove(b'/');

/// How the tail of a translated path is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Only the last path segment; parent segments are dropped.
    NameOnly,
    /// The whole path, addressing a file (no trailing separator added).
    File,
    /// The whole path, addressing a directory (trailing separator unless
    /// the path is empty).
    Directory,
    /// The path with its final segment stripped, addressing the parent
    /// directory (trailing separator unless nothing remains).
    ParentDirectory,
}

/// Builds remote URLs from leading-slash-relative filesystem paths.
///
/// Carries the remote host prefix (conventionally ending in `/`, as the
/// option layer normalizes it) and the optional charset configuration.
/// Stateless per call; any byte sequence is a legal path and is encoded
/// byte-for-byte after optional transcoding.
#[derive(Debug, Clone)]
pub struct PathTranslator<C = IdentityConverter> {
    host: String,
    charsets: Option<CharsetPair>,
    converter: C,
}

impl PathTranslator<IdentityConverter> {
    /// Translator without charset transcoding.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            charsets: None,
            converter: IdentityConverter,
        }
    }
}

impl<C: CharsetConverter> PathTranslator<C> {
    /// Translator with an optional charset configuration and the converter
    /// to apply it. With `charsets` of `None` the converter is never
    /// consulted.
    pub fn with_transcoding(
        host: impl Into<String>,
        charsets: Option<CharsetPair>,
        converter: C,
    ) -> Self {
        Self {
            host: host.into(),
            charsets,
            converter,
        }
    }

    /// The configured remote host prefix.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Translates `path` into a percent-encoded remote URL.
    ///
    /// `path` is leading-slash-relative per the dispatcher contract; a
    /// missing leading slash is tolerated and treated as already relative.
    ///
    /// # Errors
    ///
    /// Relays a [`CharsetError`] from the transcoding collaborator, the
    /// only way translation can fail.
    pub fn translate(&self, path: &str, mode: AddressMode) -> Result<String, CharsetError> {
        let rel = path.strip_prefix('/').unwrap_or(path);

        let mut tail = match mode {
            AddressMode::NameOnly => rel
                .rsplit('/')
                .next()
                .unwrap_or(rel)
                .to_owned(),
            AddressMode::File | AddressMode::Directory => rel.to_owned(),
            AddressMode::ParentDirectory => {
                rel.rfind('/').map_or("", |cut| &rel[..cut]).to_owned()
            }
        };

        if let Some(pair) = &self.charsets {
            if !tail.is_empty() {
                self.converter.convert(&pair.local, &pair.remote, &mut tail)?;
            }
        }

        let mut raw = String::with_capacity(self.host.len() + tail.len() + 1);
        raw.push_str(&self.host);
        raw.push_str(&tail);

        // Directory addresses end in exactly one separator; emptiness is
        // judged after transcoding, as the converter may change the length.
        let wants_separator = matches!(
            mode,
            AddressMode::Directory | AddressMode::ParentDirectory
        );
        if wants_separator && !tail.is_empty() && !tail.ends_with('/') {
            raw.push('/');
        }

        let encoded = percent_encode(raw.as_bytes(), ADDRESS_SET).to_string();
        tracing::trace!(path, mode = ?mode, address = %encoded, "translated path");
        Ok(encoded)
    }

    /// Address of the entry's bare name, parent segments dropped.
    pub fn name_address(&self, path: &str) -> Result<String, CharsetError> {
        self.translate(path, AddressMode::NameOnly)
    }

    /// Address of the whole path as a file.
    pub fn file_address(&self, path: &str) -> Result<String, CharsetError> {
        self.translate(path, AddressMode::File)
    }

    /// Address of the whole path as a directory.
    pub fn directory_address(&self, path: &str) -> Result<String, CharsetError> {
        self.translate(path, AddressMode::Directory)
    }

    /// Address of the path's parent directory.
    pub fn parent_address(&self, path: &str) -> Result<String, CharsetError> {
        self.translate(path, AddressMode::ParentDirectory)
    }
}
