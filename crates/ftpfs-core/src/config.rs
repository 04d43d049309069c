//! Ambient mount configuration read by the translation layer.
//!
//! The option-parsing layer owns the full option table; this type carries
//! the subset the translation layer and its immediate collaborators read:
//! the normalized host prefix, the charset configuration, the diagnostic
//! verbosity, and a few transfer knobs the dispatcher threads through.
//! Passing it explicitly keeps the path translator and the diagnostics
//! independently testable instead of reading process-global state.

use std::time::Duration;

use crate::charset::{CharsetConverter, CharsetPair};
use crate::diag::Verbosity;
use crate::path::PathTranslator;

/// Listing command sent when the mount options do not override it.
pub const DEFAULT_LIST_COMMAND: &str = "LIST -a";

/// Local charset assumed when the mount options do not name one.
pub const DEFAULT_LOCAL_CHARSET: &str = "UTF8";

/// Per-mount configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct MountConfig {
    host: String,
    charsets: Option<CharsetPair>,
    verbosity: Verbosity,
    connect_timeout: Option<Duration>,
    tcp_nodelay: bool,
    list_command: String,
}

impl MountConfig {
    /// Builds a configuration for `host`, normalizing it into a URL prefix:
    /// an `ftp://` scheme is prepended when none is present and a trailing
    /// `/` is appended when missing, so the prefix concatenates cleanly
    /// with relative paths.
    pub fn new(host: impl Into<String>) -> Self {
        let mut host = host.into();
        if !host.starts_with("ftp://") && !host.starts_with("ftps://") {
            host.insert_str(0, "ftp://");
        }
        if !host.ends_with('/') {
            host.push('/');
        }
        Self {
            host,
            charsets: None,
            verbosity: Verbosity::default(),
            connect_timeout: None,
            tcp_nodelay: false,
            list_command: DEFAULT_LIST_COMMAND.to_owned(),
        }
    }

    /// Enables transcoding to the server's `codepage`, with the local side
    /// assumed to be [`DEFAULT_LOCAL_CHARSET`].
    pub fn with_codepage(self, codepage: impl Into<String>) -> Self {
        self.with_charsets(CharsetPair::new(DEFAULT_LOCAL_CHARSET, codepage))
    }

    /// Enables transcoding with an explicit local/remote pair.
    pub fn with_charsets(mut self, pair: CharsetPair) -> Self {
        self.charsets = Some(pair);
        self
    }

    /// Sets the diagnostic verbosity threshold.
    pub fn with_verbosity(mut self, verbosity: impl Into<Verbosity>) -> Self {
        self.verbosity = verbosity.into();
        self
    }

    /// Caps connection establishment time.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Enables `TCP_NODELAY` on transport sockets.
    pub fn with_tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp_nodelay = enabled;
        self
    }

    /// Overrides the directory listing command.
    pub fn with_list_command(mut self, command: impl Into<String>) -> Self {
        self.list_command = command.into();
        self
    }

    /// The normalized remote host URL prefix, always ending in `/`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The active charset configuration, if any.
    pub fn charsets(&self) -> Option<&CharsetPair> {
        self.charsets.as_ref()
    }

    /// The diagnostic verbosity threshold.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Connection establishment cap, if any.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Whether `TCP_NODELAY` is requested.
    pub fn tcp_nodelay(&self) -> bool {
        self.tcp_nodelay
    }

    /// The directory listing command to send.
    pub fn list_command(&self) -> &str {
        &self.list_command
    }

    /// A path translator wired to this configuration's host and charsets.
    pub fn translator<C: CharsetConverter>(&self, converter: C) -> PathTranslator<C> {
        PathTranslator::with_transcoding(self.host.clone(), self.charsets.clone(), converter)
    }
}
