//! Translation and staging layer for an FTP filesystem.
//!
//! This crate sits between a FUSE-style path space and the FTP URL space:
//! it turns filesystem paths into fully qualified, percent-encoded remote
//! URLs, completes `user:password` credentials by prompting on the
//! terminal, and stages variable-length protocol responses in a growable
//! byte buffer until the operation dispatcher consumes them.
//!
//! Network I/O, the FTP state machine, directory-entry caching, and option
//! parsing all live in other layers; this crate only defines the seams it
//! shares with them ([`charset::CharsetConverter`], [`config::MountConfig`]).
//!
//! # Example
//!
//! ```
//! use ftpfs_core::charset::IdentityConverter;
//! use ftpfs_core::config::MountConfig;
//!
//! let config = MountConfig::new("host");
//! let translator = config.translator(IdentityConverter);
//!
//! let url = translator.directory_address("/incoming/new uploads")?;
//! assert_eq!(url, "ftp://host/incoming/new%20uploads/");
//! # Ok::<(), ftpfs_core::error::CharsetError>(())
//! ```

#![forbid(unsafe_code)]

pub mod buffer;
pub mod charset;
pub mod config;
pub mod credentials;
pub mod diag;
pub mod error;
pub mod path;

pub use buffer::Buffer;
pub use config::MountConfig;
pub use credentials::Credential;
pub use path::{AddressMode, PathTranslator};
