//! Error types for the translation layer.
//!
//! Each module defines its own error alongside the code that raises it;
//! this module gathers the re-exports so callers have one place to import
//! from.

pub use crate::buffer::BufferError;
pub use crate::charset::CharsetError;
pub use crate::credentials::CredentialError;
