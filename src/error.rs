//! # Error Types
//!
//! Error handling for multiaddr parsing, formatting, and native address conversion.
//!
//! Every failure in this crate is a recoverable value returned to the immediate
//! caller. Nothing here aborts the process, and no operation returns a partial
//! result alongside an error.
//!
//! ## Error Categories
//! - **Protocol lookup**: a name or code is not in the protocol table
//! - **Values**: the transcoder rejected a textual or binary value
//! - **Framing**: a segment declares more bytes than the buffer holds
//! - **Composition**: decapsulation target not found
//! - **Networks**: no registry entry for a native family or protocol key
//!
//! Use [`MultiaddrError::kind`] to branch on the category without matching
//! every variant.
//!
//! ## Example Usage
//! ```rust
//! use multiaddr_net::error::{ErrorKind, Result};
//! use multiaddr_net::Multiaddr;
//!
//! fn port_less(text: &str) -> Result<Multiaddr> {
//!     text.parse::<Multiaddr>()
//! }
//!
//! let err = port_less("/ip4/127.0.0.1/quic").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnknownProtocol);
//! ```

use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Registry lock errors
    pub const ERR_REGISTRY_LOCK: &str = "Failed to acquire address registry lock";

    /// Text grammar errors
    pub const ERR_MISSING_LEADING_SLASH: &str = "multiaddr must begin with /";
    pub const ERR_MISSING_VALUE: &str = "missing value";
    pub const ERR_EMPTY_MULTIADDR: &str = "empty multiaddr";
    pub const ERR_UNEXPECTED_VALUE: &str = "protocol does not take a value";

    /// Codec errors
    pub const ERR_NO_TRANSCODER: &str = "no transcoder for protocol";
}

/// Coarse classification of [`MultiaddrError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Protocol name or code not in the protocol table
    UnknownProtocol,
    /// A value or the text grammar was rejected
    InvalidValue,
    /// A segment's declared width exceeds the remaining buffer
    TruncatedSegment,
    /// Decapsulation target is not part of the address
    NotContained,
    /// No registry entry for a native family or protocol key
    UnsupportedNetwork,
    /// Configuration could not be loaded or failed validation
    Config,
    /// Internal synchronization failure
    Internal,
}

// MultiaddrError is the primary error type for all crate operations
#[derive(Error, Debug)]
pub enum MultiaddrError {
    #[error("no protocol with name {0:?}")]
    UnknownProtocol(String),

    #[error("no protocol with code {0}")]
    UnknownProtocolCode(u8),

    #[error("invalid value for /{protocol}: {reason}")]
    InvalidValue { protocol: String, reason: String },

    #[error("invalid multiaddr {input:?}: {reason}")]
    InvalidFormat { input: String, reason: String },

    #[error("truncated /{protocol} segment: needs {needed} bytes, {remaining} remaining")]
    TruncatedSegment {
        protocol: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("{needle} not contained in {haystack}")]
    NotContained { needle: String, haystack: String },

    #[error("unknown network {0}")]
    UnknownNetwork(String),

    #[error("network not supported: {0}")]
    UnsupportedNetwork(String),

    #[error("expected a {expected} address, got {found}")]
    AddressMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("{0} is not a thin waist address")]
    NotThinWaist(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Synchronization primitive poisoned")]
    LockPoisoned,
}

impl MultiaddrError {
    pub(crate) fn invalid_value(protocol: impl Into<String>, reason: impl Into<String>) -> Self {
        MultiaddrError::InvalidValue {
            protocol: protocol.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        MultiaddrError::InvalidFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MultiaddrError::UnknownProtocol(_) | MultiaddrError::UnknownProtocolCode(_) => {
                ErrorKind::UnknownProtocol
            }
            MultiaddrError::InvalidValue { .. }
            | MultiaddrError::InvalidFormat { .. }
            | MultiaddrError::AddressMismatch { .. }
            | MultiaddrError::NotThinWaist(_) => ErrorKind::InvalidValue,
            MultiaddrError::TruncatedSegment { .. } => ErrorKind::TruncatedSegment,
            MultiaddrError::NotContained { .. } => ErrorKind::NotContained,
            MultiaddrError::UnknownNetwork(_) | MultiaddrError::UnsupportedNetwork(_) => {
                ErrorKind::UnsupportedNetwork
            }
            MultiaddrError::ConfigError(_) => ErrorKind::Config,
            MultiaddrError::LockPoisoned => ErrorKind::Internal,
        }
    }
}

/// Type alias for Results using MultiaddrError
pub type Result<T> = std::result::Result<T, MultiaddrError>;
