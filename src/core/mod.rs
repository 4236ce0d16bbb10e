//! # Core Address Components
//!
//! The protocol table, value transcoding, and the `Multiaddr` buffer itself.
//!
//! ## Components
//! - **Protocol**: static catalog of codes, names, and value widths
//! - **Codec**: text <-> binary transcoding of a single protocol value
//! - **Multiaddr**: the segment buffer with parse, format, and composition
//!
//! ## Wire Format
//! ```text
//! [Code(1)] [Value(size/8)] [Code(1)] [Value(size/8)] ...
//! ```
//!
//! ## Safety
//! - Every segment walk bounds-checks the declared width before slicing
//! - Unknown codes and truncated values surface as typed errors

pub mod codec;
pub mod multiaddr;
pub mod protocol;
