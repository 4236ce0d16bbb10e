//! # multiaddr-net
//!
//! Self-describing network addresses ("multiaddrs") and a bridge to native
//! socket addresses.
//!
//! A multiaddr encodes a stack of protocols, such as IPv4 + TCP, as both text
//! and a compact binary buffer:
//!
//! ```text
//! /ip4/127.0.0.1/tcp/4001   <->   04 7f 00 00 01 06 0f a1
//! ```
//!
//! ## Modules
//! - [`core`]: protocol table, value transcoding, and [`Multiaddr`]
//! - [`net`]: [`NetAddr`] and the address-type registry
//! - [`config`]: TOML / environment configuration
//! - [`error`]: [`MultiaddrError`] and [`Result`]
//! - [`utils`]: logging setup
//!
//! ## Example
//! ```rust
//! use multiaddr_net::Multiaddr;
//! use multiaddr_net::core::protocol::{IP4, TCP};
//!
//! let ip: Multiaddr = "/ip4/10.0.0.1".parse().unwrap();
//! let tcp: Multiaddr = "/tcp/80".parse().unwrap();
//!
//! let full = ip.encapsulate(&tcp);
//! assert_eq!(full.format().unwrap(), "/ip4/10.0.0.1/tcp/80");
//! assert_eq!(full.segments().unwrap(), vec![IP4, TCP]);
//! assert_eq!(full.decapsulate(&tcp).unwrap(), ip);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod net;
pub mod utils;

pub use crate::core::codec::{StandardTranscoder, Transcoder};
pub use crate::core::multiaddr::{Multiaddr, Segment, SegmentIter};
pub use crate::core::protocol::Protocol;
pub use crate::error::{ErrorKind, MultiaddrError, Result};
pub use crate::net::{AddressRegistry, AddressSpec, NetAddr};
