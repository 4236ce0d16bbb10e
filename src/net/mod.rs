//! # Native Address Bridge
//!
//! Converts between [`Multiaddr`] values and native socket addresses through a
//! registry of pluggable converters.
//!
//! ## Components
//! - **NetAddr**: native address tagged with its family name
//! - **Registry**: family name / protocol key -> converter tables
//! - **Convert**: built-in TCP, UDP, UTP, IPv4, IPv6 and `ip+net` converters
//!
//! The free functions below operate on [`AddressRegistry::global`].

pub mod addr;
pub mod convert;
pub mod registry;


pub use addr::{NetAddr, IP_PLUS_NET};
pub use convert::dial_args;
pub use registry::{AddrParser, AddressRegistry, AddressSpec, MaddrParser, RegistryState};

use crate::core::multiaddr::Multiaddr;
use crate::error::Result;

/// Convert a native address using the global registry.
pub fn from_net_addr(addr: &NetAddr) -> Result<Multiaddr> {
    AddressRegistry::global().from_net_addr(addr)
}

/// Convert a multiaddr to a native address using the global registry.
pub fn to_net_addr(maddr: &Multiaddr) -> Result<NetAddr> {
    AddressRegistry::global().to_net_addr(maddr)
}

/// Register an address type with the global registry.
pub fn register_address_type(spec: AddressSpec) -> Result<()> {
    AddressRegistry::global().register(spec)
}
