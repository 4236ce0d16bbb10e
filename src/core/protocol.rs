//! # Protocol Table
//!
//! Static catalog of the protocols a multiaddr can carry.
//!
//! Each protocol has a one-byte code used on the wire, a unique textual name
//! used in the string form, and a fixed value width in bits. A width of zero
//! means the protocol carries no value (e.g. `/utp`).
//!
//! The table is a `const` array; lookups need no synchronization.

use std::fmt;

/// A protocol known to the multiaddr codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Protocol {
    /// Wire code, written as the first byte of each segment
    pub code: u8,
    /// Name used in the textual form
    pub name: &'static str,
    /// Value width in bits, always a multiple of 8
    pub size: usize,
}

impl Protocol {
    /// Number of value bytes following the code byte.
    #[inline]
    pub const fn value_len(&self) -> usize {
        self.size / 8
    }

    /// Whether this protocol is written without a value component.
    #[inline]
    pub const fn is_valueless(&self) -> bool {
        self.size == 0
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub const IP4: Protocol = Protocol {
    code: 4,
    name: "ip4",
    size: 32,
};

pub const TCP: Protocol = Protocol {
    code: 6,
    name: "tcp",
    size: 16,
};

pub const UDP: Protocol = Protocol {
    code: 17,
    name: "udp",
    size: 16,
};

pub const DCCP: Protocol = Protocol {
    code: 33,
    name: "dccp",
    size: 16,
};

pub const IP6: Protocol = Protocol {
    code: 41,
    name: "ip6",
    size: 128,
};

/// Micro transport protocol, layered on top of `/udp`
pub const UTP: Protocol = Protocol {
    code: 46,
    name: "utp",
    size: 0,
};

pub const SCTP: Protocol = Protocol {
    code: 132,
    name: "sctp",
    size: 16,
};

/// Every registered protocol, ordered by code.
pub const PROTOCOLS: [Protocol; 7] = [IP4, TCP, UDP, DCCP, IP6, UTP, SCTP];

/// Find a protocol by its wire code.
pub fn lookup_by_code(code: u8) -> Option<Protocol> {
    PROTOCOLS.iter().copied().find(|p| p.code == code)
}

/// Find a protocol by its textual name.
pub fn lookup_by_name(name: &str) -> Option<Protocol> {
    PROTOCOLS.iter().copied().find(|p| p.name == name)
}

/// All registered protocols.
pub fn all() -> &'static [Protocol] {
    &PROTOCOLS
}
