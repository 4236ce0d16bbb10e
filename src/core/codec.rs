//! # Value Transcoding
//!
//! Converts a single protocol value between its textual and fixed-width
//! binary forms. [`Multiaddr`](crate::Multiaddr) drives the transcoder once per
//! segment and never interprets value bytes itself.
//!
//! [`StandardTranscoder`] covers the built-in protocols:
//!
//! ```text
//! ip4              dotted decimal   <-> 4 bytes
//! ip6              RFC 5952 text    <-> 16 bytes
//! tcp/udp/dccp/sctp decimal port    <-> 2 bytes, big endian
//! utp              (no value)       <-> 0 bytes
//! ```
//!
//! Callers with extra needs implement [`Transcoder`] and pass it to
//! [`Multiaddr::parse_with`](crate::Multiaddr::parse_with) /
//! [`Multiaddr::format_with`](crate::Multiaddr::format_with).

use crate::core::protocol::{self, Protocol};
use crate::error::{constants, MultiaddrError, Result};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Per-protocol value transcoder.
pub trait Transcoder: Send + Sync {
    /// Encode a textual value into exactly `protocol.value_len()` bytes.
    fn encode(&self, protocol: &Protocol, value: &str) -> Result<Vec<u8>>;

    /// Render `protocol.value_len()` bytes back to text.
    fn decode(&self, protocol: &Protocol, value: &[u8]) -> Result<String>;
}

/// Transcoder for the built-in protocol table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTranscoder;

impl Transcoder for StandardTranscoder {
    fn encode(&self, protocol: &Protocol, value: &str) -> Result<Vec<u8>> {
        match protocol.code {
            c if c == protocol::IP4.code => value
                .parse::<Ipv4Addr>()
                .map(|ip| ip.octets().to_vec())
                .map_err(|e| MultiaddrError::invalid_value(protocol.name, e.to_string())),
            c if c == protocol::IP6.code => value
                .parse::<Ipv6Addr>()
                .map(|ip| ip.octets().to_vec())
                .map_err(|e| MultiaddrError::invalid_value(protocol.name, e.to_string())),
            c if is_port(c) => value
                .parse::<u16>()
                .map(|port| port.to_be_bytes().to_vec())
                .map_err(|e| {
                    MultiaddrError::invalid_value(protocol.name, format!("{value:?}: {e}"))
                }),
            _ if protocol.is_valueless() => {
                if value.is_empty() {
                    Ok(Vec::new())
                } else {
                    Err(MultiaddrError::invalid_value(
                        protocol.name,
                        constants::ERR_UNEXPECTED_VALUE,
                    ))
                }
            }
            _ => Err(MultiaddrError::invalid_value(
                protocol.name,
                constants::ERR_NO_TRANSCODER,
            )),
        }
    }

    fn decode(&self, protocol: &Protocol, value: &[u8]) -> Result<String> {
        let width_err = || {
            MultiaddrError::invalid_value(
                protocol.name,
                format!(
                    "expected {} value bytes, got {}",
                    protocol.value_len(),
                    value.len()
                ),
            )
        };

        match protocol.code {
            c if c == protocol::IP4.code => {
                let octets: [u8; 4] = value.try_into().map_err(|_| width_err())?;
                Ok(Ipv4Addr::from(octets).to_string())
            }
            c if c == protocol::IP6.code => {
                let octets: [u8; 16] = value.try_into().map_err(|_| width_err())?;
                Ok(Ipv6Addr::from(octets).to_string())
            }
            c if is_port(c) => {
                let port: [u8; 2] = value.try_into().map_err(|_| width_err())?;
                Ok(u16::from_be_bytes(port).to_string())
            }
            _ if protocol.is_valueless() => {
                if value.is_empty() {
                    Ok(String::new())
                } else {
                    Err(width_err())
                }
            }
            _ => Err(MultiaddrError::invalid_value(
                protocol.name,
                constants::ERR_NO_TRANSCODER,
            )),
        }
    }
}

#[inline]
fn is_port(code: u8) -> bool {
    code == protocol::TCP.code
        || code == protocol::UDP.code
        || code == protocol::DCCP.code
        || code == protocol::SCTP.code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::protocol::{IP4, IP6, SCTP, TCP, UTP};
    use crate::error::ErrorKind;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_ip4() {
        let codec = StandardTranscoder;
        let bytes = codec.encode(&IP4, "127.0.0.1").unwrap();
        assert_eq!(bytes, vec![127, 0, 0, 1]);
        assert_eq!(codec.decode(&IP4, &bytes).unwrap(), "127.0.0.1");
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_ip6_renders_canonical_text() {
        let codec = StandardTranscoder;
        let bytes = codec.encode(&IP6, "0:0:0:0:0:0:0:1").unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(codec.decode(&IP6, &bytes).unwrap(), "::1");
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_ports_are_big_endian() {
        let codec = StandardTranscoder;
        assert_eq!(codec.encode(&TCP, "4001").unwrap(), vec![0x0F, 0xA1]);
        assert_eq!(codec.decode(&SCTP, &[0x00, 0x50]).unwrap(), "80");
    }

    #[test]
    fn test_rejects_malformed_literals() {
        let codec = StandardTranscoder;
        for (p, v) in [
            (IP4, "256.0.0.1"),
            (IP4, "1.2.3"),
            (IP6, "::g"),
            (TCP, "65536"),
            (TCP, "-1"),
            (TCP, ""),
            (UTP, "1"),
        ] {
            let err = codec.encode(&p, v).expect_err("value should be rejected");
            assert_eq!(err.kind(), ErrorKind::InvalidValue, "{p}/{v}");
        }
    }

    #[test]
    fn test_decode_checks_width() {
        let codec = StandardTranscoder;
        assert!(codec.decode(&IP4, &[1, 2, 3]).is_err());
        assert!(codec.decode(&TCP, &[1]).is_err());
        assert!(codec.decode(&UTP, &[1]).is_err());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_valueless() {
        let codec = StandardTranscoder;
        assert!(codec.encode(&UTP, "").unwrap().is_empty());
        assert_eq!(codec.decode(&UTP, &[]).unwrap(), "");
    }
}
