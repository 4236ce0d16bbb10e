//! Built-in converters between `NetAddr` and `Multiaddr`.
//!
//! Only "thin waist" addresses convert back to native form: an IP segment,
//! optionally followed by `/tcp`, `/udp`, or `/udp/../utp`.

use crate::core::multiaddr::{Multiaddr, Segment};
use crate::core::protocol::{self, Protocol};
use crate::error::{MultiaddrError, Result};
use crate::net::addr::NetAddr;
use crate::net::registry::AddressSpec;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// Keys of the built-in address specs, plus the standalone `ip+net` parser.
pub const BUILTIN_KEYS: [&str; 6] = ["tcp", "udp", "utp", "ip4", "ip6", "ip+net"];

/// The built-in address specs, in registration order.
pub fn builtin_specs() -> Vec<AddressSpec> {
    vec![
        AddressSpec::new(
            protocol::TCP,
            &["tcp", "tcp4", "tcp6"],
            parse_tcp_net_addr,
            parse_basic_net_maddr,
        ),
        AddressSpec::new(
            protocol::UDP,
            &["udp", "udp4", "udp6"],
            parse_udp_net_addr,
            parse_basic_net_maddr,
        ),
        AddressSpec::new(
            protocol::UTP,
            &["utp", "utp4", "utp6"],
            parse_utp_net_addr,
            parse_basic_net_maddr,
        ),
        AddressSpec::new(
            protocol::IP4,
            &["ip4"],
            parse_ip_net_addr,
            parse_basic_net_maddr,
        ),
        AddressSpec::new(
            protocol::IP6,
            &["ip6"],
            parse_ip_net_addr,
            parse_basic_net_maddr,
        ),
    ]
}

/// `/ip4/<a>` or `/ip6/<a>`.
pub fn ip_multiaddr(ip: IpAddr) -> Multiaddr {
    let (protocol, octets): (Protocol, Vec<u8>) = match ip {
        IpAddr::V4(v4) => (protocol::IP4, v4.octets().to_vec()),
        IpAddr::V6(v6) => (protocol::IP6, v6.octets().to_vec()),
    };
    let mut bytes = Vec::with_capacity(1 + octets.len());
    bytes.push(protocol.code);
    bytes.extend_from_slice(&octets);
    Multiaddr::from_bytes(bytes)
}

fn socket_multiaddr(sa: &SocketAddr, transport: Protocol) -> Result<Multiaddr> {
    let port = Multiaddr::from_segment(transport, &sa.port().to_be_bytes())?;
    Ok(ip_multiaddr(sa.ip()).encapsulate(&port))
}

fn mismatch(expected: &'static str, addr: &NetAddr) -> MultiaddrError {
    MultiaddrError::AddressMismatch {
        expected,
        found: addr.network().into_owned(),
    }
}

pub fn parse_tcp_net_addr(addr: &NetAddr) -> Result<Multiaddr> {
    match addr {
        NetAddr::Tcp(sa) => socket_multiaddr(sa, protocol::TCP),
        other => Err(mismatch("tcp", other)),
    }
}

pub fn parse_udp_net_addr(addr: &NetAddr) -> Result<Multiaddr> {
    match addr {
        NetAddr::Udp(sa) => socket_multiaddr(sa, protocol::UDP),
        other => Err(mismatch("udp", other)),
    }
}

pub fn parse_utp_net_addr(addr: &NetAddr) -> Result<Multiaddr> {
    match addr {
        NetAddr::Utp(sa) => {
            let utp = Multiaddr::from_segment(protocol::UTP, &[])?;
            Ok(socket_multiaddr(sa, protocol::UDP)?.encapsulate(&utp))
        }
        other => Err(mismatch("utp", other)),
    }
}

pub fn parse_ip_net_addr(addr: &NetAddr) -> Result<Multiaddr> {
    match addr {
        NetAddr::Ip(ip) => Ok(ip_multiaddr(*ip)),
        other => Err(mismatch("ip", other)),
    }
}

/// The mask is dropped; only the interface address is kept.
pub fn parse_ip_plus_net_addr(addr: &NetAddr) -> Result<Multiaddr> {
    match addr {
        NetAddr::IpNet { addr, .. } => Ok(ip_multiaddr(*addr)),
        other => Err(mismatch("ip+net", other)),
    }
}

/// Reverse converter shared by every built-in spec.
pub fn parse_basic_net_maddr(maddr: &Multiaddr) -> Result<NetAddr> {
    let segments = maddr.iter().collect::<Result<Vec<Segment<'_>>>>()?;

    let not_thin_waist = || {
        MultiaddrError::NotThinWaist(
            maddr
                .format()
                .unwrap_or_else(|_| format!("{:02x?}", maddr.as_bytes())),
        )
    };

    let (first, rest) = segments.split_first().ok_or_else(not_thin_waist)?;
    let ip = segment_ip(first).ok_or_else(not_thin_waist)?;

    let codes: Vec<u8> = rest.iter().map(|s| s.protocol.code).collect();
    match codes.as_slice() {
        [] => Ok(NetAddr::Ip(ip)),
        [c] if *c == protocol::TCP.code => {
            Ok(NetAddr::Tcp(SocketAddr::new(ip, port(&rest[0])?)))
        }
        [c] if *c == protocol::UDP.code => {
            Ok(NetAddr::Udp(SocketAddr::new(ip, port(&rest[0])?)))
        }
        [u, t] if *u == protocol::UDP.code && *t == protocol::UTP.code => {
            Ok(NetAddr::Utp(SocketAddr::new(ip, port(&rest[0])?)))
        }
        _ => Err(not_thin_waist()),
    }
}

/// Dial arguments for a thin waist address, e.g. `("tcp4", "10.0.0.1:80")`.
///
/// A bare IP address yields `("ip4" | "ip6", "<ip>")`.
pub fn dial_args(maddr: &Multiaddr) -> Result<(String, String)> {
    let addr = parse_basic_net_maddr(maddr)?;
    let family = |ip: &IpAddr| if ip.is_ipv4() { "4" } else { "6" };

    Ok(match &addr {
        NetAddr::Tcp(sa) => (format!("tcp{}", family(&sa.ip())), sa.to_string()),
        NetAddr::Udp(sa) => (format!("udp{}", family(&sa.ip())), sa.to_string()),
        NetAddr::Utp(sa) => (format!("utp{}", family(&sa.ip())), sa.to_string()),
        NetAddr::Ip(ip) => (format!("ip{}", family(ip)), ip.to_string()),
        NetAddr::IpNet { .. } | NetAddr::Other { .. } => {
            return Err(MultiaddrError::NotThinWaist(addr.to_string()))
        }
    })
}

fn segment_ip(segment: &Segment<'_>) -> Option<IpAddr> {
    if segment.protocol.code == protocol::IP4.code {
        let octets: [u8; 4] = segment.value.try_into().ok()?;
        Some(IpAddr::V4(Ipv4Addr::from(octets)))
    } else if segment.protocol.code == protocol::IP6.code {
        let octets: [u8; 16] = segment.value.try_into().ok()?;
        Some(IpAddr::V6(Ipv6Addr::from(octets)))
    } else {
        None
    }
}

fn port(segment: &Segment<'_>) -> Result<u16> {
    let bytes: [u8; 2] = segment.value.try_into().map_err(|_| {
        MultiaddrError::invalid_value(segment.protocol.name, "port must be 2 bytes")
    })?;
    Ok(u16::from_be_bytes(bytes))
}
