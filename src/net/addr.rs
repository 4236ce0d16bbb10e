//! Native socket-address values bridged by the registry.

use std::borrow::Cow;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Family name for an IP address with a network mask.
pub const IP_PLUS_NET: &str = "ip+net";

/// A native address, tagged with the family it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetAddr {
    Tcp(SocketAddr),
    Udp(SocketAddr),
    /// Micro transport protocol endpoint (runs over UDP)
    Utp(SocketAddr),
    Ip(IpAddr),
    /// Interface address with its prefix length
    IpNet { addr: IpAddr, prefix_len: u8 },
    /// Family not known to this crate; converters registered by the embedder
    /// interpret `address`.
    Other { network: String, address: String },
}

impl NetAddr {
    /// Family name used to look up the converter in the registry.
    pub fn network(&self) -> Cow<'_, str> {
        match self {
            NetAddr::Tcp(_) => Cow::Borrowed("tcp"),
            NetAddr::Udp(_) => Cow::Borrowed("udp"),
            NetAddr::Utp(_) => Cow::Borrowed("utp"),
            NetAddr::Ip(IpAddr::V4(_)) => Cow::Borrowed("ip4"),
            NetAddr::Ip(IpAddr::V6(_)) => Cow::Borrowed("ip6"),
            NetAddr::IpNet { .. } => Cow::Borrowed(IP_PLUS_NET),
            NetAddr::Other { network, .. } => Cow::Borrowed(network.as_str()),
        }
    }

    /// The IP part of the address, if it has one.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            NetAddr::Tcp(sa) | NetAddr::Udp(sa) | NetAddr::Utp(sa) => Some(sa.ip()),
            NetAddr::Ip(ip) => Some(*ip),
            NetAddr::IpNet { addr, .. } => Some(*addr),
            NetAddr::Other { .. } => None,
        }
    }
}

impl fmt::Display for NetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetAddr::Tcp(sa) | NetAddr::Udp(sa) | NetAddr::Utp(sa) => write!(f, "{sa}"),
            NetAddr::Ip(ip) => write!(f, "{ip}"),
            NetAddr::IpNet { addr, prefix_len } => write!(f, "{addr}/{prefix_len}"),
            NetAddr::Other { address, .. } => f.write_str(address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_network_names() {
        let sa: SocketAddr = ([127, 0, 0, 1], 80).into();
        assert_eq!(NetAddr::Tcp(sa).network(), "tcp");
        assert_eq!(NetAddr::Utp(sa).network(), "utp");
        assert_eq!(NetAddr::Ip(IpAddr::V4(Ipv4Addr::LOCALHOST)).network(), "ip4");
        assert_eq!(NetAddr::Ip(IpAddr::V6(Ipv6Addr::LOCALHOST)).network(), "ip6");
        let net = NetAddr::IpNet {
            addr: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            prefix_len: 8,
        };
        assert_eq!(net.network(), IP_PLUS_NET);
        assert_eq!(net.to_string(), "10.0.0.1/8");
    }

    #[test]
    fn test_other_family() {
        let addr = NetAddr::Other {
            network: "unix".into(),
            address: "/tmp/sock".into(),
        };
        assert_eq!(addr.network(), "unix");
        assert_eq!(addr.ip(), None);
    }
}
