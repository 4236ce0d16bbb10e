#![allow(clippy::unwrap_used)]

use multiaddr_net::core::protocol;
use multiaddr_net::net::{convert, AddressRegistry, AddressSpec, NetAddr};
use multiaddr_net::Multiaddr;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_register_and_resolve() {
    use tokio::task::JoinSet;

    let registry = Arc::new(AddressRegistry::with_builtins().unwrap());
    let iterations = 2_000usize;

    let mut tasks = JoinSet::new();

    for writer in 0..4usize {
        let registry = registry.clone();
        tasks.spawn(async move {
            for i in 0..iterations {
                let name = format!("tcp-{writer}-{}", i % 16);
                registry
                    .register(AddressSpec::new(
                        protocol::TCP,
                        &[name.as_str(), "tcp"],
                        convert::parse_tcp_net_addr,
                        convert::parse_basic_net_maddr,
                    ))
                    .unwrap();
            }
        });
    }

    for reader in 0..4u16 {
        let registry = registry.clone();
        tasks.spawn(async move {
            let sa: SocketAddr = ([127, 0, 0, 1], 1000 + reader).into();
            let expected = format!("/ip4/127.0.0.1/tcp/{}", 1000 + reader);
            for _ in 0..iterations {
                let maddr = registry.from_net_addr(&NetAddr::Tcp(sa)).unwrap();
                assert_eq!(maddr.format().unwrap(), expected);
                assert_eq!(registry.to_net_addr(&maddr).unwrap(), NetAddr::Tcp(sa));
            }
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }

    for writer in 0..4usize {
        for slot in 0..16usize {
            assert!(registry
                .resolve_to_multiaddr(&format!("tcp-{writer}-{slot}"))
                .is_ok());
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_parse_shared_addresses() {
    use tokio::task::JoinSet;

    let shared = Arc::new(Multiaddr::parse("/ip6/2001:db8::1/udp/4433/utp").unwrap());
    let mut tasks = JoinSet::new();

    for _ in 0..8 {
        let shared = shared.clone();
        tasks.spawn(async move {
            for _ in 0..5_000 {
                let local = (*shared).clone();
                assert_eq!(local.segments().unwrap().len(), 3);
                let parsed = Multiaddr::parse(&local.format().unwrap()).unwrap();
                assert_eq!(parsed, local);
            }
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }
}
