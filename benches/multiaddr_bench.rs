use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use multiaddr_net::net::{AddressRegistry, NetAddr};
use multiaddr_net::Multiaddr;
use std::net::SocketAddr;

#[allow(clippy::unwrap_used)]
fn bench_parse_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiaddr_text");
    let inputs = [
        "/ip4/127.0.0.1/tcp/4001",
        "/ip6/2001:db8::ff00:42:8329/udp/4433/utp",
        "/ip4/10.0.0.1/tcp/80/ip4/10.0.0.2/tcp/443/ip6/::1/sctp/9",
    ];

    for text in inputs {
        let parsed = Multiaddr::parse(text).unwrap();
        group.throughput(Throughput::Bytes(parsed.len() as u64));
        group.bench_function(format!("parse_{}b", parsed.len()), |b| {
            b.iter(|| Multiaddr::parse(black_box(text)).unwrap())
        });
        group.bench_function(format!("format_{}b", parsed.len()), |b| {
            b.iter(|| black_box(&parsed).format().unwrap())
        });
        group.bench_function(format!("segments_{}b", parsed.len()), |b| {
            b.iter(|| black_box(&parsed).segments().unwrap())
        });
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_registry(c: &mut Criterion) {
    let registry = AddressRegistry::with_builtins().unwrap();
    let sa: SocketAddr = "192.168.0.1:9000".parse().unwrap();
    let native = NetAddr::Tcp(sa);
    let maddr = registry.from_net_addr(&native).unwrap();

    c.bench_function("from_net_addr_tcp", |b| {
        b.iter(|| registry.from_net_addr(black_box(&native)).unwrap())
    });
    c.bench_function("to_net_addr_tcp", |b| {
        b.iter(|| registry.to_net_addr(black_box(&maddr)).unwrap())
    });
}

criterion_group!(benches, bench_parse_format, bench_registry);
criterion_main!(benches);
