#![no_main]

use libfuzzer_sys::fuzz_target;
use multiaddr_net::Multiaddr;

fuzz_target!(|data: &[u8]| {
    // Walking arbitrary bytes must never panic
    let ma = Multiaddr::from(data.to_vec());
    let _ = ma.segments();

    // Anything that formats must parse back to the same bytes
    if let Ok(text) = ma.format() {
        let reparsed = Multiaddr::parse(&text).expect("formatted text should parse");
        assert_eq!(reparsed.as_bytes(), data);
    }
});
