#![no_main]

use libfuzzer_sys::fuzz_target;
use multiaddr_net::Multiaddr;

fuzz_target!(|data: &[u8]| {
    // Fuzz the text grammar - test for panics on arbitrary input
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(ma) = Multiaddr::parse(text) {
            let _ = ma.format();
        }
    }
});
