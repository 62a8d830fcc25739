#![no_main]

use libfuzzer_sys::fuzz_target;
use rtcp_tmmbn::{Header, Tmmbn};

fuzz_target!(|data: &[u8]| {
    let mut buf = data;
    if let Ok(header) = Header::unmarshal(&mut buf) {
        let _ = Tmmbn::parse(&header, buf);
    }
});
