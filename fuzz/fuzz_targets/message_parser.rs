//! Fuzz target for IRC line parsing
//!
//! Feeds random bytes through the line codec and the parser and checks
//! that neither panics.

#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use std::str;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Framing must cope with arbitrary bytes
    let mut codec = anolis::LineCodec::with_max_len(512);
    let mut buf = BytesMut::from(data);
    while let Ok(Some(line)) = codec.decode(&mut buf) {
        let _ = anolis::Message::parse(&line);
    }
    let _ = codec.decode_eof(&mut buf);

    if let Ok(input) = str::from_utf8(data) {
        // Test message parsing - should never panic
        let _ = input.parse::<anolis::Message>();
    }
});
