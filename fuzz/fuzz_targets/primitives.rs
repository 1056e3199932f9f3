#![no_main]

use libfuzzer_sys::fuzz_target;
use tydec_decoder::{MemoryStream, TypedDecoder, WireType};

// Fuzz target: every scalar decoder over arbitrary bytes.
//
// The first byte picks the wire type; the rest is decoded as values of
// that type until the stream runs dry. Short reads must surface as errors.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let ty = WireType::ALL[usize::from(selector) % WireType::ALL.len()];
    let mut decoder = TypedDecoder::new(MemoryStream::from(rest));

    while !decoder.is_completed() {
        let before = decoder.offset();
        match decoder.value(ty, None) {
            Ok(value) => assert_eq!(value.wire_type(), ty),
            Err(e) => {
                assert!(e.is_read_failure());
                assert_eq!(decoder.offset(), before);
                break;
            }
        }
    }
});
