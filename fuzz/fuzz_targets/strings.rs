#![no_main]

use libfuzzer_sys::fuzz_target;
use tydec_decoder::{DecoderConfig, MemoryStream, TypedDecoder};

// Fuzz target: NUL-terminated and sized strings, with and without a
// length cap.
//
// Catches bugs in:
// - Unterminated input at end of stream
// - Sized reads longer than the input
// - Trailing NUL stripping
// - Invalid UTF-8
fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };

    let config = DecoderConfig {
        max_string_len: (cap % 2 == 0).then_some(usize::from(cap)),
        ..DecoderConfig::default()
    };
    let mut decoder = TypedDecoder::from_config(MemoryStream::from(rest), config);
    while decoder.raw_string(None).is_ok() {}

    let mut decoder = TypedDecoder::new(MemoryStream::from(rest));
    if let Ok(bytes) = decoder.raw_string(Some(usize::from(cap))) {
        assert!(bytes.last() != Some(&0));
    }
});
