//! Lookahead and slice behavior across stream handles and nesting.

use tydec_decoder::{
    ByteStream, DecodeError, DecoderConfig, Endianness, MemoryStream, SignedByteOrder, StreamError,
    TypedDecoder, Value, WireType,
};
use tydec_tests::counting_u32;

fn counting(n: u32) -> TypedDecoder<MemoryStream> {
    TypedDecoder::with_endian_policy(MemoryStream::from(counting_u32(n)), Endianness::Little)
}

// ── Lookahead ─────────────────────────────────────────────────────────────────

#[test]
fn lookahead_restores_after_failure() {
    let mut d = counting(2);
    d.skip(6).unwrap();

    let err = d.lookahead(|d| d.uint64(None)).unwrap_err();
    assert!(err.is_read_failure());
    assert_eq!(d.offset(), 6);
    assert_eq!(d.uint16(None).unwrap(), 0);
}

#[test]
fn lookahead_restores_after_seeking_away() {
    let mut d = counting(4);
    d.skip(4).unwrap();

    let last = d
        .lookahead(|d| {
            d.seek(12)?;
            d.uint32(None)
        })
        .unwrap();
    assert_eq!(last, 3);
    assert_eq!(d.uint32(None).unwrap(), 1);
}

#[test]
fn nested_lookaheads_each_restore() {
    let mut d = counting(3);
    let (outer, inner) = d
        .lookahead(|d| {
            let outer = d.uint32(None)?;
            let inner = d.lookahead(|d| d.uint32(None))?;
            assert_eq!(d.offset(), 4);
            Ok((outer, inner))
        })
        .unwrap();

    assert_eq!((outer, inner), (0, 1));
    assert_eq!(d.offset(), 0);
}

#[test]
fn lookahead_through_a_reborrowed_byte_order() {
    let mut stream = MemoryStream::from(vec![0x00, 0x2A]);
    let mut d = TypedDecoder::with_endian_policy(&mut stream, Endianness::Little);

    let big = d.with_big_endian().lookahead(|d| d.uint16(None)).unwrap();
    assert_eq!(big, 42);
    assert_eq!(d.uint16(None).unwrap(), 0x2A00);
}

// ── Slice ─────────────────────────────────────────────────────────────────────

#[test]
fn slice_inherits_configuration() {
    let config = DecoderConfig {
        signed_order: SignedByteOrder::Resolved,
        max_string_len: Some(3),
        ..DecoderConfig::with_endianness(Endianness::Big)
    };
    let mut d = TypedDecoder::from_config(MemoryStream::from(b"\xFF\xFEabcdef\0".to_vec()), config);

    let mut child = d.slice(9).unwrap();
    assert_eq!(child.config(), &config);
    assert_eq!(child.int16().unwrap(), -2);
    assert!(matches!(
        child.string(None),
        Err(DecodeError::StringTooLong { limit: 3, .. })
    ));
}

#[test]
fn short_slice_leaves_parent_in_place() {
    let mut d = counting(1);
    d.skip(1).unwrap();

    let err = d.slice(4).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Stream(StreamError::ReadFailure { requested: 4, available: 3, offset: 1 })
    ));
    assert_eq!(d.offset(), 1);
}

#[test]
fn empty_slice_is_completed() {
    let mut d = counting(1);
    let child = d.slice(0).unwrap();
    assert!(child.is_completed());
    assert_eq!(child.stream().len(), 0);
    assert_eq!(d.offset(), 0);
}

#[test]
fn slice_of_slice_and_rewind() {
    let mut d = counting(4);
    let mut outer = d.slice(16).unwrap();
    outer.skip(4).unwrap();
    let mut inner = outer.slice(8).unwrap();

    assert_eq!(
        inner.array(2, WireType::Uint32, None).unwrap(),
        vec![Value::U32(1), Value::U32(2)]
    );
    inner.rewind().unwrap();
    assert_eq!(inner.uint32(None).unwrap(), 1);
    assert_eq!(outer.uint32(None).unwrap(), 3);
}

#[test]
fn slice_from_a_borrowed_stream() {
    let mut stream = MemoryStream::from(counting_u32(2));
    {
        let mut d = TypedDecoder::with_endian_policy(&mut stream, Endianness::Little);
        let mut child = d.slice(4).unwrap();
        assert_eq!(child.uint32(None).unwrap(), 0);
    }
    assert_eq!(stream.offset(), 4);
}
