#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tydec_decoder::{Endianness, MemoryStream, TypedDecoder, WireType};

#[derive(Debug, Arbitrary)]
enum Op {
    Scalar { type_id: u8, big: Option<bool> },
    Char,
    Bitmask(u8),
    Timestamp { type_id: u8 },
    Array { size: u8, type_id: u8 },
    Skip(u8),
    Seek(u16),
    MoveBy(i16),
    Peek { type_id: u8 },
    Slice(u8),
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    data: Vec<u8>,
    ops: Vec<Op>,
}

fn wire_type(id: u8) -> WireType {
    WireType::ALL[usize::from(id) % WireType::ALL.len()]
}

fn order(big: Option<bool>) -> Option<Endianness> {
    big.map(|big| if big { Endianness::Big } else { Endianness::Little })
}

// Fuzz target: arbitrary sequences of decode and navigation calls.
//
// Lookahead must always leave the offset where it found it, and a slice
// must advance the parent by exactly its length or not at all.
fuzz_target!(|input: FuzzInput| {
    let mut d = TypedDecoder::new(MemoryStream::from(input.data));

    for op in input.ops {
        let before = d.offset();
        match op {
            Op::Scalar { type_id, big } => {
                let _ = d.value(wire_type(type_id), order(big));
            }
            Op::Char => {
                let _ = d.char();
            }
            Op::Bitmask(n) => {
                if let Ok(bits) = d.bitmask(usize::from(n)) {
                    assert_eq!(bits.len(), usize::from(n) * 8);
                }
            }
            Op::Timestamp { type_id } => {
                let _ = d.timestamp(wire_type(type_id), None);
            }
            Op::Array { size, type_id } => {
                if let Ok(values) = d.array(usize::from(size), wire_type(type_id), None) {
                    assert_eq!(values.len(), usize::from(size));
                }
            }
            Op::Skip(n) => {
                let _ = d.skip(usize::from(n));
            }
            Op::Seek(offset) => {
                let _ = d.seek(u64::from(offset));
            }
            Op::MoveBy(delta) => {
                let _ = d.move_by(i64::from(delta));
            }
            Op::Peek { type_id } => {
                let _ = d.lookahead(|d| d.value(wire_type(type_id), None));
                assert_eq!(d.offset(), before);
            }
            Op::Slice(n) => match d.slice(usize::from(n)) {
                Ok(child) => {
                    assert_eq!(d.offset(), before + u64::from(n));
                    assert_eq!(child.stream().len(), usize::from(n));
                }
                Err(_) => assert_eq!(d.offset(), before),
            },
        }
    }
});
