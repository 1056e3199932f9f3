use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tydec_decoder::{Endianness, MemoryStream, TypedDecoder, WireType};
use tydec_tests::{counting_u32, sample_record};

fn bench_primitives(c: &mut Criterion) {
    let bytes = counting_u32(1024);
    let mut group = c.benchmark_group("decode_primitives");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("uint32_loop", |b| {
        b.iter(|| {
            let stream = MemoryStream::from(bytes.as_slice());
            let mut d = TypedDecoder::with_endian_policy(stream, Endianness::Little);
            let mut sum = 0u64;
            while !d.is_completed() {
                sum += u64::from(d.uint32(None).unwrap());
            }
            sum
        });
    });
    group.bench_function("int32_loop", |b| {
        b.iter(|| {
            let mut d = TypedDecoder::new(MemoryStream::from(bytes.as_slice()));
            let mut sum = 0i64;
            while !d.is_completed() {
                sum += i64::from(d.int32().unwrap());
            }
            sum
        });
    });

    group.finish();
}

fn bench_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_array");

    for count in [16u32, 256, 4096] {
        let bytes = counting_u32(count);
        let size = usize::try_from(count).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("uint32", count), &bytes, |b, bytes| {
            b.iter(|| {
                TypedDecoder::new(MemoryStream::from(bytes.as_slice()))
                    .array(size, WireType::Uint32, Some(Endianness::Little))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_record(c: &mut Criterion) {
    let record = sample_record();

    c.bench_function("decode_sample_record", |b| {
        b.iter(|| {
            let stream = MemoryStream::from(record.as_slice());
            let mut d = TypedDecoder::with_endian_policy(stream, Endianness::Big);
            let magic = d.string(Some(4)).unwrap();
            let version = d.lookahead(|d| d.uint16(None)).unwrap();
            let mut header = d.slice(8).unwrap();
            header.skip(3).unwrap();
            let created = header.timestamp_default(None).unwrap();
            let count = header.uint8().unwrap();
            let readings = d.array(usize::from(count), WireType::Float32, None).unwrap();
            let name = d.string(None).unwrap();
            (magic, version, created, readings, name)
        });
    });
}

criterion_group!(benches, bench_primitives, bench_array, bench_record);
criterion_main!(benches);
