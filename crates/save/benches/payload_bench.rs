//! Parcel payload encode/decode benchmarks at 1K, 10K and 100K lots.
//!
//! Run with: `cargo bench -p save --bench payload_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use save::{
    decode_payload, encode_payload, payload_checksum, ParcelRecordPayload, ParcelSavePayload,
    TransformPayload,
};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn build_synthetic_payload(n: usize) -> ParcelSavePayload {
    let parcels = (0..n)
        .map(|i| {
            let record = ParcelRecordPayload {
                zone: (i % 5) as u64 + 1,
                road_edge: (i % 3 == 0).then_some(i as u64),
                curve_position: (i % 100) as f32 / 100.0,
                building: (i % 4 == 0).then_some(i as u64 + 1),
                state: (i % 8) as u8,
            };
            let snapshot = (i % 10 != 0).then(|| TransformPayload {
                position: [(i % 1000) as f32 * 8.0, 0.0, (i / 1000) as f32 * 8.0],
                rotation: [0.0, 0.0, 0.0, 1.0],
            });
            (record, snapshot)
        })
        .collect();
    ParcelSavePayload {
        parcels,
        ..Default::default()
    }
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_encode");
    for n in SIZES {
        let payload = build_synthetic_payload(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &payload, |b, payload| {
            b.iter(|| {
                let bytes = encode_payload(black_box(payload)).expect("encode");
                black_box(payload_checksum(&bytes))
            });
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_decode");
    for n in SIZES {
        let bytes = encode_payload(&build_synthetic_payload(n)).expect("encode");
        group.bench_with_input(BenchmarkId::from_parameter(n), &bytes, |b, bytes| {
            b.iter(|| black_box(decode_payload(black_box(bytes)).expect("decode")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
