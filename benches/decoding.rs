use bi4::array::ArrayKey;
use bi4::locator::{locate, marker_pattern};
use bi4::snapshot::Snapshot;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Build a snapshot with `n` particles of positions, velocities and densities
fn synthetic_snapshot(n: usize) -> Snapshot {
    let mut buf = b"#BI4 synthetic".to_vec();
    buf.extend(marker_pattern("TimeStep", b'\x17'));
    buf.extend([0u8; 4]);
    buf.extend(1.0f64.to_le_bytes());
    buf.extend(marker_pattern("CaseNp", b'\x17'));
    buf.extend([0u8; 4]);
    buf.extend((n as i32).to_le_bytes());

    for (key, columns) in [(ArrayKey::POS, 3), (ArrayKey::VEL, 3), (ArrayKey::RHOP, 1)] {
        buf.extend(key.signature());
        buf.extend([0u8; 8]);
        buf.extend((n as i32).to_le_bytes());
        buf.extend([0u8; 4]);
        for i in 0..n * columns {
            buf.extend((i as f32).to_le_bytes());
        }
    }
    Snapshot::from_bytes("Part_0000.bi4", buf)
}

/// Marker search with the lowest-priority terminator (worst case)
fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    for n in [1_000, 100_000] {
        let snap = synthetic_snapshot(n);
        group.throughput(Throughput::Bytes(snap.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}particles", n)), &snap, |b, snap| {
            b.iter(|| {
                let found = locate(black_box(snap.as_bytes()), "CaseNp", 0).unwrap();
                black_box(found);
            });
        });
    }

    group.finish();
}

/// Array decoding throughput
fn bench_decode_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_array");

    for n in [1_000, 100_000, 1_000_000] {
        let snap = synthetic_snapshot(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}particles", n)), &snap, |b, snap| {
            b.iter(|| {
                let rhop = snap.array(black_box(&ArrayKey::RHOP)).unwrap();
                black_box(rhop);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_locate, bench_decode_array);
criterion_main!(benches);
