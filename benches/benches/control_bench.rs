//! # Control Writer Benchmarks
//!
//! Run: `cargo bench --bench control_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use als_core::control::{parse_uint, set_enable};
use als_core::{AcpiDevice, AlsState, MethodTable, SimulatedFirmware};

/// Benchmark input parsing
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_uint");

    for input in ["1", "0\n", "0x1", "010", "abc", "4294967296"] {
        group.bench_with_input(BenchmarkId::from_parameter(input.trim_end()), input, |b, input| {
            b.iter(|| black_box(parse_uint(input.as_bytes())))
        });
    }

    group.finish();
}

/// Benchmark full write (validate + lock + firmware call)
fn bench_set_enable(c: &mut Criterion) {
    let device = AcpiDevice::new("ACPI0008", "\\_SB_.ALS_");
    let methods = MethodTable::asus();
    let state = AlsState::default();
    let firmware = SimulatedFirmware::new().with_value("\\_SB_.ATKD.ALSC", 0);

    c.bench_function("set_enable", |b| {
        b.iter(|| {
            firmware.clear_calls();
            black_box(set_enable(&firmware, &methods, &state, &device, Some(b"1".as_slice())))
        })
    });
}

criterion_group!(benches, bench_parse, bench_set_enable);
criterion_main!(benches);
