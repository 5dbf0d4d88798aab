//! # Status Report Benchmarks
//!
//! Measures the read path: seven live queries plus text rendering.
//!
//! Run: `cargo bench --bench report_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use als_core::report::build_report;
use als_core::{AcpiDevice, AlsState, EnableFlag, MethodTable, SimulatedFirmware};

fn populated() -> SimulatedFirmware {
    SimulatedFirmware::new()
        .with_value("\\_SB_.ALAE", 1)
        .with_value("\\_SB_.LSTP", 1)
        .with_value("\\_SB_.BRTI", 6)
        .with_value("\\_SB_.ALS_._ALI", 235)
        .with_value("\\_SB.ATKD.GALS", 4)
        .with_value("\\_SB_.PCI0.LPCB.EC0_.RALS", 90)
}

/// Benchmark report construction
fn bench_build_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_report");
    let device = AcpiDevice::new("ACPI0008", "\\_SB_.ALS_");
    let methods = MethodTable::asus();
    let state = AlsState::new(EnableFlag::ENABLED);

    let firmware = populated();
    group.bench_function("all_present", |b| {
        b.iter(|| {
            firmware.clear_calls();
            black_box(build_report(&firmware, &methods, &state, &device))
        })
    });

    let empty = SimulatedFirmware::new();
    group.bench_function("all_failing", |b| {
        b.iter(|| {
            empty.clear_calls();
            black_box(build_report(&empty, &methods, &state, &device))
        })
    });

    group.finish();
}

/// Benchmark text rendering
fn bench_render(c: &mut Criterion) {
    let device = AcpiDevice::new("ACPI0008", "\\_SB_.ALS_");
    let report = build_report(&populated(), &MethodTable::asus(), &AlsState::default(), &device);

    c.bench_function("render_text", |b| {
        b.iter(|| black_box(report.to_string()))
    });
}

criterion_group!(benches, bench_build_report, bench_render);
criterion_main!(benches);
