//! Port state machine benchmarks.
//!
//! Measures event dispatch cost over the pass-through policy: table
//! lookups, the mutex round-trip, and the phase machinery with no
//! blocking or tracing in play.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use weir_core::{NullPolicy, PortStateMachine, ThreeStage, TwoStage};

fn bench_two_stage_cycle(c: &mut Criterion) {
    let port = PortStateMachine::<TwoStage, _>::new(NullPolicy);
    c.bench_function("two_stage_fill_push_pull_drain", |b| {
        b.iter(|| {
            port.do_fill("");
            port.do_push("");
            port.do_pull("");
            port.do_drain("");
            black_box(port.state())
        });
    });
}

fn bench_three_stage_cycle(c: &mut Criterion) {
    let port = PortStateMachine::<ThreeStage, _>::new(NullPolicy);
    c.bench_function("three_stage_fill_push_pull_drain", |b| {
        b.iter(|| {
            port.do_fill("");
            port.do_push("");
            port.do_pull("");
            port.do_drain("");
            black_box(port.state())
        });
    });
}

fn bench_shutdown_dispatch(c: &mut Criterion) {
    let port = PortStateMachine::<TwoStage, _>::new(NullPolicy);
    c.bench_function("shutdown_intercept", |b| {
        b.iter(|| {
            port.do_shutdown("");
            black_box(port.state())
        });
    });
}

criterion_group!(
    benches,
    bench_two_stage_cycle,
    bench_three_stage_cycle,
    bench_shutdown_dispatch
);
criterion_main!(benches);
