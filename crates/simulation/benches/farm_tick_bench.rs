//! Full-tick throughput bench: a seeded fixture farm with the irrigation
//! system running.
//!
//! Run: cargo bench -p simulation --features bench

use criterion::{criterion_group, criterion_main, Criterion};

use simulation::irrigation::commands::FarmCommand;
use simulation::test_harness::TestFarm;

fn bench_full_tick(c: &mut Criterion) {
    let mut farm = TestFarm::new().with_seed(42);
    farm.send(FarmCommand::StartSystem);
    farm.tick(1);

    c.bench_function("farm_100_ticks", |b| {
        b.iter(|| {
            farm.tick(100);
        })
    });
}

fn bench_single_tick(c: &mut Criterion) {
    let mut farm = TestFarm::new().with_seed(42);
    farm.send(FarmCommand::StartSystem);
    farm.tick(1);

    c.bench_function("farm_single_tick", |b| {
        b.iter(|| {
            farm.tick(1);
        })
    });
}

criterion_group!(benches, bench_full_tick, bench_single_tick);
criterion_main!(benches);
