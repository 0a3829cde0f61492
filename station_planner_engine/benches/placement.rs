// Criterion benchmarks for the placement hot paths.
//
// - transform search: merging two pipe pieces into one shape.
// - placement check against a populated grid.
// - filling a plan with a pipe lattice through the command stack.
//
// Run with: cargo bench -p station_planner_engine --bench placement

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use station_planner_engine::connection::{ConnectionPattern, Direction};
use station_planner_engine::object::GameObject;
use station_planner_engine::placement;
use station_planner_engine::plan::BuildPlan;
use station_planner_engine::transform::{calculate_transform, find_variant_for_pattern};
use station_planner_engine::types::{Grid3, Rotation};
use station_planner_engine::variant::{PipePiece, PipeVariant, Variant};

fn lattice(plan: &mut BuildPlan, side: i32) {
    for x in 0..side {
        for z in 0..side {
            let id = plan.next_id();
            let pos = Grid3::new(x * 5, 0, z * 5);
            plan.place(GameObject::pipe(id, PipeVariant::gas(PipePiece::Straight), pos, Rotation::IDENTITY));
            let id = plan.next_id();
            plan.place(GameObject::pipe(id, PipeVariant::gas(PipePiece::Straight), pos, Rotation::yaw(90)));
        }
    }
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let mut plan = BuildPlan::new(1);
    let existing = {
        let id = plan.next_id();
        GameObject::pipe(id, PipeVariant::gas(PipePiece::Straight), Grid3::default(), Rotation::IDENTITY)
    };
    let incoming = {
        let id = plan.next_id();
        GameObject::pipe(id, PipeVariant::gas(PipePiece::Corner), Grid3::default(), Rotation::yaw(270))
    };
    group.bench_function("calculate_transform", |b| {
        b.iter(|| black_box(calculate_transform(black_box(&existing), black_box(&incoming))));
    });

    let template = Variant::Pipe(PipeVariant::gas(PipePiece::Straight));
    let five = ConnectionPattern::from_directions(&[
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::PosZ,
        Direction::NegZ,
    ]);
    group.bench_function("find_variant_five_way", |b| {
        b.iter(|| black_box(find_variant_for_pattern(black_box(&five), &template)));
    });
    group.finish();
}

fn bench_check(c: &mut Criterion) {
    let mut plan = BuildPlan::new(2);
    lattice(&mut plan, 32);
    let probe = {
        let id = plan.next_id();
        GameObject::pipe(id, PipeVariant::gas(PipePiece::Cross6), Grid3::new(80, 0, 80), Rotation::IDENTITY)
    };
    c.bench_function("can_place_populated", |b| {
        b.iter(|| black_box(placement::can_place(plan.grid(), black_box(&probe))));
    });
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");
    group.sample_size(20);
    group.bench_function("lattice_16x16", |b| {
        b.iter(|| {
            let mut plan = BuildPlan::new(3);
            lattice(&mut plan, 16);
            black_box(plan.grid().object_count())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_transform, bench_check, bench_fill);
criterion_main!(benches);
