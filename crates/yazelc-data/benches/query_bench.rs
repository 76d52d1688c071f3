use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use yazelc_data::ecs::{Component, World};

#[derive(Component, Debug, Clone, Copy, Default)]
struct Position(u32);

#[derive(Component, Debug, Clone, Copy, Default)]
struct Velocity(u32);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NoEvent;

impl yazelc_core::Event for NoEvent {
    type Kind = ();

    fn kind(&self) -> Self::Kind {}
}

fn bench_queries(c: &mut Criterion) {
    let mut world: World<NoEvent> = World::default();

    // 10,000 entities, half of them moving
    for i in 0..10_000 {
        if i % 2 == 0 {
            world.create_entity((Position(i), Velocity(1))).unwrap();
        } else {
            world.create_entity((Position(i),)).unwrap();
        }
    }

    let mut group = c.benchmark_group("ECS Queries");

    group.bench_function("Join (Position & Velocity)", |b| {
        b.iter(|| {
            let mut count = 0;
            for (_, (pos, vel)) in world.query::<(&Position, &Velocity)>() {
                count += pos.0 + vel.0;
                black_box(count);
            }
        });
    });

    group.bench_function("Single column (Position)", |b| {
        b.iter(|| {
            let mut count = 0;
            for (_, pos) in world.query::<&Position>() {
                count += pos.0;
                black_box(count);
            }
        });
    });

    group.bench_function("Mutable join", |b| {
        b.iter(|| {
            for (_, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
                pos.0 = pos.0.wrapping_add(vel.0);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
