//! Benchmark for level generation performance.
//!
//! Run with: cargo bench --bench generation_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use levelgen2d::{
    Direction, FrameId, FramePrototype, FrameSlot, GenSeed, GeneratorConfig, LevelGenerator, Rect,
    SocketId, SocketPrototype, Vec2,
};
use std::collections::VecDeque;

fn socket(key: i32, x: f32, y: f32) -> SocketPrototype {
    SocketPrototype {
        socket_key: key,
        plugs: vec![key],
        local_position: Vec2::new(x, y),
    }
}

fn room_slot(frame_key: i32, weight: f32) -> FrameSlot {
    FrameSlot {
        prototype: FramePrototype {
            frame_key,
            left_bottom: Vec2::new(-2.0, -2.0),
            right_top: Vec2::new(2.0, 2.0),
            sockets: [
                vec![socket(10, -2.0, 0.0)],
                vec![socket(10, 2.0, 0.0)],
                vec![socket(10, 0.0, 2.0)],
                vec![socket(10, 0.0, -2.0)],
            ],
        },
        weight,
        count: -1,
    }
}

fn config(half_extent: f32) -> GeneratorConfig {
    GeneratorConfig {
        bounds: Some(Rect::new(
            Vec2::new(-half_extent, -half_extent),
            Vec2::new(half_extent, half_extent),
        )),
        frames: vec![room_slot(1, 1.0), room_slot(2, 2.0), room_slot(3, 0.5)],
        layer_orders: vec![],
    }
}

/// Breadth-first fill of the whole bounded area.
fn fill(generator: &mut LevelGenerator) -> usize {
    let start = generator.add_other_frame(0, Vec2::ZERO);
    let mut frontier: VecDeque<SocketId> = VecDeque::new();
    push_sockets(generator, start, &mut frontier);

    while let Some(socket) = frontier.pop_front() {
        let position = generator.socket_world_position(socket);
        if let Some(frame) = generator.generate_level(socket.direction, socket, position) {
            push_sockets(generator, frame, &mut frontier);
        }
    }

    generator.placed_frame_count()
}

fn push_sockets(generator: &LevelGenerator, frame: FrameId, frontier: &mut VecDeque<SocketId>) {
    let proto = generator.frame_prototype(frame);
    for direction in Direction::ALL {
        for index in 0..proto.socket_count(direction) {
            frontier.push_back(SocketId::new(frame, direction, index));
        }
    }
}

fn benchmark_single_expansion(c: &mut Criterion) {
    c.bench_function("single_socket_expansion", |b| {
        b.iter_with_setup(
            || {
                let mut generator =
                    LevelGenerator::new(config(1000.0), GenSeed::new(42)).unwrap();
                let start = generator.add_other_frame(0, Vec2::ZERO);
                (generator, SocketId::new(start, Direction::Right, 0))
            },
            |(mut generator, socket)| {
                let position = generator.socket_world_position(socket);
                black_box(generator.generate_level(Direction::Right, socket, position))
            },
        );
    });
}

fn benchmark_bounded_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_fill");
    group.sample_size(20);

    // 50x50 room grid worth of area
    group.throughput(Throughput::Elements(50 * 50));
    group.bench_function("100x100_area", |b| {
        b.iter(|| {
            let mut generator = LevelGenerator::new(config(50.0), GenSeed::new(42)).unwrap();
            black_box(fill(&mut generator))
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_expansion, benchmark_bounded_fill);
criterion_main!(benches);
