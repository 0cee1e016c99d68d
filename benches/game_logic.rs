use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use lane_dodge::core::{advance_obstacles, find_collision, Obstacle, RunSnapshot, RunState};
use lane_dodge::engine::GameSession;
use lane_dodge::term::{FrameBuffer, TrackView, Viewport};
use lane_dodge::types::{Lane, ObstacleKind, PlayerName, MOTION_TICK_MS};

fn crowded_track() -> Vec<Obstacle> {
    (0..30)
        .map(|i| {
            let lane = Lane::ALL[i % 3];
            let kind = if i % 4 == 0 { ObstacleKind::Fast } else { ObstacleKind::Normal };
            Obstacle::new(i as u32, lane, kind).at((i as f32) * 14.0)
        })
        .collect()
}

fn bench_motion_step(c: &mut Criterion) {
    c.bench_function("motion_step_30_obstacles", |b| {
        b.iter_batched(
            crowded_track,
            |mut obstacles| advance_obstacles(black_box(&mut obstacles), black_box(250)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_collision(c: &mut Criterion) {
    let obstacles = crowded_track();
    c.bench_function("find_collision_30_obstacles", |b| {
        b.iter(|| find_collision(black_box(&obstacles), black_box(Lane::Center)).is_some())
    });
}

fn bench_run_tick(c: &mut Criterion) {
    c.bench_function("run_tick", |b| {
        b.iter_batched(
            || {
                let mut run = RunState::new(12345);
                for _ in 0..5 {
                    run.spawn_obstacle();
                }
                run
            },
            |mut run| run.tick(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_session_second(c: &mut Criterion) {
    c.bench_function("session_one_second", |b| {
        b.iter_batched(
            || GameSession::new(PlayerName::parse("bench").unwrap(), 7),
            |mut s| s.advance(black_box(10 * MOTION_TICK_MS)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_track_render(c: &mut Criterion) {
    let view = TrackView::new();
    let snap = RunSnapshot {
        obstacles: crowded_track(),
        score: 1234,
        ..RunSnapshot::default()
    };
    let mut fb = FrameBuffer::new(120, 40);
    c.bench_function("track_render_into", |b| {
        b.iter(|| view.render_into(black_box(&snap), "bench", Viewport::new(120, 40), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_motion_step,
    bench_collision,
    bench_run_tick,
    bench_session_second,
    bench_track_render
);
criterion_main!(benches);
