// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use tether_placement::{Collision, Offset, Placement, PositionInput, compute_position};
use tether_stack::{Key, OverlayBase, OverlayClass, OverlayStack};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Anchors scattered over (and slightly past) a 1280×800 viewport, so a good share of
/// requests flips and shifts.
fn gen_inputs(count: usize, seed: u64) -> Vec<PositionInput> {
    let mut rng = Rng::new(seed);
    let boundary = Rect::new(0.0, 0.0, 1280.0, 800.0);
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let x0 = rng.next_f64() * 1360.0 - 40.0;
        let y0 = rng.next_f64() * 880.0 - 40.0;
        let w = 8.0 + rng.next_f64() * 200.0;
        let h = 8.0 + rng.next_f64() * 40.0;
        out.push(PositionInput {
            anchor: Rect::new(x0, y0, x0 + w, y0 + h),
            overlay: Size::new(120.0 + rng.next_f64() * 240.0, 80.0 + rng.next_f64() * 320.0),
            placement: Placement::ALL[i % Placement::ALL.len()],
            offset: Offset::new(8.0, 0.0),
            collision: Collision::default(),
            boundary,
        });
    }
    out
}

fn bench_compute_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_position");
    for &n in &[256usize, 4096] {
        let inputs = gen_inputs(n, 0x5eed);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("scattered_n{}", n), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for input in &inputs {
                    let out = compute_position(black_box(input));
                    acc += out.left + out.top;
                }
                black_box(acc)
            })
        });
    }
    let inputs: Vec<_> = gen_inputs(4096, 7)
        .into_iter()
        .map(|mut i| {
            i.collision = Collision::NONE;
            i
        })
        .collect();
    group.bench_function("no_collision_n4096", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(compute_position(black_box(input)));
            }
        })
    });
    group.finish();
}

fn bench_stack(c: &mut Criterion) {
    const MENU: OverlayClass = OverlayClass("menu");
    const SUB: OverlayClass = OverlayClass("submenu");
    let mut group = c.benchmark_group("overlay_stack");
    for &depth in &[4usize, 32] {
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("admit_then_escape_d{}", depth), |b| {
            b.iter_batched(
                OverlayStack::new,
                |mut stack| {
                    stack.push(OverlayBase::new(MENU), Duration::ZERO);
                    for _ in 1..depth {
                        let base = OverlayBase::new(SUB).allowing_above(MENU).allowing_above(SUB);
                        black_box(stack.admit(base, Duration::ZERO));
                    }
                    while let Some(d) = stack.handle_key(Key::Escape) {
                        black_box(d);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_position, bench_stack);
criterion_main!(benches);
