use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strata_animation::{AnimationOptions, Animator, TimingCurve};
use strata_core::{LayerValues, Rect};

fn easing_benchmark(c: &mut Criterion) {
    c.bench_function("ease_in_out_cubic", |b| {
        b.iter(|| black_box(TimingCurve::EaseInOutCubic.ease(black_box(0.37))))
    });
}

fn tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("animate_if_needed");

    for count in [10, 100, 1_000].iter() {
        let mut animator = Animator::new();
        let layers: Vec<_> = (0..*count)
            .map(|i| {
                animator.add_layer(LayerValues::with_frame(Rect::new(i as f32, 0.0, 10.0, 10.0)))
            })
            .collect();

        // Long enough that nothing completes while measuring
        animator.animate(
            3_600.0,
            0.0,
            AnimationOptions::default(),
            |a| {
                for &id in &layers {
                    let _ = a.set_frame(id, Rect::new(0.0, 100.0, 20.0, 20.0));
                    let _ = a.set_opacity(id, 0.5);
                }
            },
            None,
        );
        animator.animate_if_needed(0.0);

        let mut now = 0.0;
        group.bench_function(format!("{}_layers", count), |b| {
            b.iter(|| {
                now += 16.0;
                black_box(animator.animate_if_needed(black_box(now)))
            })
        });
    }
    group.finish();
}

// Idle layers must not cost anything per tick
fn idle_tick_benchmark(c: &mut Criterion) {
    let mut animator = Animator::with_config(strata_animation::AnimatorConfig::without_implicit());
    for i in 0..10_000 {
        animator.add_layer(LayerValues::with_frame(Rect::new(i as f32, 0.0, 1.0, 1.0)));
    }

    c.bench_function("idle_tick_10000_layers", |b| {
        b.iter(|| black_box(animator.animate_if_needed(black_box(16.0))))
    });
}

criterion_group!(benches, easing_benchmark, tick_benchmark, idle_tick_benchmark);
criterion_main!(benches);
