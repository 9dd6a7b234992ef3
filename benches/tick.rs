//! Benchmarks for per-frame field work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use netglow::{FieldConfig, ParticleField, PointerEvent, RecordingSurface, Vec2};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for &count in &[20usize, 48, 80, 200] {
        let config = FieldConfig::default().with_max_particles(count);
        // Large enough that the cap, not the area, sets the count
        let mut field = ParticleField::seeded(config, 4000.0, 4000.0, 42).unwrap();
        field.update_pointer(PointerEvent::surface_local(Vec2::new(2000.0, 2000.0)));
        let mut surface = RecordingSurface::new();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                surface.begin_frame();
                black_box(field.tick(&mut surface))
            })
        });
    }

    group.finish();
}

fn bench_step_only(c: &mut Criterion) {
    let mut field = ParticleField::seeded(FieldConfig::default(), 1920.0, 1080.0, 7).unwrap();
    field.update_pointer(PointerEvent::surface_local(Vec2::new(960.0, 540.0)));

    c.bench_function("step_80", |b| b.iter(|| black_box(field.step())));
}

fn bench_links(c: &mut Criterion) {
    let field = ParticleField::seeded(FieldConfig::default(), 1920.0, 1080.0, 7).unwrap();

    c.bench_function("links_80", |b| b.iter(|| black_box(field.links().count())));
}

criterion_group!(benches, bench_tick, bench_step_only, bench_links);
criterion_main!(benches);
