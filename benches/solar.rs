use criterion::{criterion_group, criterion_main, Criterion, black_box};

use sunlight_sim::core::Location;
use sunlight_sim::solar::{daily_illuminance, solar_position, sun_path_segments, sky_color};
use sunlight_sim::time::{HostClock, OffsetMemo, SimulatedInstantBuilder};

fn builder() -> SimulatedInstantBuilder {
    SimulatedInstantBuilder::new(2025, HostClock::from_name(Some("UTC")).expect("valid zone"))
}

fn bench_solar_position(c: &mut Criterion) {
    let b = builder();
    let instant = b.build(172, 720, &Location::krakow()).utc;

    c.bench_function("solar_position", |bench| {
        bench.iter(|| solar_position(black_box(instant), black_box(50.06), black_box(19.94)));
    });
}

fn bench_instant_build(c: &mut Criterion) {
    let b = builder();
    let location = Location::krakow();

    c.bench_function("instant_build_uncached", |bench| {
        bench.iter(|| b.build(black_box(172), black_box(720), &location));
    });

    let mut memo = OffsetMemo::new();
    c.bench_function("instant_build_memo", |bench| {
        bench.iter(|| {
            let diff = memo.get(&b, black_box(172), &location.time_zone);
            b.build_with_offset(172, black_box(720), diff)
        });
    });
}

fn bench_daily_illuminance(c: &mut Criterion) {
    let b = builder();
    let location = Location::krakow();

    c.bench_function("daily_illuminance", |bench| {
        bench.iter(|| daily_illuminance(&b, black_box(172), &location));
    });
}

fn bench_sun_path(c: &mut Criterion) {
    let b = builder();
    let location = Location::new(69.65, 18.96, "Europe/Oslo");

    c.bench_function("sun_path_97_samples", |bench| {
        bench.iter(|| sun_path_segments(&b, black_box(80), &location));
    });
}

fn bench_sky_color(c: &mut Criterion) {
    c.bench_function("sky_color_sweep", |bench| {
        bench.iter(|| {
            let mut acc = 0.0f32;
            for i in -90..=90 {
                acc += sky_color(black_box((i as f64).to_radians()))[2];
            }
            acc
        });
    });
}

criterion_group!(
    benches,
    bench_solar_position,
    bench_instant_build,
    bench_daily_illuminance,
    bench_sun_path,
    bench_sky_color,
);
criterion_main!(benches);
