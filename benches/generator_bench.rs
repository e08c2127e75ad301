//! Benchmarks for sensor generation and chart configuration
//!
//! Run with: cargo bench

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sensor_dashboard::chart::{build_chart_config, ChartSelection, Viewport};
use sensor_dashboard::sensors::{DateRange, SensorDataGenerator, SensorType};

fn range_of(days: u64) -> DateRange {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    DateRange::new(start, start + Days::new(days - 1))
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    for days in [10, 90, 3650] {
        let range = range_of(days);
        let mut generator = SensorDataGenerator::seeded(42);

        group.throughput(Throughput::Elements(days));
        group.bench_function(format!("generate_{}_days", days), |b| {
            b.iter(|| generator.generate(black_box(&range)))
        });
    }

    group.finish();
}

fn bench_chart_config(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart_config");

    let data = SensorDataGenerator::seeded(7).generate(&range_of(90));
    let single = ChartSelection::default();
    let all = ChartSelection {
        sensors: SensorType::all().to_vec(),
        ..ChartSelection::default()
    };

    group.bench_function("build_single_sensor", |b| {
        b.iter(|| build_chart_config(black_box(&data), black_box(&single)).unwrap())
    });

    group.bench_function("build_all_sensors", |b| {
        b.iter(|| build_chart_config(black_box(&data), black_box(&all)).unwrap())
    });

    let config = build_chart_config(&data, &all).unwrap();
    group.bench_function("to_json", |b| b.iter(|| config.to_json().unwrap()));

    group.finish();
}

fn bench_viewport(c: &mut Criterion) {
    let data = SensorDataGenerator::seeded(3).generate(&range_of(90));
    let config = build_chart_config(&data, &ChartSelection::default()).unwrap();

    c.bench_function("viewport_zoom_pan", |b| {
        b.iter(|| {
            let mut viewport = Viewport::new(*config.limits());
            for _ in 0..100 {
                viewport.zoom(black_box(1.01), 45.0, 10.0);
                viewport.pan(black_box(0.5), -0.25);
            }
            viewport
        })
    });
}

criterion_group!(benches, bench_generation, bench_chart_config, bench_viewport);
criterion_main!(benches);
