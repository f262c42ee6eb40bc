#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nave::camera::FlightPath;
use nave::glyph::{GlyphRain, GlyphRasterizer};
use nave::options::{GlyphRainOptions, Options};

fn glyph_rain_benchmark(c: &mut Criterion) {
    let mut glyphs = GlyphRasterizer::new();
    let mut group = c.benchmark_group("glyph_rain_tick");

    for columns in [32, 64, 128] {
        let options = GlyphRainOptions {
            columns,
            ..GlyphRainOptions::default()
        };
        let Ok(mut rain) = GlyphRain::seeded(&options, &mut glyphs, 42) else {
            continue;
        };
        group.bench_function(format!("{columns}_columns"), |b| {
            b.iter(|| rain.on_frame_tick());
        });
    }
    group.finish();
}

fn flight_path_benchmark(c: &mut Criterion) {
    let Ok(path) = FlightPath::from_options(&Options::default()) else {
        return;
    };
    let max = path.max_progress();
    c.bench_function("flight_path_pose", |b| {
        b.iter(|| black_box(path.pose(black_box(max * 0.75))));
    });
}

criterion_group!(benches, glyph_rain_benchmark, flight_path_benchmark);
criterion_main!(benches);
