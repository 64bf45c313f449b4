#[macro_use]
extern crate criterion;
extern crate mandelbrot_gradient;

use criterion::Criterion;
use mandelbrot_gradient::{
    colorize, escape, fill, ColorRamp, PlaneMapper, RenderConfig, RenderPipeline, Serial,
    Threaded, Viewport,
};

fn escape_benchmark(c: &mut Criterion) {
    c.bench_function("escape seahorse valley", |b| {
        b.iter(|| escape(-0.743_643_887, 0.131_825_904, 2000))
    });
}

fn grid_benchmark(c: &mut Criterion) {
    let viewport = Viewport::new(-2.0, 1.0, -1.125, 1.125).unwrap();
    let mapper = PlaneMapper::new(160, 120, viewport).unwrap();
    c.bench_function("fill 160x120 serial", |b| {
        b.iter(|| fill(&mapper, 500, &Serial).unwrap())
    });
    c.bench_function("fill 160x120 threaded", |b| {
        b.iter(|| fill(&mapper, 500, &Threaded::default()).unwrap())
    });

    let grid = fill(&mapper, 500, &Serial).unwrap();
    let ramp = ColorRamp::default();
    c.bench_function("colorize 160x120", |b| {
        b.iter(|| colorize(&grid, &ramp, 100, &Serial).unwrap())
    });
}

fn pipeline_benchmark(c: &mut Criterion) {
    let config = RenderConfig {
        width: 200,
        height: 150,
        max_iterations: 2000,
        ..RenderConfig::default()
    };
    let pipeline = RenderPipeline::threaded(config).unwrap();
    c.bench_function("render 200x150 deep zoom", |b| {
        b.iter(|| pipeline.render().unwrap())
    });
}

criterion_group!(benches, escape_benchmark, grid_benchmark, pipeline_benchmark);
criterion_main!(benches);
