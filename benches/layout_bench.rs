//! Layout performance - tokenize, interpret, align and render
//!
//! Measures each stage on its own and the whole pipeline end to end, for a
//! short label, a styled paragraph and a long document.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use glyphmark::measure_none::NoneMeasurer;
use glyphmark::render_json::JsonSurface;
use glyphmark::types::Alignment;
use glyphmark::{
    align, tokenize, CommandRegistry, Interpreter, LayoutParams, MetricsConfig, MetricsProvider,
    Pipeline, TextStyle,
};

fn samples() -> Vec<(&'static str, String)> {
    vec![
        ("label", "Hel<b>lo</b> World".to_string()),
        (
            "paragraph",
            "The <i>quick</i> <color=#a52a2a>brown</color> fox <u>jumps</u> over the lazy dog.\n"
                .repeat(5),
        ),
        (
            "document",
            "<size=18><b>Title</b></size>\n<spacing=1>Body text with <s>edits</s>.</spacing>\n"
                .repeat(100),
        ),
    ]
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for (name, markup) in samples() {
        group.throughput(Throughput::Bytes(markup.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &markup, |b, markup| {
            b.iter(|| tokenize(black_box(markup)).unwrap())
        });
    }
    group.finish();
}

fn bench_interpret(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpret");
    let interpreter = Interpreter::new(CommandRegistry::global());
    let base = TextStyle::default();

    for (name, markup) in samples() {
        let tokens = tokenize(&markup).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &tokens, |b, tokens| {
            // Warm caches: the steady state of a long-lived provider
            let mut metrics =
                MetricsProvider::with_config(NoneMeasurer::new(), MetricsConfig::default());
            b.iter(|| {
                interpreter
                    .interpret(black_box(tokens), &base, &mut metrics)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    let plain = TextStyle::default();
    let bold = plain.derive(|p| p.bold = true);

    // Same style every call: the one-entry width cache skips reconfiguring
    group.bench_function("width_same_style", |b| {
        let mut metrics = MetricsProvider::with_config(NoneMeasurer::new(), MetricsConfig::default());
        b.iter(|| metrics.width(black_box(&plain), 'x'))
    });

    // Alternating styles: every call reconfigures the measurer
    group.bench_function("width_alternating_styles", |b| {
        let mut metrics = MetricsProvider::with_config(NoneMeasurer::new(), MetricsConfig::default());
        b.iter(|| {
            metrics.width(black_box(&plain), 'x') + metrics.width(black_box(&bold), 'x')
        })
    });

    group.bench_function("height_cache_hit", |b| {
        let mut metrics = MetricsProvider::with_config(NoneMeasurer::new(), MetricsConfig::default());
        b.iter(|| metrics.height(black_box(&bold)))
    });
    group.finish();
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    let pipeline = Pipeline::builder()
        .measurer(NoneMeasurer::new())
        .build()
        .unwrap();

    for (name, markup) in samples() {
        let text = pipeline
            .layout(&markup, &TextStyle::default(), &LayoutParams::default())
            .unwrap();
        let mut items = text.into_items();
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| align(black_box(&mut items), Alignment::Center, 0.0, 800.0, 0.0))
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let pipeline = Pipeline::builder()
        .measurer(NoneMeasurer::new())
        .build()
        .unwrap();
    let base = TextStyle::with_font("serif", 24.0);
    let params = LayoutParams::boxed(Alignment::Center, 800.0);

    for (name, markup) in samples() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &markup, |b, markup| {
            b.iter(|| {
                let mut surface = JsonSurface::new();
                pipeline
                    .process(black_box(markup), &base, &params, &mut surface)
                    .unwrap();
                surface.into_commands()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_interpret,
    bench_metrics,
    bench_align,
    bench_end_to_end
);
criterion_main!(benches);
