/// Benchmarks for column extraction and window filtering.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dataviz::column;
use dataviz::filter;
use dataviz::models::Alignment;
use dataviz::types::{DValue, Range, Window};
use serde_json::{json, Map};

// A document with one object per experiment, with string values in every tenth experiment.
fn get_test_document(experiments: usize) -> DValue {
    let mut document = Map::new();
    for i in 0..experiments {
        let temperature = if i % 10 == 0 {
            json!(format!("{}", i % 300))
        } else {
            json!(i % 300)
        };
        document.insert(
            format!("Exp {}", i),
            json!({
                "inputs": {"Oven Temperature": temperature, "Polymer 1": (i % 7) as f64 / 7.0},
                "outputs": {"Viscosity": (i % 97) as f64 * 1.5}
            }),
        );
    }
    DValue::Object(document)
}

fn criterion_benchmark(c: &mut Criterion) {
    let window = Window::new(
        Range::from_text("100", "200"),
        Range::from_text("0", "Infinity"),
    );
    for size_k in [1, 16, 64] {
        let document = get_test_document(size_k * 1024);
        let name = format!("extract({}k)", size_k);
        c.bench_function(&name, |b| {
            b.iter(|| column::extract(black_box(&document), "Oven Temperature"))
        });
        let input = column::extract(&document, "Oven Temperature");
        let output = column::extract(&document, "Viscosity");
        for with_labels in [false, true] {
            let name = format!("filter({}k, labels={})", size_k, with_labels);
            c.bench_function(&name, |b| {
                b.iter(|| {
                    filter::filter_datapoints(
                        black_box(&input),
                        black_box(&output),
                        &window,
                        Alignment::Strict,
                        with_labels,
                    )
                    .unwrap()
                })
            });
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
