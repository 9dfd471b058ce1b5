use approxfit::{calculate_all, solver::polynomial_fit, value::CoordExt, ModelKind, Point};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn gen_sample_data(n: f64) -> Vec<Point> {
    let mut points = Vec::new();
    let mut x = 1.0;
    while x <= n {
        points.push(Point::new(x, 1.0 + 3.0 * x + 5.3 * x * x));
        x += 1.0;
    }
    points
}

fn criterion_benchmark(c: &mut Criterion) {
    //
    // First we test how the solver scales with data size
    println!("Benchmarking solver vs n (Degree=3)...");
    let columns = |n: f64| {
        let data = gen_sample_data(n);
        (data.x(), data.y())
    };
    test_linear_criterion_group(
        c,
        "solver_vs_n",
        &[
            CriterionTestEntry::new("n=100", 1e2, columns(1e2)),
            CriterionTestEntry::new("n=1_000", 1e3, columns(1e3)),
            CriterionTestEntry::new("n=10_000", 1e4, columns(1e4)),
            CriterionTestEntry::new("n=100_000", 1e5, columns(1e5)),
        ],
        |b, (x, y)| b.iter(|| polynomial_fit(black_box(x.as_slice()), black_box(y.as_slice()), 3)),
    );

    //
    // Now we compare the models on the same data
    println!("Benchmarking fit vs model (n=1000)...");
    let samples = gen_sample_data(1e3);
    let mut group = c.benchmark_group("fit_vs_model");
    for kind in ModelKind::ALL {
        group.bench_function(kind.name(), |b| b.iter(|| kind.fit(black_box(samples.as_slice()))));
    }
    group.finish();

    //
    // And the full selection, at the sizes it is meant for and beyond
    println!("Benchmarking calculate_all vs n...");
    test_linear_criterion_group(
        c,
        "calculate_all_vs_n",
        &[
            CriterionTestEntry::new("n=12", 12.0, gen_sample_data(12.0)),
            CriterionTestEntry::new("n=1_000", 1e3, gen_sample_data(1e3)),
            CriterionTestEntry::new("n=10_000", 1e4, gen_sample_data(1e4)),
            CriterionTestEntry::new("n=100_000", 1e5, gen_sample_data(1e5)),
        ],
        |b, data| b.iter(|| calculate_all(black_box(data.as_slice()))),
    );
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn get_data_for_run<V>(group_id: &str, tests: &[CriterionTestEntry<V>]) -> Vec<Point> {
    // Each test corresponds to a different x value in the series
    tests
        .iter()
        .map(|test| Point::new(test.x, get_sample_for_run(group_id, &test.id)))
        .collect()
}

fn get_sample_for_run(group_id: &str, test_id: &str) -> f64 {
    #[derive(serde::Deserialize)]
    struct CriterionSamples {
        iters: Vec<f64>,
        times: Vec<f64>,
    }

    let raw = std::fs::read_to_string(format!(
        "target/criterion/{group_id}/{test_id}/new/sample.json"
    ))
    .expect("Failed to read sample data");
    let samples: CriterionSamples =
        serde_json::from_str(&raw).expect("Failed to parse sample data");

    samples
        .iters
        .iter()
        .zip(samples.times.iter())
        .map(|(i, t)| t / i)
        .sum::<f64>()
        / (samples.iters.len() as f64)
}

struct CriterionTestEntry<V> {
    id: String,
    x: f64,
    values: V,
}
impl<V> CriterionTestEntry<V> {
    pub fn new(id: &str, x: f64, values: V) -> Self {
        Self {
            id: id.to_string(),
            x,
            values,
        }
    }
}

fn test_linear_criterion_group<F, V>(
    c: &mut Criterion,
    id: &str,
    samples: &[CriterionTestEntry<V>],
    runner: F,
) where
    for<'a, 'b, 'c> F: Fn(&'a mut criterion::Bencher<'b>, &'c V),
{
    let mut group = c.benchmark_group(id);
    for sample in samples {
        group.bench_with_input(&sample.id, &sample.values, &runner);
    }
    group.finish();

    //
    // Runtime should grow linearly with n
    let data = get_data_for_run(id, samples);
    let linear_fit = ModelKind::Linear.fit(&data).expect("Failed to fit timings");
    approxfit::assert_r_squared!(linear_fit);
}
