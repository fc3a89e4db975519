use criterion::measurement::WallTime;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use qreg::runtime::state_vector::StateVector;

// custom criterion configuration for all benchmarks
fn custom_criterion_config() -> Criterion<WallTime> {
    Criterion::default()
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(5))
        .warm_up_time(std::time::Duration::from_secs(2))
        .with_plots()
}

fn transform_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("hadamard_transform");

    // fewer qubits for development runs, wider range for release
    #[cfg(debug_assertions)]
    let qubit_counts = vec![8, 12];
    #[cfg(not(debug_assertions))]
    let qubit_counts = vec![12, 16, 20];

    for &n in &qubit_counts {
        let mut sv = StateVector::new(n).unwrap();
        sv.fill_random(num_cpus::get());
        group.throughput(Throughput::Elements(1u64 << n));

        // bit 1 (most significant) is the worst case for a non-flattened
        // decomposition: a single group spanning the whole vector
        group.bench_function(format!("{}q_bit1", n), |b| {
            b.iter(|| sv.transform(black_box(1)).unwrap())
        });
        group.bench_function(format!("{}q_bit{}", n, n), |b| {
            b.iter(|| sv.transform(black_box(n)).unwrap())
        });
    }
    group.finish();
}

fn init_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_random");

    #[cfg(debug_assertions)]
    let qubit_counts = vec![12];
    #[cfg(not(debug_assertions))]
    let qubit_counts = vec![16, 20];

    for &n in &qubit_counts {
        let mut sv = StateVector::new(n).unwrap();
        group.throughput(Throughput::Elements(1u64 << n));
        group.bench_function(format!("{}q", n), |b| {
            b.iter(|| sv.fill_random(black_box(num_cpus::get())))
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = custom_criterion_config();
    targets = transform_benchmarks, init_benchmarks
}
criterion_main!(benches);
