use criterion::{Criterion, criterion_group, criterion_main};
use RustedFinOps::numerical::energy_accumulation::{PERIOD_HOURS, instantaneous_power};
use RustedFinOps::numerical::quadrature::{QuadMethod, integrate};
use RustedFinOps::simulator::config::SimulatorConfig;
use RustedFinOps::simulator::optimization_state::OptimizationState;
use std::hint::black_box;

fn bench_quadrature(c: &mut Criterion) {
    let mut group = c.benchmark_group("daily energy");
    for (method, n) in [
        (QuadMethod::Trapezoid, 1000),
        (QuadMethod::Simpson, 1000),
        (QuadMethod::GaussLegendre, 20),
    ] {
        group.bench_function(format!("{} n={}", method, n), |b| {
            b.iter(|| {
                integrate(
                    method,
                    |t| instantaneous_power(t, 10.0, 5.0),
                    0.0,
                    black_box(PERIOD_HOURS),
                    n,
                )
            })
        });
    }
    group.finish();
}

// one slider move: closed form, savings and 300 mapped curve points
fn bench_snapshot_recompute(c: &mut Criterion) {
    let mut state = match OptimizationState::new(&SimulatorConfig::default()) {
        Ok(state) => state,
        Err(e) => panic!("default configuration rejected: {}", e),
    };
    let mut k2 = 10.0;
    c.bench_function("optimization snapshot", |b| {
        b.iter(|| {
            k2 = if k2 >= 500.0 { 10.0 } else { k2 + 10.0 };
            let _ = black_box(state.set_k2(k2));
        })
    });
}

criterion_group!(benches, bench_quadrature, bench_snapshot_recompute);
criterion_main!(benches);
