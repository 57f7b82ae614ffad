#[cfg(test)]
mod tests {
    use crate::numerical::cost_optimization::{
        cost_derivative, cost_second_derivative, optimal_point, optimal_x, savings, total_cost,
    };
    use crate::numerical::energy_accumulation::{
        PERIOD_HOURS, cumulative_energy, instantaneous_power, total_energy,
    };
    use crate::numerical::quadrature::numeric_integrate;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const CASES: usize = 200;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed_f1a0)
    }

    #[test]
    fn closed_form_root_satisfies_cubic() {
        let mut rng = rng();
        for _ in 0..CASES {
            let k1: f64 = rng.random_range(0.01..100.0);
            let k2: f64 = rng.random_range(0.01..1000.0);
            let x = optimal_x(k1, k2);
            assert_relative_eq!(x.powi(3) * 2.0 * k1, k2, max_relative = 1e-12);
        }
    }

    #[test]
    fn optimum_is_global_minimum() {
        let mut rng = rng();
        for _ in 0..CASES {
            let k1: f64 = rng.random_range(0.5..10.0);
            let k2: f64 = rng.random_range(10.0..500.0);
            let best = optimal_point(k1, k2);
            for _ in 0..50 {
                let x: f64 = rng.random_range(0.05..50.0);
                assert!(best.cost <= total_cost(x, k1, k2) + 1e-12 * best.cost);
            }
            // a dense sweep around the optimum as well
            for i in 1..=100 {
                let x = best.x * (0.5 + i as f64 / 100.0);
                assert!(best.cost <= total_cost(x, k1, k2) + 1e-12 * best.cost);
            }
        }
    }

    #[test]
    fn cost_is_convex_with_single_critical_point() {
        let mut rng = rng();
        for _ in 0..CASES {
            let k1: f64 = rng.random_range(0.5..10.0);
            let k2: f64 = rng.random_range(10.0..500.0);
            let x_opt = optimal_x(k1, k2);
            let x: f64 = rng.random_range(0.05..50.0);
            assert!(cost_second_derivative(x, k1, k2) > 0.0);
            // derivative is negative left of the optimum and positive right of it
            if x < x_opt * (1.0 - 1e-9) {
                assert!(cost_derivative(x, k1, k2) < 0.0);
            } else if x > x_opt * (1.0 + 1e-9) {
                assert!(cost_derivative(x, k1, k2) > 0.0);
            }
        }
    }

    #[test]
    fn savings_are_bounded() {
        let mut rng = rng();
        for _ in 0..CASES {
            let k1: f64 = rng.random_range(0.5..10.0);
            let k2: f64 = rng.random_range(10.0..500.0);
            let user_x: f64 = rng.random_range(1.0..10.0);
            let x_opt = optimal_x(k1, k2);
            let report = savings(user_x, x_opt, k1, k2);
            assert!(report.savings_absolute >= 0.0);
            assert!((0.0..=100.0).contains(&report.savings_percent));
            assert_eq!(savings(x_opt, x_opt, k1, k2).savings_absolute, 0.0);
        }
    }

    #[test]
    fn analytic_energy_matches_trapezoid() {
        let mut rng = rng();
        for _ in 0..50 {
            let a: f64 = rng.random_range(1.0..50.0);
            let b: f64 = rng.random_range(0.0..40.0);
            let n: usize = rng.random_range(1000..5000);
            assert_eq!(total_energy(a, b), 24.0 * a);
            let numeric =
                numeric_integrate(|t| instantaneous_power(t, a, b), 0.0, PERIOD_HOURS, n).unwrap();
            assert!((numeric - total_energy(a, b)).abs() < 1e-3);
        }
    }

    #[test]
    fn cumulative_energy_matches_trapezoid_on_partial_windows() {
        let mut rng = rng();
        for _ in 0..50 {
            let a: f64 = rng.random_range(1.0..50.0);
            let b: f64 = rng.random_range(0.0..20.0);
            let t: f64 = rng.random_range(0.5..24.0);
            let numeric = numeric_integrate(|s| instantaneous_power(s, a, b), 0.0, t, 4000).unwrap();
            assert!((numeric - cumulative_energy(t, a, b)).abs() < 1e-4);
        }
    }
}
