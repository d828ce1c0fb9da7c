//! Special functions for the ideal Bose gas.
//!
//! The semi-classical density of a trapped Bose gas is expressed through the
//! Bose functions (polylogarithms)
//!
//! \[
//! g_s(z) = \sum_{k=1}^{\infty} \frac{z^k}{k^s}
//! \]
//!
//! which converge slowly as the fugacity z approaches 1. Close to 1 they are
//! evaluated from the expansion in μ = ln z, which needs the Riemann zeta
//! function at real (and negative) arguments and the gamma function.

use crate::constants::PI;

/// Lanczos coefficients for g = 7, n = 9.
const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Bernoulli numbers B_2, B_4, ..., B_14.
const BERNOULLI: [f64; 7] = [
    1.0 / 6.0,
    -1.0 / 30.0,
    1.0 / 42.0,
    -1.0 / 30.0,
    5.0 / 66.0,
    -691.0 / 2730.0,
    7.0 / 6.0,
];

/// Direct summation cut-off for the Euler-Maclaurin zeta.
const ZETA_TERMS: usize = 10;

/// Above this fugacity the series in ln z is used.
const SERIES_CROSSOVER: f64 = 0.5;

/// Number of terms of the expansion around z = 1.
const EXPANSION_TERMS: usize = 24;

/// Gamma function Γ(x) for real x (poles at non-positive integers).
pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let series = LANCZOS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS[0], |acc, (i, &p)| acc + p / (x + i as f64));
    (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * series
}

/// Riemann zeta function ζ(s) for real s ≠ 1.
///
/// For s ≥ 0 the Euler-Maclaurin formula is used,
///
/// \[
/// \zeta(s) \approx \sum_{k=1}^{N-1} k^{-s} + \frac{N^{1-s}}{s-1} + \frac{N^{-s}}{2}
///   + \sum_{j} \frac{B_{2j}}{(2j)!} s(s+1)\cdots(s+2j-2) N^{1-s-2j}
/// \]
///
/// and negative arguments are mapped onto s > 1 by the functional equation.
pub fn zeta(s: f64) -> f64 {
    if s == 1.0 {
        return f64::INFINITY;
    }
    if s < 0.0 {
        return 2f64.powf(s)
            * PI.powf(s - 1.0)
            * (0.5 * PI * s).sin()
            * gamma(1.0 - s)
            * zeta(1.0 - s);
    }

    let n = ZETA_TERMS as f64;
    let mut sum: f64 = (1..ZETA_TERMS).map(|k| (k as f64).powf(-s)).sum();
    sum += n.powf(1.0 - s) / (s - 1.0) + 0.5 * n.powf(-s);

    let mut rising = s;
    let mut factorial = 2.0;
    let mut power = n.powf(-s - 1.0);
    for (j, b) in BERNOULLI.iter().enumerate() {
        sum += b / factorial * rising * power;
        let two_j = 2.0 * (j as f64 + 1.0);
        rising *= (s + two_j - 1.0) * (s + two_j);
        factorial *= (two_j + 1.0) * (two_j + 2.0);
        power /= n * n;
    }
    sum
}

/// Bose function g_s(z) for fugacity 0 ≤ z ≤ 1 and order s > 0.
///
/// Returns NaN outside that range. At z = 1 this is ζ(s) for s > 1 and
/// diverges for s ≤ 1.
pub fn bose_function(s: f64, z: f64) -> f64 {
    if !(0.0..=1.0).contains(&z) || s <= 0.0 {
        return f64::NAN;
    }
    if z == 0.0 {
        return 0.0;
    }
    if z <= SERIES_CROSSOVER {
        return direct_series(s, z);
    }

    let mu = z.ln();
    if mu == 0.0 {
        return if s > 1.0 { zeta(s) } else { f64::INFINITY };
    }

    let order = s.round();
    let integer_order = (s - order).abs() < 1e-12;

    // Σ ζ(s-k) μ^k / k!, skipping the pole of ζ for integer orders
    let mut sum = 0.0;
    let mut term = 1.0;
    for k in 0..EXPANSION_TERMS {
        if k > 0 {
            term *= mu / k as f64;
        }
        if integer_order && k as f64 == order - 1.0 {
            continue;
        }
        sum += zeta(s - k as f64) * term;
    }

    if integer_order {
        let n = order as usize;
        let harmonic: f64 = (1..n).map(|k| 1.0 / k as f64).sum();
        let factorial: f64 = (1..n).map(|k| k as f64).product();
        sum + mu.powi(n as i32 - 1) / factorial * (harmonic - (-mu).ln())
    } else {
        sum + gamma(1.0 - s) * (-mu).powf(s - 1.0)
    }
}

fn direct_series(s: f64, z: f64) -> f64 {
    let mut sum = 0.0;
    let mut power = 1.0;
    for k in 1..=400 {
        power *= z;
        let term = power / (k as f64).powf(s);
        sum += term;
        if term < f64::EPSILON * sum {
            break;
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_gamma_values() {
        assert_approx_eq!(gamma(1.0), 1.0, 1e-13);
        assert_approx_eq!(gamma(5.0), 24.0, 1e-10);
        assert_approx_eq!(gamma(0.5), PI.sqrt(), 1e-13);
        assert_approx_eq!(gamma(-0.5), -2.0 * PI.sqrt(), 1e-12);
        assert_approx_eq!(gamma(-1.5), 4.0 * PI.sqrt() / 3.0, 1e-12);
    }

    #[test]
    fn test_zeta_values() {
        assert_approx_eq!(zeta(2.0), PI * PI / 6.0, 1e-13);
        assert_approx_eq!(zeta(3.0), 1.202_056_903_159_594_2, 1e-13);
        assert_approx_eq!(zeta(1.5), 2.612_375_348_685_488, 1e-12);
        assert_approx_eq!(zeta(2.5), 1.341_487_257_250_917, 1e-12);
        assert_approx_eq!(zeta(0.5), -1.460_354_508_809_586_8, 1e-12);
        assert_approx_eq!(zeta(0.0), -0.5, 1e-13);
        assert_approx_eq!(zeta(-1.0), -1.0 / 12.0, 1e-13);
        assert_approx_eq!(zeta(-0.5), -0.207_886_224_977_354_57, 1e-12);
        assert!(zeta(-2.0).abs() < 1e-14);
        assert!(zeta(1.0).is_infinite());
    }

    #[test]
    fn test_bose_function_known_values() {
        let ln2 = 2f64.ln();
        assert_approx_eq!(bose_function(2.0, 0.5), PI * PI / 12.0 - 0.5 * ln2 * ln2, 1e-13);
        assert_approx_eq!(bose_function(3.0, 0.5), 0.537_213_193_608_040_2, 1e-13);
        assert_approx_eq!(bose_function(1.5, 1.0), zeta(1.5), 1e-13);
        assert_approx_eq!(bose_function(3.0, 1.0), zeta(3.0), 1e-13);
        assert_eq!(bose_function(1.5, 0.0), 0.0);
    }

    #[test]
    fn test_bose_function_continuous_across_crossover() {
        for &s in &[1.5, 2.0, 2.5, 3.0] {
            let below = bose_function(s, SERIES_CROSSOVER);
            let above = bose_function(s, SERIES_CROSSOVER + 1e-12);
            assert_approx_eq!(below, above, 1e-10);
        }
    }

    #[test]
    fn test_expansion_matches_series_near_one() {
        // Slowly converging but exact partial sums, compared at z = 0.9.
        for &s in &[1.5, 2.0, 2.5, 3.0] {
            let reference = direct_series(s, 0.9);
            assert_approx_eq!(bose_function(s, 0.9), reference, 1e-12);
        }
    }

    #[test]
    fn test_bose_function_rejects_out_of_range() {
        assert!(bose_function(1.5, 1.1).is_nan());
        assert!(bose_function(1.5, -0.1).is_nan());
    }

    #[test]
    fn test_bose_function_diverges_at_unit_fugacity() {
        assert_eq!(bose_function(0.5, 1.0), f64::INFINITY);
        assert_eq!(bose_function(1.0, 1.0), f64::INFINITY);
        assert!(bose_function(1.0 + 1e-3, 1.0).is_finite());
    }

    #[test]
    fn test_small_fugacity_limit() {
        // g_s(z) -> z for small z
        let z = 1e-8;
        assert_approx_eq!(bose_function(2.5, z) / z, 1.0, 1e-7);
    }
}
