//! Statistical helper functions for significance testing

/// Approximate chi-square upper-tail p-value using the Wilson-Hilferty
/// approximation
pub fn chi_square_p_value(chi_sq: f64, df: usize) -> f64 {
    if df == 0 || chi_sq <= 0.0 {
        return 1.0;
    }
    let k = df as f64;
    // Wilson-Hilferty transformation to normal
    let z = ((chi_sq / k).powf(1.0 / 3.0) - (1.0 - 2.0 / (9.0 * k))) / (2.0 / (9.0 * k)).sqrt();
    // Convert z to p-value (upper tail)
    0.5 * (1.0 - erf(z / std::f64::consts::SQRT_2))
}

/// Error function approximation (Abramowitz & Stegun 7.1.26)
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_erf_reference_points() {
        assert_relative_eq!(erf(0.0), 0.0, epsilon = 1e-6);
        assert_relative_eq!(erf(1.0), 0.8427008, epsilon = 1e-4);
        assert_relative_eq!(erf(-1.0), -0.8427008, epsilon = 1e-4);
        assert!(erf(4.0) > 0.9999);
    }

    #[test]
    fn test_chi_square_p_value_bounds() {
        assert_eq!(chi_square_p_value(0.0, 2), 1.0);
        assert_eq!(chi_square_p_value(5.0, 0), 1.0);
        let p = chi_square_p_value(5.0, 2);
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn test_chi_square_p_value_monotone_in_statistic() {
        let p_small = chi_square_p_value(1.0, 3);
        let p_large = chi_square_p_value(10.0, 3);
        assert!(p_large < p_small);
    }

    #[test]
    fn test_chi_square_p_value_reference() {
        // chi2.sf(4, 2) = exp(-2) ~ 0.1353
        let p = chi_square_p_value(4.0, 2);
        assert_relative_eq!(p, 0.1353, epsilon = 0.01);
    }
}
