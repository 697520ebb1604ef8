//! Legendre polynomial evaluation.
//!
//! Legendre polynomials P_n(x) are orthogonal on [-1, 1] with weight 1:
//! ∫_{-1}^{1} P_m(x) P_n(x) dx = 2/(2n+1) δ_{mn}
//!
//! All evaluations use explicit loops carrying the last recurrence values,
//! so the polynomial degree never shows up as call-stack depth.

/// Evaluate Legendre polynomial P_n(x) using the three-term recurrence.
///
/// P_0(x) = 1
/// P_1(x) = x
/// n P_n(x) = (2n-1) x P_{n-1}(x) - (n-1) P_{n-2}(x)
pub fn legendre(n: usize, x: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    if n == 1 {
        return x;
    }

    let mut p_prev = 1.0; // P_{k-2}
    let mut p_curr = x; // P_{k-1}

    for k in 2..=n {
        let kf = k as f64;
        let p_next = ((2.0 * kf - 1.0) * x * p_curr - (kf - 1.0) * p_prev) / kf;
        p_prev = p_curr;
        p_curr = p_next;
    }

    p_curr
}

/// Evaluate the derivative P'_n(x).
///
/// Uses the recurrence P'_n(x) = n P_{n-1}(x) + x P'_{n-1}(x), which is
/// valid on the whole interval including the endpoints x = ±1.
pub fn legendre_derivative(n: usize, x: f64) -> f64 {
    let (_, dp, _) = legendre_with_derivatives(n, x);
    dp
}

/// Evaluate P_n(x), P'_n(x) and P''_n(x) in a single pass.
///
/// The derivatives follow the endpoint-safe recurrences:
/// P'_n(x)  = n P_{n-1}(x) + x P'_{n-1}(x)
/// P''_n(x) = (n+1) P'_{n-1}(x) + x P''_{n-1}(x)
///
/// Newton refinement of quadrature nodes needs all three values at once.
pub fn legendre_with_derivatives(n: usize, x: f64) -> (f64, f64, f64) {
    if n == 0 {
        return (1.0, 0.0, 0.0);
    }
    if n == 1 {
        return (x, 1.0, 0.0);
    }

    let mut p_prev = 1.0; // P_{k-1}
    let mut p_curr = x; // P_k
    let mut dp = 1.0; // P'_k
    let mut d2p = 0.0; // P''_k

    for k in 2..=n {
        let kf = k as f64;
        let p_next = ((2.0 * kf - 1.0) * x * p_curr - (kf - 1.0) * p_prev) / kf;
        let d2p_next = (kf + 1.0) * dp + x * d2p;
        let dp_next = kf * p_curr + x * dp;
        p_prev = p_curr;
        p_curr = p_next;
        dp = dp_next;
        d2p = d2p_next;
    }

    (p_curr, dp, d2p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legendre_values() {
        // P_0(x) = 1
        assert!((legendre(0, 0.5) - 1.0).abs() < 1e-14);

        // P_1(x) = x
        assert!((legendre(1, 0.5) - 0.5).abs() < 1e-14);

        // P_2(x) = (3x^2 - 1)/2
        let x = 0.5;
        let expected = (3.0 * x * x - 1.0) / 2.0;
        assert!((legendre(2, x) - expected).abs() < 1e-14);

        // P_3(x) = (5x^3 - 3x)/2
        let expected = (5.0 * x * x * x - 3.0 * x) / 2.0;
        assert!((legendre(3, x) - expected).abs() < 1e-14);
    }

    #[test]
    fn test_legendre_at_endpoints() {
        // P_n(1) = 1, P_n(-1) = (-1)^n
        for n in 0..=8 {
            assert!((legendre(n, 1.0) - 1.0).abs() < 1e-14);
            let expected = if n % 2 == 0 { 1.0 } else { -1.0 };
            assert!((legendre(n, -1.0) - expected).abs() < 1e-14);
        }
    }

    #[test]
    fn test_legendre_derivative() {
        // P'_0 = 0, P'_1 = 1
        assert!(legendre_derivative(0, 0.5).abs() < 1e-14);
        assert!((legendre_derivative(1, 0.5) - 1.0).abs() < 1e-14);

        // P'_2 = 3x
        let x = 0.5;
        assert!((legendre_derivative(2, x) - 3.0 * x).abs() < 1e-14);

        // P'_3 = (15x^2 - 3)/2
        let expected = (15.0 * x * x - 3.0) / 2.0;
        assert!((legendre_derivative(3, x) - expected).abs() < 1e-14);
    }

    #[test]
    fn test_derivative_at_endpoints() {
        // P'_n(1) = n(n+1)/2, P'_n(-1) = (-1)^{n+1} n(n+1)/2
        for n in 0..=8 {
            let expected = (n * (n + 1)) as f64 / 2.0;
            assert!((legendre_derivative(n, 1.0) - expected).abs() < 1e-11);

            let sign = if n % 2 == 0 { -1.0 } else { 1.0 };
            assert!((legendre_derivative(n, -1.0) - sign * expected).abs() < 1e-11);
        }
    }

    #[test]
    fn test_second_derivative() {
        // P''_2 = 3, P''_3 = 15x
        let x = 0.3;
        let (_, _, d2p2) = legendre_with_derivatives(2, x);
        assert!((d2p2 - 3.0).abs() < 1e-14);

        let (_, _, d2p3) = legendre_with_derivatives(3, x);
        assert!((d2p3 - 15.0 * x).abs() < 1e-14);

        // P''_4 = (105x^2 - 15)/2
        let (_, _, d2p4) = legendre_with_derivatives(4, x);
        let expected = (105.0 * x * x - 15.0) / 2.0;
        assert!((d2p4 - expected).abs() < 1e-13);
    }

    #[test]
    fn test_joint_evaluation_consistency() {
        for n in 0..=10 {
            for &x in &[-1.0, -0.7, -0.2, 0.0, 0.4, 0.9, 1.0] {
                let (p, dp, _) = legendre_with_derivatives(n, x);
                assert!((p - legendre(n, x)).abs() < 1e-13);
                assert!((dp - legendre_derivative(n, x)).abs() < 1e-12);
            }
        }
    }
}
