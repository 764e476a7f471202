//! Legendre polynomial evaluation.
//!
//! P_n(x) is orthogonal on [-1, 1] with unit weight; its roots are the
//! Gauss-Legendre nodes.

/// Evaluate P_n(x) and P'_n(x) with the three-term recurrence.
///
/// (n+1) P_{n+1}(x) = (2n+1) x P_n(x) - n P_{n-1}(x)
///
/// The derivative uses P'_n(x) = n (x P_n - P_{n-1}) / (x² - 1), with the
/// closed forms at x = ±1.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }

    let mut p_prev = 1.0;
    let mut p_curr = x;
    for k in 1..n {
        let p_next = ((2 * k + 1) as f64 * x * p_curr - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }

    let end_slope = (n * (n + 1)) as f64 / 2.0;
    let dp = if (x - 1.0).abs() < 1e-14 {
        end_slope
    } else if (x + 1.0).abs() < 1e-14 {
        if n % 2 == 0 { -end_slope } else { end_slope }
    } else {
        n as f64 * (x * p_curr - p_prev) / (x * x - 1.0)
    };

    (p_curr, dp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_order_values() {
        let x = 0.3;
        assert!((legendre_and_derivative(0, x).0 - 1.0).abs() < 1e-14);
        assert!((legendre_and_derivative(1, x).0 - x).abs() < 1e-14);

        let (p2, dp2) = legendre_and_derivative(2, x);
        assert!((p2 - (3.0 * x * x - 1.0) / 2.0).abs() < 1e-14);
        assert!((dp2 - 3.0 * x).abs() < 1e-14);
    }

    #[test]
    fn test_endpoint_derivative() {
        for n in 1..6 {
            let (p, dp) = legendre_and_derivative(n, 1.0);
            assert!((p - 1.0).abs() < 1e-12);
            assert!((dp - (n * (n + 1)) as f64 / 2.0).abs() < 1e-12);
        }
        let (_, dp3) = legendre_and_derivative(3, -1.0);
        assert!((dp3 - 6.0).abs() < 1e-12);
    }
}
