//! Gauss-Legendre quadrature on [-1, 1].
//!
//! An n-point rule integrates polynomials up to degree 2n-1 exactly, which
//! covers the product of a degree-p test function and a degree-p trace with
//! n = p + 1.

use std::f64::consts::PI;

use super::legendre::legendre_and_derivative;

/// Nodes and weights of the n-point Gauss-Legendre rule.
///
/// Nodes are returned in ascending order. Uses Newton iteration on P_n
/// started from the Chebyshev-like guess cos(π(i + 3/4)/(n + 1/2)).
pub fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];

    for i in 0..n {
        let mut x = -(PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        for _ in 0..100 {
            let (p, dp) = legendre_and_derivative(n, x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() < 1e-15 {
                break;
            }
        }
        let (_, dp) = legendre_and_derivative(n, x);
        nodes[i] = x;
        weights[i] = 2.0 / ((1.0 - x * x) * dp * dp);
    }

    (nodes, weights)
}
