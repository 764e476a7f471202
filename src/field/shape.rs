//! Test/trial function samples.

use crate::types::Vec3;

/// Value and gradient of one basis function at one integration point.
///
/// The same type serves as test function (`_test`, `_grad_test`) and trial
/// function (`_phi`, `_grad_phi`) sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeFn {
    /// Basis function value.
    pub value: f64,
    /// Basis function gradient.
    pub gradient: Vec3,
}

impl ShapeFn {
    /// Create a sample from value and gradient.
    #[inline]
    pub fn new(value: f64, gradient: Vec3) -> Self {
        Self { value, gradient }
    }

    /// Constant basis function (zero gradient).
    #[inline]
    pub fn constant(value: f64) -> Self {
        Self {
            value,
            gradient: Vec3::zeros(),
        }
    }

    /// Scale value and gradient together.
    #[inline]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            gradient: self.gradient * factor,
        }
    }
}
