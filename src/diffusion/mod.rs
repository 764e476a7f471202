//! Diffusion tensor construction.
//!
//! Two builders produce the 3×3 tensor `D` used in `(D·∇g)·n`:
//!
//! - [`build_constant`]: nine fixed components, set once at construction.
//! - [`build_from_axis_fields`]: three per-axis values placed on the diagonal,
//!   rebuilt at every integration point (off-diagonals are always zero).
//!
//! Kernels receive the tensor through a [`DiffusionSource`], which also
//! reports the tensor's derivative with respect to any coupled field for the
//! off-diagonal Jacobian.

use std::fmt;

use crate::field::{Coefficient, FieldAccessor, unique_fields};
use crate::types::{Axis, QpIndex, Tensor3, Vec3};

// =============================================================================
// Builders
// =============================================================================

/// Nine constant tensor components, all zero by default.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiffusionConfig {
    pub dxx: f64,
    pub dxy: f64,
    pub dxz: f64,
    pub dyx: f64,
    pub dyy: f64,
    pub dyz: f64,
    pub dzx: f64,
    pub dzy: f64,
    pub dzz: f64,
}

impl DiffusionConfig {
    /// Isotropic tensor `d·I`.
    pub fn isotropic(d: f64) -> Self {
        Self::diagonal(d, d, d)
    }

    /// Axis-aligned anisotropic tensor.
    pub fn diagonal(dxx: f64, dyy: f64, dzz: f64) -> Self {
        Self {
            dxx,
            dyy,
            dzz,
            ..Self::default()
        }
    }
}

/// Assemble a tensor from nine constant components.
pub fn build_constant(c: &DiffusionConfig) -> Tensor3 {
    Tensor3::new(
        c.dxx, c.dxy, c.dxz, //
        c.dyx, c.dyy, c.dyz, //
        c.dzx, c.dzy, c.dzz,
    )
}

/// Assemble an axis-aligned tensor from three sampled values.
#[inline]
pub fn build_from_axis_fields(dx: f64, dy: f64, dz: f64) -> Tensor3 {
    Tensor3::from_diagonal(&Vec3::new(dx, dy, dz))
}

// =============================================================================
// Diffusion sources
// =============================================================================

/// Where a kernel's diffusion tensor comes from.
pub trait DiffusionSource: Send + Sync + fmt::Debug {
    /// Tensor at an integration point (owner side).
    fn sample(&self, fields: &dyn FieldAccessor, qp: QpIndex) -> Tensor3;

    /// `∂D/∂field`, or `None` when the tensor does not depend on `field`.
    fn derivative(&self, field: &str) -> Option<Tensor3>;

    /// Coupled fields the tensor reads.
    fn coupled_fields(&self) -> Vec<&str>;
}

/// Tensor fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantDiffusion {
    tensor: Tensor3,
}

impl ConstantDiffusion {
    /// From nine components.
    pub fn new(config: &DiffusionConfig) -> Self {
        Self {
            tensor: build_constant(config),
        }
    }

    /// From a ready tensor.
    pub fn from_tensor(tensor: Tensor3) -> Self {
        Self { tensor }
    }

    /// No diffusion at all.
    pub fn zero() -> Self {
        Self {
            tensor: Tensor3::zeros(),
        }
    }

    /// The tensor.
    pub fn tensor(&self) -> &Tensor3 {
        &self.tensor
    }
}

impl DiffusionSource for ConstantDiffusion {
    #[inline]
    fn sample(&self, _fields: &dyn FieldAccessor, _qp: QpIndex) -> Tensor3 {
        self.tensor
    }

    fn derivative(&self, _field: &str) -> Option<Tensor3> {
        None
    }

    fn coupled_fields(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Diagonal tensor with one coefficient per axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisFieldDiffusion {
    axes: [Coefficient; 3],
}

impl AxisFieldDiffusion {
    /// From per-axis coefficients (x, y, z).
    pub fn new(dx: Coefficient, dy: Coefficient, dz: Coefficient) -> Self {
        Self { axes: [dx, dy, dz] }
    }

    /// Coefficient on one axis.
    pub fn axis(&self, axis: Axis) -> &Coefficient {
        &self.axes[axis.index()]
    }
}

impl DiffusionSource for AxisFieldDiffusion {
    #[inline]
    fn sample(&self, fields: &dyn FieldAccessor, qp: QpIndex) -> Tensor3 {
        build_from_axis_fields(
            self.axes[0].sample(fields, qp),
            self.axes[1].sample(fields, qp),
            self.axes[2].sample(fields, qp),
        )
    }

    fn derivative(&self, field: &str) -> Option<Tensor3> {
        let mut d = Tensor3::zeros();
        let mut coupled = false;
        for axis in Axis::ALL {
            let w = self.axes[axis.index()].derivative(field);
            if w != 0.0 {
                d += axis.diagonal_unit() * w;
                coupled = true;
            }
        }
        coupled.then_some(d)
    }

    fn coupled_fields(&self) -> Vec<&str> {
        unique_fields(self.axes.iter().filter_map(Coefficient::field_name))
    }
}

/// Isotropic tensor `k·I` with a variable scalar coefficient.
///
/// Used for variable-coefficient diffusion and viscous terms where `k` is a
/// coupled viscosity or conductivity.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarFieldDiffusion {
    coefficient: Coefficient,
}

impl ScalarFieldDiffusion {
    /// From the scalar coefficient.
    pub fn new(coefficient: Coefficient) -> Self {
        Self { coefficient }
    }
}

impl DiffusionSource for ScalarFieldDiffusion {
    #[inline]
    fn sample(&self, fields: &dyn FieldAccessor, qp: QpIndex) -> Tensor3 {
        Tensor3::identity() * self.coefficient.sample(fields, qp)
    }

    fn derivative(&self, field: &str) -> Option<Tensor3> {
        let w = self.coefficient.derivative(field);
        (w != 0.0).then(|| Tensor3::identity() * w)
    }

    fn coupled_fields(&self) -> Vec<&str> {
        self.coefficient.field_name().into_iter().collect()
    }
}
