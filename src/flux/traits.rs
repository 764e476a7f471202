//! Trait-based interior face kernel abstraction.
//!
//! An interior face kernel contributes to two element equations (owner and
//! neighbor) and to four Jacobian blocks. Evaluation is split in two:
//!
//! 1. [`InteriorFaceKernel::sample`] reads every field the kernel needs at
//!    one integration point and returns a plain `Copy` sample.
//! 2. [`residual`](InteriorFaceKernel::residual),
//!    [`jacobian`](InteriorFaceKernel::jacobian) and
//!    [`off_diag_jacobian`](InteriorFaceKernel::off_diag_jacobian) are pure
//!    functions of that sample and one test (and trial) function.
//!
//! The assembly loop samples once per point and then calls the pure
//! functions for every test/trial pair, so nothing is recomputed per dof.
//!
//! # Example
//! ```
//! use dg_transport::field::{FieldTable, ShapeFn};
//! use dg_transport::flux::{InteriorDiffusion, InteriorFaceKernel};
//! use dg_transport::geometry::FacePoint;
//! use dg_transport::penalty::{DgScheme, PenaltyConfig};
//! use dg_transport::types::{QpIndex, Side, Vec3};
//!
//! let kernel = InteriorDiffusion::isotropic("u", PenaltyConfig::new(DgScheme::Sipg, 10.0), 1.0);
//! let fields = FieldTable::new(1).with_uniform("u", 2.0);
//! let point = FacePoint::new(QpIndex::ZERO, Vec3::zeros(), Vec3::x(), 1.0, 0.0);
//!
//! let s = kernel.sample(&fields, &point);
//! let test = ShapeFn::constant(1.0);
//! let r = kernel.residual(&s, Side::Owner, &test) + kernel.residual(&s, Side::Neighbor, &test);
//! assert!(r.abs() < 1e-14);
//! ```

use std::fmt::Debug;

use crate::field::{FieldAccessor, ShapeFn, unique_fields};
use crate::geometry::FacePoint;
use crate::types::{JacobianBlock, Side};

/// Two-sided DG term on a face shared by an owning and a neighbor element.
///
/// # Implementation Notes
///
/// - `sample` is the only method that touches the field accessor
/// - residual/Jacobian methods must not allocate
/// - off-diagonal Jacobians return zero for fields the kernel does not read
pub trait InteriorFaceKernel: Send + Sync {
    /// Everything the pure evaluation functions need at one point.
    type Sample: Copy + Debug;

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Name of the primary variable this kernel acts on.
    fn variable(&self) -> &str;

    /// Read fields and geometry at one integration point.
    fn sample(&self, fields: &dyn FieldAccessor, point: &FacePoint) -> Self::Sample;

    /// Residual contribution to the equation on `side`.
    fn residual(&self, sample: &Self::Sample, side: Side, test: &ShapeFn) -> f64;

    /// Derivative of the residual with respect to the primary variable.
    fn jacobian(
        &self,
        sample: &Self::Sample,
        block: JacobianBlock,
        test: &ShapeFn,
        trial: &ShapeFn,
    ) -> f64;

    /// Derivative of the residual with respect to a coupled field.
    fn off_diag_jacobian(
        &self,
        sample: &Self::Sample,
        block: JacobianBlock,
        field: &str,
        test: &ShapeFn,
        trial: &ShapeFn,
    ) -> f64;

    /// Coupled fields the kernel reads besides its own variable.
    fn coupled_fields(&self) -> Vec<&str>;

    /// Every field the accessor must provide.
    fn required_fields(&self) -> Vec<&str> {
        unique_fields(std::iter::once(self.variable()).chain(self.coupled_fields()))
    }
}
