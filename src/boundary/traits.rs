//! Boundary face kernel abstraction.
//!
//! The one-sided counterpart of [`crate::flux::InteriorFaceKernel`]: a
//! boundary face has only the owning element, so there is a single residual
//! and a single Jacobian block.

use std::fmt::Debug;

use crate::field::{FieldAccessor, ShapeFn, unique_fields};
use crate::geometry::FacePoint;

/// DG term on a domain boundary face.
///
/// Sampling may advance shared state that is monotone in time (a schedule
/// cursor); residual and Jacobian evaluation are pure.
pub trait BoundaryFaceKernel: Send + Sync {
    /// Everything the pure evaluation functions need at one point.
    type Sample: Copy + Debug;

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Name of the primary variable.
    fn variable(&self) -> &str;

    /// Read fields, geometry and boundary data at one integration point.
    fn sample(&self, fields: &dyn FieldAccessor, point: &FacePoint) -> Self::Sample;

    /// Residual contribution.
    fn residual(&self, sample: &Self::Sample, test: &ShapeFn) -> f64;

    /// Derivative of the residual with respect to the primary variable.
    fn jacobian(&self, sample: &Self::Sample, test: &ShapeFn, trial: &ShapeFn) -> f64;

    /// Derivative of the residual with respect to a coupled field.
    fn off_diag_jacobian(
        &self,
        sample: &Self::Sample,
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
