//! Face geometry consumed by the kernels.
//!
//! - [`FaceQuadrature`]: points, `JxW` weights, outward normals and the
//!   element-size measure `h` of one face
//! - [`FacePoint`]: the per-integration-point view handed to a kernel
//! - [`CoordinateSystem`]: Cartesian/axisymmetric/spherical weight factors

mod coordinates;
mod face;

pub use coordinates::CoordinateSystem;
pub use face::{FacePoint, FaceQuadrature, element_size};
