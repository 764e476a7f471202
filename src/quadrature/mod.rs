//! Face quadrature rules.
//!
//! Provides the 1D Gauss-Legendre rule used to integrate along straight
//! faces of 2D elements. Hosts with their own face rules can ignore this and
//! fill a [`FaceQuadrature`](crate::geometry::FaceQuadrature) directly.

mod gauss;
mod legendre;

pub use gauss::gauss_legendre;
pub use legendre::legendre_and_derivative;
