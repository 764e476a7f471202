//! # dg-transport
//!
//! Interior-penalty Discontinuous Galerkin face kernels for scalar
//! transport.
//!
//! This crate provides the face terms a DG transport solver assembles:
//! - Penalty scheme selection (SIPG, IIPG, NIPG)
//! - Interior face kernels: interior-penalty diffusion, upwind advection
//! - Boundary face kernels: advective, diffusive and flux-limited inlets,
//!   wall heat flux
//! - Inlet sources: constant, coupled field, time schedule, ppm conversion
//! - Local face assembly into residual vectors and Jacobian blocks
//!
//! Meshes, basis functions and global solvers belong to the host; kernels
//! read field values through [`field::FieldAccessor`] and return
//! per-integration-point contributions.
//!
//! # Example
//!
//! ```
//! use dg_transport::assembly::{FaceContext, InteriorShapes, ShapeTable, assemble_interior_face};
//! use dg_transport::field::{FieldTable, ShapeFn};
//! use dg_transport::flux::InteriorDiffusion;
//! use dg_transport::geometry::FaceQuadrature;
//! use dg_transport::penalty::{DgScheme, PenaltyConfig};
//! use dg_transport::types::{Side, Vec3};
//!
//! // Right edge of the unit square
//! let face = FaceQuadrature::segment(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0), 1.0, 1, 2)?;
//! let kernel = InteriorDiffusion::isotropic("u", PenaltyConfig::new(DgScheme::Sipg, 10.0), 1.0);
//!
//! // u = x on both elements: no jump, so the face adds nothing in total
//! let fields = FieldTable::new(face.n_qp()).with_linear("u", face.points(), 0.0, Vec3::x());
//! let shapes = ShapeTable::from_fn(1, face.n_qp(), |_, _| ShapeFn::constant(1.0));
//!
//! let result = assemble_interior_face(
//!     &kernel,
//!     &fields,
//!     &FaceContext::new(&face, 0.0),
//!     InteriorShapes::new(&shapes, &shapes),
//! );
//! let net = result.residual(Side::Owner)[0] + result.residual(Side::Neighbor)[0];
//! assert!(net.abs() < 1e-12);
//! # Ok::<(), dg_transport::ConfigError>(())
//! ```

pub mod assembly;
pub mod boundary;
pub mod diffusion;
pub mod error;
pub mod field;
pub mod flux;
pub mod geometry;
pub mod penalty;
pub mod quadrature;
pub mod types;
pub mod units;

// Re-export main types for convenience
pub use assembly::{
    BoundaryFaceResult, FaceContext, InteriorFaceResult, InteriorShapes, ShapeTable,
    assemble_boundary_face, assemble_boundary_off_diagonal, assemble_interior_face,
    assemble_interior_off_diagonal,
};
#[cfg(feature = "parallel")]
pub use assembly::{assemble_boundary_faces_parallel, assemble_interior_faces_parallel};
pub use boundary::{
    BoundaryFaceKernel, BoundaryFlux, BoundaryFluxLimiter, ConstantInput, FieldInput,
    FluxDirection, InputSource, PpmInput, ScheduleConfig, ScheduledInput, WallHeatFlux,
};
pub use diffusion::{DiffusionConfig, DiffusionSource};
pub use error::{ConfigError, ConfigResult};
pub use field::{Coefficient, FieldAccessor, FieldTable, ShapeFn, check_fields, unique_fields};
pub use flux::{
    ConstantVelocity, FieldVelocity, InteriorAdvection, InteriorDiffusion, InteriorFaceKernel,
    VelocityConfig, VelocitySource,
};
pub use geometry::{CoordinateSystem, FacePoint, FaceQuadrature};
pub use penalty::{DgScheme, PenaltyConfig, PenaltyParams};
pub use types::{Axis, JacobianBlock, Side, Tensor3, Vec3};
pub use units::GasConversion;
