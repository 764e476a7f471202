//! Interior face kernels.
//!
//! Kernels acting on faces shared by two elements:
//! - [`InteriorDiffusion`]: symmetric/incomplete/non-symmetric interior
//!   penalty diffusion with constant, anisotropic, per-axis or scalar
//!   field coefficients
//! - [`InteriorAdvection`]: first-order upwind advection
//!
//! # Kernel Trait
//!
//! The [`InteriorFaceKernel`] trait separates sampling (reading fields at one
//! integration point) from evaluation (pure residual and Jacobian functions
//! of the sample). Assembly in [`crate::assembly`] is generic over it.
//!
//! # Velocity Sources
//!
//! Advection kernels, here and in [`crate::boundary`], read their velocity
//! through [`VelocitySource`]: either [`ConstantVelocity`] or
//! [`FieldVelocity`] with per-component coupled fields.

mod interior_advection;
mod interior_diffusion;
pub mod traits;
mod velocity;

pub use interior_advection::{AdvectionSample, InteriorAdvection};
pub use interior_diffusion::{DiffusionSample, InteriorDiffusion};
pub use traits::InteriorFaceKernel;
pub use velocity::{ConstantVelocity, FieldVelocity, VelocityConfig, VelocitySource};
