//! Strongly-typed building blocks shared by every kernel.
//!
//! - Index newtypes so quadrature-point and dof loops cannot be mixed up
//! - [`Side`] and [`JacobianBlock`] for two-sided interior faces
//! - [`Vec3`]/[`Tensor3`] aliases and the [`Axis`] enum
//!
//! # Example
//!
//! ```
//! use dg_transport::types::{Axis, JacobianBlock, Side};
//!
//! let block = JacobianBlock::new(Side::Owner, Side::Neighbor);
//! assert_eq!(block.trial_side(), Side::Neighbor);
//! assert!(Axis::try_from(3).is_err());
//! ```

mod indices;
mod sides;
mod vector;

pub use indices::{DofIndex, QpIndex};
pub use sides::{JacobianBlock, Side};
pub use vector::{Axis, Tensor3, Vec3, normal_flux};
