//! Point-level vector algebra.
//!
//! Face kernels work in three dimensions regardless of the mesh dimension;
//! a 2D host simply leaves the z components at zero.

use std::fmt;

use nalgebra::{Matrix3, Vector3};

use crate::error::ConfigError;

/// Three-component real vector (gradients, normals, velocities).
pub type Vec3 = Vector3<f64>;

/// 3×3 real matrix (diffusion tensors).
pub type Tensor3 = Matrix3<f64>;

/// Normal component of a tensor-weighted gradient: `(D·∇g)·n`.
#[inline]
pub fn normal_flux(tensor: &Tensor3, gradient: &Vec3, normal: &Vec3) -> f64 {
    (tensor * gradient).dot(normal)
}

/// Cartesian axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index (0, 1 or 2).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    #[inline]
    pub fn unit(self) -> Vec3 {
        let mut e = Vec3::zeros();
        e[self.index()] = 1.0;
        e
    }

    /// Tensor with a single one on this axis' diagonal entry.
    #[inline]
    pub fn diagonal_unit(self) -> Tensor3 {
        let mut t = Tensor3::zeros();
        t[(self.index(), self.index())] = 1.0;
        t
    }
}

impl TryFrom<usize> for Axis {
    type Error = ConfigError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(ConfigError::InvalidDirection(other)),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}
