//! Coordinate-system integration factors.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{Axis, Vec3};

/// Coordinate system of the host mesh.
///
/// Face integrals in axisymmetric and spherically symmetric coordinates pick
/// up a factor of 2πr or 4πr² on every quadrature weight.
///
/// # Example
///
/// ```
/// use dg_transport::geometry::CoordinateSystem;
/// use dg_transport::types::Vec3;
///
/// let rz: CoordinateSystem = "RZ".parse().unwrap();
/// let f = rz.factor(&Vec3::new(2.0, 5.0, 0.0));
/// assert!((f - 4.0 * std::f64::consts::PI).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateSystem {
    /// Plain Cartesian (factor 1).
    #[default]
    Cartesian,
    /// Axisymmetric; `radial` names the coordinate used as r.
    Cylindrical { radial: Axis },
    /// Spherically symmetric; r is the x coordinate.
    Spherical,
}

impl CoordinateSystem {
    /// Axisymmetric coordinates with the radius along the given direction.
    ///
    /// # Errors
    /// `InvalidDirection` unless `radial_direction` is 0, 1 or 2.
    pub fn cylindrical(radial_direction: usize) -> ConfigResult<Self> {
        Ok(CoordinateSystem::Cylindrical {
            radial: Axis::try_from(radial_direction)?,
        })
    }

    /// Integration factor at a physical point.
    #[inline]
    pub fn factor(&self, point: &Vec3) -> f64 {
        match self {
            CoordinateSystem::Cartesian => 1.0,
            CoordinateSystem::Cylindrical { radial } => 2.0 * PI * point[radial.index()],
            CoordinateSystem::Spherical => 4.0 * PI * point[0] * point[0],
        }
    }
}

impl FromStr for CoordinateSystem {
    type Err = ConfigError;

    /// Parses `XYZ`, `RZ` (radius along x) and `RSPHERICAL`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XYZ" => Ok(CoordinateSystem::Cartesian),
            "RZ" => Ok(CoordinateSystem::Cylindrical { radial: Axis::X }),
            "RSPHERICAL" => Ok(CoordinateSystem::Spherical),
            _ => Err(ConfigError::UnknownCoordinateSystem(s.to_string())),
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateSystem::Cartesian => write!(f, "XYZ"),
            CoordinateSystem::Cylindrical { radial } => write!(f, "RZ(r={radial})"),
            CoordinateSystem::Spherical => write!(f, "RSPHERICAL"),
        }
    }
}
