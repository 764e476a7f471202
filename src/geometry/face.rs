//! Face integration points and element-size measure.

use crate::error::{ConfigError, ConfigResult};
use crate::quadrature::gauss_legendre;
use crate::types::{QpIndex, Vec3};

/// Element-size measure used to scale the penalty term.
///
/// `h = volume(element) / volume(side) / order²`
///
/// A piecewise-constant variable (order 0) is treated as order 1.
#[inline]
pub fn element_size(element_volume: f64, side_volume: f64, order: u32) -> f64 {
    let p = order.max(1) as f64;
    element_volume / side_volume / (p * p)
}

/// Everything a kernel needs to know about one integration point.
///
/// Built per point by the assembly loop; never cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacePoint {
    /// Quadrature point index on the face.
    pub qp: QpIndex,
    /// Physical location.
    pub position: Vec3,
    /// Outward unit normal (pointing out of the owning element).
    pub normal: Vec3,
    /// Element-size measure for the penalty term.
    pub h: f64,
    /// Current simulation time.
    pub time: f64,
}

impl FacePoint {
    /// Create a point.
    pub fn new(qp: QpIndex, position: Vec3, normal: Vec3, h: f64, time: f64) -> Self {
        Self {
            qp,
            position,
            normal,
            h,
            time,
        }
    }

    /// Same point at a different time.
    pub fn at_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }
}

/// Integration points, weights and normals of one face.
///
/// Weights are the physical `JxW` values (reference weight × face Jacobian).
#[derive(Clone, Debug, PartialEq)]
pub struct FaceQuadrature {
    points: Vec<Vec3>,
    weights: Vec<f64>,
    normals: Vec<Vec3>,
    h: f64,
}

impl FaceQuadrature {
    /// Build from host-supplied data.
    ///
    /// # Errors
    /// - `LengthMismatch` if `weights` or `normals` differ in length from `points`
    /// - `NonPositive` if `h` is not positive
    pub fn new(points: Vec<Vec3>, weights: Vec<f64>, normals: Vec<Vec3>, h: f64) -> ConfigResult<Self> {
        if weights.len() != points.len() {
            return Err(ConfigError::length_mismatch("weights", points.len(), weights.len()));
        }
        if normals.len() != points.len() {
            return Err(ConfigError::length_mismatch("normals", points.len(), normals.len()));
        }
        if !(h > 0.0) {
            return Err(ConfigError::NonPositive { name: "h", value: h });
        }
        Ok(Self {
            points,
            weights,
            normals,
            h,
        })
    }

    /// Gauss-Legendre rule on the straight face from `a` to `b` in the
    /// xy-plane.
    ///
    /// The element is assumed to lie to the left of `a → b` (counterclockwise
    /// vertex order), so the outward normal points to the right.
    ///
    /// # Errors
    /// - `NonPositive` for a degenerate face, non-positive element area,
    ///   or zero quadrature points
    pub fn segment(
        a: Vec3,
        b: Vec3,
        element_volume: f64,
        order: u32,
        n_points: usize,
    ) -> ConfigResult<Self> {
        let edge = b - a;
        let length = edge.norm();
        if !(length > 0.0) {
            return Err(ConfigError::NonPositive { name: "face length", value: length });
        }
        if !(element_volume > 0.0) {
            return Err(ConfigError::NonPositive { name: "element volume", value: element_volume });
        }
        if n_points == 0 {
            return Err(ConfigError::NonPositive { name: "quadrature points", value: 0.0 });
        }

        let normal = Vec3::new(edge.y, -edge.x, 0.0) / length;
        let (nodes, ref_weights) = gauss_legendre(n_points);

        let points = nodes.iter().map(|&s| a + edge * (0.5 * (s + 1.0))).collect();
        let weights = ref_weights.iter().map(|w| 0.5 * length * w).collect();
        let normals = vec![normal; n_points];

        Self::new(points, weights, normals, element_size(element_volume, length, order))
    }

    /// Number of integration points.
    #[inline]
    pub fn n_qp(&self) -> usize {
        self.points.len()
    }

    /// Physical points.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Physical weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Outward normals.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Element-size measure.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Face measure (sum of weights).
    pub fn measure(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Kernel view of one integration point.
    #[inline]
    pub fn face_point(&self, qp: QpIndex, time: f64) -> FacePoint {
        FacePoint::new(qp, self.points[qp], self.normals[qp], self.h, time)
    }
}
