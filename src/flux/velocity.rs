//! Transporting velocity sources.

use std::fmt;

use crate::field::{Coefficient, FieldAccessor, unique_fields};
use crate::types::{Axis, QpIndex, Vec3};

/// Constant velocity components, zero by default.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VelocityConfig {
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

impl VelocityConfig {
    /// Create from components.
    pub fn new(vx: f64, vy: f64, vz: f64) -> Self {
        Self { vx, vy, vz }
    }

    /// As a vector.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.vx, self.vy, self.vz)
    }
}

/// Where a kernel's transporting velocity comes from.
pub trait VelocitySource: Send + Sync + fmt::Debug {
    /// Velocity at an integration point (owner side).
    fn sample(&self, fields: &dyn FieldAccessor, qp: QpIndex) -> Vec3;

    /// `∂v/∂field`, or `None` when the velocity does not depend on `field`.
    fn derivative(&self, field: &str) -> Option<Vec3>;

    /// Coupled fields the velocity reads.
    fn coupled_fields(&self) -> Vec<&str>;
}

/// Velocity fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantVelocity {
    velocity: Vec3,
}

impl ConstantVelocity {
    /// From a vector.
    pub fn new(velocity: Vec3) -> Self {
        Self { velocity }
    }

    /// From configuration components.
    pub fn from_config(config: VelocityConfig) -> Self {
        Self::new(config.to_vec3())
    }

    /// The velocity.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

impl VelocitySource for ConstantVelocity {
    #[inline]
    fn sample(&self, _fields: &dyn FieldAccessor, _qp: QpIndex) -> Vec3 {
        self.velocity
    }

    fn derivative(&self, _field: &str) -> Option<Vec3> {
        None
    }

    fn coupled_fields(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Velocity with each component constant or read from a coupled field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldVelocity {
    components: [Coefficient; 3],
}

impl FieldVelocity {
    /// From per-component coefficients (x, y, z).
    pub fn new(vx: Coefficient, vy: Coefficient, vz: Coefficient) -> Self {
        Self {
            components: [vx, vy, vz],
        }
    }

    /// Coefficient of one component.
    pub fn component(&self, axis: Axis) -> &Coefficient {
        &self.components[axis.index()]
    }
}

impl VelocitySource for FieldVelocity {
    #[inline]
    fn sample(&self, fields: &dyn FieldAccessor, qp: QpIndex) -> Vec3 {
        Vec3::new(
            self.components[0].sample(fields, qp),
            self.components[1].sample(fields, qp),
            self.components[2].sample(fields, qp),
        )
    }

    fn derivative(&self, field: &str) -> Option<Vec3> {
        let d = Vec3::new(
            self.components[0].derivative(field),
            self.components[1].derivative(field),
            self.components[2].derivative(field),
        );
        (d != Vec3::zeros()).then_some(d)
    }

    fn coupled_fields(&self) -> Vec<&str> {
        unique_fields(self.components.iter().filter_map(Coefficient::field_name))
    }
}
