//! Upwind advection across an interior face.
//!
//! The face flux is `p·(v·n)·u_up`, where `u_up` is the owner trace when
//! `v·n ≥ 0` and the neighbor trace otherwise. It leaves the owner
//! (`+t`) and enters the neighbor (`−t`).

use crate::field::{Coefficient, FieldAccessor, ShapeFn, unique_fields};
use crate::geometry::FacePoint;
use crate::types::{JacobianBlock, Side, Vec3};

use super::traits::InteriorFaceKernel;
use super::velocity::{ConstantVelocity, VelocitySource};

/// Values at one integration point of an interior advection face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdvectionSample {
    pub u: f64,
    pub u_neighbor: f64,
    pub normal: Vec3,
    pub velocity: Vec3,
    pub porosity: f64,
}

impl AdvectionSample {
    /// Normal velocity `v·n`.
    #[inline]
    pub fn normal_velocity(&self) -> f64 {
        self.velocity.dot(&self.normal)
    }

    /// Side the upwind value is taken from.
    #[inline]
    pub fn upwind_side(&self) -> Side {
        if self.normal_velocity() >= 0.0 {
            Side::Owner
        } else {
            Side::Neighbor
        }
    }

    /// Upwind trace.
    #[inline]
    pub fn upwind_value(&self) -> f64 {
        match self.upwind_side() {
            Side::Owner => self.u,
            Side::Neighbor => self.u_neighbor,
        }
    }
}

/// First-order upwind advection between two elements.
#[derive(Debug)]
pub struct InteriorAdvection {
    variable: String,
    velocity: Box<dyn VelocitySource>,
    porosity: Coefficient,
}

impl InteriorAdvection {
    /// Kernel with an arbitrary velocity source.
    pub fn new(variable: impl Into<String>, velocity: impl VelocitySource + 'static) -> Self {
        Self {
            variable: variable.into(),
            velocity: Box::new(velocity),
            porosity: Coefficient::constant(1.0),
        }
    }

    /// Constant velocity.
    pub fn constant(variable: impl Into<String>, velocity: Vec3) -> Self {
        Self::new(variable, ConstantVelocity::new(velocity))
    }

    /// Multiply the flux by a porosity.
    pub fn with_porosity(mut self, porosity: Coefficient) -> Self {
        self.porosity = porosity;
        self
    }
}

impl InteriorFaceKernel for InteriorAdvection {
    type Sample = AdvectionSample;

    fn name(&self) -> &'static str {
        "InteriorAdvection"
    }

    fn variable(&self) -> &str {
        &self.variable
    }

    fn sample(&self, fields: &dyn FieldAccessor, point: &FacePoint) -> AdvectionSample {
        let qp = point.qp;
        AdvectionSample {
            u: fields.value(&self.variable, qp),
            u_neighbor: fields.value_on_neighbor(&self.variable, qp),
            normal: point.normal,
            velocity: self.velocity.sample(fields, qp),
            porosity: self.porosity.sample(fields, qp),
        }
    }

    #[inline]
    fn residual(&self, s: &AdvectionSample, side: Side, test: &ShapeFn) -> f64 {
        side.jump_sign() * s.porosity * test.value * s.normal_velocity() * s.upwind_value()
    }

    fn jacobian(
        &self,
        s: &AdvectionSample,
        block: JacobianBlock,
        test: &ShapeFn,
        trial: &ShapeFn,
    ) -> f64 {
        if block.trial_side() != s.upwind_side() {
            return 0.0;
        }
        block.test_side().jump_sign() * s.porosity * test.value * s.normal_velocity() * trial.value
    }

    fn off_diag_jacobian(
        &self,
        s: &AdvectionSample,
        block: JacobianBlock,
        field: &str,
        test: &ShapeFn,
        trial: &ShapeFn,
    ) -> f64 {
        if block.trial_side() != Side::Owner {
            return 0.0;
        }
        let sign = block.test_side().jump_sign();
        let u_up = s.upwind_value();

        let mut value = 0.0;
        if let Some(dv) = self.velocity.derivative(field) {
            value += s.porosity * dv.dot(&s.normal) * u_up;
        }
        value += self.porosity.derivative(field) * s.normal_velocity() * u_up;
        sign * value * test.value * trial.value
    }

    fn coupled_fields(&self) -> Vec<&str> {
        let mut names = self.velocity.coupled_fields();
        names.extend(self.porosity.field_name());
        unique_fields(names)
    }
}
