//! Convective heat loss through a wall.
//!
//! `R = t · h_w · (u − T_w)` with heat-transfer coefficient `h_w` and wall
//! temperature `T_w`. Unlike [`BoundaryFluxLimiter`](super::BoundaryFluxLimiter)
//! there is no inflow/outflow switch and no penalty or consistency term: the
//! exchange term is the whole contribution.

use crate::field::{Coefficient, FieldAccessor, ShapeFn, unique_fields};
use crate::geometry::FacePoint;

use super::input::{ConstantInput, InputSample, InputSource};
use super::traits::BoundaryFaceKernel;

/// Values at one wall integration point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSample {
    pub u: f64,
    pub coefficient: f64,
    pub wall: InputSample,
}

/// Newton cooling boundary term.
#[derive(Debug)]
pub struct WallHeatFlux {
    variable: String,
    coefficient: Coefficient,
    wall: Box<dyn InputSource>,
}

impl WallHeatFlux {
    /// Heat-transfer coefficient and wall temperature source.
    pub fn new(
        variable: impl Into<String>,
        coefficient: Coefficient,
        wall: impl InputSource + 'static,
    ) -> Self {
        Self {
            variable: variable.into(),
            coefficient,
            wall: Box::new(wall),
        }
    }

    /// Fixed wall temperature.
    pub fn constant(variable: impl Into<String>, coefficient: Coefficient, wall_temperature: f64) -> Self {
        Self::new(variable, coefficient, ConstantInput::new(wall_temperature))
    }
}

impl BoundaryFaceKernel for WallHeatFlux {
    type Sample = WallSample;

    fn name(&self) -> &'static str {
        "WallHeatFlux"
    }

    fn variable(&self) -> &str {
        &self.variable
    }

    fn sample(&self, fields: &dyn FieldAccessor, point: &FacePoint) -> WallSample {
        WallSample {
            u: fields.value(&self.variable, point.qp),
            coefficient: self.coefficient.sample(fields, point.qp),
            wall: self.wall.sample(fields, point),
        }
    }

    #[inline]
    fn residual(&self, s: &WallSample, test: &ShapeFn) -> f64 {
        test.value * s.coefficient * (s.u - s.wall.value)
    }

    #[inline]
    fn jacobian(&self, s: &WallSample, test: &ShapeFn, trial: &ShapeFn) -> f64 {
        test.value * s.coefficient * trial.value
    }

    fn off_diag_jacobian(&self, s: &WallSample, field: &str, test: &ShapeFn, trial: &ShapeFn) -> f64 {
        let mut value = self.coefficient.derivative(field) * (s.u - s.wall.value);
        if self.wall.coupled_field() == Some(field) {
            value -= s.coefficient * s.wall.sensitivity;
        }
        value * test.value * trial.value
    }

    fn coupled_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.coefficient.field_name().into_iter().collect();
        names.extend(self.wall.required_fields());
        unique_fields(names)
    }
}
