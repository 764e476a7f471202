//! Flux-limited inlet/outlet boundary kernel.
//!
//! One kernel covers the whole family of transport boundary conditions.
//! Three strategies decide where the data comes from:
//!
//! - [`VelocitySource`]: transporting velocity
//! - [`DiffusionSource`]: diffusion tensor
//! - [`InputSource`]: prescribed inlet value `u_in`
//!
//! and a [`BoundaryFlux`] mode decides which terms apply. With `vn = v·n`,
//! `m = u − u_in` and porosity `p`:
//!
//! | Mode | Outflow (`vn > 0`) | Inflow (`vn ≤ 0`) |
//! |------|--------------------|-------------------|
//! | `Advective` | `p·t·vn·u` | `p·t·vn·u_in` |
//! | `FluxLimited` | `p·t·vn·u` | `p[t·vn·u_in − t·vn·m + ε·m(D∇t·n) + (σ/h)·m·t − (D∇u·n)t]` |
//! | `Diffusive` | `p[ε·m(D∇t·n) + (σ/h)·m·t − (D∇u·n)t]` | same |

use std::fmt;
use std::str::FromStr;

use crate::diffusion::{ConstantDiffusion, DiffusionSource};
use crate::error::ConfigError;
use crate::field::{Coefficient, FieldAccessor, ShapeFn, unique_fields};
use crate::flux::{ConstantVelocity, VelocitySource};
use crate::geometry::FacePoint;
use crate::penalty::{PenaltyConfig, PenaltyParams};
use crate::types::{Tensor3, Vec3, normal_flux};

use super::input::{InputSample, InputSource};
use super::traits::BoundaryFaceKernel;

/// Direction of the advective flux through a boundary point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FluxDirection {
    /// Material enters the domain (`v·n ≤ 0`).
    Inflow,
    /// Material leaves the domain (`v·n > 0`).
    Outflow,
}

impl FluxDirection {
    /// Classify by normal velocity. Zero counts as inflow.
    #[inline]
    pub fn classify(normal_velocity: f64) -> Self {
        if normal_velocity > 0.0 {
            FluxDirection::Outflow
        } else {
            FluxDirection::Inflow
        }
    }
}

/// Which terms a boundary flux kernel assembles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryFlux {
    /// Upwind advective flux only.
    Advective,
    /// Penalized diffusive flux only, active regardless of velocity.
    Diffusive,
    /// Upwind outflow, penalized inflow.
    #[default]
    FluxLimited,
}

impl BoundaryFlux {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            BoundaryFlux::Advective => "advective",
            BoundaryFlux::Diffusive => "diffusive",
            BoundaryFlux::FluxLimited => "flux-limited",
        }
    }

    /// Whether the diffusion/penalty terms apply in `direction`.
    #[inline]
    fn diffuses(self, direction: FluxDirection) -> bool {
        match self {
            BoundaryFlux::Advective => false,
            BoundaryFlux::Diffusive => true,
            BoundaryFlux::FluxLimited => direction == FluxDirection::Inflow,
        }
    }
}

impl fmt::Display for BoundaryFlux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryFlux {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advective" => Ok(BoundaryFlux::Advective),
            "diffusive" => Ok(BoundaryFlux::Diffusive),
            "flux-limited" | "flux_limited" | "fluxlimited" => Ok(BoundaryFlux::FluxLimited),
            _ => Err(ConfigError::UnknownBoundaryFlux(s.to_string())),
        }
    }
}

/// Values at one boundary integration point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundarySample {
    pub u: f64,
    pub grad_u: Vec3,
    pub normal: Vec3,
    pub h: f64,
    pub velocity: Vec3,
    pub diffusion: Tensor3,
    pub input: InputSample,
    pub porosity: f64,
}

impl BoundarySample {
    /// `v·n`
    #[inline]
    pub fn normal_velocity(&self) -> f64 {
        self.velocity.dot(&self.normal)
    }

    #[inline]
    pub fn direction(&self) -> FluxDirection {
        FluxDirection::classify(self.normal_velocity())
    }

    /// `u − u_in`
    #[inline]
    pub fn mismatch(&self) -> f64 {
        self.u - self.input.value
    }
}

/// Boundary flux kernel composed from velocity, diffusion and input sources.
///
/// # Example
/// ```
/// use dg_transport::boundary::{BoundaryFaceKernel, BoundaryFluxLimiter, ConstantInput};
/// use dg_transport::diffusion::ConstantDiffusion;
/// use dg_transport::field::{FieldTable, ShapeFn};
/// use dg_transport::flux::ConstantVelocity;
/// use dg_transport::geometry::FacePoint;
/// use dg_transport::penalty::PenaltyConfig;
/// use dg_transport::types::{QpIndex, Vec3};
///
/// let bc = BoundaryFluxLimiter::flux_limited(
///     "c",
///     PenaltyConfig::default(),
///     ConstantVelocity::new(Vec3::new(-1.0, 0.0, 0.0)),
///     ConstantDiffusion::zero(),
///     ConstantInput::new(2.0),
/// );
/// let fields = FieldTable::new(1).with_uniform("c", 2.0);
/// let s = bc.sample(&fields, &FacePoint::new(QpIndex::ZERO, Vec3::zeros(), Vec3::x(), 1.0, 0.0));
///
/// // Matching inlet: only the advective inflow −u_in remains
/// assert!((bc.residual(&s, &ShapeFn::constant(1.0)) + 2.0).abs() < 1e-14);
/// ```
#[derive(Debug)]
pub struct BoundaryFluxLimiter {
    variable: String,
    mode: BoundaryFlux,
    penalty: PenaltyParams,
    velocity: Box<dyn VelocitySource>,
    diffusion: Box<dyn DiffusionSource>,
    input: Box<dyn InputSource>,
    porosity: Coefficient,
}

impl BoundaryFluxLimiter {
    /// Kernel with every strategy given explicitly.
    pub fn new(
        variable: impl Into<String>,
        mode: BoundaryFlux,
        penalty: PenaltyConfig,
        velocity: impl VelocitySource + 'static,
        diffusion: impl DiffusionSource + 'static,
        input: impl InputSource + 'static,
    ) -> Self {
        Self {
            variable: variable.into(),
            mode,
            penalty: penalty.resolve(),
            velocity: Box::new(velocity),
            diffusion: Box::new(diffusion),
            input: Box::new(input),
            porosity: Coefficient::constant(1.0),
        }
    }

    /// Upwind advective flux with a prescribed inflow value.
    pub fn advective(
        variable: impl Into<String>,
        velocity: impl VelocitySource + 'static,
        input: impl InputSource + 'static,
    ) -> Self {
        Self::new(
            variable,
            BoundaryFlux::Advective,
            PenaltyConfig::default(),
            velocity,
            ConstantDiffusion::zero(),
            input,
        )
    }

    /// Weakly imposed Dirichlet value for pure diffusion.
    pub fn diffusive(
        variable: impl Into<String>,
        penalty: PenaltyConfig,
        diffusion: impl DiffusionSource + 'static,
        input: impl InputSource + 'static,
    ) -> Self {
        Self::new(
            variable,
            BoundaryFlux::Diffusive,
            penalty,
            ConstantVelocity::new(Vec3::zeros()),
            diffusion,
            input,
        )
    }

    /// Upwind outflow, penalized inflow.
    pub fn flux_limited(
        variable: impl Into<String>,
        penalty: PenaltyConfig,
        velocity: impl VelocitySource + 'static,
        diffusion: impl DiffusionSource + 'static,
        input: impl InputSource + 'static,
    ) -> Self {
        Self::new(variable, BoundaryFlux::FluxLimited, penalty, velocity, diffusion, input)
    }

    /// Multiply every term by a porosity.
    pub fn with_porosity(mut self, porosity: Coefficient) -> Self {
        self.porosity = porosity;
        self
    }

    pub fn mode(&self) -> BoundaryFlux {
        self.mode
    }

    pub fn penalty(&self) -> &PenaltyParams {
        &self.penalty
    }

    /// Consistency and natural-flux terms, linear in the tensor.
    #[inline]
    fn tensor_terms(&self, s: &BoundarySample, tensor: &Tensor3, test: &ShapeFn) -> f64 {
        self.penalty.epsilon() * s.mismatch() * normal_flux(tensor, &test.gradient, &s.normal)
            - normal_flux(tensor, &s.grad_u, &s.normal) * test.value
    }

    #[inline]
    fn penalized_terms(&self, s: &BoundarySample, test: &ShapeFn) -> f64 {
        self.tensor_terms(s, &s.diffusion, test)
            + self.penalty.penalty_over(s.h) * s.mismatch() * test.value
    }

    /// Residual without the porosity factor.
    fn undivided_residual(&self, s: &BoundarySample, test: &ShapeFn) -> f64 {
        let vn = s.normal_velocity();
        match (self.mode, s.direction()) {
            (BoundaryFlux::Diffusive, _) => self.penalized_terms(s, test),
            (_, FluxDirection::Outflow) => test.value * vn * s.u,
            (BoundaryFlux::Advective, FluxDirection::Inflow) => test.value * vn * s.input.value,
            (BoundaryFlux::FluxLimited, FluxDirection::Inflow) => {
                test.value * vn * s.input.value - test.value * vn * s.mismatch()
                    + self.penalized_terms(s, test)
            }
        }
    }

    /// `∂R/∂u_in`, without the porosity factor.
    fn input_derivative(&self, s: &BoundarySample, test: &ShapeFn) -> f64 {
        let vn = s.normal_velocity();
        let penalized = -self.penalty.epsilon() * normal_flux(&s.diffusion, &test.gradient, &s.normal)
            - self.penalty.penalty_over(s.h) * test.value;
        match (self.mode, s.direction()) {
            (BoundaryFlux::Diffusive, _) => penalized,
            (_, FluxDirection::Outflow) => 0.0,
            (BoundaryFlux::Advective, FluxDirection::Inflow) => test.value * vn,
            (BoundaryFlux::FluxLimited, FluxDirection::Inflow) => 2.0 * test.value * vn + penalized,
        }
    }

    /// `∂R/∂(v·n)`, without the porosity factor.
    fn normal_velocity_derivative(&self, s: &BoundarySample, test: &ShapeFn) -> f64 {
        match (self.mode, s.direction()) {
            (BoundaryFlux::Diffusive, _) => 0.0,
            (_, FluxDirection::Outflow) => test.value * s.u,
            (BoundaryFlux::Advective, FluxDirection::Inflow) => test.value * s.input.value,
            (BoundaryFlux::FluxLimited, FluxDirection::Inflow) => {
                test.value * (s.input.value - s.mismatch())
            }
        }
    }
}

impl BoundaryFaceKernel for BoundaryFluxLimiter {
    type Sample = BoundarySample;

    fn name(&self) -> &'static str {
        "BoundaryFluxLimiter"
    }

    fn variable(&self) -> &str {
        &self.variable
    }

    fn sample(&self, fields: &dyn FieldAccessor, point: &FacePoint) -> BoundarySample {
        let qp = point.qp;
        BoundarySample {
            u: fields.value(&self.variable, qp),
            grad_u: fields.gradient(&self.variable, qp),
            normal: point.normal,
            h: point.h,
            velocity: self.velocity.sample(fields, qp),
            diffusion: self.diffusion.sample(fields, qp),
            input: self.input.sample(fields, point),
            porosity: self.porosity.sample(fields, qp),
        }
    }

    #[inline]
    fn residual(&self, s: &BoundarySample, test: &ShapeFn) -> f64 {
        s.porosity * self.undivided_residual(s, test)
    }

    fn jacobian(&self, s: &BoundarySample, test: &ShapeFn, trial: &ShapeFn) -> f64 {
        let vn = s.normal_velocity();
        let direction = s.direction();

        let mut value = match (self.mode, direction) {
            (BoundaryFlux::Diffusive, _) => 0.0,
            (_, FluxDirection::Outflow) => test.value * vn * trial.value,
            (BoundaryFlux::Advective, FluxDirection::Inflow) => 0.0,
            (BoundaryFlux::FluxLimited, FluxDirection::Inflow) => -test.value * vn * trial.value,
        };
        if self.mode.diffuses(direction) {
            value += self.penalty.epsilon()
                * trial.value
                * normal_flux(&s.diffusion, &test.gradient, &s.normal)
                + self.penalty.penalty_over(s.h) * trial.value * test.value
                - normal_flux(&s.diffusion, &trial.gradient, &s.normal) * test.value;
        }
        s.porosity * value
    }

    fn off_diag_jacobian(
        &self,
        s: &BoundarySample,
        field: &str,
        test: &ShapeFn,
        trial: &ShapeFn,
    ) -> f64 {
        let mut value = 0.0;

        if let Some(dv) = self.velocity.derivative(field) {
            value += s.porosity * dv.dot(&s.normal) * self.normal_velocity_derivative(s, test);
        }
        if self.mode.diffuses(s.direction()) {
            if let Some(d_tensor) = self.diffusion.derivative(field) {
                value += s.porosity * self.tensor_terms(s, &d_tensor, test);
            }
        }
        value += self.porosity.derivative(field) * self.undivided_residual(s, test);
        if self.input.coupled_field() == Some(field) {
            value += s.porosity * s.input.sensitivity * self.input_derivative(s, test);
        }

        value * trial.value
    }

    fn coupled_fields(&self) -> Vec<&str> {
        let mut names = self.velocity.coupled_fields();
        names.extend(self.diffusion.coupled_fields());
        names.extend(self.porosity.field_name());
        names.extend(self.input.required_fields());
        unique_fields(names)
    }
}
