//! Interior-penalty diffusion term on an interior face.
//!
//! With `avg = ½(D∇u⁻·n + D∇u⁺·n)`, `⟦u⟧ = u⁻ − u⁺` and porosity `p`, the
//! owner (⁻) and neighbor (⁺) residuals are
//!
//! ```text
//! R⁻ = p [ −avg·t + ε·½⟦u⟧(D∇t·n) + (σ/h)⟦u⟧·t ]
//! R⁺ = p [ +avg·t + ε·½⟦u⟧(D∇t·n) − (σ/h)⟦u⟧·t ]
//! ```
//!
//! The consistency term keeps the same sign on both sides: the test-function
//! trace of each side enters the symmetric average with weight ½.
//! `D` and `p` are read on the owning element only.

use crate::diffusion::{
    AxisFieldDiffusion, ConstantDiffusion, DiffusionConfig, DiffusionSource, ScalarFieldDiffusion,
};
use crate::field::{Coefficient, FieldAccessor, ShapeFn, unique_fields};
use crate::geometry::FacePoint;
use crate::penalty::{PenaltyConfig, PenaltyParams};
use crate::types::{JacobianBlock, Side, Tensor3, Vec3, normal_flux};

use super::traits::InteriorFaceKernel;

/// Values at one integration point of an interior diffusion face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffusionSample {
    pub u: f64,
    pub u_neighbor: f64,
    pub grad_u: Vec3,
    pub grad_u_neighbor: Vec3,
    pub normal: Vec3,
    pub h: f64,
    pub diffusion: Tensor3,
    pub porosity: f64,
}

impl DiffusionSample {
    /// `⟦u⟧ = u⁻ − u⁺`
    #[inline]
    pub fn jump(&self) -> f64 {
        self.u - self.u_neighbor
    }

    /// Average normal flux `½(T∇u⁻·n + T∇u⁺·n)` for any tensor `T`.
    #[inline]
    fn average_flux(&self, tensor: &Tensor3) -> f64 {
        0.5 * (normal_flux(tensor, &self.grad_u, &self.normal)
            + normal_flux(tensor, &self.grad_u_neighbor, &self.normal))
    }
}

/// SIPG/IIPG/NIPG diffusion across an interior face.
///
/// # Example
/// ```
/// use dg_transport::diffusion::DiffusionConfig;
/// use dg_transport::flux::{InteriorDiffusion, InteriorFaceKernel};
/// use dg_transport::penalty::PenaltyConfig;
///
/// let kernel = InteriorDiffusion::anisotropic("c", PenaltyConfig::default(), &DiffusionConfig::diagonal(1.0, 2.0, 0.0));
/// assert_eq!(kernel.name(), "InteriorDiffusion");
/// assert!(kernel.coupled_fields().is_empty());
/// ```
#[derive(Debug)]
pub struct InteriorDiffusion {
    variable: String,
    penalty: PenaltyParams,
    diffusion: Box<dyn DiffusionSource>,
    porosity: Coefficient,
}

impl InteriorDiffusion {
    /// Kernel with an arbitrary diffusion source.
    pub fn new(
        variable: impl Into<String>,
        penalty: PenaltyConfig,
        diffusion: impl DiffusionSource + 'static,
    ) -> Self {
        Self {
            variable: variable.into(),
            penalty: penalty.resolve(),
            diffusion: Box::new(diffusion),
            porosity: Coefficient::constant(1.0),
        }
    }

    /// Scalar diffusivity `d·I`.
    pub fn isotropic(variable: impl Into<String>, penalty: PenaltyConfig, d: f64) -> Self {
        Self::anisotropic(variable, penalty, &DiffusionConfig::isotropic(d))
    }

    /// Full constant tensor.
    pub fn anisotropic(
        variable: impl Into<String>,
        penalty: PenaltyConfig,
        config: &DiffusionConfig,
    ) -> Self {
        Self::new(variable, penalty, ConstantDiffusion::new(config))
    }

    /// Diagonal tensor with per-axis coefficients.
    pub fn axis_fields(
        variable: impl Into<String>,
        penalty: PenaltyConfig,
        dx: Coefficient,
        dy: Coefficient,
        dz: Coefficient,
    ) -> Self {
        Self::new(variable, penalty, AxisFieldDiffusion::new(dx, dy, dz))
    }

    /// Scalar coefficient `k·I`, e.g. thermal conductivity or viscosity.
    pub fn variable_coefficient(
        variable: impl Into<String>,
        penalty: PenaltyConfig,
        coefficient: Coefficient,
    ) -> Self {
        Self::new(variable, penalty, ScalarFieldDiffusion::new(coefficient))
    }

    /// Multiply every term by a porosity.
    pub fn with_porosity(mut self, porosity: Coefficient) -> Self {
        self.porosity = porosity;
        self
    }

    /// Resolved penalty parameters.
    pub fn penalty(&self) -> &PenaltyParams {
        &self.penalty
    }

    /// Average-flux and consistency terms, without porosity.
    ///
    /// Linear in the tensor, so the same expression with `∂D` gives the
    /// tensor part of the off-diagonal Jacobian.
    #[inline]
    fn flux_terms(&self, s: &DiffusionSample, tensor: &Tensor3, side: Side, test: &ShapeFn) -> f64 {
        let consistency =
            self.penalty.epsilon() * 0.5 * s.jump() * normal_flux(tensor, &test.gradient, &s.normal);
        -side.jump_sign() * s.average_flux(tensor) * test.value + consistency
    }

    #[inline]
    fn penalty_term(&self, s: &DiffusionSample, side: Side, test: &ShapeFn) -> f64 {
        side.jump_sign() * self.penalty.penalty_over(s.h) * s.jump() * test.value
    }

    #[inline]
    fn undivided_residual(&self, s: &DiffusionSample, side: Side, test: &ShapeFn) -> f64 {
        self.flux_terms(s, &s.diffusion, side, test) + self.penalty_term(s, side, test)
    }
}

impl InteriorFaceKernel for InteriorDiffusion {
    type Sample = DiffusionSample;

    fn name(&self) -> &'static str {
        "InteriorDiffusion"
    }

    fn variable(&self) -> &str {
        &self.variable
    }

    fn sample(&self, fields: &dyn FieldAccessor, point: &FacePoint) -> DiffusionSample {
        let qp = point.qp;
        DiffusionSample {
            u: fields.value(&self.variable, qp),
            u_neighbor: fields.value_on_neighbor(&self.variable, qp),
            grad_u: fields.gradient(&self.variable, qp),
            grad_u_neighbor: fields.gradient_on_neighbor(&self.variable, qp),
            normal: point.normal,
            h: point.h,
            diffusion: self.diffusion.sample(fields, qp),
            porosity: self.porosity.sample(fields, qp),
        }
    }

    #[inline]
    fn residual(&self, s: &DiffusionSample, side: Side, test: &ShapeFn) -> f64 {
        s.porosity * self.undivided_residual(s, side, test)
    }

    fn jacobian(
        &self,
        s: &DiffusionSample,
        block: JacobianBlock,
        test: &ShapeFn,
        trial: &ShapeFn,
    ) -> f64 {
        let test_sign = block.test_side().jump_sign();
        // derivative of ⟦u⟧ with respect to the trial side's unknown
        let d_jump = block.trial_side().jump_sign() * trial.value;
        let d_avg = 0.5 * normal_flux(&s.diffusion, &trial.gradient, &s.normal);

        let flux = -test_sign * d_avg * test.value;
        let consistency = self.penalty.epsilon()
            * 0.5
            * d_jump
            * normal_flux(&s.diffusion, &test.gradient, &s.normal);
        let penalty = test_sign * self.penalty.penalty_over(s.h) * d_jump * test.value;

        s.porosity * (flux + consistency + penalty)
    }

    fn off_diag_jacobian(
        &self,
        s: &DiffusionSample,
        block: JacobianBlock,
        field: &str,
        test: &ShapeFn,
        trial: &ShapeFn,
    ) -> f64 {
        // Coupled coefficients live on the owning element
        if block.trial_side() != Side::Owner {
            return 0.0;
        }
        let side = block.test_side();

        let mut value = 0.0;
        if let Some(d_tensor) = self.diffusion.derivative(field) {
            value += s.porosity * self.flux_terms(s, &d_tensor, side, test);
        }
        value += self.porosity.derivative(field) * self.undivided_residual(s, side, test);
        value * trial.value
    }

    fn coupled_fields(&self) -> Vec<&str> {
        let mut names = self.diffusion.coupled_fields();
        names.extend(self.porosity.field_name());
        unique_fields(names)
    }
}
