//! Analytic Jacobians against central finite differences of the residual.
//!
//! Every kernel is checked with respect to its own variable (all blocks)
//! and with respect to every coupled field it reads.

use dg_transport::boundary::{
    BoundaryFaceKernel, BoundaryFlux, BoundaryFluxLimiter, ConstantInput, FieldInput, PpmInput,
    WallHeatFlux,
};
use dg_transport::diffusion::{AxisFieldDiffusion, ConstantDiffusion, DiffusionConfig, ScalarFieldDiffusion};
use dg_transport::field::{Coefficient, FieldTable, ShapeFn};
use dg_transport::flux::{ConstantVelocity, FieldVelocity, InteriorAdvection, InteriorDiffusion, InteriorFaceKernel};
use dg_transport::geometry::FacePoint;
use dg_transport::penalty::{DgScheme, PenaltyConfig};
use dg_transport::types::{JacobianBlock, QpIndex, Side, Vec3};

const DELTA: f64 = 1e-6;
const TOL: f64 = 1e-6;

fn assert_close(analytic: f64, numeric: f64, what: &str) {
    let scale = 1.0 + analytic.abs().max(numeric.abs());
    assert!(
        (analytic - numeric).abs() < TOL * scale,
        "{what}: analytic {analytic} vs finite difference {numeric}"
    );
}

fn point() -> FacePoint {
    // Unit normal with all three components
    FacePoint::new(QpIndex::ZERO, Vec3::zeros(), Vec3::new(0.48, 0.6, 0.64), 0.25, 0.0)
}

fn test_functions() -> [ShapeFn; 2] {
    [
        ShapeFn::new(0.7, Vec3::new(1.1, -0.4, 0.3)),
        ShapeFn::new(-0.2, Vec3::new(0.0, 2.0, -1.5)),
    ]
}

fn trial_function() -> ShapeFn {
    ShapeFn::new(0.9, Vec3::new(-0.6, 0.8, 1.2))
}

// =============================================================================
// Interior
// =============================================================================

fn interior_fields() -> FieldTable {
    let mut fields = FieldTable::new(1)
        .with_uniform("dx", 1.3)
        .with_uniform("dz", 0.4)
        .with_uniform("k", 2.2)
        .with_uniform("eps", 0.45)
        .with_uniform("vx", 0.9)
        .with_uniform("vy", -0.3);
    let qp = QpIndex::ZERO;
    fields.set("u", Side::Owner, qp, 1.7, Vec3::new(0.5, -1.0, 0.25));
    fields.set("u", Side::Neighbor, qp, 1.1, Vec3::new(-0.3, 0.6, 1.4));
    fields
}

/// Central difference of `R_test_side` when `field` on `trial_side` moves along `trial`.
fn interior_fd<K: InteriorFaceKernel>(
    kernel: &K,
    fields: &FieldTable,
    field: &str,
    block: JacobianBlock,
    test: &ShapeFn,
    trial: &ShapeFn,
) -> f64 {
    let eval = |sign: f64| {
        let mut perturbed = fields.clone();
        perturbed.perturb(
            field,
            block.trial_side(),
            QpIndex::ZERO,
            sign * DELTA * trial.value,
            trial.gradient * (sign * DELTA),
        );
        let s = kernel.sample(&perturbed, &point());
        kernel.residual(&s, block.test_side(), test)
    };
    (eval(1.0) - eval(-1.0)) / (2.0 * DELTA)
}

fn check_interior<K: InteriorFaceKernel>(kernel: &K, fields: &FieldTable) {
    let s = kernel.sample(fields, &point());
    let trial = trial_function();

    for test in &test_functions() {
        for block in JacobianBlock::ALL {
            let numeric = interior_fd(kernel, fields, kernel.variable(), block, test, &trial);
            let analytic = kernel.jacobian(&s, block, test, &trial);
            assert_close(analytic, numeric, &format!("{} {block:?}", kernel.name()));

            for field in kernel.coupled_fields() {
                let numeric = interior_fd(kernel, fields, field, block, test, &trial);
                let analytic = kernel.off_diag_jacobian(&s, block, field, test, &trial);
                assert_close(analytic, numeric, &format!("{} {block:?} wrt {field}", kernel.name()));
            }
        }
    }
}

#[test]
fn test_interior_diffusion_all_schemes() {
    let fields = interior_fields();
    for scheme in [DgScheme::Sipg, DgScheme::Iipg, DgScheme::Nipg] {
        let penalty = PenaltyConfig::new(scheme, 7.0);

        let constant = InteriorDiffusion::anisotropic(
            "u",
            penalty,
            &DiffusionConfig {
                dxx: 1.0,
                dxy: 0.2,
                dyy: 0.8,
                dzz: 0.5,
                dzx: -0.1,
                ..Default::default()
            },
        );
        check_interior(&constant, &fields);

        let axis = InteriorDiffusion::axis_fields("u", penalty, "dx".into(), 0.7.into(), "dz".into())
            .with_porosity(Coefficient::field("eps"));
        check_interior(&axis, &fields);

        let scalar = InteriorDiffusion::variable_coefficient("u", penalty, "k".into())
            .with_porosity(Coefficient::field("eps"));
        check_interior(&scalar, &fields);
    }
}

#[test]
fn test_shared_field_on_every_axis() {
    // One field on all three diagonal entries: contributions add up
    let fields = interior_fields();
    let kernel = InteriorDiffusion::axis_fields(
        "u",
        PenaltyConfig::new(DgScheme::Sipg, 3.0),
        "k".into(),
        "k".into(),
        "k".into(),
    );
    check_interior(&kernel, &fields);
}

#[test]
fn test_interior_advection_both_directions() {
    let fields = interior_fields();

    // v·n = 0.9·0.48 − 0.3·0.6 > 0
    let kernel = InteriorAdvection::new("u", FieldVelocity::new("vx".into(), "vy".into(), 0.1.into()))
        .with_porosity(Coefficient::field("eps"));
    check_interior(&kernel, &fields);

    let kernel = InteriorAdvection::new("u", ConstantVelocity::new(Vec3::new(-1.0, -0.5, 0.2)));
    check_interior(&kernel, &fields);
}

// =============================================================================
// Boundary
// =============================================================================

fn boundary_fields(vx: f64) -> FieldTable {
    let mut fields = FieldTable::new(1)
        .with_uniform("vx", vx)
        .with_uniform("dx", 0.8)
        .with_uniform("dy", 1.6)
        .with_uniform("eps", 0.6)
        .with_uniform("cin", 0.75)
        .with_uniform("ppm", 800.0)
        .with_uniform("P", 101.35)
        .with_uniform("T", 310.0)
        .with_uniform("hw", 12.0)
        .with_uniform("Tw", 290.0)
        .with_uniform("k", 0.9);
    fields.set("c", Side::Owner, QpIndex::ZERO, 1.4, Vec3::new(0.3, -0.7, 0.2));
    fields
}

fn boundary_fd<K: BoundaryFaceKernel>(
    kernel: &K,
    fields: &FieldTable,
    field: &str,
    test: &ShapeFn,
    trial: &ShapeFn,
) -> f64 {
    let eval = |sign: f64| {
        let mut perturbed = fields.clone();
        perturbed.perturb(
            field,
            Side::Owner,
            QpIndex::ZERO,
            sign * DELTA * trial.value,
            trial.gradient * (sign * DELTA),
        );
        let s = kernel.sample(&perturbed, &point());
        kernel.residual(&s, test)
    };
    (eval(1.0) - eval(-1.0)) / (2.0 * DELTA)
}

fn check_boundary<K: BoundaryFaceKernel>(kernel: &K, fields: &FieldTable, suppressed: &[&str]) {
    let s = kernel.sample(fields, &point());
    let trial = trial_function();

    for test in &test_functions() {
        let numeric = boundary_fd(kernel, fields, kernel.variable(), test, &trial);
        assert_close(kernel.jacobian(&s, test, &trial), numeric, kernel.name());

        for field in kernel.coupled_fields() {
            let analytic = kernel.off_diag_jacobian(&s, field, test, &trial);
            if suppressed.contains(&field) {
                assert_eq!(analytic, 0.0, "{field} must not be linearized");
                continue;
            }
            let numeric = boundary_fd(kernel, fields, field, test, &trial);
            assert_close(analytic, numeric, &format!("{} wrt {field}", kernel.name()));
        }
    }
}

fn coupled_flux_limiter(mode: BoundaryFlux, scheme: DgScheme) -> BoundaryFluxLimiter {
    BoundaryFluxLimiter::new(
        "c",
        mode,
        PenaltyConfig::new(scheme, 5.0),
        FieldVelocity::new("vx".into(), 0.2.into(), 0.0.into()),
        AxisFieldDiffusion::new("dx".into(), "dy".into(), 0.5.into()),
        FieldInput::new("cin"),
    )
    .with_porosity(Coefficient::field("eps"))
}

#[test]
fn test_flux_limiter_inflow_and_outflow() {
    for scheme in [DgScheme::Sipg, DgScheme::Iipg, DgScheme::Nipg] {
        for mode in [BoundaryFlux::Advective, BoundaryFlux::Diffusive, BoundaryFlux::FluxLimited] {
            let kernel = coupled_flux_limiter(mode, scheme);
            // v·n = vx·0.48 + 0.12
            let inflow = boundary_fields(-1.5);
            let outflow = boundary_fields(1.5);
            check_boundary(&kernel, &inflow, &[]);
            check_boundary(&kernel, &outflow, &[]);
        }
    }
}

#[test]
fn test_flux_limiter_scalar_diffusivity() {
    let kernel = BoundaryFluxLimiter::diffusive(
        "c",
        PenaltyConfig::new(DgScheme::Sipg, 10.0),
        ScalarFieldDiffusion::new("k".into()),
        ConstantInput::new(0.1),
    );
    check_boundary(&kernel, &boundary_fields(0.0), &[]);
}

#[test]
fn test_ppm_inlet_linearized_in_ppm_only() {
    let kernel = BoundaryFluxLimiter::flux_limited(
        "c",
        PenaltyConfig::default(),
        ConstantVelocity::new(Vec3::new(-2.0, 0.0, 0.0)),
        ConstantDiffusion::new(&DiffusionConfig::isotropic(0.3)),
        PpmInput::new(FieldInput::new("ppm"), "P".into(), "T".into()),
    );
    let fields = boundary_fields(0.0);
    check_boundary(&kernel, &fields, &["P", "T"]);

    // Pressure does change the residual; the suppression is deliberate
    let test = test_functions()[0];
    assert!(boundary_fd(&kernel, &fields, "P", &test, &trial_function()).abs() > 1e-8);
}

#[test]
fn test_wall_heat_flux() {
    let kernel = WallHeatFlux::new("c", "hw".into(), FieldInput::new("Tw"));
    check_boundary(&kernel, &boundary_fields(0.0), &[]);
}
