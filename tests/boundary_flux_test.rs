//! Boundary flux kernel behaviour across the inflow/outflow switch, and
//! assembled inlet conditions on a unit-square face.

use dg_transport::assembly::{FaceContext, ShapeTable, assemble_boundary_face, assemble_boundary_off_diagonal};
use dg_transport::boundary::{
    BoundaryFaceKernel, BoundaryFlux, BoundaryFluxLimiter, ConstantInput, FieldInput, FluxDirection,
};
use dg_transport::diffusion::{ConstantDiffusion, DiffusionConfig};
use dg_transport::field::{FieldTable, ShapeFn, check_fields};
use dg_transport::flux::{ConstantVelocity, FieldVelocity};
use dg_transport::geometry::{CoordinateSystem, FacePoint, FaceQuadrature};
use dg_transport::penalty::{DgScheme, PenaltyConfig};
use dg_transport::types::{QpIndex, Side, Vec3};
use dg_transport::ConfigError;

const TOL: f64 = 1e-12;

fn point(normal: Vec3) -> FacePoint {
    FacePoint::new(QpIndex::ZERO, Vec3::zeros(), normal, 1.0, 0.0)
}

fn state(u: f64) -> FieldTable {
    let mut fields = FieldTable::new(1);
    fields.set("c", Side::Owner, QpIndex::ZERO, u, Vec3::new(0.4, 0.1, 0.0));
    fields
}

#[test]
fn test_branch_continuity_at_zero_normal_velocity() {
    // D = 0 and σ = 0 (NIPG): only advective terms remain
    let test = ShapeFn::new(0.8, Vec3::new(1.0, -1.0, 0.0));
    let fields = state(2.5);

    for mode in [BoundaryFlux::Advective, BoundaryFlux::FluxLimited] {
        let mut previous_gap = f64::INFINITY;
        for delta in [1e-1, 1e-3, 1e-6, 1e-9] {
            let kernel = |vx: f64| {
                BoundaryFluxLimiter::new(
                    "c",
                    mode,
                    PenaltyConfig::new(DgScheme::Nipg, 0.0),
                    ConstantVelocity::new(Vec3::new(vx, 0.0, 0.0)),
                    ConstantDiffusion::zero(),
                    ConstantInput::new(1.0),
                )
            };
            let inflow = kernel(-delta);
            let outflow = kernel(delta);
            let s_in = inflow.sample(&fields, &point(Vec3::x()));
            let s_out = outflow.sample(&fields, &point(Vec3::x()));
            assert_eq!(s_in.direction(), FluxDirection::Inflow);
            assert_eq!(s_out.direction(), FluxDirection::Outflow);

            let gap = (inflow.residual(&s_in, &test) - outflow.residual(&s_out, &test)).abs();
            assert!(gap <= 10.0 * delta, "{mode} δ={delta}: gap {gap}");
            assert!(gap < previous_gap);
            previous_gap = gap;
        }
    }
}

#[test]
fn test_zero_normal_velocity_is_inflow() {
    let kernel = BoundaryFluxLimiter::flux_limited(
        "c",
        PenaltyConfig::new(DgScheme::Sipg, 10.0),
        ConstantVelocity::new(Vec3::new(0.0, 1.0, 0.0)),
        ConstantDiffusion::new(&DiffusionConfig::isotropic(1.0)),
        ConstantInput::new(1.0),
    );
    let s = kernel.sample(&state(3.0), &point(Vec3::x()));
    assert_eq!(s.direction(), FluxDirection::Inflow);

    // Penalty and natural-flux terms are active: σ/h·m − D∇u·n with m = 2
    let t = ShapeFn::constant(1.0);
    assert!((kernel.residual(&s, &t) - (10.0 * 2.0 - 0.4)).abs() < TOL);
}

#[test]
fn test_inlet_on_unit_square_face() {
    // Left edge of [0,1]², traversed top to bottom: outward normal −x
    let face = FaceQuadrature::segment(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 0.0), 1.0, 1, 3).unwrap();
    assert!((face.normals()[0] - Vec3::new(-1.0, 0.0, 0.0)).norm() < TOL);

    let kernel = BoundaryFluxLimiter::flux_limited(
        "c",
        PenaltyConfig::new(DgScheme::Nipg, 4.0),
        ConstantVelocity::new(Vec3::new(2.0, 0.0, 0.0)),
        ConstantDiffusion::new(&DiffusionConfig::isotropic(0.1)),
        FieldInput::new("c_in"),
    );
    let fields = FieldTable::new(face.n_qp())
        .with_uniform("c", 1.0)
        .with_uniform("c_in", 1.0);
    assert!(check_fields(&fields, kernel.required_fields()).is_ok());

    let shapes = ShapeTable::from_fn(1, face.n_qp(), |_, _| ShapeFn::constant(1.0));
    let context = FaceContext::new(&face, 0.0);
    let result = assemble_boundary_face(&kernel, &fields, &context, &shapes);

    // Matching inlet: only the inflow −|v|·c_in over the unit face remains
    assert!((result.residual[0] + 2.0).abs() < 1e-10);
    // d/dc: (−vn + σ/h)·|face| = (2 + 4)
    assert!((result.jacobian[(0, 0)] - 6.0).abs() < 1e-10);

    // d/dc_in: (2vn − σ/h)·|face| = (−4 − 4)
    let off = assemble_boundary_off_diagonal(&kernel, &fields, &context, "c_in", &shapes, &shapes);
    assert!((off[(0, 0)] + 8.0).abs() < 1e-10);
    let none = assemble_boundary_off_diagonal(&kernel, &fields, &context, "unrelated", &shapes, &shapes);
    assert_eq!(none[(0, 0)], 0.0);
}

#[test]
fn test_missing_coupled_field_detected_before_evaluation() {
    let kernel = BoundaryFluxLimiter::advective(
        "c",
        FieldVelocity::new("vx".into(), 0.0.into(), 0.0.into()),
        ConstantInput::new(0.0),
    );
    let fields = FieldTable::new(1).with_uniform("c", 1.0);
    assert_eq!(
        check_fields(&fields, kernel.required_fields()),
        Err(ConfigError::MissingField("vx".into()))
    );
}

#[test]
fn test_axisymmetric_outflow() {
    // Face at r = 2, normal +r: outflow weight picks up 2πr
    let face = FaceQuadrature::segment(Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 0.0), 2.0, 1, 2).unwrap();
    let kernel = BoundaryFluxLimiter::advective(
        "c",
        ConstantVelocity::new(Vec3::new(1.0, 0.0, 0.0)),
        ConstantInput::new(0.0),
    );
    let fields = FieldTable::new(face.n_qp()).with_uniform("c", 3.0);
    let shapes = ShapeTable::from_fn(1, face.n_qp(), |_, _| ShapeFn::constant(1.0));
    let context = FaceContext::new(&face, 0.0).with_coordinates(CoordinateSystem::cylindrical(0).unwrap());

    let result = assemble_boundary_face(&kernel, &fields, &context, &shapes);
    let expected = 3.0 * 2.0 * std::f64::consts::PI * 2.0;
    assert!((result.residual[0] - expected).abs() < 1e-10);
}
