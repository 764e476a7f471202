//! Benchmarks for face kernel assembly.
//!
//! Run with: `cargo bench --bench face_kernel_bench`
//!
//! Compares the cost of assembling interior and boundary faces for
//! increasing basis sizes.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dg_transport::assembly::{
    FaceContext, InteriorShapes, ShapeTable, assemble_boundary_face, assemble_interior_face,
};
use dg_transport::boundary::{BoundaryFluxLimiter, FieldInput};
use dg_transport::diffusion::{AxisFieldDiffusion, DiffusionConfig};
use dg_transport::field::{Coefficient, FieldTable, ShapeFn};
use dg_transport::flux::{FieldVelocity, InteriorDiffusion};
use dg_transport::geometry::FaceQuadrature;
use dg_transport::penalty::{DgScheme, PenaltyConfig};
use dg_transport::types::Vec3;

/// Smooth synthetic basis with `n_dofs` functions on `face`.
fn generate_shapes(face: &FaceQuadrature, n_dofs: usize) -> ShapeTable {
    let points = face.points().to_vec();
    ShapeTable::from_fn(n_dofs, face.n_qp(), move |dof, qp| {
        let x = points[qp.get()];
        let k = dof.get() as f64;
        ShapeFn::new((k * x.y).cos(), Vec3::new(0.0, -k * (k * x.y).sin(), 0.0))
    })
}

fn unit_face(n_qp: usize) -> FaceQuadrature {
    FaceQuadrature::segment(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0), 1.0, 2, n_qp)
        .expect("valid face")
}

/// Benchmark interior diffusion assembly for each scheme.
fn bench_interior(c: &mut Criterion) {
    let mut group = c.benchmark_group("interior_diffusion");

    for order in [1usize, 2, 4] {
        let n_dofs = (order + 1) * (order + 2) / 2;
        let face = unit_face(order + 1);
        let shapes = generate_shapes(&face, n_dofs);
        let fields = FieldTable::new(face.n_qp()).with_linear("u", face.points(), 1.0, Vec3::new(0.5, 0.2, 0.0));

        for scheme in [DgScheme::Sipg, DgScheme::Nipg] {
            let kernel = InteriorDiffusion::anisotropic(
                "u",
                PenaltyConfig::new(scheme, 10.0),
                &DiffusionConfig::diagonal(1.0, 0.5, 0.0),
            );
            group.bench_with_input(BenchmarkId::new(scheme.name(), order), &order, |b, _| {
                b.iter(|| {
                    assemble_interior_face(
                        black_box(&kernel),
                        black_box(&fields),
                        &FaceContext::new(&face, 0.0),
                        InteriorShapes::new(&shapes, &shapes),
                    )
                })
            });
        }
    }

    group.finish();
}

/// Benchmark the fully coupled flux-limited boundary kernel.
fn bench_boundary(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary_flux_limited");

    for order in [1usize, 2, 4] {
        let n_dofs = (order + 1) * (order + 2) / 2;
        let face = unit_face(order + 1);
        let shapes = generate_shapes(&face, n_dofs);
        let fields = FieldTable::new(face.n_qp())
            .with_uniform("c", 1.0)
            .with_uniform("vx", -0.5)
            .with_uniform("dx", 0.1)
            .with_uniform("eps", 0.4)
            .with_uniform("c_in", 2.0);

        let kernel = BoundaryFluxLimiter::flux_limited(
            "c",
            PenaltyConfig::default(),
            FieldVelocity::new("vx".into(), 0.0.into(), 0.0.into()),
            AxisFieldDiffusion::new("dx".into(), "dx".into(), 0.0.into()),
            FieldInput::new("c_in"),
        )
        .with_porosity(Coefficient::field("eps"));

        group.bench_with_input(BenchmarkId::from_parameter(order), &order, |b, _| {
            b.iter(|| {
                assemble_boundary_face(
                    black_box(&kernel),
                    black_box(&fields),
                    &FaceContext::new(&face, 0.0),
                    &shapes,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_interior, bench_boundary);
criterion_main!(benches);
