//! Local face assembly.
//!
//! Integrates a kernel over one face into local residual vectors and dense
//! Jacobian blocks. Integration points are visited in order; each point is
//! sampled once and the sample is reused for every test/trial pair.
//!
//! Every contribution is weighted by `JxW × coordinate factor`, so the same
//! kernels serve Cartesian, axisymmetric and spherically symmetric problems.
//!
//! Scattering local blocks into a global system is the host's job.
//!
//! # Parallelism
//!
//! Faces are independent units of work. With the `parallel` feature,
//! [`assemble_interior_faces_parallel`] and
//! [`assemble_boundary_faces_parallel`] distribute a batch of faces over
//! the rayon thread pool.

mod shapes;

pub use shapes::ShapeTable;

use faer::Mat;

use crate::boundary::BoundaryFaceKernel;
use crate::field::FieldAccessor;
use crate::flux::InteriorFaceKernel;
use crate::geometry::{CoordinateSystem, FaceQuadrature};
use crate::types::{DofIndex, JacobianBlock, QpIndex, Side};

// =============================================================================
// Face context
// =============================================================================

/// Geometry and time shared by every point of one face.
#[derive(Clone, Copy, Debug)]
pub struct FaceContext<'a> {
    /// Points, weights, normals and `h` of the face.
    pub quadrature: &'a FaceQuadrature,
    /// Coordinate system for the integration factor.
    pub coordinates: CoordinateSystem,
    /// Current simulation time.
    pub time: f64,
}

impl<'a> FaceContext<'a> {
    /// Cartesian face at `time`.
    pub fn new(quadrature: &'a FaceQuadrature, time: f64) -> Self {
        Self {
            quadrature,
            coordinates: CoordinateSystem::Cartesian,
            time,
        }
    }

    /// Use a different coordinate system.
    pub fn with_coordinates(mut self, coordinates: CoordinateSystem) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Integration weight at `qp`: `JxW × coordinate factor`.
    #[inline]
    pub fn weight(&self, qp: QpIndex) -> f64 {
        self.quadrature.weights()[qp] * self.coordinates.factor(&self.quadrature.points()[qp])
    }

    #[inline]
    fn n_qp(&self) -> usize {
        self.quadrature.n_qp()
    }

    /// A table with fewer columns would alias the next dof's row.
    fn check_shapes(&self, what: &str, shapes: &ShapeTable) {
        assert_eq!(
            shapes.n_qp(),
            self.n_qp(),
            "{what} shape table has {} columns for a face with {} integration points",
            shapes.n_qp(),
            self.n_qp()
        );
    }

    fn check_interior_shapes(&self, shapes: InteriorShapes<'_>) {
        self.check_shapes("owner", shapes.owner);
        self.check_shapes("neighbor", shapes.neighbor);
    }
}

/// Basis tables for both sides of an interior face.
#[derive(Clone, Copy, Debug)]
pub struct InteriorShapes<'a> {
    pub owner: &'a ShapeTable,
    pub neighbor: &'a ShapeTable,
}

impl<'a> InteriorShapes<'a> {
    pub fn new(owner: &'a ShapeTable, neighbor: &'a ShapeTable) -> Self {
        Self { owner, neighbor }
    }

    /// Table for one side.
    #[inline]
    pub fn side(&self, side: Side) -> &'a ShapeTable {
        match side {
            Side::Owner => self.owner,
            Side::Neighbor => self.neighbor,
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Local residuals and Jacobian blocks of one interior face.
#[derive(Clone, Debug)]
pub struct InteriorFaceResult {
    pub residual_owner: Vec<f64>,
    pub residual_neighbor: Vec<f64>,
    /// Blocks in [`JacobianBlock::ALL`] order, rows = test dofs.
    pub jacobian: [Mat<f64>; 4],
}

impl InteriorFaceResult {
    fn zeros(shapes: InteriorShapes<'_>) -> Self {
        let (n_o, n_n) = (shapes.owner.n_dofs(), shapes.neighbor.n_dofs());
        Self {
            residual_owner: vec![0.0; n_o],
            residual_neighbor: vec![0.0; n_n],
            jacobian: block_matrices(shapes, shapes),
        }
    }

    /// Residual of one side's equation.
    pub fn residual(&self, side: Side) -> &[f64] {
        match side {
            Side::Owner => &self.residual_owner,
            Side::Neighbor => &self.residual_neighbor,
        }
    }

    /// One Jacobian block.
    pub fn block(&self, block: JacobianBlock) -> &Mat<f64> {
        &self.jacobian[block.index()]
    }
}

/// Local residual and Jacobian of one boundary face.
#[derive(Clone, Debug)]
pub struct BoundaryFaceResult {
    pub residual: Vec<f64>,
    pub jacobian: Mat<f64>,
}

fn block_matrices(test: InteriorShapes<'_>, trial: InteriorShapes<'_>) -> [Mat<f64>; 4] {
    JacobianBlock::ALL.map(|block| {
        Mat::zeros(
            test.side(block.test_side()).n_dofs(),
            trial.side(block.trial_side()).n_dofs(),
        )
    })
}

// =============================================================================
// Interior faces
// =============================================================================

/// Integrate an interior kernel over one face.
///
/// # Panics
/// If a shape table does not have one column per integration point.
pub fn assemble_interior_face<K: InteriorFaceKernel + ?Sized>(
    kernel: &K,
    fields: &dyn FieldAccessor,
    context: &FaceContext<'_>,
    shapes: InteriorShapes<'_>,
) -> InteriorFaceResult {
    context.check_interior_shapes(shapes);

    let mut result = InteriorFaceResult::zeros(shapes);

    for qp in QpIndex::iter(context.n_qp()) {
        let point = context.quadrature.face_point(qp, context.time);
        let sample = kernel.sample(fields, &point);
        let w = context.weight(qp);

        for i in DofIndex::iter(shapes.owner.n_dofs()) {
            result.residual_owner[i.get()] +=
                w * kernel.residual(&sample, Side::Owner, shapes.owner.get(i, qp));
        }
        for i in DofIndex::iter(shapes.neighbor.n_dofs()) {
            result.residual_neighbor[i.get()] +=
                w * kernel.residual(&sample, Side::Neighbor, shapes.neighbor.get(i, qp));
        }

        for block in JacobianBlock::ALL {
            let test = shapes.side(block.test_side());
            let trial = shapes.side(block.trial_side());
            let m = &mut result.jacobian[block.index()];
            for i in DofIndex::iter(test.n_dofs()) {
                let t = test.get(i, qp);
                for j in DofIndex::iter(trial.n_dofs()) {
                    m[(i.get(), j.get())] += w * kernel.jacobian(&sample, block, t, trial.get(j, qp));
                }
            }
        }
    }

    log::trace!(
        "{}: interior face, {} qp, {}+{} dofs",
        kernel.name(),
        context.n_qp(),
        shapes.owner.n_dofs(),
        shapes.neighbor.n_dofs()
    );
    result
}

/// Integrate the derivative of an interior kernel with respect to a coupled
/// field.
///
/// `test` holds the primary variable's basis, `trial` the coupled field's.
/// Blocks are returned in [`JacobianBlock::ALL`] order.
///
/// # Panics
/// If a shape table does not have one column per integration point.
pub fn assemble_interior_off_diagonal<K: InteriorFaceKernel + ?Sized>(
    kernel: &K,
    fields: &dyn FieldAccessor,
    context: &FaceContext<'_>,
    field: &str,
    test: InteriorShapes<'_>,
    trial: InteriorShapes<'_>,
) -> [Mat<f64>; 4] {
    context.check_interior_shapes(test);
    context.check_interior_shapes(trial);
    let mut blocks = block_matrices(test, trial);

    for qp in QpIndex::iter(context.n_qp()) {
        let point = context.quadrature.face_point(qp, context.time);
        let sample = kernel.sample(fields, &point);
        let w = context.weight(qp);

        for block in JacobianBlock::ALL {
            let test_side = test.side(block.test_side());
            let trial_side = trial.side(block.trial_side());
            let m = &mut blocks[block.index()];
            for i in DofIndex::iter(test_side.n_dofs()) {
                let t = test_side.get(i, qp);
                for j in DofIndex::iter(trial_side.n_dofs()) {
                    m[(i.get(), j.get())] +=
                        w * kernel.off_diag_jacobian(&sample, block, field, t, trial_side.get(j, qp));
                }
            }
        }
    }

    log::trace!("{}: interior off-diagonal wrt '{field}'", kernel.name());
    blocks
}

// =============================================================================
// Boundary faces
// =============================================================================

/// Integrate a boundary kernel over one face.
///
/// # Panics
/// If the shape table does not have one column per integration point.
pub fn assemble_boundary_face<K: BoundaryFaceKernel + ?Sized>(
    kernel: &K,
    fields: &dyn FieldAccessor,
    context: &FaceContext<'_>,
    shapes: &ShapeTable,
) -> BoundaryFaceResult {
    context.check_shapes("boundary", shapes);

    let n = shapes.n_dofs();
    let mut residual = vec![0.0; n];
    let mut jacobian = Mat::zeros(n, n);

    for qp in QpIndex::iter(context.n_qp()) {
        let point = context.quadrature.face_point(qp, context.time);
        let sample = kernel.sample(fields, &point);
        let w = context.weight(qp);

        for i in DofIndex::iter(n) {
            let t = shapes.get(i, qp);
            residual[i.get()] += w * kernel.residual(&sample, t);
            for j in DofIndex::iter(n) {
                jacobian[(i.get(), j.get())] += w * kernel.jacobian(&sample, t, shapes.get(j, qp));
            }
        }
    }

    log::trace!("{}: boundary face, {} qp, {n} dofs", kernel.name(), context.n_qp());
    BoundaryFaceResult { residual, jacobian }
}

/// Integrate the derivative of a boundary kernel with respect to a coupled
/// field.
///
/// # Panics
/// If a shape table does not have one column per integration point.
pub fn assemble_boundary_off_diagonal<K: BoundaryFaceKernel + ?Sized>(
    kernel: &K,
    fields: &dyn FieldAccessor,
    context: &FaceContext<'_>,
    field: &str,
    test: &ShapeTable,
    trial: &ShapeTable,
) -> Mat<f64> {
    context.check_shapes("test", test);
    context.check_shapes("trial", trial);
    let mut block = Mat::zeros(test.n_dofs(), trial.n_dofs());

    for qp in QpIndex::iter(context.n_qp()) {
        let point = context.quadrature.face_point(qp, context.time);
        let sample = kernel.sample(fields, &point);
        let w = context.weight(qp);

        for i in DofIndex::iter(test.n_dofs()) {
            let t = test.get(i, qp);
            for j in DofIndex::iter(trial.n_dofs()) {
                block[(i.get(), j.get())] +=
                    w * kernel.off_diag_jacobian(&sample, field, t, trial.get(j, qp));
            }
        }
    }

    log::trace!("{}: boundary off-diagonal wrt '{field}'", kernel.name());
    block
}

// =============================================================================
// Batches of faces
// =============================================================================

/// One interior face's inputs.
#[derive(Clone, Copy)]
pub struct InteriorFaceJob<'a> {
    pub fields: &'a dyn FieldAccessor,
    pub context: FaceContext<'a>,
    pub shapes: InteriorShapes<'a>,
}

/// One boundary face's inputs.
#[derive(Clone, Copy)]
pub struct BoundaryFaceJob<'a> {
    pub fields: &'a dyn FieldAccessor,
    pub context: FaceContext<'a>,
    pub shapes: &'a ShapeTable,
}

/// Assemble a batch of interior faces in order.
pub fn assemble_interior_faces<K: InteriorFaceKernel + ?Sized>(
    kernel: &K,
    jobs: &[InteriorFaceJob<'_>],
) -> Vec<InteriorFaceResult> {
    jobs.iter()
        .map(|job| assemble_interior_face(kernel, job.fields, &job.context, job.shapes))
        .collect()
}

/// Assemble a batch of boundary faces in order.
pub fn assemble_boundary_faces<K: BoundaryFaceKernel + ?Sized>(
    kernel: &K,
    jobs: &[BoundaryFaceJob<'_>],
) -> Vec<BoundaryFaceResult> {
    jobs.iter()
        .map(|job| assemble_boundary_face(kernel, job.fields, &job.context, job.shapes))
        .collect()
}

/// Parallel version of [`assemble_interior_faces`] using Rayon.
///
/// Results are returned in job order.
#[cfg(feature = "parallel")]
pub fn assemble_interior_faces_parallel<K: InteriorFaceKernel + ?Sized>(
    kernel: &K,
    jobs: &[InteriorFaceJob<'_>],
) -> Vec<InteriorFaceResult> {
    use rayon::prelude::*;

    jobs.par_iter()
        .map(|job| assemble_interior_face(kernel, job.fields, &job.context, job.shapes))
        .collect()
}

/// Parallel version of [`assemble_boundary_faces`] using Rayon.
///
/// A kernel with a [`ScheduledInput`](crate::boundary::ScheduledInput) must
/// only be given jobs at one time level.
#[cfg(feature = "parallel")]
pub fn assemble_boundary_faces_parallel<K: BoundaryFaceKernel + ?Sized>(
    kernel: &K,
    jobs: &[BoundaryFaceJob<'_>],
) -> Vec<BoundaryFaceResult> {
    use rayon::prelude::*;

    jobs.par_iter()
        .map(|job| assemble_boundary_face(kernel, job.fields, &job.context, job.shapes))
        .collect()
}
