//! In-memory field accessor.
//!
//! Stores per-quadrature-point values and gradients on both sides of a face.
//! Hosts with their own storage implement [`FieldAccessor`] directly; this
//! table is used by tests, benchmarks, and small drivers.

use std::collections::HashMap;

use super::FieldAccessor;
use crate::types::{QpIndex, Side, Vec3};

#[derive(Clone, Debug)]
struct FieldSamples {
    owner: Vec<(f64, Vec3)>,
    neighbor: Vec<(f64, Vec3)>,
}

impl FieldSamples {
    fn zeros(n_qp: usize) -> Self {
        Self {
            owner: vec![(0.0, Vec3::zeros()); n_qp],
            neighbor: vec![(0.0, Vec3::zeros()); n_qp],
        }
    }

    fn side(&self, side: Side) -> &[(f64, Vec3)] {
        match side {
            Side::Owner => &self.owner,
            Side::Neighbor => &self.neighbor,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<(f64, Vec3)> {
        match side {
            Side::Owner => &mut self.owner,
            Side::Neighbor => &mut self.neighbor,
        }
    }
}

/// Field values and gradients at the integration points of one face.
///
/// Unknown fields, or quadrature points past the end, read as zero;
/// [`FieldAccessor::provides`] reports which fields are actually stored.
///
/// # Example
///
/// ```
/// use dg_transport::field::{FieldAccessor, FieldTable};
/// use dg_transport::types::{QpIndex, Side, Vec3};
///
/// let mut fields = FieldTable::new(2);
/// fields.set("u", Side::Owner, QpIndex::new(0), 1.0, Vec3::x());
/// fields.set("u", Side::Neighbor, QpIndex::new(0), 0.5, Vec3::zeros());
///
/// assert_eq!(fields.value("u", QpIndex::new(0)), 1.0);
/// assert_eq!(fields.value_on_neighbor("u", QpIndex::new(0)), 0.5);
/// assert!(!fields.provides("porosity"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FieldTable {
    n_qp: usize,
    fields: HashMap<String, FieldSamples>,
}

impl FieldTable {
    /// Create an empty table for a face with `n_qp` integration points.
    pub fn new(n_qp: usize) -> Self {
        Self {
            n_qp,
            fields: HashMap::new(),
        }
    }

    /// Number of integration points.
    pub fn n_qp(&self) -> usize {
        self.n_qp
    }

    /// Add a field that is constant in space on both sides.
    pub fn with_uniform(mut self, name: &str, value: f64) -> Self {
        self.insert_uniform(name, value);
        self
    }

    /// Add a field `value0 + gradient·x` evaluated at the given points,
    /// identical on both sides of the face.
    pub fn with_linear(mut self, name: &str, points: &[Vec3], value0: f64, gradient: Vec3) -> Self {
        self.insert_linear(name, points, value0, gradient);
        self
    }

    /// Insert (or replace) a uniform field.
    pub fn insert_uniform(&mut self, name: &str, value: f64) {
        let sample = (value, Vec3::zeros());
        self.fields.insert(
            name.to_string(),
            FieldSamples {
                owner: vec![sample; self.n_qp],
                neighbor: vec![sample; self.n_qp],
            },
        );
    }

    /// Insert (or replace) a linear field sampled at `points`.
    pub fn insert_linear(&mut self, name: &str, points: &[Vec3], value0: f64, gradient: Vec3) {
        let samples: Vec<(f64, Vec3)> = points
            .iter()
            .take(self.n_qp)
            .map(|x| (value0 + gradient.dot(x), gradient))
            .collect();
        let mut entry = FieldSamples::zeros(self.n_qp);
        entry.owner[..samples.len()].copy_from_slice(&samples);
        entry.neighbor[..samples.len()].copy_from_slice(&samples);
        self.fields.insert(name.to_string(), entry);
    }

    /// Set value and gradient of a field on one side at one point.
    ///
    /// The field is created (zero-filled) if it does not exist yet.
    /// Points outside the face are ignored.
    pub fn set(&mut self, name: &str, side: Side, qp: QpIndex, value: f64, gradient: Vec3) {
        let n_qp = self.n_qp;
        let entry = self
            .fields
            .entry(name.to_string())
            .or_insert_with(|| FieldSamples::zeros(n_qp));
        if let Some(slot) = entry.side_mut(side).get_mut(qp.get()) {
            *slot = (value, gradient);
        }
    }

    /// Add `delta_value`/`delta_gradient` to a field on one side at one point.
    ///
    /// Used to build finite-difference perturbations.
    pub fn perturb(
        &mut self,
        name: &str,
        side: Side,
        qp: QpIndex,
        delta_value: f64,
        delta_gradient: Vec3,
    ) {
        let n_qp = self.n_qp;
        let entry = self
            .fields
            .entry(name.to_string())
            .or_insert_with(|| FieldSamples::zeros(n_qp));
        if let Some(slot) = entry.side_mut(side).get_mut(qp.get()) {
            slot.0 += delta_value;
            slot.1 += delta_gradient;
        }
    }

    fn lookup(&self, field: &str, side: Side, qp: QpIndex) -> (f64, Vec3) {
        self.fields
            .get(field)
            .and_then(|samples| samples.side(side).get(qp.get()).copied())
            .unwrap_or((0.0, Vec3::zeros()))
    }
}

impl FieldAccessor for FieldTable {
    fn value(&self, field: &str, qp: QpIndex) -> f64 {
        self.lookup(field, Side::Owner, qp).0
    }

    fn value_on_neighbor(&self, field: &str, qp: QpIndex) -> f64 {
        self.lookup(field, Side::Neighbor, qp).0
    }

    fn gradient(&self, field: &str, qp: QpIndex) -> Vec3 {
        self.lookup(field, Side::Owner, qp).1
    }

    fn gradient_on_neighbor(&self, field: &str, qp: QpIndex) -> Vec3 {
        self.lookup(field, Side::Neighbor, qp).1
    }

    fn provides(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_field() {
        let points = [Vec3::new(0.0, 0.25, 0.0), Vec3::new(1.0, 0.75, 0.0)];
        let fields = FieldTable::new(2).with_linear("u", &points, 1.0, Vec3::new(2.0, 0.0, 0.0));

        assert_eq!(fields.value("u", QpIndex::new(0)), 1.0);
        assert_eq!(fields.value("u", QpIndex::new(1)), 3.0);
        assert_eq!(fields.value_on_neighbor("u", QpIndex::new(1)), 3.0);
        assert_eq!(fields.gradient("u", QpIndex::new(1)), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_missing_reads_zero() {
        let fields = FieldTable::new(1);
        assert_eq!(fields.value("nothing", QpIndex::ZERO), 0.0);
        assert_eq!(fields.gradient_on_neighbor("nothing", QpIndex::ZERO), Vec3::zeros());
        assert!(!fields.provides("nothing"));
    }

    #[test]
    fn test_perturb_one_side() {
        let mut fields = FieldTable::new(1).with_uniform("u", 2.0);
        fields.perturb("u", Side::Neighbor, QpIndex::ZERO, 0.5, Vec3::y());

        assert_eq!(fields.value("u", QpIndex::ZERO), 2.0);
        assert_eq!(fields.value_on_neighbor("u", QpIndex::ZERO), 2.5);
        assert_eq!(fields.gradient_on_neighbor("u", QpIndex::ZERO), Vec3::y());
    }

    #[test]
    fn test_out_of_range_point_ignored() {
        let mut fields = FieldTable::new(1);
        fields.set("u", Side::Owner, QpIndex::new(5), 1.0, Vec3::zeros());
        assert!(fields.provides("u"));
        assert_eq!(fields.value("u", QpIndex::ZERO), 0.0);
    }
}
