//! Basis function samples on a face.

use crate::error::{ConfigError, ConfigResult};
use crate::field::ShapeFn;
use crate::types::{DofIndex, QpIndex};

/// Values and gradients of every basis function of one element at every
/// integration point of one face, stored dof-major.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeTable {
    n_dofs: usize,
    n_qp: usize,
    data: Vec<ShapeFn>,
}

impl ShapeTable {
    /// Build from rows indexed `[dof][qp]`.
    ///
    /// # Errors
    /// `LengthMismatch` if the rows do not all have the same length.
    pub fn new(rows: Vec<Vec<ShapeFn>>) -> ConfigResult<Self> {
        let n_dofs = rows.len();
        let n_qp = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != n_qp) {
            return Err(ConfigError::length_mismatch("shape table row", n_qp, bad.len()));
        }
        Ok(Self {
            n_dofs,
            n_qp,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Build by evaluating `f` at every (dof, qp).
    pub fn from_fn(n_dofs: usize, n_qp: usize, f: impl Fn(DofIndex, QpIndex) -> ShapeFn) -> Self {
        let data = DofIndex::iter(n_dofs)
            .flat_map(|dof| QpIndex::iter(n_qp).map(move |qp| (dof, qp)))
            .map(|(dof, qp)| f(dof, qp))
            .collect();
        Self { n_dofs, n_qp, data }
    }

    #[inline]
    pub fn n_dofs(&self) -> usize {
        self.n_dofs
    }

    #[inline]
    pub fn n_qp(&self) -> usize {
        self.n_qp
    }

    /// Sample of basis function `dof` at `qp`.
    #[inline]
    pub fn get(&self, dof: DofIndex, qp: QpIndex) -> &ShapeFn {
        &self.data[dof.get() * self.n_qp + qp.get()]
    }
}
