//! Access to field values at face integration points.
//!
//! The host framework owns every solution and auxiliary field. Kernels only
//! see them through [`FieldAccessor`], which returns the value or gradient of
//! a named scalar field at a quadrature point, on the owning element or on
//! the neighbor element of the face.
//!
//! # Coefficients
//!
//! Most kernel parameters (porosity, velocity components, diffusivities,
//! heat-transfer coefficients, pressure, temperature) may be either a fixed
//! number or a coupled field. [`Coefficient`] captures that choice once, so
//! kernels sample it without caring which it is.
//!
//! # Example
//!
//! ```
//! use dg_transport::field::{Coefficient, FieldAccessor, FieldTable};
//! use dg_transport::types::QpIndex;
//!
//! let fields = FieldTable::new(2).with_uniform("porosity", 0.4);
//! let eps = Coefficient::field("porosity");
//! assert_eq!(eps.sample(&fields, QpIndex::new(1)), 0.4);
//! assert_eq!(Coefficient::constant(1.0).sample(&fields, QpIndex::ZERO), 1.0);
//! ```

mod coefficient;
mod shape;
mod table;

pub use coefficient::Coefficient;
pub use shape::ShapeFn;
pub use table::FieldTable;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{QpIndex, Side, Vec3};

/// Read-only view of field values at the integration points of one face.
///
/// Implementations must be safe to share between face-evaluation tasks.
pub trait FieldAccessor: Sync {
    /// Value of `field` on the owning element at `qp`.
    fn value(&self, field: &str, qp: QpIndex) -> f64;

    /// Value of `field` on the neighbor element at `qp`.
    fn value_on_neighbor(&self, field: &str, qp: QpIndex) -> f64;

    /// Gradient of `field` on the owning element at `qp`.
    fn gradient(&self, field: &str, qp: QpIndex) -> Vec3;

    /// Gradient of `field` on the neighbor element at `qp`.
    fn gradient_on_neighbor(&self, field: &str, qp: QpIndex) -> Vec3;

    /// Whether this accessor knows `field` at all.
    fn provides(&self, _field: &str) -> bool {
        true
    }

    /// Value on the requested side.
    #[inline]
    fn value_on(&self, side: Side, field: &str, qp: QpIndex) -> f64 {
        match side {
            Side::Owner => self.value(field, qp),
            Side::Neighbor => self.value_on_neighbor(field, qp),
        }
    }

    /// Gradient on the requested side.
    #[inline]
    fn gradient_on(&self, side: Side, field: &str, qp: QpIndex) -> Vec3 {
        match side {
            Side::Owner => self.gradient(field, qp),
            Side::Neighbor => self.gradient_on_neighbor(field, qp),
        }
    }
}

/// Check that every named field is provided before any evaluation runs.
///
/// # Errors
/// `MissingField` for the first name the accessor does not know.
pub fn check_fields<'a, I>(fields: &dyn FieldAccessor, names: I) -> ConfigResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    for name in names {
        if !fields.provides(name) {
            return Err(ConfigError::MissingField(name.to_string()));
        }
    }
    Ok(())
}

/// Field names with repeats removed, in first-seen order.
///
/// A field playing several roles is listed once; its off-diagonal
/// contribution is already summed over every role.
pub fn unique_fields<'a, I>(names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut unique: Vec<&'a str> = Vec::new();
    for name in names {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}
