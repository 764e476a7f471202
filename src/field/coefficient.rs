//! Constant-or-coupled scalar coefficients.

use std::fmt;

use super::FieldAccessor;
use crate::types::QpIndex;

/// A scalar parameter that is either a fixed number or a coupled field.
///
/// Coupled coefficients are always read on the owning element of a face.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coefficient {
    /// Fixed value.
    Constant(f64),
    /// Value of the named field at the integration point.
    Field(String),
}

impl Coefficient {
    /// Fixed coefficient.
    pub fn constant(value: f64) -> Self {
        Coefficient::Constant(value)
    }

    /// Coefficient read from a coupled field.
    pub fn field(name: impl Into<String>) -> Self {
        Coefficient::Field(name.into())
    }

    /// Sample the coefficient at a quadrature point.
    #[inline]
    pub fn sample(&self, fields: &dyn FieldAccessor, qp: QpIndex) -> f64 {
        match self {
            Coefficient::Constant(value) => *value,
            Coefficient::Field(name) => fields.value(name, qp),
        }
    }

    /// Name of the coupled field, if any.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Coefficient::Constant(_) => None,
            Coefficient::Field(name) => Some(name.as_str()),
        }
    }

    /// Derivative of the sampled value with respect to `field`'s value.
    #[inline]
    pub fn derivative(&self, field: &str) -> f64 {
        match self.field_name() {
            Some(name) if name == field => 1.0,
            _ => 0.0,
        }
    }
}

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Coefficient::Constant(value)
    }
}

impl From<&str> for Coefficient {
    fn from(name: &str) -> Self {
        Coefficient::Field(name.to_string())
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coefficient::Constant(value) => write!(f, "{value}"),
            Coefficient::Field(name) => write!(f, "field({name})"),
        }
    }
}
