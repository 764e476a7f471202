//! Prescribed inlet values for boundary kernels.
//!
//! An [`InputSource`] turns the current integration point into an
//! [`InputSample`]: the inlet value `u_input` and its derivative with respect
//! to the one coupled field (if any) the source is linearized against.
//!
//! | Source | `u_input` | Coupled field |
//! |--------|-----------|---------------|
//! | [`ConstantInput`] | fixed | none |
//! | [`FieldInput`] | value of a field | that field |
//! | [`ScheduledInput`] | stepwise/ramped in time | none |
//! | [`PpmInput`] | ideal-gas conversion of an inner ppm source | the inner source's |

mod ppm;
mod schedule;

pub use ppm::PpmInput;
pub use schedule::{InputSchedule, ScheduleConfig, ScheduledInput};

use std::fmt::Debug;

use crate::field::FieldAccessor;
use crate::geometry::FacePoint;

/// Inlet value at one integration point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    /// `u_input`
    pub value: f64,
    /// `∂u_input/∂(coupled field)`, zero for uncoupled sources.
    pub sensitivity: f64,
}

impl InputSample {
    /// Value with no coupling.
    #[inline]
    pub fn fixed(value: f64) -> Self {
        Self {
            value,
            sensitivity: 0.0,
        }
    }
}

/// Where a boundary kernel's inlet value comes from.
pub trait InputSource: Send + Sync + Debug {
    /// Inlet value at an integration point.
    fn sample(&self, fields: &dyn FieldAccessor, point: &FacePoint) -> InputSample;

    /// Field the inlet value is linearized against.
    fn coupled_field(&self) -> Option<&str>;

    /// Every field the source reads.
    fn required_fields(&self) -> Vec<&str> {
        self.coupled_field().into_iter().collect()
    }
}

/// Inlet value fixed at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConstantInput {
    value: f64,
}

impl ConstantInput {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl InputSource for ConstantInput {
    #[inline]
    fn sample(&self, _fields: &dyn FieldAccessor, _point: &FacePoint) -> InputSample {
        InputSample::fixed(self.value)
    }

    fn coupled_field(&self) -> Option<&str> {
        None
    }
}

/// Inlet value read from a coupled field on the boundary element.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldInput {
    field: String,
}

impl FieldInput {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl InputSource for FieldInput {
    #[inline]
    fn sample(&self, fields: &dyn FieldAccessor, point: &FacePoint) -> InputSample {
        InputSample {
            value: fields.value(&self.field, point.qp),
            sensitivity: 1.0,
        }
    }

    fn coupled_field(&self) -> Option<&str> {
        Some(&self.field)
    }
}
