//! Inlet concentrations given in ppm.

use crate::field::{Coefficient, FieldAccessor, unique_fields};
use crate::geometry::FacePoint;
use crate::units::GasConversion;

use super::{InputSample, InputSource};

/// Converts an inner ppm source to molar concentration at the local
/// pressure and temperature.
///
/// The linearization stays local to the ppm value: the sample's sensitivity
/// is `∂C/∂ppm` times the inner source's sensitivity, and pressure and
/// temperature contribute no off-diagonal Jacobian even when coupled.
#[derive(Debug)]
pub struct PpmInput {
    ppm: Box<dyn InputSource>,
    pressure: Coefficient,
    temperature: Coefficient,
    gas: GasConversion,
}

impl PpmInput {
    pub fn new(
        ppm: impl InputSource + 'static,
        pressure: Coefficient,
        temperature: Coefficient,
    ) -> Self {
        Self {
            ppm: Box::new(ppm),
            pressure,
            temperature,
            gas: GasConversion::default(),
        }
    }

    /// Use different conversion parameters.
    pub fn with_gas(mut self, gas: GasConversion) -> Self {
        self.gas = gas;
        self
    }
}

impl InputSource for PpmInput {
    fn sample(&self, fields: &dyn FieldAccessor, point: &FacePoint) -> InputSample {
        let ppm = self.ppm.sample(fields, point);
        let pressure = self.pressure.sample(fields, point.qp);
        let temperature = self.temperature.sample(fields, point.qp);
        InputSample {
            value: self.gas.ppm_to_molar(ppm.value, pressure, temperature),
            sensitivity: ppm.sensitivity * self.gas.ppm_sensitivity(pressure, temperature),
        }
    }

    fn coupled_field(&self) -> Option<&str> {
        self.ppm.coupled_field()
    }

    fn required_fields(&self) -> Vec<&str> {
        let mut names = self.ppm.required_fields();
        names.extend(self.pressure.field_name());
        names.extend(self.temperature.field_name());
        unique_fields(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::input::{ConstantInput, FieldInput};
    use crate::field::FieldTable;
    use crate::types::{QpIndex, Vec3};
    use approx::assert_relative_eq;

    fn point() -> FacePoint {
        FacePoint::new(QpIndex::ZERO, Vec3::zeros(), Vec3::x(), 1.0, 0.0)
    }

    #[test]
    fn test_constant_ppm_conversion() {
        let fields = FieldTable::new(1).with_uniform("P", 101.35).with_uniform("T", 298.15);
        let input = PpmInput::new(ConstantInput::new(400.0), "P".into(), "T".into());
        let s = input.sample(&fields, &point());

        let expected = GasConversion::default().ppm_to_molar(400.0, 101.35, 298.15);
        assert_relative_eq!(s.value, expected, max_relative = 1e-14);
        assert_eq!(s.sensitivity, 0.0);
        assert_eq!(input.coupled_field(), None);
        assert_eq!(input.required_fields(), vec!["P", "T"]);
    }

    #[test]
    fn test_coupled_ppm_sensitivity() {
        let fields = FieldTable::new(1).with_uniform("ppm", 1000.0);
        let input = PpmInput::new(FieldInput::new("ppm"), 200.0.into(), 500.0.into());
        let s = input.sample(&fields, &point());

        assert_relative_eq!(s.sensitivity * 1000.0, s.value, max_relative = 1e-12);
        assert_eq!(input.coupled_field(), Some("ppm"));
    }
}
