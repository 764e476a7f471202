//! Gas-phase unit conversion.
//!
//! Inlet concentrations are often specified in ppm (mole fraction × 10⁶).
//! The ideal-gas law turns them into molar concentrations:
//!
//! C = P · (ppm / 10⁶) / (R · T)
//!
//! The units of C follow from the units of P and R; with P in kPa and
//! R in J/(mol·K) the result is in mol/L.

use crate::error::{ConfigError, ConfigResult};

/// Universal gas constant in J/(mol·K).
pub const GAS_CONSTANT: f64 = 8.3144621;

/// Parts per million.
const PPM: f64 = 1.0e6;

/// Ideal-gas conversion parameters.
///
/// # Example
///
/// ```
/// use dg_transport::units::GasConversion;
///
/// let gas = GasConversion::default();
/// let c = gas.ppm_to_molar(500.0, 101.35, 298.15);
/// let back = gas.molar_to_ppm(c, 101.35, 298.15);
/// assert!((back - 500.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GasConversion {
    gas_constant: f64,
}

impl Default for GasConversion {
    fn default() -> Self {
        Self {
            gas_constant: GAS_CONSTANT,
        }
    }
}

impl GasConversion {
    /// Use a gas constant in other units.
    ///
    /// # Errors
    /// `NonPositive` unless `gas_constant` is a positive number.
    pub fn with_gas_constant(gas_constant: f64) -> ConfigResult<Self> {
        if !(gas_constant > 0.0) || !gas_constant.is_finite() {
            return Err(ConfigError::NonPositive {
                name: "gas constant",
                value: gas_constant,
            });
        }
        Ok(Self { gas_constant })
    }

    /// Gas constant R.
    #[inline]
    pub fn gas_constant(&self) -> f64 {
        self.gas_constant
    }

    /// Molar concentration from ppm at the given pressure and temperature.
    #[inline]
    pub fn ppm_to_molar(&self, ppm: f64, pressure: f64, temperature: f64) -> f64 {
        pressure * (ppm / PPM) / self.gas_constant / temperature
    }

    /// ppm from a molar concentration at the given pressure and temperature.
    #[inline]
    pub fn molar_to_ppm(&self, concentration: f64, pressure: f64, temperature: f64) -> f64 {
        concentration * self.gas_constant * temperature / pressure * PPM
    }

    /// `∂C/∂ppm` at fixed pressure and temperature.
    #[inline]
    pub fn ppm_sensitivity(&self, pressure: f64, temperature: f64) -> f64 {
        pressure / PPM / self.gas_constant / temperature
    }
}
