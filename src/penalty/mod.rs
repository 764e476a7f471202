//! Interior-penalty scheme selection.
//!
//! The three interior-penalty Galerkin variants differ only in the sign of
//! the consistency term and in whether a zero penalty is admissible:
//!
//! | Scheme | ε  | σ = 0 allowed |
//! |--------|----|---------------|
//! | SIPG   | -1 | no (floored to 10) |
//! | IIPG   |  0 | no (floored to 10) |
//! | NIPG   | +1 | yes |
//!
//! A negative σ is clamped to zero before the floor rule is applied.
//!
//! # Example
//!
//! ```
//! use dg_transport::penalty::{DgScheme, PenaltyParams};
//!
//! let p = PenaltyParams::resolve(DgScheme::Sipg, 0.0);
//! assert_eq!(p.epsilon(), -1.0);
//! assert_eq!(p.sigma(), 10.0);
//!
//! let p = PenaltyParams::resolve(DgScheme::Nipg, 0.0);
//! assert_eq!(p.epsilon(), 1.0);
//! assert_eq!(p.sigma(), 0.0);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default penalty coefficient exposed to configuration.
pub const DEFAULT_SIGMA: f64 = 10.0;

/// Penalty used by SIPG/IIPG when a zero penalty is requested.
pub const PENALTY_FLOOR: f64 = 10.0;

/// Interior-penalty Galerkin variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DgScheme {
    /// Symmetric interior penalty.
    Sipg,
    /// Incomplete interior penalty.
    Iipg,
    /// Non-symmetric interior penalty.
    #[default]
    Nipg,
}

impl DgScheme {
    /// Consistency sign ε of this scheme.
    #[inline]
    pub const fn epsilon(self) -> f64 {
        match self {
            DgScheme::Sipg => -1.0,
            DgScheme::Iipg => 0.0,
            DgScheme::Nipg => 1.0,
        }
    }

    /// Whether the scheme is stable with σ = 0.
    #[inline]
    pub const fn allows_zero_penalty(self) -> bool {
        matches!(self, DgScheme::Nipg)
    }

    /// Lowercase configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            DgScheme::Sipg => "sipg",
            DgScheme::Iipg => "iipg",
            DgScheme::Nipg => "nipg",
        }
    }
}

impl fmt::Display for DgScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DgScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sipg" => Ok(DgScheme::Sipg),
            "iipg" => Ok(DgScheme::Iipg),
            "nipg" => Ok(DgScheme::Nipg),
            _ => Err(ConfigError::UnknownScheme(s.to_string())),
        }
    }
}

/// User-facing penalty configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PenaltyConfig {
    /// Scheme variant (default NIPG).
    pub scheme: DgScheme,
    /// Requested penalty coefficient σ (default 10).
    pub sigma: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            scheme: DgScheme::default(),
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl PenaltyConfig {
    /// Create a configuration.
    pub fn new(scheme: DgScheme, sigma: f64) -> Self {
        Self { scheme, sigma }
    }

    /// Set the scheme.
    pub fn with_scheme(mut self, scheme: DgScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the requested penalty.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Resolve into the (ε, σ) pair a kernel uses.
    pub fn resolve(&self) -> PenaltyParams {
        PenaltyParams::resolve(self.scheme, self.sigma)
    }
}

/// Resolved consistency sign and penalty coefficient.
///
/// Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PenaltyParams {
    scheme: DgScheme,
    epsilon: f64,
    sigma: f64,
}

impl PenaltyParams {
    /// Apply the scheme rules to a requested σ.
    pub fn resolve(scheme: DgScheme, requested_sigma: f64) -> Self {
        let mut sigma = requested_sigma;
        if sigma < 0.0 {
            log::debug!("{scheme}: negative penalty {requested_sigma} clamped to 0");
            sigma = 0.0;
        }
        if sigma == 0.0 && !scheme.allows_zero_penalty() {
            log::debug!("{scheme}: zero penalty is unstable, using {PENALTY_FLOOR}");
            sigma = PENALTY_FLOOR;
        }
        Self {
            scheme,
            epsilon: scheme.epsilon(),
            sigma,
        }
    }

    /// Scheme these parameters were resolved for.
    #[inline]
    pub fn scheme(&self) -> DgScheme {
        self.scheme
    }

    /// Consistency sign ε.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Penalty coefficient σ.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Penalty scaled by the element-size measure: σ/h.
    #[inline]
    pub fn penalty_over(&self, h: f64) -> f64 {
        self.sigma / h
    }
}

impl Default for PenaltyParams {
    fn default() -> Self {
        PenaltyConfig::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMES: [DgScheme; 3] = [DgScheme::Sipg, DgScheme::Iipg, DgScheme::Nipg];

    #[test]
    fn test_epsilon_per_scheme() {
        assert_eq!(PenaltyParams::resolve(DgScheme::Sipg, 5.0).epsilon(), -1.0);
        assert_eq!(PenaltyParams::resolve(DgScheme::Iipg, 5.0).epsilon(), 0.0);
        assert_eq!(PenaltyParams::resolve(DgScheme::Nipg, 5.0).epsilon(), 1.0);
    }

    #[test]
    fn test_zero_penalty_floor() {
        assert_eq!(PenaltyParams::resolve(DgScheme::Sipg, 0.0).sigma(), PENALTY_FLOOR);
        assert_eq!(PenaltyParams::resolve(DgScheme::Iipg, 0.0).sigma(), PENALTY_FLOOR);
        assert_eq!(PenaltyParams::resolve(DgScheme::Nipg, 0.0).sigma(), 0.0);
    }

    #[test]
    fn test_negative_penalty_clamped_then_floored() {
        assert_eq!(PenaltyParams::resolve(DgScheme::Nipg, -3.0).sigma(), 0.0);
        assert_eq!(PenaltyParams::resolve(DgScheme::Sipg, -3.0).sigma(), PENALTY_FLOOR);
        assert_eq!(PenaltyParams::resolve(DgScheme::Iipg, -0.5).sigma(), PENALTY_FLOOR);
    }

    #[test]
    fn test_positive_penalty_kept() {
        for scheme in SCHEMES {
            assert_eq!(PenaltyParams::resolve(scheme, 2.5).sigma(), 2.5);
        }
    }

    #[test]
    fn test_scheme_rule_over_sigma_grid() {
        for scheme in SCHEMES {
            for requested in [-10.0, -1e-12, 0.0, 1e-9, 1.0, 10.0, 250.0] {
                let p = PenaltyParams::resolve(scheme, requested);
                assert_eq!(p.epsilon(), scheme.epsilon());
                assert!(p.sigma() >= 0.0);
                if requested <= 0.0 && scheme != DgScheme::Nipg {
                    assert!(p.sigma() >= PENALTY_FLOOR);
                }
                if requested > 0.0 {
                    assert_eq!(p.sigma(), requested);
                }
            }
        }
    }

    #[test]
    fn test_parse_scheme() {
        assert_eq!("SIPG".parse::<DgScheme>(), Ok(DgScheme::Sipg));
        assert_eq!(" iipg ".parse::<DgScheme>(), Ok(DgScheme::Iipg));
        assert_eq!("nipg".parse::<DgScheme>(), Ok(DgScheme::Nipg));
        assert!(matches!(
            "upwind".parse::<DgScheme>(),
            Err(ConfigError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_config_defaults() {
        let cfg = PenaltyConfig::default();
        assert_eq!(cfg.scheme, DgScheme::Nipg);
        assert_eq!(cfg.sigma, DEFAULT_SIGMA);
        let p = cfg.with_scheme(DgScheme::Sipg).with_sigma(0.0).resolve();
        assert_eq!(p.sigma(), PENALTY_FLOOR);
    }
}
