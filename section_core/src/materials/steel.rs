//! Reinforcing Steel Stress-Strain Law (EN 1992-1-1 §3.2.7, inclined top branch)
//!
//! ```text
//!          σs
//!      sud ┤            ┌────────
//!      fyd ┤      ╱─────
//!          │    ╱
//!   ───────┼──╱──────────────────▶ εs
//!        ╱ │  eyd      eud
//!  ─────╱  │
//! ```
//!
//! Symmetric bilinear law with linear hardening, saturated at ±sud beyond ±eud.
//! Tension is negative.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Characteristic steel properties and design factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelParams {
    /// Characteristic yield strength fyk (MPa)
    #[serde(default = "default_fyk")]
    pub fyk_mpa: f64,
    /// Partial safety factor γs
    #[serde(default = "default_gamma_s")]
    pub gamma_s: f64,
    /// Characteristic strain at maximum load εuk
    #[serde(default = "default_euk")]
    pub euk: f64,
    /// Ductility ratio k = (ft/fy)k
    #[serde(default = "default_k")]
    pub k: f64,
    /// Elastic modulus Es (MPa)
    #[serde(default = "default_es")]
    pub es_mpa: f64,
}

fn default_fyk() -> f64 {
    500.0
}

fn default_gamma_s() -> f64 {
    1.15
}

fn default_euk() -> f64 {
    0.05
}

fn default_k() -> f64 {
    1.08
}

fn default_es() -> f64 {
    200e3
}

impl Default for SteelParams {
    fn default() -> Self {
        SteelParams {
            fyk_mpa: default_fyk(),
            gamma_s: default_gamma_s(),
            euk: default_euk(),
            k: default_k(),
            es_mpa: default_es(),
        }
    }
}

impl SteelParams {
    /// Class B steel of yield strength `fyk_mpa`, other values at their defaults.
    pub fn new(fyk_mpa: f64) -> Self {
        SteelParams {
            fyk_mpa,
            ..SteelParams::default()
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("fyk_mpa", self.fyk_mpa),
            ("gamma_s", self.gamma_s),
            ("euk", self.euk),
            ("k", self.k),
            ("es_mpa", self.es_mpa),
        ] {
            CalcError::require_finite(field, value)?;
            if value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        if self.k < 1.0 {
            return Err(CalcError::invalid_input(
                "k",
                self.k.to_string(),
                "Ductility ratio cannot be below 1",
            ));
        }
        let eyd = self.fyk_mpa / (self.gamma_s * self.es_mpa);
        if self.euk * 0.8 <= eyd {
            return Err(CalcError::invalid_input(
                "euk",
                self.euk.to_string(),
                format!("Design ultimate strain must exceed yield strain {:.5}", eyd),
            ));
        }
        Ok(())
    }
}

/// Design law derived from [`SteelParams`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelLaw {
    /// Design yield stress fyd (MPa)
    pub fyd_mpa: f64,
    /// Design stress at eud (MPa)
    pub sud_mpa: f64,
    /// Design yield strain εyd
    pub eyd: f64,
    /// Design ultimate strain εud = 0.8·εuk
    pub eud: f64,
    /// Hardening slope (MPa per unit strain)
    pub dfd_mpa: f64,
    /// Elastic modulus (MPa)
    pub es_mpa: f64,
}

impl SteelLaw {
    pub fn new(params: &SteelParams) -> Self {
        let fyd = params.fyk_mpa / params.gamma_s;
        let ftd = params.fyk_mpa * params.k / params.gamma_s;
        let eyd = params.fyk_mpa / (params.gamma_s * params.es_mpa);
        let eud = params.euk * 0.8;
        let dfd = (ftd - fyd) / (params.euk - eyd);
        SteelLaw {
            fyd_mpa: fyd,
            sud_mpa: fyd + dfd * (eud - eyd),
            eyd,
            eud,
            dfd_mpa: dfd,
            es_mpa: params.es_mpa,
        }
    }

    /// Design stress (MPa) for strain `epsilon` (tension negative).
    pub fn stress(&self, epsilon: f64) -> f64 {
        if epsilon < -self.eud {
            -self.sud_mpa
        } else if epsilon < -self.eyd {
            -self.fyd_mpa + (epsilon + self.eyd) * self.dfd_mpa
        } else if epsilon < self.eyd {
            epsilon * self.es_mpa
        } else if epsilon <= self.eud {
            self.fyd_mpa + (epsilon - self.eyd) * self.dfd_mpa
        } else {
            self.sud_mpa
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn b500() -> SteelLaw {
        SteelLaw::new(&SteelParams::default())
    }

    #[test]
    fn test_derived_values() {
        let law = b500();
        assert_relative_eq!(law.fyd_mpa, 434.7826, epsilon = 1e-3);
        assert_relative_eq!(law.eyd, 0.0021739, epsilon = 1e-6);
        assert_relative_eq!(law.eud, 0.04, epsilon = 1e-15);
        // ftd - fyd = 0.08 * fyd spread over euk - eyd
        assert_relative_eq!(law.dfd_mpa, 0.08 * law.fyd_mpa / (0.05 - law.eyd), epsilon = 1e-9);
        assert!(law.sud_mpa > law.fyd_mpa);
        assert!(law.sud_mpa < 1.08 * law.fyd_mpa);
    }

    #[test]
    fn test_elastic_branch() {
        let law = b500();
        assert_relative_eq!(law.stress(0.001), 200.0, epsilon = 1e-9);
        assert_relative_eq!(law.stress(-0.001), -200.0, epsilon = 1e-9);
        assert_eq!(law.stress(0.0), 0.0);
    }

    #[test]
    fn test_continuity_at_yield() {
        let law = b500();
        let below = law.stress(law.eyd - 1e-12);
        let above = law.stress(law.eyd);
        assert_relative_eq!(below, above, epsilon = 1e-6);
        assert_relative_eq!(law.stress(-law.eyd), -law.fyd_mpa, epsilon = 1e-9);
    }

    #[test]
    fn test_saturation_and_symmetry() {
        let law = b500();
        assert_relative_eq!(law.stress(law.eud), law.sud_mpa, epsilon = 1e-9);
        assert_eq!(law.stress(0.1), law.sud_mpa);
        assert_eq!(law.stress(-0.1), -law.sud_mpa);
        for eps in [0.0005, 0.003, 0.02, 0.039] {
            assert_relative_eq!(law.stress(-eps), -law.stress(eps), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(SteelParams::default().validate().is_ok());
        assert!(SteelParams::new(-500.0).validate().is_err());
        let mut params = SteelParams::default();
        params.euk = 0.002;
        assert!(params.validate().is_err());
        let mut params = SteelParams::default();
        params.k = 0.9;
        assert!(params.validate().is_err());
    }
}
