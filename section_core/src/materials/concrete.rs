//! Concrete Stress-Strain Law (EN 1992-1-1 §3.1.7, parabola-rectangle)
//!
//! ```text
//!   σc
//!   fcd ┤        ┌───────────────────
//!       │      ╱
//!       │    ╱    fcd·(1 - (1 - ε/εc2)^n)
//!       │  ╱
//!     0 ┼─┴──────┬─────────┬─────────▶ εc
//!       0       εc2      εcu2
//! ```
//!
//! Compression is positive. Concrete carries no tension. The plateau is kept
//! beyond εcu2; crushing is enforced by the strain domain, not by the law.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Characteristic concrete strength and design factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteParams {
    /// Characteristic cylinder strength fck (MPa)
    pub fck_mpa: f64,
    /// Long-term / loading coefficient αcc
    #[serde(default = "default_alpha_cc")]
    pub alpha_cc: f64,
    /// Partial safety factor γc
    #[serde(default = "default_gamma_c")]
    pub gamma_c: f64,
}

fn default_alpha_cc() -> f64 {
    0.85
}

fn default_gamma_c() -> f64 {
    1.5
}

impl ConcreteParams {
    /// Concrete of strength `fck_mpa` with the usual αcc = 0.85, γc = 1.5.
    pub fn new(fck_mpa: f64) -> Self {
        ConcreteParams {
            fck_mpa,
            alpha_cc: default_alpha_cc(),
            gamma_c: default_gamma_c(),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        CalcError::require_finite("fck_mpa", self.fck_mpa)?;
        if self.fck_mpa <= 0.0 || self.fck_mpa > 90.0 {
            return Err(CalcError::invalid_input(
                "fck_mpa",
                self.fck_mpa.to_string(),
                "Concrete strength must be between 0 and 90 MPa",
            ));
        }
        if self.alpha_cc <= 0.0 || self.alpha_cc > 1.0 {
            return Err(CalcError::invalid_input(
                "alpha_cc",
                self.alpha_cc.to_string(),
                "alpha_cc must be in (0, 1]",
            ));
        }
        if self.gamma_c <= 0.0 {
            return Err(CalcError::invalid_input(
                "gamma_c",
                self.gamma_c.to_string(),
                "Partial factor must be positive",
            ));
        }
        Ok(())
    }
}

/// Design parabola-rectangle law derived from [`ConcreteParams`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteLaw {
    /// Strain at reaching the plateau εc2
    pub ec2: f64,
    /// Ultimate strain εcu2
    pub ecu2: f64,
    /// Parabola exponent n
    pub n: f64,
    /// Design strength fcd (MPa)
    pub fcd_mpa: f64,
}

impl ConcreteLaw {
    pub fn new(params: &ConcreteParams) -> Self {
        let fck = params.fck_mpa;
        let (ec2, ecu2, n) = if fck <= 50.0 {
            (2.0e-3, 3.5e-3, 2.0)
        } else {
            let reduction = ((90.0 - fck) / 100.0).powi(4);
            (
                (2.0 + 0.085 * (fck - 50.0).powf(0.53)) / 1000.0,
                (2.6 + 35.0 * reduction) / 1000.0,
                1.4 + 23.4 * reduction,
            )
        };
        ConcreteLaw {
            ec2,
            ecu2,
            n,
            fcd_mpa: params.alpha_cc * fck / params.gamma_c,
        }
    }

    /// Design stress (MPa) for strain `epsilon` (compression positive).
    pub fn stress(&self, epsilon: f64) -> f64 {
        if epsilon <= 0.0 {
            0.0
        } else if epsilon <= self.ec2 {
            (1.0 - (1.0 - epsilon / self.ec2).powf(self.n)) * self.fcd_mpa
        } else {
            self.fcd_mpa
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_strength_constants() {
        let law = ConcreteLaw::new(&ConcreteParams::new(30.0));
        assert_eq!(law.ec2, 0.002);
        assert_eq!(law.ecu2, 0.0035);
        assert_eq!(law.n, 2.0);
        assert_relative_eq!(law.fcd_mpa, 17.0, epsilon = 1e-12);
    }

    #[test]
    fn test_high_strength_constants() {
        // C70/85: εc2 = 2.42‰, εcu2 = 2.66‰, n = 1.44
        let law = ConcreteLaw::new(&ConcreteParams::new(70.0));
        assert_relative_eq!(law.ec2 * 1000.0, 2.0 + 0.085 * 20f64.powf(0.53), epsilon = 1e-12);
        assert_relative_eq!(law.ec2 * 1000.0, 2.42, epsilon = 0.01);
        assert_relative_eq!(law.ecu2 * 1000.0, 2.656, epsilon = 1e-3);
        assert_relative_eq!(law.n, 1.43744, epsilon = 1e-4);
    }

    #[test]
    fn test_stress_branches() {
        let law = ConcreteLaw::new(&ConcreteParams::new(30.0));
        assert_eq!(law.stress(-0.001), 0.0);
        assert_eq!(law.stress(0.0), 0.0);
        // Half of εc2 with n = 2: 1 - 0.25 = 0.75
        assert_relative_eq!(law.stress(0.001), 0.75 * 17.0, epsilon = 1e-12);
        assert_relative_eq!(law.stress(0.002), 17.0, epsilon = 1e-12);
        assert_relative_eq!(law.stress(0.003), 17.0, epsilon = 1e-12);
        // plateau past εcu2
        assert_relative_eq!(law.stress(0.01), 17.0, epsilon = 1e-12);
    }

    #[test]
    fn test_params_validation() {
        assert!(ConcreteParams::new(30.0).validate().is_ok());
        assert!(ConcreteParams::new(0.0).validate().is_err());
        assert!(ConcreteParams::new(120.0).validate().is_err());
        let mut params = ConcreteParams::new(30.0);
        params.gamma_c = 0.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_params_defaults_from_json() {
        let params: ConcreteParams = serde_json::from_str(r#"{ "fck_mpa": 35.0 }"#).unwrap();
        assert_eq!(params, ConcreteParams::new(35.0));
    }
}
