//! # Design Tables
//!
//! Tabulated design aids for rectangular sections in simple bending.
//!
//! The reduced moment `μ = M / (b·d²·fcd)` maps to the mechanical
//! reinforcement ratio `ω = As·fyd / (b·d·fcd)`. Values between rows are
//! linearly interpolated; values outside the table are rejected.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// (μ, ω) pairs, parabola-rectangle concrete, normal-strength.
pub const MU_OMEGA_TABLE: [(f64, f64); 37] = [
    (0.01, 0.009),
    (0.02, 0.019),
    (0.03, 0.029),
    (0.04, 0.038),
    (0.05, 0.048),
    (0.06, 0.058),
    (0.07, 0.069),
    (0.08, 0.080),
    (0.09, 0.091),
    (0.10, 0.102),
    (0.11, 0.114),
    (0.12, 0.125),
    (0.13, 0.137),
    (0.14, 0.149),
    (0.15, 0.161),
    (0.16, 0.173),
    (0.17, 0.185),
    (0.18, 0.198),
    (0.19, 0.211),
    (0.20, 0.224),
    (0.21, 0.237),
    (0.22, 0.251),
    (0.23, 0.264),
    (0.24, 0.278),
    (0.25, 0.293),
    (0.26, 0.307),
    (0.27, 0.322),
    (0.28, 0.338),
    (0.29, 0.353),
    (0.30, 0.369),
    (0.31, 0.381),
    (0.32, 0.403),
    (0.33, 0.420),
    (0.34, 0.439),
    (0.35, 0.457),
    (0.36, 0.477),
    (0.37, 0.497),
];

/// Mechanical reinforcement ratio ω for a reduced moment μ.
///
/// # Example
/// ```rust
/// use section_core::equations::design_tables::omega_from_mu;
///
/// let omega = omega_from_mu(0.105).unwrap();
/// assert!((omega - 0.108).abs() < 1e-9);
/// assert!(omega_from_mu(0.5).is_err());
/// ```
pub fn omega_from_mu(mu: f64) -> CalcResult<f64> {
    MU_OMEGA_TABLE
        .windows(2)
        .find(|pair| pair[0].0 <= mu && mu <= pair[1].0)
        .map(|pair| {
            let (mu1, omega1) = pair[0];
            let (mu2, omega2) = pair[1];
            omega1 + (mu - mu1) * (omega2 - omega1) / (mu2 - mu1)
        })
        .ok_or_else(|| {
            CalcError::invalid_input(
                "mu",
                mu.to_string(),
                format!(
                    "Reduced moment must lie between {} and {}",
                    MU_OMEGA_TABLE[0].0,
                    MU_OMEGA_TABLE[MU_OMEGA_TABLE.len() - 1].0
                ),
            )
        })
}

/// Reduced moment μ = M / (b·d²·fcd), with M in kN·m, b and d in m, fcd in MPa.
pub fn reduced_moment(moment_knm: f64, width_m: f64, effective_depth_m: f64, fcd_mpa: f64) -> f64 {
    moment_knm / (width_m * effective_depth_m * effective_depth_m * fcd_mpa * crate::units::MPA_M2_TO_KN)
}

/// Required steel area As = ω·b·d·fcd / fyd (m²).
pub fn required_steel_area_m2(omega: f64, width_m: f64, effective_depth_m: f64, fcd_mpa: f64, fyd_mpa: f64) -> f64 {
    omega * width_m * effective_depth_m * fcd_mpa / fyd_mpa
}

/// Simple-bending design of a rectangular section from the μ → ω table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendingDesign {
    /// Design moment MEd (kN·m)
    pub med_knm: f64,
    /// Reduced moment μ
    pub reduced_moment: f64,
    /// Mechanical reinforcement ratio ω
    pub omega: f64,
    /// Required tension steel As (m²)
    pub required_area_m2: f64,
}

/// Required tension steel for `med_knm` on a `width_m` × `effective_depth_m` section.
///
/// Fails with `InvalidInput` when μ falls outside the table.
pub fn design_rectangular(
    med_knm: f64,
    width_m: f64,
    effective_depth_m: f64,
    fcd_mpa: f64,
    fyd_mpa: f64,
) -> CalcResult<BendingDesign> {
    let mu = reduced_moment(med_knm, width_m, effective_depth_m, fcd_mpa);
    let omega = omega_from_mu(mu)?;
    Ok(BendingDesign {
        med_knm,
        reduced_moment: mu,
        omega,
        required_area_m2: required_steel_area_m2(omega, width_m, effective_depth_m, fcd_mpa, fyd_mpa),
    })
}
