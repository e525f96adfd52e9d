//! # Unit System
//!
//! section_core works in one consistent SI system:
//!
//! - Length: meters (m)
//! - Area: square meters (m²)
//! - Force: kilonewtons (kN)
//! - Moment: kilonewton-meters (kN·m)
//! - Material strengths and moduli: megapascals (MPa = N/mm²)
//! - Elastic (service) stresses: kilopascals (kPa = kN/m²), because they come
//!   straight out of kN and m² quantities
//!
//! Two scale factors sit at the unit boundary and must be applied exactly:
//!
//! - Bar areas are quoted from diameters in millimeters, so `φ²·π/4` (mm²)
//!   is scaled by `1e-6` to m² (or by `1e-2` to cm² for reinforcement tables).
//! - A stress in MPa acting on an area in m² gives MN; multiplying by
//!   [`MPA_M2_TO_KN`] (1000) yields kN.
//!
//! ## Example
//!
//! ```rust
//! use section_core::units::{bar_area_m2, KiloPascals, MegaPascals, Millimeters, Meters};
//!
//! let area = bar_area_m2(16.0);
//! assert!((area - 2.0106e-4).abs() < 1e-7);
//!
//! let cover: Meters = Millimeters(50.0).into();
//! assert!((cover.0 - 0.05).abs() < 1e-12);
//!
//! let stress: MegaPascals = KiloPascals(12_500.0).into();
//! assert!((stress.0 - 12.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// MPa × m² → kN
pub const MPA_M2_TO_KN: f64 = 1000.0;

/// mm² → m²
pub const MM2_TO_M2: f64 = 1e-6;

/// mm² → cm²
pub const MM2_TO_CM2: f64 = 1e-2;

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

/// Stress in kilopascals (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloPascals(pub f64);

impl From<KiloPascals> for MegaPascals {
    fn from(kpa: KiloPascals) -> Self {
        MegaPascals(kpa.0 / 1000.0)
    }
}

impl From<MegaPascals> for KiloPascals {
    fn from(mpa: MegaPascals) -> Self {
        KiloPascals(mpa.0 * 1000.0)
    }
}

// ============================================================================
// Reinforcement Areas
// ============================================================================

/// Area of one round bar of diameter `diameter_mm`, in mm².
#[inline]
pub fn bar_area_mm2(diameter_mm: f64) -> f64 {
    diameter_mm * diameter_mm * PI / 4.0
}

/// Area of one round bar of diameter `diameter_mm`, in m².
#[inline]
pub fn bar_area_m2(diameter_mm: f64) -> f64 {
    bar_area_mm2(diameter_mm) * MM2_TO_M2
}

/// Area of one round bar of diameter `diameter_mm`, in cm².
#[inline]
pub fn bar_area_cm2(diameter_mm: f64) -> f64 {
    bar_area_mm2(diameter_mm) * MM2_TO_CM2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_conversion() {
        let m: Meters = Millimeters(450.0).into();
        assert_relative_eq!(m.0, 0.45, epsilon = 1e-12);
        let mm: Millimeters = Meters(0.2).into();
        assert_relative_eq!(mm.0, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stress_conversion() {
        let mpa: MegaPascals = KiloPascals(8_000.0).into();
        assert_relative_eq!(mpa.0, 8.0, epsilon = 1e-12);
        let kpa: KiloPascals = MegaPascals(17.0).into();
        assert_relative_eq!(kpa.0, 17_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bar_areas() {
        // 16 mm bar: 201.06 mm²
        assert_relative_eq!(bar_area_mm2(16.0), 201.0619, epsilon = 1e-3);
        assert_relative_eq!(bar_area_m2(16.0), 201.0619e-6, epsilon = 1e-9);
        assert_relative_eq!(bar_area_cm2(16.0), 2.010619, epsilon = 1e-5);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Meters(0.5)).unwrap();
        assert_eq!(json, "0.5");
    }
}
