//! # Ultimate Strain Profiles
//!
//! Plane sections remain plane, so every strain state is a straight line in
//! depth. The ultimate strain domain is swept by thirteen canonical profiles,
//! from uniform tension at -εud to uniform compression at εc2:
//!
//! ```text
//!   #   top fiber (y=0)   second anchor
//!   1   -εud              uniform
//!   2   0                 -εud at d
//!   2'  εc2               -εud at d
//!   3   εcu2              -εud at d
//!   ..  εcu2              0 at x = {0.15, 0.25, 0.35, 0.45}·d
//!   4   εcu2              -εyd at d
//!   4/5 εcu2              -εyd/2 at d
//!   5   εcu2              0 at d
//!   6   εcu2              0 at h
//!   7   εc2               uniform
//! ```
//!
//! Sign convention: compression positive, tension negative.

use serde::{Deserialize, Serialize};

use crate::materials::LimitStrains;

/// Neutral-axis ratios x/d swept with εcu2 at the top fiber
pub const NEUTRAL_AXIS_RATIOS: [f64; 4] = [0.15, 0.25, 0.35, 0.45];

/// Which boundary or interior point of the strain domain a profile represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "case")]
pub enum ProfileCase {
    /// 1: whole section at -εud
    UniformTension,
    /// 2: zero at the top fiber, -εud at d
    SteelRupture,
    /// 2': εc2 at the top fiber, -εud at d
    SteelRuptureAtEc2,
    /// 3: εcu2 at the top fiber, -εud at d
    SteelRuptureAtEcu2,
    /// εcu2 at the top fiber with a fixed neutral-axis ratio
    ConcreteCrushing { x_over_d: f64 },
    /// 4: εcu2 at the top fiber, -εyd at d
    SteelYield,
    /// 4/5: εcu2 at the top fiber, -εyd/2 at d
    HalfSteelYield,
    /// 5: εcu2 at the top fiber, zero at d
    ZeroSteelStrain,
    /// 6: εcu2 at the top fiber, zero at h
    ZeroBottomStrain,
    /// 7: whole section at εc2
    UniformCompression,
}

/// A linear strain distribution through two (depth, strain) anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainProfile {
    pub case: ProfileCase,
    pub y1: f64,
    pub e1: f64,
    pub y2: f64,
    pub e2: f64,
}

impl StrainProfile {
    /// Profile through (y1, e1) and (y2, e2). The anchors must have distinct depths.
    pub fn through(case: ProfileCase, y1: f64, e1: f64, y2: f64, e2: f64) -> Self {
        StrainProfile { case, y1, e1, y2, e2 }
    }

    /// Constant strain at every depth.
    pub fn uniform(case: ProfileCase, strain: f64) -> Self {
        StrainProfile::through(case, 0.0, strain, 1.0, strain)
    }

    /// Strain at depth `y`.
    pub fn strain_at(&self, y: f64) -> f64 {
        self.e1 + (y - self.y1) * (self.e2 - self.e1) / (self.y2 - self.y1)
    }
}

/// The thirteen canonical ultimate profiles for effective depth `d` and height `h`.
///
/// Ordered from pure tension (index 0) to pure compression (index 12).
pub fn ultimate_profiles(d: f64, h: f64, limits: &LimitStrains) -> Vec<StrainProfile> {
    let LimitStrains { ec2, ecu2, eyd, eud } = *limits;

    let mut profiles = vec![
        StrainProfile::uniform(ProfileCase::UniformTension, -eud),
        StrainProfile::through(ProfileCase::SteelRupture, 0.0, 0.0, d, -eud),
        StrainProfile::through(ProfileCase::SteelRuptureAtEc2, 0.0, ec2, d, -eud),
        StrainProfile::through(ProfileCase::SteelRuptureAtEcu2, 0.0, ecu2, d, -eud),
    ];
    profiles.extend(NEUTRAL_AXIS_RATIOS.iter().map(|&ratio| {
        StrainProfile::through(
            ProfileCase::ConcreteCrushing { x_over_d: ratio },
            0.0,
            ecu2,
            ratio * d,
            0.0,
        )
    }));
    profiles.extend([
        StrainProfile::through(ProfileCase::SteelYield, 0.0, ecu2, d, -eyd),
        StrainProfile::through(ProfileCase::HalfSteelYield, 0.0, ecu2, d, -eyd / 2.0),
        StrainProfile::through(ProfileCase::ZeroSteelStrain, 0.0, ecu2, d, 0.0),
        StrainProfile::through(ProfileCase::ZeroBottomStrain, 0.0, ecu2, h, 0.0),
        StrainProfile::uniform(ProfileCase::UniformCompression, ec2),
    ]);
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn limits() -> LimitStrains {
        LimitStrains {
            ec2: 0.002,
            ecu2: 0.0035,
            eyd: 500.0 / (1.15 * 200e3),
            eud: 0.04,
        }
    }

    #[test]
    fn test_profile_count_and_order() {
        let profiles = ultimate_profiles(0.45, 0.5, &limits());
        assert_eq!(profiles.len(), 13);
        assert_eq!(profiles[0].case, ProfileCase::UniformTension);
        assert_eq!(profiles[12].case, ProfileCase::UniformCompression);
        assert_eq!(profiles[4].case, ProfileCase::ConcreteCrushing { x_over_d: 0.15 });
        assert_eq!(profiles[7].case, ProfileCase::ConcreteCrushing { x_over_d: 0.45 });
    }

    #[test]
    fn test_uniform_profiles_are_constant() {
        let profiles = ultimate_profiles(0.45, 0.5, &limits());
        for y in [0.0, 0.2, 0.45, 0.5] {
            assert_eq!(profiles[0].strain_at(y), -0.04);
            assert_eq!(profiles[12].strain_at(y), 0.002);
        }
    }

    #[test]
    fn test_anchor_values() {
        let l = limits();
        let d = 0.45;
        let h = 0.5;
        let profiles = ultimate_profiles(d, h, &l);
        assert_relative_eq!(profiles[1].strain_at(0.0), 0.0);
        assert_relative_eq!(profiles[1].strain_at(d), -l.eud, epsilon = 1e-15);
        assert_relative_eq!(profiles[3].strain_at(0.0), l.ecu2);
        assert_relative_eq!(profiles[5].strain_at(0.25 * d), 0.0, epsilon = 1e-15);
        assert_relative_eq!(profiles[8].strain_at(d), -l.eyd, epsilon = 1e-15);
        assert_relative_eq!(profiles[9].strain_at(d), -l.eyd / 2.0, epsilon = 1e-15);
        assert_relative_eq!(profiles[10].strain_at(d), 0.0, epsilon = 1e-15);
        assert_relative_eq!(profiles[11].strain_at(h), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_extrapolates_past_anchors() {
        let profile = StrainProfile::through(ProfileCase::ZeroSteelStrain, 0.0, 0.0035, 0.45, 0.0);
        assert_relative_eq!(profile.strain_at(0.9), -0.0035, epsilon = 1e-15);
    }
}
