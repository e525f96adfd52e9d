//! # ULS Interaction Diagram
//!
//! Builds the N-M interaction diagram of a reinforced-concrete section by
//! integrating stresses for each canonical ultimate strain profile.
//!
//! For every profile:
//!
//! ```text
//!   x   = clamp(εc / (εc - εs) · d, 0, h)          neutral-axis depth
//!   Fc  = ∫₀ˣ σc(ε(y)) · b(y) dy                     concrete force
//!   Mc  = ∫₀ˣ σc(ε(y)) · b(y) · (y0 - y) dy          concrete moment about y0
//!   Fs  = Σ As · σs(ε(ys))                           steel force
//!   Ms  = Σ As · σs(ε(ys)) · (y0 - ys)               steel moment about y0
//!   NRd = Fc + Fs,  MRd = Mc + Ms
//! ```
//!
//! Stresses are in MPa and areas in m², so every resultant is scaled by 1000
//! to give kN and kN·m.
//!
//! ## Example
//!
//! ```rust
//! use section_core::calculations::interaction::{calculate, UltimateInput};
//! use section_core::materials::{ConcreteParams, SteelParams};
//! use section_core::section::{Reinforcement, SectionGeometry, SectionShape};
//!
//! let input = UltimateInput {
//!     label: "Beam B-1".to_string(),
//!     section: SectionGeometry::new(
//!         SectionShape::Rectangular { width_m: 0.3, height_m: 0.5 },
//!         vec![Reinforcement::bars(5, 16.0, 0.45)],
//!     ),
//!     concrete: ConcreteParams::new(30.0),
//!     steel: SteelParams::new(500.0),
//!     reference_depth_m: None,
//!     ned_kn: Some(400.0),
//!     med_knm: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.diagram.points.len(), 13);
//! assert!(result.capacity.is_some());
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::calculations::capacity::{query_capacity, CapacityOutcome};
use crate::equations::design_tables::{design_rectangular, BendingDesign};
use crate::equations::integration::integrate;
use crate::equations::strain::{ultimate_profiles, ProfileCase, StrainProfile};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteLaw, ConcreteParams, LimitStrains, SteelLaw, SteelParams};
use crate::section::{SectionGeometry, SectionShape};
use crate::units::MPA_M2_TO_KN;

/// Strain difference below which a profile is treated as uniform
pub const UNIFORM_STRAIN_TOLERANCE: f64 = 1e-6;

/// Neutral-axis depth used for uniform profiles before clamping to h
pub const UNIFORM_NEUTRAL_AXIS_SENTINEL: f64 = 1e10;

/// Input parameters for an ultimate-limit-state section check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Column C-2",
///   "section": {
///     "shape": { "shape": "Circular", "radius_m": 0.25 },
///     "reinforcements": [ { "depth_m": 0.05, "area_m2": 0.000201 } ]
///   },
///   "concrete": { "fck_mpa": 30.0 },
///   "steel": { "fyk_mpa": 500.0 },
///   "ned_kn": 300.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltimateInput {
    /// User label for this section (e.g., "C-1", "Pier cap")
    pub label: String,

    /// Concrete outline and reinforcement
    pub section: SectionGeometry,

    /// Concrete characteristic values
    pub concrete: ConcreteParams,

    /// Steel characteristic values
    #[serde(default)]
    pub steel: SteelParams,

    /// Depth of the moment reference axis (m); defaults to h/2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_depth_m: Option<f64>,

    /// Design axial force to check (kN, compression positive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ned_kn: Option<f64>,

    /// Design moment for the simple-bending μ → ω design aid (kN·m, rectangular sections only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub med_knm: Option<f64>,
}

impl UltimateInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.section.validate()?;
        self.concrete.validate()?;
        self.steel.validate()?;

        let h = self.section.height_m();
        if let Some(y0) = self.reference_depth_m {
            CalcError::require_finite("reference_depth_m", y0)?;
            if y0 < 0.0 || y0 > h {
                return Err(CalcError::invalid_input(
                    "reference_depth_m",
                    y0.to_string(),
                    format!("Reference depth must lie within the section (0 to {} m)", h),
                ));
            }
        }
        if let Some(ned) = self.ned_kn {
            CalcError::require_finite("ned_kn", ned)?;
        }
        if let Some(med) = self.med_knm {
            CalcError::require_finite("med_knm", med)?;
            if !matches!(self.section.shape, SectionShape::Rectangular { .. }) {
                return Err(CalcError::invalid_input(
                    "med_knm",
                    med.to_string(),
                    "The bending design aid applies to rectangular sections only",
                ));
            }
        }
        Ok(())
    }

    /// Moment reference depth y0 (m)
    pub fn reference_depth_m(&self) -> f64 {
        self.reference_depth_m
            .unwrap_or_else(|| self.section.height_m() / 2.0)
    }
}

/// Resultants of one ultimate strain profile.
///
/// Every numeric field is interpolated field-by-field when querying a
/// capacity between two diagram points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionPoint {
    /// Profile this point was built from; `None` for interpolated points
    pub case: Option<ProfileCase>,
    /// Strain at the top fiber εc
    pub top_strain: f64,
    /// Strain at the effective depth εs
    pub steel_strain: f64,
    /// Neutral-axis depth x (m), within [0, h]
    pub neutral_axis_m: f64,
    /// Concrete force Fc (kN)
    pub concrete_force_kn: f64,
    /// Concrete moment Mc about y0 (kN·m)
    pub concrete_moment_knm: f64,
    /// Steel force Fs (kN)
    pub steel_force_kn: f64,
    /// Steel moment Ms about y0 (kN·m)
    pub steel_moment_knm: f64,
    /// Axial capacity NRd = Fc + Fs (kN)
    pub nrd_kn: f64,
    /// Moment capacity MRd = Mc + Ms (kN·m)
    pub mrd_knm: f64,
    /// Section height h (m)
    pub height_m: f64,
    /// Effective depth d (m)
    pub effective_depth_m: f64,
}

impl InteractionPoint {
    /// Neutral-axis ratio x/d
    pub fn x_over_d(&self) -> f64 {
        self.neutral_axis_m / self.effective_depth_m
    }

    /// Weighted blend `alpha·self + (1 - alpha)·other` of every numeric field.
    pub fn blend(&self, other: &InteractionPoint, alpha: f64) -> InteractionPoint {
        let mix = |a: f64, b: f64| alpha * a + (1.0 - alpha) * b;
        InteractionPoint {
            case: None,
            top_strain: mix(self.top_strain, other.top_strain),
            steel_strain: mix(self.steel_strain, other.steel_strain),
            neutral_axis_m: mix(self.neutral_axis_m, other.neutral_axis_m),
            concrete_force_kn: mix(self.concrete_force_kn, other.concrete_force_kn),
            concrete_moment_knm: mix(self.concrete_moment_knm, other.concrete_moment_knm),
            steel_force_kn: mix(self.steel_force_kn, other.steel_force_kn),
            steel_moment_knm: mix(self.steel_moment_knm, other.steel_moment_knm),
            nrd_kn: mix(self.nrd_kn, other.nrd_kn),
            mrd_knm: mix(self.mrd_knm, other.mrd_knm),
            height_m: mix(self.height_m, other.height_m),
            effective_depth_m: mix(self.effective_depth_m, other.effective_depth_m),
        }
    }
}

/// Interaction points in profile order, pure tension first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDiagram {
    pub points: Vec<InteractionPoint>,
}

impl InteractionDiagram {
    /// NRd of the first (pure tension) point
    pub fn nrd_min(&self) -> f64 {
        self.points.first().map(|p| p.nrd_kn).unwrap_or(0.0)
    }

    /// NRd of the last (pure compression) point
    pub fn nrd_max(&self) -> f64 {
        self.points.last().map(|p| p.nrd_kn).unwrap_or(0.0)
    }

    /// (NRd, MRd) pairs for plotting: the diagram followed by its mirror (NRd, -MRd).
    pub fn envelope(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.nrd_kn, p.mrd_knm))
            .chain(self.points.iter().map(|p| (p.nrd_kn, -p.mrd_knm)))
            .collect()
    }
}

/// Results from an ultimate-limit-state check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltimateResult {
    pub concrete_law: ConcreteLaw,
    pub steel_law: SteelLaw,
    /// Moment reference depth used (m)
    pub reference_depth_m: f64,
    pub diagram: InteractionDiagram,
    /// Capacity at `ned_kn`, when one was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<CapacityOutcome>,
    /// Required steel for `med_knm`, when one was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bending_design: Option<BendingDesign>,
}

/// Neutral-axis depth of a profile, clamped to [0, h].
pub fn neutral_axis_depth(top_strain: f64, steel_strain: f64, d: f64, h: f64) -> f64 {
    let x = if (top_strain - steel_strain).abs() < UNIFORM_STRAIN_TOLERANCE {
        UNIFORM_NEUTRAL_AXIS_SENTINEL
    } else {
        top_strain / (top_strain - steel_strain) * d
    };
    x.clamp(0.0, h)
}

/// Resultants of one strain profile.
pub fn evaluate_profile(
    section: &SectionGeometry,
    concrete: &ConcreteLaw,
    steel: &SteelLaw,
    profile: &StrainProfile,
    y0: f64,
    step: f64,
) -> InteractionPoint {
    let h = section.height_m();
    let d = section.effective_depth_m();
    let ec = profile.strain_at(0.0);
    let es = profile.strain_at(d);
    let x = neutral_axis_depth(ec, es, d, h);

    let concrete_stress = |y: f64| concrete.stress(profile.strain_at(y)) * section.width_at(y) * MPA_M2_TO_KN;
    let fc = integrate(&concrete_stress, 0.0, x, step);
    let mc = integrate(|y| concrete_stress(y) * (y0 - y), 0.0, x, step);

    let (fs, ms) = section.reinforcements.iter().fold((0.0, 0.0), |(f, m), r| {
        let force = r.area_m2 * steel.stress(profile.strain_at(r.depth_m)) * MPA_M2_TO_KN;
        (f + force, m + force * (y0 - r.depth_m))
    });

    InteractionPoint {
        case: Some(profile.case),
        top_strain: ec,
        steel_strain: es,
        neutral_axis_m: x,
        concrete_force_kn: fc,
        concrete_moment_knm: mc,
        steel_force_kn: fs,
        steel_moment_knm: ms,
        nrd_kn: fc + fs,
        mrd_knm: mc + ms,
        height_m: h,
        effective_depth_m: d,
    }
}

/// Build the interaction diagram with an explicit integration step.
pub fn build_diagram(input: &UltimateInput, step: f64) -> InteractionDiagram {
    let concrete = ConcreteLaw::new(&input.concrete);
    let steel = SteelLaw::new(&input.steel);
    let limits = LimitStrains::from_laws(&concrete, &steel);
    let h = input.section.height_m();
    let d = input.section.effective_depth_m();
    let y0 = input.reference_depth_m();

    let points = ultimate_profiles(d, h, &limits)
        .iter()
        .map(|profile| {
            let point = evaluate_profile(&input.section, &concrete, &steel, profile, y0, step);
            debug!(
                "{:?}: ec={:.3}% es={:.3}% x/d={:.3} Fc={:.1}kN Fs={:.1}kN NRd={:.1}kN MRd={:.1}kNm",
                profile.case,
                point.top_strain * 100.0,
                point.steel_strain * 100.0,
                point.x_over_d(),
                point.concrete_force_kn,
                point.steel_force_kn,
                point.nrd_kn,
                point.mrd_knm
            );
            point
        })
        .collect();

    InteractionDiagram { points }
}

/// Run the ultimate check: interaction diagram plus optional capacity at NEd.
///
/// # Returns
///
/// * `Ok(UltimateResult)` - Diagram and, when `ned_kn` is set, the capacity outcome
/// * `Err(CalcError)` - If inputs are invalid or the diagram has no bracket for NEd
pub fn calculate(input: &UltimateInput) -> CalcResult<UltimateResult> {
    calculate_with_step(input, input.section.integration_step_m())
}

/// [`calculate`] with an explicit integration step (m).
pub fn calculate_with_step(input: &UltimateInput, step: f64) -> CalcResult<UltimateResult> {
    input.validate()?;
    input.section.validate_step(step)?;

    let diagram = build_diagram(input, step);
    info!(
        "{}: NRd range {:.1} kN to {:.1} kN",
        input.label,
        diagram.nrd_min(),
        diagram.nrd_max()
    );

    let capacity = match input.ned_kn {
        Some(ned) => Some(query_capacity(&diagram, ned)?),
        None => None,
    };

    let concrete_law = ConcreteLaw::new(&input.concrete);
    let steel_law = SteelLaw::new(&input.steel);
    let bending_design = match (input.med_knm, &input.section.shape) {
        (Some(med), SectionShape::Rectangular { width_m, .. }) => Some(design_rectangular(
            med,
            *width_m,
            input.section.effective_depth_m(),
            concrete_law.fcd_mpa,
            steel_law.fyd_mpa,
        )?),
        _ => None,
    };

    Ok(UltimateResult {
        concrete_law,
        steel_law,
        reference_depth_m: input.reference_depth_m(),
        diagram,
        capacity,
        bending_design,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{Reinforcement, WidthSegment};
    use approx::assert_relative_eq;

    fn rectangular_input() -> UltimateInput {
        UltimateInput {
            label: "Rectangle".to_string(),
            section: SectionGeometry::new(
                SectionShape::Rectangular { width_m: 0.3, height_m: 0.5 },
                vec![Reinforcement::bars(5, 16.0, 0.45)],
            ),
            concrete: ConcreteParams::new(30.0),
            steel: SteelParams::new(500.0),
            reference_depth_m: None,
            ned_kn: None,
            med_knm: None,
        }
    }

    fn circular_input() -> UltimateInput {
        UltimateInput {
            label: "Circle".to_string(),
            section: SectionGeometry::circular_bar_ring(0.25, 0.2, 10, 16.0),
            concrete: ConcreteParams::new(30.0),
            steel: SteelParams::new(500.0),
            reference_depth_m: None,
            ned_kn: Some(300.0),
            med_knm: None,
        }
    }

    #[test]
    fn test_neutral_axis_clamped() {
        assert_eq!(neutral_axis_depth(0.002, 0.002, 0.45, 0.5), 0.5);
        assert_eq!(neutral_axis_depth(-0.04, -0.04, 0.45, 0.5), 0.5);
        assert_eq!(neutral_axis_depth(0.0, -0.04, 0.45, 0.5), 0.0);
        // root below the bottom fiber is clamped to h
        assert_eq!(neutral_axis_depth(0.0035, 0.001, 0.45, 0.5), 0.5);
        assert_relative_eq!(neutral_axis_depth(0.0035, -0.0035, 0.45, 0.5), 0.225, epsilon = 1e-12);
    }

    #[test]
    fn test_every_point_within_section() {
        for input in [rectangular_input(), circular_input()] {
            let diagram = build_diagram(&input, input.section.integration_step_m());
            assert_eq!(diagram.points.len(), 13);
            let h = input.section.height_m();
            for p in &diagram.points {
                assert!(p.neutral_axis_m >= 0.0 && p.neutral_axis_m <= h);
                assert!(p.nrd_kn.is_finite() && p.mrd_knm.is_finite());
            }
        }
    }

    #[test]
    fn test_end_points() {
        let input = rectangular_input();
        let diagram = build_diagram(&input, input.section.integration_step_m());
        let first = diagram.points[0];
        let last = diagram.points[12];
        assert_eq!(first.case, Some(ProfileCase::UniformTension));
        assert_eq!(last.case, Some(ProfileCase::UniformCompression));
        assert!(diagram.nrd_min() <= diagram.nrd_max());

        let steel = SteelLaw::new(&input.steel);
        let as_ = input.section.steel_area_m2();
        // Pure tension: no concrete, all steel at -sud
        assert_eq!(first.concrete_force_kn, 0.0);
        assert_relative_eq!(first.nrd_kn, -as_ * steel.sud_mpa * 1000.0, epsilon = 1e-6);
        // Pure compression: fcd over the full section plus steel at εc2
        assert_relative_eq!(
            last.nrd_kn,
            0.15 * 17.0 * 1000.0 + as_ * steel.stress(0.002) * 1000.0,
            epsilon = 1e-6
        );
        // Uniform profiles report x = h, never NaN
        assert_eq!(first.neutral_axis_m, 0.5);
        assert_eq!(last.neutral_axis_m, 0.5);
    }

    #[test]
    fn test_concrete_block_matches_closed_form() {
        // Profile 5 (εcu2 at top, 0 at d): parabola-rectangle block of
        // mean stress 17/21·fcd over x = d
        let input = rectangular_input();
        let diagram = build_diagram(&input, 1e-5);
        let p = diagram
            .points
            .iter()
            .find(|p| p.case == Some(ProfileCase::ZeroSteelStrain))
            .copied()
            .unwrap();
        assert_relative_eq!(p.neutral_axis_m, 0.45, epsilon = 1e-12);
        let expected = 17.0 / 21.0 * 0.45 * 0.3 * 17.0 * 1000.0;
        assert_relative_eq!(p.concrete_force_kn, expected, epsilon = 0.05);
        // no steel strain at d, single layer at d carries nothing
        assert_relative_eq!(p.steel_force_kn, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_symmetric_section_has_symmetric_limits() {
        // Pure compression of a doubly symmetric section gives no moment
        let input = circular_input();
        let diagram = build_diagram(&input, input.section.integration_step_m());
        let last = diagram.points.last().unwrap();
        assert_relative_eq!(last.mrd_knm, 0.0, epsilon = 1e-6);
        let first = diagram.points.first().unwrap();
        assert_relative_eq!(first.mrd_knm, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reference_depth_override() {
        let mut input = rectangular_input();
        let base = build_diagram(&input, 0.001);
        input.reference_depth_m = Some(0.0);
        let shifted = build_diagram(&input, 0.001);
        // M about the top fiber = M about h/2 - N·h/2
        for (a, b) in base.points.iter().zip(&shifted.points) {
            assert_relative_eq!(b.mrd_knm, a.mrd_knm - a.nrd_kn * 0.25, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_circular_query_at_300kn() {
        let input = circular_input();
        let result = calculate(&input).unwrap();
        let nrd_max = result.diagram.nrd_max();
        match result.capacity.unwrap() {
            CapacityOutcome::Within { point } => {
                assert!(300.0 <= nrd_max);
                assert!(point.mrd_knm.is_finite());
                assert!(point.mrd_knm > 0.0);
                assert_relative_eq!(point.nrd_kn, 300.0, epsilon = 1e-6);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_envelope_mirrors_points() {
        let input = rectangular_input();
        let diagram = build_diagram(&input, 0.001);
        let envelope = diagram.envelope();
        assert_eq!(envelope.len(), 26);
        assert_eq!(envelope[3].0, envelope[16].0);
        assert_eq!(envelope[3].1, -envelope[16].1);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut input = rectangular_input();
        input.reference_depth_m = Some(0.8);
        assert!(calculate(&input).is_err());

        let mut input = rectangular_input();
        input.section.reinforcements.clear();
        assert!(calculate(&input).is_err());
    }

    fn tee_input() -> UltimateInput {
        UltimateInput {
            label: "Tee".to_string(),
            section: SectionGeometry::new(
                SectionShape::Stepped {
                    segments: vec![
                        WidthSegment { until_depth_m: 0.12, width_m: 1.2 },
                        WidthSegment { until_depth_m: 0.6, width_m: 0.2 },
                        WidthSegment { until_depth_m: 0.75, width_m: 0.4 },
                    ],
                },
                vec![Reinforcement::new(0.04, 1664e-6), Reinforcement::new(0.68, 5485e-6)],
            ),
            concrete: ConcreteParams::new(30.0),
            steel: SteelParams::new(500.0),
            reference_depth_m: None,
            ned_kn: Some(1200.0),
            med_knm: None,
        }
    }

    #[test]
    fn test_tee_section_query_at_1200kn() {
        let result = calculate(&tee_input()).unwrap();
        let points = &result.diagram.points;
        assert_eq!(points.len(), 13);
        for p in points {
            assert!(p.neutral_axis_m >= 0.0 && p.neutral_axis_m <= 0.75, "x = {}", p.neutral_axis_m);
            assert!(p.nrd_kn.is_finite() && p.mrd_knm.is_finite());
        }
        assert_relative_eq!(result.diagram.nrd_min(), -3304.93, max_relative = 1e-4);
        assert_relative_eq!(result.diagram.nrd_max(), 7959.6, max_relative = 1e-4);

        let point = match result.capacity {
            Some(CapacityOutcome::Within { point }) => point,
            other => panic!("expected Within, got {:?}", other),
        };
        assert_relative_eq!(point.nrd_kn, 1200.0, epsilon = 1e-6);
        // between the x/d = 0.35 and 0.45 crushing points
        assert_relative_eq!(point.mrd_knm, 1821.5, max_relative = 1e-3);
    }

    #[test]
    fn test_bending_design_on_rectangle() {
        let mut input = rectangular_input();
        input.med_knm = Some(150.0);
        let result = calculate(&input).unwrap();
        let design = result.bending_design.unwrap();
        let mu = 150.0 / (0.3 * 0.45 * 0.45 * result.concrete_law.fcd_mpa * 1000.0);
        assert_relative_eq!(design.reduced_moment, mu, epsilon = 1e-12);
        assert_relative_eq!(
            design.omega,
            crate::equations::design_tables::omega_from_mu(mu).unwrap(),
            epsilon = 1e-12
        );

        assert!(calculate(&rectangular_input()).unwrap().bending_design.is_none());
    }

    #[test]
    fn test_bending_design_rejected_off_rectangle() {
        let mut input = tee_input();
        input.med_knm = Some(150.0);
        assert!(matches!(calculate(&input), Err(CalcError::InvalidInput { .. })));

        let mut input = rectangular_input();
        input.med_knm = Some(900.0);
        assert!(matches!(calculate(&input), Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_step_is_validated() {
        assert!(calculate_with_step(&rectangular_input(), 1e-15).is_err());
        assert!(calculate_with_step(&rectangular_input(), f64::INFINITY).is_err());
    }

    #[test]
    fn test_serialization() {
        let input = circular_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: UltimateInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.section, input.section);
        assert_eq!(roundtrip.ned_kn, Some(300.0));
    }
}
