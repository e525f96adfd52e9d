//! # SLS Elastic Stresses (Cracked Section)
//!
//! Finds the neutral-axis depth of a cracked, linear-elastic section under an
//! axial force N and a moment M, by fixed-point iteration on x:
//!
//! ```text
//!   At, yGt, It  = transformed properties of concrete over [0, x] + m·As
//!   MGt          = N·(yGt - y0) + M                 moment about the centroid
//!   x_new        = clamp(yGt + N·It / (MGt·At), 0, h)
//! ```
//!
//! starting from x = h, until `|x_new - x| / h ≤ precision`.
//!
//! Stress at depth y is `N/At + MGt/It·(yGt - y)` (kN/m², compression
//! positive); steel stress is that value times the modular ratio.
//!
//! ## Solver States
//!
//! ```text
//!   Iterating ──(|Δx|/h ≤ precision, iterations < max)──▶ Converged
//!       │ ╲
//!       │  ╲──(iterations reach max)──────────────────▶ NotConverged
//!       │
//!       └──(MGt ≤ 0)──────────────────────────────────▶ Invalid
//! ```
//!
//! ## Example
//!
//! ```rust
//! use section_core::calculations::elastic::{solve, ElasticInput, ElasticOutcome};
//! use section_core::section::{Reinforcement, SectionGeometry, SectionShape};
//!
//! let input = ElasticInput::new(
//!     "Beam B-1",
//!     SectionGeometry::new(
//!         SectionShape::Rectangular { width_m: 0.3, height_m: 0.5 },
//!         vec![Reinforcement::bars(5, 16.0, 0.45), Reinforcement::bars(4, 12.0, 0.05)],
//!     ),
//!     6.06,
//!     90.0,
//!     130.0,
//! );
//!
//! match solve(&input).unwrap() {
//!     ElasticOutcome::Converged(solution) => {
//!         assert!(solution.state.neutral_axis_m > 0.0 && solution.state.neutral_axis_m < 0.5);
//!         assert!(solution.concrete_stress_kpa > 0.0);
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::equations::integration::transformed_properties;
use crate::errors::{CalcError, CalcResult};
use crate::section::SectionGeometry;
use crate::units::{KiloPascals, MegaPascals};

/// Default relative convergence tolerance on x / h
pub const DEFAULT_PRECISION: f64 = 1e-4;

/// Default iteration ceiling
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Input parameters for a service-load elastic stress check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1 SLS",
///   "section": { "shape": { "shape": "Rectangular", "width_m": 0.3, "height_m": 0.5 },
///                "reinforcements": [ { "depth_m": 0.45, "area_m2": 0.001005 } ] },
///   "modular_ratio": 6.06,
///   "axial_force_kn": 90.0,
///   "moment_knm": 130.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticInput {
    /// User label for this check
    pub label: String,

    /// Concrete outline and reinforcement
    pub section: SectionGeometry,

    /// Modular ratio m = Es / Ec
    pub modular_ratio: f64,

    /// Axial force N (kN, compression positive)
    pub axial_force_kn: f64,

    /// Moment M about the reference axis (kN·m, positive compresses the top fiber)
    pub moment_knm: f64,

    /// Depth of the moment reference axis (m); defaults to h/2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_depth_m: Option<f64>,

    /// Iteration ceiling; defaults to 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,

    /// Convergence tolerance on |Δx| / h; defaults to 1e-4
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,

    /// Starting neutral-axis depth (m); defaults to h
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_depth_m: Option<f64>,
}

impl ElasticInput {
    pub fn new(
        label: impl Into<String>,
        section: SectionGeometry,
        modular_ratio: f64,
        axial_force_kn: f64,
        moment_knm: f64,
    ) -> Self {
        ElasticInput {
            label: label.into(),
            section,
            modular_ratio,
            axial_force_kn,
            moment_knm,
            reference_depth_m: None,
            max_iterations: None,
            precision: None,
            initial_depth_m: None,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.section.validate()?;
        CalcError::require_finite("modular_ratio", self.modular_ratio)?;
        CalcError::require_finite("axial_force_kn", self.axial_force_kn)?;
        CalcError::require_finite("moment_knm", self.moment_knm)?;

        if self.modular_ratio <= 0.0 {
            return Err(CalcError::invalid_input(
                "modular_ratio",
                self.modular_ratio.to_string(),
                "Modular ratio must be positive",
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(CalcError::invalid_input(
                "max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        if let Some(precision) = self.precision {
            if !(precision > 0.0) || !precision.is_finite() {
                return Err(CalcError::invalid_input(
                    "precision",
                    precision.to_string(),
                    "Precision must be a positive number",
                ));
            }
        }

        let h = self.section.height_m();
        for (field, value) in [
            ("reference_depth_m", self.reference_depth_m),
            ("initial_depth_m", self.initial_depth_m),
        ] {
            if let Some(y) = value {
                CalcError::require_finite(field, y)?;
                if y < 0.0 || y > h {
                    return Err(CalcError::invalid_input(
                        field,
                        y.to_string(),
                        format!("Depth must lie within the section (0 to {} m)", h),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Moment reference depth y0 (m)
    pub fn reference_depth_m(&self) -> f64 {
        self.reference_depth_m
            .unwrap_or_else(|| self.section.height_m() / 2.0)
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    pub fn precision(&self) -> f64 {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }
}

/// Snapshot of the iteration after the last completed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElasticState {
    /// Neutral-axis depth x (m)
    pub neutral_axis_m: f64,
    /// Transformed area At (m²)
    pub transformed_area_m2: f64,
    /// Centroid depth yGt (m)
    pub centroid_m: f64,
    /// Transformed second moment It (m⁴)
    pub transformed_inertia_m4: f64,
    /// Moment about the transformed centroid MGt (kN·m)
    pub resultant_moment_knm: f64,
    /// Completed iterations
    pub iterations: u32,
}

impl ElasticState {
    /// Elastic stress at depth `y` (kN/m², compression positive).
    pub fn stress_at(&self, axial_force_kn: f64, y: f64) -> f64 {
        axial_force_kn / self.transformed_area_m2
            + self.resultant_moment_knm / self.transformed_inertia_m4 * (self.centroid_m - y)
    }
}

/// Stress in one reinforcement layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelStress {
    /// Bar depth (m)
    pub depth_m: f64,
    /// Stress m·σ(y) (kN/m², tension negative)
    pub stress_kpa: f64,
}

/// Converged stresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticSolution {
    pub state: ElasticState,
    /// Extreme (top) fiber concrete stress N/At + MGt/It·yGt (kN/m²)
    pub concrete_stress_kpa: f64,
    /// Per-layer steel stress, in reinforcement order
    pub steel_stresses: Vec<SteelStress>,
}

impl ElasticSolution {
    pub fn concrete_stress_mpa(&self) -> f64 {
        MegaPascals::from(KiloPascals(self.concrete_stress_kpa)).0
    }

    /// Largest tensile steel stress as a positive value in MPa (0 if all bars are compressed)
    pub fn max_steel_tension_mpa(&self) -> f64 {
        let kpa = self
            .steel_stresses
            .iter()
            .map(|s| -s.stress_kpa)
            .fold(0.0, f64::max);
        MegaPascals::from(KiloPascals(kpa)).0
    }
}

/// Terminal state of the elastic iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "result")]
pub enum ElasticOutcome {
    /// Neutral axis found within the precision
    Converged(ElasticSolution),
    /// Iteration ceiling reached; holds the last state
    NotConverged(ElasticState),
    /// MGt < 0: the neutral-axis update has no physical solution
    Invalid(ElasticState),
}

impl ElasticOutcome {
    pub fn state(&self) -> &ElasticState {
        match self {
            ElasticOutcome::Converged(solution) => &solution.state,
            ElasticOutcome::NotConverged(state) | ElasticOutcome::Invalid(state) => state,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, ElasticOutcome::Converged(_))
    }
}

/// Run the elastic solver with the section's own integration step.
///
/// # Returns
///
/// * `Ok(ElasticOutcome)` - Converged, NotConverged or Invalid
/// * `Err(CalcError)` - If inputs are invalid
pub fn solve(input: &ElasticInput) -> CalcResult<ElasticOutcome> {
    solve_with_step(input, input.section.integration_step_m())
}

/// [`solve`] with an explicit integration step (m).
pub fn solve_with_step(input: &ElasticInput, step: f64) -> CalcResult<ElasticOutcome> {
    input.validate()?;
    input.section.validate_step(step)?;

    let section = &input.section;
    let n = input.axial_force_kn;
    let m = input.moment_knm;
    let y0 = input.reference_depth_m();
    let h = section.height_m();
    let max_iterations = input.max_iterations();
    let precision = input.precision();

    debug!("{}: N = {} kN, M = {} kNm, y0 = {} m", input.label, n, m, y0);

    let mut state = ElasticState {
        neutral_axis_m: input.initial_depth_m.unwrap_or(h),
        transformed_area_m2: 0.0,
        centroid_m: 0.0,
        transformed_inertia_m4: 0.0,
        resultant_moment_knm: 0.0,
        iterations: 0,
    };

    loop {
        let previous = state.neutral_axis_m;
        let props = transformed_properties(section, input.modular_ratio, previous, step);
        let mgt = n * (props.centroid_m - y0) + m;

        state.iterations += 1;
        state.transformed_area_m2 = props.area_m2;
        state.centroid_m = props.centroid_m;
        state.transformed_inertia_m4 = props.inertia_m4;
        state.resultant_moment_knm = mgt;

        if mgt <= 0.0 {
            warn!("{}: MGt = {:.3} kNm <= 0 at iteration {}", input.label, mgt, state.iterations);
            return Ok(ElasticOutcome::Invalid(state));
        }

        state.neutral_axis_m = (props.centroid_m + n * props.inertia_m4 / (mgt * props.area_m2)).clamp(0.0, h);

        debug!(
            "[{}] x = {:6.4} yGt = {:6.4} At = {:8.5} It = {:8.5e} MGt = {:8.5}",
            state.iterations,
            state.neutral_axis_m,
            state.centroid_m,
            state.transformed_area_m2,
            state.transformed_inertia_m4,
            state.resultant_moment_knm
        );

        let converged = (state.neutral_axis_m - previous).abs() / h <= precision;
        if converged && state.iterations < max_iterations {
            break;
        }
        if state.iterations >= max_iterations {
            warn!("{}: no convergence after {} iterations", input.label, state.iterations);
            return Ok(ElasticOutcome::NotConverged(state));
        }
    }

    let concrete_stress_kpa = state.stress_at(n, 0.0);
    let steel_stresses = section
        .reinforcements
        .iter()
        .map(|r| SteelStress {
            depth_m: r.depth_m,
            stress_kpa: input.modular_ratio * state.stress_at(n, r.depth_m),
        })
        .collect();

    info!(
        "{}: converged in {} iterations, x = {:.4} m, concrete stress = {:.1} kN/m²",
        input.label, state.iterations, state.neutral_axis_m, concrete_stress_kpa
    );

    Ok(ElasticOutcome::Converged(ElasticSolution {
        state,
        concrete_stress_kpa,
        steel_stresses,
    }))
}
