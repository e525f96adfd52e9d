//! # Cross-Section Geometry
//!
//! A reinforced-concrete section is described along its depth axis `y`,
//! measured downward from the top (most compressed) fiber:
//!
//! ```text
//!   y = 0  ┌─────────────┐  top fiber
//!          │             │
//!          │  b(y)       │
//!          │             │
//!          │  ●  ●  ●    │  reinforcement at depth y_s, area A_s
//!   y = h  └─────────────┘  bottom fiber
//! ```
//!
//! The concrete outline is a width function `b(y)` supplied by a
//! [`SectionShape`]; reinforcement is a list of lumped bars at given depths.
//!
//! ## Example
//!
//! ```rust
//! use section_core::section::{Reinforcement, SectionGeometry, SectionShape};
//!
//! // 300 x 500 rectangle with 5 Ø16 bottom bars
//! let section = SectionGeometry::new(
//!     SectionShape::Rectangular { width_m: 0.3, height_m: 0.5 },
//!     vec![Reinforcement::bars(5, 16.0, 0.45)],
//! );
//! assert!(section.validate().is_ok());
//! assert!((section.height_m() - 0.5).abs() < 1e-12);
//! assert!((section.effective_depth_m() - 0.45).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::bar_area_m2;

/// Default number of integration steps over the section height
pub const DEFAULT_INTEGRATION_DIVISIONS: u32 = 1000;

/// Upper bound on integration sub-intervals over the section height
pub const MAX_INTEGRATION_DIVISIONS: f64 = 1.0e6;

/// A lumped reinforcement layer (one bar or a group at the same depth).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reinforcement {
    /// Depth below the top fiber (m)
    pub depth_m: f64,
    /// Steel area (m²)
    pub area_m2: f64,
}

impl Reinforcement {
    /// Create a layer from an explicit area.
    pub fn new(depth_m: f64, area_m2: f64) -> Self {
        Reinforcement { depth_m, area_m2 }
    }

    /// Create a layer of `count` round bars of diameter `diameter_mm`.
    ///
    /// Area = count · φ² · π / 4 · 1e-6 (mm² → m²).
    pub fn bars(count: u32, diameter_mm: f64, depth_m: f64) -> Self {
        Reinforcement {
            depth_m,
            area_m2: f64::from(count) * bar_area_m2(diameter_mm),
        }
    }
}

/// One band of a stepped outline: width `width_m` down to `until_depth_m` (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthSegment {
    pub until_depth_m: f64,
    pub width_m: f64,
}

/// Concrete outline, evaluated as width at a given depth.
///
/// ## JSON Serialization
///
/// ```json
/// { "shape": "Rectangular", "width_m": 0.3, "height_m": 0.5 }
/// { "shape": "Circular", "radius_m": 0.25 }
/// { "shape": "Stepped", "segments": [
///     { "until_depth_m": 0.12, "width_m": 1.2 },
///     { "until_depth_m": 0.6,  "width_m": 0.2 },
///     { "until_depth_m": 0.75, "width_m": 0.4 } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum SectionShape {
    /// Constant width
    Rectangular { width_m: f64, height_m: f64 },
    /// Solid circle; height is the diameter
    Circular { radius_m: f64 },
    /// Piecewise-constant width (T, inverted T, I sections); segments ordered top to bottom
    Stepped { segments: Vec<WidthSegment> },
}

impl SectionShape {
    /// Flanged T-section: flange `flange_width_m` × `flange_depth_m` over a web.
    pub fn tee(flange_width_m: f64, flange_depth_m: f64, web_width_m: f64, height_m: f64) -> Self {
        SectionShape::Stepped {
            segments: vec![
                WidthSegment { until_depth_m: flange_depth_m, width_m: flange_width_m },
                WidthSegment { until_depth_m: height_m, width_m: web_width_m },
            ],
        }
    }

    /// Total height h (m)
    pub fn height_m(&self) -> f64 {
        match self {
            SectionShape::Rectangular { height_m, .. } => *height_m,
            SectionShape::Circular { radius_m } => 2.0 * radius_m,
            SectionShape::Stepped { segments } => {
                segments.last().map(|s| s.until_depth_m).unwrap_or(0.0)
            }
        }
    }

    /// Width b(y) at depth `y` (m). Zero outside `[0, h]`.
    pub fn width_at(&self, y: f64) -> f64 {
        if y < 0.0 || y > self.height_m() {
            return 0.0;
        }
        match self {
            SectionShape::Rectangular { width_m, .. } => *width_m,
            SectionShape::Circular { radius_m } => {
                let r = *radius_m;
                2.0 * (r * r - (r - y) * (r - y)).max(0.0).sqrt()
            }
            SectionShape::Stepped { segments } => segments
                .iter()
                .find(|s| y <= s.until_depth_m)
                .map(|s| s.width_m)
                .unwrap_or(0.0),
        }
    }

    /// Gross concrete area in closed form where one exists.
    pub fn gross_area_m2(&self) -> f64 {
        match self {
            SectionShape::Rectangular { width_m, height_m } => width_m * height_m,
            SectionShape::Circular { radius_m } => PI * radius_m * radius_m,
            SectionShape::Stepped { segments } => {
                let mut top = 0.0;
                let mut area = 0.0;
                for s in segments {
                    area += s.width_m * (s.until_depth_m - top);
                    top = s.until_depth_m;
                }
                area
            }
        }
    }

    fn validate(&self) -> CalcResult<()> {
        match self {
            SectionShape::Rectangular { width_m, height_m } => {
                CalcError::require_finite("width_m", *width_m)?;
                CalcError::require_finite("height_m", *height_m)?;
                if *width_m < 0.0 {
                    return Err(CalcError::invalid_input(
                        "width_m",
                        width_m.to_string(),
                        "Width cannot be negative",
                    ));
                }
                if *height_m <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "height_m",
                        height_m.to_string(),
                        "Height must be positive",
                    ));
                }
            }
            SectionShape::Circular { radius_m } => {
                CalcError::require_finite("radius_m", *radius_m)?;
                if *radius_m <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "radius_m",
                        radius_m.to_string(),
                        "Radius must be positive",
                    ));
                }
            }
            SectionShape::Stepped { segments } => {
                if segments.is_empty() {
                    return Err(CalcError::missing_field("segments"));
                }
                let mut top = 0.0;
                for (i, s) in segments.iter().enumerate() {
                    CalcError::require_finite("until_depth_m", s.until_depth_m)?;
                    CalcError::require_finite("width_m", s.width_m)?;
                    if s.until_depth_m <= top {
                        return Err(CalcError::invalid_input(
                            format!("segments[{}].until_depth_m", i),
                            s.until_depth_m.to_string(),
                            "Segment depths must increase from the top fiber",
                        ));
                    }
                    if s.width_m < 0.0 {
                        return Err(CalcError::invalid_input(
                            format!("segments[{}].width_m", i),
                            s.width_m.to_string(),
                            "Width cannot be negative",
                        ));
                    }
                    top = s.until_depth_m;
                }
            }
        }
        Ok(())
    }
}

/// Full section definition: outline, bars and integration resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Concrete outline
    pub shape: SectionShape,

    /// Target integration step (m). Defaults to h / 1000 when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_step_m: Option<f64>,

    /// Reinforcement layers, in reporting order
    pub reinforcements: Vec<Reinforcement>,
}

impl SectionGeometry {
    pub fn new(shape: SectionShape, reinforcements: Vec<Reinforcement>) -> Self {
        SectionGeometry {
            shape,
            integration_step_m: None,
            reinforcements,
        }
    }

    /// Override the integration step.
    pub fn with_integration_step(mut self, step_m: f64) -> Self {
        self.integration_step_m = Some(step_m);
        self
    }

    /// Circular section with `count` bars of `diameter_mm` evenly spaced on a
    /// ring of radius `ring_radius_m`. Bar i sits at depth `r - rs·cos(2πi/n)`.
    pub fn circular_bar_ring(radius_m: f64, ring_radius_m: f64, count: u32, diameter_mm: f64) -> Self {
        let reinforcements = (0..count)
            .map(|i| {
                let angle = f64::from(i) * 2.0 * PI / f64::from(count);
                Reinforcement::bars(1, diameter_mm, radius_m - ring_radius_m * angle.cos())
            })
            .collect();
        SectionGeometry::new(SectionShape::Circular { radius_m }, reinforcements)
    }

    /// Total height h (m)
    pub fn height_m(&self) -> f64 {
        self.shape.height_m()
    }

    /// Width b(y) (m)
    pub fn width_at(&self, y: f64) -> f64 {
        self.shape.width_at(y)
    }

    /// Integration step, explicit or h / 1000.
    pub fn integration_step_m(&self) -> f64 {
        self.integration_step_with(DEFAULT_INTEGRATION_DIVISIONS)
    }

    /// Integration step, explicit or h / `divisions`.
    pub fn integration_step_with(&self, divisions: u32) -> f64 {
        self.integration_step_m
            .unwrap_or_else(|| self.height_m() / f64::from(divisions.max(1)))
    }

    /// Effective depth d: depth of the deepest bar (0 if there are none).
    pub fn effective_depth_m(&self) -> f64 {
        self.reinforcements
            .iter()
            .fold(0.0, |d, r| if r.depth_m > d { r.depth_m } else { d })
    }

    /// Total steel area (m²)
    pub fn steel_area_m2(&self) -> f64 {
        self.reinforcements.iter().map(|r| r.area_m2).sum()
    }

    /// Check an integration step: positive, finite and at most
    /// [`MAX_INTEGRATION_DIVISIONS`] sub-intervals over the height.
    pub fn validate_step(&self, step: f64) -> CalcResult<()> {
        CalcError::require_finite("integration_step_m", step)?;
        if step <= 0.0 {
            return Err(CalcError::invalid_input(
                "integration_step_m",
                step.to_string(),
                "Integration step must be positive",
            ));
        }
        let divisions = self.height_m() / step;
        if divisions > MAX_INTEGRATION_DIVISIONS {
            return Err(CalcError::invalid_input(
                "integration_step_m",
                step.to_string(),
                format!(
                    "Step gives {:.0} divisions over the height, the limit is {:.0}",
                    divisions, MAX_INTEGRATION_DIVISIONS
                ),
            ));
        }
        Ok(())
    }

    /// Validate outline, integration step and reinforcement.
    pub fn validate(&self) -> CalcResult<()> {
        self.shape.validate()?;
        let h = self.height_m();

        if let Some(step) = self.integration_step_m {
            self.validate_step(step)?;
        }

        if self.reinforcements.is_empty() {
            return Err(CalcError::missing_field("reinforcements"));
        }
        for (i, r) in self.reinforcements.iter().enumerate() {
            CalcError::require_finite("depth_m", r.depth_m)?;
            CalcError::require_finite("area_m2", r.area_m2)?;
            if r.depth_m < 0.0 || r.depth_m > h {
                return Err(CalcError::invalid_input(
                    format!("reinforcements[{}].depth_m", i),
                    r.depth_m.to_string(),
                    format!("Bar depth must lie within the section (0 to {} m)", h),
                ));
            }
            if r.area_m2 <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("reinforcements[{}].area_m2", i),
                    r.area_m2.to_string(),
                    "Bar area must be positive",
                ));
            }
        }
        if self.effective_depth_m() <= 0.0 {
            return Err(CalcError::invalid_input(
                "reinforcements",
                "0",
                "At least one bar must lie below the top fiber",
            ));
        }
        Ok(())
    }
}
