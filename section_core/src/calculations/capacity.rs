//! # Capacity Query
//!
//! Moment capacity at a given design axial force, read off an interaction
//! diagram by linear interpolation between the two bracketing points.
//!
//! A force outside `[NRd(first), NRd(last)]` is reported as out of range,
//! never extrapolated. The out-of-range outcomes carry the nearest end of the
//! diagram for context.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::calculations::interaction::{InteractionDiagram, InteractionPoint};
use crate::errors::{CalcError, CalcResult};

/// Result of checking a design axial force against an interaction diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome")]
pub enum CapacityOutcome {
    /// NEd lies inside the diagram; `point` holds the interpolated fields
    Within { point: InteractionPoint },
    /// NEd is below the pure-tension capacity; `bound` is the first diagram point
    BelowRange { ned_kn: f64, bound: InteractionPoint },
    /// NEd exceeds the pure-compression capacity; `bound` is the last diagram point
    AboveRange { ned_kn: f64, bound: InteractionPoint },
}

impl CapacityOutcome {
    /// Moment capacity, if NEd is within the diagram
    pub fn mrd_knm(&self) -> Option<f64> {
        match self {
            CapacityOutcome::Within { point } => Some(point.mrd_knm),
            _ => None,
        }
    }

    pub fn is_within(&self) -> bool {
        matches!(self, CapacityOutcome::Within { .. })
    }

    /// The interpolated point, or the diagram end nearest to NEd
    pub fn point(&self) -> &InteractionPoint {
        match self {
            CapacityOutcome::Within { point } => point,
            CapacityOutcome::BelowRange { bound, .. } | CapacityOutcome::AboveRange { bound, .. } => bound,
        }
    }
}

/// Interpolate every numeric field of the first pair of consecutive points
/// whose NRd values bracket `value`.
///
/// Weight on the first point: `alpha = 1 - (value - v1) / (v2 - v1)`.
/// A value equal to a point's NRd returns that point unchanged.
pub fn interpolate_at(points: &[InteractionPoint], value: f64) -> CalcResult<InteractionPoint> {
    for pair in points.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (v1, v2) = (a.nrd_kn, b.nrd_kn);
        if v1.min(v2) <= value && value <= v1.max(v2) {
            if value == v1 {
                return Ok(*a);
            }
            if value == v2 {
                return Ok(*b);
            }
            let alpha = 1.0 - (value - v1) / (v2 - v1);
            return Ok(a.blend(b, alpha));
        }
    }
    Err(CalcError::BracketNotFound { value })
}

/// Check `ned_kn` against the diagram envelope and interpolate the capacity.
///
/// # Returns
///
/// * `Ok(CapacityOutcome::Within)` - Interpolated point at NEd
/// * `Ok(CapacityOutcome::BelowRange | AboveRange)` - NEd outside the envelope
/// * `Err(CalcError::BracketNotFound)` - No adjacent pair brackets NEd
pub fn query_capacity(diagram: &InteractionDiagram, ned_kn: f64) -> CalcResult<CapacityOutcome> {
    let (first, last) = match (diagram.points.first(), diagram.points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(CalcError::BracketNotFound { value: ned_kn }),
    };

    if ned_kn < first.nrd_kn {
        warn!("NEd={:.1}kN < NRdmin={:.1}kN", ned_kn, first.nrd_kn);
        return Ok(CapacityOutcome::BelowRange { ned_kn, bound: first });
    }
    if ned_kn > last.nrd_kn {
        warn!("NEd={:.1}kN > NRdmax={:.1}kN", ned_kn, last.nrd_kn);
        return Ok(CapacityOutcome::AboveRange { ned_kn, bound: last });
    }

    let point = interpolate_at(&diagram.points, ned_kn)?;
    info!("MRd(NEd={:.1}kN) = {:.1}kNm, x/d={:.3}", ned_kn, point.mrd_knm, point.x_over_d());
    Ok(CapacityOutcome::Within { point })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(nrd: f64, mrd: f64, x: f64) -> InteractionPoint {
        InteractionPoint {
            case: None,
            top_strain: nrd / 1000.0,
            steel_strain: -nrd / 1000.0,
            neutral_axis_m: x,
            concrete_force_kn: nrd.max(0.0),
            concrete_moment_knm: mrd / 2.0,
            steel_force_kn: nrd.min(0.0),
            steel_moment_knm: mrd / 2.0,
            nrd_kn: nrd,
            mrd_knm: mrd,
            height_m: 0.5,
            effective_depth_m: 0.45,
        }
    }

    fn diagram() -> InteractionDiagram {
        InteractionDiagram {
            points: vec![
                point(-400.0, 0.0, 0.5),
                point(-100.0, 80.0, 0.05),
                point(500.0, 200.0, 0.15),
                point(1500.0, 150.0, 0.3),
                point(3000.0, 0.0, 0.5),
            ],
        }
    }

    #[test]
    fn test_interpolation_midpoint() {
        let outcome = query_capacity(&diagram(), 200.0).unwrap();
        let p = match outcome {
            CapacityOutcome::Within { point } => point,
            other => panic!("expected Within, got {:?}", other),
        };
        // halfway between -100 and 500
        assert_relative_eq!(p.nrd_kn, 200.0, epsilon = 1e-9);
        assert_relative_eq!(p.mrd_knm, 140.0, epsilon = 1e-9);
        assert_relative_eq!(p.neutral_axis_m, 0.10, epsilon = 1e-12);
        assert_relative_eq!(p.concrete_moment_knm, 70.0, epsilon = 1e-9);
        assert_eq!(p.case, None);
    }

    #[test]
    fn test_exact_at_bracket_endpoints() {
        let d = diagram();
        for original in &d.points {
            let outcome = query_capacity(&d, original.nrd_kn).unwrap();
            match outcome {
                CapacityOutcome::Within { point } => assert_eq!(&point, original),
                other => panic!("expected Within, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        let d = diagram();
        let below = query_capacity(&d, -500.0).unwrap();
        assert_eq!(below, CapacityOutcome::BelowRange { ned_kn: -500.0, bound: d.points[0] });
        assert_eq!(below.point().nrd_kn, -400.0);

        let above = query_capacity(&d, 3500.0).unwrap();
        assert_eq!(above, CapacityOutcome::AboveRange { ned_kn: 3500.0, bound: d.points[4] });
        assert_eq!(above.point().nrd_kn, 3000.0);
        assert_eq!(above.point().neutral_axis_m, 0.5);
        assert_eq!(above.mrd_knm(), None);
        assert!(!above.is_within());
    }

    #[test]
    fn test_descending_pair_is_bracketed() {
        // NRd decreasing along the pair still brackets
        let points = vec![point(1000.0, 0.0, 0.5), point(200.0, 100.0, 0.1)];
        let p = interpolate_at(&points, 700.0).unwrap();
        // alpha = 1 - (700 - 1000) / (200 - 1000) = 0.625
        assert_relative_eq!(p.mrd_knm, 37.5, epsilon = 1e-9);
        assert_relative_eq!(p.nrd_kn, 700.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_bracket() {
        let points = vec![point(0.0, 0.0, 0.0), point(100.0, 10.0, 0.1)];
        assert_eq!(
            interpolate_at(&points, 150.0),
            Err(CalcError::BracketNotFound { value: 150.0 })
        );
        assert!(matches!(
            interpolate_at(&[], 0.0),
            Err(CalcError::BracketNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_diagram() {
        let empty = InteractionDiagram { points: vec![] };
        assert_eq!(
            query_capacity(&empty, 0.0),
            Err(CalcError::BracketNotFound { value: 0.0 })
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = query_capacity(&diagram(), 4000.0).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"outcome\":\"AboveRange\""));
        let roundtrip: CapacityOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, outcome);
    }
}
