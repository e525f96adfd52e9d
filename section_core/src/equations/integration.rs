//! # Numerical Integration
//!
//! Composite midpoint rule over a depth interval:
//!
//! ```text
//!   steps = ⌈(to - from) / target_step⌉
//!   Δ     = (to - from) / steps
//!   ∫ f  ≈ Σ f(from + (i - ½)·Δ)·Δ,   i = 1..steps
//! ```
//!
//! The actual step never exceeds the target step, and the rule is exact for
//! integrands that are constant or linear on each sub-interval.
//!
//! Also provides the transformed-section integrals used by the elastic solver.

use crate::section::SectionGeometry;

/// Integrate `f` over `[from, to]` with a step no larger than `target_step`.
///
/// A zero-length interval returns 0. A reversed interval returns the negated
/// integral over `[to, from]`.
///
/// # Example
/// ```rust
/// use section_core::equations::integration::integrate;
///
/// // ∫₀¹ 2y dy = 1
/// let value = integrate(|y| 2.0 * y, 0.0, 1.0, 0.01);
/// assert!((value - 1.0).abs() < 1e-12);
/// ```
pub fn integrate<F>(f: F, from: f64, to: f64, target_step: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let span = to - from;
    if span == 0.0 {
        return 0.0;
    }
    if span < 0.0 {
        return -integrate(f, to, from, target_step);
    }

    let steps = if target_step > 0.0 {
        ((span / target_step).ceil() as usize).max(1)
    } else {
        1
    };
    let dx = span / steps as f64;

    (1..=steps)
        .map(|i| f(from + (i as f64 - 0.5) * dx) * dx)
        .sum()
}

/// Transformed (homogenized) section properties for a compressed depth `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedProperties {
    /// Transformed area At (m²)
    pub area_m2: f64,
    /// Centroid depth yGt (m)
    pub centroid_m: f64,
    /// Second moment about the centroid It (m⁴)
    pub inertia_m4: f64,
}

/// Properties of the section made of concrete over `[0, x]` plus all steel
/// scaled by the modular ratio `m`.
///
/// ```text
///   At   = m·ΣAs        + ∫₀ˣ b
///   Aty  = m·ΣAs·ys     + ∫₀ˣ b·y
///   Atyy = m·ΣAs·ys²    + ∫₀ˣ b·y²
///   yGt  = Aty / At
///   It   = Atyy - Aty² / At
/// ```
pub fn transformed_properties(section: &SectionGeometry, modular_ratio: f64, x: f64, step: f64) -> TransformedProperties {
    let ac = integrate(|y| section.width_at(y), 0.0, x, step);
    let acy = integrate(|y| section.width_at(y) * y, 0.0, x, step);
    let acyy = integrate(|y| section.width_at(y) * y * y, 0.0, x, step);

    let (as_, asy, asyy) = section
        .reinforcements
        .iter()
        .fold((0.0, 0.0, 0.0), |(a, ay, ayy), r| {
            (
                a + r.area_m2,
                ay + r.area_m2 * r.depth_m,
                ayy + r.area_m2 * r.depth_m * r.depth_m,
            )
        });

    let at = modular_ratio * as_ + ac;
    let aty = modular_ratio * asy + acy;
    let atyy = modular_ratio * asyy + acyy;

    TransformedProperties {
        area_m2: at,
        centroid_m: aty / at,
        inertia_m4: atyy - aty * aty / at,
    }
}
