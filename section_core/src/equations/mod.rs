//! # Section Analysis Equations
//!
//! Building blocks shared by the ultimate and service analyses.
//!
//! ## Modules
//!
//! - [`integration`] - Composite midpoint integration and transformed-section properties
//! - [`strain`] - Canonical linear strain profiles of the ultimate strain domain
//! - [`design_tables`] - μ → ω design table for rectangular sections
//!
//! ## Sign Conventions
//!
//! - **Depth y**: measured downward from the top fiber, `0 ≤ y ≤ h`
//! - **Strain / stress**: compression positive, tension negative
//! - **Axial force N**: compression positive
//! - **Moment M**: positive when it compresses the top fiber
//!
//! ## References
//!
//! - EN 1992-1-1:2004, §3.1.7 (concrete), §3.2.7 (steel), §6.1 (ULS bending with axial force)

pub mod design_tables;
pub mod integration;
pub mod strain;

pub use design_tables::{design_rectangular, omega_from_mu, reduced_moment, required_steel_area_m2, BendingDesign};
pub use integration::{integrate, transformed_properties, TransformedProperties};
pub use strain::{ultimate_profiles, ProfileCase, StrainProfile};
