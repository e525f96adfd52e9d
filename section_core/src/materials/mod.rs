//! # Material Laws
//!
//! Design stress-strain relations used by the section analyses.
//!
//! - [`concrete`] - Parabola-rectangle law (compression positive, no tension)
//! - [`steel`] - Bilinear law with hardening (tension negative)
//!
//! Both laws are derived once from characteristic values and are then pure
//! functions of strain.
//!
//! ## Example
//!
//! ```rust
//! use section_core::materials::{ConcreteLaw, ConcreteParams, SteelLaw, SteelParams};
//!
//! let concrete = ConcreteLaw::new(&ConcreteParams::new(30.0));
//! let steel = SteelLaw::new(&SteelParams::new(500.0));
//!
//! assert!((concrete.stress(0.0035) - 17.0).abs() < 1e-9);
//! assert!(steel.stress(-0.01) < -steel.fyd_mpa);
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::{ConcreteLaw, ConcreteParams};
pub use steel::{SteelLaw, SteelParams};

use serde::{Deserialize, Serialize};

/// Characteristic strains of a concrete/steel pair, bounding the ultimate strain domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitStrains {
    pub ec2: f64,
    pub ecu2: f64,
    pub eyd: f64,
    pub eud: f64,
}

impl LimitStrains {
    pub fn from_laws(concrete: &ConcreteLaw, steel: &SteelLaw) -> Self {
        LimitStrains {
            ec2: concrete.ec2,
            ecu2: concrete.ecu2,
            eyd: steel.eyd,
            eud: steel.eud,
        }
    }
}
