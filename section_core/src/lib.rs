//! # section_core - Reinforced Concrete Section Analysis Engine
//!
//! `section_core` checks reinforced concrete cross-sections under combined
//! axial force and uniaxial bending. All inputs and outputs are
//! JSON-serializable so analyses can be stored in project files or driven
//! by external tools.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Outcomes are values**: out-of-range forces and non-convergence are
//!   reported in the result, not as errors
//!
//! ## Quick Start
//!
//! ```rust
//! use section_core::calculations::elastic::{solve, ElasticInput};
//! use section_core::section::{Reinforcement, SectionGeometry, SectionShape};
//!
//! let section = SectionGeometry::new(
//!     SectionShape::Rectangular { width_m: 0.3, height_m: 0.5 },
//!     vec![Reinforcement::bars(5, 16.0, 0.45), Reinforcement::bars(4, 12.0, 0.05)],
//! );
//! let input = ElasticInput::new("B-1", section, 6.06, 90.0, 130.0);
//! let outcome = solve(&input).unwrap();
//! assert!(outcome.is_converged());
//! ```
//!
//! ## Modules
//!
//! - [`section`] - Section shapes and reinforcement layers
//! - [`materials`] - Concrete and steel design laws
//! - [`equations`] - Integration, strain profiles and design tables
//! - [`calculations`] - ULS interaction, capacity query and SLS elastic solver
//! - [`project`] - Project container, metadata, and settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic project saves and version-checked loads

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod project;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{AnalysisItem, AnalysisOutput, CapacityOutcome, ElasticOutcome};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use section::{Reinforcement, SectionGeometry, SectionShape};
