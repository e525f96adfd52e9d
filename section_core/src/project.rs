//! # Project Data Structures
//!
//! The `Project` struct is the root container for section analyses.
//! Projects serialize to `.rcs` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (solver defaults, partial factors)
//! └── items: HashMap<Uuid, AnalysisItem> (all analyses)
//! ```
//!
//! Settings act as the configuration layer: any tunable an analysis input
//! leaves unset (integration step, precision, iteration ceiling) is taken
//! from the project's settings when the analysis runs through
//! [`Project::analyze`].
//!
//! ## Example
//!
//! ```rust
//! use section_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("integration_divisions"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{AnalysisItem, AnalysisOutput};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteParams, SteelParams};
use crate::section::DEFAULT_INTEGRATION_DIVISIONS;

/// Current schema version for .rcs files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Solver and material defaults
    pub settings: GlobalSettings,

    /// All analysis items, keyed by UUID
    pub items: HashMap<Uuid, AnalysisItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use section_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add an analysis item. Returns the UUID assigned to it.
    pub fn add_item(&mut self, item: AnalysisItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove an analysis item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<AnalysisItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&AnalysisItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Item ids ordered by label, for stable reporting.
    pub fn sorted_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.items.keys().copied().collect();
        ids.sort_by(|a, b| self.items[a].label().cmp(self.items[b].label()).then(a.cmp(b)));
        ids
    }

    /// Run one item with unset tunables filled from the project settings.
    pub fn analyze(&self, id: &Uuid) -> CalcResult<AnalysisOutput> {
        let item = self
            .get_item(id)
            .ok_or_else(|| CalcError::item_not_found(id.to_string()))?;
        let resolved = self.settings.resolve(item);
        let step = resolved
            .section()
            .integration_step_with(self.settings.integration_divisions);
        debug!("Running {} '{}' with step {} m", resolved.calc_type(), resolved.label(), step);
        resolved.run_with_step(step)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Integration steps over the section height when a section sets no step
    pub integration_divisions: u32,

    /// Elastic solver tolerance on |Δx| / h
    pub precision: f64,

    /// Elastic solver iteration ceiling
    pub max_iterations: u32,

    /// Concrete coefficient αcc for new sections
    pub alpha_cc: f64,

    /// Concrete partial factor γc for new sections
    pub gamma_c: f64,

    /// Steel partial factor γs for new sections
    pub gamma_s: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            integration_divisions: DEFAULT_INTEGRATION_DIVISIONS,
            precision: crate::calculations::elastic::DEFAULT_PRECISION,
            max_iterations: crate::calculations::elastic::DEFAULT_MAX_ITERATIONS,
            alpha_cc: 0.85,
            gamma_c: 1.5,
            gamma_s: 1.15,
        }
    }
}

impl GlobalSettings {
    /// Concrete of strength `fck_mpa` with this project's factors.
    pub fn concrete(&self, fck_mpa: f64) -> ConcreteParams {
        ConcreteParams {
            fck_mpa,
            alpha_cc: self.alpha_cc,
            gamma_c: self.gamma_c,
        }
    }

    /// Steel of yield strength `fyk_mpa` with this project's γs.
    pub fn steel(&self, fyk_mpa: f64) -> SteelParams {
        SteelParams {
            gamma_s: self.gamma_s,
            ..SteelParams::new(fyk_mpa)
        }
    }

    /// Copy of `item` with unset solver tunables taken from these settings.
    pub fn resolve(&self, item: &AnalysisItem) -> AnalysisItem {
        match item {
            AnalysisItem::Ultimate(input) => AnalysisItem::Ultimate(input.clone()),
            AnalysisItem::Elastic(input) => {
                let mut input = input.clone();
                input.precision.get_or_insert(self.precision);
                input.max_iterations.get_or_insert(self.max_iterations);
                AnalysisItem::Elastic(input)
            }
        }
    }
}
