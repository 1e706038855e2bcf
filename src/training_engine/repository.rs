//! Drill storage contract and an in-memory implementation.
//!
//! The in-memory repository is seeded from a JSON drill catalog. Scenarios in
//! the catalog may omit `correct_ranges`; those are authored from the standard
//! range table when the catalog is loaded. Catalog example:
//!
//! ```json
//! {
//!   "drills": [{
//!     "id": 1,
//!     "title": "Opening ranges",
//!     "category": "PREFLOP",
//!     "scenarios": [
//!       { "position": "BTN", "action": "UNOPENED" },
//!       { "position": "BB", "action": "ONE_RAISE", "correct_ranges": ["AA", "KK"] }
//!     ]
//!   }]
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::training_engine::{
    models::{
        ActionFacingPlayer, DrillCategory, DrillScenario, HandCombo, Position, TrainingDrill,
        TrainingSession,
    },
    range_table::{self, standard_range, RangeError},
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("drill {0} not found")]
    DrillNotFound(u32),

    #[error("drill id {0} appears more than once in the catalog")]
    DuplicateDrill(u32),

    #[error("drill {drill_id} has an invalid range: {source}")]
    InvalidRange { drill_id: u32, source: RangeError },

    #[error("malformed drill catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

pub trait DrillRepository {
    fn drill(&self, drill_id: u32) -> Result<TrainingDrill, RepositoryError>;

    fn drills(&self) -> Vec<TrainingDrill>;

    fn drills_by_category(&self, category: DrillCategory) -> Vec<TrainingDrill> {
        self.drills().into_iter().filter(|d| d.category == category).collect()
    }

    fn save_session(&mut self, session: TrainingSession);

    fn history(&self) -> Vec<TrainingSession>;

    /// Canonical range used when authoring a scenario.
    fn standard_range(&self, position: Position, action: ActionFacingPlayer) -> Vec<HandCombo> {
        standard_range(position, action).to_vec()
    }

    fn update_drill_progress(&mut self, drill_id: u32, completed: bool) -> Result<(), RepositoryError>;
}

// ---------------------------------------------------------------------------
// Catalog format
// ---------------------------------------------------------------------------

fn default_difficulty() -> u8 {
    1
}

fn default_duration_minutes() -> u32 {
    15
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrillCatalog {
    #[serde(default)]
    pub drills: Vec<CatalogDrill>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDrill {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: DrillCategory,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub scenarios: Vec<CatalogScenario>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogScenario {
    pub position: Position,
    pub action: ActionFacingPlayer,
    /// `None` means "use the standard range for this spot".
    #[serde(default)]
    pub correct_ranges: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
}

/// Bankroll drills have no hands to pick, so their range may be empty.
fn author_scenario(
    drill_id: u32,
    category: DrillCategory,
    scenario: CatalogScenario,
) -> Result<DrillScenario, RepositoryError> {
    let correct_ranges = match scenario.correct_ranges {
        None => standard_range(scenario.position, scenario.action).to_vec(),
        Some(labels) if labels.is_empty() && category == DrillCategory::BankrollManagement => Vec::new(),
        Some(labels) => range_table::validate(scenario.position, Some(scenario.action), &labels)
            .map_err(|source| RepositoryError::InvalidRange { drill_id, source })?,
    };
    Ok(DrillScenario {
        position: scenario.position,
        action: scenario.action,
        correct_ranges,
        description: scenario.description,
    })
}

fn author_drill(drill: CatalogDrill) -> Result<TrainingDrill, RepositoryError> {
    let id = drill.id;
    let category = drill.category;
    let scenarios = drill
        .scenarios
        .into_iter()
        .map(|s| author_scenario(id, category, s))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TrainingDrill {
        id,
        title: drill.title,
        description: drill.description,
        category: drill.category,
        difficulty: drill.difficulty,
        duration_minutes: drill.duration_minutes,
        scenarios,
        completed: drill.completed,
    })
}

// ---------------------------------------------------------------------------
// In-memory repository
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InMemoryDrillRepository {
    drills: Vec<TrainingDrill>,
    sessions: Vec<TrainingSession>,
}

impl InMemoryDrillRepository {
    pub fn new(drills: Vec<TrainingDrill>) -> Self {
        InMemoryDrillRepository { drills, sessions: Vec::new() }
    }

    pub fn from_catalog(catalog: DrillCatalog) -> Result<Self, RepositoryError> {
        let mut seen = HashSet::new();
        let mut drills = Vec::with_capacity(catalog.drills.len());
        for drill in catalog.drills {
            if !seen.insert(drill.id) {
                return Err(RepositoryError::DuplicateDrill(drill.id));
            }
            drills.push(author_drill(drill)?);
        }
        info!(drills = drills.len(), "loaded drill catalog");
        Ok(Self::new(drills))
    }

    pub fn from_catalog_json(json: &str) -> Result<Self, RepositoryError> {
        let catalog: DrillCatalog = serde_json::from_str(json)?;
        Self::from_catalog(catalog)
    }
}

impl DrillRepository for InMemoryDrillRepository {
    fn drill(&self, drill_id: u32) -> Result<TrainingDrill, RepositoryError> {
        self.drills
            .iter()
            .find(|d| d.id == drill_id)
            .cloned()
            .ok_or_else(|| {
                warn!(drill_id, "drill lookup failed");
                RepositoryError::DrillNotFound(drill_id)
            })
    }

    fn drills(&self) -> Vec<TrainingDrill> {
        self.drills.clone()
    }

    fn save_session(&mut self, session: TrainingSession) {
        self.sessions.push(session);
    }

    fn history(&self) -> Vec<TrainingSession> {
        self.sessions.clone()
    }

    fn update_drill_progress(&mut self, drill_id: u32, completed: bool) -> Result<(), RepositoryError> {
        let drill = self
            .drills
            .iter_mut()
            .find(|d| d.id == drill_id)
            .ok_or(RepositoryError::DrillNotFound(drill_id))?;
        drill.completed = completed;
        Ok(())
    }
}
