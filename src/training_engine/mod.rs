//! Core training engine: range evaluation, canonical ranges, drills and sessions.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: cards, combos, positions, drills, sessions |
//! | `combos`      | The 169-combo universe, label parsing and normalisation |
//! | `range_table` | Canonical ranges keyed by (position, action facing) |
//! | `evaluator`   | Accuracy / precision scoring and feedback rules |
//! | `generator`   | Seeded scenario generation per drill category |
//! | `repository`  | Drill storage trait and JSON-seeded in-memory store |
//! | `session`     | Submit / advance state machine for one drill attempt |
//! | `analysis`    | Performance report over recorded sessions |
//! | `progression` | XP, levels, achievements, challenges, leaderboard |

pub mod analysis;
pub mod combos;
pub mod evaluator;
pub mod generator;
pub mod models;
pub mod progression;
pub mod range_table;
pub mod repository;
pub mod session;

// Re-export the public API surface so callers can use
// `training_engine::evaluate` without reaching into sub-modules.
pub use analysis::{analyze, AnalysisPeriod, PerformanceAnalysis, PlayerRank};
pub use combos::{all_combos, ComboError, COMBO_COUNT};
pub use evaluator::{evaluate, DecisionResult, Feedback, PASS_THRESHOLD};
pub use generator::{generate_scenario, generate_scenarios};
pub use models::{
    ActionFacingPlayer, Card, DrillCategory, DrillScenario, HandCombo, Position, Rank,
    ScenarioRequest, SessionScenario, Suit, TrainingDrill, TrainingSession,
};
pub use progression::{
    leaderboard, level_for_xp, Achievement, AchievementCategory, AchievementRarity, Challenge,
    ChallengeType, LeaderboardEntry, PlayerProgress, ProgressionError, XP_PER_LEVEL,
};
pub use range_table::{standard_range, standard_ranges, RangeError, RangeTable};
pub use repository::{DrillCatalog, DrillRepository, InMemoryDrillRepository, RepositoryError};
pub use session::{DrillSession, SessionError, SessionStep};
