//! # poker_range_trainer
//!
//! Offline, deterministic engine behind a preflop range-training app.
//!
//! A trainee is shown a spot (their seat at a 6-max table and the action
//! they face) and picks the starting hands they would play from the 169-combo
//! grid. The engine scores that selection against a canonical range and
//! explains what went wrong.
//!
//! ## How it works
//!
//! 1. Canonical ranges live in a [`RangeTable`] keyed by [`Position`] and
//!    [`ActionFacingPlayer`]. The lookup is total: spots without a bespoke
//!    range fall back to a tight per-position default.
//! 2. [`evaluate`] compares the selection with the correct range and returns a
//!    [`DecisionResult`]: accuracy (how much of the range was found), precision
//!    (how much of the selection was right), a pass flag (both at least 80%)
//!    and a [`Feedback`] message.
//! 3. Around the core, [`generate_scenario`] authors seeded drill spots,
//!    [`InMemoryDrillRepository`] serves drills loaded from a JSON catalog,
//!    [`DrillSession`] walks a trainee through a drill, and [`analyze`] turns
//!    recorded sessions into a performance report. [`PlayerProgress`] tracks
//!    XP, levels, achievements and challenges on top of that.
//!
//! ## Quick start
//!
//! ```rust
//! use std::collections::HashSet;
//! use poker_range_trainer::{evaluate, standard_range, ActionFacingPlayer, HandCombo, Position};
//!
//! let correct = standard_range(Position::UTG, ActionFacingPlayer::ThreeBet);
//! let picked: HashSet<HandCombo> = ["AA", "KK", "QQ", "JJ", "AKs", "AKo"]
//!     .into_iter()
//!     .map(HandCombo::from)
//!     .collect();
//!
//! let result = evaluate(&picked, correct);
//! assert!(result.is_correct);
//! println!("{:.1}% / {:.1}%: {}", result.accuracy, result.precision, result.feedback);
//! ```

pub mod training_engine;

// Convenience re-exports so callers can use `poker_range_trainer::evaluate`
// directly without reaching into `training_engine::`.
pub use training_engine::{
    all_combos, analyze, evaluate, generate_scenario, generate_scenarios, leaderboard,
    level_for_xp, standard_range, standard_ranges, Achievement, AchievementCategory,
    AchievementRarity, ActionFacingPlayer, AnalysisPeriod, Card, Challenge, ChallengeType,
    ComboError, DecisionResult, DrillCatalog, DrillCategory, DrillRepository, DrillScenario,
    DrillSession, Feedback, HandCombo, InMemoryDrillRepository, LeaderboardEntry,
    PerformanceAnalysis, PlayerProgress, PlayerRank, Position, ProgressionError, Rank,
    RangeError, RangeTable, RepositoryError, ScenarioRequest, SessionError, SessionScenario,
    SessionStep, Suit, TrainingDrill, TrainingSession, COMBO_COUNT, PASS_THRESHOLD,
    XP_PER_LEVEL,
};
