//! One trainee's pass through a drill.
//!
//! Flow per scenario: toggle combos, [`submit`](DrillSession::submit), then
//! [`advance`](DrillSession::advance). Once the last scenario has been
//! advanced past, the session is complete and [`finish`](DrillSession::finish)
//! turns it into a [`TrainingSession`] record for the repository.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info};

use crate::training_engine::{
    combos::ComboError,
    evaluator::{evaluate, DecisionResult},
    models::{DrillScenario, HandCombo, SessionScenario, TrainingDrill, TrainingSession},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("drill {0} has no scenarios")]
    EmptyDrill(u32),

    #[error("scenario {0} was already submitted")]
    AlreadySubmitted(usize),

    #[error("scenario {0} has not been submitted yet")]
    NotSubmitted(usize),

    #[error("every scenario of this drill has been played")]
    Finished,

    #[error(transparent)]
    InvalidCombo(#[from] ComboError),
}

/// What [`DrillSession::advance`] moved to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStep<'a> {
    Next(&'a DrillScenario),
    Complete { accuracy_percent: f64 },
}

#[derive(Debug, Clone)]
pub struct DrillSession {
    id: String,
    drill: TrainingDrill,
    started_at_ms: u64,
    index: usize,
    selection: HashSet<HandCombo>,
    last_result: Option<DecisionResult>,
    records: Vec<SessionScenario>,
    correct_answers: u32,
    complete: bool,
}

impl DrillSession {
    pub fn start(drill: TrainingDrill, started_at_ms: u64) -> Result<Self, SessionError> {
        if drill.scenarios.is_empty() {
            return Err(SessionError::EmptyDrill(drill.id));
        }
        let id = format!("DS-{:04}-{started_at_ms}", drill.id);
        debug!(session = %id, questions = drill.scenarios.len(), "drill session started");
        Ok(DrillSession {
            id,
            drill,
            started_at_ms,
            index: 0,
            selection: HashSet::new(),
            last_result: None,
            records: Vec::new(),
            correct_answers: 0,
            complete: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn drill(&self) -> &TrainingDrill {
        &self.drill
    }

    pub fn current_scenario(&self) -> &DrillScenario {
        &self.drill.scenarios[self.index]
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn total_questions(&self) -> usize {
        self.drill.scenarios.len()
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn selection(&self) -> &HashSet<HandCombo> {
        &self.selection
    }

    pub fn last_result(&self) -> Option<&DecisionResult> {
        self.last_result.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn locked(&self) -> bool {
        self.complete || self.last_result.is_some()
    }

    /// Flip `combo` in or out of the selection and report whether it is
    /// selected afterwards. No-op once the scenario has been submitted.
    ///
    /// Labels outside the 169-combo universe are rejected and leave the
    /// selection untouched.
    pub fn toggle(&mut self, combo: HandCombo) -> Result<bool, SessionError> {
        let combo = HandCombo::parse(combo.as_str())?;
        if self.locked() {
            return Ok(self.selection.contains(&combo));
        }
        if self.selection.remove(&combo) {
            Ok(false)
        } else {
            self.selection.insert(combo);
            Ok(true)
        }
    }

    /// Clear the selection. No-op once the scenario has been submitted.
    pub fn reset_selection(&mut self) {
        if !self.locked() {
            self.selection.clear();
        }
    }

    /// Score the current selection against the scenario's correct range.
    pub fn submit(&mut self, time_spent_ms: u64) -> Result<&DecisionResult, SessionError> {
        if self.complete {
            return Err(SessionError::Finished);
        }
        if self.last_result.is_some() {
            return Err(SessionError::AlreadySubmitted(self.index));
        }

        let scenario = &self.drill.scenarios[self.index];
        let result = evaluate(&self.selection, &scenario.correct_ranges);

        let mut user_ranges: Vec<HandCombo> = self.selection.iter().cloned().collect();
        user_ranges.sort();
        self.records.push(SessionScenario {
            scenario: scenario.clone(),
            user_ranges,
            correct_ranges: scenario.correct_ranges.clone(),
            time_spent_ms,
            is_correct: result.is_correct,
        });
        if result.is_correct {
            self.correct_answers += 1;
        }

        Ok(&*self.last_result.insert(result))
    }

    /// Move past a submitted scenario.
    pub fn advance(&mut self) -> Result<SessionStep<'_>, SessionError> {
        if self.complete {
            return Err(SessionError::Finished);
        }
        if self.last_result.is_none() {
            return Err(SessionError::NotSubmitted(self.index));
        }

        self.last_result = None;
        self.selection.clear();

        if self.index + 1 < self.drill.scenarios.len() {
            self.index += 1;
            Ok(SessionStep::Next(&self.drill.scenarios[self.index]))
        } else {
            self.complete = true;
            let accuracy_percent = self.accuracy_percent();
            info!(session = %self.id, accuracy_percent, "drill complete");
            Ok(SessionStep::Complete { accuracy_percent })
        }
    }

    /// Correct answers over all questions in the drill, 0-100.
    pub fn accuracy_percent(&self) -> f64 {
        self.correct_answers as f64 / self.drill.scenarios.len() as f64 * 100.0
    }

    /// Close the session. May be called before completion (e.g. when time
    /// runs out); unanswered scenarios then count as wrong.
    pub fn finish(self, ended_at_ms: u64) -> TrainingSession {
        TrainingSession {
            id: self.id,
            drill_id: self.drill.id,
            category: self.drill.category,
            start_time_ms: self.started_at_ms,
            end_time_ms: Some(ended_at_ms),
            total_questions: self.drill.scenarios.len() as u32,
            total_correct: self.correct_answers,
            scenarios: self.records,
        }
    }
}
