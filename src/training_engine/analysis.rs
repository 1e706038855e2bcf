//! Performance analysis over recorded training sessions.
//!
//! Everything here is a deterministic function of the session list and the
//! caller-supplied clock (`now_ms`).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::training_engine::models::{DrillCategory, TrainingSession};

pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Categories below this accuracy (0-1) are reported as weaknesses.
pub const WEAKNESS_THRESHOLD: f64 = 0.70;

/// Mean category accuracy below which more frequent practice is recommended.
pub const FREQUENCY_THRESHOLD: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisPeriod {
    Last7Days,
    Last30Days,
    Last3Months,
    AllTime,
}

impl AnalysisPeriod {
    /// Sessions must start strictly after this instant. `None` keeps everything.
    fn cutoff_ms(self, now_ms: u64) -> Option<u64> {
        let days = match self {
            AnalysisPeriod::Last7Days   => 7,
            AnalysisPeriod::Last30Days  => 30,
            AnalysisPeriod::Last3Months => 90,
            AnalysisPeriod::AllTime     => return None,
        };
        Some(now_ms.saturating_sub(days * DAY_MS))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerRank {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
}

impl PlayerRank {
    pub fn from_accuracy(accuracy: f64) -> PlayerRank {
        match accuracy {
            a if a >= 0.95 => PlayerRank::Master,
            a if a >= 0.90 => PlayerRank::Diamond,
            a if a >= 0.80 => PlayerRank::Platinum,
            a if a >= 0.70 => PlayerRank::Gold,
            a if a >= 0.60 => PlayerRank::Silver,
            _              => PlayerRank::Bronze,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MasteryLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl MasteryLevel {
    pub fn from_accuracy(accuracy: f64) -> MasteryLevel {
        match accuracy {
            a if a >= 0.90 => MasteryLevel::Expert,
            a if a >= 0.80 => MasteryLevel::Advanced,
            a if a >= 0.60 => MasteryLevel::Intermediate,
            _              => MasteryLevel::Beginner,
        }
    }
}

/// Suggested drill difficulty (1-5) for a given accuracy.
pub fn difficulty_for(accuracy: f64) -> u8 {
    match accuracy {
        a if a >= 0.90 => 5,
        a if a >= 0.80 => 4,
        a if a >= 0.70 => 3,
        a if a >= 0.60 => 2,
        _              => 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaknessSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    DrillPractice,
    FrequencyIncrease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_drills_completed: usize,
    /// Correct answers over questions across all sessions, 0-1.
    pub average_accuracy: f64,
    pub total_time_spent_ms: u64,
    pub current_streak_days: u32,
    /// Mean accuracy of the newer half of sessions minus the older half.
    pub improvement_rate: f64,
    pub rank: PlayerRank,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: DrillCategory,
    pub accuracy: f64,
    pub questions_answered: u32,
    pub average_time_ms: u64,
    pub difficulty_level: u8,
    pub mastery_level: MasteryLevel,
    pub last_practiced_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaknessArea {
    pub category: DrillCategory,
    pub severity: WeaknessSeverity,
    pub accuracy: f64,
    pub description: String,
    pub estimated_hours_to_improve: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: RecommendationPriority,
    pub title: String,
    pub description: String,
    pub target_category: Option<DrillCategory>,
    pub estimated_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub time_ms: u64,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    pub player_id: String,
    pub period: AnalysisPeriod,
    pub overall: OverallStats,
    /// One entry per category, in [`DrillCategory::ALL`] order.
    pub categories: Vec<CategoryStats>,
    pub weaknesses: Vec<WeaknessArea>,
    pub recommendations: Vec<Recommendation>,
    pub progress_trend: Vec<ProgressPoint>,
}

fn ratio(correct: u32, total: u32) -> f64 {
    if total == 0 { 0.0 } else { correct as f64 / total as f64 }
}

fn duration_ms(session: &TrainingSession, now_ms: u64) -> u64 {
    session.end_time_ms.unwrap_or(now_ms).saturating_sub(session.start_time_ms)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Consecutive UTC days with at least one session, counting back from the
/// most recent session day.
fn current_streak(sessions: &[&TrainingSession]) -> u32 {
    let days: BTreeSet<u64> = sessions.iter().map(|s| s.start_time_ms / DAY_MS).collect();
    let mut streak = 0;
    let mut expected = None;
    for &day in days.iter().rev() {
        match expected {
            Some(e) if day != e => break,
            _ => {}
        }
        streak += 1;
        match day.checked_sub(1) {
            Some(prev) => expected = Some(prev),
            None => break,
        }
    }
    streak
}

/// `sessions` must already be sorted by start time.
fn improvement_rate(sessions: &[&TrainingSession]) -> f64 {
    if sessions.len() < 2 {
        return 0.0;
    }
    let half = sessions.len() / 2;
    let older = mean(sessions[..half].iter().map(|s| s.accuracy()));
    let recent = mean(sessions[sessions.len() - half..].iter().map(|s| s.accuracy()));
    recent - older
}

fn overall_stats(sessions: &[&TrainingSession], now_ms: u64) -> OverallStats {
    let questions: u32 = sessions.iter().map(|s| s.total_questions).sum();
    let correct: u32 = sessions.iter().map(|s| s.total_correct).sum();
    let average_accuracy = ratio(correct, questions);
    OverallStats {
        total_drills_completed: sessions.len(),
        average_accuracy,
        total_time_spent_ms: sessions.iter().map(|s| duration_ms(s, now_ms)).sum(),
        current_streak_days: current_streak(sessions),
        improvement_rate: improvement_rate(sessions),
        rank: PlayerRank::from_accuracy(average_accuracy),
    }
}

fn category_stats(category: DrillCategory, sessions: &[&TrainingSession], now_ms: u64) -> CategoryStats {
    let in_category: Vec<&TrainingSession> =
        sessions.iter().copied().filter(|s| s.category == category).collect();
    let questions: u32 = in_category.iter().map(|s| s.total_questions).sum();
    let correct: u32 = in_category.iter().map(|s| s.total_correct).sum();
    let accuracy = ratio(correct, questions);
    let average_time_ms = if in_category.is_empty() {
        0
    } else {
        in_category.iter().map(|s| duration_ms(s, now_ms)).sum::<u64>() / in_category.len() as u64
    };
    CategoryStats {
        category,
        accuracy,
        questions_answered: questions,
        average_time_ms,
        difficulty_level: difficulty_for(accuracy),
        mastery_level: MasteryLevel::from_accuracy(accuracy),
        last_practiced_ms: in_category.iter().map(|s| s.start_time_ms).max(),
    }
}

fn focus_area(category: DrillCategory) -> &'static str {
    match category {
        DrillCategory::Preflop            => "opening ranges from late position",
        DrillCategory::Postflop           => "continuation bet decisions",
        DrillCategory::HandReading        => "spotting bluffs",
        DrillCategory::BankrollManagement => "risk management in tournaments",
    }
}

fn weakness(stats: &CategoryStats) -> Option<WeaknessArea> {
    if stats.questions_answered == 0 || stats.accuracy >= WEAKNESS_THRESHOLD {
        return None;
    }
    let (severity, hours) = match stats.accuracy {
        a if a < 0.50 => (WeaknessSeverity::High, 20),
        a if a < 0.60 => (WeaknessSeverity::Medium, 15),
        _             => (WeaknessSeverity::Low, 10),
    };
    Some(WeaknessArea {
        category: stats.category,
        severity,
        accuracy: stats.accuracy,
        description: format!(
            "{} accuracy is {:.0}%, below the {:.0}% target; work on {}",
            stats.category,
            stats.accuracy * 100.0,
            WEAKNESS_THRESHOLD * 100.0,
            focus_area(stats.category),
        ),
        estimated_hours_to_improve: hours,
    })
}

fn recommendations(weaknesses: &[WeaknessArea], categories: &[CategoryStats]) -> Vec<Recommendation> {
    let mut recs: Vec<Recommendation> = weaknesses
        .iter()
        .map(|w| {
            let (priority, impact) = match w.severity {
                WeaknessSeverity::High   => (RecommendationPriority::High, 0.7),
                WeaknessSeverity::Medium => (RecommendationPriority::Medium, 0.5),
                WeaknessSeverity::Low    => (RecommendationPriority::Low, 0.3),
            };
            Recommendation {
                kind: RecommendationKind::DrillPractice,
                priority,
                title: format!("Improve {}", w.category),
                description: format!("Focus your practice on {}", focus_area(w.category)),
                target_category: Some(w.category),
                estimated_impact: impact,
            }
        })
        .collect();
    recs.sort_by(|a, b| b.priority.cmp(&a.priority));

    let practiced: Vec<f64> = categories
        .iter()
        .filter(|c| c.questions_answered > 0)
        .map(|c| c.accuracy)
        .collect();
    if !practiced.is_empty() && mean(practiced.into_iter()) < FREQUENCY_THRESHOLD {
        recs.push(Recommendation {
            kind: RecommendationKind::FrequencyIncrease,
            priority: RecommendationPriority::Medium,
            title: "Practice more often".to_string(),
            description: "Practice at least 30 minutes a day and complete 3 drills per session".to_string(),
            target_category: None,
            estimated_impact: 0.3,
        });
    }
    recs
}

/// Build the performance report for `player_id` from `sessions` within `period`.
pub fn analyze(
    player_id: &str,
    sessions: &[TrainingSession],
    period: AnalysisPeriod,
    now_ms: u64,
) -> PerformanceAnalysis {
    let cutoff = period.cutoff_ms(now_ms);
    let mut in_period: Vec<&TrainingSession> = sessions
        .iter()
        .filter(|s| cutoff.map_or(true, |c| s.start_time_ms > c))
        .collect();
    in_period.sort_by_key(|s| s.start_time_ms);

    let overall = overall_stats(&in_period, now_ms);
    let categories: Vec<CategoryStats> = DrillCategory::ALL
        .iter()
        .map(|&c| category_stats(c, &in_period, now_ms))
        .collect();
    let weaknesses: Vec<WeaknessArea> = categories.iter().filter_map(weakness).collect();
    let recommendations = recommendations(&weaknesses, &categories);
    let progress_trend = in_period
        .iter()
        .map(|s| ProgressPoint { time_ms: s.start_time_ms, accuracy: s.accuracy() })
        .collect();

    debug!(
        player_id,
        sessions = in_period.len(),
        weaknesses = weaknesses.len(),
        rank = ?overall.rank,
        "performance analysis built"
    );

    PerformanceAnalysis {
        player_id: player_id.to_string(),
        period,
        overall,
        categories,
        weaknesses,
        recommendations,
        progress_trend,
    }
}
