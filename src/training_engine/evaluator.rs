use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::training_engine::models::HandCombo;

/// Minimum accuracy and precision (in percent) for an answer to count as correct.
pub const PASS_THRESHOLD: f64 = 80.0;

/// Coaching message attached to a [`DecisionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// Accuracy and precision both at least 90%.
    Excellent,
    /// Accuracy and precision both at least 80%.
    VeryGood,
    /// Accuracy at least 70%, but important hands were left out.
    MissedHands,
    /// Precision at least 70%, but extra hands were included.
    TooManyExtras,
    BeMoreSelective,
    TooConservative,
    KeepPracticing,
}

impl Feedback {
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Excellent       => "Excellent! Near-perfect selection.",
            Feedback::VeryGood        => "Very good! A few minor improvements are possible.",
            Feedback::MissedHands     => "Good result, but you missed some important hands.",
            Feedback::TooManyExtras   => "You picked the right hands, but included some that don't belong.",
            Feedback::BeMoreSelective => "Watch out for extra hands. Be more selective.",
            Feedback::TooConservative => "You were too conservative. Include more hands in the range.",
            Feedback::KeepPracticing  => "Keep practicing. Review the fundamentals.",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of comparing a trainee's selection with the canonical range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Share of the correct range that was selected, 0-100.
    pub accuracy: f64,
    /// Share of the selection that belongs to the correct range, 0-100.
    pub precision: f64,
    pub correct_selections: usize,
    pub incorrect_selections: usize,
    pub missed_selections: usize,
    pub is_correct: bool,
    pub feedback: Feedback,
}

/// Values the feedback rules look at.
struct Scores {
    accuracy: f64,
    precision: f64,
    incorrect: usize,
    missed: usize,
}

fn near_perfect(s: &Scores) -> bool {
    s.accuracy >= 90.0 && s.precision >= 90.0
}

fn passing(s: &Scores) -> bool {
    s.accuracy >= PASS_THRESHOLD && s.precision >= PASS_THRESHOLD
}

fn mostly_complete(s: &Scores) -> bool {
    s.accuracy >= 70.0
}

fn mostly_precise(s: &Scores) -> bool {
    s.precision >= 70.0
}

fn over_selected(s: &Scores) -> bool {
    s.incorrect > s.missed
}

fn under_selected(s: &Scores) -> bool {
    s.missed > s.incorrect
}

/// Checked top to bottom; the first matching rule wins. When none match,
/// the feedback is [`Feedback::KeepPracticing`].
static FEEDBACK_RULES: [(fn(&Scores) -> bool, Feedback); 6] = [
    (near_perfect,    Feedback::Excellent),
    (passing,         Feedback::VeryGood),
    (mostly_complete, Feedback::MissedHands),
    (mostly_precise,  Feedback::TooManyExtras),
    (over_selected,   Feedback::BeMoreSelective),
    (under_selected,  Feedback::TooConservative),
];

fn select_feedback(scores: &Scores) -> Feedback {
    FEEDBACK_RULES
        .iter()
        .find(|(rule, _)| rule(scores))
        .map(|&(_, feedback)| feedback)
        .unwrap_or(Feedback::KeepPracticing)
}

/// Score `user_selection` against `correct_range`.
///
/// `correct_range` is compared as a set, so repeated labels count once.
/// An empty correct range scores 100% accuracy only for an empty selection;
/// an empty selection always scores 0% precision, including when the correct
/// range is empty too.
pub fn evaluate(user_selection: &HashSet<HandCombo>, correct_range: &[HandCombo]) -> DecisionResult {
    let correct_set: HashSet<&HandCombo> = correct_range.iter().collect();

    let correct_selections = user_selection.iter().filter(|c| correct_set.contains(c)).count();
    let incorrect_selections = user_selection.len() - correct_selections;
    let missed_selections = correct_set.len() - correct_selections;

    let accuracy = if correct_set.is_empty() {
        if user_selection.is_empty() { 100.0 } else { 0.0 }
    } else {
        correct_selections as f64 / correct_set.len() as f64 * 100.0
    };

    let precision = if user_selection.is_empty() {
        0.0
    } else {
        correct_selections as f64 / user_selection.len() as f64 * 100.0
    };

    let feedback = select_feedback(&Scores {
        accuracy,
        precision,
        incorrect: incorrect_selections,
        missed: missed_selections,
    });

    debug!(
        selected = user_selection.len(),
        expected = correct_set.len(),
        accuracy,
        precision,
        ?feedback,
        "evaluated range decision"
    );

    DecisionResult {
        accuracy,
        precision,
        correct_selections,
        incorrect_selections,
        missed_selections,
        is_correct: accuracy >= PASS_THRESHOLD && precision >= PASS_THRESHOLD,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(labels: &[&str]) -> HashSet<HandCombo> {
        labels.iter().map(|&l| HandCombo::from(l)).collect()
    }

    fn range(labels: &[&str]) -> Vec<HandCombo> {
        labels.iter().map(|&l| HandCombo::from(l)).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn full_match_is_perfect() {
        let correct = range(&["AA", "KK", "AKs"]);
        let r = evaluate(&set(&["AA", "KK", "AKs"]), &correct);
        assert_eq!(r.accuracy, 100.0);
        assert_eq!(r.precision, 100.0);
        assert_eq!(r.incorrect_selections, 0);
        assert_eq!(r.missed_selections, 0);
        assert!(r.is_correct);
        assert_eq!(r.feedback, Feedback::Excellent);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let user = set(&["AA", "QQ", "T9s"]);
        let correct = range(&["AA", "KK", "QQ"]);
        assert_eq!(evaluate(&user, &correct), evaluate(&user, &correct));
    }

    #[test]
    fn disjoint_sets_score_zero() {
        let r = evaluate(&set(&["72o", "83o"]), &range(&["AA", "KK"]));
        assert_eq!(r.accuracy, 0.0);
        assert_eq!(r.precision, 0.0);
        assert!(!r.is_correct);
        assert_eq!(r.incorrect_selections, 2);
        assert_eq!(r.missed_selections, 2);
        // Tie between extras and misses falls through to the generic message.
        assert_eq!(r.feedback, Feedback::KeepPracticing);
    }

    #[test]
    fn empty_selection_against_empty_range() {
        let r = evaluate(&HashSet::new(), &[]);
        assert_eq!(r.accuracy, 100.0);
        assert_eq!(r.precision, 0.0);
        assert!(!r.is_correct);
        assert_eq!(r.feedback, Feedback::MissedHands);
    }

    #[test]
    fn selection_against_empty_range() {
        let r = evaluate(&set(&["AA"]), &[]);
        assert_eq!(r.accuracy, 0.0);
        assert_eq!(r.precision, 0.0);
        assert_eq!(r.incorrect_selections, 1);
        assert_eq!(r.feedback, Feedback::BeMoreSelective);
    }

    #[test]
    fn empty_selection_misses_everything() {
        let r = evaluate(&HashSet::new(), &range(&["AA", "KK", "QQ", "JJ"]));
        assert_eq!(r.accuracy, 0.0);
        assert_eq!(r.precision, 0.0);
        assert_eq!(r.missed_selections, 4);
        assert_eq!(r.feedback, Feedback::TooConservative);
    }

    #[test]
    fn two_of_three_with_one_extra() {
        let r = evaluate(&set(&["AA", "KK", "72o"]), &range(&["AA", "KK", "QQ"]));
        assert_eq!(r.correct_selections, 2);
        assert_eq!(r.incorrect_selections, 1);
        assert_eq!(r.missed_selections, 1);
        assert!(approx(r.accuracy, 66.67));
        assert!(approx(r.precision, 66.67));
        assert!(!r.is_correct);
        // Neither accuracy nor precision reaches 70 and extras == misses.
        assert_eq!(r.feedback, Feedback::KeepPracticing);
    }

    #[test]
    fn missed_hands_rule_beats_over_selection_rule() {
        // 3 of 4 correct (75%) with 2 extras vs 1 miss.
        let r = evaluate(
            &set(&["AA", "KK", "QQ", "72o", "83o"]),
            &range(&["AA", "KK", "QQ", "JJ"]),
        );
        assert!(approx(r.accuracy, 75.0));
        assert!(r.incorrect_selections > r.missed_selections);
        assert_eq!(r.feedback, Feedback::MissedHands);
    }

    #[test]
    fn precise_but_incomplete_selection() {
        // 2 of 4 correct (50%), nothing extra (100% precision).
        let r = evaluate(&set(&["AA", "KK"]), &range(&["AA", "KK", "QQ", "JJ"]));
        assert_eq!(r.accuracy, 50.0);
        assert_eq!(r.precision, 100.0);
        assert!(!r.is_correct);
        assert_eq!(r.feedback, Feedback::TooManyExtras);
    }

    #[test]
    fn very_good_tier_between_80_and_90() {
        let correct = range(&["AA", "KK", "QQ", "JJ", "TT"]);
        let r = evaluate(&set(&["AA", "KK", "QQ", "JJ"]), &correct);
        assert_eq!(r.accuracy, 80.0);
        assert_eq!(r.precision, 100.0);
        assert!(r.is_correct);
        assert_eq!(r.feedback, Feedback::VeryGood);
    }

    #[test]
    fn duplicate_labels_in_correct_range_count_once() {
        let r = evaluate(&set(&["AA"]), &range(&["AA", "AA", "KK"]));
        assert_eq!(r.accuracy, 50.0);
        assert_eq!(r.missed_selections, 1);
    }

    #[test]
    fn labels_are_case_sensitive() {
        let r = evaluate(&set(&["aks"]), &range(&["AKs"]));
        assert_eq!(r.correct_selections, 0);
    }

    #[test]
    fn feedback_has_a_message_for_every_tier() {
        let tiers = [
            Feedback::Excellent,
            Feedback::VeryGood,
            Feedback::MissedHands,
            Feedback::TooManyExtras,
            Feedback::BeMoreSelective,
            Feedback::TooConservative,
            Feedback::KeepPracticing,
        ];
        for feedback in tiers {
            assert!(!feedback.message().is_empty());
            assert_eq!(feedback.to_string(), feedback.message());
        }
    }

    #[test]
    fn no_matching_rule_falls_back_to_keep_practicing() {
        let scores = Scores { accuracy: 50.0, precision: 50.0, incorrect: 2, missed: 2 };
        assert!(FEEDBACK_RULES.iter().all(|(rule, _)| !rule(&scores)));
        assert_eq!(select_feedback(&scores), Feedback::KeepPracticing);
    }
}
