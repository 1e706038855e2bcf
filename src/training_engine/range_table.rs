//! Canonical preflop ranges keyed by (position, action facing the hero).
//!
//! The table is a two-level mapping: each position owns a map of authored
//! ranges per action plus one default range. Lookups fall back to the default,
//! so [`RangeTable::lookup`] is total over `Position x ActionFacingPlayer` and
//! never fails.
//!
//! Defaults differ per position: UTG, MP and CO fall back to `AA KK QQ AKs AKo`;
//! BTN to `AA KK QQ JJ AKs AKo AQs`; SB to `AA KK QQ JJ AKs AKo`; BB to
//! `AA KK QQ JJ TT AKs AKo`.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::training_engine::{
    combos::ComboError,
    models::{ActionFacingPlayer, HandCombo, Position},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("no default range authored for {0:?}")]
    MissingDefault(Position),

    #[error("empty range for {position:?} ({action:?})")]
    EmptyRange { position: Position, action: Option<ActionFacingPlayer> },

    #[error("combo {combo} listed twice for {position:?} ({action:?})")]
    DuplicateCombo { position: Position, action: Option<ActionFacingPlayer>, combo: String },

    #[error(transparent)]
    InvalidCombo(#[from] ComboError),
}

#[derive(Debug, Clone)]
struct PositionRanges {
    by_action: HashMap<ActionFacingPlayer, Vec<HandCombo>>,
    default: Vec<HandCombo>,
}

/// Read-only lookup table of canonical ranges.
#[derive(Debug, Clone)]
pub struct RangeTable {
    /// Indexed by [`Position::index`]; always holds one entry per position.
    positions: Vec<PositionRanges>,
}

impl RangeTable {
    pub fn builder() -> RangeTableBuilder {
        RangeTableBuilder::default()
    }

    /// Canonical range for `position` facing `action`. Falls back to the
    /// position's default when no bespoke range was authored.
    pub fn lookup(&self, position: Position, action: ActionFacingPlayer) -> &[HandCombo] {
        let entry = &self.positions[position.index()];
        entry.by_action.get(&action).unwrap_or(&entry.default)
    }

    /// True if `(position, action)` has its own range rather than the fallback.
    pub fn is_authored(&self, position: Position, action: ActionFacingPlayer) -> bool {
        self.positions[position.index()].by_action.contains_key(&action)
    }

    pub fn default_range(&self, position: Position) -> &[HandCombo] {
        &self.positions[position.index()].default
    }
}

/// Collects labels for a [`RangeTable`] and validates them on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RangeTableBuilder {
    defaults: HashMap<Position, Vec<String>>,
    ranges: Vec<(Position, ActionFacingPlayer, Vec<String>)>,
}

impl RangeTableBuilder {
    pub fn default_range(mut self, position: Position, labels: &[&str]) -> Self {
        self.defaults.insert(position, labels.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn range(mut self, position: Position, action: ActionFacingPlayer, labels: &[&str]) -> Self {
        self.ranges.push((position, action, labels.iter().map(|l| l.to_string()).collect()));
        self
    }

    pub fn build(self) -> Result<RangeTable, RangeError> {
        let mut positions = Vec::with_capacity(Position::ALL.len());
        for position in Position::ALL {
            let labels = self
                .defaults
                .get(&position)
                .ok_or(RangeError::MissingDefault(position))?;
            positions.push(PositionRanges {
                by_action: HashMap::new(),
                default: validate(position, None, labels)?,
            });
        }

        // Later entries for the same (position, action) replace earlier ones.
        for (position, action, labels) in &self.ranges {
            let combos = validate(*position, Some(*action), labels)?;
            positions[position.index()].by_action.insert(*action, combos);
        }

        Ok(RangeTable { positions })
    }
}

/// Parse `labels` into a canonical range: non-empty, canonical, no repeats.
pub(crate) fn validate(
    position: Position,
    action: Option<ActionFacingPlayer>,
    labels: &[String],
) -> Result<Vec<HandCombo>, RangeError> {
    if labels.is_empty() {
        return Err(RangeError::EmptyRange { position, action });
    }
    let mut seen = HashSet::with_capacity(labels.len());
    let mut combos = Vec::with_capacity(labels.len());
    for label in labels {
        let combo = HandCombo::parse(label)?;
        if !seen.insert(label.as_str()) {
            return Err(RangeError::DuplicateCombo { position, action, combo: label.clone() });
        }
        combos.push(combo);
    }
    Ok(combos)
}

// ---------------------------------------------------------------------------
// Standard 6-max ranges
// ---------------------------------------------------------------------------

const TIGHT_DEFAULT: &[&str] = &["AA", "KK", "QQ", "AKs", "AKo"];

fn standard_builder() -> RangeTableBuilder {
    use ActionFacingPlayer::*;
    use Position::*;

    RangeTable::builder()
        // UTG
        .default_range(UTG, TIGHT_DEFAULT)
        .range(UTG, Unopened, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "88",
            "AKs", "AKo", "AQs", "AQo", "AJs", "AJo",
        ])
        .range(UTG, ThreeBet, &["AA", "KK", "QQ", "JJ", "AKs", "AKo", "AQs"])
        // MP
        .default_range(MP, TIGHT_DEFAULT)
        .range(MP, Unopened, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77",
            "AKs", "AKo", "AQs", "AQo", "AJs", "AJo", "ATs", "KQs", "KQo",
        ])
        .range(MP, ThreeBet, &["AA", "KK", "QQ", "JJ", "TT", "AKs", "AKo", "AQs"])
        // CO
        .default_range(CO, TIGHT_DEFAULT)
        .range(CO, Unopened, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66",
            "AKs", "AKo", "AQs", "AQo", "AJs", "AJo", "ATs", "A9s",
            "KQs", "KQo", "KJs", "KJo", "QJs",
        ])
        .range(CO, ThreeBet, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "AKs", "AKo", "AQs", "AJs", "KQs",
        ])
        .range(CO, OneLimp, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77",
            "AKs", "AKo", "AQs", "AQo", "AJs", "AJo", "ATs", "A9s",
            "KQs", "KQo", "KJs", "KJo",
        ])
        // BTN
        .default_range(BTN, &["AA", "KK", "QQ", "JJ", "AKs", "AKo", "AQs"])
        .range(BTN, Unopened, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "44", "33", "22",
            "AKs", "AKo", "AQs", "AQo", "AJs", "AJo", "ATs", "A9s", "A8s", "A7s",
            "A6s", "A5s", "A4s", "A3s", "A2s",
            "KQs", "KQo", "KJs", "KJo", "KTs", "K9s",
            "QJs", "QJo", "QTs", "Q9s", "JTs", "J9s", "T9s", "98s", "87s", "76s", "65s",
        ])
        .range(BTN, ThreeBet, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "88",
            "AKs", "AKo", "AQs", "AJs", "ATs", "A5s", "A4s",
            "KQs", "KJs", "QJs", "J9s", "T8s", "97s", "86s", "75s", "64s", "54s",
        ])
        // SB
        .default_range(SB, &["AA", "KK", "QQ", "JJ", "AKs", "AKo"])
        .range(SB, Unopened, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "44",
            "AKs", "AKo", "AQs", "AQo", "AJs", "AJo", "ATs", "A9s", "A8s", "A7s",
            "A6s", "A5s", "A4s", "A3s", "A2s",
            "KQs", "KQo", "KJs", "KJo", "KTs", "K9s", "K8s", "K7s", "K6s", "K5s",
            "K4s", "K3s", "K2s",
            "QJs", "QJo", "QTs", "Q9s", "Q8s", "JTs", "J9s", "J8s",
            "T9s", "T8s", "98s", "97s", "87s", "86s", "76s", "75s",
            "65s", "64s", "54s", "53s", "43s",
        ])
        .range(SB, ThreeBet, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77",
            "AKs", "AKo", "AQs", "AJs", "ATs", "A9s", "A8s", "A7s", "A6s",
            "A5s", "A4s", "A3s", "A2s",
            "KQs", "KJs", "KTs", "K9s", "QJs", "QTs", "JTs", "T9s", "98s", "87s", "76s", "65s",
        ])
        // BB
        .default_range(BB, &["AA", "KK", "QQ", "JJ", "TT", "AKs", "AKo"])
        .range(BB, ThreeBet, &[
            "AA", "KK", "QQ", "JJ", "TT", "99", "88",
            "AKs", "AKo", "AQs", "AJs", "ATs", "A9s", "A5s", "A4s", "A3s", "A2s",
            "KQs", "KJs", "KTs", "K9s", "QJs", "QTs", "JTs", "J9s",
            "T9s", "98s", "87s", "76s", "65s", "54s",
        ])
        .range(BB, FourBetPlus, &["AA", "KK", "QQ", "JJ", "AKs", "AKo", "AQs", "A5s", "A4s"])
}

static STANDARD: Lazy<RangeTable> = Lazy::new(|| {
    standard_builder()
        .build()
        .expect("standard range table is authored with canonical, duplicate-free labels")
});

/// The built-in 6-max range table.
pub fn standard_ranges() -> &'static RangeTable {
    &STANDARD
}

/// Canonical range for `position` facing `action` from the built-in table.
pub fn standard_range(position: Position, action: ActionFacingPlayer) -> &'static [HandCombo] {
    STANDARD.lookup(position, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training_engine::combos::is_canonical;

    fn labels(range: &[HandCombo]) -> Vec<&str> {
        range.iter().map(HandCombo::as_str).collect()
    }

    #[test]
    fn lookup_is_total_and_non_empty() {
        for position in Position::ALL {
            for action in ActionFacingPlayer::ALL {
                let range = standard_range(position, action);
                assert!(!range.is_empty(), "empty range for {position:?}/{action:?}");
            }
        }
    }

    #[test]
    fn every_range_is_duplicate_free_and_canonical() {
        for position in Position::ALL {
            for action in ActionFacingPlayer::ALL {
                let range = standard_range(position, action);
                let unique: HashSet<&HandCombo> = range.iter().collect();
                assert_eq!(unique.len(), range.len(), "duplicates in {position:?}/{action:?}");
                for combo in range {
                    assert!(is_canonical(combo.as_str()), "bad label {combo}");
                }
            }
        }
    }

    #[test]
    fn every_position_has_a_bespoke_entry() {
        let table = standard_ranges();
        for position in Position::ALL {
            assert!(
                ActionFacingPlayer::ALL.iter().any(|&a| table.is_authored(position, a)),
                "{position:?} only has its fallback"
            );
        }
    }

    #[test]
    fn unmapped_pairs_fall_back_to_position_default() {
        assert_eq!(
            labels(standard_range(Position::UTG, ActionFacingPlayer::OneRaise)),
            vec!["AA", "KK", "QQ", "AKs", "AKo"]
        );
        assert_eq!(
            labels(standard_range(Position::BTN, ActionFacingPlayer::FourBetPlus)),
            vec!["AA", "KK", "QQ", "JJ", "AKs", "AKo", "AQs"]
        );
        // BB has no unopened spot; it gets its own default.
        assert_eq!(
            labels(standard_range(Position::BB, ActionFacingPlayer::Unopened)),
            vec!["AA", "KK", "QQ", "JJ", "TT", "AKs", "AKo"]
        );
    }

    #[test]
    fn authored_ranges_keep_insertion_order() {
        let utg = labels(standard_range(Position::UTG, ActionFacingPlayer::Unopened));
        assert_eq!(utg.first(), Some(&"AA"));
        assert_eq!(utg.last(), Some(&"AJo"));
        assert_eq!(utg.len(), 13);

        let co_limp = standard_range(Position::CO, ActionFacingPlayer::OneLimp);
        assert_eq!(co_limp.len(), 20);
    }

    #[test]
    fn opening_ranges_widen_towards_the_button() {
        let open = |p| standard_range(p, ActionFacingPlayer::Unopened).len();
        assert!(open(Position::UTG) < open(Position::MP));
        assert!(open(Position::MP) < open(Position::CO));
        assert!(open(Position::CO) < open(Position::BTN));
    }

    #[test]
    fn builder_requires_a_default_per_position() {
        let err = RangeTable::builder()
            .default_range(Position::UTG, TIGHT_DEFAULT)
            .build()
            .unwrap_err();
        assert_eq!(err, RangeError::MissingDefault(Position::MP));
    }

    fn all_defaults() -> RangeTableBuilder {
        Position::ALL
            .iter()
            .fold(RangeTable::builder(), |b, &p| b.default_range(p, TIGHT_DEFAULT))
    }

    #[test]
    fn builder_rejects_duplicates_and_bad_labels() {
        let dup = all_defaults()
            .range(Position::CO, ActionFacingPlayer::OneRaise, &["AA", "AA"])
            .build()
            .unwrap_err();
        assert!(matches!(dup, RangeError::DuplicateCombo { ref combo, .. } if combo == "AA"));

        let bad = all_defaults()
            .range(Position::CO, ActionFacingPlayer::OneRaise, &["KAs"])
            .build()
            .unwrap_err();
        assert!(matches!(bad, RangeError::InvalidCombo(ComboError::NotCanonical(_))));

        let empty = all_defaults()
            .range(Position::SB, ActionFacingPlayer::FoldedTo, &[])
            .build()
            .unwrap_err();
        assert_eq!(
            empty,
            RangeError::EmptyRange { position: Position::SB, action: Some(ActionFacingPlayer::FoldedTo) }
        );
    }

    #[test]
    fn custom_table_lookup() {
        let table = all_defaults()
            .range(Position::BTN, ActionFacingPlayer::OneLimp, &["AA", "A5s"])
            .build()
            .unwrap();
        assert_eq!(labels(table.lookup(Position::BTN, ActionFacingPlayer::OneLimp)), vec!["AA", "A5s"]);
        assert_eq!(table.lookup(Position::BTN, ActionFacingPlayer::Unopened), table.default_range(Position::BTN));
    }
}
