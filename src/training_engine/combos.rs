//! The 169 starting-hand classes and canonical label handling.
//!
//! Labels follow the usual chart notation: the higher rank comes first, pairs
//! have no suffix, non-pairs carry `s` (suited) or `o` (offsuit).

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::training_engine::models::{Card, HandCombo, Rank};

/// Number of distinct starting-hand classes: 13 pairs + 78 suited + 78 offsuit.
pub const COMBO_COUNT: usize = 169;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComboError {
    #[error("combo label '{0}' must be 2 or 3 characters")]
    InvalidLength(String),

    #[error("combo label '{label}' has unknown rank symbol '{symbol}'")]
    UnknownRank { label: String, symbol: char },

    #[error("combo label '{0}' must list the higher rank first")]
    NotCanonical(String),

    #[error("pair '{0}' cannot carry a suited/offsuit suffix")]
    SuffixedPair(String),

    #[error("combo label '{0}' needs an 's' or 'o' suffix")]
    MissingSuffix(String),
}

static UNIVERSE: Lazy<Vec<HandCombo>> = Lazy::new(|| {
    let mut combos = Vec::with_capacity(COMBO_COUNT);
    for (row, &hi) in Rank::DESCENDING.iter().enumerate() {
        for (col, &lo) in Rank::DESCENDING.iter().enumerate() {
            let label = match row.cmp(&col) {
                std::cmp::Ordering::Equal   => format!("{hi}{hi}"),
                // Above the diagonal: suited. Below: offsuit, row rank is the lower one.
                std::cmp::Ordering::Less    => format!("{hi}{lo}s"),
                std::cmp::Ordering::Greater => format!("{lo}{hi}o"),
            };
            combos.push(HandCombo::new(label));
        }
    }
    combos
});

/// Every canonical combo, in 13x13 chart order (row by row, AA first, 22 last).
pub fn all_combos() -> &'static [HandCombo] {
    &UNIVERSE
}

/// True if `label` is one of the 169 canonical combo labels.
pub fn is_canonical(label: &str) -> bool {
    HandCombo::parse(label).is_ok()
}

fn rank_at(label: &str, symbol: char) -> Result<Rank, ComboError> {
    Rank::from_symbol(symbol).ok_or_else(|| ComboError::UnknownRank {
        label: label.to_string(),
        symbol,
    })
}

impl HandCombo {
    /// Parse and validate a canonical combo label such as `"AKs"`, `"T9o"` or `"77"`.
    pub fn parse(label: &str) -> Result<HandCombo, ComboError> {
        let chars: Vec<char> = label.chars().collect();
        if chars.len() != 2 && chars.len() != 3 {
            return Err(ComboError::InvalidLength(label.to_string()));
        }

        let hi = rank_at(label, chars[0])?;
        let lo = rank_at(label, chars[1])?;

        match (hi.cmp(&lo), chars.get(2)) {
            (std::cmp::Ordering::Equal, None) => Ok(HandCombo::new(label)),
            (std::cmp::Ordering::Equal, Some(_)) => Err(ComboError::SuffixedPair(label.to_string())),
            (std::cmp::Ordering::Less, _) => Err(ComboError::NotCanonical(label.to_string())),
            (std::cmp::Ordering::Greater, Some('s' | 'o')) => Ok(HandCombo::new(label)),
            (std::cmp::Ordering::Greater, _) => Err(ComboError::MissingSuffix(label.to_string())),
        }
    }

    /// Normalise two hole cards into their starting-hand class
    /// (e.g. `Kd Ad` -> `"AKs"`, `9c 9h` -> `"99"`).
    pub fn from_cards(a: Card, b: Card) -> HandCombo {
        let (hi, lo) = if a.rank >= b.rank { (a, b) } else { (b, a) };
        if hi.rank == lo.rank {
            return HandCombo::new(format!("{}{}", hi.rank, lo.rank));
        }
        let suffix = if hi.suit == lo.suit { 's' } else { 'o' };
        HandCombo::new(format!("{}{}{}", hi.rank, lo.rank, suffix))
    }

    pub fn is_pair(&self) -> bool {
        self.as_str().len() == 2
    }

    pub fn is_suited(&self) -> bool {
        self.as_str().ends_with('s')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training_engine::models::Suit;
    use std::collections::HashSet;

    fn card(r: u8, s: Suit) -> Card {
        Card { rank: Rank(r), suit: s }
    }

    #[test]
    fn universe_has_169_unique_combos() {
        let all = all_combos();
        assert_eq!(all.len(), COMBO_COUNT);
        let unique: HashSet<&HandCombo> = all.iter().collect();
        assert_eq!(unique.len(), COMBO_COUNT);
        assert_eq!(all.iter().filter(|c| c.is_pair()).count(), 13);
        assert_eq!(all.iter().filter(|c| c.is_suited()).count(), 78);
    }

    #[test]
    fn universe_is_in_chart_order() {
        let all = all_combos();
        assert_eq!(all[0].as_str(), "AA");
        assert_eq!(all[1].as_str(), "AKs");
        assert_eq!(all[13].as_str(), "AKo");
        assert_eq!(all[168].as_str(), "22");
    }

    #[test]
    fn every_universe_label_parses() {
        for combo in all_combos() {
            assert_eq!(HandCombo::parse(combo.as_str()).as_ref(), Ok(combo));
        }
    }

    #[test]
    fn parse_rejects_malformed_labels() {
        assert_eq!(HandCombo::parse("A"), Err(ComboError::InvalidLength("A".into())));
        assert_eq!(HandCombo::parse("AKso"), Err(ComboError::InvalidLength("AKso".into())));
        assert_eq!(
            HandCombo::parse("ak"),
            Err(ComboError::UnknownRank { label: "ak".into(), symbol: 'a' })
        );
        assert_eq!(HandCombo::parse("KAs"), Err(ComboError::NotCanonical("KAs".into())));
        assert_eq!(HandCombo::parse("QQs"), Err(ComboError::SuffixedPair("QQs".into())));
        assert_eq!(HandCombo::parse("AK"), Err(ComboError::MissingSuffix("AK".into())));
        assert_eq!(HandCombo::parse("AKx"), Err(ComboError::MissingSuffix("AKx".into())));
        assert!(!is_canonical("1Ts"));
    }

    #[test]
    fn from_cards_normalises_order_and_suitedness() {
        let suited = HandCombo::from_cards(card(13, Suit::Diamonds), card(14, Suit::Diamonds));
        assert_eq!(suited.as_str(), "AKs");

        let offsuit = HandCombo::from_cards(card(2, Suit::Clubs), card(7, Suit::Hearts));
        assert_eq!(offsuit.as_str(), "72o");

        let pair = HandCombo::from_cards(card(10, Suit::Spades), card(10, Suit::Hearts));
        assert_eq!(pair.as_str(), "TT");
        assert!(pair.is_pair());
    }
}
