use std::borrow::Borrow;
use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Card primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suit::Clubs => write!(f, "c"),
            Suit::Diamonds => write!(f, "d"),
            Suit::Hearts => write!(f, "h"),
            Suit::Spades => write!(f, "s"),
        }
    }
}

/// Rank 2..=14 where 14 = Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    /// All thirteen ranks, highest first.
    pub const DESCENDING: [Rank; 13] = [
        Rank(14), Rank(13), Rank(12), Rank(11), Rank(10), Rank(9), Rank(8),
        Rank(7), Rank(6), Rank(5), Rank(4), Rank(3), Rank(2),
    ];

    pub fn symbol(self) -> char {
        match self.0 {
            2 => '2', 3 => '3', 4 => '4', 5 => '5', 6 => '6',
            7 => '7', 8 => '8', 9 => '9', 10 => 'T',
            11 => 'J', 12 => 'Q', 13 => 'K', 14 => 'A',
            _ => '?',
        }
    }

    /// Inverse of [`Rank::symbol`]. Case-sensitive: only upper-case face letters.
    pub fn from_symbol(c: char) -> Option<Rank> {
        let value = match c {
            '2'..='9' => c as u8 - b'0',
            'T' => 10,
            'J' => 11,
            'Q' => 12,
            'K' => 13,
            'A' => 14,
            _ => return None,
        };
        Some(Rank(value))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

// ---------------------------------------------------------------------------
// Hand combos
// ---------------------------------------------------------------------------

/// Label of a starting-hand class: a pair ("QQ"), a suited combo ("AKs") or
/// an offsuit combo ("AKo").
///
/// The evaluator treats labels as opaque, case-sensitive strings. Validation
/// against the 169-combo universe happens where ranges are authored, through
/// [`HandCombo::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandCombo(String);

impl HandCombo {
    /// Wrap a label without validating it.
    pub fn new(label: impl Into<String>) -> Self {
        HandCombo(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandCombo {
    fn from(label: &str) -> Self {
        HandCombo::new(label)
    }
}

impl Borrow<str> for HandCombo {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Table metadata
// ---------------------------------------------------------------------------

/// Seat at a 6-max table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    UTG,
    MP,   // Middle position
    CO,   // Cutoff
    BTN,  // Button
    SB,   // Small Blind
    BB,   // Big Blind
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::UTG, Position::MP, Position::CO,
        Position::BTN, Position::SB, Position::BB,
    ];

    /// Zero-based seat order, UTG first.
    pub fn index(self) -> usize {
        match self {
            Position::UTG => 0,
            Position::MP  => 1,
            Position::CO  => 2,
            Position::BTN => 3,
            Position::SB  => 4,
            Position::BB  => 5,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::UTG => "Under the Gun",
            Position::MP  => "Middle Position",
            Position::CO  => "Cutoff",
            Position::BTN => "Button",
            Position::SB  => "Small Blind",
            Position::BB  => "Big Blind",
        };
        write!(f, "{}", s)
    }
}

/// The preflop action the hero is facing when the decision comes to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionFacingPlayer {
    Unopened,
    FoldedTo,
    OneLimp,
    OneRaise,
    ThreeBet,
    FourBetPlus,
}

impl ActionFacingPlayer {
    pub const ALL: [ActionFacingPlayer; 6] = [
        ActionFacingPlayer::Unopened,
        ActionFacingPlayer::FoldedTo,
        ActionFacingPlayer::OneLimp,
        ActionFacingPlayer::OneRaise,
        ActionFacingPlayer::ThreeBet,
        ActionFacingPlayer::FourBetPlus,
    ];
}

impl fmt::Display for ActionFacingPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionFacingPlayer::Unopened    => "unopened pot",
            ActionFacingPlayer::FoldedTo    => "folded to",
            ActionFacingPlayer::OneLimp     => "one limper",
            ActionFacingPlayer::OneRaise    => "one raise",
            ActionFacingPlayer::ThreeBet    => "3-bet",
            ActionFacingPlayer::FourBetPlus => "4-bet or more",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Drills and sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrillCategory {
    Preflop,
    Postflop,
    HandReading,
    BankrollManagement,
}

impl DrillCategory {
    pub const ALL: [DrillCategory; 4] = [
        DrillCategory::Preflop,
        DrillCategory::Postflop,
        DrillCategory::HandReading,
        DrillCategory::BankrollManagement,
    ];
}

impl fmt::Display for DrillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrillCategory::Preflop            => write!(f, "Preflop"),
            DrillCategory::Postflop           => write!(f, "Postflop"),
            DrillCategory::HandReading        => write!(f, "Hand Reading"),
            DrillCategory::BankrollManagement => write!(f, "Bankroll Management"),
        }
    }
}

/// Request for [`generate_scenario`](crate::training_engine::generate_scenario).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub category: DrillCategory,
    /// `Some(seed)` reproduces the same scenario; `None` seeds from entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl ScenarioRequest {
    pub fn new(category: DrillCategory) -> Self {
        ScenarioRequest { category, rng_seed: None }
    }

    pub fn seeded(category: DrillCategory, seed: u64) -> Self {
        ScenarioRequest { category, rng_seed: Some(seed) }
    }
}

/// One question of a drill: pick the range for this position and action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillScenario {
    pub position: Position,
    pub action: ActionFacingPlayer,
    /// Authored through the range table; the evaluator consumes it directly.
    pub correct_ranges: Vec<HandCombo>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDrill {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: DrillCategory,
    /// 1 (easiest) to 5.
    pub difficulty: u8,
    pub duration_minutes: u32,
    pub scenarios: Vec<DrillScenario>,
    #[serde(default)]
    pub completed: bool,
}

/// Record of one answered scenario inside a [`TrainingSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScenario {
    pub scenario: DrillScenario,
    /// Sorted so records compare and serialise deterministically.
    pub user_ranges: Vec<HandCombo>,
    pub correct_ranges: Vec<HandCombo>,
    pub time_spent_ms: u64,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: String,
    pub drill_id: u32,
    pub category: DrillCategory,
    /// Milliseconds since the Unix epoch.
    pub start_time_ms: u64,
    pub end_time_ms: Option<u64>,
    pub scenarios: Vec<SessionScenario>,
    pub total_correct: u32,
    pub total_questions: u32,
}

impl TrainingSession {
    /// Fraction of questions answered correctly, 0.0 when nothing was asked.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.total_correct as f64 / self.total_questions as f64
        }
    }
}
