//! Experience points, levels, achievements and challenges for one player.
//!
//! Every XP award goes through [`PlayerProgress::award_xp`]. Claiming an
//! achievement or completing a challenge pays its reward exactly once; later
//! calls succeed but award nothing.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// XP needed to climb one level.
pub const XP_PER_LEVEL: u64 = 1_000;

/// Level reached with `xp` total experience. Everyone starts at level 1.
pub fn level_for_xp(xp: u64) -> u32 {
    (xp / XP_PER_LEVEL + 1) as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("unknown achievement '{0}'")]
    UnknownAchievement(String),

    #[error("unknown challenge '{0}'")]
    UnknownChallenge(String),

    #[error("achievement '{0}' is already registered")]
    DuplicateAchievement(String),

    #[error("challenge '{0}' is already registered")]
    DuplicateChallenge(String),
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AchievementCategory {
    Training,
    Accuracy,
    Streak,
    Social,
    Special,
}

impl fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AchievementCategory::Training => write!(f, "Training"),
            AchievementCategory::Accuracy => write!(f, "Accuracy"),
            AchievementCategory::Streak   => write!(f, "Streak"),
            AchievementCategory::Social   => write!(f, "Social"),
            AchievementCategory::Special  => write!(f, "Special"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AchievementRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl fmt::Display for AchievementRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AchievementRarity::Common    => write!(f, "Common"),
            AchievementRarity::Rare      => write!(f, "Rare"),
            AchievementRarity::Epic      => write!(f, "Epic"),
            AchievementRarity::Legendary => write!(f, "Legendary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub xp_reward: u32,
    pub category: AchievementCategory,
    pub rarity: AchievementRarity,
    #[serde(default)]
    pub completed: bool,
    /// Set when the achievement is claimed.
    #[serde(default)]
    pub unlocked_at_ms: Option<u64>,
}

impl Achievement {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        xp_reward: u32,
        category: AchievementCategory,
        rarity: AchievementRarity,
    ) -> Self {
        Achievement {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            xp_reward,
            category,
            rarity,
            completed: false,
            unlocked_at_ms: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Challenges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeType {
    Accuracy,
    Speed,
    Volume,
    Streak,
    Learning,
}

impl fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeType::Accuracy => write!(f, "Accuracy"),
            ChallengeType::Speed    => write!(f, "Speed"),
            ChallengeType::Volume   => write!(f, "Volume"),
            ChallengeType::Streak   => write!(f, "Streak"),
            ChallengeType::Learning => write!(f, "Learning"),
        }
    }
}

/// A counted goal, e.g. "play 5 drills today".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub challenge_type: ChallengeType,
    pub target_value: u32,
    /// Never exceeds `target_value`.
    #[serde(default)]
    pub current_progress: u32,
    pub xp_reward: u32,
    #[serde(default)]
    pub completed: bool,
}

impl Challenge {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        challenge_type: ChallengeType,
        target_value: u32,
        xp_reward: u32,
    ) -> Self {
        Challenge {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            challenge_type,
            target_value,
            current_progress: 0,
            xp_reward,
            completed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Player progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub player_id: String,
    pub total_xp: u64,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub challenges: Vec<Challenge>,
}

impl PlayerProgress {
    pub fn new(player_id: impl Into<String>) -> Self {
        PlayerProgress { player_id: player_id.into(), ..Default::default() }
    }

    pub fn level(&self) -> u32 {
        level_for_xp(self.total_xp)
    }

    /// XP earned since the current level started.
    pub fn xp_into_level(&self) -> u64 {
        self.total_xp % XP_PER_LEVEL
    }

    pub fn xp_to_next_level(&self) -> u64 {
        XP_PER_LEVEL - self.xp_into_level()
    }

    /// Add `amount` XP and return the resulting level.
    pub fn award_xp(&mut self, amount: u32) -> u32 {
        let before = self.level();
        self.total_xp = self.total_xp.saturating_add(u64::from(amount));
        let after = self.level();
        if after > before {
            info!(player = %self.player_id, level = after, total_xp = self.total_xp, "level up");
        }
        after
    }

    pub fn add_achievement(&mut self, achievement: Achievement) -> Result<(), ProgressionError> {
        if self.achievements.iter().any(|a| a.id == achievement.id) {
            return Err(ProgressionError::DuplicateAchievement(achievement.id));
        }
        self.achievements.push(achievement);
        Ok(())
    }

    pub fn add_challenge(&mut self, challenge: Challenge) -> Result<(), ProgressionError> {
        if self.challenges.iter().any(|c| c.id == challenge.id) {
            return Err(ProgressionError::DuplicateChallenge(challenge.id));
        }
        self.challenges.push(challenge);
        Ok(())
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    /// Unlock an achievement and return the XP it paid. Already claimed
    /// achievements pay 0 and keep their original unlock time.
    pub fn claim_achievement(&mut self, id: &str, now_ms: u64) -> Result<u32, ProgressionError> {
        let achievement = self
            .achievements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ProgressionError::UnknownAchievement(id.to_string()))?;
        if achievement.completed {
            return Ok(0);
        }
        achievement.completed = true;
        achievement.unlocked_at_ms = Some(now_ms);
        let reward = achievement.xp_reward;
        debug!(player = %self.player_id, achievement = id, reward, "achievement claimed");
        self.award_xp(reward);
        Ok(reward)
    }

    /// Mark a challenge done, fill its progress bar and return the XP it
    /// paid. Completed challenges pay 0.
    pub fn complete_challenge(&mut self, id: &str) -> Result<u32, ProgressionError> {
        let challenge = self
            .challenges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ProgressionError::UnknownChallenge(id.to_string()))?;
        if challenge.completed {
            return Ok(0);
        }
        challenge.completed = true;
        challenge.current_progress = challenge.target_value;
        let reward = challenge.xp_reward;
        debug!(player = %self.player_id, challenge = id, reward, "challenge completed");
        self.award_xp(reward);
        Ok(reward)
    }

    /// Add `delta` to a challenge's progress, capped at its target. Reaching
    /// the target completes the challenge; the XP paid is returned.
    pub fn update_challenge_progress(&mut self, id: &str, delta: u32) -> Result<u32, ProgressionError> {
        let challenge = self
            .challenges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ProgressionError::UnknownChallenge(id.to_string()))?;
        challenge.current_progress = challenge
            .current_progress
            .saturating_add(delta)
            .min(challenge.target_value);
        if challenge.current_progress >= challenge.target_value && !challenge.completed {
            return self.complete_challenge(id);
        }
        Ok(0)
    }
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: u32,
    pub player_id: String,
    pub level: u32,
    pub xp: u64,
    pub weekly_xp: u64,
    pub is_current_player: bool,
}

/// Rank players by total XP, highest first. Ties keep id order so the
/// board is stable.
pub fn leaderboard(players: &[(&PlayerProgress, u64)], current_player: &str) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&(&PlayerProgress, u64)> = players.iter().collect();
    sorted.sort_by(|(a, _), (b, _)| b.total_xp.cmp(&a.total_xp).then_with(|| a.player_id.cmp(&b.player_id)));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, (player, weekly_xp))| LeaderboardEntry {
            rank: i as u32 + 1,
            player_id: player.player_id.clone(),
            level: player.level(),
            xp: player.total_xp,
            weekly_xp: *weekly_xp,
            is_current_player: player.player_id == current_player,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerProgress {
        let mut p = PlayerProgress::new("hero");
        p.add_achievement(Achievement::new(
            "first_drill",
            "First drill",
            100,
            AchievementCategory::Training,
            AchievementRarity::Common,
        ))
        .unwrap();
        p.add_challenge(Challenge::new("daily_volume", "Play 5 drills", ChallengeType::Volume, 5, 250))
            .unwrap();
        p
    }

    #[test]
    fn level_steps_every_thousand_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(999), 1);
        assert_eq!(level_for_xp(1_000), 2);
        assert_eq!(level_for_xp(2_850), 3);

        let mut p = PlayerProgress::new("hero");
        assert_eq!(p.award_xp(950), 1);
        assert_eq!(p.xp_to_next_level(), 50);
        assert_eq!(p.award_xp(100), 2);
        assert_eq!(p.xp_into_level(), 50);
    }

    #[test]
    fn achievement_pays_once() {
        let mut p = player();
        assert_eq!(p.claim_achievement("first_drill", 5_000).unwrap(), 100);
        assert_eq!(p.claim_achievement("first_drill", 9_000).unwrap(), 0);
        assert_eq!(p.total_xp, 100);

        let a = p.achievement("first_drill").unwrap();
        assert!(a.completed);
        assert_eq!(a.unlocked_at_ms, Some(5_000));
    }

    #[test]
    fn completing_a_challenge_fills_progress_and_pays_once() {
        let mut p = player();
        assert_eq!(p.complete_challenge("daily_volume").unwrap(), 250);
        assert_eq!(p.complete_challenge("daily_volume").unwrap(), 0);
        assert_eq!(p.total_xp, 250);
        assert_eq!(p.challenge("daily_volume").unwrap().current_progress, 5);
    }

    #[test]
    fn progress_is_clamped_and_auto_completes() {
        let mut p = player();
        assert_eq!(p.update_challenge_progress("daily_volume", 3).unwrap(), 0);
        assert_eq!(p.challenge("daily_volume").unwrap().current_progress, 3);
        assert!(!p.challenge("daily_volume").unwrap().completed);

        assert_eq!(p.update_challenge_progress("daily_volume", 10).unwrap(), 250);
        let c = p.challenge("daily_volume").unwrap();
        assert_eq!(c.current_progress, 5);
        assert!(c.completed);

        // Further progress on a finished challenge pays nothing.
        assert_eq!(p.update_challenge_progress("daily_volume", 1).unwrap(), 0);
        assert_eq!(p.total_xp, 250);
    }

    #[test]
    fn rewards_can_cross_a_level() {
        let mut p = player();
        p.award_xp(900);
        p.claim_achievement("first_drill", 0).unwrap();
        assert_eq!(p.level(), 2);
    }

    #[test]
    fn unknown_and_duplicate_ids_are_errors() {
        let mut p = player();
        assert_eq!(
            p.claim_achievement("nope", 0).unwrap_err(),
            ProgressionError::UnknownAchievement("nope".to_string())
        );
        assert_eq!(
            p.update_challenge_progress("nope", 1).unwrap_err(),
            ProgressionError::UnknownChallenge("nope".to_string())
        );
        let again = Challenge::new("daily_volume", "Again", ChallengeType::Speed, 1, 10);
        assert_eq!(
            p.add_challenge(again).unwrap_err(),
            ProgressionError::DuplicateChallenge("daily_volume".to_string())
        );
        assert_eq!(p.total_xp, 0);
    }

    #[test]
    fn leaderboard_orders_by_xp() {
        let mut alice = PlayerProgress::new("alice");
        alice.award_xp(3_000);
        let mut bob = PlayerProgress::new("bob");
        bob.award_xp(1_500);
        let mut carol = PlayerProgress::new("carol");
        carol.award_xp(3_000);

        let board = leaderboard(&[(&bob, 200), (&carol, 50), (&alice, 400)], "bob");
        let ids: Vec<&str> = board.iter().map(|e| e.player_id.as_str()).collect();
        assert_eq!(ids, ["alice", "carol", "bob"]);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].level, 4);
        assert_eq!(board[2].rank, 3);
        assert_eq!(board[2].weekly_xp, 200);
        assert!(board[2].is_current_player);
        assert!(!board[0].is_current_player);
    }

    #[test]
    fn progress_serialises_with_catalog_spellings() {
        let json = serde_json::to_string(&player()).unwrap();
        assert!(json.contains("\"VOLUME\""));
        assert!(json.contains("\"COMMON\""));
        let back: PlayerProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, player());
    }
}
