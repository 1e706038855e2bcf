use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::training_engine::{
    models::{ActionFacingPlayer, DrillCategory, DrillScenario, HandCombo, Position, ScenarioRequest},
    range_table::standard_range,
};

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

fn combos(labels: &[&str]) -> Vec<HandCombo> {
    labels.iter().map(|&l| HandCombo::from(l)).collect()
}

/// Core dispatch: builds one scenario for the requested category.
///
/// Preflop scenarios draw a random seat and action and take their answer
/// from the standard range table. The other categories have a single fixed
/// spot each.
pub fn generate_scenario(request: ScenarioRequest) -> DrillScenario {
    let mut rng = make_rng(request.rng_seed);
    let scenario = scenario_for(&mut rng, request.category);
    debug!(
        category = %request.category,
        position = ?scenario.position,
        action = ?scenario.action,
        combos = scenario.correct_ranges.len(),
        "generated scenario"
    );
    scenario
}

/// Generate `count` scenarios from one RNG stream, so a seeded request
/// yields the same drill every time.
pub fn generate_scenarios(request: ScenarioRequest, count: usize) -> Vec<DrillScenario> {
    let mut rng = make_rng(request.rng_seed);
    (0..count).map(|_| scenario_for(&mut rng, request.category)).collect()
}

fn scenario_for<R: Rng>(rng: &mut R, category: DrillCategory) -> DrillScenario {
    match category {
        DrillCategory::Preflop => preflop(rng),

        DrillCategory::Postflop => DrillScenario {
            position: Position::BTN,
            action: ActionFacingPlayer::Unopened,
            correct_ranges: combos(&["AA", "KK", "QQ"]),
            description: "Complex postflop spot".to_string(),
        },

        DrillCategory::HandReading => DrillScenario {
            position: Position::BB,
            action: ActionFacingPlayer::ThreeBet,
            correct_ranges: combos(&["AA", "KK", "AKs"]),
            description: "Identify the opponent's range".to_string(),
        },

        DrillCategory::BankrollManagement => DrillScenario {
            position: Position::UTG,
            action: ActionFacingPlayer::Unopened,
            correct_ranges: Vec::new(),
            description: "Bankroll management decision".to_string(),
        },
    }
}

fn preflop<R: Rng>(rng: &mut R) -> DrillScenario {
    let position = Position::ALL[rng.gen_range(0..Position::ALL.len())];
    let action = ActionFacingPlayer::ALL[rng.gen_range(0..ActionFacingPlayer::ALL.len())];
    DrillScenario {
        position,
        action,
        correct_ranges: standard_range(position, action).to_vec(),
        description: format!("Select your range: {action} from the {position}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_requests_are_deterministic() {
        for seed in [1u64, 42, 999, 123_456] {
            let a = generate_scenario(ScenarioRequest::seeded(DrillCategory::Preflop, seed));
            let b = generate_scenario(ScenarioRequest::seeded(DrillCategory::Preflop, seed));
            assert_eq!(a, b, "seed {seed} produced different scenarios");
        }
    }

    #[test]
    fn preflop_answer_comes_from_range_table() {
        for seed in 0..50u64 {
            let s = generate_scenario(ScenarioRequest::seeded(DrillCategory::Preflop, seed));
            assert_eq!(s.correct_ranges, standard_range(s.position, s.action));
            assert!(!s.correct_ranges.is_empty());
            assert!(!s.description.is_empty());
        }
    }

    #[test]
    fn preflop_seeds_cover_several_spots() {
        let spots: std::collections::HashSet<_> = (0..100u64)
            .map(|seed| {
                let s = generate_scenario(ScenarioRequest::seeded(DrillCategory::Preflop, seed));
                (s.position, s.action)
            })
            .collect();
        assert!(spots.len() > 5, "only {} distinct spots across 100 seeds", spots.len());
    }

    #[test]
    fn fixed_categories_use_their_spot() {
        let hr = generate_scenario(ScenarioRequest::new(DrillCategory::HandReading));
        assert_eq!(hr.position, Position::BB);
        assert_eq!(hr.action, ActionFacingPlayer::ThreeBet);

        let bankroll = generate_scenario(ScenarioRequest::new(DrillCategory::BankrollManagement));
        assert!(bankroll.correct_ranges.is_empty());
    }

    #[test]
    fn batch_generation_is_deterministic_and_sized() {
        let req = ScenarioRequest::seeded(DrillCategory::Preflop, 7);
        let a = generate_scenarios(req.clone(), 10);
        let b = generate_scenarios(req, 10);
        assert_eq!(a.len(), 10);
        assert_eq!(a, b);
    }
}
