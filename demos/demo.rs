//! Walk through a seeded preflop drill end to end.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Range table**: print the canonical range for a few spots, including
//!    one that falls back to the position default.
//! 2. **Drill**: generate five seeded preflop scenarios and play them with a
//!    deliberately sloppy trainee (drops the last combo, adds a trash hand
//!    every other spot) so different feedback tiers show up.
//! 3. **Analysis**: save the session and print the performance report.

use poker_range_trainer::{
    analyze, generate_scenarios, standard_range, standard_ranges, ActionFacingPlayer,
    AnalysisPeriod, DrillCategory, DrillRepository, DrillSession, HandCombo,
    InMemoryDrillRepository, Position, ScenarioRequest, SessionStep, TrainingDrill,
};

fn print_range(position: Position, action: ActionFacingPlayer) {
    let range = standard_range(position, action);
    let labels: Vec<&str> = range.iter().map(HandCombo::as_str).collect();
    let source = if standard_ranges().is_authored(position, action) { "authored" } else { "default" };
    println!("  {position} / {action} ({source}, {} combos)", range.len());
    println!("    {}", labels.join(" "));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Canonical ranges");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    print_range(Position::UTG, ActionFacingPlayer::Unopened);
    print_range(Position::CO, ActionFacingPlayer::OneLimp);
    print_range(Position::BB, ActionFacingPlayer::FourBetPlus);
    print_range(Position::MP, ActionFacingPlayer::OneRaise);
    println!();

    let drill = TrainingDrill {
        id: 1,
        title: "Seeded preflop drill".to_string(),
        description: "Five random spots at a 6-max table".to_string(),
        category: DrillCategory::Preflop,
        difficulty: 2,
        duration_minutes: 10,
        scenarios: generate_scenarios(ScenarioRequest::seeded(DrillCategory::Preflop, 2024), 5),
        completed: false,
    };
    let mut repo = InMemoryDrillRepository::new(vec![drill.clone()]);

    let start_ms = 1_700_000_000_000u64;
    let mut session = DrillSession::start(drill, start_ms)?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Drill: {}", session.drill().title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    loop {
        let idx = session.current_index();
        let scenario = session.current_scenario().clone();
        println!("  Q{}: {}", idx + 1, scenario.description);

        // Sloppy trainee: skip the last combo, sometimes add a trash hand.
        let keep = scenario.correct_ranges.len().saturating_sub(1);
        for combo in scenario.correct_ranges.iter().take(keep) {
            session.toggle(combo.clone())?;
        }
        if idx % 2 == 1 {
            session.toggle(HandCombo::from("72o"))?;
        }

        let result = session.submit(8_000)?;
        let mark = if result.is_correct { "✓" } else { "✗" };
        println!(
            "    [{mark}] accuracy {:.1}%  precision {:.1}%  {}",
            result.accuracy, result.precision, result.feedback
        );

        if let SessionStep::Complete { accuracy_percent } = session.advance()? {
            println!("  Drill complete: {accuracy_percent:.0}% correct");
            break;
        }
    }
    println!();

    let record = session.finish(start_ms + 60_000);
    repo.save_session(record);

    let report = analyze("demo-player", &repo.history(), AnalysisPeriod::Last7Days, start_ms + 120_000);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Performance");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "  Rank: {:?}  Accuracy: {:.0}%  Streak: {} day(s)",
        report.overall.rank,
        report.overall.average_accuracy * 100.0,
        report.overall.current_streak_days
    );
    for weakness in &report.weaknesses {
        println!("  Weakness ({:?}): {}", weakness.severity, weakness.description);
    }
    for rec in &report.recommendations {
        println!("  [{:?}] {}: {}", rec.priority, rec.title, rec.description);
    }
    Ok(())
}
