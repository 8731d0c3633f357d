use anyhow::{Context, Result};
use beverage_bandits::{Battle, BattleConfig, Part1CLIArgs};
use clap::Parser;

fn main() -> Result<()> {
    beverage_bandits::init_logging();
    let args = Part1CLIArgs::parse();
    let scenario = beverage_bandits::read_scenario(&args.input_path).with_context(|| {
        format!(
            "Failed to read map from given file({}).",
            args.input_path.display()
        )
    })?;

    let config = BattleConfig {
        elf_attack: args.elf_attack,
        goblin_attack: args.goblin_attack,
        max_rounds: args.max_rounds,
    };
    let mut battle = Battle::new(&scenario, &config)?;
    let outcome = battle
        .run()
        .context("Failed to simulate the combat to its end.")?;

    println!(
        "Combat ends after {} full round(s), winner is {} with {} total hit point(s) left, losing {} unit(s).",
        outcome.rounds, outcome.winner, outcome.remaining_hit_points, outcome.losses
    );
    println!("The outcome of the combat is {}.", outcome.score());

    Ok(())
}
