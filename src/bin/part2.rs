use anyhow::{Context, Result};
use beverage_bandits::{Faction, Part2CLIArgs, PowerSearch};
use clap::Parser;

fn main() -> Result<()> {
    beverage_bandits::init_logging();
    let args = Part2CLIArgs::parse();
    let scenario = beverage_bandits::read_scenario(&args.input_path).with_context(|| {
        format!(
            "Failed to read map from given file({}).",
            args.input_path.display()
        )
    })?;

    let search = PowerSearch {
        faction: Faction::Elf,
        range: args.min_attack..=args.max_attack,
        opponent_attack: args.goblin_attack,
        max_rounds: args.max_rounds,
    };
    let result = if args.linear {
        search.linear_scan(&scenario)
    } else {
        search.binary_search(&scenario)
    };
    let result =
        result.context("Failed to find an attack power for elves to win without losses.")?;

    println!(
        "Elves need attack power {} to win without losses, found after {} trial(s).",
        result.attack, result.trials
    );
    println!(
        "Combat ends after {} full round(s) with {} total hit point(s) left, the outcome is {}.",
        result.outcome.rounds,
        result.outcome.remaining_hit_points,
        result.outcome.score()
    );

    Ok(())
}
