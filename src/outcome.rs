use std::fmt::Display;

use crate::{sim::Battle, unit::Faction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Faction,
    pub rounds: u32,
    /// Hit points summed over the winner's survivors.
    pub remaining_hit_points: i32,
    /// Units of the winning faction that died.
    pub losses: usize,
}

impl Outcome {
    /// `None` while both factions still stand.
    pub fn from_battle(battle: &Battle) -> Option<Outcome> {
        let winner = battle.winner()?;
        let remaining_hit_points = battle
            .living_units(winner)
            .map(|u| u.hit_points())
            .sum::<i32>();
        let losses = battle
            .units()
            .iter()
            .filter(|u| u.faction() == winner && !u.is_alive())
            .count();

        Some(Outcome {
            winner,
            rounds: battle.rounds(),
            remaining_hit_points,
            losses,
        })
    }

    pub fn score(&self) -> i64 {
        i64::from(self.rounds) * i64::from(self.remaining_hit_points)
    }

    pub fn is_flawless(&self) -> bool {
        self.losses == 0
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} won after {} full round(s) with {} hit point(s) left and {} loss(es), outcome {}",
            self.winner,
            self.rounds,
            self.remaining_hit_points,
            self.losses,
            self.score()
        )
    }
}
