use std::ops::RangeInclusive;

use tracing::{debug, info, warn};

use crate::{
    grid::Scenario,
    outcome::Outcome,
    sim::{Battle, BattleConfig, DEFAULT_MAX_ROUNDS},
    unit::{Faction, UNIT_DEFAULT_ATTACK},
    Error,
};

pub const DEFAULT_MIN_ATTACK: i32 = 4;
pub const DEFAULT_MAX_ATTACK: i32 = 200;

/// Looks for the lowest attack power that lets `faction` win without a
/// single loss. The other faction keeps `opponent_attack`.
#[derive(Debug, Clone)]
pub struct PowerSearch {
    pub faction: Faction,
    pub range: RangeInclusive<i32>,
    pub opponent_attack: i32,
    pub max_rounds: u32,
}

impl Default for PowerSearch {
    fn default() -> Self {
        Self {
            faction: Faction::Elf,
            range: DEFAULT_MIN_ATTACK..=DEFAULT_MAX_ATTACK,
            opponent_attack: UNIT_DEFAULT_ATTACK,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub attack: i32,
    pub outcome: Outcome,
    /// Number of battles simulated to get here.
    pub trials: usize,
}

impl PowerSearch {
    pub fn config_for(&self, attack: i32) -> BattleConfig {
        BattleConfig {
            max_rounds: self.max_rounds,
            ..BattleConfig::default()
        }
        .with_attack(self.faction.enemy(), self.opponent_attack)
        .with_attack(self.faction, attack)
    }

    /// Simulates one isolated battle at `attack`. `None` means the battle
    /// stalled without a winner.
    pub fn trial(&self, scenario: &Scenario, attack: i32) -> Result<Option<Outcome>, Error> {
        let mut battle = Battle::new(scenario, &self.config_for(attack))?;
        match battle.run() {
            Ok(outcome) => {
                debug!(attack, "{}", outcome);
                Ok(Some(outcome))
            }
            Err(Error::NoWinnerWithinBound { rounds }) => {
                warn!(attack, rounds, "No winner, trial counts as a failure");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_satisfied(&self, outcome: &Outcome) -> bool {
        outcome.winner == self.faction && outcome.is_flawless()
    }

    /// Binary search over `range`.
    ///
    /// Assumes more attack power never hurts the searched faction: once it
    /// wins flawlessly at some power, it does at every higher power too.
    /// Nothing in the rules guarantees that; [`PowerSearch::linear_scan`]
    /// gives the answer without the assumption.
    pub fn binary_search(&self, scenario: &Scenario) -> Result<SearchResult, Error> {
        self.check_attacks()?;
        let (mut lo, mut hi) = (*self.range.start(), *self.range.end());
        if lo > hi {
            return Err(self.not_found());
        }

        let mut trials = 0;
        let mut best = None;
        while lo < hi {
            let attack = lo + (hi - lo) / 2;
            trials += 1;
            match self.trial(scenario, attack)? {
                Some(outcome) if self.is_satisfied(&outcome) => {
                    hi = attack;
                    best = Some((attack, outcome));
                }
                _ => lo = attack + 1,
            }
        }

        let outcome = match best {
            Some((attack, outcome)) if attack == lo => outcome,
            _ => {
                // The upper bound itself was never tried.
                trials += 1;
                match self.trial(scenario, lo)? {
                    Some(outcome) if self.is_satisfied(&outcome) => outcome,
                    _ => return Err(self.not_found()),
                }
            }
        };

        info!(attack = lo, trials, "Binary search done");
        Ok(SearchResult {
            attack: lo,
            outcome,
            trials,
        })
    }

    /// Tries every power in `range` from the bottom up.
    pub fn linear_scan(&self, scenario: &Scenario) -> Result<SearchResult, Error> {
        self.check_attacks()?;
        for (ind, attack) in self.range.clone().enumerate() {
            if let Some(outcome) = self.trial(scenario, attack)? {
                if self.is_satisfied(&outcome) {
                    info!(attack, trials = ind + 1, "Linear scan done");
                    return Ok(SearchResult {
                        attack,
                        outcome,
                        trials: ind + 1,
                    });
                }
            }
        }

        Err(self.not_found())
    }

    // With both bounds positive, `hi - lo` can't overflow.
    fn check_attacks(&self) -> Result<(), Error> {
        match [*self.range.start(), self.opponent_attack]
            .into_iter()
            .find(|a| *a < 1)
        {
            Some(attack) => Err(Error::InvalidAttackPower { attack }),
            None => Ok(()),
        }
    }

    fn not_found(&self) -> Error {
        Error::PowerNotFound {
            min: *self.range.start(),
            max: *self.range.end(),
        }
    }
}
