use std::{collections::HashSet, fmt::Display};

use tracing::{debug, trace, warn};

use crate::{
    grid::{Cell, Grid, Position, Scenario},
    outcome::Outcome,
    path,
    unit::{Faction, Unit, UnitId, UNIT_DEFAULT_ATTACK},
    Error,
};

pub const DEFAULT_MAX_ROUNDS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleConfig {
    pub elf_attack: i32,
    pub goblin_attack: i32,
    pub max_rounds: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            elf_attack: UNIT_DEFAULT_ATTACK,
            goblin_attack: UNIT_DEFAULT_ATTACK,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl BattleConfig {
    pub fn attack_of(&self, faction: Faction) -> i32 {
        match faction {
            Faction::Elf => self.elf_attack,
            Faction::Goblin => self.goblin_attack,
        }
    }

    pub fn with_attack(mut self, faction: Faction, attack: i32) -> Self {
        match faction {
            Faction::Elf => self.elf_attack = attack,
            Faction::Goblin => self.goblin_attack = attack,
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundReport {
    Completed { moves: usize, attacks: usize },
    /// Some unit found no enemy left on its turn; the round doesn't count.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    NoEnemies,
    Acted { moved: bool, attacked: bool },
}

#[derive(Debug, Clone)]
pub struct Battle {
    grid: Grid,
    units: Vec<Unit>,
    rounds: u32,
    max_rounds: u32,
}

impl Battle {
    pub fn new(scenario: &Scenario, config: &BattleConfig) -> Result<Self, Error> {
        if scenario.spawns().is_empty() {
            return Err(Error::NoUnits);
        }
        if let Some(attack) = [config.elf_attack, config.goblin_attack]
            .into_iter()
            .find(|a| *a < 1)
        {
            return Err(Error::InvalidAttackPower { attack });
        }

        let mut grid = scenario.grid().clone();
        let mut units = Vec::with_capacity(scenario.spawns().len());
        for (id, spawn) in scenario.spawns().iter().enumerate() {
            grid.place_unit(id, &spawn.position)?;
            units.push(Unit::new(
                id,
                spawn.faction,
                spawn.position,
                config.attack_of(spawn.faction),
            ));
        }

        Ok(Self {
            grid,
            units,
            rounds: 0,
            max_rounds: config.max_rounds,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Full rounds completed so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn living_units(&self, faction: Faction) -> impl Iterator<Item = &Unit> + '_ {
        self.units
            .iter()
            .filter(move |u| u.is_alive() && u.faction() == faction)
    }

    pub fn is_over(&self) -> bool {
        Faction::all()
            .iter()
            .any(|f| self.living_units(*f).next().is_none())
    }

    /// The only faction with living units, if it has come to that.
    pub fn winner(&self) -> Option<Faction> {
        let mut alive = Faction::all()
            .iter()
            .filter(|f| self.living_units(**f).next().is_some());
        match (alive.next(), alive.next()) {
            (Some(faction), None) => Some(*faction),
            _ => None,
        }
    }

    /// Runs rounds until one faction is wiped out.
    ///
    /// Gives up with [`Error::NoWinnerWithinBound`] once the round cap is hit,
    /// or as soon as a full round passes with nobody moving or attacking:
    /// nothing can change after such a round.
    pub fn run(&mut self) -> Result<Outcome, Error> {
        while !self.is_over() {
            if self.rounds >= self.max_rounds {
                warn!(rounds = self.rounds, "Round cap reached without a winner");
                return Err(Error::NoWinnerWithinBound {
                    rounds: self.rounds,
                });
            }

            if let RoundReport::Completed {
                moves: 0,
                attacks: 0,
            } = self.run_round()?
            {
                warn!(rounds = self.rounds, "Stalemate, no unit can reach an enemy");
                return Err(Error::NoWinnerWithinBound {
                    rounds: self.rounds,
                });
            }
        }

        Outcome::from_battle(self).ok_or(Error::NoUnits)
    }

    pub fn run_round(&mut self) -> Result<RoundReport, Error> {
        // Taken once; units killed later in this round are skipped below.
        let mut turn_order = self
            .units
            .iter()
            .filter(|u| u.is_alive())
            .map(|u| u.id())
            .collect::<Vec<_>>();
        turn_order.sort_unstable_by_key(|id| self.units[*id].position());

        let (mut moves, mut attacks) = (0, 0);
        for id in turn_order {
            if !self.units[id].is_alive() {
                continue;
            }

            match self.take_turn(id)? {
                Turn::NoEnemies => {
                    debug!(
                        round = self.rounds + 1,
                        "{} finds no enemy, combat ends", self.units[id]
                    );
                    return Ok(RoundReport::Abandoned);
                }
                Turn::Acted { moved, attacked } => {
                    moves += usize::from(moved);
                    attacks += usize::from(attacked);
                }
            }
        }

        self.rounds += 1;
        debug!(round = self.rounds, moves, attacks, "Round completed");
        trace!("After round {}:\n{}", self.rounds, self);
        Ok(RoundReport::Completed { moves, attacks })
    }

    fn take_turn(&mut self, id: UnitId) -> Result<Turn, Error> {
        let enemy = self.units[id].faction().enemy();
        if self.living_units(enemy).next().is_none() {
            return Ok(Turn::NoEnemies);
        }

        let mut moved = false;
        if self.adjacent_enemy(id).is_none() {
            if let Some(step) = self.plan_move(id) {
                self.move_unit(id, step)?;
                moved = true;
            }
        }

        let attacked = match self.adjacent_enemy(id) {
            Some(target_id) => {
                self.attack(id, target_id);
                true
            }
            None => false,
        };

        Ok(Turn::Acted { moved, attacked })
    }

    fn plan_move(&self, id: UnitId) -> Option<Position> {
        let unit = &self.units[id];
        let in_range = self
            .living_units(unit.faction().enemy())
            .flat_map(|e| self.grid.neighbors(&e.position()))
            .filter(|p| self.grid.is_open(p))
            .collect::<HashSet<_>>();

        path::find_route(&self.grid, unit.position(), &in_range).and_then(|route| route.first_step)
    }

    /// The weakest enemy next to unit `id`, ties go to the first in reading
    /// order.
    fn adjacent_enemy(&self, id: UnitId) -> Option<UnitId> {
        let unit = &self.units[id];
        self.grid
            .neighbors(&unit.position())
            .into_iter()
            .filter_map(|p| match self.grid.cell(&p) {
                Some(Cell::Unit(other_id)) => Some(&self.units[other_id]),
                _ => None,
            })
            .filter(|other| other.is_alive() && other.faction() != unit.faction())
            .min_by_key(|other| (other.hit_points(), other.position()))
            .map(|other| other.id())
    }

    fn move_unit(&mut self, id: UnitId, to_position: Position) -> Result<(), Error> {
        let from_position = self.units[id].position();
        debug_assert!(
            from_position.is_adjacent(&to_position) && self.grid.is_open(&to_position),
            "{} can't move to {}",
            self.units[id],
            to_position
        );

        self.grid.place_unit(id, &to_position)?;
        self.grid.set_open(&from_position);
        self.units[id].set_position(to_position);
        trace!("{} moves from {}", self.units[id], from_position);
        Ok(())
    }

    fn attack(&mut self, attacker_id: UnitId, target_id: UnitId) {
        let damage = self.units[attacker_id].attack_power();
        let killed = self.units[target_id].take_damage(damage);
        trace!("{} attacks {}", self.units[attacker_id], self.units[target_id]);
        if killed {
            let position = self.units[target_id].position();
            self.grid.set_open(&position);
            debug!(
                round = self.rounds + 1,
                "{} is killed by {}", self.units[target_id], self.units[attacker_id]
            );
        }
    }
}

impl Display for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.grid.render(|id| self.units[id].faction().glyph())
        )
    }
}
