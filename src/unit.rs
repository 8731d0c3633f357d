use std::fmt::Display;

use crate::grid::Position;

pub type UnitId = usize;

pub const UNIT_DEFAULT_HEALTH: i32 = 200;
pub const UNIT_DEFAULT_ATTACK: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Goblin,
    Elf,
}

impl Faction {
    pub fn all() -> &'static [Faction] {
        static ALL_FACTIONS: [Faction; 2] = [Faction::Goblin, Faction::Elf];

        &ALL_FACTIONS
    }

    pub fn enemy(&self) -> Faction {
        match self {
            Faction::Goblin => Faction::Elf,
            Faction::Elf => Faction::Goblin,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Faction::Goblin => 'G',
            Faction::Elf => 'E',
        }
    }
}

impl Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Unit {
    id: UnitId,
    faction: Faction,
    hit_points: i32,
    attack_power: i32,
    position: Position,
}

impl Unit {
    pub fn new(id: UnitId, faction: Faction, position: Position, attack_power: i32) -> Self {
        Self {
            id,
            faction,
            hit_points: UNIT_DEFAULT_HEALTH,
            attack_power,
            position,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    pub fn attack_power(&self) -> i32 {
        self.attack_power
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Returns true if this hit is the one that killed the unit. Clearing its
    /// cell on the grid is up to the caller.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.is_alive();
        self.hit_points = self.hit_points.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}#{}({}, {} HP)",
            self.faction, self.id, self.position, self.hit_points
        )
    }
}
