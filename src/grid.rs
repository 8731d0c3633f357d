use std::{cmp::Ordering, fmt::Display, str::FromStr};

use crate::{
    unit::{Faction, UnitId},
    Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub r: usize,
    pub c: usize,
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    // Up, left, right, down. Positions past the far edges are kept, callers
    // check them against the grid.
    pub fn neighbor_4(&self) -> Vec<Position> {
        let mut res = Vec::with_capacity(4);
        if self.r > 0 {
            res.push(Position::new(self.r - 1, self.c));
        }
        if self.c > 0 {
            res.push(Position::new(self.r, self.c - 1));
        }
        res.push(Position::new(self.r, self.c + 1));
        res.push(Position::new(self.r + 1, self.c));
        res
    }

    pub fn check_board_dist(&self, other: &Position) -> usize {
        self.r.abs_diff(other.r) + self.c.abs_diff(other.c)
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.check_board_dist(other) == 1
    }

    pub(crate) fn row_major_ind(&self, col_n: usize) -> usize {
        self.r * col_n + self.c
    }
}

/// Reading order: top to bottom, then left to right.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.r.cmp(&other.r).then_with(|| self.c.cmp(&other.c))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
    Unit(UnitId),
}

#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    row_n: usize,
    col_n: usize,
}

impl Grid {
    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.r < self.row_n && pos.c < self.col_n
    }

    /// `None` when `pos` lies outside of the grid.
    pub fn cell(&self, pos: &Position) -> Option<Cell> {
        if self.contains(pos) {
            self.cells.get(pos.row_major_ind(self.col_n)).copied()
        } else {
            None
        }
    }

    pub fn is_open(&self, pos: &Position) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    pub fn set_open(&mut self, pos: &Position) {
        if let Some(cell) = self.cell_mut(pos) {
            *cell = Cell::Open;
        }
    }

    pub fn place_unit(&mut self, id: UnitId, pos: &Position) -> Result<(), Error> {
        match self.cell_mut(pos) {
            Some(cell) if *cell == Cell::Open => {
                *cell = Cell::Unit(id);
                Ok(())
            }
            _ => Err(Error::InvalidMoveTarget { position: *pos }),
        }
    }

    pub fn neighbors(&self, pos: &Position) -> Vec<Position> {
        pos.neighbor_4()
    }

    pub fn render<F: Fn(UnitId) -> char>(&self, unit_glyph: F) -> String {
        let mut text = String::with_capacity(self.row_n * (self.col_n + 1));
        for (ind, cell) in self.cells.iter().enumerate() {
            if ind > 0 && ind % self.col_n == 0 {
                text.push('\n');
            }
            text.push(match cell {
                Cell::Wall => '#',
                Cell::Open => '.',
                Cell::Unit(id) => unit_glyph(*id),
            });
        }

        text
    }

    fn cell_mut(&mut self, pos: &Position) -> Option<&mut Cell> {
        if self.contains(pos) {
            self.cells.get_mut(pos.row_major_ind(self.col_n))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub faction: Faction,
    pub position: Position,
}

/// A parsed map: the fixed wall layout plus where each unit starts.
#[derive(Debug, Clone)]
pub struct Scenario {
    grid: Grid,
    spawns: Vec<Spawn>,
}

impl Scenario {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut builder = ScenarioBuilder::new();
        for line in text.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }

    /// The layout without any unit on it.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Spawns in reading order; a unit's id is its index here.
    pub fn spawns(&self) -> &[Spawn] {
        &self.spawns
    }

    pub fn unit_count(&self, faction: Faction) -> usize {
        self.spawns.iter().filter(|s| s.faction == faction).count()
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut grid = self.grid.clone();
        for (id, spawn) in self.spawns.iter().enumerate() {
            grid.place_unit(id, &spawn.position).map_err(|_| std::fmt::Error)?;
        }

        write!(f, "{}", grid.render(|id| self.spawns[id].faction.glyph()))
    }
}

#[derive(Debug)]
pub(crate) struct ScenarioBuilder {
    cells: Vec<Cell>,
    spawns: Vec<Spawn>,
    row_n: usize,
    col_n: Option<usize>,
    blank_after_rows: bool,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            spawns: Vec::new(),
            row_n: 0,
            col_n: None,
            blank_after_rows: false,
        }
    }

    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let text = text.trim_end_matches('\r');
        // Blank lines only before or after the map.
        if text.is_empty() {
            self.blank_after_rows = self.row_n > 0;
            return Ok(());
        }
        if self.blank_after_rows {
            return Err(Error::RowAfterBlankLine { row: self.row_n });
        }

        let this_col_n = text.chars().count();
        let expected = *self.col_n.get_or_insert(this_col_n);
        if expected != this_col_n {
            return Err(Error::InconsistentRow {
                expected,
                given: this_col_n,
            });
        }

        for (col_ind, c) in text.chars().enumerate() {
            let position = Position::new(self.row_n, col_ind);
            self.cells.push(match c {
                '#' => Cell::Wall,
                '.' => Cell::Open,
                'G' | 'E' => {
                    let faction = if c == 'G' {
                        Faction::Goblin
                    } else {
                        Faction::Elf
                    };
                    self.spawns.push(Spawn { faction, position });
                    Cell::Open
                }
                other => return Err(Error::InvalidMapCharacter { c: other, position }),
            });
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Scenario, Error> {
        let Some(col_n) = self.col_n else {
            return Err(Error::EmptyMap);
        };

        Ok(Scenario {
            grid: Grid {
                cells: self.cells,
                row_n: self.row_n,
                col_n,
            },
            spawns: self.spawns,
        })
    }
}
