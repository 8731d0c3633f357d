use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashSet},
};

use crate::grid::{Grid, Position};

/// Where a unit should head for, and the step it takes this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub target: Position,
    pub distance: usize,
    /// `None` only when the source already is a target.
    pub first_step: Option<Position>,
}

/// Frontier priority: distance first, then the cell in reading order.
///
/// Every cell at distance `d` leaves the frontier before any cell at `d + 1`,
/// and within one distance they leave in reading order. The search relies on
/// both halves of this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierKey {
    distance: usize,
    cell: Position,
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.cell.cmp(&other.cell))
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds the nearest target reachable from `source` through open cells.
///
/// Ties on distance go to the target first in reading order. The returned
/// first step is the neighbor of `source`, first in reading order, that lies
/// on some shortest path to that target. `source` itself doesn't need to be
/// open, it's usually the cell of the unit that's moving.
///
/// Returns `None` if no target can be reached.
pub fn find_route(grid: &Grid, source: Position, targets: &HashSet<Position>) -> Option<Route> {
    if !grid.contains(&source) {
        return None;
    }

    if targets.contains(&source) {
        return Some(Route {
            target: source,
            distance: 0,
            first_step: None,
        });
    }

    let col_n = grid.col_n();
    let cell_n = grid.row_n() * col_n;
    let mut distances = vec![usize::MAX; cell_n];
    let mut first_steps: Vec<Option<Position>> = vec![None; cell_n];
    let mut visited = vec![false; cell_n];
    distances[source.row_major_ind(col_n)] = 0;

    let mut frontier = BinaryHeap::from([Reverse(FrontierKey {
        distance: 0,
        cell: source,
    })]);
    let mut nearest_distance = None;
    let mut reached_targets = Vec::new();
    while let Some(Reverse(cur)) = frontier.pop() {
        // Only targets at the nearest distance can compete, keep draining
        // until the frontier moves past it.
        if nearest_distance.is_some_and(|d| cur.distance > d) {
            break;
        }

        let cur_ind = cur.cell.row_major_ind(col_n);
        if visited[cur_ind] {
            continue;
        }
        visited[cur_ind] = true;

        if targets.contains(&cur.cell) {
            nearest_distance = Some(cur.distance);
            reached_targets.push(cur.cell);
            continue;
        }

        let next_distance = cur.distance + 1;
        for next in grid
            .neighbors(&cur.cell)
            .into_iter()
            .filter(|p| grid.is_open(p))
        {
            let next_ind = next.row_major_ind(col_n);
            if visited[next_ind] {
                continue;
            }

            // Cells next to the source start their own branch.
            let step = first_steps[cur_ind].unwrap_or(next);
            if next_distance < distances[next_ind] {
                distances[next_ind] = next_distance;
                first_steps[next_ind] = Some(step);
                frontier.push(Reverse(FrontierKey {
                    distance: next_distance,
                    cell: next,
                }));
            } else if next_distance == distances[next_ind]
                && first_steps[next_ind].is_some_and(|s| step < s)
            {
                first_steps[next_ind] = Some(step);
            }
        }
    }

    let distance = nearest_distance?;
    reached_targets.into_iter().min().map(|target| Route {
        target,
        distance,
        first_step: first_steps[target.row_major_ind(col_n)],
    })
}
