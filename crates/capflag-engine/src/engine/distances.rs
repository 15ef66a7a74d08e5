use std::{collections::VecDeque, fmt};

use crate::{
    UnreachableError,
    core::{Action, Grid, Position},
};

/// Shortest-path lengths between cells of a maze.
///
/// Implementations must be symmetric and satisfy the triangle inequality over reachable
/// cells. Asking about a wall, a cell outside the maze or a disconnected pair fails.
pub trait DistanceOracle: fmt::Debug + Send + Sync {
    fn maze_distance(&self, from: Position, to: Position) -> Result<u32, UnreachableError>;
}

/// All-pairs maze distances, precomputed with one breadth-first search per open cell.
///
/// Memory is `O(cells²)`, which stays small for capture layouts (a 32x18 board needs
/// about 1.3 MB).
#[derive(Clone)]
pub struct MazeDistances {
    cells: Grid<Option<usize>>,
    num_open: usize,
    table: Vec<Option<u32>>,
}

impl fmt::Debug for MazeDistances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MazeDistances")
            .field("width", &self.cells.width())
            .field("height", &self.cells.height())
            .field("num_open", &self.num_open)
            .finish_non_exhaustive()
    }
}

impl MazeDistances {
    #[must_use]
    pub fn new(walls: &Grid<bool>) -> Self {
        let mut cells = Grid::filled(walls.width(), walls.height(), None);
        let mut open = vec![];
        for pos in walls.iter().filter(|(_, wall)| !**wall).map(|(pos, _)| pos) {
            cells.set(pos, Some(open.len()));
            open.push(pos);
        }

        let num_open = open.len();
        let mut table = vec![None; num_open * num_open];
        let mut queue = VecDeque::new();
        for (source, start) in open.iter().enumerate() {
            let row = &mut table[source * num_open..(source + 1) * num_open];
            row[source] = Some(0);
            queue.clear();
            queue.push_back((*start, 0));
            while let Some((pos, dist)) = queue.pop_front() {
                for action in Action::ALL.into_iter().filter(|a| !a.is_stop()) {
                    let next = pos.neighbor(action);
                    let Some(Some(id)) = cells.get(next).copied() else {
                        continue;
                    };
                    if row[id].is_none() {
                        row[id] = Some(dist + 1);
                        queue.push_back((next, dist + 1));
                    }
                }
            }
        }

        Self {
            cells,
            num_open,
            table,
        }
    }

    fn id(&self, pos: Position) -> Option<usize> {
        self.cells.get(pos).copied().flatten()
    }
}

/// Open cells connected to `start`; empty when `start` is a wall or outside the maze.
#[must_use]
pub fn reachable_cells(walls: &Grid<bool>, start: Position) -> Grid<bool> {
    let mut seen = Grid::filled(walls.width(), walls.height(), false);
    if walls.is_set_or_outside(start) {
        return seen;
    }
    seen.set(start, true);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for action in Action::ALL.into_iter().filter(|a| !a.is_stop()) {
            let next = pos.neighbor(action);
            if !walls.is_set_or_outside(next) && seen.get(next) == Some(&false) {
                seen.set(next, true);
                queue.push_back(next);
            }
        }
    }
    seen
}

impl DistanceOracle for MazeDistances {
    fn maze_distance(&self, from: Position, to: Position) -> Result<u32, UnreachableError> {
        let unreachable = UnreachableError { from, to };
        let (Some(a), Some(b)) = (self.id(from), self.id(to)) else {
            return Err(unreachable);
        };
        self.table[a * self.num_open + b].ok_or(unreachable)
    }
}
