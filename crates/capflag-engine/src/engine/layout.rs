use std::sync::Arc;

use crate::{
    LayoutError,
    core::{Grid, Position},
};

const DEFAULT_CAPTURE: &str = include_str!("../../layouts/default_capture.lay");

/// A parsed maze.
///
/// Layout text uses one character per cell, top row first:
///
/// | char | meaning |
/// |------|---------|
/// | `%` | wall |
/// | `.` | food |
/// | `o` | capsule (treated as an empty cell) |
/// | `1`-`4` | spawn of agent 0-3 |
/// | space | empty |
#[derive(Debug, Clone)]
pub struct Layout {
    walls: Arc<Grid<bool>>,
    food: Grid<bool>,
    spawns: Vec<Position>,
}

impl Layout {
    /// The 32x18 layout shipped with the crate.
    ///
    /// # Panics
    ///
    /// Panics if the embedded layout text is malformed (never happens).
    #[must_use]
    pub fn default_capture() -> Self {
        Self::parse(DEFAULT_CAPTURE).expect("embedded layout should parse")
    }

    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.chars().count();
        let height = rows.len();

        let mut walls = Grid::filled(width, height, false);
        let mut food = Grid::filled(width, height, false);
        let mut spawns: [Option<Position>; 4] = [None; 4];

        for (line_no, line) in rows.iter().enumerate() {
            let line_width = line.chars().count();
            if line_width != width {
                return Err(LayoutError::RaggedRow {
                    row: line_no,
                    width: line_width,
                    expected: width,
                });
            }
            // Text runs top to bottom, rows count bottom to top.
            let row = height - 1 - line_no;
            for (column, ch) in line.chars().enumerate() {
                let pos = Position::new(
                    i32::try_from(column).unwrap_or(i32::MAX),
                    i32::try_from(row).unwrap_or(i32::MAX),
                );
                match ch {
                    '%' => walls.set(pos, true),
                    '.' => food.set(pos, true),
                    ' ' | 'o' => {}
                    '1'..='4' => {
                        let agent = ch as usize - '1' as usize;
                        if spawns[agent].replace(pos).is_some() {
                            return Err(LayoutError::DuplicateSpawn { agent });
                        }
                    }
                    _ => return Err(LayoutError::UnexpectedChar { ch, column, row }),
                }
            }
        }

        // Agents are numbered without gaps: the highest spawn digit sets the agent count.
        let num_agents = spawns.iter().rposition(Option::is_some).map_or(0, |last| last + 1);
        let spawns = spawns[..num_agents.max(2)]
            .iter()
            .enumerate()
            .map(|(agent, spawn)| spawn.ok_or(LayoutError::MissingSpawn { agent }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            walls: Arc::new(walls),
            food,
            spawns,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.walls.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.walls.height()
    }

    #[must_use]
    pub fn walls(&self) -> &Arc<Grid<bool>> {
        &self.walls
    }

    #[must_use]
    pub fn food(&self) -> &Grid<bool> {
        &self.food
    }

    #[must_use]
    pub fn spawns(&self) -> &[Position] {
        &self.spawns
    }

    #[must_use]
    pub fn num_agents(&self) -> usize {
        self.spawns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = "\
%%%%%%
%1 .2%
%%%%%%
";

    #[test]
    fn test_parse_counts_rows_from_bottom() {
        let layout = Layout::parse(TINY).unwrap();
        assert_eq!(layout.width(), 6);
        assert_eq!(layout.height(), 3);
        assert_eq!(layout.spawns(), &[Position::new(1, 1), Position::new(4, 1)]);
        assert_eq!(layout.food().marked().collect::<Vec<_>>(), vec![Position::new(3, 1)]);
        assert_eq!(layout.walls().get(Position::new(0, 1)), Some(&true));
        assert_eq!(layout.walls().get(Position::new(2, 1)), Some(&false));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Layout::parse("\n\n").unwrap_err(), LayoutError::Empty);
        assert!(matches!(
            Layout::parse("%%%\n%1%%\n").unwrap_err(),
            LayoutError::RaggedRow { row: 1, .. }
        ));
        assert!(matches!(
            Layout::parse("%1x2%\n").unwrap_err(),
            LayoutError::UnexpectedChar { ch: 'x', .. }
        ));
        assert_eq!(
            Layout::parse("%11%2%\n").unwrap_err(),
            LayoutError::DuplicateSpawn { agent: 0 }
        );
        assert_eq!(
            Layout::parse("%1  %\n").unwrap_err(),
            LayoutError::MissingSpawn { agent: 1 }
        );
    }

    #[test]
    fn test_spawn_numbering_must_not_skip() {
        assert_eq!(
            Layout::parse("%1 2 4%\n").unwrap_err(),
            LayoutError::MissingSpawn { agent: 2 }
        );
        assert_eq!(
            Layout::parse("%2 3 4%\n").unwrap_err(),
            LayoutError::MissingSpawn { agent: 0 }
        );
        assert_eq!(Layout::parse("%1 2 3%\n").unwrap().num_agents(), 3);
    }

    #[test]
    fn test_default_capture_is_point_symmetric() {
        let layout = Layout::default_capture();
        let (w, h) = (layout.width(), layout.height());
        assert_eq!((w, h), (32, 18));
        assert_eq!(layout.num_agents(), 4);
        for (pos, wall) in layout.walls().iter() {
            assert_eq!(layout.walls().get(pos.mirrored(w, h)), Some(wall));
        }
        for (pos, food) in layout.food().iter() {
            assert_eq!(layout.food().get(pos.mirrored(w, h)), Some(food));
        }
    }
}
