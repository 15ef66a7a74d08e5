use super::position::Position;

/// Dense rectangular storage indexed by [`Position`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T>
where
    T: Clone,
{
    #[must_use]
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major index of `pos`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    #[must_use]
    pub fn position_of(&self, index: usize) -> Position {
        let x = i32::try_from(index % self.width).unwrap_or(i32::MAX);
        let y = i32::try_from(index / self.width).unwrap_or(i32::MAX);
        Position::new(x, y)
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    /// Overwrites the cell at `pos`; positions outside the grid are ignored.
    pub fn set(&mut self, pos: Position, value: T) {
        if let Some(i) = self.index_of(pos) {
            self.cells[i] = value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, value)| (self.position_of(i), value))
    }
}

impl Grid<bool> {
    /// Cells whose flag is set, in row-major order.
    pub fn marked(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter().filter(|(_, set)| **set).map(|(pos, _)| pos)
    }

    /// Whether `pos` is set; cells outside the grid read as set.
    ///
    /// Used for walls, where the outside of the board behaves like a wall.
    #[must_use]
    pub fn is_set_or_outside(&self, pos: Position) -> bool {
        self.get(pos).copied().unwrap_or(true)
    }
}
