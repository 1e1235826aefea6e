//! Screen buffer a game draws into.
//!
//! The grid is addressed `(x, y)`: `x` runs over the first dimension of the
//! game's declared screen size and `y` over the second. Storage is flat, so a
//! screen is always rectangular.

use crate::types::Symbol;

/// 2D grid of symbols with a fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    width: usize,
    height: usize,
    cells: Vec<Symbol>,
}

impl Screen {
    /// Allocate a `width x height` screen filled with `background`.
    pub fn new(width: usize, height: usize, background: Symbol) -> Self {
        Self {
            width,
            height,
            cells: vec![background; width * height],
        }
    }

    /// Build a screen from columns, each column being one value of `x`.
    ///
    /// Returns `None` if the columns differ in length.
    pub fn from_columns<S>(columns: Vec<Vec<S>>) -> Option<Self>
    where
        S: Into<Symbol>,
    {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if columns.iter().any(|c| c.len() != height) {
            return None;
        }

        let mut cells = vec![Symbol::default(); width * height];
        for (x, column) in columns.into_iter().enumerate() {
            for (y, sym) in column.into_iter().enumerate() {
                cells[y * width + x] = sym.into();
            }
        }

        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Symbol> {
        self.idx(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell. Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: usize, y: usize, sym: impl Into<Symbol>) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = sym.into();
        }
    }

    pub fn fill(&mut self, sym: &Symbol) {
        self.cells.fill(sym.clone());
    }

    /// Cells of one output row (fixed `y`), in `x` order.
    pub fn row(&self, y: usize) -> &[Symbol] {
        if y >= self.height {
            return &[];
        }
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate output rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Symbol]> {
        (0..self.height).map(move |y| self.row(y))
    }
}
