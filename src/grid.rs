use crate::error::{Error, Result};
use rayon::prelude::*;
use std::ops::{Index, IndexMut};

/// Offsets of the Moore neighbourhood, row-major, without the center.
const MOORE: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A fixed-size 2-D grid whose edges wrap around.
///
/// `x` ranges over the rows and `y` over the columns. Every coordinate
/// passed to `get`, `set` or `neighbors8` is reduced modulo the dimensions,
/// so no access is ever out of bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToroidalGrid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

impl<T: Clone> ToroidalGrid<T> {
    pub fn new(rows: usize, columns: usize, fill: T) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(Error::EmptyGrid { rows, columns });
        }
        Ok(ToroidalGrid {
            rows,
            columns,
            cells: vec![fill; rows * columns],
        })
    }

    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|cell| *cell = value.clone());
    }
}

impl<T> ToroidalGrid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Reduces a coordinate onto the torus.
    pub fn wrap(&self, x: i64, y: i64) -> (usize, usize) {
        (
            x.rem_euclid(self.rows as i64) as usize,
            y.rem_euclid(self.columns as i64) as usize,
        )
    }

    /// Visits every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / columns, i % columns, cell))
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> + '_ {
        let columns = self.columns;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, cell)| (i / columns, i % columns, cell))
    }

    fn offset(&self, x: i64, y: i64) -> usize {
        let (x, y) = self.wrap(x, y);
        x * self.columns + y
    }
}

impl<T: Copy> ToroidalGrid<T> {
    pub fn get(&self, x: i64, y: i64) -> T {
        self.cells[self.offset(x, y)]
    }

    pub fn set(&mut self, x: i64, y: i64, value: T) {
        let offset = self.offset(x, y);
        self.cells[offset] = value;
    }

    /// The 8 Moore neighbours of `(x, y)`, row-major, each wrapped on its own.
    pub fn neighbors8(&self, x: i64, y: i64) -> [T; 8] {
        // Reduce first so the offsets cannot overflow at the ends of `i64`.
        let (x, y) = self.wrap(x, y);
        let (x, y) = (x as i64, y as i64);
        let center = self.get(x, y);
        let mut neighbors = [center; 8];
        for (n, &(dx, dy)) in neighbors.iter_mut().zip(MOORE.iter()) {
            *n = self.get(x + dx, y + dy);
        }
        neighbors
    }
}

impl<T: Copy + Send + Sync> ToroidalGrid<T> {
    /// Writes the next generation into `next`.
    ///
    /// `rule` only ever sees `self`, so no cell observes a value written in
    /// the same generation. Rows are computed in parallel.
    pub fn evolve_into<F>(&self, next: &mut ToroidalGrid<T>, rule: F)
    where
        F: Fn(&Self, usize, usize) -> T + Sync,
    {
        debug_assert!(
            self.rows == next.rows && self.columns == next.columns,
            "Both buffers must have the same dimensions."
        );
        next.cells
            .par_chunks_mut(self.columns)
            .enumerate()
            .for_each(|(x, row)| {
                for (y, cell) in row.iter_mut().enumerate() {
                    *cell = rule(self, x, y);
                }
            });
    }
}

impl<T> Index<(usize, usize)> for ToroidalGrid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.cells[(x % self.rows) * self.columns + y % self.columns]
    }
}

impl<T> IndexMut<(usize, usize)> for ToroidalGrid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.cells[(x % self.rows) * self.columns + y % self.columns]
    }
}
