use ndarray::Array2;

/// Single coordinate axis used for row/column counts and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells in a `rows` by `cols` grid, at most 255 * 255 so it always fits.
pub const fn cell_count(rows: Coord, cols: Coord) -> CellCount {
    rows as CellCount * cols as CellCount
}

/// Position of the `index`-th cell of a grid `cols` wide, counting row by row.
pub const fn coords_at(index: CellCount, cols: Coord) -> Coord2 {
    let cols = cols as CellCount;
    ((index / cols) as Coord, (index % cols) as Coord)
}

pub trait NeighborIterExt {
    /// Cells touching `center` that lie inside this grid.
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // dimensions are built from `Coord` values, so they always fit
        NeighborIter::new(center, (rows as Coord, cols as Coord))
    }
}

/// Up to eight in-bounds neighbors of a cell, never including the cell itself.
///
/// Walks the 3x3 block around the center clipped to the grid, top row first and left to right
/// within a row.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    first_col: Coord,
    last_row: Coord,
    last_col: Coord,
    next: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, (rows, cols): Coord2) -> Self {
        let (row, col) = center;
        let first_row = row.saturating_sub(1);
        let first_col = col.saturating_sub(1);

        Self {
            center,
            first_col,
            last_row: row.saturating_add(1).min(rows.saturating_sub(1)),
            last_col: col.saturating_add(1).min(cols.saturating_sub(1)),
            next: (rows > 0 && cols > 0).then_some((first_row, first_col)),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (row, col) = self.next?;
            self.next = if col < self.last_col {
                Some((row, col + 1))
            } else if row < self.last_row {
                Some((row + 1, self.first_col))
            } else {
                None
            };

            if (row, col) != self.center {
                return Some((row, col));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_edge_and_interior_neighbor_counts() {
        let bounds = (4, 5);

        assert_eq!(NeighborIter::new((0, 0), bounds).count(), 3);
        assert_eq!(NeighborIter::new((3, 4), bounds).count(), 3);
        assert_eq!(NeighborIter::new((0, 2), bounds).count(), 5);
        assert_eq!(NeighborIter::new((2, 0), bounds).count(), 5);
        assert_eq!(NeighborIter::new((2, 2), bounds).count(), 8);
    }

    #[test]
    fn neighbors_follow_reading_order() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();

        assert_eq!(
            neighbors,
            [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn single_row_grid_only_has_side_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 3), (1, 6)).collect();

        assert_eq!(neighbors, [(0, 2), (0, 4)]);
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn cells_are_numbered_row_by_row() {
        assert_eq!(cell_count(16, 30), 480);
        assert_eq!(cell_count(255, 255), 65025);
        assert_eq!(coords_at(0, 7), (0, 0));
        assert_eq!(coords_at(17, 7), (2, 3));
        assert_eq!(coords_at(6, 7), (0, 6));
    }
}
