use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Uniform integer generator injected into field generation.
pub trait UniformSource {
    /// Returns a uniformly distributed value in `0..upper`, `upper` is never zero.
    fn next_below(&mut self, upper: CellCount) -> CellCount;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_below(&mut self, upper: CellCount) -> CellCount {
        (**self).next_below(upper)
    }
}

/// Places `mines` mines on a freshly reset grid by rejection sampling.
///
/// A uniform linear index is drawn over the whole grid, occupied picks are simply drawn again. Callers
/// guarantee that `mines` is smaller than the number of cells, so this terminates.
pub(crate) fn place_mines<S: UniformSource + ?Sized>(
    cells: &mut Array2<Cell>,
    mines: CellCount,
    rng: &mut S,
) {
    let (_, cols) = cells.dim();
    let cols = cols as Coord;
    let total_cells: CellCount = cells.len() as CellCount;
    debug_assert!(mines < total_cells);

    let mut mines_to_place = mines;
    let mut draws: u32 = 0;
    while mines_to_place != 0 {
        let index = rng.next_below(total_cells);
        draws += 1;
        let cell = &mut cells[coords_at(index, cols).to_nd_index()];
        if cell.has_mine() {
            continue;
        }
        cell.set_has_mine(true);
        mines_to_place -= 1;
    }

    log::trace!("Placed {} mines with {} draws", mines, draws);
}

#[cfg(test)]
pub(crate) use sequence::SequenceSource;

#[cfg(test)]
mod sequence {
    use super::*;
    use alloc::vec::Vec;

    /// Replays a fixed list of draws, wrapping around at the end.
    #[derive(Clone, Debug)]
    pub(crate) struct SequenceSource {
        values: Vec<CellCount>,
        position: usize,
    }

    impl SequenceSource {
        pub(crate) fn new(values: &[CellCount]) -> Self {
            Self {
                values: values.into(),
                position: 0,
            }
        }

        pub(crate) fn draws(&self) -> usize {
            self.position
        }
    }

    impl UniformSource for SequenceSource {
        fn next_below(&mut self, upper: CellCount) -> CellCount {
            let value = self.values[self.position % self.values.len()];
            self.position += 1;
            value % upper
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_draws_are_redrawn() {
        let mut cells: Array2<Cell> = Array2::default((2, 3));
        let mut rng = SequenceSource::new(&[4, 4, 4, 1]);

        place_mines(&mut cells, 2, &mut rng);

        assert_eq!(rng.draws(), 4);
        assert!(cells[[1, 1]].has_mine());
        assert!(cells[[0, 1]].has_mine());
        assert_eq!(cells.iter().filter(|cell| cell.has_mine()).count(), 2);
    }

    #[test]
    fn fills_all_but_one_cell() {
        let mut cells: Array2<Cell> = Array2::default((3, 3));
        let mut rng = SeededSource::new(7);

        place_mines(&mut cells, 8, &mut rng);

        assert_eq!(cells.iter().filter(|cell| cell.has_mine()).count(), 8);
    }
}
