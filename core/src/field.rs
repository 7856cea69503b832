use alloc::vec;
use core::num::Saturating;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl FieldState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// The whole grid of one game, together with the pointer interaction in progress.
///
/// Primary press/release reveals a single cell, the secondary action toggles flags and the chord
/// press/move/release triple reveals the neighborhood of a numbered cell. Every mutating call reports
/// what changed as [`FieldEvents`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    cells: Array2<Cell>,
    mine_count: CellCount,
    unrevealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: FieldState,
    triggered_mine: Option<Coord2>,
    pressed_cell: Option<Coord2>,
    chord_anchor: Option<Coord2>,
}

impl MineField {
    pub fn generate<S: UniformSource + ?Sized>(
        rows: Coord,
        cols: Coord,
        mines: CellCount,
        rng: &mut S,
    ) -> Result<Self> {
        let mut field = Self::empty();
        field.regenerate(rows, cols, mines, rng)?;
        Ok(field)
    }

    pub fn from_config<S: UniformSource + ?Sized>(
        config: &GameConfig,
        rng: &mut S,
    ) -> Result<Self> {
        Self::generate(config.rows, config.cols, config.mines, rng)
    }

    /// Builds a field with mines at exactly `mines`, duplicates are counted once.
    pub fn with_mines(rows: Coord, cols: Coord, mines: &[Coord2]) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyField);
        }

        let mut cells: Array2<Cell> = Array2::default((rows, cols).to_nd_index());
        for &coords in mines {
            if coords.0 >= rows || coords.1 >= cols {
                return Err(GameError::InvalidCoords);
            }
            cells[coords.to_nd_index()].set_has_mine(true);
        }
        let mine_count = cells.iter().filter(|cell| cell.has_mine()).count() as CellCount;
        GameConfig::new(rows, cols, mine_count).validate()?;

        let mut field = Self::empty();
        field.cells = cells;
        field.compute_digits();
        field.restart(mine_count);
        Ok(field)
    }

    fn empty() -> Self {
        Self {
            cells: Array2::default((0, 0)),
            mine_count: 0,
            unrevealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: FieldState::Playing,
            triggered_mine: None,
            pressed_cell: None,
            chord_anchor: None,
        }
    }

    /// Starts a new game, reusing the cell storage when the size is unchanged.
    ///
    /// Fails without touching the current game when the grid is empty or `mines` does not leave at
    /// least one safe cell.
    pub fn regenerate<S: UniformSource + ?Sized>(
        &mut self,
        rows: Coord,
        cols: Coord,
        mines: CellCount,
        rng: &mut S,
    ) -> Result<FieldEvents> {
        GameConfig::new(rows, cols, mines).validate()?;

        let shape = (rows, cols).to_nd_index();
        if self.cells.dim() == (shape[0], shape[1]) {
            self.cells.iter_mut().for_each(Cell::reset);
        } else {
            self.cells = Array2::default(shape);
        }

        place_mines(&mut self.cells, mines, rng);
        self.compute_digits();
        self.restart(mines);
        log::debug!("Regenerated {}x{} field with {} mines", rows, cols, mines);

        Ok(smallvec![FieldEvent::FlagCountChanged(0)])
    }

    fn compute_digits(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self[coords].has_mine() {
                    continue;
                }
                let digit = self
                    .neighbors(coords)
                    .filter(|&pos| self[pos].has_mine())
                    .count();
                self.cell_mut(coords).set_digit(digit as u8);
            }
        }
    }

    fn restart(&mut self, mines: CellCount) {
        self.mine_count = mines;
        self.unrevealed_count = Saturating(self.cells.len() as CellCount);
        self.flagged_count = Saturating(0);
        self.state = FieldState::Playing;
        self.triggered_mine = None;
        self.pressed_cell = None;
        self.chord_anchor = None;
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.unrevealed_count.0
    }

    /// Mines not accounted for by a flag, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count.0 as isize)
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn pressed_cell(&self) -> Option<Coord2> {
        self.pressed_cell
    }

    pub fn chord_anchor(&self) -> Option<Coord2> {
        self.chord_anchor
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_view(&self, coords: Coord2) -> CellView {
        if self.triggered_mine == Some(coords) {
            CellView::Exploded
        } else {
            self[coords].view()
        }
    }

    pub fn apply(&mut self, action: Action) -> Result<FieldEvents> {
        match action {
            Action::PrimaryPress(coords) => self.primary_press(coords).map(|()| FieldEvents::new()),
            Action::PrimaryRelease(coords) => self.primary_release(coords),
            Action::Secondary(coords) => self.secondary_action(coords),
            Action::ChordPress(coords) => self.chord_press(coords).map(|()| FieldEvents::new()),
            Action::ChordMove(coords) => self.chord_move(coords).map(|()| FieldEvents::new()),
            Action::ChordRelease(coords) => self.chord_release(coords),
        }
    }

    pub fn primary_press(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if self.is_locked() || self.chord_anchor.is_some() {
            return Ok(());
        }

        if let Some(previous) = self.pressed_cell.replace(coords) {
            if previous != coords {
                self.cell_mut(previous).undo_press();
            }
        }
        self.cell_mut(coords).press();
        Ok(())
    }

    /// Releases the cell pressed by [`MineField::primary_press`], wherever the pointer is now.
    pub fn primary_release(&mut self, coords: Coord2) -> Result<FieldEvents> {
        self.validate_coords(coords)?;
        let mut events = FieldEvents::new();
        if self.is_locked() || self.chord_anchor.is_some() {
            return Ok(events);
        }

        let Some(pressed) = self.pressed_cell.take() else {
            return Ok(events);
        };
        if !self[pressed].is_revealed() && self.cell_mut(pressed).release(false) {
            self.on_cell_revealed(pressed, &mut events);
        }
        Ok(events)
    }

    /// Toggles a flag, a pending primary press is cancelled.
    pub fn secondary_action(&mut self, coords: Coord2) -> Result<FieldEvents> {
        let coords = self.validate_coords(coords)?;
        let mut events = FieldEvents::new();
        if self.is_locked() || self.chord_anchor.is_some() {
            return Ok(events);
        }

        if let Some(pressed) = self.pressed_cell.take() {
            self.cell_mut(pressed).undo_press();
        }

        let cell = self.cell_mut(coords);
        let was_flagged = cell.is_flagged();
        cell.mark();
        let is_flagged = cell.is_flagged();

        if was_flagged != is_flagged {
            if is_flagged {
                self.flagged_count += 1;
            } else {
                self.flagged_count -= 1;
            }
            events.push(FieldEvent::FlagCountChanged(self.flagged_count.0));
        }
        Ok(events)
    }

    pub fn chord_press(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if self.is_locked() {
            return Ok(());
        }

        if let Some(previous) = self.chord_anchor.replace(coords) {
            self.undo_press_around(previous);
        }
        self.press_around(coords);
        Ok(())
    }

    pub fn chord_move(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if self.is_locked() {
            return Ok(());
        }

        match self.chord_anchor {
            Some(anchor) if anchor != coords => {
                self.undo_press_around(anchor);
                self.press_around(coords);
                self.chord_anchor = Some(coords);
            }
            _ => {}
        }
        Ok(())
    }

    /// Reveals every unflagged neighbor when the flagged neighbors match the mined ones.
    ///
    /// Only the counts are compared: a misplaced flag still lets the chord go through and opens the
    /// unflagged mine.
    pub fn chord_release(&mut self, coords: Coord2) -> Result<FieldEvents> {
        let coords = self.validate_coords(coords)?;
        let mut events = FieldEvents::new();
        let anchor = self.chord_anchor.take();
        if self.is_locked() {
            return Ok(events);
        }

        if let Some(anchor) = anchor.filter(|&anchor| anchor != coords) {
            log::warn!("Chord anchored at {:?} released at {:?}", anchor, coords);
            self.undo_press_around(anchor);
        }

        if !self[coords].is_revealed() {
            self.undo_press_around(coords);
            return Ok(events);
        }

        let (flags, mines) = self
            .neighbors(coords)
            .map(|pos| self[pos])
            .fold((0u8, 0u8), |(flags, mines), cell| {
                (
                    flags + u8::from(cell.is_flagged()),
                    mines + u8::from(cell.has_mine()),
                )
            });
        log::trace!("Chord at {:?}: {} flags, {} mines", coords, flags, mines);

        if flags == mines && flags != 0 {
            for pos in self.neighbors(coords) {
                if self.is_locked() {
                    break;
                }
                if !self[pos].is_revealed() && self.cell_mut(pos).release(true) {
                    self.on_cell_revealed(pos, &mut events);
                }
            }
        }
        self.undo_press_around(coords);
        Ok(events)
    }

    fn on_cell_revealed(&mut self, coords: Coord2, events: &mut FieldEvents) {
        self.unrevealed_count -= 1;
        let cell = self[coords];
        log::debug!("Revealed cell at {:?}: {:?}", coords, cell.view());

        if cell.has_mine() {
            self.triggered_mine = Some(coords);
            self.disclose_mines();
        } else if cell.digit() == 0 {
            self.flood_reveal(coords);
        }
        debug_assert_eq!(
            cell.has_mine(),
            self.cells.iter().any(|cell| cell.is_exploded())
        );

        if cell.has_mine() {
            self.end_game(false, events);
        } else if self.unrevealed_count.0 == self.mine_count {
            self.end_game(true, events);
        }
    }

    /// Opens the zero-digit region around `seed` plus its numbered border, returns how many cells opened.
    ///
    /// The revealed state doubles as the visited set, so no cell is opened twice.
    fn flood_reveal(&mut self, seed: Coord2) -> CellCount {
        let mut revealed: CellCount = 0;
        let mut to_visit = vec![seed];

        while let Some(visit_coords) = to_visit.pop() {
            for pos in self.neighbors(visit_coords) {
                let cell = self.cell_mut(pos);
                if cell.is_revealed() || cell.is_flagged() {
                    continue;
                }

                cell.reveal();
                revealed += 1;
                if cell.digit() == 0 {
                    to_visit.push(pos);
                }
            }
        }

        self.unrevealed_count -= revealed;
        log::trace!("Flood from {:?} opened {} cells", seed, revealed);
        revealed
    }

    /// Opens every unflagged mine and every wrong flag.
    fn disclose_mines(&mut self) {
        let mut disclosed: CellCount = 0;
        for cell in self.cells.iter_mut() {
            if cell.is_flagged() != cell.has_mine() && cell.reveal() {
                disclosed += 1;
            }
        }
        self.unrevealed_count -= disclosed;
    }

    fn end_game(&mut self, won: bool, events: &mut FieldEvents) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { FieldState::Won } else { FieldState::Lost };
        self.pressed_cell = None;
        log::debug!("Game over: {:?}", self.state);
        events.push(FieldEvent::GameOver { won });
    }

    fn press_around(&mut self, coords: Coord2) {
        for pos in self.neighbors(coords) {
            self.cell_mut(pos).press();
        }
    }

    fn undo_press_around(&mut self, coords: Coord2) {
        for pos in self.neighbors(coords) {
            self.cell_mut(pos).undo_press();
        }
    }

    fn is_locked(&self) -> bool {
        if self.state.is_finished() {
            log::trace!("Game already over, ignoring input");
            true
        } else {
            false
        }
    }

    fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Index<Coord2> for MineField {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
