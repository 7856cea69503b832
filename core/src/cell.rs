use serde::{Deserialize, Serialize};

/// Interaction state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Covered,
    Pressed,
    Flagged,
    Revealed,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Covered
    }
}

/// How a cell should be drawn, derived from its state and contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Pressed,
    Flagged,
    Revealed(u8),
    Mine,
    Exploded,
    Misflagged,
}

/// One position of the mine field.
///
/// `has_mine` and `digit` are written while the field is generated and stay fixed for the rest of the
/// game; everything else follows the player's interaction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_mine: bool,
    digit: u8,
    state: CellState,
    exploded: bool,
    misflagged: bool,
}

impl Cell {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_has_mine(&mut self, has_mine: bool) {
        self.has_mine = has_mine;
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub fn set_digit(&mut self, digit: u8) {
        debug_assert!(digit <= 8, "digit out of range: {digit}");
        self.digit = digit;
    }

    /// Number of mined neighbors, only meaningful without a mine.
    pub const fn digit(&self) -> u8 {
        self.digit
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub fn press(&mut self) {
        if self.state == CellState::Covered {
            self.state = CellState::Pressed;
        }
    }

    pub fn undo_press(&mut self) {
        if self.state == CellState::Pressed {
            self.state = CellState::Covered;
        }
    }

    /// Opens a pressed cell, `force` skips the pressed check (chord reveal).
    ///
    /// Flagged and already revealed cells are left alone. Returns whether this call revealed the cell.
    pub fn release(&mut self, force: bool) -> bool {
        let releasable = match self.state {
            CellState::Pressed => true,
            CellState::Covered => force,
            CellState::Flagged | CellState::Revealed => false,
        };
        if !releasable {
            return false;
        }

        self.state = CellState::Revealed;
        if self.has_mine {
            self.exploded = true;
        }
        true
    }

    /// Toggles a flag, ignored on pressed or revealed cells.
    pub fn mark(&mut self) {
        self.state = match self.state {
            CellState::Covered => CellState::Flagged,
            CellState::Flagged => CellState::Covered,
            other => other,
        };
    }

    /// Forces the cell open regardless of its state, returns false if it already was.
    pub fn reveal(&mut self) -> bool {
        if self.state == CellState::Revealed {
            return false;
        }

        self.misflagged = self.state == CellState::Flagged && !self.has_mine;
        self.state = CellState::Revealed;
        if self.has_mine {
            self.exploded = true;
        }
        true
    }

    pub fn unreveal(&mut self) {
        self.state = CellState::Covered;
        self.exploded = false;
        self.misflagged = false;
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn is_pressed(&self) -> bool {
        matches!(self.state, CellState::Pressed)
    }

    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// A flag that turned out to sit on a safe cell, only set by [`Cell::reveal`].
    pub const fn is_misflagged(&self) -> bool {
        self.misflagged
    }

    pub const fn view(&self) -> CellView {
        match self.state {
            CellState::Covered => CellView::Covered,
            CellState::Pressed => CellView::Pressed,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed if self.misflagged => CellView::Misflagged,
            CellState::Revealed if self.has_mine => CellView::Mine,
            CellState::Revealed => CellView::Revealed(self.digit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mined() -> Cell {
        let mut cell = Cell::default();
        cell.set_has_mine(true);
        cell
    }

    #[test]
    fn mark_twice_returns_to_covered() {
        let mut cell = Cell::default();

        cell.mark();
        assert!(cell.is_flagged());
        cell.mark();
        assert_eq!(cell.state(), CellState::Covered);
    }

    #[test]
    fn press_and_undo_press_are_inverse() {
        let mut cell = Cell::default();

        cell.press();
        assert!(cell.is_pressed());
        cell.undo_press();
        assert_eq!(cell, Cell::default());
    }

    #[test]
    fn flagged_cell_cannot_be_pressed_or_released() {
        let mut cell = Cell::default();
        cell.mark();

        cell.press();
        assert!(cell.is_flagged());
        assert!(!cell.release(true));
        assert!(cell.is_flagged());
    }

    #[test]
    fn mark_ignores_pressed_and_revealed() {
        let mut cell = Cell::default();
        cell.press();
        cell.mark();
        assert!(cell.is_pressed());

        assert!(cell.release(false));
        cell.mark();
        assert!(cell.is_revealed());
    }

    #[test]
    fn release_requires_press_unless_forced() {
        let mut cell = Cell::default();

        assert!(!cell.release(false));
        assert_eq!(cell.state(), CellState::Covered);
        assert!(cell.release(true));
        assert!(cell.is_revealed());
        assert!(!cell.release(true));
    }

    #[test]
    fn releasing_a_mine_explodes_it() {
        let mut cell = mined();
        cell.press();

        assert!(cell.release(false));
        assert!(cell.is_exploded());
        assert_eq!(cell.view(), CellView::Mine);
    }

    #[test]
    fn reveal_of_wrong_flag_is_misflagged() {
        let mut cell = Cell::default();
        cell.set_digit(2);
        cell.mark();

        assert!(cell.reveal());
        assert!(cell.is_misflagged());
        assert!(!cell.is_exploded());
        assert_eq!(cell.view(), CellView::Misflagged);
        assert!(!cell.reveal());
    }

    #[test]
    fn unreveal_and_reset_clear_outcome_flags() {
        let mut cell = mined();
        cell.reveal();
        cell.unreveal();
        assert_eq!(cell.state(), CellState::Covered);
        assert!(!cell.is_exploded());
        assert!(cell.has_mine());

        cell.set_digit(3);
        cell.reset();
        assert_eq!(cell, Cell::default());
    }

    #[test]
    fn revealed_safe_cell_shows_digit() {
        let mut cell = Cell::default();
        cell.set_digit(4);
        cell.reveal();

        assert_eq!(cell.view(), CellView::Revealed(4));
    }
}
