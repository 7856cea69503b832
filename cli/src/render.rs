use std::io::{self, Write};

use sapper_core::{CellView, FieldEvent, FieldState, MineField};

fn symbol(view: CellView) -> char {
    match view {
        CellView::Covered => '#',
        CellView::Pressed => '_',
        CellView::Flagged => 'F',
        CellView::Revealed(0) => '.',
        CellView::Revealed(digit) => char::from(b'0' + digit),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
        CellView::Misflagged => 'x',
    }
}

pub(crate) fn board(out: &mut impl Write, field: &MineField) -> io::Result<()> {
    let (rows, cols) = field.size();

    write!(out, "    ")?;
    for col in 0..cols {
        write!(out, "{}", col % 10)?;
    }
    writeln!(out)?;

    for row in 0..rows {
        write!(out, "{row:>3} ")?;
        for col in 0..cols {
            write!(out, "{}", symbol(field.cell_view((row, col))))?;
        }
        writeln!(out)?;
    }

    let status = match field.state() {
        FieldState::Playing => "playing",
        FieldState::Won => "won",
        FieldState::Lost => "lost",
    };
    writeln!(out, "mines left: {}, {}", field.mines_left(), status)
}

pub(crate) fn events(out: &mut impl Write, events: &[FieldEvent]) -> io::Result<()> {
    for event in events {
        match event {
            FieldEvent::FlagCountChanged(count) => writeln!(out, "flags: {count}")?,
            FieldEvent::GameOver { won: true } => writeln!(out, "cleared, you win")?,
            FieldEvent::GameOver { won: false } => writeln!(out, "boom, game over")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_covered_and_revealed_cells() {
        let mut field = MineField::with_mines(2, 3, &[(0, 0)]).unwrap();
        field.secondary_action((0, 0)).unwrap();
        field.primary_press((1, 2)).unwrap();
        field.primary_release((1, 2)).unwrap();

        let mut out = Vec::new();
        board(&mut out, &field).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "    012\n  0 F1.\n  1 #1.\nmines left: 0, playing\n");
    }
}
