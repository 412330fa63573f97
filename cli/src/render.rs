use std::io::{self, Write};

use minefield_core::{CellView, Phase, Snapshot};

fn glyph(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Empty => '.',
        CellView::Number(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Mine => '*',
    }
}

pub(crate) fn draw(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
    let state = &snapshot.state;
    let phase = match state.phase {
        Phase::Active => "playing",
        Phase::Won => "won",
        Phase::Lost => "lost",
    };
    writeln!(
        out,
        "flags: {}  time: {}s  {}",
        state.flagged_count, state.elapsed_seconds, phase
    )?;

    write!(out, "   ")?;
    for col in 0..snapshot.size {
        write!(out, "{:>3}", col)?;
    }
    writeln!(out)?;

    for (row, cells) in snapshot.rows().enumerate() {
        write!(out, "{:>3}", row)?;
        for cell in cells {
            write!(out, "{:>3}", glyph(cell))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
