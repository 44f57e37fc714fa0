//! ASCII frames from a `Snapshot`.

use std::fmt::Write;

use sf_sim::Snapshot;

const WALL:    char = '#';
const ACTIVE:  char = 'o';
const SETTLED: char = '@';
const GOAL:    char = '.';
const EMPTY:   char = ' ';

/// One character per cell, one line per row.
pub fn frame(snap: &Snapshot) -> String {
    let (h, w) = (snap.height as usize, snap.width as usize);
    let mut canvas = vec![EMPTY; h * w];
    let mut put = |row: u32, col: u32, ch: char| canvas[row as usize * w + col as usize] = ch;

    for c in &snap.goal {
        put(c.row, c.col, GOAL);
    }
    for c in &snap.obstacles {
        put(c.row, c.col, WALL);
    }
    for a in &snap.agents {
        put(a.cell.row, a.cell.col, if a.reached { SETTLED } else { ACTIVE });
    }

    let mut out = String::with_capacity(h * (w + 1) + 32);
    let _ = writeln!(out, "{}  settled {}/{}", snap.tick, snap.reached_count(), snap.agents.len());
    for row in canvas.chunks(w) {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}
