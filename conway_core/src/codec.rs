// codec.rs - Flat text form of a grid ('1' live, '0' dead, one row per line)

use crate::error::{LifeError, Result};
use crate::grid::Grid;

pub const LIVE: char = '1';
pub const DEAD: char = '0';

/// `height` lines of `width` characters, every line newline-terminated.
pub fn encode(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() {
        out.extend(grid.row(y).iter().map(|&alive| if alive { LIVE } else { DEAD }));
        out.push('\n');
    }
    out
}

/// Parses text produced by [`encode`] into a fresh `width x height` grid.
///
/// The first `width` characters of each of the first `height` lines must be
/// `'0'` or `'1'`; a shorter line or a missing line is an error. Characters
/// past `width` and lines past `height` are ignored unread. Nothing is
/// returned until every row has been checked, so a failed decode can never
/// leave a half-written grid behind.
pub fn decode(text: &str, width: usize, height: usize) -> Result<Grid> {
    let mut grid = Grid::new(width, height);
    let mut lines = text.lines();

    for y in 0..height {
        let line_no = y + 1;
        let line = lines.next().ok_or_else(|| {
            LifeError::malformed(line_no, format!("expected {height} rows, found {y}"))
        })?;
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut x = 0;
        for ch in line.chars().take(width) {
            let alive = match ch {
                LIVE => true,
                DEAD => false,
                other => {
                    return Err(LifeError::malformed(
                        line_no,
                        format!("unexpected character {other:?} at column {}", x + 1),
                    ));
                }
            };
            grid.set(x, y, alive);
            x += 1;
        }
        if x < width {
            return Err(LifeError::malformed(
                line_no,
                format!("row has {x} cells, expected {width}"),
            ));
        }
    }

    Ok(grid)
}
