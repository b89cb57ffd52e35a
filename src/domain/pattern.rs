use anyhow::{Context, Result, bail, ensure};

use super::{Cell, Grid};

/// A decoded pattern: bounding box plus the coordinates of its live cells.
#[derive(Clone)]
pub struct Pattern {
    pub width: usize,
    pub height: usize,
    /// Relative coordinates of alive cells
    pub cells: Vec<(usize, usize)>,
}

impl Pattern {
    /// Stamp the pattern's live cells onto the grid at the given offset.
    /// Cells falling outside the grid are silently dropped.
    pub fn place_on(&self, grid: &mut Grid, x: usize, y: usize) {
        for &(dx, dy) in &self.cells {
            grid.set(x + dx, y + dy, Cell::Alive);
        }
    }
}

/// Decode a Run-Length-Encoded Life pattern.
///
/// `#` comment lines are skipped. The first remaining line must be the
/// header (`x = W, y = H` with an optional `rule` field). The body is a
/// sequence of `<count><tag>` runs with tag `o` (alive), `b` (dead) and
/// `$` (end of row), terminated by `!`. Runs past the declared bounding
/// box are rejected; short rows are implicitly dead.
pub fn parse_rle(text: &str) -> Result<Pattern> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let header = lines.next().context("RLE pattern is empty")?;
    let (width, height) = parse_header(header)?;

    let mut cells = Vec::new();
    let (mut x, mut y) = (0usize, 0usize);
    let mut count = 0usize;
    let mut terminated = false;

    'body: for line in lines {
        for ch in line.chars() {
            match ch {
                '0'..='9' => {
                    count = count
                        .checked_mul(10)
                        .and_then(|c| c.checked_add(ch as usize - '0' as usize))
                        .context("RLE run count overflows")?;
                }
                'o' => {
                    let run = count.max(1);
                    let end = x.checked_add(run);
                    ensure!(
                        y < height && end.is_some_and(|end| end <= width),
                        "run of {run} live cells at ({x}, {y}) exceeds \
                         declared {width}x{height} bounding box"
                    );
                    cells.extend((x..x + run).map(|cx| (cx, y)));
                    x += run;
                    count = 0;
                }
                'b' => {
                    let run = count.max(1);
                    let end = x.checked_add(run);
                    ensure!(
                        y < height && end.is_some_and(|end| end <= width),
                        "run of {run} dead cells at ({x}, {y}) exceeds \
                         declared {width}x{height} bounding box"
                    );
                    x += run;
                    count = 0;
                }
                '$' => {
                    y = y
                        .checked_add(count.max(1))
                        .context("RLE row skip overflows")?;
                    x = 0;
                    count = 0;
                }
                '!' => {
                    terminated = true;
                    break 'body;
                }
                c if c.is_whitespace() => {}
                other => bail!("unknown RLE tag '{other}'"),
            }
        }
    }

    ensure!(terminated, "RLE pattern is missing the '!' terminator");
    Ok(Pattern {
        width,
        height,
        cells,
    })
}

/// Parse the `x = W, y = H[, rule = ...]` header line.
/// The rule field is ignored; the simulator always runs B3/S23.
fn parse_header(line: &str) -> Result<(usize, usize)> {
    let mut width = None;
    let mut height = None;

    for field in line.split(',') {
        let (key, value) = field
            .split_once('=')
            .with_context(|| format!("malformed RLE header field '{}'", field.trim()))?;
        match key.trim() {
            "x" => width = Some(value.trim().parse::<usize>().context("bad 'x' in header")?),
            "y" => height = Some(value.trim().parse::<usize>().context("bad 'y' in header")?),
            _ => {}
        }
    }

    let width = width.context("RLE header is missing 'x'")?;
    let height = height.context("RLE header is missing 'y'")?;
    ensure!(
        width >= 1 && height >= 1,
        "RLE header declares an empty {width}x{height} pattern"
    );
    Ok((width, height))
}

/// Classic patterns as canonical RLE, decoded through the same parser the
/// pattern-file loader uses.
pub mod presets {
    use super::{Pattern, parse_rle};

    pub const PRESETS: &[(&str, &str)] = &[
        ("Glider", "x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!"),
        ("Blinker", "x = 3, y = 1, rule = B3/S23\n3o!"),
        ("Toad", "x = 4, y = 2, rule = B3/S23\nb3o$3o!"),
        ("Beacon", "x = 4, y = 4, rule = B3/S23\n2o$o$3bo$2b2o!"),
        (
            "Pulsar",
            "x = 13, y = 13, rule = B3/S23\n\
             2b3o3b3o2$o4bobo4bo$o4bobo4bo$o4bobo4bo$2b3o3b3o2$\
             2b3o3b3o$o4bobo4bo$o4bobo4bo$o4bobo4bo2$2b3o3b3o!",
        ),
        ("LWSS", "x = 5, y = 4, rule = B3/S23\nbo2bo$o$o3bo$4o!"),
        (
            "Gosper Glider Gun",
            "x = 36, y = 9, rule = B3/S23\n\
             24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$\
             2o8bo3bob2o4bobo$10bo5bo7bo$11bo3bo$12b2o!",
        ),
        ("Block", "x = 2, y = 2, rule = B3/S23\n2o$2o!"),
    ];

    /// Decode every preset. The strings are fixed and covered by tests.
    pub fn all() -> Vec<(&'static str, Pattern)> {
        PRESETS
            .iter()
            .map(|&(name, rle)| (name, parse_rle(rle).expect("preset RLE is well-formed")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glider() {
        let pattern = parse_rle("x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!").unwrap();
        assert_eq!((pattern.width, pattern.height), (3, 3));

        let mut cells = pattern.cells;
        cells.sort_unstable();
        assert_eq!(cells, vec![(0, 2), (1, 0), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let text = "#N Blinker\n#C period 2\n\nx = 3, y = 1\n3o!";
        let pattern = parse_rle(text).unwrap();
        assert_eq!(pattern.cells.len(), 3);
    }

    #[test]
    fn test_row_end_with_count_skips_rows() {
        // "o3$o" puts the second cell three rows below the first
        let pattern = parse_rle("x = 1, y = 4\no3$o!").unwrap();
        let mut cells = pattern.cells;
        cells.sort_unstable();
        assert_eq!(cells, vec![(0, 0), (0, 3)]);
    }

    #[test]
    fn test_missing_header_is_rejected() {
        assert!(parse_rle("3o!").is_err());
        assert!(parse_rle("y = 3\n3o!").is_err());
        assert!(parse_rle("").is_err());
    }

    #[test]
    fn test_run_past_declared_width_is_rejected() {
        assert!(parse_rle("x = 2, y = 1\n3o!").is_err());
        assert!(parse_rle("x = 2, y = 1\n2b o!").is_err());
    }

    #[test]
    fn test_run_past_declared_height_is_rejected() {
        assert!(parse_rle("x = 1, y = 1\no$o!").is_err());
    }

    #[test]
    fn test_oversized_run_counts_are_rejected_not_panicked() {
        // Count accumulation past usize
        assert!(parse_rle("x = 1, y = 1\n99999999999999999999o!").is_err());
        // Run within usize but overflowing the cursor
        assert!(parse_rle("x = 2, y = 1\nb18446744073709551615o!").is_err());
        // Row skip overflowing the cursor
        assert!(parse_rle("x = 1, y = 1\n18446744073709551615$2$o!").is_err());
    }

    #[test]
    fn test_unknown_tag_and_missing_terminator_are_rejected() {
        assert!(parse_rle("x = 1, y = 1\nq!").is_err());
        assert!(parse_rle("x = 1, y = 1\no").is_err());
    }

    #[test]
    fn test_all_presets_decode() {
        let presets = presets::all();
        assert_eq!(presets.len(), presets::PRESETS.len());
        for (name, pattern) in presets {
            assert!(!pattern.cells.is_empty(), "preset {name} has no live cells");
        }
    }

    #[test]
    fn test_place_on_offsets_and_clips() {
        let pattern = parse_rle("x = 2, y = 2\n2o$2o!").unwrap();
        let mut grid = Grid::new(4, 4).unwrap();
        pattern.place_on(&mut grid, 3, 3);

        // Only (3, 3) fits; the rest falls off the grid and is dropped
        assert_eq!(grid.population(), 1);
        assert_eq!(grid.get(3, 3), Some(Cell::Alive));
    }
}
