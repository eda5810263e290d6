//! Bounds calculation, rasterization and rendering of the character grid.
//!
//! Sparse coordinate records are painted onto a dense, space-filled buffer.
//! The two input dialects place records differently (bounds-normalized vs.
//! zero-origin) and read the finished grid in different row orders, so the
//! orientation travels with the grid instead of being inferred at print
//! time.

use crate::{Error, Record, Result};

/// Minimal axis-aligned rectangle containing a set of coordinate records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl Bounds {
    /// Componentwise min/max over all records, in a single scan.
    ///
    /// An empty record set has no bounds; this is the sole point where the
    /// plain-text pipeline rejects empty input.
    pub fn of(records: &[Record]) -> Result<Bounds> {
        let first = records.first().ok_or(Error::NoData)?;
        let mut bounds = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for record in &records[1..] {
            bounds.min_x = bounds.min_x.min(record.x);
            bounds.max_x = bounds.max_x.max(record.x);
            bounds.min_y = bounds.min_y.min(record.y);
            bounds.max_y = bounds.max_y.max(record.y);
        }
        Ok(bounds)
    }

    pub fn width(&self) -> u64 {
        u64::from(self.max_x - self.min_x) + 1
    }

    pub fn height(&self) -> u64 {
        u64::from(self.max_y - self.min_y) + 1
    }
}

/// Row order used when serializing the grid to output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Row 0 is emitted first (plain-text dialect).
    TopDown,
    /// The highest-index row is emitted first, so (0,0) lands at the
    /// bottom-left of the output (row-text dialect).
    BottomUp,
}

/// Dense rows-by-columns character buffer, filled with spaces.
///
/// Mutable only while records are painted; rendering reads it back in the
/// row order fixed by its [`Orientation`].
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Vec<char>>,
    width: usize,
    orientation: Orientation,
}

const FILL: char = ' ';

impl Grid {
    /// Allocate a space-filled `width x height` grid.
    ///
    /// Dimensions of zero are a [`Error::Dimension`] failure rather than a
    /// panic further down.
    pub fn new(width: u64, height: u64, orientation: Orientation) -> Result<Grid> {
        if width == 0 || height == 0 {
            return Err(Error::Dimension { width, height });
        }
        let (w, h) = (
            usize::try_from(width).map_err(|_| Error::Dimension { width, height })?,
            usize::try_from(height).map_err(|_| Error::Dimension { width, height })?,
        );
        Ok(Grid {
            cells: vec![vec![FILL; w]; h],
            width: w,
            orientation,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Paint a record at `[y - off_y][x - off_x]`.
    ///
    /// Callers are expected to derive the offsets from the same record set
    /// (see [`rasterize_normalized`]), which makes the target cell valid by
    /// construction. Later writes overwrite earlier ones.
    fn paint_normalized(&mut self, record: &Record, off_x: u32, off_y: u32) {
        let col = (record.x - off_x) as usize;
        let row = (record.y - off_y) as usize;
        self.cells[row][col] = cell_char(&record.glyph);
    }

    /// Paint a record at `[y][x]`, skipping anything outside the grid.
    ///
    /// The row-text dialect's relaxed digit extraction can produce
    /// coordinates beyond the computed extent; those records are dropped
    /// without error and never resize the grid.
    pub fn paint_clamped(&mut self, record: &Record) {
        let (x, y) = (record.x as usize, record.y as usize);
        if y >= self.cells.len() || x >= self.width {
            log::debug!(
                "dropping out-of-bounds record ({}, {}) for {}x{} grid",
                record.x,
                record.y,
                self.width,
                self.cells.len()
            );
            return;
        }
        self.cells[y][x] = cell_char(&record.glyph);
    }

    /// Serialize to printable rows, honoring the grid's orientation.
    pub fn render(&self) -> Vec<String> {
        let rows = self.cells.iter().map(|row| row.iter().collect());
        match self.orientation {
            Orientation::TopDown => rows.collect(),
            Orientation::BottomUp => {
                let mut lines: Vec<String> = rows.collect();
                lines.reverse();
                lines
            }
        }
    }
}

/// Strict monospacing: a multi-character glyph occupies one cell, truncated
/// to its first character. Applied uniformly in both dialects.
fn cell_char(glyph: &str) -> char {
    glyph.chars().next().unwrap_or(FILL)
}

/// Rasterize for the plain-text dialect: bounds-normalized placement, read
/// back top-down.
///
/// The grid spans exactly the bounding rectangle of the record set, so a
/// record at `(x, y)` lands in cell `[y - min_y][x - min_x]`.
pub fn rasterize_normalized(records: &[Record]) -> Result<Grid> {
    let bounds = Bounds::of(records)?;
    let mut grid = Grid::new(bounds.width(), bounds.height(), Orientation::TopDown)?;
    for record in records {
        grid.paint_normalized(record, bounds.min_x, bounds.min_y);
    }
    Ok(grid)
}

/// Rasterize for the row-text dialect: zero-origin placement, read back
/// bottom-up so (0,0) prints at the bottom-left.
///
/// Grid extent is `(max_x + 1) x (max_y + 1)` with an implicit minimum of
/// zero; no normalization is applied.
pub fn rasterize_zero_origin(records: &[Record]) -> Result<Grid> {
    let bounds = Bounds::of(records)?;
    let width = u64::from(bounds.max_x) + 1;
    let height = u64::from(bounds.max_y) + 1;
    let mut grid = Grid::new(width, height, Orientation::BottomUp)?;
    for record in records {
        grid.paint_clamped(record);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(glyph: &str, x: u32, y: u32) -> Record {
        Record {
            glyph: glyph.to_string(),
            x,
            y,
        }
    }

    #[test]
    fn bounds_of_empty_is_no_data() {
        assert!(matches!(Bounds::of(&[]), Err(Error::NoData)));
    }

    #[test]
    fn bounds_componentwise() {
        let records = [rec("A", 3, 4), rec("B", 1, 2), rec("C", 0, 0)];
        let bounds = Bounds::of(&records).unwrap();
        assert_eq!(
            bounds,
            Bounds {
                min_x: 0,
                max_x: 3,
                min_y: 0,
                max_y: 4
            }
        );
        assert_eq!(bounds.width(), 4);
        assert_eq!(bounds.height(), 5);
    }

    #[test]
    fn bounds_nonzero_minimum() {
        let records = [rec("A", 5, 7), rec("B", 3, 9)];
        let bounds = Bounds::of(&records).unwrap();
        assert_eq!(
            bounds,
            Bounds {
                min_x: 3,
                max_x: 5,
                min_y: 7,
                max_y: 9
            }
        );
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 3, Orientation::TopDown),
            Err(Error::Dimension { .. })
        ));
        assert!(matches!(
            Grid::new(3, 0, Orientation::TopDown),
            Err(Error::Dimension { .. })
        ));
    }

    #[test]
    fn normalized_matches_expected_layout() {
        let records = [rec("A", 3, 4), rec("B", 1, 2), rec("C", 0, 0)];
        let grid = rasterize_normalized(&records).unwrap();
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.width(), 4);

        let lines = grid.render();
        assert_eq!(lines[0], "C   ");
        assert_eq!(lines[2], " B  ");
        assert_eq!(lines[4], "   A");
        assert_eq!(lines[1], "    ");
        assert_eq!(lines[3], "    ");
    }

    #[test]
    fn normalized_offsets_nonzero_minimum() {
        let records = [rec("A", 5, 7), rec("B", 3, 9)];
        let grid = rasterize_normalized(&records).unwrap();
        let lines = grid.render();
        // 3x3 grid: A at col 2 / row 0, B at col 0 / row 2.
        assert_eq!(lines, vec!["  A", "   ", "B  "]);
    }

    #[test]
    fn zero_origin_renders_bottom_up() {
        let records = [rec("X", 0, 0), rec("Y", 1, 1)];
        let grid = rasterize_zero_origin(&records).unwrap();
        assert_eq!(grid.orientation(), Orientation::BottomUp);

        let lines = grid.render();
        assert_eq!(lines, vec![" Y", "X "]);
    }

    #[test]
    fn clamped_paint_skips_out_of_bounds() {
        let mut grid = Grid::new(2, 2, Orientation::BottomUp).unwrap();
        grid.paint_clamped(&rec("A", 0, 0));
        grid.paint_clamped(&rec("B", 5, 0));
        grid.paint_clamped(&rec("C", 0, 5));

        let lines = grid.render();
        assert_eq!(lines, vec!["  ", "A "]);
    }

    #[test]
    fn last_write_wins_on_collision() {
        let records = [rec("A", 0, 0), rec("B", 1, 1), rec("Z", 0, 0)];
        let grid = rasterize_normalized(&records).unwrap();
        assert_eq!(grid.render()[0], "Z ");
    }

    #[test]
    fn multi_char_glyph_truncates_to_first_char() {
        let records = [rec("##", 0, 0), rec("B", 1, 0)];
        let grid = rasterize_normalized(&records).unwrap();
        assert_eq!(grid.render(), vec!["#B"]);
    }

    #[test]
    fn rasterize_is_deterministic() {
        let records = [rec("A", 2, 1), rec("B", 0, 0)];
        let once = rasterize_normalized(&records).unwrap().render();
        let twice = rasterize_normalized(&records).unwrap().render();
        assert_eq!(once, twice);
    }
}
