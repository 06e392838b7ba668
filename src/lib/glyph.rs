/// Pixels per glyph row. Only the low `GLYPH_WIDTH` bits of a row are read.
pub const GLYPH_WIDTH: usize = 8;
/// Rows per glyph: an upper and a lower half of 8 rows each.
pub const GLYPH_ROWS: usize = 16;
/// Bytes emitted per glyph in the vertical layout.
pub const ENCODED_GLYPH_LEN: usize = GLYPH_WIDTH * 2;

const HALF_ROWS: usize = GLYPH_ROWS / 2;

/// A single character bitmap, stored as horizontal row bitmasks.
///
/// Bit `x` of row `y` is pixel (x, y). Rows that were never given are blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    pub code_point: u32,
    pub rows: Vec<u32>,
}

impl Glyph {
    pub fn new(code_point: u32, rows: Vec<u32>) -> Self {
        Self { code_point, rows }
    }

    pub fn blank(code_point: u32) -> Self {
        Self::new(code_point, Vec::new())
    }

    /// Row `y`, or 0 if the glyph has no such row.
    pub fn row(&self, y: usize) -> u32 {
        self.rows.get(y).copied().unwrap_or(0)
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < GLYPH_WIDTH && self.row(y) & (1 << x) != 0
    }

    pub fn is_blank(&self) -> bool {
        (0..GLYPH_ROWS).all(|y| self.row(y) & 0xFF == 0)
    }

    /// Column `x` of the upper (`half == 0`) or lower (`half == 1`) half,
    /// with row `y` of that half in bit `y`.
    pub fn column(&self, x: usize, half: usize) -> u8 {
        (0..HALF_ROWS)
            .filter(|y| self.pixel(x, half * HALF_ROWS + y))
            .map(|y| 1u8 << y)
            .sum()
    }

    /// Transposes the glyph into the vertical layout: for each column, the
    /// upper half byte followed by the lower half byte.
    pub fn to_vertical(&self) -> [u8; ENCODED_GLYPH_LEN] {
        let mut bytes = [0u8; ENCODED_GLYPH_LEN];
        for x in 0..GLYPH_WIDTH {
            bytes[2 * x] = self.column(x, 0);
            bytes[2 * x + 1] = self.column(x, 1);
        }

        bytes
    }
}
