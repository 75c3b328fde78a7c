use super::key::Key;

/// Characters per column for a text of `len` characters laid out in `cols`
/// columns. The first `len % cols` positions get the extra row, counted by
/// position in the key, not by key value.
pub fn column_heights(len: usize, cols: usize) -> Vec<usize> {
    if cols == 0 {
        return Vec::new();
    }
    let base = len / cols;
    let extra = len % cols;
    (0..cols)
        .map(|pos| base + usize::from(pos < extra))
        .collect()
}

/// Row-major character grid. `None` marks padding, so whitespace in the
/// text survives as an ordinary character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Refills the transposition grid for `key`: columns are visited in
    /// ascending key value and each takes its height's worth of ciphertext,
    /// top row first.
    pub fn from_ciphertext(ciphertext: &str, key: &Key) -> Self {
        let cols = key.len();
        let len = ciphertext.chars().count();
        if cols == 0 {
            return Self::empty(0, 0);
        }

        let mut grid = Self::empty(len.div_ceil(cols), cols);
        let heights = column_heights(len, cols);
        let mut chars = ciphertext.chars();

        for pos in key.column_order() {
            for row in 0..heights[pos] {
                if let Some(c) = chars.next() {
                    grid.cells[row * cols + pos] = Some(c);
                }
            }
        }
        grid
    }

    /// Writes `plaintext` row by row into `cols` columns.
    pub fn from_plaintext(plaintext: &str, cols: usize) -> Self {
        if cols == 0 {
            return Self::empty(0, 0);
        }
        let len = plaintext.chars().count();
        let mut grid = Self::empty(len.div_ceil(cols), cols);
        for (cell, c) in grid.cells.iter_mut().zip(plaintext.chars()) {
            *cell = Some(c);
        }
        grid
    }

    /// Row-major flatten, skipping padding.
    pub fn read_rows(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    /// Column-wise read in ascending key value, skipping padding.
    pub fn read_columns(&self, key: &Key) -> String {
        let mut out = String::with_capacity(self.cells.len());
        for pos in key.column_order() {
            if pos >= self.cols {
                continue;
            }
            for row in 0..self.rows {
                if let Some(c) = self.cells[row * self.cols + pos] {
                    out.push(c);
                }
            }
        }
        out
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[Option<char>] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }
}

/// Reverses a columnar transposition under `key`.
pub fn decode(ciphertext: &str, key: &Key) -> String {
    Grid::from_ciphertext(ciphertext, key).read_rows()
}

/// Columnar transposition under `key`; `decode(&encode(p, k), k) == p`.
pub fn encode(plaintext: &str, key: &Key) -> String {
    Grid::from_plaintext(plaintext, key.len()).read_columns(key)
}
