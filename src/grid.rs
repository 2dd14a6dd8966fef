// src/grid.rs

//! Fixed-width grid assembly.
//!
//! [`encode_into`] scans a text left to right, classifies each byte via
//! [`CharCode::from_byte`], and lays the codes out row-major with a fixed
//! row width: input beyond `width * max_rows` cells is truncated, the
//! tail of the last occupied row is filled with padding, and empty input
//! still produces one full padding row so the output shape is never
//! degenerate. The result is a constant-width block a downstream
//! embedding lookup can consume directly.

use crate::code::CharCode;
use crate::diag::{ensure_or_return, Diagnostics};
use log::trace;
use serde::Serialize;
use std::ops::Index;

/// Immutable description of one encoding request.
#[derive(Debug, Clone, Copy)]
pub struct GridRequest<'a> {
    /// Input text, consumed as bytes. A NUL byte terminates the input
    /// early, matching the C-string semantics of embedded text buffers.
    pub text: &'a str,
    /// Row length in cells. Must be positive.
    pub width: usize,
    /// Upper bound on rows. Must be positive.
    pub max_rows: usize,
}

impl GridRequest<'_> {
    /// Total cell capacity of the requested shape, which is also the
    /// ceiling on how many input characters are consumed.
    pub fn capacity(&self) -> usize {
        self.width * self.max_rows
    }
}

/// Encodes `request` into the caller-supplied buffer and returns the
/// number of codes written.
///
/// The written prefix is `rows * width` cells for the smallest `rows`
/// (at least 1, at most `max_rows`) that covers the consumed input;
/// cells past the consumed input are padding. The buffer beyond the
/// returned count is left untouched.
///
/// Preconditions: `request.width > 0`, `request.max_rows > 0`, and
/// `out` at least `request.capacity()` cells long. A violation is
/// reported through `diag` and nothing is written; the result is 0.
pub fn encode_into(
    request: &GridRequest<'_>,
    out: &mut [CharCode],
    diag: &dyn Diagnostics,
) -> usize {
    ensure_or_return!(diag, request.width > 0, 0, "grid width must be positive");
    ensure_or_return!(
        diag,
        request.max_rows > 0,
        0,
        "grid row limit must be positive"
    );

    let max_text_len = request.capacity();
    ensure_or_return!(
        diag,
        out.len() >= max_text_len,
        0,
        "output buffer is smaller than the grid capacity"
    );

    // Classify up to capacity; input past that is silently dropped.
    let mut converted = 0;
    for byte in request.text.bytes().take(max_text_len) {
        if byte == 0 {
            break;
        }
        out[converted] = CharCode::from_byte(byte);
        converted += 1;
    }

    // Empty input still occupies one cell so the grid below is a full
    // padding row rather than zero-length.
    if converted == 0 {
        out[0] = CharCode::PAD;
        converted = 1;
    }

    let rows = converted.div_ceil(request.width).min(request.max_rows);
    let written = rows * request.width;

    for cell in out[converted..written].iter_mut() {
        *cell = CharCode::PAD;
    }

    trace!(
        "encoded {} cells into {} rows of width {}",
        converted,
        rows,
        request.width
    );
    written
}

/// Encodes `request` into a freshly allocated [`Grid`].
///
/// On contract violation the diagnostics sink is notified and the empty
/// sentinel grid is returned.
pub fn encode(request: &GridRequest<'_>, diag: &dyn Diagnostics) -> Grid {
    let mut cells = vec![CharCode::PAD; request.capacity()];
    let written = encode_into(request, &mut cells, diag);
    cells.truncate(written);
    Grid {
        width: request.width,
        cells,
    }
}

/// An encoded grid: row-major cells with a fixed row width.
///
/// The cell count is always a multiple of the width, except for the
/// empty sentinel returned after a contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    cells: Vec<CharCode>,
}

impl Grid {
    /// Row length in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of complete rows.
    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.cells.len() / self.width
        }
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[CharCode] {
        &self.cells
    }

    /// True for the contract-violation sentinel.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// One row of cells.
    ///
    /// # Panics
    /// Panics if `y >= self.height()`.
    pub fn row(&self, y: usize) -> &[CharCode] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> std::slice::Chunks<'_, CharCode> {
        self.cells.chunks(self.width.max(1))
    }

    /// Extends the grid with full padding rows up to `rows`. Grids that
    /// are already at least that tall are left unchanged.
    pub fn pad_to_height(&mut self, rows: usize) {
        if self.width == 0 {
            return;
        }
        let target = rows * self.width;
        if self.cells.len() < target {
            self.cells.resize(target, CharCode::PAD);
        }
    }
}

impl Index<usize> for Grid {
    type Output = [CharCode];

    fn index(&self, row_index: usize) -> &Self::Output {
        self.row(row_index)
    }
}

/// Pads every grid of a batch to the batch's tallest height, so the
/// result stacks into one dense block.
///
/// All grids must share one width. A mismatch is a contract violation,
/// reported through `diag` with an empty batch as the sentinel result.
pub fn collate(mut grids: Vec<Grid>, diag: &dyn Diagnostics) -> Vec<Grid> {
    if grids.is_empty() {
        return grids;
    }
    let width = grids[0].width;
    ensure_or_return!(
        diag,
        grids.iter().all(|g| g.width == width),
        Vec::new(),
        "all grids in a batch must share one width"
    );

    let tallest = grids.iter().map(Grid::height).max().unwrap_or(0);
    for grid in &mut grids {
        grid.pad_to_height(tallest);
    }
    grids
}
