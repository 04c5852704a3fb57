//! Bounding-box geometry for accepted matches.

use crate::search::SearchResult;

/// A pixel position in the target image, `(row, col)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Row index (y).
    pub row: usize,
    /// Column index (x).
    pub col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// The four corners of a matched bounding box.
///
/// Right and bottom corners are exclusive: they lie one past the last
/// matched column and row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corners {
    /// `(row, col)`.
    pub top_left: Position,
    /// `(row, col + width)`.
    pub top_right: Position,
    /// `(row + height, col)`.
    pub bottom_left: Position,
    /// `(row + height, col + width)`.
    pub bottom_right: Position,
}

/// Computes the corners of a box with its top-left at `top_left`.
pub fn box_corners(top_left: Position, width: usize, height: usize) -> Corners {
    let Position { row, col } = top_left;
    Corners {
        top_left,
        top_right: Position::new(row, col + width),
        bottom_left: Position::new(row + height, col),
        bottom_right: Position::new(row + height, col + width),
    }
}

/// Computes the corners of an accepted match.
pub fn corners(result: &SearchResult) -> Corners {
    box_corners(result.top_left, result.width, result.height)
}
