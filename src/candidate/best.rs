//! Minimum-score tracking with deterministic tie-breaking.

use std::cmp::Ordering;

/// A scored top-left placement of a variant inside the target image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Row of the top-left corner.
    pub row: usize,
    /// Column of the top-left corner.
    pub col: usize,
    /// Mean squared difference at this placement.
    pub score: f64,
}

/// Orders placements by ascending score, then row-major position.
///
/// The positional tie-break means the first placement in scan order wins
/// when scores are equal, no matter how the scan was partitioned.
pub(crate) fn placement_cmp(a: &Placement, b: &Placement) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.row.cmp(&b.row))
        .then_with(|| a.col.cmp(&b.col))
}

/// Running minimum over scored placements.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestPlacement {
    best: Option<Placement>,
}

impl BestPlacement {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a placement, keeping it if it beats the current best.
    #[inline]
    pub fn push(&mut self, candidate: Placement) {
        match self.best {
            Some(ref current) if placement_cmp(&candidate, current) != Ordering::Less => {}
            _ => self.best = Some(candidate),
        }
    }

    /// Folds another tracker into this one.
    pub fn merge(&mut self, other: BestPlacement) {
        if let Some(placement) = other.best {
            self.push(placement);
        }
    }

    /// Returns the best placement seen, if any.
    pub fn get(&self) -> Option<Placement> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::{BestPlacement, Placement};

    fn p(row: usize, col: usize, score: f64) -> Placement {
        Placement { row, col, score }
    }

    #[test]
    fn keeps_lowest_score() {
        let mut best = BestPlacement::new();
        assert!(best.get().is_none());
        best.push(p(0, 0, 3.0));
        best.push(p(0, 1, 1.0));
        best.push(p(1, 0, 2.0));
        assert_eq!(best.get(), Some(p(0, 1, 1.0)));
    }

    #[test]
    fn ties_resolve_to_first_in_row_major_order() {
        let mut best = BestPlacement::new();
        best.push(p(2, 0, 0.5));
        best.push(p(1, 5, 0.5));
        best.push(p(1, 7, 0.5));
        assert_eq!(best.get(), Some(p(1, 5, 0.5)));

        let mut left = BestPlacement::new();
        left.push(p(3, 3, 0.5));
        let mut right = BestPlacement::new();
        right.push(p(0, 9, 0.5));
        left.merge(right);
        assert_eq!(left.get(), Some(p(0, 9, 0.5)));
    }
}
