use crate::foundation::core::Position;

/// Fixed reference grid used to snap dragged text positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridModel {
    /// Number of cell rows.
    pub rows: u32,
    /// Number of cell columns.
    pub cols: u32,
    /// Maximum normalized distance (exclusive) at which a candidate captures the position.
    pub snap_threshold: f64,
}

impl Default for GridModel {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            snap_threshold: 0.05,
        }
    }
}

impl GridModel {
    /// Candidate points `(col/cols, row/rows)` in row-major order, `(rows+1)*(cols+1)` of them.
    pub fn points(&self) -> impl Iterator<Item = Position> + '_ {
        let rows = self.rows.max(1);
        let cols = self.cols.max(1);
        (0..=rows).flat_map(move |row| {
            (0..=cols).map(move |col| {
                Position::new(f64::from(col) / f64::from(cols), f64::from(row) / f64::from(rows))
            })
        })
    }

    /// Nearest grid point to `p`, if it lies strictly within `snap_threshold`.
    ///
    /// On exact distance ties the first candidate in row-major order wins.
    pub fn snap(&self, p: Position) -> Option<Position> {
        let mut best: Option<(Position, f64)> = None;
        for candidate in self.points() {
            let d = candidate.distance(p);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((candidate, d));
            }
        }
        best.filter(|&(_, d)| d < self.snap_threshold)
            .map(|(candidate, _)| candidate)
    }

    /// Normalized offsets of the interior vertical lines (`1/cols .. (cols-1)/cols`).
    pub fn interior_columns(&self) -> impl Iterator<Item = f64> + '_ {
        let cols = self.cols.max(1);
        (1..cols).map(move |c| f64::from(c) / f64::from(cols))
    }

    /// Normalized offsets of the interior horizontal lines.
    pub fn interior_rows(&self) -> impl Iterator<Item = f64> + '_ {
        let rows = self.rows.max(1);
        (1..rows).map(move |r| f64::from(r) / f64::from(rows))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
