//! Scoring module - line clear points, levels and gravity cadence
//!
//! Points for a clear come from a five-entry table indexed by the number of
//! rows removed at once, multiplied by the level in force when the piece
//! locked. The table is configuration; the only rule a table must obey is
//! that clearing more rows together is worth strictly more per row.

use serde::{Deserialize, Serialize};

/// Line clear scoring table, indexed by rows cleared (0..=4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(pub [u32; 5]);

impl ScoreTable {
    /// Classic table: 40 / 100 / 300 / 1200
    pub const CLASSIC: ScoreTable = ScoreTable([0, 40, 100, 300, 1200]);

    /// Flatter table: 100 / 250 / 400 / 800
    pub const GENTLE: ScoreTable = ScoreTable([0, 100, 250, 400, 800]);

    /// Points for clearing `lines` rows at `level`
    ///
    /// Anything outside 1..=4 rows scores nothing.
    pub fn points(&self, lines: usize, level: u32) -> u32 {
        if lines == 0 || lines > 4 {
            return 0;
        }
        self.0[lines].saturating_mul(level)
    }

    /// Whether zero rows score zero and points per row strictly increase
    pub fn is_monotonic(&self) -> bool {
        if self.0[0] != 0 {
            return false;
        }
        // Compare a/i < b/j as a*j < b*i to stay in integers.
        (1..4).all(|i| {
            let (a, b) = (u64::from(self.0[i]), u64::from(self.0[i + 1]));
            a * (i as u64 + 1) < b * i as u64
        })
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Level for a running line total; levels start at 1
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    1 + total_lines / lines_per_level.max(1)
}

/// Gravity interval for a level, in milliseconds
///
/// Each level above 1 shaves `step_ms` off `base_ms`, never going below
/// `floor_ms`.
pub fn get_drop_interval_ms(level: u32, base_ms: u32, step_ms: u32, floor_ms: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(step_ms);
    base_ms.saturating_sub(speedup).max(floor_ms).max(1)
}

/// Gravity interval while soft drop is held
pub fn get_soft_drop_interval_ms(base_interval: u32, multiplier: u32) -> u32 {
    (base_interval / multiplier.max(1)).max(1)
}

/// Bonus for dropping `cells` rows at `per_cell` points each
pub fn calculate_drop_score(cells: u32, per_cell: u32) -> u32 {
    cells.saturating_mul(per_cell)
}
