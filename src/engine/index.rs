use std::sync::OnceLock;

/// Every arrangement of a cell and its eight neighbors
const PATTERNS: usize = 1 << 9;
/// Bit of the center cell in a 9-bit neighborhood pattern
pub(super) const CENTER: usize = 0b000_010_000;

type RuleTable = [bool; PATTERNS];

/// Conway's B3/S23 rule for a single cell
///
/// A live cell survives with 2 or 3 live neighbors, a dead cell is born with exactly 3.
#[inline]
pub fn next_state(alive: bool, neighbors: u32) -> bool {
    matches!((alive, neighbors), (true, 2) | (_, 3))
}

/// The shared rule table, built on first use
pub(super) fn get_gol_index() -> &'static RuleTable {
    static TABLE: OnceLock<RuleTable> = OnceLock::new();
    TABLE.get_or_init(generate_gol_index)
}

/// Tabulates [`next_state`] for every 3x3 pattern
///
/// Patterns are laid out three bits per grid row, the row above in the high
/// bits and the leftmost column in the high bit of each triple. Cells past the
/// grid edge are read as 0, so border patterns need no special casing.
pub(super) fn generate_gol_index() -> RuleTable {
    let mut table = [false; PATTERNS];
    for (pattern, next) in table.iter_mut().enumerate() {
        let neighbors = (pattern & !CENTER).count_ones();
        *next = next_state(pattern & CENTER != 0, neighbors);
    }
    table
}
