use serde::{Deserialize, Serialize};

/// One grid position as the player and the renderer see it.
///
/// `active` is true while the cell is unrevealed (still clickable and
/// flaggable); revealing clears it permanently. `adjacent_mines` is computed
/// once at board generation and never changes during play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    pub flag: bool,
    pub active: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_safe(self) -> bool {
        !self.mine
    }

    pub const fn revealed(self) -> bool {
        !self.active
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            mine: false,
            flag: false,
            active: true,
            adjacent_mines: 0,
        }
    }
}
