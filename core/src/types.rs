/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type wide enough for `rows * cols` on the largest board.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn cell_count(rows: Coord, cols: Coord) -> CellCount {
    let rows = rows as CellCount;
    let cols = cols as CellCount;
    rows.saturating_mul(cols)
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `offset` to `center`, returning a value only when it stays in bounds.
fn apply_offset(center: Coord2, offset: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = center.0.checked_add_signed(offset.0)?;
    let col = center.1.checked_add_signed(offset.1)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

/// Iterates the up-to-8 orthogonal and diagonal neighbors of `center`,
/// clipped at the grid edges given by `bounds = (rows, cols)`.
pub fn adjacent_coords(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    OFFSETS
        .iter()
        .filter_map(move |&offset| apply_offset(center, offset, bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_cell_has_three_neighbors() {
        let neighbors: Vec<_> = adjacent_coords((0, 0), (4, 4)).collect();
        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_cell_has_five_neighbors() {
        assert_eq!(adjacent_coords((0, 2), (4, 4)).count(), 5);
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(adjacent_coords((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(adjacent_coords((0, 0), (1, 1)).count(), 0);
    }
}
