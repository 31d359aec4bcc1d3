//! Pieces module - the tetromino catalog
//!
//! Every piece lives in a 4x4 mask. Only rotation 0 of each kind is written
//! down by hand; rotations 1..3 are derived by turning the mask a quarter turn
//! clockwise about its centre, so a cell at `(row, col)` moves to
//! `(col, 3 - row)`. The whole table is built at compile time and is read-only
//! for the life of the process.

use crate::types::{PieceKind, Rotation, BLOCK_SIZE};

/// Occupancy mask of one (kind, rotation) pair, indexed `[row][col]`
pub type Mask = [[bool; BLOCK_SIZE]; BLOCK_SIZE];

/// Offset of a single mino inside the mask as `(col, row)`, i.e. `(dx, dy)`
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets, row-major order
pub type PieceShape = [MinoOffset; 4];

/// Rotation-0 masks in catalog order `I, O, T, S, Z, J, L`
const BASE_MASKS: [[[u8; BLOCK_SIZE]; BLOCK_SIZE]; PieceKind::COUNT] = [
    // I
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
    // O
    [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    // T
    [[0, 0, 0, 0], [0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
    // S
    [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    // Z
    [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    // J
    [[0, 0, 0, 0], [1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
    // L
    [[0, 0, 0, 0], [0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
];

/// Where a mask cell lands after one clockwise quarter turn
#[inline]
pub const fn rotate_cell(row: usize, col: usize) -> (usize, usize) {
    (col, BLOCK_SIZE - 1 - row)
}

/// Turn a whole mask one quarter clockwise
pub const fn rotate_mask(mask: &Mask) -> Mask {
    let mut out = [[false; BLOCK_SIZE]; BLOCK_SIZE];
    let mut row = 0;
    while row < BLOCK_SIZE {
        let mut col = 0;
        while col < BLOCK_SIZE {
            let (r, c) = rotate_cell(row, col);
            out[r][c] = mask[row][col];
            col += 1;
        }
        row += 1;
    }
    out
}

const fn mask_offsets(mask: &Mask) -> PieceShape {
    let mut out = [(0i8, 0i8); 4];
    let mut n = 0;
    let mut row = 0;
    while row < BLOCK_SIZE {
        let mut col = 0;
        while col < BLOCK_SIZE {
            if mask[row][col] && n < 4 {
                out[n] = (col as i8, row as i8);
                n += 1;
            }
            col += 1;
        }
        row += 1;
    }
    out
}

/// Precomputed masks and offsets for all 7 kinds × 4 rotations
#[derive(Debug)]
pub struct ShapeTable {
    masks: [[Mask; 4]; PieceKind::COUNT],
    shapes: [[PieceShape; 4]; PieceKind::COUNT],
}

impl ShapeTable {
    const fn build() -> Self {
        let mut masks = [[[[false; BLOCK_SIZE]; BLOCK_SIZE]; 4]; PieceKind::COUNT];
        let mut shapes = [[[(0i8, 0i8); 4]; 4]; PieceKind::COUNT];

        let mut kind = 0;
        while kind < PieceKind::COUNT {
            let mut base = [[false; BLOCK_SIZE]; BLOCK_SIZE];
            let mut row = 0;
            while row < BLOCK_SIZE {
                let mut col = 0;
                while col < BLOCK_SIZE {
                    base[row][col] = BASE_MASKS[kind][row][col] != 0;
                    col += 1;
                }
                row += 1;
            }

            masks[kind][0] = base;
            let mut rot = 1;
            while rot < 4 {
                masks[kind][rot] = rotate_mask(&masks[kind][rot - 1]);
                rot += 1;
            }

            let mut rot = 0;
            while rot < 4 {
                shapes[kind][rot] = mask_offsets(&masks[kind][rot]);
                rot += 1;
            }
            kind += 1;
        }

        Self { masks, shapes }
    }

    pub fn mask(&self, kind: PieceKind, rotation: Rotation) -> &Mask {
        &self.masks[kind.index()][rotation.index()]
    }

    pub fn shape(&self, kind: PieceKind, rotation: Rotation) -> PieceShape {
        self.shapes[kind.index()][rotation.index()]
    }
}

/// The process-wide catalog
pub static SHAPES: ShapeTable = ShapeTable::build();

/// Whether mask cell `(row, col)` is occupied for `kind` at `rotation`
///
/// `row` and `col` must be in `0..4`.
pub fn shape_cell(kind: PieceKind, rotation: Rotation, row: usize, col: usize) -> bool {
    SHAPES.mask(kind, rotation)[row][col]
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES.shape(kind, rotation)
}

/// Column a piece mask spawns at on a board `width` cells wide
pub fn spawn_column(width: usize) -> i32 {
    (width / 2) as i32 - (BLOCK_SIZE / 2) as i32
}

/// Try to rotate a piece using horizontal kicks
///
/// `kicks` are tried strictly in table order; `fits(dx, rotation)` says
/// whether the piece would be legal shifted by `dx` columns at `rotation`.
/// Returns the new rotation and the kick that was applied, or `None` when
/// every kick fails.
pub fn try_rotate(
    rotation: Rotation,
    clockwise: bool,
    kicks: &[i32],
    fits: impl Fn(i32, Rotation) -> bool,
) -> Option<(Rotation, i32)> {
    let new_rotation = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };

    kicks
        .iter()
        .copied()
        .find(|&dx| fits(dx, new_rotation))
        .map(|dx| (new_rotation, dx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(mask: &Mask) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (r, row) in mask.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                if cell {
                    out.push((r, c));
                }
            }
        }
        out
    }

    #[test]
    fn rotate_cell_four_times_is_identity() {
        for row in 0..4 {
            for col in 0..4 {
                let mut p = (row, col);
                for _ in 0..4 {
                    p = rotate_cell(p.0, p.1);
                }
                assert_eq!(p, (row, col));
            }
        }
    }

    #[test]
    fn every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            for rot in Rotation::ALL {
                assert_eq!(occupied(SHAPES.mask(kind, rot)).len(), 4, "{kind:?} {rot:?}");
            }
        }
    }

    #[test]
    fn successive_rotations_are_quarter_turns() {
        for kind in PieceKind::ALL {
            for rot in Rotation::ALL {
                let turned = rotate_mask(SHAPES.mask(kind, rot));
                assert_eq!(&turned, SHAPES.mask(kind, rot.rotate_cw()));
            }
        }
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let north = SHAPES.mask(PieceKind::O, Rotation::North);
        for rot in Rotation::ALL {
            assert_eq!(SHAPES.mask(PieceKind::O, rot), north);
        }
    }

    #[test]
    fn i_piece_alternates_vertical_and_horizontal() {
        assert_eq!(get_shape(PieceKind::I, Rotation::North), [(1, 0), (1, 1), (1, 2), (1, 3)]);
        assert_eq!(get_shape(PieceKind::I, Rotation::East), [(0, 1), (1, 1), (2, 1), (3, 1)]);
        assert_eq!(get_shape(PieceKind::I, Rotation::South), [(2, 0), (2, 1), (2, 2), (2, 3)]);
        assert_eq!(get_shape(PieceKind::I, Rotation::West), [(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn t_piece_points_right_after_one_turn() {
        assert_eq!(get_shape(PieceKind::T, Rotation::North), [(1, 1), (0, 2), (1, 2), (2, 2)]);
        assert_eq!(get_shape(PieceKind::T, Rotation::East), [(1, 0), (1, 1), (2, 1), (1, 2)]);
        assert!(shape_cell(PieceKind::T, Rotation::East, 1, 2));
        assert!(!shape_cell(PieceKind::T, Rotation::East, 1, 0));
    }

    #[test]
    fn spawn_column_centres_the_mask() {
        assert_eq!(spawn_column(15), 5);
        assert_eq!(spawn_column(10), 3);
    }

    #[test]
    fn try_rotate_takes_first_fitting_kick() {
        let kicks = [0, -1, 1, -2, 2];
        let got = try_rotate(Rotation::North, true, &kicks, |dx, _| dx == 1 || dx == 2);
        assert_eq!(got, Some((Rotation::East, 1)));

        let got = try_rotate(Rotation::North, false, &kicks, |_, _| false);
        assert_eq!(got, None);

        let got = try_rotate(Rotation::North, false, &kicks, |dx, rot| dx == 0 && rot == Rotation::West);
        assert_eq!(got, Some((Rotation::West, 0)));
    }
}
