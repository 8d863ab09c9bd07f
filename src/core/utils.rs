//! 0x88 board arithmetic.
//!
//! A position is a single byte: high nibble is the rank, low nibble is the
//! file. Any position with one of the `0x88` bits set lies outside of the
//! board, so stepping off an edge is detected with a single mask.

pub struct DirectionIterator {
    position: u8,
    direction: u8,
}

impl Iterator for DirectionIterator {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.position = self.position.wrapping_add(self.direction);
        if is_valid_coord(self.position) {
            Some(self.position)
        } else {
            None
        }
    }
}

/** Walks from `position` (exclusive) along `direction` until the board edge. */
pub fn in_direction(position: u8, direction: u8) -> DirectionIterator {
    DirectionIterator {
        position,
        direction,
    }
}

/** Single jump, `None` if it lands outside of the board. */
#[inline]
pub fn offset(position: u8, step: u8) -> Option<u8> {
    let target = position.wrapping_add(step);
    is_valid_coord(target).then_some(target)
}

#[inline]
pub fn is_valid_coord(coord: u8) -> bool {
    coord & 0x88 == 0x00
}

#[inline]
pub fn compact_pos(file: u8, rank: u8) -> u8 {
    rank << 4 | file
}

/** Returns `(file, rank)`. */
#[inline]
pub fn unpack_pos<T: From<u8>>(pos: u8) -> (T, T) {
    ((pos & 0x0f).into(), ((pos & 0xf0) >> 4).into())
}

/** Tables directions for pieces */
pub const BISHOP_DIR: &[u8] = &[0x11, 0x0f, 0xf1, 0xef];
pub const ROOK_DIR: &[u8] = &[0x01, 0x10, 0xff, 0xf0];
pub const QUEEN_DIR: &[u8] = &[0x01, 0x10, 0x11, 0xff, 0xf0, 0xef, 0x0f, 0xf1];

/** Possible jumps for pieces */
pub const KING_MOVES: &[u8] = &[0x10, 0xf0, 0xff, 0xef, 0x0f, 0x01, 0xf1, 0x11];
pub const KNIGHT_MOVES: &[u8] = &[0x21, 0x1f, 0x12, 0xf2, 0xe1, 0xdf, 0x0e, 0xee];

/** Rank step of a single pawn push, indexed the same way as `Color::index`. */
pub const PAWN_PUSH: [u8; 2] = [0x10, 0xf0];
