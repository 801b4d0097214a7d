use crate::chess::{Board, Piece, Square};
use std::fmt;

/// Text shown while hovering over a [`Piece`].
///
/// Prints the piece's Chinese name and where it stands, e.g. `騎士 在位置 g1`.
/// The alternate form `{:#}` prints it in English instead, e.g. `white knight on g1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tooltip(Piece);

impl Tooltip {
    /// The tooltip for a [`Piece`].
    pub fn new(p: Piece) -> Self {
        Tooltip(p)
    }

    /// The tooltip for whatever stands on a [`Square`], if anything.
    pub fn at(board: &Board, sq: Square) -> Option<Self> {
        board.piece_at(sq).copied().map(Tooltip)
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Tooltip(p) = self;
        if f.alternate() {
            write!(f, "{} {} on {}", p.color, p.role.name(), p.position)
        } else {
            write!(f, "{} 在位置 {}", p.role.chinese_name(), p.position)
        }
    }
}
