use crate::chess::Bitboard;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A square on the chess board.
///
/// Row `0` is black's home row and row `7` is white's, columns run from the a-file to the h-file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    #[cfg_attr(test, strategy(0u8..8))]
    row: u8,
    #[cfg_attr(test, strategy(0u8..8))]
    col: u8,
}

impl Square {
    /// The number of rows and columns on the board.
    pub const SIDE: u8 = 8;

    /// Constructs [`Square`] from a pair of row and column, both in the range `0..8`.
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < Self::SIDE && col < Self::SIDE);
        Square { row, col }
    }

    /// Constructs [`Square`] from a pair of signed coordinates, if they are on the board.
    #[inline(always)]
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        let side = Self::SIDE as i8;
        if (0..side).contains(&row) && (0..side).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// This square's row.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// This square's column.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// The index of this square in row-major order.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        (self.row * Self::SIDE + self.col) as usize
    }

    /// The square at a given row-major index in the range `0..64`.
    #[inline(always)]
    pub const fn from_index(i: usize) -> Self {
        Square::new((i / Self::SIDE as usize) as u8, (i % Self::SIDE as usize) as u8)
    }

    /// The square displaced by `(dr, dc)` from this one, if it is still on the board.
    #[inline(always)]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Square::try_new(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Returns a [`Bitboard`] that only contains this square.
    #[inline(always)]
    pub fn bitboard(self) -> Bitboard {
        Bitboard::new(1 << self.index())
    }

    /// An iterator over all squares in row-major order.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::SIDE as usize * Self::SIDE as usize).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col);
        let rank = Self::SIDE - self.row;
        write!(f, "{file}{rank}")
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square, expected file in the range `(a..=h)`")]
    InvalidFile,
    #[display(fmt = "failed to parse square, expected rank in the range `(1..=8)`")]
    InvalidRank,
    #[display(fmt = "failed to parse square, expected exactly two characters")]
    InvalidLength,
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(ParseSquareError::InvalidLength),
        };

        if !('a'..='h').contains(&file) {
            return Err(ParseSquareError::InvalidFile);
        }

        if !('1'..='8').contains(&rank) {
            return Err(ParseSquareError::InvalidRank);
        }

        let col = file as u8 - b'a';
        let row = Self::SIDE - (rank as u8 - b'0');
        Ok(Square::new(row, col))
    }
}

impl TryFrom<String> for Square {
    type Error = ParseSquareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn corners_are_printed_in_algebraic_notation() {
        assert_eq!(Square::new(0, 0).to_string(), "a8");
        assert_eq!(Square::new(0, 7).to_string(), "h8");
        assert_eq!(Square::new(7, 0).to_string(), "a1");
        assert_eq!(Square::new(7, 7).to_string(), "h1");
        assert_eq!(Square::new(6, 4).to_string(), "e2");
    }

    #[test]
    fn iter_visits_every_square_once_in_row_major_order() {
        let squares = Vec::from_iter(Square::iter());
        assert_eq!(squares.len(), 64);
        assert_eq!(squares.first(), Some(&Square::new(0, 0)));
        assert_eq!(squares.last(), Some(&Square::new(7, 7)));
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
    }

    #[proptest]
    fn new_constructs_square_from_pair_of_row_and_col(sq: Square) {
        assert_eq!(Square::new(sq.row(), sq.col()), sq);
    }

    #[proptest]
    fn from_index_is_the_inverse_of_index(sq: Square) {
        assert_eq!(Square::from_index(sq.index()), sq);
    }

    #[proptest]
    fn try_new_rejects_coordinates_off_the_board(
        #[filter(!(0..8).contains(&#row))] row: i8,
        col: i8,
    ) {
        assert_eq!(Square::try_new(row, col), None);
        assert_eq!(Square::try_new(col, row), None);
    }

    #[proptest]
    fn offset_by_zero_is_an_identity(sq: Square) {
        assert_eq!(sq.offset(0, 0), Some(sq));
    }

    #[proptest]
    fn offset_can_be_undone(sq: Square, #[strategy(-7i8..=7)] dr: i8, #[strategy(-7i8..=7)] dc: i8) {
        if let Some(next) = sq.offset(dr, dc) {
            assert_eq!(next.offset(-dr, -dc), Some(sq));
        }
    }

    #[proptest]
    fn square_has_an_equivalent_bitboard(sq: Square) {
        assert_eq!(Vec::from_iter(sq.bitboard()), vec![sq]);
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(sq: Square) {
        assert_eq!(sq.to_string().parse(), Ok(sq));
    }

    #[proptest]
    fn parsing_square_fails_if_file_invalid(
        #[filter(!('a'..='h').contains(&#c))] c: char,
        #[strategy(1u8..=8)] r: u8,
    ) {
        assert_eq!(
            format!("{c}{r}").parse::<Square>(),
            Err(ParseSquareError::InvalidFile)
        );
    }

    #[proptest]
    fn parsing_square_fails_if_rank_invalid(
        #[strategy(b'a'..=b'h')] f: u8,
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert_eq!(
            format!("{}{c}", char::from(f)).parse::<Square>(),
            Err(ParseSquareError::InvalidRank)
        );
    }

    #[proptest]
    fn parsing_square_fails_if_length_not_two(#[filter(#s.chars().count() != 2)] s: String) {
        assert_eq!(
            s.parse::<Square>(),
            Err(ParseSquareError::InvalidLength)
        );
    }

    #[proptest]
    fn square_is_serialized_in_algebraic_notation(sq: Square) {
        let ron = ron::ser::to_string(&sq)?;
        assert_eq!(ron, format!("\"{sq}\""));
        assert_eq!(ron::de::from_str::<Square>(&ron)?, sq);
    }
}
