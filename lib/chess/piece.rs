use crate::chess::{Bitboard, Board, Color, Role, Square};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter};

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[rustfmt::skip]
const OMNIDIRECTIONAL: [(i8, i8); 8] = [
    (0, 1), (0, -1), (1, 0), (-1, 0),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

#[rustfmt::skip]
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

/// A chess [piece][`Role`] of a certain [`Color`] standing on a [`Square`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub position: Square,
}

impl Piece {
    /// Constructs [`Piece`] from its [`Color`], [`Role`] and [`Square`].
    #[inline(always)]
    pub const fn new(color: Color, role: Role, position: Square) -> Self {
        Piece {
            color,
            role,
            position,
        }
    }

    /// Whether this piece may capture a piece of some [`Color`].
    #[inline(always)]
    pub fn opposes(&self, color: Color) -> bool {
        self.color != color
    }

    /// The squares this piece may move to on a [`Board`].
    ///
    /// Only occupancy is taken into account, so moves that leave the king in check are included.
    pub fn legal_moves(&self, board: &Board) -> Bitboard {
        match self.role {
            Role::Pawn => self.pawn_moves(board),
            Role::Knight => self.jumps(board, &KNIGHT_JUMPS),
            Role::Bishop => self.slides(board, &DIAGONAL),
            Role::Rook => self.slides(board, &ORTHOGONAL),
            Role::Queen => self.slides(board, &OMNIDIRECTIONAL),
            Role::King => self.jumps(board, &OMNIDIRECTIONAL),
        }
    }

    fn pawn_moves(&self, board: &Board) -> Bitboard {
        let mut moves = Bitboard::empty();
        let forward = self.color.forward();

        if let Some(one) = self.position.offset(forward, 0) {
            if board.piece_at(one).is_none() {
                moves = moves.with(one);

                // A piece on the intermediate square blocks the double step as well.
                if self.position.row() == self.color.pawn_row() {
                    if let Some(two) = one.offset(forward, 0) {
                        if board.piece_at(two).is_none() {
                            moves = moves.with(two);
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            if let Some(sq) = self.position.offset(forward, dc) {
                if board.piece_at(sq).is_some_and(|p| self.opposes(p.color)) {
                    moves = moves.with(sq);
                }
            }
        }

        moves
    }

    fn jumps(&self, board: &Board, offsets: &[(i8, i8)]) -> Bitboard {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| self.position.offset(dr, dc))
            .filter(|&sq| match board.piece_at(sq) {
                None => true,
                Some(p) => self.opposes(p.color),
            })
            .collect()
    }

    fn slides(&self, board: &Board, directions: &[(i8, i8)]) -> Bitboard {
        let mut moves = Bitboard::empty();

        for &(dr, dc) in directions {
            let mut next = self.position.offset(dr, dc);
            while let Some(sq) = next {
                match board.piece_at(sq) {
                    None => moves = moves.with(sq),
                    Some(p) => {
                        if self.opposes(p.color) {
                            moves = moves.with(sq);
                        }

                        break;
                    }
                }

                next = sq.offset(dr, dc);
            }
        }

        moves
    }
}

/// Prints the piece as a letter, uppercase for white and lowercase for black.
///
/// The alternate form `{:#}` prints the Unicode chess symbol instead.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let symbol = match (self.color, self.role) {
                (Color::White, Role::Pawn) => '♙',
                (Color::White, Role::Knight) => '♘',
                (Color::White, Role::Bishop) => '♗',
                (Color::White, Role::Rook) => '♖',
                (Color::White, Role::Queen) => '♕',
                (Color::White, Role::King) => '♔',
                (Color::Black, Role::Pawn) => '♟',
                (Color::Black, Role::Knight) => '♞',
                (Color::Black, Role::Bishop) => '♝',
                (Color::Black, Role::Rook) => '♜',
                (Color::Black, Role::Queen) => '♛',
                (Color::Black, Role::King) => '♚',
            };

            write!(f, "{symbol}")
        } else {
            match self.color {
                Color::White => write!(f, "{}", self.role.to_string().to_uppercase()),
                Color::Black => write!(f, "{}", self.role),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::sample::select;
    use test_strategy::proptest;

    fn lone(p: Piece) -> Board {
        let mut board = Board::empty();
        board.place(p);
        board
    }

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col)
    }

    #[proptest]
    fn legal_moves_never_include_own_square(board: Board) {
        for p in board.iter() {
            assert!(!p.legal_moves(&board).contains(p.position));
        }
    }

    #[proptest]
    fn legal_moves_never_include_squares_of_the_same_color(board: Board) {
        for p in board.iter() {
            for target in p.legal_moves(&board) {
                assert!(!board.piece_at(target).is_some_and(|q| q.color == p.color));
            }
        }
    }

    #[proptest]
    fn legal_moves_do_not_mutate_the_board(board: Board) {
        let before = board.clone();
        for p in board.iter() {
            p.legal_moves(&board);
        }

        assert_eq!(board, before);
    }

    #[proptest]
    fn sliding_pieces_stop_at_the_first_blocker(
        #[strategy(select(vec![Role::Bishop, Role::Rook, Role::Queen]))] role: Role,
        board: Board,
        color: Color,
        from: Square,
    ) {
        let mut board = board;
        let p = Piece::new(color, role, from);
        board.place(p);
        let moves = p.legal_moves(&board);

        let directions: &[(i8, i8)] = match role {
            Role::Bishop => &DIAGONAL,
            Role::Rook => &ORTHOGONAL,
            _ => &OMNIDIRECTIONAL,
        };

        for &(dr, dc) in directions {
            let mut blocked = false;
            let mut next = from.offset(dr, dc);
            while let Some(sq) = next {
                match board.piece_at(sq) {
                    _ if blocked => assert!(!moves.contains(sq)),
                    None => assert!(moves.contains(sq)),
                    Some(q) => {
                        assert_eq!(moves.contains(sq), q.color != color);
                        blocked = true;
                    }
                }

                next = sq.offset(dr, dc);
            }
        }
    }

    #[proptest]
    fn sliding_pieces_only_reach_squares_along_their_directions(
        #[strategy(select(vec![Role::Bishop, Role::Rook, Role::Queen]))] role: Role,
        color: Color,
        from: Square,
    ) {
        let p = Piece::new(color, role, from);
        for sq in p.legal_moves(&lone(p)) {
            let dr = sq.row() as i8 - from.row() as i8;
            let dc = sq.col() as i8 - from.col() as i8;
            let straight = dr == 0 || dc == 0;
            let diagonal = dr.abs() == dc.abs();

            match role {
                Role::Rook => assert!(straight),
                Role::Bishop => assert!(diagonal),
                _ => assert!(straight || diagonal),
            }
        }
    }

    #[proptest]
    fn knight_and_king_moves_only_depend_on_same_color_occupancy(
        #[strategy(select(vec![Role::Knight, Role::King]))] role: Role,
        board: Board,
        color: Color,
        from: Square,
    ) {
        let mut board = board;
        let p = Piece::new(color, role, from);
        board.place(p);

        let friends = Bitboard::from_iter(board.iter().filter(|q| q.color == color).map(|q| q.position));
        let unobstructed = p.legal_moves(&lone(p));

        assert_eq!(p.legal_moves(&board), unobstructed & !friends);
    }

    #[proptest]
    fn knight_jumps_in_an_l_shape(color: Color, from: Square) {
        let p = Piece::new(color, Role::Knight, from);
        for sq in p.legal_moves(&lone(p)) {
            let dr = (sq.row() as i8 - from.row() as i8).abs();
            let dc = (sq.col() as i8 - from.col() as i8).abs();
            assert!((dr, dc) == (1, 2) || (dr, dc) == (2, 1));
        }
    }

    #[proptest]
    fn king_moves_at_most_one_square(color: Color, from: Square) {
        let p = Piece::new(color, Role::King, from);
        let moves = p.legal_moves(&lone(p));

        let corner = [0, 7].contains(&from.row()) && [0, 7].contains(&from.col());
        let edge = [0, 7].contains(&from.row()) || [0, 7].contains(&from.col());
        let expected = if corner { 3 } else if edge { 5 } else { 8 };
        assert_eq!(moves.len(), expected);

        for sq in moves {
            assert!((sq.row() as i8 - from.row() as i8).abs() <= 1);
            assert!((sq.col() as i8 - from.col() as i8).abs() <= 1);
        }
    }

    #[proptest]
    fn pawn_on_starting_row_of_empty_board_has_two_forward_moves(
        color: Color,
        #[strategy(0u8..8)] col: u8,
    ) {
        let p = Piece::new(color, Role::Pawn, sq(color.pawn_row(), col));
        let one = p.position.offset(color.forward(), 0).unwrap();
        let two = one.offset(color.forward(), 0).unwrap();

        assert_eq!(p.legal_moves(&lone(p)), Bitboard::from_iter([one, two]));
    }

    #[proptest]
    fn pawn_off_starting_row_of_empty_board_has_at_most_one_forward_move(
        color: Color,
        #[filter(#from.row() != #color.pawn_row())] from: Square,
    ) {
        let p = Piece::new(color, Role::Pawn, from);
        let moves = p.legal_moves(&lone(p));
        assert!(moves.len() <= 1);
        assert_eq!(moves.iter().next(), from.offset(color.forward(), 0));
    }

    #[proptest]
    fn pawn_captures_diagonally_only_opposing_pieces(
        color: Color,
        #[strategy(1u8..7)] row: u8,
        #[strategy(1u8..7)] col: u8,
        left: Option<Color>,
        right: Option<Color>,
    ) {
        let p = Piece::new(color, Role::Pawn, sq(row, col));
        let mut board = lone(p);
        let r = (row as i8 + color.forward()) as u8;

        for (c, occupant) in [(col - 1, left), (col + 1, right)] {
            if let Some(o) = occupant {
                board.place(Piece::new(o, Role::Knight, sq(r, c)));
            }
        }

        let moves = p.legal_moves(&board);
        assert_eq!(moves.contains(sq(r, col - 1)), left == Some(!color));
        assert_eq!(moves.contains(sq(r, col + 1)), right == Some(!color));
    }

    #[proptest]
    fn pawn_cannot_move_forward_onto_any_piece(
        color: Color,
        #[strategy(1u8..7)] row: u8,
        #[strategy(0u8..8)] col: u8,
        blocker: Color,
    ) {
        let p = Piece::new(color, Role::Pawn, sq(row, col));
        let mut board = lone(p);
        let ahead = p.position.offset(color.forward(), 0).unwrap();
        board.place(Piece::new(blocker, Role::Rook, ahead));

        let moves = p.legal_moves(&board);
        assert!(!moves.contains(ahead));
        assert!(moves.iter().all(|sq| sq.col() != col));
    }

    #[test]
    fn pawn_double_step_requires_the_destination_to_be_empty() {
        let p = Piece::new(Color::White, Role::Pawn, sq(6, 3));
        let mut board = lone(p);
        board.place(Piece::new(Color::Black, Role::Pawn, sq(4, 3)));
        assert_eq!(p.legal_moves(&board), Bitboard::from_iter([sq(5, 3)]));
    }

    #[test]
    fn pawn_double_step_is_blocked_by_a_piece_on_the_intermediate_square() {
        for blocker in [Color::White, Color::Black] {
            let p = Piece::new(Color::White, Role::Pawn, sq(6, 3));
            let mut board = lone(p);
            board.place(Piece::new(blocker, Role::Knight, sq(5, 3)));
            assert_eq!(p.legal_moves(&board), Bitboard::empty());
        }

        let p = Piece::new(Color::Black, Role::Pawn, sq(1, 5));
        let mut board = lone(p);
        board.place(Piece::new(Color::White, Role::Bishop, sq(2, 5)));
        assert_eq!(p.legal_moves(&board), Bitboard::empty());
    }

    #[test]
    fn lone_rook_in_the_center_reaches_fourteen_squares() {
        let p = Piece::new(Color::White, Role::Rook, sq(4, 4));
        assert_eq!(p.legal_moves(&lone(p)).len(), 14);
    }

    #[test]
    fn lone_queen_in_the_center_reaches_twenty_seven_squares() {
        let p = Piece::new(Color::Black, Role::Queen, sq(3, 3));
        assert_eq!(p.legal_moves(&lone(p)).len(), 27);
    }

    #[test]
    fn knight_in_the_corner_has_two_jumps() {
        let p = Piece::new(Color::White, Role::Knight, sq(7, 0));
        assert_eq!(
            p.legal_moves(&lone(p)),
            Bitboard::from_iter([sq(5, 1), sq(6, 2)])
        );
    }

    #[proptest]
    fn piece_is_printed_as_uppercase_letter_if_white(role: Role, position: Square) {
        let p = Piece::new(Color::White, role, position);
        assert_eq!(p.to_string(), role.to_string().to_uppercase());
    }

    #[proptest]
    fn piece_is_printed_as_lowercase_letter_if_black(role: Role, position: Square) {
        let p = Piece::new(Color::Black, role, position);
        assert_eq!(p.to_string(), role.to_string());
    }

    #[proptest]
    fn alternate_form_prints_a_single_symbol(p: Piece) {
        assert_eq!(format!("{p:#}").chars().count(), 1);
    }
}
