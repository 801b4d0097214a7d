use crate::chess::{Bitboard, Color, Piece, Role, Square};
use std::fmt::{self, Write};
use std::ops::{Index, IndexMut};
use tracing::{debug, instrument};

/// A selected [`Piece`] awaiting a destination.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Selection {
    /// Where the selected piece stands.
    pub square: Square,
    /// The squares the selected piece could move to when it was selected.
    pub targets: Bitboard,
}

/// The chess board.
///
/// Holds the pieces in an 8x8 grid along with the current [`Selection`], if any.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    grid: [[Option<Piece>; Square::SIDE as usize]; Square::SIDE as usize],
    selection: Option<Selection>,
}

impl Default for Board {
    /// The standard starting position.
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            grid: Default::default(),
            selection: None,
        }
    }

    /// The standard starting position.
    ///
    /// Black occupies rows 0 and 1, white occupies rows 6 and 7.
    pub fn standard() -> Self {
        let mut board = Board::empty();

        for c in [Color::White, Color::Black] {
            for (col, role) in (0..Square::SIDE).zip(Role::HOME_ROW) {
                board.place(Piece::new(c, role, Square::new(c.home_row(), col)));
                board.place(Piece::new(c, Role::Pawn, Square::new(c.pawn_row(), col)));
            }
        }

        board
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self[sq].as_ref()
    }

    /// An iterator over all pieces on the board, in row-major order.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.iter().flatten().flatten()
    }

    /// The current [`Selection`], if any.
    #[inline(always)]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The selected [`Piece`], if any.
    #[inline(always)]
    pub fn selected(&self) -> Option<&Piece> {
        self.selection.and_then(|s| self.piece_at(s.square))
    }

    /// The squares the selected [`Piece`] may move to.
    ///
    /// Empty if nothing is selected.
    #[inline(always)]
    pub fn targets(&self) -> Bitboard {
        self.selection.map_or_else(Bitboard::empty, |s| s.targets)
    }

    /// Puts a [`Piece`] on its own position, returning whatever stood there.
    ///
    /// Any selection is cleared.
    pub fn place(&mut self, p: Piece) -> Option<Piece> {
        self.selection = None;
        self[p.position].replace(p)
    }

    /// Takes the [`Piece`] on a [`Square`] off the board, if any.
    ///
    /// Any selection is cleared.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.selection = None;
        self[sq].take()
    }

    /// Handles a click on a [`Square`].
    ///
    /// Without a selection, clicking a piece selects it.
    /// With a selection, clicking one of its targets moves the selected piece there,
    /// clicking another piece of the same color selects that piece instead,
    /// and clicking anywhere else cancels the selection.
    ///
    /// Returns the piece that stood on the square before the click, along with the square.
    #[instrument(level = "trace", skip(self), fields(%square), ret)]
    pub fn select_or_move(&mut self, square: Square) -> (Option<Piece>, Square) {
        let occupant = self[square];

        match self.selection.take() {
            None => match occupant {
                Some(p) => self.select(p),
                None => debug!(%square, "nothing to select"),
            },

            Some(s) if s.targets.contains(square) => self.relocate(s.square, square),

            Some(s) => {
                let color = self.piece_at(s.square).map(|p| p.color);
                match occupant {
                    Some(p) if Some(p.color) == color => self.select(p),
                    _ => debug!(from = %s.square, %square, "selection cancelled"),
                }
            }
        }

        (occupant, square)
    }

    /// Handles a click on raw coordinates.
    ///
    /// Coordinates off the board are ignored and leave the board untouched.
    pub fn click(&mut self, row: i8, col: i8) -> Option<(Option<Piece>, Square)> {
        match Square::try_new(row, col) {
            Some(sq) => Some(self.select_or_move(sq)),
            None => {
                debug!(row, col, "click off the board ignored");
                None
            }
        }
    }

    fn select(&mut self, p: Piece) {
        let targets = p.legal_moves(self);
        debug!(piece = %p, square = %p.position, targets = targets.len(), "selected");
        self.selection = Some(Selection {
            square: p.position,
            targets,
        });
    }

    fn relocate(&mut self, whence: Square, whither: Square) {
        if let Some(mut p) = self[whence].take() {
            p.position = whither;
            match self[whither].replace(p) {
                None => debug!(piece = %p, %whence, %whither, "moved"),
                Some(q) => debug!(piece = %p, captured = %q, %whence, %whither, "captured"),
            }
        }
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.grid[sq.row() as usize][sq.col() as usize]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        &mut self.grid[sq.row() as usize][sq.col() as usize]
    }
}

/// Draws the board with row 0 on top.
///
/// The alternate form `{:#}` prints pieces as chess symbols and highlights the selection:
/// the selected piece is drawn in brackets, empty targets as `·` and capturable pieces in parentheses.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn files(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("  ")?;
            for col in 0..Square::SIDE {
                write!(f, "   {}", char::from(b'a' + col))?;
            }

            Ok(())
        }

        let highlight = f.alternate();
        let selected = self.selection.filter(|_| highlight).map(|s| s.square);
        let targets = if highlight {
            self.targets()
        } else {
            Bitboard::empty()
        };

        files(f)?;
        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for row in 0..Square::SIDE {
            let rank = Square::SIDE - row;
            write!(f, " {rank} |")?;

            for col in 0..Square::SIDE {
                let sq = Square::new(row, col);
                match self[sq] {
                    Some(p) if selected == Some(sq) => write!(f, "[{p:#}]")?,
                    Some(p) if targets.contains(sq) => write!(f, "({p:#})")?,
                    Some(p) if highlight => write!(f, " {p:#} ")?,
                    Some(p) => write!(f, " {p} ")?,
                    None if targets.contains(sq) => f.write_str(" · ")?,
                    None => f.write_str("   ")?,
                }

                f.write_char('|')?;
            }

            writeln!(f, " {rank}")?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        files(f)
    }
}

// Boards are generated as a flat list of cells, each placed on the square it indexes.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, prelude::*};

        vec(any::<Option<(Color, Role)>>(), 64)
            .prop_map(|cells| {
                let mut board = Board::empty();
                for (i, cell) in cells.into_iter().enumerate() {
                    if let Some((c, r)) = cell {
                        board.place(Piece::new(c, r, Square::from_index(i)));
                    }
                }

                board
            })
            .boxed()
    }
}
