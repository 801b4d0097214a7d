use crate::chess::{Board, Piece, Square};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::instrument;

/// Runtime configuration for the initial layout of a [`Board`].
///
/// Written in [RON], e.g. `custom([(color: white, role: rook, position: "e4")])`.
///
/// [RON]: https://github.com/ron-rs/ron
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum Setup {
    /// The standard starting position.
    #[default]
    Standard,
    /// A board with no pieces.
    Empty,
    /// An arbitrary set of pieces.
    Custom(Vec<Piece>),
}

/// The reason why a [`Setup`] could not be turned into a [`Board`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum SetupError {
    #[display(fmt = "more than one piece placed on `{}`", square)]
    Occupied { square: Square },
}

impl Setup {
    /// Lays out the pieces on a new [`Board`].
    #[instrument(level = "trace", err)]
    pub fn build(self) -> Result<Board, SetupError> {
        match self {
            Setup::Standard => Ok(Board::standard()),
            Setup::Empty => Ok(Board::empty()),
            Setup::Custom(pieces) => {
                let mut board = Board::empty();
                for p in pieces {
                    if board.place(p).is_some() {
                        return Err(SetupError::Occupied { square: p.position });
                    }
                }

                Ok(board)
            }
        }
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ron = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&ron)
    }
}

/// The reason why parsing [`Setup`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse board setup")]
pub struct ParseSetupError(ron::de::SpannedError);

impl FromStr for Setup {
    type Err = ParseSetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
