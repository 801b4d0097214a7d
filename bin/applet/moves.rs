use super::layout::Layout;
use crate::io::Io;
use anyhow::{bail, Error as Anyhow};
use clap::Parser;
use lib::chess::Square;
use std::io::{empty, stdout, Read, Write};
use tracing::{info, instrument};

/// Lists the squares the piece on a square may move to.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    #[clap(flatten)]
    layout: Layout,

    /// The square the piece stands on, e.g. `e2`.
    square: Square,
}

impl Moves {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut io = Io::new(stdout().lock(), empty());
        self.run(&mut io)
    }

    /// Draws the board with the piece selected, followed by its targets ordered by file and rank.
    fn run<W: Write, R: Read>(self, io: &mut Io<W, R>) -> Result<(), Anyhow> {
        let mut board = self.layout.board()?;

        let Some(&piece) = board.piece_at(self.square) else {
            bail!("there is no piece on `{}`", self.square);
        };

        board.select_or_move(self.square);
        let mut targets = Vec::from_iter(board.targets().iter().map(|sq| sq.to_string()));
        targets.sort();
        info!(%piece, count = targets.len());

        io.send(format_args!("{board:#}"))?;
        io.send(targets.join(" "))?;
        io.flush()?;

        Ok(())
    }
}
