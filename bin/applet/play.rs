use super::layout::Layout;
use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Board, Square};
use lib::view::{Tooltip, Viewport};
use std::io::{stdin, stdout, ErrorKind, Read, Write};
use tracing::{info, instrument};

/// Plays a game on the terminal.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    #[clap(flatten)]
    layout: Layout,

    /// The side of the board in pixels, used to map pointer coordinates to squares.
    #[clap(long, default_value_t = Viewport::DEFAULT_SIZE)]
    size: u32,

    /// The scale factor the board is drawn with.
    #[clap(long, default_value_t = 1.)]
    scale: f64,
}

impl Default for Play {
    fn default() -> Self {
        Play {
            layout: Layout::default(),
            size: Viewport::DEFAULT_SIZE,
            scale: 1.,
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let board = self.layout.board()?;
        let viewport = Viewport::new(self.size).with_scale(self.scale);
        let io = Io::new(stdout().lock(), stdin().lock());
        Session::new(board, viewport, io).run()
    }
}

/// A command typed in by the player.
#[derive(Debug, Clone, PartialEq, Parser)]
#[clap(
    name = "",
    multicall = true,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
enum Cmd {
    /// Click on a square, e.g. `select e2`.
    #[clap(visible_alias = "s")]
    Select { square: Square },

    /// Click on a square by its row and column, counted from the top left corner.
    #[clap(allow_negative_numbers = true)]
    Click { row: i8, col: i8 },

    /// Click on the board at pointer coordinates in pixels.
    #[clap(allow_negative_numbers = true)]
    Point { x: f64, y: f64 },

    /// Describe the piece on a square.
    Hover { square: Square },

    /// Resize the window to `width` by `height` pixels.
    Resize { width: u32, height: u32 },

    /// Draw the board.
    Show,

    /// Leave the game.
    #[clap(visible_alias = "q")]
    Quit,
}

struct Session<W: Write, R: Read> {
    board: Board,
    viewport: Viewport,
    io: Io<W, R>,
}

impl<W: Write, R: Read> Session<W, R> {
    fn new(board: Board, viewport: Viewport, io: Io<W, R>) -> Self {
        Session {
            board,
            viewport,
            io,
        }
    }

    fn run(&mut self) -> Result<(), Anyhow> {
        self.io.send(format_args!("{:#}", self.board))?;

        loop {
            self.io.prompt("> ")?;
            let line = match self.io.recv() {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break Ok(()),
                Err(e) => break Err(e.into()),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            // A bare square is a shorthand for `select`.
            let cmd = match line.parse() {
                Ok(square) => Cmd::Select { square },
                Err(_) => match Cmd::try_parse_from(line.split_whitespace()) {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        self.io.send(e)?;
                        continue;
                    }
                },
            };

            match cmd {
                Cmd::Select { square } => self.click(square)?,

                Cmd::Click { row, col } => match Square::try_new(row, col) {
                    Some(square) => self.click(square)?,
                    None => self.io.send(format_args!("({row}, {col}) is off the board"))?,
                },

                Cmd::Point { x, y } => match self.viewport.locate(x, y) {
                    Some(square) => self.click(square)?,
                    None => self.io.send(format_args!("({x}, {y}) is off the board"))?,
                },

                Cmd::Hover { square } => match Tooltip::at(&self.board, square) {
                    Some(tooltip) => self.io.send(format_args!("{tooltip} ({tooltip:#})"))?,
                    None => self.io.send(format_args!("{square} is empty"))?,
                },

                Cmd::Resize { width, height } => {
                    let size = self.viewport.resize(width, height);
                    self.io.send(format_args!("board resized to {size}x{size}"))?;
                }

                Cmd::Show => self.io.send(format_args!("{:#}", self.board))?,
                Cmd::Quit => break Ok(()),
            }
        }
    }

    fn click(&mut self, square: Square) -> Result<(), Anyhow> {
        let whence = self.board.selection().map(|s| s.square);
        let (occupant, square) = self.board.select_or_move(square);

        match (self.board.selected(), whence) {
            (Some(p), _) => {
                let targets = Vec::from_iter(self.board.targets().iter().map(|sq| sq.to_string()));
                info!(piece = %p, at = %square, targets = %targets.join(" "), "selected");
            }

            (None, Some(whence)) if self.board[whence].is_none() => match occupant {
                None => info!(%whence, whither = %square, "moved"),
                Some(q) => info!(%whence, whither = %square, captured = %q, "captured"),
            },

            (None, _) => info!(at = %square, "nothing selected"),
        }

        self.io.send(format_args!("{:#}", self.board))?;
        Ok(())
    }
}
