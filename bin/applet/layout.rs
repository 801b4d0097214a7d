use anyhow::{Context, Error as Anyhow};
use clap::Args;
use lib::chess::{Board, Setup};
use std::{fs::read_to_string, path::PathBuf};
use tracing::instrument;

/// Where the initial layout of the board comes from.
#[derive(Debug, Default, Args)]
pub struct Layout {
    /// The layout in RON notation, e.g. `custom([(color: white, role: rook, position: "e4")])`.
    #[clap(short, long, default_value_t, conflicts_with = "setup_file")]
    setup: Setup,

    /// A file holding the layout in RON notation.
    #[clap(long, value_name = "PATH")]
    setup_file: Option<PathBuf>,
}

impl Layout {
    /// Lays out the pieces on a new [`Board`].
    #[instrument(level = "trace", err)]
    pub fn board(self) -> Result<Board, Anyhow> {
        let setup = match self.setup_file {
            None => self.setup,
            Some(path) => read_to_string(&path)
                .with_context(|| format!("failed to read `{}`", path.display()))?
                .parse::<Setup>()
                .with_context(|| format!("failed to parse `{}`", path.display()))?,
        };

        Ok(setup.build()?)
    }
}
