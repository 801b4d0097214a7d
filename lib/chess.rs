mod bitboard;
mod board;
mod color;
mod piece;
mod role;
mod setup;
mod square;

pub use bitboard::*;
pub use board::*;
pub use color::*;
pub use piece::*;
pub use role::*;
pub use setup::*;
pub use square::*;
