/// Chess domain types.
pub mod chess;
/// Mapping between the board and a display.
pub mod view;
