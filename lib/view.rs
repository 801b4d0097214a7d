mod tooltip;
mod viewport;

pub use tooltip::*;
pub use viewport::*;
