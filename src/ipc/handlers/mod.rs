pub mod core;
pub mod grid;
pub mod notices;
