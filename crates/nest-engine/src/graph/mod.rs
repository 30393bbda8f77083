pub mod grid;
pub mod proximity;
