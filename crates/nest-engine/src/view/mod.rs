pub mod parallax;
pub mod picker;
