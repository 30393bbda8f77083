pub mod attributes;
pub mod dust;
pub mod particle;
pub mod state;
