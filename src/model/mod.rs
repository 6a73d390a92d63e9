pub mod cohort;
pub mod game;
pub mod grid;
pub mod risk;
