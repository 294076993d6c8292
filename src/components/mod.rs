pub mod field;
pub mod mascot;
pub mod theme;
