pub mod game;
pub mod state;
pub mod surface;
pub mod types;
