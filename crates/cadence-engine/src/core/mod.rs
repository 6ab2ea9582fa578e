pub mod engine;
pub mod services;
pub mod ticks;
pub mod time;
