use wasm_bindgen::prelude::*;

mod game;
use game::PulseDemo;

cadence_web::export_game!(PulseDemo, "pulse-demo");
