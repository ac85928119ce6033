use wasm_bindgen::prelude::*;

mod bodies;
mod config;
mod game;
mod interaction;
mod scene_setup;
use game::PlanetStack;

stellar_web::export_demo!(PlanetStack, "planet-stack");
