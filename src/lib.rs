pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod moves;
pub mod piece;
pub mod rules;

#[cfg(target_arch = "wasm32")]
mod wasm_api;
