//! Procedural circuit-board backdrop: a generated layout of chips, traces and
//! nodes, animated with travelling pulses and ambient particles.

mod component;
mod config;
mod engine;
mod layout;
mod palette;
mod pathfind;
mod render;
mod scheduler;
mod texture;
mod types;

pub use component::CircuitBackground;
pub use engine::EngineEvent;
pub use layout::Viewport;
pub use palette::{Color, Theme};
