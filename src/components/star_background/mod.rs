//! Drifting stars, planets, flowers and small shapes, drawn on a transparent
//! canvas above the circuit board.

mod component;
mod field;
mod render;

pub use component::StarBackground;
