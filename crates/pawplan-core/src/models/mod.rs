//! Domain models for the pawplan interpreter.

mod event;
mod series;
mod weight;

pub use event::*;
pub use series::*;
pub use weight::*;
