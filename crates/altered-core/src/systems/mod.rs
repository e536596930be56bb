//! Systems - logic that operates on components once per fixed tick

mod construction;
mod oxygen;
mod power;
mod reap;
mod vitals;
mod wandering;

pub use construction::*;
pub use oxygen::*;
pub use power::*;
pub use reap::*;
pub use vitals::*;
pub use wandering::*;
