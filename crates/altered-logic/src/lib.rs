//! Pure simulation logic for Altered.
//!
//! This crate contains all game logic that is independent of any ECS,
//! engine, or runtime. Functions take plain data and return results, making
//! them unit-testable and portable between the native engine and headless
//! test tools.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`grid`] | Tile coordinates, grid dimensions, 4-connected neighbors |
//! | [`oxygen`] | Per-tile oxygen field: consumption, generation, diffusion |
//! | [`power`] | Power routing from reactors to consumers over conduits |
//! | [`construction`] | Build progress tracking and per-structure build times |
//! | [`vitals`] | Health damage/healing and hunger/starvation math |

pub mod construction;
pub mod grid;
pub mod oxygen;
pub mod power;
pub mod vitals;
