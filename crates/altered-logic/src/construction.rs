//! Build progress tracking for placed structures.
//!
//! A structure spends its first seconds under construction and only joins
//! the power and oxygen simulations once complete.

use serde::{Deserialize, Serialize};

/// Seconds of work to finish a reactor.
pub const REACTOR_BUILD_SECONDS: f32 = 5.0;
/// Seconds of work to finish a life support unit.
pub const LIFE_SUPPORT_BUILD_SECONDS: f32 = 4.0;
/// Seconds of work to finish one conduit tile.
pub const CONDUIT_BUILD_SECONDS: f32 = 2.0;

/// Progress toward completing one build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildProgress {
    pub elapsed: f32,
    pub required: f32,
}

impl BuildProgress {
    pub fn new(required: f32) -> Self {
        Self {
            elapsed: 0.0,
            required: required.max(0.0),
        }
    }

    /// Advance by `dt` seconds. Returns true once the build is complete.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.required);
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.required
    }

    /// Completion fraction in [0.0, 1.0], for progress readouts.
    pub fn fraction(&self) -> f32 {
        if self.required <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.required).clamp(0.0, 1.0)
        }
    }
}
