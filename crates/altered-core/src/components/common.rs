//! Creature components: position, breathing, health, hunger, wandering.

use altered_logic::grid::TilePos;
use altered_logic::vitals;
use serde::{Deserialize, Serialize};

/// Tile an entity currently stands on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub tile: TilePos,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            tile: TilePos::new(x, y),
        }
    }
}

/// Marker component: this entity consumes oxygen from its tile and takes
/// hypoxia damage when the tile goes critical.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Breather;

/// Health and morale pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    pub morale: f32,
    pub max_morale: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            morale: 100.0,
            max_morale: 100.0,
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = vitals::apply_damage(self.current, amount);
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = vitals::heal(self.current, amount, self.max);
    }

    pub fn change_morale(&mut self, amount: f32) {
        self.morale = (self.morale + amount).clamp(0.0, self.max_morale);
    }

    pub fn is_alive(&self) -> bool {
        !vitals::is_dead(self.current)
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Satiation level; decays over time, starvation damages health at zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hunger {
    pub satiation: f32,
}

impl Hunger {
    pub fn feed(&mut self, amount: f32) {
        self.satiation = (self.satiation + amount).min(vitals::MAX_HUNGER);
    }

    pub fn is_critical(&self) -> bool {
        vitals::is_hunger_critical(self.satiation)
    }
}

impl Default for Hunger {
    fn default() -> Self {
        Self {
            satiation: vitals::MAX_HUNGER,
        }
    }
}

/// Idle drift timer; entities with this component occasionally step to an
/// adjacent walkable tile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Wander {
    pub cooldown: f32,
}
