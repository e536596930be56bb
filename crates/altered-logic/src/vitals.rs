//! Health and hunger math shared by the entity systems.

/// Full satiation.
pub const MAX_HUNGER: f32 = 100.0;
/// Satiation lost per second.
pub const HUNGER_RATE: f32 = 2.0;
/// Satiation below which an entity should drop everything and eat.
pub const CRITICAL_HUNGER: f32 = 10.0;
/// Health lost per second once satiation hits zero.
pub const STARVATION_DAMAGE_RATE: f32 = 5.0;

/// Reduce health by `amount`, floored at zero.
pub fn apply_damage(health: f32, amount: f32) -> f32 {
    (health - amount).max(0.0)
}

/// Increase health by `amount`, capped at `max`.
pub fn heal(health: f32, amount: f32, max: f32) -> f32 {
    (health + amount).min(max)
}

pub fn is_dead(health: f32) -> bool {
    health <= 0.0
}

/// Satiation after `dt` seconds without food.
pub fn decay_satiation(satiation: f32, dt: f32) -> f32 {
    (satiation - HUNGER_RATE * dt).max(0.0)
}

/// Damage dealt this tick by starvation; zero while any satiation remains.
pub fn starvation_damage(satiation: f32, dt: f32) -> f32 {
    if satiation <= 0.0 {
        STARVATION_DAMAGE_RATE * dt
    } else {
        0.0
    }
}

pub fn is_hunger_critical(satiation: f32) -> bool {
    satiation <= CRITICAL_HUNGER
}
