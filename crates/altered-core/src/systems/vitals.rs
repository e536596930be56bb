//! Vitals system - hunger decay and starvation damage.

use crate::components::{Health, Hunger};
use altered_logic::vitals;
use hecs::World;

/// Decay satiation; once it bottoms out, starvation eats into health.
pub fn hunger_system(world: &mut World, dt: f32) {
    for (_, (hunger, health)) in world.query_mut::<(&mut Hunger, &mut Health)>() {
        hunger.satiation = vitals::decay_satiation(hunger.satiation, dt);
        let damage = vitals::starvation_damage(hunger.satiation, dt);
        if damage > 0.0 {
            health.take_damage(damage);
        }
    }
}
