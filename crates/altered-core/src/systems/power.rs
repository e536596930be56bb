//! Power system - rebuilds the routing input from built structures each
//! tick and writes the powered flags back.

use crate::components::{Conduit, LifeSupport, Reactor, Structure, UnderConstruction};
use altered_logic::power::{route_power, PowerConsumer, PowerFlow, PowerSource};
use hecs::{Entity, World};
use std::collections::HashSet;

fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Route power from built reactors to built consumers over built conduits.
/// Under-construction structures neither conduct nor consume. Returns the
/// flow for readouts.
pub fn power_system(world: &mut World) -> PowerFlow {
    let mut sources = Vec::new();
    for (entity, (structure, reactor)) in world
        .query::<(&Structure, &Reactor)>()
        .without::<&UnderConstruction>()
        .iter()
    {
        sources.push(PowerSource {
            id: entity_id(entity),
            capacity: reactor.output,
            tiles: structure.tiles().collect(),
        });
    }

    let mut conduits: HashSet<_> = HashSet::new();
    for (_, structure) in world
        .query::<&Structure>()
        .with::<&Conduit>()
        .without::<&UnderConstruction>()
        .iter()
    {
        conduits.extend(structure.tiles());
    }

    let mut consumers = Vec::new();
    for (entity, (structure, life_support)) in world
        .query::<(&Structure, &LifeSupport)>()
        .without::<&UnderConstruction>()
        .iter()
    {
        consumers.push(PowerConsumer {
            id: entity_id(entity),
            demand: life_support.demand,
            tiles: structure.tiles().collect(),
        });
    }

    let flow = route_power(&sources, &consumers, &conduits);

    for (entity, life_support) in world.query_mut::<&mut LifeSupport>() {
        life_support.powered = flow.is_powered(entity_id(entity));
    }

    flow
}
