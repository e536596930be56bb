//! Power routing from reactors to consumers over conduit tiles.
//!
//! Pure data in, pure data out: the engine rebuilds the routing input from
//! built structures each tick and applies the resulting powered set back to
//! its components. A consumer is powered when a breadth-first search from
//! its footprint, across built conduit and source tiles, reaches a reactor
//! with enough remaining capacity for the consumer's demand. Capacity is
//! debited per consumer, so reactors can brown out when oversubscribed.

use crate::grid::TilePos;
use std::collections::{HashMap, HashSet, VecDeque};

/// Power provided by one reactor.
pub const REACTOR_OUTPUT: f32 = 10.0;
/// Power demanded by one life support unit.
pub const LIFE_SUPPORT_DEMAND: f32 = 2.0;

/// A built power source and the tiles it conducts through.
#[derive(Debug, Clone)]
pub struct PowerSource {
    pub id: u64,
    pub capacity: f32,
    pub tiles: Vec<TilePos>,
}

/// A built consumer and the tiles it connects from.
#[derive(Debug, Clone)]
pub struct PowerConsumer {
    pub id: u64,
    pub demand: f32,
    pub tiles: Vec<TilePos>,
}

/// Result of one routing pass.
#[derive(Debug, Clone, Default)]
pub struct PowerFlow {
    /// Consumers that found a source with enough remaining capacity.
    pub powered: HashSet<u64>,
    /// Remaining capacity per source after all grants.
    pub remaining: HashMap<u64, f32>,
}

impl PowerFlow {
    pub fn is_powered(&self, consumer_id: u64) -> bool {
        self.powered.contains(&consumer_id)
    }
}

/// Route power from sources to consumers across the conduit network.
///
/// Consumers are served in ascending id order so grants are deterministic
/// when capacity is scarce.
pub fn route_power(
    sources: &[PowerSource],
    consumers: &[PowerConsumer],
    conduits: &HashSet<TilePos>,
) -> PowerFlow {
    let mut flow = PowerFlow::default();
    for source in sources {
        flow.remaining.insert(source.id, source.capacity);
    }

    // Source footprint tiles conduct and terminate searches.
    let mut source_at: HashMap<TilePos, u64> = HashMap::new();
    for source in sources {
        for &tile in &source.tiles {
            source_at.insert(tile, source.id);
        }
    }

    let mut ordered: Vec<&PowerConsumer> = consumers.iter().collect();
    ordered.sort_by_key(|c| c.id);

    for consumer in ordered {
        if let Some(source_id) = find_source(consumer, &source_at, conduits, &flow.remaining) {
            if let Some(remaining) = flow.remaining.get_mut(&source_id) {
                *remaining -= consumer.demand;
            }
            flow.powered.insert(consumer.id);
        }
    }

    flow
}

/// Breadth-first search from the consumer's tiles for a source with enough
/// remaining capacity. Returns the first satisfying source reached.
fn find_source(
    consumer: &PowerConsumer,
    source_at: &HashMap<TilePos, u64>,
    conduits: &HashSet<TilePos>,
    remaining: &HashMap<u64, f32>,
) -> Option<u64> {
    let mut visited: HashSet<TilePos> = HashSet::new();
    let mut queue: VecDeque<TilePos> = VecDeque::new();

    for &tile in &consumer.tiles {
        if visited.insert(tile) {
            queue.push_back(tile);
        }
    }

    while let Some(tile) = queue.pop_front() {
        if let Some(&source_id) = source_at.get(&tile) {
            if remaining.get(&source_id).copied().unwrap_or(0.0) >= consumer.demand {
                return Some(source_id);
            }
            // Undersupplied source still conducts; keep searching past it.
        }

        for next in tile.neighbors4() {
            if visited.contains(&next) {
                continue;
            }
            if conduits.contains(&next) || source_at.contains_key(&next) {
                visited.insert(next);
                queue.push_back(next);
            }
        }
    }

    None
}
