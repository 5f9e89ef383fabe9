//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! Read-only; it never modifies the world.

use hecs::World;

use contagion_core::components::{Body, EntityId, Infection};
use contagion_core::config::SimConfig;
use contagion_core::state::{EntityView, SimSnapshot};
use contagion_core::types::{Position, SimTime, WorldBounds};

use crate::systems::illness;

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    bounds: &WorldBounds,
    config: &SimConfig,
) -> SimSnapshot {
    let entities = build_entities(world, &config.healthy_tag);
    SimSnapshot {
        time: *time,
        bounds: *bounds,
        active_virus: config.active_virus,
        population: entities.len(),
        infected_count: illness::count_infected(world),
        entities,
    }
}

/// Build the EntityView list, ordered by id.
pub fn build_entities(world: &World, healthy_tag: &str) -> Vec<EntityView> {
    let mut views: Vec<EntityView> = world
        .query::<(&EntityId, &Position, &Body, &Infection)>()
        .iter()
        .map(|(_, (id, pos, body, infection))| {
            let pathogen_tag = infection.pathogen().map(|p| p.tag.clone());
            EntityView {
                id: *id,
                position: *pos,
                radius: body.radius,
                infected: infection.is_infected(),
                colour: pathogen_tag
                    .clone()
                    .unwrap_or_else(|| healthy_tag.to_string()),
                pathogen_tag,
            }
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}
