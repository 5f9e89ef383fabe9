//! Entity spawn factories for populating the simulation world.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use contagion_core::components::{Body, Destination, EntityId, Infection};
use contagion_core::config::SimConfig;
use contagion_core::types::{Position, WorldBounds};

use crate::systems::movement;

/// Body shared by every entity of a simulation.
pub fn body_for(config: &SimConfig) -> Body {
    Body {
        radius: config.radius,
        speed: config.speed(),
    }
}

/// Spawn `config.population` healthy entities at random positions, each
/// heading for a random destination. Returns the handles in id order.
pub fn spawn_population(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    bounds: &WorldBounds,
    config: &SimConfig,
) -> Vec<hecs::Entity> {
    let body = body_for(config);
    (0..config.population)
        .map(|i| {
            let position = movement::random_location(rng, bounds, body.radius);
            let destination = movement::random_location(rng, bounds, body.radius);
            spawn_entity(world, EntityId(i as u32), position, destination, body)
        })
        .collect()
}

/// Spawn a single healthy entity with its velocity already aimed at
/// `destination`.
pub fn spawn_entity(
    world: &mut World,
    id: EntityId,
    position: Position,
    destination: Position,
    body: Body,
) -> hecs::Entity {
    let velocity = movement::heading_velocity(&position, &destination, body.speed);
    world.spawn((
        id,
        position,
        Destination(destination),
        velocity,
        body,
        Infection::default(),
    ))
}
