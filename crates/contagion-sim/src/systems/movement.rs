//! Waypoint movement system.
//!
//! Each entity walks in a straight line at constant speed toward its
//! destination. Once it is within one radius of the destination on both axes
//! it draws a fresh waypoint. After stepping, the entity is re-inserted into
//! the spatial index for this tick's contact pass.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use contagion_core::components::{Body, Destination};
use contagion_core::types::{Position, Velocity, WorldBounds};

use crate::spatial_index::SpatialIndex;

/// Move every entity one tick and index its new cell.
pub fn run(world: &mut World, index: &mut SpatialIndex, rng: &mut ChaCha8Rng, bounds: &WorldBounds) {
    for (entity, (pos, dest, vel, body)) in
        world.query_mut::<(&mut Position, &mut Destination, &mut Velocity, &Body)>()
    {
        move_toward_destination(pos, dest, vel, body, rng, bounds);
        index.insert(index.cell_key_for(pos), entity);
    }
}

/// One step of motion. Re-rolls the destination first if it has been reached.
pub fn move_toward_destination(
    pos: &mut Position,
    dest: &mut Destination,
    vel: &mut Velocity,
    body: &Body,
    rng: &mut ChaCha8Rng,
    bounds: &WorldBounds,
) {
    if reached_destination(pos, &dest.0, body.radius) {
        dest.0 = random_location(rng, bounds, body.radius);
        *vel = heading_velocity(pos, &dest.0, body.speed);
    }
    pos.advance(vel);
}

/// Per-axis check: inside a square of half-side `radius` around `dest`.
pub fn reached_destination(pos: &Position, dest: &Position, radius: f64) -> bool {
    (dest.x - pos.x).abs() < radius && (dest.y - pos.y).abs() < radius
}

/// Velocity of length `speed` pointing from `from` to `to`.
/// Zero if the two points coincide.
pub fn heading_velocity(from: &Position, to: &Position, speed: f64) -> Velocity {
    let delta = DVec2::new(to.x - from.x, to.y - from.y);
    let magnitude = delta.length();
    if magnitude == 0.0 {
        return Velocity::ZERO;
    }
    let step = delta * (speed / magnitude);
    Velocity::new(step.x, step.y)
}

/// Uniform integer waypoint inset by `radius` from every edge.
pub fn random_location(rng: &mut ChaCha8Rng, bounds: &WorldBounds, radius: f64) -> Position {
    Position::new(
        random_coordinate(rng, bounds.width(), radius),
        random_coordinate(rng, bounds.height(), radius),
    )
}

fn random_coordinate(rng: &mut ChaCha8Rng, extent: f64, radius: f64) -> f64 {
    ((extent - 2.0 * radius) * rng.gen::<f64>()).round() - ((extent / 2.0).floor() - radius)
}
