//! Contact-based infection spread.
//!
//! Runs in two passes over the spatial index. The scan pass is read-only and
//! collects every entity touching an infected one into a pending list; only
//! after the whole index has been visited does the apply
//! pass attach pathogens. An entity infected this tick therefore cannot pass
//! the infection on until the next tick, and a crowded cluster shows a
//! one-hop-per-tick front.

use hecs::{Entity, World};

use contagion_core::components::{Body, Infection, Pathogen};
use contagion_core::config::VirusTable;
use contagion_core::enums::VirusKind;
use contagion_core::types::Position;

use crate::spatial_index::SpatialIndex;

/// The disc an entity occupies this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub position: Position,
    pub radius: f64,
}

/// A contact found by the scan pass, applied once the scan completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingInfection {
    pub target: Entity,
    /// Strain carried by the infected entity that made contact.
    pub source_kind: VirusKind,
}

/// Strict overlap test on squared distances. Touching discs do not collide.
pub fn collides(a: &Footprint, b: &Footprint) -> bool {
    let reach = a.radius + b.radius;
    a.position.distance_squared(&b.position) < reach * reach
}

/// Entities in `bucket` overlapping `source` (the source itself included).
pub fn collision_list<'a>(
    world: &'a World,
    source: &'a Footprint,
    bucket: &'a [Entity],
) -> impl Iterator<Item = Entity> + 'a {
    bucket
        .iter()
        .copied()
        .filter(move |other| collides(source, &footprint(world, *other)))
}

/// Scan then apply. Returns the number of entities newly infected.
pub fn run(world: &mut World, index: &SpatialIndex, viruses: &VirusTable) -> usize {
    let pending = scan(world, index);
    apply(world, &pending, viruses)
}

/// Read-only pass: every contact between an infected entity and any other
/// entity sharing a bucket. Duplicates are expected.
pub fn scan(world: &World, index: &SpatialIndex) -> Vec<PendingInfection> {
    let mut pending = Vec::new();
    for bucket in index.buckets() {
        for &source in bucket {
            let Some(source_kind) = carried_kind(world, source) else {
                continue;
            };
            let source_print = footprint(world, source);
            pending.extend(
                collision_list(world, &source_print, bucket)
                    .map(|target| PendingInfection { target, source_kind }),
            );
        }
    }
    pending
}

/// Write pass: infect each pending target that is still healthy.
pub fn apply(world: &mut World, pending: &[PendingInfection], viruses: &VirusTable) -> usize {
    let mut newly_infected = 0;
    for contact in pending {
        let Ok(mut infection) = world.get::<&mut Infection>(contact.target) else {
            continue;
        };
        if infection.is_infected() {
            continue;
        }
        let pathogen = Pathogen::new(contact.source_kind, viruses.profile(contact.source_kind));
        if infection.infect(pathogen) {
            newly_infected += 1;
        }
    }
    newly_infected
}

/// Position and radius of an indexed entity.
///
/// Everything in the index was spawned with a full component bundle, so a
/// miss here means the index and the world disagree.
pub fn footprint(world: &World, entity: Entity) -> Footprint {
    let position = world
        .get::<&Position>(entity)
        .map(|p| *p)
        .unwrap_or_else(|err| panic!("indexed entity {entity:?} has no position: {err}"));
    let radius = world
        .get::<&Body>(entity)
        .map(|b| b.radius)
        .unwrap_or_else(|err| panic!("indexed entity {entity:?} has no body: {err}"));
    Footprint { position, radius }
}

fn carried_kind(world: &World, entity: Entity) -> Option<VirusKind> {
    world
        .get::<&Infection>(entity)
        .ok()
        .and_then(|infection| infection.pathogen().map(|p| p.kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(x: f64, y: f64, radius: f64) -> Footprint {
        Footprint {
            position: Position::new(x, y),
            radius,
        }
    }

    #[test]
    fn overlap_is_strict() {
        // Centres 14 apart with radii 7 + 7: touching, not colliding.
        assert!(!collides(&disc(0.0, 0.0, 7.0), &disc(14.0, 0.0, 7.0)));
        assert!(collides(&disc(0.0, 0.0, 7.0), &disc(13.999, 0.0, 7.0)));
    }

    #[test]
    fn collides_is_symmetric() {
        let discs = [
            disc(0.0, 0.0, 7.0),
            disc(10.0, 0.0, 7.0),
            disc(-3.0, 12.5, 2.0),
            disc(8.0, 9.0, 5.0),
            disc(100.0, -40.0, 7.0),
            disc(14.0, 0.0, 7.0),
        ];
        for a in &discs {
            for b in &discs {
                assert_eq!(collides(a, b), collides(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn collides_uses_sum_of_radii() {
        assert!(collides(&disc(0.0, 0.0, 2.0), &disc(0.0, 9.0, 7.5)));
        assert!(!collides(&disc(0.0, 0.0, 2.0), &disc(0.0, 9.0, 7.0)));
    }

    #[test]
    fn collision_list_includes_source_and_neighbors() {
        let mut world = World::new();
        let body = Body {
            radius: 7.0,
            speed: 3.5,
        };
        let a = world.spawn((Position::new(0.0, 0.0), body));
        let b = world.spawn((Position::new(10.0, 0.0), body));
        let c = world.spawn((Position::new(30.0, 0.0), body));
        let bucket = [a, b, c];

        let source = footprint(&world, a);
        let hits: Vec<Entity> = collision_list(&world, &source, &bucket).collect();
        assert_eq!(hits, vec![a, b]);
    }
}
