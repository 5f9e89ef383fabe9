//! Illness progression: ages every infection by one tick.

use hecs::World;

use contagion_core::components::{IllnessStep, Infection};

/// Age all infections. Returns how many entities were cured this tick.
pub fn run(world: &mut World) -> usize {
    let mut cured = 0;
    for (_entity, infection) in world.query_mut::<&mut Infection>() {
        if infection.progress() == IllnessStep::Cured {
            cured += 1;
        }
    }
    cured
}

/// Clear every infection.
pub fn cure_all(world: &mut World) {
    for (_entity, infection) in world.query_mut::<&mut Infection>() {
        infection.cure();
    }
}

/// Number of entities currently carrying a pathogen.
pub fn count_infected(world: &World) -> usize {
    world
        .query::<&Infection>()
        .iter()
        .filter(|(_, infection)| infection.is_infected())
        .count()
}
