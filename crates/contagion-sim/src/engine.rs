//! Simulation engine: the core of the model.
//!
//! `SimulationEngine` owns the hecs ECS world and the spatial index, runs the
//! systems once per tick, handles commands, and produces `SimSnapshot`s.
//! Completely headless, enabling deterministic testing.

use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use contagion_core::commands::SimCommand;
use contagion_core::components::{Infection, Pathogen};
use contagion_core::config::SimConfig;
use contagion_core::enums::VirusKind;
use contagion_core::error::ConfigError;
use contagion_core::state::{EntityView, SimSnapshot};
use contagion_core::types::{SimTime, WorldBounds};

use crate::spatial_index::SpatialIndex;
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    index: SpatialIndex,
    /// Entity handles in spawn (id) order.
    roster: Vec<hecs::Entity>,
    time: SimTime,
    bounds: WorldBounds,
    config: SimConfig,
    rng: ChaCha8Rng,
}

impl SimulationEngine {
    /// Create a new engine and spawn its population.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = WorldBounds::centered(config.world_width, config.world_height);
        let mut engine = Self {
            world: World::new(),
            index: SpatialIndex::new(&bounds, config.cell_divisions, config.radius),
            roster: Vec::new(),
            time: SimTime::default(),
            bounds,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        };
        engine.populate();
        Ok(engine)
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) {
        self.index.clear();
        self.time.advance();

        systems::movement::run(&mut self.world, &mut self.index, &mut self.rng, &self.bounds);
        let cured = systems::illness::run(&mut self.world);
        let infected = systems::contagion::run(&mut self.world, &self.index, &self.config.viruses);

        debug!(tick = self.time.tick, infected, cured, "tick complete");
    }

    /// Apply a command immediately. Only `Reset` can fail.
    pub fn apply_command(&mut self, command: SimCommand) -> Result<(), ConfigError> {
        match command {
            SimCommand::InfectRandom => self.infect_random(),
            SimCommand::CureAll => self.cure_all(),
            SimCommand::Reset {
                width,
                height,
                population,
            } => self.reset(width, height, population)?,
            SimCommand::SelectVirus { kind } => self.select_virus(kind),
        }
        Ok(())
    }

    /// Infect one uniformly chosen entity with the active virus kind.
    /// An entity that is already infected keeps its current pathogen.
    pub fn infect_random(&mut self) {
        if self.roster.is_empty() {
            warn!("infect_random called on an empty population");
            return;
        }
        let pick = self.rng.gen_range(0..self.roster.len());
        let kind = self.config.active_virus;
        let newly = self.infect_entity(self.roster[pick], kind);
        info!(entity = pick, ?kind, newly, "infect random");
    }

    /// Remove every infection.
    pub fn cure_all(&mut self) {
        systems::illness::cure_all(&mut self.world);
        info!(tick = self.time.tick, "cured all entities");
    }

    /// Rebuild the world at a new size and population. On error nothing
    /// changes.
    pub fn reset(&mut self, width: f64, height: f64, population: usize) -> Result<(), ConfigError> {
        let config = SimConfig {
            world_width: width,
            world_height: height,
            population,
            ..self.config.clone()
        };
        config.validate()?;

        self.bounds = WorldBounds::centered(width, height);
        self.index = SpatialIndex::new(&self.bounds, config.cell_divisions, config.radius);
        self.config = config;
        self.world.clear();
        self.roster.clear();
        self.time = SimTime::default();
        self.populate();
        Ok(())
    }

    /// Choose the kind minted by subsequent `infect_random` calls.
    pub fn select_virus(&mut self, kind: VirusKind) {
        self.config.active_virus = kind;
        info!(?kind, "active virus selected");
    }

    /// All entities, ordered by id.
    pub fn entities(&self) -> Vec<EntityView> {
        systems::snapshot::build_entities(&self.world, &self.config.healthy_tag)
    }

    /// Complete observable state.
    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.bounds, &self.config)
    }

    /// Ticks elapsed since construction or the last reset.
    pub fn tick_count(&self) -> u64 {
        self.time.tick
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn infected_count(&self) -> usize {
        systems::illness::count_infected(&self.world)
    }

    pub fn population(&self) -> usize {
        self.roster.len()
    }

    /// The world rectangle.
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the spatial index as of the last tick.
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Entity handles in id order.
    pub fn roster(&self) -> &[hecs::Entity] {
        &self.roster
    }

    /// Drop every entity (for tests that place their own).
    #[cfg(test)]
    pub fn clear_population(&mut self) {
        self.world.clear();
        self.roster.clear();
    }

    /// Spawn a hand-placed entity (for tests needing exact geometry).
    #[cfg(test)]
    pub fn spawn_test_entity(
        &mut self,
        position: contagion_core::types::Position,
        destination: contagion_core::types::Position,
    ) -> hecs::Entity {
        let id = contagion_core::components::EntityId(self.roster.len() as u32);
        let body = world_setup::body_for(&self.config);
        let entity = world_setup::spawn_entity(&mut self.world, id, position, destination, body);
        self.roster.push(entity);
        entity
    }

    /// Attach a fresh pathogen of `kind` to `entity`. Returns false if the
    /// entity was already infected.
    pub fn infect_entity(&mut self, entity: hecs::Entity, kind: VirusKind) -> bool {
        let Ok(mut infection) = self.world.get::<&mut Infection>(entity) else {
            warn!(?entity, "infect_entity on unknown entity");
            return false;
        };
        if infection.is_infected() {
            return false;
        }
        infection.infect(Pathogen::new(kind, self.config.viruses.profile(kind)))
    }

    fn populate(&mut self) {
        self.roster =
            world_setup::spawn_population(&mut self.world, &mut self.rng, &self.bounds, &self.config);
        info!(
            population = self.roster.len(),
            width = self.config.world_width,
            height = self.config.world_height,
            cell_size = self.index.cell_size(),
            "population spawned"
        );
    }
}
