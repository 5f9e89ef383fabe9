//! ECS components for hecs entities.
//!
//! Components are plain data. The only behaviour here is the infection slot's
//! own bookkeeping; motion and contact logic live in the engine's systems.

use serde::{Deserialize, Serialize};

use crate::config::VirusProfile;
use crate::enums::VirusKind;
use crate::types::Position;

/// Stable ordinal assigned at spawn. Observers list entities in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Waypoint the entity is travelling toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination(pub Position);

/// Physical extent and travel speed. Fixed for the life of the entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub radius: f64,
    /// Distance covered per tick.
    pub speed: f64,
}

/// An infection instance carried by one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathogen {
    pub kind: VirusKind,
    /// Visual marker (colour key) copied from the virus profile.
    pub tag: String,
    /// Ticks left before the illness system clears the infection.
    pub ticks_remaining: u32,
}

/// Infection slot. `None` means healthy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Infection(pub Option<Pathogen>);

/// What happened to an infection slot during one illness step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllnessStep {
    Healthy,
    Progressed,
    Cured,
}

impl Pathogen {
    /// A fresh infection of `kind` with the profile's full duration.
    pub fn new(kind: VirusKind, profile: &VirusProfile) -> Self {
        Self {
            kind,
            tag: profile.tag.clone(),
            ticks_remaining: profile.duration,
        }
    }
}

impl Infection {
    pub fn is_infected(&self) -> bool {
        self.0.is_some()
    }

    pub fn pathogen(&self) -> Option<&Pathogen> {
        self.0.as_ref()
    }

    /// Attach `pathogen` unless already infected. First infector wins.
    /// Returns true if the slot was empty.
    pub fn infect(&mut self, pathogen: Pathogen) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(pathogen);
        true
    }

    pub fn cure(&mut self) {
        self.0 = None;
    }

    /// Age the infection by one tick. A counter already at zero cures
    /// instead of decrementing.
    pub fn progress(&mut self) -> IllnessStep {
        let Some(pathogen) = self.0.as_mut() else {
            return IllnessStep::Healthy;
        };
        if pathogen.ticks_remaining == 0 {
            self.0 = None;
            return IllnessStep::Cured;
        }
        pathogen.ticks_remaining -= 1;
        IllnessStep::Progressed
    }
}
