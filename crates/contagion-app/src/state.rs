//! State shared between the shell's front end and the loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use contagion_core::commands::SimCommand;
use contagion_core::enums::RunState;
use contagion_core::state::SimSnapshot;

/// Commands sent from the front end to the loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    /// Forward to the simulation engine. A `Reset` also stops the loop.
    Sim(SimCommand),
    /// Flip between `Stopped` and `Running`.
    Toggle,
    /// Stop the loop thread and hand the engine back.
    Shutdown,
}

/// What the loop thread publishes after every iteration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Published {
    pub run_state: RunState,
    pub snapshot: SimSnapshot,
}

/// Shared handle to the latest published state. `None` until the loop has
/// completed its first iteration.
pub type LatestState = Arc<Mutex<Option<Published>>>;

/// Front-end side of a running loop: command sender plus the latest state.
pub struct ShellState {
    pub command_tx: mpsc::Sender<LoopCommand>,
    pub latest: LatestState,
}

impl ShellState {
    /// Send a command. Returns false if the loop has already exited.
    pub fn send(&self, command: LoopCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }

    /// Clone of the most recently published state.
    pub fn latest(&self) -> Option<Published> {
        self.latest.lock().ok().and_then(|lock| lock.clone())
    }
}
