//! Loop thread: ticks the engine on a fixed interval while running.
//!
//! The engine is moved into this thread and handed back through the join
//! handle on shutdown. Commands arrive via an `mpsc` channel and are drained
//! at each tick boundary. The latest snapshot and run state are stored in
//! shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use contagion_core::commands::SimCommand;
use contagion_core::enums::RunState;
use contagion_sim::SimulationEngine;

use crate::state::{LatestState, LoopCommand, Published, ShellState};

/// Spawns the loop in a new thread. The simulation starts stopped.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    interval: Duration,
) -> io::Result<(ShellState, JoinHandle<SimulationEngine>)> {
    let (command_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let latest = LatestState::default();
    let shared = LatestState::clone(&latest);

    let handle = std::thread::Builder::new()
        .name("contagion-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, interval, &shared))?;

    Ok((ShellState { command_tx, latest }, handle))
}

/// Runs until a Shutdown command or channel disconnect, then returns the
/// engine.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    interval: Duration,
    latest: &Mutex<Option<Published>>,
) -> SimulationEngine {
    let mut run_state = RunState::Stopped;
    let mut next_tick_time = Instant::now();

    loop {
        // Drain pending commands.
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Sim(command)) => {
                    run_state = handle_sim_command(&mut engine, command, run_state);
                }
                Ok(LoopCommand::Toggle) => {
                    run_state = run_state.toggled();
                    info!(?run_state, tick = engine.tick_count(), "run state toggled");
                }
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.tick_count(), "loop shut down");
                    return engine;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        if run_state == RunState::Running {
            engine.tick();
        }

        if let Ok(mut lock) = latest.lock() {
            *lock = Some(Published {
                run_state,
                snapshot: engine.snapshot(),
            });
        }

        next_tick_time += interval;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > interval * 2 {
            // Too far behind, skip the backlog.
            next_tick_time = now;
        }
    }
}

/// Apply one engine command and return the run state that follows it.
fn handle_sim_command(
    engine: &mut SimulationEngine,
    command: SimCommand,
    run_state: RunState,
) -> RunState {
    let is_reset = matches!(command, SimCommand::Reset { .. });
    match engine.apply_command(command) {
        Ok(()) if is_reset => RunState::Stopped,
        Ok(()) => run_state,
        Err(err) => {
            warn!(%err, "command rejected");
            run_state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contagion_core::config::SimConfig;

    const INTERVAL: Duration = Duration::from_millis(1);

    fn small_engine() -> SimulationEngine {
        SimulationEngine::new(SimConfig {
            world_width: 200.0,
            world_height: 200.0,
            population: 20,
            ..Default::default()
        })
        .unwrap()
    }

    /// Poll until the loop publishes a state matching `pred`.
    fn wait_for(shell: &ShellState, pred: impl Fn(&Published) -> bool) -> Published {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(published) = shell.latest() {
                if pred(&published) {
                    return published;
                }
            }
            assert!(Instant::now() < deadline, "loop never reached expected state");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_loop_starts_stopped() {
        let (shell, handle) = spawn_game_loop(small_engine(), INTERVAL).unwrap();
        let published = wait_for(&shell, |_| true);
        assert_eq!(published.run_state, RunState::Stopped);
        assert_eq!(published.snapshot.time.tick, 0);

        std::thread::sleep(Duration::from_millis(20));
        shell.send(LoopCommand::Shutdown);
        let engine = handle.join().unwrap();
        assert_eq!(engine.tick_count(), 0);
    }

    #[test]
    fn test_toggle_runs_and_pauses() {
        let (shell, handle) = spawn_game_loop(small_engine(), INTERVAL).unwrap();

        shell.send(LoopCommand::Toggle);
        let running = wait_for(&shell, |p| p.snapshot.time.tick >= 5);
        assert_eq!(running.run_state, RunState::Running);

        shell.send(LoopCommand::Toggle);
        let paused = wait_for(&shell, |p| p.run_state == RunState::Stopped);
        std::thread::sleep(Duration::from_millis(20));
        let later = wait_for(&shell, |_| true);
        assert_eq!(later.snapshot.time.tick, paused.snapshot.time.tick);

        shell.send(LoopCommand::Shutdown);
        let engine = handle.join().unwrap();
        assert_eq!(engine.tick_count(), paused.snapshot.time.tick);
    }

    #[test]
    fn test_commands_forwarded_to_engine() {
        let (shell, handle) = spawn_game_loop(small_engine(), INTERVAL).unwrap();

        shell.send(LoopCommand::Sim(SimCommand::InfectRandom));
        wait_for(&shell, |p| p.snapshot.infected_count == 1);

        shell.send(LoopCommand::Sim(SimCommand::CureAll));
        wait_for(&shell, |p| p.snapshot.infected_count == 0);

        shell.send(LoopCommand::Shutdown);
        handle.join().unwrap();
    }

    #[test]
    fn test_reset_stops_the_loop() {
        let (shell, handle) = spawn_game_loop(small_engine(), INTERVAL).unwrap();

        shell.send(LoopCommand::Toggle);
        wait_for(&shell, |p| p.snapshot.time.tick >= 3);

        shell.send(LoopCommand::Sim(SimCommand::Reset {
            width: 300.0,
            height: 150.0,
            population: 7,
        }));
        let reset = wait_for(&shell, |p| p.snapshot.population == 7);
        assert_eq!(reset.run_state, RunState::Stopped);
        assert_eq!(reset.snapshot.time.tick, 0);
        assert_eq!(reset.snapshot.bounds.width(), 300.0);

        shell.send(LoopCommand::Shutdown);
        handle.join().unwrap();
    }

    #[test]
    fn test_rejected_reset_keeps_running() {
        let (shell, handle) = spawn_game_loop(small_engine(), INTERVAL).unwrap();

        shell.send(LoopCommand::Toggle);
        shell.send(LoopCommand::Sim(SimCommand::Reset {
            width: -1.0,
            height: 150.0,
            population: 7,
        }));
        let published = wait_for(&shell, |p| p.snapshot.time.tick >= 3);
        assert_eq!(published.run_state, RunState::Running);
        assert_eq!(published.snapshot.population, 20);

        shell.send(LoopCommand::Shutdown);
        handle.join().unwrap();
    }

    #[test]
    fn test_dropped_sender_ends_loop() {
        let (shell, handle) = spawn_game_loop(small_engine(), INTERVAL).unwrap();
        drop(shell);
        let engine = handle.join().unwrap();
        assert_eq!(engine.population(), 20);
    }
}
