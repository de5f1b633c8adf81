//! Background worker hosting an [`Engine`].
//!
//! One step per loop tick, with a non-blocking command poll between ticks as
//! the cancellation point: pausing or stopping never has to abort an
//! iteration mid-step, because each step is short and atomic. State updates
//! to the consumer are throttled to every `update_every` generations so
//! display work cannot dominate the optimization cadence.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::dna::Genome;
use crate::engine::{Engine, RunState};
use crate::settings::EvolverSettings;

/// commands from the host to the worker
pub enum EngineCommand {
    /// replace the target buffer and restart the run
    LoadTarget(Vec<u8>),
    Pause,
    Resume,
    /// tear the worker down; the loop exits at the next tick boundary
    Stop,
}

/// periodic state sent back to the host. the genome is shared, not copied;
/// the consumer renders it at whatever display resolution it likes
pub struct EngineUpdate {
    pub generation: u64,
    pub fitness: f64,
    pub genome: Arc<Genome>,
}

/// Handle to a spawned engine worker. Dropping it stops the worker.
pub struct EngineHandle {
    command_tx: mpsc::Sender<EngineCommand>,
    pub update_rx: mpsc::Receiver<EngineUpdate>,
    thread: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    /// Spawn the worker with its own engine built from `settings`.
    pub fn spawn(settings: EvolverSettings) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<EngineCommand>();
        let (update_tx, update_rx) = mpsc::channel::<EngineUpdate>();

        let thread = thread::Builder::new()
            .name("engine".to_owned())
            .spawn(move || worker_loop(settings, command_rx, update_tx))
            .expect("spawn engine thread");

        EngineHandle {
            command_tx,
            update_rx,
            thread: Some(thread),
        }
    }

    pub fn load_target(&self, rgba: Vec<u8>) {
        let _ = self.command_tx.send(EngineCommand::LoadTarget(rgba));
    }

    pub fn pause(&self) {
        let _ = self.command_tx.send(EngineCommand::Pause);
    }

    pub fn resume(&self) {
        let _ = self.command_tx.send(EngineCommand::Resume);
    }

    /// Stop the worker and wait for it to exit.
    pub fn stop(mut self) {
        let _ = self.command_tx.send(EngineCommand::Stop);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.command_tx.send(EngineCommand::Stop);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

fn worker_loop(
    settings: EvolverSettings,
    command_rx: mpsc::Receiver<EngineCommand>,
    update_tx: mpsc::Sender<EngineUpdate>,
) {
    let update_every = settings.update_every.max(1);
    let mut engine = Engine::new(&settings);

    loop {
        profiling::scope!("engine_thread_loop");

        // drain pending commands without blocking
        while let Ok(cmd) = command_rx.try_recv() {
            match cmd {
                EngineCommand::LoadTarget(rgba) => match engine.load_target(rgba) {
                    Ok(()) => send_update(&update_tx, &engine),
                    Err(err) => tracing::warn!(%err, "target rejected"),
                },
                EngineCommand::Pause => engine.pause(),
                EngineCommand::Resume => engine.resume(),
                EngineCommand::Stop => return,
            }
        }

        if engine.state() == RunState::Running {
            engine.step();
            if engine.generation() % update_every == 0 {
                send_update(&update_tx, &engine);
            }
        } else {
            // nothing to do until a command arrives
            thread::sleep(Duration::from_millis(10));
        }
    }
}

fn send_update(update_tx: &mpsc::Sender<EngineUpdate>, engine: &Engine) {
    let _ = update_tx.send(EngineUpdate {
        generation: engine.generation(),
        fitness: engine.fitness(),
        genome: Arc::new(engine.genome().clone()),
    });
}
