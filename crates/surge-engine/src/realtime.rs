//! Background tick thread.
//!
//! [`RealtimeMatch`] owns a [`MatchController`] on a dedicated thread
//! stepping at a fixed rate. Target changes arrive over a bounded
//! channel and are drained at tick boundaries, so a tick never blocks
//! waiting on input; snapshot reads go straight to the controller from
//! any thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use surge_core::{ControlError, StepError, TeamId};
use surge_grid::GridState;

use crate::controller::MatchController;

/// Capacity of the command channel; the tick thread drains it each tick.
const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// A control command for the tick thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Point a team's mass at a new cell.
    ///
    /// Applied with the controller's usual rules: coordinates are
    /// clamped and wall cells are ignored. Commands naming an
    /// unconfigured team are dropped.
    SetTarget {
        /// Team whose target to move.
        team: TeamId,
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
    },
}

/// A match driven by a background thread at a fixed tick rate.
///
/// Dropping the runner shuts the thread down and joins it.
pub struct RealtimeMatch {
    controller: Arc<MatchController>,
    cmd_tx: Option<Sender<Command>>,
    shutdown_flag: Arc<AtomicBool>,
    tick_thread: Option<JoinHandle<()>>,
    last_error: Arc<Mutex<Option<StepError>>>,
}

impl RealtimeMatch {
    /// Spawn the tick thread.
    ///
    /// Returns [`ControlError::InvalidTickRate`] unless `tick_rate_hz`
    /// is finite and positive.
    pub fn new(controller: MatchController, tick_rate_hz: f64) -> Result<Self, ControlError> {
        if !tick_rate_hz.is_finite() || tick_rate_hz <= 0.0 {
            return Err(ControlError::InvalidTickRate {
                value: tick_rate_hz,
            });
        }

        let controller = Arc::new(controller);
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(COMMAND_CHANNEL_CAPACITY);
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let last_error = Arc::new(Mutex::new(None));

        let tick_thread = {
            let controller = Arc::clone(&controller);
            let shutdown_flag = Arc::clone(&shutdown_flag);
            let last_error = Arc::clone(&last_error);
            let budget = Duration::from_secs_f64(1.0 / tick_rate_hz);
            thread::spawn(move || tick_loop(controller, cmd_rx, shutdown_flag, last_error, budget))
        };

        Ok(Self {
            controller,
            cmd_tx: Some(cmd_tx),
            shutdown_flag,
            tick_thread: Some(tick_thread),
            last_error,
        })
    }

    /// The controller being driven.
    pub fn controller(&self) -> &Arc<MatchController> {
        &self.controller
    }

    /// The most recently published state.
    pub fn snapshot(&self) -> Arc<GridState> {
        self.controller.snapshot()
    }

    /// Queue a command for the next tick boundary.
    ///
    /// Returns [`ControlError::ChannelFull`] under back-pressure and
    /// [`ControlError::Shutdown`] once the tick thread has exited.
    pub fn submit(&self, command: Command) -> Result<(), ControlError> {
        let tx = self.cmd_tx.as_ref().ok_or(ControlError::Shutdown)?;
        match tx.try_send(command) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(ControlError::ChannelFull),
            Err(TrySendError::Disconnected(_)) => Err(ControlError::Shutdown),
        }
    }

    /// The error that stopped the tick thread, if any.
    ///
    /// Tick errors are configuration bugs; the thread records the first
    /// one and stops ticking rather than publishing a corrupt state.
    pub fn last_error(&self) -> Option<StepError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stop the tick thread and join it, returning any recorded error.
    pub fn shutdown(mut self) -> Option<StepError> {
        self.stop();
        self.last_error()
    }

    fn stop(&mut self) {
        self.shutdown_flag.store(true, Ordering::Release);
        self.cmd_tx.take();
        if let Some(handle) = self.tick_thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RealtimeMatch {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tick_loop(
    controller: Arc<MatchController>,
    cmd_rx: Receiver<Command>,
    shutdown_flag: Arc<AtomicBool>,
    last_error: Arc<Mutex<Option<StepError>>>,
    budget: Duration,
) {
    while !shutdown_flag.load(Ordering::Acquire) {
        let started = Instant::now();

        while let Ok(command) = cmd_rx.try_recv() {
            match command {
                Command::SetTarget { team, x, y } => {
                    // Unknown teams are dropped; the sender may race a
                    // reconfiguration and must not kill the match.
                    let _ = controller.set_target(team, x, y);
                }
            }
        }

        if let Err(error) = controller.tick() {
            *last_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
            return;
        }

        if let Some(remaining) = budget.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surge_core::TickId;
    use surge_field::ManhattanBuilder;
    use surge_test_utils::world_from_ascii;

    fn arena() -> MatchController {
        let world = world_from_ascii(
            "########
             #0....1#
             #......#
             ########",
        );
        MatchController::two_team(world, Box::new(ManhattanBuilder)).unwrap()
    }

    #[test]
    fn rejects_bad_tick_rates() {
        for rate in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                RealtimeMatch::new(arena(), rate),
                Err(ControlError::InvalidTickRate { .. })
            ));
        }
    }

    #[test]
    fn ticks_advance_without_caller_involvement() {
        let rt = RealtimeMatch::new(arena(), 500.0).unwrap();
        let deadline = Instant::now() + Duration::from_secs(2);
        while rt.controller().tick_id() < TickId(3) {
            assert!(Instant::now() < deadline, "tick thread made no progress");
            thread::sleep(Duration::from_millis(5));
        }
        assert!(rt.shutdown().is_none());
    }

    #[test]
    fn submitted_targets_are_applied_at_a_tick_boundary() {
        let rt = RealtimeMatch::new(arena(), 500.0).unwrap();
        rt.submit(Command::SetTarget {
            team: TeamId(0),
            x: 6,
            y: 2,
        })
        .unwrap();
        let deadline = Instant::now() + Duration::from_secs(2);
        while rt.controller().target(TeamId(0)).unwrap() != surge_core::Cell::new(6, 2) {
            assert!(Instant::now() < deadline, "target was never applied");
            thread::sleep(Duration::from_millis(5));
        }
        // Conservation holds while the thread free-runs.
        let snap = rt.snapshot();
        assert_eq!(snap.particle_count(), 2);
        rt.shutdown();
    }

    #[test]
    fn submit_after_shutdown_reports_shutdown() {
        let mut rt = RealtimeMatch::new(arena(), 500.0).unwrap();
        rt.stop();
        assert_eq!(
            rt.submit(Command::SetTarget {
                team: TeamId(0),
                x: 1,
                y: 1,
            }),
            Err(ControlError::Shutdown)
        );
    }
}
