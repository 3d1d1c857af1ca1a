//! Run lifecycle: Idle -> Running -> Finished -> (start again | Idle)
//!
//! `SessionController` owns the per-run state and is driven by explicit
//! commands plus `tick(request, now)`. It never schedules anything itself:
//! each tick returns whether another frame is wanted and the host decides
//! when to deliver it. `Runner` is that host loop for any `Clock` and
//! `FrameScheduler`.

use tracing::{debug, info, warn};

use super::host::{Clock, FrameHandle, FrameRequest, FrameScheduler, ManualClock, RunId};
use super::integrator::euler_step;
use super::jitter::Jitter;
use super::params::{SimulationConfig, Track, SIMULATION_SPEED};
use super::states::{DisplayState, KinematicState, SessionState, TickSnapshot};
use crate::error::{finite, Result, SimError};
use crate::measurement::grading::{grade, Verdict};
use crate::measurement::ledger::Ledger;
use crate::measurement::record::MeasurementRecord;

/// Inputs of the lifecycle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    Tick { reached_finish: bool },
    Reset,
}

/// Transition table; `None` means the event is ignored in that state
pub fn next_state(from: SessionState, event: Event) -> Option<SessionState> {
    use SessionState::*;
    match (from, event) {
        (Idle | Finished, Event::Start) => Some(Running),
        (Running, Event::Tick { reached_finish: false }) => Some(Running),
        (Running, Event::Tick { reached_finish: true }) => Some(Finished),
        (Running | Finished, Event::Reset) => Some(Idle),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Deliver this request on the next frame
    Started(FrameRequest),
    /// Start while running is a no-op
    AlreadyRunning,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickResult {
    /// Still running; schedule `next` for the following frame
    Continue { next: FrameRequest, snapshot: TickSnapshot },
    /// Crossed the finish line; `row` is the new ledger row (1-based)
    Finished { snapshot: TickSnapshot, row: usize, record: MeasurementRecord },
    /// Request from a superseded run or delivered while not running
    Stale,
}

#[derive(Debug, Clone)]
pub struct SessionController {
    config: SimulationConfig,
    track: Track,
    simulation_speed: f64,
    jitter: Jitter,
    state: SessionState,
    kinematics: KinematicState,
    display: DisplayState,
    run: RunId,
    last_ms: f64,
    ledger: Ledger,
}

impl SessionController {
    pub fn new(config: SimulationConfig, track: Track, simulation_speed: f64, jitter: Jitter) -> Self {
        Self {
            config,
            track,
            simulation_speed,
            jitter,
            state: SessionState::Idle,
            kinematics: KinematicState::at_rest(),
            display: DisplayState::default(),
            run: RunId::default(),
            last_ms: 0.0,
            ledger: Ledger::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn kinematics(&self) -> &KinematicState {
        &self.kinematics
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn run_id(&self) -> RunId {
        self.run
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// What the UI renders right now
    pub fn snapshot(&self) -> TickSnapshot {
        let visual_position = if self.state == SessionState::Finished {
            self.track.pixel_length
        } else {
            self.track.visual_position(self.kinematics.x)
        };
        TickSnapshot { display: self.display, visual_position, state: self.state }
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        let mass = self.check_unlocked("mass", mass)?;
        self.config.mass = mass;
        debug!(mass, "mass set");
        Ok(())
    }

    pub fn set_force(&mut self, force: f64) -> Result<()> {
        let force = self.check_unlocked("force", force)?;
        self.config.force = force;
        debug!(force, "force set");
        Ok(())
    }

    fn check_unlocked(&self, what: &'static str, value: f64) -> Result<f64> {
        if self.state == SessionState::Running {
            warn!(what, value, "ignored while running");
            return Err(SimError::ConfigLocked);
        }
        finite(what, value).inspect_err(|e| warn!("{e}"))
    }

    pub fn request_start(&mut self, now_ms: f64) -> StartOutcome {
        let Some(next) = next_state(self.state, Event::Start) else {
            debug!(run = self.run.0, "start ignored, already running");
            return StartOutcome::AlreadyRunning;
        };
        self.run = RunId(self.run.0 + 1);
        self.kinematics = KinematicState::at_rest();
        self.display = DisplayState::default();
        self.last_ms = now_ms;
        self.state = next;
        info!(
            run = self.run.0,
            mass = self.config.mass,
            force = self.config.force,
            "run started"
        );
        StartOutcome::Started(FrameRequest { run: self.run })
    }

    /// Advance one frame. `now_ms` is the host frame timestamp.
    pub fn tick(&mut self, req: FrameRequest, now_ms: f64) -> TickResult {
        if self.state != SessionState::Running || req.run != self.run {
            debug!(stale = req.run.0, current = self.run.0, "stale frame dropped");
            return TickResult::Stale;
        }

        let dt = ((now_ms - self.last_ms) / 1000.0).max(0.0) * self.simulation_speed;
        self.last_ms = now_ms;

        self.kinematics = euler_step(self.kinematics, &self.config, dt);
        self.display = self.jitter.display(&self.kinematics);

        let reached_finish = self.kinematics.x >= self.config.track_length;
        // Running only ever moves to Running or Finished on a tick
        self.state = next_state(self.state, Event::Tick { reached_finish }).unwrap_or(self.state);

        if !reached_finish {
            let snapshot = self.snapshot();
            debug!(
                t = self.kinematics.t,
                x = self.kinematics.x,
                v = self.kinematics.v,
                px = snapshot.visual_position,
                "tick"
            );
            return TickResult::Continue { next: FrameRequest { run: self.run }, snapshot };
        }

        self.kinematics.x = self.config.track_length;
        let record = MeasurementRecord::new(
            self.config.mass,
            self.config.force,
            self.display.time,
            self.display.velocity,
        );
        let row = self.ledger.record_experiment(record);
        info!(
            run = self.run.0,
            row,
            time = record.time,
            velocity = record.velocity,
            "run finished"
        );
        TickResult::Finished { snapshot: self.snapshot(), row, record }
    }

    /// Back to Idle with zeroed state; frames from the old run go stale
    pub fn request_reset(&mut self) {
        if let Some(next) = next_state(self.state, Event::Reset) {
            self.state = next;
        }
        self.run = RunId(self.run.0 + 1);
        self.kinematics = KinematicState::at_rest();
        self.display = DisplayState::default();
        info!(run = self.run.0, "session reset");
    }

    pub fn clear_ledger(&mut self) {
        self.ledger.clear();
        info!("ledger cleared");
    }

    pub fn delete_ledger_entry(&mut self, index: usize) -> Result<MeasurementRecord> {
        let removed = self.ledger.delete(index)?;
        debug!(index, remaining = self.ledger.len(), "ledger row deleted");
        Ok(removed)
    }

    /// Grade `user` against ledger row `index` (1-based)
    pub fn submit_grade(&self, index: usize, user: f64) -> Result<Verdict> {
        let record = self.ledger.get(index)?;
        let verdict = grade(user, record);
        debug!(index, user, "{verdict}");
        Ok(verdict)
    }

    /// Append a row measured outside the simulation
    pub fn add_result(&mut self, mass: f64, force: f64, time: f64, velocity: f64) -> usize {
        self.ledger.push(MeasurementRecord::new(mass, force, time, velocity))
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(SimulationConfig::default(), Track::default(), SIMULATION_SPEED, Jitter::disabled())
    }
}

/// Host loop: delivers frames from a scheduler into the controller
#[derive(Debug)]
pub struct Runner<C, S> {
    controller: SessionController,
    clock: C,
    scheduler: S,
    pending: Option<FrameHandle>,
}

impl<C: Clock, S: FrameScheduler> Runner<C, S> {
    pub fn new(controller: SessionController, clock: C, scheduler: S) -> Self {
        Self { controller, clock, scheduler, pending: None }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Commands that do not touch scheduling (set mass, ledger edits)
    pub fn controller_mut(&mut self) -> &mut SessionController {
        &mut self.controller
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Returns false when the start was ignored
    pub fn start(&mut self) -> bool {
        match self.controller.request_start(self.clock.now_ms()) {
            StartOutcome::Started(req) => {
                if let Some(old) = self.pending.take() {
                    self.scheduler.cancel_frame(old);
                }
                self.pending = Some(self.scheduler.request_frame(req));
                true
            }
            StartOutcome::AlreadyRunning => false,
        }
    }

    /// Cancel the in-flight frame, then reset the session
    pub fn reset(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.controller.request_reset();
    }

    /// Deliver one due frame, if any, and schedule the next on `Continue`
    pub fn pump(&mut self) -> Option<TickResult> {
        let req = self.scheduler.next_due()?;
        if req.run == self.controller.run_id() {
            self.pending = None;
        }
        let result = self.controller.tick(req, self.clock.now_ms());
        if let TickResult::Continue { next, .. } = &result {
            self.pending = Some(self.scheduler.request_frame(*next));
        }
        Some(result)
    }
}

impl<S: FrameScheduler> Runner<ManualClock, S> {
    /// Step the clock by `frame_ms` per frame until the run finishes, nothing
    /// is scheduled, or `max_frames` frames were delivered. Returns the new
    /// ledger row when the run finished.
    pub fn run_frames(&mut self, frame_ms: f64, max_frames: usize) -> Option<usize> {
        for _ in 0..max_frames {
            self.clock.advance(frame_ms);
            match self.pump()? {
                TickResult::Finished { row, .. } => return Some(row),
                TickResult::Continue { .. } | TickResult::Stale => {}
            }
        }
        None
    }
}
