//! Pure stopwatch logic with no platform dependencies.
//! Testable on host, usable on Xous target.

use core::cell::Cell;

mod command;
mod time;

pub use command::{Command, Controls};
pub use time::{decompose, format_hms_cs, format_lap, TimeParts};

/// Monotonic "now" source, in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// A clock that only moves when told to. Useful for driving the model in tests
/// and simulations.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self { now: Cell::new(now_ms) }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunState {
    Idle,
    Running,
    Paused,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lap {
    pub ordinal: u32,
    pub cumulative_ms: u64,
    pub split_ms: u64,
}

pub struct StopwatchModel<C: Clock> {
    clock: C,
    state: RunState,
    // Time banked by earlier run segments.
    accumulated_ms: u64,
    segment_start_ms: u64,
    laps: Vec<Lap>,
}

impl<C: Clock> StopwatchModel<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: RunState::Idle,
            accumulated_ms: 0,
            segment_start_ms: 0,
            laps: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Starts a fresh run or resumes a paused one. Does nothing while running.
    pub fn start(&mut self) {
        if self.state == RunState::Running {
            return;
        }
        self.segment_start_ms = self.clock.now_ms();
        self.state = RunState::Running;
    }

    pub fn pause(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        let now = self.clock.now_ms();
        self.accumulated_ms += now.saturating_sub(self.segment_start_ms);
        self.state = RunState::Paused;
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.segment_start_ms = 0;
        self.laps.clear();
        self.state = RunState::Idle;
    }

    /// Records a lap at the current elapsed time. Returns `None` unless running.
    pub fn lap(&mut self) -> Option<Lap> {
        if self.state != RunState::Running {
            return None;
        }
        let cumulative_ms = self.elapsed_ms();
        let previous_ms = self.laps.last().map_or(0, |lap| lap.cumulative_ms);
        let lap = Lap {
            ordinal: self.laps.len() as u32 + 1,
            cumulative_ms,
            split_ms: cumulative_ms.saturating_sub(previous_ms),
        };
        self.laps.push(lap);
        Some(lap)
    }

    /// Pauses when running, otherwise starts or resumes.
    pub fn toggle(&mut self) {
        match self.state {
            RunState::Running => self.pause(),
            RunState::Idle | RunState::Paused => self.start(),
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Reset => self.reset(),
            Command::Lap => {
                self.lap();
            }
            Command::Toggle => self.toggle(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        match self.state {
            RunState::Running => {
                self.accumulated_ms + self.clock.now_ms().saturating_sub(self.segment_start_ms)
            }
            _ => self.accumulated_ms,
        }
    }

    /// Clock reading at which the current run would have begun had it never
    /// been paused, so that `now - reference == elapsed`. Only defined while
    /// running.
    pub fn reference_start_ms(&self) -> Option<u64> {
        match self.state {
            RunState::Running => Some(self.segment_start_ms.saturating_sub(self.accumulated_ms)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_basic() {
        let clock = ManualClock::new(1000);
        let mut sw = StopwatchModel::new(&clock);
        assert_eq!(sw.state(), RunState::Idle);
        assert_eq!(sw.elapsed_ms(), 0);

        sw.start();
        assert_eq!(sw.state(), RunState::Running);
        clock.set(1500);
        assert_eq!(sw.elapsed_ms(), 500);
        clock.set(2000);
        assert_eq!(sw.elapsed_ms(), 1000);

        sw.pause();
        assert_eq!(sw.state(), RunState::Paused);
        clock.set(5000);
        assert_eq!(sw.elapsed_ms(), 1000); // Stays at 1000 when paused

        sw.start();
        clock.set(5500);
        assert_eq!(sw.elapsed_ms(), 1500);

        sw.reset();
        assert_eq!(sw.state(), RunState::Idle);
        clock.set(10_000);
        assert_eq!(sw.elapsed_ms(), 0);
    }

    #[test]
    fn test_lap_scenario() {
        let clock = ManualClock::new(0);
        let mut sw = StopwatchModel::new(&clock);
        sw.start();

        clock.set(500);
        let lap1 = sw.lap();
        assert_eq!(lap1, Some(Lap { ordinal: 1, cumulative_ms: 500, split_ms: 500 }));

        clock.set(1200);
        let lap2 = sw.lap();
        assert_eq!(lap2, Some(Lap { ordinal: 2, cumulative_ms: 1200, split_ms: 700 }));

        sw.pause();
        assert_eq!(sw.elapsed_ms(), 1200);
        assert_eq!(sw.laps().len(), 2);

        sw.reset();
        assert_eq!(sw.elapsed_ms(), 0);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_resume_shifts_reference() {
        let clock = ManualClock::new(0);
        let mut sw = StopwatchModel::new(&clock);
        sw.start();
        clock.set(300);
        sw.pause();
        assert_eq!(sw.elapsed_ms(), 300);
        assert_eq!(sw.reference_start_ms(), None);

        clock.set(1000);
        sw.start();
        assert_eq!(sw.reference_start_ms(), Some(700));

        clock.set(1100);
        assert_eq!(sw.elapsed_ms(), 400);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let clock = ManualClock::new(200);
        let mut sw = StopwatchModel::new(&clock);
        sw.start();
        clock.set(900);
        sw.start();
        assert_eq!(sw.reference_start_ms(), Some(200));
        assert_eq!(sw.elapsed_ms(), 700);
    }

    #[test]
    fn test_guarded_calls_when_not_running() {
        let clock = ManualClock::new(0);
        let mut sw = StopwatchModel::new(&clock);

        sw.pause();
        assert_eq!(sw.state(), RunState::Idle);
        assert_eq!(sw.lap(), None);
        assert!(sw.laps().is_empty());

        sw.start();
        clock.set(250);
        sw.pause();
        clock.set(400);
        assert_eq!(sw.lap(), None);
        sw.pause();
        assert_eq!(sw.state(), RunState::Paused);
        assert_eq!(sw.elapsed_ms(), 250);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_lap_numbering_restarts_after_reset() {
        let clock = ManualClock::new(0);
        let mut sw = StopwatchModel::new(&clock);
        sw.start();
        clock.set(100);
        sw.lap();
        sw.lap();
        sw.reset();

        sw.start();
        clock.set(160);
        let lap = sw.lap().unwrap();
        assert_eq!(lap.ordinal, 1);
        assert_eq!(lap.cumulative_ms, 60);
        assert_eq!(lap.split_ms, 60);
    }

    #[test]
    fn test_laps_span_pauses() {
        let clock = ManualClock::new(0);
        let mut sw = StopwatchModel::new(&clock);
        sw.start();
        clock.set(400);
        sw.lap();
        clock.set(600);
        sw.pause();
        clock.set(10_000);
        sw.start();
        clock.set(10_300);
        let lap = sw.lap().unwrap();
        assert_eq!(lap.cumulative_ms, 900);
        assert_eq!(lap.split_ms, 500);
    }

    #[test]
    fn test_toggle_and_apply() {
        let clock = ManualClock::new(0);
        let mut sw = StopwatchModel::new(&clock);

        sw.apply(Command::Toggle);
        assert!(sw.is_running());
        clock.advance(50);
        sw.apply(Command::Lap);
        sw.apply(Command::Toggle);
        assert_eq!(sw.state(), RunState::Paused);
        assert_eq!(sw.laps().len(), 1);

        sw.apply(Command::Start);
        assert!(sw.is_running());
        sw.apply(Command::Pause);
        sw.apply(Command::Reset);
        assert_eq!(sw.state(), RunState::Idle);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_reset_while_running() {
        let clock = ManualClock::new(0);
        let mut sw = StopwatchModel::new(&clock);
        sw.start();
        clock.set(5000);
        sw.lap();
        sw.reset();
        assert_eq!(sw.state(), RunState::Idle);
        assert_eq!(sw.elapsed_ms(), 0);
        assert_eq!(sw.reference_start_ms(), None);
        clock.set(9000);
        assert_eq!(sw.elapsed_ms(), 0);
    }
}
