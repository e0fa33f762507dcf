use stopwatch_core::{Command, StopwatchModel};

use crate::clock::TickClock;

pub struct StopwatchState {
    pub model: StopwatchModel<TickClock>,
    /// Number of most-recent laps scrolled past at the top of the list.
    pub lap_scroll_offset: usize,
}

impl StopwatchState {
    pub fn new() -> Self {
        Self {
            model: StopwatchModel::new(TickClock::new()),
            lap_scroll_offset: 0,
        }
    }

    pub fn apply(&mut self, command: Command) {
        let before = self.model.state();
        match command {
            Command::Lap => {
                if let Some(lap) = self.model.lap() {
                    log::debug!("lap {} at {} ms (+{} ms)", lap.ordinal, lap.cumulative_ms, lap.split_ms);
                    // Keep the newest lap in view
                    self.lap_scroll_offset = 0;
                }
            }
            Command::Reset => {
                self.model.reset();
                self.lap_scroll_offset = 0;
            }
            _ => self.model.apply(command),
        }
        let after = self.model.state();
        if before != after {
            log::debug!("{:?} -> {:?} at {} ms", before, after, self.model.elapsed_ms());
        }
    }

    pub fn scroll_up(&mut self) -> bool {
        if self.lap_scroll_offset > 0 {
            self.lap_scroll_offset -= 1;
            true
        } else {
            false
        }
    }

    pub fn scroll_down(&mut self) -> bool {
        if self.lap_scroll_offset + 1 < self.model.laps().len() {
            self.lap_scroll_offset += 1;
            true
        } else {
            false
        }
    }
}
