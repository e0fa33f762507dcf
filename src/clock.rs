use stopwatch_core::Clock;

/// Monotonic milliseconds since boot, from the ticktimer server.
pub struct TickClock {
    tt: ticktimer_server::Ticktimer,
}

impl TickClock {
    pub fn new() -> Self {
        let tt = ticktimer_server::Ticktimer::new().expect("can't connect to ticktimer");
        Self { tt }
    }

    pub fn sleep_ms(&self, ms: usize) {
        self.tt.sleep_ms(ms).ok();
    }
}

impl Clock for TickClock {
    fn now_ms(&self) -> u64 {
        self.tt.elapsed_ms()
    }
}
