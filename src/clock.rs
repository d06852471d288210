use std::time::Instant;

/// Monotonic tick source.
pub trait Counter {
    /// Ticks per second.
    fn frequency(&self) -> u64;
    fn now(&self) -> u64;
}

/// Nanosecond counter backed by [`Instant`].
pub struct MonotonicCounter {
    origin: Instant,
}

impl MonotonicCounter {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Counter for MonotonicCounter {
    fn frequency(&self) -> u64 {
        1_000_000_000
    }

    fn now(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Frame clock: measures the time between two [`Clock::tick`] calls.
pub struct Clock<C: Counter = MonotonicCounter> {
    counter: C,
    frequency: f64,
    last_tick: u64,
    delta: f64,
}

impl<C: Counter> Clock<C> {
    /// Reported when the last delta is zero, and the ceiling for any other value.
    pub const MAX_FPS: u32 = 10_000;

    pub fn new(counter: C) -> Self {
        let frequency = counter.frequency() as f64;
        let last_tick = counter.now();

        Self {
            counter,
            frequency,
            last_tick,
            delta: 0.0,
        }
    }

    /// Seconds elapsed since the previous tick (or since construction).
    pub fn tick(&mut self) -> f64 {
        let now = self.counter.now();
        self.delta = now.saturating_sub(self.last_tick) as f64 / self.frequency;
        self.last_tick = now;
        self.delta
    }

    pub fn get_fps(&self) -> u32 {
        if self.delta <= 0.0 {
            return Self::MAX_FPS;
        }

        (1.0 / self.delta).floor().min(Self::MAX_FPS as f64) as u32
    }
}
