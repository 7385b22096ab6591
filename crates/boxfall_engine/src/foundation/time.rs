//! Time management utilities
//!
//! Frame statistics, stopwatches and the tick clocks that pace the main loop.

use std::time::{Duration, Instant};

/// Frame timer for loop statistics
///
/// The simulation never reads the measured delta; steps are fixed. The
/// timer only reports how fast the loop actually ran.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Measures how long one piece of work took
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Start timing now
    pub fn start_new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since the stopwatch started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time since the stopwatch started, in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}

/// Paces the main loop between ticks
pub trait TickClock {
    /// Block until the next tick is due
    fn wait_for_next_tick(&mut self);
}

/// Wall-clock pacing at a fixed tick period
///
/// Deadlines advance by whole periods, so time spent stepping and presenting
/// is absorbed rather than added to the wait. When the loop falls more than a
/// period behind the deadline resets to now instead of bursting.
pub struct SleepClock {
    period: Duration,
    next_deadline: Instant,
}

impl SleepClock {
    /// Create a clock ticking at `frames_per_second`
    ///
    /// A rate of zero is clamped to one tick per second.
    pub fn new(frames_per_second: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(frames_per_second.max(1)));
        Self {
            period,
            next_deadline: Instant::now() + period,
        }
    }

    /// Time between ticks
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl TickClock for SleepClock {
    fn wait_for_next_tick(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.next_deadline.checked_duration_since(now) {
            std::thread::sleep(remaining);
            self.next_deadline += self.period;
        } else {
            log::trace!("Tick overran its deadline by {:?}", now - self.next_deadline);
            self.next_deadline = now + self.period;
        }
    }
}

/// Clock that never sleeps, for tests and as-fast-as-possible runs
#[derive(Debug, Default)]
pub struct ManualClock {
    waits: u64,
}

impl ManualClock {
    /// Create a new manual clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the loop waited for a tick
    pub fn waits(&self) -> u64 {
        self.waits
    }
}

impl TickClock for ManualClock {
    fn wait_for_next_tick(&mut self) {
        self.waits += 1;
    }
}
