use std::{
    cmp::max,
    time::{Duration, Instant},
};

/// Paces game ticks: one tick is due every `wait_time`, independently
/// of how often the graphics frames arrive
pub struct Control {
    wait_time: Duration,
    min_wait_time: Duration,
    last_update: Instant,

    // amount of time which ticks have not yet
    // been accounted for (will be included next time
    // this in done), in units of `wait_time`
    remainder: f64,

    // number of ticks that still need to be
    // performed to catch up with the current time
    missed_updates: Option<usize>,

    max_catch_up: usize,
}

impl Control {
    /// How much `wait_time` shrinks every time the snake eats
    pub const WAIT_TIME_STEP: Duration = Duration::from_millis(2);

    /// Ticks beyond this many in a single catch-up are dropped, with
    /// one the snake never moves more than a cell between two frames
    pub const DEFAULT_MAX_CATCH_UP: usize = 1;

    pub fn new(wait_time: Duration, min_wait_time: Duration) -> Self {
        Self::new_at(wait_time, min_wait_time, Instant::now())
    }

    pub fn new_at(wait_time: Duration, min_wait_time: Duration, now: Instant) -> Self {
        Self {
            wait_time: max(wait_time, min_wait_time),
            min_wait_time,
            last_update: now,
            remainder: 0.,
            missed_updates: None,
            max_catch_up: Self::DEFAULT_MAX_CATCH_UP,
        }
    }

    pub fn set_max_catch_up(&mut self, max_catch_up: usize) {
        self.max_catch_up = max_catch_up.max(1);
    }

    /// Forget all time elapsed so far, the next tick is due a full
    /// `wait_time` after `now`
    pub fn reset_at(&mut self, now: Instant) {
        self.last_update = now;
        self.remainder = 0.;
        self.missed_updates = None;
    }

    pub fn wait_time(&self) -> Duration {
        self.wait_time
    }

    #[cfg(test)]
    pub fn min_wait_time(&self) -> Duration {
        self.min_wait_time
    }

    /// Shorten the wait between ticks by one step, never going below
    /// the minimum
    pub fn speed_up(&mut self) {
        self.speed_up_at(Instant::now())
    }

    pub fn speed_up_at(&mut self, now: Instant) {
        let new_wait_time = max(
            self.wait_time.saturating_sub(Self::WAIT_TIME_STEP),
            self.min_wait_time,
        );
        if new_wait_time == self.wait_time {
            return;
        }

        // freeze the fraction of the current tick that has elapsed
        let frame_fraction = self.frame_fraction_at(now);
        self.wait_time = new_wait_time;
        self.set_last_update_to_match_frame_fraction(frame_fraction, now);
    }

    // adjust self.last_update to make it match the expected
    // frame_fraction under the current wait time
    fn set_last_update_to_match_frame_fraction(&mut self, frac: f64, now: Instant) {
        let elapsed = (frac - self.remainder).max(0.) * self.wait_time.as_secs_f64();
        self.last_update = now
            .checked_sub(Duration::from_secs_f64(elapsed))
            .unwrap_or(now);
    }

    // repeatedly called as while loop condition
    pub fn can_update(&mut self) -> bool {
        self.can_update_at(Instant::now())
    }

    pub fn can_update_at(&mut self, now: Instant) -> bool {
        match &mut self.missed_updates {
            Some(0) => {
                self.missed_updates = None;
                false
            }
            Some(n) => {
                *n -= 1;
                true
            }
            None => {
                // calculate how many ticks should have occurred
                // since the last call to can_update
                let ticks = now.saturating_duration_since(self.last_update).as_secs_f64()
                    / self.wait_time.as_secs_f64()
                    + self.remainder;
                let missed_updates = ticks as usize;

                if missed_updates > 0 {
                    self.remainder = ticks % 1.;
                    self.last_update = now;

                    if missed_updates > self.max_catch_up {
                        tracing::debug!(
                            "dropping {} ticks after a stall",
                            missed_updates - self.max_catch_up
                        );
                    }
                    self.missed_updates = Some(missed_updates.min(self.max_catch_up) - 1);

                    true
                } else {
                    false
                }
            }
        }
    }

    /// Fraction of the current tick that has elapsed
    pub fn frame_fraction_at(&self, now: Instant) -> f64 {
        let frac = now.saturating_duration_since(self.last_update).as_secs_f64()
            / self.wait_time.as_secs_f64()
            + self.remainder;
        frac.min(1.)
    }
}
