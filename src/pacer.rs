use std::thread;
use std::time::{Duration, Instant};

/// Fixed-rate frame pacer.
#[derive(Debug)]
pub struct Pacer {
    period: Duration,
    next_deadline: Instant,
}

impl Pacer {
    /// Starts the schedule now; the first deadline is one period away.
    #[must_use]
    pub fn new(rate: u32) -> Self {
        let period = tick_period(rate);
        Self {
            period,
            next_deadline: Instant::now() + period,
        }
    }

    /// Blocks until the next deadline, then schedules the one after it.
    ///
    /// When the deadline has already passed, the schedule restarts from now
    /// rather than running catch-up ticks.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.next_deadline > now {
            thread::sleep(self.next_deadline - now);
            self.next_deadline += self.period;
        } else {
            self.next_deadline = now + self.period;
        }
    }
}

/// Duration of one tick at `rate` ticks per second.
#[must_use]
pub fn tick_period(rate: u32) -> Duration {
    Duration::from_secs(1) / rate.max(1)
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::{Duration, Instant};

    use super::{tick_period, Pacer};

    #[test]
    fn period_matches_rate() {
        assert_eq!(tick_period(10), Duration::from_millis(100));
        assert_eq!(tick_period(1), Duration::from_secs(1));
    }

    #[test]
    fn zero_rate_is_treated_as_one_per_second() {
        assert_eq!(tick_period(0), Duration::from_secs(1));
    }

    #[test]
    fn first_tick_waits_a_full_period() {
        let started = Instant::now();
        let mut pacer = Pacer::new(20);

        pacer.tick();

        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn consecutive_ticks_are_one_period_apart() {
        let mut pacer = Pacer::new(50);
        let started = Instant::now();

        pacer.tick();
        assert!(started.elapsed() >= Duration::from_millis(20));
        pacer.tick();
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn late_caller_is_not_given_catch_up_ticks() {
        let mut pacer = Pacer::new(100);
        thread::sleep(Duration::from_millis(35));

        pacer.tick();
        let resumed = Instant::now();
        pacer.tick();

        assert!(resumed.elapsed() >= Duration::from_millis(8));
    }
}
