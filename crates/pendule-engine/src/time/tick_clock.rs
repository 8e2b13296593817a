use std::time::{Duration, Instant};

/// Timing snapshot of one finished tick.
#[derive(Debug, Copy, Clone)]
pub struct TickTime {
    /// Time spent doing the tick's work.
    pub elapsed: Duration,

    /// Time left to wait before the next tick, `max(0, period - elapsed)`.
    pub delay: Duration,
}

/// Fixed-cadence pacer for cooperative schedulers.
///
/// The clock does not sleep. It records when a tick starts and ends and turns
/// the remainder of the period into a deadline the event loop can wait for.
/// Work that overruns the period makes the next tick due immediately; lost
/// time is not made up.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    started: Option<Instant>,
    deadline: Instant,
}

impl TickClock {
    /// Creates a clock whose first tick is due at `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        debug_assert!(!period.is_zero(), "tick period must be non-zero");
        Self {
            period,
            started: None,
            deadline: now,
        }
    }

    /// Instant at which the next tick should start.
    #[inline]
    pub fn next_deadline(&self) -> Instant {
        self.deadline
    }

    /// Records the start of a tick (`t1`).
    pub fn begin(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Records the end of a tick (`t2`) and schedules the next one.
    ///
    /// Without a matching `begin`, the tick is treated as having taken no time.
    pub fn finish(&mut self, now: Instant) -> TickTime {
        let started = self.started.take().unwrap_or(now);
        let elapsed = now.saturating_duration_since(started);
        let delay = Self::delay_after(self.period, elapsed);

        self.deadline = now + delay;

        TickTime { elapsed, delay }
    }

    /// `max(0, period - elapsed)`.
    #[inline]
    pub fn delay_after(period: Duration, elapsed: Duration) -> Duration {
        period.saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn first_tick_is_due_immediately() {
        let t0 = Instant::now();
        let clock = TickClock::new(SEC, t0);
        assert_eq!(clock.next_deadline(), t0);
    }

    #[test]
    fn short_work_waits_out_the_rest_of_the_period() {
        let t0 = Instant::now();
        let mut clock = TickClock::new(SEC, t0);

        clock.begin(t0);
        let tt = clock.finish(t0 + Duration::from_millis(200));

        assert_eq!(tt.elapsed, Duration::from_millis(200));
        assert_eq!(tt.delay, Duration::from_millis(800));
        assert_eq!(clock.next_deadline(), t0 + SEC);
    }

    #[test]
    fn overrun_schedules_next_tick_immediately() {
        let t0 = Instant::now();
        let mut clock = TickClock::new(SEC, t0);

        clock.begin(t0);
        let end = t0 + Duration::from_millis(1500);
        let tt = clock.finish(end);

        assert_eq!(tt.delay, Duration::ZERO);
        assert_eq!(clock.next_deadline(), end);
    }

    #[test]
    fn finish_without_begin_takes_no_time() {
        let t0 = Instant::now();
        let mut clock = TickClock::new(SEC, t0);
        let tt = clock.finish(t0);
        assert_eq!(tt.elapsed, Duration::ZERO);
        assert_eq!(clock.next_deadline(), t0 + SEC);
    }

    #[test]
    fn delay_after_saturates_at_zero() {
        assert_eq!(TickClock::delay_after(SEC, Duration::from_secs(5)), Duration::ZERO);
        assert_eq!(
            TickClock::delay_after(SEC, Duration::from_millis(1)),
            Duration::from_millis(999)
        );
    }
}
