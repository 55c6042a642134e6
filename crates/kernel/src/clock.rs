use std::time::{Duration, Instant};

/// Source of monotonic timestamps measured from a fixed origin.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock time source backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct MonotonicTimer {
    origin: Instant,
}

impl MonotonicTimer {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTimer {
    fn default() -> Self {
        Self::start()
    }
}

impl TimeSource for MonotonicTimer {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Time source advanced by hand. Used by tests and headless simulation.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now: Duration,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn advance_millis(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl TimeSource for ManualTimer {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Per-frame timing snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame. Zero on the first frame.
    pub delta: f32,
    /// Time since the first frame.
    pub elapsed: Duration,
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

impl FrameTime {
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed.as_secs_f32() * 1000.0
    }

    /// Instantaneous frame rate, `None` while the delta is zero.
    pub fn fps(&self) -> Option<f32> {
        (self.delta > 0.0).then(|| 1.0 / self.delta)
    }
}

/// Derives delta-time from successive timestamps.
///
/// The clock never blocks. Frame throttling is the caller's job, see
/// [`FrameLimiter`].
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    previous: Option<Duration>,
    origin: Option<Duration>,
    frame_index: u64,
    max_delta: Option<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp every delta to at most `max` seconds.
    pub fn with_max_delta(max: f32) -> Self {
        debug_assert!(max > 0.0);
        Self {
            max_delta: Some(max),
            ..Self::default()
        }
    }

    /// Seconds elapsed since the previous call; 0 on the first call.
    ///
    /// A timestamp earlier than the previous one yields 0.
    pub fn tick(&mut self, now: Duration) -> f32 {
        let delta = match self.previous {
            None => 0.0,
            Some(prev) => now.saturating_sub(prev).as_secs_f32(),
        };
        self.previous = Some(now);
        match self.max_delta {
            Some(max) => delta.min(max),
            None => delta,
        }
    }

    /// Tick and return the full timing snapshot.
    pub fn advance(&mut self, now: Duration) -> FrameTime {
        let origin = *self.origin.get_or_insert(now);
        let delta = self.tick(now);
        let time = FrameTime {
            delta,
            elapsed: now.saturating_sub(origin),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }

    /// Forget the previous timestamp; the next tick returns 0 again.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

/// Computes how long a loop should wait to hold a target frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLimiter {
    interval: Duration,
}

impl FrameLimiter {
    /// `None` when `target_fps` is 0.
    pub fn new(target_fps: u32) -> Option<Self> {
        if target_fps == 0 {
            return None;
        }
        Some(Self {
            interval: Duration::from_secs_f64(1.0 / target_fps as f64),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Remaining wait after a frame that took `since_previous`, if any.
    pub fn time_to_wait(&self, since_previous: Duration) -> Option<Duration> {
        self.interval
            .checked_sub(since_previous)
            .filter(|wait| !wait.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(Duration::from_millis(12_345)), 0.0);
    }

    #[test]
    fn tick_reports_elapsed_seconds() {
        let mut clock = FrameClock::new();
        let mut timer = ManualTimer::new();
        clock.tick(timer.now());
        for n in [1u64, 16, 100, 250, 1000] {
            timer.advance_millis(n);
            assert!(approx(clock.tick(timer.now()), n as f32 / 1000.0));
        }
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::from_millis(500));
        assert_eq!(clock.tick(Duration::from_millis(100)), 0.0);
        assert!(approx(clock.tick(Duration::from_millis(200)), 0.1));
    }

    #[test]
    fn max_delta_clamps() {
        let mut clock = FrameClock::with_max_delta(0.1);
        clock.tick(Duration::ZERO);
        assert!(approx(clock.tick(Duration::from_secs(5)), 0.1));
    }

    #[test]
    fn advance_tracks_elapsed_and_index() {
        let mut clock = FrameClock::new();
        let first = clock.advance(Duration::from_millis(1000));
        assert_eq!(first.frame_index, 0);
        assert_eq!(first.elapsed, Duration::ZERO);
        assert_eq!(first.delta, 0.0);

        let second = clock.advance(Duration::from_millis(1250));
        assert_eq!(second.frame_index, 1);
        assert_eq!(second.elapsed, Duration::from_millis(250));
        assert!(approx(second.delta, 0.25));
        assert!(approx(second.elapsed_millis(), 250.0));
    }

    #[test]
    fn fps_is_inverse_delta() {
        let mut clock = FrameClock::new();
        let first = clock.advance(Duration::ZERO);
        assert_eq!(first.fps(), None);

        let second = clock.advance(Duration::from_millis(20));
        assert!(approx(second.fps().unwrap(), 50.0));
    }

    #[test]
    fn reset_restarts_delta() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::from_millis(10));
        clock.reset();
        assert_eq!(clock.tick(Duration::from_millis(900)), 0.0);
    }

    #[test]
    fn limiter_waits_remaining_interval() {
        let limiter = FrameLimiter::new(50).unwrap();
        assert_eq!(limiter.interval(), Duration::from_millis(20));
        assert_eq!(
            limiter.time_to_wait(Duration::from_millis(5)),
            Some(Duration::from_millis(15))
        );
        assert_eq!(limiter.time_to_wait(Duration::from_millis(20)), None);
        assert_eq!(limiter.time_to_wait(Duration::from_millis(35)), None);
    }

    #[test]
    fn zero_fps_has_no_limiter() {
        assert!(FrameLimiter::new(0).is_none());
    }
}
