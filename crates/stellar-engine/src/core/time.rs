/// Monotonic scene clock. Starts at zero and only moves forward.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    elapsed: f64,
    delta: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by a frame delta in seconds. Negative or non-finite deltas
    /// (host clock hiccups) count as zero.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.delta = dt;
        self.elapsed += dt as f64;
    }

    /// Seconds since the clock started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Delta of the most recent advance.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Lifecycle of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

/// Render-loop driver. The host calls `tick` from its frame callback
/// (`requestAnimationFrame`); ticks while stopped are ignored.
/// Every running tick produces exactly one frame: no skipping, no catch-up.
#[derive(Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    clock: Clock,
    frame: u64,
}

/// Timing handed to one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the loop first started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Zero-based frame counter.
    pub frame: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or resume) ticking. Elapsed time continues from where it stopped.
    pub fn start(&mut self) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        log::info!("frame loop started at t={:.3}s", self.clock.elapsed());
        true
    }

    /// Stop ticking. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }
        self.state = LoopState::Stopped;
        log::info!("frame loop stopped after {} frames", self.frame);
        true
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Advance one frame. Returns `None` while stopped.
    pub fn tick(&mut self, dt: f32) -> Option<FrameTime> {
        if self.state != LoopState::Running {
            return None;
        }
        self.clock.advance(dt);
        let time = FrameTime {
            elapsed: self.clock.elapsed(),
            delta: self.clock.delta(),
            frame: self.frame,
        };
        self.frame += 1;
        Some(time)
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero() {
        let clock = Clock::new();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn clock_ignores_negative_and_nan() {
        let mut clock = Clock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        assert!((clock.elapsed() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stopped_loop_does_not_tick() {
        let mut lp = FrameLoop::new();
        assert!(lp.tick(0.016).is_none());
        assert_eq!(lp.clock().elapsed(), 0.0);
    }

    #[test]
    fn running_loop_ticks_every_call() {
        let mut lp = FrameLoop::new();
        assert!(lp.start());
        assert!(!lp.start());
        let a = lp.tick(0.25).unwrap();
        let b = lp.tick(0.25).unwrap();
        assert_eq!(a.frame, 0);
        assert_eq!(b.frame, 1);
        assert!((b.elapsed - 0.5).abs() < 1e-6);
    }

    #[test]
    fn restart_resumes_elapsed_time() {
        let mut lp = FrameLoop::new();
        lp.start();
        lp.tick(1.0);
        assert!(lp.stop());
        assert!(lp.tick(1.0).is_none());
        lp.start();
        let t = lp.tick(0.5).unwrap();
        assert!((t.elapsed - 1.5).abs() < 1e-6);
    }
}
