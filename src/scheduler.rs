//! Render-loop bookkeeping that does not touch the browser.
//!
//! The browser side asks [`RenderLoop`] what to do on every animation frame
//! and visibility change; all timestamps are `performance.now()` milliseconds.

use crate::config::ResumePolicy;

/// Monotonic animation time base.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    policy: ResumePolicy,
    epoch_ms: f64,
    carried_ms: f64,
}

impl AnimationClock {
    pub fn new(policy: ResumePolicy) -> Self {
        Self {
            policy,
            epoch_ms: 0.0,
            carried_ms: 0.0,
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        self.epoch_ms = now_ms;
        self.carried_ms = 0.0;
    }

    /// Seconds of animation at `now_ms`.
    pub fn elapsed_secs(&self, now_ms: f64) -> f32 {
        ((now_ms - self.epoch_ms).max(0.0) / 1000.0) as f32
    }

    pub fn suspend(&mut self, now_ms: f64) {
        self.carried_ms = (now_ms - self.epoch_ms).max(0.0);
    }

    /// Moves the epoch so that animation time continues (or restarts) at `now_ms`.
    pub fn resume(&mut self, now_ms: f64) {
        self.epoch_ms = match self.policy {
            ResumePolicy::Continue => now_ms - self.carried_ms,
            ResumePolicy::Restart => now_ms,
        };
    }
}

/// Whether the source photograph has been decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceReadiness {
    #[default]
    Unready,
    Ready,
}

impl SourceReadiness {
    /// Returns true only for the call that performs the `Unready → Ready` transition.
    pub fn mark_ready(&mut self) -> bool {
        match self {
            SourceReadiness::Unready => {
                *self = SourceReadiness::Ready;
                true
            }
            SourceReadiness::Ready => false,
        }
    }

    pub fn is_ready(&self) -> bool {
        *self == SourceReadiness::Ready
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Uninitialized,
    Running,
    Paused,
    /// Terminal; the static image is all that is shown.
    Stopped,
}

/// State machine behind the `requestAnimationFrame` chain.
///
/// At most one frame is ever outstanding: `start` and `resume` only ask for a
/// new frame when none is in flight, so toggling visibility quickly never forks
/// the chain.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    phase: LoopPhase,
    clock: AnimationClock,
    frame_pending: bool,
    frames_drawn: u64,
}

impl RenderLoop {
    pub fn new(policy: ResumePolicy) -> Self {
        Self {
            phase: LoopPhase::Uninitialized,
            clock: AnimationClock::new(policy),
            frame_pending: false,
            frames_drawn: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// `Uninitialized → Running`. Returns true if the caller must request a frame.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase != LoopPhase::Uninitialized {
            return false;
        }
        self.phase = LoopPhase::Running;
        self.clock.start(now_ms);
        log::debug!("render loop started");
        !self.frame_pending
    }

    /// `Running → Paused`. A frame already requested still fires but draws nothing.
    pub fn pause(&mut self, now_ms: f64) {
        if self.phase == LoopPhase::Running {
            self.phase = LoopPhase::Paused;
            self.clock.suspend(now_ms);
            log::debug!("render loop paused");
        }
    }

    /// `Paused → Running`. Returns true if the caller must request a frame.
    pub fn resume(&mut self, now_ms: f64) -> bool {
        if self.phase != LoopPhase::Paused {
            return false;
        }
        self.phase = LoopPhase::Running;
        self.clock.resume(now_ms);
        log::debug!("render loop resumed");
        !self.frame_pending
    }

    /// Enters the terminal phase. Safe to call from any phase, any number of times.
    pub fn stop(&mut self) {
        self.phase = LoopPhase::Stopped;
    }

    /// Records that an animation frame has been requested.
    pub fn frame_requested(&mut self) {
        self.frame_pending = true;
    }

    /// Entry of the animation-frame callback. Returns the animation time to draw
    /// with, or `None` when the chain must end here.
    pub fn begin_frame(&mut self, now_ms: f64) -> Option<f32> {
        self.frame_pending = false;
        if self.phase != LoopPhase::Running {
            return None;
        }
        self.frames_drawn += 1;
        Some(self.clock.elapsed_secs(now_ms))
    }
}
