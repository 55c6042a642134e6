use framekit_common::EngineConfig;
use framekit_input::{Action, KeyState};
use framekit_kernel::{FrameClock, FrameTime};
use framekit_render::{FrameSubmission, SceneResources};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::demo::Demo;

/// The loop runs until it stops; it never pauses or restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The window was closed.
    CloseRequested,
    /// The quit key was pressed.
    QuitKey,
}

/// Drives one demo: clock, then input and integration, then a fresh
/// submission, once per [`FrameLoop::advance`].
pub struct FrameLoop {
    demo: Box<dyn Demo>,
    clock: FrameClock,
    state: LoopState,
    stop_reason: Option<StopReason>,
    aspect: f32,
    last_time: Option<FrameTime>,
}

impl FrameLoop {
    pub fn new(demo: Box<dyn Demo>, config: &EngineConfig) -> Self {
        let clock = match config.frame.max_delta_secs {
            Some(max) => FrameClock::with_max_delta(max),
            None => FrameClock::new(),
        };
        Self {
            demo,
            clock,
            state: LoopState::Running,
            stop_reason: None,
            aspect: config.window.aspect_ratio(),
            last_time: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn demo(&self) -> &dyn Demo {
        self.demo.as_ref()
    }

    pub fn resources(&self) -> &SceneResources {
        self.demo.resources()
    }

    /// Timing of the most recent frame.
    pub fn last_time(&self) -> Option<FrameTime> {
        self.last_time
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Stop the loop. Only the first reason is kept.
    pub fn stop(&mut self, reason: StopReason) {
        if self.state == LoopState::Running {
            tracing::info!(?reason, demo = %self.demo.kind(), "frame loop stopped");
            self.state = LoopState::Stopped;
            self.stop_reason = Some(reason);
        }
    }

    /// Run one iteration at timestamp `now` with the current key snapshot.
    ///
    /// Returns `None` once stopped, including on the frame the quit key is
    /// seen. A quit press released before this frame still stops the loop;
    /// the caller clears such presses with [`KeyState::end_frame`].
    pub fn advance(&mut self, now: Duration, keys: &KeyState) -> Option<FrameSubmission> {
        if self.state == LoopState::Stopped {
            return None;
        }
        if Action::Quit.is_active(keys) {
            self.stop(StopReason::QuitKey);
            return None;
        }
        let time = self.clock.advance(now);
        self.demo.update(keys, &time);
        self.last_time = Some(time);
        let submission = self.demo.submission(&time, self.aspect);
        Some(submission.with_wireframe(Action::Wireframe.is_active(keys)))
    }
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("demo", &self.demo.kind())
            .field("state", &self.state)
            .field("stop_reason", &self.stop_reason)
            .field("aspect", &self.aspect)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcade::BrickBreaker;
    use framekit_input::Key;

    fn brick_loop() -> FrameLoop {
        FrameLoop::new(Box::new(BrickBreaker::new()), &EngineConfig::default())
    }

    #[test]
    fn starts_running() {
        let lp = brick_loop();
        assert_eq!(lp.state(), LoopState::Running);
        assert!(lp.last_time().is_none());
    }

    #[test]
    fn escape_stops_without_submission() {
        let mut lp = brick_loop();
        assert!(lp.advance(Duration::ZERO, &KeyState::new()).is_some());
        let esc = KeyState::from_keys([Key::Escape]);
        assert!(lp.advance(Duration::from_millis(16), &esc).is_none());
        assert_eq!(lp.state(), LoopState::Stopped);
        assert_eq!(lp.stop_reason(), Some(StopReason::QuitKey));
        let after = lp.advance(Duration::from_millis(32), &KeyState::new());
        assert!(after.is_none());
    }

    #[test]
    fn escape_tapped_between_frames_stops() {
        let mut lp = brick_loop();
        let mut keys = KeyState::new();
        assert!(lp.advance(Duration::ZERO, &keys).is_some());
        keys.end_frame();

        keys.press(Key::Escape);
        keys.release(Key::Escape);
        assert!(lp.advance(Duration::from_millis(200), &keys).is_none());
        assert_eq!(lp.state(), LoopState::Stopped);
        assert_eq!(lp.stop_reason(), Some(StopReason::QuitKey));
    }

    #[test]
    fn holding_d_outlines_the_frame() {
        let mut lp = brick_loop();
        let fill = lp.advance(Duration::ZERO, &KeyState::new()).unwrap();
        assert!(!fill.wireframe);

        let held = KeyState::from_keys([Key::KeyD]);
        let outlined = lp.advance(Duration::from_millis(16), &held).unwrap();
        assert!(outlined.wireframe);
        assert_eq!(outlined.draw_calls(), fill.draw_calls());

        let released = lp.advance(Duration::from_millis(32), &KeyState::new());
        assert!(!released.unwrap().wireframe);
    }

    #[test]
    fn close_request_stops() {
        let mut lp = brick_loop();
        lp.stop(StopReason::CloseRequested);
        lp.stop(StopReason::QuitKey);
        assert_eq!(lp.stop_reason(), Some(StopReason::CloseRequested));
        assert!(lp.advance(Duration::ZERO, &KeyState::new()).is_none());
    }

    #[test]
    fn first_frame_has_zero_delta() {
        let mut lp = brick_loop();
        let right = KeyState::from_keys([Key::ArrowRight]);
        let frame = lp.advance(Duration::from_secs(3), &right).unwrap();
        assert_eq!(frame.records[0].position().x, 0.0);
        assert_eq!(lp.last_time().map(|t| t.delta), Some(0.0));
    }

    #[test]
    fn max_delta_clamps_long_frames() {
        let mut config = EngineConfig::default();
        config.frame.max_delta_secs = Some(0.1);
        let mut lp = FrameLoop::new(Box::new(BrickBreaker::new()), &config);
        let right = KeyState::from_keys([Key::ArrowRight]);
        lp.advance(Duration::ZERO, &right);
        let frame = lp.advance(Duration::from_secs(10), &right).unwrap();
        assert!((frame.records[0].position().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn aspect_ignores_zero_sizes() {
        let mut lp = brick_loop();
        lp.set_aspect(0, 720);
        let frame = lp.advance(Duration::ZERO, &KeyState::new()).unwrap();
        let cam =
            framekit_render::Camera::looking_at(glam::Vec3::new(0.0, 0.0, 50.0), glam::Vec3::ZERO);
        assert_eq!(frame.projection, cam.projection(1280.0 / 720.0));
    }
}
