//! Timed playback of a solved path.
//!
//! A `Playback` owns the path, the index of the next state to show and a stop flag.
//! Frames are produced one at a time by a single control flow; the flag is checked
//! before each frame, so a stop request takes effect at the next step.
use crate::engine::State;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Shortest delay between two frames, in milliseconds.
pub const MIN_DELAY_MS: u64 = 200;
/// Longest delay between two frames, in milliseconds.
pub const MAX_DELAY_MS: u64 = 1500;
pub const DEFAULT_DELAY_MS: u64 = 600;

/// Clamps a requested delay to `MIN_DELAY_MS..=MAX_DELAY_MS`.
///
/// ```
/// use river_crossing_solver::playback::clamp_delay;
/// assert_eq!(clamp_delay(50), 200);
/// assert_eq!(clamp_delay(800), 800);
/// assert_eq!(clamp_delay(10_000), 1500);
/// ```
pub fn clamp_delay(delay_ms: u64) -> u64 {
    delay_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS)
}

/// Cancels a playback. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One rendered step: `state` is path element `index` out of `0..=last`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    pub last: usize,
    pub state: State,
}

/// How a call to `Playback::run` ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// Every state of the path was rendered.
    Finished,
    /// Playback was stopped after `rendered` frames.
    Stopped { rendered: usize },
}

#[derive(Debug)]
pub struct Playback {
    path: Vec<State>,
    next: usize,
    delay: Duration,
    stop: StopHandle,
}

impl Playback {
    /// Prepares playback of `path` with `delay_ms` (clamped) between frames.
    pub fn new(path: Vec<State>, delay_ms: u64) -> Self {
        Playback {
            path,
            next: 0,
            delay: Duration::from_millis(clamp_delay(delay_ms)),
            stop: StopHandle::default(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns a handle that stops this playback from inside a render callback or
    /// from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.path.len()
    }

    /// Returns the next frame and advances, or `None` once stopped or finished.
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.stop.is_stopped() || self.is_finished() {
            return None;
        }
        let frame = Frame {
            index: self.next,
            last: self.path.len() - 1,
            state: self.path[self.next],
        };
        self.next += 1;
        Some(frame)
    }

    /// Renders every remaining frame, sleeping for the delay between two frames.
    pub fn run(mut self, mut render: impl FnMut(&Frame)) -> PlaybackEnd {
        let mut rendered = 0;
        while let Some(frame) = self.next_frame() {
            render(&frame);
            rendered += 1;
            if !self.is_finished() {
                thread::sleep(self.delay);
            }
        }

        if self.stop.is_stopped() && !self.is_finished() {
            debug!("Playback stopped after {} of {} frames", rendered, self.path.len());
            PlaybackEnd::Stopped { rendered }
        } else {
            PlaybackEnd::Finished
        }
    }
}
