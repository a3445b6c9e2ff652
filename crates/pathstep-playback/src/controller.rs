//! The play/pause/step/reset driver.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pathstep_core::Grid;
use pathstep_paths::{SearchConfig, Step, Steps, search};

use crate::config::{MAX_SPEED, MIN_SPEED, PlaybackConfig, PlaybackError, check_speed};
use crate::scene::Scene;

/// Where playback stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PlaybackState {
    /// Nothing pulled yet (or nothing loaded).
    #[default]
    Idle,
    /// Pulling on a timer.
    Playing,
    /// Pulling only on [`Playback::step`].
    Paused,
    /// The sequence is exhausted or ended with `NoPath`.
    Complete,
}

/// A timer request: wait `delay`, then hand the tick back to
/// [`Playback::on_tick`].
///
/// Only the most recently issued tick is live. Pausing, resetting, loading,
/// changing speed or issuing a newer tick makes older ones stale, and stale
/// ticks are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub seq: u64,
    pub delay: Duration,
}

/// Drives one step sequence and accumulates what it emits into a [`Scene`].
///
/// The controller never owns a timer. [`play`](Self::play) returns a
/// [`Tick`]; the host sleeps or schedules it however it likes and passes it
/// back to [`on_tick`](Self::on_tick), which pulls one step and returns the
/// next tick. [`run_blocking`](Self::run_blocking) does exactly that on the
/// calling thread.
#[derive(Default)]
pub struct Playback {
    config: PlaybackConfig,
    steps: Option<Steps>,
    scene: Scene,
    state: PlaybackState,
    seq: u64,
}

impl Playback {
    pub fn new(config: PlaybackConfig) -> Result<Self, PlaybackError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Attach a step sequence, replacing any previous one. The scene is
    /// cleared and the state returns to `Idle`.
    pub fn load(&mut self, steps: Steps) {
        self.steps = Some(steps);
        self.scene.clear();
        self.set_state(PlaybackState::Idle);
        self.seq += 1;
    }

    /// Start a search over `grid` and attach it.
    pub fn load_search(&mut self, grid: Arc<Grid>, config: &SearchConfig) {
        self.load(search(grid, config));
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.steps.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.state == PlaybackState::Complete
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f64 {
        self.config.speed
    }

    /// Delay between automatic pulls at the current speed.
    pub fn interval(&self) -> Duration {
        self.config.interval()
    }

    /// Start or resume automatic playback.
    ///
    /// Returns the first tick to schedule, or `None` when nothing is loaded
    /// or playback is complete. Calling it while already playing reissues
    /// the tick and makes the outstanding one stale.
    pub fn play(&mut self) -> Option<Tick> {
        if self.steps.is_none() || self.is_complete() {
            return None;
        }
        self.set_state(PlaybackState::Playing);
        Some(self.issue_tick())
    }

    /// Stop automatic playback, keeping the position.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
            self.seq += 1;
        }
    }

    /// Pull exactly one step, pausing automatic playback first.
    ///
    /// Returns `None` once the sequence has nothing left, in which case the
    /// state is `Complete`.
    pub fn step(&mut self) -> Option<Step> {
        if self.steps.is_none() || self.is_complete() {
            return None;
        }
        if self.state != PlaybackState::Paused {
            self.set_state(PlaybackState::Paused);
            self.seq += 1;
        }
        self.pull()
    }

    /// Drop the sequence and everything accumulated, back to `Idle`.
    pub fn reset(&mut self) {
        self.steps = None;
        self.scene.clear();
        self.set_state(PlaybackState::Idle);
        self.seq += 1;
    }

    /// Handle a tick issued earlier.
    ///
    /// Pulls one step if the tick is live and playback is still running,
    /// and returns the next tick to schedule. Returns `None` for stale ticks
    /// and when this pull completed the run.
    pub fn on_tick(&mut self, tick: Tick) -> Option<Tick> {
        if self.state != PlaybackState::Playing || tick.seq != self.seq {
            log::trace!("dropping stale tick {}", tick.seq);
            return None;
        }
        self.pull();
        (self.state == PlaybackState::Playing).then(|| self.issue_tick())
    }

    /// Set the speed multiplier.
    ///
    /// While playing, the outstanding tick goes stale and the returned one
    /// replaces it.
    pub fn set_speed(&mut self, speed: f64) -> Result<Option<Tick>, PlaybackError> {
        check_speed(speed)?;
        self.config.speed = speed;
        log::debug!("playback speed {speed}x, interval {:?}", self.interval());
        self.seq += 1;
        Ok((self.state == PlaybackState::Playing).then(|| self.issue_tick()))
    }

    /// Double the speed, up to [`MAX_SPEED`].
    pub fn speed_up(&mut self) -> Option<Tick> {
        let s = self.config.speed;
        self.change_speed((s * 2.0).min(MAX_SPEED).max(s))
    }

    /// Halve the speed, down to [`MIN_SPEED`].
    pub fn slow_down(&mut self) -> Option<Tick> {
        let s = self.config.speed;
        self.change_speed((s / 2.0).max(MIN_SPEED).min(s))
    }

    /// Pull synchronously until the run completes, ignoring the timer.
    pub fn drain(&mut self) -> &Scene {
        if self.steps.is_some() && !self.is_complete() {
            self.seq += 1;
            while !self.is_complete() {
                self.pull();
            }
        }
        &self.scene
    }

    /// Play to completion on the calling thread, sleeping the interval
    /// before each pull. `on_pull` sees the scene after every pulled step.
    pub fn run_blocking(&mut self, mut on_pull: impl FnMut(&Scene)) -> PlaybackState {
        let Some(mut tick) = self.play() else {
            return self.state;
        };
        loop {
            thread::sleep(tick.delay);
            let before = self.scene.pulled;
            let next = self.on_tick(tick);
            if self.scene.pulled != before {
                on_pull(&self.scene);
            }
            match next {
                Some(t) => tick = t,
                None => break,
            }
        }
        self.state
    }

    fn change_speed(&mut self, speed: f64) -> Option<Tick> {
        // Both targets are clamped into a valid range.
        self.set_speed(speed).ok().flatten()
    }

    fn issue_tick(&mut self) -> Tick {
        self.seq += 1;
        Tick {
            seq: self.seq,
            delay: self.interval(),
        }
    }

    fn pull(&mut self) -> Option<Step> {
        let steps = self.steps.as_mut()?;
        match steps.next() {
            Some(step) => {
                log::trace!("pulled {step:?}");
                self.scene.apply(step);
                if step.is_no_path() {
                    self.set_state(PlaybackState::Complete);
                }
                Some(step)
            }
            None => {
                self.set_state(PlaybackState::Complete);
                None
            }
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            log::debug!("playback {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}
