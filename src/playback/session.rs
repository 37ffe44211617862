//! One visualizer instance: committed model plus playback
//!
//! A [`Session`] owns the committed domain state and the controller. Domain
//! commands (see [`crate::commands`]) validate input, run an algorithm on a
//! copy of the committed state and hand the finished timeline to
//! [`Session::launch`].
//!
//! - **Batch**: the committed state becomes the final step's snapshot right
//!   away and the whole timeline is installed for playback.
//! - **Paced**: steps are published one per configured delay. Each
//!   published step becomes the committed state, so cancelling a run leaves
//!   whatever was last published. When the last step is out, the published
//!   steps are installed as a normal timeline with the cursor on the final
//!   step.

use super::controller::{PlaybackController, PlaybackStatus};
use super::paced::{LivenessToken, PacedRun};
use crate::config::PlaybackConfig;
use crate::error::Result;
use crate::snapshot::{DomainState, Step, Timeline};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// How a command's timeline reaches the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publish {
    Batch,
    /// Paced if the session's configuration allows it, batch otherwise
    Paced,
}

#[derive(Debug)]
pub struct Session<S> {
    committed: S,
    config: PlaybackConfig,
    controller: PlaybackController<S>,
    paced: Option<PacedRun<S>>,
    published: Vec<Step<S>>,
}

impl<S: DomainState> Session<S> {
    /// A configured speed outside the accepted range is replaced by 1x
    pub fn new(initial: S, mut config: PlaybackConfig) -> Self {
        if let Err(e) = config.validate() {
            warn!(error = %e, "invalid playback speed, using 1x");
            config.speed = 1.0;
        }
        Session {
            controller: PlaybackController::new(&config),
            committed: initial,
            config,
            paced: None,
            published: Vec::new(),
        }
    }

    /// The model the next command will start from
    pub fn committed(&self) -> &S {
        &self.committed
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn controller(&self) -> &PlaybackController<S> {
        &self.controller
    }

    /// Install a freshly generated timeline, cancelling whatever came before
    pub fn launch(&mut self, timeline: Timeline<S>, publish: Publish) {
        self.cancel();
        debug!(
            kind = %timeline.kind(),
            steps = timeline.len(),
            paced = publish == Publish::Paced && self.config.paced,
            "launching timeline"
        );
        if publish == Publish::Paced && self.config.paced {
            self.controller.begin_generation();
            let mut run = PacedRun::new(timeline, self.config.pace_interval());
            if let Some(step) = run.publish_next() {
                self.publish(step);
            }
            self.paced = Some(run);
            self.finish_paced_if_done();
        } else {
            self.committed = timeline.last().snapshot().clone();
            self.controller.start(timeline, self.config.autoplay);
        }
    }

    /// Replace the committed model outright, dropping any timeline
    pub fn replace(&mut self, state: S) {
        self.cancel();
        self.committed = state;
        self.controller.clear();
    }

    /// Apply an edit to a copy of the committed model. On success the copy
    /// is committed and the installed timeline is dropped; on error nothing
    /// changes.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut S) -> Result<T>) -> Result<T> {
        let mut draft = self.committed.clone();
        let out = f(&mut draft)?;
        self.replace(draft);
        Ok(out)
    }

    fn publish(&mut self, step: Step<S>) {
        trace!(message = step.message(), "step published");
        self.committed = step.snapshot().clone();
        self.published.push(step);
    }

    fn finish_paced_if_done(&mut self) {
        if !self.paced.as_ref().is_some_and(|run| run.is_finished()) {
            return;
        }
        if let Some(run) = self.paced.take() {
            self.install_published(run);
        }
    }

    /// Hand the steps published so far to the controller, cursor on the last
    fn install_published(&mut self, run: PacedRun<S>) {
        let steps = std::mem::take(&mut self.published);
        match Timeline::from_steps(run.kind(), steps) {
            Some(timeline) => {
                let last = timeline.len() - 1;
                self.controller.start(timeline, false);
                self.controller.seek(last);
            }
            None => self.controller.clear(),
        }
    }

    /// Stop a paced run. Steps already published stay committed and remain
    /// reviewable; nothing further is published.
    pub fn cancel(&mut self) {
        self.controller.pause();
        if let Some(run) = self.paced.take() {
            if !run.is_finished() {
                warn!(
                    published = run.published(),
                    remaining = run.remaining(),
                    "paced run cancelled"
                );
            }
            run.cancel();
            self.install_published(run);
        }
    }

    /// Cancellation handle for the paced run in flight, if any
    pub fn liveness(&self) -> Option<LivenessToken> {
        self.paced.as_ref().map(|run| run.token())
    }

    /// Drive paced publication or autoplay. Returns whether the visible step
    /// changed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if let Some(run) = self.paced.as_mut() {
            let due = run.tick(elapsed);
            let changed = !due.is_empty();
            for step in due {
                self.publish(step);
            }
            if self.paced.as_ref().is_some_and(|run| run.is_cancelled()) {
                // cancelled through a token clone; keep what was published
                if let Some(run) = self.paced.take() {
                    self.install_published(run);
                }
                return changed;
            }
            self.finish_paced_if_done();
            return changed;
        }
        self.controller.tick(elapsed)
    }

    pub fn is_generating(&self) -> bool {
        self.paced.is_some()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.controller.status()
    }

    /// The step a consumer should render
    pub fn current_step(&self) -> Option<&Step<S>> {
        if self.is_generating() {
            self.published.last()
        } else {
            self.controller.current()
        }
    }

    pub fn total_steps(&self) -> usize {
        if self.is_generating() {
            self.published.len()
        } else {
            self.controller.len()
        }
    }

    pub fn cursor_index(&self) -> usize {
        if self.is_generating() {
            self.published.len().saturating_sub(1)
        } else {
            self.controller.cursor()
        }
    }

    /// Messages of every step up to and including the cursor
    pub fn narration(&self) -> Vec<&str> {
        if self.is_generating() {
            return self.published.iter().map(|s| s.message()).collect();
        }
        match self.controller.timeline() {
            Some(timeline) => timeline.steps()[..=self.controller.cursor()]
                .iter()
                .map(|s| s.message())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn play(&mut self) -> bool {
        self.controller.play()
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn toggle(&mut self) -> bool {
        self.controller.toggle()
    }

    pub fn step_forward(&mut self) -> bool {
        self.controller.step_forward()
    }

    pub fn step_backward(&mut self) -> bool {
        self.controller.step_backward()
    }

    pub fn seek(&mut self, index: usize) -> bool {
        self.controller.seek(index)
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if let Err(e) = self.controller.set_speed(speed) {
            warn!(speed, "rejected playback speed");
            return Err(e);
        }
        self.config.speed = speed;
        let delay = self.config.pace_interval();
        if let Some(run) = self.paced.as_mut() {
            run.set_delay(delay);
        }
        Ok(())
    }
}
