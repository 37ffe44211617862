//! Cursor and transport over a finished timeline
//!
//! The controller never runs an algorithm. It only moves a cursor over the
//! steps it was given. Autoplay is driven by the consumer's event loop
//! through [`PlaybackController::tick`], which receives the time elapsed since
//! the previous tick.

use crate::config::{check_speed, scaled, PlaybackConfig};
use crate::error::Result;
use crate::snapshot::{DomainState, Step, Timeline};
use std::time::Duration;
use tracing::trace;

/// Lifecycle of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// No timeline yet
    Idle,
    /// A paced run is publishing steps; transport is disabled
    Generating,
    /// Timeline installed, autoplay never started
    Ready,
    Playing,
    Paused,
}

#[derive(Debug)]
pub struct PlaybackController<S> {
    timeline: Option<Timeline<S>>,
    cursor: usize,
    status: PlaybackStatus,
    base_interval: Duration,
    speed: f64,
    /// Time accumulated towards the next autoplay advance. `Some` exactly
    /// while playing.
    timer: Option<Duration>,
}

impl<S: DomainState> PlaybackController<S> {
    /// A speed outside the accepted range falls back to 1x
    pub fn new(config: &PlaybackConfig) -> Self {
        PlaybackController {
            timeline: None,
            cursor: 0,
            status: PlaybackStatus::Idle,
            base_interval: config.base_interval,
            speed: check_speed(config.speed).unwrap_or(1.0),
            timer: None,
        }
    }

    /// Discard the current timeline and timer, install `timeline` at step 0
    pub fn start(&mut self, timeline: Timeline<S>, autoplay: bool) {
        trace!(steps = timeline.len(), autoplay, "timeline installed");
        self.timeline = Some(timeline);
        self.cursor = 0;
        self.timer = None;
        self.status = PlaybackStatus::Ready;
        if autoplay {
            self.play();
        }
    }

    /// Drop the timeline while a paced run is in flight
    pub fn begin_generation(&mut self) {
        trace!("generation started");
        self.timeline = None;
        self.cursor = 0;
        self.timer = None;
        self.status = PlaybackStatus::Generating;
    }

    /// Back to `Idle` with nothing installed
    pub fn clear(&mut self) {
        self.timeline = None;
        self.cursor = 0;
        self.timer = None;
        self.status = PlaybackStatus::Idle;
    }

    /// Start autoplay. Returns false when there is nothing left to play.
    pub fn play(&mut self) -> bool {
        if !matches!(self.status, PlaybackStatus::Ready | PlaybackStatus::Paused) {
            return false;
        }
        if self.cursor + 1 >= self.len() {
            return false;
        }
        trace!(cursor = self.cursor, "play");
        self.timer = Some(Duration::ZERO);
        self.status = PlaybackStatus::Playing;
        true
    }

    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            trace!(cursor = self.cursor, "pause");
            self.timer = None;
            self.status = PlaybackStatus::Paused;
        }
    }

    pub fn toggle(&mut self) -> bool {
        if self.is_playing() {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    /// Move one step forward. Pauses autoplay; clamps at the last step.
    pub fn step_forward(&mut self) -> bool {
        let target = self.cursor + 1;
        self.move_to(target)
    }

    /// Move one step back. Pauses autoplay; clamps at step 0.
    pub fn step_backward(&mut self) -> bool {
        if self.cursor == 0 {
            self.pause();
            return false;
        }
        let target = self.cursor - 1;
        self.move_to(target)
    }

    /// Jump to `index`, clamped to the timeline. Pauses autoplay.
    pub fn seek(&mut self, index: usize) -> bool {
        self.move_to(index)
    }

    fn move_to(&mut self, index: usize) -> bool {
        self.pause();
        if self.timeline.is_none() {
            return false;
        }
        let clamped = index.min(self.len().saturating_sub(1));
        let moved = clamped != self.cursor;
        self.cursor = clamped;
        trace!(cursor = self.cursor, "seek");
        moved
    }

    /// Change the speed multiplier. A running timer keeps its accumulated
    /// time and uses the new interval from its next advance on.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        check_speed(speed)?;
        trace!(speed, "speed changed");
        self.speed = speed;
        Ok(())
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Delay between autoplay advances at the current speed
    pub fn interval(&self) -> Duration {
        scaled(self.base_interval, self.speed)
    }

    /// Feed elapsed time to the autoplay timer. Returns whether the cursor
    /// moved. Reaching the last step pauses.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let Some(accumulated) = self.timer else {
            return false;
        };
        let interval = self.interval();
        let last = self.len().saturating_sub(1);
        let mut accumulated = accumulated + elapsed;
        let before = self.cursor;
        while accumulated >= interval && self.cursor < last {
            accumulated -= interval;
            self.cursor += 1;
        }
        self.timer = Some(accumulated);
        if self.cursor >= last {
            self.pause();
        }
        self.cursor != before
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps in the installed timeline, 0 if none
    pub fn len(&self) -> usize {
        self.timeline.as_ref().map_or(0, |t| t.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn timeline(&self) -> Option<&Timeline<S>> {
        self.timeline.as_ref()
    }

    /// The step under the cursor
    pub fn current(&self) -> Option<&Step<S>> {
        self.timeline.as_ref().and_then(|t| t.get(self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::model::array::ArrayState;
    use crate::runners::sorting::{self, SortAlgorithm};

    fn controller() -> PlaybackController<ArrayState> {
        let mut controller = PlaybackController::new(&PlaybackConfig::default());
        controller.start(sorting::run(&[3, 1, 2], SortAlgorithm::Bubble), false);
        controller
    }

    #[test]
    fn test_step_clamps_at_both_ends() {
        let mut c = controller();
        assert!(!c.step_backward());
        assert_eq!(c.cursor(), 0);
        c.seek(usize::MAX);
        assert_eq!(c.cursor(), c.len() - 1);
        assert!(!c.step_forward());
        assert_eq!(c.cursor(), c.len() - 1);
    }

    #[test]
    fn test_tick_advances_by_interval() {
        let mut c = controller();
        assert!(c.play());
        assert!(!c.tick(Duration::from_millis(999)));
        assert!(c.tick(Duration::from_millis(1)));
        assert_eq!(c.cursor(), 1);

        c.set_speed(2.0).unwrap();
        assert!(c.tick(Duration::from_millis(500)));
        assert_eq!(c.cursor(), 2);
    }

    #[test]
    fn test_reaching_end_pauses() {
        let mut c = controller();
        c.play();
        c.tick(Duration::from_secs(3600));
        assert_eq!(c.cursor(), c.len() - 1);
        assert_eq!(c.status(), PlaybackStatus::Paused);
        assert!(!c.play());
    }

    #[test]
    fn test_invalid_speed_is_rejected() {
        let mut c = controller();
        assert_eq!(c.set_speed(0.0), Err(InputError::InvalidSpeed(0.0)));
        assert!(c.set_speed(f64::NAN).is_err());
        assert!(c.set_speed(-1.0).is_err());
        assert_eq!(c.speed(), 1.0);
    }

    #[test]
    fn test_tiny_speed_is_rejected_before_it_reaches_the_timer() {
        let mut c = controller();
        assert_eq!(c.set_speed(1e-20), Err(InputError::InvalidSpeed(1e-20)));
        assert!(c.play());
        assert!(!c.tick(Duration::from_millis(10)));
        assert_eq!(c.interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_configured_speed_falls_back() {
        let config = PlaybackConfig {
            speed: 0.0,
            ..PlaybackConfig::default()
        };
        let c: PlaybackController<ArrayState> = PlaybackController::new(&config);
        assert_eq!(c.speed(), 1.0);
    }

    #[test]
    fn test_step_pauses_autoplay() {
        let mut c = controller();
        c.play();
        c.step_forward();
        assert!(!c.is_playing());
        assert_eq!(c.cursor(), 1);
    }
}
