//! Real-time paced publication of a timeline
//!
//! Runners are deterministic, so a paced operation records its whole
//! timeline up front and a [`PacedRun`] hands the steps out one per delay.
//! The only suspension points are the gaps between publications, and every
//! publication first checks the run's [`LivenessToken`].

use crate::snapshot::{DomainKind, Step, Timeline};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared cancellation flag. Clones observe the same flag, so a consumer
/// being torn down can cancel a run it does not own.
#[derive(Debug, Clone)]
pub struct LivenessToken(Arc<AtomicBool>);

impl LivenessToken {
    pub fn new() -> Self {
        LivenessToken(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for LivenessToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct PacedRun<S> {
    kind: DomainKind,
    pending: VecDeque<Step<S>>,
    delay: Duration,
    waited: Duration,
    published: usize,
    token: LivenessToken,
}

impl<S> PacedRun<S> {
    pub fn new(timeline: Timeline<S>, delay: Duration) -> Self {
        PacedRun {
            kind: timeline.kind(),
            pending: timeline.into_steps().into(),
            delay,
            waited: Duration::ZERO,
            published: 0,
            token: LivenessToken::new(),
        }
    }

    pub fn kind(&self) -> DomainKind {
        self.kind
    }

    /// A handle that can cancel this run
    pub fn token(&self) -> LivenessToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        !self.token.is_alive()
    }

    /// Nothing left to publish, either because every step went out or
    /// because the run was cancelled
    pub fn is_finished(&self) -> bool {
        self.is_cancelled() || self.pending.is_empty()
    }

    /// Change the delay for the steps still pending. Time already waited
    /// counts towards the next publication.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn published(&self) -> usize {
        self.published
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Publish the next step right away, without waiting for the delay
    pub fn publish_next(&mut self) -> Option<Step<S>> {
        if !self.token.is_alive() {
            return None;
        }
        let step = self.pending.pop_front()?;
        self.published += 1;
        Some(step)
    }

    /// Advance the clock by `elapsed` and return every step that became due
    pub fn tick(&mut self, elapsed: Duration) -> Vec<Step<S>> {
        let mut due = Vec::new();
        if self.is_finished() {
            return due;
        }
        self.waited += elapsed;
        while self.waited >= self.delay {
            self.waited -= self.delay;
            match self.publish_next() {
                Some(step) => due.push(step),
                None => break,
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runners::sorting::{self, SortAlgorithm};

    #[test]
    fn test_one_step_per_delay() {
        let timeline = sorting::run(&[2, 1], SortAlgorithm::Bubble);
        let total = timeline.len();
        let mut run = PacedRun::new(timeline, Duration::from_millis(800));

        assert!(run.tick(Duration::from_millis(799)).is_empty());
        assert_eq!(run.tick(Duration::from_millis(1)).len(), 1);
        assert_eq!(run.tick(Duration::from_millis(1600)).len(), 2);
        assert_eq!(run.published(), 3);
        assert_eq!(run.remaining(), total - 3);
    }

    #[test]
    fn test_shorter_delay_applies_to_waiting_time() {
        let timeline = sorting::run(&[3, 2, 1], SortAlgorithm::Bubble);
        let mut run = PacedRun::new(timeline, Duration::from_millis(800));
        assert!(run.tick(Duration::from_millis(300)).is_empty());
        run.set_delay(Duration::from_millis(200));
        assert_eq!(run.tick(Duration::ZERO).len(), 1);
        assert_eq!(run.tick(Duration::from_millis(200)).len(), 1);
    }

    #[test]
    fn test_cancelled_run_publishes_nothing() {
        let timeline = sorting::run(&[3, 2, 1], SortAlgorithm::Bubble);
        let mut run = PacedRun::new(timeline, Duration::from_millis(10));
        let token = run.token();
        assert!(run.publish_next().is_some());

        token.cancel();
        assert!(run.is_finished());
        assert!(run.publish_next().is_none());
        assert!(run.tick(Duration::from_secs(10)).is_empty());
        assert_eq!(run.published(), 1);
    }
}
