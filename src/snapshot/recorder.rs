//! The `record` callback contract shared by every algorithm runner

use super::{DomainKind, DomainState, Highlights, ResultMarker, Step, Timeline};

/// Sink for the states an algorithm passes through.
///
/// Runners are generic over the recorder so the same algorithm core serves
/// both the narrated timeline ([`TimelineRecorder`]) and the instant bulk
/// build ([`NullRecorder`]).
pub trait Recorder<S: DomainState> {
    /// Append a fully built step
    fn push(&mut self, step: Step<S>);

    /// Whether recorded steps are kept. Runners may skip building expensive
    /// narration when this is false.
    fn is_recording(&self) -> bool {
        true
    }

    /// Freeze `state` into a new step
    fn record(&mut self, state: &S, highlighted: Highlights, message: impl Into<String>)
    where
        Self: Sized,
    {
        if self.is_recording() {
            self.push(Step::new(state.clone(), highlighted, message.into(), None));
        }
    }

    /// Freeze `state` into a step that carries the operation's answer
    fn record_result(
        &mut self,
        state: &S,
        highlighted: Highlights,
        message: impl Into<String>,
        result: ResultMarker,
    ) where
        Self: Sized,
    {
        if self.is_recording() {
            self.push(Step::new(
                state.clone(),
                highlighted,
                message.into(),
                Some(result),
            ));
        }
    }
}

/// Collects steps into a [`Timeline`]
#[derive(Debug)]
pub struct TimelineRecorder<S> {
    kind: DomainKind,
    steps: Vec<Step<S>>,
}

impl<S: DomainState> TimelineRecorder<S> {
    pub fn new(kind: DomainKind) -> Self {
        TimelineRecorder {
            kind,
            steps: Vec::new(),
        }
    }

    /// Number of steps recorded so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Seal the recorded steps into a timeline.
    ///
    /// A runner that recorded nothing still yields a one-step timeline showing
    /// `fallback`, so a timeline is never empty.
    pub fn finish(mut self, fallback: &S) -> Timeline<S> {
        if self.steps.is_empty() {
            self.steps.push(Step::new(
                fallback.clone(),
                Highlights::new(),
                "Nothing to do".to_string(),
                None,
            ));
        }
        let len = self.steps.len();
        tracing::debug!(kind = %self.kind, steps = len, "timeline recorded");
        match Timeline::from_steps(self.kind, self.steps) {
            Some(timeline) => timeline,
            None => unreachable!("timeline has at least one step"),
        }
    }
}

impl<S: DomainState> Recorder<S> for TimelineRecorder<S> {
    fn push(&mut self, step: Step<S>) {
        self.steps.push(step);
    }
}

/// Discards everything; used for instant bulk builds
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl<S: DomainState> Recorder<S> for NullRecorder {
    fn push(&mut self, _step: Step<S>) {}

    fn is_recording(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DomainKind, ElementId, Role};

    #[derive(Debug, Clone, PartialEq)]
    struct Counter(Vec<i64>);

    impl DomainState for Counter {
        fn kind(&self) -> DomainKind {
            DomainKind::Sorting
        }

        fn describe(&self) -> Vec<String> {
            vec![format!("{:?}", self.0)]
        }
    }

    #[test]
    fn test_recorded_steps_do_not_alias_working_state() {
        let mut working = Counter(vec![1, 2, 3]);
        let mut rec = TimelineRecorder::new(DomainKind::Sorting);

        rec.record(&working, Highlights::new(), "before");
        working.0[0] = 99;
        working.0.push(4);
        rec.record(
            &working,
            Highlights::new().with(ElementId::Index(0), Role::Overwriting),
            "after",
        );
        working.0.clear();

        let timeline = rec.finish(&working);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.first().snapshot(), &Counter(vec![1, 2, 3]));
        assert_eq!(timeline.last().snapshot(), &Counter(vec![99, 2, 3, 4]));
    }

    #[test]
    fn test_empty_recorder_yields_single_step() {
        let rec: TimelineRecorder<Counter> = TimelineRecorder::new(DomainKind::Sorting);
        let timeline = rec.finish(&Counter(vec![]));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.first().message(), "Nothing to do");
    }

    #[test]
    fn test_null_recorder_discards() {
        let mut rec = NullRecorder;
        assert!(!Recorder::<Counter>::is_recording(&rec));
        rec.record(&Counter(vec![1]), Highlights::new(), "ignored");
    }
}
