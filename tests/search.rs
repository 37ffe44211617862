// Integration tests for binary search

use algoscope::config::PlaybackConfig;
use algoscope::error::InputError;
use algoscope::model::array::SearchState;
use algoscope::playback::Session;
use algoscope::runners::search;
use algoscope::snapshot::ResultMarker;

const VALUES: [i64; 7] = [5, 12, 19, 23, 41, 58, 67];

#[test]
fn test_found_after_three_probes() {
    let timeline = search::run(&VALUES, 41);
    let mids: Vec<usize> = timeline
        .steps()
        .iter()
        .filter_map(|s| s.snapshot().mid)
        .fold(Vec::new(), |mut acc, m| {
            if acc.last() != Some(&m) {
                acc.push(m);
            }
            acc
        });
    assert_eq!(mids, vec![3, 5, 4]);
    assert_eq!(timeline.last().result(), Some(&ResultMarker::Found(4)));
    assert_eq!(timeline.last().message(), "41 == 41: found at index 4");
}

#[test]
fn test_not_found_exhausts_the_window() {
    let timeline = search::run(&VALUES, 40);
    let last = timeline.last();
    assert_eq!(last.result(), Some(&ResultMarker::NotFound));
    assert_eq!(last.snapshot().window, None);
    assert!(last.message().starts_with("Not found"));
}

#[test]
fn test_every_element_is_found() {
    for (i, &v) in VALUES.iter().enumerate() {
        let timeline = search::run(&VALUES, v);
        assert_eq!(timeline.last().result(), Some(&ResultMarker::Found(i)));
    }
}

#[test]
fn test_session_rejects_unsorted_input() {
    let mut session = Session::new(SearchState::new(Vec::new(), 0), PlaybackConfig::batch());
    assert_eq!(
        session.reset(&[1, 5, 3]),
        Err(InputError::Unsorted { index: 2 })
    );
    assert!(session.controller().timeline().is_none());

    session.reset(&VALUES).unwrap();
    session.search(58).unwrap();
    let step = session.current_step().unwrap();
    assert_eq!(session.cursor_index(), 0);
    assert_eq!(step.snapshot().values, VALUES.to_vec());
    session.seek(usize::MAX);
    assert_eq!(
        session.current_step().unwrap().result(),
        Some(&ResultMarker::Found(5))
    );
}
