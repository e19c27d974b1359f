//! Integration tests for playlist sequencing

mod common;

use common::*;
use soundpad_playback::{MediaEvent, PlaybackError, PlaybackEvent, RepeatMode, SequencerConfig};

fn ordered(repeat: RepeatMode) -> SequencerConfig {
    SequencerConfig {
        repeat,
        ..SequencerConfig::default()
    }
}

// ===== Boundaries =====

#[test]
fn next_at_end_without_repeat_stops_on_last_track() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b", "c"]);
    let mut seq = sequencer(&backend, ordered(RepeatMode::None));
    seq.play(&list, &id("c")).unwrap();
    backend.set_position(4.0);

    seq.next(&list).unwrap();

    assert!(!seq.is_playing());
    assert_eq!(seq.current_track(), Some(&id("c")));
    assert_eq!(seq.position(), 0.0);
    assert!(!backend.last().playing);
    assert_eq!(backend.loads(), 1);
}

#[test]
fn next_at_end_reports_failed_rewind_but_stops() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b"]);
    let mut seq = sequencer(&backend, ordered(RepeatMode::None));
    seq.play(&list, &id("b")).unwrap();
    backend.set_position(4.0);
    backend.fail_seek();

    let err = seq.next(&list).unwrap_err();

    assert!(matches!(err, PlaybackError::Media(_)));
    assert!(!seq.is_playing());
    assert!(!backend.last().playing);
    assert_eq!(seq.current_track(), Some(&id("b")));
}

#[test]
fn next_at_end_with_repeat_all_wraps() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b", "c"]);
    let mut seq = sequencer(&backend, ordered(RepeatMode::All));
    seq.play(&list, &id("c")).unwrap();

    seq.next(&list).unwrap();

    assert_eq!(seq.current_track(), Some(&id("a")));
    assert!(seq.is_playing());
    assert_eq!(backend.last().path, path_of("a"));
}

#[test]
fn previous_past_threshold_restarts_current() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b", "c"]);
    let mut seq = sequencer(&backend, ordered(RepeatMode::All));
    seq.play(&list, &id("b")).unwrap();
    backend.set_position(3.5);

    seq.previous(&list).unwrap();

    assert_eq!(seq.current_track(), Some(&id("b")));
    assert_eq!(seq.position(), 0.0);
    assert_eq!(backend.loads(), 1);
}

#[test]
fn previous_on_first_track_without_repeat_restarts() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b", "c"]);
    let mut seq = sequencer(&backend, ordered(RepeatMode::None));
    seq.play(&list, &id("a")).unwrap();
    backend.set_position(3.0);

    seq.previous(&list).unwrap();

    assert_eq!(seq.current_track(), Some(&id("a")));
    assert_eq!(seq.position(), 0.0);
    assert!(seq.is_playing());
    assert_eq!(backend.loads(), 1);
}

#[test]
fn previous_on_first_track_with_repeat_all_wraps_to_last() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b", "c"]);
    let mut seq = sequencer(&backend, ordered(RepeatMode::All));
    seq.play(&list, &id("a")).unwrap();

    seq.previous(&list).unwrap();

    assert_eq!(seq.current_track(), Some(&id("c")));
}

#[test]
fn previous_moves_back_in_order() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b", "c"]);
    let mut seq = sequencer(&backend, ordered(RepeatMode::None));
    seq.play(&list, &id("c")).unwrap();
    backend.set_position(1.0);

    seq.previous(&list).unwrap();

    assert_eq!(seq.current_track(), Some(&id("b")));
    assert!(backend.handle(0).stopped);
}

// ===== End of track =====

#[test]
fn track_end_with_repeat_one_replays() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b"]);
    let mut seq = sequencer(&backend, ordered(RepeatMode::One));
    seq.play(&list, &id("a")).unwrap();
    backend.set_position(10.0);

    seq.on_media_event(Some(&list), MediaEvent::Ended).unwrap();

    assert_eq!(seq.current_track(), Some(&id("a")));
    assert!(seq.is_playing());
    assert_eq!(seq.position(), 0.0);
    assert_eq!(backend.loads(), 1);
}

#[test]
fn track_end_without_repeat_one_advances() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b"]);
    let mut seq = sequencer(&backend, ordered(RepeatMode::None));
    seq.play(&list, &id("a")).unwrap();
    seq.drain_events();

    seq.on_track_end(&list).unwrap();

    assert_eq!(seq.current_track(), Some(&id("b")));
    let events = seq.drain_events();
    assert_eq!(
        events[0],
        PlaybackEvent::TrackFinished { track_id: id("a") }
    );
    assert!(events.contains(&PlaybackEvent::TrackChanged {
        track_id: Some(id("b")),
        previous_track_id: Some(id("a")),
    }));
}

#[test]
fn media_error_clears_playback() {
    let backend = MockBackend::new();
    let list = playlist(&["a"]);
    let mut seq = sequencer(&backend, SequencerConfig::default());
    seq.play(&list, &id("a")).unwrap();

    seq.on_media_event(Some(&list), MediaEvent::Error("decoder crashed".into()))
        .unwrap();

    assert!(!seq.is_playing());
    assert_eq!(seq.current_track(), None);
    assert_eq!(backend.live_handles(), 0);
}

// ===== play / toggle =====

#[test]
fn playing_current_track_toggles() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b"]);
    let mut seq = sequencer(&backend, SequencerConfig::default());

    seq.play(&list, &id("a")).unwrap();
    assert!(seq.is_playing());

    seq.play(&list, &id("a")).unwrap();
    assert!(!seq.is_playing());
    assert!(!backend.last().playing);

    seq.play(&list, &id("a")).unwrap();
    assert!(seq.is_playing());
    assert_eq!(backend.loads(), 1);
}

#[test]
fn switching_tracks_discards_old_handle() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b"]);
    let mut seq = sequencer(&backend, SequencerConfig::default());

    seq.play(&list, &id("a")).unwrap();
    seq.play(&list, &id("b")).unwrap();

    assert!(backend.handle(0).stopped);
    assert_eq!(backend.live_handles(), 1);
    assert_eq!(seq.state().play_history, vec![id("a"), id("b")]);
}

#[test]
fn unknown_track_changes_nothing() {
    let backend = MockBackend::new();
    let list = playlist(&["a"]);
    let mut seq = sequencer(&backend, SequencerConfig::default());
    seq.play(&list, &id("a")).unwrap();
    let before = seq.state();

    let err = seq.play(&list, &id("zzz")).unwrap_err();

    assert_eq!(err, PlaybackError::TrackNotFound(id("zzz")));
    assert_eq!(seq.state(), before);
}

#[test]
fn toggle_without_track_is_a_no_op() {
    let backend = MockBackend::new();
    let mut seq = sequencer(&backend, SequencerConfig::default());
    seq.toggle().unwrap();
    seq.next(&playlist(&["a"])).unwrap();
    assert!(!seq.is_playing());
    assert_eq!(backend.loads(), 0);
}

// ===== Failures =====

#[test]
fn load_failure_keeps_previous_track_playing() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b"]);
    let mut seq = sequencer(&backend, SequencerConfig::default());
    seq.play(&list, &id("a")).unwrap();
    backend.fail_load(path_of("b"));

    let err = seq.play(&list, &id("b")).unwrap_err();

    assert!(matches!(err, PlaybackError::Media(_)));
    assert_eq!(seq.current_track(), Some(&id("a")));
    assert!(seq.is_playing());
    assert!(backend.last().playing);
}

#[test]
fn play_failure_clears_state() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b"]);
    let mut seq = sequencer(&backend, SequencerConfig::default());
    seq.play(&list, &id("a")).unwrap();
    backend.fail_play(path_of("b"));

    assert!(seq.play(&list, &id("b")).is_err());

    assert_eq!(seq.current_track(), None);
    assert!(!seq.is_playing());
    assert_eq!(backend.live_handles(), 0);
}

// ===== Deletion, volume, seek =====

#[test]
fn removing_current_track_stops_playback() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b"]);
    let mut seq = sequencer(&backend, SequencerConfig::default());
    seq.play(&list, &id("a")).unwrap();

    assert!(!seq.remove_track(&id("b")));
    assert!(seq.remove_track(&id("a")));

    let state = seq.state();
    assert_eq!(state.current_track_id, None);
    assert!(!state.is_playing);
    assert!(state.play_history.is_empty());
    assert_eq!(backend.live_handles(), 0);
}

#[test]
fn live_volume_reaches_handle_but_saves_on_commit() {
    let backend = MockBackend::new();
    let list = playlist(&["a", "b"]);
    let mut seq = sequencer(
        &backend,
        SequencerConfig {
            volume: 0.5,
            ..SequencerConfig::default()
        },
    );
    seq.play(&list, &id("a")).unwrap();
    assert_eq!(backend.last().volume, 0.5);

    seq.set_volume(0.2);
    assert_eq!(backend.last().volume, 0.2);

    seq.play(&list, &id("b")).unwrap();
    assert_eq!(backend.last().volume, 0.2);
    assert_eq!(seq.commit_volume(), 0.2);
}

#[test]
fn seek_uses_fraction_of_duration() {
    let backend = MockBackend::new();
    let list = playlist(&["a"]);
    let mut seq = sequencer(&backend, SequencerConfig::default());
    assert_eq!(seq.seek(0.5), Err(PlaybackError::NoTrackLoaded));

    seq.play(&list, &id("a")).unwrap();
    seq.seek(0.25).unwrap();
    assert_eq!(seq.position(), 2.5);

    seq.seek(4.0).unwrap();
    assert_eq!(seq.position(), 10.0);
    assert!(seq.seek(f64::NAN).is_err());
}

#[test]
fn repeat_cycles_through_modes() {
    let backend = MockBackend::new();
    let mut seq = sequencer(&backend, SequencerConfig::default());
    assert_eq!(seq.cycle_repeat(), RepeatMode::All);
    assert_eq!(seq.cycle_repeat(), RepeatMode::One);
    assert_eq!(seq.cycle_repeat(), RepeatMode::None);
}

#[test]
fn single_track_shuffle_replays_itself() {
    let backend = MockBackend::new();
    let list = playlist(&["only"]);
    let mut seq = sequencer(
        &backend,
        SequencerConfig {
            shuffle: true,
            ..SequencerConfig::default()
        },
    );
    seq.play(&list, &id("only")).unwrap();
    backend.set_position(2.0);

    seq.next(&list).unwrap();

    assert_eq!(seq.current_track(), Some(&id("only")));
    assert!(seq.is_playing());
    assert_eq!(seq.position(), 0.0);
}
