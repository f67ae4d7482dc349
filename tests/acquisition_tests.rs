mod common;
use common::{RecordingSink, ScriptedSource, visible};
use poselog::capture::CaptureError;
use poselog::core::CancellationSignal;
use poselog::core::acquisition::{StopReason, run};
use poselog::models::Tracked;
use poselog::utils::time::now_seconds;
use std::io;

fn valid() -> Option<poselog::models::RawPose> {
    Some(visible([1.0, 2.0, 3.0], [1.0, 0.0, 0.0, 0.0]))
}

#[test]
fn test_one_row_per_frame_in_frame_order() {
    let signal = CancellationSignal::new();
    let mut source = ScriptedSource::new()
        .frame(10, valid())
        .frame(11, valid())
        .frame(15, valid())
        .frame(16, valid())
        .cancel_at_end(&signal);
    let mut sink = RecordingSink::default();

    let summary = run(&mut source, &mut sink, &signal, common::OBJECT, now_seconds())
        .expect("loop should stop cleanly");

    assert_eq!(summary.rows_written, 4);
    assert_eq!(summary.stop, StopReason::Cancelled);
    assert_eq!(sink.rows.len(), source.frames_served);

    let numbers: Vec<u64> = sink.rows.iter().map(|r| r.frame_number).collect();
    assert_eq!(numbers, vec![10, 11, 15, 16]);
    assert!(numbers.windows(2).all(|w| w[1] > w[0]));
    assert!(sink.rows.iter().all(|r| r.elapsed_seconds >= 0.0));
}

#[test]
fn test_cancel_before_first_frame_reads_nothing() {
    let signal = CancellationSignal::new();
    signal.trigger();
    let mut source = ScriptedSource::new().frame(1, valid());
    let mut sink = RecordingSink::default();

    let summary = run(&mut source, &mut sink, &signal, common::OBJECT, 0.0).unwrap();

    assert_eq!(summary.rows_written, 0);
    assert_eq!(source.frames_served, 0);
    assert!(sink.rows.is_empty());
}

#[test]
fn test_absent_object_gives_occluded_row() {
    let signal = CancellationSignal::new();
    let mut source = ScriptedSource::new()
        .frame(1, valid())
        .frame(2, None)
        .frame(3, valid())
        .cancel_at_end(&signal);
    let mut sink = RecordingSink::default();

    let summary = run(&mut source, &mut sink, &signal, common::OBJECT, 0.0).unwrap();

    assert_eq!(summary.rows_written, 3);
    let row = &sink.rows[1];
    assert_eq!(row.frame_number, 2);
    assert!(row.sample.is_fully_occluded());
}

#[test]
fn test_other_object_name_is_treated_as_absent() {
    let signal = CancellationSignal::new();
    let mut source = ScriptedSource::new().frame(1, valid()).cancel_at_end(&signal);
    let mut sink = RecordingSink::default();

    run(&mut source, &mut sink, &signal, "wand", 0.0).unwrap();

    assert_eq!(sink.rows.len(), 1);
    assert!(sink.rows[0].sample.is_fully_occluded());
}

#[test]
fn test_source_error_keeps_rows_already_written() {
    let signal = CancellationSignal::new();
    let mut source = ScriptedSource::new()
        .frame(1, valid())
        .frame(2, valid())
        .fail(CaptureError::Read(io::Error::other("link lost")))
        .frame(3, valid());
    let mut sink = RecordingSink::default();

    let err = run(&mut source, &mut sink, &signal, common::OBJECT, 0.0).unwrap_err();

    assert_eq!(err.rows_written, 2);
    assert!(matches!(err.source, CaptureError::Read(_)));
    assert_eq!(sink.rows.len(), 2);
}

#[test]
fn test_exhausted_source_is_a_clean_stop() {
    let signal = CancellationSignal::new();
    let mut source = ScriptedSource::new().frame(1, valid()).frame(2, valid());
    let mut sink = RecordingSink::default();

    let summary = run(&mut source, &mut sink, &signal, common::OBJECT, 0.0).unwrap();

    assert_eq!(summary.stop, StopReason::SourceExhausted);
    assert_eq!(summary.rows_written, 2);
}

#[test]
fn test_elapsed_time_is_relative_to_session_start() {
    let signal = CancellationSignal::new();
    let mut source = ScriptedSource::new().frame(1, valid()).cancel_at_end(&signal);
    let mut sink = RecordingSink::default();
    let start = now_seconds() - 10.0;

    run(&mut source, &mut sink, &signal, common::OBJECT, start).unwrap();

    let elapsed = sink.rows[0].elapsed_seconds;
    assert!((10.0..11.0).contains(&elapsed), "elapsed = {elapsed}");
    assert_eq!(
        sink.rows[0].sample.position,
        Tracked::Visible([1.0, 2.0, 3.0])
    );
}
