mod common;
use common::{temp_dir, write_replay};
use poselog::capture::{CaptureError, CaptureSource, ConnectMode, StreamSource};
use poselog::utils::time::now_seconds;
use std::io::Write;
use std::net::TcpListener;
use std::thread;

#[test]
fn test_tcp_stream_delivers_frames_then_reports_link_loss() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().unwrap();

    let server = thread::spawn(move || {
        let (mut conn, _) = listener.accept().expect("accept");
        let lines = [
            r#"{"frame": 7, "time": 1.0, "objects": {"hk_test": {"position": [1, 2, 3], "orientation": [1, 0, 0, 0]}}}"#,
            "",
            r#"{"frame": 6, "time": 0.9, "objects": {}}"#,
            r#"{"frame": 8, "time": 1.1, "objects": {}}"#,
        ];
        for l in lines {
            writeln!(conn, "{l}").unwrap();
        }
    });

    let mut source = StreamSource::new();
    source
        .connect(&format!("tcp://{addr}"), ConnectMode::Full)
        .expect("connect");

    let first = source.next_unread_frame().unwrap();
    assert_eq!(first.frame_number, 7);
    assert_eq!(first.capture_time, 1.0);
    let pose = source.resolve_object(&first, "hk_test").unwrap();
    assert_eq!(pose.position, [1.0, 2.0, 3.0]);

    // frame 6 is older than 7 and is skipped
    let second = source.next_unread_frame().unwrap();
    assert_eq!(second.frame_number, 8);
    assert!(source.resolve_object(&second, "hk_test").is_none());

    server.join().unwrap();
    assert!(matches!(
        source.next_unread_frame(),
        Err(CaptureError::Read(_))
    ));
    source.disconnect().expect("disconnect");
    assert!(!source.is_connected());
}

#[test]
fn test_replay_is_retimed_and_exhausts() {
    let dir = temp_dir("stream_replay");
    let address = write_replay(
        &dir,
        &[
            r#"{"frame": 1, "time": 1000.0, "objects": {}}"#,
            r#"{"frame": 2, "time": 1000.5, "objects": {}}"#,
        ],
    );

    let mut source = StreamSource::new();
    source.connect(&address, ConnectMode::Lightweight).unwrap();

    let before = now_seconds();
    let a = source.next_unread_frame().unwrap();
    let b = source.next_unread_frame().unwrap();

    assert!(a.capture_time >= before - 1e-3);
    assert!((b.capture_time - a.capture_time - 0.5).abs() < 1e-6);
    assert!(matches!(
        source.next_unread_frame(),
        Err(CaptureError::Exhausted)
    ));
    source.disconnect().unwrap();
}

#[test]
fn test_connect_twice_is_rejected() {
    let dir = temp_dir("stream_twice");
    let address = write_replay(&dir, &[]);

    let mut source = StreamSource::new();
    source.connect(&address, ConnectMode::Full).unwrap();
    assert!(matches!(
        source.connect(&address, ConnectMode::Full),
        Err(CaptureError::AlreadyConnected(_))
    ));
}

#[test]
fn test_read_before_connect_fails() {
    let mut source = StreamSource::new();
    assert!(matches!(
        source.next_unread_frame(),
        Err(CaptureError::NotConnected)
    ));
}
