use kscan_confirm::{
    DecoderMessage, FrameDetections, Lifecycle, RawDetection, ScanListener, ScanSession,
    SessionConfig, SessionError, SessionHandle, SessionSummary, TrackerParams,
};
use kscan_core::{Barcode, BarcodeFormat, PixelRect, ScanRegion, ScanResult};
use kscan_formats::{builtins, NativeCode};
use std::sync::mpsc;
use std::thread::JoinHandle;

const QR: NativeCode = NativeCode(256);

struct ChannelListener {
    tx: mpsc::Sender<String>,
}

impl ScanListener for ChannelListener {
    fn on_result(&mut self, result: ScanResult) {
        let line = match result {
            ScanResult::Success { barcode } => format!("success:{}", barcode.data),
            ScanResult::Failed { failure } => format!("failed:{failure}"),
            ScanResult::Canceled => "canceled".to_string(),
        };
        let _ = self.tx.send(line);
    }

    fn on_frame_outside(&mut self) {
        let _ = self.tx.send("outside".to_string());
    }
}

fn spawn(
    config: SessionConfig,
) -> (SessionHandle, JoinHandle<SessionSummary>, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel();
    let session = ScanSession::new(&config).expect("session");
    let (handle, worker) = session.spawn(ChannelListener { tx });
    (handle, worker, rx)
}

fn qr(payload: &str) -> FrameDetections {
    FrameDetections::new(1280, 720, vec![RawDetection::new(payload, QR)])
}

#[test]
fn spawned_session_emits_one_success() {
    let config = SessionConfig {
        queue_capacity: 64,
        ..SessionConfig::default()
    };
    let (handle, worker, rx) = spawn(config);
    for _ in 0..5 {
        handle.submit(DecoderMessage::Frame(qr("ticket-42"))).expect("submit");
    }
    handle.cancel().expect("cancel");
    handle.close();

    let summary = worker.join().expect("worker");
    let events: Vec<String> = rx.try_iter().collect();
    assert_eq!(events, vec!["success:ticket-42".to_string()]);
    assert_eq!(summary.messages, 6);
    assert_eq!(summary.tracker.frames_processed, 2);
    assert_eq!(summary.tracker.frames_ignored, 3);
    assert_eq!(summary.tracker.events_emitted, 1);
}

#[test]
fn cancel_before_confirmation_is_delivered() {
    let (handle, worker, rx) = spawn(SessionConfig::default());
    handle.submit(DecoderMessage::Frame(qr("A"))).expect("submit");
    handle.report_failure("torch unavailable").expect("failure");
    handle.cancel().expect("cancel");
    handle.submit(DecoderMessage::Frame(qr("A"))).expect("submit");
    drop(handle);

    worker.join().expect("worker");
    let events: Vec<String> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec!["failed:torch unavailable".to_string(), "canceled".to_string()]
    );
}

#[test]
fn reset_allows_a_second_scan() {
    let (handle, worker, rx) = spawn(SessionConfig::default());
    let second = handle.clone();
    handle.submit(DecoderMessage::Frame(qr("A"))).expect("submit");
    handle.submit(DecoderMessage::Frame(qr("A"))).expect("submit");
    second.reset().expect("reset");
    second.submit(DecoderMessage::Frame(qr("B"))).expect("submit");
    second.submit(DecoderMessage::Frame(qr("B"))).expect("submit");
    handle.close();
    second.close();

    worker.join().expect("worker");
    let events: Vec<String> = rx.try_iter().collect();
    assert_eq!(events, vec!["success:A".to_string(), "success:B".to_string()]);
}

#[test]
fn continuous_session_reports_every_confirmation() {
    let config = SessionConfig {
        tracker: TrackerParams {
            lifecycle: Lifecycle::Continuous,
            ..TrackerParams::default()
        },
        ..SessionConfig::default()
    };
    let (handle, worker, rx) = spawn(config);
    for payload in ["A", "A", "B", "B", "A", "A"] {
        handle.submit(DecoderMessage::Frame(qr(payload))).expect("submit");
    }
    handle.close();
    worker.join().expect("worker");
    let events: Vec<String> = rx.try_iter().collect();
    assert_eq!(events, vec!["success:A", "success:B", "success:A"]);
}

#[test]
fn region_session_reports_outside_frames() {
    let config = SessionConfig {
        formats: vec![BarcodeFormat::QrCode],
        region: Some(ScanRegion::centered(0.5, 0.5).expect("region")),
        ..SessionConfig::default()
    };
    let (handle, worker, rx) = spawn(config);
    let corner = RawDetection::new("A", QR).with_bounds(PixelRect::new(0.0, 0.0, 50.0, 50.0));
    let center = RawDetection::new("A", QR).with_bounds(PixelRect::new(300.0, 300.0, 700.0, 700.0));
    handle
        .submit(DecoderMessage::Frame(FrameDetections::new(1000, 1000, vec![corner])))
        .expect("submit");
    for _ in 0..2 {
        handle
            .submit(DecoderMessage::Frame(FrameDetections::new(1000, 1000, vec![center.clone()])))
            .expect("submit");
    }
    handle.close();
    worker.join().expect("worker");
    let events: Vec<String> = rx.try_iter().collect();
    assert_eq!(events, vec!["outside", "success:A"]);
}

#[test]
fn sends_fail_once_the_worker_is_gone() {
    let session = ScanSession::new(&SessionConfig::default()).expect("session");
    let (handle, worker) = session.spawn(|_: ScanResult| panic!("listener crashed"));
    handle.report_failure("boom").expect("failure");
    assert!(worker.join().is_err());
    assert_eq!(handle.cancel(), Err(SessionError::Closed));
    assert_eq!(handle.submit_frame(qr("A")), Err(SessionError::Closed));
}

#[test]
fn full_queue_drops_frames_without_blocking() {
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let config = SessionConfig {
        queue_capacity: 1,
        ..SessionConfig::default()
    };
    let session = ScanSession::new(&config).expect("session");
    let mut blocked = Some(release_rx);
    let (handle, worker) = session.spawn(move |_: ScanResult| {
        if let Some(rx) = blocked.take() {
            let _ = rx.recv();
        }
    });

    // The first failure blocks the worker inside the listener.
    handle.report_failure("stall").expect("failure");
    let mut dropped = 0;
    for _ in 0..50 {
        if !handle.submit_frame(qr("A")).expect("submit") {
            dropped += 1;
        }
    }
    assert!(dropped > 0);
    assert_eq!(handle.frames_dropped(), dropped);
    release_tx.send(()).expect("release");
    handle.close();
    let summary = worker.join().expect("worker");
    assert_eq!(summary.frames_dropped, dropped);
}

#[test]
fn avfoundation_sessions_accept_identifier_codes() {
    let config = SessionConfig {
        decoder: "ios".to_string(),
        formats: vec![BarcodeFormat::Ean13],
        ..SessionConfig::default()
    };
    let mut session = ScanSession::new(&config).expect("session");
    let ean = builtins::av_foundation_code("org.gs1.EAN-13");
    let frame = FrameDetections::new(100, 100, vec![RawDetection::new("4006381333931", ean)]);
    session.handle_message(DecoderMessage::Frame(frame.clone()));
    let event = session
        .handle_message(DecoderMessage::Frame(frame))
        .expect("event");
    assert_eq!(
        event.result().and_then(|r| r.barcode()),
        Some(&Barcode::new("4006381333931", BarcodeFormat::Ean13))
    );
}

#[test]
fn session_errors_are_descriptive() {
    let config = SessionConfig {
        tracker: TrackerParams {
            threshold: 0,
            ..TrackerParams::default()
        },
        ..SessionConfig::default()
    };
    let err = ScanSession::new(&config).unwrap_err();
    assert!(matches!(err, SessionError::Params(_)));
    assert_eq!(err.to_string(), "confirmation threshold must be at least 1");
}
