use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kscan_confirm::{ConfirmationTracker, FrameDetections, RawDetection, TrackerParams};
use kscan_core::{BarcodeFormat, PixelRect, ScanRegion};
use kscan_formats::{builtins, FormatTranslator, NativeCode};

fn busy_frame(symbols: usize) -> FrameDetections {
    let detections = (0..symbols)
        .map(|i| {
            let x = (i % 8) as f32 * 120.0;
            let y = (i / 8) as f32 * 120.0;
            let code = if i % 3 == 0 { NativeCode(32) } else { NativeCode(256) };
            RawDetection::new(format!("item-{i}"), code)
                .with_bounds(PixelRect::new(x, y, x + 100.0, y + 100.0))
        })
        .collect();
    FrameDetections::new(1920, 1080, detections)
}

fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_frame");
    let region = ScanRegion::centered(0.6, 0.6).ok();
    for symbols in [1usize, 8, 32] {
        let frame = busy_frame(symbols);
        group.bench_with_input(BenchmarkId::from_parameter(symbols), &frame, |b, frame| {
            // High threshold keeps the tracker accumulating instead of finishing.
            let params = TrackerParams {
                threshold: u32::MAX,
                ..TrackerParams::default()
            };
            let mut tracker = ConfirmationTracker::new(
                FormatTranslator::new(&builtins::ML_KIT),
                vec![BarcodeFormat::QrCode],
                region,
                params,
            )
            .expect("tracker");
            b.iter(|| black_box(tracker.process_frame(black_box(frame))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_process_frame);
criterion_main!(benches);
