#![allow(missing_docs)]
//! Host-level tests for the multiplexed scan engine.

mod common;

use common::{anode_steps, rendered_frames};
use embassy_futures::block_on;
use embassy_time::{Duration, Instant};
use matrix_envoy::config::ScanConfig;
use matrix_envoy::frame::Frame;
use matrix_envoy::host_pins::{PinOp, RecordingPinController};
use matrix_envoy::pins::CathodeWiring;
use matrix_envoy::scanner::MatrixScanner;

const X_BITS: [[u8; 3]; 3] = [[1, 0, 1], [0, 1, 0], [1, 0, 1]];

fn short_config(wiring: CathodeWiring) -> ScanConfig {
    ScanConfig {
        multiplex_delay: Duration::from_micros(500),
        frame_hold: Duration::from_millis(4),
        wiring,
    }
}

fn scan_once(frame: &Frame<3, 3>, wiring: CathodeWiring) -> RecordingPinController<'static> {
    let config = short_config(wiring);
    let scanner = MatrixScanner::new(&config);
    let mut pins = RecordingPinController::new(3, 3);
    block_on(scanner.render_frame(&mut pins, frame, config.frame_hold)).unwrap();
    pins
}

#[test]
fn at_most_one_anode_active_at_any_instant() {
    let frame = Frame::<3, 3>::from_bits(X_BITS);
    let pins = scan_once(&frame, CathodeWiring::Sink);

    let mut active = 0usize;
    for op in pins.ops() {
        if let PinOp::Anode { high, .. } = op {
            if *high {
                active += 1;
            } else {
                active = active.saturating_sub(1);
            }
            assert!(active <= 1, "two anodes active simultaneously");
        }
    }
}

#[test]
fn lit_pixels_sink_their_cathodes_low() {
    let frame = Frame::<3, 3>::from_bits(X_BITS);
    let pins = scan_once(&frame, CathodeWiring::Sink);

    for step in anode_steps(pins.ops(), 3) {
        for row in 0..3 {
            let level = step.cathode_levels[row].expect("cathode written during step");
            let lit = frame[(step.anode, row)];
            // Sink wiring: lit pixels are driven low, dark pixels high.
            assert_eq!(level, !lit, "anode {} row {row}", step.anode);
        }
    }
}

#[test]
fn source_wiring_inverts_the_drive_levels() {
    let frame = Frame::<3, 3>::from_bits(X_BITS);
    let pins = scan_once(&frame, CathodeWiring::Source);

    for step in anode_steps(pins.ops(), 3) {
        for row in 0..3 {
            let level = step.cathode_levels[row].expect("cathode written during step");
            let lit = frame[(step.anode, row)];
            assert_eq!(level, lit, "anode {} row {row}", step.anode);
        }
    }
}

#[test]
fn cathodes_return_to_dark_baseline_between_anode_steps() {
    let frame = Frame::<3, 3>::filled(true);
    let pins = scan_once(&frame, CathodeWiring::Sink);
    let dark = CathodeWiring::Sink.dark_level();

    // Between an anode dropping and the next rising, every cathode write must
    // be the dark baseline, or a residual low would ghost into the next column.
    let mut anode_active = false;
    for op in pins.ops() {
        match *op {
            PinOp::Anode { high, .. } => anode_active = high,
            PinOp::Cathode { high, .. } if !anode_active => {
                assert_eq!(high, dark, "cathode left off the dark baseline between steps");
            }
            _ => {}
        }
    }
}

#[test]
fn all_dark_frame_still_scans_every_anode() {
    let frame = Frame::<3, 3>::new();
    let pins = scan_once(&frame, CathodeWiring::Sink);

    let steps = anode_steps(pins.ops(), 3);
    assert!(steps.len() >= 3, "expected at least one full scan cycle");
    let frames = rendered_frames::<3, 3>(pins.ops(), CathodeWiring::Sink);
    assert_eq!(frames, [frame]);
}

#[test]
fn render_frame_honors_the_hold_duration() {
    let config = short_config(CathodeWiring::Sink);
    let scanner = MatrixScanner::new(&config);
    let mut pins = RecordingPinController::new(3, 3);
    let frame = Frame::<3, 3>::from_bits(X_BITS);

    let hold = Duration::from_millis(30);
    let started = Instant::now();
    block_on(scanner.render_frame(&mut pins, &frame, hold)).unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= hold, "returned after {elapsed:?} - before the hold elapsed");
    // Overshoot is one scan cycle plus scheduling slack.
    let bound = hold + scanner.cycle_time(3) + Duration::from_millis(100);
    assert!(elapsed < bound, "returned after {elapsed:?} - overshot the hold");
}

#[test]
fn zero_hold_returns_without_raising_an_anode() {
    let config = short_config(CathodeWiring::Sink);
    let scanner = MatrixScanner::new(&config);
    let mut pins = RecordingPinController::new(3, 3);
    let frame = Frame::<3, 3>::filled(true);

    block_on(scanner.render_frame(&mut pins, &frame, Duration::from_ticks(0))).unwrap();

    assert!(
        !pins
            .ops()
            .iter()
            .any(|op| matches!(op, PinOp::Anode { high: true, .. })),
        "zero hold must not light the matrix"
    );
}

#[test]
fn scan_starts_from_the_dark_baseline() {
    let frame = Frame::<3, 3>::filled(true);
    let pins = scan_once(&frame, CathodeWiring::Sink);
    let dark = CathodeWiring::Sink.dark_level();

    // The first writes are the baseline sweep, before any anode goes high.
    let baseline: Vec<_> = pins
        .ops()
        .iter()
        .take_while(|op| matches!(op, PinOp::Cathode { .. }))
        .collect();
    assert_eq!(baseline.len(), 3);
    for op in baseline {
        assert!(matches!(op, PinOp::Cathode { high, .. } if *high == dark));
    }
}
