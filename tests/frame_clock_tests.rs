//! Fixed-interval pacing and rolling FPS statistics.

use fruitland::engine::{Clock, FrameClock, FrameHandoff, ManualClock, QuitSignal};
use fruitland::render::DrawList;
use fruitland::types::DrawOp;

const PERIOD: u64 = 33_333;

#[test]
fn steady_ticks_keep_the_period() {
    let clock = ManualClock::new(0);
    let mut fc = FrameClock::new(PERIOD, 10_000_000, clock.now_us());

    for _ in 0..30 {
        clock.advance(5_000);
        fc.pace(&clock);
    }
    assert_eq!(clock.now_us(), 30 * PERIOD);
    assert_eq!(clock.slept_us(), 30 * (PERIOD - 5_000));
}

#[test]
fn a_slow_tick_does_not_shorten_the_next() {
    let clock = ManualClock::new(0);
    let mut fc = FrameClock::new(PERIOD, 10_000_000, 0);

    clock.advance(50_000);
    assert_eq!(fc.pace(&clock), 0);

    clock.advance(3_333);
    assert_eq!(fc.pace(&clock), PERIOD - 3_333);
    assert_eq!(clock.now_us(), 50_000 + PERIOD);
}

#[test]
fn fps_report_closes_each_window() {
    let mut fc = FrameClock::new(PERIOD, 990_000, 0);
    let mut reports = Vec::new();
    for i in 1..=45u64 {
        let now = i * PERIOD;
        let render_us = if i % 2 == 0 { 2_000 } else { 4_000 };
        if let Some(r) = fc.record_frame(render_us, now) {
            reports.push(r);
        }
    }

    assert_eq!(reports.len(), 1);
    let r = reports[0];
    assert_eq!(r.frames, 30);
    assert!((r.fps - 30.0).abs() < 0.1, "fps was {}", r.fps);
    assert_eq!(r.min_render_us, 2_000);
    assert_eq!(r.max_render_us, 4_000);
    assert_eq!(r.avg_render_us, 3_000);
}

#[test]
fn handoff_keeps_at_most_one_pending_frame() {
    let handoff = FrameHandoff::new();
    let mut frame = DrawList::new();
    frame.push(DrawOp::Present);

    assert!(handoff.publish(&frame));
    assert!(!handoff.publish(&frame));
    assert!(handoff.is_pending());

    let mut out = DrawList::new();
    assert!(handoff.take(&mut out));
    assert_eq!(out.as_slice(), &[DrawOp::Present]);
    assert!(handoff.publish(&frame));
}

#[test]
fn quit_signal_is_shared_across_threads() {
    let quit = QuitSignal::new();
    let remote = quit.clone();
    std::thread::spawn(move || remote.raise()).join().unwrap();
    assert!(quit.is_raised());
}
