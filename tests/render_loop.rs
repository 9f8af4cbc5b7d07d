use water_wasm::debounce::Debouncer;
use water_wasm::scheduler::{AnimationClock, LoopPhase, RenderLoop, SourceReadiness};
use water_wasm::ResumePolicy;

/// Drives a loop the way the animation-frame callback does and counts draws.
fn run_frames(render_loop: &mut RenderLoop, start_ms: f64, count: usize) -> Vec<f32> {
    let mut times = Vec::new();
    for i in 0..count {
        if let Some(t) = render_loop.begin_frame(start_ms + i as f64 * 16.0) {
            times.push(t);
            render_loop.frame_requested();
        }
    }
    times
}

#[test]
fn starts_once() {
    let mut render_loop = RenderLoop::new(ResumePolicy::Continue);
    assert_eq!(render_loop.phase(), LoopPhase::Uninitialized);
    assert_eq!(render_loop.begin_frame(0.0), None);

    assert!(render_loop.start(1000.0));
    render_loop.frame_requested();
    assert!(!render_loop.start(2000.0));
    assert_eq!(render_loop.begin_frame(1500.0), Some(0.5));
}

#[test]
fn hidden_page_draws_nothing() {
    let mut render_loop = RenderLoop::new(ResumePolicy::Continue);
    assert!(render_loop.start(0.0));
    render_loop.frame_requested();
    run_frames(&mut render_loop, 0.0, 3);
    let drawn = render_loop.frames_drawn();

    render_loop.pause(100.0);
    assert_eq!(render_loop.phase(), LoopPhase::Paused);
    // The frame requested before the pause still fires but ends the chain.
    assert_eq!(render_loop.begin_frame(110.0), None);
    assert_eq!(render_loop.begin_frame(5000.0), None);
    assert_eq!(render_loop.frames_drawn(), drawn);

    assert!(render_loop.resume(6000.0));
    render_loop.frame_requested();
    assert!(render_loop.begin_frame(6016.0).is_some());
    assert_eq!(render_loop.frames_drawn(), drawn + 1);
}

#[test]
fn rapid_visibility_toggles_keep_one_chain() {
    let mut render_loop = RenderLoop::new(ResumePolicy::Continue);
    assert!(render_loop.start(0.0));
    render_loop.frame_requested();

    render_loop.pause(10.0);
    // The old frame is still outstanding, so resuming must not request another.
    assert!(!render_loop.resume(12.0));
    assert!(!render_loop.resume(13.0));
    assert!(render_loop.begin_frame(16.0).is_some());
}

#[test]
fn visible_signal_while_running_is_ignored() {
    let mut render_loop = RenderLoop::new(ResumePolicy::Continue);
    assert!(render_loop.start(0.0));
    render_loop.frame_requested();
    assert!(!render_loop.resume(5.0));
    assert_eq!(render_loop.phase(), LoopPhase::Running);
}

#[test]
fn stop_is_idempotent_and_final() {
    let mut render_loop = RenderLoop::new(ResumePolicy::Continue);
    render_loop.stop();
    render_loop.stop();
    assert_eq!(render_loop.phase(), LoopPhase::Stopped);
    assert!(!render_loop.start(0.0));
    assert!(!render_loop.resume(0.0));
    assert_eq!(render_loop.begin_frame(0.0), None);

    let mut paused = RenderLoop::new(ResumePolicy::Continue);
    paused.start(0.0);
    paused.pause(1.0);
    paused.stop();
    assert_eq!(paused.phase(), LoopPhase::Stopped);
}

#[test]
fn clock_continues_across_pause() {
    let mut clock = AnimationClock::new(ResumePolicy::Continue);
    clock.start(1000.0);
    assert_eq!(clock.elapsed_secs(3000.0), 2.0);
    clock.suspend(3000.0);
    clock.resume(10_000.0);
    assert_eq!(clock.elapsed_secs(10_000.0), 2.0);
    assert_eq!(clock.elapsed_secs(10_500.0), 2.5);
}

#[test]
fn clock_restarts_when_configured() {
    let mut clock = AnimationClock::new(ResumePolicy::Restart);
    clock.start(1000.0);
    clock.suspend(3000.0);
    clock.resume(10_000.0);
    assert_eq!(clock.elapsed_secs(10_000.0), 0.0);
    assert_eq!(clock.elapsed_secs(10_250.0), 0.25);
}

#[test]
fn clock_never_runs_backwards() {
    let mut clock = AnimationClock::new(ResumePolicy::Continue);
    clock.start(500.0);
    assert_eq!(clock.elapsed_secs(400.0), 0.0);
}

#[test]
fn source_becomes_ready_once() {
    let mut readiness = SourceReadiness::default();
    assert!(!readiness.is_ready());
    assert!(readiness.mark_ready());
    assert!(!readiness.mark_ready());
    assert!(readiness.is_ready());
}

#[test]
fn resize_burst_uploads_once() {
    let mut debouncer: Debouncer<i32> = Debouncer::new(200);
    let mut cancelled = Vec::new();
    let mut tickets = Vec::new();

    for timer in 1..=5 {
        let (ticket, stale) = debouncer.rearm();
        cancelled.extend(stale);
        debouncer.armed(ticket, timer);
        tickets.push(ticket);
    }
    assert_eq!(cancelled, vec![1, 2, 3, 4]);

    // Even a stale timer that slipped through is rejected.
    let uploads = tickets.iter().filter(|&&t| debouncer.fire(t)).count();
    assert_eq!(uploads, 1);
    assert!(!debouncer.is_pending());
}

#[test]
fn late_handle_for_superseded_ticket_is_dropped() {
    let mut debouncer: Debouncer<i32> = Debouncer::new(200);
    let (first, _) = debouncer.rearm();
    let (second, stale) = debouncer.rearm();
    assert_eq!(stale, None);
    debouncer.armed(first, 7);
    debouncer.armed(second, 8);
    let (_, stale) = debouncer.rearm();
    assert_eq!(stale, Some(8));
    assert_eq!(debouncer.delay_ms(), 200);
}

#[test]
fn hidden_at_start_then_visible_starts_one_chain() {
    let mut render_loop = RenderLoop::new(ResumePolicy::Continue);
    // Image ready while the tab is in the background: start, then pause at once.
    render_loop.start(0.0);
    render_loop.pause(0.0);
    assert_eq!(render_loop.phase(), LoopPhase::Paused);
    assert_eq!(render_loop.frames_drawn(), 0);

    assert!(render_loop.resume(3000.0));
    render_loop.frame_requested();
    assert!(!render_loop.resume(3001.0));
    assert_eq!(render_loop.begin_frame(3500.0), Some(0.5));
    assert_eq!(render_loop.frames_drawn(), 1);
}
