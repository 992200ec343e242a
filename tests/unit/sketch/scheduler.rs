use super::*;

const MS: Duration = Duration::from_millis(1);

#[test]
fn invalid_rates_are_rejected() {
    assert!(FrameLoop::new(0.0).is_err());
    assert!(FrameLoop::new(-5.0).is_err());
    assert!(FrameLoop::new(f64::NAN).is_err());
    assert!(FrameLoop::new(f64::INFINITY).is_err());
    let mut fl = FrameLoop::new(10.0).unwrap();
    assert!(fl.set_frame_rate(0.0).is_err());
    assert_eq!(fl.frame_rate(), 10.0);
}

#[test]
fn start_arms_first_tick_immediately() {
    let mut fl = FrameLoop::new(10.0).unwrap();
    assert_eq!(fl.state(), LoopState::Uninitialized);
    assert_eq!(fl.time_until_due(Duration::ZERO), None);

    fl.start(5 * MS).unwrap();
    assert_eq!(fl.state(), LoopState::Running);
    assert!(fl.is_due(5 * MS));
    assert!(fl.start(5 * MS).is_err());
}

#[test]
fn deadlines_advance_at_fixed_rate() {
    let mut fl = FrameLoop::new(10.0).unwrap();
    fl.start(Duration::ZERO).unwrap();
    fl.complete_tick(Duration::ZERO, 3 * MS);
    assert_eq!(fl.next_due(), Some(100 * MS));
    assert_eq!(fl.last_frame_duration(), 3 * MS);
    assert_eq!(fl.time_until_due(40 * MS), Some(60 * MS));

    fl.complete_tick(100 * MS, 120 * MS);
    assert_eq!(fl.next_due(), Some(200 * MS));
    assert_eq!(fl.frame_count(), 2);
}

#[test]
fn late_tick_coalesces() {
    let mut fl = FrameLoop::new(10.0).unwrap();
    fl.start(Duration::ZERO).unwrap();
    // draw took 350ms: three deadlines missed, only one tick follows
    fl.complete_tick(Duration::ZERO, 350 * MS);
    assert_eq!(fl.next_due(), Some(450 * MS));
}

#[test]
fn same_rate_is_a_no_op() {
    let mut fl = FrameLoop::new(30.0).unwrap();
    fl.start(Duration::ZERO).unwrap();
    fl.set_frame_rate(30.0).unwrap();
    assert_eq!(fl.state(), LoopState::Running);
    assert_eq!(fl.next_due(), Some(Duration::ZERO));
}

#[test]
fn rate_change_rearms_and_keeps_frame_count() {
    let mut fl = FrameLoop::new(10.0).unwrap();
    fl.start(Duration::ZERO).unwrap();
    fl.complete_tick(Duration::ZERO, MS);
    fl.complete_tick(100 * MS, 101 * MS);

    fl.set_frame_rate(20.0).unwrap();
    assert_eq!(fl.state(), LoopState::Reconfiguring);
    assert_eq!(fl.time_until_due(150 * MS), None);
    assert_eq!(fl.interval(), 50 * MS);

    assert!(fl.rearm(150 * MS));
    assert!(!fl.rearm(150 * MS));
    assert_eq!(fl.state(), LoopState::Running);
    assert_eq!(fl.next_due(), Some(200 * MS));
    assert_eq!(fl.frame_count(), 2);
}

#[test]
fn rate_change_before_start_does_not_reconfigure() {
    let mut fl = FrameLoop::new(10.0).unwrap();
    fl.set_frame_rate(25.0).unwrap();
    assert_eq!(fl.state(), LoopState::Uninitialized);
    fl.start(Duration::ZERO).unwrap();
    assert!(fl.is_due(Duration::ZERO));
}

#[test]
fn stop_is_idempotent_and_final() {
    let mut fl = FrameLoop::new(10.0).unwrap();
    fl.start(Duration::ZERO).unwrap();
    fl.stop();
    fl.stop();
    assert!(fl.is_stopped());
    assert_eq!(fl.time_until_due(Duration::ZERO), None);
    assert!(fl.start(Duration::ZERO).is_err());
}

#[test]
fn stop_before_start_is_kept() {
    let mut fl = FrameLoop::new(10.0).unwrap();
    fl.stop();
    assert_eq!(fl.state(), LoopState::Stopped);
    assert!(fl.start(Duration::ZERO).is_err());
    assert_eq!(fl.time_until_due(Duration::ZERO), None);
}

#[test]
fn pointer_flag_is_taken_once() {
    let mut fl = FrameLoop::new(10.0).unwrap();
    assert!(!fl.take_pointer_moved());
    fl.mark_pointer_moved();
    fl.mark_pointer_moved();
    assert!(fl.take_pointer_moved());
    assert!(!fl.take_pointer_moved());
}

#[test]
fn manual_clock_advances_on_sleep_and_is_shared() {
    let clock = ManualClock::new();
    let other = clock.clone();
    clock.sleep(7 * MS);
    other.advance(3 * MS);
    assert_eq!(clock.now(), 10 * MS);
    assert_eq!(other.now(), 10 * MS);
}
