use super::*;

#[derive(Default)]
struct FakeClock {
    next: u64,
    requested: Vec<FrameRequestId>,
    cancelled: Vec<FrameRequestId>,
}

impl FrameClock for FakeClock {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next += 1;
        let id = FrameRequestId(self.next);
        self.requested.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.cancelled.push(id);
    }
}

fn started() -> (Scheduler, FakeClock) {
    let mut clock = FakeClock::default();
    let mut s = Scheduler::default();
    s.start(&mut clock);
    (s, clock)
}

#[test]
fn start_requests_exactly_one_frame() {
    let (mut s, mut clock) = started();
    s.start(&mut clock);
    assert_eq!(clock.requested.len(), 1);
    assert_eq!(s.pending(), Some(FrameRequestId(1)));
    assert_eq!(s.play_state(), PlayState::Running);
}

#[test]
fn frames_advance_by_timestamp_delta() {
    let (mut s, mut clock) = started();
    assert_eq!(
        s.on_frame(FrameRequestId(1), 1000.0, &mut clock),
        FrameTick::Advanced { delta_ms: 0.0 }
    );
    assert_eq!(
        s.on_frame(FrameRequestId(2), 1016.0, &mut clock),
        FrameTick::Advanced { delta_ms: 16.0 }
    );
    s.on_frame(FrameRequestId(3), 1050.0, &mut clock);
    assert_eq!(s.state().elapsed_ms, 50.0);
    assert_eq!(s.pending(), Some(FrameRequestId(4)));
}

#[test]
fn stale_ids_are_ignored() {
    let (mut s, mut clock) = started();
    s.on_frame(FrameRequestId(1), 0.0, &mut clock);
    assert_eq!(
        s.on_frame(FrameRequestId(1), 500.0, &mut clock),
        FrameTick::Stale
    );
    assert_eq!(s.state().elapsed_ms, 0.0);
    assert_eq!(clock.requested.len(), 2);
}

#[test]
fn backwards_timestamps_add_nothing() {
    let (mut s, mut clock) = started();
    s.on_frame(FrameRequestId(1), 100.0, &mut clock);
    s.on_frame(FrameRequestId(2), 40.0, &mut clock);
    assert_eq!(s.state().elapsed_ms, 0.0);
    s.on_frame(FrameRequestId(3), 110.0, &mut clock);
    assert_eq!(s.state().elapsed_ms, 10.0);
}

#[test]
fn pause_cancels_and_freezes_time() {
    let (mut s, mut clock) = started();
    s.on_frame(FrameRequestId(1), 0.0, &mut clock);
    s.on_frame(FrameRequestId(2), 20.0, &mut clock);
    s.pause(&mut clock);
    assert_eq!(clock.cancelled, vec![FrameRequestId(3)]);
    assert_eq!(s.pending(), None);
    assert_eq!(s.play_state(), PlayState::Paused);
    assert_eq!(
        s.on_frame(FrameRequestId(3), 500.0, &mut clock),
        FrameTick::Stale
    );
    assert_eq!(s.state().elapsed_ms, 20.0);
}

#[test]
fn resume_does_not_jump_over_the_pause() {
    let (mut s, mut clock) = started();
    s.on_frame(FrameRequestId(1), 0.0, &mut clock);
    s.on_frame(FrameRequestId(2), 20.0, &mut clock);
    s.pause(&mut clock);
    s.resume(&mut clock);
    let id = s.pending().unwrap();
    s.on_frame(id, 10_000.0, &mut clock);
    assert_eq!(s.state().elapsed_ms, 20.0);
    let id = s.pending().unwrap();
    s.on_frame(id, 10_016.0, &mut clock);
    assert_eq!(s.state().elapsed_ms, 36.0);
}

#[test]
fn toggle_flips_state() {
    let (mut s, mut clock) = started();
    assert_eq!(s.toggle(&mut clock), PlayState::Paused);
    assert_eq!(s.toggle(&mut clock), PlayState::Running);
    assert_eq!(clock.requested.len(), 2);
}

#[test]
fn speed_is_independent_of_play_state() {
    let (mut s, mut clock) = started();
    s.pause(&mut clock);
    s.set_speed(2.5).unwrap();
    assert_eq!(s.state().speed, 2.5);
    assert_eq!(s.play_state(), PlayState::Paused);
    assert!(s.set_speed(3.5).is_err());
    assert_eq!(s.state().speed, 2.5);
}

#[test]
fn restart_replaces_the_pending_request() {
    let (mut s, mut clock) = started();
    s.on_frame(FrameRequestId(1), 0.0, &mut clock);
    s.restart(&mut clock);
    assert_eq!(clock.cancelled, vec![FrameRequestId(2)]);
    assert_eq!(s.pending(), Some(FrameRequestId(3)));
}

#[test]
fn defer_keeps_time_and_rerequests() {
    let (mut s, mut clock) = started();
    assert!(s.defer(FrameRequestId(1), &mut clock));
    assert_eq!(s.pending(), Some(FrameRequestId(2)));
    assert_eq!(s.state().elapsed_ms, 0.0);
    assert!(!s.defer(FrameRequestId(1), &mut clock));
}

#[test]
fn preview_matches_the_committed_frame() {
    let (mut s, mut clock) = started();
    s.on_frame(FrameRequestId(1), 100.0, &mut clock);
    let preview = s.preview(133.0);
    assert_eq!(s.state().elapsed_ms, 0.0);
    s.on_frame(FrameRequestId(2), 133.0, &mut clock);
    assert_eq!(s.state(), preview);

    s.pause(&mut clock);
    assert_eq!(s.preview(10_000.0), s.state());
}

#[test]
fn paused_redraw_is_one_shot_and_keeps_time() {
    let (mut s, mut clock) = started();
    s.on_frame(FrameRequestId(1), 0.0, &mut clock);
    s.on_frame(FrameRequestId(2), 40.0, &mut clock);
    s.pause(&mut clock);
    assert_eq!(s.pending(), None);

    s.request_redraw(&mut clock);
    s.request_redraw(&mut clock);
    let id = s.pending().unwrap();
    assert_eq!(clock.requested.len(), 4);
    assert_eq!(s.preview(5_000.0).elapsed_ms, 40.0);
    assert_eq!(s.on_frame(id, 5_000.0, &mut clock), FrameTick::Idle);
    assert_eq!(s.pending(), None);
    assert_eq!(s.state().elapsed_ms, 40.0);
    assert_eq!(clock.requested.len(), 4);
}

#[test]
fn redraw_while_running_reuses_the_pending_frame() {
    let (mut s, mut clock) = started();
    s.request_redraw(&mut clock);
    assert_eq!(clock.requested.len(), 1);
    assert_eq!(s.pending(), Some(FrameRequestId(1)));
}
