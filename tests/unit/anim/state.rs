use super::*;

#[test]
fn defaults_match_initial_running_state() {
    let s = AnimationState::default();
    assert!(s.running);
    assert_eq!(s.speed, 1.0);
    assert_eq!(s.elapsed_ms, 0.0);
}

#[test]
fn speed_is_snapped_to_step() {
    let mut s = AnimationState::default();
    s.set_speed(1.26).unwrap();
    assert!((s.speed - 1.3).abs() < 1e-12);
    s.set_speed(0.0).unwrap();
    assert_eq!(s.speed, 0.0);
    s.set_speed(3.0).unwrap();
    assert!((s.speed - 3.0).abs() < 1e-12);
}

#[test]
fn out_of_range_speed_is_rejected_without_mutation() {
    let mut s = AnimationState::default();
    for bad in [-0.1, 3.01, f64::NAN, f64::INFINITY] {
        assert!(s.set_speed(bad).is_err(), "{bad}");
    }
    assert_eq!(s.speed, 1.0);
}
