use super::*;

fn alpha_at(bytes: &[u8], size: u32, x: u32, y: u32) -> u8 {
    bytes[((y * size + x) * 4 + 3) as usize]
}

#[test]
fn conical_gradient_anchors() {
    let focus = (-1.0 / 3.0, -1.0 / 3.0);
    assert_eq!(conical_t(focus, focus), Some(0.0));
    let rim = conical_t((1.0, 0.0), focus).unwrap();
    assert!((rim - 1.0).abs() < 1e-9);
    assert_eq!(conical_t((1.5, 0.0), focus), None);

    let mid = conical_t((0.0, 0.0), focus).unwrap();
    assert!(mid > 0.0 && mid < 1.0);
}

#[test]
fn highlight_is_brightest_up_left_and_clear_outside() {
    let size = 64;
    let bytes = bake_highlight(size, 0.4);
    let near_focus = alpha_at(&bytes, size, 21, 21);
    let lower_right = alpha_at(&bytes, size, 50, 50);
    assert!(near_focus > lower_right);
    assert!(near_focus <= 102);
    assert_eq!(alpha_at(&bytes, size, 0, 0), 0);
}

#[test]
fn shadow_is_solid_in_core_and_fades_out() {
    let size = 64;
    let bytes = bake_shadow(size, 0.6, Rgba8::from_hex(0x000000).with_alpha(0.3));
    let center = alpha_at(&bytes, size, 32, 32);
    assert!((76..=77).contains(&center), "{center}");
    assert_eq!(alpha_at(&bytes, size, 0, 0), 0);
    assert!(alpha_at(&bytes, size, 60, 32) < center);
}

#[test]
fn background_runs_dark_light_dark_along_the_diagonal() {
    let bytes = bake_background(&BackgroundGradient::default(), 100, 100);
    let px = |x: u32, y: u32| {
        let i = ((y * 100 + x) * 4) as usize;
        [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
    };
    assert_eq!(px(0, 0)[3], 255);
    assert!(px(50, 50)[2] > px(0, 0)[2]);
    assert!(px(50, 50)[2] > px(99, 99)[2]);
}

#[test]
fn shadow_ratio_keys_round_trip_on_grid() {
    for k in [0, 1, 17, 32, 64] {
        assert_eq!(shadow_ratio_key(shadow_ratio_from_key(k)), k);
    }
    assert_eq!(shadow_ratio_key(2.0), SHADOW_RATIO_STEPS);
}
