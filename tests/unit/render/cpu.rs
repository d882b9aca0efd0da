use super::*;
use crate::{
    anim::state::AnimationState,
    foundation::core::SurfaceSize,
    layout::engine::LayoutMode,
    render::scene::{SceneInput, compile_scene},
    sequence::normalize::normalize,
};

fn unlabeled() -> CpuBackend {
    CpuBackend::new(RenderSettings {
        draw_labels: false,
        label_cache_capacity: 8,
    })
}

fn paused_scene(letters: &str, w: u32, h: u32) -> FrameScene {
    let seq = normalize(Some(letters));
    compile_scene(&SceneInput {
        sequence: &seq,
        surface: SurfaceSize::new(w, h).unwrap(),
        anim: AnimationState {
            running: false,
            speed: 1.0,
            elapsed_ms: 0.0,
        },
        mode: LayoutMode::Linear,
        hovered: None,
    })
}

#[test]
fn corners_show_the_background_gradient() {
    let mut be = unlabeled();
    let frame = be.render_scene(&paused_scene("W", 100, 100)).unwrap();
    assert_eq!((frame.width, frame.height), (100, 100));
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 100 * 100 * 4);
    let [r, g, b, a] = frame.pixel(0, 0).unwrap();
    assert_eq!(a, 255);
    assert!(r <= 17 && g <= 17 && (33..=38).contains(&b), "{r} {g} {b}");
}

#[test]
fn node_center_takes_the_residue_color() {
    let mut be = unlabeled();
    let frame = be.render_scene(&paused_scene("W", 100, 100)).unwrap();
    let [r, g, b, _] = frame.pixel(50, 50).unwrap();
    assert!(g > r && g > b, "{r} {g} {b}");
}

#[test]
fn glycine_gets_a_dark_outline() {
    let mut be = unlabeled();
    let frame = be.render_scene(&paused_scene("G", 100, 100)).unwrap();
    let center = frame.pixel(50, 50).unwrap();
    let rim = frame.pixel(54, 50).unwrap();
    assert!(center[0] > 200, "{center:?}");
    assert!(rim[0] < 100, "{rim:?}");
}

#[test]
fn repeated_frames_are_identical() {
    let mut be = unlabeled();
    let scene = paused_scene("MKTAYIAK", 160, 120);
    let a = be.render_scene(&scene).unwrap();
    let b = be.render_scene(&scene).unwrap();
    assert_eq!(a.data, b.data);
}

#[test]
fn surface_resize_reallocates() {
    let mut be = unlabeled();
    be.render_scene(&paused_scene("MK", 64, 64)).unwrap();
    let f = be.render_scene(&paused_scene("MK", 80, 40)).unwrap();
    assert_eq!((f.width, f.height), (80, 40));
    assert_eq!(f.data.len(), 80 * 40 * 4);
}

#[test]
fn oversized_surface_is_a_render_error() {
    let mut be = unlabeled();
    let err = be
        .render_scene(&paused_scene("A", 70_000, 4))
        .unwrap_err();
    assert!(matches!(err, AminovizError::Render(_)), "{err}");
}

#[test]
fn premul_bytes_must_match_dimensions() {
    assert!(pixmap_from_premul_bytes(&[0; 16], 2, 2).is_ok());
    assert!(pixmap_from_premul_bytes(&[0; 12], 2, 2).is_err());
}

#[test]
fn sprites_over_an_opaque_background_keep_every_pixel_opaque() {
    let seq = normalize(Some("MKTV"));
    let scene = compile_scene(&SceneInput {
        sequence: &seq,
        surface: SurfaceSize::new(120, 120).unwrap(),
        anim: AnimationState {
            running: false,
            speed: 1.0,
            elapsed_ms: 0.0,
        },
        mode: LayoutMode::Circular,
        hovered: Some(1),
    });
    let frame = unlabeled().render_scene(&scene).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn translucent_background_alpha_is_left_alone() {
    let mut scene = paused_scene("W", 60, 60);
    scene.background.stops = vec![
        (0.0, Rgba8::from_hex(0x000000).with_alpha(0.0)),
        (1.0, Rgba8::from_hex(0x000000).with_alpha(0.0)),
    ];
    let frame = unlabeled().render_scene(&scene).unwrap();
    assert_eq!(frame.pixel(0, 0).unwrap()[3], 0);
}
