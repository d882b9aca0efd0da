use super::*;
use crate::sequence::normalize::normalize;

fn input<'a>(seq: &'a Sequence, anim: AnimationState, hovered: Option<usize>) -> SceneInput<'a> {
    SceneInput {
        sequence: seq,
        surface: SurfaceSize::new(600, 400).unwrap(),
        anim,
        mode: LayoutMode::Spiral,
        hovered,
    }
}

fn running_at(elapsed_ms: f64) -> AnimationState {
    AnimationState {
        running: true,
        speed: 1.0,
        elapsed_ms,
    }
}

fn paused_at(elapsed_ms: f64) -> AnimationState {
    AnimationState {
        running: false,
        ..running_at(elapsed_ms)
    }
}

#[test]
fn one_node_per_residue_in_draw_order() {
    let seq = normalize(Some("MKTVG"));
    let scene = compile_scene(&input(&seq, running_at(0.0), None));
    assert_eq!(scene.nodes.len(), 5);
    for (i, n) in scene.nodes.iter().enumerate() {
        assert_eq!(n.index, i);
        assert_eq!(Some(n.residue), seq.get(i));
    }
}

#[test]
fn radius_follows_size_and_pulse_formula() {
    let seq = normalize(Some("WA"));
    let anim = running_at(1234.0);
    let scene = compile_scene(&input(&seq, anim, None));
    for n in &scene.nodes {
        let expected_pulse = 1.0 + 0.2 * (1234.0 * 0.01 + (n.index as f64) * 0.1).sin();
        assert!((n.pulse - expected_pulse).abs() < 1e-12);
        assert!((n.radius - 8.0 * n.residue.size() * expected_pulse).abs() < 1e-12);
        assert_eq!(n.radius, node_radius(n.residue, n.index, &anim));
    }
}

#[test]
fn paused_frames_are_frozen_at_unit_pulse() {
    let seq = normalize(Some("MKTVRQERLK"));
    let a = compile_scene(&input(&seq, paused_at(5000.0), None));
    let b = compile_scene(&input(&seq, paused_at(5000.0), None));
    for (x, y) in a.nodes.iter().zip(&b.nodes) {
        assert_eq!(x.center, y.center);
        assert_eq!(x.pulse, 1.0);
        assert_eq!(y.pulse, 1.0);
    }
}

#[test]
fn advancing_time_while_running_changes_a_pulse() {
    let seq = normalize(Some("MKTVRQERLK"));
    let a = compile_scene(&input(&seq, running_at(1000.0), None));
    let b = compile_scene(&input(&seq, running_at(1016.0), None));
    assert!(a.nodes.iter().zip(&b.nodes).any(|(x, y)| x.pulse != y.pulse));
}

#[test]
fn hovered_node_is_opaque_with_larger_shadow_and_label() {
    let seq = normalize(Some("AAAA"));
    let scene = compile_scene(&input(&seq, paused_at(0.0), Some(2)));
    let hovered = &scene.nodes[2];
    let plain = &scene.nodes[1];

    assert!(hovered.hovered);
    assert_eq!(hovered.fill.a, 255);
    assert_eq!(plain.fill.a, 204);
    assert!(hovered.shadow.blur > plain.shadow.blur);
    // Alanine at pulse 1 has radius 6.4: too small for a label unless hovered.
    assert!(hovered.label.is_some());
    assert!(plain.label.is_none());
}

#[test]
fn large_nodes_are_labelled_and_font_is_capped() {
    let seq = normalize(Some("W"));
    let scene = compile_scene(&input(&seq, paused_at(0.0), None));
    let n = &scene.nodes[0];
    assert!(n.radius > LABEL_MIN_RADIUS);
    let label = n.label.unwrap();
    assert_eq!(label.letter, 'W');
    assert_eq!(label.font_px, (14.4f64 * 0.8).min(LABEL_MAX_FONT_PX));
    assert_eq!(label.color, Rgba8::from_hex(0xffffff));
}

#[test]
fn special_residues_get_outline_and_dark_label() {
    let seq = normalize(Some("GA"));
    let scene = compile_scene(&input(&seq, paused_at(0.0), Some(0)));
    let g = &scene.nodes[0];
    assert!(g.outline.is_some());
    assert_eq!(g.label.unwrap().color, Rgba8::from_hex(0x333333));
    assert!(scene.nodes[1].outline.is_none());
}

#[test]
fn backbone_visits_every_center() {
    use kurbo::PathEl;

    let seq = normalize(Some("MKTV"));
    let scene = compile_scene(&input(&seq, running_at(10.0), None));
    let els: Vec<_> = scene.backbone.path.elements().to_vec();
    assert_eq!(els.len(), 4);
    assert!(matches!(els[0], PathEl::MoveTo(p) if p == scene.nodes[0].center));
    for (el, node) in els[1..].iter().zip(&scene.nodes[1..]) {
        assert!(matches!(*el, PathEl::LineTo(p) if p == node.center));
    }
    assert_eq!(scene.backbone.color.a, 26);
}

#[test]
fn background_gradient_samples_stops() {
    let g = BackgroundGradient::default();
    assert_eq!(g.sample(0.0), Rgba8::from_hex(0x0f0f23));
    assert_eq!(g.sample(0.5), Rgba8::from_hex(0x1a1a3a));
    assert_eq!(g.sample(1.0), Rgba8::from_hex(0x0f0f23));
    assert_eq!(g.sample(2.0), Rgba8::from_hex(0x0f0f23));
}

#[test]
fn background_opacity_follows_its_stops() {
    assert!(BackgroundGradient::default().is_opaque());
    let translucent = BackgroundGradient {
        stops: vec![
            (0.0, Rgba8::from_hex(0x0f0f23)),
            (1.0, Rgba8::from_hex(0x0f0f23).with_alpha(0.5)),
        ],
    };
    assert!(!translucent.is_opaque());
    assert!(!BackgroundGradient { stops: Vec::new() }.is_opaque());
}
