use super::*;

#[test]
fn record_accepts_upstream_keys_and_keeps_extras() {
    let json = r#"{"secuencia":"MKT","nombre":"Insulin","organism":"Homo sapiens","length":3}"#;
    let rec = ProteinRecord::from_reader(json.as_bytes()).unwrap();
    assert_eq!(rec.sequence.as_deref(), Some("MKT"));
    assert_eq!(rec.display_name(), "Insulin");
    assert_eq!(rec.extra["organism"], "Homo sapiens");
    assert_eq!(rec.extra["length"], 3);

    let out = serde_json::to_value(&rec).unwrap();
    assert_eq!(out["sequence"], "MKT");
    assert_eq!(out["organism"], "Homo sapiens");
}

#[test]
fn record_fields_are_optional() {
    let rec = ProteinRecord::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(rec.sequence, None);
    assert_eq!(rec.display_name(), DEFAULT_DISPLAY_NAME);

    let blank = ProteinRecord {
        display_name: Some("  ".into()),
        ..ProteinRecord::default()
    };
    assert_eq!(blank.display_name(), DEFAULT_DISPLAY_NAME);
}

#[test]
fn malformed_record_is_a_validation_error() {
    let err = ProteinRecord::from_reader("[1,2]".as_bytes()).unwrap_err();
    assert!(matches!(err, AminovizError::Validation(_)), "{err}");
}

#[test]
fn options_default_and_parse() {
    assert_eq!(
        VizOptions::from_reader("{}".as_bytes()).unwrap(),
        VizOptions::default()
    );
    let opts =
        VizOptions::from_reader(r#"{"layout_mode":"wave","speed":2.0,"running":false}"#.as_bytes())
            .unwrap();
    assert_eq!(opts.layout_mode, LayoutMode::Wave);
    assert!(!opts.running);
}

#[test]
fn options_reject_bad_speed_and_unknown_fields() {
    assert!(VizOptions::from_reader(r#"{"speed":4.0}"#.as_bytes()).is_err());
    assert!(VizOptions::from_reader(r#"{"speed":-0.5}"#.as_bytes()).is_err());
    assert!(VizOptions::from_reader(r#"{"sped":1.0}"#.as_bytes()).is_err());
}

#[test]
fn animation_state_snaps_speed() {
    let opts = VizOptions {
        speed: 1.26,
        ..VizOptions::default()
    };
    let st = opts.animation_state().unwrap();
    assert!((st.speed - 1.3).abs() < 1e-12);
    assert!(st.running);
    assert_eq!(st.elapsed_ms, 0.0);
}
