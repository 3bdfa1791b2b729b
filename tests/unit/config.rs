use super::*;

#[test]
fn defaults_fill_missing_fields() {
    let cfg = PlayerConfig::from_json(r#"{ "animation": { "draw_duration_ms": 1000 } }"#).unwrap();
    assert_eq!(cfg.svg_dir, PathBuf::from("svg"));
    assert!(!cfg.autoplay);
    assert_eq!(cfg.animation.draw_duration_ms, Some(1000.0));
    let options = cfg.animation_options();
    assert_eq!(options.draw_duration_ms, 1000.0);
    assert_eq!(options.min_stroke_duration_ms, 500.0);
    assert_eq!(options.animation_delay_ms, 0.0);
    assert_eq!(cfg.mount_options().animation, options);
}

#[test]
fn autoplay_configs_keep_the_lead_in_unless_overridden() {
    let cfg = PlayerConfig::from_json(r#"{ "autoplay": true }"#).unwrap();
    assert_eq!(cfg.mount_options().animation, AnimationOptions::autoplay());

    let cfg = PlayerConfig::from_json(
        r#"{ "autoplay": true, "animation": { "animation_delay_ms": 0, "draw_duration_ms": 900 } }"#,
    )
    .unwrap();
    let options = cfg.mount_options().animation;
    assert_eq!(options.animation_delay_ms, 0.0);
    assert_eq!(options.draw_duration_ms, 900.0);
}

#[test]
fn zero_minimum_stroke_duration_is_rejected() {
    let err = PlayerConfig::from_json(
        r#"{ "animation": { "draw_duration_ms": 0, "min_stroke_duration_ms": 0 } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, HitsujunError::Validation(_)));
}

#[test]
fn invalid_documents_are_rejected() {
    let err = PlayerConfig::from_json(r#"{ "svg_dir": "" }"#).unwrap_err();
    assert!(matches!(err, HitsujunError::Validation(_)));

    let err =
        PlayerConfig::from_json(r#"{ "animation": { "animation_delay_ms": -5 } }"#).unwrap_err();
    assert!(matches!(err, HitsujunError::Validation(_)));

    let err = PlayerConfig::from_json(r#"{ "svg_directory": "x" }"#).unwrap_err();
    assert!(matches!(err, HitsujunError::Serde(_)));
}

#[test]
fn from_path_resolves_relative_paths() {
    let dir = PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("player.json");
    std::fs::write(
        &path,
        r#"{ "svg_dir": "kanji", "metadata_path": "meta.json", "autoplay": true }"#,
    )
    .unwrap();

    let cfg = PlayerConfig::from_path(&path).unwrap();
    assert_eq!(cfg.svg_dir, dir.join("kanji"));
    assert_eq!(cfg.metadata_path, Some(dir.join("meta.json")));
    assert!(cfg.mount_options().autoplay);

    let err = PlayerConfig::from_path(dir.join("missing.json")).unwrap_err();
    assert!(matches!(err, HitsujunError::Other(_)));
}
