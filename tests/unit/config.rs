use super::*;
use crate::animation::ease::Ease;

#[test]
fn empty_json_is_the_default_config() {
    let cfg = AnimatorConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, AnimatorConfig::default());
    assert_eq!(cfg.frame_count, 80);
    assert_eq!(cfg.pin.scroll_distance_px, 3000.0);
    assert_eq!(cfg.pin.scrub_secs, 0.5);
    assert_eq!(cfg.content_fade.end_px, 1000.0);
    assert_eq!(cfg.content_fade.ease, Ease::Power2In);
    assert_eq!(cfg.hint_fade.ease, Ease::Power1Out);
    assert_eq!(cfg.hint_fade.end_px, 200.0);
    assert_eq!(cfg.failure_policy, FailurePolicy::SettleAndSubstitute);
}

#[test]
fn partial_json_overrides_selected_fields() {
    let cfg = AnimatorConfig::from_json_str(
        r#"{
            "frame_count": 12,
            "locator": { "base_dir": "frames", "stem": "reel", "extension": "png" },
            "pin": { "scroll_distance_px": 1200 },
            "failure_policy": "stall",
            "index_policy": "clamp",
            "clear_rgba": [18, 20, 28, 255]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.frame_count, 12);
    assert_eq!(cfg.locator.stem, "reel");
    assert_eq!(cfg.locator.pad_width, 3);
    assert_eq!(cfg.pin.scroll_distance_px, 1200.0);
    assert_eq!(cfg.pin.scrub_secs, 0.5);
    assert_eq!(cfg.failure_policy, FailurePolicy::Stall);
    assert_eq!(cfg.renderer_opts().index_policy, IndexPolicy::Clamp);
    assert_eq!(cfg.renderer_opts().clear_rgba, Some([18, 20, 28, 255]));
}

#[test]
fn invalid_values_are_rejected() {
    for json in [
        r#"{ "frame_count": 0 }"#,
        r#"{ "pin": { "scroll_distance_px": 0 } }"#,
        r#"{ "pin": { "scrub_secs": -1 } }"#,
        r#"{ "hint_fade": { "end_px": -5 } }"#,
        r#"{ "locator": { "pad_width": 0 } }"#,
        r#"{ "failure_policy": "retry_forever" }"#,
    ] {
        let err = AnimatorConfig::from_json_str(json).unwrap_err();
        assert!(
            matches!(err, ScrollreelError::Validation(_)),
            "{json}: {err}"
        );
    }
}

#[test]
fn from_path_reports_missing_file() {
    let err = AnimatorConfig::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("exist.json"));
}

#[test]
fn fade_eases_are_configurable_by_tween_name() {
    let cfg = AnimatorConfig::from_json_str(
        r#"{
            "content_fade": { "ease": "power1.in" },
            "hint_fade": { "ease": "power2.out", "end_px": 400 }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.content_fade.ease, Ease::Power1In);
    assert_eq!(cfg.content_fade.end_px, 1000.0);
    assert_eq!(cfg.hint_fade.ease, Ease::Power2Out);
    // 200px into a 400px power2.out track: 1 - 0.5^3 eased, so 0.125 opacity left.
    let opacity = cfg.hint_fade.opacity_at(200.0 / 3000.0, 3000.0);
    assert!((opacity - 0.125).abs() < 1e-9);

    assert!(AnimatorConfig::from_json_str(r#"{ "hint_fade": { "ease": "bounce" } }"#).is_err());
}
