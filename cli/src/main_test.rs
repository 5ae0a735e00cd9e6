use clap::Parser;

use super::*;

#[test]
fn empty_input_uses_defaults() {
    assert_eq!(parse_config("  \n").unwrap(), EqualizerConfig::default());
}

#[test]
fn partial_config_is_merged() {
    let config = parse_config(r#"{ "aspectRatio": 2, "values": [{ "label": "x" }] }"#).unwrap();
    assert!((config.aspect_ratio - 2.0).abs() < f64::EPSILON);
    assert_eq!(config.values.len(), 1);
    assert_eq!(config.css_prefix, "equalizer__");
}

#[test]
fn invalid_config_is_reported() {
    assert!(matches!(parse_config(r#"{ "aspectRatio": 0 }"#), Err(CliError::Config(_))));
    assert!(matches!(parse_config("{"), Err(CliError::InvalidJson(_))));
}

#[test]
fn overrides_clamp_like_inputs() {
    let config = EqualizerConfig::default();
    assert_eq!(thumb_values(&config, &[150.0]).unwrap(), vec![100.0, 33.0]);
    assert_eq!(thumb_values(&config, &[-3.0, 20.4]).unwrap(), vec![0.0, 20.0]);
}

#[test]
fn too_many_overrides_is_an_error() {
    let err = thumb_values(&EqualizerConfig::default(), &[1.0, 2.0, 3.0]).unwrap_err();
    assert!(matches!(err, CliError::TooManyValues { given: 3, thumbs: 2 }));
}

#[test]
fn single_thumb_curve() {
    let config = parse_config(
        r#"{ "aspectRatio": 2, "startingPointY": 100, "endingPointY": 0, "values": [{ "label": "x", "defaultPosition": 0 }] }"#,
    )
    .unwrap();
    let path = curve(&config, &[]).unwrap();
    assert_eq!(path.to_string(), "M 0,100 C 50,100 50,100 100,100 C 150,100 150,0 200,0");
}

#[test]
fn values_flag_splits_on_commas() {
    let cli = Cli::try_parse_from(["equalizer", "--values", "10,20", "path", "--split"]).unwrap();
    assert_eq!(cli.values, vec![10.0, 20.0]);
    assert!(matches!(cli.command, Command::Path { split: true }));
}
