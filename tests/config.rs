use chem_virtual_lab::config::{self, ConfigError};
use chem_virtual_lab::session::Session;

#[test]
fn empty_file_yields_defaults() {
    let cfg = config::parse("").expect("parse");
    assert_eq!(cfg.language, "auto");
    assert!(cfg.language_pack_dir.is_none());
    assert!(!cfg.titration.noise_enabled);
    assert!((cfg.titration.noise_amplitude_ms - 0.01).abs() < 1e-12);
    assert!(cfg.titration.noise_seed.is_none());
    assert!((cfg.phenol.unknown_sample_percent - 45.0).abs() < 1e-12);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let cfg = config::parse(
        r#"
        language = "ko"

        [titration]
        noise_enabled = true
        noise_seed = 7
        "#,
    )
    .expect("parse");
    assert_eq!(cfg.language, "ko");
    assert!(cfg.titration.noise_enabled);
    assert_eq!(cfg.titration.noise_seed, Some(7));
    assert!((cfg.titration.noise_amplitude_ms - 0.01).abs() < 1e-12);

    let session = Session::from_config(&cfg);
    assert!(session.titration.meter.is_noisy());
}

#[test]
fn unknown_sample_percent_is_clamped_into_the_open_range() {
    let cfg = config::parse("[phenol]\nunknown_sample_percent = 150.0\n").expect("parse");
    let session = Session::from_config(&cfg);
    assert!((session.unknown_sample_percent - 99.0).abs() < 1e-12);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = config::parse("language = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = std::env::temp_dir().join(format!("chem_virtual_lab_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("config.toml");
    let _ = std::fs::remove_file(&path);

    let cfg = config::load_from(&path).expect("load");
    assert!(path.exists());
    assert_eq!(cfg.path(), Some(path.as_path()));

    let mut changed = cfg.clone();
    changed.phenol.unknown_sample_percent = 60.0;
    changed.save().expect("save");
    let reloaded = config::load_from(&path).expect("reload");
    assert!((reloaded.phenol.unknown_sample_percent - 60.0).abs() < 1e-12);

    let _ = std::fs::remove_dir_all(&dir);
}
